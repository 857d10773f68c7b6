//! Standard MCCB rating ladder.

/// Standard breaker ratings in amperes, ascending.
pub const STANDARD_BREAKER_RATINGS_A: [u32; 28] = [
    10, 16, 20, 25, 32, 40, 50, 63, 80, 100, 125, 160, 200, 250, 320, 400, 500, 630, 800, 1000,
    1250, 1600, 2000, 2500, 3200, 4000, 5000, 6300,
];

/// Largest rating on the ladder.
pub const MAX_BREAKER_RATING_A: u32 = STANDARD_BREAKER_RATINGS_A[STANDARD_BREAKER_RATINGS_A.len() - 1];
