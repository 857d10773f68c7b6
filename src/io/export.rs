//! CSV export of the wiring schedule.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sizing::wiring::{CircuitSizing, WiringPlan};

/// Column header for the wiring schedule.
const HEADER: &str = "circuit,model,count,power_kw,voltage_v,current_a,\
                      breaker_a,breaker_saturated,cable,cable_count,\
                      main_mm2,neutral_mm2,ampacity_a";

/// Writes the wiring schedule to a CSV file at the given path.
///
/// One row per inverter model followed by the main switchboard row.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_schedule(plan: &WiringPlan, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_schedule(plan, buf)
}

/// Writes the wiring schedule as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_schedule(plan: &WiringPlan, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for (i, inv) in plan.inverters.iter().enumerate() {
        wtr.write_record(row(
            &format!("INV{}", i + 1),
            &inv.model.id,
            inv.count,
            &inv.circuit,
        ))?;
    }
    wtr.write_record(row("MAIN", "", 1, &plan.main))?;

    wtr.flush()?;
    Ok(())
}

fn row(circuit: &str, model: &str, count: u32, c: &CircuitSizing) -> [String; 13] {
    [
        circuit.to_string(),
        model.to_string(),
        count.to_string(),
        format!("{:.3}", c.power_kw),
        format!("{:.0}", c.voltage_v),
        format!("{:.2}", c.current_a),
        c.breaker.rating_a.to_string(),
        c.breaker.saturated.to_string(),
        c.cable.designation.clone(),
        c.cable.count.to_string(),
        c.cable.main_size_mm2.to_string(),
        c.cable.neutral_size_mm2.to_string(),
        c.cable.ampacity_a.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::inverter::InverterModel;
    use crate::sizing::optimizer::find_optimal_combination;
    use crate::sizing::wiring::{WiringOptions, plan_wiring};

    fn plan() -> Option<WiringPlan> {
        let models = vec![
            InverterModel::new("inv-20", "Inv 20", 20.0, 98.0, 4),
            InverterModel::new("inv-15", "Inv 15", 15.0, 98.0, 3),
        ];
        let combo = find_optimal_combination(55.0, &models)?;
        plan_wiring(&combo, &WiringOptions::default()).ok().flatten()
    }

    fn render(plan: &WiringPlan) -> String {
        let mut buf = Vec::new();
        write_schedule(plan, &mut buf).ok();
        String::from_utf8(buf).unwrap_or_default()
    }

    #[test]
    fn header_and_main_row() {
        let output = plan().map(|p| render(&p)).unwrap_or_default();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines.first().copied(),
            Some(
                "circuit,model,count,power_kw,voltage_v,current_a,\
                 breaker_a,breaker_saturated,cable,cable_count,\
                 main_mm2,neutral_mm2,ampacity_a"
            )
        );
        assert!(lines.last().is_some_and(|l| l.starts_with("MAIN,,1,55.000,380,")));
    }

    #[test]
    fn one_row_per_model_plus_main() {
        let plan = plan();
        let models = plan.as_ref().map_or(0, |p| p.inverters.len());
        let output = plan.map(|p| render(&p)).unwrap_or_default();
        assert_eq!(output.lines().count(), 1 + models + 1);
    }

    #[test]
    fn rows_parse_back() {
        let output = plan().map(|p| render(&p)).unwrap_or_default();
        let mut rdr = csv::ReaderBuilder::new().from_reader(output.as_bytes());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(13));
        for record in rdr.records() {
            let rec = record.ok();
            assert!(rec.as_ref().is_some_and(|r| r.len() == 13));
            let breaker: Option<u32> = rec.as_ref().and_then(|r| r.get(6)?.parse().ok());
            assert!(breaker.is_some(), "breaker column should be numeric");
        }
    }

    #[test]
    fn deterministic_output() {
        let plan = plan();
        let a = plan.as_ref().map(render);
        let b = plan.as_ref().map(render);
        assert_eq!(a, b);
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().ok();
        let path = dir.as_ref().map(|d| d.path().join("schedule.csv"));
        let written = match (plan(), &path) {
            (Some(plan), Some(path)) => export_schedule(&plan, path).is_ok(),
            _ => false,
        };
        assert!(written);
        let content = path.and_then(|p| std::fs::read_to_string(p).ok());
        assert!(content.is_some_and(|c| c.contains("MAIN")));
    }
}
