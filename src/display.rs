use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::schedule::{format_day_month, format_time, GenerationResult, SlotResult};

/// Total number of functions one volunteer received in a roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolunteerLoad {
    pub volunteer_id: String,
    pub name: String,
    pub assignments: usize,
}

/// Formats a slot heading: `05/05 19:00 Arena Jovem [sub_event]`
pub fn format_slot_heading(slot: &SlotResult) -> String {
    format!(
        "{} {} {} [{}]",
        format_day_month(slot.date),
        format_time(slot.time),
        slot.label,
        slot.kind
    )
}

/// Per-volunteer totals, most loaded first, then by name
pub fn volunteer_loads(result: &GenerationResult) -> Vec<VolunteerLoad> {
    let mut loads: HashMap<&str, VolunteerLoad> = HashMap::new();
    for assignment in result.slots.iter().flat_map(|s| &s.assignments) {
        loads
            .entry(assignment.volunteer_id.as_str())
            .or_insert_with(|| VolunteerLoad {
                volunteer_id: assignment.volunteer_id.clone(),
                name: assignment.volunteer_name.clone(),
                assignments: 0,
            })
            .assignments += 1;
    }

    let mut loads: Vec<VolunteerLoad> = loads.into_values().collect();
    loads.sort_by(|a, b| b.assignments.cmp(&a.assignments).then_with(|| a.name.cmp(&b.name)));
    loads
}

/// Renders the roster preview as plain text, one block per slot
pub fn render_roster(result: &GenerationResult) -> String {
    let mut out = String::new();

    for slot in &result.slots {
        out.push_str(&format_slot_heading(slot));
        out.push('\n');
        for assignment in &slot.assignments {
            out.push_str(&format!("  {} -> {}\n", assignment.function, assignment.volunteer_name));
        }
        for function in &slot.missing {
            out.push_str(&format!("  {} -> [VAGO]\n", function));
        }
    }

    if !result.alerts.is_empty() {
        out.push_str(&format!("\nAlerts ({}):\n", result.alerts.len()));
        for alert in &result.alerts {
            out.push_str(&format!("  - {}\n", alert));
        }
    }

    let loads = volunteer_loads(result);
    if !loads.is_empty() {
        out.push_str("\nAssignments per volunteer:\n");
        for load in &loads {
            out.push_str(&format!("  {}: {}\n", load.name, load.assignments));
        }
    }

    out
}

/// Writes the text preview to a file
pub fn write_roster_to_file<P: AsRef<Path>>(
    title: &str,
    result: &GenerationResult,
    path: P,
) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "** {} **", title)?;
    write!(file, "{}", render_roster(result))?;
    Ok(())
}

/// Prints the roster preview with a short summary
pub fn print_roster(title: &str, result: &GenerationResult) {
    println!("\n=== {} ===", title);
    println!(
        "Slots: {}, functions filled: {}, unfilled: {}",
        result.slots.len(),
        result.total_assignments(),
        result.total_missing()
    );
    if !result.alerts.is_empty() {
        println!("⚠️  {} alert(s)", result.alerts.len());
    }
    println!();
    print!("{}", render_roster(result));
}
