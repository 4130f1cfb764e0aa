use std::collections::HashSet;

use super::slot_utils::format_day_month;
use super::types::SlotResult;

/// Builds operator-facing warnings from the slot results without touching them.
///
/// Missing-function alerts come first, in slot order, followed by anything the
/// double-check pass finds.
pub fn collect_alerts(results: &[SlotResult]) -> Vec<String> {
    let mut alerts: Vec<String> = results.iter().filter_map(missing_alert).collect();
    alerts.extend(results.iter().flat_map(duplicate_alerts));
    alerts
}

/// `Culto (05/05): faltam "Som", "Mídia"`
pub fn missing_alert(result: &SlotResult) -> Option<String> {
    if result.missing.is_empty() {
        return None;
    }

    let functions: Vec<String> = result.missing.iter().map(|f| format!("\"{}\"", f)).collect();
    Some(format!(
        "{} ({}): faltam {}",
        result.label,
        format_day_month(result.date),
        functions.join(", ")
    ))
}

/// Re-scans a slot for a volunteer listed more than once
pub fn duplicate_alerts(result: &SlotResult) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut alerts = Vec::new();

    for assignment in &result.assignments {
        if !seen.insert(assignment.volunteer_id.as_str())
            && reported.insert(assignment.volunteer_id.as_str())
        {
            tracing::warn!(
                slot = %result.slot_id,
                volunteer = %assignment.volunteer_id,
                "Volunteer assigned more than once in the same slot"
            );
            alerts.push(format!(
                "{} ({}): \"{}\" escalado(a) mais de uma vez",
                result.label,
                format_day_month(result.date),
                assignment.volunteer_name
            ));
        }
    }

    alerts
}
