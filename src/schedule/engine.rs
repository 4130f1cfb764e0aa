use std::collections::HashMap;

use super::eligibility::EligibilityIndex;
use super::types::{Assignment, Slot, SlotResult, Volunteer};

/// Running number of functions each volunteer has taken so far in this pass
pub type AssignmentCounts<'a> = HashMap<&'a str, usize>;

/// Greedy assignment over slots that are already normalized and in chronological order.
///
/// For each slot and each required function (declared order), the candidate with
/// the fewest assignments so far wins; ties go to the earlier position in the
/// shuffled volunteer list. A function without candidates is recorded as missing.
pub fn assign_slots(
    slots: &[Slot],
    index: &EligibilityIndex,
    names: &HashMap<String, String>,
) -> Vec<SlotResult> {
    let mut counts: AssignmentCounts<'_> = HashMap::new();
    let mut results: Vec<SlotResult> = Vec::with_capacity(slots.len());

    for slot in slots {
        let result = assign_slot(slot, index, names, results.last(), &mut counts);
        results.push(result);
    }

    results
}

/// Fills one slot. `previous` is the slot right before it in chronological order;
/// anyone serving there is blocked here.
pub fn assign_slot<'a>(
    slot: &Slot,
    index: &'a EligibilityIndex,
    names: &HashMap<String, String>,
    previous: Option<&SlotResult>,
    counts: &mut AssignmentCounts<'a>,
) -> SlotResult {
    let mut result = SlotResult::from_slot(slot);

    for function in &slot.functions {
        // a function listed twice is still filled once
        if result.assignments.iter().any(|a| &a.function == function)
            || result.missing.contains(function)
        {
            continue;
        }

        let chosen = pick_candidate(index, slot, function, &result, previous, counts);

        match chosen {
            Some(volunteer) => {
                *counts.entry(volunteer.id.as_str()).or_insert(0) += 1;
                result.assignments.push(Assignment {
                    slot_id: slot.id.clone(),
                    function: function.clone(),
                    volunteer_id: volunteer.id.clone(),
                    volunteer_name: display_name(volunteer, names),
                });
            }
            None => {
                tracing::debug!(slot = %slot.id, function = %function, "No candidate for function");
                result.missing.push(function.clone());
            }
        }
    }

    result
}

fn pick_candidate<'a>(
    index: &'a EligibilityIndex,
    slot: &Slot,
    function: &str,
    current: &SlotResult,
    previous: Option<&SlotResult>,
    counts: &AssignmentCounts<'a>,
) -> Option<&'a Volunteer> {
    index
        .volunteers()
        .iter()
        .filter(|v| v.can_perform(function))
        .filter(|v| !current.is_assigned(&v.id))
        .filter(|v| !previous.is_some_and(|p| p.is_assigned(&v.id)))
        .filter(|v| index.is_available(&v.id, &slot.id))
        // min_by_key keeps the first of equal minimums, i.e. the earlier shuffled position
        .min_by_key(|v| counts.get(v.id.as_str()).copied().unwrap_or(0))
}

fn display_name(volunteer: &Volunteer, names: &HashMap<String, String>) -> String {
    names
        .get(&volunteer.id)
        .filter(|name| !name.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| volunteer.name.clone())
}
