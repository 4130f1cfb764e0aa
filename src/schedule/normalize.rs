use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

use super::types::{Slot, SlotKind};

type MergeKey = (NaiveDate, NaiveTime, String);

/// Collapses duplicate slot records and returns them in chronological order.
///
/// - a `service` whose label mentions "arena" is retyped to `sub_event`
/// - `service`/`sub_event` slots sharing (date, time, lowercase label) merge,
///   keeping the `sub_event`, or the one with more required functions
/// - `special_event` slots are always kept, duplicates included
pub fn normalize_slots(slots: &[Slot]) -> Vec<Slot> {
    let mut ordered: Vec<Slot> = slots.iter().cloned().map(retype_arena).collect();
    // Stable, so equal timestamps keep their input order
    ordered.sort_by_key(Slot::sort_key);

    let mut normalized: Vec<Slot> = Vec::with_capacity(ordered.len());
    let mut seen: HashMap<MergeKey, usize> = HashMap::new();

    for slot in ordered {
        if !slot.kind.is_mergeable() {
            normalized.push(slot);
            continue;
        }

        let key = (slot.date, slot.time, slot.label.to_lowercase());
        match seen.get(&key) {
            Some(&index) => {
                if prefer_incoming(&normalized[index], &slot) {
                    tracing::debug!(
                        kept = %slot.id,
                        dropped = %normalized[index].id,
                        label = %slot.label,
                        "Merged duplicate slot"
                    );
                    normalized[index] = slot;
                } else {
                    tracing::debug!(
                        kept = %normalized[index].id,
                        dropped = %slot.id,
                        label = %slot.label,
                        "Merged duplicate slot"
                    );
                }
            }
            None => {
                seen.insert(key, normalized.len());
                normalized.push(slot);
            }
        }
    }

    normalized
}

fn retype_arena(mut slot: Slot) -> Slot {
    if slot.kind == SlotKind::Service && slot.label.to_lowercase().contains("arena") {
        slot.kind = SlotKind::SubEvent;
    }
    slot
}

/// Whether a colliding slot should replace the one already kept
fn prefer_incoming(kept: &Slot, incoming: &Slot) -> bool {
    match (kept.kind, incoming.kind) {
        (SlotKind::SubEvent, SlotKind::Service) => false,
        (SlotKind::Service, SlotKind::SubEvent) => true,
        _ => incoming.functions.len() > kept.functions.len(),
    }
}
