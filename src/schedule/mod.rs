pub mod types;
pub mod slot_utils;
pub mod normalize;
pub mod eligibility;
pub mod engine;
pub mod alerts;

use rand::Rng;

use crate::error::ConfigurationError;

pub use types::{
    Assignment, AvailabilityResponse, GenerationResult, PeriodSnapshot, Slot, SlotKind,
    SlotResult, Volunteer,
};
pub use slot_utils::{format_day_month, format_time};
pub use normalize::normalize_slots;
pub use eligibility::EligibilityIndex;
pub use engine::assign_slots;
pub use alerts::collect_alerts;

/// Runs normalizer, index, engine and reporter over an in-memory snapshot.
///
/// Fails only when there is nothing to schedule or nobody to schedule;
/// unfilled functions are reported in the result instead.
pub fn generate<R: Rng + ?Sized>(
    period: &str,
    snapshot: &PeriodSnapshot,
    rng: &mut R,
) -> Result<GenerationResult, ConfigurationError> {
    let slots = normalize_slots(&snapshot.slots);
    if slots.is_empty() {
        return Err(ConfigurationError::NoSlots {
            period: period.to_string(),
        });
    }

    let index = EligibilityIndex::build(&snapshot.volunteers, &snapshot.availability, rng);
    if index.is_empty() {
        return Err(ConfigurationError::NoEligibleVolunteers {
            period: period.to_string(),
        });
    }

    tracing::info!(
        period,
        raw_slots = snapshot.slots.len(),
        slots = slots.len(),
        volunteers = index.volunteers().len(),
        "Generating roster"
    );

    let results = assign_slots(&slots, &index, &snapshot.names);
    let alerts = collect_alerts(&results);

    let generated = GenerationResult {
        slots: results,
        alerts,
    };
    tracing::info!(
        period,
        assigned = generated.total_assignments(),
        missing = generated.total_missing(),
        alerts = generated.alerts.len(),
        "Roster generated"
    );

    Ok(generated)
}
