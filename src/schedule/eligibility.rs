use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use super::types::{AvailabilityResponse, Volunteer};

/// Lookup tables the assignment engine consults for one generation pass
#[derive(Debug, Clone)]
pub struct EligibilityIndex {
    /// volunteer id -> (slot id -> declared availability)
    availability: HashMap<String, HashMap<String, bool>>,
    /// Eligible volunteers in shuffled order; position is the tie-breaker
    volunteers: Vec<Volunteer>,
}

impl EligibilityIndex {
    /// Builds the index, dropping volunteers without functions and shuffling
    /// the rest (Fisher-Yates) with the supplied random source
    pub fn build<R: Rng + ?Sized>(
        volunteers: &[Volunteer],
        responses: &[AvailabilityResponse],
        rng: &mut R,
    ) -> Self {
        let mut eligible: Vec<Volunteer> = volunteers
            .iter()
            .filter(|v| !v.functions.is_empty())
            .cloned()
            .collect();
        eligible.shuffle(rng);

        let mut availability: HashMap<String, HashMap<String, bool>> = HashMap::new();
        for response in responses {
            // Later responses for the same pair overwrite earlier ones
            availability
                .entry(response.volunteer_id.clone())
                .or_default()
                .insert(response.slot_id.clone(), response.available);
        }

        EligibilityIndex {
            availability,
            volunteers: eligible,
        }
    }

    /// Shuffled eligible volunteers
    pub fn volunteers(&self) -> &[Volunteer] {
        &self.volunteers
    }

    pub fn is_empty(&self) -> bool {
        self.volunteers.is_empty()
    }

    /// Declared availability; `None` when the volunteer never answered for this slot
    pub fn declared(&self, volunteer_id: &str, slot_id: &str) -> Option<bool> {
        self.availability
            .get(volunteer_id)
            .and_then(|slots| slots.get(slot_id))
            .copied()
    }

    /// Unanswered counts as available; only an explicit `false` excludes
    pub fn is_available(&self, volunteer_id: &str, slot_id: &str) -> bool {
        self.declared(volunteer_id, slot_id).unwrap_or(true)
    }
}
