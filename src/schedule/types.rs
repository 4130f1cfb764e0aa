use std::collections::{BTreeSet, HashMap};
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Kind of schedulable occasion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Service,
    SubEvent,
    SpecialEvent,
}

impl SlotKind {
    /// Parses the kind names used in data files ("service", "sub_event", "special_event")
    pub fn parse(value: &str) -> Option<SlotKind> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "service" | "culto" => Some(SlotKind::Service),
            "sub_event" | "subevent" => Some(SlotKind::SubEvent),
            "special_event" | "specialevent" | "event" | "evento" => Some(SlotKind::SpecialEvent),
            _ => None,
        }
    }

    /// Special events are operator-curated and never merged
    pub fn is_mergeable(self) -> bool {
        !matches!(self, SlotKind::SpecialEvent)
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SlotKind::Service => "service",
            SlotKind::SubEvent => "sub_event",
            SlotKind::SpecialEvent => "special_event",
        };
        f.write_str(name)
    }
}

/// One schedulable occasion in the period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: String,
    pub kind: SlotKind,
    pub label: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub functions: Vec<String>, // required functions, in declared order
}

impl Slot {
    /// Chronological ordering key (date, then time of day)
    pub fn sort_key(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// A person confirmed to serve in the period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: String,
    pub name: String,
    pub functions: BTreeSet<String>,
}

impl Volunteer {
    pub fn can_perform(&self, function: &str) -> bool {
        self.functions.contains(function)
    }
}

/// Declared availability of one volunteer for one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub volunteer_id: String,
    pub slot_id: String,
    pub available: bool,
}

/// Everything read from the store for one period, fetched once per generation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSnapshot {
    pub slots: Vec<Slot>,
    pub volunteers: Vec<Volunteer>,
    pub availability: Vec<AvailabilityResponse>,
    pub names: HashMap<String, String>, // volunteer id -> display name
}

/// One function of one slot filled by one volunteer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub slot_id: String,
    pub function: String,
    pub volunteer_id: String,
    pub volunteer_name: String,
}

/// Outcome for a single slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotResult {
    pub slot_id: String,
    pub kind: SlotKind,
    pub label: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub functions: Vec<String>,
    pub assignments: Vec<Assignment>,
    pub missing: Vec<String>, // functions nobody could fill
}

impl SlotResult {
    pub fn from_slot(slot: &Slot) -> Self {
        SlotResult {
            slot_id: slot.id.clone(),
            kind: slot.kind,
            label: slot.label.clone(),
            date: slot.date,
            time: slot.time,
            functions: slot.functions.clone(),
            assignments: Vec::new(),
            missing: Vec::new(),
        }
    }

    pub fn is_assigned(&self, volunteer_id: &str) -> bool {
        self.assignments.iter().any(|a| a.volunteer_id == volunteer_id)
    }
}

/// Full roster preview for one period
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub slots: Vec<SlotResult>,
    pub alerts: Vec<String>,
}

impl GenerationResult {
    pub fn total_assignments(&self) -> usize {
        self.slots.iter().map(|s| s.assignments.len()).sum()
    }

    pub fn total_missing(&self) -> usize {
        self.slots.iter().map(|s| s.missing.len()).sum()
    }
}
