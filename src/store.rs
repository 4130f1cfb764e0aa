use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::parser::{load_availability, load_slots, load_volunteers};
use crate::schedule::PeriodSnapshot;

/// Read side of the roster data: one consistent snapshot per generation request
pub trait RosterStore: Send + Sync {
    fn load_snapshot(&self, period: &str) -> Result<PeriodSnapshot, StoreError>;
}

/// Reads `slots.csv`, `volunteers.csv` and (optionally) `availability.csv`
/// from a data directory
#[derive(Debug, Clone)]
pub struct CsvStore {
    data_dir: PathBuf,
}

impl CsvStore {
    pub const SLOTS_FILE: &'static str = "slots.csv";
    pub const VOLUNTEERS_FILE: &'static str = "volunteers.csv";
    pub const AVAILABILITY_FILE: &'static str = "availability.csv";

    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        CsvStore {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl RosterStore for CsvStore {
    fn load_snapshot(&self, period: &str) -> Result<PeriodSnapshot, StoreError> {
        let mut slots = load_slots(self.data_dir.join(Self::SLOTS_FILE), period)?;
        // Stable sort, so the file order decides between equal timestamps
        slots.sort_by_key(|s| s.sort_key());

        let records = load_volunteers(self.data_dir.join(Self::VOLUNTEERS_FILE), period)?;
        let names: HashMap<String, String> = records
            .iter()
            .map(|r| (r.volunteer.id.clone(), r.volunteer.name.clone()))
            .collect();
        let volunteers = records
            .into_iter()
            .filter(|r| r.confirmed && !r.volunteer.functions.is_empty())
            .map(|r| r.volunteer)
            .collect();

        let availability_path = self.data_dir.join(Self::AVAILABILITY_FILE);
        let slot_ids: HashSet<&str> = slots.iter().map(|s| s.id.as_str()).collect();
        let availability = if availability_path.exists() {
            load_availability(&availability_path)?
                .into_iter()
                .filter(|r| slot_ids.contains(r.slot_id.as_str()))
                .collect()
        } else {
            tracing::debug!(path = %availability_path.display(), "No availability file, everyone counts as available");
            Vec::new()
        };

        Ok(PeriodSnapshot {
            slots,
            volunteers,
            availability,
            names,
        })
    }
}

/// Snapshots held in memory, keyed by period
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    periods: HashMap<String, PeriodSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, period: impl Into<String>, snapshot: PeriodSnapshot) {
        self.periods.insert(period.into(), snapshot);
    }
}

impl RosterStore for MemoryStore {
    fn load_snapshot(&self, period: &str) -> Result<PeriodSnapshot, StoreError> {
        let mut snapshot = self
            .periods
            .get(period)
            .cloned()
            .ok_or_else(|| StoreError::UnknownPeriod(period.to_string()))?;
        snapshot.slots.sort_by_key(|s| s.sort_key());
        Ok(snapshot)
    }
}
