pub mod config;
pub mod display;
pub mod error;
pub mod parser;
pub mod schedule;
pub mod store;
pub mod web;

use rand::Rng;

pub use error::{ConfigurationError, Result, RosterError, StoreError};
pub use schedule::{generate, GenerationResult};
pub use store::{CsvStore, MemoryStore, RosterStore};

/// Fetches the period's snapshot once and builds a roster preview from it.
/// Nothing is written back to the store.
pub fn generate_roster<S, R>(store: &S, period: &str, rng: &mut R) -> Result<GenerationResult>
where
    S: RosterStore + ?Sized,
    R: Rng + ?Sized,
{
    let snapshot = store.load_snapshot(period)?;
    Ok(generate(period, &snapshot, rng)?)
}
