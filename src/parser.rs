use csv::{Reader, StringRecord};
use std::collections::HashMap;
use std::path::Path;

use crate::error::StoreError;
use crate::schedule::slot_utils::{parse_date, parse_time, split_functions};
use crate::schedule::{AvailabilityResponse, Slot, SlotKind, Volunteer};

/// A volunteer row as read from the sign-up export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolunteerRecord {
    pub volunteer: Volunteer,
    pub confirmed: bool,
}

/// Parses a boolean value from various string representations
fn parse_bool(value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    matches!(lower.as_str(), "yes" | "y" | "true" | "1" | "sim" | "s")
}

/// Reads an availability answer: `Some(true)`, `Some(false)`, or `None` when the
/// value is neither a yes nor a no spelling
fn parse_answer(value: &str) -> Option<bool> {
    let lower = value.trim().to_lowercase();
    match lower.as_str() {
        "yes" | "y" | "true" | "1" | "sim" | "s" => Some(true),
        "no" | "n" | "false" | "0" | "não" | "nao" => Some(false),
        _ => None,
    }
}

/// Finds a column by any of its accepted header names (case-insensitive)
fn find_column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|name| h.trim().eq_ignore_ascii_case(name)))
}

fn require_column(headers: &StringRecord, file: &str, names: &[&str]) -> Result<usize, StoreError> {
    find_column(headers, names).ok_or_else(|| StoreError::MissingColumn {
        file: file.to_string(),
        column: names[0].to_string(),
    })
}

fn cell(record: &StringRecord, col: usize) -> &str {
    record.get(col).unwrap_or("").trim()
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Loads the slots of one period, in file order
///
/// Columns: `period`, `id`, `kind`, `label`, `date`, `time`, `functions`.
/// A row without a `period` value belongs to every period.
pub fn load_slots<P: AsRef<Path>>(csv_path: P, period: &str) -> Result<Vec<Slot>, StoreError> {
    let path = csv_path.as_ref();
    let file = file_name(path);
    let mut reader = Reader::from_path(path)?;

    let headers = reader.headers()?;
    let period_col = find_column(headers, &["period", "periodo"]);
    let id_col = require_column(headers, &file, &["id", "slot_id"])?;
    let kind_col = require_column(headers, &file, &["kind", "type", "tipo"])?;
    let label_col = require_column(headers, &file, &["label", "name", "nome"])?;
    let date_col = require_column(headers, &file, &["date", "data"])?;
    let time_col = require_column(headers, &file, &["time", "hora"])?;
    let functions_col = find_column(headers, &["functions", "funcoes", "funções"]);

    let mut slots = Vec::new();
    for result in reader.records() {
        let record = result?;

        if let Some(col) = period_col {
            let row_period = cell(&record, col);
            if !row_period.is_empty() && row_period != period {
                continue;
            }
        }

        let id = cell(&record, id_col);
        if id.is_empty() {
            tracing::warn!(file = %file, line = line_of(&record), "Skipping slot row without id");
            continue;
        }

        let invalid = |reason: String| StoreError::InvalidRecord {
            file: file.clone(),
            line: line_of(&record),
            reason,
        };

        let kind_value = cell(&record, kind_col);
        let kind = SlotKind::parse(kind_value)
            .ok_or_else(|| invalid(format!("unknown slot kind '{}'", kind_value)))?;
        let date_value = cell(&record, date_col);
        let date = parse_date(date_value)
            .ok_or_else(|| invalid(format!("invalid date '{}'", date_value)))?;
        let time_value = cell(&record, time_col);
        let time = parse_time(time_value)
            .ok_or_else(|| invalid(format!("invalid time '{}'", time_value)))?;

        slots.push(Slot {
            id: id.to_string(),
            kind,
            label: cell(&record, label_col).to_string(),
            date,
            time,
            functions: functions_col
                .map(|col| split_functions(cell(&record, col)))
                .unwrap_or_default(),
        });
    }

    Ok(slots)
}

/// Loads volunteer sign-ups for one period
///
/// Columns: `period`, `id`, `name`, `confirmed`, `functions`. A person listed
/// twice keeps the later row (resubmissions replace earlier answers).
pub fn load_volunteers<P: AsRef<Path>>(
    csv_path: P,
    period: &str,
) -> Result<Vec<VolunteerRecord>, StoreError> {
    let path = csv_path.as_ref();
    let file = file_name(path);
    let mut reader = Reader::from_path(path)?;

    let headers = reader.headers()?;
    let period_col = find_column(headers, &["period", "periodo"]);
    let id_col = require_column(headers, &file, &["id", "person_id", "volunteer_id"])?;
    let name_col = require_column(headers, &file, &["name", "nome"])?;
    let confirmed_col = find_column(headers, &["confirmed", "confirmado", "serving"]);
    let functions_col = require_column(headers, &file, &["functions", "funcoes", "funções"])?;

    // Track position by person id for handling resubmissions
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut records: Vec<VolunteerRecord> = Vec::new();

    for result in reader.records() {
        let record = result?;

        if let Some(col) = period_col {
            let row_period = cell(&record, col);
            if !row_period.is_empty() && row_period != period {
                continue;
            }
        }

        let id = cell(&record, id_col).to_string();
        if id.is_empty() {
            tracing::warn!(file = %file, line = line_of(&record), "Skipping volunteer row without id");
            continue;
        }

        let entry = VolunteerRecord {
            volunteer: Volunteer {
                id: id.clone(),
                name: cell(&record, name_col).to_string(),
                functions: split_functions(cell(&record, functions_col)).into_iter().collect(),
            },
            // Without a confirmation column every listed volunteer is serving
            confirmed: confirmed_col.map(|col| parse_bool(cell(&record, col))).unwrap_or(true),
        };

        match positions.get(&id) {
            Some(&index) => records[index] = entry,
            None => {
                positions.insert(id, records.len());
                records.push(entry);
            }
        }
    }

    Ok(records)
}

/// Loads availability answers. Columns: `volunteer_id`, `slot_id`, `available`.
///
/// A blank `available` cell leaves the pair unanswered and the row is skipped.
/// Any value that is not a yes or no spelling is an `InvalidRecord`.
pub fn load_availability<P: AsRef<Path>>(csv_path: P) -> Result<Vec<AvailabilityResponse>, StoreError> {
    let path = csv_path.as_ref();
    let file = file_name(path);
    let mut reader = Reader::from_path(path)?;

    let headers = reader.headers()?;
    let volunteer_col = require_column(headers, &file, &["volunteer_id", "person_id", "volunteer"])?;
    let slot_col = require_column(headers, &file, &["slot_id", "slot"])?;
    let available_col = require_column(headers, &file, &["available", "disponivel", "disponível"])?;

    let mut responses = Vec::new();
    for result in reader.records() {
        let record = result?;

        let volunteer_id = cell(&record, volunteer_col);
        let slot_id = cell(&record, slot_col);
        if volunteer_id.is_empty() || slot_id.is_empty() {
            tracing::warn!(file = %file, line = line_of(&record), "Skipping incomplete availability row");
            continue;
        }

        let answer = cell(&record, available_col);
        if answer.is_empty() {
            tracing::warn!(file = %file, line = line_of(&record), "Skipping unanswered availability row");
            continue;
        }
        let available = parse_answer(answer).ok_or_else(|| StoreError::InvalidRecord {
            file: file.clone(),
            line: line_of(&record),
            reason: format!("invalid availability answer '{}'", answer),
        })?;

        responses.push(AvailabilityResponse {
            volunteer_id: volunteer_id.to_string(),
            slot_id: slot_id.to_string(),
            available,
        });
    }

    Ok(responses)
}
