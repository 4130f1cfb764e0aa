use chrono::{NaiveDate, NaiveTime};

/// Parses a time string (HH:MM or HH:MM:SS) to a time of day
pub fn parse_time(time_str: &str) -> Option<NaiveTime> {
    // Remove any notes or extra text in parentheses
    let clean_time = time_str.split('(').next().unwrap_or(time_str).trim();
    NaiveTime::parse_from_str(clean_time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(clean_time, "%H:%M:%S"))
        .ok()
}

/// Parses a calendar date in ISO (2024-05-05) or day-first (05/05/2024) form
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    let clean = date_str.trim();
    NaiveDate::parse_from_str(clean, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(clean, "%d/%m/%Y"))
        .ok()
}

/// Formats a date as dd/mm for alerts and previews
pub fn format_day_month(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}

/// Formats a time of day as HH:MM
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Splits a function list cell ("Som; Recepção" or "Som, Recepção") keeping declared order.
/// A function named twice is kept once, at its first position.
pub fn split_functions(value: &str) -> Vec<String> {
    let mut functions: Vec<String> = Vec::new();
    for function in value.split([';', ',']).map(str::trim) {
        if !function.is_empty() && !functions.iter().any(|f| f == function) {
            functions.push(function.to_string());
        }
    }
    functions
}
