//! Parsing helpers shared by the subcommands and the interactive shell.

use jiff::civil::Date;

/// Format every due date must follow.
pub const DUE_DATE_FORMAT: &str = "%d.%m.%Y";

/// Whether `value` is a real calendar date written as `DD.MM.YYYY`.
pub fn is_valid_due_date(value: &str) -> bool {
    Date::strptime(DUE_DATE_FORMAT, value.trim()).is_ok()
}

/// clap value parser for due dates. Keeps the text as typed.
pub fn parse_due_date(value: &str) -> Result<String, String> {
    if is_valid_due_date(value) {
        Ok(value.trim().to_string())
    } else {
        Err(format!("'{value}' is not a valid date, expected DD.MM.YYYY"))
    }
}

/// clap value parser for `field=value` assignments.
pub fn parse_assignment(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((field, new_value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), new_value.to_string()))
        }
        _ => Err(format!("'{value}' is not a field=value assignment")),
    }
}

/// Whether a prompt answer asks to cancel the current operation.
pub fn is_cancel(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "q" | "й")
}

/// Reads a yes/no answer. `None` for anything else.
pub fn parse_confirmation(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}
