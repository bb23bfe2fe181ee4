//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Command handlers hand results to two renderers: a flat key/value
//! panel for single entities and a column table for listings. Both
//! humanize timestamp fields (names ending in `_at`) into relative
//! form and substitute `-` for missing values. Status messages respect
//! the quiet flag.

use std::fmt::Display;

use chrono::{DateTime, NaiveDateTime, Utc};
use console::style;
use serde_json::Value;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Print a success message with a check mark (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{} {}", style("✓").green().bold(), message);
    }
}

/// Print an informational result from the platform.
///
/// A 2xx response can still carry a `detail` note (e.g. "nothing to
/// do"); surface it, otherwise just confirm.
pub fn print_result(result: &Value, verbosity: Verbosity) {
    match result.get("detail").and_then(Value::as_str) {
        Some(detail) => print(detail, verbosity),
        None => success("done", verbosity),
    }
}

/// Render a single entity as a flat key/value panel.
pub fn print_kv(result: &Value) {
    let Some(object) = result.as_object() else {
        println!("{}", result);
        return;
    };

    let width = object.keys().map(String::len).max().unwrap_or(0);
    for (key, value) in object {
        // Pad before styling so ANSI codes don't skew the column.
        let label = format!("{:<width$}", key.to_uppercase(), width = width);
        println!("{}  {}", style(label).cyan(), kv_value(key, value));
    }
}

fn kv_value(key: &str, value: &Value) -> String {
    match value {
        Value::Null if key == "key" || key == "git_key" => {
            style("no key assigned").red().to_string()
        }
        Value::Null => "-".to_string(),
        // A referenced entity renders by its name.
        Value::Object(map) => map
            .get("name")
            .and_then(Value::as_str)
            .map(|name| style(name).green().to_string())
            .unwrap_or_else(|| value.to_string()),
        Value::Array(items) => {
            let names: Vec<String> = items.iter().map(|item| kv_value("", item)).collect();
            if names.is_empty() {
                "-".to_string()
            } else {
                names.join(", ")
            }
        }
        Value::String(s) if key == "token" => style(s).yellow().to_string(),
        Value::String(s) if key.ends_with("_at") => time_since(s),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render a listing as a column table.
///
/// `columns` pairs a display name with the source field to read from
/// each row, in display order.
pub fn print_table(result: &Value, columns: &[(&str, &str)]) {
    let rows = match result.as_array() {
        Some(rows) if !rows.is_empty() => rows,
        _ => {
            println!("No results");
            return;
        }
    };

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|(_, field)| cell_value(field, row.get(*field)))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, (header, _))| {
            cells
                .iter()
                .map(|row| row[i].len())
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header = columns
        .iter()
        .zip(&widths)
        .map(|((name, _), w)| format!("{:<width$}", name.to_uppercase(), width = w))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", style(header).cyan());

    for row in &cells {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = w))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line.trim_end());
    }
}

fn cell_value(field: &str, value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) if s.is_empty() => "-".to_string(),
        Some(Value::String(s)) if field.ends_with("_at") => time_since(s),
        Some(Value::String(s)) => shorten_remote(s),
        Some(other) => other.to_string(),
    }
}

/// Listing cells drop the canonical SSH prefix for compactness.
fn shorten_remote(value: &str) -> String {
    value
        .strip_prefix("git@github.com:")
        .unwrap_or(value)
        .to_string()
}

/// Humanize an ISO-8601 timestamp relative to now.
///
/// Timestamps without an offset are taken as UTC. Unparseable input
/// passes through unchanged.
pub fn time_since(iso: &str) -> String {
    let Some(then) = parse_utc(iso) else {
        return iso.to_string();
    };
    let seconds = (Utc::now() - then).num_seconds();
    humanize_seconds(seconds)
}

fn parse_utc(iso: &str) -> Option<DateTime<Utc>> {
    if let Ok(aware) = DateTime::parse_from_rfc3339(iso) {
        return Some(aware.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn humanize_seconds(seconds: i64) -> String {
    if seconds < 60 {
        return "just now".to_string();
    }
    let (count, unit) = if seconds < 3600 {
        (seconds / 60, "minute")
    } else if seconds < 86_400 {
        (seconds / 3600, "hour")
    } else if seconds < 2_592_000 {
        (seconds / 86_400, "day")
    } else if seconds < 31_536_000 {
        (seconds / 2_592_000, "month")
    } else {
        (seconds / 31_536_000, "year")
    };
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}
