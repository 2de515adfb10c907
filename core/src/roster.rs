//! Bulk roster import.
//!
//! Input is delimited text with a header row naming `name`, `email` and
//! `initialCredits` in any order. Each data line becomes one `RosterRow`
//! with its original text kept for the failure report. Screening is
//! per row: bad rows are rejected individually, good rows go in as one
//! batch.

use crate::{error::CreditResult, types::Credits};
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRow {
    pub name: String,
    pub email: String,
    pub initial_credits: Credits,
    /// The line exactly as it appeared in the input.
    pub raw: String,
}

impl RosterRow {
    pub fn new(name: impl Into<String>, email: impl Into<String>, initial_credits: Credits) -> Self {
        let name = name.into();
        let email = email.into();
        let raw = format!("{name},{email},{initial_credits}");
        Self { name, email, initial_credits, raw }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    MissingField,
    InvalidEmail,
    DuplicateEmail,
    InvalidAmount,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField   => f.write_str("Missing name or email"),
            Self::InvalidEmail   => f.write_str("Invalid email format"),
            Self::DuplicateEmail => f.write_str("Duplicate email"),
            Self::InvalidAmount  => f.write_str("Negative initial credits"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportFailure {
    pub reason: RejectReason,
    pub row: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkImportReport {
    pub success: usize,
    pub failures: Vec<ImportFailure>,
}

/// `local@domain.tld`: no whitespace, a non-empty local part, and a domain
/// with a dot that has text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Parse roster text. Blank lines are skipped; a missing column yields an
/// empty field (rejected later by screening); unparsable credits become 0.
pub fn parse_roster_csv(text: &str) -> CreditResult<Vec<RosterRow>> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let Some(header_line) = lines.next() else {
        return Ok(Vec::new());
    };
    let header = parse_line(header_line)?;
    let column = |wanted: &str| {
        header
            .iter()
            .position(|h| h.trim().trim_matches('"').eq_ignore_ascii_case(wanted))
    };
    let name_idx = column("name");
    let email_idx = column("email");
    let credits_idx = column("initialcredits");

    let mut rows = Vec::new();
    for line in lines {
        let record = parse_line(line)?;
        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };
        let initial_credits = field(credits_idx).parse::<Credits>().unwrap_or(0);
        rows.push(RosterRow {
            name: field(name_idx),
            email: field(email_idx),
            initial_credits,
            raw: line.to_string(),
        });
    }
    Ok(rows)
}

fn parse_line(line: &str) -> CreditResult<StringRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    let mut record = StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record)
}

/// Split rows into accepted and rejected. Emails are compared
/// case-insensitively against `existing` and against earlier accepted rows.
pub fn screen_rows<F>(rows: Vec<RosterRow>, email_exists: F) -> (Vec<RosterRow>, Vec<ImportFailure>)
where
    F: Fn(&str) -> bool,
{
    let mut accepted: Vec<RosterRow> = Vec::new();
    let mut failures = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for row in rows {
        let reason = if row.name.trim().is_empty() || row.email.trim().is_empty() {
            Some(RejectReason::MissingField)
        } else if !is_valid_email(&row.email) {
            Some(RejectReason::InvalidEmail)
        } else if email_exists(&row.email) || seen.contains(&row.email.to_ascii_lowercase()) {
            Some(RejectReason::DuplicateEmail)
        } else if row.initial_credits < 0 {
            Some(RejectReason::InvalidAmount)
        } else {
            None
        };

        match reason {
            Some(reason) => failures.push(ImportFailure { reason, row: row.raw }),
            None => {
                seen.insert(row.email.to_ascii_lowercase());
                accepted.push(row);
            }
        }
    }
    (accepted, failures)
}
