//! Member roster CSV export.
//!
//! Expected header (snake_case or camelCase both accepted, any column order):
//!   id,first_name,last_name,display_name,email,mobile_number,contact_id
//!
//! Only `id` is required. Rows with a blank id are skipped.

use anyhow::{Context, Result};
use log::warn;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use walkleader_core::Member;

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, alias = "firstName")]
    first_name: Option<String>,
    #[serde(default, alias = "lastName")]
    last_name: Option<String>,
    #[serde(default, alias = "displayName")]
    display_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default, alias = "mobileNumber", alias = "mobile")]
    mobile_number: Option<String>,
    #[serde(default, alias = "contactId")]
    contact_id: Option<String>,
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

impl RosterRow {
    fn into_member(self) -> Option<Member> {
        let id = non_blank(self.id)?;
        let first_name = self.first_name.unwrap_or_default();
        let last_name = self.last_name.unwrap_or_default();
        let display_name = non_blank(self.display_name)
            .unwrap_or_else(|| format!("{} {}", first_name, last_name).trim().to_string());

        Some(Member {
            id,
            first_name,
            last_name,
            display_name,
            email: non_blank(self.email),
            mobile_number: non_blank(self.mobile_number),
            contact_id: non_blank(self.contact_id),
        })
    }
}

fn parse_roster<R: Read>(rdr: &mut csv::Reader<R>) -> Result<Vec<Member>> {
    let mut members = Vec::new();

    for (i, result) in rdr.deserialize::<RosterRow>().enumerate() {
        // header is line 1
        let line = i + 2;
        let row = result.with_context(|| format!("roster row {}", line))?;
        match row.into_member() {
            Some(m) => members.push(m),
            None => warn!("roster row {} has no id, skipping", line),
        }
    }

    Ok(members)
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut b = csv::ReaderBuilder::new();
    b.has_headers(true).flexible(true).trim(csv::Trim::All);
    b
}

/// Parse a roster CSV file.
pub fn parse_roster_csv(path: impl AsRef<Path>) -> Result<Vec<Member>> {
    let mut rdr = reader_builder()
        .from_path(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    parse_roster(&mut rdr)
}

/// Parse roster CSV text already in memory.
pub fn parse_roster_csv_str(text: &str) -> Result<Vec<Member>> {
    let mut rdr = reader_builder().from_reader(text.as_bytes());
    parse_roster(&mut rdr)
}
