//! Walk history JSON, as exported from the events system.
//!
//! The file is a top-level array of walk records:
//!   [{"id": "w1", "startDate": "2025-05-04",
//!     "fields": {"contactDetails": {"contactId": "wm-1", "memberId": "m1"}}}]
//!
//! Any other top-level shape is treated as no data.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::warn;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::types::WalkRecord;

/// Parse walk history JSON already in memory.
pub fn parse_walks_json_str(text: &str) -> Result<Vec<WalkRecord>> {
    let value: Value = serde_json::from_str(text).context("walk history is not valid JSON")?;

    let Value::Array(items) = value else {
        warn!("walk history is not a JSON array, treating as empty");
        return Ok(Vec::new());
    };

    let mut walks = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<WalkRecord>(item) {
            Ok(w) => walks.push(w),
            Err(e) => warn!("walk {} skipped: {}", i, e),
        }
    }

    Ok(walks)
}

/// Parse a walk history JSON file.
pub fn parse_walks_json(path: impl AsRef<Path>) -> Result<Vec<WalkRecord>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_walks_json_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Walks starting on or after `since`. Undated walks are kept.
pub fn walks_since(walks: Vec<WalkRecord>, since: NaiveDate) -> Vec<WalkRecord> {
    walks
        .into_iter()
        .filter(|w| w.start_date.is_none_or(|d| d >= since))
        .collect()
}
