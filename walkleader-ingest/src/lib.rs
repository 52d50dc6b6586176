//! walkleader-ingest: loaders for the member roster and walk history files.

pub mod types;
pub mod parsers;

pub use types::{WalkContactDetails, WalkFields, WalkRecord};
pub use parsers::roster_csv::{parse_roster_csv, parse_roster_csv_str};
pub use parsers::walk_history::{parse_walks_json, parse_walks_json_str, walks_since};
