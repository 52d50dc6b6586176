pub mod roster_csv;
pub mod walk_history;
