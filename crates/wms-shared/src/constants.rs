//! Application-wide constants

/// Sections per grid row; "delete row" removes this many sections.
pub const SECTIONS_PER_ROW: usize = 3;
/// Upper bound for sections created in a single request.
pub const MAX_SECTIONS_PER_REQUEST: u32 = 100;
/// Sections created with a new warehouse when the request omits a count.
pub const DEFAULT_INITIAL_SECTIONS: u32 = 4;
/// How long a deleted warehouse stays restorable.
pub const DEFAULT_UNDO_WINDOW_MS: i64 = 3000;
pub const MIN_WAREHOUSE_NAME_LENGTH: u64 = 1;
pub const MAX_WAREHOUSE_NAME_LENGTH: u64 = 100;
pub const CRON_BEARER_PREFIX: &str = "Bearer ";
