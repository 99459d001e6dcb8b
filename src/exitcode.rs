//! Process exit codes

/// Successful termination
pub const OK: i32 = 0;

/// Any failure: missing or unreadable input, parse, serialization, config or internal error
pub const FAILURE: i32 = 1;
