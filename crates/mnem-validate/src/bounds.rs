//! The bounds table from spec §4.7. Centralized so every field validator
//! cites the same constant rather than a repeated magic number.

pub const CONTENT_MIN_LEN: usize = 1;
pub const CONTENT_MAX_LEN: usize = 100_000;

pub const QUERY_MIN_LEN: usize = 1;
pub const QUERY_MAX_LEN: usize = 1_000;

pub const CONTEXT_MAX_LEN: usize = 10_000;

pub const METADATA_STRING_VALUE_MAX_LEN: usize = 5_000;
pub const METADATA_SERIALIZED_MAX_BYTES: usize = 50_000;

pub const TAG_MAX_COUNT: usize = 50;
pub const TAG_MAX_LEN: usize = 100;

pub const RELATED_ID_MAX_COUNT: usize = 100;

pub const LIMIT_MIN: u32 = 1;
pub const LIMIT_MAX: u32 = 1_000;
pub const LIMIT_DEFAULT: u32 = 10;

pub const UNIT_RANGE_MIN: f64 = 0.0;
pub const UNIT_RANGE_MAX: f64 = 1.0;

pub const TIMESTAMP_MIN: f64 = 0.0;
pub const TIMESTAMP_MAX: f64 = 4_102_444_800.0;
