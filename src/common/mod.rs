pub mod errors;
pub mod utils;

pub const TABLE_NAME_ENV: &str = "CANDIDATE_TABLE";
pub const TABLE_NAME_DEFAULT: &str = "candidates";

/// Origin allowed to read the candidate listing from a browser.
pub const ALLOWED_ORIGIN: &str = "http://localhost:8017";

/// Reads the candidate table name, falling back to [`TABLE_NAME_DEFAULT`].
pub fn table_name() -> String {
    std::env::var(TABLE_NAME_ENV).unwrap_or(TABLE_NAME_DEFAULT.into())
}
