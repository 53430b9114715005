/// Backend-assigned record identifiers.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates travel as `YYYY-MM-DD`.
pub type Date = chrono::NaiveDate;
