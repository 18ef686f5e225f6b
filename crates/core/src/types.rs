/// All primary keys are UUIDs (user ids come from the identity layer).
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (`tanggal_dibuat`, `tanggal_mulai`, `deadline`).
pub type Date = chrono::NaiveDate;
