//! Error type for `roster-store-sqlite`.

use roster_core::error::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A record in an `insert_many` batch failed field validation. `index` is
  /// its zero-based position in the batch.
  #[error("record {index} is invalid: {source}")]
  InvalidRecord {
    index:  usize,
    #[source]
    source: ValidationError,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
