//! CSV bulk loader for Roster.
//!
//! Reads the exported contact spreadsheet, turns each row into a
//! [`NewContact`] and hands the whole batch to a [`ContactStore`] in one call,
//! so a single bad row leaves the store untouched.

use std::io::Read;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use roster_core::{contact::NewContact, error::ValidationError, store::ContactStore};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("line {line}: id {value:?} is not an integer")]
  InvalidExternalId { line: u64, value: String },

  #[error("line {line}: {field} {value:?} is not a recognised date")]
  InvalidDate {
    line:  u64,
    field: &'static str,
    value: String,
  },

  #[error("line {line}: {source}")]
  InvalidRecord {
    line:   u64,
    #[source]
    source: ValidationError,
  },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// One spreadsheet row, every column as raw text. Columns the loader does not
/// know (`created_at`, `updated_at`, ...) are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
  id:                    String,
  name:                  String,
  photo:                 String,
  title:                 String,
  level:                 String,
  linkedin:              String,
  email:                 String,
  phone:                 String,
  company:               String,
  unlocked:              String,
  unlocked_company:      String,
  email_check_status:    String,
  email_check_date:      String,
  linkedin_check_status: String,
  linkedin_check_date:   String,
}

fn text(raw: String) -> Option<String> { (!raw.trim().is_empty()).then_some(raw) }

fn flag(raw: &str) -> bool { raw.trim() == "true" }

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` (taken as UTC) or a bare date.
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
  let raw = raw.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Some(dt.with_timezone(&Utc));
  }
  if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
    return Some(dt.and_utc());
  }
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .ok()
    .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

fn date_column(
  line: u64,
  field: &'static str,
  raw: String,
) -> Result<Option<DateTime<Utc>>> {
  if raw.trim().is_empty() {
    return Ok(None);
  }
  parse_date(&raw)
    .map(Some)
    .ok_or(Error::InvalidDate { line, field, value: raw })
}

impl CsvRow {
  fn into_new_contact(self, line: u64) -> Result<NewContact> {
    let external_id = match self.id.trim() {
      "" => None,
      id => Some(id.parse::<i64>().map_err(|_| Error::InvalidExternalId {
        line,
        value: self.id.clone(),
      })?),
    };

    let contact = NewContact {
      external_id,
      name: text(self.name),
      title: text(self.title),
      level: text(self.level),
      company: text(self.company),
      email: text(self.email),
      phone: text(self.phone),
      linkedin: text(self.linkedin),
      photo: text(self.photo),
      unlocked: flag(&self.unlocked),
      unlocked_company: flag(&self.unlocked_company),
      email_check_status: text(self.email_check_status),
      linkedin_check_status: text(self.linkedin_check_status),
      email_check_date: date_column(line, "email_check_date", self.email_check_date)?,
      linkedin_check_date: date_column(line, "linkedin_check_date", self.linkedin_check_date)?,
    };

    contact
      .normalize()
      .map_err(|source| Error::InvalidRecord { line, source })
  }
}

/// Parse every row of a headed CSV document into validated contacts.
///
/// Errors carry the 1-based line number of the offending row.
pub fn parse_contacts<R: Read>(reader: R) -> Result<Vec<NewContact>> {
  let mut reader = csv::ReaderBuilder::new()
    .has_headers(true)
    .trim(csv::Trim::Headers)
    .from_reader(reader);
  let headers = reader.headers()?.clone();

  let mut contacts = Vec::new();
  for record in reader.records() {
    let record = record?;
    let line = record.position().map(|p| p.line()).unwrap_or_default();
    let row: CsvRow = record.deserialize(Some(&headers))?;
    contacts.push(row.into_new_contact(line)?);
  }
  Ok(contacts)
}

/// Parse `reader` and insert every row into `store` as one batch. Returns the
/// number of contacts written.
pub async fn import<R, S>(reader: R, store: &S) -> Result<usize>
where
  R: Read,
  S: ContactStore,
{
  let contacts = parse_contacts(reader)?;
  tracing::debug!(rows = contacts.len(), "parsed csv");

  if contacts.is_empty() {
    return Ok(0);
  }

  let inserted = store
    .insert_many(contacts)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(inserted.len())
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;
  use roster_core::query::{ContactQuery, ListParams};
  use roster_store_sqlite::SqliteStore;

  use super::*;

  const HEADER: &str = "id,name,photo,title,level,linkedin,email,phone,company,unlocked,\
                        unlocked_company,email_check_status,email_check_date,\
                        linkedin_check_status,linkedin_check_date,created_at,updated_at\n";

  fn csv(rows: &[&str]) -> Vec<u8> {
    let mut doc = HEADER.to_owned();
    for row in rows {
      doc.push_str(row);
      doc.push('\n');
    }
    doc.into_bytes()
  }

  #[test]
  fn maps_columns_and_coerces_flags() {
    let doc = csv(&[
      "12,John Doe,,CEO,C-Level,,John@Pfizer.COM,555,Pfizer,true,false,valid,2024-03-01 \
       10:00:00,,2024-03-02,2020-01-01,2020-01-01",
    ]);
    let contacts = parse_contacts(doc.as_slice()).unwrap();
    assert_eq!(contacts.len(), 1);

    let c = &contacts[0];
    assert_eq!(c.external_id, Some(12));
    assert_eq!(c.name.as_deref(), Some("John Doe"));
    assert_eq!(c.photo, None);
    assert_eq!(c.email.as_deref(), Some("john@pfizer.com"));
    assert!(c.unlocked);
    assert!(!c.unlocked_company);
    assert_eq!(c.email_check_status.as_deref(), Some("valid"));
    assert_eq!(
      c.email_check_date,
      Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap())
    );
    assert_eq!(
      c.linkedin_check_date,
      Some(Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap())
    );
  }

  #[test]
  fn only_literal_true_sets_flags() {
    let doc = csv(&[
      ",A,,,,,,,,TRUE,1,,,,,,",
      ",B,,,,,,,,yes,true,,,,,,",
    ]);
    let contacts = parse_contacts(doc.as_slice()).unwrap();
    assert!(!contacts[0].unlocked);
    assert!(!contacts[0].unlocked_company);
    assert!(!contacts[1].unlocked);
    assert!(contacts[1].unlocked_company);
    assert_eq!(contacts[0].external_id, None);
  }

  #[test]
  fn rfc3339_dates_are_accepted() {
    let doc = csv(&[",A,,,,,,,,,,,2024-03-01T10:00:00+02:00,,,,"]);
    let contacts = parse_contacts(doc.as_slice()).unwrap();
    assert_eq!(
      contacts[0].email_check_date,
      Some(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap())
    );
  }

  #[test]
  fn missing_optional_columns_default_to_absent() {
    let doc = b"name,company\nJane,Acme\n";
    let contacts = parse_contacts(doc.as_slice()).unwrap();
    assert_eq!(contacts[0].name.as_deref(), Some("Jane"));
    assert_eq!(contacts[0].company.as_deref(), Some("Acme"));
    assert_eq!(contacts[0].email, None);
    assert!(!contacts[0].unlocked);
  }

  #[test]
  fn bad_external_id_names_the_line() {
    let doc = csv(&["1,A,,,,,,,,,,,,,,,", "x7,B,,,,,,,,,,,,,,,"]);
    let err = parse_contacts(doc.as_slice()).unwrap_err();
    match err {
      Error::InvalidExternalId { line, value } => {
        assert_eq!(line, 3);
        assert_eq!(value, "x7");
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn bad_date_is_rejected() {
    let doc = csv(&[",A,,,,,,,,,,,last tuesday,,,,"]);
    let err = parse_contacts(doc.as_slice()).unwrap_err();
    assert!(matches!(
      err,
      Error::InvalidDate { line: 2, field: "email_check_date", .. }
    ));
  }

  #[test]
  fn invalid_email_is_a_record_error() {
    let doc = csv(&[",A,,,,,not-an-email,,,,,,,,,,"]);
    let err = parse_contacts(doc.as_slice()).unwrap_err();
    assert!(matches!(err, Error::InvalidRecord { line: 2, .. }));
    assert!(err.to_string().contains("email"));
  }

  #[tokio::test]
  async fn import_writes_every_row() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let doc = csv(&[
      "1,John Doe,,,,,john@pfizer.com,,Pfizer,true,,,,,,,",
      "2,Anna Berg,,,,,,,Moderna,,,,,,,,",
    ]);

    let written = import(doc.as_slice(), &store).await.unwrap();
    assert_eq!(written, 2);

    let query = ContactQuery::from_params(&ListParams::default());
    let stored = store.find(&query).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].external_id, Some(1));
    assert!(stored[0].unlocked);
    assert_eq!(stored[1].company.as_deref(), Some("Moderna"));
  }

  #[tokio::test]
  async fn one_bad_row_aborts_the_import() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let doc = csv(&["1,Good,,,,,,,,,,,,,,,", "2,Bad,,,,,nope,,,,,,,,,,"]);

    assert!(import(doc.as_slice(), &store).await.is_err());

    let query = ContactQuery::from_params(&ListParams::default());
    assert!(store.find(&query).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn empty_file_imports_nothing() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let written = import(HEADER.as_bytes(), &store).await.unwrap();
    assert_eq!(written, 0);
  }
}
