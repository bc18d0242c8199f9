//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings with microsecond
//! precision and a `Z` suffix, so lexical order matches chronological order.
//! Contact ids are stored as hyphenated lowercase UUID strings.

use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use roster_core::{
  contact::{Contact, ContactId},
  patch::EditableField,
  query::SortField,
  validate::fold_case,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── ContactId ───────────────────────────────────────────────────────────────

pub fn encode_id(id: ContactId) -> String { id.to_string() }

pub fn decode_id(s: &str) -> Result<ContactId> { Ok(Uuid::parse_str(s)?.into()) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// Drop sub-microsecond precision so a value survives a round trip unchanged.
pub fn truncate_dt(dt: DateTime<Utc>) -> DateTime<Utc> { dt.trunc_subsecs(6) }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Columns ─────────────────────────────────────────────────────────────────

/// Column holding an editable field. Column names equal the wire names.
pub fn editable_column(field: EditableField) -> &'static str { field.as_str() }

/// The folded search column kept in step with `field`, if any.
pub fn folded_column(field: EditableField) -> Option<&'static str> {
  match field {
    EditableField::Name => Some("name_folded"),
    EditableField::Company => Some("company_folded"),
    _ => None,
  }
}

/// Column ordered on for a sort field.
pub fn sort_column(field: SortField) -> &'static str {
  match field {
    SortField::Id => "contact_id",
    SortField::ExternalId => "external_id",
    SortField::Name => "name",
    SortField::Title => "title",
    SortField::Level => "level",
    SortField::Company => "company",
    SortField::Email => "email",
    SortField::Phone => "phone",
    SortField::Linkedin => "linkedin",
    SortField::Photo => "photo",
    SortField::Unlocked => "unlocked",
    SortField::UnlockedCompany => "unlocked_company",
    SortField::EmailCheckStatus => "email_check_status",
    SortField::LinkedinCheckStatus => "linkedin_check_status",
    SortField::EmailCheckDate => "email_check_date",
    SortField::LinkedinCheckDate => "linkedin_check_date",
    SortField::CreatedAt => "created_at",
    SortField::UpdatedAt => "updated_at",
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `contacts` row, in
/// [`crate::schema::CONTACT_COLUMNS`] order.
pub struct RawContact {
  pub contact_id:            String,
  pub external_id:           Option<i64>,
  pub name:                  Option<String>,
  pub title:                 Option<String>,
  pub level:                 Option<String>,
  pub company:               Option<String>,
  pub email:                 Option<String>,
  pub phone:                 Option<String>,
  pub linkedin:              Option<String>,
  pub photo:                 Option<String>,
  pub unlocked:              bool,
  pub unlocked_company:      bool,
  pub email_check_status:    Option<String>,
  pub linkedin_check_status: Option<String>,
  pub email_check_date:      Option<String>,
  pub linkedin_check_date:   Option<String>,
  pub created_at:            String,
  pub updated_at:            String,
}

impl RawContact {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      contact_id:            row.get(0)?,
      external_id:           row.get(1)?,
      name:                  row.get(2)?,
      title:                 row.get(3)?,
      level:                 row.get(4)?,
      company:               row.get(5)?,
      email:                 row.get(6)?,
      phone:                 row.get(7)?,
      linkedin:              row.get(8)?,
      photo:                 row.get(9)?,
      unlocked:              row.get(10)?,
      unlocked_company:      row.get(11)?,
      email_check_status:    row.get(12)?,
      linkedin_check_status: row.get(13)?,
      email_check_date:      row.get(14)?,
      linkedin_check_date:   row.get(15)?,
      created_at:            row.get(16)?,
      updated_at:            row.get(17)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:                    decode_id(&self.contact_id)?,
      external_id:           self.external_id,
      name:                  self.name,
      title:                 self.title,
      level:                 self.level,
      company:               self.company,
      email:                 self.email,
      phone:                 self.phone,
      linkedin:              self.linkedin,
      photo:                 self.photo,
      unlocked:              self.unlocked,
      unlocked_company:      self.unlocked_company,
      email_check_status:    self.email_check_status,
      linkedin_check_status: self.linkedin_check_status,
      email_check_date:      self.email_check_date.as_deref().map(decode_dt).transpose()?,
      linkedin_check_date:   self.linkedin_check_date.as_deref().map(decode_dt).transpose()?,
      created_at:            decode_dt(&self.created_at)?,
      updated_at:            decode_dt(&self.updated_at)?,
    })
  }
}

/// Owned column values for one `INSERT INTO contacts` row.
pub struct EncodedContact {
  pub contact_id:            String,
  pub external_id:           Option<i64>,
  pub name:                  Option<String>,
  pub name_folded:           Option<String>,
  pub title:                 Option<String>,
  pub level:                 Option<String>,
  pub company:               Option<String>,
  pub company_folded:        Option<String>,
  pub email:                 Option<String>,
  pub phone:                 Option<String>,
  pub linkedin:              Option<String>,
  pub photo:                 Option<String>,
  pub unlocked:              bool,
  pub unlocked_company:      bool,
  pub email_check_status:    Option<String>,
  pub linkedin_check_status: Option<String>,
  pub email_check_date:      Option<String>,
  pub linkedin_check_date:   Option<String>,
  pub created_at:            String,
  pub updated_at:            String,
}

impl From<&Contact> for EncodedContact {
  fn from(c: &Contact) -> Self {
    Self {
      contact_id:            encode_id(c.id),
      external_id:           c.external_id,
      name:                  c.name.clone(),
      name_folded:           c.name.as_deref().map(fold_case),
      title:                 c.title.clone(),
      level:                 c.level.clone(),
      company:               c.company.clone(),
      company_folded:        c.company.as_deref().map(fold_case),
      email:                 c.email.clone(),
      phone:                 c.phone.clone(),
      linkedin:              c.linkedin.clone(),
      photo:                 c.photo.clone(),
      unlocked:              c.unlocked,
      unlocked_company:      c.unlocked_company,
      email_check_status:    c.email_check_status.clone(),
      linkedin_check_status: c.linkedin_check_status.clone(),
      email_check_date:      c.email_check_date.map(encode_dt),
      linkedin_check_date:   c.linkedin_check_date.map(encode_dt),
      created_at:            encode_dt(c.created_at),
      updated_at:            encode_dt(c.updated_at),
    }
  }
}
