//! The contact record, the sole entity in the directory.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
  error::ValidationError,
  validate::{normalize_email, normalize_text},
};

// ─── Identifier ──────────────────────────────────────────────────────────────

/// Store-assigned contact identifier. Assigned once on insert and never
/// reassigned.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = String, format = Uuid)]
pub struct ContactId(Uuid);

impl ContactId {
  /// A fresh random identifier.
  pub fn new() -> Self { Self(Uuid::new_v4()) }

  pub fn as_uuid(&self) -> Uuid { self.0 }
}

impl Default for ContactId {
  fn default() -> Self { Self::new() }
}

impl From<Uuid> for ContactId {
  fn from(id: Uuid) -> Self { Self(id) }
}

impl FromStr for ContactId {
  type Err = uuid::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(Self(Uuid::parse_str(s)?)) }
}

impl fmt::Display for ContactId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.hyphenated().fmt(f)
  }
}

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A persisted contact record, as returned by the store and the API.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Contact {
  pub id:                    ContactId,
  /// Reference into the spreadsheet the record was imported from.
  #[serde(rename = "externalId")]
  pub external_id:           Option<i64>,
  pub name:                  Option<String>,
  pub title:                 Option<String>,
  pub level:                 Option<String>,
  pub company:               Option<String>,
  /// Always lower-case.
  pub email:                 Option<String>,
  pub phone:                 Option<String>,
  pub linkedin:              Option<String>,
  /// Photo URL.
  pub photo:                 Option<String>,
  pub unlocked:              bool,
  pub unlocked_company:      bool,
  pub email_check_status:    Option<String>,
  pub linkedin_check_status: Option<String>,
  pub email_check_date:      Option<DateTime<Utc>>,
  pub linkedin_check_date:   Option<DateTime<Utc>>,
  /// Server-assigned on insert.
  #[serde(rename = "createdAt")]
  pub created_at:            DateTime<Utc>,
  /// Server-assigned on insert and bumped on every update.
  #[serde(rename = "updatedAt")]
  pub updated_at:            DateTime<Utc>,
}

// ─── NewContact ──────────────────────────────────────────────────────────────

/// Input to [`crate::store::ContactStore::insert_many`].
///
/// `id`, `createdAt` and `updatedAt` are always set by the store; they are not
/// accepted from callers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewContact {
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
  pub email_check_date:      Option<DateTime<Utc>>,
  pub linkedin_check_date:   Option<DateTime<Utc>>,
}

impl NewContact {
  /// Run the same per-field validation the update path applies: trim every
  /// text field and lower-case and check the email.
  pub fn normalize(self) -> Result<Self, ValidationError> {
    let text = |v: Option<String>| v.as_deref().and_then(normalize_text);

    let email = match self.email.as_deref().and_then(normalize_text) {
      Some(raw) => Some(normalize_email(&raw)?),
      None => None,
    };

    Ok(Self {
      external_id: self.external_id,
      name: text(self.name),
      title: text(self.title),
      level: text(self.level),
      company: text(self.company),
      email,
      phone: text(self.phone),
      linkedin: text(self.linkedin),
      photo: text(self.photo),
      unlocked: self.unlocked,
      unlocked_company: self.unlocked_company,
      email_check_status: text(self.email_check_status),
      linkedin_check_status: text(self.linkedin_check_status),
      email_check_date: self.email_check_date,
      linkedin_check_date: self.linkedin_check_date,
    })
  }
}
