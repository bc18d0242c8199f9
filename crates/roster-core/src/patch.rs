//! Field-restricted updates.
//!
//! A [`ContactPatch`] can only be built from a raw JSON payload through
//! [`ContactPatch::from_payload`], which drops every key outside the
//! [`EditableField`] allow-list and validates the values that remain.

use serde_json::{Map, Value};
use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::{
  error::ValidationError,
  validate::{normalize_email, normalize_text},
};

/// The fields a client may change through the update path.
///
/// Identifiers, timestamps, `externalId`, `photo`, the `unlocked*` flags and
/// the check dates cannot be changed this way.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum EditableField {
  Name,
  Title,
  Level,
  Company,
  Email,
  Phone,
  Linkedin,
  EmailCheckStatus,
  LinkedinCheckStatus,
}

impl EditableField {
  /// Wire name, identical to the storage column name.
  pub fn as_str(self) -> &'static str { self.into() }
}

/// A validated set of field assignments. `None` clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
  changes: Vec<(EditableField, Option<String>)>,
}

impl ContactPatch {
  /// Filter `payload` down to the allow-list and validate each value.
  ///
  /// Strings are trimmed (blank clears the field), numbers and booleans are
  /// stored in their textual form, `null` clears the field. Arrays and objects
  /// are rejected.
  pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, ValidationError> {
    let mut changes = Vec::with_capacity(payload.len());

    for (key, value) in payload {
      let Ok(field) = key.parse::<EditableField>() else {
        tracing::debug!(field = %key, "dropping non-editable field from update");
        continue;
      };

      let text = match value {
        Value::Null => None,
        Value::String(s) => normalize_text(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => {
          return Err(ValidationError::new(
            field.as_str(),
            "expected a string, number, boolean or null",
          ));
        }
      };

      let text = match (field, text) {
        (EditableField::Email, Some(raw)) => Some(normalize_email(&raw)?),
        (_, text) => text,
      };

      changes.push((field, text));
    }

    Ok(Self { changes })
  }

  pub fn is_empty(&self) -> bool { self.changes.is_empty() }

  pub fn len(&self) -> usize { self.changes.len() }

  /// The assignments in payload key order.
  pub fn changes(&self) -> &[(EditableField, Option<String>)] { &self.changes }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use strum::IntoEnumIterator as _;

  use super::*;

  impl ContactPatch {
    fn get(&self, field: EditableField) -> Option<Option<&str>> {
      self
        .changes
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, v)| v.as_deref())
    }
  }

  fn payload(v: Value) -> Map<String, Value> {
    match v {
      Value::Object(m) => m,
      other => panic!("not an object: {other}"),
    }
  }

  #[test]
  fn allow_list_matches_wire_names() {
    let names: Vec<&str> = EditableField::iter().map(EditableField::as_str).collect();
    assert_eq!(
      names,
      [
        "name",
        "title",
        "level",
        "company",
        "email",
        "phone",
        "linkedin",
        "email_check_status",
        "linkedin_check_status",
      ]
    );
  }

  #[test]
  fn non_editable_fields_are_dropped() {
    let patch = ContactPatch::from_payload(&payload(json!({
      "company": "Pfizer",
      "unlocked": true,
      "unlocked_company": true,
      "externalId": 12,
      "photo": "http://x/y.png",
      "id": "whatever",
      "createdAt": "2020-01-01T00:00:00Z",
      "email_check_date": "2020-01-01T00:00:00Z",
    })))
    .unwrap();

    assert_eq!(patch.len(), 1);
    assert_eq!(patch.get(EditableField::Company), Some(Some("Pfizer")));
  }

  #[test]
  fn only_non_editable_fields_yields_empty_patch() {
    let patch = ContactPatch::from_payload(&payload(json!({ "unlocked": true }))).unwrap();
    assert!(patch.is_empty());
  }

  #[test]
  fn values_are_coerced_and_trimmed() {
    let patch = ContactPatch::from_payload(&payload(json!({
      "name": "  Jane  ",
      "phone": 5551234,
      "level": true,
      "title": null,
      "linkedin": "   ",
    })))
    .unwrap();

    assert_eq!(patch.get(EditableField::Name), Some(Some("Jane")));
    assert_eq!(patch.get(EditableField::Phone), Some(Some("5551234")));
    assert_eq!(patch.get(EditableField::Level), Some(Some("true")));
    assert_eq!(patch.get(EditableField::Title), Some(None));
    assert_eq!(patch.get(EditableField::Linkedin), Some(None));
    assert_eq!(patch.get(EditableField::Company), None);
  }

  #[test]
  fn email_is_validated() {
    let ok = ContactPatch::from_payload(&payload(json!({ "email": "Jane@Pfizer.COM" }))).unwrap();
    assert_eq!(ok.get(EditableField::Email), Some(Some("jane@pfizer.com")));

    let err = ContactPatch::from_payload(&payload(json!({ "email": "jane-at-pfizer" }))).unwrap_err();
    assert_eq!(err.field, "email");
  }

  #[test]
  fn structured_values_are_rejected() {
    let err = ContactPatch::from_payload(&payload(json!({ "title": ["a", "b"] }))).unwrap_err();
    assert_eq!(err.field, "title");
  }
}
