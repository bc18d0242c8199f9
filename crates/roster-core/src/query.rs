//! The query/filter builder: request parameters in, [`ContactQuery`] out.

use strum::{EnumString, IntoStaticStr};

use crate::validate::fold_case;

/// A field the list endpoint can order by, named as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
pub enum SortField {
  #[strum(serialize = "id")]
  Id,
  #[strum(serialize = "externalId")]
  ExternalId,
  #[strum(serialize = "name")]
  Name,
  #[strum(serialize = "title")]
  Title,
  #[strum(serialize = "level")]
  Level,
  #[strum(serialize = "company")]
  Company,
  #[strum(serialize = "email")]
  Email,
  #[strum(serialize = "phone")]
  Phone,
  #[strum(serialize = "linkedin")]
  Linkedin,
  #[strum(serialize = "photo")]
  Photo,
  #[strum(serialize = "unlocked")]
  Unlocked,
  #[strum(serialize = "unlocked_company")]
  UnlockedCompany,
  #[strum(serialize = "email_check_status")]
  EmailCheckStatus,
  #[strum(serialize = "linkedin_check_status")]
  LinkedinCheckStatus,
  #[strum(serialize = "email_check_date")]
  EmailCheckDate,
  #[strum(serialize = "linkedin_check_date")]
  LinkedinCheckDate,
  #[strum(serialize = "createdAt")]
  CreatedAt,
  #[strum(serialize = "updatedAt")]
  UpdatedAt,
}

impl SortField {
  pub fn as_str(self) -> &'static str { self.into() }
}

/// Raw list parameters as they arrive from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
  pub search: Option<String>,
  pub sort:   Option<String>,
  pub limit:  Option<u64>,
}

/// Parameters for [`crate::store::ContactStore::find`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactQuery {
  /// Case-folded needle matched as a substring of `name` or `company`.
  pub search: Option<String>,
  /// Ascending order on this field; `None` keeps insertion order.
  pub sort:   Option<SortField>,
  pub limit:  Option<usize>,
}

impl ContactQuery {
  /// Build a store query from raw request parameters.
  ///
  /// Empty strings count as absent, an unrecognised sort field leaves the
  /// result unordered and a limit of zero means no limit.
  pub fn from_params(params: &ListParams) -> Self {
    let search = params
      .search
      .as_deref()
      .filter(|s| !s.is_empty())
      .map(fold_case);

    let sort = params
      .sort
      .as_deref()
      .filter(|s| !s.is_empty())
      .and_then(|s| match s.parse::<SortField>() {
        Ok(field) => Some(field),
        Err(_) => {
          tracing::debug!(sort = %s, "unknown sort field; results left unordered");
          None
        }
      });

    let limit = params
      .limit
      .filter(|&n| n > 0)
      .map(|n| usize::try_from(n).unwrap_or(usize::MAX));

    Self { search, sort, limit }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_params_match_everything() {
    assert_eq!(ContactQuery::from_params(&ListParams::default()), ContactQuery::default());
  }

  #[test]
  fn search_is_case_folded() {
    let q = ContactQuery::from_params(&ListParams {
      search: Some("PFIZER".into()),
      ..ListParams::default()
    });
    assert_eq!(q.search.as_deref(), Some("pfizer"));
  }

  #[test]
  fn empty_strings_are_absent() {
    let q = ContactQuery::from_params(&ListParams {
      search: Some(String::new()),
      sort:   Some(String::new()),
      limit:  None,
    });
    assert_eq!(q, ContactQuery::default());
  }

  #[test]
  fn sort_uses_wire_names() {
    let parse = |s: &str| {
      ContactQuery::from_params(&ListParams { sort: Some(s.into()), ..ListParams::default() }).sort
    };
    assert_eq!(parse("name"), Some(SortField::Name));
    assert_eq!(parse("externalId"), Some(SortField::ExternalId));
    assert_eq!(parse("createdAt"), Some(SortField::CreatedAt));
    assert_eq!(parse("email_check_date"), Some(SortField::EmailCheckDate));
    assert_eq!(parse("favouriteColour"), None);
    assert_eq!(parse("external_id"), None);
  }

  #[test]
  fn zero_limit_is_unbounded() {
    let q = ContactQuery::from_params(&ListParams { limit: Some(0), ..ListParams::default() });
    assert_eq!(q.limit, None);
    let q = ContactQuery::from_params(&ListParams { limit: Some(25), ..ListParams::default() });
    assert_eq!(q.limit, Some(25));
  }
}
