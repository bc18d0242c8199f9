//! The SQLite implementation of [`ContactStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, types::Value};
use roster_core::{
  contact::{Contact, ContactId, NewContact},
  patch::ContactPatch,
  query::ContactQuery,
  store::ContactStore,
  validate::fold_case,
};

use crate::{
  Error, Result,
  encode::{
    EncodedContact, RawContact, editable_column, encode_dt, encode_id, folded_column,
    sort_column, truncate_dt,
  },
  schema::{CONTACT_COLUMNS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster contact store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn text_or_null(v: Option<String>) -> Value { v.map_or(Value::Null, Value::Text) }

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = Error;

  async fn insert_many(&self, contacts: Vec<NewContact>) -> Result<Vec<Contact>> {
    let now = truncate_dt(Utc::now());

    let inserted: Vec<Contact> = contacts
      .into_iter()
      .enumerate()
      .map(|(index, input)| {
        let c = input
          .normalize()
          .map_err(|source| Error::InvalidRecord { index, source })?;
        Ok(Contact {
          id:                    ContactId::new(),
          external_id:           c.external_id,
          name:                  c.name,
          title:                 c.title,
          level:                 c.level,
          company:               c.company,
          email:                 c.email,
          phone:                 c.phone,
          linkedin:              c.linkedin,
          photo:                 c.photo,
          unlocked:              c.unlocked,
          unlocked_company:      c.unlocked_company,
          email_check_status:    c.email_check_status,
          linkedin_check_status: c.linkedin_check_status,
          email_check_date:      c.email_check_date.map(truncate_dt),
          linkedin_check_date:   c.linkedin_check_date.map(truncate_dt),
          created_at:            now,
          updated_at:            now,
        })
      })
      .collect::<Result<_>>()?;

    let rows: Vec<EncodedContact> = inserted.iter().map(EncodedContact::from).collect();
    let count = rows.len();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO contacts (
               contact_id, external_id, name, name_folded, title, level,
               company, company_folded, email, phone, linkedin, photo,
               unlocked, unlocked_company, email_check_status,
               linkedin_check_status, email_check_date, linkedin_check_date,
               created_at, updated_at
             ) VALUES (
               ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
               ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20
             )",
          )?;
          for r in &rows {
            stmt.execute(rusqlite::params![
              r.contact_id,
              r.external_id,
              r.name,
              r.name_folded,
              r.title,
              r.level,
              r.company,
              r.company_folded,
              r.email,
              r.phone,
              r.linkedin,
              r.photo,
              r.unlocked,
              r.unlocked_company,
              r.email_check_status,
              r.linkedin_check_status,
              r.email_check_date,
              r.linkedin_check_date,
              r.created_at,
              r.updated_at,
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::debug!(count, "inserted contacts");
    Ok(inserted)
  }

  async fn get(&self, id: ContactId) -> Result<Option<Contact>> {
    let id_str = encode_id(id);

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE contact_id = ?1"),
              rusqlite::params![id_str],
              RawContact::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn find(&self, query: &ContactQuery) -> Result<Vec<Contact>> {
    let needle    = query.search.clone();
    let order_col = query.sort.map(sort_column);
    // SQLite treats a negative LIMIT as "no limit".
    let limit_val = query
      .limit
      .map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));

    let raws: Vec<RawContact> = self
      .conn
      .call(move |conn| {
        let where_clause = if needle.is_some() {
          "WHERE instr(name_folded, ?1) > 0 OR instr(company_folded, ?1) > 0"
        } else {
          ""
        };

        // Ties (and absent values, which sort first) fall back to insertion
        // order.
        let order_clause = match order_col {
          Some(col) => format!("ORDER BY {col} ASC, rowid ASC"),
          None => "ORDER BY rowid ASC".to_owned(),
        };

        let sql = format!(
          "SELECT {CONTACT_COLUMNS}
           FROM contacts
           {where_clause}
           {order_clause}
           LIMIT ?2"
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![needle, limit_val], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn update(&self, id: ContactId, patch: ContactPatch) -> Result<Option<Contact>> {
    let mut assignments: Vec<String> = Vec::with_capacity(patch.len() + 1);
    let mut values: Vec<Value> = Vec::with_capacity(patch.len() + 2);

    for (field, value) in patch.changes() {
      values.push(text_or_null(value.clone()));
      assignments.push(format!("{} = ?{}", editable_column(*field), values.len()));

      if let Some(folded) = folded_column(*field) {
        values.push(text_or_null(value.as_deref().map(fold_case)));
        assignments.push(format!("{folded} = ?{}", values.len()));
      }
    }

    values.push(Value::Text(encode_dt(truncate_dt(Utc::now()))));
    assignments.push(format!("updated_at = ?{}", values.len()));

    values.push(Value::Text(encode_id(id)));
    let sql = format!(
      "UPDATE contacts SET {} WHERE contact_id = ?{} RETURNING {CONTACT_COLUMNS}",
      assignments.join(", "),
      values.len(),
    );

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params_from_iter(values), RawContact::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }
}
