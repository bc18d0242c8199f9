//! Core types and trait definitions for the Roster contacts directory.
//!
//! This crate is deliberately free of HTTP and database dependencies. It owns
//! the contact model, field validation, the [`store::ContactStore`] abstraction
//! and the [`service::ContactService`] that sits between the HTTP layer and a
//! concrete store.

pub mod contact;
pub mod error;
pub mod patch;
pub mod query;
pub mod service;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
