//! Daily report domain.
//!
//! Every operation is generic over a SeaORM [`sea_orm::ConnectionTrait`] so it
//! runs the same against a pooled connection or an open transaction. Store
//! level constraints (unique email, foreign keys, the status check) stay the
//! source of truth; the checks here only turn the common violations into
//! typed errors before the statement is sent.

pub mod customers;
mod error;
pub mod hierarchy;
pub mod password;
pub mod reports;
pub mod sales;
pub mod seed;
pub mod validate;

pub use error::{ReportsError, ReportsResult};

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;

pub(crate) fn now() -> DateTimeWithTimeZone {
    Utc::now().into()
}
