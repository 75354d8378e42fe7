// SPDX-License-Identifier: MPL-2.0
//! User-facing message texts.
//!
//! Every notification body and demo-application label lives in a Fluent
//! resource embedded at compile time (`assets/messages/pt-BR.ftl`). Keeping
//! the texts out of the code lets the wording change without touching the
//! notification logic.
//!
//! Only a single locale is shipped; there is no locale negotiation.

pub mod fluent;

pub use fluent::{Catalog, CATALOG_LOCALE};
