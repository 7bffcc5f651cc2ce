//! `hemokit_record` v1:
//! Field-value model for exportable donation records.
//!
//! Architecture:
//! - `spec` : record/value models
//! - `util` : pure materialization helpers

pub mod spec;
pub mod util;

pub use spec::{EnumFieldValue, SpecRecord};
pub use util::{derive_field_value_from_json, derive_record_from_json_object};
