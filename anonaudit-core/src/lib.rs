//! Core data structures and algorithms for the anonymization audit engine.
//!
//! This crate computes k-anonymity, l-diversity, (X,Y)-anonymity, and
//! attacker re-identification risk over an original/anonymized dataset
//! pair, and assembles the results into a single [`report::Report`].
//!
//! # Security Guarantees
//! Error messages never include raw cell values from quasi-identifying or
//! sensitive columns. Only column names, counts, and already-rendered
//! violation keys (QI values the report format itself exposes) may appear
//! in error text.

pub mod error;
pub mod grouper;
pub mod ingest;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod numeric;
pub mod qidspec;
pub mod report;
pub mod validation;
pub mod validator;

pub use error::{AnonAuditError, Result};
pub use ingest::EngineConfig;
pub use model::{Cell, Column, Table};
pub use qidspec::QidSpec;
pub use report::Report;
pub use validator::analyze;
