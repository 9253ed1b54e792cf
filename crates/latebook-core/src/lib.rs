//! Core types for latebook
//!
//! This crate holds everything the other latebook crates agree on:
//!
//! - the record model ([`Student`], [`LateRecord`], [`ActionTaken`],
//!   [`SchoolInfo`])
//! - the report configuration ([`ReportSpec`], [`ReportKind`])
//! - the adapter-neutral document shape ([`DocumentStructure`]) produced by
//!   format backends and consumed by the extraction heuristics
//! - the error taxonomy ([`LatebookError`])
//!
//! The core never performs I/O and never mutates records handed to it; the
//! import pipeline creates new `Student` candidates, and persisting them is
//! the caller's job.

pub mod error;
pub mod format;
pub mod model;
pub mod report_spec;
pub mod structure;

pub use error::{LatebookError, Result};
pub use format::InputFormat;
pub use model::{ActionTaken, LateRecord, SchoolInfo, Student};
pub use report_spec::{ReportKind, ReportSpec};
pub use structure::{DocumentStructure, TableBlock};
