//! Roster import for latebook
//!
//! Turns external documents — spreadsheets and word-processor files — into
//! normalized [`Student`](latebook_core::Student) candidates.
//!
//! # Architecture
//!
//! ```text
//! file bytes ──▶ ImportPipeline ──▶ RosterBackend
//!                                     ├─ XlsxBackend   (header-alias column mapping)
//!                                     └─ DocxBackend   (DocumentStructure)
//!                                           ├─ table extraction (field classifier)
//!                                           └─ free-text fallback (co-occurrence)
//! ```
//!
//! The spreadsheet path maps columns by recognized header names; the
//! word-processor path walks tables with the per-cell field classifier and
//! falls back to paragraph scanning only when no table yields a candidate.
//! Evaluation order is strictly left-to-right, top-to-bottom: correctness is
//! defined by that order, not by a global best-match search.

pub mod classify;
pub mod docx;
pub mod freetext;
pub mod pipeline;
pub mod table;
pub mod traits;
pub mod xlsx;

pub use classify::FieldKind;
pub use docx::DocxBackend;
pub use pipeline::{ImportMode, ImportPipeline};
pub use traits::RosterBackend;
pub use xlsx::XlsxBackend;
