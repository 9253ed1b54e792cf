//! Report building for latebook
//!
//! [`aggregate`] filters, groups, and deterministically orders lateness
//! records according to a [`ReportSpec`](latebook_core::ReportSpec);
//! [`paginate`] splits the resulting rows into fixed-capacity pages with
//! continued row numbering. Both are pure: same inputs, same output.

pub mod aggregate;
pub mod paginate;

pub use aggregate::{aggregate, report_title, FrequencyRow, LateRow, ReportRow};
pub use paginate::{paginate, Page, PAGE_ROWS};
