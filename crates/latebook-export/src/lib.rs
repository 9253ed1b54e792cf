//! Report export for latebook
//!
//! Renders paginated report rows into per-page images, rasterizes each page
//! to JPEG, assembles the rasters into one multi-page PDF at fixed physical
//! page width, and delivers the result either to a local save target or to a
//! platform share mechanism.
//!
//! The whole export is one atomic, retryable unit: if any page fails to
//! rasterize, the export fails and no partial document is returned.

pub mod deliver;
pub mod export;
pub mod pdf;
pub mod render;

pub use deliver::{deliver, Delivered, Platform, ShareTarget};
pub use export::{Exporter, PageRasterizer, ReportContext};
pub use pdf::{assemble, RasterPage, PDF_PAGE_WIDTH_PT};
pub use render::{PageRenderer, PAGE_WIDTH_PX};
