//! Export orchestration: pages in, one PDF out.

use crate::pdf::{self, RasterPage};
use crate::render::PageRenderer;
use latebook_core::{LatebookError, Result, SchoolInfo};
use latebook_report::{Page, ReportRow};
use log::info;

/// Everything a page needs beyond its own rows: the report title, the
/// school identity, and the print date. Identical on every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    /// Report title line.
    pub title: String,
    /// School names for the header and signature footer.
    pub school: SchoolInfo,
    /// Print date shown in the header, `YYYY-MM-DD`.
    pub printed_on: String,
}

/// Turns one logical page into a JPEG raster.
pub trait PageRasterizer {
    /// Rasterize a single page.
    ///
    /// # Errors
    /// `RasterizationFailure` when the page cannot be drawn or encoded.
    fn rasterize_page(&self, page: &Page<ReportRow>, ctx: &ReportContext) -> Result<RasterPage>;
}

/// Drives rasterization page by page and assembles the final document.
///
/// The export is all-or-nothing: the first page failure aborts the run and
/// no partial PDF is produced. Re-running with the same inputs yields an
/// equivalent document.
pub struct Exporter<R = PageRenderer> {
    rasterizer: R,
}

impl Exporter<PageRenderer> {
    /// Build an exporter backed by the default system-font renderer.
    ///
    /// # Errors
    /// `RasterizationFailure` when no usable font is available.
    pub fn new() -> Result<Self> {
        Ok(Self { rasterizer: PageRenderer::new()? })
    }
}

impl<R: PageRasterizer> Exporter<R> {
    /// Build an exporter around an explicit rasterizer.
    pub fn with_rasterizer(rasterizer: R) -> Self {
        Self { rasterizer }
    }

    /// Rasterize every page in order and assemble the PDF.
    ///
    /// # Errors
    /// `AssemblyFailure` when `pages` is empty; `RasterizationFailure` from
    /// the first page that fails to render.
    pub fn export(&self, pages: &[Page<ReportRow>], ctx: &ReportContext) -> Result<Vec<u8>> {
        if pages.is_empty() {
            return Err(LatebookError::AssemblyFailure(
                "report has no pages to export".to_string(),
            ));
        }

        let mut rasters = Vec::with_capacity(pages.len());
        for page in pages {
            rasters.push(self.rasterizer.rasterize_page(page, ctx)?);
        }

        let bytes = pdf::assemble(&rasters)?;
        info!(
            "exported \"{}\": {} page(s), {} bytes",
            ctx.title,
            pages.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}
