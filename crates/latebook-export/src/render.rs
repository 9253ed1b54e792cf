//! Page rendering: one report page → one RGBA image → one JPEG raster.
//!
//! Every page repeats the header block (school name, print date, report
//! title). The signature footer (supervisor, manager) appears only on the
//! last page; other pages end with a short "continued" marker. The image
//! width is fixed; height follows the page's row count.

use crate::export::{PageRasterizer, ReportContext};
use crate::pdf::RasterPage;
use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use latebook_core::{LatebookError, Result};
use latebook_report::{Page, ReportRow};
use log::debug;

/// Fixed raster width for every page, in pixels.
pub const PAGE_WIDTH_PX: u32 = 1240;

/// JPEG quality for page rasters.
const JPEG_QUALITY: u8 = 95;

const MARGIN: u32 = 60;
const HEADER_HEIGHT: u32 = 190;
const ROW_HEIGHT: u32 = 46;
const FOOTER_HEIGHT: u32 = 170;

const BLACK: Rgba<u8> = Rgba([20, 20, 20, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const HEADER_FILL: Rgba<u8> = Rgba([229, 231, 235, 255]);
const RULE: Rgba<u8> = Rgba([120, 120, 120, 255]);

/// Candidate font locations, probed in order. The first readable face wins.
const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/noto/NotoNaskhArabic-Regular.ttf",
    "/usr/share/fonts/noto/NotoNaskhArabic-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansArabic-Regular.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
];

/// Renders report pages with a single loaded font face.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    font: FontArc,
}

impl PageRenderer {
    /// Create a renderer with the first usable system font.
    ///
    /// # Errors
    /// `RasterizationFailure` when no candidate font can be loaded.
    pub fn new() -> Result<Self> {
        for path in FONT_PATHS {
            if let Ok(data) = std::fs::read(path) {
                if let Ok(font) = FontArc::try_from_vec(data) {
                    debug!("loaded page font from {path}");
                    return Ok(Self { font });
                }
            }
        }
        Err(LatebookError::RasterizationFailure(
            "no usable system font found for page rendering".to_string(),
        ))
    }

    /// Create a renderer from explicit font bytes (embedded faces, tests).
    ///
    /// # Errors
    /// `RasterizationFailure` when the bytes are not a parseable font.
    pub fn from_font_bytes(data: Vec<u8>) -> Result<Self> {
        let font = FontArc::try_from_vec(data).map_err(|e| {
            LatebookError::RasterizationFailure(format!("invalid font data: {e}"))
        })?;
        Ok(Self { font })
    }

    /// Render one page to an RGBA image of fixed width.
    #[must_use]
    pub fn render(&self, page: &Page<ReportRow>, ctx: &ReportContext) -> RgbaImage {
        let columns = columns_for(page.rows.first());
        let height = page_height_px(page.rows.len());
        let mut img = RgbaImage::from_pixel(PAGE_WIDTH_PX, height, WHITE);

        self.draw_header(&mut img, ctx);
        self.draw_table(&mut img, page, &columns);

        let footer_top = height - FOOTER_HEIGHT;
        if page.is_last {
            self.draw_signature_footer(&mut img, footer_top, ctx);
        } else {
            self.draw_continued_marker(&mut img, footer_top);
        }

        img
    }

    fn draw_header(&self, img: &mut RgbaImage, ctx: &ReportContext) {
        let title_scale = PxScale::from(34.0);
        let meta_scale = PxScale::from(24.0);

        // Print date, top-left; ministry block, top-right.
        self.draw_text(img, MARGIN as i32, 40, meta_scale, &ctx.printed_on);
        self.draw_text_right(img, 40, meta_scale, "سلطنة عمان");
        self.draw_text_right(img, 72, meta_scale, "وزارة التربية والتعليم");

        self.draw_text_centered(img, 104, title_scale, &ctx.title);
        self.draw_text_centered(img, 146, meta_scale, &ctx.school.school_name);

        // Rule under the header block.
        let rule = Rect::at(MARGIN as i32, (HEADER_HEIGHT - 8) as i32)
            .of_size(PAGE_WIDTH_PX - 2 * MARGIN, 3);
        draw_filled_rect_mut(img, rule, BLACK);
    }

    fn draw_table(&self, img: &mut RgbaImage, page: &Page<ReportRow>, columns: &[Column]) {
        let table_left = MARGIN as i32;
        let table_width = PAGE_WIDTH_PX - 2 * MARGIN;
        let text_scale = PxScale::from(22.0);
        let mut y = HEADER_HEIGHT as i32 + 8;

        // Header row, filled.
        draw_filled_rect_mut(
            img,
            Rect::at(table_left, y).of_size(table_width, ROW_HEIGHT),
            HEADER_FILL,
        );
        self.draw_row(
            img,
            y,
            columns,
            &columns.iter().map(|c| c.header.to_string()).collect::<Vec<_>>(),
            text_scale,
        );
        y += ROW_HEIGHT as i32;

        for (offset, row) in page.rows.iter().enumerate() {
            let number = page.starting_row_number + offset + 1;
            let cells = cells_for_row(row, number);
            self.draw_row(img, y, columns, &cells, text_scale);
            y += ROW_HEIGHT as i32;
        }
    }

    fn draw_row(
        &self,
        img: &mut RgbaImage,
        y: i32,
        columns: &[Column],
        cells: &[String],
        scale: PxScale,
    ) {
        let table_width = (PAGE_WIDTH_PX - 2 * MARGIN) as f32;
        let mut x = MARGIN as f32;

        for (column, cell) in columns.iter().zip(cells) {
            let width = table_width * column.width;
            #[allow(clippy::cast_possible_truncation)]
            let cell_rect = Rect::at(x as i32, y).of_size(width as u32, ROW_HEIGHT);
            draw_hollow_rect_mut(img, cell_rect, RULE);

            let text = fit_text(&self.font, scale, cell, width - 12.0);
            #[allow(clippy::cast_possible_truncation)]
            self.draw_text(img, x as i32 + 8, y + 10, scale, &text);
            x += width;
        }
    }

    fn draw_signature_footer(&self, img: &mut RgbaImage, top: u32, ctx: &ReportContext) {
        let scale = PxScale::from(24.0);
        let quarter = (PAGE_WIDTH_PX / 4) as i32;

        self.draw_text_centered_at(img, quarter, top as i32 + 40, scale, "مشرف السجل");
        self.draw_text_centered_at(
            img,
            quarter,
            top as i32 + 110,
            scale,
            &ctx.school.supervisor_name,
        );
        self.draw_text_centered_at(img, 3 * quarter, top as i32 + 40, scale, "مدير المدرسة");
        self.draw_text_centered_at(
            img,
            3 * quarter,
            top as i32 + 110,
            scale,
            &ctx.school.manager_name,
        );
    }

    fn draw_continued_marker(&self, img: &mut RgbaImage, top: u32) {
        self.draw_text_centered(img, top as i32 + 60, PxScale::from(24.0), "يتبع...");
    }

    fn draw_text(&self, img: &mut RgbaImage, x: i32, y: i32, scale: PxScale, text: &str) {
        draw_text_mut(img, BLACK, x, y, scale, &self.font, text);
    }

    fn draw_text_centered(&self, img: &mut RgbaImage, y: i32, scale: PxScale, text: &str) {
        self.draw_text_centered_at(img, (PAGE_WIDTH_PX / 2) as i32, y, scale, text);
    }

    fn draw_text_centered_at(
        &self,
        img: &mut RgbaImage,
        center_x: i32,
        y: i32,
        scale: PxScale,
        text: &str,
    ) {
        let width = text_width(&self.font, scale, text);
        #[allow(clippy::cast_possible_truncation)]
        let x = center_x - (width / 2.0) as i32;
        self.draw_text(img, x.max(0), y, scale, text);
    }

    fn draw_text_right(&self, img: &mut RgbaImage, y: i32, scale: PxScale, text: &str) {
        let width = text_width(&self.font, scale, text);
        #[allow(clippy::cast_possible_truncation)]
        let x = (PAGE_WIDTH_PX - MARGIN) as i32 - width as i32;
        self.draw_text(img, x.max(0), y, scale, text);
    }
}

impl PageRasterizer for PageRenderer {
    fn rasterize_page(&self, page: &Page<ReportRow>, ctx: &ReportContext) -> Result<RasterPage> {
        let image = self.render(page, ctx);
        rasterize(&image)
    }
}

/// Encode a rendered page image as a JPEG raster.
///
/// # Errors
/// `RasterizationFailure` when JPEG encoding fails.
pub fn rasterize(image: &RgbaImage) -> Result<RasterPage> {
    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    let mut jpeg = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
    encoder
        .encode_image(&rgb)
        .map_err(|e| LatebookError::RasterizationFailure(format!("JPEG encoding failed: {e}")))?;

    Ok(RasterPage {
        jpeg,
        width: image.width(),
        height: image.height(),
    })
}

/// One table column: header label plus width as a fraction of table width.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Column {
    header: &'static str,
    width: f32,
}

/// Column layout for record rows.
const LATE_COLUMNS: [Column; 7] = [
    Column { header: "#", width: 0.06 },
    Column { header: "التاريخ", width: 0.13 },
    Column { header: "الاسم", width: 0.31 },
    Column { header: "الصف", width: 0.12 },
    Column { header: "ف", width: 0.08 },
    Column { header: "الحضور", width: 0.12 },
    Column { header: "الإجراء", width: 0.18 },
];

/// Column layout for frequency rows.
const FREQUENCY_COLUMNS: [Column; 6] = [
    Column { header: "#", width: 0.06 },
    Column { header: "الاسم", width: 0.30 },
    Column { header: "الصف", width: 0.12 },
    Column { header: "ف", width: 0.08 },
    Column { header: "عدد المرات", width: 0.10 },
    Column { header: "التواريخ", width: 0.34 },
];

fn columns_for(first_row: Option<&ReportRow>) -> Vec<Column> {
    match first_row {
        Some(ReportRow::Frequency(_)) => FREQUENCY_COLUMNS.to_vec(),
        _ => LATE_COLUMNS.to_vec(),
    }
}

/// Project a report row into one text cell per column, with its continued
/// row number first.
fn cells_for_row(row: &ReportRow, number: usize) -> Vec<String> {
    match row {
        ReportRow::Late(row) => vec![
            number.to_string(),
            row.date.clone(),
            row.student_name.clone(),
            row.grade.clone(),
            row.class_name.clone(),
            match (&row.arrival_time, row.is_excused) {
                (Some(time), true) => format!("{time} (معذور)"),
                (Some(time), false) => time.clone(),
                (None, true) => "معذور".to_string(),
                (None, false) => String::new(),
            },
            row.action_taken.label().to_string(),
        ],
        ReportRow::Frequency(row) => vec![
            number.to_string(),
            row.student_name.clone(),
            row.grade.clone(),
            row.class_name.clone(),
            row.count.to_string(),
            row.dates.join("، "),
        ],
    }
}

/// Image height for a page of `row_count` body rows (plus the header row).
fn page_height_px(row_count: usize) -> u32 {
    #[allow(clippy::cast_possible_truncation)]
    let rows = (row_count as u32 + 1) * ROW_HEIGHT;
    HEADER_HEIGHT + 16 + rows + FOOTER_HEIGHT
}

/// Advance width of a text run at the given scale.
fn text_width(font: &FontArc, scale: PxScale, text: &str) -> f32 {
    let scaled = font.as_scaled(scale);
    text.chars()
        .map(|c| scaled.h_advance(font.glyph_id(c)))
        .sum()
}

/// Truncate text with an ellipsis so it fits the given pixel width.
fn fit_text(font: &FontArc, scale: PxScale, text: &str, max_width: f32) -> String {
    if text_width(font, scale, text) <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        let candidate = format!("{out}{c}…");
        if text_width(font, scale, &candidate) > max_width {
            break;
        }
        out.push(c);
    }
    format!("{out}…")
}

#[cfg(test)]
mod tests {
    use super::*;
    use latebook_report::FrequencyRow;

    fn frequency_row() -> ReportRow {
        ReportRow::Frequency(FrequencyRow {
            student_name: "أحمد علي".to_string(),
            grade: "5".to_string(),
            class_name: "أ".to_string(),
            count: 3,
            dates: vec!["2024-01-01".to_string(), "2024-01-05".to_string()],
        })
    }

    #[test]
    fn test_column_widths_cover_the_table() {
        let late: f32 = LATE_COLUMNS.iter().map(|c| c.width).sum();
        let freq: f32 = FREQUENCY_COLUMNS.iter().map(|c| c.width).sum();
        assert!((late - 1.0).abs() < 1e-6);
        assert!((freq - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_columns_follow_row_kind() {
        assert_eq!(columns_for(Some(&frequency_row())).len(), FREQUENCY_COLUMNS.len());
        assert_eq!(columns_for(None).len(), LATE_COLUMNS.len());
    }

    #[test]
    fn test_cells_for_frequency_row() {
        let cells = cells_for_row(&frequency_row(), 45);
        assert_eq!(cells[0], "45");
        assert_eq!(cells[4], "3");
        assert!(cells[5].contains("2024-01-01"));
    }

    #[test]
    fn test_page_height_grows_with_rows() {
        assert!(page_height_px(22) > page_height_px(1));
        // A full page stays within plausible A4-ish proportions.
        assert!(page_height_px(22) > PAGE_WIDTH_PX);
    }

    #[test]
    fn test_rasterize_produces_jpeg() {
        let img = RgbaImage::from_pixel(16, 24, Rgba([255, 255, 255, 255]));
        let raster = rasterize(&img).unwrap();
        assert_eq!(raster.width, 16);
        assert_eq!(raster.height, 24);
        assert!(raster.jpeg.starts_with(&[0xFF, 0xD8]));
    }

    #[test]
    fn test_missing_font_bytes_fail() {
        let err = PageRenderer::from_font_bytes(vec![0, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, LatebookError::RasterizationFailure(_)));
    }
}
