//! Multi-page PDF assembly from rasterized pages.
//!
//! Each logical page becomes one PDF page holding a single JPEG image
//! XObject drawn full-bleed. The page width is fixed at A4 portrait width;
//! the height follows each image's aspect ratio, so content is never
//! cropped and never stretched disproportionately.

use latebook_core::{LatebookError, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::io::Cursor;

/// Physical page width in PDF points (A4 portrait, 210 mm).
pub const PDF_PAGE_WIDTH_PT: f32 = 595.28;

/// One rasterized page ready for assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterPage {
    /// JPEG-encoded page image.
    pub jpeg: Vec<u8>,
    /// Pixel width of the image.
    pub width: u32,
    /// Pixel height of the image.
    pub height: u32,
}

/// Assemble rasterized pages, in order, into one PDF document.
///
/// # Errors
/// `AssemblyFailure` when there are no pages or the document cannot be
/// serialized.
pub fn assemble(pages: &[RasterPage]) -> Result<Vec<u8>> {
    if pages.is_empty() {
        return Err(LatebookError::AssemblyFailure(
            "document has no pages".to_string(),
        ));
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());

    for page in pages {
        if page.width == 0 || page.height == 0 {
            return Err(LatebookError::AssemblyFailure(
                "page image has zero dimension".to_string(),
            ));
        }

        #[allow(clippy::cast_precision_loss)]
        let page_height_pt = PDF_PAGE_WIDTH_PT * page.height as f32 / page.width as f32;

        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(page.width),
                "Height" => i64::from(page.height),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            page.jpeg.clone(),
        ));

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        PDF_PAGE_WIDTH_PT.into(),
                        0.into(),
                        0.into(),
                        page_height_pt.into(),
                        0.into(),
                        0.into(),
                    ],
                ),
                Operation::new("Do", vec!["Im0".into()]),
                Operation::new("Q", vec![]),
            ],
        };
        let encoded = content.encode().map_err(|e| {
            LatebookError::AssemblyFailure(format!("content stream encoding failed: {e}"))
        })?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                PDF_PAGE_WIDTH_PT.into(),
                page_height_pt.into(),
            ],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
        });
        kids.push(page_id.into());
    }

    #[allow(clippy::cast_possible_wrap)]
    let count = pages.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Cursor::new(Vec::new());
    doc.save_to(&mut buffer)
        .map_err(|e| LatebookError::AssemblyFailure(format!("PDF serialization failed: {e}")))?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::jpeg::JpegEncoder;
    use image::RgbImage;

    fn tiny_jpeg(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, image::Rgb([255, 255, 255]));
        let mut out = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut out, 95);
        encoder.encode_image(&img).expect("jpeg encode");
        out
    }

    #[test]
    fn test_assemble_orders_pages_front_to_back() {
        let pages = vec![
            RasterPage { jpeg: tiny_jpeg(20, 30), width: 20, height: 30 },
            RasterPage { jpeg: tiny_jpeg(20, 10), width: 20, height: 10 },
        ];
        let bytes = assemble(&pages).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let haystack = bytes.as_slice();
        assert!(haystack.windows(9).any(|w| w == b"DCTDecode"));
        assert!(haystack.windows(8).any(|w| w == b"/Count 2"));
    }

    #[test]
    fn test_height_preserves_aspect_ratio() {
        // A square image on an A4-wide page must produce a square media box.
        let pages = vec![RasterPage { jpeg: tiny_jpeg(50, 50), width: 50, height: 50 }];
        let bytes = assemble(&pages).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("595.28"));
    }

    #[test]
    fn test_empty_input_is_assembly_failure() {
        let err = assemble(&[]).unwrap_err();
        assert!(matches!(err, LatebookError::AssemblyFailure(_)));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let pages = vec![RasterPage { jpeg: Vec::new(), width: 0, height: 10 }];
        assert!(assemble(&pages).is_err());
    }
}
