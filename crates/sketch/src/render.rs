//! Contour preview for display next to the original sketch.
//!
//! Drawn from the raw contours; the simplified paths are never touched.

use image::{Rgb, RgbImage};
use imageproc::{drawing::{draw_filled_rect_mut, draw_line_segment_mut}, rect::Rect};
use sketch_common::Point;
use crate::{error::{Result, SketchError}, types::Extraction};

pub const CONTOUR_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Draw every raw contour, 2 px wide, on a black canvas of the sketch's size
pub fn draw_contours(extraction: &Extraction) -> RgbImage {
    let mut canvas = RgbImage::new(extraction.image_width, extraction.image_height);
    for contour in &extraction.contours {
        draw_closed_polyline(&mut canvas, contour);
    }
    canvas
}

/// Render the preview and write it; the format follows the file extension
pub fn save_preview<P: AsRef<std::path::Path>>(extraction: &Extraction, path: P) -> Result<()> {
    draw_contours(extraction)
        .save(path.as_ref())
        .map_err(|e| SketchError::ImageProcessing(format!("Failed to write preview: {}", e)))?;
    tracing::debug!("wrote contour preview to {}", path.as_ref().display());
    Ok(())
}

fn draw_closed_polyline(canvas: &mut RgbImage, contour: &[Point]) {
    match contour {
        [] => {}
        [only] => {
            draw_filled_rect_mut(canvas, Rect::at(only.x, only.y).of_size(2, 2), CONTOUR_COLOR);
        }
        _ => {
            let closing = contour.last().zip(contour.first());
            let segments = contour.windows(2).map(|pair| (pair[0], pair[1])).chain(closing.map(|(a, b)| (*a, *b)));
            for (start, end) in segments {
                for (dx, dy) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)] {
                    draw_line_segment_mut(
                        canvas,
                        (start.x as f32 + dx, start.y as f32 + dy),
                        (end.x as f32 + dx, end.y as f32 + dy),
                        CONTOUR_COLOR,
                    );
                }
            }
        }
    }
}
