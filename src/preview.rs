// Picture decoding and half-block rendering for the terminal

use crate::error::{CatswpError, Result};
use image::{DynamicImage, GenericImageView, Pixel};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

/// Decodes downloaded bytes into an image, guessing the format from content
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes)
        .map_err(|e| CatswpError::PreloadFailed(format!("Image decoding error: {}", e)))
}

/// Fits an image into a box while preserving aspect ratio, never upscaling
pub fn fit_dimensions(
    original_width: u32,
    original_height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    if original_width == 0 || original_height == 0 || max_width == 0 || max_height == 0 {
        return (0, 0);
    }

    let ratio = (max_width as f64 / original_width as f64)
        .min(max_height as f64 / original_height as f64)
        .min(1.0);

    let width = ((original_width as f64 * ratio) as u32).max(1);
    let height = ((original_height as f64 * ratio) as u32).max(1);
    (width, height)
}

/// Renders an image into at most `cols` x `rows` terminal cells.
///
/// Each cell shows two vertical pixels: the upper half block (▀) takes the
/// upper pixel as foreground and the lower pixel as background.
pub fn render_halfblocks(img: &DynamicImage, cols: u16, rows: u16) -> Vec<Line<'static>> {
    let (original_width, original_height) = img.dimensions();
    let (width, height) = fit_dimensions(
        original_width,
        original_height,
        cols as u32,
        rows as u32 * 2,
    );
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let height = height + height % 2;
    let img = img
        .resize_exact(width, height, image::imageops::FilterType::Triangle)
        .to_rgb8();

    (0..height / 2)
        .map(|row| {
            let spans: Vec<Span<'static>> = (0..width)
                .map(|x| {
                    let upper = img.get_pixel(x, row * 2).to_rgb();
                    let lower = img.get_pixel(x, row * 2 + 1).to_rgb();
                    Span::styled(
                        "▀",
                        Style::default()
                            .fg(Color::Rgb(upper[0], upper[1], upper[2]))
                            .bg(Color::Rgb(lower[0], lower[1], lower[2])),
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 100, 50]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    mod decode_tests {
        use super::*;

        #[test]
        fn test_decode_png() {
            let img = decode_image(&png_bytes(4, 3)).unwrap();
            assert_eq!(img.dimensions(), (4, 3));
        }

        #[test]
        fn test_decode_garbage_fails() {
            let result = decode_image(b"definitely not an image");
            assert!(matches!(result, Err(CatswpError::PreloadFailed(_))));
        }
    }

    mod fit_tests {
        use super::*;

        #[test]
        fn test_fit_scales_down_preserving_ratio() {
            assert_eq!(fit_dimensions(400, 200, 100, 100), (100, 50));
            assert_eq!(fit_dimensions(200, 400, 100, 100), (50, 100));
        }

        #[test]
        fn test_fit_never_upscales() {
            assert_eq!(fit_dimensions(20, 10, 100, 100), (20, 10));
        }

        #[test]
        fn test_fit_degenerate_sizes() {
            assert_eq!(fit_dimensions(0, 10, 100, 100), (0, 0));
            assert_eq!(fit_dimensions(10, 10, 0, 100), (0, 0));
        }
    }

    mod halfblock_tests {
        use super::*;

        #[test]
        fn test_render_fits_cell_box() {
            let img = decode_image(&png_bytes(80, 60)).unwrap();
            let lines = render_halfblocks(&img, 40, 10);

            assert_eq!(lines.len(), 10);
            assert!(lines.iter().all(|line| line.spans.len() <= 40));
        }

        #[test]
        fn test_render_uses_pixel_colors() {
            let img = decode_image(&png_bytes(2, 2)).unwrap();
            let lines = render_halfblocks(&img, 10, 10);

            assert_eq!(lines.len(), 1);
            let span = &lines[0].spans[0];
            assert_eq!(span.content, "▀");
            assert_eq!(span.style.fg, Some(Color::Rgb(200, 100, 50)));
            assert_eq!(span.style.bg, Some(Color::Rgb(200, 100, 50)));
        }

        #[test]
        fn test_render_empty_area() {
            let img = decode_image(&png_bytes(2, 2)).unwrap();
            assert!(render_halfblocks(&img, 0, 5).is_empty());
        }
    }
}
