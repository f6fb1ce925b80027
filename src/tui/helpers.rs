// Small layout and color helpers for the TUI

use super::colors::{BORDER_RGB, LIKE_RGB, PASS_RGB};
use crate::domain::gesture::feedback_ratio;
use ratatui::{layout::Rect, style::Color};

/// Fraction of `total` that is `done`, in [0, 1]
pub fn calculate_progress(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (done as f64 / total as f64).clamp(0.0, 1.0)
}

/// Linear blend between two colors
pub fn blend(from: (u8, u8, u8), to: (u8, u8, u8), ratio: f64) -> Color {
    let ratio = ratio.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * ratio).round() as u8;
    Color::Rgb(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// Card border color for a drag displacement: red going left, green going right
pub fn swipe_tint(displacement: f64) -> Color {
    let target = if displacement < 0.0 { PASS_RGB } else { LIKE_RGB };
    blend(BORDER_RGB, target, feedback_ratio(displacement))
}

/// Moves `rect` horizontally by `offset` columns, keeping it inside `bounds`
pub fn shift_rect(rect: Rect, offset: i32, bounds: Rect) -> Rect {
    let min_x = bounds.x as i32;
    let max_x = (bounds.x as i32 + bounds.width as i32 - rect.width as i32).max(min_x);
    let x = (rect.x as i32 + offset).clamp(min_x, max_x);
    Rect { x: x as u16, ..rect }
}

/// Spinner frame for the given elapsed milliseconds
pub fn spinner_frame(millis: u128) -> &'static str {
    const SPINNERS: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    SPINNERS[(millis / 100) as usize % SPINNERS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_progress() {
        assert_eq!(calculate_progress(0, 0), 0.0);
        assert_eq!(calculate_progress(3, 12), 0.25);
        assert_eq!(calculate_progress(12, 12), 1.0);
        assert_eq!(calculate_progress(20, 12), 1.0);
    }

    #[test]
    fn test_blend_endpoints() {
        assert_eq!(blend((0, 0, 0), (200, 100, 50), 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(blend((0, 0, 0), (200, 100, 50), 1.0), Color::Rgb(200, 100, 50));
        assert_eq!(blend((0, 0, 0), (200, 100, 50), 0.5), Color::Rgb(100, 50, 25));
    }

    #[test]
    fn test_swipe_tint() {
        let (r, g, b) = BORDER_RGB;
        assert_eq!(swipe_tint(0.0), Color::Rgb(r, g, b));

        let (r, g, b) = PASS_RGB;
        assert_eq!(swipe_tint(-150.0), Color::Rgb(r, g, b));

        let (r, g, b) = LIKE_RGB;
        assert_eq!(swipe_tint(500.0), Color::Rgb(r, g, b));
    }

    #[test]
    fn test_shift_rect_clamps_to_bounds() {
        let bounds = Rect::new(0, 0, 80, 24);
        let card = Rect::new(20, 2, 40, 20);

        assert_eq!(shift_rect(card, 5, bounds).x, 25);
        assert_eq!(shift_rect(card, -5, bounds).x, 15);
        assert_eq!(shift_rect(card, -100, bounds).x, 0);
        assert_eq!(shift_rect(card, 100, bounds).x, 40);
    }

    #[test]
    fn test_spinner_frame_cycles() {
        assert_eq!(spinner_frame(0), "⠋");
        assert_eq!(spinner_frame(100), "⠙");
        assert_eq!(spinner_frame(1000), "⠋");
    }
}
