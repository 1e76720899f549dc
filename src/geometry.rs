//! Mapping between grid units and pixels.
//!
//! Everything here is pure: the overlay window, the editor canvas and the
//! tests all go through the same functions.

use crate::layout::Key;
use crate::settings::Theme;

/// Padding between the surface edge and the grid origin.
pub const PAD_PX: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub unit_px: f32,
    pub gap_px: f32,
    pub row_height_px: f32,
    pub pad_px: f32,
}

impl GridMetrics {
    pub fn new(unit_px: f32, gap_px: f32, row_height_px: f32, pad_px: f32) -> Self {
        Self {
            unit_px,
            gap_px,
            row_height_px,
            pad_px,
        }
    }

    pub fn from_theme(theme: &Theme) -> Self {
        Self::new(
            theme.key_unit_px as f32,
            theme.key_gap_px as f32,
            theme.key_height_px as f32,
            PAD_PX,
        )
    }

    /// Horizontal distance between the origins of two adjacent columns.
    pub fn col_pitch(&self) -> f32 {
        self.unit_px + self.gap_px
    }

    pub fn row_pitch(&self) -> f32 {
        self.row_height_px + self.gap_px
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl PixelRect {
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Half-open containment: the right and bottom edges belong to the
    /// neighbouring gap.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

/// Pixel rectangle of a key. Gaps are only counted between spanned units, so
/// a `w`-unit key is `w * unit + (w - 1) * gap` wide.
pub fn key_rect(key: &Key, metrics: &GridMetrics) -> PixelRect {
    PixelRect {
        x: metrics.pad_px + key.x * metrics.col_pitch(),
        y: metrics.pad_px + key.y * metrics.row_pitch(),
        w: key.w * metrics.unit_px + (key.w - 1.0) * metrics.gap_px,
        h: key.h * metrics.row_height_px + (key.h - 1.0) * metrics.gap_px,
    }
}

/// Continuous grid position of a pixel point, clamped at the grid origin.
pub fn to_grid(raw_x: f32, raw_y: f32, metrics: &GridMetrics) -> (f32, f32) {
    let gx = (raw_x - metrics.pad_px) / metrics.col_pitch();
    let gy = (raw_y - metrics.pad_px) / metrics.row_pitch();
    (clamp_grid(gx), clamp_grid(gy))
}

/// Nearest integer grid cell of a pixel point, clamped at the grid origin.
///
/// The result is in grid cells, not pixels, so snapping it again means
/// mapping it back through [`cell_origin`] first; that round trip returns
/// the same cell.
pub fn snap(raw_x: f32, raw_y: f32, metrics: &GridMetrics) -> (f32, f32) {
    let (gx, gy) = to_grid(raw_x, raw_y, metrics);
    (gx.round(), gy.round())
}

/// Pixel origin of a grid cell; the inverse of [`to_grid`] for in-range points.
pub fn cell_origin(grid_x: f32, grid_y: f32, metrics: &GridMetrics) -> (f32, f32) {
    (
        metrics.pad_px + grid_x * metrics.col_pitch(),
        metrics.pad_px + grid_y * metrics.row_pitch(),
    )
}

fn clamp_grid(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Right and bottom pixel extent of all keys, padding on the leading edges
/// only. Empty layouts extend to the pad.
pub fn content_extent(keys: &[Key], metrics: &GridMetrics) -> (f32, f32) {
    keys.iter()
        .map(|key| key_rect(key, metrics))
        .fold((metrics.pad_px, metrics.pad_px), |(w, h), rect| {
            (w.max(rect.right()), h.max(rect.bottom()))
        })
}

/// Smallest surface that holds every key rectangle with symmetric padding,
/// rounded up to whole pixels.
pub fn bounding_size(keys: &[Key], theme: &Theme) -> (f32, f32) {
    let metrics = GridMetrics::from_theme(theme);
    let (right, bottom) = content_extent(keys, &metrics);
    (
        (right + metrics.pad_px).ceil(),
        (bottom + metrics.pad_px).ceil(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> GridMetrics {
        GridMetrics::new(44.0, 4.0, 44.0, 10.0)
    }

    #[test]
    fn single_unit_key_has_no_gap_in_width() {
        let rect = key_rect(&Key::new("a", "A", 3.0, 2.0), &metrics());
        assert_eq!(rect.x, 10.0 + 3.0 * 48.0);
        assert_eq!(rect.y, 10.0 + 2.0 * 48.0);
        assert_eq!(rect.w, 44.0);
        assert_eq!(rect.h, 44.0);
    }

    #[test]
    fn multi_unit_key_spans_inner_gaps() {
        let rect = key_rect(&Key::new("space", "Space", 0.0, 0.0).sized(2.0, 2.0), &metrics());
        assert_eq!(rect.w, 2.0 * 44.0 + 4.0);
        assert_eq!(rect.h, 2.0 * 44.0 + 4.0);
    }

    #[test]
    fn integer_positions_follow_pitch() {
        for x in 0..20 {
            let rect = key_rect(&Key::new("k", "K", x as f32, 0.0), &metrics());
            assert_eq!(rect.x, 10.0 + x as f32 * 48.0);
        }
    }

    #[test]
    fn snap_rounds_to_nearest_cell() {
        let m = metrics();
        assert_eq!(snap(10.0 + 48.0 * 2.4, 10.0 + 48.0 * 0.6, &m), (2.0, 1.0));
        assert_eq!(snap(-50.0, -50.0, &m), (0.0, 0.0));
    }

    #[test]
    fn snap_is_idempotent_through_cell_origin() {
        let m = metrics();
        for (x, y) in [(0.0, 0.0), (73.0, 19.0), (250.5, 301.2), (999.0, 12.0)] {
            let once = snap(x, y, &m);
            let (ox, oy) = cell_origin(once.0, once.1, &m);
            assert_eq!(snap(ox, oy, &m), once);
        }
    }

    #[test]
    fn to_grid_keeps_fractions_and_clamps() {
        let m = metrics();
        assert_eq!(to_grid(10.0 + 24.0, 10.0, &m), (0.5, 0.0));
        assert_eq!(to_grid(0.0, 0.0, &m), (0.0, 0.0));
    }

    #[test]
    fn bounding_size_pads_both_sides() {
        let theme = Theme::default();
        let keys = vec![Key::new("a", "A", 0.0, 0.0), Key::new("b", "B", 1.0, 1.0)];
        assert_eq!(bounding_size(&keys, &theme), (10.0 + 48.0 + 44.0 + 10.0, 10.0 + 48.0 + 44.0 + 10.0));
    }

    #[test]
    fn bounding_size_of_empty_layout_is_padding() {
        assert_eq!(bounding_size(&[], &Theme::default()), (20.0, 20.0));
    }

    #[test]
    fn bounding_size_rounds_fractional_extents_up() {
        let keys = vec![Key::new("a", "A", 0.25, 0.0)];
        let (w, _) = bounding_size(&keys, &Theme::default());
        assert_eq!(w, (10.0f32 + 12.0 + 44.0 + 10.0).ceil());
    }
}
