/// Scene layout: heights and their water profile, mapped to pixel space.
///
/// All arithmetic is done in u64 pixels. The canvas origin is the top-left
/// corner, so a shape's y coordinate falls as its level rises.

use crate::diagram::types::*;
use crate::water::profile::ColumnProfile;

/// Canvas size in pixels for a row of columns.
///
/// Width fits every column plus the padding on both sides; height fits
/// the tallest column the same way. The empty row gets a small fixed
/// placeholder canvas instead.
pub fn canvas_size(heights: &[u32], cfg: &LayoutConfig) -> (u64, u64) {
    if heights.is_empty() {
        return (PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT);
    }
    let max_height = u64::from(heights.iter().copied().max().unwrap_or(0));
    let n = heights.len() as u64;
    let padding = u64::from(cfg.padding);
    let width = n * u64::from(cfg.column_width) + 2 * padding;
    let height = max_height * u64::from(cfg.unit_height) + 2 * padding;
    (width, height)
}

/// Background grid: one horizontal line per integer level up to the
/// tallest column, one vertical line per column boundary, all inset by
/// the padding.
pub fn grid_lines(heights: &[u32], cfg: &LayoutConfig) -> Vec<PxLine> {
    if heights.is_empty() {
        return Vec::new();
    }
    let (width, height) = canvas_size(heights, cfg);
    let padding = u64::from(cfg.padding);
    let unit = u64::from(cfg.unit_height);
    let column_width = u64::from(cfg.column_width);
    let max_height = u64::from(heights.iter().copied().max().unwrap_or(0));

    let mut lines = Vec::new();
    for level in 0..=max_height {
        let y = height - padding - level * unit;
        lines.push(PxLine {
            x1: padding,
            y1: y,
            x2: width - padding,
            y2: y,
        });
    }
    for boundary in 0..=heights.len() as u64 {
        let x = padding + boundary * column_width;
        lines.push(PxLine {
            x1: x,
            y1: padding,
            x2: x,
            y2: height - padding,
        });
    }
    lines
}

/// Column and water rectangles, one pair per index where they exist.
///
/// Columns rise from the canvas floor; water is top-aligned to the shared
/// surface at `water_level`, independent of the column's own top. Columns
/// of height zero and dry columns produce no rectangle.
pub fn column_shapes(
    profile: &[ColumnProfile],
    cfg: &LayoutConfig,
    canvas_height: u64,
) -> Vec<Shape> {
    let padding = u64::from(cfg.padding);
    let unit = u64::from(cfg.unit_height);
    let column_width = u64::from(cfg.column_width);

    let mut shapes = Vec::new();
    for (i, col) in profile.iter().enumerate() {
        let x = padding + i as u64 * column_width;

        if col.height > 0 {
            let pixel_height = u64::from(col.height) * unit;
            shapes.push(Shape::Column(PxRect {
                x,
                y: canvas_height - padding - pixel_height,
                width: column_width,
                height: pixel_height,
            }));
        }

        if col.trapped > 0 {
            let surface = u64::from(col.water_level) * unit;
            shapes.push(Shape::Water(PxRect {
                x,
                y: canvas_height - padding - surface,
                width: column_width,
                height: u64::from(col.trapped) * unit,
            }));
        }
    }
    shapes
}

/// Lay out the full scene: grid first, then columns and water per index,
/// so the filled shapes paint over the grid.
///
/// `profile` must be the water profile of the same `heights`.
pub fn layout(heights: &[u32], profile: &[ColumnProfile], cfg: &LayoutConfig) -> DiagramLayout {
    let (width, height) = canvas_size(heights, cfg);

    if heights.is_empty() {
        return DiagramLayout {
            width,
            height,
            shapes: vec![Shape::Label {
                x: PLACEHOLDER_TEXT_X,
                y: PLACEHOLDER_TEXT_Y,
                text: PLACEHOLDER_TEXT.to_string(),
            }],
        };
    }

    let mut shapes: Vec<Shape> = grid_lines(heights, cfg)
        .into_iter()
        .map(Shape::GridLine)
        .collect();
    shapes.extend(column_shapes(profile, cfg, height));

    DiagramLayout {
        width,
        height,
        shapes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::water::profile::water_profile;

    fn cfg() -> LayoutConfig {
        LayoutConfig::default()
    }

    fn scene(heights: &[u32]) -> DiagramLayout {
        layout(heights, &water_profile(heights), &cfg())
    }

    fn water_rects(scene: &DiagramLayout) -> Vec<PxRect> {
        scene
            .shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Water(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    fn column_rects(scene: &DiagramLayout) -> Vec<PxRect> {
        scene
            .shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Column(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_canvas_formulas() {
        let (w, h) = canvas_size(&[3, 0, 3], &cfg());
        assert_eq!(w, 3 * 60 + 2 * 20);
        assert_eq!(h, 3 * 20 + 2 * 20);
    }

    #[test]
    fn test_placeholder_scene() {
        let scene = scene(&[]);
        assert_eq!((scene.width, scene.height), (100, 50));
        assert_eq!(scene.shapes.len(), 1);
        match &scene.shapes[0] {
            Shape::Label { x, y, text } => {
                assert_eq!((*x, *y), (10, 25));
                assert_eq!(text, "No data");
            }
            other => panic!("expected the placeholder label, got {:?}", other),
        }
    }

    #[test]
    fn test_grid_counts() {
        // max height 2 gives levels 0..=2; two columns give boundaries 0..=2.
        let lines = grid_lines(&[1, 2], &cfg());
        assert_eq!(lines.len(), 3 + 3);
        // Level zero sits on the canvas floor.
        let (_, h) = canvas_size(&[1, 2], &cfg());
        assert_eq!(lines[0].y1, h - 20);
        assert_eq!(lines[0].x1, 20);
    }

    #[test]
    fn test_water_surface_is_flat() {
        // [3, 0, 3]: the water rectangle's top must sit level with the
        // tops of both flanking columns.
        let scene = scene(&[3, 0, 3]);
        let columns = column_rects(&scene);
        let water = water_rects(&scene);
        assert_eq!(columns.len(), 2);
        assert_eq!(water.len(), 1);
        assert_eq!(water[0].y, columns[0].y);
        assert_eq!(water[0].y, columns[1].y);
        assert_eq!(water[0].height, 3 * 20);
        assert_eq!(water[0].x, 20 + 60);
    }

    #[test]
    fn test_columns_rise_from_the_floor() {
        let scene = scene(&[4, 2, 0, 3, 2, 5]);
        let (_, h) = canvas_size(&[4, 2, 0, 3, 2, 5], &cfg());
        for rect in column_rects(&scene) {
            assert_eq!(rect.y + rect.height, h - 20, "column not floor-aligned");
        }
    }

    #[test]
    fn test_water_tops_out_at_the_shared_level() {
        // Column 2 of [4, 2, 0, 3, 2, 5] floods to level 4.
        let scene = scene(&[4, 2, 0, 3, 2, 5]);
        let (_, h) = canvas_size(&[4, 2, 0, 3, 2, 5], &cfg());
        let water = water_rects(&scene);
        let over_gap = water
            .iter()
            .find(|r| r.x == 20 + 2 * 60)
            .expect("the gap column should carry water");
        assert_eq!(over_gap.y, h - 20 - 4 * 20);
        assert_eq!(over_gap.height, 4 * 20);
    }

    #[test]
    fn test_zero_height_columns_have_no_rectangle() {
        let scene = scene(&[0, 1]);
        assert_eq!(column_rects(&scene).len(), 1);
    }

    #[test]
    fn test_all_zero_row() {
        let scene = scene(&[0, 0, 0]);
        assert!(column_rects(&scene).is_empty());
        assert!(water_rects(&scene).is_empty());
        // One horizontal line at level zero plus four boundaries.
        assert_eq!(scene.shapes.len(), 1 + 4);
        assert_eq!(scene.height, 2 * 20);
    }

    #[test]
    fn test_grid_paints_first() {
        let scene = scene(&[3, 0, 3]);
        let first_fill = scene
            .shapes
            .iter()
            .position(|s| !matches!(s, Shape::GridLine(_)))
            .expect("scene should have filled shapes");
        assert!(
            scene.shapes[..first_fill]
                .iter()
                .all(|s| matches!(s, Shape::GridLine(_))),
            "grid lines must precede filled shapes"
        );
    }

    #[test]
    fn test_degenerate_config_is_sanitized() {
        let cfg = LayoutConfig {
            padding: 0,
            column_width: 0,
            unit_height: 0,
        }
        .sanitized();
        assert_eq!(cfg.column_width, 1);
        assert_eq!(cfg.unit_height, 1);
        assert_eq!(cfg.padding, 0);
        let (w, h) = canvas_size(&[2, 2], &cfg);
        assert_eq!((w, h), (2, 2));
    }
}
