/// Diagram rasterization: DiagramLayout to PNG bytes via plotters.

use crate::diagram::types::*;
use image::codecs::png::PngEncoder;
use image::ImageEncoder;
use plotters::prelude::*;

/// Refuse rasters larger than this many pixels. The SVG export has no
/// such cap, so oversized scenes are still fully exportable.
const MAX_PIXELS: u64 = 16_000_000;

/// Render a layout to a PNG image for in-terminal display.
///
/// `columns` and `total` are carried through onto the result so the
/// worksheet can caption the image.
pub fn render_diagram(
    layout: &DiagramLayout,
    columns: usize,
    total: u64,
) -> Result<RenderedDiagram, String> {
    let pixels = layout.width.checked_mul(layout.height).unwrap_or(u64::MAX);
    if pixels == 0 {
        return Err("empty canvas".to_string());
    }
    if pixels > MAX_PIXELS {
        return Err(format!(
            "canvas {}x{} is too large to rasterize; :export writes the full drawing",
            layout.width, layout.height
        ));
    }

    let width = layout.width as u32;
    let height = layout.height as u32;
    let mut buf = vec![0u8; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        root.fill(&rgb(CANVAS_COLOR)).map_err(|e| format!("fill: {}", e))?;

        for shape in &layout.shapes {
            match shape {
                Shape::GridLine(line) => {
                    root.draw(&PathElement::new(
                        vec![
                            (line.x1 as i32, line.y1 as i32),
                            (line.x2 as i32, line.y2 as i32),
                        ],
                        rgb(GRID_COLOR).stroke_width(1),
                    ))
                    .map_err(|e| format!("grid line: {}", e))?;
                }
                Shape::Column(r) => {
                    root.draw(&Rectangle::new(corners(r), rgb(COLUMN_COLOR).filled()))
                        .map_err(|e| format!("column: {}", e))?;
                }
                Shape::Water(r) => {
                    root.draw(&Rectangle::new(corners(r), rgb(WATER_COLOR).filled()))
                        .map_err(|e| format!("water: {}", e))?;
                }
                // No font backend is compiled in; labels appear only in
                // the SVG export and as worksheet text.
                Shape::Label { .. } => {}
            }
        }

        root.present().map_err(|e| format!("present: {}", e))?;
    }

    let png_bytes = encode_rgb_to_png(&buf, width, height)?;

    Ok(RenderedDiagram {
        png_bytes,
        width,
        height,
        columns,
        total,
    })
}

fn rgb(color: (u8, u8, u8)) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn corners(r: &PxRect) -> [(i32, i32); 2] {
    [
        (r.x as i32, r.y as i32),
        ((r.x + r.width) as i32, (r.y + r.height) as i32),
    ]
}

/// Encode a raw RGB pixel buffer to PNG.
fn encode_rgb_to_png(rgb: &[u8], width: u32, height: u32) -> Result<Vec<u8>, String> {
    let mut png = Vec::new();
    let encoder = PngEncoder::new(&mut png);
    encoder
        .write_image(rgb, width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| format!("PNG encode: {}", e))?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::mapper;
    use crate::water::profile::water_profile;

    fn rendered(heights: &[u32]) -> RenderedDiagram {
        let profile = water_profile(heights);
        let layout = mapper::layout(heights, &profile, &LayoutConfig::default());
        render_diagram(&layout, heights.len(), 0).unwrap()
    }

    #[test]
    fn test_render_simple() {
        let result = rendered(&[3, 0, 3]);
        assert!(!result.png_bytes.is_empty());
        assert_eq!(result.width, 220);
        assert_eq!(result.height, 100);
        // PNG magic bytes
        assert_eq!(&result.png_bytes[1..4], b"PNG");
    }

    #[test]
    fn test_render_placeholder() {
        let result = rendered(&[]);
        assert_eq!((result.width, result.height), (100, 50));
        assert_eq!(&result.png_bytes[1..4], b"PNG");
    }

    #[test]
    fn test_raster_cap() {
        let layout = DiagramLayout {
            width: 100_000,
            height: 1_000,
            shapes: Vec::new(),
        };
        let err = render_diagram(&layout, 0, 0).unwrap_err();
        assert!(err.contains("too large"), "got: {}", err);
    }

    #[test]
    fn test_zero_canvas_is_an_error() {
        let layout = DiagramLayout {
            width: 0,
            height: 50,
            shapes: Vec::new(),
        };
        assert!(render_diagram(&layout, 0, 0).is_err());
    }
}
