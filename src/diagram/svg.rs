/// SVG document writer: a laid-out scene to a standalone vector file.

use crate::diagram::types::{
    css_hex, DiagramLayout, Shape, CANVAS_COLOR, COLUMN_COLOR, GRID_COLOR, WATER_COLOR,
};

/// Serialize a layout as a self-contained SVG document.
///
/// The palette travels in an embedded style block, so the file renders
/// the same everywhere it is opened.
pub fn write_svg(layout: &DiagramLayout) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        w = layout.width,
        h = layout.height,
    ));
    out.push_str(&style_block());
    out.push_str(&format!(
        "  <rect class=\"canvas\" x=\"0\" y=\"0\" width=\"{}\" height=\"{}\"/>\n",
        layout.width, layout.height,
    ));

    for shape in &layout.shapes {
        match shape {
            Shape::GridLine(line) => {
                out.push_str(&format!(
                    "  <line class=\"grid-line\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"/>\n",
                    line.x1, line.y1, line.x2, line.y2,
                ));
            }
            Shape::Column(r) => {
                out.push_str(&rect_tag("column", r.x, r.y, r.width, r.height));
            }
            Shape::Water(r) => {
                out.push_str(&rect_tag("water", r.x, r.y, r.width, r.height));
            }
            Shape::Label { x, y, text } => {
                out.push_str(&format!(
                    "  <text class=\"label\" x=\"{}\" y=\"{}\">{}</text>\n",
                    x,
                    y,
                    escape_text(text),
                ));
            }
        }
    }

    out.push_str("</svg>\n");
    out
}

fn style_block() -> String {
    format!(
        "  <style>\n    \
         .canvas {{ fill: {canvas}; }}\n    \
         .column {{ fill: {column}; }}\n    \
         .water {{ fill: {water}; }}\n    \
         .grid-line {{ stroke: {grid}; stroke-width: 1; }}\n    \
         .label {{ fill: grey; }}\n  \
         </style>\n",
        canvas = css_hex(CANVAS_COLOR),
        column = css_hex(COLUMN_COLOR),
        water = css_hex(WATER_COLOR),
        grid = css_hex(GRID_COLOR),
    )
}

fn rect_tag(class: &str, x: u64, y: u64, width: u64, height: u64) -> String {
    format!(
        "  <rect class=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/>\n",
        class, x, y, width, height,
    )
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::mapper;
    use crate::diagram::types::LayoutConfig;
    use crate::water::profile::water_profile;

    fn svg_for(heights: &[u32]) -> String {
        let profile = water_profile(heights);
        write_svg(&mapper::layout(heights, &profile, &LayoutConfig::default()))
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_document_bounds() {
        let svg = svg_for(&[3, 0, 3]);
        assert!(svg.starts_with("<svg width=\"220\" height=\"100\""), "got: {}", &svg[..60]);
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_shape_classes_and_counts() {
        let svg = svg_for(&[3, 0, 3]);
        assert_eq!(count(&svg, "class=\"column\""), 2);
        assert_eq!(count(&svg, "class=\"water\""), 1);
        // Levels 0..=3 and boundaries 0..=3.
        assert_eq!(count(&svg, "class=\"grid-line\""), 8);
        assert_eq!(count(&svg, "class=\"canvas\""), 1);
    }

    #[test]
    fn test_palette_is_embedded() {
        let svg = svg_for(&[1, 0, 1]);
        assert!(svg.contains("#f0ad4e"), "column color missing");
        assert!(svg.contains("#3498db"), "water color missing");
        assert!(svg.contains("#cccccc"), "grid color missing");
    }

    #[test]
    fn test_placeholder_document() {
        let svg = svg_for(&[]);
        assert!(svg.contains("width=\"100\" height=\"50\""));
        assert!(svg.contains(">No data</text>"));
        assert_eq!(count(&svg, "<line"), 0);
        assert_eq!(count(&svg, "class=\"column\""), 0);
    }

    #[test]
    fn test_label_text_is_escaped() {
        use crate::diagram::types::{DiagramLayout, Shape};
        let layout = DiagramLayout {
            width: 100,
            height: 50,
            shapes: vec![Shape::Label {
                x: 10,
                y: 25,
                text: "a < b & c".to_string(),
            }],
        };
        let svg = write_svg(&layout);
        assert!(svg.contains(">a &lt; b &amp; c</text>"));
    }
}
