//! Integration tests: input text through parsing, water computation,
//! geometry mapping, and SVG output.

use pluvia::diagram::mapper;
use pluvia::diagram::render::render_diagram;
use pluvia::diagram::svg::write_svg;
use pluvia::diagram::types::{DiagramLayout, LayoutConfig};
use pluvia::parse::error::InputErrorKind;
use pluvia::parse::heights::parse_heights;
use pluvia::water::profile::{profile_total, trapped_total, water_profile};

struct Pipeline {
    heights: Vec<u32>,
    total: u64,
    layout: DiagramLayout,
    svg: String,
}

/// Run a line of input through the whole pipeline with default geometry.
fn run(input: &str) -> Pipeline {
    let heights = parse_heights(input).expect("input should parse");
    let total = trapped_total(&heights);
    let profile = water_profile(&heights);
    assert_eq!(profile_total(&profile), total, "water derivations disagree");

    let layout = mapper::layout(&heights, &profile, &LayoutConfig::default());
    let svg = write_svg(&layout);
    Pipeline {
        heights,
        total,
        layout,
        svg,
    }
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.match_indices(needle).count()
}

#[test]
fn test_classic_example_end_to_end() {
    let result = run("0,1,0,2,1,0,1,3,2,1,2,1");
    assert_eq!(result.heights.len(), 12);
    assert_eq!(result.total, 6);
    // 12 columns of width 60 plus padding, 3 units of height 20 plus padding
    assert_eq!((result.layout.width, result.layout.height), (760, 100));
    assert!(count(&result.svg, "class=\"water\"") > 0, "expected water in the drawing");
}

#[test]
fn test_bracketed_example_end_to_end() {
    let result = run("[4, 2, 0, 3, 2, 5]");
    assert_eq!(result.total, 9);
    assert!(
        result.svg.starts_with("<svg width=\"400\" height=\"140\""),
        "unexpected document header: {}",
        &result.svg[..60.min(result.svg.len())]
    );
    // Column 0 holds no water; five columns are drawn (one has height 0)
    assert_eq!(count(&result.svg, "class=\"column\""), 5);
}

#[test]
fn test_both_grammars_agree() {
    let bare = run("4,2,0,3,2,5");
    let bracketed = run("[4, 2, 0, 3, 2, 5]");
    assert_eq!(bare.heights, bracketed.heights);
    assert_eq!(bare.svg, bracketed.svg);
}

#[test]
fn test_whitespace_and_trailing_comma_tolerated() {
    let result = run(" 3 , 0 , 3 , ");
    assert_eq!(result.heights, vec![3, 0, 3]);
    assert_eq!(result.total, 3);
}

#[test]
fn test_empty_input_draws_placeholder() {
    let result = run("");
    assert!(result.heights.is_empty());
    assert_eq!(result.total, 0);
    assert_eq!((result.layout.width, result.layout.height), (100, 50));
    assert!(result.svg.contains(">No data</text>"));
    assert_eq!(count(&result.svg, "class=\"column\""), 0);
}

#[test]
fn test_flat_water_surface() {
    // Both walls of the basin are the same height, so the single water
    // rectangle starts at the same pixel row as the column tops.
    let result = run("3,0,3");
    assert_eq!(result.total, 3);
    assert_eq!(count(&result.svg, "class=\"water\""), 1);
    assert!(result.svg.contains("<rect class=\"water\" x=\"80\" y=\"20\" width=\"60\" height=\"60\"/>"));
}

#[test]
fn test_monotonic_row_holds_nothing() {
    let result = run("1,2,3,4,5");
    assert_eq!(result.total, 0);
    assert_eq!(count(&result.svg, "class=\"water\""), 0);
}

#[test]
fn test_raster_output_matches_layout() {
    let result = run("[4, 2, 0, 3, 2, 5]");
    let rendered = render_diagram(&result.layout, result.heights.len(), result.total)
        .expect("diagram should rasterize");
    assert_eq!((rendered.width, rendered.height), (400, 140));
    assert_eq!(&rendered.png_bytes[1..4], b"PNG");
    assert_eq!(rendered.total, 9);
}

#[test]
fn test_word_token_is_rejected() {
    let err = parse_heights("1,two,3").unwrap_err();
    assert_eq!(err.kind, InputErrorKind::InvalidValue);
}

#[test]
fn test_broken_bracket_syntax_is_malformed() {
    let err = parse_heights("[1, 2,]").unwrap_err();
    assert_eq!(err.kind, InputErrorKind::MalformedInput);
}
