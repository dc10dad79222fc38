/// Diagram geometry and rendered output types.

use serde::{Deserialize, Serialize};

/// Pixel inset between the canvas edge and the drawn scene.
pub const DEFAULT_PADDING: u32 = 20;
/// Pixel width of one column.
pub const DEFAULT_COLUMN_WIDTH: u32 = 60;
/// Pixel height of one height unit.
pub const DEFAULT_UNIT_HEIGHT: u32 = 20;

/// Canvas size used when there are no columns to draw.
pub const PLACEHOLDER_WIDTH: u64 = 100;
pub const PLACEHOLDER_HEIGHT: u64 = 50;
/// Placeholder text and its anchor point on an empty diagram.
pub const PLACEHOLDER_TEXT: &str = "No data";
pub const PLACEHOLDER_TEXT_X: u64 = 10;
pub const PLACEHOLDER_TEXT_Y: u64 = 25;

/// Scene palette (RGB).
pub const CANVAS_COLOR: (u8, u8, u8) = (255, 255, 255);
pub const COLUMN_COLOR: (u8, u8, u8) = (240, 173, 78); // amber
pub const WATER_COLOR: (u8, u8, u8) = (52, 152, 219); // blue
pub const GRID_COLOR: (u8, u8, u8) = (204, 204, 204); // light grey

/// Render an RGB triple as a CSS hex color.
pub fn css_hex(color: (u8, u8, u8)) -> String {
    format!("#{:02x}{:02x}{:02x}", color.0, color.1, color.2)
}

/// Tunable pixel geometry of the drawn scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub padding: u32,
    pub column_width: u32,
    pub unit_height: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            column_width: DEFAULT_COLUMN_WIDTH,
            unit_height: DEFAULT_UNIT_HEIGHT,
        }
    }
}

impl LayoutConfig {
    /// Clamp zero column and unit sizes so the scene cannot collapse.
    pub fn sanitized(self) -> Self {
        Self {
            padding: self.padding,
            column_width: self.column_width.max(1),
            unit_height: self.unit_height.max(1),
        }
    }
}

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PxRect {
    pub x: u64,
    pub y: u64,
    pub width: u64,
    pub height: u64,
}

/// Straight line segment in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PxLine {
    pub x1: u64,
    pub y1: u64,
    pub x2: u64,
    pub y2: u64,
}

/// One drawable element of the diagram scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Background grid line (decoration only).
    GridLine(PxLine),
    /// A solid column.
    Column(PxRect),
    /// Water resting on a column, top-aligned to the water surface.
    Water(PxRect),
    /// Free-standing text; only the empty-row placeholder uses this.
    Label { x: u64, y: u64, text: String },
}

/// A fully laid-out scene, shapes in painter's order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramLayout {
    pub width: u64,
    pub height: u64,
    pub shapes: Vec<Shape>,
}

/// A rasterized diagram ready for in-terminal display.
///
/// Carries the column count and retained total so worksheet lines can
/// describe the image without recomputing anything.
#[derive(Debug, Clone)]
pub struct RenderedDiagram {
    pub png_bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub columns: usize,
    pub total: u64,
}
