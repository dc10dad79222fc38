use crate::diagram::types::RenderedDiagram;
use crate::tui::theme::Theme;
use ratatui::style::Style;
use ratatui_image::protocol::StatefulProtocol;
use std::cell::RefCell;

/// A single entry in the worksheet output.
pub struct WorksheetEntry {
    pub index: usize,
    pub input: String,
    pub output: OutputKind,
    /// Cached image protocol state for diagram entries (avoids re-encoding per frame).
    pub image_state: RefCell<Option<StatefulProtocol>>,
}

impl std::fmt::Debug for WorksheetEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorksheetEntry")
            .field("index", &self.index)
            .field("input", &self.input)
            .field("output", &self.output)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum OutputKind {
    Value(String),
    Error(String),
    Diagram(RenderedDiagram),
}

impl WorksheetEntry {
    pub fn output_lines(&self) -> Vec<(String, Style)> {
        match &self.output {
            OutputKind::Value(v) => {
                vec![(format!("Out[{}]: {}", self.index, v), Theme::output_value())]
            }
            OutputKind::Error(e) => {
                vec![(format!("Err[{}]: {}", self.index, e), Theme::error())]
            }
            OutputKind::Diagram(d) => {
                vec![(
                    format!(
                        "Out[{}]: [diagram: {} columns, {} units retained]",
                        self.index, d.columns, d.total
                    ),
                    Theme::output_value(),
                )]
            }
        }
    }

    /// Number of terminal rows this entry occupies, for scrolling math.
    /// Diagram entries reserve `diagram_rows` for the image.
    pub fn line_count(&self, diagram_rows: usize) -> usize {
        match &self.output {
            OutputKind::Diagram(_) => 1 + diagram_rows + 1, // input + image + blank
            _ => 1 + self.output_lines().len() + 1,         // input + output + blank
        }
    }
}

/// State for the worksheet panel.
pub struct WorksheetState {
    pub entries: Vec<WorksheetEntry>,
    pub next_index: usize,
    /// Rows scrolled down from the top; clamped into range at render time.
    pub scroll_offset: usize,
}

impl WorksheetState {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_index: 1,
            scroll_offset: 0,
        }
    }

    pub fn add_entry(&mut self, input: String, output: OutputKind) {
        let index = self.next_index;
        self.next_index += 1;
        self.entries.push(WorksheetEntry {
            index,
            input,
            output,
            image_state: RefCell::new(None),
        });
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(amount);
    }

    /// Pin the view to the latest entry; render clamps the offset into range.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = usize::MAX;
    }

    pub fn total_lines(&self, diagram_rows: usize) -> usize {
        self.entries.iter().map(|e| e.line_count(diagram_rows)).sum()
    }
}
