use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};
use ratatui::Frame;
use ratatui_image::picker::Picker;
use ratatui_image::StatefulImage;

use crate::diagram::mapper;
use crate::diagram::render::render_diagram;
use crate::diagram::svg::write_svg;
use crate::diagram::types::{DiagramLayout, LayoutConfig};
use crate::parse::heights::parse_heights;
use crate::persistence;
use crate::tui::help::HelpPanel;
use crate::tui::input::InputState;
use crate::tui::output::{OutputKind, WorksheetState};
use crate::tui::status::render_status_bar;
use crate::tui::theme::Theme;
use crate::water::profile::{trapped_total, water_profile, ColumnProfile};

/// Row computed on startup so the first screen shows a worked example.
const STARTUP_EXAMPLE: &str = "0,1,0,2,1,0,1,3,2,1,2,1";

/// Everything derived from the most recent accepted row of heights.
pub struct Computation {
    pub heights: Vec<u32>,
    pub profile: Vec<ColumnProfile>,
    pub total: u64,
    pub layout: DiagramLayout,
}

pub struct App {
    pub input: InputState,
    pub worksheet: WorksheetState,
    pub should_quit: bool,
    pub picker: Option<Picker>,
    pub help: HelpPanel,
    pub config: persistence::config::Config,
    pub layout_cfg: LayoutConfig,
    pub last: Option<Computation>,
}

impl App {
    pub fn new(picker: Option<Picker>, history: Vec<String>, config: persistence::config::Config) -> Self {
        let layout_cfg = config.diagram.sanitized();
        Self {
            input: InputState::new(history),
            worksheet: WorksheetState::new(),
            should_quit: false,
            picker,
            help: HelpPanel::new(),
            config,
            layout_cfg,
            last: None,
        }
    }

    /// Compute the startup example so the screen opens with a diagram.
    pub fn bootstrap(&mut self) {
        self.execute(STARTUP_EXAMPLE);
    }

    /// Handle a key event. Returns true if the screen should be redrawn.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Help panel mode
        if self.help.visible {
            return self.handle_key_help(key);
        }

        self.handle_key_normal(key)
    }

    /// Key handling when the help panel is visible.
    fn handle_key_help(&mut self, key: KeyEvent) -> bool {
        match key {
            KeyEvent { code: KeyCode::Esc, .. }
            | KeyEvent { code: KeyCode::Char('h'), modifiers: KeyModifiers::CONTROL, .. }
            | KeyEvent { code: KeyCode::F(1), .. } => {
                self.help.toggle();
                true
            }
            KeyEvent { code: KeyCode::Up, .. } | KeyEvent { code: KeyCode::Char('k'), .. } => {
                self.help.scroll_up(1);
                true
            }
            KeyEvent { code: KeyCode::Down, .. } | KeyEvent { code: KeyCode::Char('j'), .. } => {
                self.help.scroll_down(1);
                true
            }
            KeyEvent { code: KeyCode::PageUp, .. } => {
                self.help.scroll_up(10);
                true
            }
            KeyEvent { code: KeyCode::PageDown, .. } => {
                self.help.scroll_down(10);
                true
            }
            // Any other key closes help
            _ => {
                self.help.visible = false;
                false
            }
        }
    }

    /// Normal mode key handling.
    fn handle_key_normal(&mut self, key: KeyEvent) -> bool {
        match key {
            // Quit
            KeyEvent {
                code: KeyCode::Char('d'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => {
                self.should_quit = true;
                true
            }

            // Submit input
            KeyEvent {
                code: KeyCode::Enter,
                ..
            } => {
                let text = self.input.submit();
                if !text.trim().is_empty() {
                    persistence::history::append_history(&text);
                    self.execute(&text);
                }
                true
            }

            // History navigation
            KeyEvent {
                code: KeyCode::Up, ..
            } => {
                self.input.history_up();
                true
            }
            KeyEvent {
                code: KeyCode::Down,
                ..
            } => {
                self.input.history_down();
                true
            }

            // Cursor movement
            KeyEvent {
                code: KeyCode::Left,
                ..
            } => {
                self.input.move_left();
                true
            }
            KeyEvent {
                code: KeyCode::Right,
                ..
            } => {
                self.input.move_right();
                true
            }
            KeyEvent {
                code: KeyCode::Home,
                ..
            } => {
                self.input.move_home();
                true
            }
            KeyEvent {
                code: KeyCode::End,
                ..
            } => {
                self.input.move_end();
                true
            }

            // Editing
            KeyEvent {
                code: KeyCode::Backspace,
                ..
            } => {
                self.input.backspace();
                true
            }
            KeyEvent {
                code: KeyCode::Delete,
                ..
            } => {
                self.input.delete();
                true
            }
            KeyEvent {
                code: KeyCode::Char('u'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => {
                self.input.clear();
                true
            }
            KeyEvent {
                code: KeyCode::Char('k'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => {
                self.input.kill_line();
                true
            }
            KeyEvent {
                code: KeyCode::Char('w'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => {
                self.input.kill_word_back();
                true
            }
            KeyEvent {
                code: KeyCode::Char('a'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => {
                self.input.move_home();
                true
            }
            KeyEvent {
                code: KeyCode::Char('e'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => {
                self.input.move_end();
                true
            }

            // Scroll worksheet
            KeyEvent {
                code: KeyCode::PageUp,
                ..
            } => {
                self.worksheet.scroll_up(10);
                true
            }
            KeyEvent {
                code: KeyCode::PageDown,
                ..
            } => {
                self.worksheet.scroll_down(10);
                true
            }

            // Clear screen
            KeyEvent {
                code: KeyCode::Char('l'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => {
                self.worksheet = WorksheetState::new();
                true
            }

            // Help panel toggle
            KeyEvent {
                code: KeyCode::Char('h'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => {
                self.help.toggle();
                true
            }
            KeyEvent {
                code: KeyCode::F(1),
                ..
            } => {
                self.help.toggle();
                true
            }

            // Escape (no-op in normal mode, but consume the key)
            KeyEvent {
                code: KeyCode::Esc,
                ..
            } => false,

            // Regular character input
            KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
                ..
            } => {
                self.input.insert(c);
                true
            }

            _ => false,
        }
    }

    /// Execute a line of input.
    fn execute(&mut self, input: &str) {
        // Check for :commands
        if let Some(cmd) = input.strip_prefix(':') {
            self.execute_command(cmd.trim());
            return;
        }

        match parse_heights(input) {
            Ok(heights) => self.compute(input, heights),
            Err(err) => {
                self.last = None;
                self.worksheet
                    .add_entry(input.to_string(), OutputKind::Error(err.to_string()));
            }
        }

        self.worksheet.scroll_to_bottom();
    }

    /// Run the water calculation for an accepted row and record the result.
    fn compute(&mut self, input: &str, heights: Vec<u32>) {
        let total = trapped_total(&heights);
        let profile = water_profile(&heights);
        let layout = mapper::layout(&heights, &profile, &self.layout_cfg);

        let output = if heights.is_empty() {
            OutputKind::Value("no data".to_string())
        } else {
            match render_diagram(&layout, heights.len(), total) {
                Ok(rendered) => OutputKind::Diagram(rendered),
                // Keep the number on screen even when the image cannot be drawn
                Err(err) => OutputKind::Value(format!("{} units retained ({})", total, err)),
            }
        };

        self.last = Some(Computation {
            heights,
            profile,
            total,
            layout,
        });
        self.worksheet.add_entry(input.to_string(), output);
    }

    /// Execute a :command.
    fn execute_command(&mut self, cmd: &str) {
        let parts: Vec<&str> = cmd.splitn(2, ' ').collect();
        let name = parts[0];
        let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match name {
            "help" => {
                self.help.toggle();
            }
            "clear" => {
                self.worksheet = WorksheetState::new();
            }
            "export" => {
                self.command_export(arg);
            }
            _ => {
                self.worksheet.add_entry(
                    format!(":{}", cmd),
                    OutputKind::Error(format!("unknown command: :{}", name)),
                );
            }
        }
        self.worksheet.scroll_to_bottom();
    }

    /// Write the latest diagram as an SVG document.
    fn command_export(&mut self, arg: &str) {
        let shown = if arg.is_empty() {
            ":export".to_string()
        } else {
            format!(":export {}", arg)
        };

        let output = match &self.last {
            Some(computation) => {
                let path = if arg.is_empty() {
                    default_export_name()
                } else {
                    arg.to_string()
                };
                let document = write_svg(&computation.layout);
                match std::fs::write(&path, document) {
                    Ok(()) => OutputKind::Value(format!("wrote {}", path)),
                    Err(e) => OutputKind::Error(format!("export failed: {}", e)),
                }
            }
            None => OutputKind::Error("nothing to export".to_string()),
        };

        self.worksheet.add_entry(shown, output);
    }

    /// Render the full UI.
    pub fn render(&mut self, frame: &mut Frame) {
        let outer = Layout::vertical([
            Constraint::Length(1),  // Status bar
            Constraint::Min(5),    // Main area
            Constraint::Length(3), // Input bar
        ])
        .split(frame.area());

        render_status_bar(frame, outer[0], self.last.as_ref().map(|c| c.total));

        // Main area: worksheet + sidebar
        let main = Layout::horizontal([
            Constraint::Percentage(70),
            Constraint::Percentage(30),
        ])
        .split(outer[1]);

        self.render_worksheet(frame, main[0]);
        self.render_sidebar(frame, main[1]);
        self.render_input(frame, outer[2]);

        // Render help panel as centered overlay
        if self.help.visible {
            self.render_help(frame, frame.area());
        }
    }

    fn render_worksheet(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border_focused())
            .title(" Worksheet ");

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Build a flat list of render items with their heights
        enum RenderItem {
            TextLine(Line<'static>),
            DiagramImage(usize), // index into worksheet entries
        }

        let mut items: Vec<RenderItem> = Vec::new();
        for (entry_idx, entry) in self.worksheet.entries.iter().enumerate() {
            // Input line
            items.push(RenderItem::TextLine(Line::from(vec![
                Span::styled(
                    format!(" In[{}]: ", entry.index),
                    Theme::input_prompt(),
                ),
                Span::styled(entry.input.clone(), Theme::input_text()),
            ])));

            match &entry.output {
                OutputKind::Diagram(_) => {
                    // Reserve diagram_height rows for image rendering
                    items.push(RenderItem::DiagramImage(entry_idx));
                }
                _ => {
                    for (text, style) in entry.output_lines() {
                        items.push(RenderItem::TextLine(Line::from(Span::styled(text, style))));
                    }
                }
            }

            // Blank separator
            items.push(RenderItem::TextLine(Line::from("")));
        }

        let diagram_rows = self.config.diagram_height as usize;
        let total_height = self.worksheet.total_lines(diagram_rows);

        // Clamp the stored offset into range. scroll_to_bottom pins it past
        // the end, so the latest entry stays in view until the user scrolls.
        let visible_height = inner.height as usize;
        let max_scroll = total_height.saturating_sub(visible_height);
        let offset = self.worksheet.scroll_offset.min(max_scroll);
        self.worksheet.scroll_offset = offset;

        // Render visible items
        let mut y_pos: usize = 0;
        for item in &items {
            let item_height = match item {
                RenderItem::TextLine(_) => 1,
                RenderItem::DiagramImage(_) => diagram_rows,
            };

            // Skip items before the scroll offset
            if y_pos + item_height <= offset {
                y_pos += item_height;
                continue;
            }
            // Stop if past the visible area
            if y_pos >= offset + visible_height {
                break;
            }

            let render_y = (y_pos.saturating_sub(offset)) as u16;

            match item {
                RenderItem::TextLine(line) => {
                    let line_area = Rect {
                        x: inner.x,
                        y: inner.y + render_y,
                        width: inner.width,
                        height: 1,
                    };
                    frame.render_widget(Paragraph::new(line.clone()), line_area);
                }
                RenderItem::DiagramImage(entry_idx) => {
                    let remaining = inner.height.saturating_sub(render_y);
                    let image_h = remaining.min(self.config.diagram_height);
                    if image_h > 0 {
                        let image_area = Rect {
                            x: inner.x,
                            y: inner.y + render_y,
                            width: inner.width,
                            height: image_h,
                        };
                        self.render_diagram_image(frame, image_area, *entry_idx);
                    }
                }
            }

            y_pos += item_height;
        }
    }

    /// Render a diagram image into the given area using ratatui-image.
    fn render_diagram_image(&self, frame: &mut Frame, area: Rect, entry_idx: usize) {
        let entry = &self.worksheet.entries[entry_idx];
        let rendered = match &entry.output {
            OutputKind::Diagram(d) => d,
            _ => return,
        };

        // Initialize image state if needed
        let needs_init = entry.image_state.borrow().is_none();
        if needs_init {
            if let Some(picker) = &self.picker {
                match image::load_from_memory(&rendered.png_bytes) {
                    Ok(dyn_image) => {
                        let protocol = picker.new_resize_protocol(dyn_image);
                        *entry.image_state.borrow_mut() = Some(protocol);
                    }
                    Err(e) => {
                        // Fallback: show error text
                        let text = format!("[diagram decode error: {}]", e);
                        frame.render_widget(
                            Paragraph::new(Span::styled(text, Theme::error())),
                            area,
                        );
                        return;
                    }
                }
            } else {
                // No picker — show fallback text
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        format!(
                            "[diagram: {} columns, {} units \u{2014} image display requires Kitty/iTerm2]",
                            rendered.columns, rendered.total
                        ),
                        Theme::output_value(),
                    )),
                    area,
                );
                return;
            }
        }

        let mut state = entry.image_state.borrow_mut();
        if let Some(protocol) = state.as_mut() {
            let image_widget = StatefulImage::default();
            frame.render_stateful_widget(image_widget, area, protocol);
        }
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let sidebar = Layout::vertical([
            Constraint::Length(6), // Summary
            Constraint::Min(3),    // Profile
            Constraint::Length(5), // Scene
        ])
        .split(area);

        self.render_summary(frame, sidebar[0]);
        self.render_profile(frame, sidebar[1]);
        self.render_scene(frame, sidebar[2]);
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border())
            .title(Span::styled(" Summary ", Theme::sidebar_title()));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let computation = match &self.last {
            Some(c) => c,
            None => {
                frame.render_widget(
                    Paragraph::new(Span::styled("no result", Theme::muted())),
                    inner,
                );
                return;
            }
        };

        let max_height = computation.heights.iter().copied().max().unwrap_or(0);
        let rows = [
            ("columns", format!("{}", computation.heights.len()), Theme::sidebar_item()),
            ("max height", format!("{}", max_height), Theme::column_value()),
            ("retained", format!("{} units", computation.total), Theme::water_value()),
            (
                "canvas",
                format!("{}x{} px", computation.layout.width, computation.layout.height),
                Theme::sidebar_item(),
            ),
        ];

        let items: Vec<ListItem> = rows
            .into_iter()
            .map(|(name, value, style)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<11}", name), Theme::muted()),
                    Span::styled(value, style),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items), inner);
    }

    fn render_profile(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border())
            .title(Span::styled(" Profile ", Theme::sidebar_title()));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let profile = match &self.last {
            Some(c) if !c.profile.is_empty() => &c.profile,
            _ => {
                frame.render_widget(
                    Paragraph::new(Span::styled("no columns", Theme::muted())),
                    inner,
                );
                return;
            }
        };

        let items: Vec<ListItem> = profile
            .iter()
            .enumerate()
            .take(inner.height as usize)
            .map(|(i, column)| {
                let trapped_style = if column.trapped > 0 {
                    Theme::water_value()
                } else {
                    Theme::muted()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>3} ", i), Theme::muted()),
                    Span::styled(format!("h {:>3}", column.height), Theme::column_value()),
                    Span::styled(format!(" lvl {:>3}", column.water_level), Theme::sidebar_item()),
                    Span::styled(format!(" +{}", column.trapped), trapped_style),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items), inner);
    }

    fn render_scene(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border())
            .title(Span::styled(" Scene ", Theme::sidebar_title()));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = [
            ("padding", self.layout_cfg.padding),
            ("column", self.layout_cfg.column_width),
            ("unit", self.layout_cfg.unit_height),
        ];

        let items: Vec<ListItem> = rows
            .into_iter()
            .map(|(name, px)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<8}", name), Theme::muted()),
                    Span::styled(format!("{} px", px), Theme::sidebar_item()),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items), inner);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        use crate::tui::help::HELP_SECTIONS;

        // 80% of screen, centered
        let w = (area.width * 4 / 5).max(40);
        let h = (area.height * 4 / 5).max(10);
        let x = area.x + (area.width.saturating_sub(w)) / 2;
        let y = area.y + (area.height.saturating_sub(h)) / 2;
        let popup_area = Rect { x, y, width: w, height: h };

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border_focused())
            .title(Span::styled(
                " Help \u{2014} Esc to close, \u{2191}/\u{2193} to scroll ",
                Theme::sidebar_title(),
            ));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        // Build all lines
        let mut lines: Vec<Line<'static>> = Vec::new();
        for &(title, content) in HELP_SECTIONS {
            lines.push(Line::from(Span::styled(
                format!(" {} ", title),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            for text_line in content.lines() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", text_line),
                    Style::default(),
                )));
            }
            lines.push(Line::from(""));
        }

        // Clamp scroll
        let total = lines.len();
        let visible = inner.height as usize;
        let max_scroll = total.saturating_sub(visible);
        let scroll = self.help.scroll.min(max_scroll);

        let visible_lines: Vec<Line> = lines.into_iter().skip(scroll).take(visible).collect();
        let paragraph = Paragraph::new(visible_lines);
        frame.render_widget(paragraph, inner);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border_focused())
            .title(" Input ");

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let prompt = "pluvia> ";
        let line = Line::from(vec![
            Span::styled(prompt, Theme::input_prompt()),
            Span::styled(&self.input.text, Theme::input_text()),
        ]);

        let paragraph = Paragraph::new(line);
        frame.render_widget(paragraph, inner);

        // Position cursor
        let cursor_x = inner.x + prompt.len() as u16 + self.input.cursor as u16;
        let cursor_y = inner.y;
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

fn default_export_name() -> String {
    let epoch = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("pluvia-{}.svg", epoch)
}
