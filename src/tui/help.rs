/// Help panel overlay with scrollable documentation sections.

pub struct HelpPanel {
    pub visible: bool,
    pub scroll: usize,
}

impl HelpPanel {
    pub fn new() -> Self {
        Self {
            visible: false,
            scroll: 0,
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        if self.visible {
            self.scroll = 0;
        }
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.scroll += n;
    }
}

/// Help content: (section_title, content_text)
pub static HELP_SECTIONS: &[(&str, &str)] = &[
    ("Quick Start", "\
Pluvia computes how much rain water a row of columns would
retain. Type the column heights and press Enter.

  0,1,0,2,1,0,1,3,2,1,2,1    classic example  =>  6 units
  [4, 2, 0, 3, 2, 5]         bracketed form   =>  9 units"),

    ("Input Formats", "\
  3, 0, 3        bare list; whitespace and a trailing comma are fine
  [3, 0, 3]      bracketed JSON-style list

Heights are whole, non-negative numbers. Negative numbers,
fractions like 1.5, and words are rejected. An empty line is a
valid empty row and draws the \"No data\" placeholder."),

    ("Reading the Diagram", "\
  amber rectangles   columns, rising from the floor
  blue rectangles    retained water, level with its basin
  grey grid          one line per height unit and per column

Water over a column settles at the lower of the tallest column
to its left and to its right (both including itself). The
sidebar lists the per-column levels."),

    ("Commands", "\
  :export [file]    write the latest diagram as an SVG document
  :clear            clear the worksheet
  :help             toggle this panel"),

    ("Keybindings", "\
  Enter        compute
  Up/Down      history navigation
  Ctrl-A       move to start of line
  Ctrl-E       move to end of line
  Ctrl-K       kill to end of line
  Ctrl-U       clear line
  Ctrl-W       kill back to a delimiter
  Ctrl-L       clear worksheet
  Ctrl-H / F1  toggle help panel
  Ctrl-D       quit
  PageUp/Down  scroll worksheet
  Esc          dismiss this panel"),
];
