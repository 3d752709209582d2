//! Input plumbing shared by the renderer and the event handlers.
//!
//! Rendering registers rectangular click targets tagged with action ids;
//! the mouse handler converts pixels to cells and hit-tests against them.
//! Keyboard and mouse both end up as an [`InputEvent`].

use ratzilla::ratatui::layout::Rect;

/// Normalized player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(char),
    /// A tap on a registered target, identified by its action id.
    Click(u16),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClickTarget {
    /// Region in terminal cells.
    pub rect: Rect,
    pub action_id: u16,
}

impl ClickTarget {
    fn contains(&self, col: u16, row: u16) -> bool {
        let r = self.rect;
        col >= r.x && col < r.right() && row >= r.y && row < r.bottom()
    }
}

/// Targets registered during the last frame, plus the frame size.
#[derive(Debug, Default)]
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame of `cols` × `rows` cells with no targets.
    pub fn begin_frame(&mut self, cols: u16, rows: u16) {
        self.terminal_cols = cols;
        self.terminal_rows = rows;
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        if rect.width > 0 && rect.height > 0 {
            self.targets.push(ClickTarget { rect, action_id });
        }
    }

    /// Register the full width of `area` at `row`. Rows outside `area` are ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if (area.y..area.bottom()).contains(&row) {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Register one target per tab of a horizontal tab bar.
    ///
    /// `tab_widths` holds `(display_width, action_id)` of each padded label.
    /// Neighbouring tabs split the separator between them at its midpoint;
    /// the first tab reaches the left edge and the last tab the right edge.
    pub fn register_tab_targets(
        &mut self,
        tab_widths: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        if tab_widths.is_empty() || total_width == 0 {
            return;
        }

        // (start, end) of each label relative to `x`
        let mut spans = Vec::with_capacity(tab_widths.len());
        let mut cursor = 0u16;
        for &(width, _) in tab_widths {
            spans.push((cursor, cursor + width));
            cursor += width + separator_width;
        }

        let last = spans.len() - 1;
        let mut left = 0u16;
        for (i, &(_, action_id)) in tab_widths.iter().enumerate() {
            let right = if i == last {
                total_width
            } else {
                let end = spans[i].1;
                end + (spans[i + 1].0 - end) / 2
            };
            let width = right.min(total_width).saturating_sub(left);
            self.add_click_target(Rect::new(x + left, y, width, height), action_id);
            left = right;
        }
    }

    /// Action id under the cell; later registrations win where they overlap.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets
            .iter()
            .rev()
            .find(|t| t.contains(col, row))
            .map(|t| t.action_id)
    }
}

/// Narrow screens (phones) stack panels vertically.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Map an offset in pixels along one axis to a cell index.
fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / f64::from(cells))) as u16;
    (cell < cells).then_some(cell)
}

/// Pixel Y relative to the grid's top edge → terminal row.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    pixel_to_cell(click_y, grid_height, terminal_rows)
}

/// Pixel X relative to the grid's left edge → terminal column.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    pixel_to_cell(click_x, grid_width, terminal_cols)
}
