//! Clickable UI components: each one renders itself and registers the
//! click targets for what it drew.
//!
//! - [`TabBar`]: a single row of tab labels.
//! - [`ClickableList`]: lines of text, some bound to actions.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

/// A horizontal tab bar.
///
/// ```ignore
/// TabBar::new(" │ ")
///     .tab("Click", tab_style(0), TAB_CLICK)
///     .tab("Auto", tab_style(1), TAB_AUTO)
///     .render(f, area, &mut cs);
/// ```
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Labels with padding, and the `(width, action)` pairs for hit testing.
    fn layout(&self) -> (Line<'static>, Vec<(u16, u16)>) {
        let mut spans = Vec::new();
        let mut widths = Vec::new();
        for (i, (label, style, action_id)) in self.tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    self.separator.to_string(),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let padded = format!(" {label} ");
            widths.push((Span::raw(padded.as_str()).width() as u16, *action_id));
            spans.push(Span::styled(padded, *style));
        }
        (Line::from(spans), widths)
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let (line, widths) = self.layout();
        let separator_width = Span::raw(self.separator).width() as u16;
        let inner = self.block.as_ref().map_or(area, |b| b.inner(area));

        let paragraph = match self.block {
            Some(block) => Paragraph::new(line).block(block),
            None => Paragraph::new(line),
        };
        f.render_widget(paragraph, area);

        // Horizontal positions from the inner area; the whole bar height is tappable.
        cs.register_tab_targets(
            &widths,
            separator_width,
            inner.x,
            area.y,
            inner.width,
            area.height.max(1),
        );
    }
}

/// Lines paired with the actions bound to them.
///
/// Targets follow their line, so inserting a line above a clickable one
/// moves its target too. Each line is assumed to take exactly one row.
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(usize, u16)>,
}

impl<'a> Default for ClickableList<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len(), action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register row targets for the clickable lines visible in `area`.
    ///
    /// `top_offset`/`bottom_offset` are the border rows, `scroll` the number
    /// of lines scrolled out of view at the top.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
    ) {
        let first_row = area.y + top_offset;
        let end_row = area.bottom().saturating_sub(bottom_offset);
        let scroll = usize::from(scroll);
        for &(index, action_id) in &self.actions {
            let Some(visible) = index.checked_sub(scroll) else {
                continue;
            };
            let Ok(offset) = u16::try_from(visible) else {
                continue;
            };
            let row = first_row.saturating_add(offset);
            if row < end_row {
                cs.add_row_target(area, row, action_id);
            }
        }
    }

    /// Render into `area` inside `block` and register targets in one step.
    pub fn render(self, f: &mut Frame, area: Rect, block: Block<'a>, cs: &mut ClickState) {
        let inner = block.inner(area);
        let top = inner.y.saturating_sub(area.y);
        let bottom = area.bottom().saturating_sub(inner.bottom());
        self.register_targets(area, cs, top, bottom, 0);
        f.render_widget(Paragraph::new(self.lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_bar_measures_padded_labels() {
        let bar = TabBar::new(" │ ")
            .tab("Click", Style::default(), 10)
            .tab("Auto", Style::default(), 11);
        let (line, widths) = bar.layout();
        assert_eq!(widths, vec![(7, 10), (6, 11)]);
        assert_eq!(line.width(), 7 + 3 + 6);
    }

    #[test]
    fn clickable_rows_follow_their_lines() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("header"));
        cl.push_clickable(Line::from("item 0"), 10);
        cl.push(Line::from("spacer"));
        cl.push_clickable(Line::from("item 1"), 11);

        // Bordered area at y=5: content starts at row 6.
        let area = Rect::new(0, 5, 80, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(3, 7), Some(10));
        assert_eq!(cs.hit_test(3, 8), None);
        assert_eq!(cs.hit_test(3, 9), Some(11));
    }

    #[test]
    fn clickable_rows_respect_scroll() {
        let mut cl = ClickableList::new();
        for i in 0..4u16 {
            cl.push_clickable(Line::from(format!("item {i}")), 100 + i);
        }
        let area = Rect::new(0, 10, 80, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 1, 2);

        assert_eq!(cs.hit_test(0, 10), Some(102));
        assert_eq!(cs.hit_test(0, 11), Some(103));
        assert_eq!(cs.targets.len(), 2);
    }

    #[test]
    fn clickable_rows_clipped_by_area() {
        let mut cl = ClickableList::new();
        for i in 0..20u16 {
            cl.push_clickable(Line::from(format!("item {i}")), 50 + i);
        }
        let area = Rect::new(0, 0, 80, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(0, 3), Some(52));
        assert_eq!(cs.hit_test(0, 4), None);
    }

    #[test]
    fn empty_list_registers_nothing() {
        let cl = ClickableList::new();
        assert!(cl.is_empty());
        let mut cs = ClickState::new();
        cl.register_targets(Rect::new(0, 0, 80, 10), &mut cs, 1, 1, 0);
        assert!(cs.targets.is_empty());
    }
}
