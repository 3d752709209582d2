//! Cookie Clicker rendering: counters, the cookie button, shops, stats and settings.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::time::Clock;
use crate::widgets::{ClickableList, TabBar};

use super::achievements::ACHIEVEMENTS;
use super::actions::*;
use super::economy::{format_compact, format_duration};
use super::state::{Category, GameState, Upgrade};
use super::store::KeyValueStore;
use super::ui::{Tab, UiState};
use super::ClickerGame;

const COOKIE_ART: [&str; 3] = ["╭━●━●━╮", "━●━━●━●━", "╰━●━●━╯"];
const COOKIE_PRESSED_ART: [&str; 3] = ["╭●●●●●╮", "●●━━━●●━", "╰●●●●●╯"];

pub fn render<S: KeyValueStore, C: Clock>(
    game: &ClickerGame<S, C>,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let state = game.engine.state();
    let ui = &game.ui;
    let now = game.engine.now_ms();

    let (main_area, log_area) = if is_narrow_layout(area.width) {
        (area, None)
    } else {
        let h = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        (h[0], Some(h[1]))
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // cookie
            Constraint::Length(3), // tabs
            Constraint::Min(5),    // tab content
            Constraint::Length(1), // help
        ])
        .split(main_area);

    let mut cs = click_state.borrow_mut();
    render_cookie(state, ui, now, f, chunks[0], &mut cs);
    render_tab_bar(ui, f, chunks[1], &mut cs);
    match ui.tab {
        Tab::ClickShop => render_shop(state, Category::Click, f, chunks[2], &mut cs),
        Tab::AutoShop => render_shop(state, Category::Auto, f, chunks[2], &mut cs),
        Tab::Stats => render_stats(state, f, chunks[2]),
        Tab::Settings => render_settings(game, f, chunks[2], &mut cs),
    }
    render_help(f, chunks[3]);

    if let Some(log_area) = log_area {
        render_log(ui, f, log_area);
    }
}

fn render_cookie(
    state: &GameState,
    ui: &UiState,
    now: u64,
    f: &mut Frame,
    area: Rect,
    cs: &mut ClickState,
) {
    let pressed = ui.is_click_flashing(now);
    let art = if pressed { COOKIE_PRESSED_ART } else { COOKIE_ART };
    let art_style = Style::default().fg(if pressed { Color::White } else { Color::Yellow });

    // The whole panel clicks; the button row below is registered on top.
    cs.add_click_target(area, CLICK_COOKIE);

    let mut cl = ClickableList::new();
    cl.push(Line::from(vec![
        Span::styled(
            format!("🍪 {}", format_compact(state.resource)),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" cookies", Style::default().fg(Color::Gray)),
    ]));
    cl.push(Line::from(vec![
        Span::styled(
            format!("+{}/click", format_compact(state.click_power)),
            Style::default().fg(Color::Green),
        ),
        Span::styled("  ", Style::default()),
        Span::styled(
            format!("{}/s", format_compact(state.production_rate)),
            Style::default().fg(Color::Magenta),
        ),
    ]));
    cl.push(particle_line(ui, now, area.width.saturating_sub(2)));
    for row in art {
        cl.push(Line::from(Span::styled(row, art_style)));
    }
    cl.push_clickable(
        Line::from(Span::styled(
            format!(" [C] CLICK! +{} ", format_compact(state.click_power)),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        CLICK_COOKIE,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Cookie Clicker ");
    let inner = block.inner(area);
    cl.register_targets(area, cs, inner.y.saturating_sub(area.y), 1, 0);
    let widget = Paragraph::new(cl.into_lines())
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

/// Floating "+N" texts, placed by their column offset.
fn particle_line(ui: &UiState, now: u64, width: u16) -> Line<'static> {
    let width = usize::from(width);
    let mut cells = vec![' '; width];
    let centre = width / 2;
    for p in &ui.particles {
        if p.age(now) >= 1.0 {
            continue;
        }
        let start = (centre as i64 + i64::from(p.col_offset) * 2 - p.text.len() as i64 / 2)
            .clamp(0, width as i64) as usize;
        for (i, ch) in p.text.chars().enumerate() {
            if let Some(cell) = cells.get_mut(start + i) {
                *cell = ch;
            }
        }
    }
    let text: String = cells.into_iter().collect();
    Line::from(Span::styled(
        text.trim_end().to_string(),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    ))
}

fn render_tab_bar(ui: &UiState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let mut bar = TabBar::new(" │ ").block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    for tab in Tab::ALL {
        let style = if tab == ui.tab {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        bar = bar.tab(tab.label(), style, tab.action());
    }
    bar.render(f, area, cs);
}

fn render_shop(
    state: &GameState,
    category: Category,
    f: &mut Frame,
    area: Rect,
    cs: &mut ClickState,
) {
    let mut cl = ClickableList::new();
    match category {
        Category::Click => {
            for (i, u) in state.click_upgrades.iter().enumerate() {
                let effect = format!("+{}/click", u.per_unit_power);
                push_upgrade(&mut cl, state, u, i, effect, BUY_CLICK_BASE);
            }
        }
        Category::Auto => {
            for (i, a) in state.auto_upgrades.iter().enumerate() {
                let effect = format!("+{}/s", a.per_unit_rate);
                push_upgrade(&mut cl, state, &a.upgrade, i, effect, BUY_AUTO_BASE);
            }
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(format!(" {} ", category.label()));
    cl.render(f, area, block, cs);
}

fn push_upgrade<'a>(
    cl: &mut ClickableList<'a>,
    state: &GameState,
    upgrade: &'a Upgrade,
    index: usize,
    effect: String,
    action_base: u16,
) {
    let affordable = state.resource >= upgrade.current_cost;
    let (name_style, cost_style) = if affordable {
        (
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Green),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::Red),
        )
    };
    let action_id = action_base + index as u16;

    cl.push_clickable(
        Line::from(vec![
            Span::styled(
                format!(" [{}] ", index + 1),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{} ", upgrade.icon)),
            Span::styled(upgrade.name.as_str(), name_style),
            Span::styled(format!(" x{}", upgrade.owned), Style::default().fg(Color::Cyan)),
            Span::styled(format!("  {}", format_compact(upgrade.current_cost)), cost_style),
            Span::styled(format!("  {effect}"), Style::default().fg(Color::Magenta)),
        ]),
        action_id,
    );
    cl.push_clickable(
        Line::from(Span::styled(
            format!("     {}", upgrade.description),
            Style::default().fg(Color::DarkGray),
        )),
        action_id,
    );
}

fn render_stats(state: &GameState, f: &mut Frame, area: Rect) {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let row = |name: &'static str, v: String| {
        Line::from(vec![Span::styled(format!(" {name:<16}"), label), Span::styled(v, value)])
    };

    let unlocked = ACHIEVEMENTS
        .iter()
        .filter(|a| state.has_achievement(a.id))
        .count();
    let mut lines = vec![
        row("Cookies", format_compact(state.resource)),
        row("Total earned", format_compact(state.total_earned)),
        row("Total clicks", state.total_clicks.to_string()),
        row("Click power", format!("+{}", state.click_power)),
        row("Production", format!("{}/s", format_compact(state.production_rate))),
        row("Per click avg", format!("{:.1}", state.click_efficiency())),
        row("Upgrades owned", state.total_owned().to_string()),
        row("Achievements", format!("{unlocked}/{}", ACHIEVEMENTS.len())),
        Line::from(""),
    ];
    for a in ACHIEVEMENTS {
        let (mark, style) = if state.has_achievement(a.id) {
            ("✔", Style::default().fg(Color::Yellow))
        } else {
            ("·", Style::default().fg(Color::DarkGray))
        };
        lines.push(Line::from(Span::styled(format!(" {mark} {}", a.name), style)));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" Statistics "),
    );
    f.render_widget(widget, area);
}

fn render_settings<S: KeyValueStore, C: Clock>(
    game: &ClickerGame<S, C>,
    f: &mut Frame,
    area: Rect,
    cs: &mut ClickState,
) {
    let config = game.engine.config();
    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(Color::White);
    let hint_style = Style::default().fg(Color::DarkGray);

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        format!(
            " Autosave every {} · offline earnings capped at {}",
            format_duration(config.autosave_interval_ms / 1_000),
            format_duration(config.offline_cap_ms / 1_000)
        ),
        hint_style,
    )));
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(vec![
            Span::styled(" [E] ", key_style),
            Span::styled("Export save file", text_style),
        ]),
        EXPORT_SAVE,
    );
    cl.push_clickable(
        Line::from(vec![
            Span::styled(" [I] ", key_style),
            Span::styled("Import save data", text_style),
        ]),
        IMPORT_SAVE,
    );
    cl.push(Line::from(""));
    if game.ui.confirm_reset {
        cl.push(Line::from(Span::styled(
            " Reset all progress? This cannot be undone.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        cl.push_clickable(
            Line::from(vec![
                Span::styled(" [Y] ", key_style),
                Span::styled("Yes, reset everything", Style::default().fg(Color::Red)),
            ]),
            RESET_CONFIRM,
        );
        cl.push_clickable(
            Line::from(vec![
                Span::styled(" [N] ", key_style),
                Span::styled("Cancel", text_style),
            ]),
            RESET_CANCEL,
        );
    } else {
        cl.push_clickable(
            Line::from(vec![
                Span::styled(" [R] ", key_style),
                Span::styled("Reset game", Style::default().fg(Color::Red)),
            ]),
            RESET_REQUEST,
        );
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Settings ");
    cl.render(f, area, block, cs);
}

fn render_log(ui: &UiState, f: &mut Frame, area: Rect) {
    let visible = usize::from(area.height.saturating_sub(2));
    let start = ui.log.len().saturating_sub(visible);
    let lines: Vec<Line> = ui.log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Log "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let help = Paragraph::new(Line::from(Span::styled(
        "C/Space click · 1-9 buy · T next tab · E export · I import · R reset",
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center);
    f.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clicker::ui::Particle;

    #[test]
    fn particle_line_places_text_near_centre() {
        let mut ui = UiState::new();
        ui.particles.push(Particle {
            text: "+5".into(),
            col_offset: 0,
            born_ms: 0,
        });
        let line = particle_line(&ui, 100, 20);
        assert_eq!(line.to_string(), format!("{}+5", " ".repeat(9)));
    }

    #[test]
    fn particle_line_skips_expired() {
        let mut ui = UiState::new();
        ui.particles.push(Particle {
            text: "+5".into(),
            col_offset: 0,
            born_ms: 0,
        });
        assert_eq!(particle_line(&ui, 5_000, 20).to_string(), "");
    }

    #[test]
    fn particle_line_clamps_at_edges() {
        let mut ui = UiState::new();
        ui.particles.push(Particle {
            text: "+123".into(),
            col_offset: 4,
            born_ms: 0,
        });
        let line = particle_line(&ui, 0, 6).to_string();
        assert!(line.chars().count() <= 6);
    }
}
