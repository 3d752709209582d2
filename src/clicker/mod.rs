//! Cookie Clicker: the idle game engine and its presentation adapter.

pub mod achievements;
pub mod actions;
pub mod catalog;
pub mod config;
pub mod economy;
pub mod engine;
pub mod logic;
pub mod render;
pub mod save;
pub mod state;
pub mod store;
pub mod ui;

#[cfg(test)]
mod simulator;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;
use tracing::warn;

use crate::input::{ClickState, InputEvent};
use crate::time::Clock;

pub use config::EngineConfig;
pub use engine::{Engine, EngineEvent};
pub use save::{ExportedSave, ImportError};
pub use state::{AutoUpgrade, Category, GameState, Upgrade};
pub use store::{GameStore, KeyValueStore, MemoryStore, StorageError, STORAGE_KEY};

use actions::*;
use catalog::{AUTO_ITEMS, CLICK_ITEMS};
use economy::{format_compact, format_duration};
use ui::{Tab, UiState};

/// Something only the browser host can do.
#[derive(Clone, Debug, PartialEq)]
pub enum HostRequest {
    Download(ExportedSave),
    /// Ask the player for a save document, then call [`ClickerGame::import`].
    ImportPrompt,
}

/// The engine plus the state the screen needs around it.
pub struct ClickerGame<S: KeyValueStore, C: Clock> {
    pub engine: Engine<S, C>,
    pub ui: UiState,
    request: Option<HostRequest>,
}

impl<S: KeyValueStore, C: Clock> ClickerGame<S, C> {
    pub fn new(engine: Engine<S, C>) -> Self {
        let mut game = Self {
            engine,
            ui: UiState::new(),
            request: None,
        };
        game.process_events();
        game
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Click(action_id) => self.handle_action(action_id),
        }
    }

    fn handle_key(&mut self, key: char) -> bool {
        let action_id = match key.to_ascii_lowercase() {
            'c' | ' ' => CLICK_COOKIE,
            't' => self.ui.tab.next().action(),
            digit @ '1'..='9' => {
                let idx = u16::from(digit as u8 - b'1');
                match self.ui.tab {
                    Tab::ClickShop => BUY_CLICK_BASE + idx,
                    Tab::AutoShop => BUY_AUTO_BASE + idx,
                    Tab::Stats | Tab::Settings => return false,
                }
            }
            'e' => EXPORT_SAVE,
            'i' => IMPORT_SAVE,
            'r' => RESET_REQUEST,
            'y' if self.ui.confirm_reset => RESET_CONFIRM,
            'n' if self.ui.confirm_reset => RESET_CANCEL,
            _ => return false,
        };
        self.handle_action(action_id)
    }

    fn handle_action(&mut self, action_id: u16) -> bool {
        match action_id {
            CLICK_COOKIE => {
                self.engine.click();
                self.ui.last_click_ms = Some(self.engine.now_ms());
            }
            TAB_CLICK..=TAB_SETTINGS => {
                if let Some(tab) = Tab::from_action(action_id) {
                    self.ui.tab = tab;
                    self.ui.confirm_reset = false;
                }
            }
            id if (BUY_CLICK_BASE..BUY_CLICK_BASE + CLICK_ITEMS.len() as u16).contains(&id) => {
                let item = &CLICK_ITEMS[usize::from(id - BUY_CLICK_BASE)];
                self.try_buy(item.id, Category::Click);
            }
            id if (BUY_AUTO_BASE..BUY_AUTO_BASE + AUTO_ITEMS.len() as u16).contains(&id) => {
                let item = &AUTO_ITEMS[usize::from(id - BUY_AUTO_BASE)];
                self.try_buy(item.id, Category::Auto);
            }
            EXPORT_SAVE => match self.engine.export() {
                Ok(exported) => {
                    self.ui
                        .add_log(format!("Exported {}", exported.file_name), false);
                    self.request = Some(HostRequest::Download(exported));
                }
                Err(e) => {
                    warn!(error = %e, "export failed");
                    self.ui.add_log("Export failed.", true);
                }
            },
            IMPORT_SAVE => self.request = Some(HostRequest::ImportPrompt),
            RESET_REQUEST => {
                self.ui.confirm_reset = true;
                self.ui.tab = Tab::Settings;
            }
            RESET_CONFIRM if self.ui.confirm_reset => {
                self.engine.reset();
                self.ui.confirm_reset = false;
                self.ui.add_log("Game has been reset.", true);
            }
            RESET_CANCEL => self.ui.confirm_reset = false,
            _ => return false,
        }
        true
    }

    fn try_buy(&mut self, id: &str, category: Category) {
        if self.engine.buy(id, category) {
            return;
        }
        if let Some(upgrade) = self.engine.state().upgrade(id, category) {
            let short = upgrade.current_cost.saturating_sub(self.engine.state().resource);
            self.ui.add_log(
                format!("Need {} more cookies for {}.", format_compact(short), upgrade.name),
                false,
            );
        }
    }

    /// Apply a pasted save document. Errors are reported in the log.
    pub fn import(&mut self, json: &str) -> Result<(), ImportError> {
        let result = self.engine.import(json);
        match &result {
            Ok(()) => self.ui.add_log("Save imported.", true),
            Err(e) => self.ui.add_log(format!("Import failed: {e}"), true),
        }
        self.process_events();
        result
    }

    /// Per-frame update: fire due timers, then turn engine events into UI feedback.
    pub fn tick(&mut self) {
        self.engine.advance();
        self.process_events();
        self.ui.expire_particles(self.engine.now_ms());
    }

    pub fn take_request(&mut self) -> Option<HostRequest> {
        self.request.take()
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }

    fn process_events(&mut self) {
        let now = self.engine.now_ms();
        for event in self.engine.drain_events() {
            match event {
                EngineEvent::Earned { amount } => {
                    self.ui.spawn_particle(format!("+{}", format_compact(amount)), now);
                }
                EngineEvent::Purchased { id, category, cost } => {
                    let name = self
                        .engine
                        .state()
                        .upgrade(&id, category)
                        .map_or(id.clone(), |u| u.name.clone());
                    self.ui
                        .add_log(format!("Bought {name} for {}.", format_compact(cost)), false);
                }
                EngineEvent::OfflineEarnings { amount, elapsed_ms } => {
                    self.ui.add_log(
                        format!(
                            "Welcome back! You were away {} and earned {} cookies.",
                            format_duration(elapsed_ms / 1_000),
                            format_compact(amount)
                        ),
                        true,
                    );
                }
                EngineEvent::AchievementUnlocked { name, .. } => {
                    self.ui.add_log(format!("Achievement unlocked: {name}"), true);
                }
            }
        }
    }
}
