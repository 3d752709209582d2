//! The simulation engine: player transitions, timers and offline catch-up.
//!
//! The host drives the engine from its frame loop by calling
//! [`Engine::advance`], which fires every timer whose due time has passed.
//! Player actions call the transition methods directly. Everything runs on
//! one thread against the store's live value.

use tracing::{debug, info, warn};

use super::achievements;
use super::config::EngineConfig;
use super::logic;
use super::save::{self, ExportedSave, ImportError};
use super::state::{Category, GameState};
use super::store::{GameStore, KeyValueStore};
use crate::time::{Clock, IntervalTimer};

/// Transient notifications for the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent {
    /// A manual click credited `amount`.
    Earned { amount: u64 },
    Purchased {
        id: String,
        category: Category,
        cost: u64,
    },
    /// Production credited for the time the game was closed.
    OfflineEarnings { amount: u64, elapsed_ms: u64 },
    AchievementUnlocked {
        id: &'static str,
        name: &'static str,
    },
}

pub struct Engine<S: KeyValueStore, C: Clock> {
    store: GameStore<S>,
    clock: C,
    config: EngineConfig,
    production: IntervalTimer,
    autosave: IntervalTimer,
    events: Vec<EngineEvent>,
    running: bool,
}

impl<S: KeyValueStore, C: Clock> Engine<S, C> {
    /// Load (or seed) the game, credit offline production and arm the timers.
    pub fn start(backend: S, clock: C, config: EngineConfig) -> Self {
        let now = clock.now_ms();
        let store = GameStore::open(backend, now, config.growth);
        let mut engine = Self {
            store,
            production: IntervalTimer::new(config.tick_interval_ms, config.max_tick_backlog),
            autosave: IntervalTimer::new(config.autosave_interval_ms, 1),
            clock,
            config,
            events: Vec::new(),
            running: true,
        };

        let config = &engine.config;
        if let Some(report) = engine
            .store
            .apply(|s| logic::reconcile_offline(s, now, config))
        {
            info!(
                amount = report.amount,
                elapsed_ms = report.elapsed_ms,
                "credited offline production"
            );
            engine.events.push(EngineEvent::OfflineEarnings {
                amount: report.amount,
                elapsed_ms: report.elapsed_ms,
            });
            engine.check_achievements();
        }

        engine.autosave.arm(now);
        engine.sync_production_timer(now);
        engine
    }

    pub fn state(&self) -> &GameState {
        self.store.state()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn store(&self) -> &GameStore<S> {
        &self.store
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Manual click. Returns the amount earned.
    pub fn click(&mut self) -> u64 {
        let amount = self.store.apply(logic::click);
        self.events.push(EngineEvent::Earned { amount });
        self.check_achievements();
        amount
    }

    /// Buy one unit of `id`. Returns `false` when the id is unknown or the
    /// balance is short; the state is untouched in that case.
    pub fn buy(&mut self, id: &str, category: Category) -> bool {
        let growth = self.config.growth;
        let Some(cost) = self.store.apply(|s| logic::buy(s, id, category, growth)) else {
            debug!(id, ?category, "purchase refused");
            return false;
        };
        debug!(id, ?category, cost, "purchased upgrade");
        self.events.push(EngineEvent::Purchased {
            id: id.to_string(),
            category,
            cost,
        });
        let now = self.clock.now_ms();
        self.sync_production_timer(now);
        self.check_achievements();
        true
    }

    pub fn can_afford(&self, id: &str, category: Category) -> bool {
        self.store.state().can_afford(id, category)
    }

    /// Wipe progress back to the catalog seed and persist it.
    pub fn reset(&mut self) {
        let now = self.clock.now_ms();
        self.store.reset(now);
        self.sync_production_timer(now);
        info!("game reset");
    }

    /// Replace the live state with an imported document and persist it.
    ///
    /// On error the live state is untouched.
    pub fn import(&mut self, json: &str) -> Result<(), ImportError> {
        let mut state = save::decode(json, self.config.growth)?;
        let now = self.clock.now_ms();
        logic::mark_synced(&mut state, now);
        self.store.replace(state);
        self.check_achievements();
        if let Err(e) = self.store.persist() {
            warn!(error = %e, "failed to persist imported save");
        }
        self.sync_production_timer(now);
        info!(resource = self.store.state().resource, "imported save");
        Ok(())
    }

    pub fn export(&self) -> Result<ExportedSave, serde_json::Error> {
        save::export(self.store.state(), self.clock.now_ms())
    }

    /// Fire every due timer, earliest first. On a tie production goes
    /// before autosave so the snapshot includes that tick.
    pub fn advance(&mut self) {
        if !self.running {
            return;
        }
        let now = self.clock.now_ms();
        let skipped = self.production.drop_backlog(now);
        if skipped > 0 {
            self.credit_skipped_ticks(skipped);
        }
        self.autosave.drop_backlog(now);

        loop {
            match (self.production.next_due(now), self.autosave.next_due(now)) {
                (Some(tick), Some(save)) if save < tick => self.fire_autosave(save),
                (Some(_), _) => self.fire_production(),
                (None, Some(save)) => self.fire_autosave(save),
                (None, None) => break,
            }
        }
    }

    /// Cancel both timers. Transitions still work; nothing fires by itself.
    pub fn shutdown(&mut self) {
        self.production.disarm();
        self.autosave.disarm();
        self.running = false;
        info!("engine stopped");
    }

    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    fn fire_production(&mut self) {
        self.production.fire();
        let produced = self.store.apply(logic::passive_tick);
        if produced > 0 {
            self.check_achievements();
        }
    }

    /// Ticks dropped from the backlog are credited in one lump, bounded by
    /// the offline cap, so the next autosave cannot move `lastSyncTime` past
    /// production that was never paid.
    fn credit_skipped_ticks(&mut self, skipped: u32) {
        let max_ticks = self.config.offline_cap_ms / self.config.tick_interval_ms.max(1);
        let ticks = u64::from(skipped).min(max_ticks);
        let amount = self.store.apply(|s| {
            let amount = s.production_rate.saturating_mul(ticks);
            s.credit(amount);
            amount
        });
        debug!(skipped, amount, "credited stalled production ticks");
        if amount > 0 {
            self.check_achievements();
        }
    }

    fn fire_autosave(&mut self, due_ms: u64) {
        self.autosave.fire();
        self.store.apply(|s| logic::mark_synced(s, due_ms));
        match self.store.persist() {
            Ok(()) => debug!(at = due_ms, "autosaved"),
            Err(e) => warn!(error = %e, "autosave failed"),
        }
    }

    /// Production runs only while something produces. An already running
    /// timer keeps its phase across purchases.
    fn sync_production_timer(&mut self, now_ms: u64) {
        if !self.running {
            return;
        }
        let producing = self.store.state().production_rate > 0;
        match (producing, self.production.is_armed()) {
            (true, false) => self.production.arm(now_ms),
            (false, true) => self.production.disarm(),
            _ => {}
        }
    }

    fn check_achievements(&mut self) {
        for achievement in self.store.apply(achievements::unlock_reached) {
            info!(id = achievement.id, "achievement unlocked");
            self.events.push(EngineEvent::AchievementUnlocked {
                id: achievement.id,
                name: achievement.name,
            });
        }
    }
}
