//! Cookie Clicker state transitions, as pure functions over [`GameState`].
//!
//! Every function either applies a complete transition or leaves the state
//! untouched. None of them can fail.

use super::config::EngineConfig;
use super::economy::{offline_earnings, scaled_cost};
use super::state::{Category, GameState};

/// Manual click: credit `click_power` cookies. Returns the amount earned.
pub fn click(state: &mut GameState) -> u64 {
    let earned = state.click_power;
    state.credit(earned);
    state.total_clicks = state.total_clicks.saturating_add(1);
    earned
}

/// Try to buy one unit of `id`. Returns the price paid, or `None` when the
/// id is unknown in `category` or the balance is short.
pub fn buy(state: &mut GameState, id: &str, category: Category, growth: f64) -> Option<u64> {
    let cost = state.upgrade(id, category)?.current_cost;
    if state.resource < cost {
        return None;
    }

    let upgrade = state.upgrade_mut(id, category)?;
    upgrade.owned = upgrade.owned.saturating_add(1);
    upgrade.current_cost = scaled_cost(upgrade.base_cost, upgrade.owned, growth);
    state.resource -= cost;
    state.recalculate();
    Some(cost)
}

/// One passive production tick. Returns the amount produced.
pub fn passive_tick(state: &mut GameState) -> u64 {
    let produced = state.production_rate;
    if produced > 0 {
        state.credit(produced);
    }
    produced
}

/// Mark the state as consistent with wall-clock production at `now_ms`.
pub fn mark_synced(state: &mut GameState, now_ms: u64) {
    state.last_sync_time = now_ms;
}

/// Result of a successful offline catch-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OfflineReport {
    pub amount: u64,
    pub elapsed_ms: u64,
}

/// Credit production for the time since `last_sync_time`, if the player was
/// away longer than the threshold and something is producing.
pub fn reconcile_offline(
    state: &mut GameState,
    now_ms: u64,
    config: &EngineConfig,
) -> Option<OfflineReport> {
    let elapsed_ms = now_ms.saturating_sub(state.last_sync_time);
    if elapsed_ms <= config.offline_threshold_ms || state.production_rate == 0 {
        return None;
    }

    let amount = offline_earnings(state.production_rate, elapsed_ms, config.offline_cap_ms);
    state.credit(amount);
    mark_synced(state, now_ms);
    Some(OfflineReport { amount, elapsed_ms })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clicker::state::assert_invariants;

    const G: f64 = 1.15;

    #[test]
    fn click_adds_click_power() {
        let mut state = GameState::new(0);
        assert_eq!(click(&mut state), 1);
        assert_eq!(state.resource, 1);
        assert_eq!(state.total_clicks, 1);
        assert_eq!(state.total_earned, 1);
    }

    #[test]
    fn fifteen_clicks_buy_a_cursor() {
        let mut state = GameState::new(0);
        for _ in 0..15 {
            click(&mut state);
        }
        assert_eq!(buy(&mut state, "cursor", Category::Click, G), Some(15));
        assert_eq!(state.resource, 0);
        assert_eq!(state.click_power, 2);
        assert_eq!(state.click_upgrades[0].owned, 1);
        assert_eq!(state.click_upgrades[0].current_cost, 17);
        assert_eq!(state.total_earned, 15);
        assert_invariants(&state, G);
    }

    #[test]
    fn buy_insufficient_funds_is_noop() {
        let mut state = GameState::new(0);
        state.resource = 99;
        state.total_earned = 99;
        let before = state.clone();
        assert_eq!(buy(&mut state, "grandma", Category::Auto, G), None);
        assert_eq!(state, before);
    }

    #[test]
    fn buy_unknown_id_is_noop() {
        let mut state = GameState::new(0);
        state.resource = 1_000_000;
        let before = state.clone();
        assert_eq!(buy(&mut state, "portal", Category::Auto, G), None);
        assert_eq!(buy(&mut state, "cursor", Category::Auto, G), None);
        assert_eq!(state, before);
    }

    #[test]
    fn buying_auto_keeps_click_power() {
        let mut state = GameState::new(0);
        state.click_upgrades[1].owned = 2;
        state.recalculate();
        state.resource = 100;
        buy(&mut state, "grandma", Category::Auto, G).unwrap();
        assert_eq!(state.click_power, 5);
        assert_eq!(state.production_rate, 1);
        assert_invariants(&state, G);
    }

    #[test]
    fn buying_click_keeps_production_rate() {
        let mut state = GameState::new(0);
        state.auto_upgrades[1].upgrade.owned = 1;
        state.recalculate();
        state.resource = 15;
        buy(&mut state, "cursor", Category::Click, G).unwrap();
        assert_eq!(state.production_rate, 8);
        assert_eq!(state.click_power, 2);
    }

    #[test]
    fn spending_does_not_touch_total_earned() {
        let mut state = GameState::new(0);
        state.resource = 500;
        state.total_earned = 800;
        buy(&mut state, "glove", Category::Click, G).unwrap();
        assert_eq!(state.resource, 0);
        assert_eq!(state.total_earned, 800);
    }

    #[test]
    fn passive_tick_adds_rate() {
        let mut state = GameState::new(0);
        state.auto_upgrades[0].upgrade.owned = 3;
        state.recalculate();
        assert_eq!(passive_tick(&mut state), 3);
        assert_eq!(state.resource, 3);
        assert_eq!(state.total_earned, 3);
    }

    #[test]
    fn passive_tick_without_producers_does_nothing() {
        let mut state = GameState::new(0);
        let before = state.clone();
        assert_eq!(passive_tick(&mut state), 0);
        assert_eq!(state, before);
    }

    #[test]
    fn offline_two_minutes_at_ten_per_second() {
        let mut state = GameState::new(0);
        state.auto_upgrades[0].upgrade.owned = 2; // 2/s
        state.auto_upgrades[1].upgrade.owned = 1; // 8/s
        state.recalculate();
        assert_eq!(state.production_rate, 10);

        let report = reconcile_offline(&mut state, 120_000, &EngineConfig::default());
        assert_eq!(
            report,
            Some(OfflineReport { amount: 1_200, elapsed_ms: 120_000 })
        );
        assert_eq!(state.resource, 1_200);
        assert_eq!(state.total_earned, 1_200);
        assert_eq!(state.last_sync_time, 120_000);
    }

    #[test]
    fn offline_below_threshold_is_noop() {
        let mut state = GameState::new(0);
        state.auto_upgrades[0].upgrade.owned = 1;
        state.recalculate();
        let before = state.clone();
        // Exactly the threshold does not count as "exceeds".
        assert_eq!(reconcile_offline(&mut state, 60_000, &EngineConfig::default()), None);
        assert_eq!(state, before);
    }

    #[test]
    fn offline_without_production_is_noop() {
        let mut state = GameState::new(0);
        let before = state.clone();
        assert_eq!(
            reconcile_offline(&mut state, 10_000_000, &EngineConfig::default()),
            None
        );
        assert_eq!(state, before);
    }

    #[test]
    fn offline_respects_cap() {
        let config = EngineConfig::default();
        let mut state = GameState::new(0);
        state.auto_upgrades[0].upgrade.owned = 1;
        state.recalculate();
        let week = 7 * 24 * 60 * 60 * 1_000;
        let report = reconcile_offline(&mut state, week, &config).unwrap();
        assert_eq!(report.amount, config.offline_cap_ms / 1_000);
        assert_eq!(report.elapsed_ms, week);
    }

    #[test]
    fn offline_with_clock_behind_save_is_noop() {
        let mut state = GameState::new(500_000);
        state.auto_upgrades[0].upgrade.owned = 1;
        state.recalculate();
        assert_eq!(reconcile_offline(&mut state, 1_000, &EngineConfig::default()), None);
        assert_eq!(state.resource, 0);
    }
}
