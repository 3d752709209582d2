//! Cookie Clicker game state definitions.
//!
//! [`GameState`] is serialized as-is for the localStorage record and for
//! exported save files, so field names follow the JSON (camelCase) layout.

use serde::{Deserialize, Serialize};

use super::catalog;

/// Which catalog an upgrade belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Raises cookies per manual click.
    Click,
    /// Produces cookies every second without player action.
    Auto,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Click => "Click Upgrades",
            Category::Auto => "Auto Producers",
        }
    }
}

/// A purchasable item with an owned count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Upgrade {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub base_cost: u64,
    /// Price of the next unit; always `scaled_cost(base_cost, owned)`.
    pub current_cost: u64,
    /// Click power granted per owned unit (only counted for click upgrades).
    pub per_unit_power: u64,
    pub owned: u32,
}

/// A passive producer: an [`Upgrade`] that also yields cookies per second.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoUpgrade {
    #[serde(flatten)]
    pub upgrade: Upgrade,
    pub per_unit_rate: u64,
}

/// Full state of a Cookie Clicker session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Spendable cookies.
    pub resource: u64,
    pub total_clicks: u64,
    /// Cookies ever produced (clicks, ticks, offline). Spending never lowers it.
    pub total_earned: u64,
    /// Derived: `1 + Σ perUnitPower × owned` over click upgrades.
    pub click_power: u64,
    /// Derived: `Σ perUnitRate × owned` over auto upgrades, per second.
    pub production_rate: u64,
    pub click_upgrades: Vec<Upgrade>,
    pub auto_upgrades: Vec<AutoUpgrade>,
    /// Epoch ms at which `resource` was last known to match wall-clock production.
    pub last_sync_time: u64,
    /// Unlocked achievement ids, in unlock order.
    #[serde(default)]
    pub achievements: Vec<String>,
}

impl GameState {
    /// A fresh game seeded from the catalog.
    pub fn new(now_ms: u64) -> Self {
        let mut state = Self {
            resource: 0,
            total_clicks: 0,
            total_earned: 0,
            click_power: 1,
            production_rate: 0,
            click_upgrades: catalog::click_upgrades(),
            auto_upgrades: catalog::auto_upgrades(),
            last_sync_time: now_ms,
            achievements: Vec::new(),
        };
        state.recalculate();
        state
    }

    /// Recompute both derived rates from the full catalogs.
    ///
    /// Always a full rescan, never an incremental adjustment, so a purchase in
    /// one category reflects the other category's current totals too.
    pub fn recalculate(&mut self) {
        self.click_power = self
            .click_upgrades
            .iter()
            .fold(1u64, |power, u| {
                power.saturating_add(u.per_unit_power.saturating_mul(u64::from(u.owned)))
            });
        self.production_rate = self.auto_upgrades.iter().fold(0u64, |rate, a| {
            rate.saturating_add(a.per_unit_rate.saturating_mul(u64::from(a.upgrade.owned)))
        });
    }

    /// Add produced cookies to both the balance and the lifetime total.
    pub fn credit(&mut self, amount: u64) {
        self.resource = self.resource.saturating_add(amount);
        self.total_earned = self.total_earned.saturating_add(amount);
    }

    pub fn upgrade(&self, id: &str, category: Category) -> Option<&Upgrade> {
        match category {
            Category::Click => self.click_upgrades.iter().find(|u| u.id == id),
            Category::Auto => self
                .auto_upgrades
                .iter()
                .map(|a| &a.upgrade)
                .find(|u| u.id == id),
        }
    }

    pub fn upgrade_mut(&mut self, id: &str, category: Category) -> Option<&mut Upgrade> {
        match category {
            Category::Click => self.click_upgrades.iter_mut().find(|u| u.id == id),
            Category::Auto => self
                .auto_upgrades
                .iter_mut()
                .map(|a| &mut a.upgrade)
                .find(|u| u.id == id),
        }
    }

    /// Whether the next unit of `id` is affordable. Unknown ids are never affordable.
    pub fn can_afford(&self, id: &str, category: Category) -> bool {
        self.upgrade(id, category)
            .map(|u| self.resource >= u.current_cost)
            .unwrap_or(false)
    }

    /// Units owned across both catalogs.
    pub fn total_owned(&self) -> u64 {
        let clicks: u64 = self.click_upgrades.iter().map(|u| u64::from(u.owned)).sum();
        let autos: u64 = self
            .auto_upgrades
            .iter()
            .map(|a| u64::from(a.upgrade.owned))
            .sum();
        clicks + autos
    }

    /// Average cookies per manual click over the whole run.
    pub fn click_efficiency(&self) -> f64 {
        if self.total_clicks == 0 {
            0.0
        } else {
            self.total_earned as f64 / self.total_clicks as f64
        }
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a == id)
    }
}

/// Test helper: panic if any state invariant is broken.
#[cfg(test)]
pub fn assert_invariants(state: &GameState, growth: f64) {
    use super::economy::scaled_cost;

    let items = state
        .click_upgrades
        .iter()
        .chain(state.auto_upgrades.iter().map(|a| &a.upgrade));
    for u in items {
        assert_eq!(
            u.current_cost,
            scaled_cost(u.base_cost, u.owned, growth),
            "stale cost for {}",
            u.id
        );
    }
    let power: u64 = 1 + state
        .click_upgrades
        .iter()
        .map(|u| u.per_unit_power * u64::from(u.owned))
        .sum::<u64>();
    assert_eq!(state.click_power, power, "click power out of sync");
    let rate: u64 = state
        .auto_upgrades
        .iter()
        .map(|a| a.per_unit_rate * u64::from(a.upgrade.owned))
        .sum();
    assert_eq!(state.production_rate, rate, "production rate out of sync");
    assert!(
        state.total_earned >= state.resource,
        "total earned {} below resource {}",
        state.total_earned,
        state.resource
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_seeded() {
        let state = GameState::new(1_000);
        assert_eq!(state.resource, 0);
        assert_eq!(state.click_power, 1);
        assert_eq!(state.production_rate, 0);
        assert_eq!(state.last_sync_time, 1_000);
        assert_eq!(state.click_upgrades.len(), 3);
        assert_eq!(state.auto_upgrades.len(), 4);
        assert_invariants(&state, 1.15);
    }

    #[test]
    fn recalculate_sums_both_catalogs() {
        let mut state = GameState::new(0);
        state.click_upgrades[0].owned = 3; // cursor +1 each
        state.click_upgrades[1].owned = 2; // hand +2 each
        state.auto_upgrades[0].upgrade.owned = 4; // grandma 1/s
        state.auto_upgrades[1].upgrade.owned = 1; // farm 8/s
        state.recalculate();
        assert_eq!(state.click_power, 1 + 3 + 4);
        assert_eq!(state.production_rate, 4 + 8);
    }

    #[test]
    fn auto_upgrade_power_does_not_count_towards_clicks() {
        let mut state = GameState::new(0);
        state.auto_upgrades[3].upgrade.owned = 2;
        state.recalculate();
        assert_eq!(state.click_power, 1);
        assert_eq!(state.production_rate, 520);
    }

    #[test]
    fn can_afford_checks_current_cost() {
        let mut state = GameState::new(0);
        state.resource = 14;
        assert!(!state.can_afford("cursor", Category::Click));
        state.resource = 15;
        assert!(state.can_afford("cursor", Category::Click));
    }

    #[test]
    fn can_afford_unknown_id_is_false() {
        let mut state = GameState::new(0);
        state.resource = u64::MAX;
        assert!(!state.can_afford("time-machine", Category::Auto));
        // Ids are scoped to their category.
        assert!(!state.can_afford("grandma", Category::Click));
    }

    #[test]
    fn credit_moves_both_totals() {
        let mut state = GameState::new(0);
        state.credit(42);
        assert_eq!(state.resource, 42);
        assert_eq!(state.total_earned, 42);
    }

    #[test]
    fn click_efficiency_handles_zero_clicks() {
        let mut state = GameState::new(0);
        assert_eq!(state.click_efficiency(), 0.0);
        state.total_clicks = 4;
        state.total_earned = 10;
        assert!((state.click_efficiency() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn json_uses_camel_case_and_flattens_auto_upgrades() {
        let state = GameState::new(5);
        let json = serde_json::to_value(&state).unwrap();
        assert!(json.get("totalClicks").is_some());
        assert!(json.get("lastSyncTime").is_some());
        let grandma = &json["autoUpgrades"][0];
        assert_eq!(grandma["id"], "grandma");
        assert_eq!(grandma["perUnitRate"], 1);
        assert_eq!(grandma["currentCost"], 100);
    }

    #[test]
    fn total_owned_counts_both_catalogs() {
        let mut state = GameState::new(0);
        state.click_upgrades[2].owned = 2;
        state.auto_upgrades[1].upgrade.owned = 3;
        assert_eq!(state.total_owned(), 5);
    }
}
