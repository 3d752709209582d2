//! Milestone achievements unlocked by crossing fixed thresholds.

use super::state::GameState;

/// What an achievement measures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    Clicks,
    /// Lifetime cookies earned.
    Earned,
    /// Units owned across both catalogs.
    UpgradesOwned,
}

impl Metric {
    fn read(&self, state: &GameState) -> u64 {
        match self {
            Metric::Clicks => state.total_clicks,
            Metric::Earned => state.total_earned,
            Metric::UpgradesOwned => state.total_owned(),
        }
    }
}

pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub metric: Metric,
    pub threshold: u64,
}

pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "clicks-100",
        name: "Warming Up",
        metric: Metric::Clicks,
        threshold: 100,
    },
    Achievement {
        id: "clicks-1000",
        name: "Clicker",
        metric: Metric::Clicks,
        threshold: 1_000,
    },
    Achievement {
        id: "clicks-10000",
        name: "Tireless Finger",
        metric: Metric::Clicks,
        threshold: 10_000,
    },
    Achievement {
        id: "clicks-100000",
        name: "Click Legend",
        metric: Metric::Clicks,
        threshold: 100_000,
    },
    Achievement {
        id: "earned-1000",
        name: "First Batch",
        metric: Metric::Earned,
        threshold: 1_000,
    },
    Achievement {
        id: "earned-10000",
        name: "Bakery",
        metric: Metric::Earned,
        threshold: 10_000,
    },
    Achievement {
        id: "earned-100000",
        name: "Cookie Empire",
        metric: Metric::Earned,
        threshold: 100_000,
    },
    Achievement {
        id: "earned-1000000",
        name: "Millionaire",
        metric: Metric::Earned,
        threshold: 1_000_000,
    },
    Achievement {
        id: "upgrades-1",
        name: "First Purchase",
        metric: Metric::UpgradesOwned,
        threshold: 1,
    },
    Achievement {
        id: "upgrades-5",
        name: "Collector",
        metric: Metric::UpgradesOwned,
        threshold: 5,
    },
    Achievement {
        id: "upgrades-10",
        name: "Investor",
        metric: Metric::UpgradesOwned,
        threshold: 10,
    },
    Achievement {
        id: "upgrades-25",
        name: "Tycoon",
        metric: Metric::UpgradesOwned,
        threshold: 25,
    },
];

pub fn find(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Record every newly crossed threshold on `state`; returns what was unlocked.
pub fn unlock_reached(state: &mut GameState) -> Vec<&'static Achievement> {
    let reached: Vec<&'static Achievement> = ACHIEVEMENTS
        .iter()
        .filter(|a| a.metric.read(state) >= a.threshold && !state.has_achievement(a.id))
        .collect();
    state
        .achievements
        .extend(reached.iter().map(|a| a.id.to_string()));
    reached
}
