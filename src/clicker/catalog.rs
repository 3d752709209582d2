//! Static upgrade catalog: the seed for every fresh or reset game.
//!
//! Saved games reference items by id, so the tables are append-only: never
//! reuse or remove an id, only add new rows.

use super::state::{AutoUpgrade, Upgrade};

/// Bump when rows are appended.
pub const CATALOG_VERSION: u32 = 1;

/// One row of the catalog.
pub struct ItemDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub base_cost: u64,
    pub per_unit_power: u64,
    /// Cookies per second per unit; zero for click upgrades.
    pub per_unit_rate: u64,
}

pub const CLICK_ITEMS: &[ItemDef] = &[
    ItemDef {
        id: "cursor",
        name: "Better Cursor",
        description: "Increases cookies per click by 1",
        icon: "👆",
        base_cost: 15,
        per_unit_power: 1,
        per_unit_rate: 0,
    },
    ItemDef {
        id: "hand",
        name: "Strong Hand",
        description: "Increases cookies per click by 2",
        icon: "✋",
        base_cost: 100,
        per_unit_power: 2,
        per_unit_rate: 0,
    },
    ItemDef {
        id: "glove",
        name: "Magic Glove",
        description: "Increases cookies per click by 5",
        icon: "🧤",
        base_cost: 500,
        per_unit_power: 5,
        per_unit_rate: 0,
    },
];

pub const AUTO_ITEMS: &[ItemDef] = &[
    ItemDef {
        id: "grandma",
        name: "Grandma",
        description: "A nice grandma to bake cookies for you",
        icon: "👵",
        base_cost: 100,
        per_unit_power: 1,
        per_unit_rate: 1,
    },
    ItemDef {
        id: "farm",
        name: "Cookie Farm",
        description: "Grows cookie ingredients automatically",
        icon: "🚜",
        base_cost: 1_100,
        per_unit_power: 8,
        per_unit_rate: 8,
    },
    ItemDef {
        id: "mine",
        name: "Cookie Mine",
        description: "Mines chocolate chips and other minerals",
        icon: "⛏",
        base_cost: 12_000,
        per_unit_power: 47,
        per_unit_rate: 47,
    },
    ItemDef {
        id: "factory",
        name: "Cookie Factory",
        description: "Mass produces cookies with industrial efficiency",
        icon: "🏭",
        base_cost: 130_000,
        per_unit_power: 260,
        per_unit_rate: 260,
    },
];

impl ItemDef {
    fn to_upgrade(&self) -> Upgrade {
        Upgrade {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
            base_cost: self.base_cost,
            current_cost: self.base_cost,
            per_unit_power: self.per_unit_power,
            owned: 0,
        }
    }
}

pub fn click_upgrades() -> Vec<Upgrade> {
    CLICK_ITEMS.iter().map(ItemDef::to_upgrade).collect()
}

pub fn auto_upgrades() -> Vec<AutoUpgrade> {
    AUTO_ITEMS
        .iter()
        .map(|def| AutoUpgrade {
            upgrade: def.to_upgrade(),
            per_unit_rate: def.per_unit_rate,
        })
        .collect()
}
