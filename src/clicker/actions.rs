//! Semantic action ids for click targets.
//!
//! Registered during render and dispatched back through `InputEvent::Click`.

// ── Core ────────────────────────────────────────────────────────
pub const CLICK_COOKIE: u16 = 0;

// ── Tab navigation ──────────────────────────────────────────────
pub const TAB_CLICK: u16 = 10;
pub const TAB_AUTO: u16 = 11;
pub const TAB_STATS: u16 = 12;
pub const TAB_SETTINGS: u16 = 13;

// ── Purchases (base + catalog index) ────────────────────────────
pub const BUY_CLICK_BASE: u16 = 100;
pub const BUY_AUTO_BASE: u16 = 200;

// ── Save data ───────────────────────────────────────────────────
pub const EXPORT_SAVE: u16 = 300;
pub const IMPORT_SAVE: u16 = 301;

// ── Reset (two-step) ────────────────────────────────────────────
pub const RESET_REQUEST: u16 = 310;
pub const RESET_CONFIRM: u16 = 311;
pub const RESET_CANCEL: u16 = 312;
