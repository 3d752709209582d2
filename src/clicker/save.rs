//! Save record codec: JSON encode/decode, import validation, export files.
//!
//! ## Compatibility policy
//!
//! The record is the [`GameState`] JSON object itself. New fields are only
//! ever *added*, always with `#[serde(default)]`, so records written by older
//! builds keep loading. The catalog is append-only, so upgrade ids in old
//! records still resolve; ids this build does not know are dropped and
//! catalog rows the record lacks start at zero owned.
//!
//! Decoding treats the document as untrusted: shape is checked explicitly
//! and every derived field (costs, click power, production rate) is
//! recomputed rather than trusted.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use super::achievements;
use super::economy::scaled_cost;
use super::state::{GameState, Upgrade};

/// Top-level fields a document must carry to be accepted.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "resource",
    "totalClicks",
    "totalEarned",
    "clickPower",
    "productionRate",
    "clickUpgrades",
    "autoUpgrades",
    "lastSyncTime",
];

/// Prefix of exported save file names.
const EXPORT_FILE_PREFIX: &str = "cookie-clicker-save";

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("save data is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("save data must be a JSON object")]
    NotAnObject,
    #[error("save data is missing the `{0}` field")]
    MissingField(&'static str),
    #[error("save data has the wrong shape: {0}")]
    InvalidShape(#[source] serde_json::Error),
    #[error("save data lists upgrade `{0}` more than once")]
    DuplicateId(String),
}

/// A save ready to be offered as a downloadable file.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportedSave {
    pub file_name: String,
    pub contents: String,
}

/// Compact JSON for the persistence record.
pub fn encode(state: &GameState) -> Result<String, serde_json::Error> {
    serde_json::to_string(state)
}

/// Validate and decode a record or import document.
///
/// The returned state follows the current catalog, with owned counts taken
/// from the document by id and all derived fields recomputed.
pub fn decode(json: &str, growth: f64) -> Result<GameState, ImportError> {
    let value: Value = serde_json::from_str(json).map_err(ImportError::InvalidJson)?;
    let object = value.as_object().ok_or(ImportError::NotAnObject)?;
    if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !object.contains_key(**f)) {
        return Err(ImportError::MissingField(*missing));
    }

    let document: GameState = serde_json::from_value(value).map_err(ImportError::InvalidShape)?;
    ensure_unique(document.click_upgrades.iter())?;
    ensure_unique(document.auto_upgrades.iter().map(|a| &a.upgrade))?;
    Ok(rehydrate(document, growth))
}

fn ensure_unique<'a>(items: impl Iterator<Item = &'a Upgrade>) -> Result<(), ImportError> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.id.as_str()) {
            return Err(ImportError::DuplicateId(item.id.clone()));
        }
    }
    Ok(())
}

/// Rebuild a trusted state from a shape-checked document.
fn rehydrate(document: GameState, growth: f64) -> GameState {
    let mut state = GameState::new(document.last_sync_time);
    state.resource = document.resource;
    state.total_clicks = document.total_clicks;
    state.total_earned = document.total_earned.max(document.resource);

    let saved_clicks: Vec<&Upgrade> = document.click_upgrades.iter().collect();
    let saved_autos: Vec<&Upgrade> = document.auto_upgrades.iter().map(|a| &a.upgrade).collect();
    restore_owned(state.click_upgrades.iter_mut(), &saved_clicks, growth);
    restore_owned(
        state.auto_upgrades.iter_mut().map(|a| &mut a.upgrade),
        &saved_autos,
        growth,
    );

    let mut seen = HashSet::new();
    for id in document.achievements {
        if achievements::find(&id).is_none() {
            debug!(id = %id, "dropping unknown achievement from save");
            continue;
        }
        if seen.insert(id.clone()) {
            state.achievements.push(id);
        }
    }

    state.recalculate();
    state
}

fn restore_owned<'a>(
    current: impl Iterator<Item = &'a mut Upgrade>,
    saved: &[&Upgrade],
    growth: f64,
) {
    let mut matched = 0;
    for upgrade in current {
        if let Some(s) = saved.iter().find(|s| s.id == upgrade.id) {
            upgrade.owned = s.owned;
            matched += 1;
        }
        upgrade.current_cost = scaled_cost(upgrade.base_cost, upgrade.owned, growth);
    }
    if matched < saved.len() {
        warn!(
            dropped = saved.len() - matched,
            "save references upgrades missing from the catalog"
        );
    }
}

/// `cookie-clicker-save-YYYY-MM-DD.json` for the UTC date of `now_ms`.
pub fn export_file_name(now_ms: u64) -> String {
    let millis = i64::try_from(now_ms).unwrap_or(i64::MAX);
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(at) => format!(
            "{EXPORT_FILE_PREFIX}-{:04}-{:02}-{:02}.json",
            at.year(),
            at.month(),
            at.day()
        ),
        None => format!("{EXPORT_FILE_PREFIX}.json"),
    }
}

/// Pretty-printed export of the current state; same shape as the record.
pub fn export(state: &GameState, now_ms: u64) -> Result<ExportedSave, serde_json::Error> {
    Ok(ExportedSave {
        file_name: export_file_name(now_ms),
        contents: serde_json::to_string_pretty(state)?,
    })
}
