//! Browser glue: localStorage persistence, save downloads, DOM hit testing.
//!
//! Everything here calls into the DOM and only works inside a page.

use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Storage, Url};

use crate::clicker::{EngineConfig, ExportedSave, KeyValueStore, StorageError};
use crate::input::{pixel_x_to_col, pixel_y_to_row};

/// localStorage key holding an optional [`EngineConfig`] override.
pub const CONFIG_KEY: &str = "idle-game-config";

/// `window.localStorage`, or a backend that reports itself unavailable
/// (private browsing, storage disabled).
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            warn!("localStorage unavailable; progress will not be saved");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage.as_ref().ok_or(StorageError::Unavailable)
    }
}

fn js_error(e: JsValue) -> StorageError {
    StorageError::Backend(format!("{e:?}"))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage()?.remove_item(key).map_err(js_error)
    }
}

/// Engine settings, with the stored override applied when present and valid.
pub fn load_config(storage: &LocalStorage) -> EngineConfig {
    match storage.get(CONFIG_KEY) {
        Ok(Some(json)) => EngineConfig::from_json(&json).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring config override");
            EngineConfig::default()
        }),
        Ok(None) | Err(_) => EngineConfig::default(),
    }
}

/// Hand the export to the browser as a file download.
pub fn offer_download(save: &ExportedSave) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let parts = js_sys::Array::of1(&JsValue::from_str(&save.contents));
    let options = BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(&save.file_name);
    anchor.click();
    Url::revoke_object_url(&url)
}

/// Ask the player to paste a save document. `None` when cancelled.
pub fn prompt_import() -> Option<String> {
    let window = web_sys::window()?;
    match window.prompt_with_message("Paste your Cookie Clicker save (JSON):") {
        Ok(Some(text)) if !text.trim().is_empty() => Some(text),
        Ok(_) => None,
        Err(e) => {
            warn!(error = ?e, "import prompt failed");
            None
        }
    }
}

/// Convert a mouse position to a terminal cell.
///
/// DomBackend renders the grid as a `<div>` directly inside `<body>`.
pub fn pixel_to_cell(mouse_x: u32, mouse_y: u32, cols: u16, rows: u16) -> Option<(u16, u16)> {
    let document = web_sys::window()?.document()?;
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_x_to_col(mouse_x as f64 - rect.left(), rect.width(), cols)?;
    let row = pixel_y_to_row(mouse_y as f64 - rect.top(), rect.height(), rows)?;
    Some((col, row))
}
