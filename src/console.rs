//! Browser console logging.
//!
//! Only the WASM build talks to `web_sys::console`; native builds (unit
//! tests) compile these to no-ops.

use serde::Serialize;

#[cfg(target_arch = "wasm32")]
pub fn log(msg: &str) {
    web_sys::console::log_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log(_msg: &str) {}

#[cfg(target_arch = "wasm32")]
pub fn warn(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn warn(_msg: &str) {}

/// Log `value` as a single JSON line prefixed with `label`.
pub fn log_json<T: Serialize>(label: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => log(&format!("{label}: {json}")),
        Err(e) => warn(&format!("{label}: スナップショットのシリアライズに失敗: {e}")),
    }
}
