//! Browser console logging.
//!
//! Wraps `web_sys::console` so call sites don't need to repeat the wasm32
//! gate. On native builds (unit tests) these are no-ops, since calling into
//! wasm-bindgen imports outside a wasm host panics.

/// Log an informational message to the browser console.
#[cfg(target_arch = "wasm32")]
pub fn log(msg: &str) {
    web_sys::console::log_1(&msg.into());
}

/// Log a warning to the browser console.
#[cfg(target_arch = "wasm32")]
pub fn warn(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log(_msg: &str) {}

#[cfg(not(target_arch = "wasm32"))]
pub fn warn(_msg: &str) {}
