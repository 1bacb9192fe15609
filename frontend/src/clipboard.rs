use anyhow::{anyhow, bail, Result};
use js_sys::{JsString, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// Put `text` on the system clipboard.
pub async fn write_text(text: &str) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| anyhow!("window not found."))?;
    let navigator = window.navigator();
    let clipboard = Reflect::get(&navigator, &JsString::from("clipboard"))
        .map_err(|e| anyhow!("Failed to read navigator.clipboard: {e:?}"))?;
    if clipboard.is_undefined() {
        bail!("Clipboard API is not supported in this browser");
    }
    let clipboard: web_sys::Clipboard = clipboard
        .dyn_into()
        .map_err(|_| anyhow!("navigator.clipboard is not a Clipboard"))?;
    JsFuture::from(clipboard.write_text(text))
        .await
        .map_err(|e| anyhow!("Failed to copy text: {e:?}"))?;
    Ok(())
}
