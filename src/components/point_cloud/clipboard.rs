use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::error::{Error, Result, js_error_text};

/// Writes `text` to the system clipboard.
///
/// Fails when the page is not in a secure context (no `navigator.clipboard`)
/// or the browser rejects the write.
pub async fn write_text(text: &str) -> Result<()> {
	let window = web_sys::window().ok_or_else(|| Error::Clipboard("no window".into()))?;
	let clipboard = js_sys::Reflect::get(&window.navigator(), &"clipboard".into())
		.map_err(|e| Error::Clipboard(js_error_text(&e)))?;
	if clipboard.is_undefined() || clipboard.is_null() {
		return Err(Error::Clipboard("clipboard API unavailable".into()));
	}
	let clipboard: web_sys::Clipboard = clipboard.unchecked_into();
	JsFuture::from(clipboard.write_text(text))
		.await
		.map(|_| ())
		.map_err(|e| Error::Clipboard(js_error_text(&e)))
}
