use token_console_common::table::format_timestamp;
use wasm_bindgen::JsValue;

/// Creation time in the browser's locale.
pub fn local_time(raw: &str) -> String {
    let date = js_sys::Date::new(&JsValue::from_str(raw));
    if date.get_time().is_nan() {
        return format_timestamp(raw);
    }
    date.to_locale_string("default", &JsValue::UNDEFINED).into()
}
