//! Local-time formatting via the browser clock and Intl database.

use quakescope_shared::format;
use wasm_bindgen::JsValue;

/// Format an epoch-milliseconds timestamp as local `YYYY-MM-DD HH:MM (tz)`.
pub fn format_timestamp_ms(ms: i64) -> String {
    let date = js_sys::Date::new(&JsValue::from_f64(ms as f64));
    let tz = resolved_time_zone().unwrap_or_else(|| "Local".to_string());
    format::format_date_time(
        date.get_full_year() as i32,
        date.get_month() as u32 + 1,
        date.get_date() as u32,
        date.get_hours() as u32,
        date.get_minutes() as u32,
        &tz,
    )
}

/// The IANA timezone name the browser resolved for this user.
fn resolved_time_zone() -> Option<String> {
    let options = js_sys::Intl::DateTimeFormat::new(&js_sys::Array::new(), &js_sys::Object::new())
        .resolved_options();
    js_sys::Reflect::get(options.as_ref(), &JsValue::from_str("timeZone"))
        .ok()
        .and_then(|v| v.as_string())
}
