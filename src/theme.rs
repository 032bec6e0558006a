//! Theme colors as CSS custom properties on the document root.

use reminder_core::Theme;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

pub fn apply_theme(theme: &Theme) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };

    let style = root.style();
    for (name, value) in theme.css_variables() {
        if let Err(e) = style.set_property(name, value) {
            web_sys::console::warn_2(&format!("[THEME] Failed to set {}:", name).into(), &e);
        }
    }
}
