//! Small DOM helpers shared by both front-ends

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Element by id, or an error naming the missing id
pub fn require(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
}

/// Set text content; missing elements are skipped
pub fn set_text(document: &Document, id: &str, text: &str) {
    match document.get_element_by_id(id) {
        Some(el) => el.set_text_content(Some(text)),
        None => log::warn!("missing #{}", id),
    }
}

/// Toggle the `hidden` class
pub fn set_hidden(document: &Document, id: &str, hidden: bool) {
    let Some(el) = document.get_element_by_id(id) else {
        log::warn!("missing #{}", id);
        return;
    };
    let classes = el.class_list();
    let result = if hidden {
        classes.add_1("hidden")
    } else {
        classes.remove_1("hidden")
    };
    if result.is_err() {
        log::warn!("could not toggle #{}", id);
    }
}

/// Replace the full class attribute
pub fn set_class(document: &Document, id: &str, class: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_class_name(class);
    }
}
