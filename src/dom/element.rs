// ============================================================================
// ELEMENT HELPERS - Funciones básicas para manipular DOM
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement, Window};

/// Clase que oculta una región
pub const HIDDEN_CLASS: &str = "hidden";

/// Obtener window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Obtener document
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Obtener elemento por ID
pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Crear elemento
pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

/// Agregar clase
pub fn add_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().add_1(class)
}

/// Remover clase
pub fn remove_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().remove_1(class)
}

/// Mostrar u ocultar con la clase `hidden`
pub fn set_visible(element: &Element, visible: bool) -> Result<(), JsValue> {
    if visible {
        remove_class(element, HIDDEN_CLASS)
    } else {
        add_class(element, HIDDEN_CLASS)
    }
}

/// `set_visible` por ID; IDs ausentes se ignoran
pub fn set_visible_by_id(id: &str, visible: bool) {
    if let Some(el) = get_element_by_id(id) {
        if let Err(e) = set_visible(&el, visible) {
            log::error!("❌ [DOM] No se pudo cambiar visibilidad de #{}: {:?}", id, e);
        }
    }
}

pub fn set_text_by_id(id: &str, text: &str) {
    if let Some(el) = get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_html_by_id(id: &str, html: &str) {
    if let Some(el) = get_element_by_id(id) {
        el.set_inner_html(html);
    }
}

/// Valor de un `<input>` o `<textarea>`
pub fn input_value(id: &str) -> Option<String> {
    let el = get_element_by_id(id)?;
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    el.dyn_ref::<HtmlTextAreaElement>().map(|area| area.value())
}

pub fn set_input_value(id: &str, value: &str) {
    if let Some(el) = get_element_by_id(id) {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }
}

pub fn is_checked(id: &str) -> bool {
    get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.checked())
        .unwrap_or(false)
}

/// Botón en estado "cargando": guarda el texto original en data-original-text
pub fn set_loading(id: &str, loading: bool) {
    let Some(el) = get_element_by_id(id) else {
        return;
    };
    let Some(button) = el.dyn_ref::<HtmlElement>() else {
        return;
    };
    let result = if loading {
        button
            .dataset()
            .set("originalText", &button.inner_text())
            .and_then(|_| button.set_attribute("disabled", ""))
            .map(|_| button.set_inner_text("Processing..."))
    } else {
        let original = button
            .dataset()
            .get("originalText")
            .unwrap_or_else(|| "Submit".to_string());
        button.set_inner_text(&original);
        button.remove_attribute("disabled")
    };
    if let Err(e) = result {
        log::error!("❌ [DOM] set_loading #{}: {:?}", id, e);
    }
}

/// Añadir HTML al final de un contenedor y hacer scroll hasta abajo
pub fn append_html(container: &Element, html: &str) -> Result<(), JsValue> {
    container.insert_adjacent_html("beforeend", html)?;
    container.set_scroll_top(container.scroll_height());
    Ok(())
}

// ----------------------------------------------------------------------------
// Diálogos nativos
// ----------------------------------------------------------------------------

pub fn alert(message: &str) {
    if let Some(win) = window() {
        if let Err(e) = win.alert_with_message(message) {
            log::error!("❌ [DOM] alert: {:?}", e);
        }
    }
}

pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|win| win.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// `None` si el usuario cancela
pub fn prompt(message: &str, default: &str) -> Option<String> {
    window()?
        .prompt_with_message_and_default(message, default)
        .ok()
        .flatten()
}

/// Vuelve a pintar los iconos `data-lucide` del HTML recién insertado
pub fn refresh_icons() {
    let Some(win) = window() else {
        return;
    };
    let Ok(lucide) = js_sys::Reflect::get(&win, &JsValue::from_str("lucide")) else {
        return;
    };
    if lucide.is_undefined() {
        return;
    }
    let create = js_sys::Reflect::get(&lucide, &JsValue::from_str("createIcons"))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
    if let Some(create) = create {
        if let Err(e) = create.call0(&lucide) {
            log::warn!("⚠️ [DOM] lucide.createIcons falló: {:?}", e);
        }
    }
}
