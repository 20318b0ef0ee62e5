//! DOM Helpers
//!
//! Thin wrappers over web-sys for the server-rendered page. Lookups
//! return `Option`: a missing element means the widget does not apply
//! to this page.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, Window};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub fn by_id_as<T: JsCast>(id: &str) -> Option<T> {
    by_id(id)?.dyn_into::<T>().ok()
}

pub fn query(selector: &str) -> Option<Element> {
    document()?.query_selector(selector).ok().flatten()
}

pub fn query_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub fn query_all(selector: &str) -> Vec<Element> {
    document()
        .and_then(|doc| doc.query_selector_all(selector).ok())
        .map(|list| {
            (0..list.length())
                .filter_map(|i| list.item(i))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Attach a listener for the page lifetime.
///
/// Events that are not an `E` are dropped.
pub fn listen<E, F>(target: &EventTarget, event: &str, mut handler: F)
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let cb = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    });
    let _ = target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
    cb.forget();
}

/// Attribute value, empty when absent
pub fn attr(el: &Element, name: &str) -> String {
    el.get_attribute(name).unwrap_or_default()
}

/// `value` of an input, select or textarea
pub fn field_value(el: &Element) -> String {
    if let Some(input) = el.dyn_ref::<web_sys::HtmlInputElement>() {
        input.value()
    } else if let Some(select) = el.dyn_ref::<web_sys::HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = el.dyn_ref::<web_sys::HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

pub fn set_field_value(el: &Element, value: &str) {
    if let Some(input) = el.dyn_ref::<web_sys::HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = el.dyn_ref::<web_sys::HtmlSelectElement>() {
        select.set_value(value);
    } else if let Some(area) = el.dyn_ref::<web_sys::HtmlTextAreaElement>() {
        area.set_value(value);
    }
}

pub fn set_checked(el: &Element, checked: bool) {
    if let Some(input) = el.dyn_ref::<web_sys::HtmlInputElement>() {
        input.set_checked(checked);
    }
}

pub fn is_checked(el: &Element) -> bool {
    el.dyn_ref::<web_sys::HtmlInputElement>()
        .map(|input| input.checked())
        .unwrap_or(false)
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

pub fn style(el: &Element, property: &str) -> String {
    el.dyn_ref::<HtmlElement>()
        .and_then(|html| html.style().get_property_value(property).ok())
        .unwrap_or_default()
}

pub fn set_display(el: &Element, value: &str) {
    set_style(el, "display", value);
}

pub fn toggle_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

/// Blocking `alert`
pub fn alert(message: &str) {
    if let Some(win) = window() {
        let _ = win.alert_with_message(message);
    }
}

/// Blocking `confirm`; false when no window
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|win| win.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn origin() -> String {
    window()
        .and_then(|win| win.location().origin().ok())
        .unwrap_or_default()
}

pub fn pathname() -> String {
    window()
        .and_then(|win| win.location().pathname().ok())
        .unwrap_or_default()
}

pub fn reload() {
    if let Some(win) = window() {
        let _ = win.location().reload();
    }
}

/// Bootstrap's `relatedTarget` on `show.bs.modal`: the control that opened the modal
pub fn related_target(ev: &web_sys::Event) -> Option<Element> {
    js_sys::Reflect::get(ev.as_ref(), &JsValue::from_str("relatedTarget"))
        .ok()?
        .dyn_into::<Element>()
        .ok()
}

/// Submit a form the way a submit button would (fires `submit` listeners)
pub fn request_submit(form: &web_sys::HtmlFormElement) {
    if form.request_submit().is_err() {
        let _ = form.submit();
    }
}

#[wasm_bindgen]
extern "C" {
    /// `bootstrap.Modal` from the page's Bootstrap 5 bundle
    #[wasm_bindgen(js_namespace = bootstrap, js_name = Modal)]
    pub type BootstrapModal;

    #[wasm_bindgen(constructor, js_namespace = bootstrap, js_class = "Modal")]
    pub fn new(element: &Element) -> BootstrapModal;

    #[wasm_bindgen(method)]
    pub fn show(this: &BootstrapModal);

    #[wasm_bindgen(method)]
    pub fn hide(this: &BootstrapModal);

    #[wasm_bindgen(static_method_of = BootstrapModal, js_namespace = bootstrap, js_class = "Modal", js_name = getInstance)]
    pub fn get_instance(element: &Element) -> Option<BootstrapModal>;
}
