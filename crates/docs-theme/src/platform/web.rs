//! Browser capabilities backed by `web-sys`.
//!
//! [`start`] is the entry point for a documentation page: it installs a
//! controller with the default configuration on the current document. The
//! controller and its listeners stay alive for the life of the page.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, MediaQueryList, MediaQueryListEvent, Storage, Window};

use super::{Capabilities, ColorSchemeSource, KeyEvent, NodeId, Page, PreferenceStore, Timer};
use crate::config::ThemeConfig;
use crate::controller::ThemeController;
use crate::error::{Error, StorageError};

const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// Installs the theme toggle on the current page with default settings.
///
/// Returns `None` outside a window with a document.
pub fn start() -> Option<Result<ThemeController, Error>> {
    start_with(ThemeConfig::default())
}

pub fn start_with(config: ThemeConfig) -> Option<Result<ThemeController, Error>> {
    let window = web_sys::window()?;
    let page = BrowserPage::new(window.document()?);

    let mut capabilities = Capabilities::new(Rc::new(page), Rc::new(BrowserTimer::new(window.clone())));
    if let Some(storage) = LocalStorage::detect(&window) {
        capabilities = capabilities.with_store(Rc::new(storage));
    }
    if let Some(scheme) = MediaQueryScheme::detect(&window) {
        capabilities = capabilities.with_color_scheme(Rc::new(scheme));
    }
    Some(ThemeController::install(config, capabilities))
}

fn js_error(value: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Unavailable(format!("{:?}", value))
}

/// `window.localStorage`.
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Returns `None` when storage is missing or blocked.
    pub fn detect(window: &Window) -> Option<Self> {
        let storage = window.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(js_error)
    }
}

/// `matchMedia("(prefers-color-scheme: dark)")`.
pub struct MediaQueryScheme {
    list: MediaQueryList,
}

impl MediaQueryScheme {
    pub fn detect(window: &Window) -> Option<Self> {
        let list = window.match_media(PREFERS_DARK_QUERY).ok().flatten()?;
        Some(Self { list })
    }
}

impl ColorSchemeSource for MediaQueryScheme {
    fn prefers_dark(&self) -> Option<bool> {
        Some(self.list.matches())
    }

    fn subscribe(&self, listener: Box<dyn Fn(bool)>) -> bool {
        let closure = Closure::wrap(Box::new(move |event: MediaQueryListEvent| {
            listener(event.matches());
        }) as Box<dyn FnMut(_)>);
        let added = self
            .list
            .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
            .is_ok();
        closure.forget();
        added
    }
}

/// `window.setTimeout`.
pub struct BrowserTimer {
    window: Window,
}

impl BrowserTimer {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Timer for BrowserTimer {
    fn once(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        let function = Closure::once_into_js(move || callback());
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        if self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(function.unchecked_ref(), millis)
            .is_err()
        {
            tracing::warn!("setTimeout rejected the callback");
        }
    }
}

/// The live document, with created elements tracked by [`NodeId`].
pub struct BrowserPage {
    document: Document,
    next_id: Cell<u64>,
    nodes: RefCell<HashMap<NodeId, Element>>,
}

impl BrowserPage {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            next_id: Cell::new(0),
            nodes: RefCell::new(HashMap::new()),
        }
    }

    fn node(&self, node: NodeId) -> Option<Element> {
        self.nodes.borrow().get(&node).cloned()
    }
}

impl Page for BrowserPage {
    fn is_loading(&self) -> bool {
        self.document.ready_state() == "loading"
    }

    fn on_ready(&self, callback: Box<dyn FnOnce()>) {
        let function = Closure::once_into_js(move || callback());
        if self
            .document
            .add_event_listener_with_callback("DOMContentLoaded", function.unchecked_ref())
            .is_err()
        {
            tracing::warn!("could not listen for DOMContentLoaded");
        }
    }

    fn set_root_attribute(&self, name: &str, value: &str) {
        if let Some(root) = self.document.document_element() {
            let _ = root.set_attribute(name, value);
        }
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.document.document_element()?.get_attribute(name)
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        let element = self.document.create_element(tag).ok()?;
        let id = NodeId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.nodes.borrow_mut().insert(id, element);
        Some(id)
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.node(node) {
            let _ = element.set_attribute(name, value);
        }
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) {
        if let Some(element) = self.node(node).and_then(|e| e.dyn_into::<HtmlElement>().ok()) {
            let _ = element.style().set_property(property, value);
        }
    }

    fn set_text(&self, node: NodeId, text: &str) {
        if let Some(element) = self.node(node) {
            element.set_text_content(Some(text));
        }
    }

    fn append_to_body(&self, node: NodeId) {
        if let (Some(body), Some(element)) = (self.document.body(), self.node(node)) {
            let _ = body.append_child(&element);
        }
    }

    fn remove_from_body(&self, node: NodeId) {
        if let Some(element) = self.nodes.borrow_mut().remove(&node) {
            element.remove();
        }
    }

    fn on_click(&self, node: NodeId, handler: Box<dyn Fn()>) {
        let Some(element) = self.node(node) else {
            return;
        };
        let closure = Closure::wrap(handler);
        if element
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .is_err()
        {
            tracing::warn!("could not attach click listener");
        }
        closure.forget();
    }

    fn on_keydown(&self, handler: Box<dyn Fn(&KeyEvent) -> bool>) {
        let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            let key = KeyEvent {
                key: event.key(),
                ctrl: event.ctrl_key(),
                meta: event.meta_key(),
                shift: event.shift_key(),
                alt: event.alt_key(),
            };
            if handler(&key) {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(_)>);
        if self
            .document
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
            .is_err()
        {
            tracing::warn!("could not attach keydown listener");
        }
        closure.forget();
    }
}
