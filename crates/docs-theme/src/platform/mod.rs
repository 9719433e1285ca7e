//! Host capabilities the controller is written against.
//!
//! The controller never touches a browser API directly. Hosts hand it a
//! [`Capabilities`] bundle:
//!
//! - [`Page`]: a DOM-like handle (root attribute, elements, listeners)
//! - [`Timer`]: one-shot delayed callbacks
//! - [`PreferenceStore`]: durable key/value storage, optional
//! - [`ColorSchemeSource`]: the OS "prefers dark" signal, optional
//!
//! Backends:
//!
//! - [`memory`]: deterministic in-process fakes with event dispatch helpers
//! - [`native`]: JSON file storage and OS detection for desktop hosts
//! - `web` (wasm32 only): `localStorage`, `matchMedia` and the real DOM
//!
//! All handles take `&self` and use interior mutability, like browser object
//! handles. Everything is single-threaded; callbacks never run concurrently.

use std::rc::Rc;
use std::time::Duration;

use crate::error::StorageError;

pub mod memory;
pub mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;

/// Identifies an element created through [`Page::create_element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// The parts of a keydown event the controller looks at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyEvent {
    /// The `KeyboardEvent.key` value, e.g. `"D"`.
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }
}

/// Durable client-side key/value storage.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// The OS-level "prefers dark color scheme" signal.
pub trait ColorSchemeSource {
    /// Current preference, or `None` when the signal cannot be read.
    fn prefers_dark(&self) -> Option<bool>;

    /// Registers a listener for preference changes.
    ///
    /// Returns `false` when the platform cannot observe changes; the listener
    /// is then dropped.
    fn subscribe(&self, listener: Box<dyn Fn(bool)>) -> bool;
}

/// One-shot delayed callbacks.
pub trait Timer {
    fn once(&self, delay: Duration, callback: Box<dyn FnOnce()>);
}

/// A DOM-like document handle.
pub trait Page {
    /// Whether the document is still parsing; ready callbacks are pending.
    fn is_loading(&self) -> bool;

    /// Runs `callback` once the document has finished loading.
    fn on_ready(&self, callback: Box<dyn FnOnce()>);

    fn set_root_attribute(&self, name: &str, value: &str);
    fn root_attribute(&self, name: &str) -> Option<String>;

    /// Creates a detached element; `None` if the host refused.
    fn create_element(&self, tag: &str) -> Option<NodeId>;
    fn set_attribute(&self, node: NodeId, name: &str, value: &str);
    fn set_style(&self, node: NodeId, property: &str, value: &str);
    fn set_text(&self, node: NodeId, text: &str);

    fn append_to_body(&self, node: NodeId);
    /// Detaches `node` from the body; the id is invalid afterwards.
    fn remove_from_body(&self, node: NodeId);

    fn on_click(&self, node: NodeId, handler: Box<dyn Fn()>);
    /// Registers a page-wide keydown listener. The handler returns `true`
    /// when the event's default action must be prevented.
    fn on_keydown(&self, handler: Box<dyn Fn(&KeyEvent) -> bool>);
}

/// Everything a [`ThemeController`](crate::ThemeController) needs from its host.
#[derive(Clone)]
pub struct Capabilities {
    pub page: Rc<dyn Page>,
    pub timer: Rc<dyn Timer>,
    pub store: Option<Rc<dyn PreferenceStore>>,
    pub color_scheme: Option<Rc<dyn ColorSchemeSource>>,
}

impl Capabilities {
    /// Capabilities without storage or OS preference.
    pub fn new(page: Rc<dyn Page>, timer: Rc<dyn Timer>) -> Self {
        Self {
            page,
            timer,
            store: None,
            color_scheme: None,
        }
    }

    pub fn with_store(mut self, store: Rc<dyn PreferenceStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_color_scheme(mut self, color_scheme: Rc<dyn ColorSchemeSource>) -> Self {
        self.color_scheme = Some(color_scheme);
        self
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("store", &self.store.is_some())
            .field("color_scheme", &self.color_scheme.is_some())
            .finish_non_exhaustive()
    }
}
