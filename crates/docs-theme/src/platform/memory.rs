//! In-memory capability implementations.
//!
//! These back the test suite and headless hosts such as the CLI. Each fake
//! also exposes the host side of the contract: firing DOM-ready, clicking,
//! pressing keys, changing the OS preference and advancing time.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::Duration;

use super::{ColorSchemeSource, KeyEvent, NodeId, Page, PreferenceStore, Timer};
use crate::error::StorageError;

/// A `localStorage`-like map that can be told to fail.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
    failing: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Makes every subsequent read and write fail, as a blocked storage would.
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn entries(&self) -> BTreeMap<String, String> {
        self.entries.borrow().clone()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.get() {
            Err(StorageError::Unavailable("storage is disabled".into()))
        } else {
            Ok(())
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// An OS preference that tests flip by hand.
pub struct MemoryColorScheme {
    prefers_dark: Cell<Option<bool>>,
    observable: bool,
    listeners: RefCell<Vec<Rc<dyn Fn(bool)>>>,
}

impl MemoryColorScheme {
    /// A readable, observable preference.
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            prefers_dark: Cell::new(Some(prefers_dark)),
            observable: true,
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// A preference that can be read but not subscribed to.
    pub fn fixed(prefers_dark: Option<bool>) -> Self {
        Self {
            prefers_dark: Cell::new(prefers_dark),
            observable: false,
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Changes the preference and notifies subscribers.
    pub fn change(&self, prefers_dark: bool) {
        self.prefers_dark.set(Some(prefers_dark));
        let listeners: Vec<_> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(prefers_dark);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl ColorSchemeSource for MemoryColorScheme {
    fn prefers_dark(&self) -> Option<bool> {
        self.prefers_dark.get()
    }

    fn subscribe(&self, listener: Box<dyn Fn(bool)>) -> bool {
        if !self.observable {
            return false;
        }
        self.listeners.borrow_mut().push(Rc::from(listener));
        true
    }
}

/// A timer driven by [`advance`](ManualTimer::advance) instead of the clock.
#[derive(Default)]
pub struct ManualTimer {
    now: Cell<Duration>,
    seq: Cell<u64>,
    pending: RefCell<Vec<(Duration, u64, Box<dyn FnOnce()>)>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Moves time forward, running due callbacks in deadline order.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        loop {
            let next = {
                let mut pending = self.pending.borrow_mut();
                let due = pending
                    .iter()
                    .enumerate()
                    .filter(|(_, (at, _, _))| *at <= target)
                    .min_by_key(|(_, (at, seq, _))| (*at, *seq))
                    .map(|(index, _)| index);
                due.map(|index| pending.remove(index))
            };
            match next {
                Some((at, _, callback)) => {
                    self.now.set(at);
                    callback();
                }
                None => break,
            }
        }
        self.now.set(target);
    }
}

impl Timer for ManualTimer {
    fn once(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.pending
            .borrow_mut()
            .push((self.now.get() + delay, seq, callback));
    }
}

/// Snapshot of an element in a [`MemoryPage`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryElement {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub style: BTreeMap<String, String>,
    pub text: String,
}

impl MemoryElement {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[derive(Default)]
struct PageInner {
    loading: bool,
    ready_callbacks: Vec<Box<dyn FnOnce()>>,
    root_attributes: BTreeMap<String, String>,
    next_id: u64,
    elements: HashMap<NodeId, MemoryElement>,
    body: Vec<NodeId>,
    click_handlers: HashMap<NodeId, Vec<Rc<dyn Fn()>>>,
    keydown_handlers: Vec<Rc<dyn Fn(&KeyEvent) -> bool>>,
}

/// A document model with just enough DOM for the controller.
#[derive(Default)]
pub struct MemoryPage {
    inner: RefCell<PageInner>,
}

impl MemoryPage {
    /// A page whose DOM is already ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// A page still parsing; call [`finish_loading`](Self::finish_loading) to fire ready.
    pub fn loading() -> Self {
        let page = Self::default();
        page.inner.borrow_mut().loading = true;
        page
    }

    /// Marks the document ready and runs the queued ready callbacks.
    pub fn finish_loading(&self) {
        let callbacks = {
            let mut inner = self.inner.borrow_mut();
            inner.loading = false;
            std::mem::take(&mut inner.ready_callbacks)
        };
        for callback in callbacks {
            callback();
        }
    }

    /// Dispatches a click on `node`.
    pub fn click(&self, node: NodeId) {
        let handlers = self
            .inner
            .borrow()
            .click_handlers
            .get(&node)
            .cloned()
            .unwrap_or_default();
        for handler in handlers {
            handler();
        }
    }

    /// Dispatches a page-wide keydown; returns whether the default was prevented.
    pub fn press(&self, event: &KeyEvent) -> bool {
        let handlers = self.inner.borrow().keydown_handlers.clone();
        let mut prevented = false;
        for handler in handlers {
            prevented |= handler(event);
        }
        prevented
    }

    pub fn element(&self, node: NodeId) -> Option<MemoryElement> {
        self.inner.borrow().elements.get(&node).cloned()
    }

    /// Direct children of the body, in insertion order.
    pub fn body_children(&self) -> Vec<NodeId> {
        self.inner.borrow().body.clone()
    }

    /// Body children carrying `name="value"`.
    pub fn find_in_body(&self, name: &str, value: &str) -> Vec<NodeId> {
        let inner = self.inner.borrow();
        inner
            .body
            .iter()
            .copied()
            .filter(|id| {
                inner
                    .elements
                    .get(id)
                    .and_then(|element| element.attribute(name))
                    == Some(value)
            })
            .collect()
    }

    pub fn keydown_listener_count(&self) -> usize {
        self.inner.borrow().keydown_handlers.len()
    }
}

impl Page for MemoryPage {
    fn is_loading(&self) -> bool {
        self.inner.borrow().loading
    }

    fn on_ready(&self, callback: Box<dyn FnOnce()>) {
        if self.is_loading() {
            self.inner.borrow_mut().ready_callbacks.push(callback);
        } else {
            callback();
        }
    }

    fn set_root_attribute(&self, name: &str, value: &str) {
        self.inner
            .borrow_mut()
            .root_attributes
            .insert(name.to_string(), value.to_string());
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.inner.borrow().root_attributes.get(name).cloned()
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        let mut inner = self.inner.borrow_mut();
        let id = NodeId(inner.next_id);
        inner.next_id += 1;
        inner.elements.insert(
            id,
            MemoryElement {
                tag: tag.to_string(),
                ..MemoryElement::default()
            },
        );
        Some(id)
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.inner.borrow_mut().elements.get_mut(&node) {
            element
                .attributes
                .insert(name.to_string(), value.to_string());
        }
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) {
        if let Some(element) = self.inner.borrow_mut().elements.get_mut(&node) {
            element
                .style
                .insert(property.to_string(), value.to_string());
        }
    }

    fn set_text(&self, node: NodeId, text: &str) {
        if let Some(element) = self.inner.borrow_mut().elements.get_mut(&node) {
            element.text = text.to_string();
        }
    }

    fn append_to_body(&self, node: NodeId) {
        let mut inner = self.inner.borrow_mut();
        if inner.elements.contains_key(&node) && !inner.body.contains(&node) {
            inner.body.push(node);
        }
    }

    fn remove_from_body(&self, node: NodeId) {
        let mut inner = self.inner.borrow_mut();
        inner.body.retain(|id| *id != node);
        inner.elements.remove(&node);
        inner.click_handlers.remove(&node);
    }

    fn on_click(&self, node: NodeId, handler: Box<dyn Fn()>) {
        self.inner
            .borrow_mut()
            .click_handlers
            .entry(node)
            .or_default()
            .push(Rc::from(handler));
    }

    fn on_keydown(&self, handler: Box<dyn Fn(&KeyEvent) -> bool>) {
        self.inner
            .borrow_mut()
            .keydown_handlers
            .push(Rc::from(handler));
    }
}
