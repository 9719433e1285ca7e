//! The observable page-wide theme.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::theme::Theme;

type Observer = Box<dyn Fn(Theme)>;

struct Inner {
    current: Cell<Theme>,
    observers: RefCell<Vec<Observer>>,
}

/// Holder of the active theme, shared by the controller and rendering collaborators.
///
/// Clones share the same value. Every [`set`](ThemeState::set) notifies all
/// observers in subscription order, even when the value is unchanged, so
/// collaborators such as the document root attribute are always rewritten.
///
/// # Example
///
/// ```rust
/// use docs_theme::{Theme, ThemeState};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let state = ThemeState::new(Theme::Light);
/// let seen = Rc::new(Cell::new(None));
/// let sink = seen.clone();
/// state.subscribe(move |theme| sink.set(Some(theme)));
///
/// state.set(Theme::Dark);
/// assert_eq!(seen.get(), Some(Theme::Dark));
/// ```
#[derive(Clone)]
pub struct ThemeState {
    inner: Rc<Inner>,
}

impl ThemeState {
    pub fn new(initial: Theme) -> Self {
        Self {
            inner: Rc::new(Inner {
                current: Cell::new(initial),
                observers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn get(&self) -> Theme {
        self.inner.current.get()
    }

    /// Replaces the active theme and notifies observers.
    ///
    /// Observers must not subscribe new observers from inside the callback.
    pub fn set(&self, theme: Theme) {
        self.inner.current.set(theme);
        for observer in self.inner.observers.borrow().iter() {
            observer(theme);
        }
    }

    /// Registers an observer called on every subsequent `set`.
    pub fn subscribe(&self, observer: impl Fn(Theme) + 'static) {
        self.inner.observers.borrow_mut().push(Box::new(observer));
    }
}

impl std::fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeState")
            .field("current", &self.get())
            .field("observers", &self.inner.observers.borrow().len())
            .finish()
    }
}
