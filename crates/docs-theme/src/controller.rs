//! The theme toggle controller.

use std::cell::Cell;
use std::rc::Rc;

use crate::announce::announce;
use crate::config::ThemeConfig;
use crate::error::Error;
use crate::messages::Messages;
use crate::platform::{Capabilities, ColorSchemeSource, KeyEvent, NodeId, Page, PreferenceStore, Timer};
use crate::shortcut::Shortcut;
use crate::state::ThemeState;
use crate::theme::{resolve_initial_theme, Theme, ThemeSource};

/// Value written under the manual-override key.
const MANUAL_MARKER: &str = "true";

struct Inner {
    config: ThemeConfig,
    messages: Messages,
    shortcut: Shortcut,
    page: Rc<dyn Page>,
    timer: Rc<dyn Timer>,
    store: Option<Rc<dyn PreferenceStore>>,
    color_scheme: Option<Rc<dyn ColorSchemeSource>>,
    state: ThemeState,
    source: ThemeSource,
    button: Cell<Option<NodeId>>,
    mounted: Cell<bool>,
}

/// Applies, toggles, persists and announces the page theme.
///
/// [`install`](ThemeController::install) resolves the initial theme and writes
/// it to the document root right away, then mounts the toggle button once the
/// page is ready. After that the controller is driven by events: button
/// clicks, the Ctrl/Cmd+Shift+D shortcut and OS preference changes.
///
/// Handles are cheap clones of one shared controller. Listeners registered on
/// the page hold a handle for the life of the page.
///
/// # Example
///
/// ```rust
/// use docs_theme::platform::memory::{ManualTimer, MemoryColorScheme, MemoryPage, MemoryStore};
/// use docs_theme::platform::Page;
/// use docs_theme::{Capabilities, Theme, ThemeConfig, ThemeController};
/// use std::rc::Rc;
///
/// let page = Rc::new(MemoryPage::new());
/// let store = Rc::new(MemoryStore::new());
/// let caps = Capabilities::new(page.clone(), Rc::new(ManualTimer::new()))
///     .with_store(store.clone())
///     .with_color_scheme(Rc::new(MemoryColorScheme::new(false)));
///
/// let controller = ThemeController::install(ThemeConfig::default(), caps).unwrap();
/// assert_eq!(page.root_attribute("data-theme").as_deref(), Some("light"));
///
/// page.click(controller.button().unwrap());
/// assert_eq!(controller.theme(), Theme::Dark);
/// assert_eq!(store.entries().get("theme").map(String::as_str), Some("dark"));
/// ```
#[derive(Clone)]
pub struct ThemeController {
    inner: Rc<Inner>,
}

impl ThemeController {
    /// Applies the initial theme and schedules the toggle button for DOM ready.
    ///
    /// # Errors
    ///
    /// Returns an error only if the configured message templates do not compile.
    /// Missing or failing storage and OS preference never fail installation.
    pub fn install(config: ThemeConfig, capabilities: Capabilities) -> Result<Self, Error> {
        let messages = Messages::from_config(&config)?;
        let Capabilities {
            page,
            timer,
            store,
            color_scheme,
        } = capabilities;

        let stored = store
            .as_deref()
            .and_then(|store| read_stored_theme(store, &config.storage_key));
        let prefers_dark = color_scheme.as_deref().and_then(|scheme| scheme.prefers_dark());
        let (initial, source) = resolve_initial_theme(stored, prefers_dark);

        let state = ThemeState::new(initial);
        {
            let page = Rc::clone(&page);
            let attribute = config.attribute.clone();
            state.subscribe(move |theme| page.set_root_attribute(&attribute, theme.as_str()));
        }
        page.set_root_attribute(&config.attribute, initial.as_str());
        tracing::debug!(theme = %initial, source = source.as_str(), "applied initial theme");

        let controller = Self {
            inner: Rc::new(Inner {
                shortcut: Shortcut::new(config.shortcut_key),
                config,
                messages,
                page,
                timer,
                store,
                color_scheme,
                state,
                source,
                button: Cell::new(None),
                mounted: Cell::new(false),
            }),
        };

        if controller.inner.page.is_loading() {
            let handle = controller.clone();
            controller
                .inner
                .page
                .on_ready(Box::new(move || handle.mount()));
        } else {
            controller.mount();
        }
        Ok(controller)
    }

    /// The active theme.
    pub fn theme(&self) -> Theme {
        self.inner.state.get()
    }

    /// The shared theme state, for collaborators that render from it.
    pub fn state(&self) -> &ThemeState {
        &self.inner.state
    }

    /// Which input decided the initial theme.
    pub fn source(&self) -> ThemeSource {
        self.inner.source
    }

    /// The toggle button, once the page is ready.
    pub fn button(&self) -> Option<NodeId> {
        self.inner.button.get()
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.inner.config
    }

    /// Whether the manual-override marker is persisted.
    pub fn is_manual(&self) -> bool {
        let Some(store) = self.inner.store.as_deref() else {
            return false;
        };
        match store.get(&self.inner.config.manual_key) {
            Ok(marker) => marker.is_some_and(|value| !value.is_empty()),
            Err(err) => {
                tracing::warn!(error = %err, "could not read manual theme marker");
                false
            }
        }
    }

    /// Switches to the opposite theme, as a button click does.
    ///
    /// Persists the new theme together with the manual-override marker,
    /// refreshes the button label and announces the change. Returns the new
    /// theme.
    pub fn toggle(&self) -> Theme {
        let next = self.theme().opposite();
        self.inner.state.set(next);
        self.persist(next);
        self.refresh_label(next);

        let text = self.inner.messages.announcement(next);
        let delay = self.inner.config.announcement_delay();
        if announce(&self.inner.page, &*self.inner.timer, &text, delay).is_none() {
            tracing::warn!("page refused to create the announcement region");
        }
        tracing::debug!(theme = %next, "theme toggled");
        next
    }

    /// Follows an OS preference change unless the user chose a theme manually.
    ///
    /// Returns whether the change was applied.
    pub fn handle_system_change(&self, prefers_dark: bool) -> bool {
        if self.is_manual() {
            tracing::debug!(prefers_dark, "ignoring OS theme change after manual choice");
            return false;
        }
        let theme = Theme::from_prefers_dark(prefers_dark);
        self.inner.state.set(theme);
        self.refresh_label(theme);
        tracing::debug!(theme = %theme, "followed OS theme change");
        true
    }

    /// Handles a page-wide keydown. Returns `true` when the shortcut matched,
    /// meaning the theme was toggled and the default action must be prevented.
    pub fn handle_keydown(&self, event: &KeyEvent) -> bool {
        if !self.inner.shortcut.matches(event) {
            return false;
        }
        self.toggle();
        true
    }

    fn mount(&self) {
        if self.inner.mounted.replace(true) {
            return;
        }
        let page = &self.inner.page;

        match page.create_element("button") {
            Some(button) => {
                page.set_attribute(button, "class", &self.inner.config.button_class);
                self.inner.button.set(Some(button));
                self.refresh_label(self.theme());

                let handle = self.clone();
                page.on_click(
                    button,
                    Box::new(move || {
                        handle.toggle();
                    }),
                );
                page.append_to_body(button);
            }
            None => tracing::warn!("page refused to create the theme toggle button"),
        }

        if let Some(scheme) = self.inner.color_scheme.as_deref() {
            let handle = self.clone();
            let subscribed = scheme.subscribe(Box::new(move |prefers_dark| {
                handle.handle_system_change(prefers_dark);
            }));
            if !subscribed {
                tracing::debug!("OS theme changes cannot be observed on this platform");
            }
        }

        let handle = self.clone();
        page.on_keydown(Box::new(move |event: &KeyEvent| handle.handle_keydown(event)));
    }

    fn persist(&self, theme: Theme) {
        let Some(store) = self.inner.store.as_deref() else {
            return;
        };
        let config = &self.inner.config;
        let result = store
            .set(&config.storage_key, theme.as_str())
            .and_then(|()| store.set(&config.manual_key, MANUAL_MARKER));
        if let Err(err) = result {
            tracing::warn!(error = %err, "could not persist theme preference");
        }
    }

    fn refresh_label(&self, current: Theme) {
        let Some(button) = self.inner.button.get() else {
            return;
        };
        let label = self.inner.messages.toggle_label(current);
        self.inner.page.set_attribute(button, "aria-label", &label);
        self.inner.page.set_attribute(button, "title", &label);
    }
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeController")
            .field("theme", &self.theme())
            .field("source", &self.inner.source)
            .field("button", &self.inner.button.get())
            .finish_non_exhaustive()
    }
}

fn read_stored_theme(store: &dyn PreferenceStore, key: &str) -> Option<Theme> {
    match store.get(key) {
        Ok(Some(value)) => match value.parse() {
            Ok(theme) => Some(theme),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring stored theme");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            tracing::warn!(error = %err, "could not read stored theme");
            None
        }
    }
}
