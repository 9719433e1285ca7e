//! # docs-theme - Dark/light mode toggle for documentation sites
//!
//! `docs-theme` applies the reader's preferred theme to a documentation page
//! as early as possible, injects a toggle button, remembers the choice and
//! follows the operating system's color scheme until the reader picks one
//! explicitly.
//!
//! ## Behavior
//!
//! - **Early apply**: the stored theme (or the OS preference, or light) is
//!   written to the `data-theme` root attribute before the DOM is ready
//! - **Toggle button**: a `theme-toggle` button whose label names the action
//!   it performs ("Switch to light mode" while dark)
//! - **Persistence**: each toggle stores `theme` and the `theme-manual` marker
//! - **OS sync**: preference changes are followed while no manual marker exists
//! - **Shortcut**: Ctrl/Cmd+Shift+D toggles from anywhere on the page
//! - **Announcements**: a polite live region reads "Switched to dark mode"
//!   and is removed after a second
//!
//! ## Capabilities
//!
//! The [`ThemeController`] never calls browser APIs itself. It is handed a
//! [`Capabilities`] bundle of trait objects ([`Page`], [`Timer`],
//! [`PreferenceStore`], [`ColorSchemeSource`]); storage and the OS signal are
//! optional. Backends live in [`platform`]: in-memory fakes, a native JSON
//! file store with OS detection, and (on wasm32) the real DOM.
//!
//! ## Quick Start
//!
//! ```rust
//! use docs_theme::platform::memory::{ManualTimer, MemoryColorScheme, MemoryPage};
//! use docs_theme::platform::{KeyEvent, Page};
//! use docs_theme::{Capabilities, Theme, ThemeConfig, ThemeController};
//! use std::rc::Rc;
//!
//! let page = Rc::new(MemoryPage::loading());
//! let caps = Capabilities::new(page.clone(), Rc::new(ManualTimer::new()))
//!     .with_color_scheme(Rc::new(MemoryColorScheme::new(true)));
//!
//! let controller = ThemeController::install(ThemeConfig::default(), caps).unwrap();
//! // Applied before the document is ready
//! assert_eq!(page.root_attribute("data-theme").as_deref(), Some("dark"));
//!
//! page.finish_loading();
//! assert!(page.press(&KeyEvent::new("D").ctrl().shift()));
//! assert_eq!(controller.theme(), Theme::Light);
//! ```
//!
//! ## Logging
//!
//! Transitions are logged at `debug` and degraded capabilities (blocked
//! storage, unreadable preference files) at `warn` through `tracing`. Install
//! a subscriber in the host to see them.

mod announce;
pub mod config;
mod controller;
mod error;
pub mod messages;
pub mod platform;
mod shortcut;
mod state;
pub mod theme;

pub use config::ThemeConfig;
pub use controller::ThemeController;
pub use error::{Error, StorageError, ThemeParseError};
pub use messages::Messages;
pub use platform::{Capabilities, ColorSchemeSource, KeyEvent, NodeId, Page, PreferenceStore, Timer};
pub use shortcut::Shortcut;
pub use state::ThemeState;
pub use theme::{
    detect_system_theme, reset_theme_detector, resolve_initial_theme, set_theme_detector, Theme,
    ThemeSource,
};
