//! Button label and announcement text, rendered with minijinja.

mod filters;
mod renderer;

pub use renderer::Messages;
