//! Screen reader announcements through a temporary live region.

use std::rc::Rc;
use std::time::Duration;

use crate::platform::{NodeId, Page, Timer};

/// Inline styles that hide the region visually but keep it readable.
const VISUALLY_HIDDEN: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("left", "-10000px"),
    ("width", "1px"),
    ("height", "1px"),
    ("overflow", "hidden"),
];

/// Inserts a polite, atomic live region holding `text` and removes it after `linger`.
///
/// Returns the region's node, or `None` if the page refused to create it.
pub(crate) fn announce(
    page: &Rc<dyn Page>,
    timer: &dyn Timer,
    text: &str,
    linger: Duration,
) -> Option<NodeId> {
    let node = page.create_element("div")?;
    page.set_attribute(node, "aria-live", "polite");
    page.set_attribute(node, "aria-atomic", "true");
    for (property, value) in VISUALLY_HIDDEN {
        page.set_style(node, property, value);
    }
    page.set_text(node, text);
    page.append_to_body(node);

    let page = Rc::clone(page);
    timer.once(linger, Box::new(move || page.remove_from_body(node)));
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::memory::{ManualTimer, MemoryPage};

    #[test]
    fn test_announcement_is_hidden_live_region() {
        let memory = Rc::new(MemoryPage::new());
        let page: Rc<dyn Page> = memory.clone();
        let timer = ManualTimer::new();

        let node = announce(&page, &timer, "Switched to dark mode", Duration::from_secs(1)).unwrap();
        let element = memory.element(node).unwrap();

        assert_eq!(element.tag, "div");
        assert_eq!(element.attribute("aria-live"), Some("polite"));
        assert_eq!(element.attribute("aria-atomic"), Some("true"));
        assert_eq!(element.text, "Switched to dark mode");
        assert_eq!(element.style.get("left").map(String::as_str), Some("-10000px"));
        assert_eq!(element.style.get("overflow").map(String::as_str), Some("hidden"));
        assert_eq!(memory.body_children(), vec![node]);
    }

    #[test]
    fn test_announcement_removed_after_linger() {
        let memory = Rc::new(MemoryPage::new());
        let page: Rc<dyn Page> = memory.clone();
        let timer = ManualTimer::new();

        announce(&page, &timer, "hi", Duration::from_secs(1));

        timer.advance(Duration::from_millis(999));
        assert_eq!(memory.body_children().len(), 1);

        timer.advance(Duration::from_millis(1));
        assert!(memory.body_children().is_empty());
    }
}
