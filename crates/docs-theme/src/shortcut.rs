//! The toggle keyboard shortcut.

use crate::platform::KeyEvent;

/// Ctrl or Cmd, plus Shift, plus a letter.
///
/// The letter is compared case-insensitively since Shift uppercases it on
/// most layouts but not under Caps Lock. Alt is not inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    key: char,
}

impl Shortcut {
    pub fn new(key: char) -> Self {
        Self { key }
    }

    pub fn key(&self) -> char {
        self.key
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        if !(event.ctrl || event.meta) || !event.shift {
            return false;
        }
        let mut chars = event.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.eq_ignore_ascii_case(&self.key),
            _ => false,
        }
    }
}

impl Default for Shortcut {
    fn default() -> Self {
        Self::new('D')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_or_meta_with_shift() {
        let shortcut = Shortcut::default();
        assert!(shortcut.matches(&KeyEvent::new("D").ctrl().shift()));
        assert!(shortcut.matches(&KeyEvent::new("D").meta().shift()));
        assert!(shortcut.matches(&KeyEvent::new("d").ctrl().shift()));
    }

    #[test]
    fn test_requires_shift_and_a_command_modifier() {
        let shortcut = Shortcut::default();
        assert!(!shortcut.matches(&KeyEvent::new("D").ctrl()));
        assert!(!shortcut.matches(&KeyEvent::new("D").shift()));
        assert!(!shortcut.matches(&KeyEvent::new("D")));
    }

    #[test]
    fn test_other_keys_do_not_match() {
        let shortcut = Shortcut::default();
        assert!(!shortcut.matches(&KeyEvent::new("E").ctrl().shift()));
        assert!(!shortcut.matches(&KeyEvent::new("Delete").ctrl().shift()));
    }

    #[test]
    fn test_custom_key() {
        let shortcut = Shortcut::new('L');
        assert!(shortcut.matches(&KeyEvent::new("L").meta().shift()));
        assert!(!shortcut.matches(&KeyEvent::new("D").meta().shift()));
    }
}
