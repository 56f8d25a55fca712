//! The two questions the action asks the user.
//!
//! Both prompts are plain request/response traits so the action can run
//! against a terminal, a GUI dialog or a test double.

use serde::{Deserialize, Serialize};

use crate::transform::AffixMode;

/// Text to apply plus where it goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
    pub text: String,
    pub mode: AffixMode,
}

impl Decoration {
    /// Build a decoration, trimming surrounding whitespace from `text`.
    pub fn new(text: &str, mode: AffixMode) -> Self {
        Self {
            text: text.trim().to_string(),
            mode,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Multi-select over the collected net names.
pub trait SelectionPrompt {
    /// Return the checked names in display order, or nothing on cancel.
    fn choose(&mut self, names: &[String]) -> Vec<String>;
}

/// Text field plus suffix/prefix choice.
pub trait DecorationPrompt {
    /// `None` when the user cancels.
    fn ask(&mut self) -> Option<Decoration>;
}

impl<F> SelectionPrompt for F
where
    F: FnMut(&[String]) -> Vec<String>,
{
    fn choose(&mut self, names: &[String]) -> Vec<String> {
        self(names)
    }
}

impl<F> DecorationPrompt for F
where
    F: FnMut() -> Option<Decoration>,
{
    fn ask(&mut self) -> Option<Decoration> {
        self()
    }
}

/// State behind a checklist dialog with a "select all" box.
#[derive(Debug, Clone)]
pub struct NetChecklist {
    names: Vec<String>,
    checked: Vec<bool>,
    all: bool,
}

impl NetChecklist {
    /// Names are shown sorted ascending regardless of input order.
    pub fn new(names: &[String]) -> Self {
        let mut names = names.to_vec();
        names.sort();
        let checked = vec![false; names.len()];
        Self {
            names,
            checked,
            all: false,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    /// State of the "select all" box.
    pub fn all_selected(&self) -> bool {
        self.all
    }

    /// Flip one item. Out-of-range indices are ignored and return false.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.checked.get_mut(index) {
            Some(flag) => {
                *flag = !*flag;
                true
            }
            None => false,
        }
    }

    /// Check or uncheck every item at once.
    pub fn set_all(&mut self, checked: bool) {
        self.all = checked;
        self.checked.iter_mut().for_each(|flag| *flag = checked);
    }

    pub fn toggle_all(&mut self) {
        self.set_all(!self.all);
    }

    /// Checked names in display order.
    pub fn checked(&self) -> Vec<String> {
        self.names
            .iter()
            .zip(&self.checked)
            .filter(|(_, checked)| **checked)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_checklist_sorts_names() {
        let list = NetChecklist::new(&names(&["VCC", "GND", "CLK"]));
        assert_eq!(list.names(), names(&["CLK", "GND", "VCC"]).as_slice());
        assert!(list.checked().is_empty());
    }

    #[test]
    fn test_checklist_returns_display_order() {
        let mut list = NetChecklist::new(&names(&["VCC", "GND", "CLK"]));
        assert!(list.toggle(2));
        assert!(list.toggle(0));
        assert!(!list.toggle(3));
        assert_eq!(list.checked(), names(&["CLK", "VCC"]));
        list.toggle(2);
        assert_eq!(list.checked(), names(&["CLK"]));
    }

    #[test]
    fn test_checklist_select_all() {
        let mut list = NetChecklist::new(&names(&["B", "A"]));
        list.toggle(0);
        list.set_all(true);
        assert!(list.all_selected());
        assert_eq!(list.checked(), names(&["A", "B"]));
        list.toggle_all();
        assert!(!list.all_selected());
        assert!(list.checked().is_empty());
    }

    #[test]
    fn test_decoration_trims() {
        let decoration = Decoration::new("  NEW \t", AffixMode::Prefix);
        assert_eq!(decoration.text, "NEW");
        assert!(!decoration.is_empty());
        assert!(Decoration::new("   ", AffixMode::Suffix).is_empty());
    }

    #[test]
    fn test_closures_are_prompts() {
        let mut select_first = |names: &[String]| -> Vec<String> { names.iter().take(1).cloned().collect() };
        assert_eq!(select_first.choose(&names(&["A", "B"])), names(&["A"]));

        let mut cancel = || -> Option<Decoration> { None };
        assert_eq!(DecorationPrompt::ask(&mut cancel), None);
    }
}
