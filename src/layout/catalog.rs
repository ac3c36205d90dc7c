//! Slide layouts and the catalog that indexes them.

use super::{PlaceholderStack, Role};
use std::fmt;

/// A named placeholder slot on a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    name: String,
    idx: u32,
    role: Option<Role>,
}

impl Placeholder {
    /// Placeholder name as authored in the template.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Slot index used to address the placeholder on a slide.
    #[inline]
    pub fn idx(&self) -> u32 {
        self.idx
    }

    /// Role derived from the name prefix, if any.
    #[inline]
    pub fn role(&self) -> Option<Role> {
        self.role
    }
}

/// A slide layout: an ordinal index and its placeholders in layout order.
///
/// Placeholders are keyed by name. Registering a name twice keeps the first
/// position and replaces the slot index, so a layout never lists one name
/// more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    index: usize,
    name: String,
    placeholders: Vec<Placeholder>,
}

impl Layout {
    /// Create an empty layout. The index is assigned by the catalog.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            index: 0,
            name: name.into(),
            placeholders: Vec::new(),
        }
    }

    /// Builder method: add a placeholder.
    pub fn with_placeholder(mut self, name: impl Into<String>, idx: u32) -> Self {
        self.insert_placeholder(name, idx);
        self
    }

    /// Register a placeholder by name.
    pub fn insert_placeholder(&mut self, name: impl Into<String>, idx: u32) {
        let name = name.into();
        if let Some(existing) = self.placeholders.iter_mut().find(|p| p.name == name) {
            existing.idx = idx;
            return;
        }
        let role = Role::classify(&name);
        self.placeholders.push(Placeholder { name, idx, role });
    }

    /// Position of this layout in its catalog.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Layout name (empty when the template does not name it).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All placeholders, in layout order.
    #[inline]
    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    /// Iterate over the placeholders of one role, in layout order.
    pub fn placeholders_with_role(&self, role: Role) -> impl Iterator<Item = &Placeholder> + '_ {
        self.placeholders
            .iter()
            .filter(move |p| p.role == Some(role))
    }

    /// Number of placeholders of a role.
    pub fn count(&self, role: Role) -> usize {
        self.placeholders_with_role(role).count()
    }

    /// Whether the layout has a placeholder with this slot index.
    pub fn has_slot(&self, idx: u32) -> bool {
        self.placeholders.iter().any(|p| p.idx == idx)
    }

    /// Slot indices of a role, ready to be consumed while filling a slide.
    pub fn placeholder_stack(&self, role: Role) -> PlaceholderStack {
        let mut stack = PlaceholderStack::new(role);
        for placeholder in self.placeholders_with_role(role) {
            stack.push(placeholder.idx);
        }
        stack
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.placeholders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.placeholders.is_empty()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            writeln!(f, "Layout {} placeholders:", self.index)?;
        } else {
            writeln!(f, "Layout {} ({}) placeholders:", self.index, self.name)?;
        }
        writeln!(f, "----------------------------------------")?;
        for placeholder in &self.placeholders {
            writeln!(f, "{} ({})", placeholder.name, placeholder.idx)?;
        }
        write!(f, "----------------------------------------")
    }
}

/// Read-only index of the layouts a presentation offers, in template order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutCatalog {
    layouts: Vec<Layout>,
}

impl LayoutCatalog {
    /// Build a catalog, numbering the layouts by position.
    pub fn new(layouts: Vec<Layout>) -> Self {
        let layouts = layouts
            .into_iter()
            .enumerate()
            .map(|(index, mut layout)| {
                layout.index = index;
                layout
            })
            .collect();
        Self { layouts }
    }

    /// Get a layout by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Layout> {
        self.layouts.get(index)
    }

    /// Iterate over the layouts in ascending index order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Layout> {
        self.layouts.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Human-readable listing of every layout and its placeholders.
    pub fn summary(&self) -> String {
        self.layouts
            .iter()
            .map(|layout| layout.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<'a> IntoIterator for &'a LayoutCatalog {
    type Item = &'a Layout;
    type IntoIter = std::slice::Iter<'a, Layout>;

    fn into_iter(self) -> Self::IntoIter {
        self.layouts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_picture_layout() -> Layout {
        Layout::new("Two Pictures")
            .with_placeholder("Title 1", 0)
            .with_placeholder("Pic Left", 13)
            .with_placeholder("Pic Right", 14)
            .with_placeholder("Logo", 20)
    }

    #[test]
    fn test_counts_by_role() {
        let layout = two_picture_layout();
        assert_eq!(layout.count(Role::Title), 1);
        assert_eq!(layout.count(Role::Picture), 2);
        assert_eq!(layout.count(Role::Main), 0);
        assert_eq!(layout.len(), 4);
        assert_eq!(layout.placeholders()[3].role(), None);
        assert!(layout.has_slot(20));
        assert!(!layout.has_slot(21));
    }

    #[test]
    fn test_duplicate_name_overwrites_slot() {
        let layout = Layout::new("dup")
            .with_placeholder("Main Text", 1)
            .with_placeholder("Footer", 2)
            .with_placeholder("Main Text", 7);
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.placeholders()[0].name(), "Main Text");
        assert_eq!(layout.placeholders()[0].idx(), 7);
    }

    #[test]
    fn test_stack_follows_layout_order() {
        let mut stack = two_picture_layout().placeholder_stack(Role::Picture);
        assert_eq!(stack.take_next(), Some(14));
        assert_eq!(stack.take_next(), Some(13));
        assert_eq!(stack.take_next(), None);
    }

    #[test]
    fn test_catalog_indices_and_summary() {
        let catalog = LayoutCatalog::new(vec![
            Layout::new("Title Only").with_placeholder("Title 1", 0),
            two_picture_layout(),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).map(Layout::index), Some(1));
        assert!(catalog.get(2).is_none());

        let summary = catalog.summary();
        assert!(summary.contains("Layout 0 (Title Only) placeholders:"));
        assert!(summary.contains("Pic Right (14)"));
        assert_eq!(catalog.iter().count(), 2);
    }
}
