//! Headless element tree
//!
//! The motion engine never talks to a real browser. It reads element bounds
//! and writes inline styles through this tree, which a host keeps in sync
//! with its own layout. Tests and the CLI drive it directly.
//!
//! # Example
//!
//! ```rust
//! use soleado_core::document::{Document, NewElement};
//! use soleado_core::geometry::Rect;
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! let section = doc.append(root, NewElement::new().attr("id", "faq"));
//! let item = doc.append(
//!     section,
//!     NewElement::new()
//!         .attr("data-faq", "item")
//!         .bounds(Rect::new(0.0, 1200.0, 640.0, 72.0)),
//! );
//!
//! let found = doc.select(section, "[data-faq='item']").unwrap();
//! assert_eq!(found, vec![item]);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::error::{MotionError, Result};
use crate::geometry::Rect;
use crate::style::StyleProps;

new_key_type! {
    /// Handle to an element in a [`Document`]
    pub struct ElementId;
}

/// Document shared between the scheduler, observers and sections
pub type SharedDocument = Rc<RefCell<Document>>;

/// A single element
#[derive(Clone, Debug, Default)]
pub struct ElementNode {
    attrs: SmallVec<[(String, String); 2]>,
    bounds: Rect,
    content_height: f32,
    inline: StyleProps,
    aria_expanded: Option<bool>,
    label: Option<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl ElementNode {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Height the element takes when its height is `auto`
    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn inline_style(&self) -> &StyleProps {
        &self.inline
    }

    pub fn aria_expanded(&self) -> Option<bool> {
        self.aria_expanded
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

/// Description of an element to append
#[derive(Clone, Debug, Default)]
pub struct NewElement {
    attrs: SmallVec<[(String, String); 2]>,
    bounds: Rect,
    content_height: Option<f32>,
    label: Option<String>,
}

impl NewElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Override the auto height (defaults to the bounds height)
    pub fn content_height(mut self, height: f32) -> Self {
        self.content_height = Some(height);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Attribute selector: `[name='value']`, `[name="value"]`, `[name=value]` or `[name]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    name: String,
    value: Option<String>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || MotionError::InvalidSelector(input.to_string());

        let inner = input
            .trim()
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .ok_or_else(invalid)?;

        let (name, value) = match inner.split_once('=') {
            Some((name, value)) => {
                let value = value.trim();
                let unquoted = value
                    .strip_prefix('\'')
                    .and_then(|v| v.strip_suffix('\''))
                    .or_else(|| value.strip_prefix('"').and_then(|v| v.strip_suffix('"')))
                    .unwrap_or(value);
                if unquoted.contains(['\'', '"']) {
                    return Err(invalid());
                }
                (name.trim(), Some(unquoted.to_string()))
            }
            None => (inner.trim(), None),
        };

        if name.is_empty() || name.contains(|c: char| c.is_whitespace() || c == '[') {
            return Err(invalid());
        }

        Ok(Self {
            name: name.to_string(),
            value,
        })
    }

    pub fn matches(&self, node: &ElementNode) -> bool {
        match (node.attr(&self.name), &self.value) {
            (Some(actual), Some(expected)) => actual == expected,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}

/// The element tree
#[derive(Debug)]
pub struct Document {
    nodes: SlotMap<ElementId, ElementNode>,
    root: ElementId,
}

impl Document {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(ElementNode::default());
        Self { nodes, root }
    }

    /// Wrap in the shared handle used by the engine
    pub fn shared(self) -> SharedDocument {
        Rc::new(RefCell::new(self))
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: ElementId) -> Option<&ElementNode> {
        self.nodes.get(id)
    }

    /// Append a child element to `parent`
    pub fn append(&mut self, parent: ElementId, element: NewElement) -> ElementId {
        let content_height = element
            .content_height
            .unwrap_or_else(|| element.bounds.height());
        let id = self.nodes.insert(ElementNode {
            attrs: element.attrs,
            bounds: element.bounds,
            content_height,
            inline: StyleProps::new(),
            aria_expanded: None,
            label: element.label,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(parent) = self.nodes.get_mut(parent) {
            parent.children.push(id);
        }
        id
    }

    /// Remove an element and its subtree
    pub fn remove(&mut self, id: ElementId) {
        if id == self.root {
            return;
        }
        let subtree = self.descendants(id);
        if let Some(parent) = self.nodes.get(id).and_then(|n| n.parent) {
            if let Some(parent) = self.nodes.get_mut(parent) {
                parent.children.retain(|c| *c != id);
            }
        }
        for node in subtree {
            self.nodes.remove(node);
        }
    }

    pub fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.nodes.get(id).map(|n| n.bounds)
    }

    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.bounds = bounds;
        }
    }

    pub fn content_height(&self, id: ElementId) -> Option<f32> {
        self.nodes.get(id).map(|n| n.content_height)
    }

    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.attr(name))
    }

    pub fn inline_style(&self, id: ElementId) -> Option<StyleProps> {
        self.nodes.get(id).map(|n| n.inline)
    }

    /// Replace the inline style wholesale
    pub fn set_inline_style(&mut self, id: ElementId, style: StyleProps) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.inline = style;
        }
    }

    /// Write the given properties on top of the current inline style
    pub fn apply_style(&mut self, id: ElementId, props: &StyleProps) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.inline.merge(props);
        }
    }

    pub fn aria_expanded(&self, id: ElementId) -> Option<bool> {
        self.nodes.get(id).and_then(|n| n.aria_expanded)
    }

    pub fn set_aria_expanded(&mut self, id: ElementId, expanded: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.aria_expanded = Some(expanded);
        }
    }

    /// Put back an `aria-expanded` value read earlier; `None` removes it
    pub fn restore_aria_expanded(&mut self, id: ElementId, value: Option<bool>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.aria_expanded = value;
        }
    }

    pub fn label(&self, id: ElementId) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.label())
    }

    pub fn set_label(&mut self, id: ElementId, label: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.label = Some(label.into());
        }
    }

    /// Put back a label read earlier; `None` removes it
    pub fn restore_label(&mut self, id: ElementId, label: Option<String>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.label = label;
        }
    }

    /// `root` and all of its descendants in document order
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            out.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Elements under `root` (excluding `root`) that match `selector`
    pub fn select(&self, root: ElementId, selector: &str) -> Result<Vec<ElementId>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(root)
            .into_iter()
            .skip(1)
            .filter(|id| self.nodes.get(*id).is_some_and(|n| selector.matches(n)))
            .collect())
    }

    /// First match of `selector` under `root`
    pub fn select_one(&self, root: ElementId, selector: &str) -> Result<Option<ElementId>> {
        Ok(self.select(root, selector)?.into_iter().next())
    }

    /// Elements under `root` that currently carry any inline style
    pub fn styled_elements(&self, root: ElementId) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| self.nodes.get(*id).is_some_and(|n| !n.inline.is_empty()))
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, ElementId, Vec<ElementId>) {
        let mut doc = Document::new();
        let section = doc.append(doc.root(), NewElement::new().attr("id", "gallery"));
        let cards = (0..3)
            .map(|i| {
                doc.append(
                    section,
                    NewElement::new()
                        .attr("data-gal", "card")
                        .bounds(Rect::new(0.0, 100.0 * i as f32, 200.0, 80.0)),
                )
            })
            .collect();
        (doc, section, cards)
    }

    #[test]
    fn test_select_in_document_order() {
        let (doc, section, cards) = sample();
        assert_eq!(doc.select(section, "[data-gal='card']").unwrap(), cards);
        assert_eq!(doc.select(section, "[data-gal=\"card\"]").unwrap(), cards);
        assert_eq!(doc.select(section, "[data-gal]").unwrap(), cards);
        assert!(doc.select(section, "[data-gal='pill']").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_selectors() {
        let (doc, section, _) = sample();
        for bad in ["data-gal", "[]", "[='x']", "[a='b]", "[a b='c']"] {
            assert!(
                matches!(doc.select(section, bad), Err(MotionError::InvalidSelector(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_inline_style_writes() {
        let (mut doc, section, cards) = sample();
        doc.apply_style(cards[0], &StyleProps::new().opacity(0.0));
        doc.apply_style(cards[0], &StyleProps::new().y(16.0));

        let style = doc.inline_style(cards[0]).unwrap();
        assert_eq!(style.opacity, Some(0.0));
        assert_eq!(style.translate_y, Some(16.0));
        assert_eq!(doc.styled_elements(section), vec![cards[0]]);

        doc.set_inline_style(cards[0], StyleProps::new());
        assert!(doc.styled_elements(section).is_empty());
    }

    #[test]
    fn test_remove_subtree() {
        let (mut doc, section, cards) = sample();
        doc.remove(section);
        assert!(!doc.contains(section));
        assert!(cards.iter().all(|c| !doc.contains(*c)));
        assert!(doc.get(doc.root()).unwrap().children().is_empty());
    }
}
