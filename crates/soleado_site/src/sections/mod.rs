//! Per-section animation wiring
//!
//! Each section mounts inside its own scope. Under reduced motion the
//! sections register nothing and leave elements in their final style; the
//! FAQ still works, flipping panels instantly.

pub mod enquiry;
pub mod faq;
pub mod gallery;
pub mod hero;
pub mod packages;
pub mod trust;

use soleado_core::{ElementId, Result};
use soleado_motion::{DisclosureGroup, RevealOptions, Scope};

use crate::page::SectionKind;

/// Wire up `kind` inside `scope`; the FAQ hands back its disclosure group
pub fn mount(kind: SectionKind, scope: &Scope) -> Result<Option<DisclosureGroup>> {
    match kind {
        SectionKind::Hero => hero::mount(scope).map(|()| None),
        SectionKind::Gallery => gallery::mount(scope).map(|()| None),
        SectionKind::Packages => packages::mount(scope).map(|()| None),
        SectionKind::Trust => trust::mount(scope).map(|()| None),
        SectionKind::Faq => faq::mount(scope).map(Some),
        SectionKind::Enquiry => enquiry::mount(scope).map(|()| None),
    }
}

/// Matches of `selector` under `parent`
pub(crate) fn children(scope: &Scope, parent: ElementId, selector: &str) -> Result<Vec<ElementId>> {
    scope.document().borrow().select(parent, selector)
}

/// Put every match of `selector` in the scope into `options.from`
///
/// Nested groups revealed by their parent's trigger start hidden this way.
pub(crate) fn hide_all(scope: &Scope, selector: &str, options: &RevealOptions) -> Result<()> {
    let elements = scope.select(selector)?;
    scope.set(&elements, &options.from)
}

/// Animate the matches of `selector` under `parent` to `options.to`
pub(crate) fn reveal_children(
    scope: &Scope,
    parent: ElementId,
    selector: &str,
    options: &RevealOptions,
) -> Result<()> {
    let items = children(scope, parent, selector)?;
    if !items.is_empty() {
        scope.to(&items, options.to, options.tween)?;
    }
    Ok(())
}
