//! Page layout
//!
//! Builds the headless document for the one-page site: six sections stacked
//! top to bottom at a fixed desktop width. Geometry is static; animations only
//! ever touch inline styles, never bounds.

use soleado_core::{Document, ElementId, NewElement, Rect};

use crate::content::{
    ADD_ONS, BOOKING_STEPS, ENQUIRY_CTAS, ENQUIRY_FIELDS, FAQS, GALLERY, HERO_INTRO, HERO_TITLE,
    INCLUDED, PACKAGES,
};
use crate::locations::{kicker, Location};

pub const PAGE_WIDTH: f32 = 1200.0;

const GUTTER: f32 = 24.0;

/// Page sections in document order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Hero,
    Gallery,
    Packages,
    Trust,
    Faq,
    Enquiry,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Hero,
        SectionKind::Gallery,
        SectionKind::Packages,
        SectionKind::Trust,
        SectionKind::Faq,
        SectionKind::Enquiry,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::Gallery => "gallery",
            SectionKind::Packages => "packages",
            SectionKind::Trust => "trust",
            SectionKind::Faq => "faq",
            SectionKind::Enquiry => "enquiry",
        }
    }

    /// The section's `id` attribute (link anchor)
    pub fn anchor(self) -> &'static str {
        match self {
            SectionKind::Hero => "top",
            SectionKind::Trust => "how",
            other => other.name(),
        }
    }
}

/// Section roots and overall height of a built page
#[derive(Clone, Debug, PartialEq)]
pub struct PageLayout {
    sections: Vec<(SectionKind, ElementId)>,
    height: f32,
}

impl PageLayout {
    pub fn root(&self, kind: SectionKind) -> Option<ElementId> {
        self.sections
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, id)| *id)
    }

    pub fn sections(&self) -> &[(SectionKind, ElementId)] {
        &self.sections
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

struct Builder {
    doc: Document,
    top: f32,
}

impl Builder {
    fn node(&mut self, parent: ElementId, key: &str, value: &str, rect: Rect) -> ElementId {
        self.doc
            .append(parent, NewElement::new().attr(format!("data-{key}"), value).bounds(rect))
    }

    fn text(&mut self, parent: ElementId, key: &str, value: &str, rect: Rect, text: &str) -> ElementId {
        self.doc.append(
            parent,
            NewElement::new()
                .attr(format!("data-{key}"), value)
                .bounds(rect)
                .label(text),
        )
    }

    fn section(&mut self, kind: SectionKind, height: f32) -> ElementId {
        let root = self.doc.root();
        self.doc.append(
            root,
            NewElement::new()
                .attr("id", kind.anchor())
                .bounds(Rect::new(0.0, self.top, PAGE_WIDTH, height)),
        )
    }

    fn hero(&mut self, location: Option<&Location>) -> ElementId {
        let top = self.top;
        let section = self.section(SectionKind::Hero, 820.0);
        let kicker_text = kicker(location);
        self.text(section, "hero", "kicker", Rect::new(0.0, top + 120.0, 520.0, 32.0), &kicker_text);
        self.text(section, "hero", "h1", Rect::new(0.0, top + 172.0, 560.0, 120.0), HERO_TITLE);
        self.text(section, "hero", "p", Rect::new(0.0, top + 312.0, 560.0, 80.0), HERO_INTRO);
        for (i, label) in ["Check availability", "See packages"].iter().enumerate() {
            let x = i as f32 * 200.0;
            self.text(section, "hero", "cta", Rect::new(x, top + 412.0, 184.0, 48.0), label);
        }
        let media = Rect::new(620.0, top + 100.0, 580.0, 600.0);
        self.node(section, "hero", "glow", media);
        self.node(section, "hero", "media", media);
        self.top += 820.0;
        section
    }

    fn gallery(&mut self) -> ElementId {
        let top = self.top;
        let height = 160.0 + 2.0 * 480.0 + 80.0;
        let section = self.section(SectionKind::Gallery, height);
        let width = (PAGE_WIDTH - 2.0 * GUTTER) / 2.0;
        for (i, image) in GALLERY.iter().enumerate() {
            let x = (i % 2) as f32 * (width + 2.0 * GUTTER);
            let y = top + 160.0 + (i / 2) as f32 * 480.0;
            let card = self.node(section, "gal", "card", Rect::new(x, y, width, 440.0));
            let frame_rect = Rect::new(x, y, width, 380.0);
            let frame = self.node(card, "gal", "frame", frame_rect);
            self.text(frame, "gal", "img", frame_rect, image.alt);
            self.text(card, "gal", "pill", Rect::new(x + 16.0, y + 396.0, 140.0, 28.0), image.tag);
        }
        self.top += height;
        section
    }

    fn packages(&mut self) -> ElementId {
        let top = self.top;
        let height = 160.0 + 640.0 + 48.0 + 360.0 + 80.0;
        let section = self.section(SectionKind::Packages, height);

        let card_width = (PAGE_WIDTH - 2.0 * GUTTER) / 3.0;
        for (i, package) in PACKAGES.iter().enumerate() {
            let x = i as f32 * (card_width + GUTTER);
            let y = top + 160.0;
            let card = self.text(section, "pkg", "card", Rect::new(x, y, card_width, 640.0), package.name);
            for (n, bullet) in package.bullets.iter().enumerate() {
                let row = Rect::new(x + 24.0, y + 240.0 + n as f32 * 32.0, card_width - 48.0, 28.0);
                self.text(card, "pkg", "li", row, bullet);
            }
        }

        let panel_width = (PAGE_WIDTH - GUTTER) / 2.0;
        let panel_y = top + 160.0 + 640.0 + 48.0;
        let addons = self.text(
            section,
            "pkg",
            "panel",
            Rect::new(0.0, panel_y, panel_width, 360.0),
            "Add-ons",
        );
        for (n, addon) in ADD_ONS.iter().enumerate() {
            let row = Rect::new(24.0, panel_y + 100.0 + n as f32 * 72.0, panel_width - 48.0, 64.0);
            self.text(addons, "pkg", "addon", row, addon.name);
        }
        let x = panel_width + GUTTER;
        let steps = self.text(
            section,
            "pkg",
            "panel",
            Rect::new(x, panel_y, panel_width, 360.0),
            "How it works",
        );
        for (n, step) in BOOKING_STEPS.iter().enumerate() {
            let row = Rect::new(x + 24.0, panel_y + 100.0 + n as f32 * 72.0, panel_width - 48.0, 64.0);
            self.text(steps, "pkg", "step", row, step.title);
        }

        self.top += height;
        section
    }

    fn trust(&mut self) -> ElementId {
        let top = self.top;
        let height = 80.0 + 520.0 + 80.0;
        let section = self.section(SectionKind::Trust, height);
        let width = (PAGE_WIDTH - GUTTER) / 2.0;
        let y = top + 80.0;

        let booking = self.text(
            section,
            "how",
            "panel",
            Rect::new(0.0, y, width, 520.0),
            "How booking works",
        );
        for (n, step) in BOOKING_STEPS.iter().enumerate() {
            let row = Rect::new(24.0, y + 180.0 + n as f32 * 80.0, width - 48.0, 64.0);
            self.text(booking, "how", "step", row, step.title);
        }

        let x = width + GUTTER;
        let included = self.text(
            section,
            "how",
            "panel",
            Rect::new(x, y, width, 520.0),
            "What’s included",
        );
        let tile_width = (width - 48.0 - 16.0) / 2.0;
        for (n, tile) in INCLUDED.iter().enumerate() {
            let tile_x = x + 24.0 + (n % 2) as f32 * (tile_width + 16.0);
            let tile_y = y + 160.0 + (n / 2) as f32 * 110.0;
            self.text(
                included,
                "how",
                "tile",
                Rect::new(tile_x, tile_y, tile_width, 96.0),
                tile.key,
            );
        }

        self.top += height;
        section
    }

    fn faq(&mut self) -> ElementId {
        let top = self.top;
        let height = 140.0 + FAQS.len() as f32 * 88.0 + 80.0;
        let section = self.section(SectionKind::Faq, height);
        for (i, entry) in FAQS.iter().enumerate() {
            let y = top + 140.0 + i as f32 * 88.0;
            let item = self.node(section, "faq", "item", Rect::new(0.0, y, PAGE_WIDTH, 76.0));
            let trigger = self.text(item, "faq", "trigger", Rect::new(0.0, y, PAGE_WIDTH, 76.0), entry.question);
            self.doc.append(
                trigger,
                NewElement::new()
                    .attr("data-faq", "label")
                    .bounds(Rect::new(PAGE_WIDTH - 120.0, y + 24.0, 96.0, 28.0)),
            );
            self.doc.append(
                item,
                NewElement::new()
                    .attr("data-faq", "panel")
                    .bounds(Rect::new(0.0, y + 76.0, PAGE_WIDTH, 0.0))
                    .content_height(answer_height(entry.answer))
                    .label(entry.answer),
            );
        }
        self.top += height;
        section
    }

    fn enquiry(&mut self) -> ElementId {
        let top = self.top;
        let height = 64.0 + 560.0 + 66.0;
        let section = self.section(SectionKind::Enquiry, height);
        let wrap = self.node(section, "enq", "wrap", Rect::new(0.0, top + 64.0, PAGE_WIDTH, 560.0));
        let left = self.text(
            wrap,
            "enq",
            "left",
            Rect::new(40.0, top + 104.0, 540.0, 400.0),
            "Check availability",
        );
        for (i, cta) in ENQUIRY_CTAS.iter().enumerate() {
            let rect = Rect::new(40.0 + i as f32 * 170.0, top + 330.0, 150.0, 48.0);
            self.text(left, "enq", "cta", rect, cta);
        }
        let form = self.node(wrap, "enq", "form", Rect::new(620.0, top + 104.0, 540.0, 480.0));
        for (i, field) in ENQUIRY_FIELDS.iter().enumerate() {
            let rect = Rect::new(640.0, top + 124.0 + i as f32 * 72.0, 500.0, 60.0);
            self.text(form, "enq", "field", rect, field);
        }
        self.top += height;
        section
    }
}

/// Rough rendered height of an answer paragraph
fn answer_height(answer: &str) -> f32 {
    let lines = answer.chars().count().div_ceil(110).max(1);
    lines as f32 * 24.0 + 24.0
}

/// Build the page, optionally as a location landing variant
pub fn build(location: Option<&Location>) -> (Document, PageLayout) {
    let mut builder = Builder {
        doc: Document::new(),
        top: 0.0,
    };

    let sections = vec![
        (SectionKind::Hero, builder.hero(location)),
        (SectionKind::Gallery, builder.gallery()),
        (SectionKind::Packages, builder.packages()),
        (SectionKind::Trust, builder.trust()),
        (SectionKind::Faq, builder.faq()),
        (SectionKind::Enquiry, builder.enquiry()),
    ];

    let layout = PageLayout {
        sections,
        height: builder.top,
    };
    tracing::debug!(
        "page: built {} elements, {:.0}px tall",
        builder.doc.len(),
        layout.height
    );
    (builder.doc, layout)
}
