//! The mounted page
//!
//! A [`Site`] owns the stage for one page render and a scope per mounted
//! section. Unmounting releases the scopes in reverse order, which puts every
//! inline style back the way the markup had it.

use soleado_motion::{DisclosureGroup, PanelState, ReleaseSummary, ScopeHandle, Stage, Viewport};

use crate::config::{ReducedMotion, SiteConfig};
use crate::error::{Result, SiteError};
use crate::locations::Location;
use crate::page::{self, PageLayout, SectionKind};
use crate::sections;

pub struct Site {
    stage: Stage,
    layout: PageLayout,
    mounted: Vec<(SectionKind, ScopeHandle)>,
    faq: Option<DisclosureGroup>,
}

impl Site {
    /// Build the page; nothing is animated until [`Site::mount`]
    pub fn new(config: &SiteConfig, location: Option<&Location>) -> Self {
        let (document, layout) = page::build(location);
        let stage = Stage::new(document, config.viewport.height);
        // `system` defers to the process-wide source, read on each activation
        let stage = match config.motion.reduced {
            ReducedMotion::System => stage,
            forced => stage.with_motion_source(forced),
        };
        Self {
            stage,
            layout,
            mounted: Vec::new(),
            faq: None,
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn is_mounted(&self) -> bool {
        !self.mounted.is_empty()
    }

    /// Mount every section in document order
    ///
    /// Stops at the first section whose setup fails. That section's scope is
    /// released before returning; sections mounted before it stay mounted.
    pub fn mount(&mut self) -> Result<()> {
        if self.is_mounted() {
            tracing::debug!("site: already mounted");
            return Ok(());
        }

        for (kind, root) in self.layout.sections().to_vec() {
            let mut faq = None;
            let handle = self
                .stage
                .activate(root, |scope| {
                    faq = sections::mount(kind, scope)?;
                    Ok(())
                })
                .map_err(|err| {
                    let (source, scope) = err.into_parts();
                    let summary = scope.release();
                    tracing::error!(
                        "site: {} setup failed, released {} effect(s): {}",
                        kind.name(),
                        summary.cancelled,
                        source
                    );
                    SiteError::Mount {
                        section: kind.name(),
                        source,
                    }
                })?;

            if faq.is_some() {
                self.faq = faq;
            }
            tracing::debug!("site: mounted {} ({} pending)", kind.name(), handle.scope().pending());
            self.mounted.push((kind, handle));
        }

        tracing::info!(
            "site: mounted {} section(s), motion {:?}",
            self.mounted.len(),
            self.stage.motion_preference()
        );
        Ok(())
    }

    /// Release every section, newest first
    pub fn unmount(&mut self) -> ReleaseSummary {
        self.faq = None;
        let mut total = ReleaseSummary::default();
        while let Some((kind, handle)) = self.mounted.pop() {
            let summary = handle.release();
            tracing::debug!(
                "site: unmounted {} ({} cancelled, {} failed)",
                kind.name(),
                summary.cancelled,
                summary.failed
            );
            total.cancelled += summary.cancelled;
            total.failed += summary.failed;
        }
        total
    }

    pub fn viewport(&self) -> Viewport {
        self.stage.viewport()
    }

    pub fn scroll_to(&self, scroll_y: f32) {
        self.stage.scroll_to(scroll_y);
    }

    pub fn scroll_by(&self, delta: f32) {
        self.stage.scroll_by(delta);
    }

    /// Advance animations; true while anything is still running
    pub fn advance(&self, dt_ms: f32) -> bool {
        self.stage.advance(dt_ms)
    }

    /// Run animations to completion (bounded by `max_ms`)
    pub fn settle(&self, max_ms: f32) -> f32 {
        self.stage.settle(16.0, max_ms)
    }

    pub fn faq(&self) -> Option<&DisclosureGroup> {
        self.faq.as_ref()
    }

    /// Toggle an FAQ panel as if its trigger was clicked
    pub fn toggle_faq(&self, panel: usize) -> Result<PanelState> {
        let faq = self.faq.as_ref().ok_or(SiteError::FaqNotMounted)?;
        faq.toggle(panel)?;
        Ok(faq.state(panel)?)
    }

    /// Elements on the page still carrying an inline style
    pub fn residual_styles(&self) -> usize {
        let document = self.stage.document();
        let document = document.borrow();
        document.styled_elements(document.root()).len()
    }
}

impl Drop for Site {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MotionConfig;
    use crate::locations;
    use soleado_core::{clear_motion_source, set_motion_source, FixedPreference, MotionPreference};

    fn config(reduced: ReducedMotion) -> SiteConfig {
        SiteConfig {
            motion: MotionConfig { reduced },
            ..SiteConfig::default()
        }
    }

    fn opacity(site: &Site, selector: &str) -> Vec<f32> {
        let document = site.stage().document();
        let document = document.borrow();
        document
            .select(document.root(), selector)
            .unwrap()
            .into_iter()
            .map(|id| document.inline_style(id).unwrap().computed_opacity())
            .collect()
    }

    #[test]
    fn test_mount_hides_offscreen_sections() {
        let mut site = Site::new(&config(ReducedMotion::Never), None);
        site.mount().unwrap();

        assert!(site.is_mounted());
        assert!(site.faq().is_some());
        assert!(opacity(&site, "[data-pkg='card']").iter().all(|o| *o == 0.0));
        assert!(opacity(&site, "[data-enq='field']").iter().all(|o| *o == 0.0));

        // Hero plays on mount regardless of scroll
        site.settle(5000.0);
        assert!(opacity(&site, "[data-hero='h1']").iter().all(|o| *o == 1.0));
    }

    #[test]
    fn test_scrolling_to_the_bottom_reveals_everything() {
        let mut site = Site::new(&config(ReducedMotion::Never), None);
        site.mount().unwrap();

        let height = site.layout().height();
        let mut y = 0.0;
        while y < height {
            y += 120.0;
            site.scroll_to(y);
            site.advance(100.0);
        }
        site.settle(10_000.0);

        for selector in [
            "[data-gal='card']",
            "[data-pkg='li']",
            "[data-pkg='step']",
            "[data-how='tile']",
            "[data-faq='item']",
            "[data-enq='cta']",
        ] {
            assert!(
                opacity(&site, selector).iter().all(|o| *o == 1.0),
                "{selector} not revealed"
            );
        }
    }

    #[test]
    fn test_unmount_leaves_no_inline_styles() {
        let mut site = Site::new(&config(ReducedMotion::Never), locations::find("wigan"));
        site.mount().unwrap();
        site.scroll_to(2500.0);
        site.advance(200.0);
        site.toggle_faq(0).unwrap();
        assert!(site.residual_styles() > 0);

        let summary = site.unmount();
        assert!(summary.cancelled > 0);
        assert_eq!(summary.failed, 0);
        assert_eq!(site.residual_styles(), 0);
        assert!(!site.is_mounted());
        assert!(matches!(site.toggle_faq(0), Err(SiteError::FaqNotMounted)));
    }

    #[test]
    fn test_reduced_motion_page() {
        let mut site = Site::new(&config(ReducedMotion::Always), None);
        site.mount().unwrap();

        assert!(!site.advance(16.0));
        assert!(opacity(&site, "[data-pkg='card']").iter().all(|o| *o == 1.0));

        assert_eq!(site.toggle_faq(2).unwrap(), PanelState::Open);
        assert_eq!(site.toggle_faq(1).unwrap(), PanelState::Open);
        assert_eq!(site.faq().unwrap().state(2).unwrap(), PanelState::Closed);
    }

    #[test]
    fn test_faq_toggle_through_site() {
        let mut site = Site::new(&config(ReducedMotion::Never), None);
        site.mount().unwrap();

        assert_eq!(site.toggle_faq(0).unwrap(), PanelState::Opening);
        site.settle(2000.0);
        assert_eq!(site.faq().unwrap().expanded_panel(), Some(0));
        assert!(matches!(
            site.toggle_faq(99),
            Err(SiteError::Motion(soleado_core::MotionError::UnknownPanel(99)))
        ));
    }

    #[test]
    fn test_system_setting_follows_process_source() {
        set_motion_source(FixedPreference(MotionPreference::Reduce));
        let mut site = Site::new(&SiteConfig::default(), None);
        assert_eq!(site.stage().motion_preference(), MotionPreference::Reduce);
        site.mount().unwrap();
        clear_motion_source();

        // Captured at activation: the mounted page stays reduced
        assert!(!site.advance(16.0));
        assert!(opacity(&site, "[data-enq='field']").iter().all(|o| *o == 1.0));

        let forced = Site::new(&config(ReducedMotion::Never), None);
        assert_eq!(forced.stage().motion_preference(), MotionPreference::NoPreference);
    }
}
