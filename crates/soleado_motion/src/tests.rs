//! Behaviour tests for scopes, reveals, parallax and disclosure groups
//!
//! Everything runs against a headless document with deterministic
//! `advance` time.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use soleado_core::{
    Document, ElementId, FixedPreference, MotionError, MotionPreference, MotionPreferenceSource,
    NewElement, Rect, StyleProps,
};

use crate::disclosure::{DisclosureGroup, DisclosureOptions, PanelElements, PanelEvent, PanelState};
use crate::parallax::{self, parallax_offset, ParallaxOptions};
use crate::reveal::{self, RevealOptions};
use crate::stage::Stage;
use crate::viewport::TriggerLine;

const VIEWPORT: f32 = 900.0;

fn stage_with(doc: Document, preference: MotionPreference) -> Stage {
    Stage::new(doc, VIEWPORT).with_motion_source(FixedPreference(preference))
}

struct Faq {
    stage: Stage,
    section: ElementId,
    panels: Vec<PanelElements>,
}

fn faq(preference: MotionPreference) -> Faq {
    let mut doc = Document::new();
    let section = doc.append(
        doc.root(),
        NewElement::new()
            .attr("id", "faq")
            .bounds(Rect::new(0.0, 0.0, 800.0, 1000.0)),
    );
    let panels = (0..5)
        .map(|i| {
            let item = doc.append(section, NewElement::new().attr("data-faq-item", ""));
            let trigger = doc.append(item, NewElement::new().attr("data-faq-trigger", ""));
            let label = doc.append(trigger, NewElement::new().label("Open"));
            let body = doc.append(
                item,
                NewElement::new()
                    .attr("data-faq-panel", "")
                    .content_height(80.0 + 10.0 * i as f32),
            );
            PanelElements::new(trigger, body).affordance(label)
        })
        .collect();
    Faq {
        stage: stage_with(doc, preference),
        section,
        panels,
    }
}

fn mount_faq(f: &Faq) -> (crate::ScopeHandle, DisclosureGroup) {
    let group: Rc<RefCell<Option<DisclosureGroup>>> = Rc::default();
    let slot = Rc::clone(&group);
    let panels = f.panels.clone();
    let handle = f
        .stage
        .activate(f.section, move |scope| {
            *slot.borrow_mut() = Some(DisclosureGroup::new(scope, panels, DisclosureOptions::default())?);
            Ok(())
        })
        .unwrap();
    let group = group.borrow_mut().take().unwrap();
    (handle, group)
}

fn record(group: &DisclosureGroup) -> Rc<RefCell<Vec<PanelEvent>>> {
    let events: Rc<RefCell<Vec<PanelEvent>>> = Rc::default();
    let log = Rc::clone(&events);
    group.subscribe(move |event| log.borrow_mut().push(*event));
    events
}

fn expanded_count(group: &DisclosureGroup) -> usize {
    group.states().iter().filter(|s| s.is_expanded()).count()
}

#[test]
fn test_toggle_closed_panel_opens_it() {
    let f = faq(MotionPreference::NoPreference);
    let (_handle, group) = mount_faq(&f);
    let events = record(&group);

    group.toggle(1).unwrap();
    assert_eq!(group.state(1).unwrap(), PanelState::Opening);
    f.stage.settle(16.0, 2000.0);

    assert_eq!(
        group.states(),
        vec![
            PanelState::Closed,
            PanelState::Open,
            PanelState::Closed,
            PanelState::Closed,
            PanelState::Closed,
        ]
    );
    let states: Vec<_> = events.borrow().iter().map(|e| (e.panel, e.state)).collect();
    assert_eq!(states, vec![(1, PanelState::Opening), (1, PanelState::Open)]);

    let doc = f.stage.document();
    let doc = doc.borrow();
    let body = f.panels[1].body;
    let style = doc.inline_style(body).unwrap();
    assert_eq!(style.computed_opacity(), 1.0);
    assert_eq!(style.computed_height(90.0), 90.0);
    assert_eq!(doc.aria_expanded(f.panels[1].trigger), Some(true));
    assert_eq!(doc.label(f.panels[1].affordance.unwrap()), Some("Close"));
    assert_eq!(doc.aria_expanded(f.panels[0].trigger), Some(false));
}

#[test]
fn test_close_finishes_before_next_open_begins() {
    let f = faq(MotionPreference::NoPreference);
    let (_handle, group) = mount_faq(&f);
    group.toggle(1).unwrap();
    f.stage.settle(16.0, 2000.0);
    let events = record(&group);

    group.toggle(3).unwrap();
    assert_eq!(group.state(1).unwrap(), PanelState::Closing);
    assert_eq!(group.state(3).unwrap(), PanelState::Closed);
    assert_eq!(group.pending_open(), Some(3));
    // aria follows synchronously
    let doc = f.stage.document();
    assert_eq!(doc.borrow().aria_expanded(f.panels[1].trigger), Some(false));

    f.stage.settle(16.0, 3000.0);
    assert_eq!(group.state(1).unwrap(), PanelState::Closed);
    assert_eq!(group.state(3).unwrap(), PanelState::Open);

    let events = events.borrow();
    let closed = events
        .iter()
        .position(|e| e.panel == 1 && e.state == PanelState::Closed)
        .unwrap();
    let opening = events
        .iter()
        .position(|e| e.panel == 3 && e.state == PanelState::Opening)
        .unwrap();
    assert!(closed < opening);
    assert!(events[closed].at_ms <= events[opening].at_ms);
    assert!(events[opening].at_ms >= 320.0 + events[0].at_ms - 1.0);
}

#[test]
fn test_last_requested_panel_wins_while_closing() {
    let f = faq(MotionPreference::NoPreference);
    let (_handle, group) = mount_faq(&f);
    group.toggle(0).unwrap();
    f.stage.settle(16.0, 2000.0);

    group.toggle(2).unwrap();
    f.stage.advance(100.0);
    group.toggle(4).unwrap();
    assert_eq!(group.pending_open(), Some(4));
    f.stage.settle(16.0, 3000.0);

    assert_eq!(group.state(4).unwrap(), PanelState::Open);
    assert_eq!(group.state(2).unwrap(), PanelState::Closed);
    assert_eq!(group.state(0).unwrap(), PanelState::Closed);
}

#[test]
fn test_toggle_closing_panel_reopens_it() {
    let f = faq(MotionPreference::NoPreference);
    let (_handle, group) = mount_faq(&f);
    group.toggle(2).unwrap();
    f.stage.settle(16.0, 2000.0);

    group.toggle(2).unwrap();
    f.stage.advance(100.0);
    assert_eq!(group.state(2).unwrap(), PanelState::Closing);

    group.toggle(2).unwrap();
    assert_eq!(group.state(2).unwrap(), PanelState::Opening);
    f.stage.settle(16.0, 2000.0);
    assert_eq!(group.state(2).unwrap(), PanelState::Open);
}

#[test]
fn test_never_more_than_one_expanded() {
    let f = faq(MotionPreference::NoPreference);
    let (_handle, group) = mount_faq(&f);

    let violations = Rc::new(RefCell::new(0));
    let seen = Rc::clone(&violations);
    let watched = group.clone();
    group.subscribe(move |_| {
        if expanded_count(&watched) > 1 {
            *seen.borrow_mut() += 1;
        }
    });

    let clicks = [1, 3, 3, 0, 4, 4, 2, 1, 1, 0, 2, 3];
    let gaps = [0.0, 50.0, 200.0, 400.0, 16.0, 700.0];
    for (n, panel) in clicks.iter().enumerate() {
        group.toggle(*panel).unwrap();
        assert!(expanded_count(&group) <= 1);
        f.stage.advance(gaps[n % gaps.len()]);
        assert!(expanded_count(&group) <= 1);
    }
    f.stage.settle(16.0, 5000.0);
    assert_eq!(*violations.borrow(), 0);
}

#[test]
fn test_reduced_motion_toggle_is_instant() {
    let f = faq(MotionPreference::Reduce);
    let (_handle, group) = mount_faq(&f);
    let events = record(&group);

    group.toggle(1).unwrap();
    assert_eq!(group.state(1).unwrap(), PanelState::Open);
    assert_eq!(f.stage.scheduler().tween_count(), 0);

    group.toggle(3).unwrap();
    assert_eq!(group.state(1).unwrap(), PanelState::Closed);
    assert_eq!(group.state(3).unwrap(), PanelState::Open);

    assert!(events
        .borrow()
        .iter()
        .all(|e| matches!(e.state, PanelState::Open | PanelState::Closed)));

    let doc = f.stage.document();
    let doc = doc.borrow();
    assert_eq!(doc.label(f.panels[3].affordance.unwrap()), Some("Close"));
    assert_eq!(
        doc.inline_style(f.panels[1].body).unwrap().computed_height(90.0),
        0.0
    );
}

#[test]
fn test_unknown_panel_is_an_error() {
    let f = faq(MotionPreference::NoPreference);
    let (_handle, group) = mount_faq(&f);
    assert_eq!(group.toggle(9), Err(MotionError::UnknownPanel(9)));
    assert_eq!(group.state(5), Err(MotionError::UnknownPanel(5)));
}

#[test]
fn test_release_mid_transition_reverts_and_drops_completion() {
    let f = faq(MotionPreference::NoPreference);
    let (handle, group) = mount_faq(&f);
    group.toggle(1).unwrap();
    f.stage.advance(120.0);

    handle.release();
    f.stage.settle(16.0, 2000.0);

    assert_eq!(group.state(1).unwrap(), PanelState::Opening);
    assert_eq!(group.toggle(1), Err(MotionError::ScopeReleased));
    let doc = f.stage.document();
    for panel in &f.panels {
        assert_eq!(doc.borrow().inline_style(panel.body), Some(StyleProps::default()));
    }
}

struct Column {
    stage: Stage,
    section: ElementId,
    items: Vec<ElementId>,
}

/// One item on screen, three below the fold at 1200/1800/2400
fn column(preference: MotionPreference) -> Column {
    let mut doc = Document::new();
    let section = doc.append(doc.root(), NewElement::new().bounds(Rect::new(0.0, 0.0, 800.0, 3000.0)));
    let items = [100.0, 1200.0, 1800.0, 2400.0]
        .iter()
        .map(|y| {
            doc.append(
                section,
                NewElement::new()
                    .attr("data-reveal", "card")
                    .bounds(Rect::new(0.0, *y, 800.0, 200.0)),
            )
        })
        .collect();
    Column {
        stage: stage_with(doc, preference),
        section,
        items,
    }
}

#[test]
fn test_batch_fires_visible_immediately_and_rest_on_crossing() {
    let c = column(MotionPreference::NoPreference);
    let groups: Rc<RefCell<Vec<Vec<ElementId>>>> = Rc::default();
    let log = Rc::clone(&groups);
    let options = RevealOptions::fade_up(16.0, 750.0).stagger(80.0);

    let _handle = c
        .stage
        .activate(c.section, move |scope| {
            let items = scope.select("[data-reveal='card']")?;
            reveal::batch_with(scope, &items, &options, move |scope, group| {
                log.borrow_mut().push(group.to_vec());
                scope.to(group, options.to, options.tween).map(drop)
            })?;
            Ok(())
        })
        .unwrap();

    assert_eq!(*groups.borrow(), vec![vec![c.items[0]]]);
    assert_eq!(c.stage.scheduler().tween_count(), 1);

    // Line at 1200 + 792: second and third cross together
    c.stage.scroll_to(1200.0);
    c.stage.scroll_to(0.0);
    c.stage.scroll_to(1200.0);
    assert_eq!(groups.borrow().len(), 2);
    assert_eq!(groups.borrow()[1], vec![c.items[1], c.items[2]]);

    c.stage.scroll_to(3000.0);
    assert_eq!(groups.borrow().len(), 3);
    assert_eq!(groups.borrow()[2], vec![c.items[3]]);
    assert_eq!(c.stage.observers().observer_count(), 0);

    c.stage.settle(16.0, 3000.0);
    let doc = c.stage.document();
    for item in &c.items {
        let style = doc.borrow().inline_style(*item).unwrap();
        assert_eq!(style.computed_opacity(), 1.0);
        assert_eq!(style.computed_y(), 0.0);
    }
}

#[test]
fn test_batch_staggers_within_a_crossing_group() {
    let c = column(MotionPreference::NoPreference);
    let options = RevealOptions::fade_up(16.0, 750.0).stagger(80.0);
    let _handle = c
        .stage
        .activate(c.section, |scope| {
            reveal::batch(scope, &c.items[1..], &options).map(drop)
        })
        .unwrap();

    c.stage.scroll_to(1200.0);
    c.stage.advance(40.0);
    let doc = c.stage.document();
    let first = doc.borrow().inline_style(c.items[1]).unwrap().computed_opacity();
    let second = doc.borrow().inline_style(c.items[2]).unwrap().computed_opacity();
    assert!(first > 0.0);
    assert_eq!(second, 0.0);
}

#[test]
fn test_reduced_batch_snaps_to_target() {
    let c = column(MotionPreference::Reduce);
    let options = RevealOptions::fade_up(16.0, 750.0);
    let handle = c
        .stage
        .activate(c.section, |scope| {
            let observer = reveal::batch(scope, &c.items, &options)?;
            assert!(observer.is_none());
            Ok(())
        })
        .unwrap();

    assert_eq!(c.stage.observers().observer_count(), 0);
    assert_eq!(c.stage.scheduler().tween_count(), 0);
    let doc = c.stage.document();
    for item in &c.items {
        assert_eq!(doc.borrow().inline_style(*item), Some(options.to));
    }
    drop(handle);
}

#[test]
fn test_empty_batch_is_a_no_op() {
    let c = column(MotionPreference::NoPreference);
    let handle = c
        .stage
        .activate(c.section, |scope| {
            let none = reveal::batch_selector(scope, "[data-reveal='missing']", &RevealOptions::fade_up(8.0, 500.0))?;
            assert!(none.is_none());
            Ok(())
        })
        .unwrap();
    assert_eq!(handle.scope().pending(), 0);
}

#[test]
fn test_release_twice_matches_release_once() {
    let c = column(MotionPreference::NoPreference);
    let options = RevealOptions::fade_up(16.0, 750.0);
    let handle = c
        .stage
        .activate(c.section, |scope| reveal::batch(scope, &c.items, &options).map(drop))
        .unwrap();
    c.stage.advance(200.0);

    let first = handle.release();
    let doc = c.stage.document();
    let after_once: Vec<_> = c.items.iter().map(|i| doc.borrow().inline_style(*i)).collect();
    let second = handle.release();
    let after_twice: Vec<_> = c.items.iter().map(|i| doc.borrow().inline_style(*i)).collect();

    assert!(first.cancelled > 0);
    assert_eq!(second.cancelled + second.failed, 0);
    assert_eq!(after_once, after_twice);
    assert_eq!(c.stage.observers().observer_count(), 0);
}

#[test]
fn test_release_in_flight_leaves_no_residual_style() {
    let c = column(MotionPreference::NoPreference);
    let handle = c
        .stage
        .activate(c.section, |scope| {
            reveal::batch(scope, &c.items, &RevealOptions::fade_up(16.0, 750.0))?;
            parallax::bind(scope, c.items[3], c.items[2], ParallaxOptions::new(10.0, -10.0))?;
            Ok(())
        })
        .unwrap();
    c.stage.scroll_to(1500.0);
    c.stage.advance(300.0);
    assert!(c.stage.scheduler().has_active_animations());

    handle.release();
    c.stage.settle(16.0, 2000.0);
    c.stage.scroll_to(2500.0);

    let doc = c.stage.document();
    for item in &c.items {
        assert_eq!(doc.borrow().inline_style(*item), Some(StyleProps::default()));
    }
}

#[test]
fn test_setup_failure_hands_back_scope() {
    let c = column(MotionPreference::NoPreference);
    let err = c
        .stage
        .activate(c.section, |scope| {
            scope.set(&c.items, &StyleProps::new().opacity(0.0))?;
            scope.select("[broken")?;
            Ok(())
        })
        .unwrap_err();

    assert!(matches!(err.source, MotionError::InvalidSelector(_)));
    let (_, scope) = err.into_parts();
    scope.release();
    let doc = c.stage.document();
    assert_eq!(doc.borrow().inline_style(c.items[0]), Some(StyleProps::default()));
}

#[test]
fn test_parallax_follows_scroll_without_drift() {
    let c = column(MotionPreference::NoPreference);
    let options = ParallaxOptions::new(10.0, -10.0);
    let _handle = c
        .stage
        .activate(c.section, |scope| {
            parallax::bind(scope, c.items[2], c.items[2], options).map(drop)
        })
        .unwrap();

    let doc = c.stage.document();
    let rect = doc.borrow().bounds(c.items[2]).unwrap();
    for y in [0.0, 1000.0, 1400.0, 1700.0, 1000.0, 1400.0, 9000.0] {
        c.stage.scroll_to(y);
        let expected = parallax_offset(&rect, &c.stage.viewport(), 10.0, -10.0);
        let actual = doc.borrow().inline_style(c.items[2]).unwrap().computed_y();
        assert!((actual - expected).abs() < 1e-4, "scroll {y}: {actual} != {expected}");
    }
}

#[test]
fn test_parallax_disabled_under_reduced_motion() {
    let c = column(MotionPreference::Reduce);
    let _handle = c
        .stage
        .activate(c.section, |scope| {
            let id = parallax::bind(scope, c.items[2], c.items[2], ParallaxOptions::new(10.0, -10.0))?;
            assert!(id.is_none());
            Ok(())
        })
        .unwrap();
    c.stage.scroll_to(1500.0);
    let doc = c.stage.document();
    assert_eq!(doc.borrow().inline_style(c.items[2]), Some(StyleProps::default()));
}

#[test]
fn test_single_trigger_runs_once() {
    let c = column(MotionPreference::NoPreference);
    let runs = Rc::new(RefCell::new(0));
    let count = Rc::clone(&runs);
    let trigger = c.items[3];
    let _handle = c
        .stage
        .activate(c.section, move |scope| {
            reveal::once(scope, trigger, TriggerLine::top_at(0.86), move |_| {
                *count.borrow_mut() += 1;
                Ok(())
            })
            .map(drop)
        })
        .unwrap();
    assert_eq!(*runs.borrow(), 0);
    c.stage.scroll_to(2000.0);
    c.stage.scroll_to(0.0);
    c.stage.scroll_to(2500.0);
    assert_eq!(*runs.borrow(), 1);
}

struct Switchable(Arc<AtomicBool>);

impl MotionPreferenceSource for Switchable {
    fn motion_preference(&self) -> MotionPreference {
        MotionPreference::from_reduced(self.0.load(Ordering::SeqCst))
    }
}

#[test]
fn test_preference_is_fixed_per_activation() {
    let reduced = Arc::new(AtomicBool::new(false));
    let mut doc = Document::new();
    let section = doc.append(doc.root(), NewElement::new());
    let stage = Stage::new(doc, VIEWPORT).with_motion_source(Switchable(Arc::clone(&reduced)));

    let first = stage.activate(section, |_| Ok(())).unwrap();
    reduced.store(true, Ordering::SeqCst);
    let second = stage.activate(section, |_| Ok(())).unwrap();

    assert!(!first.scope().reduced_motion());
    assert!(second.scope().reduced_motion());
}

#[test]
fn test_fresh_mount_reveals_again() {
    let c = column(MotionPreference::NoPreference);
    let options = RevealOptions::fade_up(16.0, 750.0).stagger(80.0);
    let mount = || {
        c.stage
            .activate(c.section, |scope| {
                reveal::batch(scope, &c.items, &options).map(drop)
            })
            .unwrap()
    };
    let doc = c.stage.document();
    let opacity = |item: ElementId| doc.borrow().inline_style(item).unwrap().computed_opacity();

    let first = mount();
    c.stage.scroll_to(3000.0);
    c.stage.settle(16.0, 3000.0);
    assert!(c.items.iter().all(|item| opacity(*item) == 1.0));

    first.release();
    assert!(doc.borrow().styled_elements(c.section).is_empty());

    // Everything is already past the line, so the new binding fires at once
    let _second = mount();
    assert_eq!(c.stage.scheduler().tween_count(), c.items.len());
    assert!(c.items.iter().all(|item| opacity(*item) == 0.0));

    c.stage.settle(16.0, 3000.0);
    assert!(c.items.iter().all(|item| opacity(*item) == 1.0));
    assert_eq!(c.stage.observers().observer_count(), 0);
}

#[test]
fn test_batch_fires_in_crossing_order_not_list_order() {
    let c = column(MotionPreference::NoPreference);
    let groups: Rc<RefCell<Vec<Vec<ElementId>>>> = Rc::default();
    let log = Rc::clone(&groups);
    let options = RevealOptions::fade_up(16.0, 750.0);

    let _handle = c
        .stage
        .activate(c.section, move |scope| {
            let items = scope.select("[data-reveal='card']")?;
            reveal::batch_with(scope, &items, &options, move |scope, group| {
                log.borrow_mut().push(group.to_vec());
                scope.to(group, options.to, options.tween).map(drop)
            })?;
            Ok(())
        })
        .unwrap();

    // The last item moves above the fold
    c.stage
        .document()
        .borrow_mut()
        .set_bounds(c.items[3], Rect::new(0.0, 300.0, 800.0, 200.0));
    c.stage.layout_changed();
    c.stage.scroll_to(3000.0);
    c.stage.scroll_to(0.0);
    c.stage.scroll_to(3000.0);

    assert_eq!(
        *groups.borrow(),
        vec![vec![c.items[0]], vec![c.items[3]], vec![c.items[1], c.items[2]]]
    );
    for item in &c.items {
        let fired = groups.borrow().iter().flatten().filter(|e| *e == item).count();
        assert_eq!(fired, 1);
    }
}

#[test]
fn test_release_restores_trigger_markup() {
    let f = faq(MotionPreference::NoPreference);
    let (handle, group) = mount_faq(&f);
    group.toggle(2).unwrap();
    f.stage.settle(16.0, 2000.0);

    let doc = f.stage.document();
    let panel = f.panels[2];
    let label = group.elements(2).unwrap().affordance.unwrap();
    assert_eq!(doc.borrow().aria_expanded(panel.trigger), Some(true));
    assert_eq!(doc.borrow().label(label), Some("Close"));

    let summary = handle.release();
    assert_eq!(summary.failed, 0);
    for panel in &f.panels {
        assert_eq!(doc.borrow().aria_expanded(panel.trigger), None);
    }
    assert_eq!(doc.borrow().label(label), Some("Open"));
}
