//! Enquiry: one trigger on the section starts five staggered groups

use soleado_animation::{Easing, TweenOptions};
use soleado_core::{Result, StyleProps};
use soleado_motion::{reveal, Scope, TriggerLine};

/// One child group animated when the section crosses its trigger
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Group {
    pub selector: &'static str,
    pub rise: f32,
    pub tween: TweenOptions,
}

pub const TRIGGER: TriggerLine = TriggerLine::top_at(0.86);

pub fn groups() -> [Group; 5] {
    let group = |selector, rise, tween| Group {
        selector,
        rise,
        tween,
    };
    let slow = |ms| TweenOptions::new(ms).ease(Easing::POWER3_OUT);
    let quick = |ms| TweenOptions::new(ms).ease(Easing::POWER2_OUT);
    [
        group("[data-enq='wrap']", 16.0, slow(800.0)),
        group("[data-enq='left']", 12.0, slow(650.0).delay(80.0)),
        group("[data-enq='cta']", 10.0, quick(500.0).stagger(80.0).delay(160.0)),
        group("[data-enq='form']", 16.0, slow(800.0).delay(120.0)),
        group("[data-enq='field']", 10.0, quick(500.0).stagger(80.0).delay(180.0)),
    ]
}

pub fn mount(scope: &Scope) -> Result<()> {
    if scope.reduced_motion() {
        return Ok(());
    }

    let groups = groups();
    let mut targets = Vec::with_capacity(groups.len());
    for group in &groups {
        let elements = scope.select(group.selector)?;
        scope.set(&elements, &StyleProps::new().opacity(0.0).y(group.rise))?;
        targets.push((elements, group.tween));
    }

    reveal::once(scope, scope.root(), TRIGGER, move |scope| {
        let shown = StyleProps::new().opacity(1.0).y(0.0);
        for (elements, tween) in &targets {
            scope.to(elements, shown, *tween)?;
        }
        Ok(())
    })?;
    Ok(())
}
