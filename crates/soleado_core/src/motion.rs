//! Motion preference oracle
//!
//! Process-wide read of the user's reduced-motion accessibility setting.
//! Reading is side-effect free. Callers read it once when a scope activates
//! and keep the answer for that scope's lifetime, so a preference change
//! mid-session only applies to the next mount.
//!
//! ```rust
//! use soleado_core::motion::{self, FixedPreference, MotionPreference};
//!
//! motion::set_motion_source(FixedPreference(MotionPreference::Reduce));
//! assert!(motion::is_reduced_motion());
//! motion::clear_motion_source();
//! ```

use std::sync::{Arc, RwLock};

/// Environment variable consulted by [`EnvPreference`]
pub const REDUCED_MOTION_ENV: &str = "SOLEADO_REDUCED_MOTION";

/// The user's motion preference
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MotionPreference {
    /// Animations allowed
    #[default]
    NoPreference,
    /// Skip transitions and present final states directly
    Reduce,
}

impl MotionPreference {
    pub fn is_reduced(self) -> bool {
        matches!(self, MotionPreference::Reduce)
    }

    pub fn from_reduced(reduced: bool) -> Self {
        if reduced {
            MotionPreference::Reduce
        } else {
            MotionPreference::NoPreference
        }
    }
}

/// Platform accessibility flag reader
pub trait MotionPreferenceSource: Send + Sync {
    fn motion_preference(&self) -> MotionPreference;
}

/// A preference fixed at construction (tests, config overrides)
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedPreference(pub MotionPreference);

impl MotionPreferenceSource for FixedPreference {
    fn motion_preference(&self) -> MotionPreference {
        self.0
    }
}

/// Reads [`REDUCED_MOTION_ENV`] on every query
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvPreference;

impl EnvPreference {
    fn parse(value: &str) -> MotionPreference {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "reduce" => MotionPreference::Reduce,
            _ => MotionPreference::NoPreference,
        }
    }
}

impl MotionPreferenceSource for EnvPreference {
    fn motion_preference(&self) -> MotionPreference {
        std::env::var(REDUCED_MOTION_ENV)
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }
}

static SOURCE: RwLock<Option<Arc<dyn MotionPreferenceSource>>> = RwLock::new(None);

/// Install the process-wide preference source
///
/// Replaces any previously installed source. Scopes that are already active
/// keep the preference they captured.
pub fn set_motion_source<S>(source: S)
where
    S: MotionPreferenceSource + 'static,
{
    let source: Arc<dyn MotionPreferenceSource> = Arc::new(source);
    tracing::debug!("motion: source installed ({:?})", source.motion_preference());
    let mut slot = SOURCE.write().unwrap_or_else(|e| e.into_inner());
    *slot = Some(source);
}

/// Remove the installed source, falling back to [`EnvPreference`]
pub fn clear_motion_source() {
    let mut slot = SOURCE.write().unwrap_or_else(|e| e.into_inner());
    *slot = None;
}

/// Current process-wide motion preference
pub fn motion_preference() -> MotionPreference {
    let source = SOURCE
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .as_ref()
        .map(Arc::clone);
    match source {
        Some(source) => source.motion_preference(),
        None => EnvPreference.motion_preference(),
    }
}

/// Whether the user asked for reduced motion
pub fn is_reduced_motion() -> bool {
    motion_preference().is_reduced()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_values() {
        assert_eq!(EnvPreference::parse("reduce"), MotionPreference::Reduce);
        assert_eq!(EnvPreference::parse(" TRUE "), MotionPreference::Reduce);
        assert_eq!(EnvPreference::parse("1"), MotionPreference::Reduce);
        assert_eq!(EnvPreference::parse("0"), MotionPreference::NoPreference);
        assert_eq!(
            EnvPreference::parse("no-preference"),
            MotionPreference::NoPreference
        );
    }

    #[test]
    fn test_fixed_preference() {
        let source = FixedPreference(MotionPreference::Reduce);
        assert!(source.motion_preference().is_reduced());
        assert!(!MotionPreference::from_reduced(false).is_reduced());
    }
}
