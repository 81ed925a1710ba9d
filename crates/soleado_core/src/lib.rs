//! Soleado Core
//!
//! Foundational types for the Soleado scroll-motion engine:
//!
//! - **Document**: headless element tree the engine reads bounds from and
//!   writes inline styles to
//! - **Style**: partial animatable style properties
//! - **Motion preference**: the reduced-motion accessibility oracle
//! - **Errors**: the engine's error taxonomy

pub mod document;
pub mod error;
pub mod geometry;
pub mod motion;
pub mod style;

pub use document::{Document, ElementId, ElementNode, NewElement, Selector, SharedDocument};
pub use error::{MotionError, Result};
pub use geometry::{Point, Rect, Size};
pub use motion::{
    clear_motion_source, is_reduced_motion, motion_preference, set_motion_source, EnvPreference,
    FixedPreference, MotionPreference, MotionPreferenceSource,
};
pub use style::{Length, StyleProperty, StyleProps};
