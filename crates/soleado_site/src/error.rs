//! Error types for the site layer

use soleado_core::MotionError;
use thiserror::Error;

/// Errors from mounting the page or building enquiry links
#[derive(Error, Debug)]
pub enum SiteError {
    /// A section's animation setup failed; its scope was released
    #[error("failed to mount {section} section: {source}")]
    Mount {
        section: &'static str,
        #[source]
        source: MotionError,
    },

    /// Motion engine error outside of setup (e.g. toggling a panel)
    #[error(transparent)]
    Motion(#[from] MotionError),

    /// The FAQ section is not mounted
    #[error("FAQ section is not mounted")]
    FaqNotMounted,

    /// A required enquiry field was left blank
    #[error("enquiry field `{0}` is required")]
    MissingField(&'static str),

    /// No location with that slug
    #[error("unknown location `{0}`")]
    UnknownLocation(String),
}

/// Result type for site operations
pub type Result<T> = std::result::Result<T, SiteError>;
