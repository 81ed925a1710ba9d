//! Soleado Site
//!
//! The Soleado Moments soft play hire page, built on the motion engine:
//!
//! - **Content**: packages, FAQs, gallery and location variants
//! - **Page**: the headless document for the six stacked sections
//! - **Sections**: each section's reveal, parallax and disclosure wiring
//! - **Site**: mounts the sections in their own scopes and drives scrolling
//! - **Enquiry**: the prefilled WhatsApp and email hand-off links
//!
//! # Example
//!
//! ```ignore
//! use soleado_site::{Site, SiteConfig};
//!
//! let mut site = Site::new(&SiteConfig::default(), None);
//! site.mount()?;
//! site.scroll_to(2400.0);
//! site.settle(5000.0);
//! site.toggle_faq(0)?;
//! site.unmount();
//! ```

pub mod config;
pub mod content;
pub mod enquiry;
pub mod error;
pub mod locations;
pub mod page;
pub mod sections;
pub mod site;

pub use config::{ContactConfig, MotionConfig, ReducedMotion, SiteConfig, ViewportConfig, CONFIG_FILE};
pub use enquiry::{Channel, Enquiry};
pub use error::{Result, SiteError};
pub use locations::{Location, LOCATIONS};
pub use page::{PageLayout, SectionKind};
pub use site::Site;
