//! Enquiry message and deep links
//!
//! The enquiry form never submits anywhere itself: it opens WhatsApp or the
//! mail client with a prefilled message.

use crate::config::ContactConfig;
use crate::error::{Result, SiteError};

/// The four form fields, trimmed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Enquiry {
    pub name: String,
    pub date: String,
    pub area: String,
    pub details: String,
}

/// Channel picked by the submit button
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Channel {
    #[default]
    WhatsApp,
    Email,
}

impl Enquiry {
    /// Build from raw form input; every field is required
    pub fn new(
        name: impl AsRef<str>,
        date: impl AsRef<str>,
        area: impl AsRef<str>,
        details: impl AsRef<str>,
    ) -> Result<Self> {
        let field = |value: &str, label: &'static str| {
            let value = value.trim();
            if value.is_empty() {
                Err(SiteError::MissingField(label))
            } else {
                Ok(value.to_string())
            }
        };

        Ok(Self {
            name: field(name.as_ref(), "name")?,
            date: field(date.as_ref(), "date")?,
            area: field(area.as_ref(), "area")?,
            details: field(details.as_ref(), "details")?,
        })
    }

    /// Plain-text message body
    pub fn message(&self) -> String {
        [
            "Hi Soleado Moments 👋".to_string(),
            String::new(),
            "I’d like to check availability for soft play:".to_string(),
            format!("• Name: {}", self.name),
            format!("• Event date: {}", self.date),
            format!("• Postcode/area: {}", self.area),
            format!("• Package/theme/add-ons: {}", self.details),
            String::new(),
            "Please let me know availability and the next steps. Thank you!".to_string(),
        ]
        .join("\n")
    }

    pub fn subject(&self) -> String {
        format!("Availability enquiry – {} – {}", self.date, self.area)
    }

    /// `https://wa.me/<number>?text=<message>`
    pub fn whatsapp_url(&self, number: &str) -> String {
        format!(
            "https://wa.me/{}?text={}",
            number,
            urlencoding::encode(&self.message())
        )
    }

    /// `mailto:<to>?subject=<subject>&body=<message>`
    pub fn mailto_url(&self, to: &str) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            to,
            urlencoding::encode(&self.subject()),
            urlencoding::encode(&self.message())
        )
    }

    /// Link for the chosen channel
    pub fn link(&self, channel: Channel, contact: &ContactConfig) -> String {
        match channel {
            Channel::WhatsApp => self.whatsapp_url(&contact.whatsapp_number),
            Channel::Email => self.mailto_url(&contact.email),
        }
    }
}
