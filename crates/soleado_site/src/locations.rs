//! Location landing page variants

use crate::content::FaqEntry;

/// Areas the business covers, in display order
pub const SERVICE_AREAS: &[&str] = &["Leigh", "Wigan", "Bolton", "Warrington", "Greater Manchester"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    pub slug: &'static str,
    pub name: &'static str,
    pub strap: &'static str,
    pub bullets: &'static [&'static str],
}

pub const LOCATIONS: &[Location] = &[
    Location {
        slug: "leigh",
        name: "Leigh",
        strap: "Leigh-based soft play hire, covering Wigan, Bolton, Warrington and nearby areas.",
        bullets: &[
            "White soft play that photographs beautifully",
            "Theme-matching balls for your colour scheme",
            "Optional personalisation (included in Signature)",
            "Delivery, set up & collection included",
        ],
    },
    Location {
        slug: "wigan",
        name: "Wigan",
        strap: "Soft play hire in Wigan with delivery, set up and collection included.",
        bullets: &[
            "Perfect for home parties and indoor venues",
            "Themed ball colours to suit your party",
            "Three clear packages with upfront pricing",
            "We deliver, set up and collect",
        ],
    },
    Location {
        slug: "bolton",
        name: "Bolton",
        strap: "Boutique soft play hire in Bolton for birthdays, christenings and family events.",
        bullets: &[
            "Clean, white, photo-friendly soft play",
            "Themed balls to match your decor",
            "Optional personalised decals",
            "Delivery, set up & collection included",
        ],
    },
    Location {
        slug: "warrington",
        name: "Warrington",
        strap: "Soft play hire in Warrington with themed balls and optional personalisation.",
        bullets: &[
            "Perfect for birthdays and christenings",
            "Theme-matching balls available",
            "Personalised decals available (included in Signature)",
            "Delivery, set up & collection included",
        ],
    },
];

/// Look up a location by slug (case-insensitive)
pub fn find(slug: &str) -> Option<&'static Location> {
    LOCATIONS.iter().find(|l| l.slug.eq_ignore_ascii_case(slug.trim()))
}

impl Location {
    /// Other locations to link to from this one
    pub fn nearby(&self) -> impl Iterator<Item = &'static Location> + '_ {
        LOCATIONS.iter().filter(move |l| l.slug != self.slug)
    }

    /// FAQ entries for this location's landing page
    pub fn faqs(&self) -> Vec<(String, String)> {
        let name = self.name;
        vec![
            (
                format!("Do you deliver to {name}?"),
                format!(
                    "Yes. We deliver across {name} and nearby areas. Send your postcode/area when you enquire and we’ll confirm availability and delivery details."
                ),
            ),
            pair(&GENERIC_FAQS[0]),
            pair(&GENERIC_FAQS[1]),
            pair(&GENERIC_FAQS[2]),
            pair(&GENERIC_FAQS[3]),
            pair(&GENERIC_FAQS[4]),
        ]
    }
}

fn pair(entry: &FaqEntry) -> (String, String) {
    (entry.question.to_string(), entry.answer.to_string())
}

const GENERIC_FAQS: [FaqEntry; 5] = [
    FaqEntry {
        question: "What’s included with hire?",
        answer: "Delivery, set up and collection are included. You choose your package, and we can theme the ball colours to match your party.",
    },
    FaqEntry {
        question: "How much space do I need?",
        answer: "It depends on the package and the venue. Most setups work well in a cleared living room or a small hall space. Tell us your venue type and we’ll advise quickly.",
    },
    FaqEntry {
        question: "Can you match my party theme?",
        answer: "Yes. We can match ball colours to your theme. Personalised name and decor-matching decals are included in our Signature package and available as an add-on for other packages.",
    },
    FaqEntry {
        question: "How do I book?",
        answer: "Send your date, postcode/area, package choice and theme. We’ll confirm availability and reply with the next steps.",
    },
    FaqEntry {
        question: "What ages is the setup best for?",
        answer: "Designed for toddlers and young children. Ideal for birthdays, christenings and family events.",
    },
];

/// Hero kicker line: the location strap, or the full service area list
pub fn kicker(location: Option<&Location>) -> String {
    match location {
        Some(location) => location.strap.to_string(),
        None => match SERVICE_AREAS.split_last() {
            Some((last, rest)) if !rest.is_empty() => {
                format!("Serving {} and {}.", rest.join(", "), last)
            }
            _ => format!("Serving {}.", SERVICE_AREAS.join(", ")),
        },
    }
}
