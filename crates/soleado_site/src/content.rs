//! Static page copy
//!
//! Read-only. Sections use it to build their elements; the CLI prints from it.

/// One FAQ entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const FAQS: &[FaqEntry] = &[
    FaqEntry {
        question: "What do you need from me to book?",
        answer: "Date, postcode/area, which package you want, and your theme (so we can match ball colours and decals where relevant).",
    },
    FaqEntry {
        question: "Do the balls match the theme?",
        answer: "Yes. Ball colours can be chosen to suit your party theme.",
    },
    FaqEntry {
        question: "Is personalisation included?",
        answer: "Personalised name + decor-matching decals are included in The Soleado Signature package. It’s also available as an add-on for £10.",
    },
    FaqEntry {
        question: "How many children is it suitable for?",
        answer: "Sunshine Starter is ideal for around 4–6 little ones. Soleado Signature is best for 8–10 children. Little Rays sits nicely in the middle.",
    },
    FaqEntry {
        question: "Where do you cover?",
        answer: "Local to Leigh, Wigan, Bolton, Warrington and Greater Manchester. If you’re just outside, ask anyway. We may be able to accommodate you.",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Package {
    pub name: &'static str,
    pub price: &'static str,
    pub tagline: &'static str,
    pub bullets_lead: &'static str,
    pub bullets: &'static [&'static str],
    pub note: &'static str,
    pub badge: &'static str,
    pub featured: bool,
}

pub const PACKAGES: &[Package] = &[
    Package {
        name: "The Sunshine Starter",
        price: "£70",
        tagline: "Perfect for smaller parties or younger babies discovering soft play for the first time.",
        bullets_lead: "Includes:",
        bullets: &[
            "Flooring",
            "Ball pit (with balls to match theme)",
            "Step & slide",
            "2 ride-on hoppers",
            "Tunnel",
            "Teepee",
        ],
        note: "Ideal for around 4–6 little ones.",
        badge: "Budget friendly",
        featured: true,
    },
    Package {
        name: "The Little Rays Package",
        price: "£100",
        tagline: "A bright and cheerful setup for your little one’s special day.",
        bullets_lead: "Includes:",
        bullets: &[
            "Flooring",
            "Ball pit (with balls to match theme)",
            "Step & slide",
            "Maxi castle blocks",
            "2 ride-on hoppers",
            "Tunnel",
            "Teepee",
            "2 balance bikes / ride on cars",
        ],
        note: "Perfect for birthdays and indoor venues.",
        badge: "Most popular",
        featured: true,
    },
    Package {
        name: "The Soleado Signature",
        price: "£130",
        tagline: "Our full soft play experience, everything you need for a truly unforgettable celebration.",
        bullets_lead: "Includes everything in The Little Rays Package, plus:",
        bullets: &[
            "Slide into ball pit",
            "Double rocker",
            "Personalised soft play with name and decals to match the decor",
        ],
        note: "Best for 8–10 children and fully customisable to your theme.",
        badge: "Full experience",
        featured: false,
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddOn {
    pub name: &'static str,
    pub price: &'static str,
    pub note: &'static str,
}

pub const ADD_ONS: &[AddOn] = &[
    AddOn {
        name: "Personalised name + theme",
        price: "£10",
        note: "Already included in The Soleado Signature package.",
    },
    AddOn {
        name: "Extra hoppers / ride-ons",
        price: "£5 each",
        note: "",
    },
];

/// A titled step with a short description
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub title: &'static str,
    pub detail: &'static str,
}

pub const BOOKING_STEPS: &[Step] = &[
    Step {
        title: "Send your details",
        detail: "Date, postcode/area, package (Sunshine Starter / Little Rays / Soleado Signature) and your theme.",
    },
    Step {
        title: "We confirm availability",
        detail: "We’ll reply with the next steps and any delivery info.",
    },
    Step {
        title: "Delivery, setup, collect",
        detail: "We arrive, set up, and collect after. You don’t need to lift a thing.",
    },
];

/// Short key/value highlight
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Highlight {
    pub key: &'static str,
    pub value: &'static str,
}

pub const INCLUDED: &[Highlight] = &[
    Highlight {
        key: "Set up + pack down",
        value: "We assemble it for you",
    },
    Highlight {
        key: "Theme matching",
        value: "Ball colours to suit",
    },
    Highlight {
        key: "Personalised decals",
        value: "Included in Signature",
    },
    Highlight {
        key: "Venue-ready",
        value: "Homes & halls",
    },
];

pub const HERO_STATS: &[Highlight] = &[
    Highlight {
        key: "Packages",
        value: "£70–£130",
    },
    Highlight {
        key: "Themes",
        value: "Balls + decals",
    },
    Highlight {
        key: "Setup",
        value: "We handle it",
    },
    Highlight {
        key: "Best for",
        value: "4–10 kids",
    },
];

pub const HERO_TITLE: &str = "Boutique soft play hire that looks incredible at parties.";

pub const HERO_INTRO: &str = "White, photo-friendly soft play with themed balls and personalised decals. We deliver, set up and collect. You get the memories (and the photos).";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GalleryImage {
    pub alt: &'static str,
    pub tag: &'static str,
}

pub const GALLERY: &[GalleryImage] = &[
    GalleryImage {
        alt: "Soft play setup with pink and pearl ball pit and personalised signage",
        tag: "Baptism",
    },
    GalleryImage {
        alt: "Soft play setup with personalised first birthday signage and themed balls",
        tag: "1st Birthday",
    },
    GalleryImage {
        alt: "Winter themed soft play setup with teepee and ball pit",
        tag: "Winter",
    },
    GalleryImage {
        alt: "Close-up of ball pit with orange and black Halloween theme balls",
        tag: "Halloween",
    },
];

/// Contact buttons in the enquiry section
pub const ENQUIRY_CTAS: &[&str] = &["WhatsApp us", "Email", "Call"];

/// Enquiry form rows: four inputs, the submit buttons, and the hint line
pub const ENQUIRY_FIELDS: &[&str] = &[
    "Name",
    "Event date",
    "Postcode / area",
    "Package (Sunshine Starter / Little Rays / Soleado Signature) + theme + any add-ons",
    "Send via WhatsApp | Send via Email",
    "This opens your chosen app with the message prefilled.",
];
