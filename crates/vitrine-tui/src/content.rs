//! Brand copy and fixture data rendered by the sections
//!
//! Everything user-visible lives here so the section widgets stay pure
//! layout. The tone is fixed: serious, precise, no exclamation marks.

pub const BRAND: &str = "Abrar Bangles";

// Loader

pub const LOADER_STATUS: &str = "Initializing Sequence";

// Hero

pub const HERO_TITLE_ACCENT: &str = "Precision";
pub const HERO_TITLE: &str = "Illuminated.";
pub const HERO_COPY: &str = "An exclusive luxury boutique offering authentic, handcrafted \
glass designed for modern bridal wear and high-end fashion.";
pub const HERO_BUTTON: &str = "Explore the Exclusive Collection";
pub const HERO_BADGE: &str = "Bridal Ateliers";

// Sales dashboard

pub const DASHBOARD_TITLE: &str = "Market";
pub const DASHBOARD_TITLE_ACCENT: &str = "Resonance";
pub const DASHBOARD_SUBTITLE: &str = "Bridal Collection Q1-Q8";
pub const DASHBOARD_BADGE_TREND: &str = "+ 42.5%";
pub const DASHBOARD_BADGE_LIVE: &str = "Live";
/// Quarterly figures behind the bar graph, in percent of a baseline
pub const DASHBOARD_BARS: [u16; 8] = [20, 45, 30, 80, 50, 95, 60, 110];

pub const PRIORITY_TITLE: &str = "Request";
pub const PRIORITY_TITLE_ACCENT: &str = "Priority Access";
pub const PRIORITY_COPY: &str = "Join the registry to secure your allocation for the \
upcoming bridal release. Volumes are strictly limited.";
pub const PRIORITY_NAME_LABEL: &str = "Full Name";
pub const PRIORITY_NAME_PLACEHOLDER: &str = "Jane Doe";
pub const PRIORITY_EMAIL_LABEL: &str = "Private Email";
pub const PRIORITY_EMAIL_PLACEHOLDER: &str = "jane@example.com";
pub const PRIORITY_SUBMIT: &str = "Submit Request";
pub const PRIORITY_FOOTNOTE: &str = "Secure encrypted connection";
pub const PRIORITY_SUCCESS: &str = "Access Requested Successfully.";
pub const PRIORITY_SUCCESS_DETAIL: &str = "Our concierge will contact you shortly.";

// Feature cards

pub struct FeatureCard {
    pub title: &'static str,
    pub tagline: &'static str,
}

pub const FEATURE_CARDS: [FeatureCard; 3] = [
    FeatureCard {
        title: "Diagnostic Shuffler",
        tagline: "Precision-crafted authenticity.",
    },
    FeatureCard {
        title: "Telemetry Feed",
        tagline: "Deep, striking color palettes.",
    },
    FeatureCard {
        title: "Quality Signal",
        tagline: "Uncompromising packaging durability.",
    },
];

pub const DIAGNOSTIC_ROWS: [&str; 4] = [
    "100% Authentic Glass",
    "Master Artisan Forged",
    "Flawless Symmetry",
    "Kiln Fired Brilliance",
];

pub const TELEMETRY_MESSAGES: [&str; 4] = [
    "Formulating Crimson Base...",
    "Precision Matching Bridal Tones...",
    "Testing Light Refraction...",
    "Curing at Optimal Temp...",
];

// Philosophy

pub const PHILOSOPHY_ASIDE: &str = "Most jewelry brands focus on mass production and \
synthetic materials.";
pub const PHILOSOPHY_LEAD: [&str; 3] = ["We", "focus", "on"];
pub const PHILOSOPHY_ACCENT_CRIMSON: &str = "flawless symmetry";
pub const PHILOSOPHY_JOIN: &str = "and";
pub const PHILOSOPHY_ACCENT_RUBY: &str = "brilliant glass.";

// Testimonials

pub struct Testimonial {
    pub quote: &'static str,
    pub author: &'static str,
    pub role: &'static str,
    pub location: &'static str,
}

pub const TESTIMONIALS: [Testimonial; 3] = [
    Testimonial {
        quote: "The deep crimson set matched my bridal lehenga with absolute perfection. \
The light reflection is unlike any glass I've ever seen.",
        author: "Sara M.",
        role: "Recent Bride",
        location: "London, UK",
    },
    Testimonial {
        quote: "A completely different level of craftsmanship. They didn't just feel like \
accessories, they felt like art pieces on my wrists.",
        author: "Ayesha R.",
        role: "Boutique Owner",
        location: "Dubai, UAE",
    },
    Testimonial {
        quote: "The velvet box alone told me this was luxury. But wearing them? The weight, \
the finish, the perfection. Simply breathtaking.",
        author: "Fatima K.",
        role: "Luxury Collector",
        location: "New York, USA",
    },
];

// Account panel

pub const SIGN_IN_TITLE: &str = "Welcome Back";
pub const SIGN_IN_COPY: &str = "Access your exclusive Abrar Bangles portfolio.";
pub const SIGN_IN_BUTTON: &str = "Sign In";
pub const SIGN_IN_PROMPT: &str = "Don't have an account?";
pub const REGISTER_TITLE: &str = "Create Account";
pub const REGISTER_COPY: &str = "Join the registry for priority collection access.";
pub const REGISTER_BUTTON: &str = "Register";
pub const REGISTER_PROMPT: &str = "Already have an account?";
pub const ACCOUNT_NAME_LABEL: &str = "Full Name";
pub const ACCOUNT_NAME_PLACEHOLDER: &str = "Jane Doe";
pub const ACCOUNT_EMAIL_LABEL: &str = "Email Address";
pub const ACCOUNT_EMAIL_PLACEHOLDER: &str = "jane@example.com";
pub const ACCOUNT_PASSWORD_LABEL: &str = "Password";
pub const ACCOUNT_PASSWORD_PLACEHOLDER: &str = "••••••••";
pub const SIGN_IN_SUCCESS: &str = "Signed in successfully.";
pub const REGISTER_SUCCESS: &str = "Account created successfully.";

// Final call to action

pub const CTA_TITLE: &str = "Discover Perfection.";
pub const CTA_COPY: &str = "Your piece of flawless, handcrafted art awaits. Explore the \
full bridal and exclusivity collections today.";
pub const CTA_BUTTON: &str = "Shop the Collection";

// Footer

pub const FOOTER_BLURB: &str = "Authentic, handcrafted glass bangles for modern bridal \
wear and high-end fashion.";
pub const FOOTER_STATUS: &str = "Workshop Operational";

pub struct FooterColumn {
    pub title: &'static str,
    pub links: &'static [&'static str],
}

pub const FOOTER_COLUMNS: [FooterColumn; 2] = [
    FooterColumn {
        title: "Collection",
        links: &[
            "Bridal Exclusives",
            "Evening Wear",
            "Wholesale",
            "Custom Orders",
        ],
    },
    FooterColumn {
        title: "Company",
        links: &["Our Story", "Craftsmanship", "Contact", "FAQ"],
    },
];

pub const FOOTER_LEGAL: [&str; 2] = ["Privacy Policy", "Terms of Service"];
