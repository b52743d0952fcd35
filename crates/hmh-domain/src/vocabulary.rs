//! Fixed vocabularies
//!
//! Process-wide immutable tables used by the classifiers, the candidate locator
//! and the HTML extractor. All entries are lower-case; callers lower-case the
//! text they match against.

/// Literal substitutions applied during query normalization
pub const QUERY_SUBSTITUTIONS: &[(&str, &str)] = &[("nose bleed", "nosebleed")];

/// Guidance domains accepted by the trust filter (host or any subdomain)
pub const TRUSTED_GUIDANCE_DOMAINS: &[&str] = &[
    "medlineplus.gov",
    "nhs.uk",
    "nhsinform.scot",
    "redcross.org",
    "cdc.gov",
    "mayoclinic.org",
    "clevelandclinic.org",
    "hopkinsmedicine.org",
    "health.harvard.edu",
];

/// Domain of the highest-trust guidance site
pub const SITE_DOMAIN: &str = "nhs.uk";

/// Query phrases that set the urgent triage record
pub const URGENT_QUERY_TERMS: &[&str] = &[
    "chest pain",
    "trouble breathing",
    "shortness of breath",
    "faint",
    "passed out",
    "worst headache",
    "confusion",
    "stroke",
    "face droop",
    "severe allergic",
];

/// Phrases that mark a list as an emergency / red-flag list
pub const STRONG_EMERGENCY_PHRASES: &[&str] = &[
    "call 999",
    "go to a&e",
    "immediate action required",
    "emergency",
    "stiff neck",
    "glass test",
    "does not fade when you press",
    "difficulty breathing",
    "breathlessness",
    "breathing very fast",
    "pale, blue, grey",
    "pale blue",
    "blue lips",
    "grey lips",
    "confused",
    "not responding",
    "throat feels tight",
    "struggling to swallow",
    "sudden swelling of",
    "tongue look",
    "lips or tongue",
];

/// Minimum strong-phrase hits for a red-flag list
pub const RED_FLAG_MIN_HITS: usize = 2;

/// First words that make a list item read as an action
pub const ACTION_VERB_STARTERS: &[&str] = &[
    "try", "do", "avoid", "keep", "get", "talk", "speak", "tell", "contact", "call", "go",
    "make", "write", "practice", "reduce", "cut", "limit", "rest", "drink", "eat", "use",
    "take", "stay", "plan", "book",
];

/// Minimum verb-start hits for an action list
pub const ACTION_LIST_MIN_HITS: usize = 2;

/// Minimum items for an action list
pub const ACTION_LIST_MIN_ITEMS: usize = 3;

/// Headings that introduce self-care steps
pub const POSITIVE_STEP_HEADINGS: &[&str] = &[
    "things you can do",
    "things you can do to help",
    "self-help",
    "help yourself",
    "what you can do",
    "what to do",
    "help and support",
    "tips",
    "tips and support",
    "coping",
    "cope with",
    "how to cope",
    "support",
];

/// Phrase whose presence earns the heavier heading weight
pub const STRONG_STEP_HEADING: &str = "things you can do";

/// Headings that never introduce self-care steps
pub const NEGATIVE_STEP_HEADINGS: &[&str] = &[
    "symptoms",
    "signs",
    "causes",
    "check if",
    "diagnosis",
    "complications",
];

/// Headings skipped by the heading+paragraph fallback
pub const NARRATIVE_SKIP_HEADINGS: &[&str] =
    &["audio", "more in", "page last reviewed", "next review due"];

/// Exact heading texts of a "Do" list
pub const DO_HEADINGS: &[&str] = &["do", "dos"];

/// Exact heading texts of a "Don't" list
pub const DONT_HEADINGS: &[&str] = &["don't", "dont", "do not", "don'ts", "donts"];

/// Class fragment of styled care cards
pub const CARE_CARD_CLASS: &str = "nhsuk-card--care";

/// Care-card heading markers that signal urgent care
pub const CARE_CARD_MARKERS: &[&str] =
    &["999", "a&e", "emergency", "urgent", "111", "call", "doctor", "gp"];

/// Plain headings that introduce urgent-care lists
pub const URGENT_HEADINGS: &[&str] = &[
    "call 999",
    "ask for an urgent gp appointment",
    "call 111",
    "urgent advice",
    "seek medical help",
];

/// Table header / caption keywords of a cause table
pub const CAUSE_TABLE_KEYWORDS: &[&str] =
    &["cause", "condition", "symptom", "type of", "check if you have"];

/// Headings that introduce a cause list
pub const CAUSE_HEADINGS: &[&str] =
    &["causes", "check if you have", "possible causes", "common causes"];

/// Headings that introduce prevention tips
pub const PREVENTION_HEADINGS: &[&str] = &["prevent", "avoid", "stop", "reduce risk"];

/// Keywords of a prevention sentence in a source snippet
pub const PREVENTION_SENTENCE_KEYWORDS: &[&str] =
    &["prevent", "avoid", "reduce risk", "prophylaxis"];

/// Words removed from topic-search terms
pub const TOPIC_STOP_WORDS: &[&str] = &[
    "help",
    "treatment",
    "symptoms",
    "cure",
    "for",
    "steps",
    "guide",
    "what to do",
];

/// Site paths that are navigation hubs, never results
pub const SITE_HUB_PATHS: &[&str] = &[
    "/mental-health/",
    "/healthy-living/",
    "/care-and-support/",
    "/nhs-services/",
    "/health-a-to-z/",
];

/// Site path fragments of content pages
pub const SITE_CONTENT_PATHS: &[&str] = &["/conditions/", "/symptoms/", "/mental-health/"];

/// Site path fragment of medicine pages
pub const SITE_MEDICINE_PATH: &str = "/medicines/";

/// Heading that ends the result region of the site search page
pub const SITE_SEARCH_STOP_HEADING: &str = "support links";

/// Hub-page marker: heading text
pub const HUB_HEADING_MARKER: &str = "healthy living";

/// Hub-page marker: body text
pub const HUB_BODY_MARKER: &str = "top tasks";

/// Keywords of the nosebleed template
pub const NOSEBLEED_KEYWORDS: &[&str] = &[
    "bloody nose",
    "nosebleed",
    "nose bleed",
    "bleeding from my nose",
    "bleeding from the nose",
    "epistaxis",
];

/// Keywords of the burn template
pub const BURN_KEYWORDS: &[&str] = &["burn"];

/// A keyword override that wins over the broad keyword table
#[derive(Debug, Clone, Copy)]
pub struct PriorityOverride {
    /// Any of these phrases triggers the override
    pub triggers: &'static [&'static str],
    /// Candidate title
    pub title: &'static str,
    /// Candidate URL
    pub url: &'static str,
}

/// Overrides checked in order before the keyword table
pub const PRIORITY_OVERRIDES: &[PriorityOverride] = &[
    PriorityOverride {
        triggers: &["anxiety", "panic", "panic attack", "fear"],
        title: "NHS help: anxiety, fear and panic",
        url: "https://www.nhs.uk/mental-health/feelings-symptoms-behaviours/feelings-and-symptoms/anxiety-fear-panic/",
    },
    PriorityOverride {
        triggers: &["depression", "depressed", "low mood"],
        title: "NHS self-help: cope with depression",
        url: "https://www.nhs.uk/mental-health/self-help/tips-and-support/cope-with-depression/",
    },
    PriorityOverride {
        triggers: &["rash", "skin rash", "itchy rash"],
        title: "NHS guidance: hives",
        url: "https://www.nhs.uk/conditions/hives/",
    },
];
