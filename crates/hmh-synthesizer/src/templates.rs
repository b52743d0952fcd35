//! Fixed step templates used when no page yields guidance

use hmh_domain::vocabulary::{BURN_KEYWORDS, NOSEBLEED_KEYWORDS};
use hmh_domain::{EvidenceSource, StepBlock};

/// Which fallback produced the steps of a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepsTier {
    /// Extracted from a trusted page
    Guidance,
    /// Nosebleed first-aid template
    Nosebleed,
    /// Burn first-aid template
    Burn,
    /// Summary of the first cited source
    TopSource,
    /// Generic safe defaults
    Generic,
}

impl StepsTier {
    /// Short name for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            StepsTier::Guidance => "guidance",
            StepsTier::Nosebleed => "nosebleed",
            StepsTier::Burn => "burn",
            StepsTier::TopSource => "top-source",
            StepsTier::Generic => "generic",
        }
    }
}

/// Steps and red flags from a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSteps {
    /// Which template matched
    pub tier: StepsTier,
    /// Step blocks, never empty
    pub steps: Vec<StepBlock>,
    /// When to seek care
    pub red_flags: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn nosebleed() -> TemplateSteps {
    TemplateSteps {
        tier: StepsTier::Nosebleed,
        steps: vec![
            StepBlock::from_static(
                "Stop the bleeding (first aid)",
                &[
                    "Sit upright and lean forward slightly (don\u{2019}t lean back).",
                    "Pinch the soft part of your nose (just below the bony bridge) for 10 minutes continuously.",
                    "Breathe through your mouth; avoid talking/checking the bleeding during the 10 minutes.",
                ],
                "Leaning forward prevents blood from going down your throat and steady pressure allows clotting.",
            ),
            StepBlock::from_static(
                "After it stops",
                &[
                    "Avoid blowing your nose, heavy lifting, or vigorous exercise for 24 hours.",
                    "If your nose feels dry, consider gentle saline spray or humidification.",
                    "If bleeding restarts, repeat 10 minutes of pressure (up to 2\u{2013}3 rounds).",
                ],
                "Clots can re-open easily; dryness and irritation increase re-bleeding risk.",
            ),
        ],
        red_flags: owned(&[
            "Bleeding lasts longer than 20 minutes despite pressure",
            "Heavy bleeding, dizziness, fainting, or trouble breathing",
            "Nosebleed after significant injury or you suspect a broken nose",
            "You take blood thinners (warfarin, apixaban, rivaroxaban, etc.) and bleeding is hard to stop",
            "Frequent recurrent nosebleeds",
        ]),
    }
}

fn burn() -> TemplateSteps {
    TemplateSteps {
        tier: StepsTier::Burn,
        steps: vec![StepBlock::from_static(
            "Cool the burn",
            &[
                "Cool under cool running water for 20 minutes (not ice).",
                "Remove rings/jewelry near the area if possible.",
                "Cover loosely with a clean non-stick dressing.",
            ],
            "Cooling reduces tissue damage; ice can worsen injury.",
        )],
        red_flags: owned(&[
            "Large burn, facial/genital burn, chemical/electrical burn",
            "Blistering with severe pain, or signs of infection",
        ]),
    }
}

fn top_source(top: &EvidenceSource, snippet_chars: usize) -> TemplateSteps {
    let action = match top.snippet.as_deref().filter(|s| !s.is_empty()) {
        Some(snippet) => {
            let head: String = snippet.chars().take(snippet_chars).collect();
            format!("{}...", head)
        }
        None => "Review the linked source for guidance.".to_string(),
    };
    TemplateSteps {
        tier: StepsTier::TopSource,
        steps: vec![StepBlock::new(
            format!("Information from {}", top.publisher),
            vec![action],
            format!("Based on top search result: {}", top.title),
        )],
        red_flags: owned(&["If symptoms worsen", "High fever or severe pain"]),
    }
}

/// The generic safe-defaults template
pub fn generic() -> TemplateSteps {
    TemplateSteps {
        tier: StepsTier::Generic,
        steps: vec![StepBlock::from_static(
            "Basic safe steps",
            &[
                "Rest and hydrate.",
                "Track symptoms (timing, fever, severity 1\u{2013}10).",
                "Seek care if worsening or not improving.",
            ],
            "Safe defaults until more details are known.",
        )],
        red_flags: owned(&[
            "Severe or worsening symptoms",
            "Trouble breathing, chest pain, confusion, fainting",
        ]),
    }
}

/// First matching template: nosebleed, burn, top cited source, generic
pub fn symptom_steps(
    normalized_query: &str,
    sources: &[EvidenceSource],
    snippet_chars: usize,
) -> TemplateSteps {
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| normalized_query.contains(k));

    if mentions(NOSEBLEED_KEYWORDS) {
        nosebleed()
    } else if mentions(BURN_KEYWORDS) {
        burn()
    } else if let Some(top) = sources.first() {
        top_source(top, snippet_chars)
    } else {
        generic()
    }
}
