//! Utterance tokenization and topic classification.
//!
//! A query maps to at most one [`Topic`] via fixed trigger-word lists,
//! checked in priority order. Matching is whole-token: triggers fire on a
//! token of the utterance, never on a substring, so "coffee" does not read
//! as a fee question and "this" does not greet back.

/// Topical query categories, in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Hotel,
    Date,
    Entertainment,
    Activity,
    Registration,
    Location,
    Contact,
}

const HOTEL_TRIGGERS: &[&str] = &[
    "hotel",
    "hotels",
    "housing",
    "marriott",
    "room",
    "rooms",
    "block",
    "stay",
    "staying",
    "accommodation",
    "accommodations",
    "dorm",
    "dorms",
];

const DATE_TRIGGERS: &[&str] = &["when", "date", "dates", "time", "2026"];

const ENTERTAINMENT_TRIGGERS: &[&str] = &[
    "perform",
    "performing",
    "performance",
    "performer",
    "music",
    "stanley",
    "jordan",
    "jazz",
    "entertainment",
    "band",
    "bands",
];

const ACTIVITY_TRIGGERS: &[&str] = &[
    "golf",
    "dinner",
    "dance",
    "dancing",
    "schedule",
    "event",
    "events",
    "activity",
    "activities",
    "barbecue",
];

const REGISTRATION_TRIGGERS: &[&str] = &[
    "cost",
    "costs",
    "price",
    "prices",
    "pricing",
    "fee",
    "fees",
    "register",
    "registration",
    "rsvp",
];

const LOCATION_TRIGGERS: &[&str] = &[
    "where",
    "location",
    "place",
    "venue",
    "address",
    "directions",
];

const CONTACT_TRIGGERS: &[&str] = &["contact", "email", "phone", "call", "reach"];

/// Chunk-side vocabularies that corroborate a classified topic, checked
/// alongside the topic's own trigger list.
const DATE_EVIDENCE: &[&str] = &[
    "may", "2026", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];
const HOTEL_EVIDENCE: &[&str] = &[
    "hotel", "hotels", "marriott", "room", "rooms", "reserved", "rate", "rates", "night",
    "housing", "rider", "bed", "beds",
];
const ENTERTAINMENT_EVIDENCE: &[&str] = &[
    "stanley",
    "jordan",
    "band",
    "jazz",
    "music",
    "entertainment",
    "show",
    "talent",
    "fireworks",
];
const ACTIVITY_EVIDENCE: &[&str] = &[
    "dinner", "dance", "barbecue", "golf", "p-rade", "parade", "schedule", "event", "events",
    "tour", "tours",
];
const REGISTRATION_EVIDENCE: &[&str] = &[
    "cost",
    "price",
    "fee",
    "register",
    "registration",
    "rsvp",
    "deadline",
];
const LOCATION_EVIDENCE: &[&str] = &[
    "location",
    "venue",
    "campus",
    "resort",
    "princeton",
    "address",
];
const CONTACT_EVIDENCE: &[&str] = &["email", "phone", "contact"];

impl Topic {
    /// Classify utterance tokens into zero-or-one topic. First trigger list
    /// to fire wins.
    #[must_use]
    pub fn classify(tokens: &[String]) -> Option<Self> {
        let hit = |triggers: &[&str]| tokens.iter().any(|t| triggers.contains(&t.as_str()));
        if hit(HOTEL_TRIGGERS) {
            Some(Self::Hotel)
        } else if hit(DATE_TRIGGERS) {
            Some(Self::Date)
        } else if hit(ENTERTAINMENT_TRIGGERS) {
            Some(Self::Entertainment)
        } else if hit(ACTIVITY_TRIGGERS) {
            Some(Self::Activity)
        } else if hit(REGISTRATION_TRIGGERS) {
            Some(Self::Registration)
        } else if hit(LOCATION_TRIGGERS) {
            Some(Self::Location)
        } else if hit(CONTACT_TRIGGERS) {
            Some(Self::Contact)
        } else {
            None
        }
    }

    /// Whether chunk-text tokens carry topic-specific evidence, e.g. a
    /// day-of-week or year token for a date query. A topic's own trigger
    /// words always count as evidence for it, so a tagged keyword that
    /// classifies the utterance also corroborates the chunk it tags.
    #[must_use]
    pub fn corroborated_by(self, chunk_tokens: &[String]) -> bool {
        let has = |vocab: &[&str]| chunk_tokens.iter().any(|t| vocab.contains(&t.as_str()));
        match self {
            Self::Hotel => has(HOTEL_TRIGGERS) || has(HOTEL_EVIDENCE),
            Self::Date => has(DATE_TRIGGERS) || has(DATE_EVIDENCE),
            Self::Entertainment => has(ENTERTAINMENT_TRIGGERS) || has(ENTERTAINMENT_EVIDENCE),
            Self::Activity => has(ACTIVITY_TRIGGERS) || has(ACTIVITY_EVIDENCE),
            Self::Registration => {
                has(REGISTRATION_TRIGGERS)
                    || has(REGISTRATION_EVIDENCE)
                    || chunk_tokens.iter().any(|t| t.contains('$'))
            }
            Self::Location => has(LOCATION_TRIGGERS) || has(LOCATION_EVIDENCE),
            Self::Contact => {
                has(CONTACT_TRIGGERS)
                    || has(CONTACT_EVIDENCE)
                    || chunk_tokens.iter().any(|t| t.contains('@'))
            }
        }
    }

    /// Marker token prefixed to answers of this topic.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::Hotel => "🏨",
            Self::Date => "🗓️",
            Self::Entertainment => "🎵",
            Self::Activity => "🎯",
            Self::Registration => "📝",
            Self::Location => "📍",
            Self::Contact => "📧",
        }
    }
}

/// Scoring tokens: lowercase, punctuation trimmed from both ends, tokens of
/// two or fewer characters dropped, de-duplicated in first-seen order.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for token in raw_tokens(text) {
        if token.chars().count() <= 2 {
            continue;
        }
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

/// Lowercased tokens with edge punctuation trimmed but no length filter.
/// Interior punctuation survives, so "don't" and "p-rade" stay whole.
fn raw_tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().filter_map(|raw| {
        let token: &str = raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '$' && c != '@');
        if token.is_empty() {
            None
        } else {
            Some(token.to_lowercase())
        }
    })
}

/// Greeting short-circuit trigger. Checked against unfiltered tokens since
/// "hi" is shorter than the scoring-token cutoff.
#[must_use]
pub fn is_greeting(utterance: &str) -> bool {
    raw_tokens(utterance).any(|t| matches!(t.as_str(), "hello" | "hi" | "hey"))
}

/// Gratitude short-circuit trigger: any token starting with "thank".
#[must_use]
pub fn is_thanks(utterance: &str) -> bool {
    raw_tokens(utterance).any(|t| t.starts_with("thank"))
}
