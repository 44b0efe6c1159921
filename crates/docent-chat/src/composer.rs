//! Turns the ranked chunk list into the reply shown to the user: marker
//! prefix, conditional inserts, map attachment, and the no-match fallback.

use docent_kb::Settings;
use docent_kb::types::DEFAULT_CONTACT_EMAIL;

use crate::classify::{Topic, tokenize};
use crate::scorer::ScoredChunk;

/// Aid fund named in the financial-aid insert; also the idempotence guard —
/// answers that already mention it get no second paragraph.
pub const AID_PROGRAM: &str = "Tigers Helping Tigers";

const FINANCIAL_AID_INSERT: &str = "\n\n💙 If cost is a concern, the Tigers Helping Tigers fund \
                                    exists exactly for that — email us confidentially and we'll \
                                    help you get there.";

const SOLO_INSERT: &str = "\n\n👥 Coming solo? We have a roommate pairing program and a group \
                           chat to help you connect with classmates before the weekend.";

const COST_TRIGGERS: &[&str] = &[
    "cost",
    "costs",
    "price",
    "prices",
    "fee",
    "fees",
    "afford",
    "expensive",
    "money",
];

const SOLO_TRIGGERS: &[&str] = &["alone", "solo"];

/// The composed reply returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub message: String,
    pub include_map: bool,
    pub map_link: Option<String>,
}

impl Reply {
    fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            include_map: false,
            map_link: None,
        }
    }
}

/// Canned reply for greeting triggers. A short-circuit, not a scored match.
#[must_use]
pub fn greeting_reply() -> Reply {
    Reply::text("Hey there! 🎉 So glad you're interested in the reunion — what would you like to know?")
}

/// Canned reply for gratitude triggers.
#[must_use]
pub fn thanks_reply() -> Reply {
    Reply::text("You're so welcome! Can't wait to see you at the reunion. Any other questions?")
}

/// Compose the reply for `utterance` from the ranked chunks and settings.
///
/// An empty ranking yields the fixed fallback naming the configured contact
/// email; otherwise the top chunk's answer is formatted per the utterance's
/// classified topic.
#[must_use]
pub fn compose(utterance: &str, ranked: &[ScoredChunk<'_>], settings: &Settings) -> Reply {
    let Some(top) = ranked.first() else {
        return Reply::text(fallback_message(settings));
    };

    let tokens = tokenize(utterance);
    let topic = Topic::classify(&tokens);

    let mut message = match topic {
        Some(topic) => format!("{} {}", topic.marker(), top.chunk.answer),
        None => top.chunk.answer.clone(),
    };

    if asks_about_cost(&tokens) && !mentions_aid_program(&top.chunk.answer) {
        message.push_str(FINANCIAL_AID_INSERT);
    }
    if asks_about_solo(utterance, &tokens) {
        message.push_str(SOLO_INSERT);
    }

    let map_link = (topic == Some(Topic::Location) && !settings.map_link.is_empty())
        .then(|| settings.map_link.clone());
    Reply {
        message,
        include_map: map_link.is_some(),
        map_link,
    }
}

fn fallback_message(settings: &Settings) -> String {
    let email = if settings.contact_email.is_empty() {
        DEFAULT_CONTACT_EMAIL
    } else {
        &settings.contact_email
    };
    format!(
        "Hmm, I don't have that information yet. 🤔\n\n\
         Reach out to {email} and a real person will get you an answer!"
    )
}

fn asks_about_cost(tokens: &[String]) -> bool {
    tokens.iter().any(|t| COST_TRIGGERS.contains(&t.as_str()))
}

fn asks_about_solo(utterance: &str, tokens: &[String]) -> bool {
    // Chat clients often send the curly U+2019 apostrophe.
    let normalized = utterance.to_lowercase().replace('\u{2019}', "'");
    tokens.iter().any(|t| SOLO_TRIGGERS.contains(&t.as_str()))
        || normalized.contains("don't know anyone")
}

fn mentions_aid_program(answer: &str) -> bool {
    answer.to_lowercase().contains(&AID_PROGRAM.to_lowercase())
}
