//! Built-in starter FAQ ingested through the normal pipeline, so a fresh
//! install answers the common questions immediately.

use std::sync::Arc;

use docent_kb::{Document, IngestionPipeline, KnowledgeStore};

pub const SEED_DOCUMENT_NAME: &str = "starter-faq.json";

/// Structured-data payload in the same shape uploaded FAQ files use.
const SEED_FAQS: &str = r#"{
  "faqs": [
    {
      "question": "When is the reunion?",
      "answer": "May 21-24, 2026 (Thursday through Sunday). Four full days of events, entertainment, and reconnecting with classmates.",
      "category": "Dates",
      "keywords": ["dates", "when", "schedule", "timing"]
    },
    {
      "question": "When does registration open?",
      "answer": "Registration opens in late November. Early bird pricing ends December 31, 2025 ($400 vs $500-600 later), so the earlier you register, the more you save.",
      "category": "Registration",
      "keywords": ["registration", "register", "early bird", "open"]
    },
    {
      "question": "How much does registration cost?",
      "answer": "Early bird registration (through December 31, 2025) is $400. Regular registration is $500, and late registration closer to the reunion is $600. Registration includes all meals Thursday through Sunday plus all entertainment.",
      "category": "Registration",
      "keywords": ["cost", "price", "fee", "how much"]
    },
    {
      "question": "What housing options are available?",
      "answer": "You have several options: the campus housing waitlist, the most affordable partner-university rooms ($159-210 for three nights with a shuttle), a hotel block at area hotels ($209-549/night), or booking your own room nearby.",
      "category": "Housing",
      "keywords": ["housing", "hotel", "rooms", "accommodation", "stay"]
    },
    {
      "question": "I'm worried about cost. Can I get help?",
      "answer": "If cost is your only barrier, please don't let that stop you. The Tigers Helping Tigers fund exists exactly for this — email the organizers confidentially and just say you need help. No forms, no proof of income, no judgment.",
      "category": "Financial Assistance",
      "keywords": ["afford", "assistance", "tigers helping tigers", "money"]
    },
    {
      "question": "What entertainment is planned?",
      "answer": "Live bands Friday and Saturday night, fireworks, the parade, and four days of events designed for reconnecting with classmates. The Saturday headliner is a classmate and Grammy-nominated jazz guitarist.",
      "category": "Entertainment",
      "keywords": ["entertainment", "music", "bands", "fireworks"]
    },
    {
      "question": "I don't know anyone anymore. Should I still come?",
      "answer": "You're definitely not alone — lots of classmates feel this way. Join the group chat before the weekend, and if you're traveling solo we can pair you with other solo travelers for roommate sharing. Some of the best reunion connections happen with classmates you barely knew.",
      "category": "General",
      "keywords": ["alone", "solo", "connections", "friends"]
    },
    {
      "question": "Where can I find more information?",
      "answer": "Email the organizers at contact@reunion.com for general questions and registration help, or check the reunion website linked from your class newsletter.",
      "category": "Communication",
      "keywords": ["contact", "email", "information", "website"]
    }
  ]
}"#;

/// Ingest the starter FAQ. Idempotent by document name: a previously seeded
/// document is removed first, so re-seeding replaces rather than duplicates.
///
/// # Errors
///
/// Returns an error if a store access fails.
pub async fn run(
    store: &Arc<dyn KnowledgeStore>,
    pipeline: &IngestionPipeline,
) -> anyhow::Result<usize> {
    for existing in store.list_documents().await? {
        if existing.name == SEED_DOCUMENT_NAME {
            store.delete_document(&existing.id).await?;
        }
    }

    let document = Document::new(SEED_DOCUMENT_NAME, SEED_FAQS, "application/json", "General");
    let count = pipeline.ingest(document).await?;
    tracing::info!(chunks = count, "starter FAQ seeded");
    Ok(count)
}
