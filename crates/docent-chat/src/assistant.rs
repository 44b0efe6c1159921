//! The conversational entry point: greeting/thanks short-circuits, then
//! settings + active chunks are read, scored, and composed into a reply.

use std::sync::Arc;

use docent_kb::{KnowledgeStore, SettingsStore};

use crate::classify;
use crate::composer::{self, Reply};
use crate::error::ChatError;
use crate::scorer;

/// Transcript roles. History is accepted for interface stability; the
/// answering path does not condition on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Stateless FAQ assistant over a knowledge store and a settings record.
///
/// Each [`Assistant::answer`] call is a pure function of the utterance, the
/// current active-chunk set, and the current settings snapshot.
pub struct Assistant {
    store: Arc<dyn KnowledgeStore>,
    settings: Arc<dyn SettingsStore>,
}

impl Assistant {
    #[must_use]
    pub fn new(store: Arc<dyn KnowledgeStore>, settings: Arc<dyn SettingsStore>) -> Self {
        Self { store, settings }
    }

    /// Answer one utterance against the current knowledge-base snapshot.
    ///
    /// Greeting and gratitude triggers return a canned reply without any
    /// store access. An empty or unmatched knowledge base yields the
    /// fallback reply, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Store`] when reading settings or chunks fails —
    /// the assistant never fabricates an answer it cannot back with a
    /// knowledge-base snapshot.
    pub async fn answer(
        &self,
        utterance: &str,
        _history: &[ChatMessage],
    ) -> Result<Reply, ChatError> {
        if classify::is_greeting(utterance) {
            return Ok(composer::greeting_reply());
        }
        if classify::is_thanks(utterance) {
            return Ok(composer::thanks_reply());
        }

        let settings = self.settings.get_settings().await?;
        let chunks = self.store.list_active_chunks().await?;
        let ranked = scorer::score(utterance, &chunks);
        tracing::debug!(
            candidates = chunks.len(),
            matched = ranked.len(),
            top = ranked.first().map_or("-", |s| s.chunk.id.as_str()),
            "scored utterance"
        );
        Ok(composer::compose(utterance, &ranked, &settings))
    }
}

#[cfg(test)]
mod tests {
    use docent_kb::{Chunker, Document, InMemoryStore, IngestionPipeline};

    use super::*;

    async fn assistant_with(content: &str, category: &str) -> (Assistant, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let pipeline = IngestionPipeline::new(
            Chunker::default(),
            Arc::clone(&store) as Arc<dyn KnowledgeStore>,
        );
        pipeline
            .ingest(Document::new("faq.json", content, "application/json", category))
            .await
            .unwrap();
        let assistant = Assistant::new(
            Arc::clone(&store) as Arc<dyn KnowledgeStore>,
            Arc::clone(&store) as Arc<dyn SettingsStore>,
        );
        (assistant, store)
    }

    fn empty_assistant() -> Assistant {
        let store = Arc::new(InMemoryStore::new());
        Assistant::new(
            Arc::clone(&store) as Arc<dyn KnowledgeStore>,
            store as Arc<dyn SettingsStore>,
        )
    }

    #[tokio::test]
    async fn greeting_short_circuits_without_store_access() {
        let assistant = empty_assistant();
        let reply = assistant.answer("hello", &[]).await.unwrap();
        assert_eq!(reply, composer::greeting_reply());
    }

    #[tokio::test]
    async fn thanks_short_circuits() {
        let assistant = empty_assistant();
        let reply = assistant.answer("thanks a lot", &[]).await.unwrap();
        assert_eq!(reply, composer::thanks_reply());
    }

    #[tokio::test]
    async fn empty_knowledge_base_falls_back_with_contact() {
        let assistant = empty_assistant();
        let reply = assistant
            .answer("what activities are planned", &[])
            .await
            .unwrap();
        assert!(reply.message.contains(docent_kb::types::DEFAULT_CONTACT_EMAIL));
        assert!(!reply.include_map);
    }

    #[tokio::test]
    async fn answers_from_ingested_faq() {
        let content = r#"[{
            "question": "When is the reunion?",
            "answer": "May 21-24, 2026 — Thursday through Sunday.",
            "category": "Dates",
            "keywords": ["dates", "when"]
        }]"#;
        let (assistant, _store) = assistant_with(content, "General").await;
        let reply = assistant.answer("when is the reunion", &[]).await.unwrap();
        assert!(reply.message.starts_with("🗓️"));
        assert!(reply.message.contains("May 21-24, 2026"));
    }

    #[tokio::test]
    async fn history_does_not_change_the_answer() {
        let content = r#"[{
            "question": "When is the reunion?",
            "answer": "May 21-24, 2026.",
            "category": "Dates"
        }]"#;
        let (assistant, _store) = assistant_with(content, "General").await;
        let history = vec![
            ChatMessage {
                role: Role::User,
                content: "where is it held".to_owned(),
            },
            ChatMessage {
                role: Role::Assistant,
                content: "On campus.".to_owned(),
            },
        ];
        let bare = assistant.answer("when is the reunion", &[]).await.unwrap();
        let with_history = assistant.answer("when is the reunion", &history).await.unwrap();
        assert_eq!(bare, with_history);
    }

    #[tokio::test]
    async fn repeated_answers_are_byte_identical() {
        let content = r#"[{
            "question": "What housing options are available?",
            "answer": "Hotel block, campus waitlist, or book your own.",
            "category": "Housing"
        }]"#;
        let (assistant, _store) = assistant_with(content, "General").await;
        let first = assistant.answer("housing options", &[]).await.unwrap();
        for _ in 0..3 {
            let again = assistant.answer("housing options", &[]).await.unwrap();
            assert_eq!(first, again);
        }
    }
}
