//! Chat core for Docent: topic classification, lexical relevance scoring,
//! and response composition over a [`docent_kb`] knowledge store.
//!
//! The public entry point is [`Assistant::answer`]: greeting and gratitude
//! short-circuits first, then the active chunks are scored against the
//! utterance ([`scorer::score`]) and the top chunk is formatted into a
//! [`Reply`] ([`composer::compose`]).

pub mod assistant;
pub mod classify;
pub mod composer;
pub mod error;
pub mod scorer;

pub use assistant::{Assistant, ChatMessage, Role};
pub use classify::Topic;
pub use composer::Reply;
pub use error::ChatError;
pub use scorer::ScoredChunk;
