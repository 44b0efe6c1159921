#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("knowledge store unavailable: {0}")]
    Store(#[from] docent_kb::KbError),
}
