/// Recoverable failures at the rules boundary, raised only for input that
/// comes from outside the engine (FEN strings, user-entered moves).
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("no legal move matches '{notation}' in {fen}")]
    IllegalMove { notation: String, fen: String },
}
