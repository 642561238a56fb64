use rules::Position;

/// Static position scoring.
///
/// Scores are in centipawns from White's perspective: positive favors White,
/// negative favors Black. Implementations must handle terminal positions
/// and must not mutate anything.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, position: &dyn Position) -> f32;
}
