// Score bounds and special values for the search.

/// Base value of a checkmate. Large enough that no material balance comes close.
pub const MATE_SCORE: f32 = 100_000.0;

/// Added per ply of depth still remaining when a mate is found, so that
/// quicker mates outrank slower ones.
pub const MATE_PLY_BONUS: f32 = 100.0;

pub const DRAW_SCORE: f32 = 0.0;

/// Anything at or beyond this magnitude is a forced mate.
#[inline(always)]
pub fn is_mate_score(score: f32) -> bool {
    score.abs() >= MATE_SCORE
}
