use rules::GamePhase;
use serde::{Deserialize, Serialize};

/// Plies searched below each root candidate, by game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseDepths {
    pub opening: u8,
    pub middlegame: u8,
    pub endgame: u8,
}

impl Default for PhaseDepths {
    fn default() -> Self {
        Self {
            opening: 2,
            middlegame: 2,
            endgame: 3,
        }
    }
}

impl PhaseDepths {
    pub fn uniform(depth: u8) -> Self {
        Self {
            opening: depth,
            middlegame: depth,
            endgame: depth,
        }
    }

    #[inline(always)]
    pub fn for_phase(&self, phase: GamePhase) -> u8 {
        match phase {
            GamePhase::Opening => self.opening,
            GamePhase::Middlegame => self.middlegame,
            GamePhase::Endgame => self.endgame,
        }
    }

    pub fn min(&self) -> u8 {
        self.opening.min(self.middlegame).min(self.endgame)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub depth_by_phase: PhaseDepths,
    /// Evaluate root candidates on independent copies in a thread pool.
    pub parallel: bool,
    /// Worker count for the parallel path. 0 uses every core.
    pub threads: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth_by_phase: PhaseDepths::default(),
            parallel: false,
            threads: 0,
        }
    }
}
