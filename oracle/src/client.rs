use std::time::Duration;

use rules::{count_pieces, Move, Position};

use crate::error::OracleError;
use crate::tablebase::{Tablebase, TablebaseMove};

/// Most pieces, kings included, for which the oracle is consulted.
pub const DEFAULT_MAX_PIECES: usize = 7;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Overrides the search with a tablebase answer near the end of the game.
pub struct EndgameOracle {
    tablebase: Box<dyn Tablebase>,
    max_pieces: usize,
    timeout: Duration,
}

impl EndgameOracle {
    pub fn new(tablebase: impl Tablebase + 'static) -> Self {
        Self {
            tablebase: Box::new(tablebase),
            max_pieces: DEFAULT_MAX_PIECES,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_max_pieces(mut self, max_pieces: usize) -> Self {
        self.max_pieces = max_pieces;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_pieces(&self) -> usize {
        self.max_pieces
    }

    /// True when `fen` has few enough pieces to be worth a probe.
    pub fn applies_to(&self, fen: &str) -> bool {
        count_pieces(fen) <= self.max_pieces
    }

    /// The tablebase's best legal move, or `None` when the position is out of
    /// range or the lookup fails in any way.
    pub async fn query(&self, position: &dyn Position) -> Option<Move> {
        let fen = position.fen();
        if !self.applies_to(&fen) {
            return None;
        }

        let entries = match self.probe(&fen).await {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Tablebase lookup failed, falling back to search: {}", e);
                return None;
            }
        };

        let best = best_entry(&entries)?;
        let found = position
            .legal_moves()
            .into_iter()
            .find(|mv| mv.matches(&best.uci) || mv.matches(&best.san));

        match found {
            Some(mv) => {
                log::debug!("Tablebase picks {} ({:?}, {:?})", mv, best.outcome, best.distance);
                Some(mv)
            }
            None => {
                log::warn!("Tablebase move {} is not legal in {}", best.uci, fen);
                None
            }
        }
    }

    async fn probe(&self, fen: &str) -> Result<Vec<TablebaseMove>, OracleError> {
        tokio::time::timeout(self.timeout, self.tablebase.probe(fen))
            .await
            .map_err(|_| OracleError::Timeout(self.timeout))?
    }
}

/// Highest metric wins; the first of equal entries is kept.
fn best_entry(entries: &[TablebaseMove]) -> Option<&TablebaseMove> {
    let mut best: Option<(i64, &TablebaseMove)> = None;
    for entry in entries {
        let Some(metric) = entry.metric() else {
            continue;
        };
        if best.map_or(true, |(top, _)| metric > top) {
            best = Some((metric, entry));
        }
    }
    best.map(|(_, entry)| entry)
}
