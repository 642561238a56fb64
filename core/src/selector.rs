use evaluation::scores::is_mate_score;
use evaluation::{MaterialEvaluator, PieceValues};
use oracle::{EndgameOracle, LichessTablebase};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::ThreadPool;
use rules::{Color, GamePhase, Move, Position, ScopedMove};
use search::{AlphaBeta, MoveScorer};

use crate::adjustments::{worst_hanging_loss, Adjustments};
use crate::config::{EngineConfig, OracleConfig};
use crate::opening::OpeningBook;

/// Which step of the selection produced the committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    Opening,
    Oracle,
    MateInOne,
    Search,
    Fallback,
}

/// What the last `select_move` call did.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionReport {
    pub mv: Move,
    pub source: SelectionSource,
    /// Adjusted root score of the chosen move, in the mover's favour. Only
    /// set when the move came out of the search.
    pub score: Option<f32>,
    /// Search nodes visited. Zero when the search was skipped.
    pub nodes: u64,
    /// Root candidates scored by the search.
    pub candidates: usize,
}

/// Search result for one root move, before noise.
struct Candidate {
    /// Minimax value of the position after the move, White positive.
    value: f32,
    adjustment: f32,
    nodes: u64,
}

/// Everything needed to score a root move, shared by all workers.
struct RootSearch<'a> {
    evaluator: &'a MaterialEvaluator,
    scorer: &'a MoveScorer,
    adjustments: &'a Adjustments,
    values: &'a PieceValues,
    depth: u8,
    phase: GamePhase,
    mover: Color,
}

impl RootSearch<'_> {
    fn candidate(&self, position: &mut dyn Position, mv: &Move) -> Candidate {
        let mut search = AlphaBeta::new(self.evaluator, self.scorer);

        let mut child = ScopedMove::new(position, mv);
        let value = search.search(
            &mut *child,
            self.depth,
            self.mover == Color::Black,
            f32::NEG_INFINITY,
            f32::INFINITY,
        );
        let gives_check = child.is_check();
        let hanging = worst_hanging_loss(&mut *child, self.values);

        Candidate {
            value,
            adjustment: self.adjustments.score(mv, self.mover, self.phase, gives_check, hanging),
            nodes: search.nodes(),
        }
    }
}

/// Picks and plays moves for whichever side is to move in its position.
pub struct Engine<P: Position> {
    position: P,
    config: EngineConfig,
    evaluator: MaterialEvaluator,
    scorer: MoveScorer,
    book: OpeningBook,
    oracle: Option<EndgameOracle>,
    pool: Option<ThreadPool>,
    rng: StdRng,
    last_report: Option<SelectionReport>,
}

impl<P: Position + Clone + Send + Sync> Engine<P> {
    pub fn new(position: P, mut config: EngineConfig) -> Self {
        if !config.tie_break_noise.is_finite() || config.tie_break_noise < 0.0 {
            log::warn!("Ignoring tie_break_noise {}, using 0", config.tie_break_noise);
            config.tie_break_noise = 0.0;
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            position,
            evaluator: MaterialEvaluator::new(config.weights.clone()),
            scorer: MoveScorer::new(config.weights.piece_values, config.ordering),
            book: OpeningBook::new(&config.opening),
            oracle: build_oracle(&config.oracle),
            pool: build_pool(&config),
            rng,
            last_report: None,
            config,
        }
    }

    /// Replaces the oracle built from the configuration.
    pub fn with_oracle(mut self, oracle: Option<EndgameOracle>) -> Self {
        self.oracle = oracle;
        self
    }

    pub fn position(&self) -> &P {
        &self.position
    }

    /// For moves made outside the engine, such as the opponent's.
    pub fn position_mut(&mut self) -> &mut P {
        &mut self.position
    }

    pub fn into_position(self) -> P {
        self.position
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn last_report(&self) -> Option<&SelectionReport> {
        self.last_report.as_ref()
    }

    /// Chooses a move for the side to move, plays it and returns it.
    /// `None` when there is no legal move.
    ///
    /// Tried in order: the opening reply, the endgame oracle, then a
    /// search of every legal move.
    pub async fn select_move(&mut self) -> Option<Move> {
        self.last_report = None;

        let legal = self.position.legal_moves();
        if legal.is_empty() {
            log::info!("No legal moves in {}", self.position.fen());
            return None;
        }

        let reply = self.book.respond(self.position.move_history(), &legal);
        if let Some(mv) = reply {
            return Some(self.commit(mv, SelectionSource::Opening, None, 0, 0));
        }

        let answer = match &self.oracle {
            Some(oracle) => oracle.query(&self.position).await,
            None => None,
        };
        if let Some(mv) = answer {
            return Some(self.commit(mv, SelectionSource::Oracle, None, 0, 0));
        }

        if let Some(mv) = self.mate_in_one(&legal) {
            return Some(self.commit(mv, SelectionSource::MateInOne, None, 0, 0));
        }

        self.search_root(legal)
    }

    fn mate_in_one(&mut self, legal: &[Move]) -> Option<Move> {
        legal
            .iter()
            .find(|mv| ScopedMove::new(&mut self.position, mv).is_checkmate())
            .cloned()
    }

    fn search_root(&mut self, legal: Vec<Move>) -> Option<Move> {
        let mover = self.position.side_to_move();
        let phase = GamePhase::of(&self.position);
        let depth = self.config.search.depth_by_phase.for_phase(phase);

        // Drawn up front and in generator order so the parallel path makes
        // the same choice as the sequential one.
        let spread = self.config.tie_break_noise;
        let noise: Vec<f32> = legal
            .iter()
            .map(|_| if spread > 0.0 { self.rng.gen_range(0.0..spread) } else { 0.0 })
            .collect();

        let root = RootSearch {
            evaluator: &self.evaluator,
            scorer: &self.scorer,
            adjustments: &self.config.adjustments,
            values: &self.config.weights.piece_values,
            depth,
            phase,
            mover,
        };

        let candidates: Vec<Candidate> = match &self.pool {
            Some(pool) => {
                let position = &self.position;
                pool.install(|| {
                    legal
                        .par_iter()
                        .map(|mv| {
                            let mut scratch = position.clone();
                            root.candidate(&mut scratch, mv)
                        })
                        .collect()
                })
            }
            None => legal
                .iter()
                .map(|mv| root.candidate(&mut self.position, mv))
                .collect(),
        };

        let sign = match mover {
            Color::White => 1.0,
            Color::Black => -1.0,
        };

        let mut best: Option<usize> = None;
        let mut top = f32::NEG_INFINITY;
        let mut nodes = 0;
        for (index, (candidate, mv)) in candidates.iter().zip(&legal).enumerate() {
            let score = sign * candidate.value + candidate.adjustment + noise[index];
            nodes += candidate.nodes;

            log::debug!(
                "Move: {}, value: {}, adjustment: {}, score: {}",
                mv,
                candidate.value,
                candidate.adjustment,
                score
            );

            if score > top {
                top = score;
                best = Some(index);
            }
        }

        match best {
            Some(index) => {
                if is_mate_score(candidates[index].value) {
                    log::info!("Forced mate on the board after {}", legal[index]);
                }
                let mv = legal[index].clone();
                Some(self.commit(mv, SelectionSource::Search, Some(top), nodes, legal.len()))
            }
            None => {
                log::warn!("No candidate scored above -inf, playing a random move");
                let mv = legal.choose(&mut self.rng)?.clone();
                Some(self.commit(mv, SelectionSource::Fallback, None, nodes, legal.len()))
            }
        }
    }

    fn commit(
        &mut self,
        mv: Move,
        source: SelectionSource,
        score: Option<f32>,
        nodes: u64,
        candidates: usize,
    ) -> Move {
        log::info!("Playing {} ({:?})", mv, source);
        ScopedMove::new(&mut self.position, &mv).commit();

        self.last_report = Some(SelectionReport {
            mv: mv.clone(),
            source,
            score,
            nodes,
            candidates,
        });
        mv
    }
}

fn build_oracle(config: &OracleConfig) -> Option<EndgameOracle> {
    if !config.enabled {
        return None;
    }

    match LichessTablebase::new(&config.url, config.timeout()) {
        Ok(tablebase) => Some(
            EndgameOracle::new(tablebase)
                .with_max_pieces(config.max_pieces)
                .with_timeout(config.timeout()),
        ),
        Err(e) => {
            log::warn!("Tablebase disabled: {}", e);
            None
        }
    }
}

fn build_pool(config: &EngineConfig) -> Option<ThreadPool> {
    if !config.search.parallel {
        return None;
    }

    let threads = match config.search.threads {
        0 => num_cpus::get(),
        n => n,
    };

    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => Some(pool),
        Err(e) => {
            log::warn!("Parallel search disabled: {}", e);
            None
        }
    }
}
