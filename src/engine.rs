use std::time::Instant;

use tracing::{debug, info};

use crate::{
    attacks,
    constants::{DEFAULT_DEPTH, FIFTY_MOVE_THRESHOLD, MATE_SCORE},
    evaluation::{Evaluator, StandardEvaluator},
    movegen,
    position::Position,
    types::{CheckState, Move, Side},
};

/// Fixed-depth minimax searcher. Holds no state between searches.
pub struct Engine<E: Evaluator = StandardEvaluator> {
    pub search_settings: SearchSettings,
    evaluator: E,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchSettings {
    pub depth: u16,          // Plies searched from the root
    pub draw_threshold: u16, // Halfmove clock value scored as a forced draw
}

#[derive(Clone, Debug)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub evaluation: i32,
    pub depth: u16,
    pub nodes: usize,
    pub time_ms: u64,
    pub principal_variation: Vec<Move>, // Best line from the root, best_move first
}

/// Reported after each root move has been searched
#[derive(Clone, Copy, Debug)]
pub struct RootProgress {
    pub index: usize, // 0-based, in generation order
    pub total: usize,
    pub mv: Move,
    pub evaluation: i32,
    pub best_move: Move,
    pub best_evaluation: i32,
}

/// Result of one search frame, returned by value to its parent
struct Line {
    evaluation: i32,
    moves: Vec<Move>,
    nodes: usize,
}

impl Line {
    fn leaf(evaluation: i32) -> Self {
        Line {
            evaluation,
            moves: Vec::new(),
            nodes: 1,
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            depth: DEFAULT_DEPTH,
            draw_threshold: FIFTY_MOVE_THRESHOLD,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(None, None)
    }
}

impl Engine {
    pub fn new(depth: Option<u16>, draw_threshold: Option<u16>) -> Self {
        Engine::with_evaluator(
            SearchSettings {
                depth: depth.unwrap_or(DEFAULT_DEPTH),
                draw_threshold: draw_threshold.unwrap_or(FIFTY_MOVE_THRESHOLD),
            },
            StandardEvaluator,
        )
    }
}

impl<E: Evaluator> Engine<E> {
    pub fn with_evaluator(search_settings: SearchSettings, evaluator: E) -> Self {
        Engine {
            search_settings,
            evaluator,
        }
    }

    pub fn think(&self, position: &Position) -> SearchResult {
        self.think_with_progress(position, None::<fn(&RootProgress)>)
    }

    /// Searches `search_settings.depth` plies. `on_root_move` is called after
    /// each root move and has no effect on the result.
    pub fn think_with_progress<F>(
        &self,
        position: &Position,
        mut on_root_move: Option<F>,
    ) -> SearchResult
    where
        F: FnMut(&RootProgress),
    {
        let start = Instant::now();
        let depth = self.search_settings.depth;

        let mut report = |progress: &RootProgress| {
            debug!(
                "{}/{} {} -> {} (best {} {})",
                progress.index + 1,
                progress.total,
                progress.mv,
                progress.evaluation,
                progress.best_move,
                progress.best_evaluation
            );

            if let Some(callback) = on_root_move.as_mut() {
                callback(progress);
            }
        };

        let line = self.search(
            position,
            depth,
            Some(&mut report as &mut dyn FnMut(&RootProgress)),
        );

        let result = SearchResult {
            best_move: line.moves.first().copied(),
            evaluation: line.evaluation,
            depth,
            nodes: line.nodes,
            time_ms: start.elapsed().as_millis() as u64,
            principal_variation: line.moves,
        };

        let best_move = result
            .best_move
            .map_or_else(|| "none".to_string(), |mv| mv.to_string());

        info!(
            depth,
            nodes = result.nodes,
            evaluation = result.evaluation,
            time_ms = result.time_ms,
            best_move = %best_move,
            "search complete"
        );

        result
    }

    /// Minimax below `position`. Scores are from white's viewpoint: white
    /// maximizes, black minimizes, and the first of equally good moves is kept.
    fn search(
        &self,
        position: &Position,
        depth: u16,
        mut on_root_move: Option<&mut dyn FnMut(&RootProgress)>,
    ) -> Line {
        if position.halfmove_clock() >= self.search_settings.draw_threshold {
            return Line::leaf(0);
        }

        if depth == 0 {
            return Line::leaf(self.evaluator.evaluate(position));
        }

        let side = position.side();
        let attack_map = attacks::attack_map(position);
        let moves = movegen::generate_legal_moves(position, &attack_map);

        if moves.is_empty() {
            return match attack_map.check {
                CheckState::None => Line::leaf(0),
                _ => Line::leaf(-side.sign() * MATE_SCORE),
            };
        }

        let winning_score = side.sign() * MATE_SCORE;
        let total = moves.len();

        let mut nodes = 1;
        let mut best: Option<(Move, Line)> = None;

        for (index, mv) in moves.into_iter().enumerate() {
            let child = self.search(&position.make_move(mv), depth - 1, None);
            let evaluation = child.evaluation;

            nodes += child.nodes;

            let improves = match &best {
                None => true,
                Some((_, line)) => match side {
                    Side::White => evaluation > line.evaluation,
                    Side::Black => evaluation < line.evaluation,
                },
            };

            if improves {
                best = Some((mv, child));
            }

            if let (Some(callback), Some((best_move, best_line))) =
                (on_root_move.as_deref_mut(), &best)
            {
                callback(&RootProgress {
                    index,
                    total,
                    mv,
                    evaluation,
                    best_move: *best_move,
                    best_evaluation: best_line.evaluation,
                });
            }

            // Nothing beats a forced mate
            if evaluation == winning_score {
                break;
            }
        }

        match best {
            Some((mv, line)) => {
                let mut moves = Vec::with_capacity(line.moves.len() + 1);
                moves.push(mv);
                moves.extend(line.moves);

                Line {
                    evaluation: line.evaluation,
                    moves,
                    nodes,
                }
            }
            None => Line::leaf(0),
        }
    }
}

/// Searches `position` to `depth` plies with the standard evaluator
pub fn think(position: &Position, depth: u16) -> SearchResult {
    Engine::new(Some(depth), None).think(position)
}
