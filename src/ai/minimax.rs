//! Minimax AI 策略（困难 / 大师）

use super::search::Searcher;
use super::{random_move, MoveSelectionStrategy};
use crate::error::Result;
use crate::rules::RulesEngine;
use crate::types::Move;
use log::{debug, warn};
use rand::prelude::*;
use std::time::Instant;

/// Minimax AI - 固定深度的 Alpha-Beta 搜索
pub struct MinimaxAI {
    depth: u32,
}

impl MinimaxAI {
    pub fn new(depth: u32) -> Self {
        MinimaxAI {
            depth: depth.max(1),
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }
}

impl MoveSelectionStrategy for MinimaxAI {
    fn name(&self) -> &'static str {
        "minimax"
    }

    fn select(&self, game: &mut dyn RulesEngine, rng: &mut StdRng) -> Result<Option<Move>> {
        let start = Instant::now();
        let mut searcher = Searcher::new();
        let result = searcher.best_move(game, self.depth)?;

        debug!(
            "minimax depth={} nodes={} score={} time={:.3}s",
            self.depth,
            searcher.nodes(),
            result.score,
            start.elapsed().as_secs_f64()
        );

        match result.mv {
            Some(mv) => Ok(Some(mv)),
            None => {
                // 只在终局才会发生，调用方通常已经先判断过
                let moves = game.legal_moves();
                if !moves.is_empty() {
                    warn!("search returned no move with {} legal moves, playing random", moves.len());
                }
                Ok(random_move(&moves, rng))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ChessGame;
    use crate::test_positions;
    use crate::testing::{ScriptedGame, Tree};
    use crate::types::{Color, PieceKind};

    #[test]
    fn test_wins_hanging_queen() {
        let mut game = ChessGame::from_fen(test_positions::HANGING_QUEEN).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let chosen = MinimaxAI::new(3).select(&mut game, &mut rng).unwrap().unwrap();
        assert_eq!(chosen.notation, "e4d5");
        assert_eq!(chosen.captured, Some(PieceKind::Queen));
        assert_eq!(game.ply(), 0);
    }

    #[test]
    fn test_mate_in_one_at_both_depths() {
        for depth in [3, 4] {
            let mut game = ChessGame::from_fen(test_positions::MATE_IN_ONE_BLACK).unwrap();
            let mut rng = StdRng::seed_from_u64(1);
            let chosen = MinimaxAI::new(depth).select(&mut game, &mut rng).unwrap().unwrap();
            assert_eq!(chosen.notation, "a8a1", "depth {}", depth);
        }
    }

    #[test]
    fn test_minimizes_for_black() {
        let tree = Tree::Branch(vec![Tree::Leaf(50), Tree::Leaf(-30), Tree::Leaf(10)]);
        let mut game = ScriptedGame::new(Color::Black, &tree);
        let mut rng = StdRng::seed_from_u64(1);
        let chosen = MinimaxAI::new(1).select(&mut game, &mut rng).unwrap().unwrap();
        assert_eq!(chosen.notation, "n0m1");
    }

    #[test]
    fn test_search_errors_propagate() {
        let tree = Tree::Branch(vec![Tree::Leaf(10), Tree::Leaf(20)]);
        let mut game = ScriptedGame::new(Color::White, &tree);
        game.reject_apply_at = Some(0);
        let mut rng = StdRng::seed_from_u64(1);
        let err = MinimaxAI::new(2).select(&mut game, &mut rng).unwrap_err();
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_depth_is_at_least_one() {
        assert_eq!(MinimaxAI::new(0).depth(), 1);
        assert_eq!(MinimaxAI::new(4).depth(), 4);
    }
}
