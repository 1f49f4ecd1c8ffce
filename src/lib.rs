//! Chess Opponent Engine
//!
//! 国际象棋对手的走法决策引擎：走法评分、局面评估、Alpha-Beta 搜索、
//! 五个难度等级，以及对局统计与提示。规则本身由 [`RulesEngine`] 提供。

pub mod ai;
pub mod arena;
pub mod board;
pub mod error;
pub mod rules;
pub mod stats;
pub mod test_positions;
pub mod types;

#[cfg(test)]
mod testing;

pub use ai::eval::{evaluate_position, MATE_SCORE};
pub use ai::scoring::{score_move, top_moves};
pub use ai::search::{SearchResult, Searcher};
pub use ai::{
    difficulties_help, Decision, Difficulty, Engine, EngineConfig, MoveSelectionStrategy,
    ScoredMove,
};
pub use arena::{play_game, run_match, GameRecord, MatchSummary};
pub use board::{get_legal_moves_from_fen, ChessGame};
pub use error::{EngineError, Result};
pub use rules::RulesEngine;
pub use stats::{suggest_moves, GameStatistics};
pub use types::{Color, GameResult, Move, MoveFlags, Piece, PieceKind, Square};
