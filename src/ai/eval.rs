//! 局面评估
//!
//! 白方视角：正分有利白方，负分有利黑方。非终局只计算子力。

use crate::rules::RulesEngine;
use crate::types::Square;

/// 将死分数
pub const MATE_SCORE: i32 = 10_000;

/// 评估局面
pub fn evaluate_position<G: RulesEngine + ?Sized>(game: &G) -> i32 {
    // 被将死的一方是行棋方
    if game.is_checkmate() {
        return -game.side_to_move().sign() * MATE_SCORE;
    }
    if game.is_draw() {
        return 0;
    }
    material(game)
}

/// 子力差（白减黑）
pub fn material<G: RulesEngine + ?Sized>(game: &G) -> i32 {
    Square::all()
        .filter_map(|sq| game.piece_at(sq))
        .map(|piece| piece.signed_value())
        .sum()
}

/// 是否为将死分数
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_SCORE
}
