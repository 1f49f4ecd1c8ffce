//! 走法评分
//!
//! 单步启发式评分，不做搜索。吃子价值、中心控制、出子和兵的推进
//! 几项加成相互独立、直接相加。

use super::{sort_and_truncate, ScoredMove};
use crate::types::{Move, PieceKind};

/// 落点在 d4/d5/e4/e5
pub const CENTER_BONUS: i32 = 5;
/// 马或象走动
pub const DEVELOPMENT_BONUS: i32 = 3;
/// 兵走进对方半场
pub const PAWN_ADVANCE_BONUS: i32 = 2;

/// 评估单个走法
pub fn score_move(mv: &Move) -> i32 {
    let mut score = mv.capture_value();

    if mv.to.is_center() {
        score += CENTER_BONUS;
    }

    if mv.piece.kind.is_minor() {
        score += DEVELOPMENT_BONUS;
    }

    if mv.piece.kind == PieceKind::Pawn && mv.to.is_past_midline(mv.piece.color) {
        score += PAWN_ADVANCE_BONUS;
    }

    score
}

/// 给所有走法评分并按分数从高到低排序（同分保持原顺序）
pub fn score_moves(moves: Vec<Move>) -> Vec<ScoredMove> {
    let mut scored: Vec<ScoredMove> = moves
        .into_iter()
        .map(|mv| {
            let score = score_move(&mv);
            ScoredMove { mv, score }
        })
        .collect();
    let n = scored.len();
    sort_and_truncate(&mut scored, n);
    scored
}

/// 分数最高的前 n 个走法
pub fn top_moves(moves: Vec<Move>, n: usize) -> Vec<ScoredMove> {
    let mut scored = score_moves(moves);
    scored.truncate(n);
    scored
}
