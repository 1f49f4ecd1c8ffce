//! 简单 AI 策略
//!
//! 依次尝试：吃最值钱的子 → 马/象出子 → 易位 → 随机。
//! 各条件互斥，只取第一条满足的，不与走法评分的加成叠加。

use super::{random_move, MoveSelectionStrategy};
use crate::error::Result;
use crate::rules::RulesEngine;
use crate::types::{Move, Square};
use rand::prelude::*;

/// 简单 AI - 贪婪吃子与出子
pub struct EasyAI;

/// 从底线出动的马或象
fn is_development(mv: &Move) -> bool {
    mv.piece.kind.is_minor() && mv.from.rank == Square::home_rank(mv.piece.color)
}

impl MoveSelectionStrategy for EasyAI {
    fn name(&self) -> &'static str {
        "easy"
    }

    fn select(&self, game: &mut dyn RulesEngine, rng: &mut StdRng) -> Result<Option<Move>> {
        let moves = game.legal_moves();
        if moves.is_empty() {
            return Ok(None);
        }

        // 吃子：取价值最高的，同价值随机
        if let Some(best) = moves.iter().map(|m| m.capture_value()).filter(|v| *v > 0).max() {
            return Ok(random_move(
                moves.iter().filter(|m| m.capture_value() == best),
                rng,
            ));
        }

        let development: Vec<&Move> = moves.iter().filter(|m| is_development(m)).collect();
        if !development.is_empty() {
            return Ok(random_move(development, rng));
        }

        let castles: Vec<&Move> = moves.iter().filter(|m| m.flags.is_castle()).collect();
        if !castles.is_empty() {
            return Ok(random_move(castles, rng));
        }

        Ok(random_move(&moves, rng))
    }
}
