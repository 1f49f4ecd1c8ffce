//! 中等 AI 策略

use super::scoring::top_moves;
use super::MoveSelectionStrategy;
use crate::error::Result;
use crate::rules::RulesEngine;
use crate::types::Move;
use rand::prelude::*;

/// 中等 AI - 在评分最高的前 K 个走法中均匀随机
pub struct MediumAI {
    top_k: usize,
}

impl MediumAI {
    pub fn new(top_k: usize) -> Self {
        MediumAI {
            top_k: top_k.max(1),
        }
    }
}

impl MoveSelectionStrategy for MediumAI {
    fn name(&self) -> &'static str {
        "medium"
    }

    fn select(&self, game: &mut dyn RulesEngine, rng: &mut StdRng) -> Result<Option<Move>> {
        let candidates = top_moves(game.legal_moves(), self.top_k);
        Ok(candidates.choose(rng).map(|sm| sm.mv.clone()))
    }
}
