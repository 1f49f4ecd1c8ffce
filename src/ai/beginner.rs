//! 新手 AI 策略
//!
//! 大部分时间随机走不吃子的走法；小概率去吃子，但挑的是最不值钱的
//! 那个吃子，并且优先用大子去吃，所以经常送子。

use super::{random_move, MoveSelectionStrategy};
use crate::error::Result;
use crate::rules::RulesEngine;
use crate::types::Move;
use rand::prelude::*;
use std::cmp::Reverse;

/// 新手 AI - 偏向失误的加权随机
///
/// 不吃子的分支只在非吃子走法中随机（全是吃子时才退回全部走法），吃子因此保持少数。
pub struct BeginnerAI {
    capture_rate: f64,
}

impl BeginnerAI {
    pub fn new(capture_rate: f64) -> Self {
        BeginnerAI {
            capture_rate: capture_rate.clamp(0.0, 1.0),
        }
    }
}

/// 价值最低的吃子；同价值时优先攻击方价值高的
fn weakest_capture(moves: &[Move]) -> Option<&Move> {
    moves
        .iter()
        .filter(|m| m.is_capture())
        .min_by_key(|m| (m.capture_value(), Reverse(m.piece.kind.value())))
}

impl MoveSelectionStrategy for BeginnerAI {
    fn name(&self) -> &'static str {
        "beginner"
    }

    fn select(&self, game: &mut dyn RulesEngine, rng: &mut StdRng) -> Result<Option<Move>> {
        let moves = game.legal_moves();
        if moves.is_empty() {
            return Ok(None);
        }

        if rng.gen_bool(self.capture_rate) {
            if let Some(mv) = weakest_capture(&moves) {
                return Ok(Some(mv.clone()));
            }
            return Ok(random_move(&moves, rng));
        }

        let quiet: Vec<&Move> = moves.iter().filter(|m| !m.is_capture()).collect();
        if quiet.is_empty() {
            Ok(random_move(&moves, rng))
        } else {
            Ok(random_move(quiet, rng))
        }
    }
}
