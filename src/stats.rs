//! 对局统计与走法提示

use serde::{Deserialize, Serialize};

use crate::ai::scoring::top_moves;
use crate::ai::ScoredMove;
use crate::rules::RulesEngine;
use crate::types::Move;

/// 默认提示数量
pub const DEFAULT_HINT_COUNT: usize = 3;

/// 对局统计
///
/// 开局时创建，引擎每走一步累加一次，只有整体重置时才会清零。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStatistics {
    pub moves_played: u32,
    pub captures: u32,
    pub checks_observed: u32,
    pub total_decision_time_ms: f64,
}

impl GameStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一步棋；是否将军由规则引擎判定后传入
    pub fn record_move(&mut self, mv: &Move, decision_time_ms: f64, was_check: bool) {
        self.moves_played += 1;
        if mv.is_capture() {
            self.captures += 1;
        }
        if was_check {
            self.checks_observed += 1;
        }
        self.total_decision_time_ms += decision_time_ms.max(0.0);
    }

    /// 平均决策时间（毫秒），还没有走过棋时为 0
    pub fn average_decision_time(&self) -> f64 {
        if self.moves_played == 0 {
            0.0
        } else {
            self.total_decision_time_ms / self.moves_played as f64
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 按走法评分给出前 top_n 个建议，不修改局面
pub fn suggest_moves<G: RulesEngine + ?Sized>(game: &G, top_n: usize) -> Vec<ScoredMove> {
    top_moves(game.legal_moves(), top_n)
}
