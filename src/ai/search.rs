//! Minimax 搜索（Alpha-Beta 剪枝）
//!
//! 白方为极大方、黑方为极小方。每次执行走法后，无论子节点是否
//! 出错，都会先撤销再返回，保证局面不会残留未撤销的走法。

use crate::error::{EngineError, Result};
use crate::rules::RulesEngine;
use crate::types::{Color, Move};

use super::eval::evaluate_position;

/// 窗口边界，大于任何评估分数
pub const SCORE_INFINITY: i32 = 1_000_000;

/// 搜索结果，只有在没有合法走法时 `mv` 为 None
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    pub mv: Option<Move>,
}

/// 带节点计数的搜索器
#[derive(Debug, Default)]
pub struct Searcher {
    nodes: u64,
}

impl Searcher {
    pub fn new() -> Self {
        Searcher::default()
    }

    /// 已访问节点数
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// 从当前行棋方出发搜索最佳走法
    pub fn best_move<G: RulesEngine + ?Sized>(
        &mut self,
        game: &mut G,
        depth: u32,
    ) -> Result<SearchResult> {
        let maximizing = game.side_to_move() == Color::White;
        self.search(game, depth, -SCORE_INFINITY, SCORE_INFINITY, maximizing)
    }

    pub fn search<G: RulesEngine + ?Sized>(
        &mut self,
        game: &mut G,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> Result<SearchResult> {
        self.nodes += 1;

        if depth == 0 || game.is_terminal() {
            return Ok(SearchResult {
                score: leaf_score(game, depth),
                mv: None,
            });
        }

        let moves = game.legal_moves();
        if moves.is_empty() {
            return Ok(SearchResult {
                score: leaf_score(game, depth),
                mv: None,
            });
        }

        let mut best_score = if maximizing {
            -SCORE_INFINITY
        } else {
            SCORE_INFINITY
        };
        let mut best_move: Option<Move> = None;

        for mv in moves {
            game.apply_move(&mv)?;
            let child = self.search(game, depth - 1, alpha, beta, !maximizing);
            let undone = game.undo_move()?;
            if undone != mv {
                return Err(EngineError::UnpairedUndo {
                    expected: mv.notation,
                    undone: undone.notation,
                });
            }
            let score = child?.score;

            // 同分时保留先出现的走法
            let better = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if better || best_move.is_none() {
                best_score = score;
                best_move = Some(mv);
            }

            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }

        Ok(SearchResult {
            score: best_score,
            mv: best_move,
        })
    }
}

/// 叶子分数：将死分数按剩余深度加成，越快的杀棋分数越高
pub(crate) fn leaf_score<G: RulesEngine + ?Sized>(game: &G, depth: u32) -> i32 {
    let score = evaluate_position(game);
    if game.is_checkmate() {
        score + score.signum() * depth as i32
    } else {
        score
    }
}

/// 从任意窗口搜索（一次性搜索器）
pub fn search<G: RulesEngine + ?Sized>(
    game: &mut G,
    depth: u32,
    alpha: i32,
    beta: i32,
    maximizing: bool,
) -> Result<SearchResult> {
    Searcher::new().search(game, depth, alpha, beta, maximizing)
}
