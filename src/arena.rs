//! 对战场：让两个难度等级互相对弈
//!
//! 用于验证等级之间的强弱关系。达到步数上限仍未分出胜负时按子力判定：
//! 领先至少一个车的价值算胜，否则算和。

use log::{debug, info};
use serde::Serialize;

use crate::ai::eval::material;
use crate::ai::{Difficulty, Engine, EngineConfig};
use crate::board::ChessGame;
use crate::error::Result;
use crate::rules::RulesEngine;
use crate::types::{Color, GameResult, PieceKind};

/// 判定胜负所需的最小子力差
pub const ADJUDICATION_MARGIN: i32 = PieceKind::Rook.value();

/// 一盘棋的记录
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub result: GameResult,
    pub plies: usize,
    /// 是否是到达步数上限后按子力判定的
    pub adjudicated: bool,
    pub moves: Vec<String>,
}

/// 多盘对战的汇总（以 first / second 两个等级为视角）
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchSummary {
    pub games: usize,
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
    pub adjudicated: usize,
}

impl MatchSummary {
    pub fn first_score(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        (self.first_wins as f64 + 0.5 * self.draws as f64) / self.games as f64
    }
}

fn adjudicate(game: &ChessGame) -> GameResult {
    let balance = material(game);
    if balance >= ADJUDICATION_MARGIN {
        GameResult::WhiteWin
    } else if balance <= -ADJUDICATION_MARGIN {
        GameResult::BlackWin
    } else {
        GameResult::Draw
    }
}

/// 从给定局面下完一盘棋
pub fn play_game(
    engine: &mut Engine,
    mut game: ChessGame,
    white: Difficulty,
    black: Difficulty,
    max_plies: usize,
) -> Result<GameRecord> {
    let start_ply = game.ply();
    let mut moves = Vec::new();

    while moves.len() < max_plies && !game.is_terminal() {
        let difficulty = match game.side_to_move() {
            Color::White => white,
            Color::Black => black,
        };
        match engine.play_move(&mut game, difficulty)? {
            Some(mv) => moves.push(mv.notation),
            None => break,
        }
    }

    let (result, adjudicated) = match game.game_result() {
        GameResult::Ongoing => (adjudicate(&game), true),
        result => (result, false),
    };
    debug!(
        "game over: {:?} after {} plies (adjudicated={})",
        result,
        game.ply() - start_ply,
        adjudicated
    );

    Ok(GameRecord {
        result,
        plies: moves.len(),
        adjudicated,
        moves,
    })
}

/// 两个等级对战若干盘，双方轮流执白
pub fn run_match(
    config: &EngineConfig,
    first: Difficulty,
    second: Difficulty,
    games: usize,
    max_plies: usize,
) -> Result<MatchSummary> {
    let mut engine = Engine::new(config.clone())?;
    let mut summary = MatchSummary::default();

    for i in 0..games {
        let first_is_white = i % 2 == 0;
        let (white, black) = if first_is_white {
            (first, second)
        } else {
            (second, first)
        };
        let record = play_game(&mut engine, ChessGame::default(), white, black, max_plies)?;

        summary.games += 1;
        if record.adjudicated {
            summary.adjudicated += 1;
        }
        match (record.result, first_is_white) {
            (GameResult::WhiteWin, true) | (GameResult::BlackWin, false) => summary.first_wins += 1,
            (GameResult::WhiteWin, false) | (GameResult::BlackWin, true) => summary.second_wins += 1,
            _ => summary.draws += 1,
        }
    }

    info!(
        "{} vs {}: {}-{}-{} over {} games ({} adjudicated)",
        first,
        second,
        summary.first_wins,
        summary.second_wins,
        summary.draws,
        summary.games,
        summary.adjudicated
    );
    Ok(summary)
}
