//! AI 策略模块
//!
//! 五个难度等级，每个等级对应一种走法选择策略：加权随机、贪婪吃子/出子、
//! 启发式前 K 采样，以及不同深度的 Minimax 搜索。

mod beginner;
mod easy;
pub mod eval;
mod medium;
mod minimax;
pub mod scoring;
pub mod search;

pub use beginner::BeginnerAI;
pub use easy::EasyAI;
pub use medium::MediumAI;
pub use minimax::MinimaxAI;

use log::debug;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use crate::board::ChessGame;
use crate::error::{EngineError, Result};
use crate::rules::RulesEngine;
use crate::stats::{self, GameStatistics};
use crate::types::Move;

/// 难度等级（1-5）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner = 1,
    Easy = 2,
    Medium = 3,
    Hard = 4,
    Grandmaster = 5,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Beginner,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Grandmaster,
    ];

    pub fn level(&self) -> u8 {
        *self as u8
    }

    pub fn from_level(level: u8) -> Result<Difficulty> {
        Difficulty::ALL
            .iter()
            .copied()
            .find(|d| d.level() == level)
            .ok_or_else(|| EngineError::UnknownDifficulty(level.to_string()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Grandmaster => "grandmaster",
        }
    }

    /// 该等级对应的策略
    pub fn strategy(&self, config: &EngineConfig) -> Box<dyn MoveSelectionStrategy> {
        match self {
            Difficulty::Beginner => Box::new(BeginnerAI::new(config.beginner_capture_rate)),
            Difficulty::Easy => Box::new(EasyAI),
            Difficulty::Medium => Box::new(MediumAI::new(config.medium_top_k)),
            Difficulty::Hard => Box::new(MinimaxAI::new(config.hard_depth)),
            Difficulty::Grandmaster => Box::new(MinimaxAI::new(config.grandmaster_depth)),
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = EngineError;

    fn try_from(level: u8) -> Result<Self> {
        Difficulty::from_level(level)
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_lowercase();
        if let Ok(level) = s.parse::<u8>() {
            return Difficulty::from_level(level);
        }
        Difficulty::ALL
            .iter()
            .copied()
            .find(|d| d.name() == s)
            .ok_or(EngineError::UnknownDifficulty(s))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 难度说明（CLI 帮助用）
pub fn difficulties_help() -> String {
    Difficulty::ALL
        .iter()
        .map(|d| format!("{}={}", d.level(), d.name()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// 引擎配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 随机种子
    pub seed: Option<u64>,
    /// 新手等级优先吃子的概率（0.0-1.0）
    pub beginner_capture_rate: f64,
    /// 中等等级的候选数量
    pub medium_top_k: usize,
    /// 困难等级搜索深度
    pub hard_depth: u32,
    /// 大师等级搜索深度
    pub grandmaster_depth: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            seed: None,
            beginner_capture_rate: 0.3,
            medium_top_k: 3,
            hard_depth: 3,
            grandmaster_depth: 4,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.beginner_capture_rate) {
            return Err(EngineError::Config(format!(
                "beginner_capture_rate must be within [0, 1], got {}",
                self.beginner_capture_rate
            )));
        }
        if self.medium_top_k == 0 {
            return Err(EngineError::Config("medium_top_k must be at least 1".into()));
        }
        if self.hard_depth == 0 || self.grandmaster_depth == 0 {
            return Err(EngineError::Config("search depths must be at least 1".into()));
        }
        Ok(())
    }

    /// 搜索型等级的深度
    pub fn depth_for(&self, difficulty: Difficulty) -> Option<u32> {
        match difficulty {
            Difficulty::Hard => Some(self.hard_depth),
            Difficulty::Grandmaster => Some(self.grandmaster_depth),
            _ => None,
        }
    }
}

/// 走法评分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMove {
    #[serde(rename = "move")]
    pub mv: Move,
    pub score: i32,
}

/// 走法选择策略接口
///
/// 策略本身无状态，随机数由调用方提供；没有合法走法时返回 `Ok(None)`。
pub trait MoveSelectionStrategy {
    fn name(&self) -> &'static str;

    fn select(&self, game: &mut dyn RulesEngine, rng: &mut StdRng) -> Result<Option<Move>>;
}

/// 排序辅助函数（稳定排序，分数高的在前）
pub(crate) fn sort_and_truncate(scored: &mut Vec<ScoredMove>, n: usize) {
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(n);
}

/// 均匀随机选一个走法
pub(crate) fn random_move<'a, I>(moves: I, rng: &mut StdRng) -> Option<Move>
where
    I: IntoIterator<Item = &'a Move>,
{
    let moves: Vec<&Move> = moves.into_iter().collect();
    moves.choose(rng).map(|m| (*m).clone())
}

/// 一次走法决策
#[derive(Debug, Clone, Serialize)]
pub struct Decision {
    #[serde(rename = "move")]
    pub mv: Option<Move>,
    pub difficulty: Difficulty,
    pub elapsed_ms: f64,
}

/// AI 引擎 - 统一的对外接口
pub struct Engine {
    config: EngineConfig,
    rng: StdRng,
    stats: GameStatistics,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Ok(Engine {
            config,
            rng,
            stats: GameStatistics::default(),
        })
    }

    /// 固定种子的引擎
    pub fn seeded(seed: u64) -> Self {
        Engine {
            config: EngineConfig {
                seed: Some(seed),
                ..Default::default()
            },
            rng: StdRng::seed_from_u64(seed),
            stats: GameStatistics::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 为当前行棋方选择走法（不修改统计）
    pub fn select_move(
        &mut self,
        game: &mut dyn RulesEngine,
        difficulty: Difficulty,
    ) -> Result<Decision> {
        let strategy = difficulty.strategy(&self.config);
        let start = Instant::now();
        let mv = strategy.select(game, &mut self.rng)?;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        debug!(
            "{} ({}) chose {} in {:.2}ms",
            difficulty,
            strategy.name(),
            mv.as_ref().map_or("-".to_string(), |m| m.notation.clone()),
            elapsed_ms
        );

        Ok(Decision {
            mv,
            difficulty,
            elapsed_ms,
        })
    }

    /// 选择并执行走法，同时更新统计
    pub fn play_move(
        &mut self,
        game: &mut dyn RulesEngine,
        difficulty: Difficulty,
    ) -> Result<Option<Move>> {
        let decision = self.select_move(game, difficulty)?;
        let mv = match decision.mv {
            Some(mv) => mv,
            None => return Ok(None),
        };
        game.apply_move(&mv)?;
        let was_check = game.is_check();
        self.stats.record_move(&mv, decision.elapsed_ms, was_check);
        Ok(Some(mv))
    }

    pub fn record_move(&mut self, mv: &Move, decision_time_ms: f64, was_check: bool) {
        self.stats.record_move(mv, decision_time_ms, was_check);
    }

    /// 统计快照（副本）
    pub fn statistics(&self) -> GameStatistics {
        self.stats.clone()
    }

    pub fn reset_statistics(&mut self) {
        self.stats.reset();
    }

    /// 给人类玩家的走法建议
    pub fn suggest_moves(&self, game: &dyn RulesEngine, top_n: usize) -> Vec<ScoredMove> {
        stats::suggest_moves(game, top_n)
    }

    /// 从 FEN 选择走法
    pub fn select_move_fen(&mut self, fen: &str, difficulty: Difficulty) -> Result<Option<String>> {
        let mut game = ChessGame::from_fen(fen)?;
        Ok(self
            .select_move(&mut game, difficulty)?
            .mv
            .map(|m| m.notation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_positions;
    use crate::types::{Color, PieceKind};

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!("1".parse::<Difficulty>().unwrap(), Difficulty::Beginner);
        assert_eq!("5".parse::<Difficulty>().unwrap(), Difficulty::Grandmaster);
        assert_eq!("Medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!(Difficulty::try_from(4).unwrap(), Difficulty::Hard);
        assert!("0".parse::<Difficulty>().is_err());
        assert!("6".parse::<Difficulty>().is_err());
        assert!("expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_difficulty_serde() {
        let json = serde_json::to_string(&Difficulty::Grandmaster).unwrap();
        assert_eq!(json, "\"grandmaster\"");
        let back: Difficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(back, Difficulty::Easy);
    }

    #[test]
    fn test_all_difficulties_have_strategies() {
        let config = EngineConfig::default();
        let names: Vec<&str> = Difficulty::ALL
            .iter()
            .map(|d| d.strategy(&config).name())
            .collect();
        assert_eq!(names, vec!["beginner", "easy", "medium", "minimax", "minimax"]);
        assert_eq!(config.depth_for(Difficulty::Hard), Some(3));
        assert_eq!(config.depth_for(Difficulty::Grandmaster), Some(4));
        assert_eq!(config.depth_for(Difficulty::Medium), None);
    }

    #[test]
    fn test_config_from_json() {
        let config = EngineConfig::from_json_str(r#"{"seed": 7, "hard_depth": 2}"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.hard_depth, 2);
        assert_eq!(config.grandmaster_depth, 4);
        assert_eq!(config.medium_top_k, 3);
    }

    #[test]
    fn test_config_validation() {
        assert!(EngineConfig::from_json_str(r#"{"beginner_capture_rate": 1.5}"#).is_err());
        assert!(EngineConfig::from_json_str(r#"{"medium_top_k": 0}"#).is_err());
        assert!(EngineConfig::from_json_str(r#"{"hard_depth": 0}"#).is_err());
        assert!(EngineConfig::from_json_str("not json").is_err());

        let bad = EngineConfig {
            grandmaster_depth: 0,
            ..Default::default()
        };
        assert!(Engine::new(bad).is_err());
    }

    #[test]
    fn test_every_difficulty_returns_a_legal_move() {
        let mut engine = Engine::seeded(42);
        for difficulty in Difficulty::ALL {
            let mut game = ChessGame::from_fen(test_positions::MID_1).unwrap();
            let legal = game.legal_moves();
            let decision = engine.select_move(&mut game, difficulty).unwrap();
            let mv = decision.mv.unwrap();
            assert!(legal.contains(&mv), "{} returned {}", difficulty, mv);
            assert!(decision.elapsed_ms >= 0.0);
            assert_eq!(game.ply(), 0);
        }
        // select_move 不修改统计
        assert_eq!(engine.statistics(), GameStatistics::default());
    }

    #[test]
    fn test_no_move_at_terminal_position() {
        let mut engine = Engine::seeded(1);
        for difficulty in Difficulty::ALL {
            let mut game = ChessGame::from_fen(test_positions::MATED_BLACK).unwrap();
            let decision = engine.select_move(&mut game, difficulty).unwrap();
            assert!(decision.mv.is_none());
        }
    }

    #[test]
    fn test_difficulty_can_change_between_moves() {
        let mut engine = Engine::seeded(3);
        let mut game = ChessGame::default();
        for difficulty in Difficulty::ALL.iter().take(4) {
            assert!(engine.play_move(&mut game, *difficulty).unwrap().is_some());
        }
        assert_eq!(game.ply(), 4);
        assert_eq!(engine.statistics().moves_played, 4);
    }

    #[test]
    fn test_play_move_records_capture_and_check() {
        let mut engine = Engine::seeded(5);
        let mut game = ChessGame::from_fen(test_positions::HANGING_QUEEN).unwrap();
        let mv = engine.play_move(&mut game, Difficulty::Easy).unwrap().unwrap();
        assert_eq!(mv.captured, Some(PieceKind::Queen));
        assert_eq!(game.side_to_move(), Color::Black);

        let stats = engine.statistics();
        assert_eq!(stats.moves_played, 1);
        assert_eq!(stats.captures, 1);

        engine.reset_statistics();
        assert_eq!(engine.statistics(), GameStatistics::default());
    }

    #[test]
    fn test_select_move_fen() {
        let mut engine = Engine::seeded(9);
        let best = engine
            .select_move_fen(test_positions::MATE_IN_ONE_WHITE, Difficulty::Hard)
            .unwrap();
        assert_eq!(best.as_deref(), Some("a1a8"));
        assert!(engine.select_move_fen("bad fen", Difficulty::Hard).is_err());
    }

    #[test]
    fn test_statistics_snapshot_is_a_copy() {
        let mut engine = Engine::seeded(11);
        let mut game = ChessGame::default();
        let mut snapshot = engine.statistics();
        snapshot.moves_played = 99;
        engine.play_move(&mut game, Difficulty::Medium).unwrap();
        assert_eq!(engine.statistics().moves_played, 1);
    }
}
