//! 错误类型

use thiserror::Error;

/// 决策引擎错误
///
/// 没有合法走法不是错误，走法选择返回 `Ok(None)`。
#[derive(Debug, Error)]
pub enum EngineError {
    /// 规则引擎拒绝了一个来自合法走法列表的走法
    #[error("invariant violation: move {0} rejected by the rules engine")]
    IllegalMove(String),

    /// 没有可撤销的走法
    #[error("invariant violation: undo requested with no applied move")]
    NothingToUndo,

    /// 撤销的走法与刚执行的走法不一致
    #[error("invariant violation: undid {undone}, expected {expected}")]
    UnpairedUndo { expected: String, undone: String },

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("unknown difficulty: {0} (expected 1-5 or beginner, easy, medium, hard, grandmaster)")]
    UnknownDifficulty(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    /// 是否为不可恢复的规则引擎不一致
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            EngineError::IllegalMove(_)
                | EngineError::NothingToUndo
                | EngineError::UnpairedUndo { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
