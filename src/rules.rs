//! 规则引擎接口
//!
//! 决策引擎不生成走法，也不直接修改局面。所有合法性、终局判定与
//! 可逆的执行/撤销都通过此 trait 交给规则引擎。

use crate::error::Result;
use crate::types::{Color, GameResult, Move, Piece, Square};

pub trait RulesEngine {
    /// 当前行棋方的全部合法走法
    fn legal_moves(&self) -> Vec<Move>;

    /// 执行走法（必须可逆）
    fn apply_move(&mut self, mv: &Move) -> Result<()>;

    /// 撤销最近一次执行的走法，返回被撤销的走法
    fn undo_move(&mut self) -> Result<Move>;

    fn side_to_move(&self) -> Color;

    /// 行棋方是否被将军
    fn is_check(&self) -> bool;

    fn is_checkmate(&self) -> bool;

    fn is_stalemate(&self) -> bool;

    /// 是否和棋（包括逼和）
    fn is_draw(&self) -> bool;

    fn is_terminal(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }

    /// 只读查询某格的棋子
    fn piece_at(&self, square: Square) -> Option<Piece>;

    /// 判断游戏结果
    fn game_result(&self) -> GameResult {
        if self.is_checkmate() {
            match self.side_to_move() {
                Color::White => GameResult::BlackWin,
                Color::Black => GameResult::WhiteWin,
            }
        } else if self.is_draw() {
            GameResult::Draw
        } else {
            GameResult::Ongoing
        }
    }
}
