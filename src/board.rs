//! 国际象棋规则引擎（基于 cozy-chess）
//!
//! 执行走法时把之前的局面压入历史栈，撤销只需弹栈，
//! 因此执行/撤销天然对称，不需要逐字段恢复。

use cozy_chess::{
    Board as CozyBoard, Color as CozyColor, Move as CozyMove, Piece as CozyPiece,
    Square as CozySquare,
};

use crate::error::{EngineError, Result};
use crate::rules::RulesEngine;
use crate::types::{Color, Move, MoveFlags, Piece, PieceKind, Square};

/// 一盘棋：当前局面 + 可撤销的历史
#[derive(Clone, Debug)]
pub struct ChessGame {
    board: CozyBoard,
    /// 每一步之前的局面和该步走法
    history: Vec<(CozyBoard, Move)>,
}

impl Default for ChessGame {
    fn default() -> Self {
        ChessGame {
            board: CozyBoard::default(),
            history: Vec::new(),
        }
    }
}

impl ChessGame {
    /// 从 FEN 字符串创建
    pub fn from_fen(fen: &str) -> Result<ChessGame> {
        let board = CozyBoard::from_fen(fen.trim(), false)
            .map_err(|e| EngineError::InvalidFen(format!("{:?}: {}", e, fen)))?;
        Ok(ChessGame {
            board,
            history: Vec::new(),
        })
    }

    /// 导出当前局面的 FEN
    pub fn to_fen(&self) -> String {
        format!("{}", self.board)
    }

    /// 已执行的步数
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// 已执行的走法
    pub fn moves_played(&self) -> impl Iterator<Item = &Move> {
        self.history.iter().map(|(_, mv)| mv)
    }

    /// 按记号执行走法（如 "e2e4"、"e7e8q"、"e1g1"）
    pub fn play_notation(&mut self, notation: &str) -> Result<Move> {
        let notation = notation.trim();
        let mv = self
            .legal_moves()
            .into_iter()
            .find(|m| m.notation == notation)
            .ok_or_else(|| EngineError::IllegalMove(notation.to_string()))?;
        self.apply_move(&mv)?;
        Ok(mv)
    }

    /// 所有合法走法（记号格式）
    pub fn legal_moves_str(&self) -> Vec<String> {
        self.legal_moves().into_iter().map(|m| m.notation).collect()
    }

    fn has_any_move(&self) -> bool {
        self.board.generate_moves(|_| true)
    }

    fn in_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    /// 三次重复（只比较已执行历史中的局面）
    fn is_threefold_repetition(&self) -> bool {
        let hash = self.board.hash();
        let earlier = self
            .history
            .iter()
            .filter(|(board, _)| board.hash() == hash)
            .count();
        earlier >= 2
    }

    /// 子力不足：双王，或单轻子对单王
    fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        for sq in Square::all() {
            match self.piece_at(sq).map(|p| p.kind) {
                None | Some(PieceKind::King) => {}
                Some(PieceKind::Knight) | Some(PieceKind::Bishop) => minors += 1,
                Some(_) => return false,
            }
        }
        minors <= 1
    }

    /// cozy-chess 走法 -> 核心走法
    fn convert(&self, mv: CozyMove, piece: CozyPiece) -> Move {
        let color = color_from_cozy(self.board.side_to_move());
        let from = square_from_cozy(mv.from);
        let mut to = square_from_cozy(mv.to);
        let mut flags = MoveFlags::NONE;
        let mut captured = None;

        if piece == CozyPiece::King && self.board.color_on(mv.to) == Some(self.board.side_to_move())
        {
            // 王走到己方车上表示易位，对外报告王的落点
            if to.file > from.file {
                flags.insert(MoveFlags::KINGSIDE_CASTLE);
                to = Square::new(6, from.rank);
            } else {
                flags.insert(MoveFlags::QUEENSIDE_CASTLE);
                to = Square::new(2, from.rank);
            }
        } else if let Some(victim) = self.board.piece_on(mv.to) {
            captured = Some(kind_from_cozy(victim));
        } else if piece == CozyPiece::Pawn && from.file != to.file {
            flags.insert(MoveFlags::EN_PASSANT);
            captured = Some(PieceKind::Pawn);
        }

        let promotion = mv.promotion.map(kind_from_cozy);
        if promotion.is_some() {
            flags.insert(MoveFlags::PROMOTION);
        }

        let notation = match promotion {
            Some(kind) => format!("{}{}{}", from, to, kind.to_fen_char()),
            None => format!("{}{}", from, to),
        };

        Move {
            from,
            to,
            piece: Piece::new(kind_from_cozy(piece), color),
            captured,
            promotion,
            flags,
            notation,
        }
    }

    /// 核心走法 -> cozy-chess 走法
    fn to_cozy(&self, mv: &Move) -> Result<CozyMove> {
        if !mv.from.is_valid() || !mv.to.is_valid() {
            return Err(EngineError::IllegalMove(mv.notation.clone()));
        }
        let to = if mv.flags.is_castle() {
            let rights = self.board.castle_rights(self.board.side_to_move());
            let rook_file = if mv.flags.contains(MoveFlags::KINGSIDE_CASTLE) {
                rights.short
            } else {
                rights.long
            }
            .ok_or_else(|| EngineError::IllegalMove(mv.notation.clone()))?;
            square_to_cozy(Square::new(rook_file as u8, mv.from.rank))
        } else {
            square_to_cozy(mv.to)
        };
        Ok(CozyMove {
            from: square_to_cozy(mv.from),
            to,
            promotion: mv.promotion.map(kind_to_cozy),
        })
    }
}

impl RulesEngine for ChessGame {
    fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|piece_moves| {
            let piece = piece_moves.piece;
            for mv in piece_moves {
                moves.push(self.convert(mv, piece));
            }
            false
        });
        moves
    }

    fn apply_move(&mut self, mv: &Move) -> Result<()> {
        let cozy_mv = self.to_cozy(mv)?;
        if !self.board.is_legal(cozy_mv) {
            return Err(EngineError::IllegalMove(mv.notation.clone()));
        }
        // 走法的附加信息（棋子、被吃子、标记）也必须与规则引擎一致
        let piece = self
            .board
            .piece_on(cozy_mv.from)
            .ok_or_else(|| EngineError::IllegalMove(mv.notation.clone()))?;
        if self.convert(cozy_mv, piece) != *mv {
            return Err(EngineError::IllegalMove(mv.notation.clone()));
        }

        let previous = self.board.clone();
        self.board.play_unchecked(cozy_mv);
        self.history.push((previous, mv.clone()));
        Ok(())
    }

    fn undo_move(&mut self) -> Result<Move> {
        let (previous, mv) = self.history.pop().ok_or(EngineError::NothingToUndo)?;
        self.board = previous;
        Ok(mv)
    }

    fn side_to_move(&self) -> Color {
        color_from_cozy(self.board.side_to_move())
    }

    fn is_check(&self) -> bool {
        self.in_check()
    }

    fn is_checkmate(&self) -> bool {
        self.in_check() && !self.has_any_move()
    }

    fn is_stalemate(&self) -> bool {
        !self.in_check() && !self.has_any_move()
    }

    fn is_draw(&self) -> bool {
        if self.is_checkmate() {
            return false;
        }
        self.is_stalemate()
            || self.board.halfmove_clock() >= 100
            || self.is_insufficient_material()
            || self.is_threefold_repetition()
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        if !square.is_valid() {
            return None;
        }
        let sq = square_to_cozy(square);
        let kind = self.board.piece_on(sq)?;
        let color = self.board.color_on(sq)?;
        Some(Piece::new(kind_from_cozy(kind), color_from_cozy(color)))
    }
}

fn square_to_cozy(sq: Square) -> CozySquare {
    CozySquare::index(sq.to_index())
}

fn square_from_cozy(sq: CozySquare) -> Square {
    Square::from_index(sq as usize)
}

fn color_from_cozy(color: CozyColor) -> Color {
    match color {
        CozyColor::White => Color::White,
        CozyColor::Black => Color::Black,
    }
}

fn kind_from_cozy(piece: CozyPiece) -> PieceKind {
    match piece {
        CozyPiece::Pawn => PieceKind::Pawn,
        CozyPiece::Knight => PieceKind::Knight,
        CozyPiece::Bishop => PieceKind::Bishop,
        CozyPiece::Rook => PieceKind::Rook,
        CozyPiece::Queen => PieceKind::Queen,
        CozyPiece::King => PieceKind::King,
    }
}

fn kind_to_cozy(kind: PieceKind) -> CozyPiece {
    match kind {
        PieceKind::Pawn => CozyPiece::Pawn,
        PieceKind::Knight => CozyPiece::Knight,
        PieceKind::Bishop => CozyPiece::Bishop,
        PieceKind::Rook => CozyPiece::Rook,
        PieceKind::Queen => CozyPiece::Queen,
        PieceKind::King => CozyPiece::King,
    }
}

/// 从 FEN 获取所有合法走法
pub fn get_legal_moves_from_fen(fen: &str) -> Result<Vec<String>> {
    Ok(ChessGame::from_fen(fen)?.legal_moves_str())
}
