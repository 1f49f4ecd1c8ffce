//! 国际象棋核心类型定义
//!
//! 决策引擎只通过这些类型与规则引擎交互

use serde::{Deserialize, Serialize};
use std::fmt;

/// 棋子颜色/阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// 获取对方阵营
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// 评估符号：白方为正，黑方为负
    pub fn sign(&self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }

    /// 转换为 FEN 字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// 从 FEN 字符解析（大小写均可）
    pub fn from_fen_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// 转换为 FEN 字符（小写）
    pub fn to_fen_char(&self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// 子力价值，走法评分与局面评估共用同一张表
    pub const fn value(&self) -> i32 {
        match self {
            PieceKind::Pawn => 10,
            PieceKind::Knight => 30,
            PieceKind::Bishop => 30,
            PieceKind::Rook => 50,
            PieceKind::Queen => 90,
            PieceKind::King => 900,
        }
    }

    /// 轻子（马、象）
    pub fn is_minor(&self) -> bool {
        matches!(self, PieceKind::Knight | PieceKind::Bishop)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// 带颜色的棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color }
    }

    /// 白方为正、黑方为负的子力价值
    pub fn signed_value(&self) -> i32 {
        self.kind.value() * self.color.sign()
    }
}

/// 棋盘格子 (file, rank)
///
/// file: 0-7 (a-h)
/// rank: 0-7 (0 是白方底线，7 是黑方底线)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub file: u8,
    pub rank: u8,
}

impl Square {
    pub fn new(file: u8, rank: u8) -> Self {
        Square { file, rank }
    }

    /// 检查格子是否在棋盘范围内
    pub fn is_valid(&self) -> bool {
        self.file < 8 && self.rank < 8
    }

    /// 中心四格 d4 d5 e4 e5
    pub fn is_center(&self) -> bool {
        (3..=4).contains(&self.file) && (3..=4).contains(&self.rank)
    }

    /// 是否位于对方半场（越过中线）
    pub fn is_past_midline(&self, color: Color) -> bool {
        match color {
            Color::White => self.rank >= 4,
            Color::Black => self.rank <= 3,
        }
    }

    /// 该颜色的底线
    pub fn home_rank(color: Color) -> u8 {
        match color {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// 0-63 索引（a1 = 0, h8 = 63）
    pub fn to_index(&self) -> usize {
        self.rank as usize * 8 + self.file as usize
    }

    pub fn from_index(idx: usize) -> Square {
        Square {
            file: (idx % 8) as u8,
            rank: (idx / 8) as u8,
        }
    }

    /// 所有 64 个格子
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square::from_index)
    }

    /// 从代数坐标解析（如 "e4"）
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = match bytes[0] {
            b'a'..=b'h' => bytes[0] - b'a',
            _ => return None,
        };
        let rank = match bytes[1] {
            b'1'..=b'8' => bytes[1] - b'1',
            _ => return None,
        };
        Some(Square { file, rank })
    }

    /// 转换为代数坐标（如 "e4"）
    pub fn to_algebraic(&self) -> String {
        format!("{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

/// 特殊走法标记
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveFlags(u8);

impl MoveFlags {
    pub const NONE: MoveFlags = MoveFlags(0);
    pub const KINGSIDE_CASTLE: MoveFlags = MoveFlags(1);
    pub const QUEENSIDE_CASTLE: MoveFlags = MoveFlags(1 << 1);
    pub const PROMOTION: MoveFlags = MoveFlags(1 << 2);
    pub const EN_PASSANT: MoveFlags = MoveFlags(1 << 3);

    pub fn contains(&self, other: MoveFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: MoveFlags) {
        self.0 |= other.0;
    }

    pub fn with(mut self, other: MoveFlags) -> MoveFlags {
        self.insert(other);
        self
    }

    pub fn is_castle(&self) -> bool {
        self.0 & (Self::KINGSIDE_CASTLE.0 | Self::QUEENSIDE_CASTLE.0) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// 走法
///
/// 只由规则引擎的合法走法列表构造，决策引擎不会自行合成走法。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<PieceKind>,
    pub promotion: Option<PieceKind>,
    pub flags: MoveFlags,
    /// 显示用记号（由规则引擎生成，对决策引擎不透明）
    pub notation: String,
}

impl Move {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// 被吃子的价值，非吃子为 0
    pub fn capture_value(&self) -> i32 {
        self.captured.map_or(0, |kind| kind.value())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation)
    }
}

/// 游戏结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    Ongoing,
    WhiteWin,
    BlackWin,
    Draw,
}
