//! 测试局面库
//!
//! 提供命名的 FEN 测试局面，方便测试、基准和调试
//!
//! 命名规范:
//! - START: 初始局面
//! - MID_n: 中局
//! - MATE_IN_ONE_*: 一步杀
//! - MATED_* / STALEMATE: 终局
//! - 其他: 特殊走法（易位、吃过路兵、升变）

// =============================================================================
// 开局 / 中局
// =============================================================================

/// 初始局面
pub const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// 意大利开局，白方可以短易位
pub const MID_1: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";

/// 白兵可以吃掉悬空的黑后
pub const HANGING_QUEEN: &str = "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1";

// =============================================================================
// 杀棋 (MATE)
// =============================================================================

/// 白先一步杀: Ra1-a8#
pub const MATE_IN_ONE_WHITE: &str = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";

/// 黑先一步杀: Ra8-a1#
pub const MATE_IN_ONE_BLACK: &str = "r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1";

/// 黑方已被将死（底线杀）
pub const MATED_BLACK: &str = "R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1";

/// 黑方被逼和
pub const STALEMATE: &str = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1";

/// 马王对单王，子力不足
pub const KNIGHT_VS_KING: &str = "8/8/4k3/8/8/3NK3/8/8 w - - 0 1";

// =============================================================================
// 特殊走法 (SPECIAL)
// =============================================================================

/// 双方都可以两翼易位（车可以互吃）
pub const CASTLING: &str = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";

/// 可以易位，但没有吃子也没有轻子
pub const CASTLING_QUIET: &str = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1";

/// e5 兵可以吃过路兵 d6
pub const EN_PASSANT: &str = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1";

/// e7 兵升变
pub const PROMOTION: &str = "8/4P1k1/8/8/8/8/8/4K3 w - - 0 1";

/// 所有局面（名称, FEN）
pub const ALL: &[(&str, &str)] = &[
    ("START", START),
    ("MID_1", MID_1),
    ("HANGING_QUEEN", HANGING_QUEEN),
    ("MATE_IN_ONE_WHITE", MATE_IN_ONE_WHITE),
    ("MATE_IN_ONE_BLACK", MATE_IN_ONE_BLACK),
    ("MATED_BLACK", MATED_BLACK),
    ("STALEMATE", STALEMATE),
    ("KNIGHT_VS_KING", KNIGHT_VS_KING),
    ("CASTLING", CASTLING),
    ("CASTLING_QUIET", CASTLING_QUIET),
    ("EN_PASSANT", EN_PASSANT),
    ("PROMOTION", PROMOTION),
];

/// 按名称查找局面（大小写不敏感）
pub fn by_name(name: &str) -> Option<&'static str> {
    ALL.iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, fen)| *fen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ChessGame;

    #[test]
    fn test_all_positions_parse() {
        for (name, fen) in ALL {
            assert!(ChessGame::from_fen(fen).is_ok(), "{} failed to parse", name);
        }
    }

    #[test]
    fn test_by_name() {
        assert_eq!(by_name("start"), Some(START));
        assert_eq!(by_name("Mid_1"), Some(MID_1));
        assert_eq!(by_name("nope"), None);
    }
}
