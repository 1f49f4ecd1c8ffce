//! 测试用的脚本化博弈树
//!
//! 用一棵显式的树实现 `RulesEngine`，叶子的子力分数用兵的数量表示，
//! 方便精确构造搜索和选点场景。

use rand::prelude::*;

use crate::error::{EngineError, Result};
use crate::rules::RulesEngine;
use crate::types::{Color, Move, MoveFlags, Piece, PieceKind, Square};

/// 树的描述
#[derive(Debug, Clone)]
pub enum Tree {
    /// 叶子：白方视角的子力分数（必须是 10 的倍数）
    Leaf(i32),
    /// 行棋方已被将死
    Mated,
    /// 行棋方被逼和
    Stalemate,
    Branch(Vec<Tree>),
    /// 带指定走法的分支
    Moves(Vec<(Move, Tree)>),
}

#[derive(Debug, Clone)]
struct Node {
    side: Color,
    pieces: Vec<(Square, Piece)>,
    children: Vec<(Move, usize)>,
    mated: bool,
    stalemate: bool,
}

#[derive(Debug, Clone)]
pub struct ScriptedGame {
    nodes: Vec<Node>,
    current: usize,
    stack: Vec<(usize, Move)>,
    pub applies: usize,
    pub undos: usize,
    /// 第 n 次执行时拒绝走法
    pub reject_apply_at: Option<usize>,
    /// 撤销时返回错误的走法
    pub corrupt_undo: bool,
}

/// 构造一个走法
pub fn mv(from: &str, to: &str, kind: PieceKind, color: Color, captured: Option<PieceKind>) -> Move {
    let from = Square::from_algebraic(from).expect("bad square");
    let to = Square::from_algebraic(to).expect("bad square");
    Move {
        from,
        to,
        piece: Piece::new(kind, color),
        captured,
        promotion: None,
        flags: MoveFlags::NONE,
        notation: format!("{}{}", from, to),
    }
}

fn material(score: i32) -> Vec<(Square, Piece)> {
    assert!(score % 10 == 0, "leaf score must be a multiple of 10");
    let color = if score >= 0 { Color::White } else { Color::Black };
    (0..(score.abs() / 10) as usize)
        .map(|i| (Square::from_index(i), Piece::new(PieceKind::Pawn, color)))
        .collect()
}

impl ScriptedGame {
    pub fn new(side: Color, tree: &Tree) -> Self {
        let mut game = ScriptedGame {
            nodes: Vec::new(),
            current: 0,
            stack: Vec::new(),
            applies: 0,
            undos: 0,
            reject_apply_at: None,
            corrupt_undo: false,
        };
        game.build(side, tree);
        game
    }

    /// 根节点只有给定走法，每个走法都通向 0 分叶子
    pub fn with_moves(side: Color, moves: Vec<Move>) -> Self {
        let children = moves.into_iter().map(|m| (m, Tree::Leaf(0))).collect();
        Self::new(side, &Tree::Moves(children))
    }

    /// 随机树（固定种子），用于比较剪枝与完整极小化极大
    pub fn random(seed: u64, depth: u32, max_branching: usize) -> Self {
        fn grow(rng: &mut StdRng, depth: u32, max_branching: usize) -> Tree {
            if depth == 0 {
                return Tree::Leaf(rng.gen_range(-20..=20) * 10);
            }
            if rng.gen_bool(0.05) {
                return Tree::Mated;
            }
            let n = rng.gen_range(1..=max_branching);
            Tree::Branch((0..n).map(|_| grow(rng, depth - 1, max_branching)).collect())
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let tree = grow(&mut rng, depth, max_branching);
        Self::new(Color::White, &tree)
    }

    fn build(&mut self, side: Color, tree: &Tree) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            side,
            pieces: Vec::new(),
            children: Vec::new(),
            mated: false,
            stalemate: false,
        });

        match tree {
            Tree::Leaf(score) => self.nodes[idx].pieces = material(*score),
            Tree::Mated => self.nodes[idx].mated = true,
            Tree::Stalemate => self.nodes[idx].stalemate = true,
            Tree::Branch(children) => {
                for (i, child) in children.iter().enumerate() {
                    let mut m = mv("a1", "a2", PieceKind::Pawn, side, None);
                    m.from = Square::from_index(i);
                    m.to = Square::from_index(63 - i);
                    m.notation = format!("n{}m{}", idx, i);
                    let child_idx = self.build(side.opposite(), child);
                    self.nodes[idx].children.push((m, child_idx));
                }
            }
            Tree::Moves(children) => {
                for (m, child) in children {
                    let child_idx = self.build(side.opposite(), child);
                    self.nodes[idx].children.push((m.clone(), child_idx));
                }
            }
        }
        idx
    }

    /// 当前是否回到了根节点且执行/撤销配对
    pub fn is_balanced(&self) -> bool {
        self.stack.is_empty() && self.current == 0 && self.applies == self.undos
    }
}

impl RulesEngine for ScriptedGame {
    fn legal_moves(&self) -> Vec<Move> {
        self.nodes[self.current]
            .children
            .iter()
            .map(|(m, _)| m.clone())
            .collect()
    }

    fn apply_move(&mut self, mv: &Move) -> Result<()> {
        if self.reject_apply_at == Some(self.applies) {
            return Err(EngineError::IllegalMove(mv.notation.clone()));
        }
        let child = self.nodes[self.current]
            .children
            .iter()
            .find(|(m, _)| m == mv)
            .map(|(_, c)| *c)
            .ok_or_else(|| EngineError::IllegalMove(mv.notation.clone()))?;
        self.stack.push((self.current, mv.clone()));
        self.current = child;
        self.applies += 1;
        Ok(())
    }

    fn undo_move(&mut self) -> Result<Move> {
        let (parent, mut m) = self.stack.pop().ok_or(EngineError::NothingToUndo)?;
        self.current = parent;
        self.undos += 1;
        if self.corrupt_undo {
            m.notation.push('?');
        }
        Ok(m)
    }

    fn side_to_move(&self) -> Color {
        self.nodes[self.current].side
    }

    fn is_check(&self) -> bool {
        self.nodes[self.current].mated
    }

    fn is_checkmate(&self) -> bool {
        self.nodes[self.current].mated
    }

    fn is_stalemate(&self) -> bool {
        self.nodes[self.current].stalemate
    }

    fn is_draw(&self) -> bool {
        self.nodes[self.current].stalemate
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.nodes[self.current]
            .pieces
            .iter()
            .find(|(sq, _)| *sq == square)
            .map(|(_, p)| *p)
    }
}
