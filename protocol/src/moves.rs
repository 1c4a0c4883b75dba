//! 走法生成

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::columns::{ScoreColumns, ScoreView};
use crate::piece::{Direction, Orientation, Piece, PieceKind, Player, Position};

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// 移动（单步或顺河漂流）
    Move { from: Position, to: Position },
    /// 推子：走子进入 target，target 上的棋子被推到 pushed_to
    Push {
        from: Position,
        target: Position,
        pushed_to: Position,
    },
    /// 翻面：Some 为石子变河流，None 为河流变石子
    Flip {
        at: Position,
        orientation: Option<Orientation>,
    },
    /// 河流旋转
    Rotate { at: Position, orientation: Orientation },
}

/// 动作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Move,
    Push,
    Flip,
    Rotate,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Move => "move",
            ActionKind::Push => "push",
            ActionKind::Flip => "flip",
            ActionKind::Rotate => "rotate",
        }
    }
}

impl Move {
    /// 无子可走时返回的占位走法（原点到原点）
    pub const PLACEHOLDER: Move = Move::Move {
        from: Position::ORIGIN,
        to: Position::ORIGIN,
    };

    pub fn action(&self) -> ActionKind {
        match self {
            Move::Move { .. } => ActionKind::Move,
            Move::Push { .. } => ActionKind::Push,
            Move::Flip { .. } => ActionKind::Flip,
            Move::Rotate { .. } => ActionKind::Rotate,
        }
    }

    /// 走子的起始位置
    pub fn from(&self) -> Position {
        match *self {
            Move::Move { from, .. } | Move::Push { from, .. } => from,
            Move::Flip { at, .. } | Move::Rotate { at, .. } => at,
        }
    }

    /// 走子的落点（翻面与旋转为原地）
    pub fn to(&self) -> Position {
        match *self {
            Move::Move { to, .. } => to,
            Move::Push { target, .. } => target,
            Move::Flip { at, .. } | Move::Rotate { at, .. } => at,
        }
    }

    /// 被推棋子的落点
    pub fn pushed_to(&self) -> Option<Position> {
        match *self {
            Move::Push { pushed_to, .. } => Some(pushed_to),
            _ => None,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Move { from, to } => write!(f, "move {} -> {}", from, to),
            Move::Push {
                from,
                target,
                pushed_to,
            } => write!(f, "push {} -> {} => {}", from, target, pushed_to),
            Move::Flip {
                at,
                orientation: Some(o),
            } => write!(f, "flip {} to {}", at, o.as_str()),
            Move::Flip {
                at,
                orientation: None,
            } => write!(f, "flip {} to stone", at),
            Move::Rotate { at, orientation } => write!(f, "rotate {} to {}", at, orientation.as_str()),
        }
    }
}

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成指定阵营的所有走法
    ///
    /// 按行优先扫描棋盘，每个棋子依次产生：移动/漂流、推子、翻面、旋转。
    /// 结果可能包含语义重复的走法。
    pub fn generate(board: &Board, side: Player, view: ScoreView<'_>) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        if board.is_degenerate() {
            return moves;
        }

        for (pos, piece) in board.pieces(side) {
            Self::generate_piece_moves(board, pos, piece, view.opponent, &mut moves);
        }

        moves
    }

    /// 生成单个棋子的走法
    fn generate_piece_moves(
        board: &Board,
        pos: Position,
        piece: Piece,
        forbidden: &ScoreColumns,
        moves: &mut Vec<Move>,
    ) {
        Self::generate_steps(board, pos, forbidden, moves);
        Self::generate_pushes(board, pos, piece, forbidden, moves);

        match piece.kind {
            PieceKind::Stone => {
                for orientation in [Orientation::Horizontal, Orientation::Vertical] {
                    moves.push(Move::Flip {
                        at: pos,
                        orientation: Some(orientation),
                    });
                }
            }
            PieceKind::River(orientation) => {
                moves.push(Move::Flip {
                    at: pos,
                    orientation: None,
                });
                moves.push(Move::Rotate {
                    at: pos,
                    orientation: orientation.toggled(),
                });
            }
        }
    }

    /// 单步移动与顺河漂流
    fn generate_steps(board: &Board, from: Position, forbidden: &ScoreColumns, moves: &mut Vec<Move>) {
        for dir in Direction::ALL {
            let Some(next) = board.neighbor(from, dir) else {
                continue;
            };
            if forbidden.contains(next.x) {
                continue;
            }

            match board.get(next) {
                None => moves.push(Move::Move { from, to: next }),
                Some(piece) if piece.is_river() => {
                    if let Some(to) = Self::ride_river(board, next, from, forbidden) {
                        moves.push(Move::Move { from, to });
                    }
                }
                Some(_) => {}
            }
        }
    }

    /// 推子
    ///
    /// 普通推子把相邻的对方棋子推一格；走子为与方向共线的河流且目标是石子时，
    /// 石子沿该方向一直滑到最远的空格。
    fn generate_pushes(
        board: &Board,
        from: Position,
        piece: Piece,
        forbidden: &ScoreColumns,
        moves: &mut Vec<Move>,
    ) {
        for dir in Direction::ALL {
            let Some(target) = board.neighbor(from, dir) else {
                continue;
            };
            // 推子方会进入 target
            if forbidden.contains(target.x) {
                continue;
            }
            let Some(occupant) = board.get(target) else {
                continue;
            };
            if occupant.owner == piece.owner {
                continue;
            }

            let Some(landing) = board.neighbor(target, dir) else {
                continue;
            };
            if !board.is_empty_at(landing) {
                continue;
            }

            if !forbidden.contains(landing.x) {
                moves.push(Move::Push {
                    from,
                    target,
                    pushed_to: landing,
                });
            }

            let aligned = piece.kind.orientation().is_some_and(|o| o.is_collinear(dir));
            if aligned && occupant.is_stone() {
                let far = Self::farthest_empty_in_line(board, landing, dir, forbidden);
                if !forbidden.contains(far.x) {
                    moves.push(Move::Push {
                        from,
                        target,
                        pushed_to: far,
                    });
                }
            }
        }
    }

    /// 从 start（必须为空）出发沿 dir 走过连续空格，返回最后一个可落子的格子
    fn farthest_empty_in_line(
        board: &Board,
        start: Position,
        dir: Direction,
        forbidden: &ScoreColumns,
    ) -> Position {
        let mut last_ok = start;
        let mut current = start;
        loop {
            if forbidden.contains(current.x) {
                break;
            }
            last_ok = current;
            match board.neighbor(current, dir) {
                Some(next) if board.is_empty_at(next) => current = next,
                _ => break,
            }
        }
        last_ok
    }

    /// 顺河漂流
    ///
    /// entry 为第一块河流，came_from 为出发格。下一步越界、进入对方得分列
    /// 或撞上石子时停在当前河流上；遇到空格时落在该空格；遇到河流（任一方）则继续。
    /// 第一步都走不出去时返回 None。
    pub fn ride_river(
        board: &Board,
        entry: Position,
        came_from: Position,
        forbidden: &ScoreColumns,
    ) -> Option<Position> {
        let entry_orientation = board.get(entry)?.kind.orientation()?;
        if forbidden.contains(entry.x) {
            return None;
        }

        let mut previous = came_from;
        let mut current = entry;
        let mut orientation = entry_orientation;

        // 出口总是先取负方向：一旦向上或向左转向就不会再向右或向下，
        // 路径不会重访同一格，最多经过 rows * cols 格
        for _ in 0..board.rows() * board.cols() {
            let exit = orientation
                .exits()
                .into_iter()
                .find(|dir| current.step(*dir) != Some(previous))?;

            let Some(next) = board.neighbor(current, exit) else {
                return Some(current);
            };
            if forbidden.contains(next.x) {
                return Some(current);
            }

            match board.get(next) {
                None => return Some(next),
                Some(piece) => match piece.kind {
                    PieceKind::Stone => return Some(current),
                    PieceKind::River(next_orientation) => {
                        previous = current;
                        current = next;
                        orientation = next_orientation;
                    }
                },
            }
        }

        Some(current)
    }
}
