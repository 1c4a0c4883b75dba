//! 开局策略
//!
//! 按固定的列优先级寻找己方石子向前推进一步：先中间两列，再向外两列，
//! 最后向外一列。最后一档中石子直接翻成横向河流，河流则在路径畅通时前进。

use river_protocol::{Board, Move, Orientation, PieceKind, Player, Position, ScoreColumns};

/// 开局策略
pub struct OpeningPolicy;

impl OpeningPolicy {
    /// 给出开局走法；不适用时返回 None
    ///
    /// forbidden 为对方的得分列，前进的目标格不能落在其中。
    pub fn suggest(board: &Board, side: Player, forbidden: &ScoreColumns) -> Option<Move> {
        if board.is_degenerate() {
            return None;
        }

        let central_left = board.cols() as i64 / 2 - 1;
        let central_right = board.cols() as i64 / 2;
        let dy = side.forward_dy();

        // 中间两列、外侧两列：只推进石子
        for tier in [
            [central_left, central_right],
            [central_left - 2, central_right + 2],
        ] {
            for x in Self::columns_on_board(board, tier) {
                for y in Self::rows_on_board(board) {
                    let at = Position::new(x, y);
                    match board.get(at) {
                        Some(piece) if piece.owner == side && piece.is_stone() => {
                            if let Some(to) = Self::clear_step(board, at, dy, forbidden) {
                                return Some(Move::Move { from: at, to });
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        // 次外侧两列：石子翻面，河流前进
        for x in Self::columns_on_board(board, [central_left - 1, central_right + 1]) {
            for y in Self::rows_on_board(board) {
                let at = Position::new(x, y);
                let Some(piece) = board.get(at).filter(|p| p.owner == side) else {
                    continue;
                };
                match piece.kind {
                    PieceKind::Stone => {
                        return Some(Move::Flip {
                            at,
                            orientation: Some(Orientation::Horizontal),
                        });
                    }
                    PieceKind::River(_) => {
                        if let Some(to) = Self::clear_step(board, at, dy, forbidden) {
                            return Some(Move::Move { from: at, to });
                        }
                    }
                }
            }
        }

        None
    }

    fn rows_on_board(board: &Board) -> impl Iterator<Item = u8> {
        (0..board.rows()).filter_map(|y| u8::try_from(y).ok())
    }

    fn columns_on_board(board: &Board, tier: [i64; 2]) -> impl Iterator<Item = u8> {
        let cols = board.cols() as i64;
        tier.into_iter()
            .filter(move |x| (0..cols).contains(x))
            .map(|x| x as u8)
    }

    /// 前方一格在棋盘内、为空且不在对方得分列中时返回该格
    fn clear_step(board: &Board, at: Position, dy: i8, forbidden: &ScoreColumns) -> Option<Position> {
        at.offset(0, dy)
            .filter(|next| board.is_empty_at(*next) && !forbidden.contains(next.x))
    }
}
