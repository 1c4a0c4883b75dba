//! 局面转换
//!
//! 把一步走法应用到棋盘上，得到新棋盘；输入棋盘永不修改。

use tracing::warn;

use crate::board::Board;
use crate::moves::Move;
use crate::piece::{Piece, PieceKind};

impl Board {
    /// 应用走法，返回新棋盘
    ///
    /// 对不成立的走法（起点为空、坐标越界、对石子旋转等）不报错：
    /// 相关格子保持不变，只记录一条警告。
    pub fn apply(&self, mv: &Move) -> Board {
        let mut next = self.clone();

        match *mv {
            Move::Move { from, to } => {
                let Some(piece) = self.get(from) else {
                    warn!("Ignoring move from empty square {}", from);
                    return next;
                };
                if !self.contains(to) {
                    warn!("Ignoring move to off-board square {}", to);
                    return next;
                }
                next.set(from, None);
                next.set(to, Some(piece));
            }
            Move::Push {
                from,
                target,
                pushed_to,
            } => {
                let (Some(pusher), Some(pushed)) = (self.get(from), self.get(target)) else {
                    warn!("Ignoring push {} -> {} with a missing piece", from, target);
                    return next;
                };
                if !self.contains(pushed_to) {
                    warn!("Ignoring push to off-board square {}", pushed_to);
                    return next;
                }

                next.set(target, None);
                next.set(pushed_to, Some(pushed));
                next.set(from, None);
                // 推子后的河流变为石子
                let landed = match pusher.kind {
                    PieceKind::River(_) => Piece::stone(pusher.owner),
                    PieceKind::Stone => pusher,
                };
                next.set(target, Some(landed));
            }
            Move::Flip { at, orientation } => {
                let Some(piece) = self.get(at) else {
                    warn!("Ignoring flip on empty square {}", at);
                    return next;
                };
                let kind = match (piece.kind, orientation) {
                    (PieceKind::Stone, Some(o)) => PieceKind::River(o),
                    (PieceKind::River(_), _) => PieceKind::Stone,
                    (PieceKind::Stone, None) => {
                        warn!("Ignoring stone flip at {} without orientation", at);
                        return next;
                    }
                };
                next.set(at, Some(Piece::new(piece.owner, kind)));
            }
            Move::Rotate { at, orientation } => match self.get(at) {
                Some(piece) if piece.is_river() => {
                    next.set(at, Some(Piece::river(piece.owner, orientation)));
                }
                _ => warn!("Ignoring rotate at {}: no river there", at),
            },
        }

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use crate::piece::{Orientation, Player, Position};

    fn board(layout: &str) -> Board {
        Layout::parse(layout).unwrap()
    }

    #[test]
    fn test_apply_move() {
        let before = board("v2");
        let after = before.apply(&Move::Move {
            from: Position::new(0, 0),
            to: Position::new(2, 0),
        });
        assert_eq!(Layout::format(&after), "2v");
        // 原棋盘不变
        assert_eq!(Layout::format(&before), "v2");
    }

    #[test]
    fn test_apply_push_stone() {
        let after = board("sS1").apply(&Move::Push {
            from: Position::new(0, 0),
            target: Position::new(1, 0),
            pushed_to: Position::new(2, 0),
        });
        assert_eq!(Layout::format(&after), "1sS");
    }

    #[test]
    fn test_apply_push_river_becomes_stone() {
        let after = board("hS3").apply(&Move::Push {
            from: Position::new(0, 0),
            target: Position::new(1, 0),
            pushed_to: Position::new(4, 0),
        });
        assert_eq!(Layout::format(&after), "1s2S");
    }

    #[test]
    fn test_pushed_river_keeps_orientation() {
        let after = board("sV1").apply(&Move::Push {
            from: Position::new(0, 0),
            target: Position::new(1, 0),
            pushed_to: Position::new(2, 0),
        });
        assert_eq!(Layout::format(&after), "1sV");
    }

    #[test]
    fn test_apply_flip() {
        let to_river = board("s").apply(&Move::Flip {
            at: Position::new(0, 0),
            orientation: Some(Orientation::Vertical),
        });
        assert_eq!(
            to_river.get(Position::new(0, 0)),
            Some(Piece::river(Player::Circle, Orientation::Vertical))
        );

        let to_stone = to_river.apply(&Move::Flip {
            at: Position::new(0, 0),
            orientation: None,
        });
        assert_eq!(to_stone.get(Position::new(0, 0)), Some(Piece::stone(Player::Circle)));
    }

    #[test]
    fn test_apply_rotate() {
        let after = board("H").apply(&Move::Rotate {
            at: Position::new(0, 0),
            orientation: Orientation::Vertical,
        });
        assert_eq!(Layout::format(&after), "V");
    }

    #[test]
    fn test_rotate_on_stone_is_noop() {
        let before = board("S1");
        let after = before.apply(&Move::Rotate {
            at: Position::new(0, 0),
            orientation: Orientation::Vertical,
        });
        assert_eq!(after, before);
    }

    #[test]
    fn test_stale_coordinates_are_noop() {
        let before = board("s1/2");
        let stale = [
            Move::Move {
                from: Position::new(1, 1),
                to: Position::new(0, 1),
            },
            Move::Move {
                from: Position::new(0, 0),
                to: Position::new(9, 9),
            },
            Move::Push {
                from: Position::new(0, 0),
                target: Position::new(1, 0),
                pushed_to: Position::new(1, 1),
            },
            Move::Flip {
                at: Position::new(1, 1),
                orientation: Some(Orientation::Horizontal),
            },
            Move::Flip {
                at: Position::new(0, 0),
                orientation: None,
            },
        ];
        for mv in stale {
            assert_eq!(before.apply(&mv), before, "{} should not change the board", mv);
        }
    }
}
