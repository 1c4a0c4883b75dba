//! 进程边界上的消息格式
//!
//! 棋盘以 `[[cell | null]]` 传递（外层为行），走法以
//! `{action, from, to, pushed_to?, orientation}` 传递。

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::columns::{ScoreColumns, ScoreView};
use crate::error::GameError;
use crate::moves::{ActionKind, Move};
use crate::piece::{Orientation, Piece, PieceKind, Player, Position};

/// 棋子面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireSide {
    Stone,
    River,
}

/// 单个格子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireCell {
    pub owner: Player,
    pub side: WireSide,
    /// 仅对河流有意义，石子上的方向被忽略
    #[serde(default)]
    pub orientation: Option<Orientation>,
}

/// 行优先的棋盘
pub type WireBoard = Vec<Vec<Option<WireCell>>>;

impl From<Piece> for WireCell {
    fn from(piece: Piece) -> Self {
        match piece.kind {
            PieceKind::Stone => WireCell {
                owner: piece.owner,
                side: WireSide::Stone,
                orientation: None,
            },
            PieceKind::River(o) => WireCell {
                owner: piece.owner,
                side: WireSide::River,
                orientation: Some(o),
            },
        }
    }
}

impl TryFrom<WireCell> for Piece {
    type Error = GameError;

    fn try_from(cell: WireCell) -> Result<Self, Self::Error> {
        match (cell.side, cell.orientation) {
            (WireSide::Stone, _) => Ok(Piece::stone(cell.owner)),
            (WireSide::River, Some(o)) => Ok(Piece::river(cell.owner, o)),
            (WireSide::River, None) => Err(GameError::InvalidOrientation {
                action: "river",
                value: String::new(),
            }),
        }
    }
}

impl TryFrom<WireBoard> for Board {
    type Error = GameError;

    fn try_from(rows: WireBoard) -> Result<Self, Self::Error> {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.map(Piece::try_from).transpose())
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Board::from_rows(rows)
    }
}

impl From<Board> for WireBoard {
    fn from(board: Board) -> Self {
        board
            .to_rows()
            .into_iter()
            .map(|row| row.into_iter().map(|cell| cell.map(WireCell::from)).collect())
            .collect()
    }
}

/// 协议走法
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMove {
    pub action: String,
    pub from: [u8; 2],
    pub to: [u8; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pushed_to: Option<[u8; 2]>,
    /// 翻成河流与旋转时为方向，其余为空字符串
    #[serde(default)]
    pub orientation: String,
}

fn coords(pos: Position) -> [u8; 2] {
    [pos.x, pos.y]
}

fn position([x, y]: [u8; 2]) -> Position {
    Position::new(x, y)
}

impl From<Move> for WireMove {
    fn from(mv: Move) -> Self {
        let orientation = match mv {
            Move::Flip {
                orientation: Some(o),
                ..
            }
            | Move::Rotate { orientation: o, .. } => o.as_str().to_string(),
            _ => String::new(),
        };

        WireMove {
            action: mv.action().as_str().to_string(),
            from: coords(mv.from()),
            to: coords(mv.to()),
            pushed_to: mv.pushed_to().map(coords),
            orientation,
        }
    }
}

impl TryFrom<WireMove> for Move {
    type Error = GameError;

    fn try_from(wire: WireMove) -> Result<Self, Self::Error> {
        let from = position(wire.from);
        let to = position(wire.to);

        match wire.action.as_str() {
            "move" => Ok(Move::Move { from, to }),
            "push" => {
                let pushed_to = wire.pushed_to.ok_or(GameError::MissingPushedTo)?;
                Ok(Move::Push {
                    from,
                    target: to,
                    pushed_to: position(pushed_to),
                })
            }
            "flip" => {
                let orientation = match wire.orientation.as_str() {
                    "" => None,
                    other => Some(Orientation::parse(other).ok_or_else(|| {
                        GameError::InvalidOrientation {
                            action: ActionKind::Flip.as_str(),
                            value: other.to_string(),
                        }
                    })?),
                };
                Ok(Move::Flip { at: from, orientation })
            }
            "rotate" => {
                let orientation = Orientation::parse(&wire.orientation).ok_or_else(|| {
                    GameError::InvalidOrientation {
                        action: ActionKind::Rotate.as_str(),
                        value: wire.orientation.clone(),
                    }
                })?;
                Ok(Move::Rotate { at: from, orientation })
            }
            other => Err(GameError::UnknownAction(other.to_string())),
        }
    }
}

/// 一次决策请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRequest {
    pub board: Board,
    /// 走子方
    pub side: Player,
    /// 走子方的得分列
    pub own_columns: ScoreColumns,
    /// 对方的得分列
    pub opponent_columns: ScoreColumns,
    /// 走子方剩余时间（秒）
    pub own_time: f64,
    /// 对方剩余时间（秒）
    pub opponent_time: f64,
}

impl DecisionRequest {
    /// 走子方视角的得分列对
    pub fn view(&self) -> ScoreView<'_> {
        ScoreView::new(&self.own_columns, &self.opponent_columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;

    #[test]
    fn test_wire_move_fields() {
        let push = Move::Push {
            from: Position::new(1, 2),
            target: Position::new(2, 2),
            pushed_to: Position::new(5, 2),
        };
        let json = serde_json::to_value(WireMove::from(push)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "action": "push",
                "from": [1, 2],
                "to": [2, 2],
                "pushed_to": [5, 2],
                "orientation": ""
            })
        );

        let flip = WireMove::from(Move::Flip {
            at: Position::new(3, 4),
            orientation: Some(Orientation::Horizontal),
        });
        assert_eq!(flip.action, "flip");
        assert_eq!(flip.to, [3, 4]);
        assert_eq!(flip.orientation, "horizontal");
        assert_eq!(flip.pushed_to, None);

        let placeholder = WireMove::from(Move::PLACEHOLDER);
        assert_eq!(placeholder.from, [0, 0]);
        assert_eq!(placeholder.to, [0, 0]);
        assert_eq!(placeholder.orientation, "");
    }

    #[test]
    fn test_wire_move_parse() {
        let wire: WireMove =
            serde_json::from_str(r#"{"action":"rotate","from":[1,1],"to":[1,1],"orientation":"vertical"}"#)
                .unwrap();
        assert_eq!(
            Move::try_from(wire).unwrap(),
            Move::Rotate {
                at: Position::new(1, 1),
                orientation: Orientation::Vertical
            }
        );

        let to_stone: WireMove =
            serde_json::from_str(r#"{"action":"flip","from":[0,2],"to":[0,2]}"#).unwrap();
        assert_eq!(
            Move::try_from(to_stone).unwrap(),
            Move::Flip {
                at: Position::new(0, 2),
                orientation: None
            }
        );
    }

    #[test]
    fn test_wire_move_errors() {
        let base = WireMove {
            action: "push".to_string(),
            from: [0, 0],
            to: [1, 0],
            pushed_to: None,
            orientation: String::new(),
        };
        assert_eq!(Move::try_from(base.clone()), Err(GameError::MissingPushedTo));

        let unknown = WireMove {
            action: "jump".to_string(),
            ..base.clone()
        };
        assert_eq!(
            Move::try_from(unknown),
            Err(GameError::UnknownAction("jump".to_string()))
        );

        let rotate = WireMove {
            action: "rotate".to_string(),
            ..base
        };
        assert!(matches!(
            Move::try_from(rotate),
            Err(GameError::InvalidOrientation { action: "rotate", .. })
        ));
    }

    #[test]
    fn test_board_wire_format() {
        let json = r#"[
            [null, {"owner": "circle", "side": "stone", "orientation": "horizontal"}],
            [{"owner": "square", "side": "river", "orientation": "vertical"}, null]
        ]"#;
        let board: Board = serde_json::from_str(json).unwrap();
        // 石子上的方向被忽略
        assert_eq!(Layout::format(&board), "1s/V1");

        let back = serde_json::to_value(&board).unwrap();
        assert_eq!(back[0][1]["orientation"], serde_json::Value::Null);
        assert_eq!(back[1][0]["side"], "river");
    }

    #[test]
    fn test_river_without_orientation_rejected() {
        let json = r#"[[{"owner": "square", "side": "river"}]]"#;
        assert!(serde_json::from_str::<Board>(json).is_err());
    }

    #[test]
    fn test_decision_request() {
        let json = r#"{
            "board": [[null, null], [null, {"owner": "circle", "side": "stone"}]],
            "side": "circle",
            "own_columns": [0],
            "opponent_columns": [1],
            "own_time": 55.5,
            "opponent_time": 40.0
        }"#;
        let request: DecisionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.side, Player::Circle);
        assert!(request.view().own.contains(0));
        assert!(request.view().opponent.contains(1));
        assert_eq!(request.board.pieces(Player::Circle).len(), 1);
    }
}
