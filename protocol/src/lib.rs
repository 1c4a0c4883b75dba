//! 石子与河流共享协议库
//!
//! 包含:
//! - 棋子、棋盘、位置、得分列等核心数据结构
//! - 走法生成与局面转换
//! - 布局字符串（测试与诊断用）
//! - 进程边界上的消息格式与棋盘文件

mod board;
mod columns;
mod constants;
mod error;
mod layout;
mod message;
mod moves;
mod piece;
mod record;
mod transition;

pub use board::Board;
pub use columns::{ScoreColumns, ScoreView};
pub use constants::*;
pub use error::{GameError, ProtocolError, Result};
pub use layout::Layout;
pub use message::{DecisionRequest, WireBoard, WireCell, WireMove, WireSide};
pub use moves::{ActionKind, Move, MoveGenerator};
pub use piece::{Direction, Orientation, Piece, PieceKind, Player, Position};
pub use record::BoardFile;
