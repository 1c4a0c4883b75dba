//! 错误类型定义

use thiserror::Error;

/// 规则与格式错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    /// 坐标越界
    #[error("Position ({x}, {y}) is outside a {cols}x{rows} board")]
    OutOfBounds {
        x: i64,
        y: i64,
        cols: usize,
        rows: usize,
    },

    /// 棋盘行宽度不一致
    #[error("Ragged board: row {row} has {actual} cells, expected {expected}")]
    RaggedBoard {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// 无效的布局字符串
    #[error("Invalid layout string: {reason}")]
    InvalidLayout { reason: String },

    /// 未知的动作类型
    #[error("Unknown action: {0:?}")]
    UnknownAction(String),

    /// 推子缺少 pushed_to
    #[error("Push move is missing pushed_to")]
    MissingPushedTo,

    /// 无效或缺失的方向
    #[error("Invalid orientation for {action}: {value:?}")]
    InvalidOrientation { action: &'static str, value: String },
}

/// 协议错误类型
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化错误
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 规则错误
    #[error("Game error: {0}")]
    Game(#[from] GameError),
}

/// 协议操作结果类型
pub type Result<T> = std::result::Result<T, ProtocolError>;
