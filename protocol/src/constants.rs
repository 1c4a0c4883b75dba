//! 协议常量定义

/// 默认棋盘行数
pub const DEFAULT_ROWS: usize = 13;

/// 默认棋盘列数
pub const DEFAULT_COLS: usize = 12;

/// 得分列宽度（居中）
pub const SCORE_COLUMN_WIDTH: usize = 4;

/// 初始布子区域的最大宽度
pub const MAX_START_WIDTH: usize = 6;

/// 获胜所需的得分石子数
pub const WIN_COUNT: usize = 4;

/// 每方初始时间（秒）
pub const TIME_PER_PLAYER_SECS: f64 = 60.0;
