//! 棋子定义

use serde::{Deserialize, Serialize};

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// 圆方（起始在下方，向上推进）
    Circle,
    /// 方方（起始在上方，向下推进）
    Square,
}

impl Player {
    /// 获取对方阵营
    pub fn opponent(&self) -> Player {
        match self {
            Player::Circle => Player::Square,
            Player::Square => Player::Circle,
        }
    }

    /// 前进方向的 y 增量
    pub fn forward_dy(&self) -> i8 {
        match self {
            Player::Circle => -1,
            Player::Square => 1,
        }
    }

    /// 协议中的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Player::Circle => "circle",
            Player::Square => "square",
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 河流方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// 旋转后的方向
    pub fn toggled(&self) -> Orientation {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// 沿河流方向的两个出口（先负后正）
    pub fn exits(&self) -> [Direction; 2] {
        match self {
            Orientation::Horizontal => [Direction::Left, Direction::Right],
            Orientation::Vertical => [Direction::Up, Direction::Down],
        }
    }

    /// 方向是否与河流共线
    pub fn is_collinear(&self, dir: Direction) -> bool {
        match self {
            Orientation::Horizontal => dir.dy() == 0,
            Orientation::Vertical => dir.dx() == 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }

    /// 从协议字符串解析
    pub fn parse(s: &str) -> Option<Orientation> {
        match s {
            "horizontal" => Some(Orientation::Horizontal),
            "vertical" => Some(Orientation::Vertical),
            _ => None,
        }
    }
}

/// 棋子类型：河流必带方向，石子没有方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Stone,
    River(Orientation),
}

impl PieceKind {
    pub fn is_stone(&self) -> bool {
        matches!(self, PieceKind::Stone)
    }

    pub fn is_river(&self) -> bool {
        matches!(self, PieceKind::River(_))
    }

    /// 河流方向（石子为 None）
    pub fn orientation(&self) -> Option<Orientation> {
        match self {
            PieceKind::Stone => None,
            PieceKind::River(o) => Some(*o),
        }
    }
}

/// 棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub owner: Player,
    pub kind: PieceKind,
}

impl Piece {
    /// 创建新棋子
    pub fn new(owner: Player, kind: PieceKind) -> Self {
        Self { owner, kind }
    }

    pub fn stone(owner: Player) -> Self {
        Self::new(owner, PieceKind::Stone)
    }

    pub fn river(owner: Player, orientation: Orientation) -> Self {
        Self::new(owner, PieceKind::River(orientation))
    }

    pub fn is_stone(&self) -> bool {
        self.kind.is_stone()
    }

    pub fn is_river(&self) -> bool {
        self.kind.is_river()
    }

    /// 布局字符（圆方小写，方方大写）
    pub fn to_layout_char(&self) -> char {
        let c = match self.kind {
            PieceKind::Stone => 's',
            PieceKind::River(Orientation::Horizontal) => 'h',
            PieceKind::River(Orientation::Vertical) => 'v',
        };
        match self.owner {
            Player::Circle => c,
            Player::Square => c.to_ascii_uppercase(),
        }
    }

    /// 从布局字符解析
    pub fn from_layout_char(c: char) -> Option<Piece> {
        let owner = if c.is_ascii_uppercase() {
            Player::Square
        } else {
            Player::Circle
        };
        let kind = match c.to_ascii_lowercase() {
            's' => PieceKind::Stone,
            'h' => PieceKind::River(Orientation::Horizontal),
            'v' => PieceKind::River(Orientation::Vertical),
            _ => return None,
        };
        Some(Piece { owner, kind })
    }
}

/// 正交方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Left,
    Down,
    Up,
}

impl Direction {
    /// 走法生成时的扫描顺序
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    pub fn dx(&self) -> i8 {
        match self {
            Direction::Right => 1,
            Direction::Left => -1,
            Direction::Down | Direction::Up => 0,
        }
    }

    pub fn dy(&self) -> i8 {
        match self {
            Direction::Down => 1,
            Direction::Up => -1,
            Direction::Right | Direction::Left => 0,
        }
    }
}

/// 棋盘位置，(列 x, 行 y)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// 列
    pub x: u8,
    /// 行
    pub y: u8,
}

impl Position {
    /// 创建新位置（边界由棋盘检查）
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// 棋盘原点，用作无子可走时的占位走法
    pub const ORIGIN: Position = Position::new(0, 0);

    /// 按增量偏移，坐标为负或溢出时返回 None
    pub fn offset(&self, dx: i8, dy: i8) -> Option<Position> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Position { x, y })
    }

    /// 沿方向走一步
    pub fn step(&self, dir: Direction) -> Option<Position> {
        self.offset(dir.dx(), dir.dy())
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
