//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::columns::ScoreColumns;
use crate::constants::{DEFAULT_COLS, DEFAULT_ROWS, MAX_START_WIDTH, WIN_COUNT};
use crate::error::GameError;
use crate::message::WireBoard;
use crate::piece::{Direction, Piece, Player, Position};

/// 棋盘
///
/// 尺寸为 rows x cols，索引为 y * cols + x。每个格子最多一个棋子。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WireBoard", into = "WireBoard")]
pub struct Board {
    rows: usize,
    cols: usize,
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// 创建空棋盘
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            squares: vec![None; rows * cols],
        }
    }

    /// 从行数组创建（外层为行，内层为列）
    pub fn from_rows(rows: Vec<Vec<Option<Piece>>>) -> Result<Self, GameError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width > u8::MAX as usize + 1 || height > u8::MAX as usize + 1 {
            return Err(GameError::OutOfBounds {
                x: width as i64,
                y: height as i64,
                cols: u8::MAX as usize + 1,
                rows: u8::MAX as usize + 1,
            });
        }

        let mut squares = Vec::with_capacity(height * width);
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != width {
                return Err(GameError::RaggedBoard {
                    row,
                    expected: width,
                    actual: cells.len(),
                });
            }
            squares.extend(cells);
        }

        Ok(Self {
            rows: height,
            cols: width,
            squares,
        })
    }

    /// 标准开局：中央最多 6 列，方方占第 3、4 行，圆方占倒数第 5、4 行
    pub fn standard(rows: usize, cols: usize) -> Self {
        let mut board = Self::new(rows, cols);
        let width = MAX_START_WIDTH.min(cols.saturating_sub(6).max(2)).min(cols);
        let start = (cols - width) / 2;

        let square_rows = [Some(3), Some(4)];
        let circle_rows = [rows.checked_sub(5), rows.checked_sub(4)];

        for (owner, start_rows) in [(Player::Square, square_rows), (Player::Circle, circle_rows)] {
            for y in start_rows.into_iter().flatten().filter(|&y| y < rows) {
                for x in start..start + width {
                    board.set(Position::new(x as u8, y as u8), Some(Piece::stone(owner)));
                }
            }
        }

        board
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// 棋盘是否为空尺寸（0 行或 0 列）
    pub fn is_degenerate(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// 检查位置是否在棋盘内
    pub fn contains(&self, pos: Position) -> bool {
        (pos.x as usize) < self.cols && (pos.y as usize) < self.rows
    }

    fn index(&self, pos: Position) -> usize {
        pos.y as usize * self.cols + pos.x as usize
    }

    /// 获取指定位置的棋子
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if self.contains(pos) {
            self.squares[self.index(pos)]
        } else {
            None
        }
    }

    /// 设置指定位置的棋子，越界时忽略
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if self.contains(pos) {
            let index = self.index(pos);
            self.squares[index] = piece;
        }
    }

    /// 棋盘内且为空
    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.contains(pos) && self.squares[self.index(pos)].is_none()
    }

    /// 相邻格（越界返回 None）
    pub fn neighbor(&self, pos: Position, dir: Direction) -> Option<Position> {
        pos.step(dir).filter(|next| self.contains(*next))
    }

    /// 按行优先顺序获取所有棋子
    pub fn all_pieces(&self) -> Vec<(Position, Piece)> {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(index, square)| {
                square.map(|piece| {
                    let pos = Position::new((index % self.cols) as u8, (index / self.cols) as u8);
                    (pos, piece)
                })
            })
            .collect()
    }

    /// 按行优先顺序获取指定阵营的棋子
    pub fn pieces(&self, owner: Player) -> Vec<(Position, Piece)> {
        self.all_pieces()
            .into_iter()
            .filter(|(_, piece)| piece.owner == owner)
            .collect()
    }

    /// 交换双方归属后的棋盘
    pub fn with_owners_swapped(&self) -> Board {
        let mut board = self.clone();
        for square in board.squares.iter_mut().flatten() {
            square.owner = square.owner.opponent();
        }
        board
    }

    /// 统计某方位于指定列中的石子数
    pub fn stones_in_columns(&self, owner: Player, columns: &ScoreColumns) -> usize {
        self.pieces(owner)
            .into_iter()
            .filter(|(pos, piece)| piece.is_stone() && columns.contains(pos.x))
            .count()
    }

    /// 检查是否有一方已将足够的石子送入得分列
    pub fn winner(&self, circle_cols: &ScoreColumns, square_cols: &ScoreColumns) -> Option<Player> {
        if self.stones_in_columns(Player::Circle, circle_cols) >= WIN_COUNT {
            Some(Player::Circle)
        } else if self.stones_in_columns(Player::Square, square_cols) >= WIN_COUNT {
            Some(Player::Square)
        } else {
            None
        }
    }

    /// 行数据（外层为行）
    pub fn to_rows(&self) -> Vec<Vec<Option<Piece>>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.squares.chunks(self.cols).map(<[_]>::to_vec).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "   ")?;
        for x in 0..self.cols {
            write!(f, "{:>2} ", x)?;
        }
        writeln!(f)?;

        for (y, row) in self.to_rows().iter().enumerate() {
            write!(f, "{:>2} ", y)?;
            for cell in row {
                let c = cell.map_or('.', |piece| piece.to_layout_char());
                write!(f, "{:>2} ", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
