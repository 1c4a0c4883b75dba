//! 布局字符串解析和生成
//!
//! 类似 FEN：从第 0 行开始逐行书写，行之间用 `/` 分隔。
//! 空格用 `.` 或十进制数字（可多位）表示；圆方小写、方方大写，
//! `s` 石子，`h` 横向河流，`v` 竖向河流。
//!
//! 示例：`2sS/h3/4`

use crate::board::Board;
use crate::error::GameError;
use crate::piece::Piece;

/// 布局格式处理
pub struct Layout;

impl Layout {
    /// 解析布局字符串
    pub fn parse(layout: &str) -> Result<Board, GameError> {
        let layout = layout.trim();
        if layout.is_empty() {
            return Err(GameError::InvalidLayout {
                reason: "Empty layout string".to_string(),
            });
        }

        let mut rows = Vec::new();
        for (row_idx, row_str) in layout.split('/').enumerate() {
            rows.push(Self::parse_row(row_idx, row_str)?);
        }

        Board::from_rows(rows)
    }

    fn parse_row(row_idx: usize, row_str: &str) -> Result<Vec<Option<Piece>>, GameError> {
        let mut row = Vec::new();
        let mut pending_empty: usize = 0;

        for c in row_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                pending_empty = pending_empty
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit as usize))
                    .ok_or_else(|| GameError::InvalidLayout {
                        reason: format!("Empty run too long in row {}", row_idx),
                    })?;
                continue;
            }

            row.extend(std::iter::repeat(None).take(pending_empty));
            pending_empty = 0;

            if c == '.' {
                row.push(None);
            } else if let Some(piece) = Piece::from_layout_char(c) {
                row.push(Some(piece));
            } else {
                return Err(GameError::InvalidLayout {
                    reason: format!("Invalid piece character {:?} in row {}", c, row_idx),
                });
            }
        }
        row.extend(std::iter::repeat(None).take(pending_empty));

        if row.is_empty() {
            return Err(GameError::InvalidLayout {
                reason: format!("Row {} is empty", row_idx),
            });
        }
        Ok(row)
    }

    /// 将棋盘转换为布局字符串（空格使用数字压缩）
    pub fn format(board: &Board) -> String {
        let mut rows = Vec::with_capacity(board.rows());

        for cells in board.to_rows() {
            let mut row = String::new();
            let mut empty_count = 0;

            for cell in cells {
                if let Some(piece) = cell {
                    if empty_count > 0 {
                        row.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    row.push(piece.to_layout_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                row.push_str(&empty_count.to_string());
            }

            rows.push(row);
        }

        rows.join("/")
    }
}
