//! 得分列

use serde::{Deserialize, Serialize};

use crate::constants::SCORE_COLUMN_WIDTH;

/// 一方的得分列集合（有序、去重）
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<u8>", into = "Vec<u8>")]
pub struct ScoreColumns {
    columns: Vec<u8>,
}

impl ScoreColumns {
    pub fn new(columns: impl IntoIterator<Item = u8>) -> Self {
        let mut columns: Vec<u8> = columns.into_iter().collect();
        columns.sort_unstable();
        columns.dedup();
        Self { columns }
    }

    /// 空集合
    pub fn none() -> Self {
        Self::default()
    }

    /// 棋盘中央宽度为 4 的得分列
    pub fn centered(cols: usize) -> Self {
        let start = cols.saturating_sub(SCORE_COLUMN_WIDTH) / 2;
        let end = (start + SCORE_COLUMN_WIDTH).min(cols);
        Self::new((start..end).map(|x| x as u8))
    }

    pub fn contains(&self, x: u8) -> bool {
        self.columns.binary_search(&x).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.columns.iter().copied()
    }
}

impl From<Vec<u8>> for ScoreColumns {
    fn from(columns: Vec<u8>) -> Self {
        Self::new(columns)
    }
}

impl From<ScoreColumns> for Vec<u8> {
    fn from(columns: ScoreColumns) -> Self {
        columns.columns
    }
}

/// 当前走子方视角下的得分列对
///
/// 搜索中每一层都要交换 own/opponent，评估视角则保持不变。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreView<'a> {
    /// 走子方自己的得分列
    pub own: &'a ScoreColumns,
    /// 对方的得分列（走子方不可进入）
    pub opponent: &'a ScoreColumns,
}

impl<'a> ScoreView<'a> {
    pub fn new(own: &'a ScoreColumns, opponent: &'a ScoreColumns) -> Self {
        Self { own, opponent }
    }

    /// 交换视角
    pub fn swapped(&self) -> ScoreView<'a> {
        ScoreView {
            own: self.opponent,
            opponent: self.own,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_columns() {
        let cols = ScoreColumns::centered(12);
        assert_eq!(cols.iter().collect::<Vec<_>>(), vec![4, 5, 6, 7]);

        // 窄棋盘取全部列
        let narrow = ScoreColumns::centered(3);
        assert_eq!(narrow.iter().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_dedup_and_contains() {
        let cols = ScoreColumns::new([5, 1, 5, 3]);
        assert_eq!(cols.iter().collect::<Vec<_>>(), vec![1, 3, 5]);
        assert!(cols.contains(3));
        assert!(!cols.contains(4));
    }

    #[test]
    fn test_view_swapped() {
        let a = ScoreColumns::new([0]);
        let b = ScoreColumns::new([9]);
        let view = ScoreView::new(&a, &b);
        let swapped = view.swapped();
        assert_eq!(swapped.own, &b);
        assert_eq!(swapped.opponent, &a);
        assert_eq!(swapped.swapped(), view);
    }

    #[test]
    fn test_serde_as_list() {
        let cols = ScoreColumns::new([2, 1]);
        let json = serde_json::to_string(&cols).unwrap();
        assert_eq!(json, "[1,2]");
        let back: ScoreColumns = serde_json::from_str("[7,6,7]").unwrap();
        assert_eq!(back, ScoreColumns::new([6, 7]));
    }
}
