//! 搜索引擎
//!
//! 实现 Minimax + Alpha-Beta 剪枝。
//! 极大层始终属于己方；得分列对随走子方逐层交换，评估始终从己方视角进行。

use river_protocol::{ActionKind, Board, Move, MoveGenerator, Player, ScoreView};
use tracing::debug;

use crate::evaluate::Evaluator;

/// 搜索结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// 己方视角的局面分值
    pub value: i32,
    /// 最佳走法，叶子节点为 None
    pub best_move: Option<Move>,
}

impl SearchOutcome {
    fn leaf(value: i32) -> Self {
        Self {
            value,
            best_move: None,
        }
    }
}

/// 搜索引擎
#[derive(Debug, Default)]
pub struct SearchEngine {
    nodes_searched: u64,
}

impl SearchEngine {
    /// 创建新的搜索引擎
    pub fn new() -> Self {
        Self::default()
    }

    /// 以 me 为走子方搜索 depth 层
    ///
    /// view 为 me 的得分列对；传入的棋盘不会被修改。
    pub fn search(&mut self, board: &Board, me: Player, view: ScoreView<'_>, depth: u8) -> SearchOutcome {
        self.nodes_searched = 0;

        let outcome = self.alpha_beta(board, depth, i32::MIN, i32::MAX, me, me, view);

        debug!(
            "Search finished: side={}, depth={}, nodes={}, value={}, best={}",
            me,
            depth,
            self.nodes_searched,
            outcome.value,
            outcome
                .best_move
                .map(|mv| mv.to_string())
                .unwrap_or_else(|| "none".to_string())
        );

        outcome
    }

    /// Alpha-Beta 搜索
    #[allow(clippy::too_many_arguments)]
    fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        to_move: Player,
        me: Player,
        view: ScoreView<'_>,
    ) -> SearchOutcome {
        self.nodes_searched += 1;

        // 到达深度限制，返回评估值
        if depth == 0 {
            return SearchOutcome::leaf(Evaluator::evaluate(board, me, view));
        }

        let my_turn = to_move == me;
        let current = if my_turn { view } else { view.swapped() };

        let mut moves = MoveGenerator::generate(board, to_move, current);
        // 无子可动
        if moves.is_empty() {
            return SearchOutcome::leaf(Evaluator::evaluate(board, me, view));
        }
        order_moves(&mut moves);

        let mut best = SearchOutcome {
            value: if my_turn { i32::MIN } else { i32::MAX },
            best_move: None,
        };

        for mv in moves {
            let next = board.apply(&mv);
            let child = self.alpha_beta(&next, depth - 1, alpha, beta, to_move.opponent(), me, view);

            if my_turn {
                if child.value > best.value || best.best_move.is_none() {
                    best = SearchOutcome {
                        value: child.value,
                        best_move: Some(mv),
                    };
                }
                alpha = alpha.max(child.value);
            } else {
                if child.value < best.value || best.best_move.is_none() {
                    best = SearchOutcome {
                        value: child.value,
                        best_move: Some(mv),
                    };
                }
                beta = beta.min(child.value);
            }

            if alpha >= beta {
                break; // 剪枝
            }
        }

        best
    }

    /// 获取搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

/// 走法排序：移动优先，其次推子，最后翻面与旋转；同类保持生成顺序
pub fn order_moves(moves: &mut [Move]) {
    moves.sort_by_key(|mv| match mv.action() {
        ActionKind::Move => 0,
        ActionKind::Push => 1,
        ActionKind::Flip | ActionKind::Rotate => 2,
    });
}
