//! 局面评估函数

use river_protocol::{Board, Move, MoveGenerator, Orientation, PieceKind, Player, ScoreColumns, ScoreView, WIN_COUNT};

/// 胜负的绝对分值
pub const WIN_SCORE: i32 = 1_000_000;

/// 各项特征的权重
mod weights {
    pub const SCORED: i32 = 1000;
    pub const REACHABLE: i32 = 180;
    pub const ETA: i32 = -15;
    pub const LANE: i32 = 40;
}

/// 单方的评估特征
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    /// 已在得分列中的石子数
    pub scored: i32,
    /// 一步可送入得分列的走法数
    pub reachable: i32,
    /// 估计还需的步数
    pub eta: i32,
    /// 指向得分列的河流数
    pub lanes: i32,
}

impl Features {
    /// 计算 side 的特征，view 为 side 自己的视角
    pub fn collect(board: &Board, side: Player, view: ScoreView<'_>) -> Self {
        let scored = Evaluator::scored_count(board, side, view.own);
        let reachable = Evaluator::one_move_reachable(board, side, view);
        Self {
            scored,
            reachable,
            eta: Evaluator::eta_to_finish(scored, reachable),
            lanes: Evaluator::lane_potential(board, side, view.own),
        }
    }

    fn weighted(&self) -> i32 {
        weights::SCORED * self.scored
            + weights::REACHABLE * self.reachable
            + weights::ETA * self.eta
            + weights::LANE * self.lanes
    }
}

/// 评估器
pub struct Evaluator;

impl Evaluator {
    /// 从 perspective 一方评估局面（正值对其有利）
    ///
    /// 任一方已有 4 颗石子在自己的得分列中时返回 ±WIN_SCORE。
    pub fn evaluate(board: &Board, perspective: Player, view: ScoreView<'_>) -> i32 {
        let opponent = perspective.opponent();

        let own_scored = Self::scored_count(board, perspective, view.own);
        let opp_scored = Self::scored_count(board, opponent, view.opponent);
        if own_scored >= WIN_COUNT as i32 {
            return WIN_SCORE;
        }
        if opp_scored >= WIN_COUNT as i32 {
            return -WIN_SCORE;
        }

        let own = Features::collect(board, perspective, view);
        let opp = Features::collect(board, opponent, view.swapped());
        own.weighted() - opp.weighted()
    }

    /// side 位于得分列中的石子数
    pub fn scored_count(board: &Board, side: Player, own: &ScoreColumns) -> i32 {
        board.stones_in_columns(side, own) as i32
    }

    /// 一步可达：移动或推子的落点（以及被推棋子的落点）在得分列中的次数
    pub fn one_move_reachable(board: &Board, side: Player, view: ScoreView<'_>) -> i32 {
        MoveGenerator::generate(board, side, view)
            .iter()
            .map(|mv| match *mv {
                Move::Move { to, .. } => i32::from(view.own.contains(to.x)),
                Move::Push {
                    target, pushed_to, ..
                } => i32::from(view.own.contains(target.x)) + i32::from(view.own.contains(pushed_to.x)),
                Move::Flip { .. } | Move::Rotate { .. } => 0,
            })
            .sum()
    }

    /// 估计获胜所需的步数：一步可达的石子算 1 步，其余算 2 步
    pub fn eta_to_finish(scored: i32, reachable: i32) -> i32 {
        let need = (WIN_COUNT as i32 - scored).max(0);
        let unreachable = (need - reachable).max(0);
        2 * unreachable + need.min(reachable)
    }

    /// 指向得分列的河流：横河紧邻得分列，或竖河位于得分列中
    pub fn lane_potential(board: &Board, side: Player, own: &ScoreColumns) -> i32 {
        board
            .pieces(side)
            .into_iter()
            .filter(|(pos, piece)| match piece.kind {
                PieceKind::Stone => false,
                PieceKind::River(Orientation::Horizontal) => {
                    pos.x.checked_add(1).is_some_and(|x| own.contains(x))
                        || pos.x.checked_sub(1).is_some_and(|x| own.contains(x))
                }
                PieceKind::River(Orientation::Vertical) => own.contains(pos.x),
            })
            .count() as i32
    }
}
