//! 石子与河流 AI 引擎
//!
//! 包含:
//! - 局面评估函数
//! - Minimax + Alpha-Beta 搜索
//! - 开局策略
//! - 按剩余时间调度的走法选择代理

mod agent;
mod evaluate;
mod opening;
mod search;

pub use agent::{Agent, AgentConfig, ConfigError, Decision, DecisionSource, DepthPolicy, DepthTier};
pub use evaluate::{Evaluator, Features, WIN_SCORE};
pub use opening::OpeningPolicy;
pub use search::{order_moves, SearchEngine, SearchOutcome};
