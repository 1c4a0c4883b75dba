//! 走法选择
//!
//! 每次决策依次尝试：开局策略、按剩余时间选定深度的搜索、随机合法走法，
//! 最后在无子可走时返回占位走法。

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use river_protocol::{DecisionRequest, Move, MoveGenerator, TIME_PER_PLAYER_SECS};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::opening::OpeningPolicy;
use crate::search::SearchEngine;

/// 配置错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Total time must be positive, got {0}")]
    NonPositiveTotalTime(f64),

    #[error("{field} must be within [0, 1], got {value}")]
    FractionOutOfRange { field: &'static str, value: f64 },

    #[error("Search depth must be at least 1")]
    ZeroDepth,
}

/// 时间档位：剩余时间占比不低于 min_time_fraction 时使用 depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthTier {
    pub min_time_fraction: f64,
    pub depth: u8,
}

/// 剩余时间到搜索深度的映射
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthPolicy {
    /// 按顺序匹配，取第一个满足的档位
    pub tiers: Vec<DepthTier>,
    pub fallback_depth: u8,
}

impl DepthPolicy {
    /// 根据剩余时间占比选择深度
    pub fn depth_for(&self, time_fraction: f64) -> u8 {
        self.tiers
            .iter()
            .find(|tier| time_fraction >= tier.min_time_fraction)
            .map_or(self.fallback_depth, |tier| tier.depth)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback_depth == 0 || self.tiers.iter().any(|tier| tier.depth == 0) {
            return Err(ConfigError::ZeroDepth);
        }
        for tier in &self.tiers {
            check_fraction("min_time_fraction", tier.min_time_fraction)?;
        }
        Ok(())
    }
}

impl Default for DepthPolicy {
    fn default() -> Self {
        Self {
            tiers: vec![
                DepthTier {
                    min_time_fraction: 0.9,
                    depth: 3,
                },
                DepthTier {
                    min_time_fraction: 0.8,
                    depth: 2,
                },
            ],
            fallback_depth: 1,
        }
    }
}

fn check_fraction(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::FractionOutOfRange { field, value })
    }
}

/// 代理配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// 每方的总时间（秒）
    pub total_time_secs: f64,
    /// 己方剩余时间超过总时间的该比例（且多于对方）时才搜索
    pub search_time_fraction: f64,
    pub depth_policy: DepthPolicy,
    /// 开局策略最多使用的步数，None 为不限
    pub max_opening_moves: Option<u32>,
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_time_secs <= 0.0 || self.total_time_secs.is_nan() {
            return Err(ConfigError::NonPositiveTotalTime(self.total_time_secs));
        }
        check_fraction("search_time_fraction", self.search_time_fraction)?;
        self.depth_policy.validate()
    }

    /// 是否有足够时间进行搜索
    pub fn should_search(&self, own_time: f64, opponent_time: f64) -> bool {
        own_time > self.search_time_fraction * self.total_time_secs && own_time > opponent_time
    }

    /// 按己方剩余时间选择搜索深度
    pub fn search_depth(&self, own_time: f64) -> u8 {
        self.depth_policy.depth_for(own_time / self.total_time_secs)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            total_time_secs: TIME_PER_PLAYER_SECS,
            search_time_fraction: 0.7,
            depth_policy: DepthPolicy::default(),
            max_opening_moves: None,
        }
    }
}

/// 走法来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionSource {
    Opening,
    Search,
    Random,
    Placeholder,
}

impl DecisionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionSource::Opening => "opening",
            DecisionSource::Search => "search",
            DecisionSource::Random => "random",
            DecisionSource::Placeholder => "placeholder",
        }
    }
}

impl std::fmt::Display for DecisionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一次决策的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub chosen: Move,
    pub source: DecisionSource,
}

/// 走法选择代理
pub struct Agent {
    config: AgentConfig,
    engine: SearchEngine,
    rng: ChaCha8Rng,
    moves_played: u32,
}

impl Agent {
    /// 创建新的代理（随机种子）
    pub fn new(config: AgentConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    /// 使用固定种子创建，随机回退可复现
    pub fn with_seed(config: AgentConfig, seed: u64) -> Self {
        Self {
            config,
            engine: SearchEngine::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            moves_played: 0,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// 已经给出的走法数
    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }

    /// 选择一步走法
    pub fn choose(&mut self, request: &DecisionRequest) -> Move {
        self.decide(request).chosen
    }

    /// 选择一步走法并返回其来源
    pub fn decide(&mut self, request: &DecisionRequest) -> Decision {
        let board = &request.board;
        let side = request.side;
        let view = request.view();

        let opening_allowed = self
            .config
            .max_opening_moves
            .map_or(true, |max| self.moves_played < max);
        if opening_allowed {
            if let Some(mv) = OpeningPolicy::suggest(board, side, view.opponent) {
                return self.finish(mv, DecisionSource::Opening);
            }
        }

        if self.config.should_search(request.own_time, request.opponent_time) {
            let depth = self.config.search_depth(request.own_time);
            let outcome = self.engine.search(board, side, view, depth);
            debug!(
                "Searched {} nodes at depth {} (own time {:.1}s)",
                self.engine.nodes_searched(),
                depth,
                request.own_time
            );
            if let Some(mv) = outcome.best_move {
                return self.finish(mv, DecisionSource::Search);
            }
        }

        let moves = MoveGenerator::generate(board, side, view);
        match moves.choose(&mut self.rng) {
            Some(&mv) => self.finish(mv, DecisionSource::Random),
            None => self.finish(Move::PLACEHOLDER, DecisionSource::Placeholder),
        }
    }

    fn finish(&mut self, chosen: Move, source: DecisionSource) -> Decision {
        self.moves_played += 1;
        info!("Move {} from {}: {}", self.moves_played, source, chosen);
        Decision { chosen, source }
    }
}
