//! 石子与河流走法代理
//!
//! 从文件或标准输入读取一次决策请求（JSON），向标准输出打印选中的走法（JSON）。
//! 日志写到标准错误。

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use river_ai::{Agent, AgentConfig};
use river_protocol::{DecisionRequest, WireMove};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 为石子与河流选择一步走法
#[derive(Parser)]
#[command(name = "river-agent")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// 决策请求文件，缺省时从标准输入读取
    #[arg(long)]
    request: Option<PathBuf>,

    /// 代理配置文件（JSON）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 随机回退使用的种子
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("river_agent=info".parse()?))
        .init();

    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let request = read_request(cli.request.as_deref())?;

    let mut agent = match cli.seed {
        Some(seed) => Agent::with_seed(config, seed),
        None => Agent::new(config),
    };
    let decision = agent.decide(&request);
    info!(
        "{} to move, chose {} via {}",
        request.side, decision.chosen, decision.source
    );

    let output = serde_json::to_string(&WireMove::from(decision.chosen))
        .context("Failed to encode move")?;
    println!("{}", output);

    Ok(())
}

/// 读取并校验配置；未指定文件时使用默认配置
fn load_config(path: Option<&Path>) -> Result<AgentConfig> {
    let Some(path) = path else {
        return Ok(AgentConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: AgentConfig = serde_json::from_str(&text)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// 读取决策请求
fn read_request(path: Option<&Path>) -> Result<DecisionRequest> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read request from stdin")?;
            text
        }
    };
    parse_request(&text)
}

fn parse_request(text: &str) -> Result<DecisionRequest> {
    serde_json::from_str(text).context("Invalid decision request")
}

#[cfg(test)]
mod tests {
    use super::*;
    use river_ai::DecisionSource;
    use river_protocol::{Board, Move, Player, ScoreColumns};

    #[test]
    fn test_default_config_without_file() {
        assert_eq!(load_config(None).unwrap(), AgentConfig::default());
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.json");
        std::fs::write(&path, r#"{"max_opening_moves": 3}"#).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.max_opening_moves, Some(3));
        assert_eq!(config.total_time_secs, 60.0);

        std::fs::write(&path, r#"{"search_time_fraction": 2.0}"#).unwrap();
        assert!(load_config(Some(&path)).is_err());

        assert!(load_config(Some(&dir.path().join("missing.json"))).is_err());
    }

    #[test]
    fn test_request_to_move_json() {
        let request = DecisionRequest {
            board: Board::default(),
            side: Player::Circle,
            own_columns: ScoreColumns::new([0, 1]),
            opponent_columns: ScoreColumns::new([10, 11]),
            own_time: 60.0,
            opponent_time: 60.0,
        };
        let text = serde_json::to_string(&request).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(&path, &text).unwrap();
        let parsed = read_request(Some(&path)).unwrap();
        assert_eq!(parsed, request);

        let mut agent = Agent::with_seed(AgentConfig::default(), 1);
        let decision = agent.decide(&parsed);
        assert_eq!(decision.source, DecisionSource::Opening);

        let wire = WireMove::from(decision.chosen);
        assert_eq!(wire.action, "move");
        assert_eq!(wire.from, [5, 8]);
        assert_eq!(wire.to, [5, 7]);
        assert_eq!(Move::try_from(wire).unwrap(), decision.chosen);
    }

    #[test]
    fn test_invalid_request() {
        assert!(parse_request("{}").is_err());
        assert!(parse_request(r#"{"board": [[null], [null, null]], "side": "circle", "own_columns": [], "opponent_columns": [], "own_time": 1.0, "opponent_time": 1.0}"#).is_err());
    }
}
