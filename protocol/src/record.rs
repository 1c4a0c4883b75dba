//! 棋盘文件格式
//!
//! 与对局引擎共用的 JSON 文件：`{"board": [[cell | null]]}`

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::Result;

/// 棋盘文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardFile {
    pub board: Board,
}

impl BoardFile {
    pub fn new(board: Board) -> Self {
        Self { board }
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 从文件加载
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 保存到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;
    use crate::layout::Layout;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_board() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("board.json");

        let file = BoardFile::new(Layout::parse("1sH/V2").unwrap());
        file.save(&path).unwrap();

        let loaded = BoardFile::load(&path).unwrap();
        assert_eq!(loaded, file);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = BoardFile::load(temp_dir.path().join("missing.json"));
        assert!(matches!(result, Err(ProtocolError::Io(_))));
    }

    #[test]
    fn test_invalid_json() {
        let result = BoardFile::from_json(r#"{"board": [[null], []]}"#);
        assert!(matches!(result, Err(ProtocolError::Json(_))));
    }
}
