use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 题目难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// 从接口字符串解析（忽略大小写）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 题目详情，每次运行重新获取
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemDetail {
    pub title: String,
    /// 题面 HTML，原样保存
    pub content: String,
    pub difficulty: Difficulty,
    pub example_testcases: Vec<String>,
}

impl ProblemDetail {
    /// 生成 README.md 内容
    pub fn render_readme(&self) -> String {
        format!(
            "# {}\n\n**Difficulty**: {}\n\n{}",
            self.title, self.difficulty, self.content
        )
    }
}
