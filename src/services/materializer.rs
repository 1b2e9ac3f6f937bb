//! 本地落盘服务 - 业务能力层
//!
//! 只负责"把一道题写到磁盘"，不关心流程

use crate::error::{SyncError, SyncResult};
use crate::models::{file_extension, ProblemDetail, SyncPlanEntry};
use crate::services::ports::Materializer;
use async_trait::async_trait;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// 代码文件名前缀
const SOLUTION_STEM: &str = "solution";
const README_FILE: &str = "README.md";
const TESTCASES_FILE: &str = "testcases.txt";

/// 本地题解目录写入器
///
/// 目录结构：
/// ```text
/// {output_dir}/
///   Two_Sum/
///     solution.py
///     README.md
///     testcases.txt   (有示例用例时)
/// ```
pub struct LocalMaterializer {
    output_dir: PathBuf,
}

impl LocalMaterializer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 题目对应的目录
    ///
    /// 默认用清洗后的标题；重名的题目在后面追加 `_{slug}`
    pub fn problem_dir(&self, entry: &SyncPlanEntry) -> PathBuf {
        let record = &entry.record;
        let name = sanitize_dir_name(&record.title, &record.title_slug);
        if entry.disambiguate {
            let suffix = sanitize_dir_name(&record.title_slug, &record.title_slug);
            self.output_dir.join(format!("{}_{}", name, suffix))
        } else {
            self.output_dir.join(name)
        }
    }

    /// 写入一道题的所有文件
    ///
    /// 先把所有文件写成同目录下的临时文件，全部成功后再逐个重命名到位
    pub fn write_artifact(&self, entry: &SyncPlanEntry, detail: &ProblemDetail) -> io::Result<PathBuf> {
        let record = &entry.record;
        let dir = self.problem_dir(entry);
        fs::create_dir_all(&dir)?;

        let code_file = format!("{}.{}", SOLUTION_STEM, file_extension(&record.language));
        let mut files = vec![
            (code_file.clone(), record.code.clone()),
            (README_FILE.to_string(), detail.render_readme()),
        ];
        if !detail.example_testcases.is_empty() {
            files.push((
                TESTCASES_FILE.to_string(),
                detail.example_testcases.join("\n") + "\n",
            ));
        }

        let mut staged = Vec::with_capacity(files.len());
        for (name, content) in &files {
            let mut tmp = NamedTempFile::new_in(&dir)?;
            tmp.write_all(content.as_bytes())?;
            tmp.flush()?;
            tmp.as_file_mut().sync_all()?;
            staged.push((tmp, dir.join(name)));
        }

        for (tmp, target) in staged {
            tmp.persist(&target).map_err(|e| e.error)?;
        }

        if detail.example_testcases.is_empty() {
            remove_if_exists(&dir.join(TESTCASES_FILE))?;
        }
        remove_stale_solutions(&dir, &code_file)?;

        debug!("已写入 {} 个文件: {}", files.len(), dir.display());
        Ok(dir)
    }
}

#[async_trait]
impl Materializer for LocalMaterializer {
    fn destination(&self, entry: &SyncPlanEntry) -> PathBuf {
        self.problem_dir(entry)
    }

    async fn materialize(
        &self,
        entry: &SyncPlanEntry,
        detail: &ProblemDetail,
    ) -> SyncResult<PathBuf> {
        self.write_artifact(entry, detail)
            .map_err(|e| SyncError::materialization_failed(entry.slug(), e))
    }
}

/// 删除同目录下其他语言的旧代码文件
fn remove_stale_solutions(dir: &Path, keep: &str) -> io::Result<()> {
    for item in fs::read_dir(dir)? {
        let path = item?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name != keep && name.starts_with(&format!("{}.", SOLUTION_STEM)) && path.is_file() {
            debug!("删除旧代码文件: {}", path.display());
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// 目录名：空格变下划线，非法字符替换，结果为空时退回 slug
fn sanitize_dir_name(title: &str, slug: &str) -> String {
    let cleaned = sanitize(title);
    if !cleaned.is_empty() {
        return cleaned;
    }
    let cleaned = sanitize(slug);
    if cleaned.is_empty() {
        "untitled".to_string()
    } else {
        cleaned
    }
}

fn sanitize(input: &str) -> String {
    let replaced: String = input
        .trim()
        .chars()
        .map(|c| if c == ' ' || is_forbidden(c) { '_' } else { c })
        .collect();

    let mut compacted = String::with_capacity(replaced.len());
    let mut prev_underscore = false;
    for c in replaced.chars() {
        if c == '_' && prev_underscore {
            continue;
        }
        prev_underscore = c == '_';
        compacted.push(c);
    }

    compacted.trim_matches(&['_', '.'][..]).to_string()
}

fn is_forbidden(c: char) -> bool {
    matches!(c, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_dir_name() {
        assert_eq!(sanitize_dir_name("Two Sum", "two-sum"), "Two_Sum");
        assert_eq!(sanitize_dir_name("Pow(x, n)", "powx-n"), "Pow(x,_n)");
        assert_eq!(sanitize_dir_name("A / B: C?", "a-b-c"), "A_B_C");
        assert_eq!(sanitize_dir_name("..", "two-sum"), "two-sum");
        assert_eq!(sanitize_dir_name("", "/"), "untitled");
    }
}
