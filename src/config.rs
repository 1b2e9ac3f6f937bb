use crate::error::{SyncError, SyncResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_FILE: &str = "leetcode_sync.toml";

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// LeetCode 用户名
    pub username: String,
    /// 本地题解根目录
    pub output_dir: PathBuf,
    /// 直接提供的 cookie（优先于 cookie 文件）
    pub session_cookie: Option<String>,
    /// cookie 文件路径
    pub cookie_file: PathBuf,
    /// LeetCode 站点地址
    pub api_base_url: String,
    /// 同时处理的题目数量
    pub max_concurrent_entries: usize,
    /// 每页拉取的提交记录数
    pub feed_page_size: usize,
    /// 最多拉取的页数
    pub max_feed_pages: usize,
    /// 单个请求超时（秒）
    pub request_timeout_secs: u64,
    /// 整次运行超时（秒）
    pub run_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: String::new(),
            output_dir: PathBuf::from("./codes"),
            session_cookie: None,
            cookie_file: PathBuf::from("./cookie.txt"),
            api_base_url: "https://leetcode.com".to_string(),
            max_concurrent_entries: 4,
            feed_page_size: 20,
            max_feed_pages: 1,
            request_timeout_secs: 30,
            run_timeout_secs: 600,
            verbose_logging: false,
        }
    }
}

/// TOML 配置文件中的可选字段
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    username: Option<String>,
    output_dir: Option<PathBuf>,
    session_cookie: Option<String>,
    cookie_file: Option<PathBuf>,
    api_base_url: Option<String>,
    max_concurrent_entries: Option<usize>,
    feed_page_size: Option<usize>,
    max_feed_pages: Option<usize>,
    request_timeout_secs: Option<u64>,
    run_timeout_secs: Option<u64>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 从配置文件和环境变量加载
    ///
    /// 优先级：环境变量 > 配置文件 > 默认值
    pub fn load() -> SyncResult<Self> {
        let path = std::env::var("LEETCODE_SYNC_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let mut config = Self::default();
        if let Some(file_config) = read_file_config(Path::new(&path))? {
            config.apply_file(file_config);
        }
        config.apply_lookup(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// 使用自定义查找函数加载（测试时注入）
    pub fn from_lookup<F>(lookup: F) -> SyncResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_lookup(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// 解析 TOML 文本
    pub fn from_toml_str(content: &str) -> SyncResult<Self> {
        let file_config: FileConfig = toml::from_str(content)?;
        let mut config = Self::default();
        config.apply_file(file_config);
        config.validate()?;
        Ok(config)
    }

    /// 获取登录 cookie
    ///
    /// 先看直接配置的值，再读取 cookie 文件；都没有时返回 `AuthenticationMissing`
    pub fn resolve_session_cookie(&self) -> SyncResult<String> {
        if let Some(cookie) = self.session_cookie.as_deref().map(str::trim) {
            if !cookie.is_empty() {
                return Ok(cookie.to_string());
            }
        }

        let content = std::fs::read_to_string(&self.cookie_file).map_err(|e| {
            SyncError::AuthenticationMissing {
                reason: format!(
                    "无法读取 cookie 文件 {}: {}，请创建该文件并写入 LeetCode 会话 cookie",
                    self.cookie_file.display(),
                    e
                ),
            }
        })?;

        let cookie = content.trim();
        if cookie.is_empty() {
            return Err(SyncError::AuthenticationMissing {
                reason: format!("cookie 文件为空: {}", self.cookie_file.display()),
            });
        }
        Ok(cookie.to_string())
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(v) = file.username {
            self.username = v;
        }
        if let Some(v) = file.output_dir {
            self.output_dir = v;
        }
        if let Some(v) = file.session_cookie {
            self.session_cookie = Some(v);
        }
        if let Some(v) = file.cookie_file {
            self.cookie_file = v;
        }
        if let Some(v) = file.api_base_url {
            self.api_base_url = v;
        }
        if let Some(v) = file.max_concurrent_entries {
            self.max_concurrent_entries = v;
        }
        if let Some(v) = file.feed_page_size {
            self.feed_page_size = v;
        }
        if let Some(v) = file.max_feed_pages {
            self.max_feed_pages = v;
        }
        if let Some(v) = file.request_timeout_secs {
            self.request_timeout_secs = v;
        }
        if let Some(v) = file.run_timeout_secs {
            self.run_timeout_secs = v;
        }
        if let Some(v) = file.verbose_logging {
            self.verbose_logging = v;
        }
    }

    fn apply_lookup<F>(&mut self, lookup: F) -> SyncResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("LEETCODE_USERNAME") {
            self.username = v;
        }
        if let Some(v) = lookup("LEETCODE_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("LEETCODE_COOKIE") {
            self.session_cookie = Some(v);
        }
        if let Some(v) = lookup("LEETCODE_COOKIE_FILE") {
            self.cookie_file = PathBuf::from(v);
        }
        if let Some(v) = lookup("LEETCODE_API_BASE_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = parse_var(&lookup, "MAX_CONCURRENT_ENTRIES")? {
            self.max_concurrent_entries = v;
        }
        if let Some(v) = parse_var(&lookup, "FEED_PAGE_SIZE")? {
            self.feed_page_size = v;
        }
        if let Some(v) = parse_var(&lookup, "MAX_FEED_PAGES")? {
            self.max_feed_pages = v;
        }
        if let Some(v) = parse_var(&lookup, "REQUEST_TIMEOUT_SECS")? {
            self.request_timeout_secs = v;
        }
        if let Some(v) = parse_var(&lookup, "RUN_TIMEOUT_SECS")? {
            self.run_timeout_secs = v;
        }
        if let Some(v) = parse_var(&lookup, "VERBOSE_LOGGING")? {
            self.verbose_logging = v;
        }
        Ok(())
    }

    fn validate(&self) -> SyncResult<()> {
        if self.username.trim().is_empty() {
            return Err(SyncError::InvalidConfig(
                "未设置 LeetCode 用户名 (LEETCODE_USERNAME)".to_string(),
            ));
        }
        if self.max_concurrent_entries == 0 {
            return Err(SyncError::InvalidConfig(
                "max_concurrent_entries 必须大于 0".to_string(),
            ));
        }
        if self.feed_page_size == 0 || self.max_feed_pages == 0 {
            return Err(SyncError::InvalidConfig(
                "feed_page_size 和 max_feed_pages 必须大于 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// 读取配置文件，文件不存在时返回 None
fn read_file_config(path: &Path) -> SyncResult<Option<FileConfig>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(toml::from_str(&content)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SyncError::InvalidConfig(format!(
            "无法读取配置文件 {}: {}",
            path.display(),
            e
        ))),
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> SyncResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
            SyncError::InvalidConfig(format!("环境变量 {} 解析失败: '{}'", key, raw))
        }),
        None => Ok(None),
    }
}
