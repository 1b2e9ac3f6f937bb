/// LeetCode API 客户端
///
/// 封装提交记录接口和题目详情 GraphQL 接口
use crate::config::Config;
use crate::error::{SyncError, SyncResult};
use crate::models::{Difficulty, ProblemDetail, RawSubmission, SubmissionPage};
use crate::services::{ProblemDetailFetcher, SubmissionFeed};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, COOKIE, REFERER};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

const SUBMISSIONS_PATH: &str = "/api/submissions/";
const GRAPHQL_PATH: &str = "/graphql";

const QUESTION_DETAIL_QUERY: &str = r#"
query getQuestionDetail($titleSlug: String!) {
  question(titleSlug: $titleSlug) {
    title
    content
    difficulty
    exampleTestcases
  }
}
"#;

/// LeetCode 客户端
pub struct LeetCodeClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    cookie: HeaderValue,
    csrf_token: Option<HeaderValue>,
    page_size: usize,
    max_pages: usize,
}

impl LeetCodeClient {
    /// 创建新的客户端
    ///
    /// # 参数
    /// - `config`: 配置
    /// - `cookie`: 已解析的会话 cookie
    pub fn new(config: &Config, cookie: impl Into<String>) -> SyncResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("leetcode_sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SyncError::InvalidConfig(format!("无法创建 HTTP 客户端: {}", e)))?;

        // cookie 无法放进请求头时直接报错，而不是不带凭证发请求
        let cookie: String = cookie.into();
        let invalid_cookie = |_: InvalidHeaderValue| SyncError::AuthenticationMissing {
            reason: "cookie 含有无法放入请求头的字符，请检查 cookie 内容".to_string(),
        };
        let cookie_header = HeaderValue::from_str(&cookie).map_err(invalid_cookie)?;
        let csrf_header = csrf_token(&cookie)
            .map(HeaderValue::from_str)
            .transpose()
            .map_err(invalid_cookie)?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            cookie: cookie_header,
            csrf_token: csrf_header,
            page_size: config.feed_page_size,
            max_pages: config.max_feed_pages,
        })
    }

    /// 拉取一页提交记录
    pub async fn fetch_submission_page(
        &self,
        offset: usize,
        last_key: Option<&str>,
    ) -> SyncResult<SubmissionPage> {
        let endpoint = format!("{}{}", self.base_url, SUBMISSIONS_PATH);
        let mut query = vec![
            ("offset", offset.to_string()),
            ("limit", self.page_size.to_string()),
            ("username", self.username.clone()),
        ];
        if let Some(key) = last_key {
            query.push(("lastkey", key.to_string()));
        }

        debug!("拉取提交记录: offset={} limit={}", offset, self.page_size);

        let response = self
            .http
            .get(&endpoint)
            .headers(self.auth_headers(None))
            .query(&query)
            .send()
            .await
            .map_err(|e| SyncError::feed_unavailable(&endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let hint = if status.as_u16() == 401 || status.as_u16() == 403 {
                "，请检查 cookie 是否有效"
            } else {
                ""
            };
            return Err(SyncError::feed_unavailable(
                &endpoint,
                format!("HTTP {}{}", status, hint),
            ));
        }

        response
            .json::<SubmissionPage>()
            .await
            .map_err(|e| SyncError::feed_unavailable(&endpoint, format!("响应解析失败: {}", e)))
    }

    /// 获取题目详情
    pub async fn fetch_question(&self, slug: &str) -> SyncResult<ProblemDetail> {
        let endpoint = format!("{}{}", self.base_url, GRAPHQL_PATH);
        let body = json!({
            "query": QUESTION_DETAIL_QUERY,
            "variables": { "titleSlug": slug }
        });

        let response = self
            .http
            .post(&endpoint)
            .headers(self.auth_headers(Some(slug)))
            .json(&body)
            .send()
            .await
            .map_err(|e| SyncError::detail_fetch_failed(slug, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::detail_fetch_failed(slug, format!("HTTP {}", status)));
        }

        let payload: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| SyncError::detail_fetch_failed(slug, format!("响应解析失败: {}", e)))?;

        if let Some(first) = payload.errors.first() {
            return Err(SyncError::detail_fetch_failed(slug, &first.message));
        }

        let question = payload
            .data
            .and_then(|d| d.question)
            .ok_or_else(|| SyncError::detail_fetch_failed(slug, "题目不存在"))?;

        question.into_detail(slug)
    }

    /// 组装请求头：cookie、csrf token、referer
    fn auth_headers(&self, slug: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, self.cookie.clone());
        if let Some(token) = &self.csrf_token {
            headers.insert("x-csrftoken", token.clone());
        }
        let referer = match slug {
            Some(slug) => format!("{}/problems/{}/", self.base_url, slug),
            None => format!("{}/", self.base_url),
        };
        if let Ok(value) = HeaderValue::from_str(&referer) {
            headers.insert(REFERER, value);
        }
        headers
    }
}

#[async_trait]
impl SubmissionFeed for LeetCodeClient {
    async fn fetch_submissions(&self) -> SyncResult<Vec<RawSubmission>> {
        let mut submissions = Vec::new();
        let mut offset = 0;
        let mut last_key: Option<String> = None;
        let mut more_pages = false;

        for page_index in 0..self.max_pages {
            let page = self
                .fetch_submission_page(offset, last_key.as_deref())
                .await?;
            let count = page.submissions_dump.len();
            info!("📥 第 {} 页: {} 条提交记录", page_index + 1, count);

            submissions.extend(page.submissions_dump);
            more_pages = page.has_next && count > 0;
            if !more_pages {
                break;
            }
            offset += count;
            last_key = page.last_key;
        }

        if more_pages {
            warn!(
                "⚠️ 已达到最大页数 {}，仍有提交记录未拉取，可以调大 MAX_FEED_PAGES",
                self.max_pages
            );
        }

        Ok(submissions)
    }
}

#[async_trait]
impl ProblemDetailFetcher for LeetCodeClient {
    async fn fetch_problem_detail(&self, slug: &str) -> SyncResult<ProblemDetail> {
        self.fetch_question(slug).await
    }
}

/// 从 cookie 字符串中取出 csrftoken
fn csrf_token(cookie: &str) -> Option<&str> {
    cookie
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == "csrftoken")
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

// ========== GraphQL 响应结构 ==========

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<QuestionData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct QuestionData {
    question: Option<QuestionPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionPayload {
    title: Option<String>,
    content: Option<String>,
    difficulty: Option<String>,
    example_testcases: Option<String>,
}

impl QuestionPayload {
    fn into_detail(self, slug: &str) -> SyncResult<ProblemDetail> {
        let difficulty_raw = self.difficulty.unwrap_or_default();
        let difficulty = Difficulty::parse(&difficulty_raw).ok_or_else(|| {
            SyncError::detail_fetch_failed(slug, format!("未知难度: '{}'", difficulty_raw))
        })?;

        let example_testcases = self
            .example_testcases
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect();

        Ok(ProblemDetail {
            title: self.title.unwrap_or_else(|| slug.to_string()),
            content: self.content.unwrap_or_default(),
            difficulty,
            example_testcases,
        })
    }
}
