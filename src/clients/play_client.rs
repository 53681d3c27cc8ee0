/// 应用商店 HTTP 客户端
///
/// 封装所有与商店接口相关的网络请求，携带浏览器请求头
use crate::config::Config;
use crate::error::{AppResult, TransportError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// 搜索页路径
pub const SEARCH_PATH: &str = "/store/search";
/// 批量 RPC 接口路径
pub const BATCH_EXECUTE_PATH: &str = "/_/PlayStoreUi/data/batchexecute";
/// 固定语言
pub const LANGUAGE: &str = "en";
/// 固定地区
pub const REGION: &str = "US";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const ACCEPT_LANGUAGE: &str = "en-GB,en-US;q=0.9,en;q=0.8";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

const SEARCH_HEADERS: &[(&str, &str)] = &[
    ("authority", "play.google.com"),
    (
        "accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,\
         image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7",
    ),
    ("accept-language", ACCEPT_LANGUAGE),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "\"Linux\""),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-site", "none"),
    ("upgrade-insecure-requests", "1"),
    ("user-agent", USER_AGENT),
];

const BATCH_HEADERS: &[(&str, &str)] = &[
    ("authority", "play.google.com"),
    ("accept", "*/*"),
    ("accept-language", ACCEPT_LANGUAGE),
    (
        "sec-ch-ua",
        "\"Not_A Brand\";v=\"8\", \"Chromium\";v=\"120\", \"Google Chrome\";v=\"120\"",
    ),
    (
        "sec-ch-ua-full-version-list",
        "\"Not_A Brand\";v=\"8.0.0.0\", \"Chromium\";v=\"120.0.6099.199\", \
         \"Google Chrome\";v=\"120.0.6099.199\"",
    ),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "\"Linux\""),
    ("sec-fetch-site", "same-origin"),
    ("user-agent", USER_AGENT),
];

/// 商店客户端
pub struct PlayClient {
    http: reqwest::Client,
    base_url: String,
}

impl PlayClient {
    /// 创建新的商店客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| TransportError::from_reqwest("client", e))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 站点地址（不带末尾斜杠）
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 获取搜索结果页 HTML
    ///
    /// # 参数
    /// - `query`: 搜索词
    ///
    /// # 返回
    /// 返回页面 HTML 文本
    pub async fn search_page(&self, query: &str) -> Result<String, TransportError> {
        let url = format!("{}{}", self.base_url, SEARCH_PATH);
        debug!("搜索请求: {} q={}", url, query);

        let response = self
            .http
            .get(&url)
            .headers(header_map(SEARCH_HEADERS))
            .query(&[("q", query), ("c", "apps"), ("hl", LANGUAGE), ("gl", REGION)])
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest("search", e))?;

        read_body("search", response).await
    }

    /// 发送批量 RPC 请求
    ///
    /// # 参数
    /// - `body`: 已编码的表单请求体
    ///
    /// # 返回
    /// 返回原始响应文本（含防劫持前缀）
    pub async fn batch_execute(&self, body: String) -> Result<String, TransportError> {
        let url = format!("{}{}", self.base_url, BATCH_EXECUTE_PATH);
        debug!("批量请求: {} ({} 字节)", url, body.len());

        let response = self
            .http
            .post(&url)
            .headers(header_map(BATCH_HEADERS))
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header("origin", self.base_url.as_str())
            .header("referer", format!("{}/", self.base_url))
            .query(&[("hl", LANGUAGE), ("gl", REGION)])
            .body(body)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest("batchexecute", e))?;

        read_body("batchexecute", response).await
    }
}

/// 检查状态码并读取响应文本
async fn read_body(endpoint: &str, response: reqwest::Response) -> Result<String, TransportError> {
    let status = response.status();
    if status != StatusCode::OK {
        return Err(TransportError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| TransportError::from_reqwest(endpoint, e))
}

/// 构建静态请求头
fn header_map(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(pairs.len());
    for &(name, value) in pairs {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_maps_are_valid() {
        let search = header_map(SEARCH_HEADERS);
        let batch = header_map(BATCH_HEADERS);

        assert_eq!(search.get("user-agent").unwrap(), USER_AGENT);
        assert_eq!(batch.get("sec-fetch-site").unwrap(), "same-origin");
        assert_eq!(search.len(), SEARCH_HEADERS.len());
    }

    #[test]
    fn test_base_url_trims_slash() {
        let config = Config {
            base_url: "http://127.0.0.1:8080/".to_string(),
            ..Config::default()
        };
        let client = PlayClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8080");
    }
}
