use crate::error::{AppError, AppResult};
use crate::models::{ReviewQuery, SortOrder};
use crate::orchestrator::TransportPolicy;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 要搜索的应用名称
    pub search_query: String,
    /// 最多抓取的评论页数
    pub max_pages: usize,
    /// 每页评论数量
    pub page_size: u32,
    /// 评论排序方式
    pub sort: SortOrder,
    /// 星级过滤（None 表示全部星级）
    pub star_filter: Option<u8>,
    /// 设备类型代码（2 表示手机）
    pub device_id: u8,
    /// 输出 CSV 文件
    pub output_file: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 商店站点地址
    pub base_url: String,
    /// 评论接口返回非 200 时是否仅停止翻页
    pub stop_on_transport_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_query: "instagram".to_string(),
            max_pages: 20,
            page_size: 50,
            sort: SortOrder::Newest,
            star_filter: None,
            device_id: 2,
            output_file: "app_reviews.csv".to_string(),
            request_timeout_secs: 30,
            base_url: "https://play.google.com".to_string(),
            stop_on_transport_error: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            search_query: std::env::var("SEARCH_QUERY").unwrap_or(default.search_query),
            max_pages: std::env::var("MAX_PAGES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_pages),
            page_size: std::env::var("PAGE_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.page_size),
            sort: std::env::var("SORT_ORDER").ok().and_then(|v| v.parse::<SortOrder>().ok()).unwrap_or(default.sort),
            star_filter: std::env::var("STAR_FILTER").ok().and_then(|v| v.parse().ok()).or(default.star_filter),
            device_id: std::env::var("DEVICE_ID").ok().and_then(|v| v.parse().ok()).unwrap_or(default.device_id),
            output_file: std::env::var("OUTPUT_FILE").unwrap_or(default.output_file),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            base_url: std::env::var("PLAY_BASE_URL").unwrap_or(default.base_url),
            stop_on_transport_error: std::env::var("STOP_ON_TRANSPORT_ERROR").ok().and_then(|v| v.parse().ok()).unwrap_or(default.stop_on_transport_error),
        }
    }

    /// 检查配置是否可用
    pub fn validate(&self) -> AppResult<()> {
        if self.search_query.trim().is_empty() {
            return Err(AppError::invalid_config("search_query", "搜索词不能为空"));
        }
        if self.page_size == 0 {
            return Err(AppError::invalid_config("page_size", "每页数量必须大于 0"));
        }
        if let Some(star) = self.star_filter {
            if !(1..=5).contains(&star) {
                return Err(AppError::invalid_config(
                    "star_filter",
                    format!("星级必须在 1-5 之间, 实际为 {}", star),
                ));
            }
        }
        if self.request_timeout_secs == 0 {
            return Err(AppError::invalid_config("request_timeout_secs", "超时时间必须大于 0"));
        }
        Ok(())
    }

    /// 由配置生成评论请求参数
    pub fn review_query(&self) -> ReviewQuery {
        ReviewQuery {
            count: self.page_size,
            device_id: self.device_id,
            sort: self.sort,
            star_filter: self.star_filter,
        }
    }

    /// 评论接口传输失败时的处理策略
    pub fn transport_policy(&self) -> TransportPolicy {
        if self.stop_on_transport_error {
            TransportPolicy::StopPagination
        } else {
            TransportPolicy::Fail
        }
    }
}
