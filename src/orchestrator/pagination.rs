//! 翻页驱动

use crate::error::AppResult;
use crate::error::TransportError;
use crate::models::{Review, ReviewQuery};
use crate::services::{FetchOutcome, ReviewFetcher};
use crate::utils::logging::log_page_fetched;
use async_trait::async_trait;
use std::fmt;
use tracing::warn;

/// 可以按令牌提供评论页的数据源
#[async_trait]
pub trait ReviewSource {
    async fn fetch_page(
        &self,
        app_id: &str,
        query: &ReviewQuery,
        token: Option<&str>,
    ) -> AppResult<FetchOutcome>;
}

#[async_trait]
impl ReviewSource for ReviewFetcher {
    async fn fetch_page(
        &self,
        app_id: &str,
        query: &ReviewQuery,
        token: Option<&str>,
    ) -> AppResult<FetchOutcome> {
        self.fetch(app_id, query, token).await
    }
}

/// 评论接口传输失败时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportPolicy {
    /// 保留已收集的评论并停止翻页
    #[default]
    StopPagination,
    /// 作为错误返回
    Fail,
}

/// 翻页停止原因
#[derive(Debug)]
pub enum StopReason {
    /// 没有下一页令牌
    EndOfData,
    /// 达到页数上限
    PageLimit,
    /// 请求失败，已按策略停止
    TransportFailure(TransportError),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::EndOfData => write!(f, "已无更多数据"),
            StopReason::PageLimit => write!(f, "达到页数上限"),
            StopReason::TransportFailure(e) => write!(f, "请求失败: {}", e),
        }
    }
}

/// 收集结果
#[derive(Debug)]
pub struct Collection {
    /// 按服务器返回顺序排列的评论
    pub reviews: Vec<Review>,
    /// 成功抓取的页数
    pub pages_fetched: usize,
    pub stop: StopReason,
}

/// 依次抓取评论页直到没有令牌或达到页数上限
///
/// # 参数
/// - `source`: 评论数据源
/// - `app_id`: 应用ID
/// - `query`: 请求参数
/// - `max_pages`: 最多抓取页数，为 0 时不发请求
/// - `policy`: 传输失败时的处理策略
///
/// # 返回
/// 返回收集到的评论及停止原因；解析错误直接返回 Err
pub async fn collect<S>(
    source: &S,
    app_id: &str,
    query: &ReviewQuery,
    max_pages: usize,
    policy: TransportPolicy,
) -> AppResult<Collection>
where
    S: ReviewSource + ?Sized,
{
    let mut reviews = Vec::new();
    let mut token: Option<String> = None;
    let mut pages_fetched = 0;

    let stop = loop {
        if pages_fetched >= max_pages {
            break StopReason::PageLimit;
        }

        let page = match source.fetch_page(app_id, query, token.as_deref()).await? {
            FetchOutcome::Page(page) => page,
            FetchOutcome::TransportFailure(e) => match policy {
                TransportPolicy::StopPagination => {
                    warn!("⚠️ 第 {} 页请求失败, 停止翻页: {}", pages_fetched + 1, e);
                    break StopReason::TransportFailure(e);
                }
                TransportPolicy::Fail => return Err(e.into()),
            },
        };

        pages_fetched += 1;
        let count = page.reviews.len();
        let has_more = page.has_more();
        reviews.extend(page.reviews);
        log_page_fetched(pages_fetched, max_pages, count, reviews.len(), has_more);

        match page.next_token {
            Some(next) => token = Some(next),
            None => break StopReason::EndOfData,
        }
    };

    Ok(Collection {
        reviews,
        pages_fetched,
        stop,
    })
}
