//! 评论抓取服务 - 业务能力层
//!
//! 只负责"抓取一页评论"能力，不关心翻页流程

use crate::api::batch_execute::{build_request_body, decode_review_page};
use crate::clients::PlayClient;
use crate::error::{AppResult, TransportError};
use crate::models::{ReviewPage, ReviewQuery};
use crate::utils::logging::truncate_text;
use std::sync::Arc;
use tracing::{debug, warn};

/// 单次抓取的结果
///
/// 传输失败与"没有更多数据"分开表示，由调用方决定如何处理
#[derive(Debug)]
pub enum FetchOutcome {
    /// 成功获取一页（`next_token` 为 None 表示已到末页）
    Page(ReviewPage),
    /// 请求失败（超时、非 200 等）
    TransportFailure(TransportError),
}

/// 评论抓取服务
pub struct ReviewFetcher {
    client: Arc<PlayClient>,
}

impl ReviewFetcher {
    /// 创建新的抓取服务
    pub fn new(client: Arc<PlayClient>) -> Self {
        Self { client }
    }

    /// 抓取一页评论
    ///
    /// # 参数
    /// - `app_id`: 应用ID
    /// - `query`: 请求参数
    /// - `token`: 翻页令牌，第一页为 None
    ///
    /// # 返回
    /// 解析失败返回 Err，网络失败返回 `FetchOutcome::TransportFailure`
    pub async fn fetch(
        &self,
        app_id: &str,
        query: &ReviewQuery,
        token: Option<&str>,
    ) -> AppResult<FetchOutcome> {
        let body = build_request_body(app_id, query, token);
        debug!("请求评论: {} (令牌: {:?})", app_id, token);

        let text = match self.client.batch_execute(body).await {
            Ok(text) => text,
            Err(e) => {
                warn!("⚠️ 评论请求失败: {}", e);
                return Ok(FetchOutcome::TransportFailure(e));
            }
        };

        let page = decode_review_page(&text)?;
        for review in &page.reviews {
            debug!(
                "{} ★{}: {}",
                review.reviewer_name,
                review.star_count,
                truncate_text(&review.review_content, 40)
            );
        }

        Ok(FetchOutcome::Page(page))
    }
}
