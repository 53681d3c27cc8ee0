//! 应用解析服务 - 业务能力层
//!
//! 只负责"搜索词 → 应用ID"能力

use crate::api::search::extract_app_id;
use crate::clients::PlayClient;
use crate::error::AppResult;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 应用解析服务
///
/// 职责：
/// - 发起一次搜索请求
/// - 取第一个搜索结果的应用ID
/// - 不重试
pub struct AppResolver {
    client: Arc<PlayClient>,
}

impl AppResolver {
    /// 创建新的解析服务
    pub fn new(client: Arc<PlayClient>) -> Self {
        Self { client }
    }

    /// 解析搜索词对应的应用ID
    ///
    /// # 参数
    /// - `query`: 搜索词
    ///
    /// # 返回
    /// 找到返回 Some(app_id)，没有匹配结果返回 None；网络错误返回 Err
    pub async fn resolve(&self, query: &str) -> AppResult<Option<String>> {
        info!("🔍 正在搜索应用: {}", query);

        let html = self.client.search_page(query).await?;
        debug!("搜索结果页长度: {} 字节", html.len());

        match extract_app_id(&html, self.client.base_url()) {
            Some(app_id) => {
                info!("✓ 找到应用ID: {}", app_id);
                Ok(Some(app_id))
            }
            None => {
                warn!("⚠️ 搜索结果中没有找到应用ID");
                Ok(None)
            }
        }
    }
}
