use crate::clients::PlayClient;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::Review;
use crate::orchestrator::pagination::{collect, StopReason};
use crate::services::{AppResolver, CsvExporter, ReviewFetcher};
use crate::utils::logging::{log_startup, print_final_stats};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, warn};

/// 应用主结构
pub struct App {
    config: Config,
    resolver: AppResolver,
    fetcher: ReviewFetcher,
    exporter: CsvExporter,
}

/// 一次运行的结果
#[derive(Debug, Default)]
pub struct RunSummary {
    /// 解析到的应用ID，未找到时为 None
    pub app_id: Option<String>,
    pub reviews: Vec<Review>,
    pub pages_fetched: usize,
    /// 翻页停止原因，未进入翻页时为 None
    pub stop: Option<StopReason>,
    /// 输出文件，没有评论时为 None
    pub output: Option<PathBuf>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> AppResult<Self> {
        config.validate()?;
        log_startup(&config.search_query, config.max_pages, config.page_size);

        let client = Arc::new(PlayClient::new(&config)?);

        Ok(Self {
            resolver: AppResolver::new(client.clone()),
            fetcher: ReviewFetcher::new(client),
            exporter: CsvExporter::with_path(&config.output_file),
            config,
        })
    }

    /// 运行主流程：搜索 → 翻页抓取 → 导出
    pub async fn run(&self) -> AppResult<RunSummary> {
        let query = &self.config.search_query;

        let app_id = match self.resolver.resolve(query).await {
            Ok(Some(app_id)) => app_id,
            Ok(None) => {
                warn!("⚠️ 搜索词未匹配到任何应用: {}", query);
                return Ok(RunSummary::default());
            }
            Err(AppError::Transport(e)) => {
                error!("❌ 搜索请求失败: {}", e);
                return Ok(RunSummary::default());
            }
            Err(e) => return Err(e),
        };

        let collection = collect(
            &self.fetcher,
            &app_id,
            &self.config.review_query(),
            self.config.max_pages,
            self.config.transport_policy(),
        )
        .await?;

        let output = self.exporter.export(&collection.reviews)?;

        let stop = collection.stop.to_string();
        let output_display = output.as_ref().map(|p| p.display().to_string());
        print_final_stats(
            &app_id,
            collection.reviews.len(),
            collection.pages_fetched,
            &stop,
            output_display.as_deref(),
        );

        Ok(RunSummary {
            app_id: Some(app_id),
            reviews: collection.reviews,
            pages_fetched: collection.pages_fetched,
            stop: Some(collection.stop),
            output,
        })
    }
}
