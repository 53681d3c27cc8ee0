//! # Play Review Scraper
//!
//! 根据搜索词抓取应用商店评论并导出为 CSV 的工具
//!
//! ## 架构设计
//!
//! ### ① 协议与传输层
//! - `clients/` - `PlayClient`，持有唯一的 HTTP 客户端，携带浏览器请求头
//! - `api/` - 搜索页解析、批量 RPC 请求编码与响应解码，不做网络 I/O
//!
//! ### ② 业务能力层（Services）
//! - `AppResolver` - 搜索词 → 应用ID
//! - `ReviewFetcher` - 抓取一页评论
//! - `CsvExporter` - 写 CSV 文件
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/pagination` - 翻页驱动
//! - `orchestrator/pipeline` - 主流程 `App`
//!
//! ## 模块结构

pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use clients::PlayClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Review, ReviewPage, ReviewQuery, SortOrder};
pub use orchestrator::{collect, App, RunSummary, StopReason, TransportPolicy};
pub use services::{AppResolver, CsvExporter, FetchOutcome, ReviewFetcher};
