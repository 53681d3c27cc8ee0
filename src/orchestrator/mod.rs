//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `pagination` - 翻页驱动
//! - 按令牌依次抓取评论页
//! - 令牌为空或达到页数上限时停止
//! - 区分"数据结束"和"传输失败"
//!
//! ### `pipeline` - 主流程
//! - 搜索应用ID
//! - 调用翻页驱动收集评论
//! - 导出 CSV 并输出统计
//!
//! ## 层次关系
//!
//! ```text
//! pipeline (搜索 → 翻页 → 导出)
//!     ↓
//! pagination (处理 Vec<Review>)
//!     ↓
//! services (能力层：resolve / fetch / export)
//!     ↓
//! clients + api (网络请求与协议编解码)
//! ```
//!
//! 所有请求严格顺序执行，同一时刻最多一个请求在途。

pub mod pagination;
pub mod pipeline;

pub use pagination::{collect, Collection, ReviewSource, StopReason, TransportPolicy};
pub use pipeline::{App, RunSummary};
