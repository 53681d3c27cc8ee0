/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化全局日志
///
/// 默认级别为 info，可通过 `RUST_LOG` 覆盖；重复调用不会报错
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `search_query`: 搜索词
/// - `max_pages`: 最大页数
/// - `page_size`: 每页数量
pub fn log_startup(search_query: &str, max_pages: usize, page_size: u32) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 应用评论抓取");
    info!("🔍 搜索词: {}", search_query);
    info!("📊 最多 {} 页, 每页 {} 条", max_pages, page_size);
    info!("{}", "=".repeat(60));
}

/// 记录单页抓取结果
pub fn log_page_fetched(page: usize, max_pages: usize, count: usize, total: usize, has_more: bool) {
    info!(
        "📄 第 {}/{} 页: {} 条评论 (累计 {}){}",
        page,
        max_pages,
        count,
        total,
        if has_more { "" } else { ", 已无更多数据" }
    );
}

/// 打印最终统计信息
///
/// # 参数
/// - `app_id`: 应用ID
/// - `reviews`: 评论数量
/// - `pages`: 抓取页数
/// - `stop`: 停止原因
/// - `output`: 输出文件路径
pub fn print_final_stats(
    app_id: &str,
    reviews: usize,
    pages: usize,
    stop: &str,
    output: Option<&str>,
) {
    info!("{}", "=".repeat(60));
    info!("📊 抓取完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📦 应用ID: {}", app_id);
    info!("✅ 评论: {} 条 / {} 页", reviews, pages);
    info!("⏹ 停止原因: {}", stop);
    match output {
        Some(path) => info!("💾 已保存至: {}", path),
        None => info!("💾 没有评论，未生成文件"),
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
