//! 搜索结果页解析

use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// 搜索结果中应用链接的选择器（按 class 属性精确匹配）
pub const APP_LINK_SELECTOR: &str = r#"a[class="Qfxief"]"#;

/// 从搜索结果页中提取第一个应用的 ID
///
/// # 参数
/// - `html`: 搜索结果页 HTML
/// - `base_url`: 用于解析相对链接的站点地址
///
/// # 返回
/// 找不到链接或链接没有 `id` 参数时返回 None
pub fn extract_app_id(html: &str, base_url: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(APP_LINK_SELECTOR).ok()?;

    let href = document.select(&selector).next()?.value().attr("href")?;
    debug!("第一个应用链接: {}", href);

    app_id_from_href(href, base_url)
}

/// 从链接的查询参数中读取 `id`
fn app_id_from_href(href: &str, base_url: &str) -> Option<String> {
    let url = Url::parse(base_url).ok()?.join(href).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}
