//! 评论请求参数

use std::str::FromStr;

/// 评论排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// 最相关
    MostRelevant = 1,
    /// 最新
    Newest = 2,
    /// 按评分
    Rating = 3,
}

impl SortOrder {
    /// 获取接口使用的排序代码
    pub fn code(self) -> u8 {
        self as u8
    }

    /// 从代码解析排序方式
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(SortOrder::MostRelevant),
            2 => Some(SortOrder::Newest),
            3 => Some(SortOrder::Rating),
            _ => None,
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relevant" | "most_relevant" => Ok(SortOrder::MostRelevant),
            "newest" => Ok(SortOrder::Newest),
            "rating" => Ok(SortOrder::Rating),
            other => other
                .parse::<u8>()
                .ok()
                .and_then(SortOrder::from_code)
                .ok_or_else(|| format!("未知的排序方式: {}", s)),
        }
    }
}

/// 单次评论请求的参数
///
/// `star_filter` 为 None 时在编码阶段写成 `null`，表示不按星级过滤
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewQuery {
    /// 每页评论数量
    pub count: u32,
    /// 设备类型代码
    pub device_id: u8,
    /// 排序方式
    pub sort: SortOrder,
    /// 星级过滤
    pub star_filter: Option<u8>,
}

impl Default for ReviewQuery {
    fn default() -> Self {
        Self {
            count: 50,
            device_id: 2,
            sort: SortOrder::Newest,
            star_filter: None,
        }
    }
}
