//! 批量 RPC 协议编解码
//!
//! 请求体和响应都是按位置索引的嵌套数组，索引路径必须与商店后端保持一致

use crate::error::ParseError;
use crate::models::review::local_datetime;
use crate::models::{Review, ReviewPage, ReviewQuery};
use regex::Regex;
use serde_json::{json, Value};
use url::form_urlencoded;

/// 评论接口的 RPC 标识
pub const REVIEWS_RPC_ID: &str = "oCPfdb";

/// 应用标识后的固定判别值
const APP_DISCRIMINATOR: u8 = 7;

/// 响应的防劫持前缀
const XSSI_PREFIX_PATTERN: &str = r"\)\]\}'\n\n([\s\S]+)";

/// 构建评论请求的表单体
///
/// # 参数
/// - `app_id`: 应用ID
/// - `query`: 请求参数
/// - `token`: 翻页令牌，第一页为 None
///
/// # 返回
/// 返回 `f.req=...` 形式的表单字符串
pub fn build_request_body(app_id: &str, query: &ReviewQuery, token: Option<&str>) -> String {
    let inner = inner_payload(app_id, query, token);
    let envelope = json!([[[REVIEWS_RPC_ID, inner, Value::Null, "generic"]]]);

    form_urlencoded::Serializer::new(String::new())
        .append_pair("f.req", &format!("{}\n", envelope))
        .finish()
}

/// 内层参数数组
///
/// 第一页的分页段为 `[count]`，后续页为 `[count,null,"token"]`
fn inner_payload(app_id: &str, query: &ReviewQuery, token: Option<&str>) -> String {
    let paging = match token {
        Some(token) => format!("[{},null,{}]", query.count, Value::from(token)),
        None => format!("[{}]", query.count),
    };
    let star = query
        .star_filter
        .map(|s| s.to_string())
        .unwrap_or_else(|| "null".to_string());

    format!(
        "[null,[2,{sort},{paging},null,[null,{star},null,null,null,null,null,null,{device}]],[{app},{disc}]]",
        sort = query.sort.code(),
        paging = paging,
        star = star,
        device = query.device_id,
        app = Value::from(app_id),
        disc = APP_DISCRIMINATOR,
    )
}

/// 去掉响应开头的 `)]}'` 前缀
pub fn strip_xssi_prefix(body: &str) -> Result<&str, ParseError> {
    let re = Regex::new(XSSI_PREFIX_PATTERN)?;
    re.captures(body)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
        .ok_or(ParseError::MissingPrefix)
}

/// 解析评论接口响应
///
/// 外层 JSON 的 `[0][2]` 是一段 JSON 字符串，需要再解析一次；
/// 评论列表位于 `[0]`，翻页令牌位于 `[-2][-1]`
pub fn decode_review_page(body: &str) -> Result<ReviewPage, ParseError> {
    let payload = strip_xssi_prefix(body)?;

    let envelope: Value = serde_json::from_str(payload).map_err(|source| ParseError::Json {
        context: "envelope",
        source,
    })?;
    let inner_text = envelope
        .get(0)
        .and_then(|v| v.get(2))
        .and_then(Value::as_str)
        .ok_or_else(|| ParseError::shape("[0][2]"))?;

    let inner: Value = serde_json::from_str(inner_text).map_err(|source| ParseError::Json {
        context: "payload",
        source,
    })?;
    let sections = inner
        .as_array()
        .ok_or_else(|| ParseError::shape("payload"))?;

    let reviews = match sections.first() {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(raw_reviews)) => raw_reviews
            .iter()
            .enumerate()
            .map(|(i, raw)| parse_review(raw, i))
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(ParseError::shape("payload[0]")),
    };

    let next_token = extract_token(sections)?;

    Ok(ReviewPage {
        reviews,
        next_token,
    })
}

/// 读取 `[-2][-1]` 位置的翻页令牌，空字符串视为没有下一页
fn extract_token(sections: &[Value]) -> Result<Option<String>, ParseError> {
    let len = sections.len();
    if len < 2 {
        return Err(ParseError::shape("payload[-2]"));
    }

    match &sections[len - 2] {
        Value::Null => Ok(None),
        Value::Array(tail) => match tail.last() {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(token)) if token.is_empty() => Ok(None),
            Some(Value::String(token)) => Ok(Some(token.clone())),
            Some(_) => Err(ParseError::shape("payload[-2][-1]")),
        },
        _ => Err(ParseError::shape("payload[-2]")),
    }
}

/// 按固定索引提取单条评论
///
/// `[1][0]` 昵称, `[2]` 星级, `[4]` 正文, `[5][0]` 时间戳, `[6]` 点赞数
fn parse_review(raw: &Value, index: usize) -> Result<Review, ParseError> {
    let path = |suffix: &str| format!("payload[0][{}]{}", index, suffix);

    let reviewer_name = raw
        .get(1)
        .and_then(|v| v.get(0))
        .and_then(Value::as_str)
        .ok_or_else(|| ParseError::shape(path("[1][0]")))?
        .to_string();

    let review_content = match raw.get(4) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(_) => return Err(ParseError::shape(path("[4]"))),
    };

    let epoch_secs = raw
        .get(5)
        .and_then(|v| v.get(0))
        .and_then(Value::as_i64)
        .ok_or_else(|| ParseError::shape(path("[5][0]")))?;
    let review_datetime =
        local_datetime(epoch_secs).ok_or(ParseError::InvalidTimestamp(epoch_secs))?;

    let star_count = raw
        .get(2)
        .and_then(Value::as_u64)
        .filter(|star| (1..=5).contains(star))
        .ok_or_else(|| ParseError::shape(path("[2]")))? as u8;

    let review_likes = match raw.get(6) {
        None | Some(Value::Null) => 0,
        Some(value) => value
            .as_u64()
            .ok_or_else(|| ParseError::shape(path("[6]")))?,
    };

    Ok(Review {
        reviewer_name,
        review_content,
        review_datetime,
        star_count,
        review_likes,
    })
}
