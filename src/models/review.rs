use chrono::{DateTime, Local, TimeZone};
use serde::{Serialize, Serializer};

use crate::utils::csv::CsvRecord;

/// 导出文件的列名，顺序即字段定义顺序
pub const REVIEW_FIELDS: [&str; 5] = [
    "reviewer_name",
    "review_content",
    "review_datetime",
    "star_count",
    "review_likes",
];

/// 单条评论
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    /// 评论者昵称
    pub reviewer_name: String,
    /// 评论正文（可能为空）
    pub review_content: String,
    /// 评论时间
    #[serde(serialize_with = "serialize_local_iso")]
    pub review_datetime: DateTime<Local>,
    /// 星级 1-5
    pub star_count: u8,
    /// 点赞数
    pub review_likes: u64,
}

impl Review {
    /// 本地时间的 ISO-8601 字符串
    pub fn review_datetime_iso(&self) -> String {
        iso_string(&self.review_datetime)
    }
}

impl CsvRecord for Review {
    fn field_names(&self) -> &'static [&'static str] {
        &REVIEW_FIELDS
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.reviewer_name.clone(),
            self.review_content.clone(),
            self.review_datetime_iso(),
            self.star_count.to_string(),
            self.review_likes.to_string(),
        ]
    }
}

/// 一页评论及翻页令牌
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewPage {
    pub reviews: Vec<Review>,
    /// 下一页令牌，None 表示没有更多数据
    pub next_token: Option<String>,
}

impl ReviewPage {
    pub fn has_more(&self) -> bool {
        self.next_token.is_some()
    }
}

/// 将 Unix 秒级时间戳转换为本地时间
pub fn local_datetime(epoch_secs: i64) -> Option<DateTime<Local>> {
    Local.timestamp_opt(epoch_secs, 0).single()
}

/// 将 Unix 秒级时间戳转换为本地时间的 ISO-8601 字符串
///
/// 格式为 `YYYY-MM-DDTHH:MM:SS`，不带时区偏移
pub fn format_local_iso(epoch_secs: i64) -> Option<String> {
    local_datetime(epoch_secs).map(|dt| iso_string(&dt))
}

fn iso_string<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn serialize_local_iso<S>(dt: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&iso_string(dt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDateTime, Utc};

    fn sample_review() -> Review {
        Review {
            reviewer_name: "Alice".to_string(),
            review_content: "Nice, but slow".to_string(),
            review_datetime: local_datetime(1_700_000_000).unwrap(),
            star_count: 4,
            review_likes: 12,
        }
    }

    #[test]
    fn test_format_local_iso_matches_epoch() {
        let iso = format_local_iso(1_700_000_000).unwrap();
        let parsed = NaiveDateTime::parse_from_str(&iso, "%Y-%m-%dT%H:%M:%S").unwrap();
        let expected = Local.timestamp_opt(1_700_000_000, 0).unwrap().naive_local();

        assert_eq!(parsed, expected);
        assert_eq!(iso.len(), 19);
        assert_eq!(&iso[10..11], "T");
    }

    #[test]
    fn test_iso_string_pins_known_epoch() {
        let utc = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert_eq!(iso_string(&utc), "2023-11-14T22:13:20");

        let east8 = FixedOffset::east_opt(8 * 3600).unwrap();
        assert_eq!(
            iso_string(&utc.with_timezone(&east8)),
            "2023-11-15T06:13:20"
        );
    }

    #[test]
    fn test_local_iso_is_utc_plus_local_offset() {
        let local = local_datetime(1_700_000_000).unwrap();
        let expected = Utc.timestamp_opt(1_700_000_000, 0).unwrap().naive_utc()
            + chrono::Duration::seconds(local.offset().local_minus_utc() as i64);

        assert_eq!(
            format_local_iso(1_700_000_000).unwrap(),
            expected.format("%Y-%m-%dT%H:%M:%S").to_string()
        );
    }

    #[test]
    fn test_to_row_keeps_field_order() {
        let review = sample_review();
        let row = review.to_row();

        assert_eq!(review.field_names().len(), row.len());
        assert_eq!(row[0], "Alice");
        assert_eq!(row[1], "Nice, but slow");
        assert_eq!(row[2], format_local_iso(1_700_000_000).unwrap());
        assert_eq!(row[3], "4");
        assert_eq!(row[4], "12");
    }

    #[test]
    fn test_serialize_keeps_numbers_as_integers() {
        let value = serde_json::to_value(sample_review()).unwrap();

        assert!(value["star_count"].is_u64());
        assert!(value["review_likes"].is_u64());
        assert_eq!(value["review_datetime"], format_local_iso(1_700_000_000).unwrap());
    }

    #[test]
    fn test_page_has_more() {
        let mut page = ReviewPage::default();
        assert!(!page.has_more());
        page.next_token = Some("token".to_string());
        assert!(page.has_more());
    }
}
