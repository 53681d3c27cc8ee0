//! CSV 导出服务 - 业务能力层
//!
//! 只负责"把评论写成 CSV 文件"能力

use crate::error::{AppError, AppResult};
use crate::utils::csv::{write_records, CsvRecord};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 字段分隔符
const SEPARATOR: char = ',';

/// CSV 导出服务
///
/// 职责：
/// - 覆盖写入固定文件名
/// - 表头取第一条记录的字段名
/// - 空集合不生成文件
pub struct CsvExporter {
    output_path: PathBuf,
}

impl CsvExporter {
    /// 使用默认文件名创建
    pub fn new() -> Self {
        Self::with_path("app_reviews.csv")
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// 导出记录
    ///
    /// # 参数
    /// - `records`: 要导出的记录
    ///
    /// # 返回
    /// 写入了文件时返回文件路径，记录为空时返回 None
    pub fn export<R: CsvRecord>(&self, records: &[R]) -> AppResult<Option<PathBuf>> {
        if records.is_empty() {
            debug!("没有记录，跳过导出");
            return Ok(None);
        }

        let path_text = self.output_path.display().to_string();
        let file = File::create(&self.output_path)
            .map_err(|e| AppError::export_failed(path_text.clone(), e))?;
        let mut writer = BufWriter::new(file);

        let written = write_records(&mut writer, records, SEPARATOR)
            .and_then(|n| writer.flush().map(|_| n))
            .map_err(|e| AppError::export_failed(path_text.clone(), e))?;

        info!("💾 已写入 {} 条记录: {}", written, path_text);
        Ok(Some(self.output_path.clone()))
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::review::local_datetime;
    use crate::models::{Review, REVIEW_FIELDS};
    use crate::utils::csv::parse_rows;

    fn review(name: &str, content: &str, star: u8, likes: u64) -> Review {
        Review {
            reviewer_name: name.to_string(),
            review_content: content.to_string(),
            review_datetime: local_datetime(1_700_000_000).unwrap(),
            star_count: star,
            review_likes: likes,
        }
    }

    #[test]
    fn test_empty_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_reviews.csv");
        let exporter = CsvExporter::with_path(&path);

        let result = exporter.export::<Review>(&[]).unwrap();

        assert!(result.is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_export_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_reviews.csv");
        let exporter = CsvExporter::with_path(&path);
        let reviews = vec![
            review("Alice", "Great app", 5, 10),
            review("Bob", "Crashes, a lot", 1, 0),
            review("Carol", "He said \"fine\"\nthen left", 3, 2),
        ];

        let written = exporter.export(&reviews).unwrap();
        assert_eq!(written.as_deref(), Some(path.as_path()));

        let text = std::fs::read_to_string(&path).unwrap();
        let rows = parse_rows(&text, ',');

        assert_eq!(rows.len(), reviews.len() + 1);
        assert_eq!(rows[0], REVIEW_FIELDS.to_vec());
        for (row, review) in rows[1..].iter().zip(&reviews) {
            assert_eq!(row[0], review.reviewer_name);
            assert_eq!(row[1], review.review_content);
            assert_eq!(row[2], review.review_datetime_iso());
            assert_eq!(row[3].parse::<u8>().unwrap(), review.star_count);
            assert_eq!(row[4].parse::<u64>().unwrap(), review.review_likes);
        }
    }

    #[test]
    fn test_export_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_reviews.csv");
        std::fs::write(&path, "old,content\r\n1,2\r\n3,4\r\n5,6\r\n").unwrap();

        CsvExporter::with_path(&path)
            .export(&[review("Alice", "ok", 4, 1)])
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let header = "reviewer_name,review_content,review_datetime,star_count,review_likes\r\n";
        assert!(text.starts_with(header));
        assert_eq!(parse_rows(&text, ',').len(), 2);
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(CsvExporter::default().output_path(), Path::new("app_reviews.csv"));
    }
}
