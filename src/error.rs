use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 网络传输错误
    #[error("传输错误: {0}")]
    Transport(#[from] TransportError),
    /// 响应解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),
    /// 导出文件错误
    #[error("导出错误: {0}")]
    Export(#[from] ExportError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 网络传输错误
#[derive(Debug, Error)]
pub enum TransportError {
    /// 请求超时
    #[error("请求超时: {endpoint}")]
    Timeout { endpoint: String },
    /// 非 200 响应
    #[error("请求返回异常状态码 ({endpoint}): {status}")]
    Status { endpoint: String, status: u16 },
    /// 连接或读取失败
    #[error("网络请求失败 ({endpoint}): {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

impl TransportError {
    /// 根据 reqwest 错误进行分类
    pub fn from_reqwest(endpoint: impl Into<String>, err: reqwest::Error) -> Self {
        let endpoint = endpoint.into();
        if err.is_timeout() {
            TransportError::Timeout { endpoint }
        } else {
            TransportError::Network {
                endpoint,
                source: err,
            }
        }
    }

    /// 是否属于可重试的临时错误
    ///
    /// 本程序不做重试，仅用于日志和调用方判断
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Timeout { .. } => true,
            TransportError::Status { status, .. } => *status == 429 || *status >= 500,
            TransportError::Network { source, .. } => source.is_connect() || source.is_request(),
        }
    }
}

/// 响应解析错误
#[derive(Debug, Error)]
pub enum ParseError {
    /// 缺少 `)]}'` 前缀
    #[error("响应缺少防劫持前缀")]
    MissingPrefix,
    /// JSON 解码失败
    #[error("JSON解析失败 ({context}): {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// 数据结构与预期不符
    #[error("响应结构不符合预期: {path}")]
    UnexpectedShape { path: String },
    /// 时间戳无法转换
    #[error("无效的时间戳: {0}")]
    InvalidTimestamp(i64),
    /// 正则表达式编译失败
    #[error("正则表达式无效: {0}")]
    Pattern(#[from] regex::Error),
}

impl ParseError {
    pub fn shape(path: impl Into<String>) -> Self {
        ParseError::UnexpectedShape { path: path.into() }
    }
}

/// 导出文件错误
#[derive(Debug, Error)]
pub enum ExportError {
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置值无效
    #[error("配置项 {field} 无效: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件写入错误
    pub fn export_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Export(ExportError::Io {
            path: path.into(),
            source,
        })
    }

    /// 创建配置错误
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        AppError::Config(ConfigError::InvalidValue {
            field,
            reason: reason.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_retryable() {
        let server_error = TransportError::Status {
            endpoint: "batchexecute".to_string(),
            status: 503,
        };
        let rate_limited = TransportError::Status {
            endpoint: "batchexecute".to_string(),
            status: 429,
        };
        let not_found = TransportError::Status {
            endpoint: "batchexecute".to_string(),
            status: 404,
        };

        assert!(server_error.is_retryable());
        assert!(rate_limited.is_retryable());
        assert!(!not_found.is_retryable());
    }

    #[test]
    fn test_timeout_is_retryable() {
        let err = TransportError::Timeout {
            endpoint: "search".to_string(),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn test_parse_error_wraps_into_app_error() {
        let err: AppError = ParseError::shape("[0][2]").into();
        assert!(matches!(err, AppError::Parse(ParseError::UnexpectedShape { .. })));
        assert!(err.to_string().contains("[0][2]"));
    }
}
