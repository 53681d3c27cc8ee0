//! 商店接口协议模块
//!
//! 只负责请求编码和响应解析，不做网络 I/O

pub mod batch_execute;
pub mod search;

pub use batch_execute::{build_request_body, decode_review_page};
pub use search::extract_app_id;
