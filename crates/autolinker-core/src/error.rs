//! 引擎错误类型
//!
//! 词法层面的"不是链接"一律用 `None` 表示，不会走到这里；
//! 真正的失败只有输出缓冲区扩容失败，以及宿主侧传入的非法参数。
use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutolinkError {
    /// 输出缓冲区扩容失败
    #[error("output buffer allocation failed: {0}")]
    OutOfMemory(#[from] TryReserveError),

    /// 未知的链接模式名
    #[error("invalid linking mode `{0}` (possible values are all, urls, email_addresses)")]
    InvalidMode(String),
}
