//! 链接选项、批处理选项与统计信息（模块）
use serde::Deserialize;
use std::str::FromStr;

use crate::error::AutolinkError;

/// 默认跳过的标签：已有链接与代码/原样输出块
pub const DEFAULT_SKIP_TAGS: [&str; 5] = ["a", "pre", "code", "kbd", "script"];

/// 链接模式
/// - All：URL、`www.` 主机与邮箱都链接
/// - Urls：只链接 URL 与 `www.` 主机
/// - EmailAddresses：只链接邮箱
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkMode {
    #[default]
    All,
    Urls,
    EmailAddresses,
}

impl LinkMode {
    pub fn links_urls(self) -> bool {
        matches!(self, LinkMode::All | LinkMode::Urls)
    }

    pub fn links_emails(self) -> bool {
        matches!(self, LinkMode::All | LinkMode::EmailAddresses)
    }
}

impl FromStr for LinkMode {
    type Err = AutolinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(LinkMode::All),
            "urls" => Ok(LinkMode::Urls),
            "email_addresses" => Ok(LinkMode::EmailAddresses),
            other => Err(AutolinkError::InvalidMode(other.to_string())),
        }
    }
}

/// 链接显示文本的默认生成方式
/// - Escape：对匹配到的字节做 HTML 转义
/// - Verbatim：原样输出（输入本身已是转义过的 HTML 时使用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkTextStyle {
    #[default]
    Escape,
    Verbatim,
}

/// 单次链接调用的配置
#[derive(Debug, Clone)]
pub struct AutolinkOptions {
    /// 链接模式
    pub mode: LinkMode,
    /// 允许 `http://localhost` 这类不含点的域名（只影响 URL 匹配，`www.` 与邮箱始终要求有点）
    pub short_domains: bool,
    /// 原样插入 `<a>` 标签的额外属性串；不做任何清洗
    pub link_attr: Option<String>,
    /// 跳过标签名（区分大小写）
    pub skip_tags: Vec<String>,
    /// 显示文本生成方式
    pub link_text: LinkTextStyle,
}

impl Default for AutolinkOptions {
    fn default() -> Self {
        Self {
            mode: LinkMode::All,
            short_domains: false,
            link_attr: None,
            skip_tags: DEFAULT_SKIP_TAGS.iter().map(|s| s.to_string()).collect(),
            link_text: LinkTextStyle::Escape,
        }
    }
}

/// 目录批处理选项
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub autolink: AutolinkOptions,
    /// 最大文件大小（字节）；超过则跳过
    pub max_file_size: Option<u64>,
    /// 线程数：None 表示自动（等于 CPU 核数）；Some(1) 走串行
    pub threads: Option<usize>,
}

/// 批处理统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchStats {
    pub files_linked: usize,
    pub files_skipped: usize,
    pub links_total: usize,
}
