//! 配置文件加载（TOML）
//!
//! ```toml
//! mode = "all"            # all | urls | email_addresses
//! short_domains = false
//! skip_tags = ["a", "pre", "code", "kbd", "script"]
//! link_text = "escape"    # escape | verbatim
//!
//! [attributes]
//! rel = "nofollow"
//! target = "_blank"
//! ```
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::html::{tag_options, AttrValue};
use crate::options::{AutolinkOptions, LinkMode, LinkTextStyle};

/// 顶层配置文件结构；缺省字段沿用 `AutolinkOptions::default()`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    mode: Option<LinkMode>,
    #[serde(default)]
    short_domains: Option<bool>,
    #[serde(default)]
    skip_tags: Option<Vec<String>>,
    #[serde(default)]
    link_text: Option<LinkTextStyle>,
    #[serde(default)]
    attributes: BTreeMap<String, AttrValue>,
}

impl ConfigFile {
    fn into_options(self) -> AutolinkOptions {
        let mut opts = AutolinkOptions::default();
        if let Some(mode) = self.mode {
            opts.mode = mode;
        }
        if let Some(short) = self.short_domains {
            opts.short_domains = short;
        }
        if let Some(tags) = self.skip_tags {
            opts.skip_tags = tags.into_iter().filter(|t| !t.is_empty()).collect();
        }
        if let Some(style) = self.link_text {
            opts.link_text = style;
        }
        opts.link_attr = tag_options(&self.attributes);
        opts
    }
}

/// 从 TOML 文本解析链接选项
pub fn options_from_toml(txt: &str) -> Result<AutolinkOptions> {
    let parsed: ConfigFile = toml::from_str(txt).context("parse autolink config")?;
    Ok(parsed.into_options())
}

/// 从 TOML 配置文件加载链接选项
pub fn load_options(path: &Path) -> Result<AutolinkOptions> {
    let txt = std::fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    options_from_toml(&txt)
}
