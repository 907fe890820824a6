//! HTML 转义与链接属性拼装
use serde::Deserialize;
use std::collections::BTreeMap;

/// 文本内容转义：`& < > " '`
pub(crate) fn html_entity(b: u8) -> Option<&'static [u8]> {
    match b {
        b'&' => Some(&b"&amp;"[..]),
        b'<' => Some(&b"&lt;"[..]),
        b'>' => Some(&b"&gt;"[..]),
        b'"' => Some(&b"&quot;"[..]),
        b'\'' => Some(&b"&#39;"[..]),
        _ => None,
    }
}

/// href 属性值转义：只处理双引号，防止跳出属性
pub(crate) fn attr_entity(b: u8) -> Option<&'static [u8]> {
    (b == b'"').then_some(&b"&quot;"[..])
}

/// 按 [`html_entity`] 转义字符串；实体都是 ASCII，只在 ASCII 字节处切分
pub(crate) fn escape_html_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut org = 0;
    for (i, b) in s.bytes().enumerate() {
        if let Some(entity) = html_entity(b) {
            out.push_str(&s[org..i]);
            out.extend(entity.iter().map(|&c| char::from(c)));
            org = i + 1;
        }
    }
    out.push_str(&s[org..]);
    out
}

/// 取值为布尔语义的 HTML 属性：为真时写成 `key="key"`，为假时省略
const BOOLEAN_ATTRIBUTES: &[&str] = &[
    "disabled", "readonly", "multiple", "checked", "autobuffer", "autoplay", "controls", "loop",
    "selected", "hidden", "scoped", "async", "defer", "reversed", "ismap", "seemless", "muted",
    "required", "autofocus", "novalidate", "formnovalidate", "open",
];

/// 单个链接属性的取值（TOML 中可写布尔、字符串或字符串数组）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Flag(bool),
    Text(String),
    List(Vec<String>),
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

/// 将属性表拼成插入 `<a>` 标签的属性串，例如 ` rel="nofollow" target="_blank"`。
///
/// 值会做 HTML 转义，属性按拼好的文本排序；表为空（或全部被省略）时返回 `None`。
pub fn tag_options(attrs: &BTreeMap<String, AttrValue>) -> Option<String> {
    let mut parts: Vec<String> = Vec::with_capacity(attrs.len());

    for (key, value) in attrs {
        if BOOLEAN_ATTRIBUTES.contains(&key.as_str()) {
            let on = !matches!(value, AttrValue::Flag(false));
            if on {
                parts.push(format!("{key}=\"{key}\""));
            }
            continue;
        }

        let raw = match value {
            AttrValue::Flag(b) => b.to_string(),
            AttrValue::Text(s) => s.clone(),
            AttrValue::List(items) => items.join(" "),
        };
        parts.push(format!("{key}=\"{}\"", escape_html_str(&raw)));
    }

    if parts.is_empty() {
        return None;
    }
    parts.sort();
    Some(format!(" {}", parts.join(" ")))
}
