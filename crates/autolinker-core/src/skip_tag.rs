//! 标签跳过扫描（尽力而为，不是 HTML 解析器）
//!
//! 在 `<` 处被调用：普通标签只跳过 `<...>` 本身；
//! 若是配置中的跳过标签（如 `a`、`pre`），则一直跳到对应的闭合标签 `</name>` 的 `>`。
use crate::classify::is_space;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    NotThisTag,
    Open,
    Close,
}

/// 判断 `data`（以 `<` 开头）是否为名为 `name` 的开/闭标签。
///
/// 标签名区分大小写，名字之后必须是空白或 `>`；闭合标签允许 `</` 与名字之间有空白。
fn classify_tag(data: &[u8], name: &[u8]) -> TagKind {
    if data.len() < 3 || data[0] != b'<' {
        return TagKind::NotThisTag;
    }

    let mut i = 1;
    let closed = data[i] == b'/';
    if closed {
        i += 1;
        while i < data.len() && is_space(data[i]) {
            i += 1;
        }
    }

    let rest = &data[i..];
    if rest.len() <= name.len() || !rest.starts_with(name) {
        return TagKind::NotThisTag;
    }

    let after = rest[name.len()];
    if after == b'>' || is_space(after) {
        if closed {
            TagKind::Close
        } else {
            TagKind::Open
        }
    } else {
        TagKind::NotThisTag
    }
}

/// 从 `text[0] == b'<'` 开始跳过标签，返回相对偏移（指向结束的 `>`，找不到时为 `text.len()`）。
///
/// 返回值总是 >= 1，保证调度循环前进。
pub(crate) fn skip_tag(text: &[u8], skip_tags: &[String]) -> usize {
    let size = text.len();
    let mut i = text.iter().position(|&b| b == b'>').unwrap_or(size);

    let matched = skip_tags
        .iter()
        .map(|t| t.as_bytes())
        .find(|name| !name.is_empty() && classify_tag(text, name) == TagKind::Open);

    if let Some(name) = matched {
        loop {
            while i < size && text[i] != b'<' {
                i += 1;
            }
            if i == size {
                break;
            }
            let kind = classify_tag(&text[i..], name);
            i += 1;
            if kind == TagKind::Close {
                break;
            }
        }

        while i < size && text[i] != b'>' {
            i += 1;
        }
    }

    i.max(1)
}
