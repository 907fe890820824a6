//! 调度主循环
//!
//! 每次调用都会按链接模式新建一张 256 项的动作表（只读、不跨调用共享），
//! 然后单遍扫描输入：
//! - 非触发字节只推进前瞻游标 `end`，不写输出；
//! - `<` 交给标签跳过扫描；
//! - `w`/`W`、`:`、`@` 交给对应匹配器，成功后把 `[copied, start)` 原样写出，再写锚点标签。
//!
//! 一个链接都没找到时输出缓冲区保持不变，调用方可以直接复用原文。
use std::borrow::Cow;
use tracing::trace;

use crate::buffer::OutBuf;
use crate::error::AutolinkError;
use crate::html::{attr_entity, html_entity};
use crate::matchers::LinkKind;
use crate::options::{AutolinkOptions, LinkMode, LinkTextStyle};
use crate::skip_tag::skip_tag;

/// 自定义显示文本回调：输入匹配到的原始链接字节，返回写入 `<a>` 与 `</a>` 之间的内容
pub type LinkTextFn<'f> = &'f mut dyn FnMut(&[u8]) -> Vec<u8>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    None,
    SkipTag,
    Match(LinkKind),
}

struct ActionTable([Action; 256]);

impl ActionTable {
    fn new(mode: LinkMode) -> Self {
        let mut table = [Action::None; 256];
        table[b'<' as usize] = Action::SkipTag;
        if mode.links_emails() {
            table[b'@' as usize] = Action::Match(LinkKind::Email);
        }
        if mode.links_urls() {
            table[b'w' as usize] = Action::Match(LinkKind::Www);
            table[b'W' as usize] = Action::Match(LinkKind::Www);
            table[b':' as usize] = Action::Match(LinkKind::Url);
        }
        Self(table)
    }

    #[inline]
    fn get(&self, b: u8) -> Action {
        self.0[b as usize]
    }
}

/// 链接结果：没有任何链接时 `output` 借用原文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linked<'a> {
    pub output: Cow<'a, [u8]>,
    pub link_count: usize,
}

/// 扫描 `text`，把结果追加到调用方持有的 `out`，返回链接数。
///
/// 返回 0 时 `out` 中不会追加任何内容（输出即原文）。
/// 唯一的错误是输出缓冲区扩容失败。
pub fn autolink_into(
    out: &mut Vec<u8>,
    text: &[u8],
    opts: &AutolinkOptions,
    mut link_text: Option<LinkTextFn<'_>>,
) -> Result<usize, AutolinkError> {
    let size = text.len();
    if size == 0 {
        return Ok(0);
    }

    let table = ActionTable::new(opts.mode);
    let link_attr = opts
        .link_attr
        .as_deref()
        .map(|attr| attr.trim_start_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r')));

    let mut ob = OutBuf::new(out);
    ob.grow(size)?;

    let mut link_count = 0usize;
    // copied：已写出的位置；end：前瞻游标
    let (mut copied, mut end) = (0usize, 0usize);

    while copied < size {
        let mut action = Action::None;
        while end < size {
            action = table.get(text[end]);
            if action != Action::None {
                break;
            }
            end += 1;
        }

        if end == size {
            if link_count > 0 {
                ob.put(&text[copied..])?;
            }
            break;
        }

        let Action::Match(kind) = action else {
            end += skip_tag(&text[end..], &opts.skip_tags);
            continue;
        };

        let Some(found) = kind.find(text, end, copied, opts.short_domains) else {
            end += 1;
            continue;
        };

        let start = end - found.rewind;
        let stop = end + found.forward_len;
        let link = &text[start..stop];
        trace!(?kind, start, stop, "link found");

        ob.put(&text[copied..start])?;
        ob.put(b"<a href=\"")?;
        ob.put(kind.href_prefix())?;
        ob.put_escaped(link, attr_entity)?;
        match link_attr {
            Some(attr) => {
                ob.put(b"\" ")?;
                ob.put(attr.as_bytes())?;
                ob.put(b">")?;
            }
            None => ob.put(b"\">")?,
        }
        match link_text.as_deref_mut() {
            Some(produce) => ob.put(&produce(link))?,
            None => match opts.link_text {
                LinkTextStyle::Escape => ob.put_escaped(link, html_entity)?,
                LinkTextStyle::Verbatim => ob.put(link)?,
            },
        }
        ob.put(b"</a>")?;

        link_count += 1;
        copied = stop;
        end = stop;
    }

    Ok(link_count)
}

/// 扫描 `text` 并返回结果；显示文本按 `opts.link_text` 生成
pub fn autolink<'a>(text: &'a [u8], opts: &AutolinkOptions) -> Result<Linked<'a>, AutolinkError> {
    link_bytes(text, opts, None)
}

/// 同 [`autolink`]，显示文本由 `link_text` 回调生成
pub fn autolink_with<'a, F>(text: &'a [u8], opts: &AutolinkOptions, mut link_text: F) -> Result<Linked<'a>, AutolinkError>
where
    F: FnMut(&[u8]) -> Vec<u8>,
{
    link_bytes(text, opts, Some(&mut link_text))
}

fn link_bytes<'a>(
    text: &'a [u8],
    opts: &AutolinkOptions,
    link_text: Option<LinkTextFn<'_>>,
) -> Result<Linked<'a>, AutolinkError> {
    let mut out = Vec::new();
    let link_count = autolink_into(&mut out, text, opts, link_text)?;
    let output = if link_count == 0 { Cow::Borrowed(text) } else { Cow::Owned(out) };
    Ok(Linked { output, link_count })
}

/// 字符串入口：空白文本直接返回空串；没有链接时借用原文
pub fn auto_link<'a>(text: &'a str, opts: &AutolinkOptions) -> Result<Cow<'a, str>, AutolinkError> {
    if text.trim().is_empty() {
        return Ok(Cow::Borrowed(""));
    }
    Ok(into_str(text, autolink(text.as_bytes(), opts)?))
}

/// 同 [`auto_link`]，显示文本由 `link_text` 回调生成
pub fn auto_link_with<'a, F>(text: &'a str, opts: &AutolinkOptions, mut link_text: F) -> Result<Cow<'a, str>, AutolinkError>
where
    F: FnMut(&str) -> String,
{
    if text.trim().is_empty() {
        return Ok(Cow::Borrowed(""));
    }
    let linked = autolink_with(text.as_bytes(), opts, |link| {
        link_text(&String::from_utf8_lossy(link)).into_bytes()
    })?;
    Ok(into_str(text, linked))
}

fn into_str<'a>(text: &'a str, linked: Linked<'_>) -> Cow<'a, str> {
    match linked.output {
        Cow::Borrowed(_) => Cow::Borrowed(text),
        // 链接边界只落在 ASCII 字节或完整字符上，拼接结果仍是合法 UTF-8
        Cow::Owned(bytes) => Cow::Owned(
            String::from_utf8(bytes).unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned()),
        ),
    }
}
