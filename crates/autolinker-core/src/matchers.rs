//! 三类链接匹配器：裸 URL（`:` 触发）、`www.` 主机（`w`/`W` 触发）、邮箱（`@` 触发）
//!
//! 所有匹配器的输入都是：完整文本、触发位置 `pos`、回退下限 `floor`
//! （上一次已写出的位置，回退不能越过它）。成功时返回 [`Candidate`]，
//! 链接区间为 `[pos - rewind, pos + forward_len)`。
use crate::classify::{decode_codepoint, is_alnum, is_punct, is_space, is_unicode_space};
use crate::delim::{trim_trailing_punctuation, validate_domain};

/// 允许自动链接的协议前缀（大小写不敏感，且其后必须紧跟字母数字）
const SAFE_SCHEMES: [&[u8]; 5] = [b"/", b"http://", b"https://", b"ftp://", b"mailto:"];

/// 链接种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LinkKind {
    Www,
    Email,
    Url,
}

impl LinkKind {
    /// 写入 href 时补在链接前面的固定前缀
    pub(crate) fn href_prefix(self) -> &'static [u8] {
        match self {
            LinkKind::Www => b"http://",
            LinkKind::Email => b"mailto:",
            LinkKind::Url => b"",
        }
    }

    pub(crate) fn find(self, text: &[u8], pos: usize, floor: usize, short_domains: bool) -> Option<Candidate> {
        match self {
            LinkKind::Www => match_www(text, pos, floor),
            LinkKind::Email => match_email(text, pos, floor),
            LinkKind::Url => match_url(text, pos, floor, short_domains),
        }
    }
}

/// 一次成功匹配：向前回退的字节数与从触发位置起向后消费的字节数（`forward_len > 0`）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub(crate) rewind: usize,
    pub(crate) forward_len: usize,
}

/// `link` 是否以安全协议开头
pub(crate) fn is_safe_scheme(link: &[u8]) -> bool {
    SAFE_SCHEMES.iter().any(|scheme| {
        link.len() > scheme.len()
            && link[..scheme.len()].eq_ignore_ascii_case(scheme)
            && is_alnum(link[scheme.len()])
    })
}

/// 判断 `end` 之前的一个字符能否并入邮箱本地部分，能则返回其字节宽度。
///
/// ASCII 字符需是字母数字或 `.+-_`；多字节字符需能完整解码且不是 Unicode 空白。
/// 字符起点不得早于 `floor`；解码失败同样视为停止。
fn rewind_step(text: &[u8], end: usize, floor: usize) -> Option<usize> {
    let last = end.checked_sub(1)?;
    if last < floor {
        return None;
    }

    let b = text[last];
    if b & 0xC0 != 0x80 {
        let ok = b.is_ascii() && (is_alnum(b) || matches!(b, b'.' | b'+' | b'-' | b'_'));
        return ok.then_some(1);
    }

    // 续字节：向前找首字节，最多再看 3 个字节
    let mut start = last;
    while text[start] & 0xC0 == 0x80 {
        if last - start >= 3 || start == floor {
            return None;
        }
        start -= 1;
    }

    let width = last - start + 1;
    match decode_codepoint(&text[start..=last]) {
        Some((cp, len)) if len == width && !is_unicode_space(cp) => Some(width),
        _ => None,
    }
}

/// 从 `pos` 向前逐字符回退，返回总回退字节数
fn rewind_local_part(text: &[u8], pos: usize, floor: usize) -> usize {
    let mut rewind = 0;
    while let Some(step) = rewind_step(text, pos - rewind, floor) {
        rewind += step;
    }
    rewind
}

/// 从 `from` 向后延伸到下一个 ASCII 空白
fn extend_to_space(data: &[u8], from: usize) -> usize {
    data[from..]
        .iter()
        .position(|&b| is_space(b))
        .map_or(data.len(), |n| from + n)
}

/// 对 `[start, pos + forward_end)` 做尾部修剪，换算成触发位置之后的长度
fn finish(text: &[u8], start: usize, pos: usize, forward_end: usize) -> Option<Candidate> {
    let rewind = pos - start;
    let kept = trim_trailing_punctuation(&text[start..pos + forward_end]);
    if kept <= rewind {
        return None;
    }
    Some(Candidate { rewind, forward_len: kept - rewind })
}

fn match_www(text: &[u8], pos: usize, floor: usize) -> Option<Candidate> {
    // 紧贴上一个链接（或文本开头）时不检查前一字节
    if pos > floor && !is_punct(text[pos - 1]) && !is_space(text[pos - 1]) {
        return None;
    }

    let data = &text[pos..];
    if !data.starts_with(b"www.") {
        return None;
    }

    let domain_len = validate_domain(data, true);
    if domain_len == 0 {
        return None;
    }

    let end = extend_to_space(data, domain_len);
    finish(text, pos, pos, end)
}

fn match_email(text: &[u8], pos: usize, floor: usize) -> Option<Candidate> {
    let rewind = rewind_local_part(text, pos, floor);
    if rewind == 0 {
        return None;
    }

    let data = &text[pos..];
    let (mut ats, mut dots) = (0usize, 0usize);
    let mut end = 0;
    while end < data.len() {
        let c = data[end];
        if is_alnum(c) {
            // 继续
        } else if c == b'@' {
            ats += 1;
        } else if c == b'.' && end + 1 < data.len() {
            dots += 1;
        } else if c != b'-' && c != b'_' {
            break;
        }
        end += 1;
    }

    if end < 2 || ats != 1 || dots == 0 {
        return None;
    }

    finish(text, pos - rewind, pos, end)
}

fn match_url(text: &[u8], pos: usize, floor: usize, short_domains: bool) -> Option<Candidate> {
    let data = &text[pos..];
    if data.len() < 4 || data[1] != b'/' || data[2] != b'/' {
        return None;
    }

    let rewind = rewind_local_part(text, pos, floor);
    let start = pos - rewind;
    if !is_safe_scheme(&text[start..]) {
        return None;
    }

    const SEP: usize = b"://".len();
    let domain_len = validate_domain(&data[SEP..], !short_domains);
    if domain_len == 0 {
        return None;
    }

    let end = extend_to_space(data, SEP + domain_len);
    finish(text, start, pos, end)
}
