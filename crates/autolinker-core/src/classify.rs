//! 字节分类表与 UTF-8 单字符解码
//!
//! - ASCII 分类表：空白 / 标点 / 数字 / 字母，供匹配器做 O(1) 分支。
//! - UTF-8 解码与 Unicode 空白判定仅被邮箱回退扫描使用。

const OTHER: u8 = 0;
const SPACE: u8 = 1;
const PUNCT: u8 = 2;
const DIGIT: u8 = 3;
const ALPHA: u8 = 4;

/// ASCII 字节分类表（非 ASCII 一律为 OTHER）
static CTYPE_CLASS: [u8; 256] = build_ctype_class();

const fn build_ctype_class() -> [u8; 256] {
    let mut table = [OTHER; 256];
    let mut b = 0usize;
    while b < 128 {
        table[b] = match b as u8 {
            b'\t' | b'\n' | b'\r' | b' ' => SPACE,
            b'0'..=b'9' => DIGIT,
            b'a'..=b'z' | b'A'..=b'Z' => ALPHA,
            0x21..=0x7E => PUNCT,
            _ => OTHER,
        };
        b += 1;
    }
    table
}

#[inline]
pub(crate) fn is_space(b: u8) -> bool {
    CTYPE_CLASS[b as usize] == SPACE
}

#[inline]
pub(crate) fn is_punct(b: u8) -> bool {
    CTYPE_CLASS[b as usize] == PUNCT
}

#[inline]
pub(crate) fn is_alpha(b: u8) -> bool {
    CTYPE_CLASS[b as usize] == ALPHA
}

#[inline]
pub(crate) fn is_alnum(b: u8) -> bool {
    matches!(CTYPE_CLASS[b as usize], DIGIT | ALPHA)
}

/// UTF-8 首字节声明的序列长度；0 表示不能作为首字节（续字节或 0xF8 以上）
static UTF8_CLASS: [u8; 256] = build_utf8_class();

const fn build_utf8_class() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut b = 0usize;
    while b < 256 {
        table[b] = match b {
            0x00..=0x7F => 1,
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 0,
        };
        b += 1;
    }
    table
}

/// 从 `window` 开头解码一个码点，返回 (码点, 占用字节数)。
///
/// 以下情况返回 `None`：首字节非法、剩余字节不足以容纳声明长度、
/// 续字节不符合 `10xxxxxx`、过长编码、代理区码点或超出 U+10FFFF。
pub(crate) fn decode_codepoint(window: &[u8]) -> Option<(u32, usize)> {
    let lead = *window.first()?;
    let len = UTF8_CLASS[lead as usize] as usize;
    if len == 0 || len > window.len() {
        return None;
    }
    if window[1..len].iter().any(|&b| b & 0xC0 != 0x80) {
        return None;
    }

    let cont = |i: usize| (window[i] & 0x3F) as u32;
    let cp = match len {
        1 => lead as u32,
        2 => {
            let cp = ((lead as u32 & 0x1F) << 6) | cont(1);
            if cp < 0x80 {
                return None;
            }
            cp
        }
        3 => {
            let cp = ((lead as u32 & 0x0F) << 12) | (cont(1) << 6) | cont(2);
            if cp < 0x800 || (0xD800..0xE000).contains(&cp) {
                return None;
            }
            cp
        }
        _ => {
            let cp = ((lead as u32 & 0x07) << 18) | (cont(1) << 12) | (cont(2) << 6) | cont(3);
            if !(0x10000..0x110000).contains(&cp) {
                return None;
            }
            cp
        }
    };
    Some((cp, len))
}

/// Zs 类空白加上 TAB / LF / FF / CR。
///
/// 固定码点表，不依赖 `char::is_whitespace`（后者还包含 VT、NEL、行/段分隔符）。
pub(crate) fn is_unicode_space(cp: u32) -> bool {
    matches!(
        cp,
        0x09 | 0x0A | 0x0C | 0x0D | 0x20 | 0xA0 | 0x1680 | 0x2000..=0x200A | 0x202F | 0x205F | 0x3000
    )
}
