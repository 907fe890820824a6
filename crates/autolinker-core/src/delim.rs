//! 域名语法校验与链接尾部标点修剪
use crate::classify::{is_alnum, is_alpha};

/// 校验 `data` 开头是否像一个域名，返回域名字符（字母数字 / `-` / `.`）的长度，失败返回 0。
///
/// 首字节必须是字母数字。`require_dot` 为真时至少要见到一个 `.`。
pub(crate) fn validate_domain(data: &[u8], require_dot: bool) -> usize {
    match data.first() {
        Some(&b) if is_alnum(b) => {}
        _ => return 0,
    }

    let mut dots = 0usize;
    let mut i = 1;
    while i < data.len() {
        match data[i] {
            b'.' => dots += 1,
            b if is_alnum(b) || b == b'-' => {}
            _ => break,
        }
        i += 1;
    }

    if require_dot && dots == 0 {
        0
    } else {
        i
    }
}

/// 修剪候选链接 `link` 的尾部，返回保留的长度（0 表示什么都不剩）。
///
/// 1. 遇到 `<` 一律截断；
/// 2. 反复去掉尾部的 `?!.,:`；尾部为 `;` 时若前面是 `&name` 形式的实体则整体去掉；
/// 3. 尾字节为右括号或引号时，统计 `[0, end)` 内开闭符号数量，不相等则视为外部标点去掉。
pub(crate) fn trim_trailing_punctuation(link: &[u8]) -> usize {
    let mut end = link.iter().position(|&b| b == b'<').unwrap_or(link.len());

    while end > 0 {
        match link[end - 1] {
            b'?' | b'!' | b'.' | b',' | b':' => end -= 1,
            b';' => {
                if end < 2 {
                    end -= 1;
                    continue;
                }
                let mut probe = end - 2;
                while probe > 0 && is_alpha(link[probe]) {
                    probe -= 1;
                }
                if probe < end - 2 && link[probe] == b'&' {
                    end = probe;
                } else {
                    end -= 1;
                }
            }
            _ => break,
        }
    }

    if end == 0 {
        return 0;
    }

    let close = link[end - 1];
    let open = match close {
        b'"' => b'"',
        b'\'' => b'\'',
        b')' => b'(',
        b']' => b'[',
        b'}' => b'{',
        _ => return end,
    };

    let (mut opening, mut closing) = (0usize, 0usize);
    for &b in &link[..end] {
        if b == open {
            opening += 1;
        } else if b == close {
            closing += 1;
        }
    }
    // 引号的开闭符相同，只会计入 opening，因此尾部引号总是被去掉
    if opening != closing {
        end -= 1;
    }
    end
}
