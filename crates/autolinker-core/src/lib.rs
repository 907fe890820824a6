//! 自动链接核心库
//!
//! 设计要点：
//! - 单遍、字节级扫描：只在触发字节（`w` `W` `:` `@` `<`）处尝试匹配，其余字节原样保留。
//! - 三类匹配器（裸 URL、`www.` 主机、邮箱）共享域名校验、尾部标点修剪与邮箱本地部分回退。
//! - `<` 处做尽力而为的标签跳过，已有链接与 `pre`/`code` 等块内不再链接。
//! - 每次调用的状态都在栈上，常量表只读，多线程并发调用无需加锁。
//! - 唯一的错误是输出缓冲区扩容失败；"不是链接"只是前进一个字节。

mod batch;
mod buffer;
mod classify;
mod config;
mod delim;
mod engine;
mod error;
mod html;
mod matchers;
mod options;
mod skip_tag;
mod types;

pub use batch::link_dir_and_write;
pub use config::{load_options, options_from_toml};
pub use engine::{auto_link, auto_link_with, autolink, autolink_into, autolink_with, LinkTextFn, Linked};
pub use error::AutolinkError;
pub use html::{tag_options, AttrValue};
pub use options::{AutolinkOptions, BatchOptions, BatchStats, LinkMode, LinkTextStyle, DEFAULT_SKIP_TAGS};
pub use types::ReportItem;
