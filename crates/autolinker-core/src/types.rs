//! 公共类型（对外暴露）
use serde::Serialize;

/// 批处理报告的单个元素（对应 report.json 的一项）
#[derive(Debug, Clone, Serialize)]
pub struct ReportItem<'a> {
    pub file: &'a str,
    pub links: usize,
    pub bytes_in: usize,
    pub bytes_out: usize,
}
