//! 调用方持有的输出缓冲区（只增不减，扩容失败以错误返回）
use crate::error::AutolinkError;

pub(crate) struct OutBuf<'a> {
    buf: &'a mut Vec<u8>,
}

impl<'a> OutBuf<'a> {
    pub(crate) fn new(buf: &'a mut Vec<u8>) -> Self {
        Self { buf }
    }

    /// 预留至少 `additional` 字节
    pub(crate) fn grow(&mut self, additional: usize) -> Result<(), AutolinkError> {
        self.buf.try_reserve(additional)?;
        Ok(())
    }

    pub(crate) fn put(&mut self, bytes: &[u8]) -> Result<(), AutolinkError> {
        self.grow(bytes.len())?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// 写入 `bytes`，其中 `escape` 返回 `Some` 的字节替换为对应实体
    pub(crate) fn put_escaped(
        &mut self,
        bytes: &[u8],
        escape: impl Fn(u8) -> Option<&'static [u8]>,
    ) -> Result<(), AutolinkError> {
        let mut org = 0;
        for (i, &b) in bytes.iter().enumerate() {
            if let Some(entity) = escape(b) {
                self.put(&bytes[org..i])?;
                self.put(entity)?;
                org = i + 1;
            }
        }
        self.put(&bytes[org..])
    }
}
