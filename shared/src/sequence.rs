//! 响应排序
//!
//! 每个发出的请求领取一个递增标签；响应返回时只有最新标签会被采用，
//! 迟到的旧响应直接丢弃，不会覆盖新结果。

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTag(u64);

#[derive(Debug, Clone, Default)]
pub struct ResponseSequencer {
    issued: u64,
}

impl ResponseSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestTag {
        self.issued += 1;
        RequestTag(self.issued)
    }

    pub fn is_latest(&self, tag: RequestTag) -> bool {
        tag.0 == self.issued
    }
}
