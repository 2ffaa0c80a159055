//! 定时器封装模块

use gloo_timers::callback::Timeout;
use std::time::Duration;

/// 单次定时器
///
/// 被 drop 时自动取消；需要"发出后不管"时调用 `forget`。
pub struct Delay {
    inner: Timeout,
}

impl Delay {
    pub fn new<F>(after: Duration, callback: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        let millis = u32::try_from(after.as_millis()).unwrap_or(u32::MAX);
        Self {
            inner: Timeout::new(millis, callback),
        }
    }

    pub fn forget(self) {
        self.inner.forget();
    }
}
