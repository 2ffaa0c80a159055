//! 防抖器
//!
//! 每次输入都会替换待处理的值并把截止时间推迟一个窗口。
//! 调用方在输入时为返回的票据安排一个定时器，定时器到期后调用 `fire`：
//! 只有最后一次输入的票据、且已过截止时间时才会取出值。
//! 定时器比截止时间早到时，用 `remaining` 取得剩余时间重新安排。

use std::time::Duration;

use crate::date::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

#[derive(Debug, Clone)]
struct Pending<T> {
    ticket: DebounceTicket,
    value: T,
    deadline: Timestamp,
}

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    generation: u64,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: 0,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// 记录一次输入，之前的票据全部作废
    pub fn push(&mut self, value: T, now: Timestamp) -> DebounceTicket {
        self.generation += 1;
        let ticket = DebounceTicket(self.generation);
        self.pending = Some(Pending {
            ticket,
            value,
            deadline: now + self.window,
        });
        ticket
    }

    /// 定时器到期：票据仍是最新且已安静满一个窗口时取出值
    pub fn fire(&mut self, ticket: DebounceTicket, now: Timestamp) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|p| p.ticket == ticket && now >= p.deadline);
        if due {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }

    /// 票据仍是最新时距截止还剩多久；已到期为零，票据作废为 `None`
    pub fn remaining(&self, ticket: DebounceTicket, now: Timestamp) -> Option<Duration> {
        self.pending
            .as_ref()
            .filter(|p| p.ticket == ticket)
            .map(|p| p.deadline - now)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(300);

    fn at(ms: i64) -> Timestamp {
        Timestamp::new(ms)
    }

    #[test]
    fn test_single_input_fires_after_window() {
        let mut d = Debouncer::new(WINDOW);
        let t = d.push("a", at(0));
        assert_eq!(d.fire(t, at(299)), None);
        assert_eq!(d.fire(t, at(300)), Some("a"));
        // 已经取出，不会重复触发
        assert_eq!(d.fire(t, at(400)), None);
    }

    #[test]
    fn test_burst_collapses_to_last_value() {
        let mut d = Debouncer::new(WINDOW);
        let t1 = d.push("a", at(0));
        let t2 = d.push("al", at(100));
        let t3 = d.push("alg", at(200));

        // 每个定时器在各自输入后一个窗口到期
        let fired: Vec<_> = [(t1, 300), (t2, 400), (t3, 500)]
            .into_iter()
            .filter_map(|(t, ms)| d.fire(t, at(ms)))
            .collect();
        assert_eq!(fired, vec!["alg"]);
    }

    #[test]
    fn test_new_input_after_fire_starts_new_window() {
        let mut d = Debouncer::new(WINDOW);
        let t1 = d.push(1, at(0));
        assert_eq!(d.fire(t1, at(300)), Some(1));
        let t2 = d.push(2, at(1_000));
        assert_eq!(d.fire(t2, at(1_200)), None);
        assert_eq!(d.fire(t2, at(1_300)), Some(2));
    }

    #[test]
    fn test_early_timer_reports_remaining_time() {
        let mut d = Debouncer::new(WINDOW);
        let t = d.push("redes", at(1_000));

        assert_eq!(d.fire(t, at(1_299)), None);
        assert_eq!(d.remaining(t, at(1_299)), Some(Duration::from_millis(1)));
        assert_eq!(d.fire(t, at(1_300)), Some("redes"));
        assert_eq!(d.remaining(t, at(1_300)), None);
    }

    #[test]
    fn test_superseded_ticket_has_no_remaining_time() {
        let mut d = Debouncer::new(WINDOW);
        let old = d.push(1, at(0));
        let new = d.push(2, at(100));
        assert_eq!(d.remaining(old, at(250)), None);
        assert_eq!(d.remaining(new, at(250)), Some(Duration::from_millis(150)));
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut d = Debouncer::new(WINDOW);
        let t = d.push(1, at(0));
        d.cancel();
        assert_eq!(d.fire(t, at(1_000)), None);
    }
}
