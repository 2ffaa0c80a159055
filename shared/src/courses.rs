//! 课程列表与选课提交
//!
//! - `CourseSearch`: 筛选条件经防抖后才触发查询，响应按标签排序
//! - `Selection`: 待提交的课程代码集合
//! - `submit_enrollment`: 空选择和缺少学号只做本地校验，不请求后端

use std::time::Duration;

use crate::api::ApiClient;
use crate::date::Timestamp;
use crate::debounce::{DebounceTicket, Debouncer};
use crate::error::{ClientError, ClientResult};
use crate::messages;
use crate::protocol::FilterCoursesRequest;
use crate::sequence::{RequestTag, ResponseSequencer};
use crate::session::{Session, SessionStorage};
use crate::transport::Transport;
use crate::Course;

// =========================================================
// 筛选条件
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub name: String,
    pub shift: String,
}

impl CourseFilter {
    /// 空字符串的条件不参与筛选
    pub fn to_request(&self) -> FilterCoursesRequest {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        FilterCoursesRequest {
            name: non_empty(&self.name),
            shift: non_empty(&self.shift),
        }
    }
}

/// 筛选查询的调度状态
///
/// 输入先经过防抖，真正发出的查询再领取排序标签。
#[derive(Debug, Clone)]
pub struct CourseSearch {
    debouncer: Debouncer<CourseFilter>,
    sequencer: ResponseSequencer,
}

impl CourseSearch {
    pub fn new(debounce_window: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(debounce_window),
            sequencer: ResponseSequencer::new(),
        }
    }

    pub fn debounce_window(&self) -> Duration {
        self.debouncer.window()
    }

    /// 立即查询（页面挂载时的首次加载）
    pub fn begin(&mut self, filter: CourseFilter) -> (RequestTag, CourseFilter) {
        self.debouncer.cancel();
        (self.sequencer.issue(), filter)
    }

    /// 记录一次筛选输入
    pub fn edit(&mut self, filter: CourseFilter, now: Timestamp) -> DebounceTicket {
        self.debouncer.push(filter, now)
    }

    /// 定时器到期时调用；返回需要发出的查询
    pub fn settle(&mut self, ticket: DebounceTicket, now: Timestamp) -> Option<(RequestTag, CourseFilter)> {
        let filter = self.debouncer.fire(ticket, now)?;
        Some((self.sequencer.issue(), filter))
    }

    /// 定时器早到时还需等待多久；输入已被覆盖或已发出时为 `None`
    pub fn remaining(&self, ticket: DebounceTicket, now: Timestamp) -> Option<Duration> {
        self.debouncer.remaining(ticket, now)
    }

    /// 响应是否仍然有效（没有更新的查询发出过）
    pub fn accept(&self, tag: RequestTag) -> bool {
        let latest = self.sequencer.is_latest(tag);
        if !latest {
            log::debug!("Discarding stale course list response {:?}", tag);
        }
        latest
    }
}

// =========================================================
// 选择集合
// =========================================================

/// 按勾选顺序保存的课程代码集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    codes: Vec<String>,
}

impl Selection {
    pub fn toggle(&mut self, code: &str) {
        if let Some(pos) = self.codes.iter().position(|c| c == code) {
            self.codes.remove(pos);
        } else {
            self.codes.push(code.to_string());
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn clear(&mut self) {
        self.codes.clear();
    }
}

// =========================================================
// 操作
// =========================================================

pub async fn load_courses<T, S>(api: &ApiClient<T, S>, filter: &CourseFilter) -> ClientResult<Vec<Course>>
where
    T: Transport,
    S: SessionStorage,
{
    api.filter_courses(&filter.to_request())
        .await
        .map_err(|e| e.in_op("courses.load"))
}

/// 提交选课，返回后端的提示消息
///
/// 成功后由调用方清空选择；课程列表不会重新加载。
pub async fn submit_enrollment<T, S>(
    api: &ApiClient<T, S>,
    session: &Session,
    selection: &Selection,
) -> ClientResult<String>
where
    T: Transport,
    S: SessionStorage,
{
    if selection.is_empty() {
        return Err(ClientError::validation(messages::EMPTY_SELECTION));
    }
    let student_id = session
        .student_id()
        .ok_or_else(|| ClientError::validation(messages::SESSION_MISSING).in_op("courses.enroll"))?;

    api.enroll(student_id, selection.codes())
        .await
        .map_err(|e| e.in_op_with("courses.enroll", student_id))
}

#[cfg(test)]
mod tests;
