//! 我的选课：加载与取消
//!
//! 取消前必须经过确认；成功后重新拉取完整列表，而不是在本地修补。

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::messages;
use crate::session::SessionStorage;
use crate::transport::Transport;
use crate::Enrollment;

#[derive(Debug)]
pub enum CancelOutcome {
    /// 用户没有确认，未发出任何请求
    Declined,
    Canceled {
        /// 后端返回的提示消息
        message: String,
        /// 取消之后重新加载的列表
        refreshed: ClientResult<Vec<Enrollment>>,
    },
}

pub async fn load_enrollments<T, S>(api: &ApiClient<T, S>) -> ClientResult<Vec<Enrollment>>
where
    T: Transport,
    S: SessionStorage,
{
    api.my_enrollments()
        .await
        .map_err(|e| e.in_op("enrollments.load"))
}

/// 列表为空时展示的提示
pub fn empty_notice(enrollments: &[Enrollment]) -> Option<&'static str> {
    enrollments.is_empty().then_some(messages::NO_ENROLLMENTS)
}

/// 确认后取消选课，再按顺序重新加载列表
///
/// `confirm` 收到提示文案，返回用户是否确认。
/// `on_reload` 在取消成功、重新加载开始之前调用一次。
pub async fn cancel_enrollment<T, S, F, R>(
    api: &ApiClient<T, S>,
    id: i64,
    confirm: F,
    on_reload: R,
) -> ClientResult<CancelOutcome>
where
    T: Transport,
    S: SessionStorage,
    F: FnOnce(&str) -> bool,
    R: FnOnce(),
{
    if !confirm(messages::CANCEL_CONFIRM_PROMPT) {
        return Ok(CancelOutcome::Declined);
    }

    let message = api
        .cancel_enrollment(id)
        .await
        .map_err(|e| e.in_op_with("enrollments.cancel", id.to_string()))?;

    on_reload();
    let refreshed = load_enrollments(api).await;
    Ok(CancelOutcome::Canceled { message, refreshed })
}

#[cfg(test)]
mod tests;
