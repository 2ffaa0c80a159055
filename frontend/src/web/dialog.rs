//! 浏览器原生对话框

/// `window.confirm`；无法弹出时视为未确认
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
