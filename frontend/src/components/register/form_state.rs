//! 表单状态管理模块
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 数据的持有
//! - 数据的重置
//! - 数据到注册表单的转换与本地校验

use leptos::prelude::*;
use matricula_shared::session::RegistrationForm;
use matricula_shared::messages;

/// 注册表单状态
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，非常适合在闭包间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub name: RwSignal<String>,
    pub lastname: RwSignal<String>,
    /// 学号 (RA)
    pub student_id: RwSignal<String>,
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub password_confirm: RwSignal<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            lastname: RwSignal::new(String::new()),
            student_id: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            password_confirm: RwSignal::new(String::new()),
        }
    }

    /// 重置表单到初始状态
    pub fn reset(&self) {
        for field in [
            self.name,
            self.lastname,
            self.student_id,
            self.email,
            self.password,
            self.password_confirm,
        ] {
            field.set(String::new());
        }
    }

    /// 转换为核心层的注册表单（校验在核心层完成）
    pub fn to_form(&self) -> RegistrationForm {
        RegistrationForm {
            name: self.name.get_untracked(),
            lastname: self.lastname.get_untracked(),
            student_id: self.student_id.get_untracked(),
            email: self.email.get_untracked(),
            password: self.password.get_untracked(),
            password_confirm: self.password_confirm.get_untracked(),
        }
    }
}

impl FormState {
    /// 提交前的本地校验，失败时返回要展示的文案
    pub fn validate(&self) -> Result<RegistrationForm, String> {
        let form = self.to_form();
        match form.validate() {
            Ok(_) => Ok(form),
            Err(e) => Err(e.display_message(messages::REGISTER_FAILED)),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(password: &str, confirm: &str) -> FormState {
        let state = FormState::new();
        state.name.set("Ana".into());
        state.lastname.set("Souza".into());
        state.student_id.set("SP3012345".into());
        state.email.set("ana@ifsp.edu.br".into());
        state.password.set(password.into());
        state.password_confirm.set(confirm.into());
        state
    }

    #[test]
    fn test_mismatched_passwords_report_local_message() {
        let state = filled("secret", "secreT");
        assert_eq!(state.validate().unwrap_err(), "As senhas não conferem.");
    }

    #[test]
    fn test_valid_form_converts_to_registration() {
        let form = filled("secret", "secret").validate().unwrap();
        assert_eq!(form.student_id, "SP3012345");
        assert_eq!(form.password_confirm, "secret");
    }

    #[test]
    fn test_reset_clears_every_field() {
        let state = filled("secret", "secret");
        state.reset();
        assert_eq!(state.to_form(), RegistrationForm::default());
    }
}
