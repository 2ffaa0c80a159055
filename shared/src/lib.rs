//! 选课客户端核心
//!
//! 与平台无关的领域模型、请求协议和交互流程。
//! 浏览器相关的适配（fetch、LocalStorage、定时器）由 `matricula-frontend` 注入。

use serde::{Deserialize, Serialize};

pub mod api;
pub mod config;
pub mod courses;
pub mod date;
pub mod debounce;
pub mod enrollments;
pub mod error;
pub mod messages;
pub mod protocol;
pub mod route;
pub mod sequence;
pub mod session;
pub mod transport;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientErrorStatus, ClientResult};
pub use session::{Session, SessionStorage, SessionStore};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const STORAGE_TOKEN_KEY: &str = "authToken";
pub const STORAGE_USER_KEY: &str = "authUser";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 认证接口返回的用户信息
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    /// 学号 (RA)，选课接口以它为路径参数
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default)]
    pub id: Option<i64>,
    pub code: String,
    pub name: String,
    pub credits: u32,
    pub available_seats: i32,
    #[serde(default)]
    pub shift: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub course: Course,
    #[serde(default)]
    pub canceled: bool,
}

impl Enrollment {
    pub fn status_label(&self) -> &'static str {
        if self.canceled { "Cancelada" } else { "Ativa" }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}
