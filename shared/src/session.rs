//! 会话管理
//!
//! 会话（令牌 + 用户）只通过本模块读写：
//! - 启动时从持久化存储恢复 (`SessionStore::restore`)
//! - 登录成功后写入 (`login`)
//! - 注销或令牌被拒绝时清除 (`logout` / `SessionStore::clear`)
//!
//! 视图层只读取返回的 `Session` 快照，不直接修改存储。

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::messages;
use crate::protocol::RegisterRequest;
use crate::transport::Transport;
use crate::{AuthResponse, STORAGE_TOKEN_KEY, STORAGE_USER_KEY, User};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::rc::Rc;

// =========================================================
// 存储抽象
// =========================================================

/// 字符串键值存储（浏览器中对应 LocalStorage）
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    /// 写入成功返回 `true`
    fn set(&self, key: &str, value: &str) -> bool;
    /// 删除成功返回 `true`
    fn delete(&self, key: &str) -> bool;
}

/// 内存存储，克隆后共享同一份数据
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

#[cfg(test)]
impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }
}

// =========================================================
// 会话快照
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    /// 持有令牌即视为已认证，有效期由后端判断
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn display_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(messages::ANONYMOUS_USER)
    }

    pub fn student_id(&self) -> Option<&str> {
        self.user
            .as_ref()
            .map(|u| u.student_id.as_str())
            .filter(|id| !id.is_empty())
    }
}

// =========================================================
// 会话存储
// =========================================================

#[derive(Clone)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// 每次请求时重新读取令牌，而不是缓存在内存里
    pub fn token(&self) -> Option<String> {
        self.storage
            .get(STORAGE_TOKEN_KEY)
            .filter(|t| !t.is_empty())
    }

    /// 从持久化存储恢复会话
    ///
    /// 用户信息解析失败时只保留令牌。
    pub fn restore(&self) -> Session {
        let token = self.token();
        let user = token
            .as_ref()
            .and_then(|_| self.storage.get(STORAGE_USER_KEY))
            .and_then(|raw| match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    log::warn!("Stored user is unreadable, ignoring it: {}", e);
                    None
                }
            });
        Session { token, user }
    }

    pub fn persist(&self, auth: &AuthResponse) -> ClientResult<Session> {
        let user_json = serde_json::to_string(&auth.user)
            .map_err(|e| ClientError::from(e).in_op("session.persist"))?;

        if !self.storage.set(STORAGE_TOKEN_KEY, &auth.token)
            || !self.storage.set(STORAGE_USER_KEY, &user_json)
        {
            log::warn!("Session could not be written to storage; it will not survive a reload");
        }

        Ok(Session {
            token: Some(auth.token.clone()),
            user: Some(auth.user.clone()),
        })
    }

    pub fn clear(&self) {
        self.storage.delete(STORAGE_TOKEN_KEY);
        self.storage.delete(STORAGE_USER_KEY);
    }
}

// =========================================================
// 会话操作
// =========================================================

/// 登录并持久化令牌与用户
pub async fn login<T, S>(api: &ApiClient<T, S>, email: &str, password: &str) -> ClientResult<Session>
where
    T: Transport,
    S: SessionStorage,
{
    let auth = api
        .authenticate(email, password)
        .await
        .map_err(|e| e.in_op("session.login"))?;

    if auth.token.is_empty() {
        return Err(ClientError::serialization("authentication returned an empty token")
            .in_op("session.login"));
    }

    api.session().persist(&auth)
}

/// 注册新学生；两次密码不一致时不会发出请求
pub async fn register<T, S>(api: &ApiClient<T, S>, form: &RegistrationForm) -> ClientResult<()>
where
    T: Transport,
    S: SessionStorage,
{
    let request = form.validate()?;
    api.register(&request)
        .await
        .map_err(|e| e.in_op("session.register"))
}

/// 无条件清除会话，不通知后端
pub fn logout<S: SessionStorage>(store: &SessionStore<S>) -> Session {
    store.clear();
    Session::default()
}

// =========================================================
// 注册表单
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub lastname: String,
    pub student_id: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> ClientResult<RegisterRequest> {
        if self.password != self.password_confirm {
            return Err(ClientError::validation(messages::PASSWORD_MISMATCH));
        }
        Ok(RegisterRequest {
            name: self.name.clone(),
            lastname: self.lastname.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            student_id: self.student_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests;
