//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。

use crate::web::{BrowserStorage, GlooTransport};
use leptos::prelude::*;
use matricula_shared::session::{self, RegistrationForm};
use matricula_shared::{ApiClient, ClientConfig, Session, SessionStore};

/// 浏览器环境下的 API 客户端
pub type BrowserApi = ApiClient<GlooTransport, BrowserStorage>;

/// 认证上下文
///
/// `session` 是会话的内存快照，只由本模块写入；持久化部分在 LocalStorage。
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: RwSignal<Session>,
    config: StoredValue<ClientConfig>,
}

impl AuthContext {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            session: RwSignal::new(Session::default()),
            config: StoredValue::new(config),
        }
    }

    /// 当前会话（只读）
    pub fn session(&self) -> Signal<Session> {
        self.session.into()
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(Session::is_authenticated))
    }

    pub fn config(&self) -> ClientConfig {
        self.config.get_value()
    }

    /// 创建 API 客户端
    ///
    /// 令牌在每次请求时从存储读取；令牌被拒绝时清空内存会话，路由随之跳回登录页。
    pub fn api(&self) -> BrowserApi {
        let session = self.session;
        ApiClient::new(self.config(), GlooTransport, BrowserStorage).on_session_expired(move || {
            log::warn!("Session rejected by the server, signing out");
            session.set(Session::default());
        })
    }

    fn store(&self) -> SessionStore<BrowserStorage> {
        SessionStore::new(BrowserStorage)
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// 初始化认证状态：从 LocalStorage 恢复上次的会话
pub fn init_auth(ctx: &AuthContext) {
    let restored = ctx.store().restore();
    if restored.is_authenticated() {
        log::info!("Session restored for {}", restored.display_name());
    }
    ctx.session.set(restored);
}

/// 登录并保存状态
///
/// # Returns
/// 登录是否成功；失败原因只写入日志
pub async fn login(ctx: &AuthContext, email: String, password: String) -> bool {
    match session::login(&ctx.api(), &email, &password).await {
        Ok(session) => {
            ctx.session.set(session);
            true
        }
        Err(e) => {
            log::error!("Login failed: {}", e);
            false
        }
    }
}

/// 注册新账号
///
/// # Returns
/// 注册是否成功；失败原因只写入日志，界面只展示通用提示
pub async fn register(ctx: &AuthContext, form: RegistrationForm) -> bool {
    match session::register(&ctx.api(), &form).await {
        Ok(()) => true,
        Err(e) => {
            log::error!("Registration failed: {}", e);
            false
        }
    }
}

/// 注销并清除状态
///
/// 导航将由路由服务的认证状态监听自动处理。
pub fn logout(ctx: &AuthContext) {
    ctx.session.set(session::logout(&ctx.store()));
}
