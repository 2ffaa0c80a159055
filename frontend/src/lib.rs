//! 选课前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `matricula_shared`: 领域模型、会话、请求与交互流程（平台无关）
//! - `web`: 浏览器适配（fetch、LocalStorage、定时器、History 路由）
//! - `auth`: 会话状态管理
//! - `components`: UI 组件层

mod auth;
mod components {
    pub mod courses;
    pub mod enrollments;
    pub mod login;
    pub mod navigation;
    pub mod register;
}
pub(crate) mod web;

use crate::auth::{AuthContext, init_auth};
use crate::components::courses::CoursesPage;
use crate::components::enrollments::EnrollmentsPage;
use crate::components::login::LoginPage;
use crate::components::navigation::Navigation;
use crate::components::register::RegisterPage;

use leptos::prelude::*;
use matricula_shared::ClientConfig;
use matricula_shared::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件；守卫已在路由服务中完成。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Courses => view! { <CoursesPage /> }.into_any(),
        AppRoute::Enrollments => view! { <EnrollmentsPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文（配置在构建时确定）
    let config = ClientConfig::from_build_env();
    log::info!("API base URL: {}", config.api_base_url);
    let auth_ctx = AuthContext::new(config);
    provide_context(auth_ctx);

    // 2. 从 LocalStorage 恢复会话，必须早于路由守卫
    init_auth(&auth_ctx);

    // 3. 获取认证状态信号，用于注入路由服务
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <div class="min-h-screen bg-base-200 font-sans">
                <Navigation />
                <RouterOutlet matcher=route_matcher />
            </div>
        </Router>
    }
}
