//! 路由定义模块 - 领域模型
//!
//! 纯粹的路由表与守卫逻辑，不依赖于 DOM 或 web_sys。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由，未知路径也落在这里)
    #[default]
    Login,
    Register,
    /// 课程列表与选课 (需要认证)
    Courses,
    /// 我的选课 (需要认证)
    Enrollments,
}

/// 守卫的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// 直接渲染目标路由
    Render(AppRoute),
    /// 改为跳转到另一个路由
    Redirect(AppRoute),
}

impl RouteDecision {
    /// 最终要显示的路由
    pub fn route(&self) -> AppRoute {
        match *self {
            RouteDecision::Render(route) | RouteDecision::Redirect(route) => route,
        }
    }
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/register" => Self::Register,
            "/" | "/courses" => Self::Courses,
            "/enrollments" => Self::Enrollments,
            _ => Self::Login,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Courses => "/courses",
            Self::Enrollments => "/enrollments",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Courses | Self::Enrollments)
    }

    /// 已认证用户访问登录页时直接进入课程列表
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Courses
    }

    /// 守卫：只看是否持有令牌，不区分"未登录"和"令牌过期"
    pub fn guard(self, is_authenticated: bool) -> RouteDecision {
        if self.requires_auth() && !is_authenticated {
            RouteDecision::Redirect(Self::auth_failure_redirect())
        } else if self.should_redirect_when_authenticated() && is_authenticated {
            RouteDecision::Redirect(Self::auth_success_redirect())
        } else {
            RouteDecision::Render(self)
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
