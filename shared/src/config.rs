//! 客户端配置
//!
//! 后端地址等参数只能在构建时通过环境变量覆盖（`option_env!`），
//! 运行时不读取任何外部配置。

use std::time::Duration;

// =========================================================
// 默认值
// =========================================================

/// 构建时未设置对应环境变量时使用这些值
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_FILTER_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_AUTH_FAILURE_STATUSES: &[u16] = &[401];

pub const ENV_API_BASE_URL: &str = "MATRICULA_API_BASE_URL";
pub const ENV_FILTER_DEBOUNCE_MS: &str = "MATRICULA_FILTER_DEBOUNCE_MS";
pub const ENV_AUTH_FAILURE_STATUSES: &str = "MATRICULA_AUTH_FAILURE_STATUSES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// 后端根地址，不带末尾 `/`
    pub api_base_url: String,
    /// 筛选输入的防抖窗口
    pub filter_debounce: Duration,
    /// 携带令牌的请求返回这些状态码时视为会话失效
    pub auth_failure_statuses: Vec<u16>,
}

impl ClientConfig {
    /// 读取构建时注入的环境变量
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| match key {
            ENV_API_BASE_URL => option_env!("MATRICULA_API_BASE_URL"),
            ENV_FILTER_DEBOUNCE_MS => option_env!("MATRICULA_FILTER_DEBOUNCE_MS"),
            ENV_AUTH_FAILURE_STATUSES => option_env!("MATRICULA_AUTH_FAILURE_STATUSES"),
            _ => None,
        })
    }

    /// 通过查找函数解析配置，取不到或解析失败就用默认值
    pub fn from_lookup<'a, F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let api_base_url = lookup(ENV_API_BASE_URL)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL);

        let debounce_ms = lookup(ENV_FILTER_DEBOUNCE_MS)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_FILTER_DEBOUNCE_MS);

        let auth_failure_statuses = lookup(ENV_AUTH_FAILURE_STATUSES)
            .map(|v| {
                v.split(',')
                    .filter_map(|s| s.trim().parse::<u16>().ok())
                    .collect::<Vec<_>>()
            })
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| DEFAULT_AUTH_FAILURE_STATUSES.to_vec());

        Self::default()
            .with_base_url(api_base_url)
            .with_filter_debounce(Duration::from_millis(debounce_ms))
            .with_auth_failure_statuses(auth_failure_statuses)
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.api_base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_filter_debounce(mut self, window: Duration) -> Self {
        self.filter_debounce = window;
        self
    }

    pub fn with_auth_failure_statuses(mut self, statuses: Vec<u16>) -> Self {
        self.auth_failure_statuses = statuses;
        self
    }

    pub fn is_auth_failure(&self, status: u16) -> bool {
        self.auth_failure_statuses.contains(&status)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            filter_debounce: Duration::from_millis(DEFAULT_FILTER_DEBOUNCE_MS),
            auth_failure_statuses: DEFAULT_AUTH_FAILURE_STATUSES.to_vec(),
        }
    }
}
