//! 预配置的 API 客户端
//!
//! 所有后端调用都经过 `ApiClient::execute`：
//! 拼接地址、附加 `Authorization: Bearer <token>`、检查状态码、解析响应。
//! 携带令牌的请求被以认证失败状态拒绝时，会话按注销处理。

use std::rc::Rc;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::protocol::{
    ApiRequest, AuthenticateRequest, CancelEnrollmentRequest, EnrollRequest,
    FilterCoursesRequest, MyEnrollmentsRequest, RegisterRequest,
};
use crate::session::{SessionStorage, SessionStore};
use crate::transport::{HttpRequest, Transport};
use crate::{AuthResponse, Course, Enrollment, HEADER_AUTHORIZATION};

pub struct ApiClient<T, S> {
    config: ClientConfig,
    transport: T,
    session: SessionStore<S>,
    on_session_expired: Option<Rc<dyn Fn()>>,
}

impl<T: Transport, S: SessionStorage> ApiClient<T, S> {
    pub fn new(config: ClientConfig, transport: T, storage: S) -> Self {
        Self {
            config,
            transport,
            session: SessionStore::new(storage),
            on_session_expired: None,
        }
    }

    /// 会话因令牌被拒绝而清除后调用（用于驱动界面回到登录页）
    pub fn on_session_expired(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_session_expired = Some(Rc::new(callback));
        self
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.config.api_base_url, path)
        } else {
            format!("{}/{}", self.config.api_base_url, path)
        }
    }

    /// 发送请求并解析响应
    pub async fn execute<R: ApiRequest>(&self, request: &R) -> ClientResult<R::Response> {
        let path = request.path();
        let mut http = HttpRequest::new(&self.url(&path), R::METHOD).with_query(request.query());

        if let Some(body) = request
            .body()
            .map_err(|e| ClientError::from(e).in_op_with("api.encode", path.as_str()))?
        {
            http = http
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }

        let token = self.session.token();
        if let Some(token) = &token {
            http = http.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }

        log::debug!("{} {}", R::METHOD.as_str(), http.url);

        let response = self
            .transport
            .send(http)
            .await
            .map_err(|e| e.in_op_with("api.send", path.as_str()))?;

        if !response.is_success() {
            if token.is_some() && self.config.is_auth_failure(response.status) {
                self.expire_session(&path);
                return Err(ClientError::unauthorized("token rejected by server")
                    .with_response(response.status, response.body)
                    .in_op_with("api.execute", path));
            }
            return Err(
                ClientError::rejected(response.status, response.body).in_op_with("api.execute", path)
            );
        }

        R::parse_response(&response.body)
            .map_err(|e| ClientError::from(e).in_op_with("api.decode", path))
    }

    /// 与显式注销相同的状态转换
    fn expire_session(&self, path: &str) {
        log::warn!("Token rejected on {}, clearing session", path);
        self.session.clear();
        if let Some(callback) = &self.on_session_expired {
            callback();
        }
    }

    // =========================================================
    // 各接口的便捷方法
    // =========================================================

    pub async fn authenticate(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        self.execute(&AuthenticateRequest {
            username: email.to_string(),
            password: password.to_string(),
        })
        .await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<()> {
        self.execute(request).await
    }

    pub async fn filter_courses(&self, request: &FilterCoursesRequest) -> ClientResult<Vec<Course>> {
        self.execute(request).await
    }

    pub async fn enroll(&self, student_id: &str, course_codes: &[String]) -> ClientResult<String> {
        self.execute(&EnrollRequest {
            student_id: student_id.to_string(),
            course_codes: course_codes.to_vec(),
        })
        .await
    }

    pub async fn my_enrollments(&self) -> ClientResult<Vec<Enrollment>> {
        self.execute(&MyEnrollmentsRequest).await
    }

    pub async fn cancel_enrollment(&self, id: i64) -> ClientResult<String> {
        self.execute(&CancelEnrollmentRequest { id }).await
    }
}
