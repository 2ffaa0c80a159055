//! 后端 REST 接口定义
//!
//! 每个请求类型声明自己的方法、路径、查询参数、请求体以及响应解析方式，
//! `ApiClient::execute` 只负责发送与错误处理。

use crate::{AuthResponse, Course, Enrollment};
use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// The URL path, path parameters already substituted.
    fn path(&self) -> String;

    fn query(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// JSON request body, if any.
    fn body(&self) -> serde_json::Result<Option<String>> {
        Ok(None)
    }

    fn parse_response(body: &str) -> serde_json::Result<Self::Response>;
}

/// 纯文本响应（后端以 `ResponseEntity<String>` 返回的提示消息）
///
/// 若响应恰好是 JSON 字符串字面量则取其内容，否则原样返回。
pub fn text_message(body: &str) -> String {
    match serde_json::from_str::<String>(body) {
        Ok(s) => s,
        Err(_) => body.to_string(),
    }
}

// =========================================================
// Request Definitions
// =========================================================

/// 登录：邮箱作为 username 提交
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticateRequest {
    pub username: String,
    pub password: String,
}

impl ApiRequest for AuthenticateRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/v1/authenticate".to_string()
    }

    fn body(&self) -> serde_json::Result<Option<String>> {
        serde_json::to_string(self).map(Some)
    }

    fn parse_response(body: &str) -> serde_json::Result<Self::Response> {
        serde_json::from_str(body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub student_id: String,
}

impl ApiRequest for RegisterRequest {
    // 只关心成功与否
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/v1/register".to_string()
    }

    fn body(&self) -> serde_json::Result<Option<String>> {
        serde_json::to_string(self).map(Some)
    }

    fn parse_response(_body: &str) -> serde_json::Result<Self::Response> {
        Ok(())
    }
}

/// 按名称/时段筛选课程，空条件不出现在查询串中
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCoursesRequest {
    pub name: Option<String>,
    pub shift: Option<String>,
}

impl ApiRequest for FilterCoursesRequest {
    type Response = Vec<Course>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/v1/courses/filter".to_string()
    }

    fn query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(name) = &self.name {
            query.push(("name".to_string(), name.clone()));
        }
        if let Some(shift) = &self.shift {
            query.push(("shift".to_string(), shift.clone()));
        }
        query
    }

    fn parse_response(body: &str) -> serde_json::Result<Self::Response> {
        serde_json::from_str(body)
    }
}

/// 以学号为路径参数提交选课，请求体是课程代码数组
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollRequest {
    pub student_id: String,
    pub course_codes: Vec<String>,
}

impl ApiRequest for EnrollRequest {
    type Response = String;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/enrollments/enroll/{}", self.student_id)
    }

    fn body(&self) -> serde_json::Result<Option<String>> {
        serde_json::to_string(&self.course_codes).map(Some)
    }

    fn parse_response(body: &str) -> serde_json::Result<Self::Response> {
        Ok(text_message(body))
    }
}

/// 当前学期我的选课（学生身份由令牌确定）
#[derive(Debug, Clone, Copy, Default)]
pub struct MyEnrollmentsRequest;

impl ApiRequest for MyEnrollmentsRequest {
    type Response = Vec<Enrollment>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/enrollments/my-courses".to_string()
    }

    fn parse_response(body: &str) -> serde_json::Result<Self::Response> {
        serde_json::from_str(body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelEnrollmentRequest {
    pub id: i64,
}

impl ApiRequest for CancelEnrollmentRequest {
    type Response = String;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/v1/enrollments/{}/cancel", self.id)
    }

    fn parse_response(body: &str) -> serde_json::Result<Self::Response> {
        Ok(text_message(body))
    }
}
