use std::fmt;

// =========================================================
// 错误状态枚举
// =========================================================

/// 错误状态枚举
///
/// 分类是扁平的：`Validation` 是本地校验错误，其余都是请求错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorStatus {
    /// 本地校验失败（未选课程、两次密码不一致），不会发出请求
    Validation,
    /// 后端拒绝了令牌，会话随之失效
    Unauthorized,
    /// 后端返回非 2xx
    Rejected,
    /// 请求未能到达后端
    Network,
    /// JSON 编解码失败
    Serialization,
}

impl ClientErrorStatus {
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientErrorStatus::Validation => "VALIDATION",
            ClientErrorStatus::Unauthorized => "UNAUTHORIZED",
            ClientErrorStatus::Rejected => "REQUEST_REJECTED",
            ClientErrorStatus::Network => "NETWORK_ERROR",
            ClientErrorStatus::Serialization => "JSON_PARSE_ERROR",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientErrorStatus::Validation)
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSpan {
    /// 操作名称，如 "api.send", "session.login"
    pub operation: String,
    /// 额外的细节信息，如请求路径
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 客户端错误
///
/// - status: 错误类型
/// - message: 内部描述（写日志用）
/// - response: 被拒绝请求的状态码和响应体，用于提取展示文案
/// - source: 原始错误（可选）
/// - spans: 结构化的调用追踪栈
#[derive(Debug)]
pub struct ClientError {
    pub status: ClientErrorStatus,
    pub message: String,
    response: Option<(u16, String)>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
    spans: Vec<ErrorSpan>,
}

impl ClientError {
    pub fn new(status: ClientErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            response: None,
            source: None,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ClientErrorStatus::Validation, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ClientErrorStatus::Unauthorized, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ClientErrorStatus::Network, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ClientErrorStatus::Serialization, message)
    }

    /// 后端以非 2xx 状态拒绝了请求
    pub fn rejected(status_code: u16, body: impl Into<String>) -> Self {
        Self::new(ClientErrorStatus::Rejected, format!("HTTP {}", status_code))
            .with_response(status_code, body)
    }

    // --- Context builders (Builder Pattern) ---

    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn with_response(mut self, status_code: u16, body: impl Into<String>) -> Self {
        self.response = Some((status_code, body.into()));
        self
    }

    // --- Accessors ---

    pub fn error_code(&self) -> &'static str {
        self.status.error_code()
    }

    pub fn is_validation(&self) -> bool {
        self.status.is_validation()
    }

    /// 被拒绝请求的 HTTP 状态码
    #[cfg(test)]
    pub fn http_status(&self) -> Option<u16> {
        self.response.as_ref().map(|(status, _)| *status)
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }

    /// 面向用户的错误文案
    ///
    /// 校验错误直接展示自身消息；请求错误先尝试从响应体中提取，
    /// 提取不到时使用调用点给出的默认文案。
    pub fn display_message(&self, fallback: &str) -> String {
        if self.is_validation() {
            return self.message.clone();
        }
        self.response
            .as_ref()
            .and_then(|(_, body)| extract_error_message(body))
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// 从失败响应体中提取可读消息
///
/// 1. JSON 对象且带非空 `message` 字段 → 该字段
/// 2. 纯字符串（非 JSON 文本或 JSON 字符串字面量）且非空 → 该字符串
/// 3. 其他情况 → `None`
pub fn extract_error_message(body: &str) -> Option<String> {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => map
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .map(str::to_owned),
        Ok(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Ok(_) => None,
        Err(_) if !body.trim().is_empty() => Some(body.to_string()),
        Err(_) => None,
    }
}

// =========================================================
// Display & Error trait 实现
// =========================================================

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

// =========================================================
// 类型转换实现
// =========================================================

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::serialization(e.to_string()).with_source(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_body_message_wins() {
        let err = ClientError::rejected(400, r#"{"message":"Sem vagas disponíveis","status":400}"#);
        assert_eq!(err.display_message("default"), "Sem vagas disponíveis");
        assert_eq!(err.http_status(), Some(400));
    }

    #[test]
    fn test_plain_text_body_is_shown() {
        let err = ClientError::rejected(400, "Student not found");
        assert_eq!(err.display_message("default"), "Student not found");
    }

    #[test]
    fn test_falls_back_to_call_site_default() {
        for body in ["", "   ", "{}", r#"{"message":""}"#, r#"{"error":"x"}"#, "[1,2]", "42"] {
            let err = ClientError::rejected(500, body);
            assert_eq!(err.display_message("Erro ao cancelar matrícula."), "Erro ao cancelar matrícula.", "body: {body:?}");
        }
        assert_eq!(ClientError::network("offline").display_message("fallback"), "fallback");
    }

    #[test]
    fn test_validation_shows_own_message() {
        let err = ClientError::validation("As senhas não conferem.");
        assert!(err.is_validation());
        assert_eq!(err.display_message("ignored"), "As senhas não conferem.");
    }

    #[test]
    fn test_display_includes_trace() {
        let err = ClientError::network("connection refused")
            .in_op_with("api.send", "/enrollments/my-courses")
            .in_op("enrollments.load");
        assert_eq!(
            err.to_string(),
            "[NETWORK_ERROR] connection refused | trace: api.send(/enrollments/my-courses) -> enrollments.load"
        );
    }

    #[test]
    fn test_serde_error_keeps_source() {
        let e = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let err = ClientError::from(e);
        assert_eq!(err.status, ClientErrorStatus::Serialization);
        assert!(std::error::Error::source(&err).is_some());
    }
}
