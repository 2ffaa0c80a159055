//! HTTP 传输实现
//!
//! 使用 `gloo-net` 把核心层的 `HttpRequest` 转成浏览器 fetch 请求。

use async_trait::async_trait;
use gloo_net::http::{Method, RequestBuilder};
use matricula_shared::protocol::HttpMethod;
use matricula_shared::transport::{HttpRequest, HttpResponse, Transport};
use matricula_shared::{ClientError, ClientResult};

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// 浏览器 fetch 传输
#[derive(Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let mut builder = RequestBuilder::new(&req.url).method(to_method(req.method));
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }
        if !req.query.is_empty() {
            builder = builder.query(req.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ClientError::network(format!("请求构建失败: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::network(format!("网络错误: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::network(format!("响应读取失败: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}
