//! API 网关客户端模块
//!
//! 唯一的 HTTP 出口：以基础地址配置一次，所有资源服务共用。
//! 请求阶段从会话上下文读取令牌并附加 Bearer 头（缺失则匿名发送）；
//! 响应阶段遇到 401 先清空会话（迫使路由守卫在下次导航时重定向），
//! 再把失败抛给调用方。其余非 2xx 与网络故障原样分类透传，
//! 不做任何重试。

use frontdesk_shared::{ApiError, ApiResult};
use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::prelude::use_context;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::session::SessionContext;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(base_url: String, session: SessionContext) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url, session }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 附加认证头（有令牌才附加）
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    // =========================================================
    // 动词调用 (Verb Calls)
    // =========================================================

    /// GET，附带查询参数
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> ApiResult<T> {
        let builder = self
            .authorize(Request::get(&self.url(path)))
            .query(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        let response = builder.send().await.map_err(transport_error)?;
        self.decode(response).await
    }

    /// POST JSON 请求体
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let request = self
            .authorize(Request::post(&self.url(path)))
            .json(body)
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let response = request.send().await.map_err(transport_error)?;
        self.decode(response).await
    }

    /// 无请求体的 POST（动作子路径）
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self
            .authorize(Request::post(&self.url(path)))
            .send()
            .await
            .map_err(transport_error)?;
        self.decode(response).await
    }

    /// PATCH JSON 请求体（部分更新语义）
    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let request = self
            .authorize(Request::patch(&self.url(path)))
            .json(body)
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let response = request.send().await.map_err(transport_error)?;
        self.decode(response).await
    }

    /// DELETE，成功时为 204 无响应体
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let response = self
            .authorize(Request::delete(&self.url(path)))
            .send()
            .await
            .map_err(transport_error)?;
        if response.ok() {
            return Ok(());
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(self.fail(status, &body))
    }

    // =========================================================
    // 响应阶段 (Response Phase)
    // =========================================================

    async fn decode<T: DeserializeOwned>(&self, response: Response) -> ApiResult<T> {
        if response.ok() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()));
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(self.fail(status, &body))
    }

    /// 非 2xx 响应的统一出口
    ///
    /// 401 的本地恢复动作（清空会话）发生在这里，之后失败照常
    /// 抛给调用方，由其决定如何呈现。
    fn fail(&self, status: u16, body: &str) -> ApiError {
        let error = ApiError::from_response(status, body);
        if error.is_unauthorized() {
            self.session.clear();
        }
        error
    }
}

/// 取出应用根注入的客户端
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>().expect("ApiClient should be provided at the app root")
}

/// 传输层错误分类：未收到响应视为连接失败，其余为请求构建失败
fn transport_error(error: gloo_net::Error) -> ApiError {
    match error {
        gloo_net::Error::JsError(e) => ApiError::Network(e.to_string()),
        other => ApiError::Request(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontdesk_shared::{Role, UserProfile};

    fn authenticated_client() -> ApiClient {
        let session = SessionContext::new();
        session.set(
            "token".to_string(),
            UserProfile {
                id: 1,
                username: "staff".to_string(),
                role: Role::FrontDesk,
            },
        );
        ApiClient::new("http://backend/api/".to_string(), session)
    }

    #[test]
    fn test_url_joining_normalizes_slashes() {
        let client = authenticated_client();
        assert_eq!(
            client.url("/reservations/"),
            "http://backend/api/reservations/"
        );
        assert_eq!(
            client.url("reservations/"),
            "http://backend/api/reservations/"
        );
    }

    // =========================================================
    // 401 会话清空测试
    // =========================================================

    #[test]
    fn test_401_empties_session_whatever_the_call() {
        let client = authenticated_client();
        assert!(client.session.token().is_some());

        let error = client.fail(401, r#"{"detail": "Token is expired"}"#);
        assert!(error.is_unauthorized());
        assert!(client.session.token().is_none());
        assert!(client.session.user().is_none());
    }

    #[test]
    fn test_other_failures_leave_session_intact() {
        let client = authenticated_client();
        let error = client.fail(400, r#"{"status": ["Invalid transition"]}"#);
        assert!(!error.is_unauthorized());
        assert!(client.session.token().is_some());

        let error = client.fail(500, "boom");
        assert!(!error.is_unauthorized());
        assert!(client.session.token().is_some());
    }
}
