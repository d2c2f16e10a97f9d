//! 认证流程模块
//!
//! 用用户名/密码换取访问令牌，解码其内嵌 claims（仅展示用，
//! 不做签名校验）构建用户档案，写入会话存储。登出只清空客户端
//! 会话，不做服务端失效（无状态令牌）。

use frontdesk_shared::{
    ApiError, ApiResult, LoginRequest, TokenPair, UserProfile, decode_claims,
};

use crate::api::ApiClient;
use crate::session::SessionContext;

/// 令牌签发端点（SimpleJWT）
const TOKEN_PATH: &str = "/token/";

/// 从签发响应中取出访问令牌
///
/// 2xx 却缺少（或为空串）访问令牌的响应按解码失败处理，
/// 标记为 "login failed"。
fn token_from_pair(pair: TokenPair) -> ApiResult<String> {
    match pair.access {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(ApiError::Decode("login failed".to_string())),
    }
}

/// 登录
///
/// 成功时会话已持有令牌与档案，返回档案供调用方立即使用。
/// 后端拒绝凭证时，失败消息为后端的 `detail` 原文；响应缺少
/// 访问令牌时报 "login failed"。两种失败都保证会话保持为空。
pub async fn login(
    api: &ApiClient,
    session: &SessionContext,
    username: String,
    password: String,
) -> ApiResult<UserProfile> {
    let request = LoginRequest { username, password };
    let pair: TokenPair = api.post(TOKEN_PATH, &request).await?;
    let token = token_from_pair(pair)?;

    // 展示用解码：缺失的 claim 回退默认值，有效性仍由后端裁决
    let claims = decode_claims(&token).unwrap_or_default();
    let profile = UserProfile::from_claims(&claims);

    session.set(token, profile.clone());
    Ok(profile)
}

/// 登出：仅清空客户端会话
///
/// 路由服务监听认证状态变化并自动重定向，这里不做导航。
pub fn logout(session: &SessionContext) {
    session.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================
    // 令牌提取测试
    // =========================================================

    #[test]
    fn test_missing_access_token_is_login_failed() {
        // 登录在会话写入之前就已失败，会话保持为空
        let pair = TokenPair {
            access: None,
            refresh: None,
        };
        let err = token_from_pair(pair).unwrap_err();
        assert_eq!(err, ApiError::Decode("login failed".to_string()));
    }

    #[test]
    fn test_empty_access_token_is_login_failed() {
        let pair = TokenPair {
            access: Some(String::new()),
            refresh: Some("refresh".to_string()),
        };
        let err = token_from_pair(pair).unwrap_err();
        assert_eq!(err, ApiError::Decode("login failed".to_string()));
    }

    #[test]
    fn test_present_access_token_passes_through() {
        let pair = TokenPair {
            access: Some("header.payload.sig".to_string()),
            refresh: None,
        };
        assert_eq!(token_from_pair(pair).unwrap(), "header.payload.sig");
    }

    #[test]
    fn test_logout_clears_session() {
        let session = SessionContext::new();
        session.set(
            "token".to_string(),
            UserProfile {
                id: 1,
                username: "staff".to_string(),
                role: frontdesk_shared::Role::Admin,
            },
        );
        logout(&session);
        assert!(session.token().is_none());
        assert!(session.user().is_none());
    }
}
