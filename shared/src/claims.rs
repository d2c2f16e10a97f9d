//! JWT 载荷解码模块（仅用于展示）
//!
//! 解码不做任何签名校验：令牌有效性的唯一权威是后端，
//! 每个改变状态的请求都会被服务端重新鉴权。解码结果只用于
//! 填充界面上的用户档案，绝不能作为授权决策依据。

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use crate::models::{Role, UserProfile};

/// 访问令牌内嵌的 claims
///
/// SimpleJWT 默认只带 `user_id`/`exp`/`iat`；`username` 与 `role`
/// 是后端定制序列化器附加的，可能缺失。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    /// Unix 秒。客户端不做过期判断（懒检测：首个 401 生效）。
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub iat: Option<i64>,
}

/// 解码 `header.payload.signature` 中的 payload 段
///
/// 纯函数，无副作用；格式不符返回 `None`。
pub fn decode_claims(token: &str) -> Option<Claims> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}

impl UserProfile {
    /// 由 claims 派生用户档案，缺失的 claim 回退到默认值
    pub fn from_claims(claims: &Claims) -> Self {
        let id = claims
            .user_id
            .or_else(|| claims.sub.as_deref().and_then(|s| s.parse().ok()))
            .unwrap_or(0);
        let username = claims
            .username
            .clone()
            .or_else(|| claims.sub.clone())
            .unwrap_or_else(|| "unknown".to_string());
        Self {
            id,
            username,
            role: claims.role.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 用给定 JSON 载荷拼一个结构上合法的假令牌
    fn fake_token(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.as_bytes());
        format!("{header}.{body}.signature-not-checked")
    }

    #[test]
    fn test_decode_full_claims() {
        let token = fake_token(
            r#"{"user_id": 5, "username": "staff", "role": "FRONT_DESK",
               "exp": 1790000000, "iat": 1789990000}"#,
        );
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.user_id, Some(5));
        assert_eq!(claims.role, Some(Role::FrontDesk));

        let profile = UserProfile::from_claims(&claims);
        assert_eq!(profile.id, 5);
        assert_eq!(profile.username, "staff");
        assert_eq!(profile.role, Role::FrontDesk);
    }

    #[test]
    fn test_absent_claims_fall_back_to_defaults() {
        let token = fake_token(r#"{"exp": 1790000000}"#);
        let claims = decode_claims(&token).unwrap();
        let profile = UserProfile::from_claims(&claims);
        assert_eq!(profile.id, 0);
        assert_eq!(profile.username, "unknown");
        assert_eq!(profile.role, Role::Guest);
    }

    #[test]
    fn test_sub_claim_backfills_identity() {
        let token = fake_token(r#"{"sub": "42"}"#);
        let profile = UserProfile::from_claims(&decode_claims(&token).unwrap());
        assert_eq!(profile.id, 42);
        assert_eq!(profile.username, "42");
    }

    #[test]
    fn test_malformed_tokens_decode_to_none() {
        assert!(decode_claims("").is_none());
        assert!(decode_claims("only-one-segment").is_none());
        assert!(decode_claims("a.!!!not-base64!!!.c").is_none());
        let not_json = format!("h.{}.s", URL_SAFE_NO_PAD.encode(b"plain text"));
        assert!(decode_claims(&not_json).is_none());
    }
}
