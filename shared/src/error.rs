//! API 错误分类模块
//!
//! 前端侧的错误分类：
//! - `Unauthorized`: 401，网关客户端会先清空会话再抛给调用方
//! - `Validation`: 4xx 且响应体带字段键错误，原样透传给表单
//! - `Http`: 其余非 2xx
//! - `Network`: 未收到任何响应（"could not reach server"）
//! - `Request`: 请求构建失败
//! - `Decode`: 2xx 但响应体无法解码
//!
//! 错误从不自动重试；每个失败终止其触发的用户操作。

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

pub type ApiResult<T> = Result<T, ApiError>;

/// 字段名 -> 该字段的错误消息列表
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 认证失败 (401)
    Unauthorized { detail: Option<String> },
    /// 校验失败：字段键错误原样保留，供视图层逐字段归因
    Validation {
        fields: FieldErrors,
        detail: Option<String>,
    },
    /// 其余非 2xx 响应
    Http { status: u16, message: String },
    /// 连接失败：请求已发出但没有收到响应
    Network(String),
    /// 请求构建阶段失败
    Request(String),
    /// 响应体解码失败
    Decode(String),
}

impl ApiError {
    /// 由非 2xx 响应的状态码与响应体分类
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: Option<Value> = serde_json::from_str(body).ok();

        if status == 401 {
            let detail = parsed.as_ref().and_then(extract_detail);
            return ApiError::Unauthorized { detail };
        }

        if (400..500).contains(&status) {
            if let Some(Value::Object(map)) = parsed {
                let mut fields = FieldErrors::new();
                let mut detail = None;
                for (key, value) in map {
                    if key == "detail" || key == "non_field_errors" || key == "error" {
                        detail = first_message(&value).or(detail);
                        continue;
                    }
                    if let Some(messages) = messages_of(&value) {
                        fields.insert(key, messages);
                    }
                }
                if !fields.is_empty() || detail.is_some() {
                    return ApiError::Validation { fields, detail };
                }
            }
        }

        let message = if body.trim().is_empty() {
            format!("request failed with status {status}")
        } else {
            body.trim().to_string()
        };
        ApiError::Http { status, message }
    }

    /// 字段键错误（仅 Validation 变体持有）
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation { fields, .. } if !fields.is_empty() => Some(fields),
            _ => None,
        }
    }

    /// 是否为认证失败
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// 呈现给用户的消息
    pub fn message(&self) -> String {
        match self {
            ApiError::Unauthorized { detail } => detail
                .clone()
                .unwrap_or_else(|| "authentication required".to_string()),
            ApiError::Validation { detail, fields } => detail.clone().unwrap_or_else(|| {
                if fields.is_empty() {
                    "validation failed".to_string()
                } else {
                    "please correct the highlighted fields".to_string()
                }
            }),
            ApiError::Http { message, .. } => message.clone(),
            ApiError::Network(_) => "could not reach server".to_string(),
            ApiError::Request(msg) => format!("request failed: {msg}"),
            ApiError::Decode(msg) => format!("unexpected response: {msg}"),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

/// `detail` / `error` / `non_field_errors` 键中提取首条消息
fn extract_detail(value: &Value) -> Option<String> {
    let obj = value.as_object()?;
    for key in ["detail", "error", "non_field_errors"] {
        if let Some(v) = obj.get(key) {
            if let Some(msg) = first_message(v) {
                return Some(msg);
            }
        }
    }
    None
}

fn first_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_message),
        _ => None,
    }
}

fn messages_of(value: &Value) -> Option<Vec<String>> {
    let messages: Vec<String> = match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().filter_map(first_message).collect(),
        _ => return None,
    };
    if messages.is_empty() {
        None
    } else {
        Some(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================
    // 401 分类测试
    // =========================================================

    #[test]
    fn test_401_surfaces_backend_detail() {
        let err = ApiError::from_response(
            401,
            r#"{"detail": "No active account found with the given credentials"}"#,
        );
        assert!(err.is_unauthorized());
        assert_eq!(
            err.message(),
            "No active account found with the given credentials"
        );
    }

    #[test]
    fn test_401_without_body_still_unauthorized() {
        let err = ApiError::from_response(401, "");
        assert_eq!(err, ApiError::Unauthorized { detail: None });
        assert_eq!(err.message(), "authentication required");
    }

    // =========================================================
    // 校验错误分类测试
    // =========================================================

    #[test]
    fn test_field_errors_preserved_verbatim() {
        let err = ApiError::from_response(400, r#"{"status": ["Invalid transition"]}"#);
        let fields = err.field_errors().unwrap();
        assert_eq!(fields["status"], vec!["Invalid transition".to_string()]);
    }

    #[test]
    fn test_mixed_field_and_detail_errors() {
        let body = r#"{
            "check_out_date": ["Check-out date must be after check-in date."],
            "guests": ["At least one guest (adult or child) is required."],
            "non_field_errors": ["Room 204 is not available for the selected dates."]
        }"#;
        let err = ApiError::from_response(400, body);
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.len(), 2);
        assert!(fields.contains_key("check_out_date"));
        assert!(fields.contains_key("guests"));
        assert_eq!(
            err.message(),
            "Room 204 is not available for the selected dates."
        );
    }

    #[test]
    fn test_detail_only_body_is_validation_without_fields() {
        let err = ApiError::from_response(400, r#"{"detail": "Cannot check-in."}"#);
        assert_eq!(err.field_errors(), None);
        assert_eq!(err.message(), "Cannot check-in.");
    }

    // =========================================================
    // 其余分类测试
    // =========================================================

    #[test]
    fn test_non_json_body_falls_back_to_http() {
        let err = ApiError::from_response(500, "<html>Server Error</html>");
        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "<html>Server Error</html>");
            }
            other => panic!("expected Http, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_5xx_body_gets_generic_message() {
        let err = ApiError::from_response(502, "  ");
        assert_eq!(err.message(), "request failed with status 502");
    }

    #[test]
    fn test_network_error_message_is_generic() {
        let err = ApiError::Network("fetch aborted".to_string());
        assert_eq!(err.message(), "could not reach server");
    }
}
