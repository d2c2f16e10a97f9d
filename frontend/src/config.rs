//! 部署配置模块
//!
//! 后端地址与分页大小属于部署配置，由构建时环境变量提供，
//! 缺省时回退到默认值。

use frontdesk_shared::DEFAULT_PAGE_SIZE;

/// REST 后端基础地址
///
/// `API_BASE_URL` 构建时注入；默认同源 `/api`（由反向代理转发）。
pub fn api_base_url() -> String {
    option_env!("API_BASE_URL").unwrap_or("/api").to_string()
}

/// 列表端点分页大小，`API_PAGE_SIZE` 构建时可覆盖
pub fn page_size() -> u32 {
    option_env!("API_PAGE_SIZE")
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // 构建环境未注入变量时回退默认值
        assert!(!api_base_url().is_empty());
        assert!(page_size() >= 1);
    }
}
