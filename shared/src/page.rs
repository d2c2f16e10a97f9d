//! 分页信封模块
//!
//! 后端列表端点统一返回 `{count, next, previous, results}` 信封
//! （DRF PageNumberPagination）。`PageResult` 在其上补充当前页号
//! 与计算得到的总页数。

use serde::{Deserialize, Serialize};

/// 后端原始分页信封
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// 从 `next` 链接解析下一页页码；末页（`next` 为空）返回 `None`
    pub fn next_page(&self) -> Option<u32> {
        next_page_number(self.next.as_deref())
    }
}

/// DRF `next` 链接形如 `...?page=N`（可能混杂其他查询参数）
pub fn next_page_number(next: Option<&str>) -> Option<u32> {
    let (_, query) = next?.split_once('?')?;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("page="))
        .and_then(|n| n.parse().ok())
}

/// 视图层消费的分页结果
///
/// `total_pages = ceil(count / page_size)`，每次拉取重新计算。
#[derive(Debug, Clone)]
pub struct PageResult<T> {
    pub count: u64,
    pub results: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
}

impl<T> PageResult<T> {
    pub fn from_page(page: Page<T>, current: u32, page_size: u32) -> Self {
        Self {
            count: page.count,
            results: page.results,
            page: current,
            total_pages: total_pages(page.count, page_size),
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// 总页数 = ceil(count / page_size)
pub fn total_pages(count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(30, 10), 3);
        assert_eq!(total_pages(31, 10), 4);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(0, 10), 0);
    }

    #[test]
    fn test_page_result_from_envelope() {
        let page = Page {
            count: 25,
            next: Some("http://x/api/reservations/?page=2".into()),
            previous: None,
            results: vec![1u32; 10],
        };
        let result = PageResult::from_page(page, 1, 10);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.page, 1);
        assert!(result.has_next());
        assert!(!result.has_previous());
    }

    #[test]
    fn test_last_page_has_no_next() {
        let page = Page {
            count: 25,
            next: None,
            previous: Some("http://x/api/reservations/?page=2".into()),
            results: vec![1u32; 5],
        };
        let result = PageResult::from_page(page, 3, 10);
        assert!(!result.has_next());
        assert!(result.has_previous());
    }

    // =========================================================
    // next 链接解析测试
    // =========================================================

    #[test]
    fn test_next_link_yields_page_number() {
        assert_eq!(
            next_page_number(Some("http://x/api/guests/?page=2")),
            Some(2)
        );
        assert_eq!(
            next_page_number(Some("http://x/api/guests/?search=ada&page=12")),
            Some(12)
        );
    }

    #[test]
    fn test_last_page_has_no_next_number() {
        assert_eq!(next_page_number(None), None);
        assert_eq!(next_page_number(Some("http://x/api/guests/")), None);
        assert_eq!(next_page_number(Some("http://x/api/guests/?search=ada")), None);
    }

    #[test]
    fn test_envelope_parses_without_nulls() {
        let body = r#"{"count": 0, "next": null, "previous": null, "results": []}"#;
        let page: Page<u32> = serde_json::from_str(body).unwrap();
        assert_eq!(page.count, 0);
        assert!(page.results.is_empty());
    }
}
