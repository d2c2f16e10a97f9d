//! 预订查询过滤器模块
//!
//! 过滤器仅存在于视图层状态中；任何字段变化都会把页码重置为 1，
//! 并由视图层触发一次重新拉取。`to_query` 负责把过滤器翻译为
//! 后端过滤参数（`status` 透传、日期界映射为 `__gte`/`__lte`、
//! 客人邮箱子串映射为通用 `search`）。

use chrono::NaiveDate;

use crate::models::ReservationStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationFilter {
    pub status: Option<ReservationStatus>,
    pub check_in_from: Option<NaiveDate>,
    pub check_in_to: Option<NaiveDate>,
    pub guest_email: String,
    pub page: u32,
}

impl Default for ReservationFilter {
    fn default() -> Self {
        Self {
            status: None,
            check_in_from: None,
            check_in_to: None,
            guest_email: String::new(),
            page: 1,
        }
    }
}

impl ReservationFilter {
    /// 修改状态过滤并重置页码
    pub fn set_status(&mut self, status: Option<ReservationStatus>) {
        self.status = status;
        self.page = 1;
    }

    /// 修改入住日期下界并重置页码
    pub fn set_check_in_from(&mut self, date: Option<NaiveDate>) {
        self.check_in_from = date;
        self.page = 1;
    }

    /// 修改入住日期上界并重置页码
    pub fn set_check_in_to(&mut self, date: Option<NaiveDate>) {
        self.check_in_to = date;
        self.page = 1;
    }

    /// 修改客人邮箱子串并重置页码
    pub fn set_guest_email(&mut self, email: String) {
        self.guest_email = email;
        self.page = 1;
    }

    /// 翻页（不触碰其余过滤字段）
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// 翻译为后端查询参数
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(status) = self.status {
            params.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(from) = self.check_in_from {
            params.push((
                "check_in_date__gte".to_string(),
                from.format("%Y-%m-%d").to_string(),
            ));
        }
        if let Some(to) = self.check_in_to {
            params.push((
                "check_in_date__lte".to_string(),
                to.format("%Y-%m-%d").to_string(),
            ));
        }
        let email = self.guest_email.trim();
        if !email.is_empty() {
            params.push(("search".to_string(), email.to_string()));
        }
        params.push(("page".to_string(), self.page.to_string()));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn value_of<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    // =========================================================
    // 页码重置测试
    // =========================================================

    #[test]
    fn test_every_setter_resets_page() {
        let mut filter = ReservationFilter::default();
        filter.set_page(4);

        filter.set_status(Some(ReservationStatus::Confirmed));
        assert_eq!(filter.page, 1);

        filter.set_page(4);
        filter.set_check_in_from(Some(date("2026-09-01")));
        assert_eq!(filter.page, 1);

        filter.set_page(4);
        filter.set_check_in_to(Some(date("2026-09-30")));
        assert_eq!(filter.page, 1);

        filter.set_page(4);
        filter.set_guest_email("ada@".to_string());
        assert_eq!(filter.page, 1);
    }

    #[test]
    fn test_set_page_keeps_other_fields() {
        let mut filter = ReservationFilter::default();
        filter.set_status(Some(ReservationStatus::Pending));
        filter.set_page(3);
        assert_eq!(filter.status, Some(ReservationStatus::Pending));
        assert_eq!(filter.page, 3);
    }

    #[test]
    fn test_set_page_clamps_to_one() {
        let mut filter = ReservationFilter::default();
        filter.set_page(0);
        assert_eq!(filter.page, 1);
    }

    // =========================================================
    // 查询参数映射测试
    // =========================================================

    #[test]
    fn test_default_filter_only_sends_page() {
        let params = ReservationFilter::default().to_query();
        assert_eq!(params, vec![("page".to_string(), "1".to_string())]);
    }

    #[test]
    fn test_full_filter_maps_all_operators() {
        let mut filter = ReservationFilter::default();
        filter.set_status(Some(ReservationStatus::Confirmed));
        filter.set_check_in_from(Some(date("2026-09-01")));
        filter.set_check_in_to(Some(date("2026-09-30")));
        filter.set_guest_email(" ada@example.com ".to_string());
        filter.set_page(2);

        let params = filter.to_query();
        assert_eq!(value_of(&params, "status"), Some("CONFIRMED"));
        assert_eq!(value_of(&params, "check_in_date__gte"), Some("2026-09-01"));
        assert_eq!(value_of(&params, "check_in_date__lte"), Some("2026-09-30"));
        assert_eq!(value_of(&params, "search"), Some("ada@example.com"));
        assert_eq!(value_of(&params, "page"), Some("2"));
    }

    #[test]
    fn test_blank_email_is_not_sent() {
        let mut filter = ReservationFilter::default();
        filter.set_guest_email("   ".to_string());
        let params = filter.to_query();
        assert_eq!(value_of(&params, "search"), None);
    }
}
