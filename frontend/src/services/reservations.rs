//! 预订资源服务
//!
//! 列表查询把过滤器翻译为后端过滤参数；状态迁移（入住/退房/取消/
//! 换房/特殊请求）只负责触发，合法性完全由后端裁决，校验失败的
//! 字段键错误原样返回。

use frontdesk_shared::{
    ApiResult, ChangeRoomRequest, Page, PageResult, Reservation, ReservationCreate,
    ReservationFilter, ReservationUpdate, SpecialRequestsUpdate,
};

use crate::api::ApiClient;
use crate::config;

/// 后端以 POST 子路径暴露的三个无请求体状态迁移
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    CheckIn,
    CheckOut,
    Cancel,
}

impl StatusAction {
    fn path_segment(self) -> &'static str {
        match self {
            Self::CheckIn => "check_in",
            Self::CheckOut => "check_out",
            Self::Cancel => "cancel",
        }
    }
}

#[derive(Clone)]
pub struct ReservationService {
    api: ApiClient,
}

impl ReservationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn detail_path(id: i64) -> String {
        format!("/reservations/{id}/")
    }

    fn action_path(id: i64, action: &str) -> String {
        format!("/reservations/{id}/{action}/")
    }

    // =========================================================
    // 查询 (Queries)
    // =========================================================

    /// 按过滤器拉取一页预订
    pub async fn list(&self, filter: &ReservationFilter) -> ApiResult<PageResult<Reservation>> {
        let page: Page<Reservation> = self
            .api
            .get("/reservations/", &filter.to_query())
            .await?;
        Ok(PageResult::from_page(page, filter.page, config::page_size()))
    }

    pub async fn get(&self, id: i64) -> ApiResult<Reservation> {
        self.api.get(&Self::detail_path(id), &[]).await
    }

    // =========================================================
    // 写入 (Mutations)
    // =========================================================

    pub async fn create(&self, payload: &ReservationCreate) -> ApiResult<Reservation> {
        self.api.post("/reservations/", payload).await
    }

    /// 部分更新：缺省字段由后端保持不变
    pub async fn update(&self, id: i64, payload: &ReservationUpdate) -> ApiResult<Reservation> {
        self.api.patch(&Self::detail_path(id), payload).await
    }

    pub async fn remove(&self, id: i64) -> ApiResult<()> {
        self.api.delete(&Self::detail_path(id)).await
    }

    // =========================================================
    // 状态迁移动作 (Status Transition Actions)
    // =========================================================

    /// 触发一次状态迁移，返回后端裁决后的最新预订
    pub async fn transition(&self, id: i64, action: StatusAction) -> ApiResult<Reservation> {
        self.api
            .post_empty(&Self::action_path(id, action.path_segment()))
            .await
    }

    pub async fn change_room(&self, id: i64, new_room_id: i64) -> ApiResult<Reservation> {
        let payload = ChangeRoomRequest { new_room_id };
        self.api
            .post(&Self::action_path(id, "change_room"), &payload)
            .await
    }

    pub async fn manage_special_requests(
        &self,
        id: i64,
        payload: &SpecialRequestsUpdate,
    ) -> ApiResult<Reservation> {
        self.api
            .patch(&Self::action_path(id, "manage-special-requests"), payload)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_follow_backend_router() {
        assert_eq!(ReservationService::detail_path(7), "/reservations/7/");
        assert_eq!(
            ReservationService::action_path(7, "check_in"),
            "/reservations/7/check_in/"
        );
        assert_eq!(
            ReservationService::action_path(7, "manage-special-requests"),
            "/reservations/7/manage-special-requests/"
        );
    }

    #[test]
    fn test_list_envelope_decodes_into_page_result() {
        // 列表端点的响应体经信封解码后补上页号与总页数
        let body = r#"{
            "count": 25,
            "next": "http://backend/api/reservations/?page=3",
            "previous": "http://backend/api/reservations/?page=1",
            "results": [{
                "id": 7,
                "guest": {"id": 3, "first_name": "Ada", "last_name": "Lovelace",
                          "email": "ada@example.com"},
                "room": {"id": 12, "room_number": "204", "room_type": "Double",
                         "status": "AVAILABLE", "price_per_night": "120.00"},
                "check_in_date": "2026-09-01",
                "check_out_date": "2026-09-04",
                "number_of_adults": 2,
                "number_of_children": 0,
                "status": "CONFIRMED",
                "total_price": "360.00",
                "created_at": "2026-08-20T10:00:00Z",
                "updated_at": "2026-08-20T10:00:00Z"
            }]
        }"#;
        let page: Page<Reservation> = serde_json::from_str(body).unwrap();
        assert_eq!(page.next_page(), Some(3));

        let result = PageResult::from_page(page, 2, crate::config::page_size());
        assert_eq!(result.total_pages, 3);
        assert!(result.has_next() && result.has_previous());
        assert_eq!(result.results[0].guest.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_action_segments_use_backend_spelling() {
        // 后端路由用下划线，唯独特殊请求动作用连字符
        assert_eq!(StatusAction::CheckIn.path_segment(), "check_in");
        assert_eq!(StatusAction::CheckOut.path_segment(), "check_out");
        assert_eq!(StatusAction::Cancel.path_segment(), "cancel");
    }
}
