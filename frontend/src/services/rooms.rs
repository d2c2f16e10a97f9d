//! 客房资源服务

use frontdesk_shared::{ApiResult, Page, Room};

use crate::api::ApiClient;

#[derive(Clone)]
pub struct RoomService {
    api: ApiClient,
}

impl RoomService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, page: u32) -> ApiResult<Page<Room>> {
        let query = vec![("page".to_string(), page.max(1).to_string())];
        self.api.get("/rooms/", &query).await
    }

    /// 表单选项用：沿 `next` 链接拉取全部页
    pub async fn list_all(&self) -> ApiResult<Vec<Room>> {
        let mut all = Vec::new();
        let mut page = 1;
        loop {
            let envelope = self.list(page).await?;
            let next = envelope.next_page();
            all.extend(envelope.results);
            match next {
                Some(n) => page = n,
                None => return Ok(all),
            }
        }
    }

    pub async fn get(&self, id: i64) -> ApiResult<Room> {
        self.api.get(&format!("/rooms/{id}/"), &[]).await
    }
}
