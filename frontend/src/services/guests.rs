//! 客人资源服务

use frontdesk_shared::{ApiResult, Guest, GuestCreate, Page};

use crate::api::ApiClient;

#[derive(Clone)]
pub struct GuestService {
    api: ApiClient,
}

impl GuestService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// 拉取一页客人，可选姓名/邮箱搜索
    pub async fn list(&self, search: &str, page: u32) -> ApiResult<Page<Guest>> {
        let mut query = Vec::new();
        let search = search.trim();
        if !search.is_empty() {
            query.push(("search".to_string(), search.to_string()));
        }
        query.push(("page".to_string(), page.max(1).to_string()));
        self.api.get("/guests/", &query).await
    }

    /// 表单选项用：沿 `next` 链接拉取全部页
    pub async fn list_all(&self) -> ApiResult<Vec<Guest>> {
        let mut all = Vec::new();
        let mut page = 1;
        loop {
            let envelope = self.list("", page).await?;
            let next = envelope.next_page();
            all.extend(envelope.results);
            match next {
                Some(n) => page = n,
                None => return Ok(all),
            }
        }
    }

    pub async fn get(&self, id: i64) -> ApiResult<Guest> {
        self.api.get(&format!("/guests/{id}/"), &[]).await
    }

    pub async fn create(&self, payload: &GuestCreate) -> ApiResult<Guest> {
        self.api.post("/guests/", payload).await
    }
}
