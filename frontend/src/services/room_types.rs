//! 房型资源服务

use frontdesk_shared::{ApiResult, Page, RoomType};

use crate::api::ApiClient;

#[derive(Clone)]
pub struct RoomTypeService {
    api: ApiClient,
}

impl RoomTypeService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> ApiResult<Vec<RoomType>> {
        let mut all = Vec::new();
        let mut page = 1u32;
        loop {
            let envelope: Page<RoomType> = self
                .api
                .get("/roomtypes/", &[("page".to_string(), page.to_string())])
                .await?;
            let next = envelope.next_page();
            all.extend(envelope.results);
            match next {
                Some(n) => page = n,
                None => return Ok(all),
            }
        }
    }
}
