//! 前台系统共享领域层
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys：
//! - `models`: 后端资源的线上数据模型（serde）
//! - `filter`: 预订查询过滤器与查询参数映射
//! - `page`: DRF 分页信封与总页数计算
//! - `claims`: JWT 载荷的展示用解码（不做签名校验）
//! - `error`: API 错误分类

pub mod claims;
pub mod error;
pub mod filter;
pub mod models;
pub mod page;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 默认分页大小（与后端 PageNumberPagination 配置一致）
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// LocalStorage: 访问令牌键
pub const STORAGE_TOKEN_KEY: &str = "frontdesk_access_token";
/// LocalStorage: 序列化用户档案键
pub const STORAGE_USER_KEY: &str = "frontdesk_user";

pub use claims::{Claims, decode_claims};
pub use error::{ApiError, ApiResult, FieldErrors};
pub use filter::ReservationFilter;
pub use models::{
    Amenity, ChangeRoomRequest, Guest, GuestCreate, LoginRequest, Reservation, ReservationCreate,
    ReservationStatus, ReservationUpdate, Role, Room, RoomStatus, RoomType, SpecialRequestsUpdate,
    TokenPair, UserProfile,
};
pub use page::{Page, PageResult};
