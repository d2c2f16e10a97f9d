//! 资源服务模块
//!
//! 每个后端资源一个薄服务：把领域操作映射为一次网关客户端调用，
//! 不持有任何状态，错误原样透传给视图层。

mod guests;
mod reservations;
mod room_types;
mod rooms;

pub use guests::GuestService;
pub use reservations::{ReservationService, StatusAction};
pub use room_types::RoomTypeService;
pub use rooms::RoomService;
