//! 预订管理视图

mod detail;
mod form;
mod list;

pub use detail::ReservationDetailPage;
pub use form::ReservationFormPage;
pub use list::ReservationListPage;
