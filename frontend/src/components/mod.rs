//! 视图层组件

mod dashboard;
mod login;
pub mod reservations;

pub use dashboard::DashboardPage;
pub use login::LoginPage;
