//! 线上数据模型模块
//!
//! 与后端 REST API 的 JSON 形状一一对应。所有字段归后端所有，
//! 前端只持有请求级别的临时副本。

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =========================================================
// 用户与角色 (Users & Roles)
// =========================================================

/// 员工/用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    FrontDesk,
    Housekeeping,
    Accounting,
    #[default]
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::FrontDesk => "FRONT_DESK",
            Role::Housekeeping => "HOUSEKEEPING",
            Role::Accounting => "ACCOUNTING",
            Role::Guest => "GUEST",
        }
    }

    /// 是否为可操作预订的员工角色
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::FrontDesk)
    }
}

/// 登录后的用户档案
///
/// 由令牌内嵌的 claims 派生一次，之后只读。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

// =========================================================
// 认证载荷 (Auth Payloads)
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// SimpleJWT 令牌签发响应
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
}

// =========================================================
// 预订 (Reservations)
// =========================================================

/// 预订状态（由服务端独占管理，前端只触发迁移）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
    NoShow,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 6] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::CheckedIn,
        ReservationStatus::CheckedOut,
        ReservationStatus::Cancelled,
        ReservationStatus::NoShow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::CheckedIn => "CHECKED_IN",
            ReservationStatus::CheckedOut => "CHECKED_OUT",
            ReservationStatus::Cancelled => "CANCELLED",
            ReservationStatus::NoShow => "NO_SHOW",
        }
    }

    /// 当前状态下允许触发办理入住
    pub fn can_check_in(self) -> bool {
        self == ReservationStatus::Confirmed
    }

    /// 当前状态下允许触发退房
    pub fn can_check_out(self) -> bool {
        self == ReservationStatus::CheckedIn
    }

    /// 当前状态下允许取消
    pub fn can_cancel(self) -> bool {
        matches!(
            self,
            ReservationStatus::Pending | ReservationStatus::Confirmed
        )
    }

    /// 人类可读标签（用于下拉框和徽章）
    pub fn label(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Confirmed => "Confirmed",
            ReservationStatus::CheckedIn => "Checked-In",
            ReservationStatus::CheckedOut => "Checked-Out",
            ReservationStatus::Cancelled => "Cancelled",
            ReservationStatus::NoShow => "No Show",
        }
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = ();

    /// 按线上格式（SCREAMING_SNAKE_CASE）解析
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or(())
    }
}

/// 预订记录（读取形状：guest/room 为嵌套对象）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub guest: Guest,
    pub room: Room,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub number_of_adults: u32,
    pub number_of_children: u32,
    pub status: ReservationStatus,
    /// DRF DecimalField 序列化为字符串
    #[serde(default)]
    pub total_price: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub group_identifier: Option<String>,
    #[serde(default)]
    pub requested_early_check_in: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_early_check_in_approved: Option<bool>,
    #[serde(default)]
    pub early_check_in_fee: Option<String>,
    #[serde(default)]
    pub requested_late_check_out: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_late_check_out_approved: Option<bool>,
    #[serde(default)]
    pub late_check_out_fee: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    pub fn can_check_in(&self) -> bool {
        self.status.can_check_in()
    }

    pub fn can_check_out(&self) -> bool {
        self.status.can_check_out()
    }

    pub fn can_cancel(&self) -> bool {
        self.status.can_cancel()
    }

    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }
}

/// 新建预订载荷（guest/room 以 *_id 写入）
#[derive(Debug, Clone, Serialize)]
pub struct ReservationCreate {
    pub guest_id: i64,
    pub room_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub number_of_adults: u32,
    pub number_of_children: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_early_check_in: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_late_check_out: Option<DateTime<Utc>>,
}

/// 部分更新载荷（PATCH 语义：缺省字段保持不变）
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReservationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_adults: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_children: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
}

/// 换房动作载荷
#[derive(Debug, Clone, Serialize)]
pub struct ChangeRoomRequest {
    pub new_room_id: i64,
}

/// 提前入住 / 延迟退房管理载荷（员工审批与费用）
#[derive(Debug, Clone, Default, Serialize)]
pub struct SpecialRequestsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_early_check_in: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_early_check_in_approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub early_check_in_fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_late_check_out: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_late_check_out_approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub late_check_out_fee: Option<String>,
}

// =========================================================
// 客人 (Guests)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub user_account_id: Option<i64>,
}

impl Guest {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GuestCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

// =========================================================
// 客房 (Rooms & Room Types)
// =========================================================

/// 客房运营状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Available,
    Booked,
    Occupied,
    NeedsCleaning,
    UnderMaintenance,
}

impl RoomStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RoomStatus::Available => "Available",
            RoomStatus::Booked => "Booked",
            RoomStatus::Occupied => "Occupied",
            RoomStatus::NeedsCleaning => "Needs Cleaning",
            RoomStatus::UnderMaintenance => "Under Maintenance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// 客房（room_type 在读取形状中是类型名字符串）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub room_number: String,
    pub room_type: String,
    pub status: RoomStatus,
    /// DRF DecimalField 序列化为字符串
    pub price_per_night: String,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
    #[serde(default)]
    pub floor: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub capacity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================
    // 状态序列化测试
    // =========================================================

    #[test]
    fn test_status_wire_format_is_screaming_snake() {
        let json = serde_json::to_string(&ReservationStatus::CheckedIn).unwrap();
        assert_eq!(json, "\"CHECKED_IN\"");
        let back: ReservationStatus = serde_json::from_str("\"NO_SHOW\"").unwrap();
        assert_eq!(back, ReservationStatus::NoShow);
    }

    #[test]
    fn test_status_parse_matches_as_str() {
        for status in ReservationStatus::ALL {
            assert_eq!(status.as_str().parse(), Ok(status));
        }
        assert!("UNKNOWN".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn test_role_default_is_guest() {
        assert_eq!(Role::default(), Role::Guest);
        assert!(!Role::Guest.is_staff());
        assert!(Role::FrontDesk.is_staff());
        assert!(Role::Admin.is_staff());
    }

    // =========================================================
    // 部分更新载荷测试
    // =========================================================

    #[test]
    fn test_update_payload_omits_unset_fields() {
        let patch = ReservationUpdate {
            status: Some(ReservationStatus::CheckedIn),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["status"], "CHECKED_IN");
    }

    #[test]
    fn test_reservation_parses_backend_shape() {
        let body = r#"{
            "id": 7,
            "guest": {"id": 3, "first_name": "Ada", "last_name": "Lovelace",
                      "email": "ada@example.com", "phone_number": null,
                      "address": null, "user_account_id": null},
            "room": {"id": 12, "room_number": "204", "room_type": "Double",
                     "status": "AVAILABLE", "price_per_night": "120.00",
                     "amenities": [], "floor": 2},
            "check_in_date": "2026-09-01",
            "check_out_date": "2026-09-04",
            "number_of_adults": 2,
            "number_of_children": 0,
            "status": "CONFIRMED",
            "total_price": "360.00",
            "notes": null,
            "group_name": null,
            "group_identifier": null,
            "created_at": "2026-08-20T10:00:00Z",
            "updated_at": "2026-08-20T10:00:00Z"
        }"#;
        let r: Reservation = serde_json::from_str(body).unwrap();
        assert_eq!(r.id, 7);
        assert_eq!(r.guest.full_name(), "Ada Lovelace");
        assert_eq!(r.room.room_type, "Double");
        assert_eq!(r.nights(), 3);
        assert!(r.can_check_in());
        assert!(!r.can_check_out());
        assert!(r.can_cancel());
    }
}
