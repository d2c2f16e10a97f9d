//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义应用的所有路由、其认证/角色要求，以及纯函数形式的守卫决策。

use std::fmt::Display;

use frontdesk_shared::Role;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    /// 工作台 (需要认证，任意角色)
    Dashboard,
    /// 预订列表 (仅员工)
    Reservations,
    /// 新建预订 (仅员工)
    ReservationNew,
    /// 预订详情 (仅员工)
    ReservationDetail(i64),
    /// 编辑预订 (仅员工)
    ReservationEdit(i64),
    /// 页面未找到
    NotFound,
}

/// 守卫决策所需的会话快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub is_authenticated: bool,
    pub role: Option<Role>,
}

/// 守卫决策结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// 放行，渲染目标视图
    Allow,
    /// 未认证：重定向登录页（并记住原始目标）
    ToLogin,
    /// 已认证但角色不在允许集合：重定向默认落地页
    ToDashboard,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" | "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            "/reservations" => Self::Reservations,
            "/reservations/new" => Self::ReservationNew,
            _ => {
                let mut rest = match trimmed.strip_prefix("/reservations/") {
                    Some(rest) => rest.split('/'),
                    None => return Self::NotFound,
                };
                let id = match rest.next().and_then(|s| s.parse::<i64>().ok()) {
                    Some(id) => id,
                    None => return Self::NotFound,
                };
                match rest.next() {
                    None => Self::ReservationDetail(id),
                    Some("edit") if rest.next().is_none() => Self::ReservationEdit(id),
                    Some(_) => Self::NotFound,
                }
            }
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Reservations => "/reservations".to_string(),
            Self::ReservationNew => "/reservations/new".to_string(),
            Self::ReservationDetail(id) => format!("/reservations/{id}"),
            Self::ReservationEdit(id) => format!("/reservations/{id}/edit"),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// 该路由是否需要认证
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }

    /// 允许的角色集合；`None` 表示任意已认证角色
    pub fn allowed_roles(&self) -> Option<&'static [Role]> {
        const STAFF: &[Role] = &[Role::Admin, Role::FrontDesk];
        match self {
            Self::Reservations
            | Self::ReservationNew
            | Self::ReservationDetail(_)
            | Self::ReservationEdit(_) => Some(STAFF),
            _ => None,
        }
    }

    /// 已认证用户是否应离开此路由（登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// **核心守卫逻辑：纯决策函数**
    ///
    /// 只依赖会话快照与静态路由配置，不做网络调用。
    pub fn guard(&self, session: SessionSnapshot) -> GuardOutcome {
        if self.requires_auth() && !session.is_authenticated {
            return GuardOutcome::ToLogin;
        }
        if let Some(allowed) = self.allowed_roles() {
            if !role_permitted(allowed, session.role) {
                return GuardOutcome::ToDashboard;
            }
        }
        GuardOutcome::Allow
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 认证成功时的默认落地页
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

/// 角色集合检查：`role` 必须出现在允许集合中
pub fn role_permitted(allowed: &[Role], role: Option<Role>) -> bool {
    role.is_some_and(|r| allowed.contains(&r))
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anonymous() -> SessionSnapshot {
        SessionSnapshot {
            is_authenticated: false,
            role: None,
        }
    }

    fn session_with(role: Role) -> SessionSnapshot {
        SessionSnapshot {
            is_authenticated: true,
            role: Some(role),
        }
    }

    // =========================================================
    // 路径解析测试
    // =========================================================

    #[test]
    fn test_path_round_trips() {
        let routes = [
            AppRoute::Login,
            AppRoute::Dashboard,
            AppRoute::Reservations,
            AppRoute::ReservationNew,
            AppRoute::ReservationDetail(7),
            AppRoute::ReservationEdit(7),
        ];
        for route in routes {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn test_trailing_slash_and_aliases() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/reservations/"), AppRoute::Reservations);
        assert_eq!(
            AppRoute::from_path("/reservations/7/"),
            AppRoute::ReservationDetail(7)
        );
    }

    #[test]
    fn test_unknown_paths_are_not_found() {
        assert_eq!(AppRoute::from_path("/rooms"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/reservations/abc"), AppRoute::NotFound);
        assert_eq!(
            AppRoute::from_path("/reservations/7/delete"),
            AppRoute::NotFound
        );
    }

    // =========================================================
    // 守卫决策测试
    // =========================================================

    #[test]
    fn test_unauthenticated_protected_route_goes_to_login() {
        assert_eq!(
            AppRoute::Reservations.guard(anonymous()),
            GuardOutcome::ToLogin
        );
        assert_eq!(AppRoute::Dashboard.guard(anonymous()), GuardOutcome::ToLogin);
    }

    #[test]
    fn test_under_privileged_role_goes_to_dashboard_not_login() {
        // 已认证但角色不足：回默认落地页，而不是登录页
        let housekeeping = session_with(Role::Housekeeping);
        assert_eq!(
            AppRoute::Reservations.guard(housekeeping),
            GuardOutcome::ToDashboard
        );
        assert_eq!(
            AppRoute::ReservationEdit(3).guard(session_with(Role::Guest)),
            GuardOutcome::ToDashboard
        );
    }

    #[test]
    fn test_staff_roles_are_allowed() {
        assert_eq!(
            AppRoute::Reservations.guard(session_with(Role::FrontDesk)),
            GuardOutcome::Allow
        );
        assert_eq!(
            AppRoute::ReservationDetail(1).guard(session_with(Role::Admin)),
            GuardOutcome::Allow
        );
    }

    #[test]
    fn test_dashboard_allows_any_authenticated_role() {
        for role in [Role::Admin, Role::FrontDesk, Role::Housekeeping, Role::Guest] {
            assert_eq!(
                AppRoute::Dashboard.guard(session_with(role)),
                GuardOutcome::Allow
            );
        }
    }

    #[test]
    fn test_role_set_check_is_exact_membership() {
        // 角色不足 != 未认证：ADMIN 专属集合对 FRONT_DESK 关闭
        assert!(!role_permitted(&[Role::Admin], Some(Role::FrontDesk)));
        assert!(role_permitted(&[Role::Admin], Some(Role::Admin)));
        assert!(!role_permitted(&[Role::Admin, Role::FrontDesk], None));
    }

    #[test]
    fn test_login_is_public() {
        assert_eq!(AppRoute::Login.guard(anonymous()), GuardOutcome::Allow);
    }
}
