//! 会话存储模块
//!
//! 管理当前访问令牌与用户档案，与路由系统解耦。
//! 令牌与档案永远一起写入、一起清除（不变量），并持久化到
//! LocalStorage 以跨页面刷新存活。路由守卫通过注入的会话快照
//! 做出决策。

use frontdesk_shared::{Role, UserProfile};
use leptos::prelude::*;

// =========================================================
// 纯状态机 (无存储副作用)
// =========================================================

/// 会话状态
///
/// `is_loading` 在应用启动、存储尚未读回之前为 true，
/// 用于阻止过早的重定向。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    /// 不透明的 Bearer 访问令牌（仅会话存储拥有）
    pub token: Option<String>,
    /// 登录时由令牌 claims 派生的用户档案（只读）
    pub user: Option<UserProfile>,
    /// 启动期存储回读尚未完成
    pub is_loading: bool,
}

impl SessionState {
    /// 启动态：存储尚未读回
    pub fn loading() -> Self {
        Self {
            token: None,
            user: None,
            is_loading: true,
        }
    }

    /// 写入凭证与档案，替换任何旧值
    pub fn set(&mut self, token: String, user: UserProfile) {
        self.token = Some(token);
        self.user = Some(user);
        self.is_loading = false;
    }

    /// 同时清除凭证与档案
    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
        self.is_loading = false;
    }

    /// 仅判断凭证是否存在，不做过期校验
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }
}

// =========================================================
// 会话上下文 (Context 共享)
// =========================================================

/// 会话上下文
///
/// 显式可注入对象：应用启动时创建一次，传给网关客户端与路由守卫，
/// 生命周期与进程一致，只能通过自身的 `set`/`clear` 改变。
#[derive(Clone, Copy)]
pub struct SessionContext {
    state: ReadSignal<SessionState>,
    set_state: WriteSignal<SessionState>,
}

impl SessionContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState::loading());
        Self { state, set_state }
    }

    /// 当前状态信号（供视图层响应式读取）
    pub fn state(&self) -> ReadSignal<SessionState> {
        self.state
    }

    /// 写入会话并持久化到 LocalStorage
    pub fn set(&self, token: String, user: UserProfile) {
        persist(&token, &user);
        self.set_state.update(|s| s.set(token, user.clone()));
    }

    /// 清除会话（内存 + LocalStorage）
    pub fn clear(&self) {
        clear_persisted();
        self.set_state.update(|s| s.clear());
    }

    /// 请求阶段读取令牌（非响应式）
    pub fn token(&self) -> Option<String> {
        self.state.get_untracked().token
    }

    /// 当前用户档案（非响应式）
    pub fn user(&self) -> Option<UserProfile> {
        self.state.get_untracked().user
    }

    /// 认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated())
    }

    /// 角色信号（用于路由服务注入）
    pub fn role_signal(&self) -> Signal<Option<Role>> {
        let state = self.state;
        Signal::derive(move || state.get().role())
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// 初始化会话状态
///
/// 在应用其余部分渲染之前，急切地把 LocalStorage 中的令牌与档案
/// 读回内存。两个键必须同时存在才算有效会话；任何一个缺失都按
/// 未登录处理并清掉残留。
pub fn init_session(ctx: &SessionContext) {
    match load_persisted() {
        Some((token, user)) => ctx.set_state.update(|s| s.set(token, user)),
        None => {
            clear_persisted();
            ctx.set_state.update(|s| s.clear());
        }
    }
}

// =========================================================
// LocalStorage 持久化 (仅 wasm)
// =========================================================

#[cfg(target_arch = "wasm32")]
fn persist(token: &str, user: &UserProfile) {
    use gloo_storage::{LocalStorage, Storage};
    let _ = LocalStorage::set(STORAGE_TOKEN_KEY, token);
    let _ = LocalStorage::set(STORAGE_USER_KEY, user);
}

#[cfg(not(target_arch = "wasm32"))]
fn persist(_token: &str, _user: &UserProfile) {}

#[cfg(target_arch = "wasm32")]
fn clear_persisted() {
    use gloo_storage::{LocalStorage, Storage};
    LocalStorage::delete(STORAGE_TOKEN_KEY);
    LocalStorage::delete(STORAGE_USER_KEY);
}

#[cfg(not(target_arch = "wasm32"))]
fn clear_persisted() {}

#[cfg(target_arch = "wasm32")]
fn load_persisted() -> Option<(String, UserProfile)> {
    use gloo_storage::{LocalStorage, Storage};
    let token: String = LocalStorage::get(STORAGE_TOKEN_KEY).ok()?;
    let user: UserProfile = LocalStorage::get(STORAGE_USER_KEY).ok()?;
    Some((token, user))
}

#[cfg(not(target_arch = "wasm32"))]
fn load_persisted() -> Option<(String, UserProfile)> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff_profile() -> UserProfile {
        UserProfile {
            id: 5,
            username: "staff".to_string(),
            role: Role::FrontDesk,
        }
    }

    // =========================================================
    // set/clear 序列测试
    // =========================================================

    #[test]
    fn test_loading_state_is_not_authenticated() {
        let state = SessionState::loading();
        assert!(state.is_loading);
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_is_authenticated_reflects_last_call() {
        let mut state = SessionState::loading();

        state.set("token-a".to_string(), staff_profile());
        assert!(state.is_authenticated());

        state.clear();
        assert!(!state.is_authenticated());

        state.set("token-b".to_string(), staff_profile());
        state.set("token-c".to_string(), staff_profile());
        assert!(state.is_authenticated());
        assert_eq!(state.token.as_deref(), Some("token-c"));

        state.clear();
        state.clear();
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_token_and_profile_set_and_cleared_together() {
        let mut state = SessionState::loading();
        state.set("token".to_string(), staff_profile());
        assert!(state.token.is_some() && state.user.is_some());

        state.clear();
        assert!(state.token.is_none() && state.user.is_none());
    }

    #[test]
    fn test_role_comes_from_profile() {
        let mut state = SessionState::default();
        assert_eq!(state.role(), None);
        state.set("token".to_string(), staff_profile());
        assert_eq!(state.role(), Some(Role::FrontDesk));
    }
}
