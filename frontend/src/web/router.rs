//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 守卫 -> 处理 -> 加载"的导航流程。
//! 守卫决策本身是 `route` 模块里的纯函数，这里只负责执行其结果。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, GuardOutcome, SessionSnapshot};

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入会话快照信号实现与会话系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 会话快照（注入的信号，实现解耦）
    session: Signal<SessionSnapshot>,
    /// 被守卫拦下的原始目标，登录成功后返回
    return_to: RwSignal<Option<AppRoute>>,
}

impl RouterService {
    /// 创建新的路由服务
    fn new(session: Signal<SessionSnapshot>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            session,
            return_to: RwSignal::new(None),
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 取出记住的原始目标（消费语义）
    pub fn take_return_to(&self) -> Option<AppRoute> {
        self.return_to.try_update(|slot| slot.take()).flatten()
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }

    /// 按路径导航（链接与表单跳转用）
    pub fn navigate_path(&self, path: &str) {
        self.navigate(AppRoute::from_path(path));
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let snapshot = self.session.get_untracked();

        // --- Step 1: 守卫目标路由 ---
        match target_route.guard(snapshot) {
            GuardOutcome::ToLogin => {
                web_sys::console::log_1(&"[Router] Access denied. Redirecting to login.".into());
                // 记住原始目标，登录成功后返回
                self.return_to.set(Some(target_route));
                let redirect = AppRoute::auth_failure_redirect();
                self.apply(redirect, use_push);
                return;
            }
            GuardOutcome::ToDashboard => {
                web_sys::console::log_1(
                    &"[Router] Role not permitted. Redirecting to dashboard.".into(),
                );
                self.apply(AppRoute::auth_success_redirect(), use_push);
                return;
            }
            GuardOutcome::Allow => {}
        }

        // 已认证用户访问登录页：转发到工作台
        if target_route.should_redirect_when_authenticated() && snapshot.is_authenticated {
            self.apply(AppRoute::auth_success_redirect(), use_push);
            return;
        }

        // --- Step 2: 加载页面 (更新状态) ---
        self.apply(target_route, use_push);
    }

    fn apply(&self, route: AppRoute, use_push: bool) {
        if use_push {
            push_history_state(&route.to_path());
        } else {
            replace_history_state(&route.to_path());
        }
        self.set_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let session = self.session;
        let return_to = self.return_to;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            let snapshot = session.get_untracked();

            // popstate 时也执行守卫逻辑
            match target_route.guard(snapshot) {
                GuardOutcome::ToLogin => {
                    return_to.set(Some(target_route));
                    let redirect = AppRoute::auth_failure_redirect();
                    replace_history_state(&redirect.to_path());
                    set_route.set(redirect);
                }
                GuardOutcome::ToDashboard => {
                    let redirect = AppRoute::auth_success_redirect();
                    replace_history_state(&redirect.to_path());
                    set_route.set(redirect);
                }
                GuardOutcome::Allow => set_route.set(target_route),
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置会话状态变化时的自动重定向
    fn setup_session_redirect(&self) {
        let current_route = self.current_route;
        let session = self.session;
        let router = *self;

        Effect::new(move |_| {
            let snapshot = session.get();
            let route = current_route.get_untracked();

            if snapshot.is_authenticated {
                // 用户刚登录：离开登录页，优先回到被拦下的原始目标
                if route.should_redirect_when_authenticated() {
                    let target = router
                        .take_return_to()
                        .unwrap_or_else(AppRoute::auth_success_redirect);
                    web_sys::console::log_1(
                        &"[Router] Session established, leaving login page.".into(),
                    );
                    router.navigate(target);
                }
            } else if route.requires_auth() {
                // 会话被清空（登出或 401）：受保护页面回登录页
                web_sys::console::log_1(
                    &"[Router] Session cleared, redirecting to login.".into(),
                );
                router.return_to.set(Some(route));
                router.apply(AppRoute::auth_failure_redirect(), true);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session: Signal<SessionSnapshot>) -> RouterService {
    let router = RouterService::new(session);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话快照信号
    session: Signal<SessionSnapshot>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(session);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}
