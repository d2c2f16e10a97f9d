//! 前台预订管理前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `session`: 会话存储（令牌 + 用户档案）
//! - `api`: API 网关客户端（Bearer 附加 / 401 会话清空）
//! - `auth`: 登录/登出流程
//! - `web::route`: 路由定义与守卫（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `services`: 按资源划分的后端服务
//! - `components`: UI 组件层

pub mod api;
pub mod auth;
mod components;
pub mod config;
pub mod services;
pub mod session;

pub mod web {
    pub mod route;
    pub mod router;
}

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::components::reservations::{
    ReservationDetailPage, ReservationFormPage, ReservationListPage,
};
use crate::components::{DashboardPage, LoginPage};
use crate::session::{SessionContext, init_session};
use crate::web::route::{AppRoute, SessionSnapshot};
use crate::web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Reservations => view! { <ReservationListPage /> }.into_any(),
        AppRoute::ReservationNew => view! { <ReservationFormPage /> }.into_any(),
        AppRoute::ReservationDetail(id) => view! { <ReservationDetailPage id=id /> }.into_any(),
        AppRoute::ReservationEdit(id) => view! { <ReservationFormPage id=id /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建会话上下文
    let session = SessionContext::new();
    provide_context(session);

    // 2. 初始化会话状态（从 LocalStorage 加载令牌与档案）
    init_session(&session);

    // 3. 构造网关客户端并注入（所有资源服务共用）
    let api = ApiClient::new(config::api_base_url().to_string(), session);
    provide_context(api);

    // 4. 派生会话快照信号，注入路由服务实现守卫（解耦！）
    let state = session.state();
    let snapshot = Signal::derive(move || {
        let s = state.get();
        SessionSnapshot {
            is_authenticated: s.is_authenticated(),
            role: s.role(),
        }
    });

    view! {
        <Router session=snapshot>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
