use chrono::Utc;
use frontdesk_shared::{ReservationFilter, ReservationStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::auth::logout;
use crate::services::ReservationService;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// Counts shown on the landing page, each from one filtered list call.
fn count_filter(status: ReservationStatus, today_only: bool) -> ReservationFilter {
    let mut filter = ReservationFilter::default();
    filter.set_status(Some(status));
    if today_only {
        let today = Utc::now().date_naive();
        filter.set_check_in_from(Some(today));
        filter.set_check_in_to(Some(today));
    }
    filter
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let router = use_router();

    let reservations = ReservationService::new(api);

    let (arrivals_today, set_arrivals_today) = signal(Option::<u64>::None);
    let (in_house, set_in_house) = signal(Option::<u64>::None);
    let (pending, set_pending) = signal(Option::<u64>::None);
    let (load_error, set_load_error) = signal(Option::<String>::None);

    // Load the three counters concurrently once the session is in place.
    Effect::new(move |_| {
        if !session.state().get().is_authenticated() {
            return;
        }
        let svc = reservations.clone();
        spawn_local(async move {
            let arrivals_filter = count_filter(ReservationStatus::Confirmed, true);
            let checked_in_filter = count_filter(ReservationStatus::CheckedIn, false);
            let pending_filter = count_filter(ReservationStatus::Pending, false);
            let (arrivals, checked_in, pending_res) = futures::join!(
                svc.list(&arrivals_filter),
                svc.list(&checked_in_filter),
                svc.list(&pending_filter),
            );
            match arrivals {
                Ok(page) => set_arrivals_today.set(Some(page.count)),
                Err(e) => set_load_error.set(Some(e.message())),
            }
            if let Ok(page) = checked_in {
                set_in_house.set(Some(page.count));
            }
            if let Ok(page) = pending_res {
                set_pending.set(Some(page.count));
            }
        });
    });

    let on_logout = move |_| {
        logout(&session);
    };

    let username = move || {
        session
            .state()
            .get()
            .user
            .map(|u| u.username)
            .unwrap_or_default()
    };
    let role_label = move || {
        session
            .state()
            .get()
            .role()
            .map(|r| r.as_str())
            .unwrap_or("")
    };
    let is_staff = move || session.state().get().role().is_some_and(|r| r.is_staff());

    let stat_value = move |value: Option<u64>| match value {
        Some(n) => n.to_string(),
        None => "—".to_string(),
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1 gap-2">
                        <a class="btn btn-ghost text-xl">"Front Desk"</a>
                        <span class="badge badge-neutral hidden md:inline-flex">
                            {username} " · " {role_label}
                        </span>
                    </div>
                    <div class="flex-none gap-2">
                        <Show when=is_staff>
                            <button
                                on:click=move |_| router.navigate(AppRoute::Reservations)
                                class="btn btn-primary"
                            >
                                "Reservations"
                            </button>
                            <button
                                on:click=move |_| router.navigate(AppRoute::ReservationNew)
                                class="btn btn-outline"
                            >
                                "New Reservation"
                            </button>
                        </Show>
                        <button on:click=on_logout class="btn btn-outline btn-error">
                            "Sign out"
                        </button>
                    </div>
                </div>

                <Show when=move || load_error.get().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || load_error.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-title">"Arrivals Today"</div>
                        <div class="stat-value text-primary">
                            {move || stat_value(arrivals_today.get())}
                        </div>
                        <div class="stat-desc">"Confirmed, checking in today"</div>
                    </div>

                    <div class="stat">
                        <div class="stat-title">"In House"</div>
                        <div class="stat-value text-success">
                            {move || stat_value(in_house.get())}
                        </div>
                        <div class="stat-desc">"Currently checked-in"</div>
                    </div>

                    <div class="stat">
                        <div class="stat-title">"Pending"</div>
                        <div class="stat-value text-secondary">
                            {move || stat_value(pending.get())}
                        </div>
                        <div class="stat-desc">"Awaiting confirmation"</div>
                    </div>
                </div>
            </div>
        </div>
    }
}
