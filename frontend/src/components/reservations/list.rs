use chrono::NaiveDate;
use frontdesk_shared::{PageResult, Reservation, ReservationFilter, ReservationStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::services::ReservationService;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// daisyUI badge class per status.
pub(crate) fn status_badge_class(status: ReservationStatus) -> &'static str {
    match status {
        ReservationStatus::Pending => "badge badge-warning",
        ReservationStatus::Confirmed => "badge badge-info",
        ReservationStatus::CheckedIn => "badge badge-success",
        ReservationStatus::CheckedOut => "badge badge-neutral",
        ReservationStatus::Cancelled => "badge badge-error",
        ReservationStatus::NoShow => "badge badge-ghost",
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[component]
pub fn ReservationListPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let service = ReservationService::new(api);

    // The filter set drives every fetch; any field change resets the
    // page to 1 (setter contract) and re-runs the effect exactly once.
    let filter = RwSignal::new(ReservationFilter::default());
    let (page_data, set_page_data) = signal(Option::<PageResult<Reservation>>::None);
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    Effect::new(move |_| {
        let current = filter.get();
        let svc = service.clone();
        set_loading.set(true);
        set_error_msg.set(None);
        spawn_local(async move {
            match svc.list(&current).await {
                Ok(result) => set_page_data.set(Some(result)),
                Err(e) => set_error_msg.set(Some(e.message())),
            }
            set_loading.set(false);
        });
    });

    let on_status_change = move |ev| {
        let value = event_target_value(&ev);
        filter.update(|f| f.set_status(value.parse().ok()));
    };
    let on_from_change = move |ev| {
        let value = event_target_value(&ev);
        filter.update(|f| f.set_check_in_from(parse_date(&value)));
    };
    let on_to_change = move |ev| {
        let value = event_target_value(&ev);
        filter.update(|f| f.set_check_in_to(parse_date(&value)));
    };
    let on_email_change = move |ev| {
        let value = event_target_value(&ev);
        filter.update(|f| f.set_guest_email(value));
    };

    let go_previous = move |_| {
        let page = filter.get_untracked().page;
        if page > 1 {
            filter.update(|f| f.set_page(page - 1));
        }
    };
    let go_next = move |_| {
        let has_next = page_data.with_untracked(|d| d.as_ref().is_some_and(|p| p.has_next()));
        if has_next {
            let page = filter.get_untracked().page;
            filter.update(|f| f.set_page(page + 1));
        }
    };

    let page_readout = move || {
        page_data.with(|data| match data {
            Some(result) => format!("Page {} of {}", result.page, result.total_pages.max(1)),
            None => String::new(),
        })
    };
    let row_count = move || page_data.with(|d| d.as_ref().map_or(0, |p| p.results.len()));
    let total_count = move || page_data.with(|d| d.as_ref().map_or(0, |p| p.count));

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-6">
                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1">
                        <a
                            class="btn btn-ghost text-xl"
                            on:click=move |_| router.navigate(AppRoute::Dashboard)
                        >
                            "Front Desk"
                        </a>
                        <span class="text-base-content/70">"Reservations"</span>
                    </div>
                    <div class="flex-none">
                        <button
                            on:click=move |_| router.navigate(AppRoute::ReservationNew)
                            class="btn btn-primary"
                        >
                            "New Reservation"
                        </button>
                    </div>
                </div>

                // Filter bar
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body py-4 flex-row flex-wrap items-end gap-4">
                        <div class="form-control">
                            <label class="label"><span class="label-text">"Status"</span></label>
                            <select class="select select-bordered" on:change=on_status_change>
                                <option value="">"All statuses"</option>
                                {ReservationStatus::ALL
                                    .into_iter()
                                    .map(|s| view! {
                                        <option value=s.as_str()>{s.label()}</option>
                                    })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">"Check-in from"</span></label>
                            <input type="date" class="input input-bordered" on:change=on_from_change />
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">"Check-in to"</span></label>
                            <input type="date" class="input input-bordered" on:change=on_to_change />
                        </div>
                        <div class="form-control grow">
                            <label class="label"><span class="label-text">"Guest email"</span></label>
                            <input
                                type="text"
                                placeholder="search by email"
                                class="input input-bordered w-full"
                                on:change=on_email_change
                            />
                        </div>
                    </div>
                </div>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between p-6 pb-2">
                            <h3 class="card-title">
                                {move || format!("{} reservations", total_count())}
                            </h3>
                            <div class="join">
                                <button
                                    class="join-item btn btn-sm"
                                    on:click=go_previous
                                    disabled=move || {
                                        loading.get()
                                            || page_data.with(|d| {
                                                d.as_ref().is_none_or(|p| !p.has_previous())
                                            })
                                    }
                                >
                                    "«"
                                </button>
                                <span class="join-item btn btn-sm btn-ghost no-animation">
                                    {page_readout}
                                </span>
                                <button
                                    class="join-item btn btn-sm"
                                    on:click=go_next
                                    disabled=move || {
                                        loading.get()
                                            || page_data.with(|d| {
                                                d.as_ref().is_none_or(|p| !p.has_next())
                                            })
                                    }
                                >
                                    "»"
                                </button>
                            </div>
                        </div>

                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"#"</th>
                                        <th>"Guest"</th>
                                        <th>"Room"</th>
                                        <th class="hidden md:table-cell">"Check-in"</th>
                                        <th class="hidden md:table-cell">"Check-out"</th>
                                        <th>"Status"</th>
                                        <th class="hidden md:table-cell">"Total"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || row_count() == 0 && !loading.get()>
                                        <tr>
                                            <td colspan="8" class="text-center py-8 text-base-content/50">
                                                "No reservations match the current filters."
                                            </td>
                                        </tr>
                                    </Show>
                                    <Show when=move || loading.get() && row_count() == 0>
                                        <tr>
                                            <td colspan="8" class="text-center py-8 text-base-content/50">
                                                <span class="loading loading-spinner loading-md"></span>
                                                " Loading..."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || {
                                            page_data.with(|d| {
                                                d.as_ref().map(|p| p.results.clone()).unwrap_or_default()
                                            })
                                        }
                                        key=|r: &Reservation| (r.id, r.status)
                                        children=move |reservation| {
                                            let id = reservation.id;
                                            view! {
                                                <tr
                                                    class="hover cursor-pointer"
                                                    on:click=move |_| {
                                                        router.navigate(AppRoute::ReservationDetail(id))
                                                    }
                                                >
                                                    <td class="font-mono">{id}</td>
                                                    <td>
                                                        <div class="font-bold">
                                                            {reservation.guest.full_name()}
                                                        </div>
                                                        <div class="text-sm opacity-50">
                                                            {reservation.guest.email.clone()}
                                                        </div>
                                                    </td>
                                                    <td>{reservation.room.room_number.clone()}</td>
                                                    <td class="hidden md:table-cell">
                                                        {reservation.check_in_date.to_string()}
                                                    </td>
                                                    <td class="hidden md:table-cell">
                                                        {reservation.check_out_date.to_string()}
                                                    </td>
                                                    <td>
                                                        <span class=status_badge_class(reservation.status)>
                                                            {reservation.status.label()}
                                                        </span>
                                                    </td>
                                                    <td class="hidden md:table-cell font-mono">
                                                        {reservation.total_price.clone().unwrap_or_default()}
                                                    </td>
                                                    <td>
                                                        <button
                                                            class="btn btn-ghost btn-xs"
                                                            on:click=move |ev: leptos::web_sys::MouseEvent| {
                                                                ev.stop_propagation();
                                                                router.navigate(AppRoute::ReservationEdit(id));
                                                            }
                                                        >
                                                            "Edit"
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
