use frontdesk_shared::{Reservation, Role, Room, SpecialRequestsUpdate};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::services::{ReservationService, RoomService, StatusAction};
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

use super::list::status_badge_class;

fn fmt_requested(ts: Option<chrono::DateTime<chrono::Utc>>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "not requested".into())
}

#[component]
pub fn ReservationDetailPage(id: i64) -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let router = use_router();
    let service = ReservationService::new(api.clone());
    let room_service = RoomService::new(api);

    let (reservation, set_reservation) = signal(Option::<Reservation>::None);
    let (rooms, set_rooms) = signal(Vec::<Room>::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (busy, set_busy) = signal(false);
    let (loading, set_loading) = signal(true);
    let new_room_id = RwSignal::new(Option::<i64>::None);

    // Approval drafts for the early check-in / late check-out panel.
    let early_approved = RwSignal::new(false);
    let early_fee = RwSignal::new(String::new());
    let late_approved = RwSignal::new(false);
    let late_fee = RwSignal::new(String::new());

    let load_drafts = move |r: &Reservation| {
        early_approved.set(r.is_early_check_in_approved.unwrap_or(false));
        early_fee.set(r.early_check_in_fee.clone().unwrap_or_default());
        late_approved.set(r.is_late_check_out_approved.unwrap_or(false));
        late_fee.set(r.late_check_out_fee.clone().unwrap_or_default());
    };

    // Initial load: the reservation plus the room list the change-room
    // select will offer.
    {
        let service = service.clone();
        spawn_local(async move {
            let (res, room_list) = futures::join!(service.get(id), room_service.list_all());
            match res {
                Ok(r) => {
                    load_drafts(&r);
                    set_reservation.set(Some(r));
                }
                Err(e) => set_error_msg.set(Some(e.message())),
            }
            if let Ok(list) = room_list {
                set_rooms.set(list);
            }
            set_loading.set(false);
        });
    }

    // Every mutation re-renders straight from the reservation the server
    // returns, so the action row always reflects the new state.
    let apply = move |result: frontdesk_shared::ApiResult<Reservation>| {
        match result {
            Ok(updated) => {
                load_drafts(&updated);
                set_reservation.set(Some(updated));
            }
            Err(e) => set_error_msg.set(Some(e.message())),
        }
        set_busy.set(false);
    };

    let transition = {
        let service = service.clone();
        move |action: StatusAction| {
            let service = service.clone();
            set_busy.set(true);
            set_error_msg.set(None);
            spawn_local(async move {
                apply(service.transition(id, action).await);
            });
        }
    };

    let on_change_room = {
        let service = service.clone();
        move |_| {
            let Some(room_id) = new_room_id.get_untracked() else {
                return;
            };
            let service = service.clone();
            set_busy.set(true);
            set_error_msg.set(None);
            spawn_local(async move {
                apply(service.change_room(id, room_id).await);
            });
        }
    };

    let on_save_requests = {
        let service = service.clone();
        move |_| {
            let service = service.clone();
            let fee_or_none = |s: String| {
                let s = s.trim().to_owned();
                if s.is_empty() { None } else { Some(s) }
            };
            let body = SpecialRequestsUpdate {
                is_early_check_in_approved: Some(early_approved.get_untracked()),
                early_check_in_fee: fee_or_none(early_fee.get_untracked()),
                is_late_check_out_approved: Some(late_approved.get_untracked()),
                late_check_out_fee: fee_or_none(late_fee.get_untracked()),
                ..Default::default()
            };
            set_busy.set(true);
            set_error_msg.set(None);
            spawn_local(async move {
                apply(service.manage_special_requests(id, &body).await);
            });
        }
    };

    let on_delete = {
        let service = service.clone();
        move |_| {
            let service = service.clone();
            set_busy.set(true);
            set_error_msg.set(None);
            spawn_local(async move {
                match service.remove(id).await {
                    Ok(()) => router.navigate(AppRoute::Reservations),
                    Err(e) => {
                        set_error_msg.set(Some(e.message()));
                        set_busy.set(false);
                    }
                }
            });
        }
    };

    let is_admin = move || session.role_signal().get() == Some(Role::Admin);

    let field = |label: &'static str, value: String| {
        view! {
            <div>
                <div class="text-sm text-base-content/50">{label}</div>
                <div class="font-medium">{value}</div>
            </div>
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-4xl mx-auto space-y-6">
                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1">
                        <button
                            class="btn btn-ghost"
                            on:click=move |_| router.navigate(AppRoute::Reservations)
                        >
                            "← Reservations"
                        </button>
                    </div>
                    <div class="flex-none gap-2">
                        <button
                            class="btn btn-outline btn-sm"
                            on:click=move |_| router.navigate(AppRoute::ReservationEdit(id))
                        >
                            "Edit"
                        </button>
                        <Show when=is_admin>
                            <button
                                class="btn btn-error btn-outline btn-sm"
                                disabled=move || busy.get()
                                on:click=on_delete.clone()
                            >
                                "Delete"
                            </button>
                        </Show>
                    </div>
                </div>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <Show when=move || loading.get()>
                    <div class="flex justify-center py-16">
                        <span class="loading loading-spinner loading-lg"></span>
                    </div>
                </Show>

                {move || {
                    reservation.get().map(|r| {
                        let status = r.status;
                        let nights = r.nights();
                        let transition = transition.clone();
                        let check_in = {
                            let t = transition.clone();
                            move |_| t(StatusAction::CheckIn)
                        };
                        let check_out = {
                            let t = transition.clone();
                            move |_| t(StatusAction::CheckOut)
                        };
                        let cancel = move |_| transition(StatusAction::Cancel);
                        view! {
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body">
                                    <div class="flex items-center justify-between">
                                        <h2 class="card-title">
                                            {format!("Reservation #{}", r.id)}
                                        </h2>
                                        <span class=status_badge_class(status)>
                                            {status.label()}
                                        </span>
                                    </div>

                                    <div class="grid grid-cols-2 md:grid-cols-3 gap-4 mt-4">
                                        {field("Guest", r.guest.full_name())}
                                        {field("Email", r.guest.email.clone())}
                                        {field(
                                            "Room",
                                            format!("{} ({})", r.room.room_number, r.room.room_type),
                                        )}
                                        {field("Check-in", r.check_in_date.to_string())}
                                        {field("Check-out", r.check_out_date.to_string())}
                                        {field("Nights", nights.to_string())}
                                        {field(
                                            "Adults / Children",
                                            format!("{} / {}", r.number_of_adults, r.number_of_children),
                                        )}
                                        {field(
                                            "Total price",
                                            r.total_price.clone().unwrap_or_else(|| "-".into()),
                                        )}
                                        {field(
                                            "Group",
                                            r.group_name
                                                .clone()
                                                .filter(|s| !s.is_empty())
                                                .unwrap_or_else(|| "-".into()),
                                        )}
                                    </div>

                                    <Show when={
                                        let notes = r.notes.clone();
                                        move || notes.as_deref().is_some_and(|n| !n.is_empty())
                                    }>
                                        <div class="mt-4">
                                            <div class="text-sm text-base-content/50">"Notes"</div>
                                            <p class="whitespace-pre-wrap">
                                                {r.notes.clone().unwrap_or_default()}
                                            </p>
                                        </div>
                                    </Show>

                                    // ====== 状态流转操作 ======
                                    <div class="card-actions mt-6 gap-2">
                                        <Show when=move || status.can_check_in()>
                                            <button
                                                class="btn btn-success"
                                                disabled=move || busy.get()
                                                on:click=check_in.clone()
                                            >
                                                "Check In"
                                            </button>
                                        </Show>
                                        <Show when=move || status.can_check_out()>
                                            <button
                                                class="btn btn-info"
                                                disabled=move || busy.get()
                                                on:click=check_out.clone()
                                            >
                                                "Check Out"
                                            </button>
                                        </Show>
                                        <Show when=move || status.can_cancel()>
                                            <button
                                                class="btn btn-error btn-outline"
                                                disabled=move || busy.get()
                                                on:click=cancel.clone()
                                            >
                                                "Cancel"
                                            </button>
                                        </Show>
                                    </div>
                                </div>
                            </div>
                        }
                    })
                }}

                <Show when=move || reservation.with(|r| r.is_some())>
                    <div class="grid md:grid-cols-2 gap-6">
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <h3 class="card-title text-base">"Change Room"</h3>
                                <select
                                    class="select select-bordered w-full"
                                    on:change=move |ev| {
                                        new_room_id.set(event_target_value(&ev).parse().ok());
                                    }
                                >
                                    <option value="">"Select a room"</option>
                                    <For
                                        each=move || rooms.get()
                                        key=|room: &Room| room.id
                                        children=move |room| {
                                            view! {
                                                <option value=room.id.to_string()>
                                                    {format!(
                                                        "{} - {} ({}/night)",
                                                        room.room_number,
                                                        room.room_type,
                                                        room.price_per_night,
                                                    )}
                                                </option>
                                            }
                                        }
                                    />
                                </select>
                                <div class="card-actions justify-end">
                                    <button
                                        class="btn btn-primary btn-sm"
                                        disabled=move || busy.get() || new_room_id.get().is_none()
                                        on:click=on_change_room.clone()
                                    >
                                        "Move"
                                    </button>
                                </div>
                            </div>
                        </div>

                        // Early check-in / late check-out approvals
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <h3 class="card-title text-base">"Special Requests"</h3>
                                <div class="space-y-3">
                                    <div>
                                        <div class="text-sm text-base-content/50">
                                            "Early check-in: "
                                            {move || {
                                                reservation.with(|r| {
                                                    fmt_requested(
                                                        r.as_ref()
                                                            .and_then(|r| r.requested_early_check_in),
                                                    )
                                                })
                                            }}
                                        </div>
                                        <div class="flex items-center gap-3 mt-1">
                                            <label class="label cursor-pointer gap-2">
                                                <input
                                                    type="checkbox"
                                                    class="checkbox checkbox-sm"
                                                    prop:checked=move || early_approved.get()
                                                    on:change=move |ev| {
                                                        early_approved.set(event_target_checked(&ev));
                                                    }
                                                />
                                                <span class="label-text">"Approved"</span>
                                            </label>
                                            <input
                                                type="text"
                                                placeholder="fee"
                                                class="input input-bordered input-sm w-24"
                                                prop:value=move || early_fee.get()
                                                on:input=move |ev| early_fee.set(event_target_value(&ev))
                                            />
                                        </div>
                                    </div>
                                    <div>
                                        <div class="text-sm text-base-content/50">
                                            "Late check-out: "
                                            {move || {
                                                reservation.with(|r| {
                                                    fmt_requested(
                                                        r.as_ref()
                                                            .and_then(|r| r.requested_late_check_out),
                                                    )
                                                })
                                            }}
                                        </div>
                                        <div class="flex items-center gap-3 mt-1">
                                            <label class="label cursor-pointer gap-2">
                                                <input
                                                    type="checkbox"
                                                    class="checkbox checkbox-sm"
                                                    prop:checked=move || late_approved.get()
                                                    on:change=move |ev| {
                                                        late_approved.set(event_target_checked(&ev));
                                                    }
                                                />
                                                <span class="label-text">"Approved"</span>
                                            </label>
                                            <input
                                                type="text"
                                                placeholder="fee"
                                                class="input input-bordered input-sm w-24"
                                                prop:value=move || late_fee.get()
                                                on:input=move |ev| late_fee.set(event_target_value(&ev))
                                            />
                                        </div>
                                    </div>
                                </div>
                                <div class="card-actions justify-end">
                                    <button
                                        class="btn btn-primary btn-sm"
                                        disabled=move || busy.get()
                                        on:click=on_save_requests.clone()
                                    >
                                        "Save"
                                    </button>
                                </div>
                            </div>
                        </div>
                    </div>
                </Show>
            </div>
        </div>
    }
}
