use chrono::NaiveDate;
use frontdesk_shared::{
    FieldErrors, Guest, GuestCreate, ReservationCreate, ReservationUpdate, Room, RoomType,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::services::{GuestService, ReservationService, RoomService, RoomTypeService};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// Create / edit form. `id` present switches to edit mode: the existing
/// reservation is loaded and the submit turns into a partial update.
#[component]
pub fn ReservationFormPage(#[prop(optional)] id: Option<i64>) -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let service = ReservationService::new(api.clone());
    let guest_service = GuestService::new(api.clone());
    let room_service = RoomService::new(api.clone());
    let type_service = RoomTypeService::new(api);

    let (guests, set_guests) = signal(Vec::<Guest>::new());
    let (rooms, set_rooms) = signal(Vec::<Room>::new());
    let (room_types, set_room_types) = signal(Vec::<RoomType>::new());
    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);
    let (general_error, set_general_error) = signal(Option::<String>::None);
    let field_errors = RwSignal::new(FieldErrors::new());

    // ====== 表单字段 ======
    let guest_id = RwSignal::new(Option::<i64>::None);
    let room_id = RwSignal::new(Option::<i64>::None);
    let type_filter = RwSignal::new(String::new());
    let check_in = RwSignal::new(String::new());
    let check_out = RwSignal::new(String::new());
    let adults = RwSignal::new("1".to_string());
    let children = RwSignal::new("0".to_string());
    let notes = RwSignal::new(String::new());
    let group_name = RwSignal::new(String::new());

    // Inline "quick add" guest box
    let show_new_guest = RwSignal::new(false);
    let ng_first = RwSignal::new(String::new());
    let ng_last = RwSignal::new(String::new());
    let ng_email = RwSignal::new(String::new());

    {
        let service = service.clone();
        spawn_local(async move {
            let existing = async {
                match id {
                    Some(rid) => Some(service.get(rid).await),
                    None => None,
                }
            };
            let (guest_list, room_list, type_list, existing) = futures::join!(
                guest_service.list_all(),
                room_service.list_all(),
                type_service.list(),
                existing,
            );
            match guest_list {
                Ok(list) => set_guests.set(list),
                Err(e) => set_general_error.set(Some(e.message())),
            }
            if let Ok(list) = room_list {
                set_rooms.set(list);
            }
            if let Ok(list) = type_list {
                set_room_types.set(list);
            }
            if let Some(result) = existing {
                match result {
                    Ok(r) => {
                        guest_id.set(Some(r.guest.id));
                        room_id.set(Some(r.room.id));
                        check_in.set(r.check_in_date.to_string());
                        check_out.set(r.check_out_date.to_string());
                        adults.set(r.number_of_adults.to_string());
                        children.set(r.number_of_children.to_string());
                        notes.set(r.notes.unwrap_or_default());
                        group_name.set(r.group_name.unwrap_or_default());
                    }
                    Err(e) => set_general_error.set(Some(e.message())),
                }
            }
            set_loading.set(false);
        });
    }

    let filtered_rooms = move || {
        let wanted = type_filter.get();
        rooms
            .get()
            .into_iter()
            .filter(|r| wanted.is_empty() || r.room_type == wanted)
            .collect::<Vec<_>>()
    };

    let on_add_guest = {
        let guest_service = GuestService::new(use_api());
        move |_| {
            let guest_service = guest_service.clone();
            let payload = GuestCreate {
                first_name: ng_first.get_untracked().trim().to_owned(),
                last_name: ng_last.get_untracked().trim().to_owned(),
                email: ng_email.get_untracked().trim().to_owned(),
                phone_number: None,
                address: None,
            };
            if payload.first_name.is_empty() || payload.email.is_empty() {
                set_general_error.set(Some("guest name and email are required".into()));
                return;
            }
            set_saving.set(true);
            spawn_local(async move {
                match guest_service.create(&payload).await {
                    Ok(guest) => {
                        guest_id.set(Some(guest.id));
                        set_guests.update(|list| list.push(guest));
                        show_new_guest.set(false);
                        ng_first.set(String::new());
                        ng_last.set(String::new());
                        ng_email.set(String::new());
                    }
                    Err(e) => set_general_error.set(Some(e.message())),
                }
                set_saving.set(false);
            });
        }
    };
    let on_add_guest = StoredValue::new_local(on_add_guest);

    let on_submit = {
        let service = service.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            set_general_error.set(None);
            field_errors.set(FieldErrors::new());

            // Local parse checks; everything semantic is the backend's call.
            let mut local = FieldErrors::new();
            let parse_date = |key: &str, value: String, local: &mut FieldErrors| {
                match NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
                    Ok(d) => Some(d),
                    Err(_) => {
                        local.insert(key.to_owned(), vec!["enter a valid date".into()]);
                        None
                    }
                }
            };
            let in_date = parse_date("check_in_date", check_in.get_untracked(), &mut local);
            let out_date = parse_date("check_out_date", check_out.get_untracked(), &mut local);
            let n_adults: u32 = adults.get_untracked().parse().unwrap_or(1);
            let n_children: u32 = children.get_untracked().parse().unwrap_or(0);
            if guest_id.get_untracked().is_none() {
                local.insert("guest_id".into(), vec!["select a guest".into()]);
            }
            if room_id.get_untracked().is_none() {
                local.insert("room_id".into(), vec!["select a room".into()]);
            }
            if !local.is_empty() {
                field_errors.set(local);
                return;
            }
            let (in_date, out_date) = (in_date.unwrap(), out_date.unwrap());
            let notes_value = notes.get_untracked();
            let group_value = group_name.get_untracked();

            let service = service.clone();
            set_saving.set(true);
            spawn_local(async move {
                let result = match id {
                    None => {
                        let payload = ReservationCreate {
                            guest_id: guest_id.get_untracked().unwrap_or_default(),
                            room_id: room_id.get_untracked().unwrap_or_default(),
                            check_in_date: in_date,
                            check_out_date: out_date,
                            number_of_adults: n_adults,
                            number_of_children: n_children,
                            notes: Some(notes_value).filter(|s| !s.trim().is_empty()),
                            group_name: Some(group_value).filter(|s| !s.trim().is_empty()),
                            requested_early_check_in: None,
                            requested_late_check_out: None,
                        };
                        service.create(&payload).await
                    }
                    Some(rid) => {
                        let payload = ReservationUpdate {
                            guest_id: guest_id.get_untracked(),
                            room_id: room_id.get_untracked(),
                            check_in_date: Some(in_date),
                            check_out_date: Some(out_date),
                            number_of_adults: Some(n_adults),
                            number_of_children: Some(n_children),
                            notes: Some(notes_value),
                            group_name: Some(group_value),
                            ..Default::default()
                        };
                        service.update(rid, &payload).await
                    }
                };
                match result {
                    Ok(saved) => router.navigate(AppRoute::ReservationDetail(saved.id)),
                    Err(e) => {
                        if let Some(fields) = e.field_errors() {
                            field_errors.set(fields.clone());
                        } else {
                            set_general_error.set(Some(e.message()));
                        }
                        set_saving.set(false);
                    }
                }
            });
        }
    };

    // Inline per-field backend errors
    let field_hint = move |key: &'static str| {
        view! {
            <Show when=move || field_errors.with(|f| f.contains_key(key))>
                <span class="label-text-alt text-error">
                    {move || {
                        field_errors.with(|f| f.get(key).map(|v| v.join("; ")).unwrap_or_default())
                    }}
                </span>
            </Show>
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-2xl mx-auto space-y-6">
                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1">
                        <button
                            class="btn btn-ghost"
                            on:click=move |_| router.navigate(AppRoute::Reservations)
                        >
                            "← Reservations"
                        </button>
                    </div>
                    <div class="flex-none">
                        <span class="text-lg font-semibold pr-4">
                            {if id.is_some() { "Edit Reservation" } else { "New Reservation" }}
                        </span>
                    </div>
                </div>

                <Show when=move || general_error.get().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || general_error.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <Show when=move || loading.get()>
                    <div class="flex justify-center py-16">
                        <span class="loading loading-spinner loading-lg"></span>
                    </div>
                </Show>

                <Show when=move || !loading.get()>
                    <form class="card bg-base-100 shadow-xl" on:submit=on_submit.clone()>
                        <div class="card-body space-y-2">
                            <div class="form-control">
                                <label class="label">
                                    <span class="label-text">"Guest"</span>
                                    {field_hint("guest_id")}
                                </label>
                                <div class="flex gap-2">
                                    <select
                                        class="select select-bordered grow"
                                        on:change=move |ev| {
                                            guest_id.set(event_target_value(&ev).parse().ok());
                                        }
                                    >
                                        <option value="" selected=move || guest_id.get().is_none()>
                                            "Select a guest"
                                        </option>
                                        <For
                                            each=move || guests.get()
                                            key=|g: &Guest| g.id
                                            children=move |g| {
                                                let gid = g.id;
                                                view! {
                                                    <option
                                                        value=gid.to_string()
                                                        selected=move || guest_id.get() == Some(gid)
                                                    >
                                                        {format!("{} <{}>", g.full_name(), g.email)}
                                                    </option>
                                                }
                                            }
                                        />
                                    </select>
                                    <button
                                        type="button"
                                        class="btn btn-outline"
                                        on:click=move |_| show_new_guest.update(|v| *v = !*v)
                                    >
                                        "+"
                                    </button>
                                </div>
                            </div>

                            <Show when=move || show_new_guest.get()>
                                <div class="border border-base-300 rounded-box p-4 space-y-2">
                                    <div class="grid grid-cols-2 gap-2">
                                        <input
                                            type="text"
                                            placeholder="First name"
                                            class="input input-bordered input-sm"
                                            prop:value=move || ng_first.get()
                                            on:input=move |ev| ng_first.set(event_target_value(&ev))
                                        />
                                        <input
                                            type="text"
                                            placeholder="Last name"
                                            class="input input-bordered input-sm"
                                            prop:value=move || ng_last.get()
                                            on:input=move |ev| ng_last.set(event_target_value(&ev))
                                        />
                                    </div>
                                    <input
                                        type="email"
                                        placeholder="Email"
                                        class="input input-bordered input-sm w-full"
                                        prop:value=move || ng_email.get()
                                        on:input=move |ev| ng_email.set(event_target_value(&ev))
                                    />
                                    <button
                                        type="button"
                                        class="btn btn-sm btn-primary"
                                        disabled=move || saving.get()
                                        on:click=move |ev| on_add_guest.with_value(|f| f(ev))
                                    >
                                        "Add Guest"
                                    </button>
                                </div>
                            </Show>

                            <div class="grid grid-cols-2 gap-4">
                                <div class="form-control">
                                    <label class="label">
                                        <span class="label-text">"Room type"</span>
                                    </label>
                                    <select
                                        class="select select-bordered"
                                        on:change=move |ev| type_filter.set(event_target_value(&ev))
                                    >
                                        <option value="">"All types"</option>
                                        <For
                                            each=move || room_types.get()
                                            key=|t: &RoomType| t.id
                                            children=move |t| {
                                                view! {
                                                    <option value=t.name.clone()>
                                                        {format!("{} (sleeps {})", t.name, t.capacity)}
                                                    </option>
                                                }
                                            }
                                        />
                                    </select>
                                </div>
                                <div class="form-control">
                                    <label class="label">
                                        <span class="label-text">"Room"</span>
                                        {field_hint("room_id")}
                                    </label>
                                    <select
                                        class="select select-bordered"
                                        on:change=move |ev| {
                                            room_id.set(event_target_value(&ev).parse().ok());
                                        }
                                    >
                                        <option value="" selected=move || room_id.get().is_none()>
                                            "Select a room"
                                        </option>
                                        <For
                                            each=filtered_rooms
                                            key=|r: &Room| r.id
                                            children=move |r| {
                                                let rid = r.id;
                                                view! {
                                                    <option
                                                        value=rid.to_string()
                                                        selected=move || room_id.get() == Some(rid)
                                                    >
                                                        {format!(
                                                            "{} - {} ({}/night)",
                                                            r.room_number,
                                                            r.room_type,
                                                            r.price_per_night,
                                                        )}
                                                    </option>
                                                }
                                            }
                                        />
                                    </select>
                                </div>
                            </div>

                            <div class="grid grid-cols-2 gap-4">
                                <div class="form-control">
                                    <label class="label">
                                        <span class="label-text">"Check-in"</span>
                                        {field_hint("check_in_date")}
                                    </label>
                                    <input
                                        type="date"
                                        class="input input-bordered"
                                        prop:value=move || check_in.get()
                                        on:change=move |ev| check_in.set(event_target_value(&ev))
                                    />
                                </div>
                                <div class="form-control">
                                    <label class="label">
                                        <span class="label-text">"Check-out"</span>
                                        {field_hint("check_out_date")}
                                    </label>
                                    <input
                                        type="date"
                                        class="input input-bordered"
                                        prop:value=move || check_out.get()
                                        on:change=move |ev| check_out.set(event_target_value(&ev))
                                    />
                                </div>
                            </div>

                            <div class="grid grid-cols-2 gap-4">
                                <div class="form-control">
                                    <label class="label">
                                        <span class="label-text">"Adults"</span>
                                        {field_hint("number_of_adults")}
                                    </label>
                                    <input
                                        type="number"
                                        min="1"
                                        class="input input-bordered"
                                        prop:value=move || adults.get()
                                        on:input=move |ev| adults.set(event_target_value(&ev))
                                    />
                                </div>
                                <div class="form-control">
                                    <label class="label">
                                        <span class="label-text">"Children"</span>
                                        {field_hint("number_of_children")}
                                    </label>
                                    <input
                                        type="number"
                                        min="0"
                                        class="input input-bordered"
                                        prop:value=move || children.get()
                                        on:input=move |ev| children.set(event_target_value(&ev))
                                    />
                                </div>
                            </div>

                            <div class="form-control">
                                <label class="label">
                                    <span class="label-text">"Group name"</span>
                                    {field_hint("group_name")}
                                </label>
                                <input
                                    type="text"
                                    placeholder="optional"
                                    class="input input-bordered"
                                    prop:value=move || group_name.get()
                                    on:input=move |ev| group_name.set(event_target_value(&ev))
                                />
                            </div>

                            <div class="form-control">
                                <label class="label">
                                    <span class="label-text">"Notes"</span>
                                    {field_hint("notes")}
                                </label>
                                <textarea
                                    class="textarea textarea-bordered"
                                    rows="3"
                                    prop:value=move || notes.get()
                                    on:input=move |ev| notes.set(event_target_value(&ev))
                                ></textarea>
                            </div>

                            <div class="card-actions justify-end mt-2">
                                <button
                                    type="button"
                                    class="btn btn-ghost"
                                    on:click=move |_| router.navigate(AppRoute::Reservations)
                                >
                                    "Cancel"
                                </button>
                                <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                                    <Show when=move || saving.get()>
                                        <span class="loading loading-spinner loading-sm"></span>
                                    </Show>
                                    {if id.is_some() { "Save Changes" } else { "Create Reservation" }}
                                </button>
                            </div>
                        </div>
                    </form>
                </Show>
            </div>
        </div>
    }
}
