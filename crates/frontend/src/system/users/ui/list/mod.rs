mod state;

use contracts::system::users::User;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use thaw::*;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    cmp_text, highlight_matches, upsert_record, Searchable, SortHeader, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::shared::toast::use_toasts;
use crate::system::auth::guard::RequireAdmin;
use crate::system::users::api;
use state::{create_state, visible_users};

impl Searchable for User {
    fn search_fields(&self) -> Vec<String> {
        vec![self.username.clone(), self.email.clone()]
    }
}

impl Sortable for User {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "email" => cmp_text(&self.email, &other.email),
            "role" => self.role_label().cmp(other.role_label()),
            "is_active" => self.is_active.cmp(&other.is_active),
            "date_joined" => self.date_joined.cmp(&other.date_joined),
            _ => cmp_text(&self.username, &other.username),
        }
    }
}

fn status_label(user: &User) -> &'static str {
    if user.is_active {
        "Active"
    } else {
        "Inactive"
    }
}

#[component]
pub fn UsersListPage() -> impl IntoView {
    view! {
        <RequireAdmin>
            <UsersList />
        </RequireAdmin>
    }
}

#[component]
fn UsersList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toasts = use_toasts();
    let state = create_state();
    let all_users: RwSignal<Vec<User>> = RwSignal::new(Vec::new());
    let (loading, set_loading) = signal(false);
    // id учётки, для которой идёт PATCH
    let pending: RwSignal<Option<i64>> = RwSignal::new(None);

    let refresh_view = move || {
        let rows = all_users.with_untracked(|all| state.with_untracked(|s| visible_users(all, s)));
        state.update(|s| s.items = rows);
    };

    let load_data = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_users().await {
                Ok(data) => {
                    all_users.set(data);
                    state.update(|s| s.is_loaded = true);
                    refresh_view();
                }
                Err(e) => {
                    log::error!("failed to fetch users: {}", e);
                    toasts.error(e.user_message("Failed to fetch users"));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_data();
        }
    });

    let search_signal = RwSignal::new(String::new());
    Effect::new(move |_| {
        let q = search_signal.get();
        state.update(|s| s.search_query = q);
        refresh_view();
    });

    let toggle_sort = move |field: &'static str| {
        state.update(|s| {
            if s.sort_field == field {
                s.sort_ascending = !s.sort_ascending;
            } else {
                s.sort_field = field.to_string();
                s.sort_ascending = true;
            }
        });
        refresh_view();
    };

    let toggle_active = move |user: User| {
        let target = !user.is_active;
        pending.set(Some(user.id));
        spawn_local(async move {
            match api::set_active(user.id, target).await {
                Ok(updated) => {
                    let message = if updated.is_active {
                        format!("{} activated", updated.username)
                    } else {
                        format!("{} deactivated", updated.username)
                    };
                    all_users.update(|items| upsert_record(items, updated));
                    refresh_view();
                    toasts.success(message);
                }
                Err(e) => {
                    log::error!("failed to update user {}: {}", user.id, e);
                    toasts.error(e.user_message("Failed to update user"));
                }
            }
            pending.set(None);
        });
    };

    let sort_field = Signal::derive(move || state.with(|s| s.sort_field.clone()));
    let sort_ascending = Signal::derive(move || state.with(|s| s.sort_ascending));

    let activation_button = move |user: User| {
        let id = user.id;
        let label = if user.is_active { "Deactivate" } else { "Activate" };
        view! {
            <Button
                size=ButtonSize::Small
                appearance=ButtonAppearance::Secondary
                on_click=move |_| toggle_active(user.clone())
                disabled=Signal::derive(move || pending.get() == Some(id))
            >
                {label}
            </Button>
        }
    };

    let status_badge = |user: &User| {
        let class = if user.is_active {
            "badge badge--success"
        } else {
            "badge badge--muted"
        };
        view! { <span class=class>{status_label(user)}</span> }
    };

    view! {
        <PageFrame page_id="sys_users--list" category=PAGE_CAT_SYSTEM>
            <div class="page__toolbar">
                <div class="page__header-left">
                    <h1 class="page__title">"Users"</h1>
                    <Badge>{move || state.get().items.len().to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="filter-panel">
                <Input value=search_signal placeholder="Search username or email..." />
            </div>

            <Show when=move || loading.get() && !state.get().is_loaded>
                <Spinner />
            </Show>

            {move || {
                let term = state.with(|s| s.search_query.clone());
                let rows = state.get().items;
                if rows.is_empty() && state.with(|s| s.is_loaded) {
                    return view! { <div class="page-message">"No users found."</div> }.into_any();
                }
                if ctx.is_phone.get() {
                    view! {
                        <div class="record-cards">
                            {rows.into_iter().map(|user| {
                                let badge = status_badge(&user);
                                view! {
                                    <div class="record-card">
                                        <div class="record-card__title">{highlight_matches(&user.username, &term)}</div>
                                        <div class="record-card__meta">{highlight_matches(&user.email, &term)}</div>
                                        <div class="record-card__row">{user.role_label()} " · " {badge}</div>
                                        {activation_button(user.clone())}
                                    </div>
                                }
                            }).collect_view()}
                        </div>
                    }.into_any()
                } else {
                    view! {
                        <div class="table-wrapper">
                            <Table attr:style="width: 100%;">
                                <TableHeader>
                                    <TableRow>
                                        <TableHeaderCell>
                                            <SortHeader label="Username" field="username" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>
                                            <SortHeader label="Email" field="email" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>
                                            <SortHeader label="Role" field="role" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>
                                            <SortHeader label="Status" field="is_active" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>
                                            <SortHeader label="Joined" field="date_joined" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>""</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    {rows.into_iter().map(|user| {
                                        let username = highlight_matches(&user.username, &term);
                                        let email = highlight_matches(&user.email, &term);
                                        let role = user.role_label();
                                        let badge = status_badge(&user);
                                        let joined = user.date_joined.as_deref().map(format_date).unwrap_or_else(|| "-".to_string());
                                        let button = activation_button(user);
                                        view! {
                                            <TableRow>
                                                <TableCell>{username}</TableCell>
                                                <TableCell>{email}</TableCell>
                                                <TableCell>{role}</TableCell>
                                                <TableCell>{badge}</TableCell>
                                                <TableCell>{joined}</TableCell>
                                                <TableCell>{button}</TableCell>
                                            </TableRow>
                                        }
                                    }).collect_view()}
                                </TableBody>
                            </Table>
                        </div>
                    }.into_any()
                }
            }}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::state::{visible_users, UsersListState};
    use super::*;

    fn user(id: i64, username: &str, email: &str, is_admin: bool, is_staff_user: bool) -> User {
        User {
            id,
            username: username.to_string(),
            email: email.to_string(),
            is_admin,
            is_staff_user,
            is_active: true,
            date_joined: None,
        }
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(user(1, "a", "", true, true).role_label(), "Admin");
        assert_eq!(user(2, "s", "", false, true).role_label(), "Staff");
        assert_eq!(user(3, "u", "", false, false).role_label(), "User");
    }

    #[test]
    fn test_search_username_or_email() {
        let all = vec![
            user(1, "amina", "amina@shop.tz", true, false),
            user(2, "juma", "juma@mail.com", false, true),
            user(3, "neema", "owner@shop.tz", false, false),
        ];
        let state = UsersListState {
            search_query: "SHOP.TZ".into(),
            ..Default::default()
        };
        let ids: Vec<i64> = visible_users(&all, &state).iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_activation_result_replaces_row_in_place() {
        let mut all = vec![
            user(1, "amina", "", false, false),
            user(2, "juma", "", false, false),
        ];
        let mut updated = all[1].clone();
        updated.is_active = false;
        upsert_record(&mut all, updated);
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].id, 2);
        assert_eq!(status_label(&all[1]), "Inactive");
    }
}
