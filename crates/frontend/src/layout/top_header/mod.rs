//! TopHeader component - application top navigation bar.
//!
//! Contains:
//! - Drawer button (phones only)
//! - Application title
//! - Current username and the admin-only Register link

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use leptos::prelude::*;
use leptos_router::components::A;

pub const APP_TITLE: &str = "📋 My Dashboard";

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();

    let username = move || {
        auth_state
            .get()
            .username()
            .unwrap_or_else(|| "Guest".to_string())
    };

    view! {
        <header class="top-header">
            <div class="top-header__brand">
                <Show when=move || ctx.is_phone.get()>
                    <button
                        class="top-header__icon-btn"
                        on:click=move |_| ctx.toggle_sidebar()
                        title="Menu"
                    >
                        {icon("menu")}
                    </button>
                </Show>
                <span class="top-header__title">{APP_TITLE}</span>
            </div>

            <div class="top-header__actions">
                <Show when=move || auth_state.get().is_admin()>
                    <A href="/register" attr:class="top-header__link" attr:title="Register a new user">
                        {icon("user-plus")}
                        <span>"Register"</span>
                    </A>
                </Show>
                <div class="top-header__user">
                    {icon("user")}
                    <span>{username}</span>
                </div>
            </div>
        </header>
    }
}
