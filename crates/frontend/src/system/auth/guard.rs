use leptos::prelude::*;
use leptos_router::components::Redirect;

use super::context::{is_authenticated, use_auth};
use super::LOGIN_PATH;

/// Renders children only while a token is stored; otherwise replaces the
/// route with the login page.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || {
                auth_state.track();
                is_authenticated()
            }
            fallback=|| view! { <Redirect path=LOGIN_PATH /> }
        >
            {children()}
        </Show>
    }
}

/// Hides admin screens from accounts without the admin claim.
/// The backend still authorizes every call.
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().is_admin()
            fallback=|| view! { <div class="page-message">"Access denied. Admin privileges required."</div> }
        >
            {children()}
        </Show>
    }
}
