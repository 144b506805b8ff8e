use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;

use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_AUTH;
use crate::shared::toast::use_toasts;
use crate::system::auth::context::{do_logout, use_auth};
use crate::system::auth::LOGIN_PATH;

/// Пауза перед переходом на страницу входа
pub const LOGOUT_REDIRECT_DELAY_MS: u32 = 2_500;

#[component]
pub fn LogoutPage() -> impl IntoView {
    let toasts = use_toasts();
    let (_, set_auth_state) = use_auth();
    let (done, set_done) = signal(false);

    do_logout(set_auth_state);
    toasts.info("You have been logged out");

    spawn_local(async move {
        TimeoutFuture::new(LOGOUT_REDIRECT_DELAY_MS).await;
        set_done.set(true);
    });

    view! {
        <PageFrame page_id="sys_logout--auth" category=PAGE_CAT_AUTH>
            <div class="auth-container">
                {move || done.get().then(|| view! { <Redirect path=LOGIN_PATH /> })}
                <div class="auth-box">
                    <h1 class="auth-box__title">"Signed out"</h1>
                    <p class="page-message">"Redirecting to the login page..."</p>
                </div>
            </div>
        </PageFrame>
    }
}
