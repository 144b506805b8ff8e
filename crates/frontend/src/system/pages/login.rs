use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Redirect, A};
use thaw::*;

use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_AUTH;
use crate::shared::toast::use_toasts;
use crate::system::auth::context::{do_login, is_authenticated, use_auth};
use crate::system::auth::storage::BrowserSessionStore;

#[component]
pub fn LoginPage() -> impl IntoView {
    let store = BrowserSessionStore::browser();
    let toasts = use_toasts();
    let (_, set_auth_state) = use_auth();

    let username = RwSignal::new(store.saved_username().unwrap_or_default());
    let password = RwSignal::new(String::new());
    // Галочка включена, если прошлый вход был с "запомнить меня"
    let remember = RwSignal::new(store.has_durable_session());
    let (is_loading, set_is_loading) = signal(false);
    let (signed_in, set_signed_in) = signal(false);

    let submit = move || {
        let username_val = username.get_untracked().trim().to_string();
        let password_val = password.get_untracked();
        if username_val.is_empty() || password_val.is_empty() {
            toasts.error("Enter username and password");
            return;
        }

        set_is_loading.set(true);
        spawn_local(async move {
            let result = do_login(
                username_val,
                password_val,
                remember.get_untracked(),
                set_auth_state,
            )
            .await;
            set_is_loading.set(false);
            match result {
                Ok(()) => {
                    toasts.success("Welcome back");
                    set_signed_in.set(true);
                }
                Err(e) => {
                    log::warn!("login failed: {}", e);
                    toasts.error(e.user_message("Login failed"));
                }
            }
        });
    };

    if is_authenticated() {
        return view! { <Redirect path="/" /> }.into_any();
    }

    view! {
        <PageFrame page_id="sys_login--auth" category=PAGE_CAT_AUTH>
            <div class="auth-container">
                {move || signed_in.get().then(|| view! { <Redirect path="/" /> })}
                <div class="auth-box">
                    <h1 class="auth-box__title">"Sign in"</h1>

                    <div
                        class="record-form record-form--stacked"
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                submit();
                            }
                        }
                    >
                        <div class="form__group">
                            <label class="form__label">"Username"</label>
                            <Input value=username placeholder="username" />
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Password"</label>
                            <Input value=password input_type=InputType::Password placeholder="password" />
                        </div>
                        <Checkbox checked=remember label="Remember me" />
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| submit()
                            disabled=Signal::derive(move || is_loading.get())
                        >
                            {move || if is_loading.get() { "Signing in..." } else { "Sign in" }}
                        </Button>
                    </div>

                    <div class="auth-box__footer">
                        "No account? " <A href="/register">"Register"</A>
                    </div>
                </div>
            </div>
        </PageFrame>
    }
    .into_any()
}
