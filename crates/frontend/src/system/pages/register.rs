use contracts::system::auth::RegisterRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Redirect, A};
use thaw::*;

use crate::shared::form_utils::require_text;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_AUTH;
use crate::shared::toast::use_toasts;
use crate::system::auth::api;
use crate::system::auth::LOGIN_PATH;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegisterFields {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
}

impl RegisterFields {
    /// Only the confirmation is checked locally.
    pub fn to_request(&self) -> Result<RegisterRequest, String> {
        let username = require_text("Username", &self.username)?;
        let email = require_text("Email", &self.email)?;
        if self.password.is_empty() {
            return Err("Password is required".to_string());
        }
        if self.password != self.password2 {
            return Err("Passwords do not match".to_string());
        }
        Ok(RegisterRequest {
            username,
            email,
            password: self.password.clone(),
            password2: self.password2.clone(),
        })
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let toasts = use_toasts();
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let password2 = RwSignal::new(String::new());
    let (is_loading, set_is_loading) = signal(false);
    let (registered, set_registered) = signal(false);

    let submit = move || {
        let fields = RegisterFields {
            username: username.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            password2: password2.get_untracked(),
        };
        let request = match fields.to_request() {
            Ok(request) => request,
            Err(msg) => {
                toasts.error(msg);
                return;
            }
        };

        set_is_loading.set(true);
        spawn_local(async move {
            let result = api::register(&request).await;
            set_is_loading.set(false);
            match result {
                Ok(()) => {
                    log::info!("registered account {}", request.username);
                    toasts.success("Account created. Please sign in.");
                    set_registered.set(true);
                }
                Err(e) => {
                    log::warn!("registration failed: {}", e);
                    toasts.error(e.user_message("Registration failed"));
                }
            }
        });
    };

    view! {
        <PageFrame page_id="sys_register--auth" category=PAGE_CAT_AUTH>
            <div class="auth-container">
                {move || registered.get().then(|| view! { <Redirect path=LOGIN_PATH /> })}
                <div class="auth-box">
                    <h1 class="auth-box__title">"Create account"</h1>

                    <div class="record-form record-form--stacked">
                        <div class="form__group">
                            <label class="form__label">"Username"</label>
                            <Input value=username />
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Email"</label>
                            <Input value=email input_type=InputType::Email />
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Password"</label>
                            <Input value=password input_type=InputType::Password />
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Confirm password"</label>
                            <Input value=password2 input_type=InputType::Password />
                        </div>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| submit()
                            disabled=Signal::derive(move || is_loading.get())
                        >
                            {move || if is_loading.get() { "Creating..." } else { "Register" }}
                        </Button>
                    </div>

                    <div class="auth-box__footer">
                        "Already registered? " <A href=LOGIN_PATH>"Sign in"</A>
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RegisterFields {
        RegisterFields {
            username: " neema ".into(),
            email: "neema@shop.tz".into(),
            password: "s3cret!".into(),
            password2: "s3cret!".into(),
        }
    }

    #[test]
    fn test_valid_request() {
        let request = filled().to_request().unwrap();
        assert_eq!(request.username, "neema");
        assert_eq!(request.password2, "s3cret!");
    }

    #[test]
    fn test_mismatched_passwords_rejected_locally() {
        let fields = RegisterFields {
            password2: "other".into(),
            ..filled()
        };
        assert_eq!(fields.to_request().unwrap_err(), "Passwords do not match");
    }

    #[test]
    fn test_missing_fields() {
        let fields = RegisterFields {
            email: String::new(),
            ..filled()
        };
        assert_eq!(fields.to_request().unwrap_err(), "Email is required");
    }
}
