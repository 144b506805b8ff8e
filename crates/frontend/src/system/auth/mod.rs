pub mod api;
pub mod claims;
pub mod context;
pub mod guard;
pub mod inactivity;
pub mod storage;

pub const LOGIN_PATH: &str = "/login";

/// Full page load of the login route. Drops every in-memory state.
pub fn redirect_to_login() {
    if let Some(window) = web_sys::window() {
        if window.location().set_href(LOGIN_PATH).is_err() {
            log::error!("failed to navigate to {}", LOGIN_PATH);
        }
    }
}
