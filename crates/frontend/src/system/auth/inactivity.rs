//! Idle logout: no click, mouse move, key press or scroll for
//! [`INACTIVITY_LIMIT_MS`] ends the session.

use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::context::is_authenticated;
use super::redirect_to_login;
use super::storage;

pub const INACTIVITY_LIMIT_MS: u32 = 15 * 60 * 1000;

const ACTIVITY_EVENTS: [&str; 4] = ["click", "mousemove", "keydown", "scroll"];

thread_local! {
    static IDLE_TIMER: RefCell<Option<Timeout>> = const { RefCell::new(None) };
}

/// Install window listeners once at startup.
pub fn init_inactivity_tracking() {
    let Some(window) = web_sys::window() else {
        return;
    };
    for event in ACTIVITY_EVENTS {
        let listener = Closure::<dyn FnMut()>::new(reset_inactivity_timer);
        if window
            .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("could not listen for '{}' events", event);
        }
        // Lives as long as the page.
        listener.forget();
    }
    reset_inactivity_timer();
}

/// Restart the countdown. Dropping the previous timer cancels it.
pub fn reset_inactivity_timer() {
    IDLE_TIMER.with(|timer| {
        *timer.borrow_mut() = Some(Timeout::new(INACTIVITY_LIMIT_MS, on_idle));
    });
}

fn on_idle() {
    if !is_authenticated() {
        return;
    }
    log::info!("no activity for {} ms, signing out", INACTIVITY_LIMIT_MS);
    storage::clear_tokens();
    redirect_to_login();
}
