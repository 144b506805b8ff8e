//! Viewport breakpoints as reactive signals.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::MediaQueryListEvent;

/// Sidebar collapses to icons at or below this width.
pub const TABLET_QUERY: &str = "(max-width: 1024px)";
/// Sidebar becomes a drawer, tables become cards.
pub const PHONE_QUERY: &str = "(max-width: 640px)";

/// Tracks `window.matchMedia(query).matches`.
pub fn use_media_query(query: &'static str) -> ReadSignal<bool> {
    let list = web_sys::window().and_then(|w| w.match_media(query).ok().flatten());
    let (matches, set_matches) = signal(list.as_ref().map(|l| l.matches()).unwrap_or(false));

    if let Some(list) = list {
        let listener = Closure::<dyn FnMut(MediaQueryListEvent)>::new(
            move |ev: MediaQueryListEvent| set_matches.set(ev.matches()),
        );
        if list
            .add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("matchMedia change listener not installed for {}", query);
        }
        listener.forget();
    }

    matches
}
