//! Sidebar navigation: fixed column on desktop/tablet, drawer on phones.

use crate::layout::global_context::{AppGlobalContext, SidebarPresentation};
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use leptos::ev;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

#[derive(Clone, Debug, PartialEq)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub admin_only: bool,
}

const NAV_ITEMS: &[NavItem] = &[
    NavItem { path: "/overview", label: "Overview", icon: "overview", admin_only: false },
    NavItem { path: "/products", label: "Products", icon: "products", admin_only: false },
    NavItem { path: "/purchases", label: "Purchases", icon: "purchases", admin_only: false },
    NavItem { path: "/sales", label: "Sales", icon: "sales", admin_only: false },
    NavItem { path: "/expenses", label: "Expenses", icon: "expenses", admin_only: false },
    NavItem { path: "/reports", label: "Reports", icon: "reports", admin_only: false },
    NavItem { path: "/users", label: "Users", icon: "users", admin_only: true },
    NavItem { path: "/settings", label: "Settings", icon: "settings", admin_only: false },
];

/// Links visible for the given role hint.
pub fn nav_items(is_admin: bool) -> Vec<NavItem> {
    NAV_ITEMS
        .iter()
        .filter(|item| is_admin || !item.admin_only)
        .cloned()
        .collect()
}

/// `/` is the overview as well.
pub fn is_active_path(current: &str, item_path: &str) -> bool {
    let current = if current == "/" { "/overview" } else { current };
    current == item_path || current.starts_with(&format!("{}/", item_path))
}

pub fn closes_drawer(key: &str, presentation: SidebarPresentation) -> bool {
    key == "Escape" && presentation.is_drawer_open()
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();
    let location = use_location();

    let presentation = move || ctx.presentation();

    // Escape closes the drawer; the listener goes away with the sidebar
    let keydown = window_event_listener(ev::keydown, move |ev| {
        if closes_drawer(&ev.key(), ctx.presentation()) {
            ctx.close_drawer();
        }
    });
    on_cleanup(move || keydown.remove());

    // Navigating inside the drawer closes it
    Effect::new(move |_| {
        location.pathname.track();
        ctx.close_drawer();
    });

    // No background scroll behind an open drawer
    Effect::new(move |_| {
        let open = presentation().is_drawer_open();
        if let Some(body) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
        {
            let _ = body
                .style()
                .set_property("overflow", if open { "hidden" } else { "" });
        }
    });

    let links = move || {
        let collapsed = presentation().is_collapsed() && !presentation().is_drawer_open();
        nav_items(auth_state.get().is_admin())
            .into_iter()
            .map(|item| {
                let path = item.path;
                view! {
                    <A
                        href=path
                        attr:class=move || {
                            if is_active_path(&location.pathname.get(), path) {
                                "app-sidebar__item app-sidebar__item--active"
                            } else {
                                "app-sidebar__item"
                            }
                        }
                        attr:title=item.label
                    >
                        <span class="app-sidebar__item-content">
                            {icon(item.icon)}
                            {(!collapsed).then(|| view! { <span>{item.label}</span> })}
                        </span>
                    </A>
                }
            })
            .collect_view()
    };

    view! {
        {move || match presentation() {
            SidebarPresentation::Drawer { open } => view! {
                <Show when=move || open>
                    <div class="app-sidebar__backdrop" on:click=move |_| ctx.close_drawer()></div>
                </Show>
                <nav
                    class="app-sidebar app-sidebar--drawer"
                    class:app-sidebar--open=open
                    aria-hidden=(!open).to_string()
                >
                    <div class="app-sidebar__content">{links}</div>
                    <SidebarFooter collapsed=false />
                </nav>
            }.into_any(),
            SidebarPresentation::Column { collapsed } => view! {
                <nav class="app-sidebar" class:app-sidebar--collapsed=collapsed>
                    <button
                        class="app-sidebar__toggle"
                        on:click=move |_| ctx.toggle_sidebar()
                        title=if collapsed { "Expand navigation" } else { "Collapse navigation" }
                    >
                        {if collapsed { icon("panel-left-open") } else { icon("panel-left-close") }}
                    </button>
                    <div class="app-sidebar__content">{links}</div>
                    <SidebarFooter collapsed=collapsed />
                </nav>
            }.into_any(),
        }}
    }
}

#[component]
fn SidebarFooter(collapsed: bool) -> impl IntoView {
    view! {
        <div class="app-sidebar__footer">
            <A href="/logout" attr:class="app-sidebar__item" attr:title="Logout">
                <span class="app-sidebar__item-content">
                    {icon("log-out")}
                    {(!collapsed).then(|| view! { <span>"Logout"</span> })}
                </span>
            </A>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_users_link_is_admin_only() {
        let staff: Vec<_> = nav_items(false).iter().map(|i| i.path).collect();
        assert!(!staff.contains(&"/users"));
        assert!(staff.contains(&"/products"));

        let admin: Vec<_> = nav_items(true).iter().map(|i| i.path).collect();
        assert!(admin.contains(&"/users"));
        assert_eq!(admin.len(), NAV_ITEMS.len());
    }

    #[test]
    fn test_active_path() {
        assert!(is_active_path("/", "/overview"));
        assert!(is_active_path("/products", "/products"));
        assert!(!is_active_path("/products", "/purchases"));
        assert!(!is_active_path("/sales", "/sal"));
    }

    #[test]
    fn test_escape_closes_only_open_drawer() {
        let open = SidebarPresentation::Drawer { open: true };
        assert!(closes_drawer("Escape", open));
        assert!(!closes_drawer("Enter", open));
        assert!(!closes_drawer("Escape", SidebarPresentation::Drawer { open: false }));
        assert!(!closes_drawer("Escape", SidebarPresentation::Column { collapsed: false }));
    }
}
