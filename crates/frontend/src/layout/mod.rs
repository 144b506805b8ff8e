pub mod global_context;
pub mod left;
pub mod top_header;

use leptos::prelude::*;
use top_header::TopHeader;

/// Authenticated application shell.
///
/// ```text
/// +----------+-------------------------------+
/// |          |          TopHeader            |
/// | Sidebar  +-------------------------------+
/// |          |           Content             |
/// +----------+-------------------------------+
/// ```
///
/// On phones the sidebar is an overlay drawer instead of a column.
#[component]
pub fn Shell<L, C>(left: L, center: C) -> impl IntoView
where
    L: Fn() -> AnyView + 'static + Send,
    C: Fn() -> AnyView + 'static + Send,
{
    view! {
        <div class="app-layout">
            {left()}
            <div class="app-main">
                <TopHeader />
                <main class="app-content">
                    {center()}
                </main>
            </div>
        </div>
    }
}
