//! PageFrame: standard root wrapper for every routed page.
//!
//! Guarantees two metadata attributes on the root DOM element:
//!   - `id`: `"{entity}--{category}"`, e.g. `"a001_product--list"`
//!   - `data-page-category`: one of the PAGE_CAT_* constants

use super::page_standard::*;
use leptos::prelude::*;

/// Root wrapper that sets standard metadata on every page.
///
/// - `list`, `system` → `page`
/// - `dashboard`      → `page page--dashboard`
/// - `auth`           → `page page--auth`
#[component]
pub fn PageFrame(
    /// HTML id in format `{entity}--{category}`.
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants from `page_standard`.
    category: &'static str,
    /// Page title rendered in the `page__header`.
    #[prop(optional)]
    title: &'static str,
    children: Children,
) -> impl IntoView {
    debug_assert!(is_valid_page_id(page_id), "bad page id {}", page_id);

    let class = match category {
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        PAGE_CAT_AUTH => "page page--auth",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {(!title.is_empty()).then(|| view! {
                <div class="page__header">
                    <h1 class="page__title">{title}</h1>
                </div>
            })}
            <div class="page__content">
                {children()}
            </div>
        </div>
    }
}
