use contracts::system::settings::Setting;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::list_utils::{filter_list, highlight_matches, Searchable};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::shared::toast::use_toasts;
use crate::system::settings::api;

impl Searchable for Setting {
    fn search_fields(&self) -> Vec<String> {
        vec![self.key.clone(), self.value.clone()]
    }
}

/// Settings are owned by the server; this page only shows them.
#[component]
pub fn SettingsPage() -> impl IntoView {
    let toasts = use_toasts();
    let settings: RwSignal<Vec<Setting>> = RwSignal::new(Vec::new());
    let (loaded, set_loaded) = signal(false);
    let (loading, set_loading) = signal(false);
    let search = RwSignal::new(String::new());

    let load_data = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_settings().await {
                Ok(mut data) => {
                    data.sort_by(|a, b| a.key.cmp(&b.key));
                    settings.set(data);
                    set_loaded.set(true);
                }
                Err(e) => {
                    log::error!("failed to fetch settings: {}", e);
                    toasts.error(e.user_message("Failed to fetch settings"));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        if !loaded.get_untracked() {
            load_data();
        }
    });

    view! {
        <PageFrame page_id="sys_settings--list" category=PAGE_CAT_SYSTEM>
            <div class="page__toolbar">
                <div class="page__header-left">
                    <h1 class="page__title">"Settings"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </div>
            </div>

            <div class="filter-panel">
                <Input value=search placeholder="Search settings..." />
            </div>

            <Show when=move || loading.get() && !loaded.get()>
                <Spinner />
            </Show>

            {move || {
                let term = search.get();
                let rows = settings.with(|all| filter_list(all, &term));
                if rows.is_empty() && loaded.get() {
                    return view! { <div class="page-message">"No settings."</div> }.into_any();
                }
                view! {
                    <dl class="settings-list">
                        {rows.into_iter().map(|setting| view! {
                            <div class="settings-list__item">
                                <dt class="settings-list__key">{highlight_matches(&setting.key, &term)}</dt>
                                <dd class="settings-list__value">{highlight_matches(&setting.value, &term)}</dd>
                                <dd class="settings-list__meta">{format_datetime(&setting.updated_at)}</dd>
                            </div>
                        }).collect_view()}
                    </dl>
                }.into_any()
            }}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_matches_value() {
        let all = vec![
            Setting {
                id: 1,
                key: "low_stock_threshold".into(),
                value: "5".into(),
                updated_at: String::new(),
            },
            Setting {
                id: 2,
                key: "currency".into(),
                value: "TZS".into(),
                updated_at: String::new(),
            },
        ];
        let rows = filter_list(&all, "tzs");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key, "currency");
    }
}
