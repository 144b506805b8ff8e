use contracts::dashboards::d400_overview::dto::{OverviewResponse, OverviewStats};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use thaw::*;

use crate::dashboards::d400_overview::api;
use crate::domain::a001_product::ui::list::LOW_STOCK_FILTER;
use crate::shared::icons::icon;
use crate::shared::number_format::{format_number_int, format_tzs};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::shared::toast::use_toasts;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatTone {
    Neutral,
    Positive,
    Negative,
    Warning,
}

impl StatTone {
    fn class(self) -> &'static str {
        match self {
            StatTone::Neutral => "stat-card",
            StatTone::Positive => "stat-card stat-card--positive",
            StatTone::Negative => "stat-card stat-card--negative",
            StatTone::Warning => "stat-card stat-card--warning",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub tone: StatTone,
}

fn profit_tone(net_profit: f64) -> StatTone {
    if net_profit > 0.0 {
        StatTone::Positive
    } else if net_profit < 0.0 {
        StatTone::Negative
    } else {
        StatTone::Neutral
    }
}

/// Cards in display order.
pub fn stat_cards(stats: &OverviewStats) -> Vec<StatCard> {
    let card = |label, value, tone| StatCard { label, value, tone };
    vec![
        card("Products", format_number_int(stats.total_products), StatTone::Neutral),
        card("Users", format_number_int(stats.total_users), StatTone::Neutral),
        card("Total sales", format_tzs(stats.total_sales), StatTone::Neutral),
        card("Total purchases", format_tzs(stats.total_purchases), StatTone::Neutral),
        card("Total expenses", format_tzs(stats.total_expenses), StatTone::Neutral),
        card("Net profit", format_tzs(stats.net_profit), profit_tone(stats.net_profit)),
        card("Stock value", format_tzs(stats.total_product_price), StatTone::Neutral),
        card(
            "Low stock",
            format_number_int(stats.low_stock_products),
            if stats.low_stock_products > 0 {
                StatTone::Warning
            } else {
                StatTone::Neutral
            },
        ),
    ]
}

fn low_stock_href() -> String {
    format!("/products?filter={}", LOW_STOCK_FILTER)
}

#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let toasts = use_toasts();
    let (data, set_data) = signal(None::<OverviewResponse>);
    let (loading, set_loading) = signal(false);
    // Тема только для этой страницы, не сохраняется
    let (dark, set_dark) = signal(false);

    let load_data = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_overview().await {
                Ok(response) => set_data.set(Some(response)),
                Err(e) => {
                    log::error!("failed to fetch overview: {}", e);
                    toasts.error(e.user_message("Failed to load overview"));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load_data());

    view! {
        <PageFrame page_id="d400_overview--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class=move || if dark.get() { "overview overview--dark" } else { "overview" }>
                <div class="page__toolbar">
                    <div class="page__header-left">
                        <h1 class="page__title">"Overview"</h1>
                    </div>
                    <div class="page__header-right">
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| set_dark.update(|d| *d = !*d)
                        >
                            {move || if dark.get() { icon("sun") } else { icon("moon") }}
                        </Button>
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

                <Show when=move || loading.get() && data.with(|d| d.is_none())>
                    <Spinner />
                </Show>

                {move || data.get().map(|overview| view! {
                    <div class="stat-grid">
                        {stat_cards(&overview.stats).into_iter().map(|card| view! {
                            <div class=card.tone.class()>
                                <div class="stat-card__label">{card.label}</div>
                                <div class="stat-card__value">{card.value}</div>
                            </div>
                        }).collect_view()}
                    </div>

                    <div class="overview__columns">
                        <section class="overview__panel">
                            <h2 class="overview__panel-title">"Recent activity"</h2>
                            {if overview.recent.is_empty() {
                                view! { <div class="page-message">"Nothing yet."</div> }.into_any()
                            } else {
                                view! {
                                    <ul class="activity-list">
                                        {overview.recent.into_iter().map(|line| view! {
                                            <li class="activity-list__item">{line}</li>
                                        }).collect_view()}
                                    </ul>
                                }.into_any()
                            }}
                        </section>

                        <section class="overview__panel">
                            <h2 class="overview__panel-title">"Quick links"</h2>
                            <div class="quick-links">
                                <A href="/sales">{icon("sales")}" Record sale"</A>
                                <A href="/purchases">{icon("purchases")}" Record purchase"</A>
                                <A href="/expenses">{icon("expenses")}" Add expense"</A>
                                <A href=low_stock_href()>{icon("alert")}" Review Low Stock"</A>
                                <A href="/reports">{icon("reports")}" Reports"</A>
                            </div>
                        </section>
                    </div>
                })}
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_profit_tone_follows_sign() {
        let mut stats = OverviewStats {
            net_profit: -10.0,
            ..Default::default()
        };
        let tone = |s: &OverviewStats| {
            stat_cards(s)
                .into_iter()
                .find(|c| c.label == "Net profit")
                .map(|c| c.tone)
        };
        assert_eq!(tone(&stats), Some(StatTone::Negative));
        stats.net_profit = 2500.0;
        assert_eq!(tone(&stats), Some(StatTone::Positive));
        stats.net_profit = 0.0;
        assert_eq!(tone(&stats), Some(StatTone::Neutral));
    }

    #[test]
    fn test_low_stock_highlight() {
        let stats = OverviewStats {
            low_stock_products: 3,
            ..Default::default()
        };
        let card = stat_cards(&stats).pop().unwrap();
        assert_eq!(card.label, "Low stock");
        assert_eq!(card.value, "3");
        assert_eq!(card.tone, StatTone::Warning);

        let none = stat_cards(&OverviewStats::default()).pop().unwrap();
        assert_eq!(none.tone, StatTone::Neutral);
    }

    #[test]
    fn test_low_stock_link() {
        assert_eq!(low_stock_href(), "/products?filter=low-stock");
    }
}
