mod state;

use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a002_purchase::aggregate::Purchase;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use thaw::*;

use crate::domain::a001_product::api as product_api;
use crate::domain::a002_purchase::api;
use crate::domain::a002_purchase::ui::details::PurchaseForm;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::date_utils::format_datetime;
use crate::shared::dialogs::confirm;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    cmp_f64, cmp_text, highlight_matches, remove_record, upsert_record, Searchable, SortHeader,
    Sortable,
};
use crate::shared::number_format::format_tzs;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::toast::use_toasts;
use state::{create_state, visible_purchases};

impl Searchable for Purchase {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.product_name.clone(),
            self.purchased_by_username.clone().unwrap_or_default(),
        ]
    }
}

impl Sortable for Purchase {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "product_name" => cmp_text(&self.product_name, &other.product_name),
            "quantity" => self.quantity.cmp(&other.quantity),
            "amount" => cmp_f64(self.amount, other.amount),
            _ => self.purchased_at.cmp(&other.purchased_at),
        }
    }
}

#[component]
pub fn PurchasesListPage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toasts = use_toasts();
    let state = create_state();
    let all_purchases: RwSignal<Vec<Purchase>> = RwSignal::new(Vec::new());
    let products: RwSignal<Vec<Product>> = RwSignal::new(Vec::new());
    let editing: RwSignal<Option<Purchase>> = RwSignal::new(None);
    let (loading, set_loading) = signal(false);

    let refresh_view = move || {
        let rows = all_purchases
            .with_untracked(|all| state.with_untracked(|s| visible_purchases(all, s)));
        state.update(|s| s.items = rows);
    };

    let load_products = move || {
        spawn_local(async move {
            match product_api::fetch_products().await {
                Ok(data) => products.set(data),
                Err(e) => {
                    log::error!("failed to fetch products: {}", e);
                    toasts.error(e.user_message("Failed to fetch products"));
                }
            }
        });
    };

    let load_data = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_purchases().await {
                Ok(data) => {
                    all_purchases.set(data);
                    state.update(|s| s.is_loaded = true);
                    refresh_view();
                }
                Err(e) => {
                    log::error!("failed to fetch purchases: {}", e);
                    toasts.error(e.user_message("Failed to fetch purchases"));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_data();
            load_products();
        }
    });

    let search_signal = RwSignal::new(String::new());
    Effect::new(move |_| {
        let q = search_signal.get();
        state.update(|s| s.search_query = q);
        refresh_view();
    });

    let toggle_sort = move |field: &'static str| {
        state.update(|s| {
            if s.sort_field == field {
                s.sort_ascending = !s.sort_ascending;
            } else {
                s.sort_field = field.to_string();
                s.sort_ascending = true;
            }
        });
        refresh_view();
    };

    // Stock changes with every purchase
    let on_saved = move |purchase: Purchase| {
        all_purchases.update(|items| upsert_record(items, purchase));
        editing.set(None);
        refresh_view();
        load_products();
    };

    let delete_purchase = move |purchase: Purchase| {
        if !confirm(&format!("Delete purchase of \"{}\"?", purchase.product_name)) {
            return;
        }
        spawn_local(async move {
            match api::delete_purchase(purchase.id).await {
                Ok(()) => {
                    all_purchases.update(|items| remove_record(items, purchase.id));
                    refresh_view();
                    load_products();
                    toasts.info("Purchase deleted");
                }
                Err(e) => {
                    log::error!("failed to delete purchase {}: {}", purchase.id, e);
                    toasts.error(e.user_message("Failed to delete purchase"));
                }
            }
        });
    };

    let sort_field = Signal::derive(move || state.with(|s| s.sort_field.clone()));
    let sort_ascending = Signal::derive(move || state.with(|s| s.sort_ascending));
    let products_signal = Signal::derive(move || products.get());

    let row_actions = move |purchase: Purchase| {
        let for_edit = purchase.clone();
        view! {
            <Flex gap=FlexGap::Small>
                <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle
                    on_click=move |_| editing.set(Some(for_edit.clone()))>
                    {icon("edit")}
                </Button>
                <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle
                    on_click=move |_| delete_purchase(purchase.clone())>
                    {icon("trash")}
                </Button>
            </Flex>
        }
    };

    view! {
        <PageFrame page_id="a002_purchase--list" category=PAGE_CAT_LIST>
            <div class="page__toolbar">
                <div class="page__header-left">
                    <h1 class="page__title">"Purchases"</h1>
                    <Badge>{move || state.get().items.len().to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| { load_data(); load_products(); }
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="form-card">
                <h2 class="form-card__title">"Record purchase"</h2>
                <PurchaseForm products=products_signal on_saved=on_saved />
            </div>

            {move || editing.get().map(|purchase| view! {
                <div class="form-card form-card--edit">
                    <h2 class="form-card__title">{format!("Edit purchase #{}", purchase.id)}</h2>
                    <PurchaseForm
                        initial=purchase
                        products=products_signal
                        on_saved=on_saved
                        on_cancel=move |_| editing.set(None)
                    />
                </div>
            })}

            <div class="filter-panel">
                <Input value=search_signal placeholder="Search product or user..." />
            </div>

            <Show when=move || loading.get() && !state.get().is_loaded>
                <Spinner />
            </Show>

            {move || {
                let term = state.with(|s| s.search_query.clone());
                let rows = state.get().items;
                if rows.is_empty() && state.with(|s| s.is_loaded) {
                    return view! { <div class="page-message">"No purchases found."</div> }.into_any();
                }
                if ctx.is_phone.get() {
                    view! {
                        <div class="record-cards">
                            {rows.into_iter().map(|purchase| {
                                let actions = row_actions(purchase.clone());
                                view! {
                                    <div class="record-card">
                                        <div class="record-card__title">{highlight_matches(&purchase.product_name, &term)}</div>
                                        <div class="record-card__meta">{format_datetime(&purchase.purchased_at)}</div>
                                        <div class="record-card__row">
                                            {format!("{} × {}", purchase.quantity, format_tzs(purchase.price_per_unit))}
                                        </div>
                                        <div class="record-card__row">"Amount: " {format_tzs(purchase.amount)}</div>
                                        <div class="record-card__row">
                                            "By: " {highlight_matches(purchase.purchased_by_username.as_deref().unwrap_or("-"), &term)}
                                        </div>
                                        {actions}
                                    </div>
                                }
                            }).collect_view()}
                        </div>
                    }.into_any()
                } else {
                    view! {
                        <div class="table-wrapper">
                            <Table attr:style="width: 100%;">
                                <TableHeader>
                                    <TableRow>
                                        <TableHeaderCell>"#"</TableHeaderCell>
                                        <TableHeaderCell>
                                            <SortHeader label="Product" field="product_name" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>
                                            <SortHeader label="Quantity" field="quantity" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>"Price per unit"</TableHeaderCell>
                                        <TableHeaderCell>
                                            <SortHeader label="Amount" field="amount" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>"Purchased by"</TableHeaderCell>
                                        <TableHeaderCell>
                                            <SortHeader label="Date" field="purchased_at" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>""</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    {rows.into_iter().enumerate().map(|(index, purchase)| {
                                        let product_name = highlight_matches(&purchase.product_name, &term);
                                        let quantity = purchase.quantity;
                                        let price = format_tzs(purchase.price_per_unit);
                                        let amount = format_tzs(purchase.amount);
                                        let by = highlight_matches(purchase.purchased_by_username.as_deref().unwrap_or("-"), &term);
                                        let at = format_datetime(&purchase.purchased_at);
                                        let actions = row_actions(purchase);
                                        view! {
                                            <TableRow>
                                                <TableCell>{index + 1}</TableCell>
                                                <TableCell>{product_name}</TableCell>
                                                <TableCell>{quantity}</TableCell>
                                                <TableCell>{price}</TableCell>
                                                <TableCell>{amount}</TableCell>
                                                <TableCell>{by}</TableCell>
                                                <TableCell>{at}</TableCell>
                                                <TableCell>{actions}</TableCell>
                                            </TableRow>
                                        }
                                    }).collect_view()}
                                </TableBody>
                            </Table>
                        </div>
                    }.into_any()
                }
            }}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::state::{visible_purchases, PurchasesListState};
    use super::*;

    fn purchase(id: i64, product_name: &str, by: Option<&str>, at: &str) -> Purchase {
        Purchase {
            id,
            product: id,
            product_name: product_name.to_string(),
            quantity: 1,
            price_per_unit: 10.0,
            amount: 10.0,
            purchased_by_username: by.map(str::to_string),
            purchased_at: at.to_string(),
        }
    }

    #[test]
    fn test_search_matches_user_and_product() {
        let all = vec![
            purchase(1, "Rice", Some("amina"), "2024-01-01T10:00:00Z"),
            purchase(2, "Sugar", Some("juma"), "2024-01-02T10:00:00Z"),
            purchase(3, "Oil", None, "2024-01-03T10:00:00Z"),
        ];
        let state = PurchasesListState {
            search_query: "JUM".into(),
            ..Default::default()
        };
        let ids: Vec<i64> = visible_purchases(&all, &state).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_default_sort_newest_first() {
        let all = vec![
            purchase(1, "Rice", None, "2024-01-01T10:00:00Z"),
            purchase(2, "Sugar", None, "2024-03-01T10:00:00Z"),
        ];
        let rows = visible_purchases(&all, &PurchasesListState::default());
        assert_eq!(rows[0].id, 2);
    }
}
