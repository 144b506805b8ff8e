mod state;

use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a003_sale::aggregate::Sale;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use thaw::*;

use crate::domain::a001_product::api as product_api;
use crate::domain::a003_sale::api;
use crate::domain::a003_sale::ui::details::SaleForm;
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
use state::{create_state, visible_sales};

impl Searchable for Sale {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.product_name.clone(),
            self.sold_by_username.clone().unwrap_or_default(),
        ]
    }
}

impl Sortable for Sale {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "product_name" => cmp_text(&self.product_name, &other.product_name),
            "quantity" => self.quantity.cmp(&other.quantity),
            "amount" => cmp_f64(self.amount, other.amount),
            _ => self.sold_at.cmp(&other.sold_at),
        }
    }
}

/// Product's reference selling price, `-` when it has none.
fn list_price_text(sale: &Sale) -> String {
    sale.selling_price
        .map(format_tzs)
        .unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn SalesListPage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toasts = use_toasts();
    let state = create_state();
    let all_sales: RwSignal<Vec<Sale>> = RwSignal::new(Vec::new());
    let products: RwSignal<Vec<Product>> = RwSignal::new(Vec::new());
    let editing: RwSignal<Option<Sale>> = RwSignal::new(None);
    let (loading, set_loading) = signal(false);

    let refresh_view = move || {
        let rows = all_sales
            .with_untracked(|all| state.with_untracked(|s| visible_sales(all, s)));
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
            match api::fetch_sales().await {
                Ok(data) => {
                    all_sales.set(data);
                    state.update(|s| s.is_loaded = true);
                    refresh_view();
                }
                Err(e) => {
                    log::error!("failed to fetch sales: {}", e);
                    toasts.error(e.user_message("Failed to fetch sales"));
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

    // Stock changes with every sale
    let on_saved = move |sale: Sale| {
        all_sales.update(|items| upsert_record(items, sale));
        editing.set(None);
        refresh_view();
        load_products();
    };

    let delete_sale = move |sale: Sale| {
        if !confirm(&format!("Delete sale of \"{}\"?", sale.product_name)) {
            return;
        }
        spawn_local(async move {
            match api::delete_sale(sale.id).await {
                Ok(()) => {
                    all_sales.update(|items| remove_record(items, sale.id));
                    refresh_view();
                    load_products();
                    toasts.info("Sale deleted");
                }
                Err(e) => {
                    log::error!("failed to delete sale {}: {}", sale.id, e);
                    toasts.error(e.user_message("Failed to delete sale"));
                }
            }
        });
    };

    let sort_field = Signal::derive(move || state.with(|s| s.sort_field.clone()));
    let sort_ascending = Signal::derive(move || state.with(|s| s.sort_ascending));
    let products_signal = Signal::derive(move || products.get());

    let row_actions = move |sale: Sale| {
        let for_edit = sale.clone();
        view! {
            <Flex gap=FlexGap::Small>
                <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle
                    on_click=move |_| editing.set(Some(for_edit.clone()))>
                    {icon("edit")}
                </Button>
                <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle
                    on_click=move |_| delete_sale(sale.clone())>
                    {icon("trash")}
                </Button>
            </Flex>
        }
    };

    view! {
        <PageFrame page_id="a003_sale--list" category=PAGE_CAT_LIST>
            <div class="page__toolbar">
                <div class="page__header-left">
                    <h1 class="page__title">"Sales"</h1>
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
                <h2 class="form-card__title">"Record sale"</h2>
                <SaleForm products=products_signal on_saved=on_saved />
            </div>

            {move || editing.get().map(|sale| view! {
                <div class="form-card form-card--edit">
                    <h2 class="form-card__title">{format!("Edit sale #{}", sale.id)}</h2>
                    <SaleForm
                        initial=sale
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
                    return view! { <div class="page-message">"No sales found."</div> }.into_any();
                }
                if ctx.is_phone.get() {
                    view! {
                        <div class="record-cards">
                            {rows.into_iter().map(|sale| {
                                let actions = row_actions(sale.clone());
                                view! {
                                    <div class="record-card">
                                        <div class="record-card__title">{highlight_matches(&sale.product_name, &term)}</div>
                                        <div class="record-card__meta">{format_datetime(&sale.sold_at)}</div>
                                        <div class="record-card__row">
                                            {format!("{} × {}", sale.quantity, format_tzs(sale.price_per_unit))}
                                        </div>
                                        <div class="record-card__row">"Amount: " {format_tzs(sale.amount)}</div>
                                        <div class="record-card__row">
                                            "By: " {highlight_matches(sale.sold_by_username.as_deref().unwrap_or("-"), &term)}
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
                                        <TableHeaderCell>"List price"</TableHeaderCell>
                                        <TableHeaderCell>"Price per unit"</TableHeaderCell>
                                        <TableHeaderCell>
                                            <SortHeader label="Amount" field="amount" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>"Sold by"</TableHeaderCell>
                                        <TableHeaderCell>
                                            <SortHeader label="Date" field="sold_at" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>""</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    {rows.into_iter().enumerate().map(|(index, sale)| {
                                        let product_name = highlight_matches(&sale.product_name, &term);
                                        let quantity = sale.quantity;
                                        let list_price = list_price_text(&sale);
                                        let price = format_tzs(sale.price_per_unit);
                                        let amount = format_tzs(sale.amount);
                                        let by = highlight_matches(sale.sold_by_username.as_deref().unwrap_or("-"), &term);
                                        let at = format_datetime(&sale.sold_at);
                                        let actions = row_actions(sale);
                                        view! {
                                            <TableRow>
                                                <TableCell>{index + 1}</TableCell>
                                                <TableCell>{product_name}</TableCell>
                                                <TableCell>{quantity}</TableCell>
                                                <TableCell>{list_price}</TableCell>
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
    use super::state::{visible_sales, SalesListState};
    use super::*;

    fn sale(id: i64, product_name: &str, by: Option<&str>, amount: f64) -> Sale {
        Sale {
            id,
            product: id,
            product_name: product_name.to_string(),
            selling_price: None,
            quantity: 2,
            price_per_unit: amount / 2.0,
            amount,
            sold_by_username: by.map(str::to_string),
            sold_at: format!("2024-05-0{}T09:00:00Z", id),
        }
    }

    #[test]
    fn test_search_by_seller() {
        let all = vec![
            sale(1, "Rice", Some("Amina"), 100.0),
            sale(2, "Maize flour", Some("juma"), 50.0),
            sale(3, "Rice", None, 70.0),
        ];
        let state = SalesListState {
            search_query: "amina".into(),
            ..Default::default()
        };
        let ids: Vec<i64> = visible_sales(&all, &state).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_sort_by_amount() {
        let all = vec![
            sale(1, "Rice", None, 100.0),
            sale(2, "Oil", None, 50.0),
            sale(3, "Salt", None, 70.0),
        ];
        let state = SalesListState {
            sort_field: "amount".into(),
            sort_ascending: true,
            ..Default::default()
        };
        let ids: Vec<i64> = visible_sales(&all, &state).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_list_price_text() {
        let mut s = sale(1, "Rice", None, 10.0);
        assert_eq!(list_price_text(&s), "-");
        s.selling_price = Some(3200.0);
        assert_eq!(list_price_text(&s), "TZS 3,200.00");
    }
}
