mod state;

use contracts::domain::a001_product::aggregate::{Product, StockStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_query_map;
use std::cmp::Ordering;
use thaw::*;

use crate::domain::a001_product::api;
use crate::domain::a001_product::ui::details::ProductForm;
use crate::layout::global_context::AppGlobalContext;
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
use state::{create_state, visible_products};

/// Query value that pre-filters the list to low/out-of-stock rows.
pub const LOW_STOCK_FILTER: &str = "low-stock";

impl Searchable for Product {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.description.clone(),
            self.category.clone(),
        ]
    }
}

impl Sortable for Product {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "category" => cmp_text(&self.category, &other.category),
            "quantity" => self.quantity.cmp(&other.quantity),
            "buying_price" => cmp_f64(self.buying_price, other.buying_price),
            "selling_price" => cmp_f64(
                self.selling_price.unwrap_or(0.0),
                other.selling_price.unwrap_or(0.0),
            ),
            "total_value" => cmp_f64(self.total_value, other.total_value),
            _ => cmp_text(&self.name, &other.name),
        }
    }
}

pub fn stock_label(product: &Product) -> String {
    match product.stock_status() {
        StockStatus::OutOfStock => "Out of Stock".to_string(),
        StockStatus::Low(n) => format!("Low Stock ({})", n),
        StockStatus::InStock(n) => n.to_string(),
    }
}

fn stock_badge(product: &Product) -> AnyView {
    let class = match product.stock_status() {
        StockStatus::OutOfStock => "badge badge--error",
        StockStatus::Low(_) => "badge badge--warning",
        StockStatus::InStock(_) => "badge badge--neutral",
    };
    view! { <span class=class>{stock_label(product)}</span> }.into_any()
}

fn selling_price_text(product: &Product) -> String {
    product
        .selling_price
        .map(format_tzs)
        .unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn ProductsListPage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toasts = use_toasts();
    let query = use_query_map();
    let state = create_state();
    let all_products: RwSignal<Vec<Product>> = RwSignal::new(Vec::new());
    let editing: RwSignal<Option<Product>> = RwSignal::new(None);
    let (loading, set_loading) = signal(false);

    if query.with_untracked(|q| q.get("filter").as_deref() == Some(LOW_STOCK_FILTER)) {
        state.update(|s| s.low_stock_only = true);
    }

    let refresh_view = move || {
        let rows = all_products
            .with_untracked(|all| state.with_untracked(|s| visible_products(all, s)));
        state.update(|s| s.items = rows);
    };

    let load_data = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_products().await {
                Ok(data) => {
                    all_products.set(data);
                    state.update(|s| s.is_loaded = true);
                    refresh_view();
                }
                Err(e) => {
                    log::error!("failed to fetch products: {}", e);
                    toasts.error(e.user_message("Failed to fetch products"));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_data();
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

    let clear_low_stock = move || {
        state.update(|s| s.low_stock_only = false);
        refresh_view();
    };

    let on_saved = move |product: Product| {
        all_products.update(|items| upsert_record(items, product));
        editing.set(None);
        refresh_view();
    };

    let delete_product = move |product: Product| {
        if !confirm(&format!("Delete product \"{}\"?", product.name)) {
            return;
        }
        spawn_local(async move {
            match api::delete_product(product.id).await {
                Ok(()) => {
                    all_products.update(|items| remove_record(items, product.id));
                    refresh_view();
                    toasts.info("Product deleted");
                }
                Err(e) => {
                    log::error!("failed to delete product {}: {}", product.id, e);
                    toasts.error(e.user_message("Failed to delete product"));
                }
            }
        });
    };

    let sort_field = Signal::derive(move || state.with(|s| s.sort_field.clone()));
    let sort_ascending = Signal::derive(move || state.with(|s| s.sort_ascending));

    let row_actions = move |product: Product| {
        let for_edit = product.clone();
        view! {
            <Flex gap=FlexGap::Small>
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| editing.set(Some(for_edit.clone()))
                >
                    {icon("edit")}
                </Button>
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| delete_product(product.clone())
                >
                    {icon("trash")}
                </Button>
            </Flex>
        }
    };

    view! {
        <PageFrame page_id="a001_product--list" category=PAGE_CAT_LIST>
            <div class="page__toolbar">
                <div class="page__header-left">
                    <h1 class="page__title">"Products"</h1>
                    <Badge>{move || state.get().items.len().to_string()}</Badge>
                    <Show when=move || state.get().low_stock_only>
                        <span class="chip chip--warning">
                            "Low stock only"
                            <button class="chip__close" on:click=move |_| clear_low_stock()>
                                {icon("x")}
                            </button>
                        </span>
                    </Show>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="form-card">
                <h2 class="form-card__title">"Add product"</h2>
                <ProductForm on_saved=on_saved />
            </div>

            {move || editing.get().map(|product| view! {
                <div class="form-card form-card--edit">
                    <h2 class="form-card__title">{format!("Edit \"{}\"", product.name)}</h2>
                    <ProductForm
                        initial=product
                        on_saved=on_saved
                        on_cancel=move |_| editing.set(None)
                    />
                </div>
            })}

            <div class="filter-panel">
                <Input value=search_signal placeholder="Search name, description or category..." />
            </div>

            <Show when=move || loading.get() && !state.get().is_loaded>
                <Spinner />
            </Show>

            {move || {
                let term = state.with(|s| s.search_query.clone());
                let rows = state.get().items;
                if rows.is_empty() && state.with(|s| s.is_loaded) {
                    return view! { <div class="page-message">"No products found."</div> }.into_any();
                }
                if ctx.is_phone.get() {
                    view! {
                        <div class="record-cards">
                            {rows.into_iter().map(|product| {
                                let actions = row_actions(product.clone());
                                view! {
                                    <div class="record-card">
                                        <div class="record-card__title">{highlight_matches(&product.name, &term)}</div>
                                        <div class="record-card__meta">{product.category.clone()}</div>
                                        <div class="record-card__row">"Stock: " {stock_badge(&product)}</div>
                                        <div class="record-card__row">"Buying: " {format_tzs(product.buying_price)}</div>
                                        <div class="record-card__row">"Selling: " {selling_price_text(&product)}</div>
                                        <div class="record-card__row">"Value: " {format_tzs(product.total_value)}</div>
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
                                            <SortHeader label="Name" field="name" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>
                                            <SortHeader label="Category" field="category" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>
                                            <SortHeader label="Stock" field="quantity" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>
                                            <SortHeader label="Buying price" field="buying_price" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>
                                            <SortHeader label="Selling price" field="selling_price" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>
                                            <SortHeader label="Total value" field="total_value" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>""</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    {rows.into_iter().enumerate().map(|(index, product)| {
                                        // Ячейки thaw забирают значения в свои замыкания
                                        let name = highlight_matches(&product.name, &term);
                                        let description = highlight_matches(&product.description, &term);
                                        let category = highlight_matches(&product.category, &term);
                                        let stock = stock_badge(&product);
                                        let buying = format_tzs(product.buying_price);
                                        let selling = selling_price_text(&product);
                                        let total = format_tzs(product.total_value);
                                        let actions = row_actions(product);
                                        view! {
                                            <TableRow>
                                                <TableCell>{index + 1}</TableCell>
                                                <TableCell>
                                                    <TableCellLayout truncate=true>
                                                        <div>{name}</div>
                                                        <div class="table__subtext">{description}</div>
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell>{category}</TableCell>
                                                <TableCell>{stock}</TableCell>
                                                <TableCell>{buying}</TableCell>
                                                <TableCell>{selling}</TableCell>
                                                <TableCell>{total}</TableCell>
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
    use super::state::{visible_products, ProductsListState};
    use super::*;

    fn product(id: i64, name: &str, category: &str, quantity: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: String::new(),
            category: category.to_string(),
            quantity,
            buying_price: 100.0,
            selling_price: None,
            low_stock: quantity <= 5,
            total_value: 100.0 * quantity as f64,
            created_at: String::new(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Rice", "Food", 50),
            product(2, "Sugar", "Food", 3),
            product(3, "Soap", "Hygiene", 0),
            product(4, "Bucket", "Household", 12),
        ]
    }

    #[test]
    fn test_stock_label() {
        assert_eq!(stock_label(&product(1, "x", "", 0)), "Out of Stock");
        assert_eq!(stock_label(&product(1, "x", "", 4)), "Low Stock (4)");
        assert_eq!(stock_label(&product(1, "x", "", 30)), "30");
    }

    #[test]
    fn test_search_then_clear_restores_all() {
        let mut state = ProductsListState {
            search_query: "FOOD".to_string(),
            ..Default::default()
        };
        let ids: Vec<i64> = visible_products(&catalog(), &state).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);

        state.search_query.clear();
        assert_eq!(visible_products(&catalog(), &state).len(), 4);
    }

    #[test]
    fn test_low_stock_filter_keeps_low_and_empty() {
        let state = ProductsListState {
            low_stock_only: true,
            ..Default::default()
        };
        let ids: Vec<i64> = visible_products(&catalog(), &state).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_sort_by_quantity_descending() {
        let state = ProductsListState {
            sort_field: "quantity".to_string(),
            sort_ascending: false,
            ..Default::default()
        };
        let ids: Vec<i64> = visible_products(&catalog(), &state).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 4, 2, 3]);
    }

    #[test]
    fn test_delete_removes_only_that_id() {
        let mut items = catalog();
        remove_record(&mut items, 2);
        let ids: Vec<i64> = items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }
}
