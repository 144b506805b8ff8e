use contracts::domain::a001_product::aggregate::Product;
use leptos::prelude::*;

use crate::shared::list_utils::{filter_list, sort_list};

#[derive(Clone, Debug)]
pub struct ProductsListState {
    pub items: Vec<Product>,
    pub search_query: String,
    pub sort_field: String,
    pub sort_ascending: bool,
    /// `?filter=low-stock`: only low and out-of-stock rows.
    pub low_stock_only: bool,
    pub is_loaded: bool,
}

impl Default for ProductsListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_query: String::new(),
            sort_field: "name".to_string(),
            sort_ascending: true,
            low_stock_only: false,
            is_loaded: false,
        }
    }
}

pub fn create_state() -> RwSignal<ProductsListState> {
    RwSignal::new(ProductsListState::default())
}

/// Rows to render for the current search, stock filter and sort.
pub fn visible_products(all: &[Product], state: &ProductsListState) -> Vec<Product> {
    let mut rows = filter_list(all, &state.search_query);
    if state.low_stock_only {
        rows.retain(|p| p.low_stock || p.is_out_of_stock());
    }
    sort_list(&mut rows, &state.sort_field, state.sort_ascending);
    rows
}
