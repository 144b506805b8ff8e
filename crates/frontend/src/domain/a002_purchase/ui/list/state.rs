use contracts::domain::a002_purchase::aggregate::Purchase;
use leptos::prelude::*;

use crate::shared::list_utils::{filter_list, sort_list};

#[derive(Clone, Debug)]
pub struct PurchasesListState {
    pub items: Vec<Purchase>,
    pub search_query: String,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub is_loaded: bool,
}

impl Default for PurchasesListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_query: String::new(),
            sort_field: "purchased_at".to_string(),
            sort_ascending: false,
            is_loaded: false,
        }
    }
}

pub fn create_state() -> RwSignal<PurchasesListState> {
    RwSignal::new(PurchasesListState::default())
}

pub fn visible_purchases(all: &[Purchase], state: &PurchasesListState) -> Vec<Purchase> {
    let mut rows = filter_list(all, &state.search_query);
    sort_list(&mut rows, &state.sort_field, state.sort_ascending);
    rows
}
