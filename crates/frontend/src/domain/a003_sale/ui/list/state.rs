use contracts::domain::a003_sale::aggregate::Sale;
use leptos::prelude::*;

use crate::shared::list_utils::{filter_list, sort_list};

#[derive(Clone, Debug)]
pub struct SalesListState {
    pub items: Vec<Sale>,
    pub search_query: String,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub is_loaded: bool,
}

impl Default for SalesListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_query: String::new(),
            sort_field: "sold_at".to_string(),
            sort_ascending: false,
            is_loaded: false,
        }
    }
}

pub fn create_state() -> RwSignal<SalesListState> {
    RwSignal::new(SalesListState::default())
}

pub fn visible_sales(all: &[Sale], state: &SalesListState) -> Vec<Sale> {
    let mut rows = filter_list(all, &state.search_query);
    sort_list(&mut rows, &state.sort_field, state.sort_ascending);
    rows
}
