use contracts::domain::a004_expense::aggregate::Expense;
use leptos::prelude::*;

use crate::shared::list_utils::{filter_list, sort_list};

#[derive(Clone, Debug)]
pub struct ExpensesListState {
    pub items: Vec<Expense>,
    pub search_query: String,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub is_loaded: bool,
}

impl Default for ExpensesListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_query: String::new(),
            sort_field: "spent_at".to_string(),
            sort_ascending: false,
            is_loaded: false,
        }
    }
}

pub fn create_state() -> RwSignal<ExpensesListState> {
    RwSignal::new(ExpensesListState::default())
}

pub fn visible_expenses(all: &[Expense], state: &ExpensesListState) -> Vec<Expense> {
    let mut rows = filter_list(all, &state.search_query);
    sort_list(&mut rows, &state.sort_field, state.sort_ascending);
    rows
}

/// Sum over what is currently shown.
pub fn total_amount(rows: &[Expense]) -> f64 {
    rows.iter().map(|e| e.amount).sum()
}
