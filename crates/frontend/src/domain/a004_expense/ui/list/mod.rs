mod state;

use contracts::domain::a004_expense::aggregate::Expense;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use thaw::*;

use crate::domain::a004_expense::api;
use crate::domain::a004_expense::ui::details::ExpenseForm;
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
use state::{create_state, total_amount, visible_expenses};

impl Searchable for Expense {
    // Дата ищется в том виде, в каком её видит пользователь
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.description.clone(),
            self.spent_by_username.clone().unwrap_or_default(),
            format_datetime(&self.spent_at),
        ]
    }
}

impl Sortable for Expense {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "description" => cmp_text(&self.description, &other.description),
            "amount" => cmp_f64(self.amount, other.amount),
            _ => self.spent_at.cmp(&other.spent_at),
        }
    }
}

#[component]
pub fn ExpensesListPage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toasts = use_toasts();
    let state = create_state();
    let all_expenses: RwSignal<Vec<Expense>> = RwSignal::new(Vec::new());
    let editing: RwSignal<Option<Expense>> = RwSignal::new(None);
    let (loading, set_loading) = signal(false);

    let refresh_view = move || {
        let rows =
            all_expenses.with_untracked(|all| state.with_untracked(|s| visible_expenses(all, s)));
        state.update(|s| s.items = rows);
    };

    let load_data = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_expenses().await {
                Ok(data) => {
                    all_expenses.set(data);
                    state.update(|s| s.is_loaded = true);
                    refresh_view();
                }
                Err(e) => {
                    log::error!("failed to fetch expenses: {}", e);
                    toasts.error(e.user_message("Failed to fetch expenses"));
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

    let on_saved = move |expense: Expense| {
        all_expenses.update(|items| upsert_record(items, expense));
        editing.set(None);
        refresh_view();
    };

    let delete_expense = move |expense: Expense| {
        if !confirm(&format!("Delete expense \"{}\"?", expense.description)) {
            return;
        }
        spawn_local(async move {
            match api::delete_expense(expense.id).await {
                Ok(()) => {
                    all_expenses.update(|items| remove_record(items, expense.id));
                    refresh_view();
                    toasts.info("Expense deleted");
                }
                Err(e) => {
                    log::error!("failed to delete expense {}: {}", expense.id, e);
                    toasts.error(e.user_message("Failed to delete expense"));
                }
            }
        });
    };

    let sort_field = Signal::derive(move || state.with(|s| s.sort_field.clone()));
    let sort_ascending = Signal::derive(move || state.with(|s| s.sort_ascending));

    let row_actions = move |expense: Expense| {
        let for_edit = expense.clone();
        view! {
            <Flex gap=FlexGap::Small>
                <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle
                    on_click=move |_| editing.set(Some(for_edit.clone()))>
                    {icon("edit")}
                </Button>
                <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle
                    on_click=move |_| delete_expense(expense.clone())>
                    {icon("trash")}
                </Button>
            </Flex>
        }
    };

    view! {
        <PageFrame page_id="a004_expense--list" category=PAGE_CAT_LIST>
            <div class="page__toolbar">
                <div class="page__header-left">
                    <h1 class="page__title">"Expenses"</h1>
                    <Badge>{move || state.get().items.len().to_string()}</Badge>
                    <span class="page__summary">
                        {move || format!("Total: {}", state.with(|s| format_tzs(total_amount(&s.items))))}
                    </span>
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
                <h2 class="form-card__title">"Add expense"</h2>
                <ExpenseForm on_saved=on_saved />
            </div>

            {move || editing.get().map(|expense| view! {
                <div class="form-card form-card--edit">
                    <h2 class="form-card__title">{format!("Edit expense #{}", expense.id)}</h2>
                    <ExpenseForm
                        initial=expense
                        on_saved=on_saved
                        on_cancel=move |_| editing.set(None)
                    />
                </div>
            })}

            <div class="filter-panel">
                <Input value=search_signal placeholder="Search description, user or date..." />
            </div>

            <Show when=move || loading.get() && !state.get().is_loaded>
                <Spinner />
            </Show>

            {move || {
                let term = state.with(|s| s.search_query.clone());
                let rows = state.get().items;
                if rows.is_empty() && state.with(|s| s.is_loaded) {
                    return view! { <div class="page-message">"No expenses found."</div> }.into_any();
                }
                if ctx.is_phone.get() {
                    view! {
                        <div class="record-cards">
                            {rows.into_iter().map(|expense| {
                                let actions = row_actions(expense.clone());
                                view! {
                                    <div class="record-card">
                                        <div class="record-card__title">{highlight_matches(&expense.description, &term)}</div>
                                        <div class="record-card__meta">{highlight_matches(&format_datetime(&expense.spent_at), &term)}</div>
                                        <div class="record-card__row">"Amount: " {format_tzs(expense.amount)}</div>
                                        <div class="record-card__row">
                                            "By: " {highlight_matches(expense.spent_by_username.as_deref().unwrap_or("-"), &term)}
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
                                            <SortHeader label="Description" field="description" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>
                                            <SortHeader label="Amount" field="amount" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>"Spent by"</TableHeaderCell>
                                        <TableHeaderCell>
                                            <SortHeader label="Date" field="spent_at" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>""</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    {rows.into_iter().enumerate().map(|(index, expense)| {
                                        let description = highlight_matches(&expense.description, &term);
                                        let amount = format_tzs(expense.amount);
                                        let by = highlight_matches(expense.spent_by_username.as_deref().unwrap_or("-"), &term);
                                        let at = highlight_matches(&format_datetime(&expense.spent_at), &term);
                                        let actions = row_actions(expense);
                                        view! {
                                            <TableRow>
                                                <TableCell>{index + 1}</TableCell>
                                                <TableCell>
                                                    <TableCellLayout truncate=true>{description}</TableCellLayout>
                                                </TableCell>
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
    use super::state::{total_amount, visible_expenses, ExpensesListState};
    use super::*;

    fn expense(id: i64, description: &str, amount: f64, at: &str) -> Expense {
        Expense {
            id,
            description: description.to_string(),
            amount,
            spent_by_username: Some("amina".to_string()),
            spent_at: at.to_string(),
        }
    }

    #[test]
    fn test_search_by_displayed_date() {
        let all = vec![
            expense(1, "Rent", 300000.0, "2024-02-01T08:00:00Z"),
            expense(2, "Transport", 15000.0, "2024-03-15T12:30:00Z"),
        ];
        let state = ExpensesListState {
            search_query: "15.03.2024".into(),
            ..Default::default()
        };
        let ids: Vec<i64> = visible_expenses(&all, &state).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_total_follows_filter() {
        let all = vec![
            expense(1, "Rent", 300000.0, "2024-02-01T08:00:00Z"),
            expense(2, "Transport", 15000.0, "2024-03-15T12:30:00Z"),
            expense(3, "Transport back", 12000.0, "2024-03-16T12:30:00Z"),
        ];
        let state = ExpensesListState {
            search_query: "transport".into(),
            ..Default::default()
        };
        let rows = visible_expenses(&all, &state);
        assert_eq!(total_amount(&rows), 27000.0);
        assert_eq!(rows[0].id, 3);
    }
}
