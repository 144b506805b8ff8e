use contracts::projections::p900_reports::dto::Report;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use thaw::*;

use crate::layout::global_context::AppGlobalContext;
use crate::projections::p900_reports::api;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_f64, sort_list, SortHeader, Sortable};
use crate::shared::number_format::format_tzs;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::toast::use_toasts;

impl Sortable for Report {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "total_sales" => cmp_f64(self.total_sales, other.total_sales),
            "net_profit" => cmp_f64(self.net_profit, other.net_profit),
            _ => self.generated_at.cmp(&other.generated_at),
        }
    }
}

fn profit_class(value: f64) -> &'static str {
    if value < 0.0 {
        "amount amount--negative"
    } else {
        "amount amount--positive"
    }
}

/// Read-only: reports are generated on the server.
#[component]
pub fn ReportsListPage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toasts = use_toasts();
    let reports: RwSignal<Vec<Report>> = RwSignal::new(Vec::new());
    let sort_field = RwSignal::new("generated_at".to_string());
    let sort_ascending = RwSignal::new(false);
    let (loaded, set_loaded) = signal(false);
    let (loading, set_loading) = signal(false);

    let load_data = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_reports().await {
                Ok(data) => {
                    reports.set(data);
                    set_loaded.set(true);
                }
                Err(e) => {
                    log::error!("failed to fetch reports: {}", e);
                    toasts.error(e.user_message("Failed to fetch reports"));
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

    let toggle_sort = move |field: &'static str| {
        if sort_field.get_untracked() == field {
            sort_ascending.update(|a| *a = !*a);
        } else {
            sort_field.set(field.to_string());
            sort_ascending.set(true);
        }
    };

    let rows = Memo::new(move |_| {
        let mut rows = reports.get();
        sort_list(&mut rows, &sort_field.get(), sort_ascending.get());
        rows
    });

    view! {
        <PageFrame page_id="p900_reports--list" category=PAGE_CAT_LIST>
            <div class="page__toolbar">
                <div class="page__header-left">
                    <h1 class="page__title">"Reports"</h1>
                    <Badge>{move || rows.with(|r| r.len()).to_string()}</Badge>
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

            <Show when=move || loading.get() && !loaded.get()>
                <Spinner />
            </Show>

            {move || {
                let rows = rows.get();
                if rows.is_empty() && loaded.get() {
                    return view! { <div class="page-message">"No reports generated yet."</div> }.into_any();
                }
                if ctx.is_phone.get() {
                    view! {
                        <div class="record-cards">
                            {rows.into_iter().map(|report| view! {
                                <div class="record-card">
                                    <div class="record-card__title">{format!("Report #{}", report.id)}</div>
                                    <div class="record-card__meta">
                                        {format_datetime(&report.generated_at)} " · "
                                        {report.generated_by_username.unwrap_or_else(|| "-".to_string())}
                                    </div>
                                    <div class="record-card__row">"Sales: " {format_tzs(report.total_sales)}</div>
                                    <div class="record-card__row">"Purchases: " {format_tzs(report.total_purchases)}</div>
                                    <div class="record-card__row">"Expenses: " {format_tzs(report.total_expenses)}</div>
                                    <div class="record-card__row">
                                        "Net profit: "
                                        <span class=profit_class(report.net_profit)>{format_tzs(report.net_profit)}</span>
                                    </div>
                                    <div class="record-card__row">{report.notes}</div>
                                </div>
                            }).collect_view()}
                        </div>
                    }.into_any()
                } else {
                    view! {
                        <div class="table-wrapper">
                            <Table attr:style="width: 100%;">
                                <TableHeader>
                                    <TableRow>
                                        <TableHeaderCell>
                                            <SortHeader label="Generated" field="generated_at" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>"By"</TableHeaderCell>
                                        <TableHeaderCell>
                                            <SortHeader label="Sales" field="total_sales" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>"Purchases"</TableHeaderCell>
                                        <TableHeaderCell>"Expenses"</TableHeaderCell>
                                        <TableHeaderCell>
                                            <SortHeader label="Net profit" field="net_profit" sort_field=sort_field ascending=sort_ascending on_sort=toggle_sort />
                                        </TableHeaderCell>
                                        <TableHeaderCell>"Stock value"</TableHeaderCell>
                                        <TableHeaderCell>"Notes"</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    {rows.into_iter().map(|report| {
                                        let generated_at = format_datetime(&report.generated_at);
                                        let by = report.generated_by_username.unwrap_or_else(|| "-".to_string());
                                        let sales = format_tzs(report.total_sales);
                                        let purchases = format_tzs(report.total_purchases);
                                        let expenses = format_tzs(report.total_expenses);
                                        let tone = profit_class(report.net_profit);
                                        let profit = format_tzs(report.net_profit);
                                        let stock_value = format_tzs(report.total_product_price);
                                        let notes = report.notes;
                                        view! {
                                            <TableRow>
                                                <TableCell>{generated_at}</TableCell>
                                                <TableCell>{by}</TableCell>
                                                <TableCell>{sales}</TableCell>
                                                <TableCell>{purchases}</TableCell>
                                                <TableCell>{expenses}</TableCell>
                                                <TableCell>
                                                    <span class=tone>{profit}</span>
                                                </TableCell>
                                                <TableCell>{stock_value}</TableCell>
                                                <TableCell>
                                                    <TableCellLayout truncate=true>{notes}</TableCellLayout>
                                                </TableCell>
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
    use super::*;

    fn report(id: i64, at: &str, net_profit: f64) -> Report {
        Report {
            id,
            generated_by_username: None,
            generated_at: at.to_string(),
            notes: String::new(),
            total_sales: 0.0,
            total_purchases: 0.0,
            total_expenses: 0.0,
            net_profit,
            total_product_price: 0.0,
        }
    }

    #[test]
    fn test_newest_first_by_default() {
        let mut rows = vec![
            report(1, "2024-01-01T00:00:00Z", 1.0),
            report(2, "2024-06-01T00:00:00Z", -1.0),
        ];
        sort_list(&mut rows, "generated_at", false);
        assert_eq!(rows[0].id, 2);
    }

    #[test]
    fn test_profit_class() {
        assert_eq!(profit_class(-0.01), "amount amount--negative");
        assert_eq!(profit_class(0.0), "amount amount--positive");
    }
}
