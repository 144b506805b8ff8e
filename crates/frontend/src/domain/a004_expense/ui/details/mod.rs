use contracts::domain::a004_expense::aggregate::{Expense, ExpenseDto};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a004_expense::api;
use crate::shared::form_utils::{require_f64, require_text};
use crate::shared::toast::use_toasts;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseFields {
    pub description: String,
    pub amount: String,
}

impl ExpenseFields {
    pub fn from_expense(e: &Expense) -> Self {
        Self {
            description: e.description.clone(),
            amount: format!("{:.2}", e.amount),
        }
    }

    pub fn to_dto(&self) -> Result<ExpenseDto, String> {
        Ok(ExpenseDto {
            description: require_text("Description", &self.description)?,
            amount: require_f64("Amount", &self.amount)?,
        })
    }
}

#[component]
pub fn ExpenseForm(
    #[prop(optional)] initial: Option<Expense>,
    #[prop(into)] on_saved: Callback<Expense>,
    #[prop(optional, into)] on_cancel: Option<Callback<()>>,
) -> impl IntoView {
    let toasts = use_toasts();
    let editing_id = initial.as_ref().map(|e| e.id);
    let start = initial
        .as_ref()
        .map(ExpenseFields::from_expense)
        .unwrap_or_default();

    let description = RwSignal::new(start.description);
    let amount = RwSignal::new(start.amount);
    let (submitting, set_submitting) = signal(false);

    let submit = move || {
        let fields = ExpenseFields {
            description: description.get_untracked(),
            amount: amount.get_untracked(),
        };
        let dto = match fields.to_dto() {
            Ok(dto) => dto,
            Err(msg) => {
                toasts.error(msg);
                return;
            }
        };

        set_submitting.set(true);
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => api::update_expense(id, &dto).await,
                None => api::create_expense(&dto).await,
            };
            set_submitting.set(false);
            match result {
                Ok(expense) => {
                    if editing_id.is_some() {
                        toasts.success("Expense updated");
                    } else {
                        toasts.success("Expense added");
                        description.set(String::new());
                        amount.set(String::new());
                    }
                    on_saved.run(expense);
                }
                Err(e) => toasts.error(e.user_message("Failed to save expense")),
            }
        });
    };

    view! {
        <div class="record-form">
            <div class="form__group form__group--wide">
                <label class="form__label">"Description"</label>
                <Textarea value=description placeholder="What was the money spent on?" />
            </div>
            <div class="form__group">
                <label class="form__label">"Amount (TZS)"</label>
                <Input value=amount input_type=InputType::Number placeholder="0.00" />
            </div>
            <div class="form__actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| submit()
                    disabled=Signal::derive(move || submitting.get())
                >
                    {move || match (submitting.get(), editing_id.is_some()) {
                        (true, _) => "Saving...",
                        (false, true) => "Save",
                        (false, false) => "Add expense",
                    }}
                </Button>
                {on_cancel.map(|cancel| view! {
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| cancel.run(())>
                        "Cancel"
                    </Button>
                })}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_dto_trims_description() {
        let fields = ExpenseFields {
            description: "  Electricity bill ".into(),
            amount: "45000".into(),
        };
        let dto = fields.to_dto().unwrap();
        assert_eq!(dto.description, "Electricity bill");
        assert_eq!(dto.amount, 45000.0);
    }

    #[test]
    fn test_rejects_blank_fields() {
        let blank = ExpenseFields {
            description: " ".into(),
            amount: "10".into(),
        };
        assert_eq!(blank.to_dto().unwrap_err(), "Description is required");

        let no_amount = ExpenseFields {
            description: "Rent".into(),
            amount: "".into(),
        };
        assert_eq!(no_amount.to_dto().unwrap_err(), "Amount is required");
    }
}
