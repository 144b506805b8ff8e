use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a003_sale::aggregate::{Sale, SaleDto};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_product::ui::select::ProductSelect;
use crate::domain::a003_sale::api;
use crate::shared::form_utils::{require_f64, require_i64};
use crate::shared::http::ApiError;
use crate::shared::toast::use_toasts;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SaleFields {
    pub product: String,
    pub quantity: String,
    pub price_per_unit: String,
}

impl SaleFields {
    pub fn from_sale(s: &Sale) -> Self {
        let dto = SaleDto::from(s);
        Self {
            product: dto.product.to_string(),
            quantity: dto.quantity.to_string(),
            price_per_unit: format!("{:.2}", dto.price_per_unit),
        }
    }

    pub fn to_dto(&self) -> Result<SaleDto, String> {
        Ok(SaleDto {
            product: require_i64("Product", &self.product)?,
            quantity: require_i64("Quantity", &self.quantity)?,
            price_per_unit: require_f64("Price per unit", &self.price_per_unit)?,
        })
    }
}

/// Stock errors come back on the `quantity` field; show those first.
pub fn sale_error_message(error: &ApiError, fallback: &str) -> String {
    error
        .field_message("quantity")
        .unwrap_or_else(|| error.user_message(fallback))
}

#[component]
pub fn SaleForm(
    #[prop(optional)] initial: Option<Sale>,
    #[prop(into)] products: Signal<Vec<Product>>,
    #[prop(into)] on_saved: Callback<Sale>,
    #[prop(optional, into)] on_cancel: Option<Callback<()>>,
) -> impl IntoView {
    let toasts = use_toasts();
    let editing_id = initial.as_ref().map(|s| s.id);
    let start = initial.as_ref().map(SaleFields::from_sale).unwrap_or_default();

    let product = RwSignal::new(start.product);
    let quantity = RwSignal::new(start.quantity);
    let price_per_unit = RwSignal::new(start.price_per_unit);
    let (submitting, set_submitting) = signal(false);

    // Picking a product suggests its selling price
    Effect::new(move |prev: Option<String>| {
        let chosen = product.get();
        if editing_id.is_none() && prev.is_some_and(|p| p != chosen) {
            let price = products.with_untracked(|list| {
                list.iter()
                    .find(|p| p.id.to_string() == chosen)
                    .and_then(|p| p.selling_price)
                    .map(|v| format!("{:.2}", v))
            });
            if let Some(price) = price {
                price_per_unit.set(price);
            }
        }
        chosen
    });

    let submit = move || {
        let fields = SaleFields {
            product: product.get_untracked(),
            quantity: quantity.get_untracked(),
            price_per_unit: price_per_unit.get_untracked(),
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
                Some(id) => api::update_sale(id, &dto).await,
                None => api::create_sale(&dto).await,
            };
            set_submitting.set(false);
            match result {
                Ok(sale) => {
                    if editing_id.is_some() {
                        toasts.success("Sale updated");
                    } else {
                        toasts.success("Sale recorded");
                        product.set(String::new());
                        quantity.set(String::new());
                        price_per_unit.set(String::new());
                    }
                    on_saved.run(sale);
                }
                Err(e) => toasts.error(sale_error_message(&e, "Failed to save sale")),
            }
        });
    };

    view! {
        <div class="record-form">
            <div class="form__group">
                <label class="form__label">"Product"</label>
                <ProductSelect products=products value=product disable_out_of_stock=true />
            </div>
            <div class="form__group">
                <label class="form__label">"Quantity"</label>
                <Input value=quantity input_type=InputType::Number placeholder="0" />
            </div>
            <div class="form__group">
                <label class="form__label">"Price per unit (TZS)"</label>
                <Input value=price_per_unit input_type=InputType::Number placeholder="0.00" />
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
                        (false, false) => "Record sale",
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
    fn test_quantity_message_preferred() {
        let err = ApiError::Status {
            status: 400,
            body: r#"{"quantity":["Only 2 left in stock."],"non_field_errors":["x"]}"#.into(),
        };
        assert_eq!(sale_error_message(&err, "Failed"), "Only 2 left in stock.");
    }

    #[test]
    fn test_falls_back_to_flattened_payload() {
        let err = ApiError::Status {
            status: 400,
            body: r#"{"detail":"Product is inactive"}"#.into(),
        };
        assert_eq!(sale_error_message(&err, "Failed"), "Product is inactive");
        assert_eq!(
            sale_error_message(&ApiError::Network("down".into()), "Failed"),
            "Failed"
        );
    }

    #[test]
    fn test_to_dto_requires_quantity() {
        let fields = SaleFields {
            product: "1".into(),
            quantity: "".into(),
            price_per_unit: "5".into(),
        };
        assert_eq!(fields.to_dto().unwrap_err(), "Quantity is required");
    }
}
