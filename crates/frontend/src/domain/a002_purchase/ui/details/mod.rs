use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a002_purchase::aggregate::{Purchase, PurchaseDto};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_product::ui::select::ProductSelect;
use crate::domain::a002_purchase::api;
use crate::shared::form_utils::{require_f64, require_i64};
use crate::shared::toast::use_toasts;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PurchaseFields {
    pub product: String,
    pub quantity: String,
    pub price_per_unit: String,
}

impl PurchaseFields {
    pub fn from_purchase(p: &Purchase) -> Self {
        Self {
            product: p.product.to_string(),
            quantity: p.quantity.to_string(),
            price_per_unit: format!("{:.2}", p.price_per_unit),
        }
    }

    pub fn to_dto(&self) -> Result<PurchaseDto, String> {
        Ok(PurchaseDto {
            product: require_i64("Product", &self.product)?,
            quantity: require_i64("Quantity", &self.quantity)?,
            price_per_unit: require_f64("Price per unit", &self.price_per_unit)?,
        })
    }
}

#[component]
pub fn PurchaseForm(
    #[prop(optional)] initial: Option<Purchase>,
    #[prop(into)] products: Signal<Vec<Product>>,
    #[prop(into)] on_saved: Callback<Purchase>,
    #[prop(optional, into)] on_cancel: Option<Callback<()>>,
) -> impl IntoView {
    let toasts = use_toasts();
    let editing_id = initial.as_ref().map(|p| p.id);
    let start = initial
        .as_ref()
        .map(PurchaseFields::from_purchase)
        .unwrap_or_default();

    let product = RwSignal::new(start.product);
    let quantity = RwSignal::new(start.quantity);
    let price_per_unit = RwSignal::new(start.price_per_unit);
    let (submitting, set_submitting) = signal(false);

    // New purchases default to the product's buying price
    Effect::new(move |prev: Option<String>| {
        let chosen = product.get();
        if editing_id.is_none() && prev.is_some_and(|p| p != chosen) {
            let price = products.with_untracked(|list| {
                list.iter()
                    .find(|p| p.id.to_string() == chosen)
                    .map(|p| format!("{:.2}", p.buying_price))
            });
            if let Some(price) = price {
                price_per_unit.set(price);
            }
        }
        chosen
    });

    let submit = move || {
        let fields = PurchaseFields {
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
                Some(id) => api::update_purchase(id, &dto).await,
                None => api::create_purchase(&dto).await,
            };
            set_submitting.set(false);
            match result {
                Ok(purchase) => {
                    if editing_id.is_some() {
                        toasts.success("Purchase updated");
                    } else {
                        toasts.success("Purchase recorded");
                        product.set(String::new());
                        quantity.set(String::new());
                        price_per_unit.set(String::new());
                    }
                    on_saved.run(purchase);
                }
                Err(e) => toasts.error(e.user_message("Failed to save purchase")),
            }
        });
    };

    view! {
        <div class="record-form">
            <div class="form__group">
                <label class="form__label">"Product"</label>
                <ProductSelect products=products value=product />
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
                        (false, false) => "Record purchase",
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
    fn test_to_dto() {
        let fields = PurchaseFields {
            product: "4".into(),
            quantity: "12".into(),
            price_per_unit: "2500".into(),
        };
        let dto = fields.to_dto().unwrap();
        assert_eq!(dto.product, 4);
        assert_eq!(dto.quantity, 12);
        assert_eq!(dto.price_per_unit, 2500.0);
    }

    #[test]
    fn test_product_required() {
        let fields = PurchaseFields {
            quantity: "1".into(),
            price_per_unit: "1".into(),
            ..Default::default()
        };
        assert_eq!(fields.to_dto().unwrap_err(), "Product is required");
    }
}
