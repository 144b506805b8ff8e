use contracts::domain::a001_product::aggregate::{Product, ProductDto};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_product::api;
use crate::shared::form_utils::{optional_f64, require_f64, require_i64, require_text};
use crate::shared::toast::use_toasts;

/// Raw text of the product form fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub category: String,
    pub quantity: String,
    pub buying_price: String,
    pub selling_price: String,
}

impl ProductFields {
    pub fn from_product(p: &Product) -> Self {
        let dto = ProductDto::from(p);
        Self {
            name: dto.name,
            description: dto.description,
            category: dto.category,
            quantity: dto.quantity.to_string(),
            buying_price: format!("{:.2}", dto.buying_price),
            selling_price: dto
                .selling_price
                .map(|v| format!("{:.2}", v))
                .unwrap_or_default(),
        }
    }

    pub fn to_dto(&self) -> Result<ProductDto, String> {
        Ok(ProductDto {
            name: require_text("Name", &self.name)?,
            description: self.description.trim().to_string(),
            category: self.category.trim().to_string(),
            quantity: if self.quantity.trim().is_empty() {
                0
            } else {
                require_i64("Quantity", &self.quantity)?
            },
            buying_price: require_f64("Buying price", &self.buying_price)?,
            selling_price: optional_f64("Selling price", &self.selling_price)?,
        })
    }
}

/// Create form when `initial` is absent, edit form otherwise.
#[component]
pub fn ProductForm(
    #[prop(optional)] initial: Option<Product>,
    #[prop(into)] on_saved: Callback<Product>,
    #[prop(optional, into)] on_cancel: Option<Callback<()>>,
) -> impl IntoView {
    let toasts = use_toasts();
    let editing_id = initial.as_ref().map(|p| p.id);
    let start = initial
        .as_ref()
        .map(ProductFields::from_product)
        .unwrap_or_default();

    let name = RwSignal::new(start.name);
    let description = RwSignal::new(start.description);
    let category = RwSignal::new(start.category);
    let quantity = RwSignal::new(start.quantity);
    let buying_price = RwSignal::new(start.buying_price);
    let selling_price = RwSignal::new(start.selling_price);
    let (submitting, set_submitting) = signal(false);

    let reset = move || {
        for field in [name, description, category, quantity, buying_price, selling_price] {
            field.set(String::new());
        }
    };

    let submit = move || {
        let fields = ProductFields {
            name: name.get_untracked(),
            description: description.get_untracked(),
            category: category.get_untracked(),
            quantity: quantity.get_untracked(),
            buying_price: buying_price.get_untracked(),
            selling_price: selling_price.get_untracked(),
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
                Some(id) => api::update_product(id, &dto).await,
                None => api::create_product(&dto).await,
            };
            set_submitting.set(false);
            match result {
                Ok(product) => {
                    if editing_id.is_some() {
                        toasts.success("Product updated");
                    } else {
                        toasts.success("Product added");
                        reset();
                    }
                    on_saved.run(product);
                }
                Err(e) => {
                    let fallback = if editing_id.is_some() {
                        "Failed to update product"
                    } else {
                        "Failed to add product"
                    };
                    toasts.error(e.user_message(fallback));
                }
            }
        });
    };

    view! {
        <div class="record-form">
            <div class="form__group">
                <label class="form__label">"Name"</label>
                <Input value=name placeholder="Product name" />
            </div>
            <div class="form__group">
                <label class="form__label">"Category"</label>
                <Input value=category placeholder="Optional" />
            </div>
            <div class="form__group form__group--wide">
                <label class="form__label">"Description"</label>
                <Textarea value=description placeholder="Optional" attr:rows=2 />
            </div>
            <div class="form__group">
                <label class="form__label">"Quantity"</label>
                <Input value=quantity input_type=InputType::Number placeholder="0" />
            </div>
            <div class="form__group">
                <label class="form__label">"Buying price (TZS)"</label>
                <Input value=buying_price input_type=InputType::Number placeholder="0.00" />
            </div>
            <div class="form__group">
                <label class="form__label">"Selling price (TZS)"</label>
                <Input value=selling_price input_type=InputType::Number placeholder="Optional" />
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
                        (false, false) => "Add product",
                    }}
                </Button>
                {on_cancel.map(|cancel| view! {
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| cancel.run(())
                    >
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

    fn filled() -> ProductFields {
        ProductFields {
            name: " Rice 25kg ".into(),
            description: "".into(),
            category: "Food".into(),
            quantity: "10".into(),
            buying_price: "45000".into(),
            selling_price: "".into(),
        }
    }

    #[test]
    fn test_to_dto() {
        let dto = filled().to_dto().unwrap();
        assert_eq!(dto.name, "Rice 25kg");
        assert_eq!(dto.quantity, 10);
        assert_eq!(dto.buying_price, 45000.0);
        assert_eq!(dto.selling_price, None);
    }

    #[test]
    fn test_required_fields() {
        let mut fields = filled();
        fields.name = "  ".into();
        assert_eq!(fields.to_dto().unwrap_err(), "Name is required");

        let mut fields = filled();
        fields.buying_price.clear();
        assert_eq!(fields.to_dto().unwrap_err(), "Buying price is required");
    }

    #[test]
    fn test_blank_quantity_is_zero() {
        let mut fields = filled();
        fields.quantity = " ".into();
        assert_eq!(fields.to_dto().unwrap().quantity, 0);
    }
}
