use contracts::domain::a001_product::aggregate::Product;
use leptos::prelude::*;

/// Native product picker. The value is the product id as text; empty means
/// nothing chosen.
#[component]
pub fn ProductSelect(
    #[prop(into)] products: Signal<Vec<Product>>,
    value: RwSignal<String>,
    /// Sales can't pick what is not in stock.
    #[prop(optional)]
    disable_out_of_stock: bool,
) -> impl IntoView {
    view! {
        <select
            class="form__select"
            prop:value=move || value.get()
            on:change=move |ev| value.set(event_target_value(&ev))
        >
            <option value="">"Select product"</option>
            {move || {
                let selected = value.get();
                products
                    .get()
                    .into_iter()
                    .map(|p| {
                        let id = p.id.to_string();
                        let disabled = disable_out_of_stock && p.is_out_of_stock();
                        let label = if disabled {
                            format!("{} (out of stock)", p.name)
                        } else {
                            format!("{} ({} in stock)", p.name, p.quantity)
                        };
                        view! {
                            <option value=id.clone() selected=id == selected disabled=disabled>
                                {label}
                            </option>
                        }
                    })
                    .collect_view()
            }}
        </select>
    }
}
