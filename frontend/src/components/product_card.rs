use shared::models::Product;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[derive(Properties, PartialEq)]
pub struct ProductCardProps {
    pub product: Product,
}

#[function_component(ProductCard)]
pub fn product_card(props: &ProductCardProps) -> Html {
    let product = &props.product;

    html! {
        <div class="product-card">
            if let Some(image) = &product.image {
                <img src={image.clone()} alt={product.name.clone()} />
            }
            <h3>{ &product.name }</h3>
            if let Some(supplier) = &product.supplier_name {
                <p class="supplier">{ supplier }</p>
            }
            if let Some(price) = &product.price {
                <p class="price">{ price }</p>
            }
            <Link<Route> to={Route::Inquire { product_id: product.id }} classes="btn btn-primary">
                { "Inquire" }
            </Link<Route>>
        </div>
    }
}
