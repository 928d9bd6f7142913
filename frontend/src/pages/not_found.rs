use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="container">
            <div class="empty-state">
                <h2>{ "404 - Page Not Found" }</h2>
                <p>{ "We couldn't find that page. It may have moved, or the product is no longer listed." }</p>
                <Link<Route> to={Route::Products}>
                    <button class="btn btn-primary">{ "Browse products" }</button>
                </Link<Route>>
            </div>
        </div>
    }
}
