use client_core::{split_target, Redirect};
use shared::api::ProductQuery;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::protected::Protected;
use crate::pages::{
    about::About, contact::Contact, home::Home, inquiry::ProductInquiry, login::Login,
    not_found::NotFound, products::ProductList, register::Register,
};

#[derive(Clone, Debug, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/products")]
    Products,
    #[at("/inquire/:product_id")]
    Inquire { product_id: i64 },
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/about")]
    About,
    #[at("/contact")]
    Contact,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Home /> },
        Route::Products => html! { <ProductList /> },
        Route::Inquire { product_id } => html! {
            <Protected>
                <ProductInquiry {product_id} />
            </Protected>
        },
        Route::Login => html! { <Login /> },
        Route::Register => html! { <Register /> },
        Route::About => html! { <About /> },
        Route::Contact => html! { <Contact /> },
        Route::NotFound => html! { <NotFound /> },
    }
}

/// Carry out a navigation request from the auth controller or the guard.
pub fn follow(navigator: &Navigator, redirect: Redirect) {
    let (path, query) = split_target(&redirect.to);
    let route = Route::recognize(path).unwrap_or(Route::NotFound);
    tracing::debug!(to = %redirect.to, replace = redirect.replace, "Navigating");

    if query.is_empty() {
        match (redirect.replace, redirect.context) {
            (true, Some(context)) => navigator.replace_with_state(&route, context),
            (true, None) => navigator.replace(&route),
            (false, Some(context)) => navigator.push_with_state(&route, context),
            (false, None) => navigator.push(&route),
        }
        return;
    }

    let result = match (redirect.replace, redirect.context) {
        (true, Some(context)) => navigator.replace_with_query_and_state(&route, &query, context),
        (true, None) => navigator.replace_with_query(&route, &query),
        (false, Some(context)) => navigator.push_with_query_and_state(&route, &query, context),
        (false, None) => navigator.push_with_query(&route, &query),
    };
    if let Err(err) = result {
        tracing::error!(to = %redirect.to, "Failed to navigate: {:?}", err);
    }
}

/// Point the product list at `term`. Debounced commits pass `replace` so a
/// burst of typing leaves a single history entry.
pub fn commit_search(navigator: &Navigator, term: &str, replace: bool) {
    let query = ProductQuery::search(term);
    if query.search.is_none() {
        if replace {
            navigator.replace(&Route::Products);
        } else {
            navigator.push(&Route::Products);
        }
        return;
    }

    let result = if replace {
        navigator.replace_with_query(&Route::Products, &query)
    } else {
        navigator.push_with_query(&Route::Products, &query)
    };
    if let Err(err) = result {
        tracing::error!("Failed to encode search query: {:?}", err);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use wasm_bindgen_test::*;

    use super::*;

    #[wasm_bindgen_test]
    fn test_guarded_intent_resolves_to_inquiry_route() {
        assert_eq!(
            Route::recognize("/inquire/42"),
            Some(Route::Inquire { product_id: 42 })
        );
        assert_eq!(Route::recognize("/login"), Some(Route::Login));

        let (path, query) = split_target("/inquire/42?ref=home");
        assert_eq!(Route::recognize(path), Some(Route::Inquire { product_id: 42 }));
        assert_eq!(query, vec![("ref".to_string(), "home".to_string())]);
    }
}
