use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use client_core::search::{search_term, Debouncer};
use gloo::timers::callback::Timeout;
use shared::api::ProductQuery;
use shared::models::Product;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::error_message::ErrorMessage;
use crate::components::loading_spinner::LoadingSpinner;
use crate::components::product_card::ProductCard;
use crate::context::auth::use_auth;
use crate::router::commit_search;

#[function_component(ProductList)]
pub fn product_list() -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let committed = use_location().and_then(|location| search_term(location.query_str()));

    let input = use_state(|| committed.clone().unwrap_or_default());
    let products = use_state(Vec::<Product>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    let wait_ms = auth.services.config.search_debounce_ms;
    let debouncer = use_mut_ref(|| Debouncer::<String>::new(wait_ms));
    let timer: Rc<RefCell<Option<Timeout>>> = use_mut_ref(|| None);
    let request_seq = use_mut_ref(|| 0u64);

    // Fetch whenever the committed term changes. Only the latest request may
    // write its result.
    {
        let api = auth.services.api.clone();
        let products = products.clone();
        let loading = loading.clone();
        let error = error.clone();
        let input = input.clone();
        let request_seq = request_seq.clone();
        use_effect_with(committed.clone(), move |committed| {
            input.set(committed.clone().unwrap_or_default());
            let query = committed.clone().map(ProductQuery::search).unwrap_or_default();
            let seq = {
                let mut current = request_seq.borrow_mut();
                *current += 1;
                *current
            };
            loading.set(true);
            error.set(None);

            wasm_bindgen_futures::spawn_local(async move {
                let result = api.fetch_products(&query).await;
                if *request_seq.borrow() != seq {
                    tracing::debug!(seq, "Dropping stale product results");
                    return;
                }
                match result {
                    Ok(list) => products.set(list),
                    Err(e) => {
                        tracing::error!("Failed to fetch products: {}", e);
                        products.set(Vec::new());
                        error.set(Some(e.user_message()));
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    // Cancel a pending search when leaving the page.
    {
        let timer = timer.clone();
        let debouncer = debouncer.clone();
        use_effect_with((), move |_| {
            move || {
                timer.borrow_mut().take();
                debouncer.borrow_mut().cancel();
            }
        });
    }

    let on_input = {
        let input = input.clone();
        let navigator = navigator.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            input.set(value.clone());

            let now = Utc::now();
            let due = debouncer.borrow_mut().push(value, now);
            let delay = (due - now).num_milliseconds().max(0) as u32;

            let debouncer = debouncer.clone();
            let navigator = navigator.clone();
            // Replacing the handle drops, and so cancels, the previous timeout.
            *timer.borrow_mut() = Some(Timeout::new(delay, move || {
                // Timers may fire a tick early.
                let term = debouncer.borrow_mut().poll(Utc::now().max(due));
                if let (Some(term), Some(navigator)) = (term, &navigator) {
                    commit_search(navigator, &term, true);
                }
            }));
        })
    };

    let on_submit = {
        let input = input.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Some(navigator) = &navigator {
                commit_search(navigator, &input, false);
            }
        })
    };

    html! {
        <div class="container">
            <h2>{ "Products" }</h2>
            <form class="search-form" onsubmit={on_submit}>
                <input
                    type="search"
                    placeholder="Search products..."
                    value={(*input).clone()}
                    oninput={on_input}
                />
            </form>
            <ErrorMessage message={(*error).clone()} />
            if *loading {
                <LoadingSpinner label="Loading products..." />
            } else if products.is_empty() {
                <div class="empty-state">
                    if let Some(term) = &committed {
                        <p>{ format!("No products match \"{}\".", term) }</p>
                    } else {
                        <p>{ "No products are listed yet." }</p>
                    }
                </div>
            } else {
                <div class="product-grid">
                    { for products.iter().map(|product| html! {
                        <ProductCard key={product.id} product={product.clone()} />
                    }) }
                </div>
            }
        </div>
    }
}
