use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::{commit_search, Route};

#[function_component(Home)]
pub fn home() -> Html {
    let navigator = use_navigator();
    let term = use_state(String::new);

    let on_input = {
        let term = term.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            term.set(input.value());
        })
    };

    let on_submit = {
        let term = term.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Some(navigator) = &navigator {
                commit_search(navigator, &term, false);
            }
        })
    };

    html! {
        <div class="container">
            <section class="hero">
                <h2>{ "Organic goods, straight from local producers" }</h2>
                <p>{ "Browse seasonal products and send an inquiry to the supplier." }</p>
                <form class="search-form" onsubmit={on_submit}>
                    <input
                        type="search"
                        placeholder="Search products..."
                        value={(*term).clone()}
                        oninput={on_input}
                    />
                    <button type="submit" class="btn btn-primary">{ "Search" }</button>
                </form>
            </section>
            <section class="highlights">
                <Link<Route> to={Route::Products} classes="btn btn-secondary">
                    { "View all products" }
                </Link<Route>>
            </section>
        </div>
    }
}
