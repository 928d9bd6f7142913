use yew::prelude::*;
use yew_router::prelude::*;

use crate::context::auth::use_auth;
use crate::router::{follow, Route};

#[function_component(Header)]
pub fn header() -> Html {
    let auth = use_auth();
    let navigator = use_navigator();

    let on_logout = {
        let controller = auth.services.auth.clone();
        Callback::from(move |_| {
            let redirect = controller.logout();
            if let Some(navigator) = &navigator {
                follow(navigator, redirect);
            }
        })
    };

    html! {
        <header class="header">
            <div class="container">
                <Link<Route> to={Route::Home} classes="brand">{ "GoLocal" }</Link<Route>>
                <nav>
                    <Link<Route> to={Route::Home}>{ "Home" }</Link<Route>>
                    { " | " }
                    <Link<Route> to={Route::Products}>{ "Products" }</Link<Route>>
                    { " | " }
                    <Link<Route> to={Route::About}>{ "About" }</Link<Route>>
                    { " | " }
                    <Link<Route> to={Route::Contact}>{ "Contact" }</Link<Route>>
                </nav>
                <div class="session">
                    if auth.state.is_authenticated {
                        <span class="username">{ auth.state.username().unwrap_or_default() }</span>
                        <button class="btn btn-secondary" onclick={on_logout}>{ "Log out" }</button>
                    } else {
                        <Link<Route> to={Route::Login}>{ "Log in" }</Link<Route>>
                    }
                </div>
            </div>
        </header>
    }
}
