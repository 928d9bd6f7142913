use client_core::{Redirect, RouteContext};
use shared::api::LoginRequest;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::error_message::ErrorMessage;
use crate::context::auth::use_auth;
use crate::router::{follow, Route};

#[function_component(Login)]
pub fn login() -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let context = use_location()
        .and_then(|location| location.state::<RouteContext>())
        .map(|context| (*context).clone());

    let username = use_state(String::new);
    let password = use_state(String::new);

    // An existing session, or one just created by the form, leaves the page.
    {
        let context = context.clone();
        use_effect_with(auth.state.is_authenticated, move |&authenticated| {
            if let (true, Some(navigator)) = (authenticated, navigator) {
                follow(&navigator, Redirect::after_login(context));
            }
            || ()
        });
    }

    let on_username = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            username.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            password.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_submit = {
        let controller = auth.services.auth.clone();
        let username = username.clone();
        let password = password.clone();
        let context = context.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let credentials = LoginRequest::new((*username).clone(), (*password).clone());
            let controller = controller.clone();
            let context = context.clone();
            // Navigation happens in the effect above once the session is published.
            wasm_bindgen_futures::spawn_local(async move {
                controller.login(credentials, context).await;
            });
        })
    };

    let clear_error = {
        let controller = auth.services.auth.clone();
        Callback::from(move |_| controller.clear_error())
    };

    let loading = auth.state.loading;
    let banner = context.as_ref().and_then(RouteContext::message);

    html! {
        <div class="container auth-page">
            <h2>{ "Log in" }</h2>
            if let Some(banner) = banner {
                <div class="notice">{ banner }</div>
            }
            <ErrorMessage message={auth.state.error.clone()} on_dismiss={clear_error} />
            <form class="auth-form" onsubmit={on_submit}>
                <label for="username">{ "Username" }</label>
                <input
                    id="username"
                    type="text"
                    autocomplete="username"
                    value={(*username).clone()}
                    oninput={on_username}
                    disabled={loading}
                />
                <label for="password">{ "Password" }</label>
                <input
                    id="password"
                    type="password"
                    autocomplete="current-password"
                    value={(*password).clone()}
                    oninput={on_password}
                    disabled={loading}
                />
                <button type="submit" class="btn btn-primary" disabled={loading}>
                    { if loading { "Logging in..." } else { "Log in" } }
                </button>
            </form>
            <p>
                { "No account yet? " }
                <Link<Route> to={Route::Register}>{ "Register" }</Link<Route>>
            </p>
        </div>
    }
}
