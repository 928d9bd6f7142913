use shared::api::RegisterRequest;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::error_message::ErrorMessage;
use crate::context::auth::use_auth;
use crate::router::{follow, Route};

#[function_component(Register)]
pub fn register() -> Html {
    let auth = use_auth();
    let navigator = use_navigator();

    let username = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);

    let bind = |field: &UseStateHandle<String>| {
        let field = field.clone();
        Callback::from(move |e: InputEvent| {
            field.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_submit = {
        let controller = auth.services.auth.clone();
        let username = username.clone();
        let email = email.clone();
        let password = password.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let details = RegisterRequest {
                username: username.trim().to_string(),
                email: email.trim().to_string(),
                password: (*password).clone(),
            };
            let controller = controller.clone();
            let navigator = navigator.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let (Some(redirect), Some(navigator)) =
                    (controller.register(details).await, navigator)
                {
                    follow(&navigator, redirect);
                }
            });
        })
    };

    let clear_error = {
        let controller = auth.services.auth.clone();
        Callback::from(move |_| controller.clear_error())
    };

    let loading = auth.state.loading;

    html! {
        <div class="container auth-page">
            <h2>{ "Create an account" }</h2>
            <ErrorMessage message={auth.state.error.clone()} on_dismiss={clear_error} />
            <form class="auth-form" onsubmit={on_submit}>
                <label for="username">{ "Username" }</label>
                <input id="username" type="text" value={(*username).clone()}
                    oninput={bind(&username)} disabled={loading} />
                <label for="email">{ "Email" }</label>
                <input id="email" type="email" value={(*email).clone()}
                    oninput={bind(&email)} disabled={loading} />
                <label for="password">{ "Password" }</label>
                <input id="password" type="password" autocomplete="new-password"
                    value={(*password).clone()} oninput={bind(&password)} disabled={loading} />
                <button type="submit" class="btn btn-primary" disabled={loading}>
                    { if loading { "Registering..." } else { "Register" } }
                </button>
            </form>
            <p>
                { "Already registered? " }
                <Link<Route> to={Route::Login}>{ "Log in" }</Link<Route>>
            </p>
        </div>
    }
}
