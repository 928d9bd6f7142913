use shared::api::{validation_message, ContactRequest};
use validator::Validate;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::error_message::ErrorMessage;
use crate::context::auth::use_auth;

#[function_component(Contact)]
pub fn contact() -> Html {
    let auth = use_auth();
    let form = use_state(ContactRequest::default);
    let sending = use_state(|| false);
    let sent = use_state(|| false);
    let error = use_state(|| None::<String>);

    let update = |apply: fn(&mut ContactRequest, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };
    let from_input = |field: Callback<String>| {
        field.reform(|e: InputEvent| e.target_unchecked_into::<HtmlInputElement>().value())
    };
    let from_textarea = |field: Callback<String>| {
        field.reform(|e: InputEvent| e.target_unchecked_into::<HtmlTextAreaElement>().value())
    };

    let on_submit = {
        let api = auth.services.api.clone();
        let form = form.clone();
        let sending = sending.clone();
        let sent = sent.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = ContactRequest {
                name: form.name.trim().to_string(),
                email: form.email.trim().to_string(),
                subject: form.subject.trim().to_string(),
                message: form.message.trim().to_string(),
            };
            if let Err(errors) = request.validate() {
                error.set(Some(validation_message(&errors)));
                return;
            }

            sending.set(true);
            error.set(None);

            let api = api.clone();
            let form = form.clone();
            let sending = sending.clone();
            let sent = sent.clone();
            let error = error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api.send_contact(&request).await {
                    Ok(()) => {
                        tracing::info!("Contact message sent");
                        form.set(ContactRequest::default());
                        sent.set(true);
                    }
                    Err(e) => {
                        tracing::error!("Failed to send contact message: {}", e);
                        error.set(Some(e.user_message()));
                    }
                }
                sending.set(false);
            });
        })
    };

    html! {
        <div class="container">
            <h2>{ "Contact us" }</h2>
            if *sent {
                <div class="notice">{ "Thanks! We'll get back to you soon." }</div>
            }
            <ErrorMessage message={(*error).clone()} />
            <form class="contact-form" onsubmit={on_submit}>
                <label for="name">{ "Name" }</label>
                <input id="name" type="text" value={form.name.clone()}
                    oninput={from_input(update(|f, v| f.name = v))} disabled={*sending} />
                <label for="email">{ "Email" }</label>
                <input id="email" type="email" value={form.email.clone()}
                    oninput={from_input(update(|f, v| f.email = v))} disabled={*sending} />
                <label for="subject">{ "Subject" }</label>
                <input id="subject" type="text" value={form.subject.clone()}
                    oninput={from_input(update(|f, v| f.subject = v))} disabled={*sending} />
                <label for="message">{ "Message" }</label>
                <textarea id="message" rows="6" value={form.message.clone()}
                    oninput={from_textarea(update(|f, v| f.message = v))} disabled={*sending} />
                <button type="submit" class="btn btn-primary" disabled={*sending}>
                    { if *sending { "Sending..." } else { "Send" } }
                </button>
            </form>
        </div>
    }
}
