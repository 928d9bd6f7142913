use shared::api::{validation_message, CreateInquiryRequest, InquiryResponse};
use shared::models::Product;
use validator::Validate;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::error_message::ErrorMessage;
use crate::components::loading_spinner::LoadingSpinner;
use crate::context::auth::use_auth;
use crate::router::Route;

#[derive(Properties, PartialEq)]
pub struct ProductInquiryProps {
    pub product_id: i64,
}

#[function_component(ProductInquiry)]
pub fn product_inquiry(props: &ProductInquiryProps) -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let product_id = props.product_id;

    let product = use_state(|| None::<Product>);
    let previous = use_state(Vec::<InquiryResponse>::new);
    let subject = use_state(String::new);
    let message = use_state(String::new);
    let submitting = use_state(|| false);
    let error = use_state(|| None::<String>);

    {
        let api = auth.services.api.clone();
        let product = product.clone();
        let previous = previous.clone();
        let error = error.clone();
        use_effect_with(product_id, move |&product_id| {
            wasm_bindgen_futures::spawn_local(async move {
                match api.fetch_product(product_id).await {
                    Ok(found) => product.set(Some(found)),
                    Err(e) => {
                        tracing::error!(product_id, "Failed to fetch product: {}", e);
                        error.set(Some(e.user_message()));
                    }
                }

                // Best effort; the form works without the history.
                match api.fetch_my_inquiries().await {
                    Ok(list) => previous.set(
                        list.into_iter()
                            .filter(|inquiry| inquiry.product_id == product_id)
                            .collect(),
                    ),
                    Err(e) => tracing::warn!(product_id, "Could not load earlier inquiries: {}", e),
                }
            });
            || ()
        });
    }

    let on_subject = {
        let subject = subject.clone();
        Callback::from(move |e: InputEvent| {
            subject.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_message = {
        let message = message.clone();
        Callback::from(move |e: InputEvent| {
            message.set(e.target_unchecked_into::<HtmlTextAreaElement>().value());
        })
    };

    let on_submit = {
        let api = auth.services.api.clone();
        let subject = subject.clone();
        let message = message.clone();
        let submitting = submitting.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }

            let request = CreateInquiryRequest {
                product_id,
                subject: subject.trim().to_string(),
                message: message.trim().to_string(),
            };
            if let Err(errors) = request.validate() {
                error.set(Some(validation_message(&errors)));
                return;
            }

            submitting.set(true);
            error.set(None);

            let api = api.clone();
            let navigator = navigator.clone();
            let submitting = submitting.clone();
            let error = error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api.submit_inquiry(&request).await {
                    Ok(inquiry) => {
                        tracing::info!(inquiry_id = inquiry.id, product_id, "Inquiry submitted");
                        gloo::dialogs::alert("Your inquiry has been sent to the supplier.");
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Products);
                        }
                    }
                    // A rejected token is reported, not acted on; the guard
                    // handles expiry on the next navigation.
                    Err(e) => {
                        if e.is_unauthorized() {
                            tracing::warn!(product_id, "Inquiry rejected: session not accepted");
                        } else {
                            tracing::error!(product_id, "Failed to submit inquiry: {}", e);
                        }
                        error.set(Some(e.user_message()));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let clear_error = {
        let error = error.clone();
        Callback::from(move |_| error.set(None))
    };

    html! {
        <div class="container">
            <h2>{ "Product Inquiry" }</h2>
            {
                match &*product {
                    Some(product) => html! {
                        <div class="inquiry-product">
                            <h3>{ &product.name }</h3>
                            <p class="supplier">{ product.supplier_label() }</p>
                        </div>
                    },
                    None if error.is_none() => html! { <LoadingSpinner /> },
                    None => html! {},
                }
            }
            <ErrorMessage message={(*error).clone()} on_dismiss={clear_error} />
            <form class="inquiry-form" onsubmit={on_submit}>
                <label for="subject">{ "Subject" }</label>
                <input
                    id="subject"
                    type="text"
                    value={(*subject).clone()}
                    oninput={on_subject}
                    disabled={*submitting}
                />
                <label for="message">{ "Message" }</label>
                <textarea
                    id="message"
                    rows="6"
                    value={(*message).clone()}
                    oninput={on_message}
                    disabled={*submitting}
                />
                <button type="submit" class="btn btn-primary" disabled={*submitting}>
                    { if *submitting { "Sending..." } else { "Send inquiry" } }
                </button>
            </form>
            if !previous.is_empty() {
                <section class="previous-inquiries">
                    <h3>{ "Your earlier inquiries" }</h3>
                    <ul>
                        { for previous.iter().map(|inquiry| html! {
                            <li key={inquiry.id}>
                                <strong>{ &inquiry.subject }</strong>
                                { format!(" ({})", inquiry.created_at.format("%Y-%m-%d")) }
                            </li>
                        }) }
                    </ul>
                </section>
            }
        </div>
    }
}
