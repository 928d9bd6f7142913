use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorMessageProps {
    pub message: Option<String>,
    #[prop_or_default]
    pub on_dismiss: Option<Callback<()>>,
}

/// Error banner; renders nothing when there is no message.
#[function_component(ErrorMessage)]
pub fn error_message(props: &ErrorMessageProps) -> Html {
    let Some(message) = props.message.as_ref().filter(|m| !m.is_empty()) else {
        return html! {};
    };

    html! {
        <div class="error" role="alert">
            <span>{ message.clone() }</span>
            if let Some(on_dismiss) = props.on_dismiss.clone() {
                <button class="btn-dismiss" onclick={move |_| on_dismiss.emit(())}>{ "×" }</button>
            }
        </div>
    }
}
