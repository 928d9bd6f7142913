use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoadingSpinnerProps {
    #[prop_or_default]
    pub label: Option<AttrValue>,
}

#[function_component(LoadingSpinner)]
pub fn loading_spinner(props: &LoadingSpinnerProps) -> Html {
    html! {
        <div class="loading" role="status">
            <div class="spinner"></div>
            if let Some(label) = &props.label {
                <p>{ label.clone() }</p>
            }
        </div>
    }
}
