use yew::prelude::*;

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer class="footer">
            <div class="container">
                <p>{ "GoLocal connects organic producers with local businesses." }</p>
            </div>
        </footer>
    }
}
