use yew::prelude::*;

#[function_component(About)]
pub fn about() -> Html {
    html! {
        <div class="container">
            <h2>{ "About GoLocal" }</h2>
            <p>
                { "GoLocal is a marketplace for businesses sourcing organic goods from nearby \
                   farms and producers. Suppliers list what they grow; buyers send inquiries \
                   for pricing and volume." }
            </p>
        </div>
    }
}
