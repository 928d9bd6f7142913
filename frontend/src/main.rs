mod components;
mod context;
mod pages;
mod router;
mod services;

use yew::prelude::*;
use yew_router::BrowserRouter;

use crate::components::{footer::Footer, header::Header};
use crate::context::auth::AuthProvider;
use crate::router::{switch, Route};

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <AuthProvider>
                <div id="app">
                    <Header />
                    <main>
                        <yew_router::Switch<Route> render={switch} />
                    </main>
                    <Footer />
                </div>
            </AuthProvider>
        </BrowserRouter>
    }
}

fn main() {
    // Initialize tracing
    tracing_wasm::set_as_global_default();

    yew::Renderer::<App>::new().render();
}
