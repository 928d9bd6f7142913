//! Auth context: one controller per page load, its latest snapshot pushed
//! down the component tree.

use std::rc::Rc;

use client_core::AuthState;
use yew::prelude::*;

use crate::services::Services;

#[derive(Clone)]
pub struct AuthContext {
    pub services: Rc<Services>,
    pub state: AuthState,
}

impl PartialEq for AuthContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.services, &other.services) && self.state == other.state
    }
}

#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub children: Html,
}

#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let services = use_memo((), |_| Services::from_build_env());
    let state = use_state(AuthState::default);

    // Subscribe before initializing so the first snapshot is not missed.
    {
        let auth = services.auth.clone();
        let state = state.clone();
        use_effect_with((), move |_| {
            let subscription = auth.subscribe(move |snapshot| state.set(snapshot.clone()));
            auth.initialize();
            move || auth.unsubscribe(subscription)
        });
    }

    let context = AuthContext {
        services,
        state: (*state).clone(),
    };

    html! {
        <ContextProvider<AuthContext> {context}>
            { props.children.clone() }
        </ContextProvider<AuthContext>>
    }
}

/// Auth state and services for the current view.
#[hook]
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("use_auth must be used within an AuthProvider")
}
