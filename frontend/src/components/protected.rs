use client_core::{guard, requested_target, GuardDecision};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::loading_spinner::LoadingSpinner;
use crate::context::auth::use_auth;
use crate::router::follow;

#[derive(Properties, PartialEq)]
pub struct ProtectedProps {
    pub children: Html,
}

/// Renders its children only for an authenticated session.
///
/// While the stored session is still being checked a spinner is shown and
/// no redirect is made. Otherwise unauthenticated visitors are sent to the
/// login page with the requested path and query as the pending intent,
/// replacing the current history entry.
#[function_component(Protected)]
pub fn protected(props: &ProtectedProps) -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let requested = use_location()
        .map(|location| requested_target(location.path(), location.query_str()))
        .unwrap_or_default();

    // Fresh read so an expiry since the last publication is noticed here.
    let decision = guard(&auth.services.auth.state(), &requested);

    use_effect_with(decision.clone(), move |decision| {
        if let (GuardDecision::Redirect(redirect), Some(navigator)) = (decision, navigator) {
            follow(&navigator, redirect.clone());
        }
        || ()
    });

    match decision {
        GuardDecision::Pending => html! { <LoadingSpinner /> },
        GuardDecision::Redirect(_) => html! {},
        GuardDecision::Allow => props.children.clone(),
    }
}
