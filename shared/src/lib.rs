//! Wire types shared between the storefront client and the API gateway.

pub mod api;
pub mod models;
