pub mod error_message;
pub mod footer;
pub mod header;
pub mod loading_spinner;
pub mod product_card;
pub mod protected;
