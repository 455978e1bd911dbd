//! HTTP handlers for the site routes.

pub mod api;
pub mod site;
