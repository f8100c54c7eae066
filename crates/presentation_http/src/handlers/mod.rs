//! HTTP request handlers

pub mod autocomplete;
pub mod health;
pub mod route_search;
