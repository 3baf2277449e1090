mod api;
pub mod support;
