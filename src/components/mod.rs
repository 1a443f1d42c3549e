pub mod app;
pub mod lamp;
pub mod quote_panel;
