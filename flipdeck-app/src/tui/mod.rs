pub mod app;
pub mod form;
pub mod inputs;
pub mod theme;
pub mod views;
