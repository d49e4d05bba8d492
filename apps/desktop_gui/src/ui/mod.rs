//! UI layer for the desktop contact book: app shell, list, form, and theme.

pub mod app;
pub mod contact_form;
pub mod contact_list;
pub mod theme;

pub use app::ContactBookApp;
