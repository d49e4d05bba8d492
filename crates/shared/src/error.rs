use thiserror::Error;

/// Local, form-level failure. Blocks submission and never reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("first name is required")]
    NameRequired,
    #[error("phone number is required")]
    PhoneRequired,
}
