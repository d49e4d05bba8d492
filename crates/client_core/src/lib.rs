//! Contact book client core: the remote store client plus the form and list
//! view-models shared by the desktop and command-line front ends.

pub mod config;
pub mod form;
pub mod sections;
pub mod store;

pub use config::{ConfigError, StoreSettings};
pub use form::{ContactForm, FieldEntry, FieldId};
pub use sections::{build_sections, ContactSection};
pub use store::{ContactStore, HttpContactStore, StoreError};
