//! Translation client module.
//!
//! Provides the translation-service seam, the HTTP implementation, and the
//! debounced front end that bounds call volume to one request per quiet
//! period.

mod debounce;
mod remote;
mod types;

pub use debounce::{DebouncedTranslator, DEFAULT_QUIET_PERIOD};
pub use remote::RemoteTranslateClient;
pub use types::{TranslateRequest, TranslateResponse, TranslationClient};
