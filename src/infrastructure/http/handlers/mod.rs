//! HTTP Handlers

mod checkout;
mod health;
mod tts;

pub use checkout::*;
pub use health::*;
pub use tts::*;
