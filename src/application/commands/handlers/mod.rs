//! Command Handlers 实现

mod checkout_handler;
mod synthesize_handler;

pub use checkout_handler::*;
pub use synthesize_handler::*;
