//! 应用层 - 命令
//!
//! 每个入站请求对应一条命令，由对应的处理器完成编排

mod checkout_commands;
mod synthesize_commands;

pub mod handlers;

pub use checkout_commands::*;
pub use synthesize_commands::*;
