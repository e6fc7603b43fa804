//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod billing;
pub mod resilience;
pub mod voice;

pub use billing::*;
pub use resilience::{
    ResilientClient, RetryPolicy, TransportError, UpstreamOutcome, UpstreamResponse,
};
pub use voice::*;
