//! Billing Adapter - 第三方计费 API 客户端

mod stripe_checkout_client;

pub use stripe_checkout_client::*;
