//! Application State
//!
//! 每个可执行文件各自持有一份状态，互不共享

use std::sync::Arc;

use crate::application::{
    CheckoutGatewayPort, CreateCheckoutSessionHandler, SynthesizeHandler, VoiceEnginePort,
};
use crate::domain::synthesis::RequestLimits;

/// TTS 代理状态
pub struct AppState {
    pub synthesize_handler: SynthesizeHandler,
}

impl AppState {
    pub fn new(voice_engine: Arc<dyn VoiceEnginePort>, limits: RequestLimits) -> Self {
        Self {
            synthesize_handler: SynthesizeHandler::new(voice_engine, limits),
        }
    }
}

/// 结账服务状态
pub struct CheckoutState {
    pub create_checkout_session_handler: CreateCheckoutSessionHandler,
}

impl CheckoutState {
    pub fn new(gateway: Arc<dyn CheckoutGatewayPort>) -> Self {
        Self {
            create_checkout_session_handler: CreateCheckoutSessionHandler::new(gateway),
        }
    }
}
