//! Synthesis Context - Value Objects

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// 默认说话人 ID
pub const DEFAULT_SPEAKER: u32 = 1_099_527_840;

/// 默认语速
pub const DEFAULT_SPEED: f64 = 1.0;

/// 默认音调偏移
pub const DEFAULT_PITCH: f64 = 0.0;

/// 默认最大文本长度（字符数）
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 300;

/// 说话人标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeakerId(u32);

impl SpeakerId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for SpeakerId {
    fn default() -> Self {
        Self(DEFAULT_SPEAKER)
    }
}

impl std::fmt::Display for SpeakerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 请求校验参数，来自进程级配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLimits {
    /// 文本最大长度（Unicode 字符数）
    pub max_text_length: usize,
    /// 未指定时使用的说话人
    pub default_speaker: SpeakerId,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            default_speaker: SpeakerId::default(),
        }
    }
}

/// 合成得到的音频（WAV 字节），直接回写给调用方，不落盘
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    data: Bytes,
}

impl AudioArtifact {
    pub const CONTENT_TYPE: &'static str = "audio/wav";

    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}
