//! Synthesis Context - Request Normalizer
//!
//! 把入站请求体（空 / 文本 / 字节 / 已解析 JSON）统一解码，
//! 再校验、规整为 `SynthesisRequest`。纯函数，无副作用。

use bytes::Bytes;
use serde_json::{Map, Value};

use super::errors::RequestError;
use super::value_objects::{RequestLimits, SpeakerId, DEFAULT_PITCH, DEFAULT_SPEED};

/// 运行时交给我们的原始请求体
#[derive(Debug, Clone, PartialEq)]
pub enum RawBody {
    /// 没有请求体
    Empty,
    /// 文本形式的 JSON
    Text(String),
    /// 原始字节，按 UTF-8 解码后再解析
    Bytes(Bytes),
    /// 运行时已经解析好的结构
    Structured(Value),
}

impl RawBody {
    /// 解码为 JSON 值；空内容视为 `{}`
    pub fn decode(self) -> Result<Value, RequestError> {
        match self {
            RawBody::Empty => Ok(empty_object()),
            RawBody::Text(text) => parse_json_text(&text),
            RawBody::Bytes(bytes) => parse_json_text(&String::from_utf8_lossy(&bytes)),
            RawBody::Structured(value) => Ok(value),
        }
    }
}

impl From<Bytes> for RawBody {
    fn from(bytes: Bytes) -> Self {
        if bytes.is_empty() {
            RawBody::Empty
        } else {
            RawBody::Bytes(bytes)
        }
    }
}

impl From<String> for RawBody {
    fn from(text: String) -> Self {
        RawBody::Text(text)
    }
}

impl From<Value> for RawBody {
    fn from(value: Value) -> Self {
        RawBody::Structured(value)
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn parse_json_text(text: &str) -> Result<Value, RequestError> {
    if text.is_empty() {
        return Ok(empty_object());
    }
    serde_json::from_str(text).map_err(|e| RequestError::InvalidBody(e.to_string()))
}

/// 规整后的合成参数
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    text: String,
    speaker: SpeakerId,
    speed: f64,
    pitch: f64,
}

impl SynthesisRequest {
    /// 解码并校验请求体
    pub fn from_body(body: RawBody, limits: &RequestLimits) -> Result<Self, RequestError> {
        let value = body.decode()?;
        Self::from_value(&value, limits)
    }

    /// 校验已解码的 JSON
    ///
    /// - `text` 必须是非空字符串，且字符数不超过 `limits.max_text_length`
    /// - `speaker` / `speed` / `pitch` 接受数字或数字字符串，无法得到有限值时回落到默认值
    pub fn from_value(value: &Value, limits: &RequestLimits) -> Result<Self, RequestError> {
        let text = match value.get("text") {
            Some(Value::String(text)) if !text.is_empty() => text.clone(),
            _ => return Err(RequestError::MissingText),
        };

        let actual = text.chars().count();
        if actual > limits.max_text_length {
            return Err(RequestError::TextTooLong {
                max: limits.max_text_length,
                actual,
            });
        }

        let speaker = value
            .get("speaker")
            .and_then(coerce_number)
            .and_then(speaker_from_number)
            .unwrap_or(limits.default_speaker);

        // 语速必须为正
        let speed = value
            .get("speed")
            .and_then(coerce_number)
            .filter(|speed| *speed > 0.0)
            .unwrap_or(DEFAULT_SPEED);

        let pitch = value
            .get("pitch")
            .and_then(coerce_number)
            .unwrap_or(DEFAULT_PITCH);

        Ok(Self {
            text,
            speaker,
            speed,
            pitch,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn speaker(&self) -> SpeakerId {
        self.speaker
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn speaker_from_number(number: f64) -> Option<SpeakerId> {
    let id = number.trunc();
    (0.0..=u32::MAX as f64)
        .contains(&id)
        .then(|| SpeakerId::new(id as u32))
}
