//! Synthesis Context - Query Document
//!
//! 上游 `audio_query` 返回的合成参数文档（音素 / mora 时长等）。
//! 除语速和音调两个字段外，内容对本服务不透明，原样回传给 `synthesis`。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 语速字段名
pub const SPEED_SCALE_FIELD: &str = "speedScale";

/// 音调字段名
pub const PITCH_SCALE_FIELD: &str = "pitchScale";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryDocument(Map<String, Value>);

impl QueryDocument {
    /// 从 JSON 值构造，只接受对象
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// 覆盖语速和音调，其余字段保持不变
    pub fn apply_overrides(&mut self, speed: f64, pitch: f64) {
        self.0.insert(SPEED_SCALE_FIELD.to_string(), number(speed));
        self.0.insert(PITCH_SCALE_FIELD.to_string(), number(pitch));
    }

    pub fn speed_scale(&self) -> Option<f64> {
        self.0.get(SPEED_SCALE_FIELD).and_then(Value::as_f64)
    }

    pub fn pitch_scale(&self) -> Option<f64> {
        self.0.get(PITCH_SCALE_FIELD).and_then(Value::as_f64)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

// speed/pitch 已在校验阶段保证为有限值
fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
