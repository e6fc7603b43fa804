//! audio_query 参数位置策略
//!
//! 上游不同版本对 `text` / `speaker` 的位置要求不同：
//! 有的读取查询字符串，有的读取 JSON 请求体。部署时按实际上游选择。

use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};

use crate::domain::synthesis::SpeakerId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamTransport {
    /// `POST /audio_query?text=...&speaker=...`
    #[serde(alias = "query_string")]
    Query,
    /// `POST /audio_query` + `{"text": ..., "speaker": ...}`
    #[default]
    #[serde(alias = "body")]
    Json,
}

#[derive(Debug, Serialize)]
struct AudioQueryBody<'a> {
    text: &'a str,
    speaker: u32,
}

impl ParamTransport {
    /// 把 audio_query 参数写入请求
    pub fn apply(self, builder: RequestBuilder, text: &str, speaker: SpeakerId) -> RequestBuilder {
        match self {
            ParamTransport::Query => builder
                .query(&[("text", text)])
                .query(&[("speaker", speaker.value())]),
            ParamTransport::Json => builder.json(&AudioQueryBody {
                text,
                speaker: speaker.value(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamTransport::Query => "query",
            ParamTransport::Json => "json",
        }
    }
}

impl std::fmt::Display for ParamTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(transport: ParamTransport) -> reqwest::Request {
        let builder = reqwest::Client::new().post("http://upstream.test/audio_query");
        transport
            .apply(builder, "こんにちは", SpeakerId::new(3))
            .build()
            .unwrap()
    }

    #[test]
    fn test_query_transport_encodes_url() {
        let request = build(ParamTransport::Query);
        let pairs: Vec<(String, String)> = request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("text".to_string(), "こんにちは".to_string()),
                ("speaker".to_string(), "3".to_string()),
            ]
        );
        assert!(request.body().is_none());
    }

    #[test]
    fn test_json_transport_encodes_body() {
        let request = build(ParamTransport::Json);
        assert!(request.url().query().is_none());
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(value, serde_json::json!({"text": "こんにちは", "speaker": 3}));
    }

    #[test]
    fn test_default_is_json_body() {
        assert_eq!(ParamTransport::default(), ParamTransport::Json);
    }

    #[test]
    fn test_deserialize_aliases() {
        let parse = |s: &str| serde_json::from_str::<ParamTransport>(s).unwrap();
        assert_eq!(parse(r#""query""#), ParamTransport::Query);
        assert_eq!(parse(r#""query_string""#), ParamTransport::Query);
        assert_eq!(parse(r#""json""#), ParamTransport::Json);
        assert_eq!(parse(r#""body""#), ParamTransport::Json);
    }
}
