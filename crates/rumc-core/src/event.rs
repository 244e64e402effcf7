//! Event-level pipeline: runs every classifier over one inbound RUM event.
//!
//! The [`Classifier`] holds the load-time configuration (signature table and
//! checkpoint vocabulary) and is shared by reference across requests. It
//! never rejects an event; callers decide based on `checkpoint_known`.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::checkpoint::CheckpointVocabulary;
use crate::client::{classify_client, BotSignatureTable, ClientClass, SignatureError};
use crate::config::RumConfig;
use crate::headers::{names, HeaderSource};
use crate::subsystem::subsystem;
use crate::time_mask::{mask_time, TimePadding};
use crate::url_model::{clean_optional, clean_url};

/// Inbound event payload. Unknown fields are ignored, and fields of the wrong
/// JSON type read as absent instead of failing the whole event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RumEvent {
    #[serde(default, deserialize_with = "string_or_absent")]
    pub checkpoint: Option<String>,
    /// Time padding, number or numeric string.
    #[serde(default)]
    pub t: Option<Value>,
    /// Passed through as sent.
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub weight: Option<Value>,
    #[serde(default, deserialize_with = "object_or_absent")]
    pub cwv: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "string_or_absent")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "string_or_absent")]
    pub referer: Option<String>,
    #[serde(default, deserialize_with = "string_or_absent")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "string_or_absent")]
    pub target: Option<String>,
}

fn string_or_absent<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            tracing::trace!(kind = json_kind(&other), "non-string payload field ignored");
            None
        }
        None => None,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn object_or_absent<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<Map<String, Value>>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Object(m)) => Some(m),
        _ => None,
    })
}

impl RumEvent {
    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data).context("malformed RUM event payload")
    }

    pub fn padding(&self) -> TimePadding {
        TimePadding::from_json(self.t.as_ref())
    }
}

/// Classified, privacy-scrubbed record handed to storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkpoint: Option<String>,
    pub checkpoint_known: bool,
    /// Masked time, ms since epoch.
    pub time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub user_agent: String,
    pub host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwv: Option<Map<String, Value>>,
}

/// Load-time configuration for classification.
#[derive(Debug, Clone)]
pub struct Classifier {
    table: BotSignatureTable,
    vocabulary: CheckpointVocabulary,
}

impl Classifier {
    pub fn new(table: BotSignatureTable, vocabulary: CheckpointVocabulary) -> Self {
        Self { table, vocabulary }
    }

    /// Built-in signature table and vocabulary.
    pub fn builtin() -> Result<Self, SignatureError> {
        Ok(Self::new(
            BotSignatureTable::builtin()?,
            CheckpointVocabulary::builtin(),
        ))
    }

    /// Build from configuration: an external signature table replaces the
    /// built-in one, extra checkpoints extend the vocabulary.
    pub fn from_config(cfg: &RumConfig) -> Result<Self> {
        let table = match &cfg.signatures_path {
            Some(path) => BotSignatureTable::from_path(path)
                .with_context(|| format!("load bot signatures from {}", path.display()))?,
            None => BotSignatureTable::builtin().context("compile built-in bot signatures")?,
        };
        let vocabulary = CheckpointVocabulary::with_extra(cfg.extra_checkpoints.iter().cloned());
        tracing::debug!(checkpoints = vocabulary.len(), "classifier ready");
        Ok(Self::new(table, vocabulary))
    }

    pub fn table(&self) -> &BotSignatureTable {
        &self.table
    }

    pub fn vocabulary(&self) -> &CheckpointVocabulary {
        &self.vocabulary
    }

    pub fn is_known_checkpoint(&self, name: &str) -> bool {
        self.vocabulary.contains(name)
    }

    pub fn client_class<H: HeaderSource>(&self, headers: Option<&H>) -> ClientClass {
        classify_client(headers, &self.table)
    }

    /// Classify one event received at `now_ms` with the given request headers.
    pub fn classify_event<H: HeaderSource>(
        &self,
        event: &RumEvent,
        headers: &H,
        now_ms: i64,
    ) -> ClassifiedEvent {
        let checkpoint_known = event
            .checkpoint
            .as_deref()
            .is_some_and(|c| self.is_known_checkpoint(c));
        if !checkpoint_known {
            tracing::debug!(checkpoint = ?event.checkpoint, "unknown checkpoint");
        }

        let referer = event
            .referer
            .as_deref()
            .or_else(|| headers.non_empty(names::REFERER))
            .map(clean_url);

        ClassifiedEvent {
            id: event.id.clone(),
            checkpoint: event.checkpoint.clone(),
            checkpoint_known,
            time: mask_time(now_ms, &event.padding()),
            weight: event.weight.clone(),
            url: clean_optional(event.url.as_deref()),
            referer,
            source: clean_optional(event.source.as_deref()),
            target: clean_optional(event.target.as_deref()),
            user_agent: self.client_class(Some(headers)).to_string(),
            host: subsystem(headers),
            cwv: event.cwv.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::HeaderMap;
    use crate::time_mask::base_hour;

    const NOW: i64 = 1_700_000_123_456;

    fn classifier() -> Classifier {
        Classifier::builtin().unwrap()
    }

    #[test]
    fn parses_payload_with_unknown_fields() {
        let ev = RumEvent::from_json(
            r#"{"checkpoint":"click","t":1234,"id":"abc","weight":100,"extra":{"x":1}}"#,
        )
        .unwrap();
        assert_eq!(ev.checkpoint.as_deref(), Some("click"));
        assert_eq!(ev.padding(), TimePadding::Numeric(1234.0));
        assert_eq!(ev.weight, Some(Value::from(100)));
    }

    #[test]
    fn numeric_id_is_kept_as_sent() {
        let ev = RumEvent::from_json(r#"{"checkpoint":"click","id":12345,"weight":1}"#).unwrap();
        assert_eq!(ev.id, Some(Value::from(12345)));
        let out = classifier().classify_event(&ev, &HeaderMap::new(), NOW);
        assert!(out.checkpoint_known);
        assert_eq!(out.id, Some(Value::from(12345)));
    }

    #[test]
    fn wrongly_typed_fields_read_as_absent() {
        let ev = RumEvent::from_json(
            r#"{"checkpoint":7,"url":{"href":"https://x.example/?q"},"referer":false,
                "source":["a"],"target":null,"cwv":"fast"}"#,
        )
        .unwrap();
        assert_eq!(ev.checkpoint, None);
        assert_eq!(ev.url, None);
        assert_eq!(ev.referer, None);
        assert_eq!(ev.source, None);
        assert_eq!(ev.target, None);
        assert_eq!(ev.cwv, None);

        let headers: HeaderMap = [("Referer", "https://b.example/p?x=1")].into_iter().collect();
        let out = classifier().classify_event(&ev, &headers, NOW);
        assert!(!out.checkpoint_known);
        assert_eq!(out.url, None);
        assert_eq!(out.referer.as_deref(), Some("https://b.example/p"));
    }

    #[test]
    fn out_of_range_padding_falls_back() {
        let ev = RumEvent::from_json(r#"{"checkpoint":"load","t":1e400}"#).unwrap();
        assert_eq!(ev.padding(), TimePadding::Absent);
        let out = classifier().classify_event(&ev, &HeaderMap::new(), NOW);
        assert_eq!(out.time, mask_time(NOW, &TimePadding::Absent));
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(RumEvent::from_json("{not json").is_err());
    }

    #[test]
    fn classifies_full_event() {
        let ev = RumEvent::from_json(
            r#"{
                "checkpoint": "click",
                "t": "1234",
                "id": "truncaty-me",
                "weight": 1,
                "cwv": {"CLS": 1.0, "LCP": 1.0},
                "url": "https://u:p@www.example.com/page?q=1#top",
                "target": "https://www.example.com/next?utm_source=x",
                "source": ".hero a"
            }"#,
        )
        .unwrap();
        let headers: HeaderMap = [
            ("User-Agent", "Mozilla/5.0 (Windows NT 10.0; Win64; x64)"),
            ("Host", "www.example.com"),
            ("Referer", "https://search.example/?q=secret"),
        ]
        .into_iter()
        .collect();

        let out = classifier().classify_event(&ev, &headers, NOW);
        assert!(out.checkpoint_known);
        assert_eq!(out.time, base_hour(NOW) + 1234);
        assert_eq!(out.url.as_deref(), Some("https://www.example.com/page"));
        assert_eq!(out.target.as_deref(), Some("https://www.example.com/next"));
        assert_eq!(out.source.as_deref(), Some(".hero a"));
        assert_eq!(out.referer.as_deref(), Some("https://search.example/"));
        assert_eq!(out.user_agent, "desktop:windows");
        assert_eq!(out.host, "www.example.com");
        assert!(out.cwv.is_some());
    }

    #[test]
    fn unknown_checkpoint_is_flagged_not_rejected() {
        let ev = RumEvent {
            checkpoint: Some("not-a-real-checkpoint".to_string()),
            ..Default::default()
        };
        let out = classifier().classify_event(&ev, &HeaderMap::new(), NOW);
        assert!(!out.checkpoint_known);
        assert_eq!(out.user_agent, "undefined");
        assert_eq!(out.host, "undefined");
    }

    #[test]
    fn missing_checkpoint_is_unknown() {
        let out = classifier().classify_event(&RumEvent::default(), &HeaderMap::new(), NOW);
        assert!(!out.checkpoint_known);
        assert_eq!(out.time, mask_time(NOW, &TimePadding::Absent));
    }

    #[test]
    fn payload_referer_beats_header() {
        let ev = RumEvent {
            referer: Some("https://a.example/x?y".to_string()),
            ..Default::default()
        };
        let headers: HeaderMap = [("referer", "https://b.example/")].into_iter().collect();
        let out = classifier().classify_event(&ev, &headers, NOW);
        assert_eq!(out.referer.as_deref(), Some("https://a.example/x"));
    }

    #[test]
    fn extra_checkpoints_from_config() {
        let cfg = RumConfig {
            extra_checkpoints: vec!["checkout".to_string()],
            ..Default::default()
        };
        let c = Classifier::from_config(&cfg).unwrap();
        assert!(c.is_known_checkpoint("checkout"));
        assert!(c.is_known_checkpoint("click"));
    }

    #[test]
    fn serialized_record_omits_absent_fields() {
        let out = classifier().classify_event(&RumEvent::default(), &HeaderMap::new(), NOW);
        let json = serde_json::to_value(&out).unwrap();
        assert!(json.get("url").is_none());
        assert_eq!(json["user_agent"], "undefined");
        assert_eq!(json["checkpoint_known"], false);
    }
}
