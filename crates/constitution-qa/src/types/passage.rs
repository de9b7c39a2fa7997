//! Retrieved passages and decoding of raw vector-search responses
//!
//! The search service's response schema is not contractually fixed, so every
//! hit goes through [`RetrievedPassage::from_hit`]: the documented shape is
//! decoded through serde first, and anything that does not fit falls back to
//! key-based lookup on the raw JSON. Missing fields become `""` or `0.0`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names requested from the index for every hit
pub const PASSAGE_FIELDS: [&str; 4] = ["text", "article", "title", "keywords"];

/// A stored passage returned by similarity search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievedPassage {
    /// Record identifier in the index
    pub id: String,
    /// Similarity score (higher is more relevant)
    pub score: f64,
    /// Passage body
    pub text: String,
    /// Article number/label, empty when absent
    pub article: String,
    /// Article title, empty when absent
    pub title: String,
    /// Comma separated keywords, empty when absent
    pub keywords: String,
}

/// Documented hit shape: `{"_id", "_score", "fields": {...}}`
#[derive(Debug, Deserialize)]
struct TypedHit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_score")]
    score: f64,
    fields: TypedFields,
}

#[derive(Debug, Default, Deserialize)]
struct TypedFields {
    #[serde(default)]
    text: String,
    #[serde(default)]
    article: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    keywords: String,
}

impl From<TypedHit> for RetrievedPassage {
    fn from(hit: TypedHit) -> Self {
        Self {
            id: hit.id,
            score: hit.score,
            text: hit.fields.text,
            article: hit.fields.article,
            title: hit.fields.title,
            keywords: hit.fields.keywords,
        }
    }
}

impl RetrievedPassage {
    /// Decode one upstream hit, never failing
    pub fn from_hit(hit: &Value) -> Self {
        match TypedHit::deserialize(hit) {
            Ok(typed) => typed.into(),
            Err(_) => Self::from_loose_hit(hit),
        }
    }

    fn from_loose_hit(hit: &Value) -> Self {
        let Some(obj) = hit.as_object() else {
            return Self::default();
        };

        // Requested fields may sit under `fields`, under `metadata`, or inline.
        let fields = ["fields", "metadata"]
            .iter()
            .find_map(|key| obj.get(*key).and_then(Value::as_object))
            .unwrap_or(obj);

        Self {
            id: pick_string(obj, &["_id", "id"]),
            score: pick_f64(obj, &["_score", "score"]),
            text: pick_string(fields, &["text"]),
            article: pick_string(fields, &["article"]),
            title: pick_string(fields, &["title"]),
            keywords: pick_string(fields, &["keywords"]),
        }
    }
}

/// Decode a whole search response into passages, in rank order
///
/// Hits are looked up at `result.hits`, then `hits`, then `matches`
/// (top level or under `result`). An unrecognised body yields no passages.
pub fn passages_from_response(body: &Value) -> Vec<RetrievedPassage> {
    ["/result/hits", "/hits", "/matches", "/result/matches"]
        .iter()
        .find_map(|path| body.pointer(path).and_then(Value::as_array))
        .map(|hits| hits.iter().map(RetrievedPassage::from_hit).collect())
        .unwrap_or_default()
}

/// First present key rendered as text; numbers and keyword lists are stringified
fn pick_string(obj: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| obj.get(*key).and_then(value_to_text))
        .unwrap_or_default()
}

fn pick_f64(obj: &Map<String, Value>, keys: &[&str]) -> f64 {
    keys.iter()
        .find_map(|key| match obj.get(*key) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        })
        .filter(|v: &f64| v.is_finite())
        .unwrap_or(0.0)
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(value_to_text)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Null | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_documented_shape() {
        let body = json!({
            "result": {
                "hits": [
                    {
                        "_id": "art-25",
                        "_score": 0.8123456,
                        "fields": {
                            "text": "All citizens are equal before law.",
                            "article": "25",
                            "title": "Equality of citizens",
                            "keywords": "equality, law"
                        }
                    },
                    {
                        "_id": "art-27",
                        "_score": 0.71,
                        "fields": { "text": "Safeguard against discrimination.", "article": "27" }
                    }
                ]
            },
            "usage": { "read_units": 6 }
        });

        let passages = passages_from_response(&body);
        assert_eq!(passages.len(), 2);
        assert_eq!(passages[0].id, "art-25");
        assert_eq!(passages[0].article, "25");
        assert_eq!(passages[0].title, "Equality of citizens");
        assert!((passages[0].score - 0.8123456).abs() < 1e-12);
        assert_eq!(passages[1].article, "27");
        assert_eq!(passages[1].title, "");
        assert_eq!(passages[1].keywords, "");
    }

    #[test]
    fn test_loose_shapes_fall_back_to_key_lookup() {
        // numeric article, keyword list, `id`/`score` keys, metadata instead of fields
        let hit = json!({
            "id": "a-8",
            "score": "0.5",
            "metadata": { "text": "Laws inconsistent with rights are void.", "article": 8, "keywords": ["void", "rights"] }
        });
        let passage = RetrievedPassage::from_hit(&hit);
        assert_eq!(passage.id, "a-8");
        assert_eq!(passage.score, 0.5);
        assert_eq!(passage.article, "8");
        assert_eq!(passage.keywords, "void, rights");

        // fields inline on the hit
        let inline = json!({ "_id": "x", "_score": 0.2, "text": "inline body", "title": "T" });
        let passage = RetrievedPassage::from_hit(&inline);
        assert_eq!(passage.text, "inline body");
        assert_eq!(passage.title, "T");
        assert_eq!(passage.article, "");
    }

    #[test]
    fn test_missing_fields_degrade_to_defaults() {
        let passage = RetrievedPassage::from_hit(&json!({}));
        assert_eq!(passage, RetrievedPassage::default());

        let passage = RetrievedPassage::from_hit(&json!("not an object"));
        assert_eq!(passage, RetrievedPassage::default());

        let passage = RetrievedPassage::from_hit(&json!({ "_id": "only-id", "fields": null }));
        assert_eq!(passage.id, "only-id");
        assert_eq!(passage.score, 0.0);
        assert_eq!(passage.text, "");
    }

    #[test]
    fn test_non_finite_string_scores_become_zero() {
        for raw in ["NaN", "inf", "-infinity"] {
            let passage = RetrievedPassage::from_hit(&json!({ "id": "x", "score": raw, "text": "t" }));
            assert_eq!(passage.score, 0.0, "score {raw}");

            let rendered = serde_json::to_value(&passage).unwrap();
            assert_eq!(rendered["score"], 0.0);
        }
    }

    #[test]
    fn test_alternative_envelopes() {
        let flat = json!({ "hits": [{ "_id": "1", "_score": 0.9, "fields": {} }] });
        assert_eq!(passages_from_response(&flat).len(), 1);

        let matches = json!({ "matches": [{ "id": "1", "score": 0.9, "metadata": { "article": "1" } }] });
        assert_eq!(passages_from_response(&matches)[0].article, "1");

        assert!(passages_from_response(&json!({ "result": {} })).is_empty());
        assert!(passages_from_response(&json!(null)).is_empty());
    }

    #[test]
    fn test_rank_order_is_preserved() {
        // low score first on purpose: order comes from the service, not from scores
        let body = json!({ "result": { "hits": [
            { "_id": "b", "_score": 0.1, "fields": {} },
            { "_id": "a", "_score": 0.9, "fields": {} },
        ]}});
        let ids: Vec<_> = passages_from_response(&body).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["b", "a"]);
    }
}
