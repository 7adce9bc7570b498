/// Response bodies of the prediction service.
///
/// Every envelope tolerates missing fields: the service answers errors with
/// a bare `{"error": "..."}` body that has no `success` key, so `success`
/// defaults to `false`.
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// POST /predict
// ---------------------------------------------------------------------------

/// Response body of `POST /predict`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<PredictionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Names of required features the service did not receive.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

/// A server-computed prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_score: f64,
    pub category: String,
    pub confidence: String,
    pub contributions: Contributions,
}

/// Percentage impact the service attributes to each input feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contributions {
    pub attendance: f64,
    pub tests: f64,
    pub assignment: f64,
    pub study_hours: f64,
}

// ---------------------------------------------------------------------------
// GET /statistics
// ---------------------------------------------------------------------------

/// Response body of `GET /statistics`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<StatisticsSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate figures over every prediction the service has made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    pub total: u64,
    pub average_score: f64,
    #[serde(default)]
    pub by_category: OrderedCounts,
}

// ---------------------------------------------------------------------------
// GET /predictions
// ---------------------------------------------------------------------------

/// Response body of `GET /predictions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub predictions: Vec<PredictionRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One stored prediction.
///
/// The service keeps these as CSV rows, so every column may be absent and
/// `student_id` may come back as a number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionRecord {
    pub timestamp: Option<String>,
    pub student_id: Option<serde_json::Value>,
    pub attendance: Option<f64>,
    pub test1: Option<f64>,
    pub test2: Option<f64>,
    pub assignment: Option<f64>,
    pub study_hours: Option<f64>,
    pub predicted_score: Option<f64>,
    pub category: Option<String>,
}

impl PredictionRecord {
    /// The student identifier as display text.
    pub fn student_label(&self) -> String {
        match &self.student_id {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Null) | None => "N/A".to_string(),
            Some(other) => other.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

/// Service description returned by `GET /`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceInfo {
    pub project: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub model: String,
    pub status: String,
    /// Route → description, in the order the service lists them.
    pub endpoints: OrderedMap<String>,
}

// ---------------------------------------------------------------------------
// Ordered maps
// ---------------------------------------------------------------------------

/// A JSON object kept as an ordered list of entries.
///
/// Entry order is the order the keys appear in the response body.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(pub Vec<(String, V)>);

/// Category label → prediction count.
pub type OrderedCounts = OrderedMap<u64>;

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> OrderedMap<V> {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor<V>(std::marker::PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor(std::marker::PhantomData))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_success_deserializes() {
        let json = r#"{
            "success": true,
            "prediction": {
                "predicted_score": 82,
                "category": "Good",
                "confidence": "Medium",
                "contributions": {"attendance": 21.25, "tests": 29.31, "assignment": 12.0, "study_hours": 15.62}
            },
            "input": {"student_id": "S-1"}
        }"#;
        let resp: PredictResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        let prediction = resp.prediction.unwrap();
        assert_eq!(prediction.predicted_score, 82.0);
        assert_eq!(prediction.category, "Good");
        assert_eq!(prediction.contributions.tests, 29.31);
    }

    #[test]
    fn bare_error_body_is_unsuccessful() {
        let resp: PredictResponse =
            serde_json::from_str(r#"{"error": "AI system not initialized"}"#).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("AI system not initialized"));
        assert!(resp.missing.is_empty());
    }

    #[test]
    fn missing_features_are_captured() {
        let json = r#"{"error": "Missing required features", "missing": ["Assignment", "Study Hours"]}"#;
        let resp: PredictResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.missing, vec!["Assignment", "Study Hours"]);
    }

    #[test]
    fn by_category_keeps_response_order() {
        let json = r#"{
            "success": true,
            "statistics": {"total": 9, "average_score": 70.1, "by_category": {"Poor": 4, "Excellent": 1, "Average": 4}}
        }"#;
        let resp: StatisticsResponse = serde_json::from_str(json).unwrap();
        let stats = resp.statistics.unwrap();
        let labels: Vec<&str> = stats.by_category.iter().map(|(k, _)| k).collect();
        assert_eq!(labels, vec!["Poor", "Excellent", "Average"]);
    }

    #[test]
    fn empty_statistics_deserialize() {
        let json = r#"{"success": true, "statistics": {"total": 0, "by_category": {}, "average_score": 0}}"#;
        let resp: StatisticsResponse = serde_json::from_str(json).unwrap();
        let stats = resp.statistics.unwrap();
        assert_eq!(stats.total, 0);
        assert!(stats.by_category.is_empty());
    }

    #[test]
    fn ordered_map_serializes_as_object_in_order() {
        let counts: OrderedCounts = [("Good", 3u64), ("Average", 2)].into_iter().collect();
        assert_eq!(
            serde_json::to_string(&counts).unwrap(),
            r#"{"Good":3,"Average":2}"#
        );
    }

    #[test]
    fn prediction_record_tolerates_numeric_ids_and_gaps() {
        let json = r#"{"success": true, "count": 2, "predictions": [
            {"timestamp": "2024-03-01T10:00:00", "student_id": 1042, "predicted_score": 72, "category": "Average"},
            {"student_id": "S-9", "attendance": 91.0}
        ]}"#;
        let resp: PredictionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.count, 2);
        assert_eq!(resp.predictions[0].student_label(), "1042");
        assert_eq!(resp.predictions[1].student_label(), "S-9");
        assert!(resp.predictions[1].category.is_none());
        assert_eq!(PredictionRecord::default().student_label(), "N/A");
    }

    #[test]
    fn service_info_keeps_endpoint_order() {
        let json = r#"{
            "project": "Student Performance AI/ML System",
            "type": "Artificial Intelligence & Machine Learning",
            "model": "Logistic Regression",
            "status": "operational",
            "endpoints": {"POST /predict": "Make AI prediction", "GET /predictions": "Get all predictions", "GET /statistics": "Get statistics"}
        }"#;
        let info: ServiceInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.model, "Logistic Regression");
        assert_eq!(info.endpoints.0[1].0, "GET /predictions");
    }
}
