//! Score and integration snapshot documents

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// SEO score breakdown shown on the dashboard. Each score is a number in 0..=100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoScore {
    pub overall: f64,
    pub content: f64,
    pub links: f64,
    pub performance: f64,
    pub mobile: f64,
    pub last_updated: DateTime<Utc>,
}

impl SeoScore {
    /// The seeded score, stamped with the current time
    pub fn seed() -> Self {
        Self::seed_at(Utc::now())
    }

    pub fn seed_at(last_updated: DateTime<Utc>) -> Self {
        Self {
            overall: 72.0,
            content: 68.0,
            links: 54.0,
            performance: 81.0,
            mobile: 88.0,
            last_updated,
        }
    }
}

/// Connection flag per third-party integration, keyed by integration name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntegrationStatus(IndexMap<String, bool>);

impl IntegrationStatus {
    /// Default connection state
    pub fn seed() -> Self {
        [
            ("googleSearchConsole", true),
            ("googleAnalytics", true),
            ("semrush", false),
            ("ahrefs", false),
            ("pageSpeedInsights", true),
        ]
        .into_iter()
        .collect()
    }

    /// Unknown integrations are reported as disconnected
    pub fn is_connected(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    /// Names of connected integrations
    pub fn connected(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, connected)| **connected)
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for IntegrationStatus {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(name, c)| (name.into(), c)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_score_wire_format() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let json = serde_json::to_value(SeoScore::seed_at(at)).unwrap();
        assert_eq!(
            json,
            json!({
                "overall": 72.0,
                "content": 68.0,
                "links": 54.0,
                "performance": 81.0,
                "mobile": 88.0,
                "lastUpdated": "2024-05-01T12:00:00Z",
            })
        );
    }

    #[test]
    fn test_score_accepts_offset_timestamps() {
        let score: SeoScore = serde_json::from_value(json!({
            "overall": 1, "content": 2, "links": 3, "performance": 4, "mobile": 5,
            "lastUpdated": "2024-05-01T14:00:00.123+02:00",
        }))
        .unwrap();
        assert_eq!(score.last_updated.timestamp(), 1714564800);
    }

    #[test]
    fn test_score_accepts_fractional_and_integer_values() {
        let score: SeoScore = serde_json::from_value(json!({
            "overall": 72.5, "content": 68, "links": 0, "performance": 100, "mobile": 88.25,
            "lastUpdated": "2024-05-01T12:00:00Z",
        }))
        .unwrap();
        assert_eq!(score.overall, 72.5);
        assert_eq!(score.content, 68.0);
        assert_eq!(score.mobile, 88.25);
        assert_eq!(serde_json::to_value(&score).unwrap()["overall"], json!(72.5));
    }

    #[test]
    fn test_default_integrations() {
        let status = IntegrationStatus::seed();
        assert_eq!(status.len(), 5);
        assert!(status.is_connected("googleSearchConsole"));
        assert!(status.is_connected("pageSpeedInsights"));
        assert!(!status.is_connected("semrush"));
        assert!(!status.is_connected("ahrefs"));
        assert!(!status.is_connected("majestic"));

        let mut connected: Vec<_> = status.connected().collect();
        connected.sort();
        assert_eq!(
            connected,
            vec!["googleAnalytics", "googleSearchConsole", "pageSpeedInsights"]
        );
    }

    #[test]
    fn test_integrations_are_a_plain_object() {
        let json = serde_json::to_value(IntegrationStatus::seed()).unwrap();
        assert_eq!(json["semrush"], false);
        assert_eq!(json["googleAnalytics"], true);

        let names: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            names,
            vec!["googleSearchConsole", "googleAnalytics", "semrush", "ahrefs", "pageSpeedInsights"]
        );
    }
}
