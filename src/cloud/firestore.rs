//! Firestore Settings Document
//!
//! Remote tier for the Time Fragments settings: one document per user at
//! `timeFragments/{uid}`, read with `GET` and written with a merge `PATCH`.

use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use two_tier_cache::{CacheResult, RemoteTier};

use super::{read_json, CloudError, CloudResult, FirebaseAuth};
use crate::models::Settings;

const FIRESTORE_BASE: &str = "https://firestore.googleapis.com/v1";
const COLLECTION: &str = "timeFragments";

/// Fields touched by a write; everything else in the document is kept
const MERGE_FIELDS: [&str; 4] = ["topic", "startDate", "targetDate", "updatedAt"];

/// Firestore typed value (only the variants this document uses)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldValue {
    string_value: Option<String>,
    timestamp_value: Option<String>,
}

impl FieldValue {
    fn text(&self) -> Option<&str> {
        self.string_value.as_deref()
    }

    /// Dates are stored as `YYYY-MM-DD` strings; timestamps are also
    /// accepted and truncated to their date
    fn date(&self) -> Option<NaiveDate> {
        let raw = self.string_value.as_deref().or(self.timestamp_value.as_deref())?;
        NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok()
    }
}

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    fields: HashMap<String, FieldValue>,
}

fn decode_settings(document: Document) -> CloudResult<Settings> {
    let field = |name: &str| {
        document
            .fields
            .get(name)
            .ok_or_else(|| CloudError::Document(format!("missing field {}", name)))
    };
    let date = |name: &str| {
        field(name)?
            .date()
            .ok_or_else(|| CloudError::Document(format!("field {} is not a date", name)))
    };

    Ok(Settings {
        topic: field("topic")?.text().unwrap_or_default().to_string(),
        start_date: date("startDate")?,
        target_date: date("targetDate")?,
    })
}

fn encode_settings(settings: &Settings, updated_at: &str) -> serde_json::Value {
    json!({
        "fields": {
            "topic": { "stringValue": settings.topic },
            "startDate": { "stringValue": settings.start_date.format("%Y-%m-%d").to_string() },
            "targetDate": { "stringValue": settings.target_date.format("%Y-%m-%d").to_string() },
            "updatedAt": { "timestampValue": updated_at },
        }
    })
}

/// Per-user settings document, authenticated through the shared auth handle
pub struct FirestoreRemote {
    http: reqwest::Client,
    project_id: String,
    auth: Rc<FirebaseAuth>,
}

impl FirestoreRemote {
    pub fn new(project_id: impl Into<String>, auth: Rc<FirebaseAuth>) -> Self {
        Self {
            http: reqwest::Client::new(),
            project_id: project_id.into(),
            auth,
        }
    }

    fn document_url(&self, uid: &str) -> String {
        document_url(&self.project_id, uid)
    }

    async fn get(&self) -> CloudResult<Option<Settings>> {
        let uid = self.auth.uid().ok_or(CloudError::NoSession)?;
        let token = self.auth.id_token().await?;

        let response = self
            .http
            .get(self.document_url(&uid))
            .bearer_auth(token)
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let document: Document = read_json(response).await?;
        decode_settings(document).map(Some)
    }

    async fn patch(&self, settings: &Settings) -> CloudResult<()> {
        let uid = self.auth.uid().ok_or(CloudError::NoSession)?;
        let token = self.auth.id_token().await?;
        let updated_at = String::from(js_sys::Date::new_0().to_iso_string());
        let mask: Vec<(&str, &str)> = MERGE_FIELDS
            .iter()
            .map(|field| ("updateMask.fieldPaths", *field))
            .collect();

        let response = self
            .http
            .patch(self.document_url(&uid))
            .query(&mask)
            .bearer_auth(token)
            .json(&encode_settings(settings, &updated_at))
            .send()
            .await?;
        let _: serde_json::Value = read_json(response).await?;
        Ok(())
    }
}

fn document_url(project_id: &str, uid: &str) -> String {
    format!(
        "{}/projects/{}/databases/(default)/documents/{}/{}",
        FIRESTORE_BASE, project_id, COLLECTION, uid
    )
}

#[async_trait(?Send)]
impl RemoteTier<Settings> for FirestoreRemote {
    async fn fetch(&self) -> CacheResult<Option<Settings>> {
        Ok(self.get().await?)
    }

    async fn write(&self, value: &Settings) -> CacheResult<()> {
        Ok(self.patch(value).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_decode_document_from_rest_response() {
        let raw = r#"{
            "name": "projects/wukong/databases/(default)/documents/timeFragments/u1",
            "fields": {
                "topic": {"stringValue": "考研"},
                "startDate": {"stringValue": "2026-03-01"},
                "targetDate": {"timestampValue": "2026-12-20T00:00:00Z"},
                "updatedAt": {"timestampValue": "2026-10-15T08:00:00.000Z"}
            },
            "createTime": "2026-03-01T00:00:00Z",
            "updateTime": "2026-10-15T08:00:00Z"
        }"#;
        let document: Document = serde_json::from_str(raw).unwrap();

        let settings = decode_settings(document).unwrap();

        assert_eq!(settings.topic, "考研");
        assert_eq!(settings.start_date, date(2026, 3, 1));
        assert_eq!(settings.target_date, date(2026, 12, 20));
    }

    #[test]
    fn test_decode_rejects_missing_dates() {
        let document: Document =
            serde_json::from_str(r#"{"fields": {"topic": {"stringValue": "x"}}}"#).unwrap();
        assert!(matches!(decode_settings(document), Err(CloudError::Document(_))));
    }

    #[test]
    fn test_encoded_fields_match_merge_mask() {
        let settings = Settings {
            topic: "今年".to_string(),
            start_date: date(2026, 1, 1),
            target_date: date(2027, 1, 1),
        };
        let body = encode_settings(&settings, "2026-10-15T00:00:00.000Z");

        let fields = body["fields"].as_object().unwrap();
        let mut names: Vec<&str> = fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        let mut mask = MERGE_FIELDS.to_vec();
        mask.sort_unstable();
        assert_eq!(names, mask);
        assert_eq!(body["fields"]["startDate"]["stringValue"], "2026-01-01");
    }

    #[test]
    fn test_document_url() {
        assert_eq!(
            document_url("wukong", "u1"),
            "https://firestore.googleapis.com/v1/projects/wukong/databases/(default)/documents/timeFragments/u1"
        );
    }
}
