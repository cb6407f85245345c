use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Normalized candidate data extracted from a resume.
///
/// Every field is total: `#[serde(default)]` fills strings with `""` and lists
/// with `[]` when the model omits them, so a partial completion still
/// deserializes to a complete record and no stage downstream sees an absent
/// field. Wire names are camelCase to match the extraction prompt schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeRecord {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub links: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    pub start: String,
    pub end: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub start: String,
    pub end: String,
}

/// A persisted resume. Immutable once written — there is no update path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub raw_text: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_yields_total_record() {
        let record: ResumeRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, ResumeRecord::default());
        assert_eq!(record.full_name, "");
        assert!(record.skills.is_empty());
        assert!(record.experience.is_empty());
        assert!(record.education.is_empty());
        assert!(record.links.is_empty());
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let json = r#"{"fullName": "Jane Doe", "email": "jane@example.com"}"#;
        let record: ResumeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.full_name, "Jane Doe");
        assert_eq!(record.email, "jane@example.com");

        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["fullName"], "Jane Doe");
        assert!(out.get("full_name").is_none());
    }

    #[test]
    fn test_partial_experience_entry_defaults_remaining_fields() {
        let json = r#"{
            "experience": [{"company": "Acme", "role": "Engineer"}]
        }"#;
        let record: ResumeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.experience.len(), 1);
        assert_eq!(record.experience[0].company, "Acme");
        assert_eq!(record.experience[0].start, "");
        assert_eq!(record.experience[0].description, "");
    }

    #[test]
    fn test_null_tolerance_is_not_required_for_missing_fields() {
        // Fields the model omits entirely default; a literal null is a schema
        // violation and falls back to the empty record at the parse boundary.
        let json = r#"{"fullName": null}"#;
        assert!(serde_json::from_str::<ResumeRecord>(json).is_err());
    }
}
