use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request body for `POST /generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub resume_text: String,
    pub job_desc: String,
    /// Forwarded to the cover letter. Placeholder echoes are filtered at render time.
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub city_state: Option<String>,
}

/// Response body for `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub resume_pdf: String,
    pub cover_pdf: String,
    pub text_resume: String,
    pub text_cover: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Canonical resume record
// ────────────────────────────────────────────────────────────────────────────

/// The canonical resume record handed to the renderer.
///
/// Every field is optional. Empty vectors and `None` render as omitted sections,
/// and are skipped when the record is serialized back to JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<ProjectEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub education: Vec<EducationEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certifications: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<String>,
}

impl ResumeRecord {
    /// Builds a record from arbitrary model JSON without ever failing.
    ///
    /// `serde` would reject the whole object on one mistyped field, so each field
    /// is read on its own: wrong JSON types count as absent, numbers and booleans
    /// are stringified, non-string list items are dropped.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        Self {
            summary: text_field(obj, "summary"),
            skills: string_list(obj, "skills"),
            experience: object_list(obj, "experience")
                .map(|e| ExperienceEntry {
                    title: text_field(e, "title"),
                    company: text_field(e, "company"),
                    location: text_field(e, "location"),
                    dates: text_field(e, "dates"),
                    bullets: string_list(e, "bullets"),
                })
                .collect(),
            projects: object_list(obj, "projects")
                .map(|p| ProjectEntry {
                    name: text_field(p, "name"),
                    description: text_field(p, "description"),
                })
                .collect(),
            education: object_list(obj, "education")
                .map(|e| EducationEntry {
                    degree: text_field(e, "degree"),
                    institution: text_field(e, "institution"),
                    dates: text_field(e, "dates"),
                })
                .collect(),
            certifications: string_list(obj, "certifications"),
            languages: string_list(obj, "languages"),
        }
    }

    /// True when no section would be rendered.
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.skills.is_empty()
            && self.experience.is_empty()
            && self.projects.is_empty()
            && self.education.is_empty()
            && self.certifications.is_empty()
            && self.languages.is_empty()
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(scalar_text)
}

fn string_list(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(scalar_text).collect())
        .unwrap_or_default()
}

fn object_list<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
) -> impl Iterator<Item = &'a Map<String, Value>> {
    obj.get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_reads_full_schema() {
        let value = json!({
            "summary": "Systems engineer.",
            "skills": ["Rust", "Go"],
            "experience": [{
                "title": "Engineer",
                "company": "Acme",
                "location": "Berlin, Germany",
                "dates": "2020 - 2024",
                "bullets": ["Cut p99 latency by 40%"]
            }],
            "projects": [{"name": "tracer", "description": "eBPF profiler"}],
            "education": [{"degree": "BSc CS", "institution": "TU", "dates": "2016 - 2020"}],
            "certifications": ["CKA"],
            "languages": ["English", "German"]
        });

        let record = ResumeRecord::from_value(&value);
        assert_eq!(record.summary.as_deref(), Some("Systems engineer."));
        assert_eq!(record.skills, vec!["Rust", "Go"]);
        assert_eq!(record.experience[0].company.as_deref(), Some("Acme"));
        assert_eq!(record.experience[0].bullets.len(), 1);
        assert_eq!(record.projects[0].name.as_deref(), Some("tracer"));
        assert_eq!(record.education[0].dates.as_deref(), Some("2016 - 2020"));
        assert_eq!(record.languages.len(), 2);
        assert!(!record.is_empty());
    }

    #[test]
    fn test_from_value_tolerates_wrong_types() {
        let value = json!({
            "summary": ["not", "a", "string"],
            "skills": "Rust, Go",
            "experience": [42, {"title": "Lead", "bullets": [1, null, "Shipped v2"]}],
            "certifications": [2023, "AWS SAA"]
        });

        let record = ResumeRecord::from_value(&value);
        assert!(record.summary.is_none());
        assert!(record.skills.is_empty());
        assert_eq!(record.experience.len(), 1);
        assert_eq!(record.experience[0].bullets, vec!["1", "Shipped v2"]);
        assert_eq!(record.certifications, vec!["2023", "AWS SAA"]);
    }

    #[test]
    fn test_from_value_non_object_is_empty() {
        assert!(ResumeRecord::from_value(&json!("text")).is_empty());
        assert!(ResumeRecord::from_value(&json!({})).is_empty());
    }

    #[test]
    fn test_blank_strings_count_as_absent() {
        let record = ResumeRecord::from_value(&json!({"summary": "   ", "skills": ["", "SQL"]}));
        assert!(record.summary.is_none());
        assert_eq!(record.skills, vec!["SQL"]);
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let record = ResumeRecord {
            skills: vec!["Rust".to_string()],
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"skills": ["Rust"]}));
    }

    #[test]
    fn test_generation_request_optional_fields_default() {
        let request: GenerationRequest = serde_json::from_value(json!({
            "full_name": "Ada Lovelace",
            "resume_text": "raw",
            "job_desc": "Analyst"
        }))
        .unwrap();
        assert!(request.email.is_none());
        assert!(request.company_name.is_none());
    }
}
