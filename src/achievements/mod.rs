use serde::{Deserialize, Serialize};

/// One achievement counter that participates in the total score.
///
/// `key` must be a canonical faculty field key (see `CANONICAL_KEYS`);
/// `label` and `short_label` are display-only.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AchievementField {
    pub key: String,
    pub label: String,
    pub short_label: String,
}

impl AchievementField {
    fn new(key: &str, label: &str, short_label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            short_label: short_label.to_string(),
        }
    }
}

/// Every faculty field key that is allowed to appear in a schema.
///
/// `rdproposals` is deliberately absent: it exists on the record but is not
/// score-eligible, and a schema naming it would be rejected by validation.
pub const CANONICAL_KEYS: &[&str] = &[
    "rdproposalssangsation",
    "rdproposalssubmition",
    "rdfunding",
    "journalpublications",
    "journalscoauthor",
    "studentpublications",
    "bookpublications",
    "patents",
    "onlinecertifications",
    "studentprojects",
    "fdpworks",
    "fdpworps",
    "industrycollabs",
    "otheractivities",
];

/// Ordered, read-only list of the fields that make up the achievement total.
///
/// Built once at startup (default set, or an override from config) and shared
/// by every ranking call. Never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementSchema {
    fields: Vec<AchievementField>,
}

impl Default for AchievementSchema {
    fn default() -> Self {
        Self {
            fields: vec![
                AchievementField::new(
                    "rdproposalssangsation",
                    "R&D Proposals (Sanctioned)",
                    "R&D Sanc",
                ),
                AchievementField::new(
                    "rdproposalssubmition",
                    "R&D Proposals (Submitted)",
                    "R&D Subm",
                ),
                AchievementField::new("rdfunding", "R&D Funding", "R&D Fund"),
                AchievementField::new("journalpublications", "Journal Publications", "Journals"),
                AchievementField::new("journalscoauthor", "Co-Author Journals", "Co-Author"),
                AchievementField::new("studentpublications", "Student Publications", "Student Pub"),
                AchievementField::new("bookpublications", "Book Publications", "Books"),
                AchievementField::new("patents", "Patents", "Patents"),
                AchievementField::new("onlinecertifications", "Online Certifications", "Certs"),
                AchievementField::new("studentprojects", "Student Projects", "Projects"),
                AchievementField::new("fdpworks", "FDP Works", "FDP Works"),
                AchievementField::new("fdpworps", "FDP Workshops", "FDP Wkshp"),
                AchievementField::new("industrycollabs", "Industry Collaborations", "Industry"),
                AchievementField::new("otheractivities", "Other Activities", "Others"),
            ],
        }
    }
}

impl AchievementSchema {
    /// Build a schema from an explicit field list (config override).
    pub fn new(fields: Vec<AchievementField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[AchievementField] {
        &self.fields
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, key: &str) -> Option<&AchievementField> {
        self.fields.iter().find(|f| f.key == key)
    }
}

/// Validate a schema override at startup.
/// Returns all validation errors at once (not just the first).
///
/// A key outside `CANONICAL_KEYS` would silently contribute 0 to every total
/// forever, so it is rejected here instead of being coerced later.
pub fn validate_schema(schema: &AchievementSchema) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if schema.is_empty() {
        errors.push("achievements: schema must list at least one field".to_string());
    }

    let mut seen: Vec<&str> = Vec::new();
    for (i, field) in schema.fields().iter().enumerate() {
        if !CANONICAL_KEYS.contains(&field.key.as_str()) {
            errors.push(format!(
                "achievements[{}].key: unknown field '{}'",
                i, field.key
            ));
        }
        if seen.contains(&field.key.as_str()) {
            errors.push(format!(
                "achievements[{}].key: duplicate field '{}'",
                i, field.key
            ));
        }
        seen.push(field.key.as_str());
        if field.label.trim().is_empty() {
            errors.push(format!("achievements[{}].label: must not be empty", i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schema_covers_all_canonical_keys() {
        let schema = AchievementSchema::default();
        assert_eq!(schema.len(), CANONICAL_KEYS.len());
        for key in CANONICAL_KEYS {
            assert!(schema.field(key).is_some(), "missing key {}", key);
        }
    }

    #[test]
    fn test_default_schema_is_valid() {
        assert!(validate_schema(&AchievementSchema::default()).is_ok());
    }

    #[test]
    fn test_schema_preserves_field_order() {
        let schema = AchievementSchema::new(vec![
            AchievementField::new("patents", "Patents", "Patents"),
            AchievementField::new("journalpublications", "Journal Publications", "Journals"),
        ]);
        let keys: Vec<_> = schema.keys().collect();
        assert_eq!(keys, vec!["patents", "journalpublications"]);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let schema = AchievementSchema::new(vec![AchievementField::new(
            "hindex",
            "H-Index",
            "H-Index",
        )]);
        let errors = validate_schema(&schema).unwrap_err();
        assert!(errors[0].contains("unknown field 'hindex'"));
    }

    #[test]
    fn test_non_score_eligible_key_rejected() {
        // rdproposals exists on the record but is not score-eligible
        let schema = AchievementSchema::new(vec![AchievementField::new(
            "rdproposals",
            "R&D Proposals",
            "R&D",
        )]);
        assert!(validate_schema(&schema).is_err());
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let schema = AchievementSchema::new(vec![
            AchievementField::new("patents", "Patents", "Patents"),
            AchievementField::new("patents", "Patents again", "Patents"),
        ]);
        let errors = validate_schema(&schema).unwrap_err();
        assert!(errors[0].contains("duplicate field 'patents'"));
    }

    #[test]
    fn test_empty_schema_rejected() {
        let schema = AchievementSchema::new(vec![]);
        assert!(validate_schema(&schema).is_err());
    }

    #[test]
    fn test_collects_all_errors() {
        let schema = AchievementSchema::new(vec![
            AchievementField::new("bogus", "Bogus", "Bogus"),
            AchievementField::new("patents", "", "Patents"),
        ]);
        let errors = validate_schema(&schema).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
