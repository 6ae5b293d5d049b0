use serde::{Deserialize, Deserializer, Serialize};

/// Reserved id for the benchmark/target row. It is not a real person: it
/// carries departmental target numbers for display comparison and never
/// competes in the ranking.
pub const TARGET_ID: &str = "TARGET";

/// One row of the remote `faculty` table.
///
/// Achievement counters are nullable in the store; `None` counts as 0
/// everywhere. Older revisions of the table used camelCase column names, so
/// each counter accepts its legacy alias on the way in and is always written
/// back under the canonical lowercase key.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FacultyRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub department: String,

    #[serde(
        default,
        alias = "rdProposalsSangsation",
        deserialize_with = "lenient_count"
    )]
    pub rdproposalssangsation: Option<u64>,
    #[serde(
        default,
        alias = "rdProposalsSubmition",
        deserialize_with = "lenient_count"
    )]
    pub rdproposalssubmition: Option<u64>,
    #[serde(default, alias = "rdProposals", deserialize_with = "lenient_count")]
    pub rdproposals: Option<u64>,
    #[serde(default, alias = "rdFunding", deserialize_with = "lenient_count")]
    pub rdfunding: Option<u64>,
    #[serde(
        default,
        alias = "journalPublications",
        deserialize_with = "lenient_count"
    )]
    pub journalpublications: Option<u64>,
    #[serde(default, alias = "journalsCoAuthor", deserialize_with = "lenient_count")]
    pub journalscoauthor: Option<u64>,
    #[serde(
        default,
        alias = "studentPublications",
        deserialize_with = "lenient_count"
    )]
    pub studentpublications: Option<u64>,
    #[serde(default, alias = "bookPublications", deserialize_with = "lenient_count")]
    pub bookpublications: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub patents: Option<u64>,
    #[serde(
        default,
        alias = "onlineCertifications",
        deserialize_with = "lenient_count"
    )]
    pub onlinecertifications: Option<u64>,
    #[serde(default, alias = "studentProjects", deserialize_with = "lenient_count")]
    pub studentprojects: Option<u64>,
    #[serde(default, alias = "fdpWorks", deserialize_with = "lenient_count")]
    pub fdpworks: Option<u64>,
    #[serde(default, alias = "fdpWorps", deserialize_with = "lenient_count")]
    pub fdpworps: Option<u64>,
    #[serde(default, alias = "industryCollabs", deserialize_with = "lenient_count")]
    pub industrycollabs: Option<u64>,
    #[serde(default, alias = "otherActivities", deserialize_with = "lenient_count")]
    pub otheractivities: Option<u64>,

    // Display-only free text, never part of the total
    #[serde(default, alias = "academicPassPercentage")]
    pub academicpasspercentage: Option<String>,
    #[serde(default, alias = "effectiveMentoring")]
    pub effectivementoring: Option<String>,
}

impl FacultyRecord {
    /// Create a bare record with no achievements recorded yet.
    pub fn new(id: &str, name: &str, designation: &str, department: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            designation: designation.to_string(),
            department: department.to_string(),
            rdproposalssangsation: None,
            rdproposalssubmition: None,
            rdproposals: None,
            rdfunding: None,
            journalpublications: None,
            journalscoauthor: None,
            studentpublications: None,
            bookpublications: None,
            patents: None,
            onlinecertifications: None,
            studentprojects: None,
            fdpworks: None,
            fdpworps: None,
            industrycollabs: None,
            otheractivities: None,
            academicpasspercentage: None,
            effectivementoring: None,
        }
    }

    /// Whether this is the non-competing benchmark row.
    pub fn is_target(&self) -> bool {
        self.id == TARGET_ID
    }

    /// Look up an achievement counter by its canonical key.
    /// Unknown keys yield `None`, which scores as 0.
    pub fn achievement(&self, key: &str) -> Option<u64> {
        match key {
            "rdproposalssangsation" => self.rdproposalssangsation,
            "rdproposalssubmition" => self.rdproposalssubmition,
            "rdproposals" => self.rdproposals,
            "rdfunding" => self.rdfunding,
            "journalpublications" => self.journalpublications,
            "journalscoauthor" => self.journalscoauthor,
            "studentpublications" => self.studentpublications,
            "bookpublications" => self.bookpublications,
            "patents" => self.patents,
            "onlinecertifications" => self.onlinecertifications,
            "studentprojects" => self.studentprojects,
            "fdpworks" => self.fdpworks,
            "fdpworps" => self.fdpworps,
            "industrycollabs" => self.industrycollabs,
            "otheractivities" => self.otheractivities,
            _ => None,
        }
    }

    /// Set an achievement counter by its canonical key.
    /// Returns false (and changes nothing) for an unknown key.
    pub fn set_achievement(&mut self, key: &str, value: u64) -> bool {
        let slot = match key {
            "rdproposalssangsation" => &mut self.rdproposalssangsation,
            "rdproposalssubmition" => &mut self.rdproposalssubmition,
            "rdproposals" => &mut self.rdproposals,
            "rdfunding" => &mut self.rdfunding,
            "journalpublications" => &mut self.journalpublications,
            "journalscoauthor" => &mut self.journalscoauthor,
            "studentpublications" => &mut self.studentpublications,
            "bookpublications" => &mut self.bookpublications,
            "patents" => &mut self.patents,
            "onlinecertifications" => &mut self.onlinecertifications,
            "studentprojects" => &mut self.studentprojects,
            "fdpworks" => &mut self.fdpworks,
            "fdpworps" => &mut self.fdpworps,
            "industrycollabs" => &mut self.industrycollabs,
            "otheractivities" => &mut self.otheractivities,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

/// Coerce whatever the store sends into a count.
///
/// The table has accumulated nulls, stringified numbers, and the odd float
/// over its life. Anything that is not a non-negative whole number is treated
/// as absent rather than failing the whole fetch.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64)),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_target() {
        let target = FacultyRecord::new(TARGET_ID, "Department Target", "", "");
        let person = FacultyRecord::new("F001", "Dr. Rao", "Professor", "CSE");
        assert!(target.is_target());
        assert!(!person.is_target());
    }

    #[test]
    fn test_achievement_accessor() {
        let mut record = FacultyRecord::new("F001", "Dr. Rao", "Professor", "CSE");
        record.patents = Some(3);
        assert_eq!(record.achievement("patents"), Some(3));
        assert_eq!(record.achievement("journalpublications"), None);
        assert_eq!(record.achievement("no-such-field"), None);
    }

    #[test]
    fn test_set_achievement() {
        let mut record = FacultyRecord::new("F001", "Dr. Rao", "Professor", "CSE");
        assert!(record.set_achievement("fdpworks", 2));
        assert_eq!(record.fdpworks, Some(2));
        assert!(!record.set_achievement("no-such-field", 2));
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let record: FacultyRecord =
            serde_json::from_str(r#"{"id": "F001", "name": "Dr. Rao"}"#).unwrap();
        assert_eq!(record.id, "F001");
        assert_eq!(record.department, "");
        assert_eq!(record.patents, None);
    }

    #[test]
    fn test_deserialize_null_count_as_absent() {
        let record: FacultyRecord = serde_json::from_str(
            r#"{"id": "F001", "name": "Dr. Rao", "patents": null, "fdpworks": 2}"#,
        )
        .unwrap();
        assert_eq!(record.patents, None);
        assert_eq!(record.fdpworks, Some(2));
    }

    #[test]
    fn test_deserialize_malformed_counts_as_absent() {
        let record: FacultyRecord = serde_json::from_str(
            r#"{
                "id": "F001",
                "name": "Dr. Rao",
                "patents": "not a number",
                "fdpworks": -4,
                "rdfunding": 2.5,
                "journalpublications": "7"
            }"#,
        )
        .unwrap();
        assert_eq!(record.patents, None);
        assert_eq!(record.fdpworks, None);
        assert_eq!(record.rdfunding, None);
        // Stringified whole numbers do parse
        assert_eq!(record.journalpublications, Some(7));
    }

    #[test]
    fn test_deserialize_legacy_camel_case_aliases() {
        let record: FacultyRecord = serde_json::from_str(
            r#"{
                "id": "F001",
                "name": "Dr. Rao",
                "journalPublications": 5,
                "fdpWorps": 1,
                "academicPassPercentage": "92%"
            }"#,
        )
        .unwrap();
        assert_eq!(record.journalpublications, Some(5));
        assert_eq!(record.fdpworps, Some(1));
        assert_eq!(record.academicpasspercentage.as_deref(), Some("92%"));
    }

    #[test]
    fn test_serialize_uses_canonical_keys() {
        let mut record = FacultyRecord::new("F001", "Dr. Rao", "Professor", "CSE");
        record.journalpublications = Some(5);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["journalpublications"], 5);
        assert!(json.get("journalPublications").is_none());
    }
}
