use crate::faculty::FacultyRecord;

/// Headline numbers for the dashboard.
///
/// `faculty_count` covers competitors only; the aggregate totals include the
/// target row since it appears in the display tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub faculty_count: usize,
    pub total_publications: u64,
    pub total_patents: u64,
    pub total_student_projects: u64,
}

/// Search/department filter applied to the competing set before ranking.
#[derive(Debug, Clone, Default)]
pub struct FacultyFilter {
    /// Case-insensitive substring match against name or id
    pub search: Option<String>,
    /// Exact department match
    pub department: Option<String>,
}

impl FacultyFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.department.is_none()
    }

    pub fn matches(&self, record: &FacultyRecord) -> bool {
        let matches_search = match &self.search {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                record.name.to_lowercase().contains(&term)
                    || record.id.to_lowercase().contains(&term)
            }
        };
        let matches_department = match &self.department {
            None => true,
            Some(dept) => record.department == *dept,
        };
        matches_search && matches_department
    }
}

/// Drop records the filter rejects, keeping input order.
pub fn filter_faculty(records: Vec<FacultyRecord>, filter: &FacultyFilter) -> Vec<FacultyRecord> {
    records
        .into_iter()
        .filter(|record| filter.matches(record))
        .collect()
}

/// Summary statistics over the full collection (target row included in the
/// totals, excluded from the competitor count).
pub fn summarize(records: &[FacultyRecord]) -> DashboardStats {
    let faculty_count = records.iter().filter(|r| !r.is_target()).count();
    let total_publications = records
        .iter()
        .map(|r| r.journalpublications.unwrap_or(0) + r.bookpublications.unwrap_or(0))
        .sum();
    let total_patents = records.iter().map(|r| r.patents.unwrap_or(0)).sum();
    let total_student_projects = records.iter().map(|r| r.studentprojects.unwrap_or(0)).sum();

    DashboardStats {
        faculty_count,
        total_publications,
        total_patents,
        total_student_projects,
    }
}

/// Unique departments of the competing set, in first-seen order.
pub fn departments(records: &[FacultyRecord]) -> Vec<String> {
    let mut seen = Vec::new();
    for record in records.iter().filter(|r| !r.is_target()) {
        if !record.department.is_empty() && !seen.contains(&record.department) {
            seen.push(record.department.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faculty::TARGET_ID;

    fn create_test_record(id: &str, name: &str, department: &str) -> FacultyRecord {
        FacultyRecord::new(id, name, "Professor", department)
    }

    #[test]
    fn test_filter_by_search_matches_name_and_id() {
        let records = vec![
            create_test_record("F001", "Dr. Meena Iyer", "CSE"),
            create_test_record("F002", "Dr. Arjun Rao", "ECE"),
        ];

        let by_name = filter_faculty(
            records.clone(),
            &FacultyFilter {
                search: Some("meena".to_string()),
                department: None,
            },
        );
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "F001");

        let by_id = filter_faculty(
            records,
            &FacultyFilter {
                search: Some("f002".to_string()),
                department: None,
            },
        );
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].id, "F002");
    }

    #[test]
    fn test_filter_by_department_is_exact() {
        let records = vec![
            create_test_record("F001", "Dr. Meena Iyer", "CSE"),
            create_test_record("F002", "Dr. Arjun Rao", "ECE"),
        ];

        let filtered = filter_faculty(
            records,
            &FacultyFilter {
                search: None,
                department: Some("ECE".to_string()),
            },
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "F002");
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let records = vec![
            create_test_record("F001", "Dr. Meena Iyer", "CSE"),
            create_test_record("F002", "Dr. Arjun Rao", "ECE"),
        ];
        let filter = FacultyFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter_faculty(records, &filter).len(), 2);
    }

    #[test]
    fn test_summarize_counts_and_totals() {
        let mut a = create_test_record("F001", "Dr. Meena Iyer", "CSE");
        a.journalpublications = Some(4);
        a.bookpublications = Some(1);
        a.patents = Some(2);
        let mut b = create_test_record("F002", "Dr. Arjun Rao", "ECE");
        b.studentprojects = Some(3);
        let mut target = create_test_record(TARGET_ID, "Target", "");
        target.journalpublications = Some(10);

        let stats = summarize(&[a, b, target]);
        // Target is not a competitor but its numbers show in the totals
        assert_eq!(stats.faculty_count, 2);
        assert_eq!(stats.total_publications, 15);
        assert_eq!(stats.total_patents, 2);
        assert_eq!(stats.total_student_projects, 3);
    }

    #[test]
    fn test_summarize_empty() {
        let stats = summarize(&[]);
        assert_eq!(stats.faculty_count, 0);
        assert_eq!(stats.total_publications, 0);
    }

    #[test]
    fn test_departments_unique_in_first_seen_order() {
        let records = vec![
            create_test_record("F001", "A", "CSE"),
            create_test_record("F002", "B", "ECE"),
            create_test_record("F003", "C", "CSE"),
            create_test_record(TARGET_ID, "Target", "ADMIN"),
            create_test_record("F004", "D", ""),
        ];
        assert_eq!(departments(&records), vec!["CSE", "ECE"]);
    }
}
