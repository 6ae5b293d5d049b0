use anyhow::Result;

use crate::faculty::FacultyRecord;
use crate::stats::{filter_faculty, summarize, DashboardStats, FacultyFilter};
use crate::store::FacultyStore;

/// Everything one dashboard render needs, fetched in a single pass.
///
/// This function is called from main.rs for every read command: list the
/// table, split out the target row, compute the headline stats over the full
/// collection, then apply the caller's filter to the competing set. Ranking
/// itself happens at the call site on the returned records.
pub struct DashboardData {
    pub target: Option<FacultyRecord>,
    pub faculty: Vec<FacultyRecord>,
    pub stats: DashboardStats,
}

pub async fn fetch_dashboard<S: FacultyStore>(
    store: &S,
    filter: &FacultyFilter,
    verbose: bool,
) -> Result<DashboardData> {
    let records = store.list().await?;

    if verbose {
        eprintln!("Fetched {} faculty records", records.len());
    }

    // Stats cover the full collection; the target row shows in totals
    // but never counts as a competitor
    let stats = summarize(&records);

    let mut target = None;
    let mut competitors = Vec::new();
    for record in records {
        if record.is_target() && target.is_none() {
            target = Some(record);
        } else if !record.is_target() {
            competitors.push(record);
        }
    }

    let faculty = filter_faculty(competitors, filter);

    if verbose && !filter.is_empty() {
        eprintln!("After filter: {} faculty", faculty.len());
    }

    Ok(DashboardData {
        target,
        faculty,
        stats,
    })
}
