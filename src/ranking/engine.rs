use crate::achievements::AchievementSchema;
use crate::faculty::FacultyRecord;

/// One faculty member with their computed total and leaderboard position.
///
/// Derived fresh on every `rank` call and never persisted; borrows the
/// caller's records for the duration of one render cycle.
#[derive(Debug, Clone)]
pub struct RankedEntry<'a> {
    pub record: &'a FacultyRecord,
    pub total_achievements: u64,
    /// 1-based position in the leaderboard. Strictly positional: equal
    /// totals still get distinct, increasing ranks.
    pub rank: usize,
}

/// Sum every schema-listed counter on the record.
///
/// Absent counters contribute 0; fields not listed in the schema (including
/// the free-text ones and `rdproposals`) are never counted. Pure function.
pub fn compute_total(record: &FacultyRecord, schema: &AchievementSchema) -> u64 {
    schema
        .keys()
        .map(|key| record.achievement(key).unwrap_or(0))
        .sum()
}

/// Rank faculty by total achievements, descending.
///
/// The target row is excluded before anything else; it never receives a rank.
/// Ties keep their input order: `slice::sort_by` is a stable sort, and no
/// secondary comparator is applied. Ranks are positional (`1, 2, 3, ...`),
/// never shared. An empty or all-target input yields an empty list.
pub fn rank<'a>(records: &'a [FacultyRecord], schema: &AchievementSchema) -> Vec<RankedEntry<'a>> {
    let mut entries: Vec<RankedEntry<'a>> = records
        .iter()
        .filter(|record| !record.is_target())
        .map(|record| RankedEntry {
            record,
            total_achievements: compute_total(record, schema),
            rank: 0,
        })
        .collect();

    entries.sort_by(|a, b| b.total_achievements.cmp(&a.total_achievements));

    for (idx, entry) in entries.iter_mut().enumerate() {
        entry.rank = idx + 1;
    }

    entries
}

/// Leaderboard position of the record with the given id, or `None` if the id
/// is absent or is the target row. With duplicate ids (never validated
/// upstream), the best-ranked occurrence wins.
pub fn lookup_rank(records: &[FacultyRecord], schema: &AchievementSchema, id: &str) -> Option<usize> {
    rank(records, schema)
        .iter()
        .find(|entry| entry.record.id == id)
        .map(|entry| entry.rank)
}
