use serde::Serialize;

use super::Project;

/// Summary counters shown above the project grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectStats {
    pub count: i64,
    pub total_stars: i64,
    pub pinned_count: i64,
}

/// Aggregate over the full in-memory list (not the filtered view).
/// Total on any input: an empty list yields zeros.
pub fn aggregate(projects: &[Project]) -> ProjectStats {
    ProjectStats {
        count: projects.len() as i64,
        total_stars: projects.iter().map(|p| p.stargazers_count).sum(),
        pinned_count: projects.iter().filter(|p| p.pinned).count() as i64,
    }
}
