use super::Project;

/// Classification key behind the panel's filter buttons. Each key maps to
/// a pure predicate over a classified project record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    All,
    Pinned,
    Web,
    Python,
}

impl FilterKey {
    /// Parse the key from a filter button's data attribute.
    /// Unknown keys fall back to `All`.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "pinned" => Self::Pinned,
            "web" => Self::Web,
            "python" => Self::Python,
            _ => Self::All,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pinned => "pinned",
            Self::Web => "web",
            Self::Python => "python",
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            Self::All => true,
            Self::Pinned => project.pinned,
            Self::Web => {
                matches!(
                    project.language.as_deref(),
                    Some("HTML") | Some("CSS") | Some("JavaScript")
                ) || description_contains(project, "web")
            }
            Self::Python => {
                project.language.as_deref() == Some("Python")
                    || description_contains(project, "python")
            }
        }
    }
}

fn description_contains(project: &Project, needle: &str) -> bool {
    project
        .description
        .as_ref()
        .map(|d| d.to_lowercase().contains(needle))
        .unwrap_or(false)
}

/// Order-preserving subsequence of `projects` matching `key`.
/// An empty result is a valid outcome, not an error; the renderer shows
/// an explicit "no projects" fragment for it.
pub fn apply(projects: &[Project], key: FilterKey) -> Vec<Project> {
    projects.iter().filter(|p| key.matches(p)).cloned().collect()
}
