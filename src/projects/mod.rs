pub mod cards;
pub mod filter;
pub mod stats;

use serde::Serialize;
use std::collections::HashSet;
use std::sync::Mutex;

use crate::config::SiteConfig;
use crate::github::{FetchError, Repo};

pub use filter::FilterKey;

// ── Types ─────────────────────────────────────────────

/// A repository after pinned classification. Raw `github::Repo` records
/// never reach the renderer; only classified projects do, so a `pinned`
/// flag is always present from here on.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: i64,
    pub forks_count: i64,
    pub watchers_count: i64,
    pub html_url: String,
    pub pinned: bool,
}

impl Project {
    fn from_repo(repo: Repo, pinned: bool) -> Self {
        Project {
            id: repo.id,
            name: repo.name,
            description: repo.description,
            language: repo.language,
            stargazers_count: repo.stargazers_count,
            forks_count: repo.forks_count,
            watchers_count: repo.watchers_count,
            html_url: repo.html_url,
            pinned,
        }
    }
}

/// Panel lifecycle. `Loaded` and `Error` are re-enterable: "view all" goes
/// back through `Loading`, and a failed load can be retried by triggering
/// the panel again. Filter changes stay within `Loaded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Error,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Loaded => "loaded",
            Phase::Error => "error",
        }
    }
}

// ── Pinned classification ─────────────────────────────

/// Mark the first `pinned_count` repositories (by input order) as pinned.
/// The API has no pinned concept for unauthenticated callers, so "most
/// recently updated" stands in for it.
pub fn classify(repos: Vec<Repo>, pinned_count: i64) -> Vec<Project> {
    let cutoff = pinned_count.max(0) as usize;
    repos
        .into_iter()
        .enumerate()
        .map(|(i, repo)| Project::from_repo(repo, i < cutoff))
        .collect()
}

/// Mark repositories pinned by identifier membership. Used for the
/// "view all" re-fetch so pinned flags stay consistent with the preview
/// even if the two responses disagree on order.
pub fn classify_by_ids(repos: Vec<Repo>, ids: &HashSet<i64>) -> Vec<Project> {
    repos
        .into_iter()
        .map(|repo| {
            let pinned = ids.contains(&repo.id);
            Project::from_repo(repo, pinned)
        })
        .collect()
}

/// Mark repositories pinned by name, for sites that configure an explicit
/// pinned list instead of relying on update order.
pub fn classify_by_names(repos: Vec<Repo>, names: &[String]) -> Vec<Project> {
    repos
        .into_iter()
        .map(|repo| {
            let pinned = names.iter().any(|n| n.eq_ignore_ascii_case(&repo.name));
            Project::from_repo(repo, pinned)
        })
        .collect()
}

// ── State container ───────────────────────────────────

/// The panel's single mutable state container. Created once, lives for the
/// process, never persisted. A restart resets it to `Idle`.
#[derive(Debug)]
pub struct ProjectList {
    pub phase: Phase,
    pub projects: Vec<Project>,
    /// Identifiers pinned by the first classification, so later fetches
    /// classify consistently.
    pub pinned_ids: HashSet<i64>,
    pub showing_all: bool,
    pub filter: FilterKey,
}

impl ProjectList {
    pub fn new() -> Self {
        ProjectList {
            phase: Phase::Idle,
            projects: Vec::new(),
            pinned_ids: HashSet::new(),
            showing_all: false,
            filter: FilterKey::All,
        }
    }

    /// One-shot trigger out of `Idle` (or retry out of `Error`). Returns
    /// true when the caller should perform the preview fetch; false when a
    /// fetch is already in flight or the list is already loaded.
    pub fn begin_preview(&mut self) -> bool {
        match self.phase {
            Phase::Idle | Phase::Error => {
                self.phase = Phase::Loading;
                true
            }
            Phase::Loading | Phase::Loaded => false,
        }
    }

    /// Start the "view all" fetch. A second trigger while a fetch is in
    /// flight is suppressed.
    pub fn begin_full(&mut self) -> bool {
        if self.phase == Phase::Loading {
            return false;
        }
        self.phase = Phase::Loading;
        true
    }

    /// Apply a preview fetch result. An explicit configured pinned list
    /// wins over positional first-N classification.
    pub fn apply_preview(&mut self, result: Result<Vec<Repo>, FetchError>, cfg: &SiteConfig) {
        match result {
            Ok(repos) => {
                let projects = if cfg.pinned_repos.is_empty() {
                    classify(repos, cfg.pinned_count)
                } else {
                    classify_by_names(repos, &cfg.pinned_repos)
                };
                self.pinned_ids = projects.iter().filter(|p| p.pinned).map(|p| p.id).collect();
                self.projects = projects;
                self.showing_all = false;
                self.phase = Phase::Loaded;
            }
            Err(_) => self.phase = Phase::Error,
        }
    }

    /// Apply a "view all" fetch result, reusing the identifiers pinned by
    /// the preview classification when there was one.
    pub fn apply_full(&mut self, result: Result<Vec<Repo>, FetchError>, cfg: &SiteConfig) {
        match result {
            Ok(repos) => {
                let projects = if !cfg.pinned_repos.is_empty() {
                    classify_by_names(repos, &cfg.pinned_repos)
                } else if !self.pinned_ids.is_empty() {
                    classify_by_ids(repos, &self.pinned_ids)
                } else {
                    classify(repos, cfg.pinned_count)
                };
                self.pinned_ids = projects.iter().filter(|p| p.pinned).map(|p| p.id).collect();
                self.projects = projects;
                self.showing_all = true;
                self.phase = Phase::Loaded;
            }
            Err(_) => self.phase = Phase::Error,
        }
    }

    pub fn set_filter(&mut self, key: FilterKey) {
        self.filter = key;
    }

    /// The list the panel presents before filtering: everything when
    /// showing all, otherwise the pinned preview subset.
    pub fn visible(&self) -> Vec<Project> {
        if self.showing_all {
            self.projects.clone()
        } else {
            self.projects.iter().filter(|p| p.pinned).cloned().collect()
        }
    }
}

// ── Panel snapshot for the page script ────────────────

/// What `/api/projects` hands the page script: the current phase, the
/// rendered grid (or fallback) fragment, and the summary counters.
#[derive(Debug, Serialize)]
pub struct PanelView {
    pub state: &'static str,
    pub html: String,
    pub count: i64,
    pub total_stars: i64,
    pub pinned_count: i64,
    pub showing_all: bool,
    pub can_view_all: bool,
    pub filter: &'static str,
}

pub fn panel_view(list: &ProjectList, cfg: &SiteConfig) -> PanelView {
    let totals = stats::aggregate(&list.projects);

    let html = match list.phase {
        Phase::Idle | Phase::Loading => cards::loading_fragment(),
        Phase::Error => cards::error_fragment(&cfg.profile_url()),
        Phase::Loaded => {
            if list.projects.is_empty() {
                cards::empty_fragment("No public repositories found.")
            } else {
                let visible = list.visible();
                let shown = filter::apply(&visible, list.filter);
                if shown.is_empty() {
                    if !list.showing_all && list.filter == FilterKey::All {
                        cards::empty_fragment("No pinned repositories found.")
                    } else {
                        cards::empty_fragment("No projects match this filter.")
                    }
                } else {
                    cards::render_grid(&shown)
                }
            }
        }
    };

    PanelView {
        state: list.phase.name(),
        html,
        count: totals.count,
        total_stars: totals.total_stars,
        pinned_count: totals.pinned_count,
        showing_all: list.showing_all,
        can_view_all: !list.showing_all && totals.count > cfg.pinned_count,
        filter: list.filter.name(),
    }
}

// ── Shared controller state ───────────────────────────

/// Rocket-managed wrapper around the panel state. Fetches run outside the
/// lock, so a slow GitHub response never blocks snapshot reads; results
/// are applied under the lock, latest write wins.
pub struct PanelState {
    list: Mutex<ProjectList>,
}

impl PanelState {
    pub fn new() -> Self {
        PanelState {
            list: Mutex::new(ProjectList::new()),
        }
    }

    /// Lazy panel trigger. Starts the preview fetch on the first call (or
    /// after a failure); a call while a fetch is in flight is suppressed
    /// and reports the current snapshot instead.
    pub fn ensure_loaded<F>(
        &self,
        cfg: &SiteConfig,
        filter: Option<FilterKey>,
        fetch: F,
    ) -> PanelView
    where
        F: FnOnce() -> Result<Vec<Repo>, FetchError>,
    {
        let fetch_needed = {
            let mut list = self.list.lock().unwrap();
            if let Some(key) = filter {
                list.set_filter(key);
            }
            list.begin_preview()
        };

        if fetch_needed {
            let result = fetch();
            if let Err(e) = &result {
                log::warn!("GitHub preview fetch failed: {}", e);
            }
            let mut list = self.list.lock().unwrap();
            list.apply_preview(result, cfg);
        }

        let list = self.list.lock().unwrap();
        panel_view(&list, cfg)
    }

    /// The "view all" action: a fresh fetch with the larger page size.
    pub fn load_all<F>(&self, cfg: &SiteConfig, fetch: F) -> PanelView
    where
        F: FnOnce() -> Result<Vec<Repo>, FetchError>,
    {
        let fetch_needed = {
            let mut list = self.list.lock().unwrap();
            list.begin_full()
        };

        if fetch_needed {
            let result = fetch();
            if let Err(e) = &result {
                log::warn!("GitHub full fetch failed: {}", e);
            }
            let mut list = self.list.lock().unwrap();
            list.apply_full(result, cfg);
        }

        let list = self.list.lock().unwrap();
        panel_view(&list, cfg)
    }

    pub fn snapshot(&self, cfg: &SiteConfig) -> PanelView {
        let list = self.list.lock().unwrap();
        panel_view(&list, cfg)
    }

    pub fn phase(&self) -> Phase {
        self.list.lock().unwrap().phase
    }
}
