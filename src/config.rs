use serde::Deserialize;
use url::Url;

/// Site config file read from the working directory at boot.
pub const CONFIG_FILE: &str = "folio.toml";

/// Everything the site needs to know about its owner and its GitHub
/// account, loaded once at boot and shared via Rocket managed state.
/// Missing fields fall back to the defaults below, so a partial (or
/// absent) folio.toml is always usable.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site_name: String,
    pub tagline: String,
    pub owner: String,
    pub bio: String,
    pub skills: Vec<String>,
    pub contact_email: String,
    pub accent_color: String,

    /// GitHub account whose public repositories feed the projects panel.
    pub github_user: String,
    pub github_api_base: String,

    /// Page size for the initial pinned-preview fetch.
    pub preview_per_page: i64,
    /// Page size for the "view all" fetch.
    pub full_per_page: i64,
    /// How many leading repositories to mark as pinned when no explicit
    /// pinned list is configured.
    pub pinned_count: i64,
    /// Explicit pinned repository names. When non-empty this overrides the
    /// first-N-by-update classification.
    pub pinned_repos: Vec<String>,

    pub fetch_timeout_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            site_name: "Portfolio".to_string(),
            tagline: "Building things for the web".to_string(),
            owner: "Lecel Echavarre".to_string(),
            bio: "Developer with a focus on clean, useful software. \
                  Browse the projects below or get in touch."
                .to_string(),
            skills: vec![
                "Web Development".to_string(),
                "Python".to_string(),
                "APIs & Integrations".to_string(),
            ],
            contact_email: String::new(),
            accent_color: "#2563eb".to_string(),
            github_user: "lecelechavarre".to_string(),
            github_api_base: "https://api.github.com".to_string(),
            preview_per_page: 20,
            full_per_page: 100,
            pinned_count: 6,
            pinned_repos: Vec::new(),
            fetch_timeout_secs: 10,
        }
    }
}

impl SiteConfig {
    /// Load the config from `folio.toml`, falling back to defaults when the
    /// file is missing or unparseable. Never fails: a broken config file
    /// should not take the site down.
    pub fn load() -> Self {
        Self::load_from(CONFIG_FILE)
    }

    pub fn load_from(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<SiteConfig>(&raw) {
                Ok(cfg) => cfg.validated(),
                Err(e) => {
                    log::error!("Invalid {}: {} — using default config", path, e);
                    SiteConfig::default()
                }
            },
            Err(_) => SiteConfig::default(),
        }
    }

    /// Clamp numeric fields to the ranges the GitHub API accepts and make
    /// sure the API base is a real URL.
    pub fn validated(mut self) -> Self {
        self.preview_per_page = self.preview_per_page.clamp(1, 100);
        self.full_per_page = self.full_per_page.clamp(1, 100);
        self.pinned_count = self.pinned_count.clamp(0, 100);
        self.fetch_timeout_secs = self.fetch_timeout_secs.max(1);

        if Url::parse(&self.github_api_base).is_err() {
            log::warn!(
                "Invalid github_api_base '{}' — falling back to the public API",
                self.github_api_base
            );
            self.github_api_base = "https://api.github.com".to_string();
        }
        self
    }

    /// The public profile page, used as the escape hatch when the API
    /// cannot be reached.
    pub fn profile_url(&self) -> String {
        format!("https://github.com/{}", self.github_user)
    }
}
