#![cfg(test)]

use std::cell::Cell;
use std::collections::HashSet;

use crate::config::SiteConfig;
use crate::github::{repos_url, FetchError, Repo};
use crate::projects::{
    cards, classify, classify_by_ids, classify_by_names, filter, panel_view, stats, FilterKey,
    PanelState, Phase, Project, ProjectList,
};
use crate::render;

fn repo(id: i64, name: &str, language: Option<&str>, description: Option<&str>, stars: i64) -> Repo {
    Repo {
        id,
        name: name.to_string(),
        description: description.map(str::to_string),
        language: language.map(str::to_string),
        stargazers_count: stars,
        forks_count: 1,
        watchers_count: 2,
        html_url: format!("https://github.com/octocat/{}", name),
    }
}

/// n plain Rust repos with ids 1..=n, one star each per id.
fn repo_set(n: i64) -> Vec<Repo> {
    (1..=n)
        .map(|i| repo(i, &format!("repo-{}", i), Some("Rust"), None, i))
        .collect()
}

fn classified_set(n: i64) -> Vec<Project> {
    classify(repo_set(n), 6)
}

fn test_config() -> SiteConfig {
    SiteConfig {
        github_user: "octocat".to_string(),
        ..SiteConfig::default()
    }
}

fn ids(projects: &[Project]) -> Vec<i64> {
    projects.iter().map(|p| p.id).collect()
}

// ═══════════════════════════════════════════════════════════
// Config
// ═══════════════════════════════════════════════════════════

#[test]
fn config_defaults_for_missing_fields() {
    let cfg: SiteConfig = toml::from_str("github_user = \"octocat\"").unwrap();
    let cfg = cfg.validated();
    assert_eq!(cfg.github_user, "octocat");
    assert_eq!(cfg.pinned_count, 6);
    assert_eq!(cfg.preview_per_page, 20);
    assert_eq!(cfg.full_per_page, 100);
    assert_eq!(cfg.fetch_timeout_secs, 10);
    assert!(cfg.pinned_repos.is_empty());
}

#[test]
fn config_clamps_page_sizes() {
    let cfg: SiteConfig =
        toml::from_str("preview_per_page = 500\nfull_per_page = 0\npinned_count = -3").unwrap();
    let cfg = cfg.validated();
    assert_eq!(cfg.preview_per_page, 100);
    assert_eq!(cfg.full_per_page, 1);
    assert_eq!(cfg.pinned_count, 0);
}

#[test]
fn config_rejects_bad_api_base() {
    let cfg: SiteConfig = toml::from_str("github_api_base = \"not a url\"").unwrap();
    let cfg = cfg.validated();
    assert_eq!(cfg.github_api_base, "https://api.github.com");
}

#[test]
fn config_explicit_pinned_list() {
    let cfg: SiteConfig = toml::from_str("pinned_repos = [\"folio\", \"dotfiles\"]").unwrap();
    assert_eq!(cfg.pinned_repos, vec!["folio", "dotfiles"]);
}

#[test]
fn config_profile_url() {
    assert_eq!(test_config().profile_url(), "https://github.com/octocat");
}

#[test]
fn config_load_missing_file_uses_defaults() {
    let cfg = SiteConfig::load_from("does-not-exist.toml");
    assert_eq!(cfg.github_user, SiteConfig::default().github_user);
}

// ═══════════════════════════════════════════════════════════
// Repository fetcher
// ═══════════════════════════════════════════════════════════

#[test]
fn repos_url_shape() {
    let url = repos_url("https://api.github.com", "octocat", 6).unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.github.com/users/octocat/repos?sort=updated&per_page=6"
    );
}

#[test]
fn repos_url_rejects_bad_base() {
    assert!(matches!(
        repos_url("not a url", "octocat", 6),
        Err(FetchError::Transport(_))
    ));
}

#[test]
fn fetch_error_display() {
    assert_eq!(FetchError::Http(403).to_string(), "GitHub returned HTTP 403");
    assert!(FetchError::Transport("timed out".into())
        .to_string()
        .starts_with("transport error:"));
    assert!(FetchError::Decode("bad json".into())
        .to_string()
        .starts_with("decode error:"));
}

#[test]
fn repo_decodes_from_api_json() {
    let json = r#"[{
        "id": 42,
        "name": "web-tool",
        "description": null,
        "language": null,
        "stargazers_count": 7,
        "forks_count": 1,
        "watchers_count": 7,
        "html_url": "https://github.com/octocat/web-tool",
        "fork": false,
        "default_branch": "main"
    }]"#;
    let repos: Vec<Repo> = serde_json::from_str(json).unwrap();
    assert_eq!(repos.len(), 1);
    assert_eq!(repos[0].id, 42);
    assert!(repos[0].description.is_none());
}

#[test]
fn repo_counts_default_to_zero() {
    let json = r#"[{"id": 1, "name": "x", "html_url": "https://github.com/octocat/x"}]"#;
    let repos: Vec<Repo> = serde_json::from_str(json).unwrap();
    assert_eq!(repos[0].stargazers_count, 0);
    assert_eq!(repos[0].forks_count, 0);
}

// ═══════════════════════════════════════════════════════════
// Pinned selector
// ═══════════════════════════════════════════════════════════

#[test]
fn classify_pins_first_six_of_ten() {
    let projects = classify(repo_set(10), 6);
    let pinned: Vec<i64> = projects.iter().filter(|p| p.pinned).map(|p| p.id).collect();
    assert_eq!(pinned, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn classify_pins_everything_on_short_lists() {
    let projects = classify(repo_set(3), 6);
    assert!(projects.iter().all(|p| p.pinned));
    assert_eq!(projects.len(), 3);
}

#[test]
fn classify_zero_pins_nothing() {
    let projects = classify(repo_set(4), 0);
    assert!(projects.iter().all(|p| !p.pinned));
}

#[test]
fn classify_by_ids_survives_reordering() {
    let pinned_ids: HashSet<i64> = [1, 2, 3].into_iter().collect();
    let mut repos = repo_set(5);
    repos.reverse();
    let projects = classify_by_ids(repos, &pinned_ids);
    for p in &projects {
        assert_eq!(p.pinned, pinned_ids.contains(&p.id), "id {}", p.id);
    }
    // Order of the new fetch is preserved
    assert_eq!(ids(&projects), vec![5, 4, 3, 2, 1]);
}

#[test]
fn classify_by_names_is_case_insensitive() {
    let names = vec!["Repo-2".to_string()];
    let projects = classify_by_names(repo_set(3), &names);
    let pinned: Vec<i64> = projects.iter().filter(|p| p.pinned).map(|p| p.id).collect();
    assert_eq!(pinned, vec![2]);
}

// ═══════════════════════════════════════════════════════════
// Filter engine
// ═══════════════════════════════════════════════════════════

#[test]
fn filter_all_is_identity() {
    let projects = classified_set(10);
    let filtered = filter::apply(&projects, FilterKey::All);
    assert_eq!(ids(&filtered), ids(&projects));
}

#[test]
fn filter_is_idempotent() {
    let projects = vec![
        classify(vec![repo(1, "site", Some("HTML"), None, 0)], 6).remove(0),
        classify(vec![repo(2, "tool", Some("Rust"), Some("a web thing"), 0)], 6).remove(0),
        classify(vec![repo(3, "lib", Some("Go"), None, 0)], 6).remove(0),
    ];
    let once = filter::apply(&projects, FilterKey::Web);
    let twice = filter::apply(&once, FilterKey::Web);
    assert_eq!(ids(&once), ids(&twice));
}

#[test]
fn filter_unknown_key_behaves_as_all() {
    assert_eq!(FilterKey::parse("frontend"), FilterKey::All);
    assert_eq!(FilterKey::parse(""), FilterKey::All);
    assert_eq!(FilterKey::parse("python"), FilterKey::Python);
}

#[test]
fn filter_pinned_scenario() {
    // 10 records, first 6 pinned by position
    let projects = classified_set(10);
    let filtered = filter::apply(&projects, FilterKey::Pinned);
    assert_eq!(filtered.len(), 6);
    assert!(filtered.iter().all(|p| p.pinned));
    assert_eq!(ids(&filtered), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn filter_web_matches_languages() {
    for lang in ["HTML", "CSS", "JavaScript"] {
        let projects = classify(vec![repo(1, "x", Some(lang), None, 0)], 6);
        assert_eq!(filter::apply(&projects, FilterKey::Web).len(), 1, "{}", lang);
    }
    let projects = classify(vec![repo(1, "x", Some("Rust"), None, 0)], 6);
    assert!(filter::apply(&projects, FilterKey::Web).is_empty());
}

#[test]
fn filter_web_matches_description_substring() {
    // name "web-tool" alone does not qualify, the description does
    let projects = classify(vec![repo(1, "web-tool", None, Some("a Web utility"), 0)], 6);
    assert_eq!(filter::apply(&projects, FilterKey::Web).len(), 1);
}

#[test]
fn filter_python_matches_language_or_description() {
    let by_lang = classify(vec![repo(1, "x", Some("Python"), None, 0)], 6);
    assert_eq!(filter::apply(&by_lang, FilterKey::Python).len(), 1);

    let by_desc = classify(vec![repo(2, "y", Some("Shell"), Some("Python helpers"), 0)], 6);
    assert_eq!(filter::apply(&by_desc, FilterKey::Python).len(), 1);

    let neither = classify(vec![repo(3, "z", Some("Shell"), Some("misc"), 0)], 6);
    assert!(filter::apply(&neither, FilterKey::Python).is_empty());
}

#[test]
fn filter_preserves_order() {
    let projects = classify(
        vec![
            repo(1, "a", Some("HTML"), None, 0),
            repo(2, "b", Some("Rust"), None, 0),
            repo(3, "c", Some("CSS"), None, 0),
            repo(4, "d", Some("JavaScript"), None, 0),
        ],
        6,
    );
    assert_eq!(ids(&filter::apply(&projects, FilterKey::Web)), vec![1, 3, 4]);
}

// ═══════════════════════════════════════════════════════════
// Stats aggregator
// ═══════════════════════════════════════════════════════════

#[test]
fn stats_totals() {
    let totals = stats::aggregate(&classified_set(10));
    assert_eq!(totals.count, 10);
    assert_eq!(totals.total_stars, (1..=10).sum::<i64>());
    assert_eq!(totals.pinned_count, 6);
}

#[test]
fn stats_pinned_bounded_by_list_length() {
    let totals = stats::aggregate(&classified_set(4));
    assert_eq!(totals.count, 4);
    assert_eq!(totals.pinned_count, 4);
    assert!(totals.pinned_count <= totals.count.min(6));
}

#[test]
fn stats_empty_list_is_zeros() {
    let totals = stats::aggregate(&[]);
    assert_eq!(totals.count, 0);
    assert_eq!(totals.total_stars, 0);
    assert_eq!(totals.pinned_count, 0);
}

// ═══════════════════════════════════════════════════════════
// Card renderer
// ═══════════════════════════════════════════════════════════

#[test]
fn card_handles_missing_description_and_language() {
    let projects = classify(vec![repo(1, "bare", None, None, 0)], 6);
    let html = cards::render_card(&projects[0]);
    assert!(html.contains("No description available."));
    assert!(html.contains("fas fa-code"));
}

#[test]
fn card_known_language_icon() {
    let projects = classify(vec![repo(1, "snake", Some("Python"), None, 0)], 6);
    let html = cards::render_card(&projects[0]);
    assert!(html.contains("fab fa-python"));
    assert!(html.contains(r#"<span class="tech-tag python">Python</span>"#));
}

#[test]
fn card_escapes_remote_text() {
    let projects = classify(
        vec![repo(
            1,
            "<script>alert(1)</script>",
            Some("HTML"),
            Some("desc with <b>markup</b> & \"quotes\""),
            0,
        )],
        6,
    );
    let html = cards::render_card(&projects[0]);
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("&amp; &quot;quotes&quot;"));
}

#[test]
fn card_keyword_tags_are_additive() {
    let projects = classify(
        vec![repo(1, "web-api-kit", Some("Python"), Some("a web api toolkit"), 0)],
        6,
    );
    let html = cards::render_card(&projects[0]);
    assert!(html.contains(r#"<span class="tech-tag python">Python</span>"#));
    assert!(html.contains(r#"<span class="tech-tag html">HTML/CSS</span>"#));
    assert!(html.contains(r#"<span class="tech-tag javascript">API</span>"#));
}

#[test]
fn card_marks_pinned() {
    let projects = classified_set(2);
    let html = cards::render_card(&projects[0]);
    assert!(html.contains("fa-thumbtack"));
    assert!(html.contains(r#"data-pinned="true""#));
}

#[test]
fn empty_fragment_escapes_message() {
    let html = cards::empty_fragment("nothing <here>");
    assert!(html.contains("nothing &lt;here&gt;"));
    assert!(html.contains("no-projects"));
}

#[test]
fn error_fragment_links_to_profile() {
    let html = cards::error_fragment("https://github.com/octocat");
    assert!(html.contains(r#"href="https://github.com/octocat""#));
    assert!(html.contains("View on GitHub"));
}

// ═══════════════════════════════════════════════════════════
// View controller
// ═══════════════════════════════════════════════════════════

#[test]
fn preview_trigger_is_one_shot() {
    let mut list = ProjectList::new();
    assert!(list.begin_preview());
    assert_eq!(list.phase, Phase::Loading);
    // A second trigger while the fetch is in flight is suppressed
    assert!(!list.begin_preview());

    list.apply_preview(Ok(repo_set(10)), &test_config());
    assert_eq!(list.phase, Phase::Loaded);
    // Consumed: a loaded panel never refetches on visibility
    assert!(!list.begin_preview());
}

#[test]
fn failed_fetch_enters_error_and_can_retry() {
    let cfg = test_config();
    let mut list = ProjectList::new();
    assert!(list.begin_preview());
    list.apply_preview(Err(FetchError::Transport("unreachable".into())), &cfg);
    assert_eq!(list.phase, Phase::Error);
    // Error is re-enterable, the next trigger retries
    assert!(list.begin_preview());
    list.apply_preview(Ok(repo_set(2)), &cfg);
    assert_eq!(list.phase, Phase::Loaded);
}

#[test]
fn view_all_suppressed_while_loading() {
    let mut list = ProjectList::new();
    assert!(list.begin_full());
    assert!(!list.begin_full());
}

#[test]
fn filter_change_stays_loaded() {
    let cfg = test_config();
    let mut list = ProjectList::new();
    list.begin_preview();
    list.apply_preview(Ok(repo_set(10)), &cfg);
    list.set_filter(FilterKey::Pinned);
    assert_eq!(list.phase, Phase::Loaded);
    assert_eq!(list.filter, FilterKey::Pinned);
}

#[test]
fn view_all_reclassifies_by_identifier() {
    let cfg = test_config();
    let mut list = ProjectList::new();
    list.begin_preview();
    list.apply_preview(Ok(repo_set(10)), &cfg);
    let preview_pinned = list.pinned_ids.clone();
    assert_eq!(preview_pinned, [1, 2, 3, 4, 5, 6].into_iter().collect());

    // The full fetch returns the same repos in a different order
    let mut repos = repo_set(10);
    repos.reverse();
    list.begin_full();
    list.apply_full(Ok(repos), &cfg);

    assert!(list.showing_all);
    for p in &list.projects {
        assert_eq!(p.pinned, preview_pinned.contains(&p.id), "id {}", p.id);
    }
}

#[test]
fn explicit_pinned_list_overrides_position() {
    let cfg = SiteConfig {
        pinned_repos: vec!["repo-9".to_string()],
        ..test_config()
    };
    let mut list = ProjectList::new();
    list.begin_preview();
    list.apply_preview(Ok(repo_set(10)), &cfg);
    let pinned: Vec<i64> = list.projects.iter().filter(|p| p.pinned).map(|p| p.id).collect();
    assert_eq!(pinned, vec![9]);
}

#[test]
fn visible_is_pinned_preview_until_view_all() {
    let cfg = test_config();
    let mut list = ProjectList::new();
    list.begin_preview();
    list.apply_preview(Ok(repo_set(10)), &cfg);
    assert_eq!(ids(&list.visible()), vec![1, 2, 3, 4, 5, 6]);

    list.begin_full();
    list.apply_full(Ok(repo_set(10)), &cfg);
    assert_eq!(list.visible().len(), 10);
}

// ═══════════════════════════════════════════════════════════
// Panel snapshots
// ═══════════════════════════════════════════════════════════

#[test]
fn empty_fetch_is_loaded_not_error() {
    let cfg = test_config();
    let mut list = ProjectList::new();
    list.begin_preview();
    list.apply_preview(Ok(vec![]), &cfg);

    let view = panel_view(&list, &cfg);
    assert_eq!(view.state, "loaded");
    assert_eq!(view.count, 0);
    assert!(view.html.contains("No public repositories found."));
}

#[test]
fn http_403_shows_fallback_with_profile_link() {
    let cfg = test_config();
    let mut list = ProjectList::new();
    list.begin_preview();
    list.apply_preview(Err(FetchError::Http(403)), &cfg);

    let view = panel_view(&list, &cfg);
    assert_eq!(view.state, "error");
    assert!(view.html.contains("https://github.com/octocat"));
}

#[test]
fn unmatched_filter_shows_explicit_empty_state() {
    let cfg = test_config();
    let mut list = ProjectList::new();
    list.begin_preview();
    list.apply_preview(Ok(repo_set(10)), &cfg);
    list.set_filter(FilterKey::Python);

    let view = panel_view(&list, &cfg);
    assert_eq!(view.state, "loaded");
    assert!(view.html.contains("No projects match this filter."));
    assert!(!view.html.contains("project-card"));
}

#[test]
fn panel_counters_cover_full_list_not_filtered_view() {
    let cfg = test_config();
    let mut list = ProjectList::new();
    list.begin_preview();
    list.apply_preview(Ok(repo_set(10)), &cfg);
    list.set_filter(FilterKey::Pinned);

    let view = panel_view(&list, &cfg);
    assert_eq!(view.count, 10);
    assert_eq!(view.pinned_count, 6);
    assert_eq!(view.total_stars, (1..=10).sum::<i64>());
}

#[test]
fn view_all_button_visibility() {
    let cfg = test_config();
    let mut list = ProjectList::new();
    list.begin_preview();
    list.apply_preview(Ok(repo_set(10)), &cfg);
    assert!(panel_view(&list, &cfg).can_view_all);

    list.begin_full();
    list.apply_full(Ok(repo_set(10)), &cfg);
    assert!(!panel_view(&list, &cfg).can_view_all);
}

#[test]
fn small_accounts_have_no_view_all() {
    let cfg = test_config();
    let mut list = ProjectList::new();
    list.begin_preview();
    list.apply_preview(Ok(repo_set(4)), &cfg);
    assert!(!panel_view(&list, &cfg).can_view_all);
}

// ═══════════════════════════════════════════════════════════
// Shared controller state
// ═══════════════════════════════════════════════════════════

#[test]
fn ensure_loaded_fetches_once() {
    let cfg = test_config();
    let state = PanelState::new();

    let view = state.ensure_loaded(&cfg, None, || Ok(repo_set(10)));
    assert_eq!(view.state, "loaded");
    assert_eq!(view.count, 10);

    // Already loaded: the fetch closure must not run again
    let called = Cell::new(false);
    let view = state.ensure_loaded(&cfg, Some(FilterKey::Pinned), || {
        called.set(true);
        Ok(vec![])
    });
    assert!(!called.get());
    assert_eq!(view.filter, "pinned");
    assert_eq!(view.count, 10);
}

#[test]
fn ensure_loaded_retries_after_error() {
    let cfg = test_config();
    let state = PanelState::new();

    let view = state.ensure_loaded(&cfg, None, || Err(FetchError::Http(429)));
    assert_eq!(view.state, "error");

    let view = state.ensure_loaded(&cfg, None, || Ok(repo_set(3)));
    assert_eq!(view.state, "loaded");
    assert_eq!(view.count, 3);
}

#[test]
fn load_all_switches_to_full_list() {
    let cfg = test_config();
    let state = PanelState::new();
    state.ensure_loaded(&cfg, None, || Ok(repo_set(10)));

    let view = state.load_all(&cfg, || Ok(repo_set(10)));
    assert_eq!(view.state, "loaded");
    assert!(view.showing_all);
    assert!(!view.can_view_all);
    assert!(view.html.matches("project-card").count() >= 10);
}

#[test]
fn load_all_failure_keeps_escape_hatch() {
    let cfg = test_config();
    let state = PanelState::new();
    state.ensure_loaded(&cfg, None, || Ok(repo_set(10)));

    let view = state.load_all(&cfg, || Err(FetchError::Transport("timed out".into())));
    assert_eq!(view.state, "error");
    assert!(view.html.contains("https://github.com/octocat"));
}

// ═══════════════════════════════════════════════════════════
// Page shell
// ═══════════════════════════════════════════════════════════

#[test]
fn home_page_contains_panel_hooks() {
    let html = render::render_home(&test_config());
    assert!(html.contains(r#"id="projectsGrid""#));
    assert!(html.contains(r#"id="themeToggle""#));
    assert!(html.contains(r#"data-filter="pinned""#));
    assert!(html.contains(r#"id="viewAllBtn""#));
    assert!(html.contains("/api/projects"));
}

#[test]
fn home_page_escapes_config_strings() {
    let cfg = SiteConfig {
        owner: "Ada <Lovelace>".to_string(),
        ..test_config()
    };
    let html = render::render_home(&cfg);
    assert!(html.contains("Ada &lt;Lovelace&gt;"));
    assert!(!html.contains("Ada <Lovelace>"));
}

#[test]
fn home_page_rejects_accent_injection() {
    let cfg = SiteConfig {
        accent_color: "red;}</style><script>".to_string(),
        ..test_config()
    };
    let html = render::render_home(&cfg);
    assert!(html.contains("--accent: #2563eb"));
    assert!(!html.contains("red;}"));
}
