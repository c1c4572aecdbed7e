use rocket::serde::json::Json;
use rocket::State;

use crate::config::SiteConfig;
use crate::github;
use crate::projects::{FilterKey, PanelState, PanelView};

// ── Projects panel (hybrid AJAX) ───────────────────────

/// Panel snapshot. The page script calls this once when the projects
/// section scrolls into view (triggering the preview fetch) and again on
/// every filter click (no fetch; the filter engine recomputes the view
/// from the in-memory list).
#[get("/projects?<filter>")]
pub fn projects_panel(
    cfg: &State<SiteConfig>,
    panel: &State<PanelState>,
    filter: Option<&str>,
) -> Json<PanelView> {
    let key = filter.map(FilterKey::parse);
    let view = panel.ensure_loaded(cfg, key, || github::fetch(cfg, cfg.preview_per_page));
    Json(view)
}

/// The "view all" action: re-fetch with the larger page size. Pinned flags
/// are carried over by identifier so the two fetches stay consistent.
#[post("/projects/all")]
pub fn projects_all(cfg: &State<SiteConfig>, panel: &State<PanelState>) -> Json<PanelView> {
    let view = panel.load_all(cfg, || github::fetch(cfg, cfg.full_per_page));
    Json(view)
}

pub fn routes() -> Vec<rocket::Route> {
    routes![projects_panel, projects_all]
}
