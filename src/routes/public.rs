use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::{json, Value};

use crate::config::SiteConfig;
use crate::projects::PanelState;
use crate::render;

// ── Homepage ───────────────────────────────────────────

#[get("/")]
pub fn homepage(cfg: &State<SiteConfig>) -> RawHtml<String> {
    RawHtml(render::render_home(cfg))
}

// ── Liveness ───────────────────────────────────────────

#[get("/healthz")]
pub fn healthz(cfg: &State<SiteConfig>, panel: &State<PanelState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "account": cfg.github_user,
        "panel": panel.phase().name(),
    }))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![homepage, healthz]
}
