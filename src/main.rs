#[macro_use]
extern crate rocket;

use rocket::fs::FileServer;
use rocket::response::content::RawHtml;

mod boot;
mod config;
mod github;
mod projects;
mod render;
mod routes;
mod tests;

use config::SiteConfig;
use projects::PanelState;

#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>404</h1><p>Page not found.</p><a href='/'>← Home</a></body></html>".to_string())
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>500</h1><p>Internal server error.</p><a href='/'>← Home</a></body></html>".to_string())
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    // Boot check — verify/create directories, validate config
    boot::run();

    let cfg = SiteConfig::load();
    eprintln!("Serving portfolio for GitHub account: {}", cfg.github_user);

    rocket::build()
        .manage(cfg)
        .manage(PanelState::new())
        .mount("/static", FileServer::from("site/static"))
        .mount("/", routes::public::routes())
        .mount("/api", routes::api::routes())
        .register("/", catchers![not_found, server_error])
}
