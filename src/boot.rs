use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::process;

use crate::config;

/// Required directories that will be created if missing
const REQUIRED_DIRS: &[&str] = &[
    "site",
    "site/static",
];

/// Run all boot checks. Call this before Rocket launches.
/// Creates missing directories, warns about missing optional files, and
/// aborts if the filesystem is unusable.
pub fn run() {
    info!("Folio boot check starting...");

    let mut warnings = 0u32;
    let mut errors = 0u32;

    // ── 1. Directories ─────────────────────────────────
    for dir in REQUIRED_DIRS {
        let path = Path::new(dir);
        if !path.exists() {
            match fs::create_dir_all(path) {
                Ok(_) => info!("  Created directory: {}", dir),
                Err(e) => {
                    error!("  FAILED to create directory {}: {}", dir, e);
                    errors += 1;
                }
            }
        }
    }

    // ── 2. Site config file ────────────────────────────
    if !Path::new(config::CONFIG_FILE).exists() {
        warn!(
            "  {} not found — using default site config",
            config::CONFIG_FILE
        );
        warnings += 1;
    }

    // ── 3. Static directory writable ───────────────────
    let static_dir = Path::new("site/static");
    if static_dir.exists() {
        let test_file = static_dir.join(".write_test");
        match fs::write(&test_file, "test") {
            Ok(_) => {
                let _ = fs::remove_file(&test_file);
            }
            Err(e) => {
                warn!("  Static directory not writable: {}", e);
                warnings += 1;
            }
        }
    }

    // ── 4. Rocket.toml exists ──────────────────────────
    if !Path::new("Rocket.toml").exists() {
        warn!("  Rocket.toml not found — using default config");
        warnings += 1;
    }

    // ── Summary ────────────────────────────────────────
    if errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            errors, warnings
        );
        process::exit(1);
    }

    if warnings > 0 {
        warn!(
            "Boot check passed with {} warning(s). Some features may not work correctly.",
            warnings
        );
    } else {
        info!("Boot check passed. All systems go.");
    }
}
