use engine::{resolve_app_paths, LoopConfig, Scene, StartupError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::config::{SCREEN_HEIGHT, SCREEN_WIDTH, SEED_ENV_VAR, WINDOW_TITLE};
use super::save::save_file_path;
use super::session::GameSession;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

pub(crate) fn build_app() -> Result<AppWiring, StartupError> {
    init_tracing();
    info!("=== Desert Portals Startup ===");

    let paths = resolve_app_paths()?;
    let save_path = save_file_path(&paths.save_dir);
    let seed_override = seed_from_env();
    info!(
        root = %paths.root.display(),
        save_path = %save_path.display(),
        seed_override = ?seed_override,
        "app_paths_resolved"
    );

    let config = LoopConfig {
        window_title: WINDOW_TITLE.to_string(),
        window_width: SCREEN_WIDTH,
        window_height: SCREEN_HEIGHT,
        ..LoopConfig::default()
    };

    Ok(AppWiring {
        config,
        scene: Box::new(GameSession::new(save_path, seed_override)),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn seed_from_env() -> Option<u64> {
    let raw = std::env::var(SEED_ENV_VAR).ok()?;
    parse_seed(&raw).or_else(|| {
        warn!(var = SEED_ENV_VAR, value = %raw, "seed_override_ignored");
        None
    })
}

fn parse_seed(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_seed_accepts_trimmed_integers() {
        assert_eq!(parse_seed(" 1234 "), Some(1234));
        assert_eq!(parse_seed("18446744073709551615"), Some(u64::MAX));
    }

    #[test]
    fn parse_seed_rejects_garbage() {
        assert_eq!(parse_seed(""), None);
        assert_eq!(parse_seed("-5"), None);
        assert_eq!(parse_seed("seed"), None);
    }
}
