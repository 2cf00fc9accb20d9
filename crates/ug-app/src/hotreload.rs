use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use arc_swap::ArcSwap;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use ug_core::config::EngineConfig;

/// Lance un watcher qui recharge le fichier config et met à jour l'ArcSwap.
///
/// Seule la section runtime est reprise : la géométrie et la police de la
/// fenêtre sont figées à l'init. Retourne le Watcher (doit rester vivant
/// tant que l'app tourne).
///
/// # Errors
/// Returns an error if the watcher cannot be created or the path cannot be watched.
pub fn spawn_config_watcher(
    config_path: &Path,
    config: &Arc<ArcSwap<EngineConfig>>,
) -> Result<impl Watcher + use<>> {
    let config = Arc::clone(config);
    let path = config_path.to_path_buf();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        if let Ok(event) = res
            && matches!(event.kind, EventKind::Modify(_))
        {
            match ug_core::config::load_config(&path) {
                Ok(reloaded) => {
                    let merged = merge_runtime(&config.load(), &reloaded);
                    config.store(Arc::new(merged));
                    log::info!("Config rechargée depuis {}", path.display());
                }
                Err(e) => {
                    log::warn!("Erreur de rechargement config : {e:#}");
                    // On garde l'ancienne config.
                }
            }
        }
    })?;

    watcher.watch(config_path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

/// Config courante avec les réglages runtime de `reloaded`.
#[must_use]
pub fn merge_runtime(current: &EngineConfig, reloaded: &EngineConfig) -> EngineConfig {
    EngineConfig {
        target_fps: reloaded.target_fps,
        present_mode: reloaded.present_mode,
        show_status: reloaded.show_status,
        ..current.clone()
    }
}

#[cfg(test)]
mod tests {
    use ug_core::config::PresentMode;

    use super::*;

    #[test]
    fn window_section_is_frozen() {
        let current = EngineConfig::new("Walker Demo", 60, 20).with_font("6x13");
        let mut reloaded = EngineConfig::new("autre", 10, 10);
        reloaded.target_fps = 30;
        reloaded.present_mode = PresentMode::Pixels;
        reloaded.show_status = false;

        let merged = merge_runtime(&current, &reloaded);
        assert_eq!(merged.title, "Walker Demo");
        assert_eq!((merged.width, merged.height), (60, 20));
        assert_eq!(merged.font, "6x13");
        assert_eq!(merged.target_fps, 30);
        assert_eq!(merged.present_mode, PresentMode::Pixels);
        assert!(!merged.show_status);
    }
}
