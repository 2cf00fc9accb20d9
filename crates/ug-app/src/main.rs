use std::sync::Arc;

use anyhow::Result;
use arc_swap::ArcSwap;
use clap::Parser;
use ug_core::config::EngineConfig;
use ug_core::error::CoreError;
use ug_engine::Engine;
use ug_term::TerminalBackend;

pub mod cli;
pub mod demos;
pub mod hotreload;
pub mod offline;
pub mod snapshot;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging (stderr, jamais l'écran alternatif)
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    cli.validate()?;

    // 3. Config : fichier, géométrie de la démo, puis overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.demo.configure(&mut config);
    cli.apply_overrides(&mut config);

    let seed = cli.seed.unwrap_or_else(|| fastrand::u64(..));
    log::info!("Démo {:?}, graine {seed}", cli.demo);

    if cli.headless {
        return run_headless(&cli, config, seed);
    }

    let config = Arc::new(ArcSwap::from_pointee(config));

    // 4. Hot-reload (seulement si le fichier existe)
    let (config_path, _) = cli.config_path();
    let _watcher = if config_path.exists() {
        Some(hotreload::spawn_config_watcher(config_path, &config)?)
    } else {
        None
    };

    // 5. Moteur et démo, avant de toucher au terminal
    let mut engine = Engine::with_shared_config(Arc::clone(&config))?;
    let mut game = cli.demo.setup(&mut engine, seed)?;

    // 6. Terminal ratatui
    let terminal = ratatui::init();
    let mut backend = TerminalBackend::new(terminal, config);

    // 7. Boucle principale
    let result = engine.run(&mut backend, game.as_mut());

    // 8. Restaurer le terminal (TOUJOURS, même en cas d'erreur)
    ratatui::restore();

    result
}

/// Rendu hors écran, puis capture PNG et/ou grille de cellules.
fn run_headless(cli: &cli::Cli, config: EngineConfig, seed: u64) -> Result<()> {
    let backend = offline::run_demo(cli.demo, config, cli.frames, seed)?;

    if let Some(ref path) = cli.snapshot {
        match backend.last_pixels() {
            Some(pixels) => snapshot::save_png(pixels, path)?,
            None => log::warn!("Aucune frame rendue, pas de capture."),
        }
    }
    if cli.dump_cells
        && let Some(cells) = backend.last_cells()
    {
        println!("{}", cells.to_text());
    }
    Ok(())
}

/// Config explicite obligatoire ; config par défaut facultative.
fn resolve_config(cli: &cli::Cli) -> Result<EngineConfig> {
    let (path, explicit) = cli.config_path();
    if path.exists() {
        ug_core::config::load_config(path)
    } else if explicit {
        Err(CoreError::FileNotFound {
            path: path.display().to_string(),
        }
        .into())
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            path.display()
        );
        Ok(EngineConfig::default())
    }
}
