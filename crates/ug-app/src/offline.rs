use anyhow::Result;
use ug_core::clock::FrameClock;
use ug_core::config::EngineConfig;
use ug_engine::{Engine, HeadlessBackend};

use crate::demos::Demo;

/// Joue `frames` frames d'une démo sans terminal, avec une horloge fixe.
///
/// Retourne le backend, qui garde la dernière frame (pixels et cellules).
///
/// # Errors
/// Propagates engine initialisation and game loop errors.
pub fn run_demo(demo: Demo, config: EngineConfig, frames: u64, seed: u64) -> Result<HeadlessBackend> {
    let dt = 1.0 / config.target_fps.max(1) as f32;
    let mut engine = Engine::init(config)?;
    engine.set_clock(FrameClock::fixed(dt));
    let mut game = demo.setup(&mut engine, seed)?;

    let surface = engine.render_surface();
    let mut backend = HeadlessBackend::new(surface.width, surface.height).with_frame_limit(frames);
    for (frame, events) in demo.script() {
        backend = backend.with_events(frame, events);
    }

    engine.run(&mut backend, game.as_mut())?;
    log::info!(
        "{demo:?} : {} frames rendues hors écran",
        backend.presented_frames()
    );
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(demo: Demo) -> EngineConfig {
        let mut config = EngineConfig::default();
        demo.configure(&mut config);
        config
    }

    fn row(backend: &HeadlessBackend, y: usize) -> String {
        let text = backend.last_cells().unwrap().to_text();
        text.lines().nth(y).unwrap_or_default().to_string()
    }

    #[test]
    fn hello_renders_text() {
        let backend = run_demo(Demo::Hello, configured(Demo::Hello), 3, 0).unwrap();
        assert_eq!(backend.presented_frames(), 3);
        assert_eq!(row(&backend, 5).trim(), "Hello, unicodegame!");
        assert_eq!(row(&backend, 7).trim(), "@");
        let pixels = backend.last_pixels().unwrap();
        assert_eq!((pixels.width, pixels.height), (800, 600));
        assert_eq!(pixels.pixel(0, 0), (20, 20, 30, 255));
        // Jambage gauche du 'H' en cellule (10, 5) : un vrai glyphe, pas une boîte.
        assert_eq!(pixels.pixel(101, 104), (0, 255, 0, 255));
        assert_eq!(pixels.pixel(104, 104), (20, 20, 30, 255));
    }

    #[test]
    fn effects_script_spawns_particles() {
        let backend = run_demo(Demo::Effects, configured(Demo::Effects), 5, 9).unwrap();
        assert_eq!(row(&backend, 28).trim(), "Particles: 10");
    }

    #[test]
    fn same_seed_same_frame() {
        let a = run_demo(Demo::Effects, configured(Demo::Effects), 20, 5).unwrap();
        let b = run_demo(Demo::Effects, configured(Demo::Effects), 20, 5).unwrap();
        assert_eq!(a.last_pixels(), b.last_pixels());
    }

    #[test]
    fn wedges_use_the_requested_font() {
        let config = configured(Demo::Wedges).with_font("6x13");
        let backend = run_demo(Demo::Wedges, config, 1, 0).unwrap();
        let pixels = backend.last_pixels().unwrap();
        assert_eq!((pixels.width, pixels.height), (480, 520));
        assert_eq!(row(&backend, 38).trim(), "Press Q to quit");
    }
}
