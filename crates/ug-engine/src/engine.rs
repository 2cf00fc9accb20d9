use std::sync::Arc;

use anyhow::Result;
use arc_swap::ArcSwap;
use ug_core::clock::FrameClock;
use ug_core::config::EngineConfig;
use ug_core::grid::CellGrid;
use ug_core::input::{InputEvent, Key};
use ug_core::surface::Surface;
use ug_core::traits::{Backend, Frame};
use ug_core::CoreError;
use ug_font::{Font, FontRegistry};

use crate::compositor::composite;
use crate::error::EngineError;
use crate::window::{Window, WindowOptions};

/// Nom de la fenêtre créée par [`Engine::init`].
pub const ROOT_WINDOW: &str = "root";

/// Callbacks du jeu, appelés par [`Engine::run`]. Tous optionnels.
///
/// # Example
/// ```
/// use ug_engine::{Engine, Game, HeadlessBackend};
/// use ug_core::{EngineConfig, FrameClock};
///
/// struct Hello;
/// impl Game for Hello {
///     fn render(&mut self, engine: &mut Engine) {
///         if let Ok(root) = engine.root_mut() {
///             root.put_string(0, 0, "hi", (255, 255, 255), None);
///         }
///     }
/// }
///
/// let mut engine = Engine::init(EngineConfig::new("doc", 4, 1)).unwrap();
/// engine.set_clock(FrameClock::fixed(1.0 / 60.0));
/// let mut backend = HeadlessBackend::new(40, 20).with_frame_limit(1);
/// engine.run(&mut backend, &mut Hello).unwrap();
/// assert_eq!(backend.last_cells().unwrap().to_text(), "hi");
/// ```
pub trait Game {
    /// Une fois par frame, avant le rendu. `dt` en secondes.
    fn update(&mut self, _engine: &mut Engine, _dt: f32) {}

    /// Dessin dans les fenêtres, déjà vidées à leur fond.
    fn render(&mut self, _engine: &mut Engine) {}

    /// Touche pressée (hors Échap et Alt+Entrée, gérées par le moteur).
    fn on_key(&mut self, _engine: &mut Engine, _key: Key) {}
}

/// État du moteur : fenêtres, polices, surface de rendu, horloge.
///
/// # Example
/// ```
/// use ug_engine::Engine;
/// use ug_core::EngineConfig;
/// let engine = Engine::init(EngineConfig::new("My Game", 80, 30).with_bg((20, 20, 30, 255))).unwrap();
/// assert_eq!(engine.root_cell_size(), (10, 20));
/// assert_eq!(engine.render_surface().width, 800);
/// assert_eq!(engine.root().unwrap().bg(), (20, 20, 30, 255));
/// ```
pub struct Engine {
    config: Arc<ArcSwap<EngineConfig>>,
    fonts: FontRegistry,
    root_font: String,
    windows: Vec<Window>,
    root_cell: (u32, u32),
    render_surface: Surface,
    cell_grid: CellGrid,
    clock: FrameClock,
    running: bool,
    fullscreen: bool,
    frame_count: u64,
}

impl Engine {
    /// Initialise le moteur et crée la fenêtre `"root"`.
    ///
    /// # Arguments
    /// * `config` - title, grid size in root cells, root bg and font
    ///
    /// # Returns
    /// An engine whose render surface is `width*cell_w × height*cell_h`,
    /// grid size and fps first clamped by [`EngineConfig::clamp_all`].
    ///
    /// # Errors
    /// [`EngineError::Font`] if the root font cannot be loaded,
    /// [`EngineError::Core`] for a zero-sized grid.
    pub fn init(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_shared_config(Arc::new(ArcSwap::from_pointee(config)))
    }

    /// Comme [`Engine::init`], avec une config partagée (hot-reload).
    ///
    /// # Errors
    /// Same as [`Engine::init`].
    pub fn with_shared_config(config: Arc<ArcSwap<EngineConfig>>) -> Result<Self, EngineError> {
        let loaded = config.load_full();
        if loaded.width == 0 || loaded.height == 0 {
            return Err(CoreError::InvalidDimensions {
                width: loaded.width,
                height: loaded.height,
            }
            .into());
        }
        // Grille et fps bornés avant tout calcul de taille en pixels.
        let mut clamped = (*loaded).clone();
        clamped.clamp_all();
        if clamped != *loaded {
            log::warn!(
                "Config hors bornes : grille {}x{} -> {}x{}, fps {} -> {}",
                loaded.width,
                loaded.height,
                clamped.width,
                clamped.height,
                loaded.target_fps,
                clamped.target_fps
            );
            config.store(Arc::new(clamped));
        }
        let current = config.load_full();

        let mut fonts = FontRegistry::new(&current.font_dir, current.builtin_fallback);
        let font = fonts.load(&current.font)?;
        let (cell_w, cell_h) = font.cell_size();
        let (Some(pixel_w), Some(pixel_h)) = (
            current.width.checked_mul(cell_w),
            current.height.checked_mul(cell_h),
        ) else {
            return Err(CoreError::InvalidDimensions {
                width: current.width,
                height: current.height,
            }
            .into());
        };
        log::info!(
            "Init {:?} : {}x{} cellules, {pixel_w}x{pixel_h} px, police {}",
            current.title,
            current.width,
            current.height,
            current.font
        );

        let mut engine = Self {
            clock: FrameClock::new(current.target_fps),
            fonts,
            root_font: current.font.clone(),
            windows: Vec::new(),
            root_cell: (cell_w, cell_h),
            render_surface: Surface::filled(pixel_w, pixel_h, (0, 0, 0, 255)),
            cell_grid: CellGrid::new(current.width, current.height),
            running: false,
            fullscreen: false,
            frame_count: 0,
            config,
        };
        engine.create_window(
            ROOT_WINDOW,
            0,
            0,
            current.width,
            current.height,
            WindowOptions {
                bg: current.bg,
                ..WindowOptions::default()
            },
        )?;
        Ok(engine)
    }

    /// Config partagée ; un `store` est pris en compte à la frame suivante
    /// (`target_fps` ; titre et présentation côté backend).
    #[must_use]
    pub fn shared_config(&self) -> Arc<ArcSwap<EngineConfig>> {
        Arc::clone(&self.config)
    }

    /// Instantané de la config courante.
    #[must_use]
    pub fn config(&self) -> Arc<EngineConfig> {
        self.config.load_full()
    }

    /// Remplace l'horloge. Une horloge fixe n'est plus recalée sur `target_fps`.
    pub fn set_clock(&mut self, clock: FrameClock) {
        self.clock = clock;
    }

    /// Charge une police par nom (cache partagé entre fenêtres).
    ///
    /// # Errors
    /// [`EngineError::Font`] if the font is unknown or unreadable.
    pub fn load_font(&mut self, name: &str) -> Result<Arc<Font>, EngineError> {
        Ok(self.fonts.load(name)?)
    }

    /// Enregistre une police construite à la main sous `name`.
    pub fn register_font(&mut self, name: &str, font: Font) -> Arc<Font> {
        self.fonts.insert(name, font)
    }

    // === Fenêtres ===

    /// Crée (ou remplace, à la même place) la fenêtre `name`.
    ///
    /// # Arguments
    /// * `name` - unique window name
    /// * `x`, `y` - position in root cells
    /// * `width`, `height` - size in this window's cells
    /// * `options` - z-index, font, scale, alpha, background
    ///
    /// # Returns
    /// The new window.
    ///
    /// # Errors
    /// [`EngineError::Font`] for an unknown font, [`EngineError::Core`] for
    /// an invalid scale or a zero size.
    ///
    /// # Example
    /// ```
    /// use ug_engine::{Engine, WindowOptions};
    /// use ug_core::EngineConfig;
    /// let mut engine = Engine::init(EngineConfig::new("doc", 80, 30)).unwrap();
    /// let fg = engine
    ///     .create_window("fg", 0, 0, 80, 30, WindowOptions {
    ///         z_index: 10,
    ///         font_name: Some("6x13".into()),
    ///         ..Default::default()
    ///     })
    ///     .unwrap();
    /// assert_eq!(fg.cell_size(), (6, 13));
    /// assert!(engine.get_window("fg").is_ok());
    /// ```
    pub fn create_window(
        &mut self,
        name: &str,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        options: WindowOptions,
    ) -> Result<&mut Window, EngineError> {
        let font_name = options.font_name.as_deref().unwrap_or(&self.root_font);
        let font = self.fonts.load(font_name)?;
        let window = Window::new(name, (x, y), (width, height), font, &options)?;
        let index = match self.windows.iter().position(|w| w.name() == name) {
            Some(index) => {
                log::debug!("Fenêtre {name} remplacée");
                self.windows[index] = window;
                index
            }
            None => {
                self.windows.push(window);
                self.windows.len() - 1
            }
        };
        Ok(&mut self.windows[index])
    }

    /// Fenêtre par nom.
    ///
    /// # Errors
    /// [`EngineError::UnknownWindow`] if no window has that name.
    pub fn get_window(&self, name: &str) -> Result<&Window, EngineError> {
        self.windows
            .iter()
            .find(|w| w.name() == name)
            .ok_or_else(|| EngineError::UnknownWindow(name.to_string()))
    }

    /// Fenêtre par nom, mutable.
    ///
    /// # Errors
    /// [`EngineError::UnknownWindow`] if no window has that name.
    pub fn get_window_mut(&mut self, name: &str) -> Result<&mut Window, EngineError> {
        self.windows
            .iter_mut()
            .find(|w| w.name() == name)
            .ok_or_else(|| EngineError::UnknownWindow(name.to_string()))
    }

    /// Retire une fenêtre. Nom inconnu → rien.
    pub fn remove_window(&mut self, name: &str) {
        self.windows.retain(|w| w.name() != name);
    }

    /// Noms des fenêtres, dans l'ordre de création.
    pub fn window_names(&self) -> impl Iterator<Item = &str> {
        self.windows.iter().map(Window::name)
    }

    /// La fenêtre `"root"`.
    ///
    /// # Errors
    /// [`EngineError::UnknownWindow`] if it was removed.
    pub fn root(&self) -> Result<&Window, EngineError> {
        self.get_window(ROOT_WINDOW)
    }

    /// La fenêtre `"root"`, mutable.
    ///
    /// # Errors
    /// [`EngineError::UnknownWindow`] if it was removed.
    pub fn root_mut(&mut self) -> Result<&mut Window, EngineError> {
        self.get_window_mut(ROOT_WINDOW)
    }

    // === Boucle ===

    /// Boucle principale, jusqu'à `quit()`, Échap ou fermeture du backend.
    ///
    /// Par frame : tick d'horloge, événements, `update`, vidage des
    /// fenêtres, `render`, composition, `present`. Alt+Entrée bascule le
    /// plein écran ; le plein écran est annulé en sortie.
    ///
    /// # Errors
    /// Propagates backend errors (input, display, fullscreen switch).
    pub fn run<B, G>(&mut self, backend: &mut B, game: &mut G) -> Result<()>
    where
        B: Backend + ?Sized,
        G: Game + ?Sized,
    {
        self.running = true;
        log::info!("Boucle démarrée");
        while self.running {
            if !self.clock.is_fixed() {
                let fps = self.config.load().target_fps;
                if fps != self.clock.target_fps() {
                    log::info!("FPS cible : {fps}");
                    self.clock.set_target_fps(fps);
                }
            }
            let dt = self.clock.tick();

            for event in backend.poll_events()? {
                match event {
                    InputEvent::Quit
                    | InputEvent::Key {
                        key: Key::Escape, ..
                    } => self.running = false,
                    InputEvent::Key {
                        key: Key::Enter,
                        modifiers,
                    } if modifiers.alt => self.toggle_fullscreen(backend)?,
                    InputEvent::Key { key, .. } => game.on_key(self, key),
                    InputEvent::Resize(w, h) => log::debug!("Affichage redimensionné : {w}x{h}"),
                }
            }

            game.update(self, dt);
            for window in &mut self.windows {
                window.clear();
            }
            game.render(self);
            self.composite();

            let config = self.config.load();
            backend.present(&Frame {
                pixels: &self.render_surface,
                cells: &self.cell_grid,
                fullscreen: self.fullscreen,
                title: &config.title,
            })?;
            self.frame_count += 1;
        }

        if self.fullscreen {
            self.fullscreen = false;
            backend.set_fullscreen(false)?;
        }
        log::info!("Boucle terminée après {} frames", self.frame_count);
        Ok(())
    }

    /// Arrête la boucle à la fin de la frame courante.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Bascule plein écran / fenêtré et prévient le backend.
    ///
    /// # Errors
    /// Propagates the backend error if the mode cannot be changed.
    pub fn toggle_fullscreen<B: Backend + ?Sized>(&mut self, backend: &mut B) -> Result<()> {
        self.fullscreen = !self.fullscreen;
        log::info!("Plein écran : {}", self.fullscreen);
        backend.set_fullscreen(self.fullscreen)
    }

    /// Compose les fenêtres dans la surface de rendu et la grille racine.
    pub fn composite(&mut self) {
        composite(
            &self.windows,
            self.root_cell,
            &mut self.render_surface,
            &mut self.cell_grid,
        );
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames présentées depuis la création.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Dernière frame composée, résolution native.
    #[must_use]
    pub fn render_surface(&self) -> &Surface {
        &self.render_surface
    }

    /// Dernière frame composée, une cellule par cellule racine.
    #[must_use]
    pub fn cell_grid(&self) -> &CellGrid {
        &self.cell_grid
    }

    /// Taille en pixels d'une cellule de la police racine.
    #[must_use]
    pub fn root_cell_size(&self) -> (u32, u32) {
        self.root_cell
    }
}
