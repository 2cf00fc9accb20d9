use std::time::{Duration, Instant};

/// Horloge de boucle de jeu.
///
/// En mode temps réel, `tick()` dort le temps nécessaire pour ne pas
/// dépasser `target_fps` puis retourne le temps écoulé depuis le tick
/// précédent, en secondes. En mode fixe, `tick()` ne dort jamais et
/// retourne toujours le même pas (exécutions headless déterministes).
///
/// # Example
/// ```
/// use ug_core::clock::FrameClock;
/// let mut clock = FrameClock::fixed(0.25);
/// assert_eq!(clock.tick(), 0.25);
/// assert_eq!(clock.tick(), 0.25);
/// ```
#[derive(Debug)]
pub struct FrameClock {
    mode: ClockMode,
    last: Option<Instant>,
    target_fps: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ClockMode {
    RealTime,
    Fixed(f32),
}

impl FrameClock {
    /// Horloge temps réel plafonnée à `target_fps` (0 = pas de plafond).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        Self {
            mode: ClockMode::RealTime,
            last: None,
            target_fps,
        }
    }

    /// Horloge à pas fixe, sans sommeil.
    #[must_use]
    pub fn fixed(dt: f32) -> Self {
        Self {
            mode: ClockMode::Fixed(dt.max(0.0)),
            last: None,
            target_fps: 0,
        }
    }

    /// Change le plafond FPS (hot-reload de la config).
    pub fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps;
    }

    /// `true` pour une horloge à pas fixe.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self.mode, ClockMode::Fixed(_))
    }

    /// Current FPS cap.
    #[must_use]
    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Avance d'une frame et retourne dt en secondes.
    ///
    /// Le premier tick temps réel retourne 0.
    pub fn tick(&mut self) -> f32 {
        match self.mode {
            ClockMode::Fixed(dt) => dt,
            ClockMode::RealTime => {
                let Some(last) = self.last else {
                    self.last = Some(Instant::now());
                    return 0.0;
                };
                if self.target_fps > 0 {
                    let budget = Duration::from_secs_f64(1.0 / f64::from(self.target_fps));
                    let elapsed = last.elapsed();
                    if elapsed < budget {
                        std::thread::sleep(budget - elapsed);
                    }
                }
                let now = Instant::now();
                let dt = now.duration_since(last).as_secs_f32();
                self.last = Some(now);
                dt
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn realtime_first_tick_is_zero() {
        let mut clock = FrameClock::new(60);
        assert_eq!(clock.tick(), 0.0);
    }

    #[test]
    fn realtime_tick_respects_cap() {
        let mut clock = FrameClock::new(100);
        clock.tick();
        let dt = clock.tick();
        // Budget de 10 ms : le sommeil garantit au moins cette durée.
        assert!(dt >= 0.0099, "dt trop court : {dt}");
    }

    #[test]
    fn fixed_never_negative() {
        let mut clock = FrameClock::fixed(-1.0);
        assert!(clock.is_fixed());
        assert!(!FrameClock::new(60).is_fixed());
        assert_eq!(clock.tick(), 0.0);
    }
}
