use std::collections::VecDeque;
use std::time::Instant;

/// Compteur FPS par fenêtre glissante, pour la barre de statut.
///
/// # Example
/// ```
/// use ug_term::fps::FpsCounter;
/// let mut counter = FpsCounter::new(60);
/// counter.tick();
/// assert!(counter.fps().abs() < f64::EPSILON);
/// ```
pub struct FpsCounter {
    /// Timestamps des dernières N frames.
    timestamps: VecDeque<Instant>,
    window: usize,
    fps: f64,
    /// Durée de la dernière frame en ms.
    pub frame_time_ms: f64,
}

impl FpsCounter {
    /// Compteur moyenné sur `window` frames (au moins 2).
    #[must_use]
    pub fn new(window: usize) -> Self {
        let window = window.max(2);
        Self {
            timestamps: VecDeque::with_capacity(window + 1),
            window,
            fps: 0.0,
            frame_time_ms: 0.0,
        }
    }

    /// Appeler une fois par frame présentée.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        if let Some(&last) = self.timestamps.back() {
            self.frame_time_ms = now.duration_since(last).as_secs_f64() * 1000.0;
        }
        self.timestamps.push_back(now);
        if self.timestamps.len() > self.window {
            self.timestamps.pop_front();
        }
        if let Some(&first) = self.timestamps.front() {
            let secs = now.duration_since(first).as_secs_f64();
            if self.timestamps.len() >= 2 && secs > 0.0 {
                self.fps = (self.timestamps.len() - 1) as f64 / secs;
            }
        }
    }

    /// FPS moyen sur la fenêtre.
    #[must_use]
    pub fn fps(&self) -> f64 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn steady_ticks_average() {
        let mut counter = FpsCounter::new(4);
        let start = Instant::now();
        for i in 0..10 {
            counter.tick_at(start + Duration::from_millis(20 * i));
        }
        assert!((counter.fps() - 50.0).abs() < 0.01);
        assert!((counter.frame_time_ms - 20.0).abs() < 0.01);
    }

    #[test]
    fn window_only_keeps_recent_frames() {
        let mut counter = FpsCounter::new(3);
        let start = Instant::now();
        counter.tick_at(start);
        counter.tick_at(start + Duration::from_secs(1));
        // Deux frames rapides : l'ancienne frame lente sort de la fenêtre.
        counter.tick_at(start + Duration::from_millis(1100));
        counter.tick_at(start + Duration::from_millis(1200));
        assert!((counter.fps() - 10.0).abs() < 0.01);
    }
}
