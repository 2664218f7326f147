//! Chronomètre utilisable en natif et dans le navigateur
//!
//! `std::time::Instant` n'est pas implémenté sur `wasm32-unknown-unknown` :
//! on y lit `Date.now()`.

use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    #[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
    started_at: std::time::Instant,
    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    started_ms: f64,
}

impl Stopwatch {
    #[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
    pub fn start() -> Self {
        Self {
            started_at: std::time::Instant::now(),
        }
    }

    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    pub fn start() -> Self {
        Self {
            started_ms: js_sys::Date::now(),
        }
    }

    #[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// L'horloge murale peut reculer : on borne à zéro
    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    pub fn elapsed(&self) -> Duration {
        let ms = (js_sys::Date::now() - self.started_ms).max(0.0);
        Duration::from_secs_f64(ms / 1000.0)
    }
}
