//! Best-score persistence
//!
//! A single integer in LocalStorage. Older saves may hold fractional text, so
//! parsing goes through `f64` and floors.

/// Stored best score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "shj_hs";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Parse a stored value; anything unreadable or negative counts as 0
    pub fn parse(raw: &str) -> Self {
        let best = match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => v.floor() as u64,
            Ok(_) => 0,
            Err(_) => {
                log::warn!("Ignoring unreadable high score {:?}", raw);
                0
            }
        };
        Self { best }
    }

    /// Record a finished run's score; returns true if it is a new best
    pub fn submit(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::warn!("LocalStorage unavailable, high score starts at 0");
            return Self::default();
        };

        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(raw)) => {
                let hs = Self::parse(&raw);
                log::info!("Loaded high score {}", hs.best);
                hs
            }
            _ => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
        }
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if storage
                .set_item(Self::STORAGE_KEY, &self.best.to_string())
                .is_err()
            {
                log::warn!("Failed to save high score");
            } else {
                log::info!("High score saved ({})", self.best);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tolerates_fractions_and_junk() {
        assert_eq!(HighScore::parse("412").best, 412);
        assert_eq!(HighScore::parse("412.87").best, 412);
        assert_eq!(HighScore::parse(" 9 ").best, 9);
        assert_eq!(HighScore::parse("").best, 0);
        assert_eq!(HighScore::parse("abc").best, 0);
        assert_eq!(HighScore::parse("-5").best, 0);
        assert_eq!(HighScore::parse("NaN").best, 0);
    }

    #[test]
    fn test_submit_only_on_strict_improvement() {
        let mut hs = HighScore::new(100);
        assert!(!hs.submit(50));
        assert!(!hs.submit(100));
        assert_eq!(hs.best, 100);
        assert!(hs.submit(101));
        assert_eq!(hs.best, 101);
    }

    #[test]
    fn test_native_load_is_empty() {
        assert_eq!(HighScore::load(), HighScore::default());
    }
}
