use wave_core::run_history;

/// Process-wide settings resolved once at startup.
pub struct AppContext {
    pub run_history_enabled: bool,
}

impl AppContext {
    pub fn load() -> Self {
        Self {
            run_history_enabled: run_history::history_enabled(),
        }
    }
}
