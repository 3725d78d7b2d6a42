use std::env;

/// Whether the process is running in a development environment.
pub fn is_development() -> bool {
    // 1. An explicit CLIPKEEPER_ENV overrides everything
    if let Ok(env_val) = env::var("CLIPKEEPER_ENV") {
        return env_val == "development";
    }
    // 2. Fall back to the compile-time debug_assertions flag
    #[cfg(debug_assertions)]
    {
        return true;
    }
    #[cfg(not(debug_assertions))]
    {
        return false;
    }
}
