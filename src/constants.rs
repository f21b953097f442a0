// Constants module - centralized default values for configuration

// =============================================================================
// Generator defaults
// =============================================================================

/// Default generative API endpoint
pub const DEFAULT_GENERATOR_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default image model
pub const DEFAULT_GENERATOR_MODEL: &str = "gemini-2.5-flash-image";

/// Default output aspect ratio requested from the model
pub const DEFAULT_ASPECT_RATIO: &str = "16:9";

/// Environment variable read for the API key when no config file is given
pub const API_KEY_ENV: &str = "API_KEY";

// =============================================================================
// Watermark defaults
// =============================================================================

/// Default surface budget in pixels (100 megapixels)
pub const DEFAULT_MAX_PIXELS: u64 = 100_000_000;

// =============================================================================
// Share / output defaults
// =============================================================================

/// Public URL of the application, appended to share links
pub const DEFAULT_APP_URL: &str = "https://tifomaster.app";

/// Default directory for saved tifos
pub const DEFAULT_OUTPUT_DIR: &str = ".";

// =============================================================================
// Logging defaults
// =============================================================================

/// Default log level when RUST_LOG is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// User-facing messages
// =============================================================================

/// Shown for every failed generation, whatever the cause
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Désolé, une erreur est survenue lors de la création de votre Tifo. Veuillez réessayer.";
