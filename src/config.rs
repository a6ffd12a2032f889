//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Directory holding the serialized classifier artifacts
    pub model_dir: String,

    /// API credential for the text-generation service.
    /// Optional at startup: scoring endpoints work without it.
    pub gemini_api_key: Option<String>,

    /// Base URL of the text-generation service
    pub gemini_api_url: String,

    /// Model name used for recommendation generation
    pub gemini_model: String,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            model_dir: env::var("MODEL_DIR")
                .unwrap_or_else(|_| "models".to_string()),

            gemini_api_key: env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),

            gemini_api_url: env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string()),

            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
