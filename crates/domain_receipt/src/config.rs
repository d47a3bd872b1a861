//! Runtime configuration for the receipt service

use serde::Deserialize;

use crate::render::{RenderOptions, DEFAULT_LINE_LENGTH};

/// Receipt service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReceiptConfig {
    /// Shop name printed at the top of every text receipt
    pub shop_name: String,
    /// Default width of rendered receipt lines
    pub line_length: usize,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            shop_name: "ФОП Джонсонюк Борис".to_string(),
            line_length: DEFAULT_LINE_LENGTH,
        }
    }
}

impl ReceiptConfig {
    /// Loads configuration from `RECEIPT_`-prefixed environment variables,
    /// falling back to defaults for anything unset
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("shop_name", defaults.shop_name)?
            .set_default("line_length", defaults.line_length as i64)?
            .add_source(config::Environment::with_prefix("RECEIPT"))
            .build()?
            .try_deserialize()
    }

    /// Render options derived from this configuration
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            shop_name: self.shop_name.clone(),
            line_length: self.line_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_render_defaults() {
        let config = ReceiptConfig::default();
        assert_eq!(config.line_length, DEFAULT_LINE_LENGTH);

        let options = config.render_options();
        assert_eq!(options.shop_name, config.shop_name);
        assert_eq!(options.line_length, config.line_length);
    }
}
