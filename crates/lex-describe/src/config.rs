//! Configuration for the data analyzer.
//!
//! Defaults reproduce the classic report layout: metadata keyed by a `Row`
//! column, descriptions read from `Description`, and percentages rounded to
//! two decimals.

use serde::{Deserialize, Serialize};

/// Default name of the metadata column holding variable names.
pub const DEFAULT_METADATA_KEY_COLUMN: &str = "Row";

/// Default name of the metadata column holding descriptions.
pub const DEFAULT_METADATA_DESCRIPTION_COLUMN: &str = "Description";

/// Returned by description lookups when no metadata table was supplied.
pub const DEFAULT_NO_METADATA_TEXT: &str = "No metadata available";

/// Returned by description lookups when a variable has no metadata row.
pub const DEFAULT_DESCRIPTION_NOT_FOUND_TEXT: &str = "Description not found";

/// Label used for the missing-value bucket in distribution strings.
pub const DEFAULT_MISSING_LABEL: &str = "missing";

const MAX_PERCENTAGE_DECIMALS: u32 = 10;

/// Configuration for [`DataAnalyzer`](crate::DataAnalyzer).
///
/// Use [`AnalyzerConfig::builder()`] for a validated configuration.
///
/// # Example
///
/// ```rust,ignore
/// use lex_describe::AnalyzerConfig;
///
/// let config = AnalyzerConfig::builder()
///     .metadata_key_column("Variable")
///     .percentage_decimals(1)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Metadata column matched against column names of the primary table.
    /// Default: "Row"
    pub metadata_key_column: String,

    /// Metadata column holding the description text.
    /// Default: "Description"
    pub metadata_description_column: String,

    /// Positional field used for descriptions when the named description
    /// column is absent. `None` makes the named column mandatory.
    /// Default: Some(3) (the 4th field)
    pub description_fallback_index: Option<usize>,

    /// Text returned when no metadata table was supplied.
    pub no_metadata_text: String,

    /// Text returned when a variable has no metadata entry.
    pub description_not_found_text: String,

    /// Label of the missing-value bucket in distribution strings.
    /// Default: "missing"
    pub missing_label: String,

    /// Decimal places kept for every percentage.
    /// Default: 2
    pub percentage_decimals: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            metadata_key_column: DEFAULT_METADATA_KEY_COLUMN.to_string(),
            metadata_description_column: DEFAULT_METADATA_DESCRIPTION_COLUMN.to_string(),
            description_fallback_index: Some(3),
            no_metadata_text: DEFAULT_NO_METADATA_TEXT.to_string(),
            description_not_found_text: DEFAULT_DESCRIPTION_NOT_FOUND_TEXT.to_string(),
            missing_label: DEFAULT_MISSING_LABEL.to_string(),
            percentage_decimals: 2,
        }
    }
}

impl AnalyzerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let required = [
            ("metadata_key_column", &self.metadata_key_column),
            (
                "metadata_description_column",
                &self.metadata_description_column,
            ),
            ("missing_label", &self.missing_label),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigValidationError::EmptyField(field.to_string()));
            }
        }

        if self.percentage_decimals > MAX_PERCENTAGE_DECIMALS {
            return Err(ConfigValidationError::InvalidDecimals(
                self.percentage_decimals,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Field '{0}' must not be empty")]
    EmptyField(String),

    #[error("Invalid percentage decimals: {0} (must be at most 10)")]
    InvalidDecimals(u32),
}

/// Builder for [`AnalyzerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalyzerConfigBuilder {
    metadata_key_column: Option<String>,
    metadata_description_column: Option<String>,
    description_fallback_index: Option<Option<usize>>,
    no_metadata_text: Option<String>,
    description_not_found_text: Option<String>,
    missing_label: Option<String>,
    percentage_decimals: Option<u32>,
}

impl AnalyzerConfigBuilder {
    /// Set the metadata column matched against variable names.
    pub fn metadata_key_column(mut self, column: impl Into<String>) -> Self {
        self.metadata_key_column = Some(column.into());
        self
    }

    /// Set the metadata column holding descriptions.
    pub fn metadata_description_column(mut self, column: impl Into<String>) -> Self {
        self.metadata_description_column = Some(column.into());
        self
    }

    /// Set the positional fallback for the description field.
    ///
    /// Pass `None` to require the named description column.
    pub fn description_fallback_index(mut self, index: Option<usize>) -> Self {
        self.description_fallback_index = Some(index);
        self
    }

    /// Set the text returned when no metadata table was supplied.
    pub fn no_metadata_text(mut self, text: impl Into<String>) -> Self {
        self.no_metadata_text = Some(text.into());
        self
    }

    /// Set the text returned for variables without a metadata entry.
    pub fn description_not_found_text(mut self, text: impl Into<String>) -> Self {
        self.description_not_found_text = Some(text.into());
        self
    }

    /// Set the label of the missing-value bucket.
    pub fn missing_label(mut self, label: impl Into<String>) -> Self {
        self.missing_label = Some(label.into());
        self
    }

    /// Set the number of decimals kept for percentages.
    pub fn percentage_decimals(mut self, decimals: u32) -> Self {
        self.percentage_decimals = Some(decimals);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalyzerConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalyzerConfig, ConfigValidationError> {
        let defaults = AnalyzerConfig::default();
        let config = AnalyzerConfig {
            metadata_key_column: self
                .metadata_key_column
                .unwrap_or(defaults.metadata_key_column),
            metadata_description_column: self
                .metadata_description_column
                .unwrap_or(defaults.metadata_description_column),
            description_fallback_index: self
                .description_fallback_index
                .unwrap_or(defaults.description_fallback_index),
            no_metadata_text: self.no_metadata_text.unwrap_or(defaults.no_metadata_text),
            description_not_found_text: self
                .description_not_found_text
                .unwrap_or(defaults.description_not_found_text),
            missing_label: self.missing_label.unwrap_or(defaults.missing_label),
            percentage_decimals: self
                .percentage_decimals
                .unwrap_or(defaults.percentage_decimals),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.metadata_key_column, "Row");
        assert_eq!(config.metadata_description_column, "Description");
        assert_eq!(config.description_fallback_index, Some(3));
        assert_eq!(config.missing_label, "missing");
        assert_eq!(config.percentage_decimals, 2);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = AnalyzerConfig::builder().build().unwrap();
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = AnalyzerConfig::builder()
            .metadata_key_column("Variable")
            .metadata_description_column("Label")
            .description_fallback_index(None)
            .no_metadata_text("Aucune metadata disponible.")
            .description_not_found_text("Description non trouvée.")
            .missing_label("NaN")
            .percentage_decimals(1)
            .build()
            .unwrap();

        assert_eq!(config.metadata_key_column, "Variable");
        assert_eq!(config.metadata_description_column, "Label");
        assert_eq!(config.description_fallback_index, None);
        assert_eq!(config.no_metadata_text, "Aucune metadata disponible.");
        assert_eq!(config.description_not_found_text, "Description non trouvée.");
        assert_eq!(config.missing_label, "NaN");
        assert_eq!(config.percentage_decimals, 1);
    }

    #[test]
    fn test_validation_empty_key_column() {
        let result = AnalyzerConfig::builder().metadata_key_column("  ").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyField(field) if field == "metadata_key_column"
        ));
    }

    #[test]
    fn test_validation_too_many_decimals() {
        let result = AnalyzerConfig::builder().percentage_decimals(11).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidDecimals(11)
        ));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "metadata_key_column": "Row",
            "metadata_description_column": "Description",
            "description_fallback_index": null,
            "no_metadata_text": "none",
            "description_not_found_text": "not found",
            "missing_label": "NA",
            "percentage_decimals": 3
        }"#;

        let config: AnalyzerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.description_fallback_index, None);
        assert_eq!(config.missing_label, "NA");
        assert_eq!(config.percentage_decimals, 3);
        assert!(config.validate().is_ok());
    }
}
