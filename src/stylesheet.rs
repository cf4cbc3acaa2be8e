//! Stylesheet system for the diagram's role palette
//!
//! Nodes and edges ask for symbolic color tokens (`assembler-fill`,
//! `edge-advisory`, ...) which a stylesheet maps to concrete colors. A custom
//! TOML stylesheet only needs the tokens it overrides.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A stylesheet mapping symbolic colors to concrete values
#[derive(Debug, Clone)]
pub struct Stylesheet {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Color mappings: token name -> color
    pub colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Default palette: orange consultant, slate suppliers, green assembler,
/// blue distributor, violet end user
const DEFAULT_PALETTE: &str = r##"
[colors]
consultant-fill = "#fb923c"
consultant-stroke = "#ea580c"
consultant-text = "#ffffff"

supplier-fill = "#f8fafc"
supplier-stroke = "#94a3b8"
supplier-text = "#1f2937"
supplier-subtext = "#4b5563"

assembler-fill = "#10b981"
assembler-stroke = "#047857"
assembler-text = "#ffffff"

distributor-fill = "#3b82f6"
distributor-stroke = "#1d4ed8"
distributor-text = "#ffffff"

end-user-fill = "#8b5cf6"
end-user-stroke = "#7c3aed"
end-user-text = "#ffffff"

edge-advisory = "#fb923c"
edge-flow = "#ea580c"
edge-label = "#4b5563"

background = "#ffffff"
tier-label = "#6b7280"
legend-text = "#4b5563"
"##;

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load stylesheet from TOML string
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        Ok(Stylesheet {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors: parsed.colors,
        })
    }

    /// Resolve a symbolic color token to a concrete value
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a token, falling back to the default palette and then to a
    /// neutral color chosen by the token suffix
    pub fn resolve_or_default(&self, token: &str) -> String {
        if let Some(color) = self.resolve(token) {
            return color.to_string();
        }

        let default = Self::default();
        if let Some(color) = default.resolve(token) {
            return color.to_string();
        }

        if token.ends_with("-fill") {
            return "#f8fafc".to_string();
        }
        if token.ends_with("-stroke") {
            return "#94a3b8".to_string();
        }
        if token.starts_with("edge") {
            return "#ea580c".to_string();
        }

        "#333333".to_string()
    }

    /// Fill, stroke and text colors for a node role
    pub fn role_colors(&self, role: &str) -> RoleColors {
        RoleColors {
            fill: self.resolve_or_default(&format!("{}-fill", role)),
            stroke: self.resolve_or_default(&format!("{}-stroke", role)),
            text: self.resolve_or_default(&format!("{}-text", role)),
        }
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::from_str(DEFAULT_PALETTE).expect("Default palette should be valid TOML")
    }
}

/// Resolved colors for one node role
#[derive(Debug, Clone, PartialEq)]
pub struct RoleColors {
    pub fill: String,
    pub stroke: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> Stylesheet {
        Stylesheet {
            name: None,
            description: None,
            colors: HashMap::new(),
        }
    }

    #[test]
    fn test_default_palette_covers_roles() {
        let stylesheet = Stylesheet::default();
        for role in ["consultant", "supplier", "assembler", "distributor", "end-user"] {
            assert!(stylesheet.resolve(&format!("{}-fill", role)).is_some(), "{}", role);
            assert!(stylesheet.resolve(&format!("{}-stroke", role)).is_some(), "{}", role);
        }
    }

    #[test]
    fn test_role_colors() {
        let colors = Stylesheet::default().role_colors("assembler");
        assert_eq!(colors.fill, "#10b981");
        assert_eq!(colors.stroke, "#047857");
        assert_eq!(colors.text, "#ffffff");
    }

    #[test]
    fn test_resolve_or_default_fallback() {
        assert_eq!(empty().resolve_or_default("edge-advisory"), "#fb923c");
        assert_eq!(empty().resolve_or_default("mystery-fill"), "#f8fafc");
        assert_eq!(empty().resolve_or_default("mystery"), "#333333");
    }

    #[test]
    fn test_partial_override() {
        let toml_str = r##"
[metadata]
name = "Night"

[colors]
distributor-fill = "#0f172a"
"##;
        let stylesheet = Stylesheet::from_str(toml_str).expect("Should parse");
        assert_eq!(stylesheet.name, Some("Night".to_string()));
        let colors = stylesheet.role_colors("distributor");
        assert_eq!(colors.fill, "#0f172a");
        assert_eq!(colors.stroke, "#1d4ed8");
    }

    #[test]
    fn test_metadata_only() {
        let stylesheet = Stylesheet::from_str("[metadata]\nname = \"x\"\n").expect("Should parse");
        assert!(stylesheet.colors.is_empty());
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = Stylesheet::from_str("this is not valid toml {{{{");
        assert!(matches!(result, Err(StylesheetError::ParseError(_))));
    }
}
