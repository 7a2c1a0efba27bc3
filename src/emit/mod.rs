pub mod json;
pub mod markdown;
pub mod sink;
pub(crate) mod util;
pub mod yaml;

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::export::document::ExportDocument;

/// Output formats for an export document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
    Markdown,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Markdown => "md",
        }
    }

    /// Serialize `document` in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render(self, document: &ExportDocument) -> Result<String> {
        match self {
            Self::Json => json::emit_json(document),
            Self::Yaml => yaml::emit_yaml(document),
            Self::Markdown => markdown::emit_markdown(document),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(Error::UnknownOption {
                option: "format",
                value: other.to_owned(),
                expected: "json, yaml, markdown",
            }),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_documents;
