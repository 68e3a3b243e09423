//! Model value object representing an LLM model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// LLM models that can sit on a review or debate panel (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // GPT models
    Gpt5,
    Gpt5Mini,
    Gpt4o,
    // Gemini models
    Gemini3Pro,
    Gemini20FlashLite,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt5 => "gpt-5",
            Model::Gpt5Mini => "gpt-5-mini",
            Model::Gpt4o => "gpt-4o",
            Model::Gemini3Pro => "gemini-3-pro-preview",
            Model::Gemini20FlashLite => "gemini-2.0-flash-lite",
            Model::Custom(s) => s,
        }
    }

    /// Check if this is a GPT model
    pub fn is_gpt(&self) -> bool {
        match self {
            Model::Gpt5 | Model::Gpt5Mini | Model::Gpt4o => true,
            Model::Custom(s) => s.starts_with("gpt-") || s.starts_with("o1") || s.starts_with("o3"),
            _ => false,
        }
    }

    /// Check if this is a Gemini model
    pub fn is_gemini(&self) -> bool {
        match self {
            Model::Gemini3Pro | Model::Gemini20FlashLite => true,
            Model::Custom(s) => s.starts_with("gemini-"),
            _ => false,
        }
    }
}

impl Default for Model {
    /// Returns the default model (GPT-4o), used for the moderator
    fn default() -> Self {
        Model::Gpt4o
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim() {
            "gpt-5" => Model::Gpt5,
            "gpt-5-mini" => Model::Gpt5Mini,
            "gpt-4o" => Model::Gpt4o,
            "gemini-3-pro-preview" => Model::Gemini3Pro,
            "gemini-2.0-flash-lite" => Model::Gemini20FlashLite,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}
