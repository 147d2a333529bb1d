//! The configuration record collected by the questionnaire

use serde::{Deserialize, Serialize};
use std::fmt;

/// Project archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    Simple,
    Streaming,
    Community,
}

impl Template {
    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Simple => "simple",
            Template::Streaming => "streaming",
            Template::Community => "community",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "simple" => Some(Template::Simple),
            "streaming" => Some(Template::Streaming),
            "community" => Some(Template::Community),
            _ => None,
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Backend/full-stack technology choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Nextjs,
    Express,
    Fastapi,
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Nextjs => "nextjs",
            Framework::Express => "express",
            Framework::Fastapi => "fastapi",
        }
    }

    /// Human-readable name used in prompt messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Framework::Nextjs => "NextJS",
            Framework::Express => "Express",
            Framework::Fastapi => "FastAPI (Python)",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "nextjs" => Some(Framework::Nextjs),
            "express" => Some(Framework::Express),
            "fastapi" => Some(Framework::Fastapi),
            _ => None,
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Frontend UI flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Ui {
    Html,
    Shadcn,
}

impl Ui {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ui::Html => "html",
            Ui::Shadcn => "shadcn",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "html" => Some(Ui::Html),
            "shadcn" => Some(Ui::Shadcn),
            _ => None,
        }
    }
}

impl fmt::Display for Ui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// OpenAI model used by the generated app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Model {
    #[serde(rename = "gpt-3.5-turbo")]
    #[value(name = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[serde(rename = "gpt-4")]
    #[value(name = "gpt-4")]
    Gpt4,
    #[serde(rename = "gpt-4-1106-preview")]
    #[value(name = "gpt-4-1106-preview")]
    Gpt4Preview,
    #[serde(rename = "gpt-4-vision-preview")]
    #[value(name = "gpt-4-vision-preview")]
    Gpt4Vision,
}

impl Model {
    pub fn as_str(&self) -> &'static str {
        match self {
            Model::Gpt35Turbo => "gpt-3.5-turbo",
            Model::Gpt4 => "gpt-4",
            Model::Gpt4Preview => "gpt-4-1106-preview",
            Model::Gpt4Vision => "gpt-4-vision-preview",
        }
    }

    pub const ALL: [Model; 4] = [
        Model::Gpt35Turbo,
        Model::Gpt4,
        Model::Gpt4Preview,
        Model::Gpt4Vision,
    ];

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == value)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Chat-processing strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Context,
    Simple,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Context => "context",
            Engine::Simple => "simple",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "context" => Some(Engine::Context),
            "simple" => Some(Engine::Simple),
            _ => None,
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The configuration record the questionnaire fills in.
///
/// `None` means "not yet resolved". The same type holds the prior-session
/// preferences, which are updated in lockstep whenever a field is answered
/// interactively and serve as the defaults for non-interactive runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstallConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,

    /// Folder name inside the community repository; only resolved when
    /// `template` is `Community`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_project_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<Framework>,

    /// Whether to generate a NextJS frontend next to a backend-only framework
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<Ui>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<Model>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<Engine>,

    /// May legitimately be empty (user skipped the key prompt)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eslint: Option<bool>,
}

/// Global fallbacks used by the non-interactive path when the preference for
/// a field is also unset
pub mod defaults {
    use super::{Engine, Framework, Model, Template, Ui};

    pub const TEMPLATE: Template = Template::Streaming;
    pub const FRAMEWORK: Framework = Framework::Nextjs;
    pub const ENGINE: Engine = Engine::Simple;
    pub const UI: Ui = Ui::Html;
    pub const ESLINT: bool = true;
    pub const FRONTEND: bool = false;
    pub const MODEL: Model = Model::Gpt35Turbo;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_serde_names() {
        let json = serde_json::to_string(&Model::Gpt4Preview).unwrap();
        assert_eq!(json, "\"gpt-4-1106-preview\"");
        let back: Model = serde_json::from_str("\"gpt-3.5-turbo\"").unwrap();
        assert_eq!(back, Model::Gpt35Turbo);
    }

    #[test]
    fn test_empty_record_serializes_empty() {
        let json = serde_json::to_string(&InstallConfig::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_record_roundtrip() {
        let config = InstallConfig {
            template: Some(Template::Streaming),
            framework: Some(Framework::Express),
            frontend: Some(true),
            ui: Some(Ui::Shadcn),
            model: Some(Model::Gpt4),
            engine: Some(Engine::Context),
            openai_key: Some("sk-test".to_string()),
            eslint: Some(false),
            community_project_path: None,
        };

        let json = serde_json::to_string(&config).unwrap();
        let back: InstallConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_unknown_fields_tolerated() {
        // Preferences written by an older or newer build should still load
        let back: InstallConfig =
            serde_json::from_str(r#"{"template":"simple","packageManager":"npm"}"#).unwrap();
        assert_eq!(back.template, Some(Template::Simple));
        assert_eq!(back.framework, None);
    }
}
