//! Chat Scaffold Core - questionnaire library for the create-chat-app CLI
//!
//! This library resolves the configuration record a new chat-app scaffold is
//! generated from. It is organized around one operation,
//! [`resolve_config`], a sequential chain of decision steps over a small set
//! of mutually dependent options. Each step honors three precedence tiers:
//!
//! 1. a field already set on entry is skipped,
//! 2. in CI the stored preference (or global default) is taken silently,
//! 3. otherwise the user is prompted and the answer is mirrored into the
//!    preferences record for future runs.
//!
//! The terminal is reached only through the [`prompts::Prompter`] capability
//! trait and the environment only through an injected
//! [`context::ResolveContext`], so the whole flow can be driven by scripted
//! fakes in tests.

pub mod community;
pub mod config;
pub mod context;
pub mod prompts;
pub mod questions;

// Re-export main types for convenience
pub use community::{CommunitySource, GithubSource, COMMUNITY_OWNER, COMMUNITY_REPO};
pub use config::{Engine, Framework, InstallConfig, Model, Template, Ui};
pub use context::{is_ci, ResolveContext};
pub use prompts::{PromptError, Prompter, TerminalPrompter};
pub use questions::resolve_config;
