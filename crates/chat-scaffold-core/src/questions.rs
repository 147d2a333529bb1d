//! The sequential configuration resolver
//!
//! Walks a fixed chain of decision steps: template -> (community branch,
//! early exit) -> framework -> frontend -> ui -> model -> engine ->
//! openai_key -> eslint. Every step follows the same precedence: an
//! already-set field is skipped, a CI environment takes the stored preference
//! (or the global default), and an interactive run prompts, writing the
//! answer into both the record and the preferences.

use crate::community::{CommunitySource, COMMUNITY_OWNER, COMMUNITY_REPO};
use crate::config::{defaults, Engine, Framework, InstallConfig, Model, Template, Ui};
use crate::context::ResolveContext;
use crate::prompts::{Prompter, SelectItem};
use anyhow::{Context, Result};
use colored::Colorize;

/// Populate every unset field of `program`.
///
/// Interactive answers are mirrored into `preferences`; CI fallbacks are not.
/// A cancelled prompt surfaces as [`crate::prompts::PromptError::Cancelled`]
/// inside the error chain, and errors from the community listing propagate
/// untouched.
pub async fn resolve_config<P: Prompter, S: CommunitySource>(
    program: &mut InstallConfig,
    preferences: &mut InstallConfig,
    ctx: &ResolveContext,
    prompter: &mut P,
    community: &S,
) -> Result<()> {
    if program.template.is_none() {
        if ctx.is_ci() {
            program.template = Some(preferences.template.unwrap_or(defaults::TEMPLATE));
        } else {
            let repo_url = format!("https://github.com/{}/{}", COMMUNITY_OWNER, COMMUNITY_REPO);
            let items = [
                SelectItem::new("simple", "Chat without streaming"),
                SelectItem::new("streaming", "Chat with streaming"),
                SelectItem::new(
                    "community",
                    format!("Community template from {}", repo_url.blue()),
                ),
            ];
            let value = prompter.select("Which template would you like to use?", &items, 1)?;
            let template =
                Template::from_value(&value).context("Unexpected template selection")?;
            program.template = Some(template);
            preferences.template = Some(template);
        }
    }

    if program.template == Some(Template::Community) {
        let folders = community.list_root_folders().await?;
        let items: Vec<SelectItem> = folders
            .iter()
            .map(|name| SelectItem::new(name, name))
            .collect();
        let path = prompter.select("Select community template", &items, 0)?;
        program.community_project_path = Some(path.clone());
        preferences.community_project_path = Some(path);
        // community projects come fully assembled, nothing left to ask
        return Ok(());
    }

    if program.framework.is_none() {
        if ctx.is_ci() {
            program.framework = Some(preferences.framework.unwrap_or(defaults::FRAMEWORK));
        } else {
            let mut items = vec![
                SelectItem::new("express", "Express"),
                SelectItem::new("fastapi", "FastAPI (Python)"),
            ];
            if program.template == Some(Template::Streaming) {
                // NextJS is only compatible with the streaming template
                items.insert(0, SelectItem::new("nextjs", "NextJS"));
            }
            let value = prompter.select("Which framework would you like to use?", &items, 0)?;
            let framework =
                Framework::from_value(&value).context("Unexpected framework selection")?;
            program.framework = Some(framework);
            preferences.framework = Some(framework);
        }
    }

    if let Some(backend @ (Framework::Express | Framework::Fastapi)) = program.framework {
        if ctx.no_frontend {
            program.frontend = Some(false);
        }
        // backend-only framework: ask whether to generate a frontend
        if program.frontend.is_none() {
            if ctx.is_ci() {
                program.frontend = Some(preferences.frontend.unwrap_or(defaults::FRONTEND));
            } else {
                let message = format!(
                    "Would you like to generate a {} frontend for your {}backend?",
                    "NextJS".blue(),
                    format!("{} ", backend.display_name()).green(),
                );
                let initial = preferences.frontend.unwrap_or(defaults::FRONTEND);
                let frontend = prompter.toggle(&message, initial)?;
                program.frontend = Some(frontend);
                preferences.frontend = Some(frontend);
            }
        }
    } else if program.frontend.is_none() {
        // NextJS is a single full-stack project
        program.frontend = Some(false);
    }

    if (program.framework == Some(Framework::Nextjs) || program.frontend == Some(true))
        && program.ui.is_none()
    {
        if ctx.is_ci() {
            program.ui = Some(preferences.ui.unwrap_or(defaults::UI));
        } else {
            let items = [
                SelectItem::new("html", "Just HTML"),
                SelectItem::new("shadcn", "Shadcn"),
            ];
            let value = prompter.select("Which UI would you like to use?", &items, 0)?;
            let ui = Ui::from_value(&value).context("Unexpected UI selection")?;
            program.ui = Some(ui);
            preferences.ui = Some(ui);
        }
    }

    if matches!(
        program.framework,
        Some(Framework::Express | Framework::Nextjs)
    ) && program.model.is_none()
    {
        if ctx.is_ci() {
            program.model = Some(preferences.model.unwrap_or(defaults::MODEL));
        } else {
            let items: Vec<SelectItem> = Model::ALL
                .iter()
                .map(|m| SelectItem::new(m.as_str(), m.as_str()))
                .collect();
            let value = prompter.select("Which model would you like to use?", &items, 0)?;
            let model = Model::from_value(&value).context("Unexpected model selection")?;
            program.model = Some(model);
            preferences.model = Some(model);
        }
    }

    if matches!(
        program.framework,
        Some(Framework::Express | Framework::Nextjs)
    ) && program.engine.is_none()
    {
        if ctx.is_ci() {
            program.engine = Some(preferences.engine.unwrap_or(defaults::ENGINE));
        } else {
            let items = [
                SelectItem::new("context", "ContextChatEngine"),
                SelectItem::new("simple", "SimpleChatEngine (no data, just chat)"),
            ];
            let value = prompter.select("Which chat engine would you like to use?", &items, 0)?;
            let engine = Engine::from_value(&value).context("Unexpected engine selection")?;
            program.engine = Some(engine);
            preferences.engine = Some(engine);
        }
    }

    // No CI short-circuit here: the prompt fires even in batch environments,
    // where it simply returns an empty answer. An empty stored key counts as
    // unset and is asked again on the next run.
    if program.openai_key.as_deref().map_or(true, str::is_empty) {
        let key = prompter.text("Please provide your OpenAI API key (leave blank to skip):")?;
        program.openai_key = Some(key.clone());
        preferences.openai_key = Some(key);
    }

    // FastAPI projects carry no eslint config, and explicit --eslint /
    // --no-eslint flags are applied by the caller
    if program.framework != Some(Framework::Fastapi)
        && !ctx.eslint_overridden
        && program.eslint.is_none()
    {
        if ctx.is_ci() {
            program.eslint = Some(preferences.eslint.unwrap_or(defaults::ESLINT));
        } else {
            let message = format!("Would you like to use {}?", "ESLint".blue());
            let initial = preferences.eslint.unwrap_or(defaults::ESLINT);
            let eslint = prompter.toggle(&message, initial)?;
            program.eslint = Some(eslint);
            preferences.eslint = Some(eslint);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::StaticSource;
    use crate::prompts::{PromptError, ScriptedAnswer, ScriptedPrompter};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn ctx(ci: bool) -> ResolveContext {
        ResolveContext::new(ci, false, false)
    }

    fn community() -> StaticSource {
        StaticSource::new(["multimodal", "embedded-tables"])
    }

    fn resolved_record() -> InstallConfig {
        InstallConfig {
            template: Some(Template::Streaming),
            community_project_path: None,
            framework: Some(Framework::Nextjs),
            frontend: Some(false),
            ui: Some(Ui::Html),
            model: Some(Model::Gpt35Turbo),
            engine: Some(Engine::Simple),
            openai_key: Some("sk-test".to_string()),
            eslint: Some(true),
        }
    }

    #[tokio::test]
    async fn test_ci_fills_defaults_and_only_asks_for_key() {
        let mut program = InstallConfig::default();
        let mut preferences = InstallConfig::default();
        let mut prompter = ScriptedPrompter::with_script([ScriptedAnswer::Text(String::new())]);

        resolve_config(
            &mut program,
            &mut preferences,
            &ctx(true),
            &mut prompter,
            &community(),
        )
        .await
        .unwrap();

        assert_eq!(program.template, Some(Template::Streaming));
        assert_eq!(program.framework, Some(Framework::Nextjs));
        assert_eq!(program.frontend, Some(false));
        assert_eq!(program.ui, Some(Ui::Html));
        assert_eq!(program.model, Some(Model::Gpt35Turbo));
        assert_eq!(program.engine, Some(Engine::Simple));
        assert_eq!(program.openai_key, Some(String::new()));
        assert_eq!(program.eslint, Some(true));

        // the key prompt has no CI short-circuit; everything else does
        assert_eq!(
            prompter.messages(),
            vec!["Please provide your OpenAI API key (leave blank to skip):"]
        );

        // CI fallbacks are not written back as preferences
        assert_eq!(preferences.template, None);
        assert_eq!(preferences.framework, None);
        assert_eq!(preferences.openai_key, Some(String::new()));
    }

    #[tokio::test]
    async fn test_fully_resolved_record_is_untouched() {
        let mut program = resolved_record();
        let mut preferences = InstallConfig::default();
        let mut prompter = ScriptedPrompter::empty();

        resolve_config(
            &mut program,
            &mut preferences,
            &ctx(false),
            &mut prompter,
            &community(),
        )
        .await
        .unwrap();

        assert_eq!(program, resolved_record());
        assert!(prompter.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_idempotent_across_two_runs() {
        let mut program = InstallConfig::default();
        let mut preferences = InstallConfig::default();
        let mut prompter = ScriptedPrompter::with_script([ScriptedAnswer::Text("sk".into())]);

        resolve_config(
            &mut program,
            &mut preferences,
            &ctx(true),
            &mut prompter,
            &community(),
        )
        .await
        .unwrap();

        let after_first = program.clone();
        let mut second = ScriptedPrompter::empty();
        resolve_config(
            &mut program,
            &mut preferences,
            &ctx(true),
            &mut second,
            &community(),
        )
        .await
        .unwrap();

        assert_eq!(program, after_first);
        assert!(second.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_community_template_exits_early() {
        let mut program = InstallConfig::default();
        let mut preferences = InstallConfig::default();
        let mut prompter = ScriptedPrompter::with_script([
            ScriptedAnswer::Select("community".into()),
            ScriptedAnswer::Select("embedded-tables".into()),
        ]);

        resolve_config(
            &mut program,
            &mut preferences,
            &ctx(false),
            &mut prompter,
            &community(),
        )
        .await
        .unwrap();

        assert_eq!(program.template, Some(Template::Community));
        assert_eq!(
            program.community_project_path,
            Some("embedded-tables".to_string())
        );
        assert_eq!(program.framework, None);
        assert_eq!(program.frontend, None);
        assert_eq!(program.ui, None);
        assert_eq!(program.model, None);
        assert_eq!(program.engine, None);
        assert_eq!(program.openai_key, None);
        assert_eq!(program.eslint, None);

        assert_eq!(preferences.template, Some(Template::Community));
        assert_eq!(
            preferences.community_project_path,
            Some("embedded-tables".to_string())
        );
        assert_eq!(prompter.transcript().len(), 2);
        assert_eq!(
            prompter.transcript()[1].offered,
            vec!["multimodal", "embedded-tables"]
        );
    }

    #[tokio::test]
    async fn test_simple_template_does_not_offer_nextjs() {
        let mut program = InstallConfig {
            template: Some(Template::Simple),
            ..Default::default()
        };
        let mut preferences = InstallConfig::default();
        let mut prompter = ScriptedPrompter::with_script([
            ScriptedAnswer::Select("express".into()),
            ScriptedAnswer::Toggle(false),
            ScriptedAnswer::Select("gpt-3.5-turbo".into()),
            ScriptedAnswer::Select("context".into()),
            ScriptedAnswer::Text(String::new()),
            ScriptedAnswer::Toggle(true),
        ]);

        resolve_config(
            &mut program,
            &mut preferences,
            &ctx(false),
            &mut prompter,
            &community(),
        )
        .await
        .unwrap();

        assert_eq!(
            prompter.transcript()[0].offered,
            vec!["express", "fastapi"]
        );
        // no frontend means the ui step never fires
        assert_eq!(program.ui, None);
        assert_eq!(program.engine, Some(Engine::Context));
    }

    #[tokio::test]
    async fn test_streaming_template_offers_nextjs_first() {
        let mut program = InstallConfig {
            template: Some(Template::Streaming),
            ..Default::default()
        };
        let mut preferences = InstallConfig::default();
        let mut prompter = ScriptedPrompter::with_script([
            ScriptedAnswer::Select("nextjs".into()),
            ScriptedAnswer::Select("html".into()),
            ScriptedAnswer::Select("gpt-4".into()),
            ScriptedAnswer::Select("simple".into()),
            ScriptedAnswer::Text("sk-live".into()),
            ScriptedAnswer::Toggle(true),
        ]);

        resolve_config(
            &mut program,
            &mut preferences,
            &ctx(false),
            &mut prompter,
            &community(),
        )
        .await
        .unwrap();

        assert_eq!(
            prompter.transcript()[0].offered,
            vec!["nextjs", "express", "fastapi"]
        );
        // nextjs is a single full-stack project
        assert_eq!(program.frontend, Some(false));
        assert_eq!(program.ui, Some(Ui::Html));
        assert_eq!(program.model, Some(Model::Gpt4));

        // interactive answers land in the preferences too
        assert_eq!(preferences.framework, Some(Framework::Nextjs));
        assert_eq!(preferences.openai_key, Some("sk-live".to_string()));
        assert_eq!(preferences.eslint, Some(true));
    }

    #[tokio::test]
    async fn test_fastapi_skips_model_engine_and_eslint() {
        let mut program = InstallConfig {
            template: Some(Template::Simple),
            ..Default::default()
        };
        let mut preferences = InstallConfig::default();
        let mut prompter = ScriptedPrompter::with_script([
            ScriptedAnswer::Select("fastapi".into()),
            ScriptedAnswer::Toggle(true),
            ScriptedAnswer::Select("shadcn".into()),
            ScriptedAnswer::Text(String::new()),
        ]);

        resolve_config(
            &mut program,
            &mut preferences,
            &ctx(false),
            &mut prompter,
            &community(),
        )
        .await
        .unwrap();

        assert_eq!(program.framework, Some(Framework::Fastapi));
        assert_eq!(program.frontend, Some(true));
        assert_eq!(program.ui, Some(Ui::Shadcn));
        assert_eq!(program.model, None);
        assert_eq!(program.engine, None);
        // eslint stays unresolved for fastapi even with no override flags
        assert_eq!(program.eslint, None);
    }

    #[tokio::test]
    async fn test_no_frontend_flag_skips_frontend_prompt() {
        let mut program = InstallConfig {
            template: Some(Template::Simple),
            ..Default::default()
        };
        let mut preferences = InstallConfig::default();
        let mut prompter = ScriptedPrompter::with_script([
            ScriptedAnswer::Select("express".into()),
            ScriptedAnswer::Select("gpt-3.5-turbo".into()),
            ScriptedAnswer::Select("simple".into()),
            ScriptedAnswer::Text(String::new()),
            ScriptedAnswer::Toggle(false),
        ]);

        resolve_config(
            &mut program,
            &mut preferences,
            &ResolveContext::new(false, true, false),
            &mut prompter,
            &community(),
        )
        .await
        .unwrap();

        assert_eq!(program.frontend, Some(false));
        assert!(prompter
            .messages()
            .iter()
            .all(|m| !m.contains("frontend")));
    }

    #[tokio::test]
    async fn test_eslint_flags_suppress_eslint_step() {
        let mut program = resolved_record();
        program.eslint = None;
        let mut preferences = InstallConfig::default();
        let mut prompter = ScriptedPrompter::empty();

        resolve_config(
            &mut program,
            &mut preferences,
            &ResolveContext::new(false, false, true),
            &mut prompter,
            &community(),
        )
        .await
        .unwrap();

        assert_eq!(program.eslint, None);
        assert!(prompter.transcript().is_empty());
    }

    // Known asymmetry: the CI fallback takes the framework preference (or the
    // global NextJS default) without re-checking the template, so NextJS can
    // pair with a non-streaming template in CI even though the interactive
    // flow never offers that combination.
    #[tokio::test]
    async fn test_ci_framework_default_ignores_template() {
        let mut program = InstallConfig::default();
        let mut preferences = InstallConfig {
            template: Some(Template::Simple),
            ..Default::default()
        };
        let mut prompter = ScriptedPrompter::with_script([ScriptedAnswer::Text(String::new())]);

        resolve_config(
            &mut program,
            &mut preferences,
            &ctx(true),
            &mut prompter,
            &community(),
        )
        .await
        .unwrap();

        assert_eq!(program.template, Some(Template::Simple));
        assert_eq!(program.framework, Some(Framework::Nextjs));
    }

    #[tokio::test]
    async fn test_cancellation_surfaces_as_prompt_error() {
        let mut program = InstallConfig::default();
        let mut preferences = InstallConfig::default();
        let mut prompter = ScriptedPrompter::empty();

        let err = resolve_config(
            &mut program,
            &mut preferences,
            &ctx(false),
            &mut prompter,
            &community(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PromptError>(),
            Some(PromptError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn test_empty_stored_key_is_asked_again() {
        let mut program = resolved_record();
        program.openai_key = Some(String::new());
        let mut preferences = InstallConfig::default();
        let mut prompter = ScriptedPrompter::with_script([ScriptedAnswer::Text("sk-2".into())]);

        resolve_config(
            &mut program,
            &mut preferences,
            &ctx(false),
            &mut prompter,
            &community(),
        )
        .await
        .unwrap();

        assert_eq!(program.openai_key, Some("sk-2".to_string()));
        assert_eq!(prompter.transcript().len(), 1);
    }

    // The CI signal is probed at every step, not cached at entry
    #[tokio::test]
    async fn test_ci_probe_consulted_per_step() {
        let calls = Arc::new(AtomicUsize::new(0));
        let probe_calls = Arc::clone(&calls);
        // CI only for the first step (template), interactive afterwards
        let ctx = ResolveContext::with_ci_probe(
            move || probe_calls.fetch_add(1, Ordering::Relaxed) == 0,
            false,
            false,
        );

        let mut program = InstallConfig::default();
        let mut preferences = InstallConfig::default();
        let mut prompter = ScriptedPrompter::with_script([
            ScriptedAnswer::Select("nextjs".into()),
            ScriptedAnswer::Select("html".into()),
            ScriptedAnswer::Select("gpt-3.5-turbo".into()),
            ScriptedAnswer::Select("context".into()),
            ScriptedAnswer::Text(String::new()),
            ScriptedAnswer::Toggle(false),
        ]);

        resolve_config(
            &mut program,
            &mut preferences,
            &ctx,
            &mut prompter,
            &community(),
        )
        .await
        .unwrap();

        // template came from the CI default, the rest from prompts
        assert_eq!(program.template, Some(Template::Streaming));
        assert_eq!(preferences.template, None);
        assert_eq!(program.framework, Some(Framework::Nextjs));
        assert_eq!(preferences.framework, Some(Framework::Nextjs));
        assert_eq!(program.eslint, Some(false));
    }
}
