//! create-chat-app - interactive questionnaire for scaffolding chat apps

mod preferences;

use anyhow::Result;
use chat_scaffold_core::{
    is_ci, resolve_config, Engine, Framework, GithubSource, InstallConfig, Model, PromptError,
    ResolveContext, Template, TerminalPrompter, Ui,
};
use clap::Parser;

/// User agent for GitHub API requests
pub const USER_AGENT: &str = concat!("create-chat-app/", env!("CARGO_PKG_VERSION"));

#[derive(Parser, Debug)]
#[command(name = "create-chat-app")]
#[command(about = "Interactive questionnaire for scaffolding a new chat application")]
#[command(version)]
pub struct Args {
    /// Project template
    #[arg(long, value_enum)]
    pub template: Option<Template>,

    /// Community template folder name (when --template community)
    #[arg(long)]
    pub community_project_path: Option<String>,

    /// Framework for the generated app
    #[arg(long, value_enum)]
    pub framework: Option<Framework>,

    /// Generate a NextJS frontend for a backend-only framework
    #[arg(long, overrides_with = "no_frontend")]
    pub frontend: bool,

    /// Skip the frontend question and generate no frontend
    #[arg(long, overrides_with = "frontend")]
    pub no_frontend: bool,

    /// Frontend UI flavor
    #[arg(long, value_enum)]
    pub ui: Option<Ui>,

    /// OpenAI model used by the generated app
    #[arg(long, value_enum)]
    pub model: Option<Model>,

    /// Chat engine used by the generated app
    #[arg(long, value_enum)]
    pub engine: Option<Engine>,

    /// OpenAI API key to store in the generated app's environment
    #[arg(long = "open-ai-key")]
    pub open_ai_key: Option<String>,

    /// Enable ESLint without asking
    #[arg(long, overrides_with = "no_eslint")]
    pub eslint: bool,

    /// Disable ESLint without asking
    #[arg(long, overrides_with = "eslint")]
    pub no_eslint: bool,

    /// Discard stored preferences before resolving
    #[arg(long)]
    pub reset_preferences: bool,
}

impl Args {
    /// Pre-fill the configuration record from explicit flags
    fn initial_config(&self) -> InstallConfig {
        InstallConfig {
            template: self.template,
            community_project_path: self.community_project_path.clone(),
            framework: self.framework,
            frontend: self.frontend.then_some(true),
            ui: self.ui,
            model: self.model,
            engine: self.engine,
            openai_key: self.open_ai_key.clone(),
            // the eslint flags are applied here, outside the resolver; the
            // resolver only sees that an override was present
            eslint: if self.eslint {
                Some(true)
            } else if self.no_eslint {
                Some(false)
            } else {
                None
            },
        }
    }
}

/// Restore the terminal cursor; cliclack hides it while a prompt is active
fn restore_cursor() {
    let _ = console::Term::stderr().show_cursor();
}

fn print_summary(program: &InstallConfig) -> Result<()> {
    if let Some(path) = &program.community_project_path {
        cliclack::log::success(format!("Community template: {}", path))?;
        return Ok(());
    }

    let mut lines = Vec::new();
    if let Some(template) = program.template {
        lines.push(format!("template: {}", template));
    }
    if let Some(framework) = program.framework {
        lines.push(format!("framework: {}", framework));
    }
    if let Some(frontend) = program.frontend {
        lines.push(format!("frontend: {}", frontend));
    }
    if let Some(ui) = program.ui {
        lines.push(format!("ui: {}", ui));
    }
    if let Some(model) = program.model {
        lines.push(format!("model: {}", model));
    }
    if let Some(engine) = program.engine {
        lines.push(format!("engine: {}", engine));
    }
    if let Some(eslint) = program.eslint {
        lines.push(format!("eslint: {}", eslint));
    }
    match &program.openai_key {
        Some(key) if !key.is_empty() => lines.push("OpenAI key: provided".to_string()),
        _ => lines.push("OpenAI key: skipped".to_string()),
    }

    cliclack::log::success(lines.join("\n"))?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_cursor();
        default_panic(info);
    }));

    // Ctrl+C during a prompt counts as cancellation
    ctrlc::set_handler(move || {
        restore_cursor();
        eprintln!();
        eprintln!("Exiting.");
        std::process::exit(1);
    })
    .ok();

    let args = Args::parse();

    if args.reset_preferences {
        preferences::reset()?;
    }

    let mut program = args.initial_config();
    let mut prefs = preferences::load();
    let ctx = ResolveContext::new(is_ci(), args.no_frontend, args.eslint || args.no_eslint);
    let mut prompter = TerminalPrompter::new();
    let community = GithubSource::community(USER_AGENT)?;

    cliclack::intro("create-chat-app")?;

    let result = resolve_config(&mut program, &mut prefs, &ctx, &mut prompter, &community).await;

    if let Err(err) = result {
        restore_cursor();
        if matches!(err.downcast_ref::<PromptError>(), Some(PromptError::Cancelled)) {
            eprintln!("Exiting.");
            std::process::exit(1);
        }
        return Err(err);
    }

    if let Err(err) = preferences::save(&prefs) {
        cliclack::log::warning(format!("Could not save preferences: {}", err))?;
    }

    print_summary(&program)?;
    cliclack::outro("Configuration resolved. Happy coding!")?;
    restore_cursor();

    Ok(())
}
