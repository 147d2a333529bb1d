//! Injected environment for the resolver
//!
//! The resolver never reads process arguments or environment variables
//! itself; the binary distills them into a [`ResolveContext`] up front so the
//! resolver stays a function of (record, preferences, context, prompter).

/// Environment variables that mark a continuous-integration environment
const CI_ENV_VARS: &[&str] = &[
    "CI",
    "CONTINUOUS_INTEGRATION",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "BUILDKITE",
    "JENKINS_URL",
    "TEAMCITY_VERSION",
];

/// Detect whether the process runs under continuous integration.
///
/// A variable set to "false" does not count; some runners export CI=false to
/// opt out.
pub fn is_ci() -> bool {
    CI_ENV_VARS.iter().any(|var| {
        std::env::var(var)
            .map(|v| !v.is_empty() && v != "false")
            .unwrap_or(false)
    })
}

/// Read-only context the resolver consults at each step
pub struct ResolveContext {
    ci_probe: Box<dyn Fn() -> bool + Send + Sync>,
    /// `--no-frontend` was passed: force `frontend=false` without prompting
    pub no_frontend: bool,
    /// `--eslint` or `--no-eslint` was passed; the flag value itself is
    /// applied by the caller, the resolver only skips the eslint step
    pub eslint_overridden: bool,
}

impl ResolveContext {
    pub fn new(ci: bool, no_frontend: bool, eslint_overridden: bool) -> Self {
        Self {
            ci_probe: Box::new(move || ci),
            no_frontend,
            eslint_overridden,
        }
    }

    /// Context with a custom CI probe. The probe is consulted independently
    /// at every step rather than cached, so a harness can flip it mid-run.
    pub fn with_ci_probe(
        probe: impl Fn() -> bool + Send + Sync + 'static,
        no_frontend: bool,
        eslint_overridden: bool,
    ) -> Self {
        Self {
            ci_probe: Box::new(probe),
            no_frontend,
            eslint_overridden,
        }
    }

    pub fn is_ci(&self) -> bool {
        (self.ci_probe)()
    }
}

impl std::fmt::Debug for ResolveContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolveContext")
            .field("is_ci", &self.is_ci())
            .field("no_frontend", &self.no_frontend)
            .field("eslint_overridden", &self.eslint_overridden)
            .finish()
    }
}
