//! Resolve flags, environment and config file into what a command needs.
//!
//! Precedence: flags and environment (clap merges both), then the config
//! file, then defaults.

use std::time::Duration;

use oktest_core::{load_config, AnswerKey, GradedTest, GradingError, SuiteRegistry, TestSettings};
use tracing::debug;

use crate::cli::args::TestArgs;

#[derive(Debug, Clone)]
pub(crate) struct CommandContext {
    pub settings: TestSettings,
    pub assignment: Option<String>,
    pub hash_key: Option<String>,
}

impl CommandContext {
    pub fn resolve(args: &TestArgs, hash_key: Option<&str>) -> anyhow::Result<Self> {
        let config = args.config.as_deref().map(load_config).transpose()?;
        let base = config
            .as_ref()
            .map(|c| c.settings())
            .unwrap_or_default();

        let settings = TestSettings {
            verbose: args.verbose || base.verbose,
            interactive: args.interactive || base.interactive,
            timeout: args.timeout.map(Duration::from_secs).or(base.timeout),
        };
        let assignment = args
            .assignment
            .clone()
            .or_else(|| config.as_ref().map(|c| c.assignment_name.clone()));
        let hash_key = hash_key
            .map(str::to_string)
            .or_else(|| config.as_ref().and_then(|c| c.hash_key.clone()));

        debug!(?settings, ?assignment, has_key = hash_key.is_some(), "resolved command context");
        Ok(Self {
            settings,
            assignment,
            hash_key,
        })
    }

    pub fn answer_key(&self) -> Result<AnswerKey, GradingError> {
        self.hash_key
            .as_deref()
            .map(AnswerKey::new)
            .ok_or_else(|| GradingError::Config {
                message: "no hash key: pass --hash-key, set OKTEST_HASH_KEY or add hash_key to the config"
                    .into(),
            })
    }

    pub fn require_assignment(&self) -> Result<&str, GradingError> {
        self.assignment.as_deref().ok_or_else(|| GradingError::Config {
            message: "no assignment name: pass --assignment, set OKTEST_ASSIGNMENT or add assignment_name to the config"
                .into(),
        })
    }

    pub fn load(&self, args: &TestArgs) -> Result<GradedTest, GradingError> {
        let registry = SuiteRegistry::default();
        GradedTest::load(
            &args.file,
            &registry,
            self.assignment.clone().unwrap_or_default(),
            self.settings.clone(),
        )
    }
}
