//! Subcommand definitions: a name, an option schema and an async action.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use futures::FutureExt;
use futures::future::BoxFuture;

use crate::config::Config;
use crate::schema::OptionDefinition;

type ActionFn = dyn Fn(Config) -> BoxFuture<'static, Result<()>> + Send + Sync;

/// One registered subcommand.
#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub options: Vec<OptionDefinition>,
    action: Arc<ActionFn>,
}

impl CommandDefinition {
    /// Command with no options running `action`.
    pub fn new<F, Fut>(name: &'static str, description: &'static str, action: F) -> Self
    where
        F: Fn(Config) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        Self {
            name,
            description,
            options: Vec::new(),
            action: Arc::new(move |config| action(config).boxed()),
        }
    }

    /// Append options, keeping declaration order.
    pub fn with_options<I: IntoIterator<Item = OptionDefinition>>(mut self, options: I) -> Self {
        self.options.extend(options);
        self
    }

    /// Name shown to users in messages (`haul bundle`).
    pub fn display_name(&self, program: &str) -> String {
        format!("{} {}", program, self.name)
    }

    /// Run the action with a fully resolved configuration.
    pub async fn invoke(&self, config: Config) -> Result<()> {
        (self.action)(config).await
    }
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
