//! Library and validator initialization

use crate::error::CliError;
use bitcheck_check::Orchestrator;
use bitcheck_config::Config;
use bitcheck_events::EventSender;
use bitcheck_library::SqliteLibrary;
use bitcheck_validate::{SearchPath, ToolRegistry, ValidatorRunner};
use std::sync::Arc;
use tracing::{debug, info};

/// Components shared by every command
pub struct SystemSetup {
    config: Config,
    library: Arc<SqliteLibrary>,
    registry: Arc<ToolRegistry>,
}

impl SystemSetup {
    /// Open the library database and compile the validator table
    pub async fn initialize(config: Config) -> Result<Self, CliError> {
        let db_path = config.library_path();
        info!(path = %db_path.display(), "Opening library");

        let library = SqliteLibrary::open(&db_path).await.map_err(|e| {
            CliError::Setup(format!(
                "failed to open library at {}: {e}",
                db_path.display()
            ))
        })?;
        let registry = ToolRegistry::builtin()?;
        debug!(validators = registry.specs().count(), "Validators registered");

        Ok(Self {
            config,
            library: Arc::new(library),
            registry: Arc::new(registry),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn library(&self) -> &SqliteLibrary {
        &self.library
    }

    /// Verification engine wired to the library and the process `PATH`
    pub fn orchestrator(&self, tx: EventSender) -> Orchestrator {
        let runner =
            ValidatorRunner::new(SearchPath::Env).with_timeout(self.config.tool_timeout());
        Orchestrator::new(self.library.clone(), self.registry.clone(), Arc::new(runner))
            .with_events(tx)
    }
}
