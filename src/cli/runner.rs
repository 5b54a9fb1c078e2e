//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::database::{DatabaseEngine, TableQuery, IN_MEMORY};
use crate::error::{Result, ResultExt};
use crate::loader::{load_source, SourceDefinition};
use crate::pagination::{paginate, PageRequest};
use crate::query::Query;
use serde::Serialize;
use serde_json::json;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Page { page, limit } => self.page(page, limit).await,
            Commands::Count => self.count().await,
            Commands::Tables => self.tables(),
        }
    }

    /// Resolve the source from the definition file and command-line overrides
    pub fn resolve_source(&self) -> Result<SourceDefinition> {
        let mut def = match self.cli.source {
            Some(ref path) => load_source(path)
                .with_context(|| format!("Failed to load source '{}'", path.display()))?,
            None => SourceDefinition {
                name: "cli".to_string(),
                database: IN_MEMORY.to_string(),
                table: None,
                query: None,
                order_by: None,
                setup: None,
            },
        };

        if let Some(ref database) = self.cli.database {
            def.database.clone_from(database);
        }
        if let Some(ref table) = self.cli.table {
            def.table = Some(table.clone());
            def.query = None;
        }
        if let Some(ref query) = self.cli.query {
            def.query = Some(query.clone());
            def.table = None;
        }
        if let Some(ref order_by) = self.cli.order_by {
            def.order_by = Some(order_by.clone());
        }

        Ok(def)
    }

    fn open_query(&self) -> Result<TableQuery> {
        let def = self.resolve_source()?;
        let engine = DatabaseEngine::for_source(&def)?;
        tracing::info!("Paging source '{}' on {}", def.name, engine.location());
        engine.source_query(&def)
    }

    async fn page(&self, page: &str, limit: &str) -> Result<()> {
        let query = self.open_query()?;
        let request = PageRequest::new(page, limit);

        let envelope = paginate(query, &request).await?;
        tracing::info!(
            "Page {} of {}: {} item(s)",
            envelope.page,
            envelope.page_count,
            envelope.items.len()
        );

        self.output(&envelope)
    }

    async fn count(&self) -> Result<()> {
        let query = self.open_query()?;
        let item_count = query.count().await?;
        self.output(&json!({ "itemCount": item_count }))
    }

    fn tables(&self) -> Result<()> {
        let def = self.resolve_source()?;
        let engine = DatabaseEngine::for_source(&def)?;
        let tables = engine.list_tables()?;
        self.output(&json!({ "tables": tables }))
    }

    fn output<T: Serialize>(&self, value: &T) -> Result<()> {
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value),
            OutputFormat::Pretty => serde_json::to_string_pretty(value),
        }
        .context("Failed to render output")?;

        println!("{rendered}");
        Ok(())
    }
}
