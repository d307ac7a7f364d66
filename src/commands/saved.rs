use clap::{Args, Subcommand};
use std::io::{self, Write};
use uuid::Uuid;

use decide_core::{Category, KeyValueStore, SavedItemRepository};

use super::OutputFormat;

#[derive(Args)]
pub struct SavedCommand {
    #[command(subcommand)]
    pub command: SavedSubcommand,
}

#[derive(Subcommand)]
pub enum SavedSubcommand {
    /// List saved items in a category
    List {
        /// Category: calculation, comparison, or decision
        category: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete one saved item by id
    Delete {
        /// Category: calculation, comparison, or decision
        category: String,

        /// Item id (UUID)
        id: Uuid,
    },

    /// Remove all saved items in a category
    Clear {
        /// Category: calculation, comparison, or decision
        category: String,

        /// Only remove items of one calculator kind
        /// (unit_price, cost, date_span)
        #[arg(long)]
        kind: Option<String>,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl SavedCommand {
    pub async fn run<S: KeyValueStore>(
        &self,
        repo: &SavedItemRepository<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            SavedSubcommand::List { category, format } => {
                let category: Category = category.parse()?;
                let items = repo.list(category).await;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&items)?);
                    }
                    OutputFormat::Text => {
                        if items.is_empty() {
                            println!("No saved {} items", category);
                            return Ok(());
                        }
                        for item in items {
                            let auto = if item.auto_saved { " [auto]" } else { "" };
                            println!(
                                "{}  {}{}  ({}, updated {})",
                                item.id,
                                item.name,
                                auto,
                                item.data.kind(),
                                item.updated_at.format("%Y-%m-%d %H:%M")
                            );
                        }
                    }
                }
                Ok(())
            }

            SavedSubcommand::Delete { category, id } => {
                let category: Category = category.parse()?;
                repo.delete(category, *id).await?;
                println!("Deleted {} from {}", id, category);
                Ok(())
            }

            SavedSubcommand::Clear {
                category,
                kind,
                force,
            } => {
                let category: Category = category.parse()?;

                if !force {
                    let what = match kind {
                        Some(kind) => format!("all saved {} items of kind '{}'", category, kind),
                        None => format!("all saved {} items", category),
                    };
                    print!("Remove {}? [y/N] ", what);
                    io::stdout().flush()?;

                    let mut answer = String::new();
                    io::stdin().read_line(&mut answer)?;
                    if !answer.trim().eq_ignore_ascii_case("y") {
                        println!("Cancelled");
                        return Ok(());
                    }
                }

                repo.clear(category, kind.as_deref()).await?;
                println!("Cleared {}", category);
                Ok(())
            }
        }
    }
}
