mod config_cmd;
mod saved;
mod unitprice;

pub use config_cmd::ConfigCommand;
pub use saved::SavedCommand;
pub use unitprice::UnitPriceCommand;

use clap::ValueEnum;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
