pub mod constants;
pub mod validator_node;
pub mod verbosity;

use clap::{Parser, Subcommand};

use crate::cli::{
    validator_node::ValidatorNodeConfig,
    verbosity::{Verbosity, verbosity_parser},
};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (1=error, 2=warn, 3=info, 4=debug, 5=trace)
    #[arg(short, long, global = true, default_value = "3", value_parser = verbosity_parser)]
    pub verbosity: Verbosity,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the validator client
    #[command(name = "validator_node")]
    ValidatorNode(Box<ValidatorNodeConfig>),
}
