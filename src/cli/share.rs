use cellar::{chart::ChartConfig, filter::FilterConfig, prelude::*, share::ShareableState};
use clap::{Parser, Subcommand};

use crate::cli::{ChartConfigArgs, FilterArgs, WeightArgs};

#[derive(Parser)]
pub struct ShareArgs {
    #[command(subcommand)]
    command: ShareCommand,
}

impl ShareArgs {
    pub fn run(self) -> Result {
        match self.command {
            ShareCommand::Encode(args) => {
                println!("{}", args.state().encode()?);
            }
            ShareCommand::Url(args) => {
                println!("{}", args.state.state().shareable_url(&args.base_url)?);
            }
            ShareCommand::Decode(args) => {
                let state = if args.token.contains("state=") {
                    ShareableState::from_query(&args.token)?
                } else {
                    ShareableState::decode(&args.token)?
                };
                println!("{}", serde_json::to_string_pretty(&state)?);
            }
        }
        Ok(())
    }
}

#[derive(Subcommand)]
enum ShareCommand {
    /// Print the state token.
    Encode(Box<StateBuilderArgs>),

    /// Print the link to the state.
    Url(Box<UrlArgs>),

    /// Print the state behind a token or a link.
    Decode(DecodeArgs),
}

#[derive(Parser)]
struct StateBuilderArgs {
    #[clap(flatten)]
    chart: ChartConfigArgs,

    #[clap(flatten)]
    filter: FilterArgs,

    #[clap(flatten)]
    weights: WeightArgs,

    /// Selected battery names.
    #[clap(long = "select", value_delimiter = ',')]
    selected: Vec<String>,
}

impl StateBuilderArgs {
    fn state(&self) -> ShareableState {
        ShareableState {
            chart: ChartConfig::from(self.chart),
            filter: FilterConfig::from(&self.filter),
            weights: self.weights.into(),
            selected: self.selected.clone(),
        }
    }
}

#[derive(Parser)]
struct UrlArgs {
    /// Page the link points to.
    #[clap(long = "base-url", env = "CELLAR_BASE_URL")]
    base_url: String,

    #[clap(flatten)]
    state: StateBuilderArgs,
}

#[derive(Parser)]
struct DecodeArgs {
    /// Bare token, or a link with the `state` query parameter.
    token: String,
}
