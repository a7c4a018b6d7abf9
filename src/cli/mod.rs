//! Command-line interface.
//!
//! Every command prints pretty JSON on stdout. Logs go to stderr.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::config::EngineConfig;
use crate::error::EstimateError;
use crate::estimation::{EstimateRequest, RawEstimateRequest};
use crate::snapshot::{CatalogSnapshot, Sources};
use crate::templates::TemplateRegistry;

#[derive(Parser, Debug)]
#[command(name = "costwright", version, about = "Construction cost estimates")]
pub struct Cli {
    /// Catalog snapshot JSON file (built-in data when omitted)
    #[arg(long, global = true, env = "COSTWRIGHT_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Estimate cost and time for a project
    Estimate(EstimateArgs),

    /// List the known project templates
    Templates,

    /// Rank tools for a job description
    RecommendTools {
        /// Job description, e.g. "laying a patio"
        #[arg(required = true, num_args = 1..)]
        job: Vec<String>,
    },

    /// Compare buying a tool with hiring it
    BuyVsRent {
        /// Tool id or name
        tool: String,

        /// Expected days of use
        days: u32,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct EstimateArgs {
    /// Project type, e.g. "bathroom renovation"
    pub project_type: String,

    /// Floor area in m²
    #[arg(short, long)]
    pub area: Option<Decimal>,

    /// Town, region or postcode
    #[arg(short, long)]
    pub location: Option<String>,

    /// basic, standard or complex
    #[arg(short, long, default_value = "standard")]
    pub complexity: String,

    /// budget, mid_range or premium
    #[arg(short, long, default_value = "mid_range")]
    pub quality: String,

    /// spring, summer, autumn or winter (current season when omitted)
    #[arg(long)]
    pub season: Option<String>,

    /// Leave tool hire out of the estimate
    #[arg(long)]
    pub no_tools: bool,

    /// Units for per-item and per-day labour rates
    #[arg(long)]
    pub unit_quantity: Option<Decimal>,
}

impl TryFrom<EstimateArgs> for EstimateRequest {
    type Error = EstimateError;

    fn try_from(args: EstimateArgs) -> Result<Self, Self::Error> {
        EstimateRequest::try_from(RawEstimateRequest {
            project_type: args.project_type,
            area: args.area,
            location: args.location,
            complexity: args.complexity,
            quality_tier: args.quality,
            include_tools: Some(!args.no_tools),
            season: args.season,
            unit_quantity: args.unit_quantity,
        })
    }
}

/// Run a parsed command.
pub async fn run(cli: Cli, config: EngineConfig) -> anyhow::Result<()> {
    let sources = load_sources(cli.catalog.as_deref()).await?;

    match cli.command {
        Command::Estimate(args) => {
            let request = EstimateRequest::try_from(args)?;
            let estimate = sources.estimator(config).estimate(&request).await?;
            print_json(&estimate)
        }
        Command::Templates => {
            let templates = sources.templates.list().await;
            print_json(&templates)
        }
        Command::RecommendTools { job } => {
            let recommendations = sources.advisor().recommend_tools(&job.join(" "));
            print_json(&recommendations)
        }
        Command::BuyVsRent { tool, days } => print_json(&sources.advisor().buy_vs_rent(&tool, days)),
    }
}

async fn load_sources(path: Option<&std::path::Path>) -> anyhow::Result<Sources> {
    let snapshot = match path {
        Some(path) => CatalogSnapshot::from_path(path).await?,
        None => {
            tracing::debug!("No catalog file given, using built-in data");
            CatalogSnapshot::builtin()
        }
    };
    Ok(snapshot.into_sources()?)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{Complexity, QualityTier, Season};
    use rust_decimal_macros::dec;

    #[test]
    fn test_estimate_args() {
        let cli = Cli::try_parse_from([
            "costwright",
            "estimate",
            "bathroom renovation",
            "--area",
            "5.5",
            "-c",
            "complex",
            "--season",
            "winter",
            "--no-tools",
        ])
        .unwrap();
        let Command::Estimate(args) = cli.command else {
            panic!("expected estimate command");
        };
        let request = EstimateRequest::try_from(args).unwrap();
        assert_eq!(request.area, Some(dec!(5.5)));
        assert_eq!(request.complexity, Complexity::Complex);
        assert_eq!(request.quality_tier, QualityTier::MidRange);
        assert_eq!(request.season, Some(Season::Winter));
        assert!(!request.include_tools);
    }

    #[test]
    fn test_bad_enum_value_is_invalid_parameter() {
        let cli = Cli::try_parse_from(["costwright", "estimate", "patio", "-q", "gold"]).unwrap();
        let Command::Estimate(args) = cli.command else {
            panic!("expected estimate command");
        };
        let err = EstimateRequest::try_from(args).unwrap_err();
        assert!(matches!(err, EstimateError::InvalidParameter { ref name, .. } if name == "quality_tier"));
    }

    #[test]
    fn test_advisory_commands() {
        let cli = Cli::try_parse_from(["costwright", "recommend-tools", "laying", "a", "patio"])
            .unwrap();
        assert!(matches!(cli.command, Command::RecommendTools { ref job } if job.join(" ") == "laying a patio"));

        let cli = Cli::try_parse_from(["costwright", "--json-logs", "buy-vs-rent", "sds-drill", "9"])
            .unwrap();
        assert!(cli.json_logs);
        assert!(matches!(cli.command, Command::BuyVsRent { ref tool, days: 9 } if tool == "sds-drill"));
    }

    #[tokio::test]
    async fn test_builtin_sources_load() {
        let sources = load_sources(None).await.unwrap();
        assert_eq!(sources.templates.list().await.len(), 8);
    }
}
