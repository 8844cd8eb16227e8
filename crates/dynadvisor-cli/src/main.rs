//! dyn-advisor: Dynamo graph recommendation and execution agent.
//!
//! Indexes a repository of `.dyn` graphs, recommends graphs for a free-text
//! intent, explains why, and can run a graph through the Dynamo CLI when
//! execution is enabled and explicitly requested.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::instrument::WithSubscriber;

mod commands;
mod logging;

use commands::RecommendArgs;
use dynadvisor_core::AdvisorConfig;

/// Dynamo graph recommendation and execution agent.
#[derive(Parser, Debug)]
#[command(name = "dyn-advisor")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the catalog by indexing all .dyn files
    Index {
        /// Path to graph repository (overrides .env)
        #[arg(long)]
        graph_repo: Option<PathBuf>,
        /// Path to documentation (overrides .env)
        #[arg(long)]
        docs_path: Option<PathBuf>,
    },
    /// Recommend graphs based on user query/intent
    Recommend {
        query: String,
        /// Maximum number of recommendations
        #[arg(long, default_value_t = 5, value_parser = parse_positive)]
        max_results: usize,
        /// Path to graph repository (overrides .env)
        #[arg(long)]
        graph_repo: Option<PathBuf>,
        /// Path to documentation (overrides .env)
        #[arg(long)]
        docs_path: Option<PathBuf>,
        /// Execute the top recommended graph (requires ALLOW_EXECUTION=true)
        #[arg(long)]
        run: bool,
        /// Show detailed explanation for each recommendation
        #[arg(long)]
        explain: bool,
    },
    /// Execute a specific graph by name
    Execute {
        graph_name: String,
        /// Path to graph repository (overrides .env)
        #[arg(long)]
        graph_repo: Option<PathBuf>,
        /// Execute the graph (requires ALLOW_EXECUTION=true)
        #[arg(long)]
        run: bool,
    },
    /// Show configuration and status
    Status,
}

fn parse_positive(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = AdvisorConfig::from_env()?;
    let logging = logging::init(&config)?;
    let dispatch = logging.dispatch.clone();

    run(cli.command, config, dispatch.clone())
        .with_subscriber(dispatch)
        .await
}

async fn run(command: Command, config: AdvisorConfig, dispatch: tracing::Dispatch) -> anyhow::Result<()> {
    match command {
        Command::Index {
            graph_repo,
            docs_path,
        } => commands::index(&config, graph_repo, docs_path, &dispatch),
        Command::Recommend {
            query,
            max_results,
            graph_repo,
            docs_path,
            run,
            explain,
        } => {
            let args = RecommendArgs {
                query,
                max_results,
                graph_repo,
                docs_path,
                run,
                explain,
            };
            commands::recommend(&config, args, &dispatch).await
        }
        Command::Execute {
            graph_name,
            graph_repo,
            run,
        } => commands::execute(&config, &graph_name, graph_repo, run, &dispatch).await,
        Command::Status => commands::status(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_defaults() {
        let cli = Cli::try_parse_from(["dyn-advisor", "recommend", "create a wall"]).unwrap();
        match cli.command {
            Command::Recommend {
                query,
                max_results,
                run,
                explain,
                graph_repo,
                ..
            } => {
                assert_eq!(query, "create a wall");
                assert_eq!(max_results, 5);
                assert!(!run);
                assert!(!explain);
                assert!(graph_repo.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_recommend_flags() {
        let cli = Cli::try_parse_from([
            "dyn-advisor",
            "recommend",
            "stairs",
            "--max-results",
            "2",
            "--graph-repo",
            "/data/graphs",
            "--run",
            "--explain",
        ])
        .unwrap();
        match cli.command {
            Command::Recommend {
                max_results,
                graph_repo,
                run,
                explain,
                ..
            } => {
                assert_eq!(max_results, 2);
                assert_eq!(graph_repo, Some(PathBuf::from("/data/graphs")));
                assert!(run);
                assert!(explain);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_max_results_must_be_positive() {
        assert!(Cli::try_parse_from(["dyn-advisor", "recommend", "x", "--max-results", "0"]).is_err());
    }

    #[test]
    fn test_execute_and_status() {
        let cli = Cli::try_parse_from(["dyn-advisor", "execute", "Wall Tags", "--run"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Execute { ref graph_name, run: true, .. } if graph_name == "Wall Tags"
        ));
        let cli = Cli::try_parse_from(["dyn-advisor", "status"]).unwrap();
        assert!(matches!(cli.command, Command::Status));
    }
}
