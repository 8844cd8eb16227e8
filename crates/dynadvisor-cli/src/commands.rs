//! Subcommand handlers. Each builds a fresh catalog from the configured
//! repository; nothing is persisted between invocations.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, warn, Dispatch};

use dynadvisor_core::AdvisorConfig;
use dynadvisor_ingest::DynExtractor;
use dynadvisor_resolve::{Recommendation, Recommender};
use dynadvisor_runtime::{ExecutionResult, Executor};
use dynadvisor_store::{Catalog, GraphRecord};

fn rule() -> String {
    "=".repeat(80)
}

fn banner(title: &str) {
    info!("{}", rule());
    info!("{}", title);
    info!("{}", rule());
}

fn open_catalog(graph_repo: &Path, docs_path: Option<PathBuf>, dispatch: &Dispatch) -> Catalog {
    Catalog::new(graph_repo, docs_path, DynExtractor, dispatch.clone())
}

/// `index`: build the catalog and print a short summary.
pub fn index(
    config: &AdvisorConfig,
    graph_repo: Option<PathBuf>,
    docs_path: Option<PathBuf>,
    dispatch: &Dispatch,
) -> Result<()> {
    let repo = graph_repo.unwrap_or_else(|| config.graph_repo_path.clone());
    let docs = docs_path.unwrap_or_else(|| config.docs_path.clone());

    banner("INDEXING GRAPHS");
    info!("Graph repository: {}", repo.display());
    info!("Documentation path: {}", docs.display());

    let catalog = open_catalog(&repo, Some(docs), dispatch);
    let count = catalog.rebuild();

    banner(&format!("INDEXING COMPLETE: {} graphs indexed", count));

    println!("\n✓ Indexed {} Dynamo graphs from {}", count, repo.display());
    if count > 0 {
        println!("\nSample graphs:");
        for (i, graph) in catalog.get_all().iter().take(5).enumerate() {
            println!("  {}. {} ({} nodes)", i + 1, graph.name, graph.node_count);
        }
    }
    Ok(())
}

/// Options for the `recommend` subcommand.
pub struct RecommendArgs {
    pub query: String,
    pub max_results: usize,
    pub graph_repo: Option<PathBuf>,
    pub docs_path: Option<PathBuf>,
    pub run: bool,
    pub explain: bool,
}

/// `recommend`: rank graphs for a query and optionally run the best one.
pub async fn recommend(config: &AdvisorConfig, args: RecommendArgs, dispatch: &Dispatch) -> Result<()> {
    let repo = args.graph_repo.unwrap_or_else(|| config.graph_repo_path.clone());
    let docs = args.docs_path.unwrap_or_else(|| config.docs_path.clone());

    banner("RECOMMENDATION REQUEST");
    info!("Query: {}", args.query);
    info!("Max results: {}", args.max_results);
    info!("Run flag: {}", args.run);

    let catalog = open_catalog(&repo, Some(docs), dispatch);
    if catalog.rebuild() == 0 {
        println!("\n⚠ No graphs found in {}", repo.display());
        println!("Run 'dyn-advisor index' first or check your GRAPH_REPO_PATH");
        return Ok(());
    }

    let engine = Recommender::new(&catalog, dispatch.clone());
    let recommendations = engine.recommend(&args.query, args.max_results);
    if recommendations.is_empty() {
        info!("No recommendations found");
        println!("\n⚠ No graphs match your query: '{}'", args.query);
        return Ok(());
    }

    info!("Found {} recommendations", recommendations.len());
    info!("{}", rule());

    println!("\n📋 Recommendations for: '{}'", args.query);
    println!("{}", rule());
    for (i, rec) in recommendations.iter().enumerate() {
        print!("{}", format_recommendation(i + 1, rec));
        if args.explain {
            println!("\n   Detailed explanation:");
            for line in engine.explain(&rec.graph, &args.query).lines() {
                if !line.trim().is_empty() {
                    println!("   {}", line);
                }
            }
        }
    }

    if args.run {
        let top = &recommendations[0].graph;
        println!("\n{}", rule());
        println!("EXECUTION REQUEST");
        println!("{}", rule());

        let executor = Executor::from_config(config, dispatch.clone());
        let result = executor.execute_graph(top, true).await;
        print!("{}", format_execution(&result));
        info!("{}", rule());
    }

    Ok(())
}

/// `execute`: look a graph up by name and run it when `--run` is given.
pub async fn execute(
    config: &AdvisorConfig,
    graph_name: &str,
    graph_repo: Option<PathBuf>,
    run: bool,
    dispatch: &Dispatch,
) -> Result<()> {
    let repo = graph_repo.unwrap_or_else(|| config.graph_repo_path.clone());

    banner("EXECUTION REQUEST");
    info!("Graph name: {}", graph_name);
    info!("Run flag: {}", run);

    let catalog = open_catalog(&repo, None, dispatch);
    catalog.rebuild();

    let Some(graph) = catalog.get_by_name(graph_name) else {
        warn!("Graph not found: {}", graph_name);
        println!("\n⚠ Graph '{}' not found", graph_name);
        let available: Vec<String> = catalog
            .get_all()
            .into_iter()
            .take(10)
            .map(|g| g.name)
            .collect();
        println!("Available graphs: {}", available.join(", "));
        return Ok(());
    };

    info!("Found graph: {}", graph.name);
    print!("{}", format_graph_info(&graph));

    if run {
        println!("\n{}", rule());
        println!("EXECUTING");
        println!("{}", rule());

        let executor = Executor::from_config(config, dispatch.clone());
        let result = executor.execute_graph(&graph, true).await;
        print!("{}", format_execution(&result));
    } else {
        println!("\n⚠ Add --run flag to execute this graph");
    }

    info!("{}", rule());
    Ok(())
}

/// `status`: show configuration, path checks and safety state.
pub fn status(config: &AdvisorConfig) -> Result<()> {
    let cli_display = config
        .dynamo_cli_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not set)".to_string());
    let log_file = config
        .log_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not set)".to_string());

    println!("\ndyn-advisor Status");
    println!("{}", rule());

    println!("\nConfiguration:");
    println!("  Graph repository: {}", config.graph_repo_path.display());
    println!("  Documentation path: {}", config.docs_path.display());
    println!("  Execution allowed: {}", config.allow_execution);
    println!("  Dynamo CLI path: {}", cli_display);
    println!("  Execution timeout: {}s", config.execution_timeout.as_secs());
    println!("  Log level: {}", config.log_level);
    println!("  Log file: {}", log_file);

    let cli_exists = config
        .dynamo_cli_path
        .as_ref()
        .map(|p| p.exists())
        .unwrap_or(false);

    println!("\nPath checks:");
    println!("  Graph repository exists: {}", config.graph_repo_path.exists());
    println!("  Documentation path exists: {}", config.docs_path.exists());
    println!("  Dynamo CLI exists: {}", cli_exists);

    println!("\nSafety status:");
    if config.allow_execution {
        println!("  ⚠ Execution is ENABLED");
        if !cli_exists {
            println!("  ⚠ But Dynamo CLI is not configured or not found");
        }
    } else {
        println!("  ✓ Execution is DISABLED (safe)");
    }

    println!("\nTo enable execution:");
    println!("  1. Set ALLOW_EXECUTION=true in .env");
    println!("  2. Set DYNAMO_CLI_PATH to your Dynamo executable in .env");
    println!("  3. Use --run flag when running recommend or execute commands");
    Ok(())
}

fn format_recommendation(rank: usize, rec: &Recommendation) -> String {
    let graph = &rec.graph;
    format!(
        "\n{}. {} (score: {:.1})\n   {}\n   Category: {}\n   Nodes: {}, Connectors: {}\n   Path: {}\n",
        rank,
        graph.name,
        rec.score,
        rec.explanation,
        graph.category,
        graph.node_count,
        graph.connector_count,
        graph.filepath
    )
}

fn format_graph_info(graph: &GraphRecord) -> String {
    let description = if graph.description.is_empty() {
        "N/A"
    } else {
        graph.description.as_str()
    };
    format!(
        "\nGraph: {}\nDescription: {}\nCategory: {}\nPath: {}\n",
        graph.name, description, graph.category, graph.filepath
    )
}

fn format_execution(result: &ExecutionResult) -> String {
    if !result.executed {
        return format!("\n⚠ {}\n", result.message);
    }
    if result.success {
        let mut out = format!("\n✓ {}\n", result.message);
        if !result.output.is_empty() {
            out.push_str(&format!("\nOutput:\n{}\n", result.output));
        }
        out
    } else {
        let mut out = format!("\n✗ {}\n", result.message);
        if !result.error.is_empty() {
            out.push_str(&format!("\nError:\n{}\n", result.error));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_recommendation() {
        let mut graph = GraphRecord::new("/repo/wall.dyn", "Wall Analysis");
        graph.category = "Analysis".into();
        graph.node_count = 4;
        graph.connector_count = 3;
        let rec = Recommendation {
            graph,
            score: 27.0,
            explanation: "Recommended because name matches 'Wall Analysis'.".into(),
        };
        let text = format_recommendation(1, &rec);
        assert!(text.contains("1. Wall Analysis (score: 27.0)"));
        assert!(text.contains("   Nodes: 4, Connectors: 3"));
        assert!(text.contains("   Path: /repo/wall.dyn"));
    }

    #[test]
    fn test_format_graph_info_without_description() {
        let graph = GraphRecord::new("/repo/a.dyn", "A");
        assert!(format_graph_info(&graph).contains("Description: N/A"));
    }

    #[test]
    fn test_format_execution_variants() {
        let refused = ExecutionResult::refused("Execution is disabled.");
        assert_eq!(format_execution(&refused), "\n⚠ Execution is disabled.\n");

        let ok = ExecutionResult {
            success: true,
            executed: true,
            message: "done".into(),
            output: "42".into(),
            error: String::new(),
        };
        assert_eq!(format_execution(&ok), "\n✓ done\n\nOutput:\n42\n");

        let failed = ExecutionResult {
            executed: true,
            message: "failed with code 1".into(),
            error: "boom".into(),
            ..Default::default()
        };
        assert_eq!(format_execution(&failed), "\n✗ failed with code 1\n\nError:\nboom\n");
    }
}
