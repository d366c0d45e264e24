use clap::{Parser, Subcommand};
use kumitate::catalog::{JsonFileProvider, StepProvider, StepQuery, TemplateCatalog};
use kumitate::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Compiles saved editor graphs into job definitions and inspects step catalogs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a graph snapshot (or a saved job) into a job definition
    Compile {
        /// Path to the graph JSON: a `{ nodes, connections }` snapshot or a saved job
        #[arg(short, long)]
        graph: PathBuf,
        /// Name of the job to produce
        #[arg(short, long)]
        name: String,
        /// Step catalog JSON used to validate step types
        #[arg(short, long)]
        catalog: Option<PathBuf>,
        /// Where to write the job definition; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the templates of a step catalog
    Catalog {
        /// Path to the step catalog JSON
        #[arg(short, long)]
        catalog: PathBuf,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        library: Option<String>,
        /// Case-insensitive text matched against name, description and step type
        #[arg(short, long)]
        search: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Compile {
            graph,
            name,
            catalog,
            output,
        } => run_compile(graph, name, catalog, output),
        Command::Catalog {
            catalog,
            category,
            library,
            search,
        } => run_catalog(
            catalog,
            StepQuery {
                category,
                library,
                search,
                use_remote: false,
            },
        ),
    }
}

/// Reads either a bare snapshot or the `flow` of a previously saved job.
fn load_snapshot(path: &Path) -> GraphSnapshot {
    let json = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read graph file '{}': {}",
            path.display(),
            e
        ))
    });
    if let Ok(job) = JobDefinition::from_json(&json) {
        return job.definition.flow;
    }
    serde_json::from_str(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse graph JSON: {}", e)))
}

fn load_catalog(path: PathBuf, query: StepQuery) -> TemplateCatalog {
    let provider = JsonFileProvider::new(path);
    let mut catalog = TemplateCatalog::new();
    let ticket = catalog.begin_load(query.clone());
    let result = pollster::block_on(provider.get_available_steps(&query));
    catalog.complete_load(ticket, result);
    if let Some(err) = catalog.last_error() {
        exit_with_error(&format!("Failed to load step catalog: {}", err));
    }
    catalog
}

fn run_compile(
    graph_path: PathBuf,
    name: String,
    catalog_path: Option<PathBuf>,
    output: Option<PathBuf>,
) {
    let start = Instant::now();

    let snapshot = load_snapshot(&graph_path);
    let step_types: Vec<String> = snapshot.nodes.iter().map(|n| n.step_type.clone()).collect();
    let mut builder = Compiler::builder(snapshot, name);
    match catalog_path {
        Some(path) => {
            let catalog = load_catalog(path, StepQuery::default());
            builder = builder.with_templates(catalog.templates());
        }
        None => {
            // Without a catalog every step type in the graph is accepted.
            for step_type in step_types {
                builder = builder.with_step_type(step_type);
            }
        }
    }

    let job = builder
        .build()
        .compile()
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));

    match output {
        Some(path) => {
            job.save(&path)
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            println!(
                "Compiled job '{}' with {} steps to {} in {:?}",
                job.name,
                job.definition.steps.len(),
                path.display(),
                start.elapsed()
            );
        }
        None => {
            let json = job
                .to_json_pretty()
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            println!("{}", json);
        }
    }
}

fn run_catalog(path: PathBuf, query: StepQuery) {
    let catalog = load_catalog(path, query);
    let templates = catalog.templates();
    if templates.is_empty() {
        println!("No step templates found.");
        return;
    }

    println!("{} step templates:", templates.len());
    for template in templates {
        println!(
            "  {:<28} {:<24} [{} / {}] in:{} out:{}",
            template.template_id,
            template.display_name,
            template.category,
            template.library,
            template.input_port_count,
            template.output_port_count
        );
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
