use botgraph::prelude::*;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Plots the conversational state graph of a Botshot chatbot
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory containing the Botshot chatbot
    #[arg(long)]
    bot_dir: PathBuf,

    /// Application directory (inside the bot directory) holding bot_settings
    #[arg(long, default_value = DEFAULT_APP_NAME)]
    app_name: String,

    /// Color the states of each flow differently
    #[arg(long)]
    colorful: bool,

    /// Where the Graphviz layout file is saved
    #[arg(long, default_value = "graph.gv")]
    graph_path: PathBuf,

    /// Where the JSON export is saved
    #[arg(long, default_value = "graph.json")]
    json_path: PathBuf,

    /// Save and render the diagram without opening it
    #[arg(long)]
    dont_show: bool,

    /// Export JSON instead of drawing a diagram
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Diagram
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        exit_with_error(&e.to_string());
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), GraphError> {
    let total_start = Instant::now();

    // --- 1. Settings and flow loading ---
    let settings = BotSettingsFile.load_settings(&cli.bot_dir, &cli.app_name)?;
    let flows = FlowLoader::new(&cli.bot_dir).load(&settings)?;
    println!(
        "Loaded {} flows from {} file(s)",
        flows.len(),
        settings.flow_files.len()
    );

    // --- 2. Graph construction ---
    println!("\nBuilding state graph...");
    let report = GraphBuilder::new(&cli.bot_dir).build(&flows)?;
    let skipped: Vec<&Diagnostic> = report.failures().collect();
    println!(
        "Graph built: {} states, {} transitions",
        report.ir.nodes.len(),
        report.ir.edges.len()
    );
    if !skipped.is_empty() {
        println!("Skipped {} problem(s):", skipped.len());
        for diagnostic in skipped {
            println!("  -> {}", diagnostic);
        }
    }

    // --- 3. Output ---
    match cli.output_format() {
        OutputFormat::Json => {
            JsonRenderer.write(&report.ir, &cli.json_path)?;
            println!("\nSaved JSON to '{}'", cli.json_path.display());
        }
        OutputFormat::Diagram => {
            let colors = if cli.colorful {
                FlowColors::colorful(&report.ir.flows, &mut rand::rng())
            } else {
                FlowColors::plain(&report.ir.flows)
            };
            let dot = DiagramRenderer::new(colors).to_dot(&report.ir)?;
            let artifact = DiagramArtifact::new(&cli.graph_path, dot);

            println!("\nDrawing graph...");
            let image = if cli.dont_show {
                artifact.save()?;
                artifact.render()?
            } else {
                artifact.view()?
            };
            println!(
                "Saved layout to '{}' and image to '{}'",
                artifact.path().display(),
                image.display()
            );
        }
    }

    println!("\nTotal Execution: {:?}", total_start.elapsed());
    Ok(())
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
