use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use structdoc_cli::error::DocError;
use structdoc_cli::output::render::Renderer;
use structdoc_cli::output::writer;
use structdoc_cli::scanner::go_parser::TreeSitterGo;
use structdoc_cli::scanner::{self, LoadOptions};

#[derive(Parser)]
#[command(
    name = "structdoc",
    version,
    about = "Document the YAML shape of Go structs"
)]
struct Cli {
    /// Directory to parse (required)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Struct name or pattern (supports * and ?)
    #[arg(long = "struct", default_value = "")]
    struct_pattern: String,

    /// Directory path filter (supports * and ?)
    #[arg(long)]
    dir_filter: Option<String>,

    /// Allow creating a temporary go.mod when none is found (intended for tests)
    #[arg(long)]
    allow_create_go_mod: bool,

    /// Print the selected structs as JSON instead of the outline
    #[arg(long)]
    json: bool,

    /// Log loading progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        println!("{e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), DocError> {
    let root = cli.dir.as_deref().ok_or(DocError::MissingDir)?;
    let options = LoadOptions {
        dir_filter: cli.dir_filter.clone(),
        allow_create_marker: cli.allow_create_go_mod,
    };

    let map = scanner::load(root, &options, &TreeSitterGo)?;
    let selected = structdoc_cli::select(&map, &cli.struct_pattern)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        writer::write_json(&mut out, root, &selected)?;
    } else {
        let renderer = Renderer::new(&map);
        for record in selected {
            renderer.render_record(&mut out, record)?;
        }
    }
    out.flush()?;
    Ok(())
}
