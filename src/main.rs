use std::io::{BufRead, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sandbox_fs::tools::{self, ToolRequest};
use sandbox_fs::{AllowedRoots, Context, Result};

#[derive(Debug, Parser)]
#[command(name = "sandbox-fs")]
#[command(about = "Filesystem tools confined to an explicit allow-list of directories.")]
struct Cli {
    /// Directories the process is allowed to operate in.
    #[arg(required = true, value_name = "ALLOWED_DIR")]
    allowed_dirs: Vec<String>,
}

fn main() {
    // Diagnostics go to stderr; stdout stays a clean protocol stream.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        tracing::error!(error = %err, "fatal");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let roots = AllowedRoots::new(&cli.allowed_dirs)?;
    for root in roots.roots() {
        tracing::info!(root = %root.display(), "allowed directory");
    }
    let ctx = Context::new(roots);

    serve(&ctx, std::io::stdin().lock(), std::io::stdout().lock())
}

/// Line-delimited JSON request/response loop. Malformed requests come back
/// as error responses; only transport failures end the loop.
fn serve(ctx: &Context, input: impl BufRead, mut output: impl Write) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<ToolRequest>(&line) {
            Ok(request) => {
                tracing::debug!(tool = request.name(), "dispatch");
                tools::dispatch_to_response(ctx, request)
            }
            Err(err) => tools::ToolResponse {
                content: format!("Error: invalid request: {err}"),
                is_error: true,
            },
        };
        serde_json::to_writer(&mut output, &response)?;
        output.write_all(b"\n")?;
        output.flush()?;
    }
    Ok(())
}
