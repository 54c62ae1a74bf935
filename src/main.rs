use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};

use tumblr_export::{config, PluginContext, TumblrPlugin};

#[derive(Parser, Debug)]
#[command(name = "tumblr-export")]
#[command(about = "Post the photos of an export payload to Tumblr")]
struct Args {
    /// Export payload (JSON-LD), or `-` to read from stdin
    #[arg(value_name = "PAYLOAD")]
    payload: PathBuf,

    /// Plugin options file (defaults to <config dir>/tumblr-export/options.json)
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,
}

fn read_payload(path: &Path) -> Result<serde_json::Value> {
    let payload_str = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read payload from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload {}", path.display()))?
    };

    serde_json::from_str(&payload_str).context("Export payload is not valid JSON")
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let options = config::resolve_options(args.options.as_deref())
        .context("Failed to load plugin options")?;
    let payload = read_payload(&args.payload)?;

    let plugin = TumblrPlugin::new(&options, PluginContext::default());
    plugin.export(Some(&payload)).await;

    Ok(())
}
