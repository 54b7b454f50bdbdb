use clap::{Parser, Subcommand};
use resort_site::cms::ContentSource;
use resort_site::cms::http::HttpSource;
use resort_site::cms::snapshot::SnapshotSource;
use resort_site::cms::{Content, Perspective};
use resort_site::logging::init_logging;
use resort_site::schema::Registry;
use resort_site::{config, generate, output, server};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "resort-site")]
#[command(about = "Travel site generator backed by a headless CMS")]
#[command(long_about = "\
Travel site generator backed by a headless CMS

Content (destinations, articles, page-builder pages, site settings and
menus) is read from the CMS query API, or from a dataset export with
--snapshot. The same renderer backs the static build and the server.

Routes:

  /                       home (the `home` page document, or a built-in landing page)
  /destinations           destinations, featured first
  /destinations/{slug}    destination detail
  /articles               articles, newest first
  /articles/{slug}        article detail
  /{slug}                 page-builder page
  /sitemap.xml, /robots.txt

Secrets come from the environment: the CMS read token ($SANITY_API_TOKEN)
and the draft-mode secret ($SANITY_PREVIEW_SECRET). Variable names are
configurable in site.toml.

Run 'resort-site gen-config' to generate a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Site configuration file
    #[arg(long, default_value = "site.toml", global = true)]
    config: PathBuf,

    /// Read content from a dataset export (JSON array or NDJSON) instead of the CMS API
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every route into the output directory
    Build,
    /// Serve pages rendered per request, with draft mode
    Serve {
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
    },
    /// Validate every document against the content schema
    Check,
    /// Print the content schema as JSON
    Schema,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Schema => {
            let registry = Registry::standard();
            println!("{}", serde_json::to_string_pretty(registry.types())?);
        }
        Command::Build => {
            init_logging();
            let site_config = config::load_config(&cli.config)?;
            let source = open_source(&site_config, cli.snapshot.as_deref())?;
            println!("==> Building from {}", source.describe());
            let report = generate::generate(&site_config, source.as_ref(), &cli.output)?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Serve { port } => {
            init_logging();
            let mut site_config = config::load_config(&cli.config)?;
            if let Some(port) = port {
                site_config.server.port = port;
            }
            let source = open_source(&site_config, cli.snapshot.as_deref())?;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(site_config, source))?;
        }
        Command::Check => {
            init_logging();
            let site_config = config::load_config(&cli.config)?;
            let source = open_source(&site_config, cli.snapshot.as_deref())?;
            println!("==> Checking {}", source.describe());
            let documents = Content::new(source.as_ref(), Perspective::Published).all_documents()?;
            let reports = Registry::standard().check_documents(&documents);
            output::print_check_output(&reports);
            if reports.iter().any(|r| !r.violations.is_empty()) {
                return Ok(ExitCode::FAILURE);
            }
            println!("==> Content is valid");
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// The snapshot file when given, otherwise the CMS query API.
fn open_source(
    site_config: &config::SiteConfig,
    snapshot: Option<&Path>,
) -> Result<Arc<dyn ContentSource>, resort_site::cms::CmsError> {
    let source: Arc<dyn ContentSource> = match snapshot {
        Some(path) => Arc::new(SnapshotSource::load(path)?),
        None => Arc::new(HttpSource::new(&site_config.cms)?),
    };
    Ok(source)
}
