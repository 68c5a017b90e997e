use clap::{Parser, Subcommand};
use pagewright::build::Pipeline;
use pagewright::render::CmarkRenderer;
use pagewright::{config, output};
use std::path::PathBuf;

/// Package version, with the short git hash appended on builds made from
/// a checkout.
fn version_string() -> String {
    let hash = env!("GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION").to_string()
    } else {
        format!("{} ({hash})", env!("CARGO_PKG_VERSION"))
    }
}

#[derive(Parser)]
#[command(name = "pagewright")]
#[command(about = "Static site generator: content discovery, routing, and navigation")]
#[command(long_about = "\
Static site generator: content discovery, routing, and navigation

Your filesystem is the data source. Each page type owns a source directory;
markdown files become pages with routes derived from their paths.

Content structure:

  project/
  ├── config.toml                  # Site config (optional)
  ├── _pages/                      # Pages → site root
  │   ├── index.md                 # Route: index
  │   ├── about.md                 # Route: about
  │   └── _draft.md                # Underscore prefix = skipped
  ├── _posts/                      # Blog posts → posts/
  │   └── 2024-01-15-launch.md     # Date from filename prefix
  └── _docs/                       # Documentation → docs/ (flattened)
      ├── index.md                 # Docs landing page (in main menu)
      └── getting-started/
          └── install.md           # Route: docs/install, sidebar group
                                   # \"Getting Started\"

Front matter (optional, YAML between --- fences) overrides every computed
field: title, date, author, navigation label/group/priority/hidden.

Title resolution (first available wins):
  front matter `title` → first `# heading` → humanized filename

Run 'pagewright gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Project root containing the content source directories
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "_site", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (route manifest)
    #[arg(long, default_value = ".pagewright-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Discover content and write the route manifest
    Scan,
    /// Run the full pipeline: discover → render → write HTML
    Build,
    /// Validate content without writing output
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let site_config = config::load_config(&cli.source)?;
            let pretty_urls = site_config.pretty_urls;
            let mut pipeline = Pipeline::new(&cli.source, site_config);
            let discovery = pipeline.discover()?;

            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&discovery.manifest(pretty_urls))?;
            std::fs::write(&manifest_path, json)?;

            output::print_discovery(&discovery, pretty_urls);
            exit_on_failures(discovery.failures.len());
        }
        Command::Build => {
            let site_config = config::load_config(&cli.source)?;
            let pretty_urls = site_config.pretty_urls;
            let mut pipeline = Pipeline::new(&cli.source, site_config);

            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let report = pipeline.build(&cli.output, &CmarkRenderer)?;
            output::print_build_report(&report, pretty_urls);
            exit_on_failures(report.discovery.failures.len());
        }
        Command::Check => {
            let site_config = config::load_config(&cli.source)?;
            let pretty_urls = site_config.pretty_urls;
            let mut pipeline = Pipeline::new(&cli.source, site_config);

            println!("==> Checking {}", cli.source.display());
            let discovery = pipeline.discover()?;
            output::print_discovery(&discovery, pretty_urls);
            if discovery.failures.is_empty() {
                println!("==> Content is valid");
            }
            exit_on_failures(discovery.failures.len());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Per-file failures skip pages instead of aborting, but the run still
/// fails: authors must see a non-zero exit when anything broke.
fn exit_on_failures(count: usize) {
    if count > 0 {
        eprintln!("{count} page(s) failed to build");
        std::process::exit(1);
    }
}
