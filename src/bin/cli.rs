//! Binary entry point for the itemnet CLI.
#![forbid(unsafe_code)]

#[path = "cli/config.rs"]
mod config;
#[path = "cli/ui.rs"]
mod ui;

use std::error::Error;
use std::io;
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use itemnet::{
    cli::{load_network, report, LinkRecord, PairImportConfig, StatsReport},
    logging::init_logging,
    network::{DegeneracyCheck, Network, NetworkOptions, NetworkSection},
};
use tracing::debug;

use config::{delimiter_byte, CliConfig};
use ui::{Theme, Ui};

const EXIT_NO_LINK: i32 = 3;

#[derive(Parser, Debug)]
#[command(
    name = "itemnet",
    version,
    about = "Count item pairs and query the resulting network",
    disable_help_subcommand = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "ITEMNET_CONFIG",
        value_name = "FILE",
        help = "Config file (defaults to the user config directory)"
    )]
    config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Output format for structured responses"
    )]
    format: OutputFormat,

    #[arg(
        long,
        global = true,
        env = "ITEMNET_LOG",
        default_value = "warn",
        help = "Log filter directive (e.g. info, itemnet=debug)"
    )]
    log_level: String,

    #[arg(long, global = true, value_enum, default_value_t = ThemeArg::Auto)]
    theme: ThemeArg,

    #[arg(long, global = true, help = "Suppress decoration and progress output")]
    quiet: bool,

    #[command(flatten)]
    network: NetworkArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct NetworkArgs {
    #[arg(long, global = true, help = "Treat (a, b) and (b, a) as distinct links")]
    keep_order: bool,

    #[arg(
        long,
        global = true,
        help = "Silently drop degenerate pairs instead of failing"
    )]
    ignore_key_equality_error: bool,

    #[arg(long, global = true, value_enum, help = "Predicate for degenerate pairs")]
    degeneracy: Option<DegeneracyArg>,
}

impl NetworkArgs {
    fn section(&self) -> NetworkSection {
        NetworkSection {
            keep_order: self.keep_order.then_some(true),
            ignore_key_equality_error: self.ignore_key_equality_error.then_some(true),
            degeneracy: self.degeneracy.map(Into::into),
        }
    }
}

#[derive(Args, Debug)]
struct InputArgs {
    #[arg(value_name = "CSV", help = "CSV file of item pairs")]
    csv: PathBuf,

    #[arg(long, help = "Column holding the first item")]
    a_column: Option<String>,

    #[arg(long, help = "Column holding the second item")]
    b_column: Option<String>,

    #[arg(long, help = "Column holding a per-row occurrence count")]
    count_column: Option<String>,

    #[arg(long, help = "Field delimiter")]
    delimiter: Option<char>,

    #[arg(long, help = "Input has no header row; columns are zero-based indexes")]
    no_headers: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(about = "Print every link as `a b count`, in creation order")]
    Links(InputArgs),

    #[command(about = "Per-item link counts and totals")]
    Stats(InputArgs),

    #[command(about = "Look up the link between two items")]
    Get {
        #[command(flatten)]
        input: InputArgs,
        #[arg(value_name = "A")]
        a: String,
        #[arg(value_name = "B")]
        b: String,
    },

    #[command(about = "List links incident to an item")]
    Containing {
        #[command(flatten)]
        input: InputArgs,
        #[arg(value_name = "ITEM")]
        item: String,
    },

    #[command(about = "Inspect or create the config file")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    #[command(about = "Print the config file path")]
    Path,
    #[command(about = "Print the loaded configuration")]
    Show,
    #[command(about = "Write a config file with default values")]
    Init {
        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ThemeArg {
    Auto,
    Light,
    Dark,
    Plain,
}

impl From<ThemeArg> for Theme {
    fn from(theme: ThemeArg) -> Self {
        match theme {
            ThemeArg::Auto => Theme::Auto,
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Plain => Theme::Plain,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum DegeneracyArg {
    Value,
    Hash,
    Never,
}

impl From<DegeneracyArg> for DegeneracyCheck {
    fn from(arg: DegeneracyArg) -> Self {
        match arg {
            DegeneracyArg::Value => DegeneracyCheck::ValueEquality,
            DegeneracyArg::Hash => DegeneracyCheck::HashEquality,
            DegeneracyArg::Never => DegeneracyCheck::Never,
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;
    let ui = Ui::new(cli.theme.into(), cli.quiet);
    let mut config = CliConfig::load(cli.config.clone())?;
    let opts = config
        .network()
        .merge(cli.network.section())
        .apply(NetworkOptions::new());
    let format = cli.format;

    match cli.command {
        Command::Links(input) => {
            let network = load(&input, &config, opts, &ui)?;
            match format {
                OutputFormat::Json => emit_json(&report::links(&network))?,
                OutputFormat::Text => network.print_links(),
            }
        }
        Command::Stats(input) => {
            let network = load(&input, &config, opts, &ui)?;
            let stats = StatsReport::collect(&network);
            match format {
                OutputFormat::Json => emit_json(&stats)?,
                OutputFormat::Text => print_stats_text(&ui, &stats),
            }
        }
        Command::Get { input, a, b } => {
            let network = load(&input, &config, opts, &ui)?;
            match network.get_link(&a, &b) {
                Some(edge) => match format {
                    OutputFormat::Json => emit_json(&LinkRecord::from(edge))?,
                    OutputFormat::Text => println!("{edge}"),
                },
                None => {
                    match format {
                        OutputFormat::Json => println!("null"),
                        OutputFormat::Text => ui.warn(&format!("no link between {a} and {b}")),
                    }
                    std::process::exit(EXIT_NO_LINK);
                }
            }
        }
        Command::Containing { input, item } => {
            let network = load(&input, &config, opts, &ui)?;
            let records = report::containing(&network, &item);
            match format {
                OutputFormat::Json => emit_json(&records)?,
                OutputFormat::Text => {
                    for record in &records {
                        println!("{} {} {}", record.a, record.b, record.count);
                    }
                }
            }
        }
        Command::Config { action } => match action {
            ConfigAction::Path => match config.path() {
                Some(path) => println!("{}", path.display()),
                None => return Err("no config directory found; pass --config".into()),
            },
            ConfigAction::Show => print!("{}", config.to_toml()?),
            ConfigAction::Init { force } => {
                let path = config.init(force)?;
                ui.success(&format!("wrote {}", path.display()));
            }
        },
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "itemnet", &mut io::stdout());
        }
    }

    Ok(())
}

fn load(
    input: &InputArgs,
    config: &CliConfig,
    opts: NetworkOptions,
    ui: &Ui,
) -> Result<Network<String>, Box<dyn Error>> {
    let import_cfg = build_import_config(input, config)?;
    let task = ui.task(&format!("loading {}", input.csv.display()));
    let (network, summary) = load_network(&import_cfg, opts)?;
    let elapsed = task.finish();
    debug!(
        rows = summary.rows,
        dropped = summary.dropped,
        elapsed_ms = elapsed.as_millis() as u64,
        "network loaded"
    );
    Ok(network)
}

fn build_import_config(
    input: &InputArgs,
    config: &CliConfig,
) -> Result<PairImportConfig, Box<dyn Error>> {
    let mut cfg = PairImportConfig::new(&input.csv);
    config.apply_import(&mut cfg)?;
    if input.no_headers {
        cfg.has_headers = false;
        if input.a_column.is_none() {
            cfg.a_column = "0".into();
        }
        if input.b_column.is_none() {
            cfg.b_column = "1".into();
        }
    }
    if let Some(col) = &input.a_column {
        cfg.a_column = col.clone();
    }
    if let Some(col) = &input.b_column {
        cfg.b_column = col.clone();
    }
    if let Some(col) = &input.count_column {
        cfg.count_column = Some(col.clone());
    }
    if let Some(delimiter) = input.delimiter {
        cfg.delimiter = delimiter_byte(delimiter)?;
    }
    Ok(cfg)
}

fn emit_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

fn print_stats_text(ui: &Ui, stats: &StatsReport) {
    ui.section(
        "Network",
        [
            ("policy", format!("{:?}", stats.policy).to_lowercase()),
            ("items", stats.items.to_string()),
            ("links", stats.edges.to_string()),
            ("total weight", stats.total_weight.to_string()),
            ("key collisions", stats.key_collisions.to_string()),
        ],
    );
    ui.list(
        "Items",
        stats
            .per_item
            .iter()
            .map(|item| format!("{} links={} weight={}", item.item, item.edges, item.weight)),
    );
}
