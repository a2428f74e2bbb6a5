use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use png2c_codec::NullReporter;
use png2c_tool::{run, Config, LogReporter, DEFAULT_NAME};

#[derive(Parser)]
#[command(name = "png2c")]
#[command(about = "Convert an RGBA PNG into a C array of RGB565 pixels")]
#[command(version)]
struct Cli {
    /// Input PNG file path
    #[arg(short, long)]
    input: PathBuf,

    /// Output C file path
    #[arg(short, long)]
    output: PathBuf,

    /// Name of the C structure generated
    #[arg(short, long, default_value = DEFAULT_NAME)]
    name: String,

    /// Print debug information
    #[arg(long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        LevelFilter::Error
    } else if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();
    if !cli.verbose {
        // plain messages unless debugging
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = Config::new(&cli.input, &cli.output).with_name(&cli.name);

    if cli.quiet {
        run(&config, &mut NullReporter)
    } else {
        run(&config, &mut LogReporter::new())
    }
}
