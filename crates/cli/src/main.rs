//! `raml2ts` command-line entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod generate;

#[derive(Parser, Debug)]
#[command(
    name = "raml2ts",
    version,
    about = "Generate TypeScript declarations from a RAML 0.8 document"
)]
struct Cli {
    #[command(flatten)]
    args: generate::GenerateArgs,
}

fn main() {
    init_tracing();
    std::process::exit(run_cli(std::env::args()));
}

fn run_cli<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => generate::run(cli.args),
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

fn init_tracing() {
    // RAML2TS_LOG controls log level: "trace", "debug", "info", "warn", "error"
    // or a full tracing filter spec like "raml2ts_core=debug"
    let filter = match std::env::var("RAML2TS_LOG") {
        Ok(level) if is_plain_level(&level) => {
            format!("raml2ts={level},raml2ts_core={level}")
        }
        Ok(spec) => spec,
        Err(_) => "raml2ts=warn,raml2ts_core=warn".to_string(),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
