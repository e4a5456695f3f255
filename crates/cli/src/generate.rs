use clap::Args;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use raml2ts_core::raml::HttpMethod;
use raml2ts_core::{RendererOptions, generate_declarations};

#[derive(Args, Debug, Clone, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct GenerateArgs {
    /// RAML document to read; `-` or nothing reads stdin
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// File to write declarations to instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// TOML file with renderer options; flags override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit the endpoint index interface
    #[arg(long)]
    pub add_endpoint_list: bool,

    /// Name of the endpoint index interface
    #[arg(long, value_name = "NAME")]
    pub endpoint_interface: Option<String>,

    /// Name of the integer alias
    #[arg(long, value_name = "NAME")]
    pub emit_integer_as: Option<String>,

    /// Mark every field readonly
    #[arg(long)]
    pub readonly: bool,

    /// Include request body examples in comments
    #[arg(long)]
    pub request_examples: bool,

    /// Include response body examples in comments
    #[arg(long)]
    pub response_examples: bool,

    /// List the endpoints returning each model
    #[arg(long)]
    pub request_urls: bool,

    /// Spaces per indentation level
    #[arg(long, value_name = "SPACES")]
    pub indent: Option<usize>,

    /// Prepended to every model interface name
    #[arg(long, value_name = "PREFIX")]
    pub interface_prefix: Option<String>,

    /// Appended to every model interface name
    #[arg(long, value_name = "SUFFIX")]
    pub interface_suffix: Option<String>,

    /// Target width of comment lines
    #[arg(long, value_name = "COLUMNS")]
    pub max_line_length: Option<usize>,

    /// Comma-separated order of method groups, e.g. `GET,POST,DELETE`
    #[arg(long, value_name = "METHODS", value_delimiter = ',', value_parser = parse_method)]
    pub method_sort_order: Vec<HttpMethod>,

    /// Keep models in discovery order
    #[arg(long)]
    pub no_sort_interfaces: bool,

    /// Sort fields by name
    #[arg(long)]
    pub sort_keys: bool,
}

impl GenerateArgs {
    /// Options from the config file (or defaults) with flags applied on top.
    fn options(&self) -> Result<RendererOptions, String> {
        let mut options = match &self.config {
            Some(path) => RendererOptions::load(path).map_err(|e| e.to_string())?,
            None => RendererOptions::default(),
        };

        if self.add_endpoint_list {
            options.add_endpoint_list = true;
        }
        if let Some(name) = &self.endpoint_interface {
            options.endpoint_interface.clone_from(name);
        }
        if let Some(name) = &self.emit_integer_as {
            options.emit_integer_as.clone_from(name);
        }
        if self.readonly {
            options.emit_interfaces_as_readonly = true;
        }
        if self.request_examples {
            options.emit_request_examples = true;
        }
        if self.response_examples {
            options.emit_response_examples = true;
        }
        if self.request_urls {
            options.emit_request_urls = true;
        }
        if let Some(spaces) = self.indent {
            options.indentation = " ".repeat(spaces);
        }
        if let Some(prefix) = &self.interface_prefix {
            options.interface_prefix.clone_from(prefix);
        }
        if let Some(suffix) = &self.interface_suffix {
            options.interface_suffix.clone_from(suffix);
        }
        if let Some(width) = self.max_line_length {
            options.max_line_length = width;
        }
        if !self.method_sort_order.is_empty() {
            options.method_sort_order.clone_from(&self.method_sort_order);
        }
        if self.no_sort_interfaces {
            options.sort_interfaces = false;
        }
        if self.sort_keys {
            options.sort_keys = true;
        }

        Ok(options)
    }
}

fn parse_method(value: &str) -> Result<HttpMethod, String> {
    HttpMethod::from_key(&value.trim().to_ascii_lowercase())
        .ok_or_else(|| format!("unknown HTTP method '{value}'"))
}

pub fn run(args: GenerateArgs) -> i32 {
    match generate(&args) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn generate(args: &GenerateArgs) -> Result<(), String> {
    let options = args.options()?;
    let text = read_input(args.input.as_deref())?;
    let declarations = generate_declarations(text.as_str(), &options).map_err(|e| e.to_string())?;

    match &args.output {
        Some(path) => {
            fs::write(path, &declarations)
                .map_err(|err| format!("Failed to write {}: {err}", path.display()))?;
            debug!(path = %path.display(), bytes = declarations.len(), "Wrote declarations.");
        }
        None => io::stdout()
            .write_all(declarations.as_bytes())
            .map_err(|err| format!("Failed to write to stdout: {err}"))?,
    }

    Ok(())
}

fn read_input(input: Option<&Path>) -> Result<String, String> {
    match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .map_err(|err| format!("Failed to read {}: {err}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|err| format!("Failed to read stdin: {err}"))?;
            Ok(text)
        }
    }
}
