use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "style-expr", version)]
struct Cli {
    /// Map zoom to evaluate at.
    #[arg(long, global = true)]
    zoom: Option<f64>,

    /// Feature JSON (`{"properties": {...}}`) to evaluate against.
    #[arg(long, global = true)]
    feature: Option<PathBuf>,

    /// Property specification JSON.
    #[arg(long, global = true)]
    spec: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a legacy stop function.
    Function {
        /// Function definition JSON.
        #[arg(long)]
        params: PathBuf,
    },
    /// Compile and evaluate an expression.
    Expression {
        /// Expression JSON.
        #[arg(long)]
        expr: PathBuf,

        /// Substitute the property default instead of failing on runtime errors.
        #[arg(long)]
        fallback: bool,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing("warn");
    let cli = Cli::parse();

    let globals = style_expr::GlobalProperties {
        zoom: cli.zoom,
        ..Default::default()
    };
    let feature: Option<style_expr::Feature> = cli
        .feature
        .as_deref()
        .map(|p| read_json(p, "feature"))
        .transpose()?;
    let spec = cli
        .spec
        .as_deref()
        .map(|p| -> anyhow::Result<_> {
            Ok(style_expr::PropertySpec::from_json(&read_json(p, "property spec")?)?)
        })
        .transpose()?;

    let value = match cli.cmd {
        Command::Function { params } => {
            let params = style_expr::FunctionParameters::from_json(&read_json(&params, "function")?)?;
            let spec = spec.unwrap_or_else(|| style_expr::PropertySpec::new("number"));
            let function = style_expr::create_function(&params, &spec)?;
            function
                .evaluate(&globals, feature.as_ref())
                .unwrap_or(style_expr::Value::Null)
        }
        Command::Expression { expr, fallback } => {
            let raw: serde_json::Value = read_json(&expr, "expression")?;
            let compiled = match style_expr::create_expression(&raw, spec.as_ref()) {
                Ok(compiled) => compiled,
                Err(errors) => {
                    for e in &errors {
                        eprintln!("{e}");
                    }
                    anyhow::bail!("expression failed to compile ({} errors)", errors.len());
                }
            };
            if fallback {
                compiled.evaluate_with_default(&globals, feature.as_ref())
            } else {
                compiled
                    .evaluate(&globals, feature.as_ref())
                    .context("evaluate expression")?
            }
        }
    };

    println!("{}", value.to_json());
    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse {what} JSON"))
}
