use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use precfun::{output::Format, syntax::TableFile};
use std::{fs, path::PathBuf, time::Instant};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The output language of the f/g arrays.
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,

    /// Prefix of the generated array names.
    #[arg(long)]
    name: Option<String>,

    /// Specify the path of generated file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the ordering graph to stderr.
    #[arg(long)]
    dump_graph: bool,

    /// Print the longest path of every vertex to stderr.
    #[arg(long)]
    dump_distances: bool,

    /// Check the computed functions against every relation of the table.
    #[arg(long)]
    verify: bool,

    /// The path of precedence table file.
    input: PathBuf,
}

#[derive(Debug, Copy, Clone, PartialEq, ValueEnum)]
enum OutputFormat {
    Plain,
    Rust,
    C,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    tracing::debug!("parsed CLI args = {:?}", args);

    process_file(&args)
        .with_context(|| anyhow::anyhow!("errored during processing {}", args.input.display()))?;

    Ok(())
}

fn process_file(args: &Args) -> anyhow::Result<()> {
    let s = Instant::now();
    let file = TableFile::from_file(&args.input).context("failed to load the precedence table")?;
    tracing::info!("load_file: {:?} elapsed", s.elapsed());

    let s = Instant::now();
    let output = precfun::compile(&file.matrix, &file.groups)?;
    tracing::info!("compile: {:?} elapsed", s.elapsed());

    if args.dump_graph {
        eprintln!("{}", output.graph.display(&output.classes));
    }
    if args.dump_distances {
        eprintln!("{}", output.distances.display(&output.classes));
    }

    if args.verify {
        let violations = output.functions.violations(&file.matrix, &output.classes);
        for violation in &violations {
            eprintln!("[error] {}", violation);
        }
        if !violations.is_empty() {
            anyhow::bail!("{} relations are not reproduced", violations.len());
        }
    }

    let sequences = output.sequences(file.order.as_deref())?;

    let format = match args.format {
        OutputFormat::Plain => Format::Plain,
        OutputFormat::Rust => Format::Rust,
        OutputFormat::C => Format::C,
    };
    let rendered = sequences.render(format, args.name.as_deref())?.to_string();

    match &args.output {
        Some(out_file) => fs::write(out_file, rendered).with_context(|| {
            anyhow::anyhow!("failed to write the functions to {}", out_file.display())
        })?,
        None => print!("{}", rendered),
    }

    Ok(())
}
