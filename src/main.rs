use anyhow::{anyhow, bail, Context, Result};
use colored::Colorize;
use optional_value::pipeline::Pipeline;
use optional_value::Optional;
use std::env;
use std::fs;

mod build_info {
    include!(concat!(env!("OUT_DIR"), "/build_info.rs"));
}

const MIN_ENV: &str = "OPTIONAL_PIPE_MIN";

struct Options {
    min: i64,
    path: Optional<String>,
    show_version: bool,
}

fn default_min() -> Result<i64> {
    match env::var(MIN_ENV) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {} value: {:?}", MIN_ENV, raw)),
        Err(_) => Ok(0),
    }
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options {
        min: default_min()?,
        path: Optional::empty(),
        show_version: false,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-V" => options.show_version = true,
            "--min" => {
                let raw = iter.next().context("--min expects a value")?;
                options.min = raw
                    .parse()
                    .with_context(|| format!("Invalid --min value: {:?}", raw))?;
            }
            flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
            path => {
                if options.path.is_present() {
                    bail!("Only one input file is accepted");
                }
                options.path = Optional::of_value(path.to_string());
            }
        }
    }

    Ok(options)
}

fn print_version() {
    println!(
        "{} {} ({} {})",
        build_info::PKG_NAME,
        build_info::VERSION,
        build_info::GIT_HASH,
        build_info::BUILD_TIME
    );
    println!(
        "{} [{}, {}]",
        build_info::RUSTC_VERSION,
        build_info::TARGET,
        build_info::PROFILE
    );
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = parse_args(&args)?;

    if options.show_version {
        print_version();
        return Ok(());
    }

    let path = options
        .path
        .or_else_throw(|| anyhow!("Usage: optional-pipe [--version] [--min N] <file>"))?;
    let source = fs::read_to_string(path)
        .with_context(|| format!("Error reading file {}", path))?;

    let pipeline = Pipeline::new(options.min);
    let results = pipeline.run_all(source.lines());

    for (line_no, result) in results.iter().enumerate() {
        let rendered = result.to_string();
        let rendered = if result.is_present() {
            rendered.green()
        } else {
            rendered.dimmed()
        };
        println!("{:>4} | {}", line_no + 1, rendered);
    }

    let present = results.iter().filter(|r| r.is_present()).count();
    println!(
        "\n{} present, {} empty (min = {})",
        present.to_string().bold(),
        (results.len() - present).to_string().bold(),
        pipeline.min()
    );

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
