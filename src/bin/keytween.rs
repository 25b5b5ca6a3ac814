use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use keytween::{Iterations, TweenDocument};

#[derive(Parser, Debug)]
#[command(name = "keytween", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print interpolated values of a tween document as JSON lines.
    Sample(SampleArgs),
    /// Validate a tween document and print its resolved keyframe offsets.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input tween document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Sample at these times (milliseconds). Repeatable.
    #[arg(long = "at")]
    at: Vec<f64>,

    /// Number of evenly spaced steps over the whole timeline when no `--at` is given.
    #[arg(long, default_value_t = 10)]
    steps: u32,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input tween document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Sample(args) => cmd_sample(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn read_doc_json(path: &Path) -> anyhow::Result<TweenDocument> {
    let f = File::open(path).with_context(|| format!("open tween document '{}'", path.display()))?;
    let doc = TweenDocument::from_reader(BufReader::new(f))
        .with_context(|| "parse tween document JSON")?;
    Ok(doc)
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let doc = read_doc_json(&args.in_path)?;
    let mut tween = doc.build().context("build tween")?;

    let times = if args.at.is_empty() {
        let timing = tween.timing();
        let cycles = match timing.iterations() {
            Iterations::Count(n) => f64::from(n),
            Iterations::Infinite => 1.0,
        };
        let total = timing.end() * cycles;
        let steps = args.steps.max(1);
        (0..=steps)
            .map(|i| total * f64::from(i) / f64::from(steps))
            .collect()
    } else {
        args.at
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for t in times {
        let value = tween.update_at(t);
        let line = serde_json::json!({ "t": t, "value": value });
        writeln!(out, "{line}").context("write sample")?;
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let doc = read_doc_json(&args.in_path)?;
    let tween = doc.build().context("build tween")?;

    let timing = tween.timing();
    println!(
        "ok: {} keyframes, start={} end={} duration={} iterations={:?} fill={}",
        tween.keyframes().len(),
        timing.start(),
        timing.end(),
        timing.duration(),
        timing.iterations(),
        timing.fill()
    );
    for (i, k) in tween.keyframes().iter().enumerate() {
        println!("  [{i}] offset={}", k.offset.unwrap_or_default());
    }
    Ok(())
}
