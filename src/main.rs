use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tasmee::{ComparisonResult, Discrepancy, Recitation, RecitationError, Report, TasmeeConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tasmee", about = "Check a recitation against its reference text")]
struct Cli {
    /// File holding the reference passage.
    reference: PathBuf,

    /// File holding the spoken text (a transcription).
    spoken: PathBuf,

    /// YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the comparison and report as JSON.
    #[arg(long)]
    json: bool,

    /// Treat each line of the spoken file as one streaming chunk.
    #[arg(long)]
    stream: bool,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let cfg = match &cli.config {
        Some(path) => TasmeeConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TasmeeConfig::default(),
    };
    let recitation = Recitation::new(&cfg).context("building checker")?;

    let reference = read_text(&cli.reference)?;
    let spoken = read_text(&cli.spoken)?;

    if recitation.normalizer().normalize(&spoken).is_empty() {
        eprintln!("error: {}", RecitationError::EmptyInput);
        return Ok(ExitCode::from(2));
    }

    if cli.stream {
        run_stream(cli, &recitation, &reference, &spoken)?;
    } else {
        let result = recitation.compare_full(&spoken, &reference);
        let total = recitation.normalizer().normalize(&reference).word_count();
        let said = recitation.normalizer().normalize(&spoken).word_count();
        let report = tasmee::summarize_comparison(&result, total, said);
        print_outcome(cli, &result, &report)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn run_stream(
    cli: &Cli,
    recitation: &Recitation,
    reference: &str,
    spoken: &str,
) -> anyhow::Result<()> {
    let mut state = recitation.start_session(reference);
    for line in spoken.lines().filter(|l| !l.trim().is_empty()) {
        let update = recitation
            .advance(&mut state, line)
            .context("advancing session")?;
        if cli.json {
            println!("{}", serde_json::to_string(&update)?);
        } else {
            println!(
                "cursor {:>4}  progress {:>5.1}%  next: {}",
                update.cursor_position,
                update.progress_percentage,
                if update.hint.is_end_of_text() {
                    "(end of text)".to_string()
                } else {
                    update.hint.words().join(" ")
                }
            );
            for d in &update.discrepancies {
                println!("  {}", describe(d));
            }
        }
    }

    let report = recitation.session_report(&state);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_outcome(
    cli: &Cli,
    result: &ComparisonResult,
    report: &Report,
) -> anyhow::Result<()> {
    if cli.json {
        let out = serde_json::json!({ "comparison": result, "report": report });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("similarity: {:.3}", result.overall_similarity);
    if result.discrepancies.is_empty() {
        println!("no discrepancies");
    }
    for d in &result.discrepancies {
        println!("  {}", describe(d));
    }
    print_report(report);
    Ok(())
}

fn print_report(report: &Report) {
    println!(
        "accuracy {:.1}%  completion {:.1}%  errors {} ({:.1} per 100 words)",
        report.accuracy, report.completion, report.total_errors, report.error_rate
    );
    for line in &report.suggestions {
        println!("- {line}");
    }
}

fn describe(d: &Discrepancy) -> String {
    match d {
        Discrepancy::Incorrect {
            position,
            spoken_word,
            expected_word,
            similarity,
        } => format!(
            "[{position}] incorrect: said {spoken_word}, expected {expected_word} ({similarity:.2})"
        ),
        Discrepancy::Missing {
            position,
            expected_word,
        } => format!("[{position}] missing: {expected_word}"),
        Discrepancy::Extra {
            position,
            spoken_word,
        } => format!("[{position}] extra: {spoken_word}"),
    }
}
