//! chess-insight - static analysis of a single chess position.
//!
//! Prints the full analysis as JSON, a per-side text summary, or the record
//! of one square.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chess_core::{Color, FenParser, Square};
use chess_insight::{AnalysisResult, Analyzer, EvalConfig, TeamStructure};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Summary,
}

/// Static chess position analysis.
#[derive(Parser)]
#[command(name = "chess-insight")]
#[command(about = "Square control, mobility, pawn structure and piece grades for a FEN")]
struct Args {
    /// Position to analyze, in FEN
    #[arg(default_value = FenParser::STARTPOS)]
    fen: String,

    /// TOML file overriding mobility ceilings or phase weights
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: Format,

    /// Print only this square's record (e.g. e4)
    #[arg(short, long)]
    square: Option<String>,

    /// Log pipeline stages and per-piece scores to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::TRACE
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => EvalConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EvalConfig::default(),
    };
    tracing::debug!(fen = %args.fen, "analyzing");

    let analyzer = Analyzer::new(config).context("invalid evaluation config")?;
    let result = analyzer
        .analyze(&args.fen)
        .with_context(|| format!("analyzing {:?}", args.fen))?;

    if let Some(name) = &args.square {
        let sq = Square::from_algebraic(name)
            .with_context(|| format!("{name:?} is not a square"))?;
        println!("{}", serde_json::to_string_pretty(result.square(sq))?);
        return Ok(());
    }

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        Format::Summary => print_summary(&result),
    }
    Ok(())
}

fn print_summary(result: &AnalysisResult) {
    let phase = result.phase();
    println!("Phase: {} ({:.2})", phase.label, phase.value);
    for color in Color::BOTH {
        println!();
        print_team(result, result.team(color));
    }
}

fn print_team(result: &AnalysisResult, team: &TeamStructure) {
    let material = &team.material;
    println!(
        "{}: material {} ({} pieces, {} pawns), mobility {} (avg {:.2})",
        team.color,
        material.total_value,
        material.piece_count,
        material.pawn_count,
        team.total_mobility,
        team.average_mobility
    );

    for sq in team.squares() {
        let cell = result.square(sq);
        let (Some(occupant), Some(evaluation)) = (cell.occupant, &cell.evaluation) else {
            continue;
        };
        let placeholders = evaluation.placeholders().count();
        let note = if placeholders > 0 {
            format!("  ({placeholders} placeholder metrics)")
        } else {
            String::new()
        };
        println!(
            "  {}{:<3} {:>4.1} {}{}",
            occupant.piece.to_fen_char(occupant.color),
            sq.to_algebraic(),
            evaluation.total_score,
            evaluation.grade,
            note
        );
    }

    let buckets = &team.pawn_structure;
    for (name, squares) in [
        ("isolated", &buckets.isolated),
        ("doubled", &buckets.doubled),
        ("passed", &buckets.passed),
        ("backward", &buckets.backward),
        ("blocked", &buckets.blocked),
        ("hanging", &buckets.hanging),
    ] {
        if !squares.is_empty() {
            let list: Vec<String> = squares.iter().map(|sq| sq.to_string()).collect();
            println!("  {name} pawns: {}", list.join(" "));
        }
    }
}
