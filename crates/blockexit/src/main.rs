use anyhow::{Context, Result};
use blockexit::levels::{Level, LevelRules, level_path};
use blockexit::replay::{MoveResult, ReplayReport, ReplayRunner, ReplayScript, parse_moves, verify};
use blockexit::AppConfig;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply moves to a level and print what happened
    Play {
        /// Level file (.json or .ron)
        level: PathBuf,

        /// Moves as `<piece>:<direction>[<steps>]`, e.g. "0:D 1:R2"
        #[arg(long, short, default_value = "")]
        moves: String,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Save the moves and their final state as a replay script
        #[arg(long)]
        record: Option<PathBuf>,
    },

    /// Run a RON replay script and check its expected outcome
    Replay {
        /// Replay script (.ron)
        script: PathBuf,

        /// Write the JSON report to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Validate every level in a level directory
    Check {
        /// Level directory (defaults to `levels.directory` from config)
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let config = AppConfig::load()?;

    let default_filter = if config.debug.verbose_logging {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let args = Args::parse();
    let rules = config.rules.level_rules();

    match args.command {
        Command::Play {
            level,
            moves,
            json,
            record,
        } => play(
            &level,
            &moves,
            json,
            record.as_deref(),
            &rules,
            config.rules.enforce_move_limit,
        ),
        Command::Replay { script, report } => replay(
            &script,
            report.as_deref(),
            &rules,
            config.rules.enforce_move_limit,
        ),
        Command::Check { dir } => {
            let dir = dir.unwrap_or(config.levels.directory);
            check(&dir, &rules)
        }
    }
}

fn play(
    level_path: &Path,
    moves: &str,
    json: bool,
    record: Option<&Path>,
    rules: &LevelRules,
    enforce_move_limit: bool,
) -> Result<ExitCode> {
    let commands = parse_moves(moves).context("Invalid --moves")?;
    let level = Level::from_file(level_path, rules)?;
    let name = level.name().to_string();

    let report = ReplayRunner::new(level, enforce_move_limit)?.run(&name, &commands)?;
    if json {
        println!("{}", report.to_json_pretty()?);
    } else {
        print_moves(&report);
        println!("{}", report.summary());
    }

    if let Some(path) = record {
        let level = std::fs::canonicalize(level_path)
            .with_context(|| format!("Failed to resolve level path: {}", level_path.display()))?;
        ReplayScript::recorded(level, commands, &report).to_file(path)?;
        log::info!("Replay script written to {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

fn replay(
    script_path: &Path,
    report_path: Option<&Path>,
    rules: &LevelRules,
    enforce_move_limit: bool,
) -> Result<ExitCode> {
    let script = ReplayScript::from_file(script_path)?;
    let level = Level::from_file(script.level_path(script_path), rules)?;

    let mut report = ReplayRunner::new(level, enforce_move_limit)?.run(&script.name, &script.moves)?;
    verify(&mut report, &script.expect);

    print_moves(&report);
    for failure in &report.failures {
        println!("  FAIL: {failure}");
    }
    println!("{}", report.summary());

    if let Some(path) = report_path {
        report.save_to_file(path)?;
        log::info!("Report written to {}", path.display());
    }

    Ok(if report.passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn check(dir: &Path, rules: &LevelRules) -> Result<ExitCode> {
    let mut checked = 0;
    let mut failed = 0;

    for number in 1.. {
        let Some(path) = level_path(dir, number) else {
            break;
        };
        checked += 1;

        let result = Level::from_file(&path, rules)
            .and_then(|level| Ok((level.start()?, level)));
        match result {
            Ok((engine, level)) => println!(
                "OK    {} ({}x{}, {} pieces, {} exits, {} opening moves)",
                level.name(),
                level.rows(),
                level.cols(),
                level.pieces().len(),
                level.exits().len(),
                engine.legal_moves().len()
            ),
            Err(e) => {
                failed += 1;
                println!("FAIL  {}: {:#}", path.display(), e);
            }
        }
    }

    if checked == 0 {
        anyhow::bail!("No levels found in {}", dir.display());
    }
    println!("{} levels checked, {} failed", checked, failed);

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_moves(report: &ReplayReport) {
    for (index, record) in report.moves.iter().enumerate() {
        match &record.result {
            MoveResult::Committed {
                anchor,
                steps,
                retired,
            } => {
                let exit = retired.map(|e| format!(", left through {e}")).unwrap_or_default();
                println!(
                    "{:>3}. {:<6} moved {} to {}{}",
                    index + 1,
                    record.command.to_string(),
                    steps,
                    anchor,
                    exit
                );
            }
            MoveResult::Rejected { reason } => {
                println!(
                    "{:>3}. {:<6} rejected: {}",
                    index + 1,
                    record.command.to_string(),
                    reason
                );
            }
        }
    }
}
