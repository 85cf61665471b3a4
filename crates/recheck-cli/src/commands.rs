use std::path::Path;

use colored::Colorize;
use tracing::debug;

use recheck_diff::{check_manifest, compare_dirs, diff_snapshots, SnapshotDiff};
use recheck_events::{console_sink, EventBus, EventFilter, ProgressEvent, ProgressListener, ProgressState};
use recheck_session::SessionConfig;
use recheck_snapshot::{CaptureOptions, Snapshot};
use recheck_types::RunId;

use crate::cli::*;
use crate::render;

/// Dispatch a parsed command.
///
/// Returns the process exit code: `0` clean, `1` differences found. Failures
/// come back as errors and exit with `2`.
pub fn run_command(cli: Cli) -> anyhow::Result<u8> {
    match cli.command {
        Command::Snapshot(args) => cmd_snapshot(args, &cli.format),
        Command::Compare(args) => cmd_compare(args, &cli.format),
        Command::Check(args) => cmd_check(args, &cli.format),
        Command::Session(args) => cmd_session(args),
    }
}

fn capture_options(recursive: bool) -> CaptureOptions {
    if recursive {
        CaptureOptions::recursive()
    } else {
        CaptureOptions::default()
    }
}

fn cmd_snapshot(args: SnapshotArgs, format: &OutputFormat) -> anyhow::Result<u8> {
    let options = capture_options(args.recursive);
    let snapshot = Snapshot::capture(&args.dir, &options)?;
    debug!(entries = snapshot.len(), root = %args.dir.display(), "captured snapshot");
    if let Some(path) = &args.output {
        snapshot.save(path)?;
        println!(
            "{} Wrote manifest for {} entries to {}",
            "✓".green().bold(),
            snapshot.len().to_string().bold(),
            path.display().to_string().bold(),
        );
        return Ok(0);
    }
    match format {
        OutputFormat::Json => println!("{}", snapshot.to_json()?),
        OutputFormat::Text => print!("{}", render::snapshot_text(&snapshot)),
    }
    Ok(0)
}

fn cmd_compare(args: CompareArgs, format: &OutputFormat) -> anyhow::Result<u8> {
    let options = capture_options(args.recursive);
    let diff = if args.progress {
        compare_with_progress(&args.before, &args.after, &options)?
    } else {
        compare_dirs(&args.before, &args.after, &options)?
    };
    render_diff(&diff, format)
}

fn cmd_check(args: CheckArgs, format: &OutputFormat) -> anyhow::Result<u8> {
    let manifest = Snapshot::load(&args.manifest)?;
    let options = capture_options(args.recursive);
    let diff = check_manifest(&manifest, &args.dir, &options)?;
    render_diff(&diff, format)
}

fn cmd_session(args: SessionArgs) -> anyhow::Result<u8> {
    match args.action {
        SessionAction::Init { api_url, path } => {
            let mut config = SessionConfig::default();
            if let Some(url) = api_url {
                config.api_url = url;
            }
            config.validate()?;
            config.save(&path)?;
            println!(
                "{} Wrote session file {}",
                "✓".green().bold(),
                path.display().to_string().bold(),
            );
            Ok(0)
        }
        SessionAction::Show { path } => {
            let config = SessionConfig::load(&path)?;
            print!("{}", render::session_text(&config));
            Ok(0)
        }
    }
}

fn render_diff(diff: &SnapshotDiff, format: &OutputFormat) -> anyhow::Result<u8> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(diff)?),
        OutputFormat::Text => print!("{}", render::diff_text(diff)),
    }
    Ok(if diff.is_empty() { 0 } else { 1 })
}

/// Compare with capture progress fanned out to a console listener.
///
/// The listener is always shut down and joined before any result or error
/// leaves this function, so no event line can interleave with the rendered
/// diff.
fn compare_with_progress(
    before: &Path,
    after: &Path,
    options: &CaptureOptions,
) -> anyhow::Result<SnapshotDiff> {
    let run = RunId::new();
    let bus = EventBus::new();
    let listener = ProgressListener::spawn(bus.subscribe(EventFilter::for_run(run)), console_sink);

    let captured = capture_pair(run, &bus, before, after, options);

    bus.shutdown();
    let received = listener.join();
    debug!(received, "progress listener joined");

    let (before_snap, after_snap) = captured?;
    Ok(diff_snapshots(&before_snap, &after_snap))
}

fn capture_pair(
    run: RunId,
    bus: &EventBus,
    before: &Path,
    after: &Path,
    options: &CaptureOptions,
) -> anyhow::Result<(Snapshot, Snapshot)> {
    let before_snap = capture_side(run, bus, "before", before, options)?;
    let after_snap = capture_side(run, bus, "after", after, options)?;
    Ok((before_snap, after_snap))
}

fn capture_side(
    run: RunId,
    bus: &EventBus,
    side: &str,
    root: &Path,
    options: &CaptureOptions,
) -> anyhow::Result<Snapshot> {
    bus.emit(&ProgressEvent::new(
        run,
        ProgressState::Queued,
        format!("capturing {side} {}", root.display()),
        0,
        0,
    ));
    let result = Snapshot::capture_with_progress(root, options, |done, total, name| {
        bus.emit(&ProgressEvent::new(
            run,
            ProgressState::Active,
            format!("digested {name}"),
            done as u64,
            total as u64,
        ));
    });
    match result {
        Ok(snapshot) => {
            let total = snapshot.len() as u64;
            bus.emit(&ProgressEvent::new(
                run,
                ProgressState::Success,
                format!("captured {side} {}", root.display()),
                total,
                total,
            ));
            Ok(snapshot)
        }
        Err(err) => {
            bus.emit(&ProgressEvent::new(run, ProgressState::Error, err.to_string(), 0, 0));
            Err(err.into())
        }
    }
}
