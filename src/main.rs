mod builder;
mod cli;
mod compare;
mod export;
mod hashing;
mod node;
mod snapshot;
mod walker;

use chrono::Utc;
use cli::{Cli, Command};
use std::fmt as stdfmt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{Event, Level, Subscriber, error, info, warn};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt as tracing_fmt;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;

struct TreehashExitCode;

impl TreehashExitCode {
    /// Exit code used when a comparison finds divergent nodes.
    fn divergence_found() -> ExitCode {
        ExitCode::from(1)
    }

    /// Exit code used for other errors (I/O errors, malformed snapshots, etc.).
    ///
    /// Argument arity errors never reach this path: the parser prints usage
    /// and exits with its own error code before a command runs.
    fn any_error() -> ExitCode {
        ExitCode::from(255)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let result: anyhow::Result<ExitCode> = match cli.command {
        Command::Generate { root, export_dir } => handle_generate(&root, &export_dir),
        Command::Compare { base, other } => handle_compare(&base, &other),
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(err) => {
            error!("{err}");
            TreehashExitCode::any_error()
        }
    }
}

fn handle_generate(root: &Path, export_dir: &Path) -> anyhow::Result<ExitCode> {
    info!("Building integrity tree for {}", root.display());

    let built = builder::build_tree(root)?;

    print!("{}", export::render_text(&built.root));

    if !built.skipped.is_empty() {
        warn!("Skipped {} unreadable entries", built.skipped.len());
    }

    let export_path = timestamped_export_dir(export_dir);
    std::fs::create_dir_all(&export_path)?;

    let stem = root_stem(root);
    snapshot::save(&built.root, &export_path.join(format!("{stem}_tree.snap")))?;
    export::export_json(&built.root, &export_path.join(format!("{stem}_tree.json")))?;

    println!("Exported results to {}", export_path.display());

    Ok(ExitCode::SUCCESS)
}

fn handle_compare(base: &Path, other: &Path) -> anyhow::Result<ExitCode> {
    let base_tree = snapshot::load(base)?;
    info!("Loaded snapshot {}", base.display());
    let other_tree = snapshot::load(other)?;
    info!("Loaded snapshot {}", other.display());

    let divergent = compare::compare_trees(&base_tree, &other_tree)?;

    if divergent.is_empty() {
        println!("Trees are equal.");
        return Ok(ExitCode::SUCCESS);
    }

    println!("Divergent nodes:");
    for node in divergent {
        println!("{node}");
    }

    Ok(TreehashExitCode::divergence_found())
}

/// One subdirectory per run keeps successive exports from clobbering each
/// other; millisecond resolution and no colons keep the name portable.
fn timestamped_export_dir(export_dir: &Path) -> PathBuf {
    let stamp = Utc::now().format("%Y%m%d-%H%M%S%3f");
    export_dir.join(stamp.to_string())
}

fn root_stem(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tree".to_string())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = tracing_fmt::layer()
        .event_format(PrefixFormatter)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

struct PrefixFormatter;

impl<S, N> FormatEvent<S, N> for PrefixFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> stdfmt::Result {
        match *event.metadata().level() {
            Level::DEBUG => writer.write_str("DEBUG: ")?,
            Level::INFO => writer.write_str("INFO: ")?,
            Level::WARN => writer.write_str("WARN: ")?,
            Level::ERROR => writer.write_str("ERROR: ")?,
            _ => {}
        }

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::root_stem;
    use std::path::Path;

    #[test]
    fn root_stem_uses_the_final_path_component() {
        assert_eq!(root_stem(Path::new("/var/data/photos")), "photos");
    }

    #[test]
    fn root_stem_falls_back_when_there_is_no_component() {
        assert_eq!(root_stem(Path::new(".")), "tree");
        assert_eq!(root_stem(Path::new("/")), "tree");
    }
}
