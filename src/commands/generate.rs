//! Generate static files

use anyhow::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEvent};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::{Folio, CONFIG_FILE};

/// Generate the static site
pub fn run(folio: &Folio) -> Result<()> {
    let start = Instant::now();

    let posts = ContentLoader::new(folio).load_posts()?;
    tracing::info!("Loaded {} posts", posts.len());

    Generator::new(folio).generate(&posts)?;

    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

/// Reload the configuration from disk and regenerate
pub fn rebuild(base_dir: &Path) -> Result<Folio> {
    let folio = Folio::new(base_dir)?;
    run(&folio)?;
    Ok(folio)
}

/// Paths whose changes trigger a rebuild
pub fn watch_targets(folio: &Folio) -> Vec<(PathBuf, RecursiveMode)> {
    let candidates = [
        (folio.source_dir.clone(), RecursiveMode::Recursive),
        (
            folio.base_dir.join(&folio.config.static_dir),
            RecursiveMode::Recursive,
        ),
        (folio.base_dir.join(CONFIG_FILE), RecursiveMode::NonRecursive),
    ];
    candidates
        .into_iter()
        .filter(|(path, _)| path.exists())
        .collect()
}

/// Editor swap files and VCS metadata do not count as changes
pub fn is_relevant(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
        && !path_str.ends_with(".swp")
}

/// Changed paths worth a rebuild out of a debounced batch
pub fn relevant_changes(events: &[DebouncedEvent]) -> Vec<&Path> {
    events
        .iter()
        .map(|e| e.path.as_path())
        .filter(|p| is_relevant(p))
        .collect()
}

/// Watch for file changes and regenerate
pub async fn watch(folio: &Folio) -> Result<()> {
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for (path, mode) in watch_targets(folio) {
        debouncer.watcher().watch(&path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let changed = relevant_changes(&events);
                if changed.is_empty() {
                    continue;
                }
                for path in &changed {
                    tracing::info!("File changed: {}", path.display());
                }
                if let Err(e) = rebuild(&folio.base_dir) {
                    tracing::error!("Generation failed: {:#}", e);
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(_) => break,
        }
    }

    Ok(())
}
