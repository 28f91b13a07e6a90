use cavacamixa::config::SearchParams;
use cavacamixa::store::DirStore;
use cavacamixa::{Coordinator, SearchResult};
use std::path::Path;
use tracing::info;

pub fn run(save_folder: &Path, params: SearchParams, batches: Option<u64>) -> SearchResult<()> {
    let store = DirStore::open(save_folder)?;
    let shown = store
        .root()
        .canonicalize()
        .unwrap_or_else(|_| store.root().to_path_buf());

    info!(
        "🔥 Playing games with {} threads, {} games per batch. Save folder: {}",
        params.resolved_threads(),
        params.batch_size,
        shown.display()
    );

    let coordinator = Coordinator::new(store, params)?;
    match batches {
        Some(n) => {
            let ran = coordinator.run_batches(n)?;
            info!("Stopped after {} batches", ran);
            if let Some(cursor) = coordinator.cursor() {
                info!("Next arrangement: {}", cursor);
            }
            Ok(())
        }
        None => coordinator.run(),
    }
}
