use cavacamixa::config::SearchParams;
use cavacamixa::coordinator::{Checkpoint, CHECKPOINT_RECORD, LONGEST_RECORD};
use cavacamixa::store::{DirStore, MemoryStore, Store};
use cavacamixa::{Arrangement, Coordinator, SearchError};
use std::fs;
use tempfile::TempDir;

fn params(batch_size: u64, threads: usize) -> SearchParams {
    SearchParams {
        batch_size,
        threads: Some(threads),
        ..Default::default()
    }
}

fn read_checkpoint(store: &impl Store) -> Checkpoint {
    let text = store
        .read(CHECKPOINT_RECORD)
        .unwrap()
        .expect("checkpoint missing");
    Checkpoint::parse(&text).unwrap()
}

#[test]
fn test_fresh_start_uses_seed() {
    let store = MemoryStore::new();
    let coord = Coordinator::new(&store, params(10, 2)).unwrap();
    assert_eq!(coord.cursor(), Some(Arrangement::seed()));
    assert!(coord.longest().is_none());
}

#[test]
fn test_batch_advances_cursor_and_checkpoints() {
    let store = MemoryStore::new();
    let coord = Coordinator::new(&store, params(250, 4)).unwrap();
    assert_eq!(coord.run_batches(1).unwrap(), 1);

    let expected = Arrangement::seed().iter_from().nth(250);
    assert_eq!(coord.cursor(), expected);
    assert_eq!(coord.games_played(), 250);

    let cp = read_checkpoint(&store);
    assert_eq!(cp.cursor, expected);
    let best = coord.longest().unwrap();
    assert_eq!(cp.best, Some(best.arrangement));

    let longest_text = store.read(LONGEST_RECORD).unwrap().unwrap();
    assert!(longest_text.contains(&best.arrangement.to_string()));
    assert!(longest_text.contains(&format!("cardsPlayed={}", best.cards_played())));
}

#[test]
fn test_resume_matches_single_run() {
    let k = 300;

    // Two batches of k, restarting the coordinator in between.
    let split_dir = TempDir::new().unwrap();
    {
        let coord =
            Coordinator::new(DirStore::open(split_dir.path()).unwrap(), params(k, 3)).unwrap();
        coord.run_batches(1).unwrap();
    }
    let resumed =
        Coordinator::new(DirStore::open(split_dir.path()).unwrap(), params(k, 3)).unwrap();
    assert_eq!(
        resumed.cursor(),
        Arrangement::seed().iter_from().nth(k as usize)
    );
    resumed.run_batches(1).unwrap();

    // One batch of 2k.
    let whole_dir = TempDir::new().unwrap();
    let whole =
        Coordinator::new(DirStore::open(whole_dir.path()).unwrap(), params(2 * k, 3)).unwrap();
    whole.run_batches(1).unwrap();

    assert_eq!(resumed.cursor(), whole.cursor());
    assert!(
        resumed.longest().unwrap().cards_played() >= whole.longest().unwrap().cards_played()
    );

    let split_cp = read_checkpoint(&DirStore::open(split_dir.path()).unwrap());
    let whole_cp = read_checkpoint(&DirStore::open(whole_dir.path()).unwrap());
    assert_eq!(split_cp.cursor, whole_cp.cursor);
}

#[test]
fn test_resume_replays_best_statistics() {
    let store = MemoryStore::new();
    store
        .write(
            CHECKPOINT_RECORD,
            "0000000000000000000000000000111122232333\n0000020000032202103300000300000000110100\n",
        )
        .unwrap();

    let coord = Coordinator::new(&store, params(10, 2)).unwrap();
    let best = coord.longest().unwrap();
    assert_eq!(best.cards_played(), 1952);
    assert_eq!(best.penalty_cards_played(), 593);
    assert_eq!(best.hands_won(), 319);
    assert_eq!(best.winning_player(), Some(1));

    // Nothing near the seed beats it, so the record is left alone.
    coord.run_batches(1).unwrap();
    assert_eq!(coord.longest().unwrap().cards_played(), 1952);
    assert_eq!(store.read(LONGEST_RECORD).unwrap(), None);
}

#[test]
fn test_run_stops_when_enumeration_is_exhausted() {
    let store = MemoryStore::new();
    // Six arrangements remain from this cursor; no best recorded yet.
    store
        .write(CHECKPOINT_RECORD, "3333222211100000100000000000000000000000\n")
        .unwrap();

    let coord = Coordinator::new(&store, params(4, 2)).unwrap();
    coord.run().unwrap();

    assert_eq!(coord.games_played(), 6);
    assert_eq!(coord.cursor(), None);
    assert_eq!(coord.longest().unwrap().cards_played(), 29);

    let cp = read_checkpoint(&store);
    assert_eq!(cp.cursor, None);
    assert!(cp.best.is_some());

    // Resuming a finished search does nothing.
    let again = Coordinator::new(&store, params(4, 2)).unwrap();
    assert_eq!(again.run_batches(3).unwrap(), 0);
}

#[test]
fn test_corrupt_checkpoint_is_rejected() {
    let store = MemoryStore::new();
    store.write(CHECKPOINT_RECORD, "not a deck\n").unwrap();
    let err = Coordinator::new(&store, params(10, 2)).err().unwrap();
    assert!(matches!(err, SearchError::Format(_)));
}

#[test]
fn test_state_explosion_aborts_the_run() {
    let dir = TempDir::new().unwrap();
    let store = DirStore::open(dir.path()).unwrap();
    let coord = Coordinator::new(
        store,
        SearchParams {
            max_states: 3,
            ..params(100, 2)
        },
    )
    .unwrap();

    match coord.run_batches(1) {
        Err(SearchError::Worker { source, .. }) => {
            assert!(matches!(*source, SearchError::StateExplosion { .. }))
        }
        other => panic!("expected a worker failure, got {:?}", other),
    }
    assert!(!dir.path().join(CHECKPOINT_RECORD).exists());
}

#[test]
fn test_single_thread_matches_many_threads() {
    let one = MemoryStore::new();
    let many = MemoryStore::new();
    Coordinator::new(&one, params(400, 1))
        .unwrap()
        .run_batches(2)
        .unwrap();
    Coordinator::new(&many, params(400, 8))
        .unwrap()
        .run_batches(2)
        .unwrap();
    assert_eq!(read_checkpoint(&one).cursor, read_checkpoint(&many).cursor);
    assert_eq!(
        read_checkpoint(&one).cursor,
        Arrangement::seed().iter_from().nth(800)
    );
}

#[test]
fn test_records_land_in_save_folder() {
    let dir = TempDir::new().unwrap();
    let coord = Coordinator::new(DirStore::open(dir.path()).unwrap(), params(50, 2)).unwrap();
    coord.run_batches(1).unwrap();

    let checkpoint = fs::read_to_string(dir.path().join(CHECKPOINT_RECORD)).unwrap();
    assert_eq!(checkpoint.lines().count(), 2);
    let longest = fs::read_to_string(dir.path().join(LONGEST_RECORD)).unwrap();
    assert!(longest.starts_with("GameOutcome [arrangement="));
    // No temp files left behind.
    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names.len(), 2, "unexpected files: {:?}", names);
}
