use anyhow::Result;
use lunch_buddies::core::{HistoryStore, Pair, PairingRound, Partner};
use lunch_buddies::{
    AutoConfirm, BuddyError, ByePolicy, DrawEngine, DrawSettings, FileCandidateSource,
    JsonHistoryStore, PromptConfirmer,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_candidates(dir: &Path, names: &[&str]) -> Result<PathBuf> {
    let path = dir.join("candidates.txt");
    std::fs::write(&path, format!("{}\n\n", names.join("\n")))?;
    Ok(path)
}

fn organizer(name: &str) -> DrawSettings {
    DrawSettings {
        bye_policy: ByePolicy::Organizer(name.to_string()),
        ..DrawSettings::default()
    }
}

/// 完整流程：讀名單、配對、確認、寫入歷史
#[test]
fn test_end_to_end_draw_writes_history() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let candidates = write_candidates(temp_dir.path(), &["Alice", "Bob", "Carol", "Dave"])?;
    let history_path = temp_dir.path().join("buddies.json");

    let mut engine = DrawEngine::new(
        FileCandidateSource::new(&candidates),
        JsonHistoryStore::new(&history_path),
        AutoConfirm,
        StdRng::seed_from_u64(2024),
        DrawSettings::default(),
    );
    let outcome = engine.run()?;

    assert!(outcome.history_written);
    assert_eq!(outcome.draw.pairs().len(), 2);
    assert_eq!(outcome.first_timers.len(), 4);

    let saved: Vec<PairingRound> = serde_json::from_str(&std::fs::read_to_string(&history_path)?)?;
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].buddies, outcome.draw.pairs());
    assert!(saved[0].date.is_some());

    Ok(())
}

#[test]
fn test_second_round_avoids_first_round_pairs() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let candidates = write_candidates(temp_dir.path(), &["Alice", "Bob", "Carol", "Dave"])?;
    let history_path = temp_dir.path().join("buddies.json");

    let first = DrawEngine::new(
        FileCandidateSource::new(&candidates),
        JsonHistoryStore::new(&history_path),
        AutoConfirm,
        StdRng::seed_from_u64(1),
        DrawSettings::default(),
    )
    .run()?;

    let second = DrawEngine::new(
        FileCandidateSource::new(&candidates),
        JsonHistoryStore::new(&history_path),
        AutoConfirm,
        StdRng::seed_from_u64(2),
        DrawSettings::default(),
    )
    .run()?;

    // With four people there is always a fresh perfect pairing for round two.
    assert!(!second.draw.has_unmatched());
    for pair in second.draw.pairs() {
        for old in first.draw.pairs() {
            assert!(!(old.contains(&pair.0) && old.contains(&pair.1)));
        }
    }
    assert!(second.first_timers.is_empty());

    let rounds = JsonHistoryStore::new(&history_path).load_history()?;
    assert_eq!(rounds.len(), 2);

    Ok(())
}

#[test]
fn test_odd_roster_with_organizer_on_roster() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let candidates = write_candidates(temp_dir.path(), &["Alice", "Bob", "Carol"])?;

    let outcome = DrawEngine::new(
        FileCandidateSource::new(&candidates),
        JsonHistoryStore::new(temp_dir.path().join("buddies.json")),
        AutoConfirm,
        StdRng::seed_from_u64(9),
        organizer("Carol"),
    )
    .run()?;

    assert_eq!(outcome.draw.sitting_out(), Some("Carol"));
    assert_eq!(outcome.draw.pairs(), vec![Pair::new("Alice", "Bob")]);
    assert!(outcome.announcement.contains("Carol is sitting this fortnight out."));

    // The organizer's bye is not a pairing and stays out of history.
    let rounds = JsonHistoryStore::new(temp_dir.path().join("buddies.json")).load_history()?;
    assert_eq!(rounds[0].buddies, vec![Pair::new("Alice", "Bob")]);

    Ok(())
}

#[test]
fn test_legacy_history_without_dates() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let candidates = write_candidates(temp_dir.path(), &["Alice", "Bob", "Carol"])?;
    let history_path = temp_dir.path().join("buddies.json");
    std::fs::write(&history_path, r#"[{"buddies":[["Alice","Bob"]]}]"#)?;

    // Accept the proposal through the terminal prompt.
    let confirmer = PromptConfirmer::new(Cursor::new(b"yes\n".to_vec()), Vec::new());
    let mut engine = DrawEngine::new(
        FileCandidateSource::new(&candidates),
        JsonHistoryStore::new(&history_path),
        confirmer,
        StdRng::seed_from_u64(3),
        organizer("Marcus"),
    );
    let outcome = engine.run()?;

    assert_eq!(outcome.draw.sitting_out(), Some("Marcus"));
    assert_eq!(outcome.draw.unmatched().len(), 1);
    let pairs = outcome.draw.pairs();
    assert_eq!(pairs.len(), 1);
    assert!(pairs[0].contains("Carol"));
    assert!(outcome.announcement.contains("WARNING: no valid partner left"));
    assert_eq!(outcome.first_timers, vec!["Carol".to_string()]);

    let rounds = JsonHistoryStore::new(&history_path).load_history()?;
    assert_eq!(rounds.len(), 2);
    assert!(rounds[0].date.is_none());
    assert_eq!(rounds[1].buddies, pairs);

    Ok(())
}

#[test]
fn test_rejections_exhaust_and_leave_history_untouched() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let candidates = write_candidates(temp_dir.path(), &["Alice", "Bob"])?;
    let history_path = temp_dir.path().join("buddies.json");

    let confirmer = PromptConfirmer::new(Cursor::new(b"n\nno\nnope\n".to_vec()), Vec::new());
    let result = DrawEngine::new(
        FileCandidateSource::new(&candidates),
        JsonHistoryStore::new(&history_path),
        confirmer,
        StdRng::seed_from_u64(4),
        DrawSettings::default(),
    )
    .run();

    match result {
        Err(BuddyError::AlgorithmExhausted { attempts }) => assert_eq!(attempts, 3),
        other => panic!("expected exhaustion, got {:?}", other.map(|o| o.attempts)),
    }
    assert!(!history_path.exists());

    Ok(())
}

#[test]
fn test_exhausted_candidates_are_unmatched_not_dropped() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let candidates = write_candidates(temp_dir.path(), &["Alice", "Bob", "Carol", "Dave"])?;
    let history_path = temp_dir.path().join("buddies.json");
    // Alice has already had lunch with everyone else.
    std::fs::write(
        &history_path,
        r#"[{"buddies":[["Alice","Bob"]]},{"buddies":[["Alice","Carol"]]},{"buddies":[["Alice","Dave"]]}]"#,
    )?;

    let settings = DrawSettings {
        dry_run: true,
        ..DrawSettings::default()
    };
    let outcome = DrawEngine::new(
        FileCandidateSource::new(&candidates),
        JsonHistoryStore::new(&history_path),
        AutoConfirm,
        StdRng::seed_from_u64(5),
        settings,
    )
    .run()?;

    assert_eq!(outcome.draw.pairings[0].name, "Alice");
    assert_eq!(outcome.draw.pairings[0].partner, Partner::Unmatched);
    assert_eq!(outcome.draw.pairs().len(), 1);
    assert_eq!(outcome.draw.unmatched().len(), 2);
    assert!(outcome.round.is_none());
    assert_eq!(JsonHistoryStore::new(&history_path).load_history()?.len(), 3);

    Ok(())
}

#[test]
fn test_missing_candidate_file() {
    let temp_dir = TempDir::new().unwrap();

    let result = DrawEngine::new(
        FileCandidateSource::new(temp_dir.path().join("missing.txt")),
        JsonHistoryStore::new(temp_dir.path().join("buddies.json")),
        AutoConfirm,
        StdRng::seed_from_u64(6),
        DrawSettings::default(),
    )
    .run();

    let err = result.err().expect("missing file must fail");
    assert!(matches!(err, BuddyError::UnreadableFile { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_single_candidate_never_touches_history() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let candidates = write_candidates(temp_dir.path(), &["Alice"])?;
    let history_path = temp_dir.path().join("buddies.json");

    let result = DrawEngine::new(
        FileCandidateSource::new(&candidates),
        JsonHistoryStore::new(&history_path),
        AutoConfirm,
        StdRng::seed_from_u64(7),
        DrawSettings::default(),
    )
    .run();

    let err = result.err().expect("a lone candidate must fail");
    assert!(matches!(err, BuddyError::RosterTooSmall { count: 1 }));
    assert_eq!(err.exit_code(), 1);
    assert!(!history_path.exists());

    Ok(())
}

#[test]
fn test_unpairable_draw_is_not_appended() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let candidates = write_candidates(temp_dir.path(), &["Alice", "Bob"])?;
    let history_path = temp_dir.path().join("buddies.json");
    std::fs::write(&history_path, r#"[{"date":"2019-05-01","buddies":[["Alice","Bob"]]}]"#)?;

    let outcome = DrawEngine::new(
        FileCandidateSource::new(&candidates),
        JsonHistoryStore::new(&history_path),
        AutoConfirm,
        StdRng::seed_from_u64(8),
        DrawSettings::default(),
    )
    .run()?;

    assert!(outcome.draw.pairs().is_empty());
    assert!(outcome.round.is_none());
    assert!(!outcome.history_written);
    assert_eq!(JsonHistoryStore::new(&history_path).load_history()?.len(), 1);

    Ok(())
}
