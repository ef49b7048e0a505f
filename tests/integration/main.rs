//! Integration tests for relaunch

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn relaunch(dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("relaunch");
        cmd.env("RELAUNCH_ROOT", dir.path().join("data"))
            .env("RELAUNCH_CONFIG", dir.path().join("config.toml"));
        cmd
    }

    fn record(dir: &TempDir, key: &str, artifact: &str) {
        relaunch(dir)
            .args(["record", key, "--artifact", artifact, "--class-path", "a.jar:b.jar"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Recorded"));
    }

    #[test]
    fn help_displays() {
        let dir = TempDir::new().unwrap();
        relaunch(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("launch history"));
    }

    #[test]
    fn version_displays() {
        let dir = TempDir::new().unwrap();
        relaunch(&dir)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("relaunch"));
    }

    #[test]
    fn history_empty() {
        let dir = TempDir::new().unwrap();
        relaunch(&dir)
            .arg("history")
            .assert()
            .success()
            .stdout(predicate::str::contains("No launch history"));
    }

    #[test]
    fn record_then_search() {
        let dir = TempDir::new().unwrap();
        record(&dir, "com.github.spotbugs", "com.github.spotbugs:spotbugs:jar:1.2.3");

        relaunch(&dir)
            .args(["search", "com.github.spotbugs", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::diff("com.github.spotbugs:spotbugs:jar:1.2.3\n"));
    }

    #[test]
    fn search_miss_succeeds() {
        let dir = TempDir::new().unwrap();
        relaunch(&dir)
            .args(["search", "com.foo.bar"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No fresh cached resolution"));
    }

    #[test]
    fn history_lists_most_recent_first() {
        let dir = TempDir::new().unwrap();
        record(&dir, "first", "first:app:1");
        record(&dir, "second", "second:app:1");
        record(&dir, "first", "first:app:2");

        relaunch(&dir)
            .args(["history", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::diff("first\nsecond\n"));
    }

    #[test]
    fn history_json_marks_freshness() {
        let dir = TempDir::new().unwrap();
        record(&dir, "first", "first:app:1");

        relaunch(&dir)
            .args(["history", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"expired\": false"))
            .stdout(predicate::str::contains("\"description\": null"));
    }

    #[test]
    fn clear_forgets_everything() {
        let dir = TempDir::new().unwrap();
        record(&dir, "first", "first:app:1");

        relaunch(&dir)
            .args(["clear", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Cache has been cleared"));

        relaunch(&dir)
            .args(["history", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
        assert!(!dir.path().join("data").join("history.jsonl").exists());
    }

    #[test]
    fn record_empty_key_fails() {
        let dir = TempDir::new().unwrap();
        relaunch(&dir)
            .args(["record", "", "--artifact", "x:y:1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("must not be empty"));
    }

    #[test]
    fn config_path() {
        let dir = TempDir::new().unwrap();
        relaunch(&dir)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let dir = TempDir::new().unwrap();
        relaunch(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[history]"));
    }

    #[test]
    fn config_max_entries_bounds_history() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "[history]\nmax_entries = 2\nblocking_writes = true\n",
        )
        .unwrap();

        record(&dir, "a", "a:a:1");
        record(&dir, "b", "b:b:1");
        record(&dir, "c", "c:c:1");

        relaunch(&dir)
            .args(["history", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::diff("c\nb\n"));
    }
}

mod store_tests {
    use chrono::{Duration, Utc};
    use relaunch::history::{HistoryEntry, HistoryStore, ManualClock, StoreOptions};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn entry(key: &str) -> HistoryEntry {
        HistoryEntry::new(key, format!("{}:jar:1.0", key), "a.jar", key)
    }

    #[tokio::test]
    async fn background_store_round_trips_after_shutdown() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::open(dir.path(), StoreOptions::default());
        for key in ["a", "b", "c"] {
            store.record_entry(entry(key)).unwrap();
        }
        store.shutdown().await.unwrap();

        let reloaded = HistoryStore::open(dir.path(), StoreOptions::default().blocking());
        assert_eq!(reloaded.history(), store.history());
        let keys: Vec<_> = reloaded.history().into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["c", "b", "a"]);
    }

    #[test]
    fn expired_entry_still_listed() {
        let dir = TempDir::new().unwrap();
        let start = Utc::now();
        let clock = Arc::new(ManualClock::new(start));
        let store = HistoryStore::open(
            dir.path(),
            StoreOptions::default().blocking().with_clock(clock.clone()),
        );

        let stored = store.record_entry(entry("a")).unwrap();
        assert_eq!(stored.last_refresh_time, start);

        clock.advance(Duration::hours(1));
        assert!(store.search("a").is_some());

        clock.advance(Duration::days(2));
        assert!(store.search("a").is_none());
        assert_eq!(store.history(), vec![stored]);
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::open(dir.path(), StoreOptions::default().blocking());
        store.record_entry(entry("a")).unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["history.jsonl"]);
    }
}
