//! End-to-end CLI tests.
//!
//! Planner commands run against a store file in a temp directory via the
//! `DAYPLAN_STORE` override, so no daemon is needed.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn dayplan(store: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dayplan").unwrap();
    cmd.env("DAYPLAN_STORE", store.path().join("store.json"));
    cmd.env("DAYPLAN_SOCKET", store.path().join("absent.sock"));
    cmd
}

mod task_commands {
    use super::*;

    #[test]
    fn add_and_list_round_trip() {
        let store = TempDir::new().unwrap();

        dayplan(&store)
            .args([
                "task", "add", "Write report", "--start", "09:00", "--end", "10:30", "--kind",
                "work", "--priority", "high", "--date", "2026-08-30",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Added task"));

        dayplan(&store)
            .args(["task", "list", "--date", "2026-08-30"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Write report"))
            .stdout(predicate::str::contains("09:00-10:30"));
    }

    #[test]
    fn list_is_scoped_to_the_date() {
        let store = TempDir::new().unwrap();

        dayplan(&store)
            .args([
                "task", "add", "Only Saturday", "--start", "09:00", "--end", "10:00", "--date",
                "2026-08-29",
            ])
            .assert()
            .success();

        dayplan(&store)
            .args(["task", "list", "--date", "2026-08-30"])
            .assert()
            .success()
            .stdout(predicate::str::contains("(none)"));
    }

    #[test]
    fn rejects_end_before_start() {
        let store = TempDir::new().unwrap();

        dayplan(&store)
            .args([
                "task", "add", "Backwards", "--start", "10:00", "--end", "09:00",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("end time"));
    }

    #[test]
    fn done_with_unknown_id_fails() {
        let store = TempDir::new().unwrap();

        dayplan(&store)
            .args([
                "task",
                "done",
                "00000000-0000-4000-8000-000000000000",
                "--date",
                "2026-08-30",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No task with id"));
    }

    #[test]
    fn delete_with_unknown_id_is_noop() {
        let store = TempDir::new().unwrap();

        dayplan(&store)
            .args([
                "task",
                "delete",
                "00000000-0000-4000-8000-000000000000",
                "--date",
                "2026-08-30",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("No task with id"));
    }

    #[test]
    fn rejects_malformed_id() {
        let store = TempDir::new().unwrap();

        dayplan(&store)
            .args(["task", "delete", "not-a-uuid"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid id"));
    }
}

mod note_commands {
    use super::*;

    #[test]
    fn add_list_delete_round_trip() {
        let store = TempDir::new().unwrap();

        let output = dayplan(&store)
            .args(["note", "add", "remember the milk"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Added note"))
            .get_output()
            .stdout
            .clone();

        dayplan(&store)
            .args(["note", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("remember the milk"));

        // The id is the last token of the add confirmation.
        let text = String::from_utf8(output).unwrap();
        let id = text.trim().rsplit(' ').next().unwrap().to_string();

        dayplan(&store)
            .args(["note", "delete", &id])
            .assert()
            .success()
            .stdout(predicate::str::contains("Note deleted"));

        dayplan(&store)
            .args(["note", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No notes"));
    }

    #[test]
    fn edit_unknown_note_fails() {
        let store = TempDir::new().unwrap();

        dayplan(&store)
            .args([
                "note",
                "edit",
                "00000000-0000-4000-8000-000000000000",
                "new text",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No note with id"));
    }

    #[test]
    fn rejects_blank_content() {
        let store = TempDir::new().unwrap();

        dayplan(&store)
            .args(["note", "add", "   "])
            .assert()
            .failure();
    }
}

mod summary_commands {
    use super::*;

    #[test]
    fn summary_of_empty_day() {
        let store = TempDir::new().unwrap();

        dayplan(&store)
            .args(["summary", "2026-08-30"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Summary for 2026-08-30"))
            .stdout(predicate::str::contains("0/0 completed"));
    }

    #[test]
    fn summary_counts_tasks() {
        let store = TempDir::new().unwrap();

        dayplan(&store)
            .args([
                "task", "add", "One", "--start", "09:00", "--end", "10:00", "--date", "2026-08-30",
            ])
            .assert()
            .success();

        dayplan(&store)
            .args(["summary", "2026-08-30"])
            .assert()
            .success()
            .stdout(predicate::str::contains("0/1 completed"));
    }

    #[test]
    fn stats_on_empty_store() {
        let store = TempDir::new().unwrap();

        dayplan(&store)
            .args(["stats"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Total: 0"))
            .stdout(predicate::str::contains("(0%)"));
    }
}

mod auth_commands {
    use super::*;

    #[test]
    fn login_then_logout() {
        let store = TempDir::new().unwrap();

        dayplan(&store)
            .args(["login", "ada@example.com"])
            .write_stdin("secret\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Welcome, ada!"));

        // The daemon is unreachable; logout still clears the local session.
        dayplan(&store)
            .args(["logout"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Signed out"));
    }

    #[test]
    fn login_with_display_name() {
        let store = TempDir::new().unwrap();

        dayplan(&store)
            .args(["login", "ada@example.com", "--name", "Ada"])
            .write_stdin("secret\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Welcome, Ada!"));
    }

    #[test]
    fn login_rejects_empty_password() {
        let store = TempDir::new().unwrap();

        dayplan(&store)
            .args(["login", "ada@example.com"])
            .write_stdin("\n")
            .assert()
            .failure()
            .stderr(predicate::str::contains("password"));
    }
}

mod misc_commands {
    use super::*;

    #[test]
    fn no_args_prints_help() {
        let store = TempDir::new().unwrap();

        dayplan(&store)
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage"));
    }

    #[test]
    fn completions_emit_script() {
        let store = TempDir::new().unwrap();

        dayplan(&store)
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("dayplan"));
    }

    #[test]
    fn timer_command_without_daemon_fails() {
        let store = TempDir::new().unwrap();

        dayplan(&store)
            .args(["status"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("daemon"));
    }
}
