//! End-to-end tests for the render pipeline
//!
//! Runs the built `taxolist` binary against the fixture files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn taxolist_cmd() -> Command {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("Failed to find workspace root");
    let target_dir = std::env::var_os("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| workspace_root.join("target"));
    Command::new(target_dir.join("debug/taxolist"))
}

fn render_fixture() -> Command {
    let mut cmd = taxolist_cmd();
    cmd.arg("render")
        .arg("--settings")
        .arg(fixtures_dir().join("settings.jsonc"))
        .arg("--terms")
        .arg(fixtures_dir().join("terms.json"))
        .arg("--sizes")
        .arg(fixtures_dir().join("sizes.json"));
    cmd
}

fn stdout_of(mut cmd: Command) -> String {
    let output = cmd.output().expect("Failed to run taxolist");
    assert!(output.status.success(), "taxolist exited with {}", output.status);
    String::from_utf8(output.stdout).expect("Output is not UTF-8")
}

mod list_output {
    use super::*;

    #[test]
    fn renders_selected_terms_by_count() {
        let html = stdout_of(render_fixture());

        assert!(html.starts_with("<ol class=\"taxolist-list\">\n"));
        assert!(html.ends_with("</ol>\n"));
        assert_eq!(html.matches("<li ").count(), 2);

        let tech = html.find(r#"id="taxolist-term-3""#).unwrap();
        let travel = html.find(r#"id="taxolist-term-2""#).unwrap();
        assert!(tech < travel);
        assert!(!html.contains("Not selected"));
        assert!(!html.contains("Tagged"));
    }

    #[test]
    fn renders_item_pieces() {
        let html = stdout_of(render_fixture());

        assert!(html.contains(
            r#"<li id="taxolist-term-2" class="taxolist-item term-travel">"#
        ));
        assert!(html.contains(
            r#"<img width="48" height="48" src="https://example.com/img/travel.jpg" class="taxolist-term-image taxolist-alignleft" alt="Travel &amp; Food" />"#
        ));
        assert!(html.contains(
            r#"<a href="https://example.com/category/travel/" rel="bookmark">Travel &amp; Food</a>"#
        ));
        assert!(html.contains(
            "<span class=\"term-summary taxolist-term-summary\">Trips, recipes and everything\u{2026}</span>"
        ));
        assert!(html.contains(
            "<span class=\"term-summary taxolist-term-summary\">Gadgets</span>"
        ));
        assert!(html.contains(r#"rel="bookmark">40</a>"#));
    }

    #[test]
    fn term_without_image_has_no_thumbnail() {
        let html = stdout_of(render_fixture());
        let tech_item = html
            .lines()
            .find(|line| line.contains(r#"id="taxolist-term-3""#))
            .unwrap();

        assert!(!tech_item.contains("<img"));
        assert!(!tech_item.contains("taxolist-term-thumbnail"));
    }
}

mod widget_output {
    use super::*;

    #[test]
    fn sanitized_title_in_heading() {
        let mut cmd = render_fixture();
        cmd.arg("--widget");

        let html = stdout_of(cmd);
        assert!(html.contains(r#"<h2 class="widget-title">Browse topics</h2>"#));
        assert!(!html.contains("<link"));
    }
}

mod update_flow {
    use super::*;
    use std::io::Write;

    #[test]
    fn update_round_trips_through_render() {
        let mut update = tempfile::NamedTempFile::new().unwrap();
        update
            .write_all(br#"{ "listStyle": "div", "showCount": 0, "taxTerm": "" }"#)
            .unwrap();

        let mut cmd = taxolist_cmd();
        cmd.arg("update")
            .arg("--old")
            .arg(fixtures_dir().join("settings.jsonc"))
            .arg("--new")
            .arg(update.path());
        let updated = stdout_of(cmd);

        let value: serde_json::Value = serde_json::from_str(&updated).unwrap();
        assert_eq!(value["listStyle"], "div");
        assert_eq!(value["thumbSizeH"], 48);
        assert_eq!(value["layout"], "compact");
        assert_eq!(value["taxTerm"], serde_json::json!([]));

        let mut stored = tempfile::NamedTempFile::new().unwrap();
        stored.write_all(updated.as_bytes()).unwrap();

        taxolist_cmd()
            .arg("render")
            .arg("--settings")
            .arg(stored.path())
            .arg("--terms")
            .arg(fixtures_dir().join("terms.json"))
            .assert()
            .success()
            .stdout(predicate::str::starts_with("<div class=\"taxolist-list\">"))
            .stdout(predicate::str::contains("Not selected"))
            .stdout(predicate::str::contains("Post count").not());
    }
}
