//! Integration tests for CLI behavior
//!
//! These tests drive the `taxolist` binary with files on disk and check
//! what it prints.

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn taxolist_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_taxolist"))
}

const NEWS_TERMS: &str = r#"[
    { "id": 1, "name": "News", "slug": "news", "count": 3, "permalink": "/news" }
]"#;

mod help_command {
    use super::*;

    #[test]
    fn shows_help_with_flag() {
        taxolist_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"));
    }

    #[test]
    fn shows_version_with_flag() {
        taxolist_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

mod render_command {
    use super::*;

    fn fixture(settings: &str, terms: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        temp.child("settings.json").write_str(settings).unwrap();
        temp.child("terms.json").write_str(terms).unwrap();
        temp
    }

    fn render(temp: &TempDir) -> Command {
        let mut cmd = taxolist_cmd();
        cmd.arg("render")
            .arg("--settings")
            .arg(temp.child("settings.json").path())
            .arg("--terms")
            .arg(temp.child("terms.json").path());
        cmd
    }

    #[test]
    fn renders_ordered_list_with_count() {
        let temp = fixture(
            r#"{ "showThumb": 0, "showCount": 1, "showDesc": 0, "listStyle": "ol" }"#,
            NEWS_TERMS,
        );

        render(&temp)
            .assert()
            .success()
            .stdout(predicate::str::starts_with("<ol class=\"taxolist-list\">"))
            .stdout(predicate::str::contains(
                r#"<a href="/news" rel="bookmark">News</a>"#,
            ))
            .stdout(predicate::str::contains(r#"rel="bookmark">3</a>"#))
            .stdout(predicate::str::contains("term-summary").not())
            .stdout(predicate::str::contains("<img").not());
    }

    #[test]
    fn renders_empty_list() {
        let temp = fixture(r#"{ "listStyle": "span" }"#, "[]");

        render(&temp)
            .assert()
            .success()
            .stdout("<ul class=\"taxolist-list\">\n</ul>\n");
    }

    #[test]
    fn accepts_jsonc_settings() {
        let temp = fixture(
            "{\n  // ordered by count\n  \"orderby\": \"count\",\n  \"order\": \"ASC\",\n}",
            r#"[
                { "id": 1, "name": "Big", "count": 9, "permalink": "/big" },
                { "id": 2, "name": "Small", "count": 1, "permalink": "/small" }
            ]"#,
        );

        let output = render(&temp).output().unwrap();
        assert!(output.status.success());

        let stdout = String::from_utf8(output.stdout).unwrap();
        let small = stdout.find("Small").unwrap();
        let big = stdout.find("Big").unwrap();
        assert!(small < big);
    }

    #[test]
    fn restricts_to_selected_terms() {
        let temp = fixture(
            r#"{ "taxTerm": "2" }"#,
            r#"[
                { "id": 1, "name": "Hidden", "permalink": "/hidden" },
                { "id": 2, "name": "Shown", "permalink": "/shown" }
            ]"#,
        );

        render(&temp)
            .assert()
            .success()
            .stdout(predicate::str::contains("Shown"))
            .stdout(predicate::str::contains("Hidden").not());
    }

    #[test]
    fn uses_named_image_size() {
        let temp = fixture(
            r#"{ "showThumb": 1, "thumbSize": "thumbnail" }"#,
            r#"[{ "id": 4, "name": "Art", "permalink": "/art", "image": "/art.png" }]"#,
        );
        temp.child("sizes.json")
            .write_str(r#"{ "thumbnail": { "width": 150, "height": 120, "crop": true } }"#)
            .unwrap();

        render(&temp)
            .arg("--sizes")
            .arg(temp.child("sizes.json").path())
            .assert()
            .success()
            .stdout(predicate::str::contains(
                r#"<img width="150" height="120" src="/art.png" class="taxolist-term-image taxolist-alignleft size-thumbnail" alt="Art" />"#,
            ));
    }

    #[test]
    fn wraps_widget_chrome() {
        let temp = fixture(r#"{ "title": "Topics", "cssDefault": 1 }"#, NEWS_TERMS);

        render(&temp)
            .args(["--widget", "--preview"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                r#"<h2 class="widget-title">Topics</h2>"#,
            ))
            .stdout(predicate::str::contains(r#"<link rel="stylesheet""#))
            .stdout(predicate::str::contains("taxolist-categories-wrap"));
    }

    #[test]
    fn fails_on_missing_terms_file() {
        let temp = TempDir::new().unwrap();
        temp.child("settings.json").write_str("{}").unwrap();

        render(&temp)
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("Failed to read"));
    }

    #[test]
    fn fails_on_non_object_settings() {
        let temp = fixture("[1, 2]", NEWS_TERMS);

        render(&temp)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Invalid settings"));
    }
}

mod defaults_command {
    use super::*;

    #[test]
    fn prints_default_configuration() {
        let output = taxolist_cmd().arg("defaults").output().unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["title"], "Categories");
        assert_eq!(value["listStyle"], "ul");
        assert_eq!(value["thumbSizeW"], 55);
        assert_eq!(value["showDesc"], 1);
        assert_eq!(value["showCount"], 0);
    }
}

mod update_command {
    use super::*;

    #[test]
    fn merges_new_over_old() {
        let temp = TempDir::new().unwrap();
        temp.child("old.json")
            .write_str(r#"{ "title": "Old", "descLength": 30, "listStyle": "ol" }"#)
            .unwrap();
        temp.child("new.json")
            .write_str(r#"{ "title": "New", "thumbSizeH": 0, "cssDefault": "on" }"#)
            .unwrap();

        let output = taxolist_cmd()
            .arg("update")
            .arg("--old")
            .arg(temp.child("old.json").path())
            .arg("--new")
            .arg(temp.child("new.json").path())
            .args(["--instance", "cats-7"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["title"], "New");
        assert_eq!(value["descLength"], 30);
        assert_eq!(value["listStyle"], "ol");
        assert_eq!(value["thumbSizeH"], 55);
        assert_eq!(value["cssDefault"], 1);
        assert_eq!(value["widgetId"], "cats-7");
    }
}
