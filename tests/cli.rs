mod common;

use common::Project;
use predicates::prelude::*;
use predicates::str::contains;

/// app → a, b, ghost (not installed); a → c; c → d (too deep); e is unrelated.
fn project() -> Project {
    let p = Project::new(
        r#"{"name": "app", "version": "1.0.0", "dependencies": {"a": "^1", "b": "^1", "ghost": "1"}}"#,
    );
    p.install(
        "a",
        &[("package.json", r#"{"license": {"type": "MIT"}, "dependencies": {"c": "1"}}"#)],
    )
    .install(
        "b",
        &[
            ("package.json", r#"{"licenses": [{"type": "MIT"}, {"type": "Apache-2.0"}]}"#),
            ("LICENSE", "ignored, manifest wins"),
        ],
    )
    .install(
        "c",
        &[
            ("package.json", r#"{"dependencies": {"d": "1"}}"#),
            ("README.md", "# c\n\n## License (ISC)\n"),
        ],
    )
    .install("d", &[("package.json", "{}")])
    .install("e", &[("package.json", r#"{"license": "BSD-3-Clause"}"#)]);
    p
}

#[test]
fn list_report_for_declared_dependencies() {
    let p = project();
    p.cmd().arg("-q").assert().success().stdout("done\n");
    assert_eq!(
        p.read("licences.md"),
        "* a: MIT\n* b: MIT OR Apache-2.0\n* c: ISC\n"
    );
}

#[test]
fn all_installed_packages() {
    let p = project();
    p.cmd().args(["-q", "--all"]).assert().success();
    assert_eq!(
        p.read("licences.md"),
        "* a: MIT\n* b: MIT OR Apache-2.0\n* c: ISC\n* d: UNKNOWN\n* e: BSD-3-Clause\n"
    );
}

#[test]
fn license_file_and_known_table() {
    let p = Project::new(r#"{"dependencies": {"f": "1", "extsprintf": "1"}}"#);
    p.install(
        "f",
        &[
            ("LICENSE.txt", "Permission is hereby granted, free of charge, to any person"),
            ("README.md", "## License (GPL)"),
        ],
    )
    .install("extsprintf", &[("README.md", "no heading")]);

    p.cmd().arg("-q").assert().success();
    assert_eq!(p.read("licences.md"), "* extsprintf: MIT\n* f: MIT\n");
}

#[test]
fn document_report_embeds_bodies() {
    let p = project();
    p.cmd()
        .args(["-q", "--report", "document", "-o", "NOTICE.md"])
        .assert()
        .success();
    let doc = p.read("NOTICE.md");
    assert!(doc.starts_with("# Third-party licenses\n"));
    assert!(doc.contains("## b\n\n```text\nMIT License"));
    assert!(doc.contains("Apache License"));
    assert!(doc.contains("## c\n\n```text\nISC License"));
}

#[test]
fn json_report_goes_to_stdout() {
    let p = project();
    let out = p
        .cmd()
        .args(["-q", "--report", "json"])
        .assert()
        .success()
        .stderr(contains("done"))
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
    assert_eq!(json[0]["package_name"], "a");
    assert_eq!(json[0]["source"], "Manifest");
    assert_eq!(json[2]["source"], "ReadmeHeuristic");
    assert!(!p.root.join("licences.md").exists());
}

#[test]
fn malformed_package_is_unknown() {
    let p = project();
    p.install("b", &[("package.json", "{ broken")]);
    p.cmd()
        .arg("-q")
        .assert()
        .success()
        .stderr(contains("could not resolve license"));
    assert!(p.read("licences.md").contains("* b: UNKNOWN\n"));
}

#[test]
fn strict_aborts_without_writing() {
    let p = project();
    p.install("b", &[("package.json", "{ broken")]);
    p.cmd()
        .args(["-q", "--strict"])
        .assert()
        .failure()
        .stderr(contains("malformed manifest"));
    assert!(!p.root.join("licences.md").exists());
}

#[test]
fn missing_manifest_fails() {
    let p = project();
    std::fs::remove_file(p.root.join("package.json")).unwrap();
    p.cmd()
        .assert()
        .failure()
        .stderr(contains("manifest not found"))
        .stdout(contains("done").not());
}

#[test]
fn config_extends_known_table() {
    let p = Project::new(r#"{"dependencies": {"mystery": "1"}}"#);
    p.install("mystery", &[("index.js", "")]);
    std::fs::create_dir_all(p.root.join(".license-scribe")).unwrap();
    std::fs::write(
        p.root.join(".license-scribe/config.toml"),
        "[known]\n\"Public Domain\" = [\"mystery\"]\n",
    )
    .unwrap();

    p.cmd().arg("-q").assert().success();
    assert_eq!(p.read("licences.md"), "* mystery: Public Domain\n");
}

#[test]
fn summary_is_printed() {
    let p = project();
    p.cmd()
        .arg("--verbose")
        .assert()
        .success()
        .stdout(contains("SUMMARY").and(contains("done")));
}
