use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ladder-diff"))
}

fn run(args: &[&str]) -> Output {
    Command::new(bin())
        .args(args)
        .output()
        .expect("binary should run")
}

fn write_revision(root: &Path, location: &str, revision: &str, lad002: &str) -> PathBuf {
    let rev_dir = root.join(location).join(revision);
    let ladders = rev_dir.join("ladders");
    fs::create_dir_all(&ladders).expect("mkdir ladders");
    fs::write(ladders.join("LAD002.raw.txt"), lad002).expect("write dump");
    // Not a ladder dump; indexing must skip it.
    fs::write(ladders.join("notes.raw.txt"), "scratch notes").expect("write stray file");
    fs::write(
        rev_dir.join("program_snapshot.json"),
        r#"{"program_files": [{"number": 2}], "data_files": [{"number": 7}, {"number": 8}], "identity": {"processor": "MicroLogix"}}"#,
    )
    .expect("write snapshot");
    rev_dir
}

#[test]
fn index_align_compare_round_trip() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = tmp.path();

    let rev_a = write_revision(
        root,
        "unit-1",
        "rev-a",
        "SOR XIC I:1/0 OTE O:2/0 EOR SOR TON T4:0 1.0 30 0 EOR SOR END EOR",
    );
    let rev_b = write_revision(
        root,
        "unit-1",
        "rev-b",
        "SOR XIC I:1/0 OTE O:2/0 EOR SOR TON T4:0 1.0 45 12 EOR SOR END EOR",
    );

    // Index every revision under the root.
    let out = run(&["index", root.to_str().expect("utf-8 path")]);
    assert!(out.status.success(), "index failed: {:?}", out);
    let left_doc = rev_a.join("likeaversion.json");
    let right_doc = rev_b.join("likeaversion.json");
    assert!(left_doc.is_file());
    assert!(right_doc.is_file());

    // Only LAD* dumps are indexed; the stray .raw.txt file is skipped.
    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&left_doc).expect("read document"))
            .expect("json");
    let ladder_names: Vec<&str> = doc["ladders"]
        .as_object()
        .expect("ladders object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(ladder_names, vec!["LAD002"]);

    // Both revisions share a footprint, so they land in one family.
    let index_out = root.join("alignment_index.json");
    let out = run(&[
        "align",
        root.to_str().expect("utf-8 path"),
        "--output",
        index_out.to_str().expect("utf-8 path"),
    ]);
    assert!(out.status.success(), "align failed: {:?}", out);

    let index: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&index_out).expect("read index")).expect("json");
    let family = &index["(1, 2)"];
    assert_eq!(
        family["programs"],
        serde_json::json!(["unit-1/rev-a", "unit-1/rev-b"])
    );
    assert!(family["ladders"]["LAD002"]["revisions"]["2"].is_object());

    // Preset differs (parameter channel): compare must FAIL with exit 1.
    let report_out = root.join("report.json");
    let out = run(&[
        "compare",
        left_doc.to_str().expect("utf-8 path"),
        right_doc.to_str().expect("utf-8 path"),
        "--output",
        report_out.to_str().expect("utf-8 path"),
    ]);
    assert_eq!(out.status.code(), Some(1), "compare output: {:?}", out);

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_out).expect("read report"))
            .expect("json");
    assert_eq!(report["summary"]["status"], "FAIL");
    assert_eq!(report["summary"]["ladder_differences"], 1);
    assert_eq!(
        report["ladders"]["LAD002"]["status"],
        "parameter_difference"
    );

    // A revision compared against itself passes with exit 0.
    let out = run(&[
        "compare",
        left_doc.to_str().expect("utf-8 path"),
        left_doc.to_str().expect("utf-8 path"),
    ]);
    assert!(out.status.success(), "self-compare failed: {:?}", out);
}

#[test]
fn compare_with_missing_document_exits_with_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = run(&[
        "compare",
        tmp.path().join("absent.json").to_str().expect("utf-8 path"),
        tmp.path().join("absent.json").to_str().expect("utf-8 path"),
    ]);
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("LADDIFF_COMPARE_001"), "stderr: {}", stderr);
}

#[test]
fn align_without_documents_exits_with_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = run(&["align", tmp.path().to_str().expect("utf-8 path")]);
    assert_eq!(out.status.code(), Some(2));
}
