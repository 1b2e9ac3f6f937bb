use chrono::{TimeZone, Utc};
use leetcode_sync::models::{Difficulty, ProblemDetail, SubmissionRecord, SubmissionStatus};
use leetcode_sync::services::Materializer;
use leetcode_sync::{LocalMaterializer, SyncError, SyncPlanEntry};
use std::fs;

fn entry(title: &str, slug: &str, lang: &str, code: &str) -> SyncPlanEntry {
    SyncPlanEntry::new(SubmissionRecord {
        id: Some(1),
        title: title.to_string(),
        title_slug: slug.to_string(),
        language: lang.to_string(),
        code: code.to_string(),
        status: SubmissionStatus::Accepted,
        submitted_at: Utc.with_ymd_and_hms(2024, 3, 14, 20, 0, 0).unwrap(),
    })
}

fn detail(testcases: &[&str]) -> ProblemDetail {
    ProblemDetail {
        title: "Two Sum".to_string(),
        content: "<p>Find two numbers.</p>".to_string(),
        difficulty: Difficulty::Easy,
        example_testcases: testcases.iter().map(|s| s.to_string()).collect(),
    }
}

#[tokio::test]
async fn writes_code_readme_and_testcases() {
    let out = tempfile::tempdir().unwrap();
    let materializer = LocalMaterializer::new(out.path());

    let dir = materializer
        .materialize(
            &entry("Two Sum", "two-sum", "python3", "class Solution: ..."),
            &detail(&["[2,7,11,15]", "9"]),
        )
        .await
        .unwrap();

    assert_eq!(dir, out.path().join("Two_Sum"));
    assert_eq!(
        fs::read_to_string(dir.join("solution.py")).unwrap(),
        "class Solution: ..."
    );
    assert_eq!(
        fs::read_to_string(dir.join("README.md")).unwrap(),
        "# Two Sum\n\n**Difficulty**: Easy\n\n<p>Find two numbers.</p>"
    );
    assert_eq!(
        fs::read_to_string(dir.join("testcases.txt")).unwrap(),
        "[2,7,11,15]\n9\n"
    );

    // 只剩最终文件，没有临时文件
    let names: Vec<String> = fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names.len(), 3);
}

#[tokio::test]
async fn rewrite_replaces_previous_language_file() {
    let out = tempfile::tempdir().unwrap();
    let materializer = LocalMaterializer::new(out.path());

    materializer
        .materialize(&entry("Two Sum", "two-sum", "python3", "py"), &detail(&["1"]))
        .await
        .unwrap();
    let dir = materializer
        .materialize(&entry("Two Sum", "two-sum", "rust", "rs"), &detail(&[]))
        .await
        .unwrap();

    assert!(!dir.join("solution.py").exists());
    assert!(!dir.join("testcases.txt").exists());
    assert_eq!(fs::read_to_string(dir.join("solution.rs")).unwrap(), "rs");
}

#[tokio::test]
async fn unwritable_output_is_materialization_failure() {
    let out = tempfile::tempdir().unwrap();
    let blocker = out.path().join("not_a_dir");
    fs::write(&blocker, "file").unwrap();

    let materializer = LocalMaterializer::new(&blocker);
    let err = materializer
        .materialize(&entry("Two Sum", "two-sum", "cpp", "int x;"), &detail(&[]))
        .await
        .unwrap_err();

    match &err {
        SyncError::MaterializationFailed { slug, .. } => assert_eq!(slug, "two-sum"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!err.is_fatal());
}

#[tokio::test]
async fn disambiguated_entry_gets_slug_suffixed_directory() {
    let out = tempfile::tempdir().unwrap();
    let materializer = LocalMaterializer::new(out.path());

    let first = entry("A/B", "a-b", "cpp", "int a;");
    let second = entry("A B", "a-b-2", "python3", "b = 1").disambiguated();
    assert_eq!(materializer.destination(&first), out.path().join("A_B"));
    assert_eq!(materializer.destination(&second), out.path().join("A_B_a-b-2"));

    materializer.materialize(&first, &detail(&[])).await.unwrap();
    let dir = materializer.materialize(&second, &detail(&[])).await.unwrap();

    assert_eq!(dir, out.path().join("A_B_a-b-2"));
    assert_eq!(
        fs::read_to_string(out.path().join("A_B/solution.cpp")).unwrap(),
        "int a;"
    );
    assert_eq!(fs::read_to_string(dir.join("solution.py")).unwrap(), "b = 1");
}
