use std::collections::HashSet;
use std::fs;
use std::path::Path;

use renumber::renumber::{padding_width, target_name};
use renumber::{standardize, ItemStatus};
use tempfile::tempdir;

fn touch(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), name.as_bytes()).unwrap();
    }
}

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn nine_files_already_numbered_are_left_alone() {
    let dir = tempdir().unwrap();
    let names: Vec<String> = (1..=9).map(|n| format!("ex{}.py", n)).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    touch(dir.path(), &refs);

    let report = standardize(dir.path()).unwrap();

    assert_eq!(report.width, 1);
    assert_eq!(report.renamed(), 0);
    assert_eq!(report.summary.unchanged, 9);
    assert_eq!(listing(dir.path()), names);
}

#[test]
fn tenth_file_widens_padding() {
    let dir = tempdir().unwrap();
    let names: Vec<String> = (1..=10).map(|n| format!("ex{}.py", n)).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    touch(dir.path(), &refs);

    let report = standardize(dir.path()).unwrap();

    assert_eq!(report.width, 2);
    assert!(!report.has_failures());
    let expected: Vec<String> = (1..=10).map(|n| format!("ex{:02}.py", n)).collect();
    assert_eq!(listing(dir.path()), expected);
}

#[test]
fn padded_names_reach_a_fixed_point() {
    let dir = tempdir().unwrap();
    let names: Vec<String> = (1..=10).map(|n| format!("ex{:02}.py", n)).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    touch(dir.path(), &refs);

    let report = standardize(dir.path()).unwrap();

    assert_eq!(report.renamed(), 0);
    assert_eq!(listing(dir.path()), names);
}

#[test]
fn no_candidates_is_a_no_op() {
    let dir = tempdir().unwrap();
    touch(dir.path(), &["readme.py", "notes.txt"]);

    let report = standardize(dir.path()).unwrap();

    assert_eq!(report.total, 0);
    assert!(report.items.is_empty());
    assert_eq!(listing(dir.path()), vec!["notes.txt", "readme.py"]);
}

#[test]
fn missing_directory_is_reported() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("code-atividades");

    let err = standardize(&target).unwrap_err();

    assert_eq!(err.code.as_str(), "directory.not_found");
    assert_eq!(err.details["path"], target.display().to_string());
    assert!(listing(dir.path()).is_empty());
}

#[test]
fn mixed_case_names_are_matched_and_normalized() {
    let dir = tempdir().unwrap();
    touch(dir.path(), &["EX1.PY", "ex2.py"]);

    let report = standardize(dir.path()).unwrap();

    assert_eq!(report.total, 2);
    assert_eq!(report.items[0].from, "EX1.PY");
    assert_eq!(report.items[0].to, "ex1.py");
    assert_eq!(report.items[0].status, ItemStatus::Renamed);
    assert_eq!(report.items[1].status, ItemStatus::Unchanged);
    assert_eq!(listing(dir.path()), vec!["ex1.py", "ex2.py"]);
    assert_eq!(fs::read_to_string(dir.path().join("ex1.py")).unwrap(), "EX1.PY");
}

#[test]
fn second_run_renames_nothing() {
    let dir = tempdir().unwrap();
    touch(dir.path(), &["ex3.py", "ex10.py", "EX7.py", "ex22.py"]);

    let first = standardize(dir.path()).unwrap();
    assert!(first.renamed() > 0);

    let second = standardize(dir.path()).unwrap();
    assert_eq!(second.renamed(), 0);
    assert_eq!(second.summary.unchanged, 4);
}

#[test]
fn every_candidate_maps_once_onto_the_full_sequence() {
    let dir = tempdir().unwrap();
    let names: Vec<String> = (0..105).map(|n| format!("ex{}.py", n * 3 + 1)).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    touch(dir.path(), &refs);

    let report = standardize(dir.path()).unwrap();
    assert_eq!(report.width, 3);
    assert!(!report.has_failures());

    let sources: HashSet<&str> = report.items.iter().map(|i| i.from.as_str()).collect();
    let expected_sources: HashSet<&str> = names.iter().map(String::as_str).collect();
    assert_eq!(sources, expected_sources);

    let expected: Vec<String> = (1..=105).map(|n| target_name(n, 3)).collect();
    assert_eq!(listing(dir.path()), expected);

    // Each file's content still names its original, so nothing was overwritten.
    let contents: HashSet<String> = expected
        .iter()
        .map(|name| fs::read_to_string(dir.path().join(name)).unwrap())
        .collect();
    assert_eq!(contents.len(), 105);
}

#[test]
fn sequence_follows_case_insensitive_name_order() {
    let dir = tempdir().unwrap();
    touch(dir.path(), &["ex9.py", "EX10.py", "ex100.py", "Ex2.py"]);

    let report = standardize(dir.path()).unwrap();

    let order: Vec<&str> = report.items.iter().map(|i| i.from.as_str()).collect();
    assert_eq!(order, vec!["EX10.py", "ex100.py", "Ex2.py", "ex9.py"]);
    for pair in report.items.windows(2) {
        assert!(pair[0].from.to_lowercase() < pair[1].from.to_lowercase());
        assert!(pair[0].sequence < pair[1].sequence);
    }
    assert_eq!(fs::read_to_string(dir.path().join("ex1.py")).unwrap(), "EX10.py");
    assert_eq!(fs::read_to_string(dir.path().join("ex4.py")).unwrap(), "ex9.py");
}

#[test]
fn padding_rule_boundaries() {
    assert_eq!(padding_width(9), 1);
    assert_eq!(padding_width(10), 2);
    assert_eq!(padding_width(99), 2);
    assert_eq!(padding_width(100), 3);
}

#[test]
fn non_matching_entries_are_never_moved() {
    let dir = tempdir().unwrap();
    let bystanders = [
        "readme.py",
        "ex1_old.py",
        "test_ex2.py",
        "ex3.txt",
        "ex.py",
        "ex4.py.bak",
    ];
    touch(dir.path(), &bystanders);
    touch(dir.path(), &["ex8.py", "ex9.py"]);
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("ex5.py"), "").unwrap();

    standardize(dir.path()).unwrap();

    let after = listing(dir.path());
    for name in bystanders {
        assert!(after.contains(&name.to_string()), "{} was moved", name);
    }
    assert!(after.contains(&"ex1.py".to_string()));
    assert!(after.contains(&"ex2.py".to_string()));
    assert!(dir.path().join("sub").join("ex5.py").exists());
}

#[test]
fn names_differing_only_in_case_are_both_kept() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("EX1.py"), "upper").unwrap();
    fs::write(dir.path().join("ex1.py"), "lower").unwrap();

    let report = standardize(dir.path()).unwrap();

    assert_eq!(report.total, 2);
    assert_eq!(report.renamed(), 2);
    assert_eq!(listing(dir.path()), vec!["ex1.py", "ex2.py"]);
    assert_eq!(fs::read_to_string(dir.path().join("ex1.py")).unwrap(), "upper");
    assert_eq!(fs::read_to_string(dir.path().join("ex2.py")).unwrap(), "lower");
}
