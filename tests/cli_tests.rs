//! End-to-end tests of the `exact-mapper` binary

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use predicates::prelude::*;
use tempfile::TempDir;

const REFERENCE: &str = ">chr1 first contig\nACGTACGT\n>chr2\nTTAAAATT\n";

fn fastq(reads: &[(&str, &str)]) -> String {
    reads
        .iter()
        .map(|(name, bases)| format!("@{name}\n{bases}\n+\n{}\n", "I".repeat(bases.len())))
        .collect()
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn write_gzip(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut encoder = GzEncoder::new(fs::File::create(&path).unwrap(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap();
    path
}

fn exact_mapper() -> Command {
    Command::cargo_bin("exact-mapper").unwrap()
}

fn inputs(dir: &TempDir) -> (PathBuf, PathBuf) {
    let reference = write_file(dir, "ref.fa", REFERENCE);
    let reads = write_file(
        dir,
        "reads.fq",
        &fastq(&[("r1", "ACGT"), ("r2", "AAAA"), ("r3", "GGGG")]),
    );
    (reference, reads)
}

#[test]
fn test_map_text_output() {
    let dir = TempDir::new().unwrap();
    let (reference, reads) = inputs(&dir);

    exact_mapper()
        .arg("map")
        .arg(&reference)
        .arg(&reads)
        .assert()
        .success()
        .stdout(
            "read r1 matched chr1 (#0) at offset 0\n\
             read r1 matched chr1 (#0) at offset 4\n\
             read r2 matched chr2 (#1) at offset 2\n",
        )
        .stderr(predicate::str::contains(
            "2 sequences loaded, 3 reads processed, 3 matches found",
        ));
}

#[test]
fn test_map_tsv_output() {
    let dir = TempDir::new().unwrap();
    let (reference, reads) = inputs(&dir);

    exact_mapper()
        .args(["--format", "tsv", "map"])
        .arg(&reference)
        .arg(&reads)
        .assert()
        .success()
        .stdout(
            "read\treference_index\treference\toffset\n\
             r1\t0\tchr1\t0\n\
             r1\t0\tchr1\t4\n\
             r2\t1\tchr2\t2\n",
        );
}

#[test]
fn test_map_json_output() {
    let dir = TempDir::new().unwrap();
    let (reference, reads) = inputs(&dir);

    let output = exact_mapper()
        .args(["--format", "json", "map"])
        .arg(&reference)
        .arg(&reads)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let records: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(records.len(), 3);
    assert_eq!(records[2]["read"], "r2");
    assert_eq!(records[2]["reference"], "chr2");
    assert_eq!(records[2]["reference_index"], 1);
    assert_eq!(records[2]["offset"], 2);

    let stderr = String::from_utf8(output.stderr).unwrap();
    let summary: serde_json::Value = stderr
        .lines()
        .find_map(|l| serde_json::from_str(l).ok())
        .unwrap();
    assert_eq!(summary["references"], 2);
    assert_eq!(summary["reads_processed"], 3);
    assert_eq!(summary["reads_matched"], 2);
    assert_eq!(summary["matches"], 3);
    assert_eq!(summary["cancelled"], false);
}

#[test]
fn test_map_legacy_output() {
    let dir = TempDir::new().unwrap();
    let (reference, reads) = inputs(&dir);

    exact_mapper()
        .args(["--format", "legacy", "map"])
        .arg(&reference)
        .arg(&reads)
        .assert()
        .success()
        .stdout(
            "Match found in sequence 0.\n\
             Match found in sequence 0.\n\
             Match found in sequence 1.\n",
        );
}

#[test]
fn test_map_legacy_compare_reports_overhang() {
    let dir = TempDir::new().unwrap();
    let reference = write_file(&dir, "ref.fa", ">s0\nACGTAC\n");
    let reads = write_file(&dir, "reads.fq", &fastq(&[("r1", "ACGT")]));

    exact_mapper()
        .args(["--format", "tsv", "map"])
        .arg(&reference)
        .arg(&reads)
        .args(["--compare", "legacy-sentinel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("r1\t0\ts0\t0\n"))
        .stdout(predicate::str::contains("r1\t0\ts0\t4\n"));

    exact_mapper()
        .args(["--format", "tsv", "map"])
        .arg(&reference)
        .arg(&reads)
        .assert()
        .success()
        .stdout(predicate::str::contains("r1\t0\ts0\t4\n").not());
}

#[test]
fn test_map_kmer_strategy_and_threads_match_default() {
    let dir = TempDir::new().unwrap();
    let (reference, reads) = inputs(&dir);

    let baseline = exact_mapper()
        .args(["--format", "tsv", "map"])
        .arg(&reference)
        .arg(&reads)
        .output()
        .unwrap();
    assert!(baseline.status.success());

    exact_mapper()
        .args(["--format", "tsv", "map"])
        .arg(&reference)
        .arg(&reads)
        .args(["--strategy", "kmer", "--kmer-size", "3", "--threads", "2"])
        .args(["--batch-size", "2"])
        .assert()
        .success()
        .stdout(String::from_utf8(baseline.stdout).unwrap());
}

#[test]
fn test_map_gzipped_inputs_and_stdin() {
    let dir = TempDir::new().unwrap();
    let reference = write_gzip(&dir, "ref.fa.gz", REFERENCE);

    exact_mapper()
        .args(["--format", "legacy", "map"])
        .arg(&reference)
        .arg("-")
        .write_stdin(fastq(&[("r2", "AAAA")]))
        .assert()
        .success()
        .stdout("Match found in sequence 1.\n");
}

#[test]
fn test_map_malformed_reads_keeps_earlier_output() {
    let dir = TempDir::new().unwrap();
    let reference = write_file(&dir, "ref.fa", REFERENCE);
    let mut content = fastq(&[("r1", "ACGT")]);
    content.push_str("not-a-fastq-record\nACGT\n+\nIIII\n");
    content.push_str(&fastq(&[("r3", "AAAA")]));
    let reads = write_file(&dir, "reads.fq", &content);

    exact_mapper()
        .args(["--format", "tsv", "map"])
        .arg(&reference)
        .arg(&reads)
        .assert()
        .failure()
        .stdout(predicate::str::contains("r1\t0\tchr1\t4"))
        .stdout(predicate::str::contains("r3").not())
        .stderr(predicate::str::contains("read record #2"));
}

#[test]
fn test_map_warns_on_unusual_reference_extension() {
    let dir = TempDir::new().unwrap();
    let reference = write_file(&dir, "ref.txt", REFERENCE);
    let reads = write_file(&dir, "reads.fq", &fastq(&[("r2", "AAAA")]));

    exact_mapper()
        .args(["--format", "legacy", "map"])
        .arg(&reference)
        .arg(&reads)
        .assert()
        .success()
        .stdout("Match found in sequence 1.\n")
        .stderr(predicate::str::contains("reading it as FASTA"));
}

#[test]
fn test_map_malformed_quality_line() {
    let dir = TempDir::new().unwrap();
    let reference = write_file(&dir, "ref.fa", REFERENCE);
    let reads = write_file(&dir, "reads.fq", "@r1\nACGT\n+\nIIII\n@r2\nAC\n+\nIII\n");

    exact_mapper()
        .arg("map")
        .arg(&reference)
        .arg(&reads)
        .assert()
        .failure()
        .stdout(predicate::str::contains("read r1 matched chr1 (#0) at offset 4"))
        .stderr(predicate::str::contains("sequence and quality lengths differ"));
}

#[test]
fn test_map_missing_reference() {
    let dir = TempDir::new().unwrap();
    let reads = write_file(&dir, "reads.fq", &fastq(&[("r1", "ACGT")]));

    exact_mapper()
        .arg("map")
        .arg(dir.path().join("missing.fa"))
        .arg(&reads)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load reference sequences"));
}

#[test]
fn test_map_missing_reads() {
    let dir = TempDir::new().unwrap();
    let reference = write_file(&dir, "ref.fa", REFERENCE);

    exact_mapper()
        .arg("map")
        .arg(&reference)
        .arg(dir.path().join("missing.fq"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to open reads from"));
}

#[test]
fn test_map_reference_limit() {
    let dir = TempDir::new().unwrap();
    let (reference, reads) = inputs(&dir);

    exact_mapper()
        .arg("map")
        .arg(&reference)
        .arg(&reads)
        .args(["--max-references", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("limit of 1"));
}

#[test]
fn test_map_empty_reference_file() {
    let dir = TempDir::new().unwrap();
    let reference = write_file(&dir, "ref.fa", "");
    let reads = write_file(&dir, "reads.fq", &fastq(&[("r1", "ACGT")]));

    exact_mapper()
        .arg("map")
        .arg(&reference)
        .arg(&reads)
        .assert()
        .failure();
}

#[test]
fn test_summary_tsv() {
    let dir = TempDir::new().unwrap();
    let reference = write_file(&dir, "ref.fa", ">s0\nACGT\n>s1\nAAAAAA\n");

    exact_mapper()
        .args(["--format", "tsv", "summary"])
        .arg(&reference)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("index\tname\tlength\tmd5\n"))
        .stdout(predicate::str::contains(
            "0\ts0\t4\tf1f8f4bf413b16ad135722aa4591043e\n",
        ))
        .stdout(predicate::str::contains("1\ts1\t6\t"));
}

#[test]
fn test_summary_json() {
    let dir = TempDir::new().unwrap();
    let reference = write_file(&dir, "ref.fa", REFERENCE);

    let output = exact_mapper()
        .args(["--format", "json", "summary"])
        .arg(&reference)
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["sequence_count"], 2);
    assert_eq!(summary["total_bases"], 16);
    assert_eq!(summary["sequences"][0]["name"], "chr1");
    assert_eq!(summary["sequences"][1]["length"], 8);
}
