//! Integration tests for the batch reconciliation pipeline.

use std::collections::BTreeSet;
use std::path::Path;

use tempfile::TempDir;

use sumstat_cli::pipeline::{
    FileStatus, ProcessFileInput, ReconcileInput, SkipReason, process_file, reconcile,
    write_metadata,
};
use sumstat_ingest::TsvHeaderSource;
use sumstat_map::SchemaResolver;
use sumstat_model::{CandidateTable, FieldSpec, ResolvedColumn, SampleSizeFallback};

fn gwas_resolver() -> SchemaResolver {
    let spec = |field: &str, candidates: &[&str]| {
        FieldSpec::new(field, candidates.iter().map(|c| (*c).to_string()).collect())
    };
    let table = CandidateTable::new(vec![
        spec("MARKERNAME", &["SNP", "rsid"]),
        spec("CHROMOSOME", &["Chr"]),
        spec("POSITION", &["Pos"]),
        spec("EA", &["A1"]),
        spec("NEA", &["A2"]),
        spec("BETA", &["Beta"]),
        spec("SE", &["StdErr"]),
        spec("P", &["Pval"]),
        spec("N", &["N", "SampleSize"]),
    ])
    .unwrap();
    let optional: BTreeSet<String> = ["N".to_string()].into_iter().collect();
    SchemaResolver::new(table, optional)
}

fn required_fields() -> Vec<String> {
    ["MARKERNAME", "CHROMOSOME", "POSITION", "P"]
        .iter()
        .map(|f| (*f).to_string())
        .collect()
}

fn write_file(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).unwrap();
}

const FULL_HEADER: &str = "SNP\tA1\tA2\tBeta\tStdErr\tPval\tChr\tPos\nrs1\tA\tG\t0.1\t0.02\t0.5\t1\t12345\n";

#[test]
fn file_without_n_is_accepted_without_n_binding() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "gwas_a.tsv", FULL_HEADER);

    let resolver = gwas_resolver();
    let required = required_fields();
    let status = process_file(&ProcessFileInput {
        filename: "gwas_a.tsv",
        path: &dir.path().join("gwas_a.tsv"),
        resolver: &resolver,
        header_source: &TsvHeaderSource,
        required_fields: &required,
        fallback: &SampleSizeFallback::default(),
    });

    let FileStatus::Accepted(record) = status else {
        panic!("expected acceptance, got {status:?}");
    };
    assert_eq!(record.columns.len(), 8);
    assert!(record.column_for("N").is_none());
    assert_eq!(
        record.column_for("MARKERNAME"),
        Some(&ResolvedColumn::Column {
            original: "SNP".to_string(),
            standardized: "MARKERNAME".to_string(),
        })
    );
}

#[test]
fn fallback_entry_becomes_a_literal_n_binding() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "gwas_a.tsv", FULL_HEADER);

    let mut fallback = SampleSizeFallback::default();
    fallback.insert("gwas_a.tsv", 85_000);

    let resolver = gwas_resolver();
    let required = required_fields();
    let status = process_file(&ProcessFileInput {
        filename: "gwas_a.tsv",
        path: &dir.path().join("gwas_a.tsv"),
        resolver: &resolver,
        header_source: &TsvHeaderSource,
        required_fields: &required,
        fallback: &fallback,
    });

    let FileStatus::Accepted(record) = status else {
        panic!("expected acceptance, got {status:?}");
    };
    assert_eq!(
        record.column_for("N"),
        Some(&ResolvedColumn::Literal {
            value: 85_000,
            standardized: "N".to_string(),
        })
    );
}

#[test]
fn fallback_is_not_consulted_when_the_file_has_its_own_n_column() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "gwas_a.tsv",
        "SNP\tChr\tPos\tPval\tN\nrs1\t1\t12345\t0.5\t1000\n",
    );

    let mut fallback = SampleSizeFallback::default();
    fallback.insert("gwas_a.tsv", 85_000);

    let resolver = gwas_resolver();
    let required = required_fields();
    let status = process_file(&ProcessFileInput {
        filename: "gwas_a.tsv",
        path: &dir.path().join("gwas_a.tsv"),
        resolver: &resolver,
        header_source: &TsvHeaderSource,
        required_fields: &required,
        fallback: &fallback,
    });

    let FileStatus::Accepted(record) = status else {
        panic!("expected acceptance, got {status:?}");
    };
    assert_eq!(
        record.column_for("N"),
        Some(&ResolvedColumn::Column {
            original: "N".to_string(),
            standardized: "N".to_string(),
        })
    );
}

#[test]
fn missing_required_fields_skip_the_file_and_name_them() {
    let dir = TempDir::new().unwrap();
    // No p-value column anywhere.
    write_file(dir.path(), "gwas_a.tsv", "SNP\tChr\tPos\nrs1\t1\t12345\n");

    let resolver = gwas_resolver();
    let required = required_fields();
    let status = process_file(&ProcessFileInput {
        filename: "gwas_a.tsv",
        path: &dir.path().join("gwas_a.tsv"),
        resolver: &resolver,
        header_source: &TsvHeaderSource,
        required_fields: &required,
        fallback: &SampleSizeFallback::default(),
    });

    let FileStatus::Skipped(SkipReason::MissingRequired(fields)) = status else {
        panic!("expected missing-required skip, got {status:?}");
    };
    assert_eq!(fields, vec!["P".to_string()]);
}

#[test]
fn batch_contains_per_file_failures_and_counts_them() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    std::fs::create_dir(&data).unwrap();
    write_file(&data, "01_good.tsv", FULL_HEADER);
    write_file(&data, "02_empty.tsv", "");
    write_file(&data, "03_incomplete.txt", "SNP\tChr\nrs1\t1\n");
    write_file(&data, "ignored.csv", "SNP\n");

    let resolver = gwas_resolver();
    let required = required_fields();
    let result = reconcile(&ReconcileInput {
        data_dir: &data,
        resolver: &resolver,
        header_source: &TsvHeaderSource,
        required_fields: &required,
        fallback: &SampleSizeFallback::default(),
    })
    .unwrap();

    assert_eq!(result.scanned(), 3);
    assert_eq!(result.accepted(), 1);
    assert_eq!(result.skipped(), 2);

    assert!(matches!(
        result.outcomes[0].status,
        FileStatus::Accepted(_)
    ));
    assert!(matches!(
        result.outcomes[1].status,
        FileStatus::Skipped(SkipReason::HeaderRead(_))
    ));
    assert!(matches!(
        result.outcomes[2].status,
        FileStatus::Skipped(SkipReason::MissingRequired(_))
    ));

    let summary = result.run_summary(Path::new("out/metadata.json"));
    assert!(summary.is_consistent());
}

#[test]
fn repeated_runs_produce_an_identical_artifact() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    std::fs::create_dir(&data).unwrap();
    write_file(&data, "gwas_a.tsv", FULL_HEADER);
    write_file(
        &data,
        "gwas_b.tsv",
        "rsid\tChr\tPos\tPval\nrs2\t2\t999\t0.01\n",
    );

    let resolver = gwas_resolver();
    let required = required_fields();
    let input = ReconcileInput {
        data_dir: &data,
        resolver: &resolver,
        header_source: &TsvHeaderSource,
        required_fields: &required,
        fallback: &SampleSizeFallback::default(),
    };

    let first_path = dir.path().join("first.json");
    let second_path = dir.path().join("second.json");
    write_metadata(&first_path, &reconcile(&input).unwrap().records()).unwrap();
    write_metadata(&second_path, &reconcile(&input).unwrap().records()).unwrap();

    let first = std::fs::read_to_string(&first_path).unwrap();
    let second = std::fs::read_to_string(&second_path).unwrap();
    assert_eq!(first, second);

    let parsed: serde_json::Value = serde_json::from_str(&first).unwrap();
    let records = parsed.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["filename"], "gwas_a.tsv");
    assert_eq!(records[1]["filename"], "gwas_b.tsv");
    assert_eq!(
        records[1]["columns"][0],
        serde_json::json!({"original": "rsid", "standardized": "MARKERNAME"})
    );
}

#[test]
fn write_metadata_creates_missing_output_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("out").join("metadata.json");
    write_metadata(&path, &[]).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
}
