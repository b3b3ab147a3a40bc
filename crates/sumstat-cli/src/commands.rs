use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span, warn};

use sumstat_cli::config::Config;
use sumstat_cli::pipeline::{ReconcileInput, reconcile, write_metadata};
use sumstat_ingest::{TsvHeaderSource, load_candidate_table, load_sample_size_fallback};
use sumstat_map::SchemaResolver;
use sumstat_model::SampleSizeFallback;

use crate::cli::{FieldsArgs, ReconcileArgs};
use crate::summary::apply_table_style;
use crate::types::ReconcileReport;

pub fn run_reconcile(args: &ReconcileArgs, config: &Config) -> Result<ReconcileReport> {
    let run_span = info_span!("reconcile", data_dir = %config.data_dir.display());
    let _run_guard = run_span.enter();
    let started = std::time::Instant::now();

    let table =
        load_candidate_table(&config.candidate_table_file).context("load candidate table")?;
    info!(
        fields = table.len(),
        genome_build = %config.genome_build,
        "loaded candidate table"
    );

    let fallback = match &config.sample_size_fallback_file {
        Some(path) if !path.exists() => {
            // The fallback is a convenience input; a missing file is not fatal.
            warn!(
                path = %path.display(),
                "sample-size fallback file not found; proceeding without it"
            );
            SampleSizeFallback::default()
        }
        Some(path) => load_sample_size_fallback(path).context("load sample-size fallback")?,
        None => SampleSizeFallback::default(),
    };

    let resolver = SchemaResolver::new(table, config.optional_fields.iter().cloned().collect());
    let header_source = TsvHeaderSource;

    let result = reconcile(&ReconcileInput {
        data_dir: &config.data_dir,
        resolver: &resolver,
        header_source: &header_source,
        required_fields: &config.required_fields,
        fallback: &fallback,
    })?;

    if args.dry_run {
        info!("dry run; mapping artifact not written");
    } else {
        write_metadata(&config.output_metadata_file, &result.records())
            .context("write mapping artifact")?;
    }

    let summary = result.run_summary(&config.output_metadata_file);
    info!(
        scanned = summary.scanned,
        accepted = summary.accepted,
        skipped = summary.skipped,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "run complete"
    );

    Ok(ReconcileReport {
        outcomes: result.outcomes,
        summary,
        dry_run: args.dry_run,
    })
}

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let candidate_table =
        load_candidate_table(&args.table).context("load candidate table")?;
    let mut table = Table::new();
    table.set_header(vec!["Field", "Candidates"]);
    apply_table_style(&mut table);
    for spec in candidate_table.fields() {
        table.add_row(vec![spec.field.clone(), spec.candidates.join(", ")]);
    }
    println!("{table}");
    Ok(())
}
