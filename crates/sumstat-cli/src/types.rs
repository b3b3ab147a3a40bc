use sumstat_cli::pipeline::FileOutcome;
use sumstat_model::RunSummary;

#[derive(Debug)]
pub struct ReconcileReport {
    pub outcomes: Vec<FileOutcome>,
    pub summary: RunSummary,
    pub dry_run: bool,
}
