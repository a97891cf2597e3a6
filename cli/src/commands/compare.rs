use crate::commands::write_output;
use anyhow::{Context, Result};
use ladder_diff::{CompareOptions, ReportStatus, compare_documents, serialize_report};
use std::path::Path;
use std::process::ExitCode;

pub fn run(left: &str, right: &str, output: Option<&str>, all_rungs: bool) -> Result<ExitCode> {
    let options = CompareOptions {
        include_all_rungs: all_rungs,
    };

    let report = compare_documents(Path::new(left), Path::new(right), &options)
        .context("Comparison failed")?;

    let json = serialize_report(&report).context("Failed to serialize comparison report")?;
    write_output(output, &json)?;

    eprintln!(
        "{}: {} ladder difference(s)",
        match report.summary.status {
            ReportStatus::Pass => "PASS",
            ReportStatus::Fail => "FAIL",
        },
        report.summary.ladder_differences
    );

    Ok(match report.summary.status {
        ReportStatus::Pass => ExitCode::SUCCESS,
        ReportStatus::Fail => ExitCode::from(1),
    })
}
