// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use clap::ValueEnum;
use reap_core::{format_local, Job};
use reap_engine::report::format_candidates;
use reap_engine::Survey;
use serde::Serialize;

use crate::color;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One candidate in `reap list --output json`
#[derive(Debug, Serialize)]
pub struct ListedJob<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub finished_at_ms: Option<u64>,
    /// Local time, `YYYY-MM-DD HH:MM:SS`
    pub finished_at: Option<String>,
    pub labels: &'a [String],
}

impl<'a> From<&'a Job> for ListedJob<'a> {
    fn from(job: &'a Job) -> Self {
        let finished_at_ms = job.last_finished_ms();
        Self {
            id: job.id.as_str(),
            name: &job.name,
            finished_at_ms,
            finished_at: finished_at_ms.map(format_local),
            labels: &job.labels,
        }
    }
}

/// Print the candidates of a survey in text or JSON format.
pub fn print_survey(
    out: &mut impl Write,
    survey: &Survey,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            let cutoff = format_local(survey.candidates.cutoff_ms());
            let _ = writeln!(out, "{}", color::header(&format!("Idle jobs finished before {cutoff}")));
            format_candidates(out, &survey.candidates);
            let _ = writeln!(out, "{}", color::context(&format!("{} job(s) retrieved", survey.total)));
        }
        OutputFormat::Json => {
            let listed: Vec<ListedJob<'_>> = survey.candidates.iter().map(ListedJob::from).collect();
            serde_json::to_writer_pretty(&mut *out, &listed)?;
            let _ = writeln!(out);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
