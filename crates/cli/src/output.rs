// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use gsync_engine::CycleReport;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => print!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Text/JSON view of a cycle report
#[derive(Serialize)]
#[serde(transparent)]
pub struct ReportView<'a>(pub &'a CycleReport);

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.operations.is_empty() {
            return writeln!(f, "No operations");
        }
        for op in &self.0.operations {
            write!(
                f,
                "{}/{} ({}): {}",
                op.source, op.operation, op.category, op.delta
            )?;
            match op.written {
                Some(written) => writeln!(f, " [{} statements]", written.statements)?,
                None => writeln!(f)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
