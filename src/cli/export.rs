//! CLI command for project export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Args;

use super::{parse_optional_date, today};
use crate::config::Settings;
use crate::error::{SiteBidError, SiteBidResult};
use crate::export::{export_project_json, export_project_yaml, ExportFormat, ProjectExport};
use crate::services::{AnalysisService, ProjectService};
use crate::storage::Storage;

/// Arguments of `sitebid export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Project name or ID
    pub project: String,

    /// Output file path; prints to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export format (json or yaml)
    #[arg(short, long, default_value = "json")]
    pub format: ExportFormat,

    /// Reference date for overdue payments (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub as_of: Option<String>,
}

/// Write a project with its records and computed figures
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    args: ExportArgs,
) -> SiteBidResult<()> {
    let found = ProjectService::new(storage).require(&args.project)?;
    let as_of = parse_optional_date(args.as_of)?.unwrap_or_else(today);
    let analysis = AnalysisService::new(storage)
        .with_thresholds(settings.risk)
        .analyze(&found, as_of)?;
    let export = ProjectExport::from_analysis(analysis, as_of);

    match args.output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                SiteBidError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(&export, args.format, &mut writer)?;
            writer.flush()?;
            println!("Exported {} to: {}", found.name, path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            write_export(&export, args.format, &mut handle)?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    export: &ProjectExport,
    format: ExportFormat,
    writer: &mut W,
) -> SiteBidResult<()> {
    match format {
        ExportFormat::Json => export_project_json(export, writer),
        ExportFormat::Yaml => export_project_yaml(export, writer),
    }
}
