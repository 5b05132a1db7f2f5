pub mod cashback;
pub mod setup;
pub mod spending;
pub mod summary;
pub mod ui;

use crate::SaveTarget;
use crate::core::report::{self, ReportKind};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// Renders `report` to JSON, persists it when asked to and prints either the
/// JSON or the table view. Returns the JSON text.
pub(crate) fn emit<T: Serialize + ?Sized>(
    kind: ReportKind,
    report: &T,
    render_table: impl FnOnce(&T) -> String,
    reports_dir: &Path,
    save: Option<&SaveTarget>,
    table: bool,
) -> Result<String> {
    let json = report::to_json(report)?;

    if let Some(target) = save {
        let path = match target {
            SaveTarget::Default => kind.default_path(reports_dir),
            SaveTarget::Path(path) => path.clone(),
        };
        report::save_report(&path, &json)?;
    }

    if table {
        println!("{}", render_table(report));
    } else {
        println!("{json}");
    }
    Ok(json)
}
