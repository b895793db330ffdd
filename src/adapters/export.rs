use crate::core::series::SeriesSpec;
use crate::domain::model::{DashboardSnapshot, SeriesKind};
use crate::domain::ports::Storage;
use crate::utils::error::{DashError, Result};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

const ARCHIVE_NAME: &str = "dash_export.zip";

/// Writes one cycle's snapshot to storage as a ZIP archive: a CSV per
/// non-empty series plus a `kpis.json` with the scalar and derived metrics.
pub struct SnapshotExporter<S: Storage> {
    storage: S,
}

impl<S: Storage> SnapshotExporter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn export(&self, snapshot: &DashboardSnapshot) -> Result<String> {
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            for kind in SeriesKind::ALL {
                let Some(rows) = snapshot.series.get(&kind) else {
                    continue;
                };
                if rows.is_empty() {
                    continue;
                }
                zip.start_file::<_, ()>(format!("{}.csv", kind.key()), FileOptions::default())?;
                zip.write_all(&series_csv(kind, snapshot)?)?;
            }

            zip.start_file::<_, ()>("kpis.json", FileOptions::default())?;
            let kpi_doc = serde_json::json!({
                "kpis": snapshot.kpis,
                "investment": snapshot.investment,
                "cost": snapshot.cost,
            });
            zip.write_all(serde_json::to_string_pretty(&kpi_doc)?.as_bytes())?;

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!(bytes = zip_data.len(), "writing dashboard export");
        self.storage.write_file(ARCHIVE_NAME, &zip_data).await?;

        Ok(ARCHIVE_NAME.to_string())
    }
}

fn series_csv(kind: SeriesKind, snapshot: &DashboardSnapshot) -> Result<Vec<u8>> {
    let spec = SeriesSpec::for_kind(kind);
    let rows = snapshot.series.get(&kind).map_or(&[][..], Vec::as_slice);

    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["date"];
    header.extend(spec.fields.iter().map(|field| field.name));
    writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![row.date.clone()];
        record.extend(
            spec.fields
                .iter()
                .map(|field| row.value(field.name).to_string()),
        );
        writer.write_record(&record)?;
    }

    writer.into_inner().map_err(|e| DashError::Processing {
        message: format!("CSV buffer flush failed: {}", e),
    })
}
