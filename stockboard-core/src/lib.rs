//! stockboard-core: data layer of the warehouse dashboard
//!
//! Turns uploaded spreadsheets into the dashboard's typed dataset, applies
//! hand edits, and keeps the whole dataset persisted in a key-value slot.

pub mod config;
pub mod dataset;
pub mod edit;
pub mod normalize;
pub mod reader;
pub mod store;

use std::path::Path;
use thiserror::Error;

pub use config::StockboardConfig;
pub use dataset::{
    CategoryPerf, DashboardDataset, GpLine, InventoryBucket, Product, Section, StatEntry,
    TrendPoint,
};
pub use edit::{EditError, FieldEdit};
pub use normalize::ImportReport;
pub use reader::{RawRow, RawValue, RawWorkbook, ReadError};
pub use store::{DashboardStore, FileStorage, MemoryStorage, Storage, StoreError};

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Edit(#[from] EditError),
}

/// The dashboard's live dataset together with the store it is written through to.
///
/// Every mutation builds a complete new dataset, saves it, and only then
/// replaces the in-memory copy. A failed decode or save leaves it untouched.
/// Mutations take `&mut self`, so uploads within one session run one at a time.
pub struct Dashboard<S: Storage> {
    store: DashboardStore<S>,
    data: DashboardDataset,
}

impl<S: Storage> Dashboard<S> {
    /// Start from the saved dataset, or the built-in sample if there is none
    pub fn open(store: DashboardStore<S>) -> Self {
        let data = store.load().unwrap_or_else(|| {
            tracing::info!("no saved dataset, starting from sample data");
            DashboardDataset::default()
        });
        Self { store, data }
    }

    pub fn data(&self) -> &DashboardDataset {
        &self.data
    }

    pub fn store(&self) -> &DashboardStore<S> {
        &self.store
    }

    /// Import an uploaded spreadsheet held in memory
    pub fn import_bytes(&mut self, bytes: &[u8]) -> Result<ImportReport, DashboardError> {
        let workbook = reader::read_workbook_bytes(bytes)?;
        self.import_workbook(&workbook)
    }

    /// Import a spreadsheet file from disk
    pub fn import_file<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportReport, DashboardError> {
        let workbook = reader::read_workbook(path)?;
        self.import_workbook(&workbook)
    }

    /// Import CSV text as the rows of one section
    pub fn import_csv(
        &mut self,
        section: Section,
        content: &str,
    ) -> Result<ImportReport, DashboardError> {
        let sheet = reader::read_csv(section.sheet_name(), content)?;
        self.import_workbook(&RawWorkbook {
            sheets: vec![sheet],
        })
    }

    /// Merge already-decoded sheets into the dataset
    pub fn import_workbook(
        &mut self,
        workbook: &RawWorkbook,
    ) -> Result<ImportReport, DashboardError> {
        let mut next = self.data.clone();
        let report = normalize::apply_workbook(&mut next, workbook);
        if report.is_empty() {
            tracing::info!(ignored = report.ignored.len(), "upload matched no section");
            return Ok(report);
        }

        self.replace(next)?;
        tracing::info!(
            sections = report.applied.len(),
            ignored = report.ignored.len(),
            "imported workbook"
        );
        Ok(report)
    }

    /// Save `dataset` as the whole new state
    pub fn replace(&mut self, dataset: DashboardDataset) -> Result<(), DashboardError> {
        self.store.save(&dataset)?;
        self.data = dataset;
        Ok(())
    }

    /// Apply a single hand edit and save the result
    pub fn edit(&mut self, edit: &FieldEdit) -> Result<(), DashboardError> {
        let edited = edit::apply_edit(&self.data, edit)?;
        self.replace(edited)
    }

    /// Go back to the built-in sample data, persisting it
    pub fn reset(&mut self) -> Result<(), DashboardError> {
        self.replace(DashboardDataset::default())
    }
}
