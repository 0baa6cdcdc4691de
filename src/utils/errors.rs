use thiserror::Error;

/// Failure while writing the workbook to disk
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to prepare output directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}
