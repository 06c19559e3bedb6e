use thiserror::Error;

// Ошибки загрузки схемы зала
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout file: {0}")]
    Io(#[from] std::io::Error),

    #[error("layout is not a JSON array of boolean rows: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid layout cell {ch:?} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, ch: char },
}

// Результат восстановления выбора из cookie.
// Ни одна из этих ошибок не выходит за пределы Room::new.
#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("no persisted selection")]
    Missing,

    #[error("persisted selection is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}
