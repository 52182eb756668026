use thiserror::Error;

use crate::server::ServerError;

/// Anything that can end the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("window error: {0}")]
    Ui(#[from] eframe::Error),
}
