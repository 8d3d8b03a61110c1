use thiserror::Error;

/// Build-time failures; the tick path itself never errors.
#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("missing drivetrain")]
    MissingDrivetrain,
    #[error("missing heading sensor")]
    MissingHeadingSensor,
    #[error("missing alignment oracle")]
    MissingAlignmentOracle,
    #[error("missing path executor")]
    MissingPathExecutor,
    #[error("missing intake")]
    MissingIntake,
    #[error("missing indexer")]
    MissingIndexer,
    #[error("missing shooter")]
    MissingShooter,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
