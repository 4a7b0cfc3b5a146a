#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("endTime precedes startTime")]
    EndBeforeStart,
    #[error("no requested point falls inside a supported forecast sector")]
    NoPointsInSector,
    #[error("the prober returned zero matches")]
    EmptyMatches,
    #[error("invalid input document: {0}")]
    Input(String),
    #[error("failed to decode input: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("time component out of range: {0}")]
    TimeRange(#[from] time::error::ComponentRange),
}
