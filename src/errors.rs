use thiserror::Error;

/// An error when building Lloyd hyperparameters
#[derive(Error, Debug)]
pub enum LloydParamsError {
    #[error("n_clusters cannot be 0")]
    NClusters,
    #[error("tolerance must be greater than 0")]
    Tolerance,
}

/// An error when running one of the Lloyd entry points
#[derive(Error, Debug)]
pub enum LloydError {
    /// When any of the hyperparameters are set the wrong value
    #[error("invalid hyperparameter: {0}")]
    InvalidParams(#[from] LloydParamsError),
    /// When observations and centers disagree on the number of features
    #[error(
        "observations have {observation_features} features but centers have {center_features}"
    )]
    ShapeMismatch {
        observation_features: usize,
        center_features: usize,
    },
    /// When the eligibility vector does not have one entry per observation
    #[error("eligibility vector has {mask_len} entries but there are {n_observations} observations")]
    MaskMismatch {
        mask_len: usize,
        n_observations: usize,
    },
    /// When initialization asks for more distinct centers than there are
    /// eligible candidate points
    #[error(
        "initialization requested {requested} centers but only {available} candidate points are eligible"
    )]
    InsufficientCandidates { requested: usize, available: usize },
    /// The restricted variants run with `n_clusters - 1` centers, so anything
    /// below 2 leaves nothing to cluster with
    #[error("the restricted variants need at least 2 clusters, got {0}")]
    TooFewClusters(usize),
    /// When an assignment is requested against an empty center matrix
    #[error("the center matrix is empty")]
    NoCenters,
}
