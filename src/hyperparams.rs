use crate::errors::LloydParamsError;
use crate::Float;

/// Where the batched steps of a run execute.
///
/// An explicit execution-context parameter threaded through every call.
/// It only affects wall-clock time, never results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Spread the assignment step over the rayon thread pool.
    Rayon,
    /// Stay on the calling thread.
    Serial,
}

impl Default for Backend {
    fn default() -> Self {
        Backend::Rayon
    }
}

#[derive(Clone, Debug, PartialEq)]
/// The set of hyperparameters that can be specified for the execution of
/// the [Lloyd entry points](crate::lloyd).
pub struct LloydValidParams<F: Float> {
    /// The run is considered complete once the squared sum of per-center
    /// euclidean shifts after an update falls below `tolerance`.
    tolerance: F,
    /// We exit the loop when the number of iterations exceeds
    /// `max_n_iterations` even if the `tolerance` condition has not been met.
    max_n_iterations: u64,
    /// The number of clusters we will be looking for in the data.
    n_clusters: usize,
    /// Report the center shift of every iteration through `log`.
    verbose: bool,
    /// Execution context for the batched steps.
    backend: Backend,
}

#[derive(Clone, Debug, PartialEq)]
/// An helper struct used to construct a set of [valid hyperparameters](LloydValidParams)
/// for the Lloyd entry points (using the builder pattern).
pub struct LloydParams<F: Float>(LloydValidParams<F>);

impl<F: Float> LloydParams<F> {
    /// Configure a run looking for `n_clusters` clusters.
    ///
    /// Defaults are provided if the optional parameters are not specified:
    /// * `tolerance = 1e-4`
    /// * `max_n_iterations = 20`
    /// * `verbose = false`
    /// * `backend = Backend::Rayon`
    ///
    /// `max_n_iterations = 0` is allowed: the run then returns the
    /// initialization untouched, together with the assignment under it.
    pub fn new(n_clusters: usize) -> Self {
        Self(LloydValidParams {
            tolerance: F::cast(1e-4),
            max_n_iterations: 20,
            n_clusters,
            verbose: false,
            backend: Backend::default(),
        })
    }

    /// Change the value of `tolerance`
    pub fn tolerance(mut self, tolerance: F) -> Self {
        self.0.tolerance = tolerance;
        self
    }

    /// Change the value of `max_n_iterations`
    pub fn max_n_iterations(mut self, max_n_iterations: u64) -> Self {
        self.0.max_n_iterations = max_n_iterations;
        self
    }

    /// Change the value of `verbose`
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.0.verbose = verbose;
        self
    }

    /// Change the value of `backend`
    pub fn backend(mut self, backend: Backend) -> Self {
        self.0.backend = backend;
        self
    }

    pub fn check_ref(&self) -> Result<&LloydValidParams<F>, LloydParamsError> {
        if self.0.n_clusters == 0 {
            Err(LloydParamsError::NClusters)
        } else if self.0.tolerance <= F::zero() {
            Err(LloydParamsError::Tolerance)
        } else {
            Ok(&self.0)
        }
    }

    pub fn check(self) -> Result<LloydValidParams<F>, LloydParamsError> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F: Float> LloydValidParams<F> {
    /// The run is considered complete once the squared sum of per-center
    /// euclidean shifts after an update falls below `tolerance`.
    pub fn tolerance(&self) -> F {
        self.tolerance
    }

    /// We exit the loop when the number of iterations exceeds
    /// `max_n_iterations` even if the `tolerance` condition has not been met.
    pub fn max_n_iterations(&self) -> u64 {
        self.max_n_iterations
    }

    /// The number of clusters we will be looking for in the data.
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Whether each iteration reports its center shift through `log`.
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Execution context for the batched steps.
    pub fn backend(&self) -> Backend {
        self.backend
    }
}
