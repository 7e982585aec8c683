//! Error types.
//!
//! The regression engine reports structured [`FitError`]s so callers can react
//! to the failure kind (fix input shapes, drop a collinear column, supply more
//! observations). The binary wraps everything in [`AppError`], which carries a
//! process exit code.

/// Failure modes of the regression engine.
///
/// Every failure is detected synchronously inside the failing call and no
/// partial result is ever produced. Retrying identical inputs cannot change a
/// deterministic numerical outcome, so there is no recovery path inside the
/// engine: the caller adjusts inputs and re-invokes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FitError {
    /// Input array lengths inconsistent with the declared dimensions.
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Degrees of freedom would be <= 0; standard errors are undefined.
    InsufficientObservations { nobs: usize, nparams: usize },
    /// Inner dimensions disagree for a matrix product, or a non-square matrix
    /// was passed where a square one is required.
    DimensionMismatch {
        what: &'static str,
        left: usize,
        right: usize,
    },
    /// No valid pivot during elimination: exactly or numerically collinear
    /// predictors.
    SingularMatrix { column: usize },
}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitError::ShapeMismatch {
                what,
                expected,
                actual,
            } => write!(f, "Shape mismatch: {what} has length {actual}, expected {expected}."),
            FitError::InsufficientObservations { nobs, nparams } => write!(
                f,
                "Insufficient observations: {nobs} observation(s) for {nparams} coefficient(s) \
                 (degrees of freedom must be > 0)."
            ),
            FitError::DimensionMismatch { what, left, right } => {
                write!(f, "Dimension mismatch in {what}: {left} vs {right}.")
            }
            FitError::SingularMatrix { column } => write!(
                f,
                "Matrix is singular: no usable pivot for column {column} \
                 (collinear or redundant predictors)."
            ),
        }
    }
}

impl std::error::Error for FitError {}

/// Application-level error with a process exit code.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        // Exit code 3: valid invocation, but the data could not be fit.
        AppError::new(3, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
