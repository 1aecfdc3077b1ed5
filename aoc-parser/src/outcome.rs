//! Result of a single parser invocation

/// Outcome of running a parser at some position of the input.
///
/// Every parser invocation produces exactly one of the two variants.
/// On `Success`, `next` is never smaller than the position the parser
/// started from. On `Failure`, `position` is diagnostic only: it is the
/// furthest point the parser could reach before giving up, which is not
/// necessarily where it started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseOutcome<T> {
    /// The parser matched; parsing resumes at `next`.
    Success {
        /// Position right after the consumed input
        next: usize,
        /// The parsed value
        value: T,
    },
    /// The parser did not match.
    Failure {
        /// Position where parsing could not continue
        position: usize,
    },
}

impl<T> ParseOutcome<T> {
    /// Build a success outcome
    pub fn success(next: usize, value: T) -> Self {
        ParseOutcome::Success { next, value }
    }

    /// Build a failure outcome
    pub fn failure(position: usize) -> Self {
        ParseOutcome::Failure { position }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ParseOutcome::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Resume position on success, failure position otherwise
    pub fn position(&self) -> usize {
        match self {
            ParseOutcome::Success { next, .. } => *next,
            ParseOutcome::Failure { position } => *position,
        }
    }

    /// Transform the value of a success, leaving failures untouched
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ParseOutcome<U> {
        match self {
            ParseOutcome::Success { next, value } => ParseOutcome::Success {
                next,
                value: f(value),
            },
            ParseOutcome::Failure { position } => ParseOutcome::Failure { position },
        }
    }

    /// Discard the position and keep the value, if any
    pub fn value(self) -> Option<T> {
        match self {
            ParseOutcome::Success { value, .. } => Some(value),
            ParseOutcome::Failure { .. } => None,
        }
    }

    /// Convert into a `Result` of `(next, value)` or the failure position
    pub fn into_result(self) -> Result<(usize, T), usize> {
        match self {
            ParseOutcome::Success { next, value } => Ok((next, value)),
            ParseOutcome::Failure { position } => Err(position),
        }
    }
}

impl<T> From<ParseOutcome<T>> for Result<(usize, T), usize> {
    fn from(outcome: ParseOutcome<T>) -> Self {
        outcome.into_result()
    }
}

/// Merge the failure positions of two alternatives, keeping the furthest one
#[inline]
pub(crate) fn furthest(a: usize, b: usize) -> usize {
    a.max(b)
}
