//! Per-operation handling of transport failures.
//!
//! `fetch` swallows transport failures and yields no response, while
//! `create`, `replace` and `remove` hand them back to the caller. That
//! asymmetry is kept, but as data in `ErrorPolicies` rather than as
//! differences between the operation bodies.

/// The four client operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Fetch,
    Create,
    Replace,
    Remove,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Fetch,
        Operation::Create,
        Operation::Replace,
        Operation::Remove,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Fetch => "fetch",
            Operation::Create => "create",
            Operation::Replace => "replace",
            Operation::Remove => "remove",
        }
    }
}

/// What an operation does when the transport fails to produce a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Return the transport error to the caller.
    Propagate,
    /// Log the failure at warn level and return no response.
    SuppressAndLog,
}

/// Error policy for each operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPolicies {
    pub fetch: ErrorPolicy,
    pub create: ErrorPolicy,
    pub replace: ErrorPolicy,
    pub remove: ErrorPolicy,
}

impl ErrorPolicies {
    /// The same policy for every operation.
    pub fn uniform(policy: ErrorPolicy) -> Self {
        Self {
            fetch: policy,
            create: policy,
            replace: policy,
            remove: policy,
        }
    }

    pub fn policy(&self, op: Operation) -> ErrorPolicy {
        match op {
            Operation::Fetch => self.fetch,
            Operation::Create => self.create,
            Operation::Replace => self.replace,
            Operation::Remove => self.remove,
        }
    }
}

impl Default for ErrorPolicies {
    /// Reads suppress, writes propagate.
    // TODO: once existing suites check `Ok(None)` from fetch, make this
    // `uniform(ErrorPolicy::Propagate)`.
    fn default() -> Self {
        Self {
            fetch: ErrorPolicy::SuppressAndLog,
            create: ErrorPolicy::Propagate,
            replace: ErrorPolicy::Propagate,
            remove: ErrorPolicy::Propagate,
        }
    }
}
