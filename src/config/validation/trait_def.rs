//! Section-level checks for gate configuration

/// Implemented by each config section (`gate`, `authority`, every route)
pub trait Validate {
    /// Check the section on its own; cross-route conflicts are caught when the
    /// route table is compiled.
    fn validate(&self) -> Result<(), String>;
}
