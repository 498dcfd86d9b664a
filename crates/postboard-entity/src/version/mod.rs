//! Optimistic concurrency support.

/// Version assigned to every record on insert.
pub const INITIAL_VERSION: i32 = 1;

/// A record that participates in optimistic concurrency control.
///
/// Updates are accepted only when the caller's `version` matches the
/// persisted one; a successful update advances it by exactly one.
pub trait Versioned {
    /// Record identity.
    fn id(&self) -> i64;

    /// Version the caller last observed.
    fn version(&self) -> i32;

    /// Record the version returned by a successful write.
    fn set_version(&mut self, version: i32);
}
