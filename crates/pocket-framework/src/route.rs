//! Named path segments for remote resource collections.

/// Identifies which resource collection an API talks to (e.g. `"User"`).
///
/// Routes are usually a fieldless enum with one variant per domain entity.
pub trait Route {
    fn path(&self) -> &str;
}

impl Route for str {
    fn path(&self) -> &str {
        self
    }
}

impl Route for String {
    fn path(&self) -> &str {
        self.as_str()
    }
}
