//! Configuration access port trait.

/// Read-only view of `[section] key = value` settings.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    /// Integer setting; `Err` carries the raw value when it does not parse.
    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, String>;
}
