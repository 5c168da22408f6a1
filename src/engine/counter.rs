use tracing::{debug, warn};

use crate::document::Form;
use crate::error::FormsetError;
use crate::naming::{Management, Name, Prefix};

/// Read and adjust the `TOTAL_FORMS` counter of a group, addressed by its
/// rendered prefix.
pub trait CounterStore {
    fn get(&self, prefix: &str) -> Result<i64, FormsetError>;

    fn set(&mut self, prefix: &str, value: i64) -> Result<i64, FormsetError>;

    fn increment(&mut self, prefix: &str) -> Result<i64, FormsetError> {
        let value = self.get(prefix)? + 1;
        self.set(prefix, value)
    }

    /// Going below zero is not prevented.
    fn decrement(&mut self, prefix: &str) -> Result<i64, FormsetError> {
        let value = self.get(prefix)? - 1;
        if value < 0 {
            warn!(prefix, value, "counter decremented below zero");
        }
        self.set(prefix, value)
    }
}

fn missing(prefix: &str) -> FormsetError {
    FormsetError::NotFound {
        what: "counter",
        key: Name::management(Prefix::new(prefix), Management::Total).id(),
    }
}

impl CounterStore for Form {
    fn get(&self, prefix: &str) -> Result<i64, FormsetError> {
        self.group(prefix)
            .map(|group| group.total())
            .ok_or_else(|| missing(prefix))
    }

    fn set(&mut self, prefix: &str, value: i64) -> Result<i64, FormsetError> {
        let group = self
            .group_mut(prefix)
            .ok_or_else(|| missing(prefix))?;
        group
            .management
            .total = value;
        debug!(prefix, value, "counter set");
        Ok(value)
    }
}

/// The index an item gets when it brings its group's counter to `count`.
pub fn index_for(prefix: &str, count: i64) -> Result<usize, FormsetError> {
    usize::try_from(count - 1).map_err(|_| FormsetError::InvalidCount {
        prefix: prefix.to_string(),
        value: count.to_string(),
    })
}
