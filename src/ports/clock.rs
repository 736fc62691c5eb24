//! Clock port - the engine's notion of "today".

use chrono::NaiveDate;

/// Source of the current calendar date (UTC).
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_object_safe() {
        fn _accepts_dyn(_clock: &dyn Clock) {}
    }
}
