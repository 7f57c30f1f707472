use crate::error::{Error, Result};
use crate::level;

/// Construction settings for a [`SkipList`](crate::SkipList).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Initial height ceiling. Must be positive.
    pub max_level: usize,
}

impl Options {
    pub fn max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_level == 0 {
            return Err(Error::InvalidMaxLevel(self.max_level));
        }
        Ok(())
    }
}

impl Default for Options {
    /// Picks up the process-wide default max level at the time of the call.
    fn default() -> Self {
        Self {
            max_level: level::default_max_level(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_level_is_rejected() {
        let options = Options::default().max_level(0);
        assert_eq!(options.validate(), Err(Error::InvalidMaxLevel(0)));
        assert!(Options::default().max_level(1).validate().is_ok());
    }
}
