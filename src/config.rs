use crate::error::{Error, Result};

pub const DEFAULT_THRESHOLD: u32 = 2;
pub const DEFAULT_SHARES: u32 = 4;
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Parameters of a split: `threshold` of `shares` holders rebuild the
/// secret, which is processed `chunk_size` bytes at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharingConfig {
    pub threshold: u32,
    pub shares: u32,
    pub chunk_size: usize,
}

impl Default for SharingConfig {
    fn default() -> Self {
        SharingConfig {
            threshold: DEFAULT_THRESHOLD,
            shares: DEFAULT_SHARES,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl SharingConfig {
    pub fn new(threshold: u32, shares: u32, chunk_size: usize) -> Self {
        SharingConfig {
            threshold,
            shares,
            chunk_size,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.threshold, self.shares)?;

        if self.chunk_size == 0 {
            return Err(Error::InvalidParameters(
                "chunk size must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Checks `2 <= threshold <= shares`.
pub fn validate_threshold(threshold: u32, shares: u32) -> Result<()> {
    if shares == 0 {
        return Err(Error::InvalidParameters(
            "number of shares must be positive".to_string(),
        ));
    }

    if threshold < 2 {
        return Err(Error::InvalidParameters(format!(
            "threshold must be >= 2, got {}",
            threshold
        )));
    }

    if threshold > shares {
        return Err(Error::InvalidParameters(format!(
            "threshold {} exceeds the number of shares {}",
            threshold, shares
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_threshold, SharingConfig};
    use crate::error::Error;

    #[test]
    fn test_default() {
        let config = SharingConfig::default();

        assert_eq!(config, SharingConfig::new(2, 4, 1024));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(matches!(
            SharingConfig::new(1, 4, 1024).validate(),
            Err(Error::InvalidParameters(_))
        ));
        assert!(matches!(
            SharingConfig::new(5, 4, 1024).validate(),
            Err(Error::InvalidParameters(_))
        ));
        assert!(matches!(
            SharingConfig::new(2, 4, 0).validate(),
            Err(Error::InvalidParameters(_))
        ));
        assert!(SharingConfig::new(4, 4, 1).validate().is_ok());
    }

    #[test]
    fn test_validate_threshold_zero_shares() {
        assert!(matches!(
            validate_threshold(2, 0),
            Err(Error::InvalidParameters(_))
        ));
    }
}
