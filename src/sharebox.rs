use crate::error::{Error, Result};
use crate::share::Share;

/// Everything one shareholder keeps: its share of every chunk, in chunk
/// order, all at the same x-coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShareBox {
    pub holder: u32,
    pub shares: Vec<Share>,
}

impl ShareBox {
    pub fn new() -> Self {
        ShareBox {
            holder: 0,
            shares: Vec::new(),
        }
    }

    /// Builds a box from parsed shares, requiring them to agree on the
    /// holder's x-coordinate.
    pub fn init(&mut self, shares: Vec<Share>) -> Result<()> {
        let holder = shares
            .first()
            .map(|share| share.x)
            .ok_or_else(|| Error::Decode("share artifact holds no shares".to_string()))?;

        if let Some(share) = shares.iter().find(|share| share.x != holder) {
            return Err(Error::Decode(format!(
                "share artifact mixes holders {} and {}",
                holder, share.x
            )));
        }

        self.holder = holder;
        self.shares = shares;

        Ok(())
    }

    pub fn chunk_count(&self) -> usize {
        self.shares.len()
    }

    /// The textual tokens of this box, one per chunk.
    pub fn tokens(&self) -> Vec<String> {
        self.shares.iter().map(Share::to_string).collect()
    }
}

/// Shares of a whole secret grouped by chunk: `chunks[c]` holds the shares
/// of chunk `c`, one per holder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DistributionShareBox {
    pub chunks: Vec<Vec<Share>>,
}

impl DistributionShareBox {
    pub fn new() -> Self {
        DistributionShareBox { chunks: Vec::new() }
    }

    pub fn init(&mut self, chunks: Vec<Vec<Share>>) {
        self.chunks = chunks;
    }

    /// Regroups per-chunk shares into one box per holder. Holder `i` gets the
    /// `i`-th share of every chunk.
    pub fn to_artifacts(&self) -> Vec<ShareBox> {
        let holders = self.chunks.first().map_or(0, Vec::len);

        (0..holders)
            .map(|i| {
                let shares: Vec<Share> = self
                    .chunks
                    .iter()
                    .filter_map(|chunk| chunk.get(i).cloned())
                    .collect();

                ShareBox {
                    holder: shares.first().map_or(0, |share| share.x),
                    shares,
                }
            })
            .collect()
    }

    /// Inverse of `to_artifacts` for any subset of the boxes.
    pub fn from_artifacts(artifacts: &[ShareBox]) -> Result<Self> {
        let expected = artifacts
            .first()
            .map(ShareBox::chunk_count)
            .ok_or_else(|| Error::InsufficientShares("no share artifacts supplied".to_string()))?;

        if let Some(other) = artifacts.iter().find(|a| a.chunk_count() != expected) {
            return Err(Error::ChunkMismatch {
                expected,
                found: other.chunk_count(),
            });
        }

        let chunks = (0..expected)
            .map(|c| {
                artifacts
                    .iter()
                    .map(|artifact| artifact.shares[c].clone())
                    .collect()
            })
            .collect();

        Ok(DistributionShareBox { chunks })
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use super::{DistributionShareBox, ShareBox};
    use crate::error::Error;
    use crate::share::Share;

    fn share(x: u32, y: u32) -> Share {
        Share::new(x, BigUint::from(y))
    }

    fn distribution() -> DistributionShareBox {
        let mut distribution = DistributionShareBox::new();

        distribution.init(vec![
            vec![share(1, 10), share(2, 20), share(3, 30)],
            vec![share(1, 11), share(2, 21), share(3, 31)],
        ]);

        distribution
    }

    #[test]
    fn test_to_artifacts() {
        let artifacts = distribution().to_artifacts();

        assert_eq!(artifacts.len(), 3);
        assert_eq!(artifacts[1].holder, 2);
        assert_eq!(artifacts[1].shares, vec![share(2, 20), share(2, 21)]);
        assert_eq!(artifacts[2].tokens(), vec!["3-1e", "3-1f"]);
    }

    #[test]
    fn test_from_artifacts_subset() {
        let artifacts = distribution().to_artifacts();
        let subset = [artifacts[2].clone(), artifacts[0].clone()];
        let regrouped = DistributionShareBox::from_artifacts(&subset).unwrap();

        assert_eq!(
            regrouped.chunks,
            vec![
                vec![share(3, 30), share(1, 10)],
                vec![share(3, 31), share(1, 11)]
            ]
        );
    }

    #[test]
    fn test_from_artifacts_chunk_mismatch() {
        let mut artifacts = distribution().to_artifacts();
        artifacts[1].shares.pop();

        match DistributionShareBox::from_artifacts(&artifacts) {
            Err(Error::ChunkMismatch { expected, found }) => {
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("expected a chunk mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_from_no_artifacts() {
        assert!(matches!(
            DistributionShareBox::from_artifacts(&[]),
            Err(Error::InsufficientShares(_))
        ));
    }

    #[test]
    fn test_init_rejects_mixed_holders() {
        let mut share_box = ShareBox::new();

        assert!(share_box.init(vec![share(1, 5), share(1, 6)]).is_ok());
        assert_eq!(share_box.holder, 1);
        assert!(matches!(
            share_box.init(vec![share(1, 5), share(2, 6)]),
            Err(Error::Decode(_))
        ));
        assert!(matches!(share_box.init(vec![]), Err(Error::Decode(_))));
    }
}
