use std::sync::LazyLock;

use log::{debug, info};
use num_bigint::BigUint;
use num_traits::One;
use rand::{CryptoRng, Rng};
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};

use crate::{
    chunker,
    codec::{self, SECRET_CODEC},
    config::{validate_threshold, SharingConfig},
    error::{Error, Result},
    polynomial::Polynomial,
    prime,
    share::Share,
    sharebox::{DistributionShareBox, ShareBox},
    util::Util,
};

/// Every field is at least as large as the smallest standard prime above
/// 2^256. Split and combine both add this value to their prime selection
/// batch.
pub static FIELD_FLOOR: LazyLock<BigUint> = LazyLock::new(|| BigUint::one() << 256);

fn field_for<'a, I>(values: I, count: &'a BigUint) -> Result<&'static BigUint>
where
    I: IntoIterator<Item = &'a BigUint>,
{
    prime::select(values.into_iter().chain([count, &*FIELD_FLOOR]))
}

/// Bit length of the field the given shares of one chunk live in.
fn field_bits(shares: &[Share]) -> usize {
    let count = BigUint::from(shares.len() as u64);

    field_for(shares.iter().map(|share| &share.y), &count).map_or(0, |prime| prime.bits())
}

/// Splits one chunk value into `shares` points of a random polynomial of
/// degree `threshold - 1` whose constant term is `value`.
///
/// Share `i` sits at x = i for i in `1..=shares`. A polynomial is discarded
/// and resampled when one of its points would, on its own, lead the
/// combiner to a different prime; any subset of the returned shares
/// therefore re-derives the field used here.
pub fn split_chunk<R>(rng: &mut R, value: &BigUint, threshold: u32, shares: u32) -> Result<Vec<Share>>
where
    R: Rng + CryptoRng + ?Sized,
{
    validate_threshold(threshold, shares)?;

    let count = BigUint::from(shares);
    let prime = field_for(Some(value), &count)?;
    let mut polynomial = Polynomial::new();

    loop {
        polynomial.init(rng, value, threshold - 1, prime);

        let points: Vec<Share> = (1..=shares)
            .map(|x| Share::new(x, polynomial.get_value(&BigUint::from(x), prime)))
            .collect();

        let rederives = points
            .iter()
            .all(|share| field_for(Some(&share.y), &count).map_or(false, |p| p == prime));

        if rederives {
            return Ok(points);
        }

        debug!("resampling polynomial, a share would select a smaller field");
    }
}

/// Recovers the constant term of the polynomial through `shares`.
///
/// At least two shares with distinct x-coordinates are required. The
/// result equals the original chunk value only if at least as many correct
/// shares as the split threshold are supplied; with fewer, or with
/// corrupted shares, an unrelated value is returned and no error is raised.
/// Plain Shamir sharing has no way to tell the two apart.
pub fn combine_chunk(shares: &[Share]) -> Result<BigUint> {
    if shares.len() < 2 {
        return Err(Error::InsufficientShares(format!(
            "at least 2 shares are required, got {}",
            shares.len()
        )));
    }

    let count = BigUint::from(shares.len() as u64);
    let prime = field_for(shares.iter().map(|share| &share.y), &count)?;
    let points: Vec<(u32, BigUint)> = shares
        .iter()
        .map(|share| (share.x, share.y.clone()))
        .collect();

    Util::lagrange_at_zero(&points, prime).ok_or_else(|| {
        Error::InsufficientShares("shares must have pairwise distinct x-coordinates".to_string())
    })
}

/// Shamir secret sharing of arbitrarily long secrets.
#[derive(Debug, Clone, Copy, Default)]
pub struct SSS {
    pub config: SharingConfig,
}

impl SSS {
    pub fn new(config: SharingConfig) -> Self {
        SSS { config }
    }

    fn encode_chunks(&self, secret: &[u8]) -> Result<Vec<BigUint>> {
        self.config.validate()?;

        let chunks = chunker::split(secret, self.config.chunk_size)?;

        info!(
            "splitting {} bytes into {} chunk(s), {} shares, threshold {}",
            secret.len(),
            chunks.len(),
            self.config.shares,
            self.config.threshold
        );

        chunks
            .iter()
            .map(|chunk| SECRET_CODEC.encode(&codec::to_hex(chunk)))
            .collect()
    }

    fn assemble(chunks: Vec<Vec<Share>>) -> Vec<ShareBox> {
        let mut distribution = DistributionShareBox::new();

        distribution.init(chunks);
        distribution.to_artifacts()
    }

    /// Splits `secret` into one `ShareBox` per holder.
    ///
    /// Chunks are shared in parallel, each worker drawing coefficients from
    /// its own thread-local CSPRNG.
    pub fn split(&self, secret: &[u8]) -> Result<Vec<ShareBox>> {
        let values = self.encode_chunks(secret)?;
        let (threshold, shares) = (self.config.threshold, self.config.shares);

        let chunks = values
            .par_iter()
            .enumerate()
            .map(|(i, value)| -> Result<Vec<Share>> {
                let points = split_chunk(&mut rand::thread_rng(), value, threshold, shares)?;
                debug!("chunk {} shared over a {}-bit field", i, field_bits(&points));
                Ok(points)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SSS::assemble(chunks))
    }

    /// Same as `split`, sequentially drawing every coefficient from `rng`.
    pub fn split_with_rng<R>(&self, rng: &mut R, secret: &[u8]) -> Result<Vec<ShareBox>>
    where
        R: Rng + CryptoRng + ?Sized,
    {
        let values = self.encode_chunks(secret)?;

        let chunks = values
            .iter()
            .enumerate()
            .map(|(i, value)| -> Result<Vec<Share>> {
                let points = split_chunk(rng, value, self.config.threshold, self.config.shares)?;
                debug!("chunk {} shared over a {}-bit field", i, field_bits(&points));
                Ok(points)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SSS::assemble(chunks))
    }

    /// Rebuilds the secret from share boxes of distinct holders.
    ///
    /// See `combine_chunk`: supplying fewer boxes than the split threshold
    /// is not detected. The recovered chunk values are then unrelated
    /// integers, which usually fail to decode as hex text (`Error::Decode`)
    /// but may also come back as wrong bytes.
    pub fn combine(&self, artifacts: &[ShareBox]) -> Result<Vec<u8>> {
        let distribution = DistributionShareBox::from_artifacts(artifacts)?;

        info!(
            "combining {} chunk(s) from {} share artifact(s)",
            distribution.chunks.len(),
            artifacts.len()
        );

        let chunks = distribution
            .chunks
            .par_iter()
            .enumerate()
            .map(|(i, shares)| {
                let value = combine_chunk(shares)?;
                debug!("chunk {} recovered over a {}-bit field", i, field_bits(shares));
                codec::from_hex(&SECRET_CODEC.decode(&value))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(chunker::join(&chunks))
    }
}
