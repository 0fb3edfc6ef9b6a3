use std::sync::LazyLock;

use num_bigint::BigUint;
use num_traits::One;

use crate::error::{Error, Result};

/// Exponents e for which 2^e - 1 is prime, up to 21701.
const MERSENNE_EXPONENTS: [usize; 25] = [
    2, 3, 5, 7, 13, 17, 19, 31, 61, 89, 107, 127, 521, 607, 1279, 2203, 2281, 3217, 4253, 4423,
    9689, 9941, 11213, 19937, 21701,
];

/// Smallest primes above 2^256, 2^320 and 2^384, as (exponent, offset).
const SMALLEST_PRIMES_ABOVE: [(usize, u32); 3] = [(256, 297), (320, 27), (384, 231)];

/// Fixed table of field moduli in ascending order, built once per process.
pub static STANDARD_PRIMES: LazyLock<Vec<BigUint>> = LazyLock::new(|| {
    let mut primes: Vec<BigUint> = MERSENNE_EXPONENTS
        .iter()
        .map(|e| (BigUint::one() << *e) - BigUint::one())
        .chain(
            SMALLEST_PRIMES_ABOVE
                .iter()
                .map(|(e, offset)| (BigUint::one() << *e) + BigUint::from(*offset)),
        )
        .collect();

    primes.sort();
    primes
});

/// Returns the first standard prime strictly greater than every value in
/// `batch`.
///
/// Selection only depends on the largest value of the batch, so it is
/// monotonic: a batch with a larger maximum never selects a smaller prime.
pub fn select<'a, I>(batch: I) -> Result<&'static BigUint>
where
    I: IntoIterator<Item = &'a BigUint>,
{
    let max = batch.into_iter().max();

    STANDARD_PRIMES
        .iter()
        .find(|prime| max.map_or(true, |max| *prime > max))
        .ok_or(Error::SecretTooLarge)
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use num_primes::Verification;
    use num_traits::One;

    use super::{select, STANDARD_PRIMES};
    use crate::error::Error;

    #[test]
    fn test_table_is_sorted_and_complete() {
        assert_eq!(STANDARD_PRIMES.len(), 28);
        assert!(STANDARD_PRIMES.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(STANDARD_PRIMES[0], BigUint::from(3_u32));
        assert_eq!(STANDARD_PRIMES[1], BigUint::from(7_u32));
        assert_eq!(STANDARD_PRIMES[11], (BigUint::one() << 127) - BigUint::one());
        assert_eq!(STANDARD_PRIMES[12], (BigUint::one() << 256) + BigUint::from(297_u32));
        assert_eq!(STANDARD_PRIMES[13], (BigUint::one() << 320) + BigUint::from(27_u32));
        assert_eq!(STANDARD_PRIMES[14], (BigUint::one() << 384) + BigUint::from(231_u32));
        assert_eq!(STANDARD_PRIMES[15], (BigUint::one() << 521) - BigUint::one());
    }

    #[test]
    fn test_fixed_primes_are_prime() {
        // 2^19 - 1 up to the 385-bit prime
        for prime in STANDARD_PRIMES.iter().skip(6).take(9) {
            assert!(Verification::is_prime(prime));
        }
    }

    #[test]
    fn test_select() {
        let batch = [BigUint::from(5_u32), BigUint::from(4_u32)];
        assert_eq!(*select(&batch).unwrap(), BigUint::from(7_u32));

        // strictly greater: a value equal to a table prime moves up one entry
        let batch = [BigUint::from(7_u32)];
        assert_eq!(*select(&batch).unwrap(), BigUint::from(31_u32));

        let batch = [BigUint::one() << 256];
        assert_eq!(*select(&batch).unwrap(), STANDARD_PRIMES[12]);

        let empty: [BigUint; 0] = [];
        assert_eq!(*select(&empty).unwrap(), BigUint::from(3_u32));
    }

    #[test]
    fn test_select_too_large() {
        let largest = STANDARD_PRIMES.last().unwrap().clone();
        let batch = [BigUint::one(), largest];

        assert!(matches!(select(&batch), Err(Error::SecretTooLarge)));
    }

    #[test]
    fn test_select_is_monotonic() {
        let mut last = BigUint::one();

        for bits in (0..2048).step_by(7) {
            let value = BigUint::one() << bits;
            let prime = select(&[value.clone()]).unwrap().clone();

            assert!(prime > value);
            assert!(prime >= last);
            last = prime;
        }
    }
}
