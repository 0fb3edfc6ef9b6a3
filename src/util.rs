use num_bigint::{BigInt, BigUint, Sign, ToBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};

pub struct Util {}

impl Util {
    // implementation of the extended Euclidean algorithm
    // https://en.wikipedia.org/wiki/Extended_Euclidean_algorithm
    pub fn extend_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
        if a.is_zero() {
            (b.clone(), BigInt::zero(), BigInt::one())
        } else {
            let (g, x, y) = Util::extend_gcd(&(b % a), a);

            (g, y - (b / a) * &x, x)
        }
    }

    // calculates the modular multiplicative inverse
    // https://en.wikipedia.org/wiki/Modular_multiplicative_inverse
    pub fn mod_inverse(a: &BigInt, modular: &BigInt) -> Option<BigInt> {
        let (g, x, _) = Util::extend_gcd(&a.mod_floor(modular), modular);

        if g != BigInt::one() {
            None
        } else {
            Some(x.mod_floor(modular))
        }
    }

    /// Lagrange basis coefficient of `i` evaluated at zero, as an unreduced
    /// fraction: product of `j / (j - i)` over every other `j` in `values`.
    pub fn lagrange_coefficient(i: u32, values: &[u32]) -> (BigInt, BigInt) {
        if !values.contains(&i) {
            return (BigInt::zero(), BigInt::one());
        }

        let mut numerator = BigInt::one();
        let mut denominator = BigInt::one();

        for j in values.iter().filter(|j| **j != i) {
            numerator *= BigInt::from(*j);
            denominator *= BigInt::from(i64::from(*j) - i64::from(i));
        }

        (numerator, denominator)
    }

    /// Value at x = 0 of the polynomial through `points`, modulo `prime`.
    ///
    /// Returns `None` when x-coordinates repeat or a denominator has no
    /// inverse modulo `prime`.
    pub fn lagrange_at_zero(points: &[(u32, BigUint)], prime: &BigUint) -> Option<BigUint> {
        let modular = BigInt::from_biguint(Sign::Plus, prime.clone());
        let values: Vec<u32> = points.iter().map(|(x, _)| *x).collect();

        let mut distinct = values.clone();
        distinct.sort_unstable();
        distinct.dedup();

        if distinct.len() != values.len() {
            return None;
        }

        let mut result = BigInt::zero();

        for (x, y) in points {
            let (numerator, denominator) = Util::lagrange_coefficient(*x, &values);
            let inverse = Util::mod_inverse(&denominator, &modular)?;
            let y = y.to_bigint()?;

            result = (result + y * numerator.mod_floor(&modular) * inverse).mod_floor(&modular);
        }

        result.to_biguint()
    }
}
