use num_bigint::{BigUint, RandBigInt};
use num_traits::Zero;
use rand::{CryptoRng, Rng};

// Based on Shamir's Secret Sharing (SSS) scheme.
// p(X) = s + p1X + ... + pkX^k over Z_prime

#[derive(Debug, Clone, Default)]
pub struct Polynomial {
    pub coefficients: Vec<BigUint>,
}

impl Polynomial {
    pub fn new() -> Self {
        Polynomial {
            coefficients: Vec::new(),
        }
    }

    pub fn init_coefficients(&mut self, coefficients: &[BigUint]) {
        self.coefficients = coefficients.to_vec();
    }

    /// Sets `intercept` as the constant term and draws `degree` further
    /// coefficients uniformly from `[0, prime)`.
    pub fn init<R>(&mut self, rng: &mut R, intercept: &BigUint, degree: u32, prime: &BigUint)
    where
        R: Rng + CryptoRng + ?Sized,
    {
        let mut coefficients = vec![intercept.clone()];

        for _ in 0..degree {
            coefficients.push(rng.gen_biguint_below(prime));
        }

        self.init_coefficients(&coefficients);
    }

    // get p(X) mod prime, Horner's rule
    pub fn get_value(&self, x: &BigUint, prime: &BigUint) -> BigUint {
        self.coefficients
            .iter()
            .rev()
            .fold(BigUint::zero(), |acc, coefficient| {
                (acc * x + coefficient) % prime
            })
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use rand::{rngs::StdRng, SeedableRng};

    use super::Polynomial;

    #[test]
    fn test_init_polynomial() {
        let mut rng = StdRng::from_seed([7; 32]);
        let mut polynomial = Polynomial::new();
        let prime = BigUint::from(8191_u32);
        let degree = 3;

        polynomial.init(&mut rng, &BigUint::from(42_u32), degree, &prime);

        assert_eq!(polynomial.coefficients.len(), (degree + 1) as usize);
        assert_eq!(polynomial.coefficients[0], BigUint::from(42_u32));
        assert!(polynomial.coefficients.iter().all(|c| c < &prime));
    }

    #[test]
    fn test_get_value() {
        let mut polynomial = Polynomial::new();
        let prime = BigUint::from(1_000_003_u32);

        polynomial.init_coefficients(&[
            BigUint::from(3_u32),
            BigUint::from(2_u32),
            BigUint::from(2_u32),
            BigUint::from(4_u32),
        ]);

        // p(0) = a_0 = 3
        assert_eq!(
            polynomial.get_value(&BigUint::from(0_u32), &prime),
            BigUint::from(3_u32)
        );

        // p(1) = 11
        assert_eq!(
            polynomial.get_value(&BigUint::from(1_u32), &prime),
            BigUint::from(11_u32)
        );

        // p(2) = 47
        assert_eq!(
            polynomial.get_value(&BigUint::from(2_u32), &prime),
            BigUint::from(47_u32)
        );

        // p(3) = 135
        assert_eq!(
            polynomial.get_value(&BigUint::from(3_u32), &prime),
            BigUint::from(135_u32)
        );
    }

    #[test]
    fn test_get_value2() {
        let q = BigUint::from(15486967_u32);
        let coefficients = vec![
            BigUint::from(105211_u32),
            BigUint::from(1548877_u32),
            BigUint::from(892134_u32),
            BigUint::from(3490857_u32),
            BigUint::from(324_u32),
            BigUint::from(14234735_u32),
        ];
        let x = BigUint::from(278_u32);
        let mut polynomial = Polynomial::new();

        polynomial.init_coefficients(&coefficients);

        assert_eq!(polynomial.get_value(&x, &q), BigUint::from(4115179_u32));
    }
}
