use num_bigint::BigInt;
use num_bigint::Sign;
use num_integer::Integer;
use num_traits::{One, Signed};

pub trait Div {
    /// Returns self / other rounded to the nearest integer, ties away from zero.
    fn div_round(&self, other: &Self) -> Self;
}

impl Div for BigInt {
    fn div_round(&self, other: &Self) -> Self {
        let (quo, rem) = self.div_rem(other);
        let rem_twice: BigInt = rem << 1;
        if rem_twice.abs() >= other.abs() {
            if self.sign() == other.sign() {
                return quo + BigInt::one();
            } else {
                return quo - BigInt::one();
            }
        }
        quo
    }
}

pub trait Reduce {
    /// Returns self mod q in [0, q).
    fn residue(&self, q: u64) -> u64;

    /// Returns self mod modulus in [-modulus/2, modulus/2).
    fn centered(&self, modulus: &Self) -> Self;
}

impl Reduce for BigInt {
    fn residue(&self, q: u64) -> u64 {
        let r: BigInt = self.mod_floor(&BigInt::from(q));
        debug_assert!(r.sign() != Sign::Minus);
        r.iter_u64_digits().next().unwrap_or(0)
    }

    fn centered(&self, modulus: &Self) -> Self {
        let mut r: BigInt = self.mod_floor(modulus);
        if (&r << 1) >= *modulus {
            r -= modulus;
        }
        r
    }
}
