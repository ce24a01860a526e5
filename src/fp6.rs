#[cfg(not(any(target_pointer_width = "64")))]
compile_error!("this crate requires 64-bit limbs");

use crate::curve::CurveParam;
use crate::fp::Fp;
use crate::fp2::Fp2;
use crate::traits::{FieldOps, One};
use crypto_bigint::{Random, Word, Zero};
use crypto_bigint::rand_core::{RngCore, TryRngCore};
use crypto_bigint::subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use std::fmt::{Debug, Display, Formatter};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// The <b>F</b><sub><i>p&#x2076;</i></sub> = <b>F</b><sub><i>p&sup2;</i></sub>&lbrack;<i>v</i>&rbrack;/&lt;<i>v&sup3; - &xi;</i>&gt;
/// extension field, with <i>&xi;</i> = <i>1 + i</i>.
/// NB: <i>v&sup3;</i> = <i>&xi;</i>.
pub struct Fp6<C: CurveParam, const LIMBS: usize> {
    pub(crate) c0: Fp2<C, LIMBS>,
    pub(crate) c1: Fp2<C, LIMBS>,
    pub(crate) c2: Fp2<C, LIMBS>,
}

impl<C: CurveParam, const LIMBS: usize> Fp6<C, LIMBS> {
    /// Map an <b>F</b><sub><i>p&sup2;</i></sub> element to its <b>F</b><sub><i>p&#x2076;</i></sub> counterpart.
    #[inline]
    pub fn from_base(c0: Fp2<C, LIMBS>) -> Self {
        Self {
            c0, c1: Fp2::zero(), c2: Fp2::zero(),
        }
    }

    /// Convert a word-sized integer <i>w</i> to its <b>F</b><sub><i>p&#x2076;</i></sub> counterpart.
    #[inline]
    pub fn from_word(w: Word) -> Self {
        Self::from_base(Fp2::from_word(w))
    }

    /// Assemble an <b>F</b><sub><i>p&#x2076;</i></sub> element from its components.
    #[inline]
    pub fn from(c0: Fp2<C, LIMBS>, c1: Fp2<C, LIMBS>, c2: Fp2<C, LIMBS>) -> Self {
        Self {
            c0, c1, c2,
        }
    }

    /// Compute the product of this element by the cubing variable <i>v</i>:
    /// the coordinates shift up and the top one wraps around as
    /// <i>v&sup3;</i> = <i>&xi;</i>, i.e.
    /// (<i>c&#x2080;</i>, <i>c&#x2081;</i>, <i>c&#x2082;</i>) &#8614;
    /// (<i>&xi;c&#x2082;</i>, <i>c&#x2080;</i>, <i>c&#x2081;</i>).
    #[inline]
    pub fn mul_v(&self) -> Self {
        Self {
            c0: self.c2.mul_xi(),
            c1: self.c0,
            c2: self.c1,
        }
    }

    /// Compute the product of this element and `rhs` using 3-way Karatsuba over <b>F</b><sub><i>p&sup2;</i></sub>.
    #[inline]
    fn kara3mul(&mut self, rhs: Self) {
        let t0 = self.c0*rhs.c0;
        let t1 = self.c1*rhs.c1;
        let t2 = self.c2*rhs.c2;
        let t3 = (self.c0 + self.c1)*(rhs.c0 + rhs.c1) - t0 - t1;
        let t4 = (self.c0 + self.c2)*(rhs.c0 + rhs.c2) - t0 - t2;
        let t5 = (self.c1 + self.c2)*(rhs.c1 + rhs.c2) - t1 - t2;
        self.c0 = t0 + t5.mul_xi();
        self.c1 = t3 + t2.mul_xi();
        self.c2 = t4 + t1;
    }

    /// Compute the square of this element using 3-way Karatsuba over <b>F</b><sub><i>p&sup2;</i></sub>.
    #[inline]
    fn kara3sqr(&self) -> Self {
        let t0 = self.c0.sq();
        let t1 = self.c1.sq();
        let t2 = self.c2.sq();
        let t3 = (self.c0 + self.c1).sq() - t0 - t1;
        let t4 = (self.c0 + self.c2).sq() - t0 - t2;
        let t5 = (self.c1 + self.c2).sq() - t1 - t2;
        Self {
            c0: t0 + t5.mul_xi(), c1: t3 + t2.mul_xi(), c2: t4 + t1,
        }
    }
}

impl<C: CurveParam, const LIMBS: usize> Add for Fp6<C, LIMBS> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let mut val = self;
        val += rhs;
        val
    }
}

impl<C: CurveParam, const LIMBS: usize> AddAssign for Fp6<C, LIMBS> {
    fn add_assign(&mut self, rhs: Self) {
        self.c0 += rhs.c0;
        self.c1 += rhs.c1;
        self.c2 += rhs.c2;
    }
}

impl<C: CurveParam, const LIMBS: usize> Clone for Fp6<C, LIMBS> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: CurveParam, const LIMBS: usize> ConditionallySelectable for Fp6<C, LIMBS> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let c0 = Fp2::conditional_select(&a.c0, &b.c0, choice);
        let c1 = Fp2::conditional_select(&a.c1, &b.c1, choice);
        let c2 = Fp2::conditional_select(&a.c2, &b.c2, choice);
        Self { c0, c1, c2 }
    }
}

impl<C: CurveParam, const LIMBS: usize> ConstantTimeEq for Fp6<C, LIMBS> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1) & self.c2.ct_eq(&other.c2)
    }

    fn ct_ne(&self, other: &Self) -> Choice {
        self.c0.ct_ne(&other.c0) | self.c1.ct_ne(&other.c1) | self.c2.ct_ne(&other.c2)
    }
}

impl<C: CurveParam, const LIMBS: usize> Copy for Fp6<C, LIMBS> {}

impl<C: CurveParam, const LIMBS: usize> Debug for Fp6<C, LIMBS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self, f)
    }
}

impl<C: CurveParam, const LIMBS: usize> Display for Fp6<C, LIMBS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if bool::from(self.c1.is_zero() & self.c2.is_zero()) {
            // element in F_{p^2}:
            write!(f, "{}", self.c0)
        } else {
            write!(f, "({}) + ({})*v + ({})*v^2", self.c0, self.c1, self.c2)
        }
    }
}

impl<C: CurveParam, const LIMBS: usize> FieldOps for Fp6<C, LIMBS> {
    /// Compute the value of twice this element.
    #[inline]
    fn double(&self) -> Self {
        Self {
            c0: self.c0.double(), c1: self.c1.double(), c2: self.c2.double(),
        }
    }

    /// Compute the value of half this element.
    #[inline]
    fn half(&self) -> Self {
        Self {
            c0: self.c0.half(), c1: self.c1.half(), c2: self.c2.half(),
        }
    }

    /// Compute the square of this <b>F</b><sub><i>p&#x2076;</i></sub> element.
    #[inline]
    fn sq(&self) -> Self {
        self.kara3sqr()
    }

    /// Compute the inverse of this <b>F</b><sub><i>p&#x2076;</i></sub> element
    /// (or 0, if this element is itself 0).
    #[inline]
    fn inv(&self) -> Self {
        // for c = c_0 + c_1 v + c_2 v^2, the product of the two nontrivial
        // Fp2-conjugates of c is
        //   (c_0^2 - c_1*c_2*xi) + (c_2^2*xi - c_0*c_1) v + (c_1^2 - c_0*c_2) v^2,
        // and multiplying c by it collapses to the Fp2 element
        //   f = c_0*(c_0^2 - c_1*c_2*xi) + (c_1*(c_1^2 - c_0*c_2) + c_2*(c_2^2*xi - c_0*c_1))*xi,
        // whence c^-1 = f^-1*(t_0 + t_1 v + t_2 v^2):
        let t0 = self.c0.sq() - self.c1*self.c2.mul_xi();
        let t1 = self.c2.sq().mul_xi() - self.c0*self.c1;
        let t2 = self.c1.sq() - self.c0*self.c2;

        let f_inv = (self.c0*t0 + (self.c1*t2 + self.c2*t1).mul_xi()).inv();

        Self {
            c0: f_inv*t0,
            c1: f_inv*t1,
            c2: f_inv*t2,
        }
    }
}

impl<C: CurveParam, const LIMBS: usize> Mul for Fp6<C, LIMBS> {
    type Output = Self;

    /// Compute a product in <b>F</b><sub><i>p&#x2076;</i></sub>.
    fn mul(self, rhs: Self) -> Self::Output {
        let mut val = self;
        val *= rhs;
        val
    }
}

impl<C: CurveParam, const LIMBS: usize> Mul<Fp6<C, LIMBS>> for Fp<C, LIMBS> {
    type Output = Fp6<C, LIMBS>;

    /// Compute the product of a left factor from <b>F</b><sub><i>p</i></sub>
    /// by a right factor from <b>F</b><sub><i>p&#x2076;</i></sub>.
    fn mul(self, rhs: Fp6<C, LIMBS>) -> Self::Output {
        Self::Output {
            c0: self*rhs.c0, c1: self*rhs.c1, c2: self*rhs.c2,
        }
    }
}

impl<C: CurveParam, const LIMBS: usize> Mul<Fp6<C, LIMBS>> for Fp2<C, LIMBS> {
    type Output = Fp6<C, LIMBS>;

    /// Compute the product of a left factor from <i><b>F</b><sub>p&sup2;</sub></i>
    /// by a right factor from <b>F</b><sub><i>p&#x2076;</i></sub>.
    fn mul(self, rhs: Fp6<C, LIMBS>) -> Self::Output {
        Self::Output {
            c0: self*rhs.c0, c1: self*rhs.c1, c2: self*rhs.c2,
        }
    }
}

impl<C: CurveParam, const LIMBS: usize> MulAssign for Fp6<C, LIMBS> {
    fn mul_assign(&mut self, rhs: Self) {
        self.kara3mul(rhs);
    }
}

impl<C: CurveParam, const LIMBS: usize> Neg for Fp6<C, LIMBS> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::Output {
            c0: -self.c0, c1: -self.c1, c2: -self.c2,
        }
    }
}

impl<C: CurveParam, const LIMBS: usize> One for Fp6<C, LIMBS> {
    #[inline]
    fn one() -> Self {
        Self {
            c0: Fp2::one(), c1: Fp2::zero(), c2: Fp2::zero(),
        }
    }

    fn is_one(&self) -> Choice {
        self.c0.is_one() & self.c1.is_zero() & self.c2.is_zero()
    }
}

impl<C: CurveParam, const LIMBS: usize> PartialEq for Fp6<C, LIMBS> {
    fn eq(&self, other: &Self) -> bool { self.ct_eq(other).into() }

    fn ne(&self, other: &Self) -> bool { self.ct_ne(other).into() }
}

impl<C: CurveParam, const LIMBS: usize> Random for Fp6<C, LIMBS> {
    /// Pick a uniform element from <b>F</b><sub><i>p&#x2076;</i></sub> by rejection sampling.
    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self {
            c0: Fp2::random(rng), c1: Fp2::random(rng), c2: Fp2::random(rng),
        }
    }

    /// Try to pick a uniform element from <b>F</b><sub><i>p&#x2076;</i></sub> by rejection sampling.
    fn try_random<R: TryRngCore + ?Sized>(rng: &mut R) -> Result<Self, <R as TryRngCore>::Error> where R: TryRngCore {
        let try_c0 = Fp2::try_random(rng)?;
        let try_c1 = Fp2::try_random(rng)?;
        let try_c2 = Fp2::try_random(rng)?;
        Ok(Self { c0: try_c0, c1: try_c1, c2: try_c2 })
    }
}

impl<C: CurveParam, const LIMBS: usize> Sub for Fp6<C, LIMBS> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        let mut val = self;
        val -= rhs;
        val
    }
}

impl<C: CurveParam, const LIMBS: usize> SubAssign for Fp6<C, LIMBS> {
    fn sub_assign(&mut self, rhs: Self) {
        self.c0 -= rhs.c0;
        self.c1 -= rhs.c1;
        self.c2 -= rhs.c2;
    }
}

impl<C: CurveParam, const LIMBS: usize> Zero for Fp6<C, LIMBS> {
    fn zero() -> Self {
        Self {
            c0: Fp2::zero(), c1: Fp2::zero(), c2: Fp2::zero(),
        }
    }

    fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero() & self.c2.is_zero()
    }

    fn set_zero(&mut self) {
        self.c0.set_zero();
        self.c1.set_zero();
        self.c2.set_zero();
    }
}
