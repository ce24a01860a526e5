#[cfg(not(any(target_pointer_width = "64")))]
compile_error!("this crate requires 64-bit limbs");

use crate::curve::CurveParam;
use crate::fp::Fp;
use crate::traits::{FieldOps, One, SquareRoot};
use crypto_bigint::{Random, Word, Zero};
use crypto_bigint::rand_core::{RngCore, TryRngCore};
use crypto_bigint::subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use std::fmt::{Debug, Display, Formatter};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// The <b>F</b><sub><i>p&sup2;</i></sub> &simeq; <b>F</b><sub><i>p</i></sub>&lbrack;<i>i</i>&rbrack;/&lt;<i>i&sup2; - &beta;</i>&gt;
/// extension field.  NB: <i>i&sup2;</i> = <i>&beta;</i>, the curve's registered
/// quadratic non-residue (<i>-1</i> for every curve with
/// <i>p &equiv; 3 (mod 4)</i>; <i>x&sup2; + 1</i> splits over the other primes,
/// so those register a different small non-residue).
pub struct Fp2<C: CurveParam, const LIMBS: usize> {
    pub(crate) re: Fp<C, LIMBS>,
    pub(crate) im: Fp<C, LIMBS>,
}

impl<C: CurveParam, const LIMBS: usize> Fp2<C, LIMBS> {
    /// Convert an <b>F</b><sub><i>p</i></sub> element to its <b>F</b><sub><i>p&sup2;</i></sub> counterpart.
    #[inline]
    pub fn from_base(re: Fp<C, LIMBS>) -> Self {
        Self {
            re,
            im: Fp::zero(),
        }
    }

    /// Convert a word-sized integer <i>w</i> to its <b>F</b><sub><i>p&sup2;</i></sub> counterpart.
    #[inline]
    pub fn from_word(w: Word) -> Self {
        Self {
            re: Fp::from_word(w),
            im: Fp::zero(),
        }
    }

    /// Assemble an <b>F</b><sub><i>p&sup2;</i></sub> element
    /// from its <b>F</b><sub><i>p</i></sub> components.
    #[inline]
    pub fn from(re: Fp<C, LIMBS>, im: Fp<C, LIMBS>) -> Self {
        Self {
            re,
            im,
        }
    }

    /// The imaginary unit <i>i</i>.
    #[inline]
    pub fn i() -> Self {
        Self {
            re: Fp::zero(),
            im: Fp::one(),
        }
    }

    #[inline]
    pub fn is_odd(&self) -> Choice {
        self.re.is_odd()
    }

    /// Multiply a base field element by the non-residue <i>&beta;</i> = <i>i&sup2;</i>.
    ///
    /// |<i>&beta;</i>| is a tiny public constant, so a short addition chain
    /// beats a full field multiplication; the chain length depends only on the
    /// curve parameters.
    #[inline]
    fn beta_mul(x: Fp<C, LIMBS>) -> Fp<C, LIMBS> {
        let mut acc = Fp::zero();
        let mut add = x;
        let mut k = C::FIELD_I2.unsigned_abs();
        while k != 0 {
            if k & 1 == 1 {
                acc += add;
            }
            add = add.double();
            k >>= 1;
        }
        Fp::conditional_select(&acc, &(-acc), Choice::from((C::FIELD_I2 < 0) as u8))
    }

    /// Complex conjugate of this <b>F</b><sub><i>p&sup2;</i></sub> element,
    /// namely, if this element is <i>u + vi</i>, return <i>u - vi</i>.
    #[inline]
    pub fn conj(&self) -> Self {
        Self { re: self.re, im: -self.im, }
    }

    /// <b>F</b><sub><i>p</i></sub>-norm of this <b>F</b><sub><i>p&sup2;</i></sub> element,
    /// namely, if this element is <i>u + vi</i>, return <i>u&sup2; - &beta;v&sup2;</i>.
    #[inline]
    pub fn norm(&self) -> Fp<C, LIMBS> {
        self.re.sq() - Self::beta_mul(self.im.sq())
    }

    /// Compute the product of a field element <i>x + yi</i> by <i>i</i>.
    #[inline]
    pub fn mul_i(&self) -> Self {
        // (x + yi)i = βy + xi
        Self {
            re: Self::beta_mul(self.im),
            im: self.re,
        }
    }

    /// Compute the product of a field element <i>x + yi</i> by the tower
    /// non-residue <i>&xi;</i> &#x2254; <i>1 + i</i>.
    #[inline]
    pub fn mul_xi(&self) -> Self {
        // (x + yi)*(1 + i) = (x + βy) + (x + y)i
        Self {
            re: self.re + Self::beta_mul(self.im),
            im: self.re + self.im,
        }
    }

    /// Compute the quotient of a field element <i>x + yi</i> by <i>&xi;</i> &#x2254; <i>1 + i</i>.
    #[inline]
    pub fn div_xi(&self) -> Self {
        // (x + yi)/(1 + i) = (x + yi)(1 - i)/((1 + i)(1 - i)) = ((x - βy) + (y - x)i)/(1 - β)
        if C::FIELD_I2 == -1 {
            // 1 - β = 2, so two halvings suffice
            Self {
                re: (self.re + self.im).half(),
                im: (self.im - self.re).half(),
            }
        } else {
            let d = Fp::from_word((1 - C::FIELD_I2) as Word).inv();
            Self {
                re: (self.re - Self::beta_mul(self.im))*d,
                im: (self.im - self.re)*d,
            }
        }
    }
}

impl<C: CurveParam, const LIMBS: usize> Add for Fp2<C, LIMBS> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl<C: CurveParam, const LIMBS: usize> AddAssign for Fp2<C, LIMBS> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.re += rhs.re;
        self.im += rhs.im;
    }
}

impl<C: CurveParam, const LIMBS: usize> Clone for Fp2<C, LIMBS> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: CurveParam, const LIMBS: usize> ConditionallySelectable for Fp2<C, LIMBS> {
    #[inline]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            re: Fp::conditional_select(&a.re, &b.re, choice),
            im: Fp::conditional_select(&a.im, &b.im, choice),
        }
    }
}

impl<C: CurveParam, const LIMBS: usize> ConstantTimeEq for Fp2<C, LIMBS> {
    #[inline]
    fn ct_eq(&self, other: &Self) -> Choice {
        self.re.ct_eq(&other.re) & self.im.ct_eq(&other.im)
    }

    #[inline]
    fn ct_ne(&self, other: &Self) -> Choice {
        self.re.ct_ne(&other.re) | self.im.ct_ne(&other.im)
    }
}

impl<C: CurveParam, const LIMBS: usize> Copy for Fp2<C, LIMBS> {}

impl<C: CurveParam, const LIMBS: usize> Debug for Fp2<C, LIMBS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self, f)
    }
}

impl<C: CurveParam, const LIMBS: usize> Display for Fp2<C, LIMBS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if bool::from(self.im.is_zero()) {
            write!(f, "{}", self.re)
        } else if bool::from(self.re.is_zero()) {
            if bool::from(self.im.is_one()) {
                write!(f, "i")
            } else if bool::from((-self.im).is_one()) {
                write!(f, "-i")
            } else {
                write!(f, "{}*i", self.im)
            }
        } else if bool::from(self.im.is_one()) {
            write!(f, "{} + i", self.re)
        } else if bool::from((-self.im).is_one()) {
            write!(f, "{} - i", self.re)
        } else {
            let strim = self.im.to_string();
            if strim.chars().next() != Some('-') {
                write!(f, "{} + {}*i", self.re, strim)
            } else {
                write!(f, "{} - {}*i", self.re, &strim[1..])
            }
        }
    }
}

impl<C: CurveParam, const LIMBS: usize> FieldOps for Fp2<C, LIMBS> {
    /// Compute the value of twice this element.
    #[inline]
    fn double(&self) -> Self {
        Self {
            re: self.re.double(),
            im: self.im.double(),
        }
    }

    /// Compute the value of half this element.
    #[inline]
    fn half(&self) -> Self {
        Self {
            re: self.re.half(),
            im: self.im.half(),
        }
    }

    /// Compute the square of this <b>F</b><sub><i>p&sup2;</i></sub> element.
    #[inline]
    fn sq(&self) -> Self {
        if C::FIELD_I2 == -1 {
            // (u + vi)^2 = u^2 - v^2 + 2uvi = (u + v)*(u - v) + 2uvi
            let repim = self.re + self.im;
            let remim = self.re - self.im;
            let retim = self.re*self.im;
            Self {
                re: repim*remim,
                im: retim + retim,
            }
        } else {
            // (u + vi)^2 = u^2 + βv^2 + 2uvi
            let retim = self.re*self.im;
            Self {
                re: self.re.sq() + Self::beta_mul(self.im.sq()),
                im: retim + retim,
            }
        }
    }

    /// Compute the cube of this <b>F</b><sub><i>p&sup2;</i></sub> element.
    #[inline]
    fn cb(&self) -> Self {
        // (u + vi)^3 = u*(u^2 + 3βv^2) + v*(3*u^2 + βv^2) i
        let re2 = self.re.sq();
        let bim2 = Self::beta_mul(self.im.sq());
        Self {
            re: self.re*(re2 + bim2.double() + bim2),
            im: self.im*(re2.double() + re2 + bim2),
        }
    }

    /// Compute the inverse of `self` in <b>F</b><sub><i>p&sup2;</i></sub>
    /// (or 0, if `self` is itself 0).
    #[inline]
    fn inv(&self) -> Self {
        // (u + vi)^-1 = (u^2 - βv^2)^-1*(u - vi) = norm^-1*conj.
        let ninv = self.norm().inv();
        Self {
            re: ninv*self.re,
            im: -(ninv*self.im),
        }
    }
}

impl<C: CurveParam, const LIMBS: usize> Mul for Fp2<C, LIMBS> {
    type Output = Self;

    /// Compute a product in <b>F</b><sub><i>p&sup2;</i></sub>.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        let mut val = self;
        val *= rhs;
        val
    }
}

impl<C: CurveParam, const LIMBS: usize> Mul<Fp2<C, LIMBS>> for Fp<C, LIMBS> {
    type Output = Fp2<C, LIMBS>;

    /// Compute the product of a left factor from <b>F</b><sub><i>p</i></sub>
    /// by a right factor from <b>F</b><sub><i>p&sup2;</i></sub>.
    #[inline]
    fn mul(self, rhs: Fp2<C, LIMBS>) -> Self::Output {
        Self::Output {
            re: self*rhs.re,
            im: self*rhs.im,
        }
    }
}

impl<C: CurveParam, const LIMBS: usize> MulAssign for Fp2<C, LIMBS> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        // (a + bi)*(u + vi) = au + βbv + (av + bu)i
        // (a + b)*(u + v) - au - bv = av + bu
        let re2 = self.re*rhs.re;
        let im2 = self.im*rhs.im;
        let mix = (self.re + self.im)*(rhs.re + rhs.im);
        self.re = re2 + Self::beta_mul(im2);
        self.im = mix - re2 - im2;
    }
}

impl<C: CurveParam, const LIMBS: usize> Neg for Fp2<C, LIMBS> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self::Output {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl<C: CurveParam, const LIMBS: usize> One for Fp2<C, LIMBS> {
    #[inline]
    fn one() -> Self {
        Self {
            re: Fp::one(),
            im: Fp::zero(),
        }
    }

    #[inline]
    fn is_one(&self) -> Choice {
        self.re.is_one() & self.im.is_zero()
    }
}

impl<C: CurveParam, const LIMBS: usize> PartialEq for Fp2<C, LIMBS> {
    #[inline]
    fn eq(&self, other: &Self) -> bool { self.ct_eq(other).into() }

    #[inline]
    fn ne(&self, other: &Self) -> bool { self.ct_ne(other).into() }
}

impl<C: CurveParam, const LIMBS: usize> Random for Fp2<C, LIMBS> {
    /// Pick a uniform element from <b>F</b><sub><i>p&sup2;</i></sub> by rejection sampling.
    #[inline]
    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self {
            re: Fp::random(rng),
            im: Fp::random(rng),
        }
    }

    /// Try to pick a uniform element from <b>F</b><sub><i>p&sup2;</i></sub> by rejection sampling.
    fn try_random<R: TryRngCore + ?Sized>(rng: &mut R) -> Result<Self, <R as TryRngCore>::Error> where R: TryRngCore {
        let try_re = Fp::try_random(rng)?;
        let try_im = Fp::try_random(rng)?;
        Ok(Self { re: try_re, im: try_im })
    }
}

impl<C: CurveParam, const LIMBS: usize> SquareRoot for Fp2<C, LIMBS> {
    /// Try to compute a square root of <i>u + vi</i>.
    ///
    /// Writing a root as <i>x + yi</i>, the identities <i>x&sup2; + &beta;y&sup2;</i> = <i>u</i> and
    /// <i>x&sup2; - &beta;y&sup2;</i> = <i>&radic;(u&sup2; - &beta;v&sup2;)</i> &#x2254; <i>m</i> pin
    /// <i>x&sup2;</i> = (<i>u &pm; m</i>)/<i>2</i> (exactly one sign yields a residue when
    /// <i>v &ne; 0</i>) and then <i>y</i> = <i>v</i>/<i>2x</i>. The <i>v</i> = <i>0</i> case
    /// roots either <i>u</i> or <i>u/&beta;</i>, landing on the real or imaginary axis.
    /// All candidate computations run unconditionally; a final confirming
    /// squaring selects the verdict.
    #[inline]
    fn sqrt_if_square(&self) -> (Self, Choice) {
        let (m, _) = self.norm().sqrt_if_square();
        let (x1, x1_ok) = (self.re + m).half().sqrt_if_square();
        let (x2, _) = (self.re - m).half().sqrt_if_square();
        let x = Fp::conditional_select(&x2, &x1, x1_ok);
        let general = Self {
            re: x,
            im: self.im*x.double().inv(),
        };
        let (ru, u_ok) = self.re.sqrt_if_square();
        let (rnu, _) = (self.re*Fp::from_i64(C::FIELD_I2).inv()).sqrt_if_square();
        let axis = Self {
            re: Fp::conditional_select(&Fp::zero(), &ru, u_ok),
            im: Fp::conditional_select(&rnu, &Fp::zero(), u_ok),
        };
        let cand = Self::conditional_select(&general, &axis, self.im.is_zero());
        let ex = cand.sq().ct_eq(self);
        (Self::conditional_select(&Self::zero(), &cand, ex), ex)
    }
}

impl<C: CurveParam, const LIMBS: usize> Sub for Fp2<C, LIMBS> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl<C: CurveParam, const LIMBS: usize> SubAssign for Fp2<C, LIMBS> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.re -= rhs.re;
        self.im -= rhs.im;
    }
}

impl<C: CurveParam, const LIMBS: usize> Zero for Fp2<C, LIMBS> {
    fn zero() -> Self {
        Self {
            re: Fp::zero(),
            im: Fp::zero(),
        }
    }

    fn is_zero(&self) -> Choice {
        self.re.is_zero() & self.im.is_zero()
    }

    fn set_zero(&mut self) {
        self.re.set_zero();
        self.im.set_zero();
    }
}


#[cfg(test)]
mod tests {
    use crate::curve::{Bls12_377Param, Bls12_381Param, Bls12_461Param, Bn254Param, Bn446Param, Bn462Param, Fkm12_447Param};
    use std::time::SystemTime;
    use super::*;

    const TESTS: usize = 100;

    /// General quadratic extension test template.
    fn fp2_test<C: CurveParam, const LIMBS: usize>(curve: &str) {
        let mut rng = rand::rng();

        println!();
        println!("Performing {} {} Fp2 test(s)...", TESTS, curve);
        let now = SystemTime::now();

        // neutral elements:
        assert!(bool::from(Fp2::<C, LIMBS>::zero().is_zero()));
        assert!(bool::from(Fp2::<C, LIMBS>::one().is_one()));

        // fixed-value smoke tests:
        let one = Fp2::<C, LIMBS>::one();
        let two = Fp2::<C, LIMBS>::from_word(2);
        let three = Fp2::<C, LIMBS>::from_word(3);
        assert_eq!(one.sq(), one);
        assert_eq!(two.sq(), Fp2::from_word(4));
        assert_eq!(three.sq(), Fp2::from_word(9));
        assert_eq!((-three).sq(), Fp2::from_word(9));
        assert!(bool::from(one.inv().is_one()));

        // i^2 = β and the non-residue maps:
        let i = Fp2::<C, LIMBS>::i();
        let beta = Fp2::<C, LIMBS>::from_base(Fp::from_i64(C::FIELD_I2));
        assert_eq!(i.sq(), beta);
        assert!(!bool::from(Fp::<C, LIMBS>::from_i64(C::FIELD_I2).sqrt_if_square().1));
        let xi = one + i;  // ξ = 1 + i

        for _t in 0..TESTS {
            let e2: Fp2<C, LIMBS> = Fp2::random(&mut rng);
            assert_eq!(e2 + Fp2::zero(), e2);
            assert_eq!(e2*Fp2::one(), e2);
            assert!(bool::from((e2*Fp2::zero()).is_zero()));
            let e1 = Fp::random(&mut rng);
            assert_eq!(Fp2::from_base(e1), Fp2::from(e1, Fp::zero()));

            // addition vs subtraction:
            assert!(bool::from((e2 - e2).is_zero()));
            assert!(bool::from((e2 + (-e2)).is_zero()));

            // double and half:
            assert_eq!(e2.double().half(), e2);
            assert_eq!(e2.half().double(), e2);

            // square and cube:
            assert_eq!(e2.sq(), e2*e2);
            assert_eq!(e2.cb(), e2*e2*e2);

            // conjugation:
            assert_eq!(e2.conj().conj(), e2);
            assert_eq!(Fp2::from_base(e2.norm()), e2*e2.conj());

            // multiplication by i and by the sextic non-residue:
            assert_eq!(e2.mul_i(), e2*i);
            assert_eq!(e2.mul_xi(), e2*xi);
            assert_eq!(e2.mul_xi().div_xi(), e2);

            // field inversion:
            assert!(bool::from((e2*e2.inv()).is_one() | e2.is_zero()));

            // square roots:
            let (sr, ok) = e2.sq().sqrt_if_square();
            assert!(bool::from(ok));
            assert_eq!(sr.sq(), e2.sq());
            let (cand, ok) = e2.sqrt_if_square();
            if bool::from(ok) {
                assert_eq!(cand.sq(), e2);
            }
            // roots on the axes:
            let (sr, ok) = Fp2::from_base(e1.sq()).sqrt_if_square();
            assert!(bool::from(ok));
            assert_eq!(sr.sq(), Fp2::from_base(e1.sq()));

            let f2 = Fp2::random(&mut rng);
            let g2 = Fp2::random(&mut rng);

            // commutativity of addition and multiplication:
            assert_eq!(e2 + f2, f2 + e2);
            assert_eq!(e2*f2, f2*e2);

            // associativity and distributivity:
            assert_eq!((e2 + f2) + g2, e2 + (f2 + g2));
            assert_eq!((e2*f2)*g2, e2*(f2*g2));
            assert_eq!(e2*(f2 + g2), e2*f2 + e2*g2);

            // subring multiplication:
            assert_eq!(e1*e2, Fp2::from_base(e1)*e2);
        }
        match now.elapsed() {
            Ok(elapsed) => {
                println!("Elapsed time: {} ms.", (elapsed.as_micros() as f64)/1000.0);
            }
            Err(e) => {
                println!("Error: {e:?}");
            }
        }
    }

    #[test]
    fn bn254_fp2_test() {
        const LIMBS: usize = Bn254Param::LIMBS;
        fp2_test::<Bn254Param, LIMBS>("BN254");
    }

    #[test]
    fn bls12_377_fp2_test() {
        const LIMBS: usize = Bls12_377Param::LIMBS;
        fp2_test::<Bls12_377Param, LIMBS>("BLS12-377");
    }

    #[test]
    fn bls12_381_fp2_test() {
        const LIMBS: usize = Bls12_381Param::LIMBS;
        fp2_test::<Bls12_381Param, LIMBS>("BLS12-381");
    }

    #[test]
    fn bn446_fp2_test() {
        const LIMBS: usize = Bn446Param::LIMBS;
        fp2_test::<Bn446Param, LIMBS>("BN446");
    }

    #[test]
    fn fkm12_447_fp2_test() {
        const LIMBS: usize = Fkm12_447Param::LIMBS;
        fp2_test::<Fkm12_447Param, LIMBS>("FKM12-447");
    }

    #[test]
    fn bls12_461_fp2_test() {
        const LIMBS: usize = Bls12_461Param::LIMBS;
        fp2_test::<Bls12_461Param, LIMBS>("BLS12-461");
    }

    #[test]
    fn bn462_fp2_test() {
        const LIMBS: usize = Bn462Param::LIMBS;
        fp2_test::<Bn462Param, LIMBS>("BN462");
    }
}
