#[cfg(not(any(target_pointer_width = "64")))]
compile_error!("this crate requires 64-bit limbs");

use crate::curve::CurveParam;
use crate::traits::{FieldOps, One, SquareRoot};
use crypto_bigint::{Integer, Limb, NonZero, Random, Uint, Word, Zero};
use crypto_bigint::rand_core::{RngCore, TryRngCore};
use crypto_bigint::subtle::{Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeLess};
use rand::Rng;
use std::fmt::{Debug, Display, Formatter};
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// An element of the base field <b>F</b><sub><i>p</i></sub> of curve `C`,
/// kept in Montgomery form.
pub struct Fp<C: CurveParam, const LIMBS: usize>(
    pub(crate) Uint<LIMBS>,
    PhantomData<C>,
);

impl<C: CurveParam, const LIMBS: usize> Fp<C, LIMBS> {
    /// The field modulus <i>p</i>.
    #[inline]
    pub(crate) fn modulus() -> Uint<LIMBS> {
        Uint::from_words(C::MODULUS.try_into().unwrap())
    }

    /// Montgomery reduction of <i>t</i> = (<i>t_lo</i>, <i>t_hi</i>) in range 0..&lt;<i>p&times;2&#x02B7;</i>,
    /// where <i>p &lt; 2&#x02B7;</i> is the field modulus and <i>w</i> &#x2254; <i>64&times;LIMBS</i>.
    ///
    /// Return <i>t&times;2&#8315;&#x02B7;</i> in range 0..&lt;<i>p</i>.
    #[inline]
    fn redc(t_lo: Uint<LIMBS>, t_hi: Uint<LIMBS>) -> Uint<LIMBS> {
        let p: Uint<LIMBS> = Self::modulus();  // p < 2^w
        let q: Uint<LIMBS> = Uint::from_words(C::NEG_INV_MOD.try_into().unwrap());  // q := -1/p mod 2^w
        // m ← ((t mod s)*q) mod s = (t_lo*q) mod s:
        let (m, _) = t_lo.widening_mul(&q);
        // t ← (t + m*p) / s:
        let (mp_lo, mp_hi) = m.widening_mul(&p);
        let (_, carry) = t_lo.carrying_add(&mp_lo, Limb::ZERO);
        let (t, _) = t_hi.carrying_add(&mp_hi, carry);
        // return if t < p { t } else { t - p }
        t - Uint::conditional_select(&p, &Uint::ZERO, t.ct_lt(&p))
    }

    /// Convert an unsigned integer (Uint) value <i>w</i> to Montgomery form,
    /// namely, the value <i>w&middot;s</i> mod <i>p</i> =
    /// redc((<i>w</i> mod <i>p</i>)&middot;(<i>s&sup2;</i> mod <i>p</i>)),
    /// where <i>s > p</i> is a power of 2.
    #[inline]
    pub fn from_uint(w: Uint<LIMBS>) -> Self {
        let s2: Uint<LIMBS> = Uint::from_words(C::MONTY_P.try_into().unwrap());
        let (lo, hi) = w.widening_mul(&s2);
        Self(Self::redc(lo, hi), PhantomData)
    }

    /// Convert a word-sized integer <i>w</i> to Montgomery form.
    #[inline]
    pub fn from_word(w: Word) -> Self {
        let s2: Uint<LIMBS> = Uint::from_words(C::MONTY_P.try_into().unwrap());
        let (lo, hi) = Uint::from_word(w).widening_mul(&s2);
        Self(Self::redc(lo, hi), PhantomData)
    }

    /// Convert a single-precision signed integer <i>v</i> to Montgomery form.
    #[inline]
    pub fn from_i64(v: i64) -> Self {
        let u = Self::from_word(v.unsigned_abs());
        Self::conditional_select(&u, &(-u), Choice::from((v < 0) as u8))
    }

    /// Convert an integer <i>w</i> represented by a sequence of words to Montgomery form.
    #[inline]
    pub(crate) fn from_words(v: [Word; LIMBS]) -> Self {
        let s2: Uint<LIMBS> = Uint::from_words(C::MONTY_P.try_into().unwrap());
        let (lo, hi) = Uint::from_words(v).widening_mul(&s2);
        Self(Self::redc(lo, hi), PhantomData)
    }

    /// Convert an integer in Montgomery form to plain representation.
    ///
    /// NB: the plain representation of <i>m</i> = <i>w&middot;r</i> mod <i>p</i> is
    /// <i>w</i> = redc(<i>m</i>), where <i>r > p</i> is a power of 2.
    #[inline]
    pub fn to_uint(&self) -> Uint<LIMBS> {
        Self::redc(self.0, Uint::ZERO)
    }

    /// Compute <i>v</i> = `self`<i>&#x02E3;</i> mod <i>p</i>.
    #[inline]
    fn pow(&self, x: Uint<LIMBS>) -> Self {
        // this method is private, and every exponent fed to it (inversion and
        // square-root exponents) is fixed and public, hence the plain
        // square-and-multiply method suffices (isochronous for any fixed
        // public exponent):
        let mut v = Self::one();
        let w = x.as_words();  // presumed NOT to be in Montgomery form
        for i in (0..LIMBS << 6).rev() {
            v = v.sq();
            if ((w[i >> 6] >> (i & 63)) & 1) == 1 {
                v *= *self;
            }
        }
        v
    }

    /// Determine if the plain representation of `self` is odd.
    #[inline]
    pub fn is_odd(&self) -> Choice {
        Self::redc(self.0, Uint::ZERO).is_odd()
    }

    /// Square-root candidate for a 2-adicity-1 modulus, namely
    /// <i>`self`<sup>(p+1)/4</sup></i> mod <i>p</i>, a valid root
    /// whenever `self` is a quadratic residue mod <i>p &equiv; 3 (mod 4)</i>.
    #[inline]
    fn sqrt_3mod4(&self) -> Self {
        self.pow(Uint::from_words(C::SQRT_EXP.try_into().unwrap()))
    }

    /// Square-root candidate via the Tonelli-Shanks ladder, for moduli with
    /// 2-adicity above 1. Iteration counts depend only on the public
    /// curve constants; every value-dependent decision is a conditional move.
    #[inline]
    fn sqrt_ladder(&self) -> Self {
        let one = Self::one();
        // w = self^((q - 1)/2) for the odd cofactor q of p - 1
        let w = self.pow(Uint::from_words(C::SQRT_EXP.try_into().unwrap()));
        let mut z = Self::from_words(C::SQRT_ROOT.try_into().unwrap());
        let mut x = *self * w;  // self^((q + 1)/2)
        let mut b = x * w;  // self^q
        let mut v = C::TWO_ADICITY;
        for max_v in (1..=C::TWO_ADICITY).rev() {
            let mut k = 1u32;
            let mut tmp = b.sq();
            let mut j_less_than_v = Choice::from(1);
            for j in 2..max_v {
                let tmp_is_one = tmp.ct_eq(&one);
                let squared = Self::conditional_select(&tmp, &z, tmp_is_one).sq();
                tmp = Self::conditional_select(&squared, &tmp, tmp_is_one);
                let new_z = Self::conditional_select(&z, &squared, tmp_is_one);
                j_less_than_v &= !j.ct_eq(&v);
                k = u32::conditional_select(&j, &k, tmp_is_one);
                z = Self::conditional_select(&z, &new_z, j_less_than_v);
            }
            let result = x * z;
            x = Self::conditional_select(&result, &x, b.ct_eq(&one));
            z = z.sq();
            b *= z;
            v = k;
        }
        x
    }
}

impl<C: CurveParam, const LIMBS: usize> Add for Fp<C, LIMBS> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        let nzp: NonZero<Uint<LIMBS>> = NonZero::new(Self::modulus()).unwrap();
        Self(self.0.add_mod(&rhs.0, &nzp), PhantomData)
    }
}

impl<C: CurveParam, const LIMBS: usize> AddAssign for Fp<C, LIMBS> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        let nzp: NonZero<Uint<LIMBS>> = NonZero::new(Self::modulus()).unwrap();
        self.0 = self.0.add_mod(&rhs.0, &nzp);
    }
}

impl<C: CurveParam, const LIMBS: usize> Clone for Fp<C, LIMBS> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: CurveParam, const LIMBS: usize> ConditionallySelectable for Fp<C, LIMBS> {
    #[inline]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(Uint::conditional_select(&a.0, &b.0, choice), PhantomData)
    }
}

impl<C: CurveParam, const LIMBS: usize> ConstantTimeEq for Fp<C, LIMBS> {
    #[inline]
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }

    #[inline]
    fn ct_ne(&self, other: &Self) -> Choice {
        self.0.ct_ne(&other.0)
    }
}

impl<C: CurveParam, const LIMBS: usize> Copy for Fp<C, LIMBS> {}

impl<C: CurveParam, const LIMBS: usize> Debug for Fp<C, LIMBS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self, f)
    }
}

impl<C: CurveParam, const LIMBS: usize> Display for Fp<C, LIMBS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Self::redc(self.0, Uint::ZERO).to_string_radix_vartime(10))
    }
}

impl<C: CurveParam, const LIMBS: usize> FieldOps for Fp<C, LIMBS> {
    /// Compute the value of twice this element.
    #[inline]
    fn double(&self) -> Self {
        let nzp: NonZero<Uint<LIMBS>> = NonZero::new(Self::modulus()).unwrap();
        Self(self.0.add_mod(&self.0, &nzp), PhantomData)
    }

    /// Compute <i>u/2 mod p</i>.
    ///
    /// Technique: if the lift of <i>u</i> (either in plain or in Montgomery form)
    /// to &Zopf; is even, a right-shift does the required division;
    /// if it is odd, then <i>u + p</i> is even, and <i>0 <= (u + p) >> 1 < p</i> is the desired value.
    #[inline]
    fn half(&self) -> Self {
        let p: Uint<LIMBS> = Self::modulus();
        Self(
            Uint::conditional_select(&self.0, &self.0.add(p), self.0.is_odd()) >> 1,
            PhantomData,
        )
    }

    /// Compute the square of a field element.
    #[inline]
    fn sq(&self) -> Self {
        let (lo, hi) = self.0.square_wide();
        Self(Self::redc(lo, hi), PhantomData)
    }

    /// Compute the cube of a field element.
    #[inline]
    fn cb(&self) -> Self {
        let (lo, hi) = self.0.square_wide();
        let (lo, hi) = self.0.widening_mul(&Self::redc(lo, hi));
        Self(Self::redc(lo, hi), PhantomData)
    }

    /// Compute <i>r</i> = <i>u&#8315;&sup1;</i> = <i>u&#x1D56;&#8315;&sup2;</i> mod <i>p</i>
    /// for <i>u</i> &#x2254; `self`, which satisfies
    /// <i>r&times;u</i> mod <i>p</i> = <i>1</i> if <i>u &ne; 0</i>.
    #[inline]
    fn inv(&self) -> Self {
        self.pow(Self::modulus() - Uint::from_word(2)) // inv exponent: p - 2
    }
}

impl<C: CurveParam, const LIMBS: usize> Mul for Fp<C, LIMBS> {
    type Output = Self;

    /// Compute a product in <b>F</b><sub><i>p</i></sub>.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        let (lo, hi) = self.0.widening_mul(&rhs.0);
        Self(Self::redc(lo, hi), PhantomData)
    }
}

impl<C: CurveParam, const LIMBS: usize> MulAssign for Fp<C, LIMBS> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        let (lo, hi) = self.0.widening_mul(&rhs.0);
        self.0 = Self::redc(lo, hi);
    }
}

impl<C: CurveParam, const LIMBS: usize> Neg for Fp<C, LIMBS> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        let nzp: NonZero<Uint<LIMBS>> = NonZero::new(Self::modulus()).unwrap();
        Self(self.0.neg_mod(&nzp), PhantomData)
    }
}

impl<C: CurveParam, const LIMBS: usize> One for Fp<C, LIMBS> {
    #[inline]
    fn one() -> Self {
        let r2: Uint<LIMBS> = Uint::from_words(C::MONTY_P.try_into().unwrap());
        Self(Self::redc(r2, Uint::ZERO), PhantomData)  // (1*r) mod p
    }

    fn is_one(&self) -> Choice {
        Self::redc(self.0, Uint::ZERO).ct_eq(&Uint::ONE)
    }
}

impl<C: CurveParam, const LIMBS: usize> PartialEq for Fp<C, LIMBS> {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }

    fn ne(&self, other: &Self) -> bool {
        self.0.ct_ne(&other.0).into()
    }
}

impl<C: CurveParam, const LIMBS: usize> Random for Fp<C, LIMBS> {
    /// Pick a uniform element from <b>F</b><sub><i>p</i></sub> by rejection sampling mod <i>p</i>.
    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let p: Uint<LIMBS> = Self::modulus();
        let top = C::MODULUS.len() - 1;
        let mask = Word::MAX >> C::MODULUS[top].leading_zeros();  // bit capacity of the top modulus word
        let mut w: [Word; LIMBS] = [0; LIMBS];
        loop {
            // uniformly sample the bit capacity of the modulus:
            rng.fill(&mut w);
            w[top] &= mask;
            // rejection sampling for the most significant word:
            while w[top].cmp(&C::MODULUS[top]).is_gt() {  // this means the whole value exceeds the modulus
                w[top] = rng.next_u64() & mask;
            }
            // rejection sampling for the whole value:
            let r = Uint::from_words(w);
            if r.cmp(&p).is_lt() {
                return Self::from_uint(r);
            }
        }
    }

    /// Try to pick a uniform element from <b>F</b><sub><i>p</i></sub> by rejection sampling mod <i>p</i>.
    fn try_random<R: TryRngCore + ?Sized>(rng: &mut R) -> Result<Self, <R as TryRngCore>::Error> where R: TryRngCore {
        let p: Uint<LIMBS> = Self::modulus();
        let top = C::MODULUS.len() - 1;
        let mask = Word::MAX >> C::MODULUS[top].leading_zeros();
        let mut w: [Word; LIMBS] = [0; LIMBS];
        loop {
            // uniformly sample the bit capacity of the modulus:
            for wi in &mut w {
                *wi = rng.try_next_u64()?
            }
            w[top] &= mask;
            // rejection sampling for the most significant word:
            while w[top].cmp(&C::MODULUS[top]).is_gt() {
                w[top] = rng.try_next_u64()? & mask;
            }
            // rejection sampling for the whole value:
            let r = Uint::from_words(w);
            if r.cmp(&p).is_lt() {
                return Ok(Self::from_uint(r));
            }
        }
    }
}

impl<C: CurveParam, const LIMBS: usize> SquareRoot for Fp<C, LIMBS> {
    /// Try to compute <i>r</i> = <i>&radic;`self`</i> mod <i>p</i>.
    ///
    /// Both the candidate-root computation and the confirming squaring always
    /// run; the returned `Choice` carries the existence verdict.
    #[inline]
    fn sqrt_if_square(&self) -> (Self, Choice) {
        let cand = if C::TWO_ADICITY == 1 {
            self.sqrt_3mod4()
        } else {
            self.sqrt_ladder()
        };
        (cand, cand.sq().ct_eq(self))
    }
}

impl<C: CurveParam, const LIMBS: usize> Sub for Fp<C, LIMBS> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        let nzp: NonZero<Uint<LIMBS>> = NonZero::new(Self::modulus()).unwrap();
        Self(self.0.sub_mod(&rhs.0, &nzp), PhantomData)
    }
}

impl<C: CurveParam, const LIMBS: usize> SubAssign for Fp<C, LIMBS> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        let nzp: NonZero<Uint<LIMBS>> = NonZero::new(Self::modulus()).unwrap();
        self.0 = self.0.sub_mod(&rhs.0, &nzp);
    }
}

impl<C: CurveParam, const LIMBS: usize> Zero for Fp<C, LIMBS> {
    #[inline]
    fn zero() -> Self {
        Self(Uint::ZERO, PhantomData)  // (0*r) mod p
    }

    #[inline]
    fn is_zero(&self) -> Choice {
        self.0.is_zero()
    }

    fn set_zero(&mut self) {
        self.0.set_zero()
    }
}
