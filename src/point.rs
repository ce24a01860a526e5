#[cfg(not(any(target_pointer_width = "64")))]
compile_error!("this crate requires 64-bit limbs");

use crate::curve::{CurveParam, Twist};
use crate::fp::Fp;
use crate::fp2::Fp2;
use crate::traits::{FieldOps, One, SquareRoot};
use crypto_bigint::Zero;
use crypto_bigint::subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use std::fmt::{Debug, Display, Formatter};
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A subgroup tag: the coordinate field of the tagged curve together with the
/// compile-time placement of the sextic non-residue &xi; in the point formulas.
///
/// [`G1`] tags the curve <i>E</i>/<b>F</b><sub><i>p</i></sub> itself;
/// [`G2`] tags its sextic twist <i>E'</i>/<b>F</b><sub><i>p&sup2;</i></sub>.
/// The `adjust_*` hooks are resolved per monomorphization, so the runtime path
/// through the complete formulas is a single straight-line sequence with no
/// twist branch.
pub trait Subgroup<C: CurveParam, const LIMBS: usize> {
    /// Coordinate field of the tagged curve.
    type Field: FieldOps + SquareRoot + Display;

    /// Twist kind folded into this subgroup's formulas.
    const TWIST: Twist;

    /// The curve equation coefficient of the tagged curve
    /// (<i>b</i>, or the twisted <i>b'</i> = <i>b&middot;&xi;</i> / <i>b</i>/<i>&xi;</i>).
    fn coeff_b() -> Self::Field;

    /// <i>3b</i> in the coordinate field, prior to any &xi; folding;
    /// the complete formulas consume this constant and fold &xi; through
    /// [`Self::adjust_m`] where the twist requires it.
    fn coeff_b3() -> Self::Field;

    /// Multiply a cross term by &xi; iff this subgroup sits on a D-twist.
    fn adjust_d(t: Self::Field) -> Self::Field;

    /// Multiply a <i>b</i>-term by &xi; iff this subgroup sits on an M-twist.
    fn adjust_m(t: Self::Field) -> Self::Field;
}

/// The (base field) <i>n</i>-torsion group
/// <b>G</b><i>&#x2081;</i> &#x2254; <i>E</i>&lbrack;<i>n</i>&rbrack;(<b>F</b><sub><i>p</i></sub>)
/// of a curve <i>E</i>/<b>F</b><sub><i>p</i></sub> : <i>Y&sup2;Z</i> = <i>X&sup3;</i> + <i>bZ&sup3;</i>.
#[derive(Debug)]
pub struct G1;

impl<C: CurveParam, const LIMBS: usize> Subgroup<C, LIMBS> for G1 {
    type Field = Fp<C, LIMBS>;

    const TWIST: Twist = Twist::None;

    #[inline]
    fn coeff_b() -> Self::Field {
        Fp::from_word(C::CURVE_B)
    }

    #[inline]
    fn coeff_b3() -> Self::Field {
        Fp::from_word(3*C::CURVE_B)
    }

    #[inline]
    fn adjust_d(t: Self::Field) -> Self::Field {
        t
    }

    #[inline]
    fn adjust_m(t: Self::Field) -> Self::Field {
        t
    }
}

/// The group <b>G</b><i>&#x2082;</i> of points on the sextic twist
/// <i>E'</i>/<b>F</b><sub><i>p&sup2;</i></sub> : <i>Y'&sup2;Z'</i> = <i>X'&sup3;</i> + <i>b'Z'&sup3;</i>,
/// with <i>b'</i> = <i>b&middot;&xi;</i> (M-twist) or <i>b</i>/<i>&xi;</i> (D-twist)
/// as recorded in the curve's parameter block.
#[derive(Debug)]
pub struct G2;

impl<C: CurveParam, const LIMBS: usize> Subgroup<C, LIMBS> for G2 {
    type Field = Fp2<C, LIMBS>;

    const TWIST: Twist = C::TWIST;

    #[inline]
    fn coeff_b() -> Self::Field {
        match C::TWIST {
            Twist::M => Fp2::from_word(C::CURVE_B).mul_xi(),
            _ => Fp2::from_word(C::CURVE_B).div_xi(),
        }
    }

    #[inline]
    fn coeff_b3() -> Self::Field {
        Fp2::from_word(3*C::CURVE_B)
    }

    #[inline]
    fn adjust_d(t: Self::Field) -> Self::Field {
        match C::TWIST {
            Twist::D => t.mul_xi(),
            _ => t,
        }
    }

    #[inline]
    fn adjust_m(t: Self::Field) -> Self::Field {
        match C::TWIST {
            Twist::M => t.mul_xi(),
            _ => t,
        }
    }
}

/// An affine point (<i>x</i>, <i>y</i>) of the curve tagged by `G`.
///
/// There is no affine encoding of the point at infinity; callers track it out
/// of band. [`Point::batch_normalize`] emits the sentinel (0, 0) for infinite
/// inputs, and that sentinel is what this type's [`Zero`] impl describes.
#[derive(Debug)]
pub struct Affine<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> {
    pub x: G::Field,
    pub y: G::Field,
}

impl<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> Clone for Affine<C, LIMBS, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> ConditionallySelectable for Affine<C, LIMBS, G> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: G::Field::conditional_select(&a.x, &b.x, choice),
            y: G::Field::conditional_select(&a.y, &b.y, choice),
        }
    }
}

impl<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> ConstantTimeEq for Affine<C, LIMBS, G> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y)
    }

    fn ct_ne(&self, other: &Self) -> Choice {
        self.x.ct_ne(&other.x) | self.y.ct_ne(&other.y)
    }
}

impl<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> Copy for Affine<C, LIMBS, G> {}

impl<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> PartialEq for Affine<C, LIMBS, G> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> Zero for Affine<C, LIMBS, G> {
    /// The (0, 0) sentinel that stands in for the point at infinity in batch
    /// normalization output.
    fn zero() -> Self {
        Self {
            x: G::Field::zero(),
            y: G::Field::zero(),
        }
    }

    fn is_zero(&self) -> Choice {
        self.x.is_zero() & self.y.is_zero()
    }

    fn set_zero(&mut self) {
        self.x.set_zero();
        self.y.set_zero();
    }
}

/// A point of the curve tagged by `G` in homogeneous projective coordinates:
/// (<i>X</i> : <i>Y</i> : <i>Z</i>) stands for the affine point
/// (<i>X/Z</i>, <i>Y/Z</i>) when <i>Z &ne; 0</i>, and for the point at
/// infinity when <i>X</i> = <i>Z</i> = <i>0</i> (canonically (0 : 1 : 0)).
pub struct Point<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> {
    pub(crate) x: G::Field,
    pub(crate) y: G::Field,
    pub(crate) z: G::Field,
}

impl<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> Point<C, LIMBS, G> {
    // the formulas below are complete only on curves with a vanishing
    // a-coefficient; any other parameter block must fail to instantiate
    const REQUIRE_A_ZERO: () = assert!(C::CURVE_A == 0, "the complete formulas require a curve with a = 0");

    /// Determine if given projective coordinates <i>X</i>, <i>Y</i>, and <i>Z</i>
    /// satisfy the projective curve equation <i>Y&sup2;Z</i> = <i>X&sup3;</i> + <i>bZ&sup3;</i>
    /// of the curve tagged by `G`.
    #[inline]
    pub fn is_point(x: G::Field, y: G::Field, z: G::Field) -> Choice {
        (y.sq()*z).ct_eq(&(x.cb() + G::coeff_b()*z.cb()))
    }

    /// Create a point from given affine coordinates.
    ///
    /// The caller is responsible for the coordinates satisfying the curve
    /// equation; affine infinity has no encoding and must go through
    /// [`Zero::set_zero`] instead.
    #[inline]
    pub fn from_affine(a: &Affine<C, LIMBS, G>) -> Self {
        Self {
            x: a.x,
            y: a.y,
            z: G::Field::one(),
        }
    }

    /// Compute the affine form of this point.
    ///
    /// The result is undefined for the point at infinity; callers check
    /// [`Zero::is_zero`] first.
    #[inline]
    pub fn to_affine(&self) -> Affine<C, LIMBS, G> {
        let inv = self.z.inv();
        Affine {
            x: self.x*inv,
            y: self.y*inv,
        }
    }

    /// Compute a normalized point equivalent to this one:
    /// (<i>x</i> : <i>y</i> : 1) for a finite point, (0 : 1 : 0) for infinity.
    #[inline]
    pub fn normalize(&self) -> Self {
        let ch = self.z.is_zero();
        let inv = G::Field::conditional_select(&self.z, &self.y, ch).inv();
        Self {
            x: self.x*inv,
            y: self.y*inv,
            z: G::Field::conditional_select(&G::Field::one(), &G::Field::zero(), ch),
        }
    }

    /// Overwrite this point with `pair` iff `ctl` holds, without branching.
    #[inline]
    pub fn ccopy(&mut self, pair: &Self, ctl: Choice) {
        *self = Self::conditional_select(self, pair, ctl);
    }

    /// Negate this point iff `ctl` holds, in constant time.
    #[inline]
    pub fn cneg(&self, ctl: Choice) -> Self {
        Self {
            x: self.x,
            y: self.y.cneg(ctl),
            z: self.z,
        }
    }

    /// Try to build the point with affine abscissa `x`, i.e.
    /// (<i>x</i> : <i>&radic;(x&sup3; + b)</i> : 1).
    ///
    /// Returns `Choice(1)` and assigns the point on success. When
    /// <i>x&sup3; + b</i> is a non-residue the return is `Choice(0)` and the
    /// coordinates are left in an unspecified (but valid) field state. The
    /// square-root outcome never influences control flow; callers wanting a
    /// uniform point retry with fresh `x` values.
    #[inline]
    pub fn try_set_from_x(&mut self, x: &G::Field) -> Choice {
        let rhs = x.cb() + G::coeff_b();
        let (y, ok) = rhs.sqrt_if_square();
        self.x = *x;
        self.y = y;
        self.z = G::Field::one();
        ok
    }

    /// Same as [`Self::try_set_from_x`], but scale the resulting triple by a
    /// given projective factor `z`, yielding (<i>xz</i> : <i>yz</i> : <i>z</i>).
    #[inline]
    pub fn try_set_from_x_and_z(&mut self, x: &G::Field, z: &G::Field) -> Choice {
        let rhs = x.cb() + G::coeff_b();
        let (y, ok) = rhs.sqrt_if_square();
        self.x = *x * *z;
        self.y = y * *z;
        self.z = *z;
        ok
    }

    /// Complete elliptic point doubling.
    ///
    /// Reference: Joost Renes, Craig Costello, Lejla Batina:
    /// <a href="https://link.springer.com/content/pdf/10.1007/978-3-662-49890-3_16">
    /// "Complete addition formulas for prime order elliptic curves"</a>
    /// (Algorithm 9), Eurocrypt 2016, LNCS 9665 (part I), pp. 403--428, Springer, 2016.
    #[inline]
    pub fn double(&self) -> Self {
        let () = Self::REQUIRE_A_ZERO;
        let x = self.x;
        let y = self.y;
        let z = self.z;

        let mut t0: G::Field;
        let mut t1: G::Field;
        let mut t2: G::Field;
        let mut x3: G::Field;
        let mut y3: G::Field;
        let mut z3: G::Field;

        // on a D-twist the whole output is uniformly scaled by ξ², so every
        // linear and quadratic occurrence of Y absorbs one factor of ξ
        let sy = G::adjust_d(y);

        t0 = y*sy;
        z3 = t0+t0;
        z3 = z3+z3;

        z3 = z3+z3;
        t1 = sy*z;
        t2 = z*z;

        t2 = G::coeff_b3()*t2;
        t2 = G::adjust_m(t2);
        x3 = t2*z3;
        y3 = t0+t2;

        z3 = t1*z3;
        t1 = t2+t2;
        t2 = t1+t2;

        t0 = t0-t2;
        y3 = t0*y3;
        y3 = x3+y3;

        t1 = x*sy;
        x3 = t0*t1;
        x3 = x3+x3;

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Complete mixed addition of a projective point and an affine point
    /// (<i>Z&#x2082;</i> = 1 specialised out of the full addition).
    ///
    /// Reference: Joost Renes, Craig Costello, Lejla Batina:
    /// <a href="https://link.springer.com/content/pdf/10.1007/978-3-662-49890-3_16">
    /// "Complete addition formulas for prime order elliptic curves"</a>
    /// (Algorithm 8), Eurocrypt 2016, LNCS 9665 (part I), pp. 403--428, Springer, 2016.
    #[inline]
    pub fn madd(&self, pair: &Affine<C, LIMBS, G>) -> Self {
        let () = Self::REQUIRE_A_ZERO;
        let x1 = self.x;
        let y1 = self.y;
        let z1 = self.z;
        let x2 = pair.x;
        let y2 = pair.y;

        let mut t0: G::Field;
        let mut t1: G::Field;
        let mut t2: G::Field;
        let mut t3: G::Field;
        let mut t4: G::Field;
        let mut x3: G::Field;
        let mut y3: G::Field;
        let mut z3: G::Field;

        t0 = x1*x2;
        t1 = y1*y2;

        t3 = x1 + y1;
        t4 = x2 + y2;
        t3 = t3*t4;

        t4 = t0 + t1;
        t3 = t3 - t4;
        t3 = G::adjust_d(t3);

        t4 = y2*z1;
        t4 = t4 + y1;
        t4 = G::adjust_d(t4);

        y3 = x2*z1;
        y3 = y3 + x1;

        t0 = G::adjust_d(t0);
        t1 = G::adjust_d(t1);
        x3 = t0 + t0;
        t0 = x3 + t0;

        t2 = G::coeff_b3()*z1;
        t2 = G::adjust_m(t2);

        z3 = t1 + t2;
        t1 = t1 - t2;
        y3 = G::coeff_b3()*y3;
        y3 = G::adjust_m(y3);

        x3 = t4*y3;
        t2 = t3*t1;
        x3 = t2 - x3;

        y3 = y3*t0;
        t1 = t1*z3;
        y3 = t1 + y3;

        t0 = t0*t3;
        z3 = z3*t4;
        z3 = z3 + t0;

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }
}

impl<C: CurveParam, const LIMBS: usize> Point<C, LIMBS, G1> {
    /// Create an instance of the default generator of <i>n</i>-torsion on
    /// <i>E</i>/<b>F</b><sub><i>p</i></sub>, from the curve's parameter block.
    #[inline]
    pub fn generator() -> Self {
        Self {
            x: Fp::from_words(C::GENERATOR_X.try_into().unwrap()),
            y: Fp::from_words(C::GENERATOR_Y.try_into().unwrap()),
            z: Fp::one(),
        }
    }
}

impl<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> Point<C, LIMBS, G> {
    /// Batch conversion to affine via Montgomery's inversion trick:
    /// one field inversion plus <i>3(N - 1)</i> multiplications overall.
    ///
    /// Points at infinity are handled without branching: their <i>Z</i> = 0 is
    /// replaced by 1 in the running product chain so it cannot taint the other
    /// entries, and their output slot is forced to the (0, 0) sentinel. The
    /// output <i>x</i> slots double as scratch for the running products.
    pub fn batch_normalize(points: &[Self], affine: &mut [Affine<C, LIMBS, G>]) {
        assert_eq!(points.len(), affine.len());
        let n = points.len();
        if n == 0 {
            return;
        }
        let one = G::Field::one();
        let zeroes: Vec<Choice> = points.iter().map(|p| p.z.is_zero()).collect();

        // ascending pass: running products of the (substituted) Z coordinates
        let mut acc = G::Field::conditional_select(&points[0].z, &one, zeroes[0]);
        affine[0].x = acc;
        for i in 1..n {
            acc *= G::Field::conditional_select(&points[i].z, &one, zeroes[i]);
            affine[i].x = acc;
        }

        // a single inversion of the total product
        let mut acc_inv = affine[n - 1].x.inv();

        // descending pass: peel one Z off the running inverse per entry
        for i in (1..n).rev() {
            let mut inv_i = acc_inv*affine[i - 1].x;
            inv_i.cset_zero(zeroes[i]);
            acc_inv *= G::Field::conditional_select(&points[i].z, &one, zeroes[i]);
            affine[i].x = points[i].x*inv_i;
            affine[i].y = points[i].y*inv_i;
        }
        let mut inv_0 = acc_inv;
        inv_0.cset_zero(zeroes[0]);
        affine[0].x = points[0].x*inv_0;
        affine[0].y = points[0].y*inv_0;
    }
}

impl<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> Add for Point<C, LIMBS, G> {
    type Output = Self;

    /// Complete elliptic point addition; correct for every pair of inputs,
    /// including doublings, opposite points and the point at infinity, with no
    /// data-dependent branch.
    fn add(self, other: Self) -> Self::Output {
        let mut point = self;
        point += other;
        point
    }
}

impl<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> AddAssign for Point<C, LIMBS, G> {
    /// Complete elliptic point addition.
    ///
    /// Reference: Joost Renes, Craig Costello, Lejla Batina:
    /// <a href="https://link.springer.com/content/pdf/10.1007/978-3-662-49890-3_16">
    /// "Complete addition formulas for prime order elliptic curves"</a>
    /// (Algorithm 7), Eurocrypt 2016, LNCS 9665 (part I), pp. 403--428, Springer, 2016.
    fn add_assign(&mut self, pair: Self) {
        let () = Self::REQUIRE_A_ZERO;
        let x1 = self.x;
        let y1 = self.y;
        let z1 = self.z;
        let x2 = pair.x;
        let y2 = pair.y;
        let z2 = pair.z;

        let mut t0: G::Field;
        let mut t1: G::Field;
        let mut t2: G::Field;
        let mut t3: G::Field;
        let mut t4: G::Field;
        let mut x3: G::Field;
        let mut y3: G::Field;
        let mut z3: G::Field;

        t0 = x1*x2;
        t1 = y1*y2;
        t2 = z1*z2;

        t3 = x1 + y1;
        t4 = x2 + y2;
        t3 = t3*t4;

        t4 = t0 + t1;
        t3 = t3 - t4;
        t3 = G::adjust_d(t3);

        t4 = y1 + z1;
        x3 = y2 + z2;
        t4 = t4*x3;

        x3 = t1 + t2;
        t4 = t4 - x3;
        t4 = G::adjust_d(t4);

        x3 = x1 + z1;
        y3 = x2 + z2;
        x3 = x3*y3;

        y3 = t0 + t2;
        y3 = x3 - y3;

        t0 = G::adjust_d(t0);
        t1 = G::adjust_d(t1);
        x3 = t0 + t0;
        t0 = x3 + t0;

        t2 = G::coeff_b3()*t2;
        t2 = G::adjust_m(t2);

        z3 = t1 + t2;
        t1 = t1 - t2;
        y3 = G::coeff_b3()*y3;
        y3 = G::adjust_m(y3);

        x3 = t4*y3;
        t2 = t3*t1;
        x3 = t2 - x3;

        y3 = y3*t0;
        t1 = t1*z3;
        y3 = t1 + y3;

        t0 = t0*t3;
        z3 = z3*t4;
        z3 = z3 + t0;

        self.x = x3;
        self.y = y3;
        self.z = z3;
    }
}

impl<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> Clone for Point<C, LIMBS, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> Copy for Point<C, LIMBS, G> {}

impl<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> ConditionallySelectable for Point<C, LIMBS, G> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let x = G::Field::conditional_select(&a.x, &b.x, choice);
        let y = G::Field::conditional_select(&a.y, &b.y, choice);
        let z = G::Field::conditional_select(&a.z, &b.z, choice);
        Self { x, y, z }
    }
}

impl<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> ConstantTimeEq for Point<C, LIMBS, G> {
    /// Projective equality; both cross products are always computed.
    fn ct_eq(&self, pair: &Self) -> Choice {
        // x/z = pair.x/pair.z <=> x*pair.z = pair.x*z
        // y/z = pair.y/pair.z <=> y*pair.z = pair.y*z
        (self.x*pair.z).ct_eq(&(pair.x*self.z)) &
        (self.y*pair.z).ct_eq(&(pair.y*self.z))
    }

    fn ct_ne(&self, pair: &Self) -> Choice {
        (self.x*pair.z).ct_ne(&(pair.x*self.z)) |
        (self.y*pair.z).ct_ne(&(pair.y*self.z))
    }
}

impl<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> Debug for Point<C, LIMBS, G> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self, f)
    }
}

impl<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> Display for Point<C, LIMBS, G> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let normal = self.normalize();
        write!(f, "[{} : {} : {}]", normal.x, normal.y, normal.z)
    }
}

impl<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> Neg for Point<C, LIMBS, G> {
    type Output = Self;

    /// Compute the opposite of this point.
    fn neg(self) -> Self::Output {
        Self::Output {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }
}

impl<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> PartialEq for Point<C, LIMBS, G> {
    fn eq(&self, pair: &Self) -> bool {
        self.ct_eq(pair).into()
    }

    fn ne(&self, pair: &Self) -> bool {
        self.ct_ne(pair).into()
    }
}

impl<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> Sub for Point<C, LIMBS, G> {
    type Output = Self;

    /// Compute the difference of two points as a composed negation and
    /// complete addition; alias-safe for any coincidence of the operands.
    fn sub(self, other: Self) -> Self::Output {
        let mut point = self;
        point -= other;
        point
    }
}

impl<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> SubAssign for Point<C, LIMBS, G> {
    fn sub_assign(&mut self, pair: Self) {
        self.add_assign(pair.neg())
    }
}

impl<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>> Zero for Point<C, LIMBS, G> {
    /// Create an instance of the neutral element ("point at infinity") in
    /// canonical projective form <i>&lbrack;0 : 1 : 0&rbrack;</i>.
    fn zero() -> Self {
        Self {
            x: G::Field::zero(),
            y: G::Field::one(),
            z: G::Field::zero(),
        }
    }

    /// Determine if this point is the neutral element, detected as
    /// <i>X</i> = 0 &and; <i>Z</i> = 0 in constant time.
    fn is_zero(&self) -> Choice {
        self.x.is_zero() & self.z.is_zero()
    }

    fn set_zero(&mut self) {
        self.x.set_zero();
        self.y.set_one();
        self.z.set_zero();
    }
}


#[cfg(test)]
mod tests {
    use crate::curve::{Bls12_377Param, Bls12_381Param, Bls12_461Param, Bn254Param, Bn446Param, Bn462Param, Fkm12_447Param};
    use crypto_bigint::Random;
    use crypto_bigint::rand_core::RngCore;
    use std::time::SystemTime;
    use super::*;

    const TESTS: usize = 30;

    /// Sample a uniform curve point by the abscissa retry loop.
    /// The retry is test-harness machinery, outside the isochronous envelope.
    fn random_point<C: CurveParam, const LIMBS: usize, G: Subgroup<C, LIMBS>, R: RngCore + ?Sized>(
        rng: &mut R,
    ) -> Point<C, LIMBS, G>
    where
        G::Field: Random,
    {
        let mut p = Point::zero();
        loop {
            let x = G::Field::random(rng);
            if bool::from(p.try_set_from_x(&x)) {
                return p;
            }
        }
    }

    /// General point engine test template, covering either subgroup tag.
    fn point_test<C: CurveParam + std::fmt::Debug, const LIMBS: usize, G: Subgroup<C, LIMBS> + std::fmt::Debug>(label: &str)
    where
        G::Field: Random,
        G::Field: std::fmt::Debug,
    {
        let mut rng = rand::rng();

        println!();
        println!("Performing {} {} point test(s)...", TESTS, label);
        let now = SystemTime::now();

        // neutral element:
        let o: Point<C, LIMBS, G> = Point::zero();
        assert!(bool::from(o.is_zero()));
        assert_eq!(o, o);
        assert!(bool::from((o + o).is_zero()));

        for _t in 0..TESTS {
            let p: Point<C, LIMBS, G> = random_point(&mut rng);
            let q: Point<C, LIMBS, G> = random_point(&mut rng);
            let r: Point<C, LIMBS, G> = random_point(&mut rng);
            assert!(bool::from(Point::<C, LIMBS, G>::is_point(p.x, p.y, p.z)));

            // group axioms:
            assert_eq!(p + o, p);
            assert_eq!(o + p, p);
            assert!(bool::from((p + (-p)).is_zero()));
            assert!(bool::from((p - p).is_zero()));
            assert_eq!(p + q, q + p);
            assert_eq!((p + q) + r, p + (q + r));

            // doubling equals self-addition, and the sums stay on the curve:
            let d = p.double();
            assert_eq!(d, p + p);
            assert!(bool::from(Point::<C, LIMBS, G>::is_point(d.x, d.y, d.z)));
            let s = p + q;
            assert!(bool::from(Point::<C, LIMBS, G>::is_point(s.x, s.y, s.z)));

            // difference:
            assert_eq!(p - q, p + (-q));
            assert_eq!(p.cneg(Choice::from(1)), -p);
            assert_eq!(p.cneg(Choice::from(0)), p);

            // conditional copy:
            let mut w = p;
            w.ccopy(&q, Choice::from(0));
            assert_eq!(w, p);
            w.ccopy(&q, Choice::from(1));
            assert_eq!(w, q);

            // mixed addition consistency (q is finite by construction):
            assert_eq!(p.madd(&q.to_affine()), p + q);
            assert_eq!(o.madd(&q.to_affine()), q);

            // affine round-trip:
            let qa = q.to_affine();
            assert_eq!(Point::from_affine(&qa), q);
            assert_eq!(Point::<C, LIMBS, G>::from_affine(&qa).to_affine(), qa);

            // normalization:
            let n = (p + q).normalize();
            assert_eq!(n, p + q);
            assert!(bool::from(n.z.is_one()));
            assert!(bool::from(o.normalize().is_zero()));

            // scaled construction agrees with the plain one:
            let z = G::Field::random(&mut rng);
            let mut p1: Point<C, LIMBS, G> = Point::zero();
            let mut p2: Point<C, LIMBS, G> = Point::zero();
            let ok1 = p1.try_set_from_x(&p.x);
            let ok2 = p2.try_set_from_x_and_z(&p.x, &z);
            assert_eq!(bool::from(ok1), true);
            assert_eq!(bool::from(ok2), true);
            assert_eq!(p1, p2);
        }

        // completeness around infinity, in every representation produced:
        let p: Point<C, LIMBS, G> = random_point(&mut rng);
        let inf = p + (-p);
        assert!(bool::from(inf.is_zero()));
        assert_eq!(inf + p, p);
        assert_eq!(p + inf, p);
        assert!(bool::from(inf.double().is_zero()));
        assert_eq!(inf, Point::zero());

        // batch normalization with an arbitrary infinity mix:
        let points: Vec<Point<C, LIMBS, G>> = vec![
            p,
            Point::zero(),
            p.double(),
            Point::zero(),
            p.double() + p,
            random_point(&mut rng),
        ];
        let mut affine = vec![Affine::<C, LIMBS, G>::zero(); points.len()];
        Point::batch_normalize(&points, &mut affine);
        for (pt, a) in points.iter().zip(affine.iter()) {
            if bool::from(pt.is_zero()) {
                assert!(bool::from(a.is_zero()));
            } else {
                assert_eq!(*a, pt.to_affine());
            }
        }
        // an all-infinity batch must not taint anything either:
        let points: Vec<Point<C, LIMBS, G>> = vec![Point::zero(); 3];
        let mut affine = vec![Affine::<C, LIMBS, G>::zero(); 3];
        Point::batch_normalize(&points, &mut affine);
        for a in &affine {
            assert!(bool::from(a.is_zero()));
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

    /// The registry generator must lie on its curve and behave under the
    /// complete formulas.
    fn generator_test<C: CurveParam, const LIMBS: usize>(label: &str) {
        println!();
        println!("Performing {} generator test...", label);
        let g: Point<C, LIMBS, G1> = Point::generator();
        assert!(bool::from(Point::<C, LIMBS, G1>::is_point(g.x, g.y, g.z)));
        assert_eq!(g.double(), g + g);
        assert!(bool::from((g + (-g)).is_zero()));
        assert_eq!(Point::<C, LIMBS, G1>::zero() + g, g);
        assert_eq!(g + Point::zero(), g);
    }

    #[test]
    fn bn254_g1_test() {
        const LIMBS: usize = Bn254Param::LIMBS;
        point_test::<Bn254Param, LIMBS, G1>("BN254 G1");
        generator_test::<Bn254Param, LIMBS>("BN254");
    }

    #[test]
    fn bn254_g2_test() {
        const LIMBS: usize = Bn254Param::LIMBS;
        point_test::<Bn254Param, LIMBS, G2>("BN254 G2");
    }

    #[test]
    fn bls12_377_g1_test() {
        const LIMBS: usize = Bls12_377Param::LIMBS;
        point_test::<Bls12_377Param, LIMBS, G1>("BLS12-377 G1");
        generator_test::<Bls12_377Param, LIMBS>("BLS12-377");
    }

    #[test]
    fn bls12_377_g2_test() {
        const LIMBS: usize = Bls12_377Param::LIMBS;
        point_test::<Bls12_377Param, LIMBS, G2>("BLS12-377 G2");
    }

    #[test]
    fn bls12_381_g1_test() {
        const LIMBS: usize = Bls12_381Param::LIMBS;
        point_test::<Bls12_381Param, LIMBS, G1>("BLS12-381 G1");
        generator_test::<Bls12_381Param, LIMBS>("BLS12-381");
    }

    #[test]
    fn bls12_381_g2_test() {
        const LIMBS: usize = Bls12_381Param::LIMBS;
        point_test::<Bls12_381Param, LIMBS, G2>("BLS12-381 G2");
    }

    #[test]
    fn bn446_g1_test() {
        const LIMBS: usize = Bn446Param::LIMBS;
        point_test::<Bn446Param, LIMBS, G1>("BN446 G1");
        generator_test::<Bn446Param, LIMBS>("BN446");
    }

    #[test]
    fn bn446_g2_test() {
        const LIMBS: usize = Bn446Param::LIMBS;
        point_test::<Bn446Param, LIMBS, G2>("BN446 G2");
    }

    #[test]
    fn fkm12_447_g1_test() {
        const LIMBS: usize = Fkm12_447Param::LIMBS;
        point_test::<Fkm12_447Param, LIMBS, G1>("FKM12-447 G1");
        generator_test::<Fkm12_447Param, LIMBS>("FKM12-447");
    }

    #[test]
    fn fkm12_447_g2_test() {
        const LIMBS: usize = Fkm12_447Param::LIMBS;
        point_test::<Fkm12_447Param, LIMBS, G2>("FKM12-447 G2");
    }

    #[test]
    fn bls12_461_g1_test() {
        const LIMBS: usize = Bls12_461Param::LIMBS;
        point_test::<Bls12_461Param, LIMBS, G1>("BLS12-461 G1");
        generator_test::<Bls12_461Param, LIMBS>("BLS12-461");
    }

    #[test]
    fn bls12_461_g2_test() {
        const LIMBS: usize = Bls12_461Param::LIMBS;
        point_test::<Bls12_461Param, LIMBS, G2>("BLS12-461 G2");
    }

    #[test]
    fn bn462_g1_test() {
        const LIMBS: usize = Bn462Param::LIMBS;
        point_test::<Bn462Param, LIMBS, G1>("BN462 G1");
        generator_test::<Bn462Param, LIMBS>("BN462");
    }

    #[test]
    fn bn462_g2_test() {
        const LIMBS: usize = Bn462Param::LIMBS;
        point_test::<Bn462Param, LIMBS, G2>("BN462 G2");
    }

    /// The bit-exact scenarios anchored to the BLS12-381 generator.
    #[test]
    fn bls12_381_generator_scenarios() {
        const LIMBS: usize = Bls12_381Param::LIMBS;
        type P = Point<Bls12_381Param, LIMBS, G1>;

        let g: P = Point::generator();
        let o: P = Point::zero();
        assert_eq!(g.double(), g + g);
        assert!(bool::from((g + (-g)).is_zero()));
        assert_eq!(o + g, g);
        assert_eq!(g + o, g);

        // batch_to_affine on [G, ∞, 2G, ∞, 3G] -> [g, (0,0), 2g, (0,0), 3g]:
        let g2 = g.double();
        let g3 = g2 + g;
        let points = [g, o, g2, o, g3];
        let mut affine = [Affine::<Bls12_381Param, LIMBS, G1>::zero(); 5];
        P::batch_normalize(&points, &mut affine);
        assert_eq!(affine[0], g.to_affine());
        assert!(bool::from(affine[1].is_zero()));
        assert_eq!(affine[2], g2.to_affine());
        assert!(bool::from(affine[3].is_zero()));
        assert_eq!(affine[4], g3.to_affine());
    }
}
