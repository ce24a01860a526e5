use crypto_bigint::subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use crypto_bigint::Zero;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Multiplicative identity (unity).
pub trait One: ConstantTimeEq + Sized {
    /// Create an instance of the multiplicative identity (i.e. the value `1`)
    /// in the underlying algebraic structure.
    fn one() -> Self;

    /// Determine if this value is the multiplicative identity (i.e. `Self::one`)
    /// in the underlying algebraic structure.
    /// If so, returns `Choice(1)`. Otherwise, returns `Choice(0)`.
    #[inline]
    fn is_one(&self) -> Choice {
        self.ct_eq(&Self::one())
    }

    /// Set `self` to the multiplicative identity (i.e. `Self::one`)
    /// in the underlying algebraic structure.
    #[inline]
    fn set_one(&mut self) {
        *self = One::one();
    }
}

/// The operation surface shared by every layer of the field tower
/// (<b>F</b><sub><i>p</i></sub>, <b>F</b><sub><i>p&sup2;</i></sub>,
/// <b>F</b><sub><i>p&#x2076;</i></sub>).
///
/// All methods are isochronous: no control flow or memory access pattern
/// depends on the value of `self` or of any argument, except for `Choice`
/// arguments, which are data rather than control flow.
pub trait FieldOps:
    Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + Zero
    + One
    + ConditionallySelectable
    + ConstantTimeEq
    + Copy
{
    /// Compute the value of 2&times;`self`.
    fn double(&self) -> Self;

    /// Compute the value of `self`/2.
    fn half(&self) -> Self;

    /// Compute `self`&sup2;.
    fn sq(&self) -> Self;

    /// Compute `self`&sup3;.
    #[inline]
    fn cb(&self) -> Self {
        self.sq() * *self
    }

    /// Compute the inverse of `self` (or 0, if `self` itself is zero).
    fn inv(&self) -> Self;

    /// Overwrite `self` with `src` iff `ctl` holds, without branching.
    #[inline]
    fn ccopy(&mut self, src: &Self, ctl: Choice) {
        *self = Self::conditional_select(self, src, ctl);
    }

    /// Overwrite `self` with 0 iff `ctl` holds, without branching.
    #[inline]
    fn cset_zero(&mut self, ctl: Choice) {
        *self = Self::conditional_select(self, &Self::zero(), ctl);
    }

    /// Overwrite `self` with 1 iff `ctl` holds, without branching.
    #[inline]
    fn cset_one(&mut self, ctl: Choice) {
        *self = Self::conditional_select(self, &Self::one(), ctl);
    }

    /// Compute -`self` iff `ctl` holds (and `self` itself otherwise), without branching.
    #[inline]
    fn cneg(self, ctl: Choice) -> Self {
        Self::conditional_select(&self, &(-self), ctl)
    }
}

/// Square-root capability of the point coordinate fields.
pub trait SquareRoot: FieldOps {
    /// Try to compute a square root of `self`.
    ///
    /// Returns the principal root and `Choice(1)` if `self` is a square, or an
    /// unspecified (but valid) field element and `Choice(0)` otherwise. Both
    /// the candidate computation and the existence check always execute; the
    /// outcome never influences control flow.
    fn sqrt_if_square(&self) -> (Self, Choice);
}
