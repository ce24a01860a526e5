//! Isochronous ("constant-time") arithmetic for pairing-friendly elliptic
//! curves of the BN and BLS12 families.
//!
//! The crate provides the two layers every pairing stack is built on:
//!
//! * the extension tower
//!   <b>F</b><sub><i>p</i></sub> &#8594;
//!   <b>F</b><sub><i>p&sup2;</i></sub> = <b>F</b><sub><i>p</i></sub>&lbrack;<i>i</i>&rbrack;/&lt;<i>i&sup2; - &beta;</i>&gt; &#8594;
//!   <b>F</b><sub><i>p&#x2076;</i></sub> = <b>F</b><sub><i>p&sup2;</i></sub>&lbrack;<i>v</i>&rbrack;/&lt;<i>v&sup3; - &xi;</i>&gt;
//!   with a per-curve quadratic non-residue <i>&beta;</i> (the classical
//!   <i>-1</i> wherever <i>p &equiv; 3 (mod 4)</i>) and tower non-residue
//!   <i>&xi;</i> = <i>1 + i</i>;
//! * complete (exception-free) short-Weierstrass point arithmetic in
//!   homogeneous projective coordinates over either <b>F</b><sub><i>p</i></sub>
//!   (the group <b>G&#x2081;</b>) or <b>F</b><sub><i>p&sup2;</i></sub>
//!   (the twist group <b>G&#x2082;</b>), via the Renes-Costello-Batina
//!   formulas for curves with a vanishing <i>a</i>-coefficient, plus an
//!   infinity-safe batched affine conversion built on Montgomery's inversion
//!   trick.
//!
//! Curves are compile-time choices: every type is parameterised by a
//! [`curve::CurveParam`] block and monomorphised per curve, so twist handling
//! and square-root strategy resolve before codegen and the runtime paths are
//! straight-line. Scalar multiplication and pairing computation sit above this
//! crate and consume its operations.
//!
//! All feasible care has been taken to make sure the arithmetic algorithms
//! adopted in this crate are isochronous and efficient: no control-flow
//! branch, memory access pattern or loop count depends on secret data, and
//! every data-dependent decision is carried by a `subtle::Choice` driving
//! conditional moves. Yet, the no-warranty clause of the MIT license is in
//! full force for this whole crate.
//!
//! References:
//!
//! * Joost Renes, Craig Costello, Lejla Batina:
//! "Complete addition formulas for prime order elliptic curves."
//! Eurocrypt 2016, LNCS 9665 (part I), pp. 403--428, Springer, 2016.
//! https://eprint.iacr.org/2015/1060
//!
//! * Paulo S. L. M. Barreto, Michael Naehrig:
//! "Pairing-Friendly Elliptic Curves of Prime Order."
//! SAC 2005, LNCS 3897, pp. 319--331, Springer, 2005.

pub mod curve;
pub mod fp;
pub mod fp2;
pub mod fp6;
pub mod point;
pub mod traits;

pub use curve::{Bls12_377Param, Bls12_381Param, Bls12_461Param, Bn254Param, Bn446Param, Bn462Param,
                CurveParam, Fkm12_447Param, Twist};
pub use fp::Fp;
pub use fp2::Fp2;
pub use fp6::Fp6;
pub use point::{Affine, G1, G2, Point, Subgroup};
pub use traits::{FieldOps, One, SquareRoot};
