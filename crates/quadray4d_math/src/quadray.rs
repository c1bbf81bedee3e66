//! Quadray coordinate type
//!
//! A Quadray (a, b, c, d) addresses a point in the tetrahedral IVM lattice using
//! four basis vectors that point from the centre of a regular tetrahedron to its
//! vertices. The representation is redundant: adding the same amount to all four
//! components names the same point, so the zero-minimum [`Quadray::normalized`]
//! form is the canonical one for equality and hashing.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};
use std::fmt;

use crate::synergetics::ROOT2;
use crate::Vec3;

/// Default tolerance for [`Quadray::equals`]
pub const DEFAULT_EPSILON: f64 = 1e-4;

/// 4D tetrahedral coordinate
///
/// Arithmetic operators work on raw components. Callers that hash or compare
/// points should agree on whether they use raw or normalized values.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quadray {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Quadray {
    pub const ORIGIN: Self = Self { a: 0.0, b: 0.0, c: 0.0, d: 0.0 };
    pub const A: Self = Self { a: 1.0, b: 0.0, c: 0.0, d: 0.0 };
    pub const B: Self = Self { a: 0.0, b: 1.0, c: 0.0, d: 0.0 };
    pub const C: Self = Self { a: 0.0, b: 0.0, c: 1.0, d: 0.0 };
    pub const D: Self = Self { a: 0.0, b: 0.0, c: 0.0, d: 1.0 };

    /// The four unit basis directions, in A, B, C, D order
    pub const BASIS: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Create a new Quadray
    #[inline]
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Create a Quadray from integer lattice coordinates
    #[inline]
    pub fn from_cell(a: i32, b: i32, c: i32, d: i32) -> Self {
        Self::new(a as f64, b as f64, c as f64, d as f64)
    }

    /// Components as an array in a, b, c, d order
    #[inline]
    pub fn as_array(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Smallest of the four components
    #[inline]
    pub fn min_component(&self) -> f64 {
        self.a.min(self.b).min(self.c).min(self.d)
    }

    /// Zero-minimum normalization
    ///
    /// Subtracts the minimum component from all four so at least one is zero.
    #[inline]
    pub fn normalized(self) -> Self {
        let m = self.min_component();
        Self::new(self.a - m, self.b - m, self.c - m, self.d - m)
    }

    /// Raw component-wise sum
    #[inline]
    pub fn add(self, other: Self) -> Self {
        self + other
    }

    /// Component-wise sum in normalized form
    #[inline]
    pub fn add_normalized(self, other: Self) -> Self {
        (self + other).normalized()
    }

    /// Raw component-wise difference (keeps sign, used for distances)
    #[inline]
    pub fn subtract(self, other: Self) -> Self {
        self - other
    }

    /// Multiply every component by a scalar
    #[inline]
    pub fn scale(self, scalar: f64) -> Self {
        self * scalar
    }

    /// Quadray vector length: sqrt((a² + b² + c² + d²) / 2)
    #[inline]
    pub fn length(self) -> f64 {
        debug_assert!(self.is_finite(), "non-finite Quadray {:?}", self);
        ((self.a * self.a + self.b * self.b + self.c * self.c + self.d * self.d) / 2.0).sqrt()
    }

    /// Distance between two points: the length of their raw difference
    #[inline]
    pub fn distance(p: Self, q: Self) -> f64 {
        (p - q).length()
    }

    /// Distance from this point to another
    #[inline]
    pub fn distance_to(self, other: Self) -> f64 {
        Self::distance(self, other)
    }

    /// Compare normalized forms component-wise within `epsilon`
    pub fn equals(self, other: Self, epsilon: f64) -> bool {
        let n1 = self.normalized();
        let n2 = other.normalized();
        (n1.a - n2.a).abs() < epsilon
            && (n1.b - n2.b).abs() < epsilon
            && (n1.c - n2.c).abs() < epsilon
            && (n1.d - n2.d).abs() < epsilon
    }

    /// Convert to Cartesian coordinates
    ///
    /// Maps each basis vector onto one vertex of a tetrahedron, scaled by 1/√2.
    pub fn to_cartesian(self) -> Vec3 {
        let s = 1.0 / ROOT2;
        Vec3::new(
            s * (self.a - self.b - self.c + self.d),
            s * (self.a - self.b + self.c - self.d),
            s * (self.a + self.b - self.c - self.d),
        )
    }

    /// Convert from Cartesian coordinates, returning the normalized Quadray
    pub fn from_cartesian(v: Vec3) -> Self {
        debug_assert!(
            v.x.is_finite() && v.y.is_finite() && v.z.is_finite(),
            "non-finite Cartesian input {:?}",
            v
        );
        let s = 1.0 / ROOT2;
        let (px, nx) = (v.x.max(0.0), (-v.x).max(0.0));
        let (py, ny) = (v.y.max(0.0), (-v.y).max(0.0));
        let (pz, nz) = (v.z.max(0.0), (-v.z).max(0.0));
        Self::new(
            s * (px + py + pz),
            s * (nx + ny + pz),
            s * (nx + py + nz),
            s * (px + ny + nz),
        )
        .normalized()
    }

    /// Component-wise floor (the lattice cell containing this point)
    #[inline]
    pub fn floor(self) -> Self {
        Self::new(self.a.floor(), self.b.floor(), self.c.floor(), self.d.floor())
    }

    /// Linear interpolation of all four components
    #[inline]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }

    /// Integer-rounded normalized key for maps and sets
    pub fn lattice_key(self) -> [i64; 4] {
        let n = self.normalized();
        [
            n.a.round() as i64,
            n.b.round() as i64,
            n.c.round() as i64,
            n.d.round() as i64,
        ]
    }

    /// True when all four components are finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite() && self.d.is_finite()
    }
}

impl fmt::Display for Quadray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2}, {:.2})", self.a, self.b, self.c, self.d)
    }
}

// Operator overloads

impl std::ops::Add for Quadray {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(
            self.a + other.a,
            self.b + other.b,
            self.c + other.c,
            self.d + other.d,
        )
    }
}

impl std::ops::AddAssign for Quadray {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.a += other.a;
        self.b += other.b;
        self.c += other.c;
        self.d += other.d;
    }
}

impl std::ops::Sub for Quadray {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(
            self.a - other.a,
            self.b - other.b,
            self.c - other.c,
            self.d - other.d,
        )
    }
}

impl std::ops::Mul<f64> for Quadray {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Self::new(
            self.a * scalar,
            self.b * scalar,
            self.c * scalar,
            self.d * scalar,
        )
    }
}

impl std::ops::Neg for Quadray {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.a, -self.b, -self.c, -self.d)
    }
}
