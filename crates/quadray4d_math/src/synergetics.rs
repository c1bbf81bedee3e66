//! Synergetics constants and geometric checks
//!
//! Fuller's IVM constants (scaling factors, the tetrahedral angle, tetravolume
//! ratios) together with the metric helpers and the verification suite used to
//! confirm that the Quadray mapping reproduces tetrahedral geometry.

use std::fmt;

use crate::Quadray;

/// √2
pub const ROOT2: f64 = std::f64::consts::SQRT_2;

/// √(9/8), the XYZ to IVM volume conversion factor
pub const S3: f64 = 1.060_660_171_779_821_2;

/// Angle in degrees between any two distinct basis vectors
pub const TETRAHEDRAL_ANGLE: f64 = 109.4712;

/// Quadray length of a unit basis vector (1/√2)
pub const BASIS_LENGTH: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Tetravolume of the unit tetrahedron
pub const TETRA_VOL: u32 = 1;
/// Tetravolume of the octahedron
pub const OCTA_VOL: u32 = 4;
/// Tetravolume of the cuboctahedron (vector equilibrium)
pub const CUBO_VOL: u32 = 20;
/// Tetravolume of the rhombic dodecahedron
pub const RHOMBIC_DODECA_VOL: u32 = 6;
/// Tetravolume of the icosahedron (~5√2 φ²)
pub const ICOSA_VOL: f64 = 18.512_296;

/// Golden ratio
pub const PHI: f64 = 1.618_033_988_749_895;

/// Touching neighbours of a sphere in closest packing
pub const KISSING_NUMBER: usize = 12;

/// Convert an XYZ cubic volume to IVM tetravolumes
#[inline]
pub fn volume_xyz_to_ivm(xyz_volume: f64) -> f64 {
    xyz_volume * S3
}

/// Convert IVM tetravolumes to an XYZ cubic volume
#[inline]
pub fn volume_ivm_to_xyz(ivm_volume: f64) -> f64 {
    ivm_volume / S3
}

/// Angle between two Quadray vectors in degrees
///
/// Returns 0 when either vector is zero.
pub fn angle_between(q1: Quadray, q2: Quadray) -> f64 {
    let v1 = q1.to_cartesian();
    let v2 = q2.to_cartesian();
    let mag1 = v1.length();
    let mag2 = v2.length();
    if mag1 == 0.0 || mag2 == 0.0 {
        return 0.0;
    }
    let cos_angle = (v1.dot(v2) / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// Manhattan distance over the four raw components
pub fn manhattan_4d(q1: Quadray, q2: Quadray) -> f64 {
    (q1.a - q2.a).abs() + (q1.b - q2.b).abs() + (q1.c - q2.c).abs() + (q1.d - q2.d).abs()
}

/// Four-component Euclidean distance on raw components (not via Cartesian)
pub fn euclidean_4d(q1: Quadray, q2: Quadray) -> f64 {
    let (da, db, dc, dd) = (q1.a - q2.a, q1.b - q2.b, q1.c - q2.c, q1.d - q2.d);
    (da * da + db * db + dc * dc + dd * dd).sqrt()
}

/// Counting helpers for a frequency-`f` IVM tetrahedron
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IvmGrid {
    pub frequency: u32,
}

impl IvmGrid {
    /// Create a grid description of the given frequency
    pub fn new(frequency: u32) -> Self {
        Self { frequency }
    }

    /// (f+1)(f+2)(f+3)/6
    pub fn vertex_count(&self) -> u64 {
        let f = self.frequency as u64;
        (f + 1) * (f + 2) * (f + 3) / 6
    }

    /// f³
    pub fn tetra_count(&self) -> u64 {
        (self.frequency as u64).pow(3)
    }

    /// f(f-1)(f-2)/6, zero below frequency 3
    pub fn octa_count(&self) -> u64 {
        let f = self.frequency as u64;
        if f < 3 {
            return 0;
        }
        f * (f - 1) * (f - 2) / 6
    }

    /// Edge length at this frequency
    pub fn edge_length(&self) -> f64 {
        1.0 / self.frequency as f64
    }

    /// Tetravolume of one small tetrahedron: edge³
    pub fn volume_tetra(&self) -> f64 {
        self.edge_length().powi(3)
    }

    /// Tetravolume of one small octahedron: four small tetrahedra
    pub fn volume_octa(&self) -> f64 {
        OCTA_VOL as f64 * self.volume_tetra()
    }
}

/// One named stage of the Jitterbug
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JitterbugPhase {
    pub name: &'static str,
    /// Face rotation in degrees
    pub angle: f64,
    /// Enclosed tetravolume
    pub volume: f64,
}

/// Fuller's Jitterbug: the vector equilibrium contracting through the
/// icosahedron to the octahedron as its triangular faces rotate
pub struct Jitterbug;

impl Jitterbug {
    /// Fully open: the cuboctahedron
    pub const VE_ANGLE: f64 = 0.0;
    /// Icosahedral intermediate
    pub const ICOSA_ANGLE: f64 = 10.8123;
    /// Fully closed: the octahedron
    pub const OCTA_ANGLE: f64 = 30.0;

    pub const VE_VOLUME: f64 = CUBO_VOL as f64;
    pub const ICOSA_VOLUME: f64 = ICOSA_VOL;
    pub const OCTA_VOLUME: f64 = OCTA_VOL as f64;

    /// Approximate volume at a face rotation of `theta` degrees
    ///
    /// Piecewise linear through the three phases, clamped to the VE volume at
    /// or below 0° and to the octahedron at or above 30°.
    pub fn volume_at_angle(theta: f64) -> f64 {
        if theta <= Self::VE_ANGLE {
            Self::VE_VOLUME
        } else if theta >= Self::OCTA_ANGLE {
            Self::OCTA_VOLUME
        } else if theta <= Self::ICOSA_ANGLE {
            let t = theta / Self::ICOSA_ANGLE;
            Self::VE_VOLUME + t * (Self::ICOSA_VOLUME - Self::VE_VOLUME)
        } else {
            let t = (theta - Self::ICOSA_ANGLE) / (Self::OCTA_ANGLE - Self::ICOSA_ANGLE);
            Self::ICOSA_VOLUME + t * (Self::OCTA_VOLUME - Self::ICOSA_VOLUME)
        }
    }

    /// The three canonical phases, open to closed
    pub fn phases() -> [JitterbugPhase; 3] {
        [
            JitterbugPhase {
                name: "VE (Cuboctahedron)",
                angle: Self::VE_ANGLE,
                volume: Self::VE_VOLUME,
            },
            JitterbugPhase {
                name: "Icosahedron",
                angle: Self::ICOSA_ANGLE,
                volume: Self::ICOSA_VOLUME,
            },
            JitterbugPhase {
                name: "Octahedron",
                angle: Self::OCTA_ANGLE,
                volume: Self::OCTA_VOLUME,
            },
        ]
    }
}

/// Outcome of one geometric check
#[derive(Clone, Debug)]
pub struct CheckResult {
    pub name: &'static str,
    pub expected: String,
    pub actual: String,
    pub passed: bool,
}

/// Results of [`verify_geometric_identities`]
#[derive(Clone, Debug, Default)]
pub struct VerificationReport {
    pub checks: Vec<CheckResult>,
}

impl VerificationReport {
    /// True when every check passed
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Number of passing checks
    pub fn pass_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Synergetics verification")?;
        for check in &self.checks {
            let mark = if check.passed { "ok  " } else { "FAIL" };
            writeln!(f, "  [{}] {}: expected {}, got {}", mark, check.name, check.expected, check.actual)?;
        }
        write!(f, "{}/{} passed", self.pass_count(), self.checks.len())
    }
}

/// Check Quadray -> Cartesian -> Quadray fidelity for one point
pub fn verify_round_trip(q: Quadray, tolerance: f64) -> CheckResult {
    let recovered = Quadray::from_cartesian(q.to_cartesian());
    let error = Quadray::distance(q.normalized(), recovered);
    CheckResult {
        name: "Round-Trip",
        expected: format!("error < {}", tolerance),
        actual: format!("error={:.6}", error),
        passed: error < tolerance,
    }
}

/// Run the eight Synergetics geometry checks
///
/// 1. basis lengths ≈ 0.7071
/// 2. all six basis pairs at the tetrahedral angle (±1°)
/// 3. origin maps to Cartesian origin
/// 4. round-trip conversion for six sample points
/// 5. distance symmetry
/// 6. triangle inequality
/// 7. S3 = √(9/8)
/// 8. tetra:octa:cubo = 1:4:20
pub fn verify_geometric_identities(tolerance: f64) -> VerificationReport {
    let mut report = VerificationReport::default();

    let lengths: Vec<f64> = Quadray::BASIS.iter().map(|b| b.length()).collect();
    report.checks.push(CheckResult {
        name: "Basis Vector Lengths",
        expected: format!("{:.4}", BASIS_LENGTH),
        actual: format!("{:.4?}", lengths),
        passed: lengths.iter().all(|l| (l - BASIS_LENGTH).abs() < tolerance),
    });

    let mut angles = Vec::with_capacity(6);
    for i in 0..4 {
        for j in (i + 1)..4 {
            angles.push(angle_between(Quadray::BASIS[i], Quadray::BASIS[j]));
        }
    }
    report.checks.push(CheckResult {
        name: "Tetrahedral Symmetry",
        expected: format!("{:.2}", TETRAHEDRAL_ANGLE),
        actual: format!("{:.2?}", angles),
        passed: angles.iter().all(|a| (a - TETRAHEDRAL_ANGLE).abs() < 1.0),
    });

    let origin = Quadray::ORIGIN.to_cartesian();
    report.checks.push(CheckResult {
        name: "Origin Identity",
        expected: "(0, 0, 0)".to_string(),
        actual: format!("({:.4}, {:.4}, {:.4})", origin.x, origin.y, origin.z),
        passed: [origin.x, origin.y, origin.z].iter().all(|v| v.abs() < tolerance),
    });

    let samples = [
        Quadray::A,
        Quadray::B,
        Quadray::C,
        Quadray::D,
        Quadray::new(2.0, 1.0, 0.0, 1.0),
        Quadray::new(3.0, 2.0, 1.0, 0.0),
    ];
    let round_trips: Vec<CheckResult> = samples
        .iter()
        .map(|q| verify_round_trip(*q, tolerance))
        .collect();
    report.checks.push(CheckResult {
        name: "Round-Trip Conversion",
        expected: format!("all errors < {}", tolerance),
        actual: round_trips
            .iter()
            .map(|r| r.actual.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        passed: round_trips.iter().all(|r| r.passed),
    });

    let d1 = Quadray::distance(Quadray::A, Quadray::B);
    let d2 = Quadray::distance(Quadray::B, Quadray::A);
    report.checks.push(CheckResult {
        name: "Distance Symmetry",
        expected: "d1 == d2".to_string(),
        actual: format!("d1={:.6}, d2={:.6}", d1, d2),
        passed: (d1 - d2).abs() < 1e-4,
    });

    let ab = Quadray::distance(Quadray::A, Quadray::B);
    let bc = Quadray::distance(Quadray::B, Quadray::C);
    let ac = Quadray::distance(Quadray::A, Quadray::C);
    report.checks.push(CheckResult {
        name: "Triangle Inequality",
        expected: format!("{:.4} + {:.4} >= {:.4}", ab, bc, ac),
        actual: format!("{:.4} >= {:.4}", ab + bc, ac),
        passed: ab + bc >= ac - tolerance,
    });

    let expected_s3 = (9.0f64 / 8.0).sqrt();
    report.checks.push(CheckResult {
        name: "S3 Constant",
        expected: format!("{:.6}", expected_s3),
        actual: format!("{:.6}", S3),
        passed: (S3 - expected_s3).abs() < 1e-4,
    });

    report.checks.push(CheckResult {
        name: "Volume Ratios",
        expected: "1:4:20".to_string(),
        actual: format!("{}:{}:{}", TETRA_VOL, OCTA_VOL, CUBO_VOL),
        passed: OCTA_VOL / TETRA_VOL == 4 && CUBO_VOL / TETRA_VOL == 20,
    });

    for check in report.checks.iter().filter(|c| !c.passed) {
        log::debug!("Verification check '{}' failed: {}", check.name, check.actual);
    }
    log::info!(
        "Synergetics verification: {}/{} passed",
        report.pass_count(),
        report.checks.len()
    );
    report
}
