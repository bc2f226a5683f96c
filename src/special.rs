//! Special functions backing the density and mass evaluations in
//! [`crate::distributions`].

/// 1/√(2π) ≈ 0.3989422804014327
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Standard normal density φ(z) = exp(−z²/2) / √(2π).
///
/// # Examples
/// ```
/// use u_sampling::special::standard_normal_pdf;
/// assert!((standard_normal_pdf(0.0) - 0.3989422804014327).abs() < 1e-15);
/// ```
pub fn standard_normal_pdf(z: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * z * z).exp()
}

/// Lanczos approximation of ln Γ(x) for x > 0 (g = 7, n = 9).
///
/// Values below 0.5 go through the reflection formula
/// Γ(x)Γ(1−x) = π / sin(πx).
///
/// Reference: Lanczos (1964), "A Precision Approximation of the Gamma
/// Function", *SIAM Journal on Numerical Analysis* 1(1).
///
/// # Accuracy
/// Relative error < 2 × 10⁻¹⁰ for x > 0.
///
/// # Examples
/// ```
/// use u_sampling::special::ln_gamma;
/// // Γ(5) = 24
/// assert!((ln_gamma(5.0) - 24.0_f64.ln()).abs() < 1e-10);
/// ```
pub fn ln_gamma(x: f64) -> f64 {
    #[allow(clippy::excessive_precision)]
    const LANCZOS: [f64; 9] = [
        0.99999999999980993,
        676.5203681218851,
        -1259.1392167224028,
        771.32342877765313,
        -176.61502916214059,
        12.507343278686905,
        -0.13857109526572012,
        9.9843695780195716e-6,
        1.5056327351493116e-7,
    ];
    const G: f64 = 7.0;
    use std::f64::consts::PI;

    if x < 0.5 {
        return (PI / (PI * x).sin()).ln() - ln_gamma(1.0 - x);
    }

    let z = x - 1.0;
    let series = LANCZOS[1..]
        .iter()
        .enumerate()
        .fold(LANCZOS[0], |acc, (i, &c)| acc + c / (z + (i + 1) as f64));
    let t = z + G + 0.5;
    0.5 * (2.0 * PI).ln() + (z + 0.5) * t.ln() - t + series.ln()
}

/// ln(k!) for a non-negative integer `k`.
///
/// Exact summation for small `k`, [`ln_gamma`] beyond that.
pub fn ln_factorial(k: u64) -> f64 {
    if k < 2 {
        return 0.0;
    }
    if k <= 20 {
        return (2..=k).map(|i| (i as f64).ln()).sum();
    }
    ln_gamma(k as f64 + 1.0)
}

/// ln C(n, k), the log binomial coefficient. Returns `-∞` when `k > n`.
///
/// # Examples
/// ```
/// use u_sampling::special::ln_choose;
/// assert!((ln_choose(10, 5) - 252.0_f64.ln()).abs() < 1e-10);
/// ```
pub fn ln_choose(n: u64, k: u64) -> f64 {
    if k > n {
        return f64::NEG_INFINITY;
    }
    ln_factorial(n) - ln_factorial(k) - ln_factorial(n - k)
}
