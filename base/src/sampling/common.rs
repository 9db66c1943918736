//! Common sampling functions.

use crate::geometry::*;
use crate::pbrt::*;
use crate::rng::*;

/// Returns stratified samples in `[0, 1)` for a 1D pattern.
///
/// * `rng`       - Random number generator.
/// * `n_samples` - Number of samples.
/// * `jitter`    - Jitter the samples inside each stratum.
pub fn stratified_sample_1d(rng: &mut RNG, n_samples: usize, jitter: bool) -> Vec<Float> {
    let inv_n_samples = 1.0 / n_samples as Float;

    (0..n_samples)
        .map(|i| {
            let delta = if jitter { rng.uniform_float() } else { 0.5 };
            min((i as Float + delta) * inv_n_samples, ONE_MINUS_EPSILON)
        })
        .collect()
}

/// Returns stratified samples in `[0, 1)^2` for an `nx` by `ny` grid.
///
/// * `rng`    - Random number generator.
/// * `nx`     - Number of strata in x.
/// * `ny`     - Number of strata in y.
/// * `jitter` - Jitter the samples inside each stratum.
pub fn stratified_sample_2d(rng: &mut RNG, nx: usize, ny: usize, jitter: bool) -> Vec<Point2f> {
    let dx = 1.0 / nx as Float;
    let dy = 1.0 / ny as Float;

    let mut samples = Vec::with_capacity(nx * ny);
    for y in 0..ny {
        for x in 0..nx {
            let jx = if jitter { rng.uniform_float() } else { 0.5 };
            let jy = if jitter { rng.uniform_float() } else { 0.5 };
            samples.push(Point2f::new(
                min((x as Float + jx) * dx, ONE_MINUS_EPSILON),
                min((y as Float + jy) * dy, ONE_MINUS_EPSILON),
            ));
        }
    }
    samples
}

/// Returns `n_samples` Latin hypercube samples in `[0, 1)^2`: each axis is
/// stratified independently and the strata are randomly paired.
///
/// * `rng`       - Random number generator.
/// * `n_samples` - Number of samples.
pub fn latin_hypercube_2d(rng: &mut RNG, n_samples: usize) -> Vec<Point2f> {
    let mut xs = stratified_sample_1d(rng, n_samples, true);
    let mut ys = stratified_sample_1d(rng, n_samples, true);
    rng.shuffle(&mut xs);
    rng.shuffle(&mut ys);
    xs.into_iter().zip(ys).map(|(x, y)| Point2f::new(x, y)).collect()
}

/// Uniformly sample a direction on the unit sphere.
///
/// * `u` - The random sample point.
pub fn uniform_sample_sphere(u: &Point2f) -> Vector3f {
    let z = 1.0 - 2.0 * u[0];
    let r = max(0.0, 1.0 - z * z).sqrt();
    let phi = TWO_PI * u[1];
    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

/// Returns the PDF for uniformly sampling a direction on the unit sphere.
#[inline]
pub fn uniform_sphere_pdf() -> Float {
    INV_FOUR_PI
}

/// Uniformly sample a direction on the hemisphere around +z.
///
/// * `u` - The random sample point.
pub fn uniform_sample_hemisphere(u: &Point2f) -> Vector3f {
    let z = u[0];
    let r = max(0.0, 1.0 - z * z).sqrt();
    let phi = TWO_PI * u[1];
    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

/// Returns the PDF for uniformly sampling the hemisphere.
#[inline]
pub fn uniform_hemisphere_pdf() -> Float {
    INV_TWO_PI
}

/// Maps a sample in `[0, 1)^2` to the unit disk with Shirley's concentric
/// mapping.
///
/// * `u` - The random sample point.
pub fn concentric_sample_disk(u: &Point2f) -> Point2f {
    // Map uniform random numbers to [-1,1]^2.
    let ox = 2.0 * u.x - 1.0;
    let oy = 2.0 * u.y - 1.0;

    // Handle degeneracy at the origin.
    if ox == 0.0 && oy == 0.0 {
        return Point2f::ZERO;
    }

    let (r, theta) = if abs(ox) > abs(oy) {
        (ox, PI_OVER_FOUR * (oy / ox))
    } else {
        (oy, PI_OVER_TWO - PI_OVER_FOUR * (ox / oy))
    };

    Point2f::new(r * theta.cos(), r * theta.sin())
}

/// Uniformly sample a direction inside a cone around +z.
///
/// * `u`             - The random sample point.
/// * `cos_theta_max` - Cosine of the cone's half angle.
pub fn uniform_sample_cone(u: &Point2f, cos_theta_max: Float) -> Vector3f {
    let cos_theta = (1.0 - u[0]) + u[0] * cos_theta_max;
    let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
    let phi = u[1] * TWO_PI;
    Vector3f::new(phi.cos() * sin_theta, phi.sin() * sin_theta, cos_theta)
}

/// Returns the PDF for uniformly sampling a cone.
///
/// * `cos_theta_max` - Cosine of the cone's half angle.
#[inline]
pub fn uniform_cone_pdf(cos_theta_max: Float) -> Float {
    1.0 / (TWO_PI * (1.0 - cos_theta_max))
}

/// Cosine-weighted sample of the hemisphere around +z.
///
/// * `u` - The random sample point.
#[inline]
pub fn cosine_sample_hemisphere(u: &Point2f) -> Vector3f {
    let d = concentric_sample_disk(u);
    let z = max(0.0, 1.0 - d.x * d.x - d.y * d.y).sqrt();
    Vector3f::new(d.x, d.y, z)
}

/// Returns the PDF for cosine-weighted hemisphere sampling.
///
/// * `cos_theta` - Cosine of the angle with +z.
#[inline]
pub fn cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    cos_theta * INV_PI
}

/// MIS weight for strategy `f` using the balance heuristic. Returns 0 when
/// neither strategy can generate the sample.
///
/// * `nf`    - Number of samples taken with strategy `f`.
/// * `f_pdf` - Density of strategy `f` for the sample.
/// * `ng`    - Number of samples taken with strategy `g`.
/// * `g_pdf` - Density of strategy `g` for the sample.
#[inline]
pub fn balance_heuristic(nf: Int, f_pdf: Float, ng: Int, g_pdf: Float) -> Float {
    let f = nf as Float * f_pdf;
    let g = ng as Float * g_pdf;
    let m = max(f, g);
    if m == 0.0 {
        return 0.0;
    }
    let (f, g) = (f / m, g / m);
    f / (f + g)
}

/// MIS weight for strategy `f` using the power heuristic with exponent 2.
/// Returns 0 when neither strategy can generate the sample.
///
/// * `nf`    - Number of samples taken with strategy `f`.
/// * `f_pdf` - Density of strategy `f` for the sample.
/// * `ng`    - Number of samples taken with strategy `g`.
/// * `g_pdf` - Density of strategy `g` for the sample.
#[inline]
pub fn power_heuristic(nf: Int, f_pdf: Float, ng: Int, g_pdf: Float) -> Float {
    let f = nf as Float * f_pdf;
    let g = ng as Float * g_pdf;
    let m = max(f, g);
    if m == 0.0 {
        return 0.0;
    }

    // Scale the larger term to 1 so squaring cannot overflow.
    let (f, g) = (f / m, g / m);
    (f * f) / (f * f + g * g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn power_heuristic_both_zero_is_zero() {
        assert_eq!(power_heuristic(1, 0.0, 1, 0.0), 0.0);
        assert_eq!(balance_heuristic(1, 0.0, 1, 0.0), 0.0);
    }

    #[test]
    fn power_heuristic_one_sided() {
        assert_eq!(power_heuristic(1, 2.0, 1, 0.0), 1.0);
        assert_eq!(power_heuristic(1, 0.0, 1, 2.0), 0.0);
    }

    #[test]
    fn power_heuristic_extreme_ratio() {
        let w = power_heuristic(1, 1e-20, 1, 1e18);
        assert!(w.is_finite());
        assert!((0.0..=1.0).contains(&w));
    }

    #[test]
    fn power_heuristic_survives_huge_densities() {
        assert_eq!(power_heuristic(1, 1e20, 1, 1.0), 1.0);
        assert!(power_heuristic(1, 1.0, 1, 1e20) < 1e-30);
        assert!(approx_eq!(f32, power_heuristic(4, 1e37, 4, 1e37), 0.5, epsilon = 1e-6));
        assert!(approx_eq!(f32, balance_heuristic(1, 3e38, 1, 3e38), 0.5, epsilon = 1e-6));
    }

    #[test]
    fn concentric_sample_disk_center() {
        assert_eq!(concentric_sample_disk(&Point2f::new(0.5, 0.5)), Point2f::ZERO);
    }

    #[test]
    fn stratified_2d_covers_every_stratum() {
        let mut rng = RNG::new(0);
        let samples = stratified_sample_2d(&mut rng, 4, 3, true);
        assert_eq!(samples.len(), 12);
        for (i, s) in samples.iter().enumerate() {
            let (x, y) = (i % 4, i / 4);
            assert_eq!((s.x * 4.0).floor() as usize, x);
            assert_eq!((s.y * 3.0).floor() as usize, y);
        }
    }

    #[test]
    fn latin_hypercube_stratifies_each_axis() {
        let mut rng = RNG::new(11);
        let n = 8;
        let samples = latin_hypercube_2d(&mut rng, n);
        let mut xs: Vec<usize> = samples.iter().map(|s| (s.x * n as Float) as usize).collect();
        let mut ys: Vec<usize> = samples.iter().map(|s| (s.y * n as Float) as usize).collect();
        xs.sort();
        ys.sort();
        assert_eq!(xs, (0..n).collect::<Vec<_>>());
        assert_eq!(ys, (0..n).collect::<Vec<_>>());
    }

    proptest! {
        #[test]
        fn power_heuristic_weights_are_complementary(
            nf in 1..8i32, f_pdf in 1e-3..1e3f32,
            ng in 1..8i32, g_pdf in 1e-3..1e3f32,
        ) {
            let w = power_heuristic(nf, f_pdf, ng, g_pdf) + power_heuristic(ng, g_pdf, nf, f_pdf);
            prop_assert!(approx_eq!(f32, w, 1.0, epsilon = 1e-5));
        }

        #[test]
        fn power_heuristic_complementary_across_magnitudes(a in -30.0..30.0f32, b in -30.0..30.0f32) {
            let (f_pdf, g_pdf) = (10.0f32.powf(a), 10.0f32.powf(b));
            let wf = power_heuristic(1, f_pdf, 1, g_pdf);
            let wg = power_heuristic(1, g_pdf, 1, f_pdf);
            prop_assert!(wf.is_finite() && wg.is_finite());
            prop_assert!(approx_eq!(f32, wf + wg, 1.0, epsilon = 1e-5));
        }

        #[test]
        fn power_heuristic_in_unit_interval(f_pdf in 0.0..1e4f32, g_pdf in 0.0..1e4f32) {
            let w = power_heuristic(1, f_pdf, 1, g_pdf);
            prop_assert!((0.0..=1.0).contains(&w));
        }

        #[test]
        fn cosine_samples_lie_in_upper_hemisphere(x in 0.0..1.0f32, y in 0.0..1.0f32) {
            let w = cosine_sample_hemisphere(&Point2f::new(x, y));
            prop_assert!(w.z >= 0.0);
            prop_assert!((w.length() - 1.0).abs() < 1e-4);
        }

        #[test]
        fn cone_samples_stay_inside_cone(x in 0.0..1.0f32, y in 0.0..1.0f32, c in 0.0..0.99f32) {
            let w = uniform_sample_cone(&Point2f::new(x, y), c);
            prop_assert!(w.z >= c - 1e-5);
        }
    }
}
