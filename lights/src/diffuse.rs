//! Diffuse Area Light Source

use base::geometry::*;
use base::interaction::*;
use base::light::*;
use base::pbrt::*;
use base::shape::*;
use base::spectrum::*;
use std::sync::Arc;

/// Implements a basic area light source with uniform spatial and directional
/// radiance distribution.
#[derive(Clone)]
pub struct DiffuseAreaLight {
    /// Used to trace multiple shadow rays to the light to compute soft shadows.
    pub n_samples: usize,

    /// Emitted radiance.
    pub l_emit: Spectrum,

    /// Shape describing surface of the light source.
    pub shape: ArcShape,

    /// Surface area of the shape.
    pub area: Float,

    /// Indicates whether light source 2-sided.
    pub two_sided: bool,
}

impl DiffuseAreaLight {
    /// Returns a new `DiffuseAreaLight`.
    ///
    /// * `l_emit`    - Emitted radiance.
    /// * `n_samples` - Used to trace multiple shadow rays to the light to
    ///                 compute soft shadows. Clamped to at least 1.
    /// * `shape`     - Shape describing surface of the light source.
    /// * `two_sided` - Indicates whether light source 2-sided.
    pub fn new(l_emit: Spectrum, n_samples: usize, shape: ArcShape, two_sided: bool) -> Self {
        let area = shape.area();
        Self {
            l_emit,
            n_samples: max(n_samples, 1),
            shape: Arc::clone(&shape),
            area,
            two_sided,
        }
    }
}

impl AreaLight for DiffuseAreaLight {
    /// Returns emitted radiance based on `two_sided` flag.
    ///
    /// * `hit` - The interaction point.
    /// * `w`   - Direction.
    fn l(&self, hit: &Hit, w: &Vector3f) -> Spectrum {
        if self.two_sided || hit.n.dot(w) > 0.0 {
            self.l_emit
        } else {
            Spectrum::ZERO
        }
    }
}

impl Light for DiffuseAreaLight {
    fn get_type(&self) -> LightType {
        LightType::AREA
    }

    /// Return the radiance arriving at an interaction point.
    ///
    /// * `hit` - The interaction hit point.
    /// * `u`   - Sample value for Monte Carlo integration.
    fn sample_li(&self, hit: &Hit, u: &Point2f) -> Li {
        let (p_shape_hit, pdf) = self.shape.sample_solid_angle(hit, u);

        let wi = p_shape_hit.p - hit.p;
        if pdf == 0.0 || wi.length_squared() == 0.0 {
            Li::zero()
        } else {
            let wi = wi.normalize();
            let visibility = VisibilityTester::new(*hit, p_shape_hit);
            let value = self.l(&p_shape_hit, &(-wi));
            Li::new(wi, pdf, Some(visibility), value)
        }
    }

    fn power(&self) -> Spectrum {
        let sides = if self.two_sided { 2.0 } else { 1.0 };
        self.l_emit * (sides * self.area * PI)
    }

    /// Returns the probability density with respect to solid angle for the light’s
    /// `sample_li()`.
    ///
    /// * `hit` - The interaction hit point.
    /// * `wi`  - The incident direction.
    fn pdf_li(&self, hit: &Hit, wi: &Vector3f) -> Float {
        self.shape.pdf_solid_angle(hit, wi)
    }

    fn get_num_samples(&self) -> usize {
        self.n_samples
    }
}
