//! Constant Infinite Area Light Source

use base::geometry::*;
use base::interaction::*;
use base::light::*;
use base::pbrt::*;
use base::sampling::*;
use base::scene::*;
use base::spectrum::*;
use std::sync::{PoisonError, RwLock};

/// Implements an infinitely far away area light source that surrounds the
/// scene with constant radiance.
pub struct ConstantInfiniteLight {
    /// Emitted radiance.
    pub l_emit: Spectrum,

    /// Bounding sphere of the scene, set in `preprocess()`.
    world_sphere: RwLock<(Point3f, Float)>,
}

impl ConstantInfiniteLight {
    /// Returns a new `ConstantInfiniteLight`.
    ///
    /// * `l_emit` - Emitted radiance.
    pub fn new(l_emit: Spectrum) -> Self {
        Self {
            l_emit,
            world_sphere: RwLock::new((Point3f::ZERO, 1.0)),
        }
    }

    /// Returns the radius of the scene's bounding sphere.
    pub fn world_radius(&self) -> Float {
        self.world_sphere.read().unwrap_or_else(PoisonError::into_inner).1
    }
}

impl Light for ConstantInfiniteLight {
    fn preprocess(&self, scene: &Scene) {
        let (center, radius) = scene.world_bound.bounding_sphere();
        debug!("Infinite light world sphere: {center:?}, radius {radius}");
        *self.world_sphere.write().unwrap_or_else(PoisonError::into_inner) = (center, max(radius, 1.0));
    }

    fn get_type(&self) -> LightType {
        LightType::INFINITE
    }

    /// Return the radiance arriving at an interaction point from a uniformly
    /// sampled direction.
    ///
    /// * `hit` - The interaction hit point.
    /// * `u`   - Sample value for Monte Carlo integration.
    fn sample_li(&self, hit: &Hit, u: &Point2f) -> Li {
        let wi = uniform_sample_sphere(u);
        let p1 = Hit::new_minimal(hit.p + wi * (2.0 * self.world_radius()), hit.time);
        Li::new(wi, uniform_sphere_pdf(), Some(VisibilityTester::new(*hit, p1)), self.l_emit)
    }

    fn power(&self) -> Spectrum {
        let world_radius = self.world_radius();
        self.l_emit * (PI * world_radius * world_radius)
    }

    /// Rays that escape the scene see the constant radiance.
    fn le(&self, _ray: &Ray) -> Spectrum {
        self.l_emit
    }

    fn pdf_li(&self, _hit: &Hit, _wi: &Vector3f) -> Float {
        uniform_sphere_pdf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base::primitive::*;
    use float_cmp::*;
    use shapes::*;
    use std::sync::Arc;

    #[test]
    fn preprocess_records_scene_radius() {
        let light = Arc::new(ConstantInfiniteLight::new(Spectrum::new(0.5)));
        let sphere = Arc::new(Sphere::new(Point3f::ZERO, 10.0, false));
        let prim: ArcPrimitive = Arc::new(GeometricPrimitive::new(sphere, None, None));
        let scene = Scene::new(Arc::new(PrimitiveList::new(vec![prim])), vec![light.clone() as ArcLight]);
        assert_eq!(scene.infinite_lights.len(), 1);
        assert!(approx_eq!(f32, light.world_radius(), 300.0_f32.sqrt(), epsilon = 1e-3));
    }

    #[test]
    fn escaping_rays_see_constant_radiance() {
        let light = ConstantInfiniteLight::new(Spectrum::new(0.5));
        let ray = Ray::new(Point3f::ZERO, Vector3f::new(0.0, 1.0, 0.0), INFINITY, 0.0);
        assert_eq!(light.le(&ray), Spectrum::new(0.5));
        let hit = Hit::new_minimal(Point3f::ZERO, 0.0);
        let li = light.sample_li(&hit, &Point2f::new(0.1, 0.9));
        assert_eq!(li.pdf, light.pdf_li(&hit, &li.wi));
        assert!(!light.is_delta_light());
    }
}
