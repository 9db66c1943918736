//! Shapes

use crate::geometry::*;
use crate::interaction::*;
use crate::pbrt::*;
use std::sync::Arc;

/// Shape interface. Shapes are defined directly in world space.
pub trait Shape {
    /// Returns the name of the shape.
    fn get_type(&self) -> &'static str;

    /// Returns a bounding box in world space.
    fn world_bound(&self) -> Bounds3f;

    /// Returns geometric details if a ray intersects the shape. The returned
    /// interaction has no primitive attached.
    ///
    /// * `r` - The ray.
    fn intersect<'scene>(&self, r: &Ray) -> Option<Intersection<'scene>>;

    /// Returns `true` if a ray intersects the shape.
    ///
    /// * `r` - The ray.
    fn intersect_p(&self, r: &Ray) -> bool {
        self.intersect(r).is_some()
    }

    /// Returns the surface area of the shape.
    fn area(&self) -> Float;

    /// Sample a point on the surface uniformly by area and return it with
    /// the PDF with respect to area.
    ///
    /// * `u` - Sample value to use.
    fn sample_area(&self, u: &Point2f) -> (Hit, Float);

    /// Sample a point on the shape as seen from a reference point and return
    /// it with the PDF with respect to solid angle.
    ///
    /// * `hit` - Reference point.
    /// * `u`   - Sample value to use.
    fn sample_solid_angle(&self, hit: &Hit, u: &Point2f) -> (Hit, Float) {
        sample_solid_angle_by_area(self, hit, u)
    }

    /// Returns the PDF with respect to solid angle of sampling the direction
    /// `wi` from a reference point.
    ///
    /// * `hit` - Reference point.
    /// * `wi`  - Incident direction.
    fn pdf_solid_angle(&self, hit: &Hit, wi: &Vector3f) -> Float {
        pdf_solid_angle_by_area(self, hit, wi)
    }
}

/// Samples a shape uniformly by area and converts the PDF to solid angle
/// measure at the reference point.
///
/// * `shape` - The shape.
/// * `hit`   - Reference point.
/// * `u`     - Sample value to use.
pub fn sample_solid_angle_by_area<S: Shape + ?Sized>(shape: &S, hit: &Hit, u: &Point2f) -> (Hit, Float) {
    let (intr, mut pdf) = shape.sample_area(u);
    let wi = intr.p - hit.p;

    if wi.length_squared() == 0.0 {
        pdf = 0.0;
    } else {
        // Convert from area measure to solid angle measure.
        let wi = wi.normalize();
        pdf *= hit.p.distance_squared(&intr.p) / intr.n.abs_dot(&(-wi));
        if pdf.is_infinite() {
            pdf = 0.0;
        }
    }

    (intr, pdf)
}

/// Returns the solid angle PDF of `sample_solid_angle_by_area` for the
/// direction `wi`, or 0 if the ray misses the shape.
///
/// * `shape` - The shape.
/// * `hit`   - Reference point.
/// * `wi`    - Incident direction.
pub fn pdf_solid_angle_by_area<S: Shape + ?Sized>(shape: &S, hit: &Hit, wi: &Vector3f) -> Float {
    let ray = hit.spawn_ray(wi);

    match shape.intersect(&ray) {
        Some(Intersection { isect, .. }) => {
            let pdf = hit.p.distance_squared(&isect.hit.p) / (isect.hit.n.abs_dot(&(-*wi)) * shape.area());
            if pdf.is_infinite() {
                0.0
            } else {
                pdf
            }
        }
        None => 0.0,
    }
}

/// Atomic reference counted `Shape`.
pub type ArcShape = Arc<dyn Shape + Send + Sync>;

/// Stores the parametric distance along the ray and the surface interaction
/// at a ray-shape intersection.
pub struct Intersection<'scene> {
    /// Parametric distance along the ray.
    pub t: Float,

    /// The surface interaction.
    pub isect: SurfaceInteraction<'scene>,
}

impl<'scene> Intersection<'scene> {
    /// Create a new intersection.
    ///
    /// * `t`     - Parametric distance along the ray.
    /// * `isect` - The surface interaction.
    pub fn new(t: Float, isect: SurfaceInteraction<'scene>) -> Self {
        Self { t, isect }
    }
}
