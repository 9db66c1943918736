//! Small scenes shared by the integrator tests. The floor lies in the plane
//! z = 0 facing +z.

use base::camera::*;
use base::film::*;
use base::geometry::*;
use base::light::*;
use base::material::*;
use base::pbrt::*;
use base::primitive::*;
use base::sampler::*;
use base::scene::*;
use base::shape::*;
use base::spectrum::*;
use cameras::*;
use filters::*;
use lights::*;
use materials::*;
use samplers::*;
use shapes::*;
use std::sync::Arc;

pub const FLOOR_REFLECTANCE: Float = 0.5;
pub const POINT_INTENSITY: Float = 4.0;
pub const SKY_RADIANCE: Float = 0.75;
pub const MIRROR_REFLECTANCE: Float = 0.8;

/// Camera at z = 5 looking down at the origin.
pub fn test_camera(width: Int, height: Int, filename: &str) -> ArcCamera {
    let filter = Arc::new(BoxFilter::new(Vector2f::new(0.5, 0.5)));
    let film = Film::new(
        &Point2i::new(width, height),
        &Bounds2f::new(Point2f::ZERO, Point2f::new(1.0, 1.0)),
        filter,
        35.0,
        filename,
        None,
        None,
    );
    let frame = CameraFrame::look_at(Point3f::new(0.0, 0.0, 5.0), Point3f::ZERO, Vector3f::new(0.0, 1.0, 0.0));
    Arc::new(PerspectiveCamera::new(frame, 0.0, 1.0, 0.0, 1e6, 60.0, film))
}

pub fn test_sampler(spp: usize) -> Box<dyn Sampler> {
    Box::new(RandomSampler::new(spp, Some(0)))
}

/// Ray from one unit above the floor heading straight down.
pub fn down_ray() -> Ray {
    Ray::new(Point3f::new(0.0, 0.0, 1.0), Vector3f::new(0.0, 0.0, -1.0), INFINITY, 0.0)
}

/// Ray from one unit above the floor heading straight up.
pub fn up_ray() -> Ray {
    Ray::new(Point3f::new(0.0, 0.0, 1.0), Vector3f::new(0.0, 0.0, 1.0), INFINITY, 0.0)
}

fn floor(material: ArcMaterial) -> ArcPrimitive {
    let shape: ArcShape = Arc::new(Disk::new(Point3f::ZERO, 10.0, 0.0, 360.0, false));
    Arc::new(GeometricPrimitive::new(shape, Some(material), None))
}

/// Matte floor lit by a point light two units above the origin.
pub fn matte_floor_under_point_light() -> Scene {
    let material: ArcMaterial = Arc::new(MatteMaterial::new(Spectrum::new(FLOOR_REFLECTANCE)));
    let light: ArcLight = Arc::new(PointLight::new(
        Point3f::new(0.0, 0.0, 2.0),
        Spectrum::new(POINT_INTENSITY),
    ));
    Scene::new(Arc::new(PrimitiveList::new(vec![floor(material)])), vec![light])
}

/// Mirror floor under a constant sky.
pub fn mirror_under_sky() -> Scene {
    let material: ArcMaterial = Arc::new(MirrorMaterial::new(Spectrum::new(MIRROR_REFLECTANCE)));
    let light: ArcLight = Arc::new(ConstantInfiniteLight::new(Spectrum::new(SKY_RADIANCE)));
    Scene::new(Arc::new(PrimitiveList::new(vec![floor(material)])), vec![light])
}

/// Matte floor under an emitting disk facing down from z = 2. The area
/// light is registered both as a light and on its primitive.
pub fn matte_floor_under_area_light(radiance: Float) -> Scene {
    let material: ArcMaterial = Arc::new(MatteMaterial::new(Spectrum::new(FLOOR_REFLECTANCE)));
    let emitter: ArcShape = Arc::new(Disk::new(Point3f::new(0.0, 0.0, 2.0), 0.5, 0.0, 360.0, true));
    let area_light = Arc::new(DiffuseAreaLight::new(Spectrum::new(radiance), 1, Arc::clone(&emitter), false));
    let light: ArcLight = area_light.clone();
    let area_light: ArcAreaLight = area_light;
    let lamp: ArcPrimitive = Arc::new(GeometricPrimitive::new(
        emitter,
        Some(Arc::new(MatteMaterial::new(Spectrum::ZERO))),
        Some(area_light),
    ));
    Scene::new(Arc::new(PrimitiveList::new(vec![floor(material), lamp])), vec![light])
}
