//! Built-in scenes. World space is z-up.

use crate::options::SceneKind;
use base::geometry::*;
use base::light::*;
use base::material::*;
use base::pbrt::*;
use base::primitive::*;
use base::scene::*;
use base::shape::*;
use base::spectrum::*;
use lights::*;
use materials::*;
use shapes::*;
use std::sync::Arc;

/// Radius of the spheres standing in for the Cornell box walls.
const WALL_RADIUS: Float = 1e3;

/// A scene and the view to render it from.
pub struct DemoScene {
    /// Geometry and lights.
    pub scene: Scene,

    /// Camera position.
    pub eye: Point3f,

    /// Point the camera looks at.
    pub look: Point3f,

    /// Camera up vector.
    pub up: Vector3f,

    /// Field of view in degrees.
    pub fov: Float,
}

/// Accumulates primitives and lights.
#[derive(Default)]
struct SceneBuilder {
    primitives: Vec<ArcPrimitive>,
    lights: Vec<ArcLight>,
}

impl SceneBuilder {
    fn add(&mut self, shape: impl Shape + Send + Sync + 'static, material: ArcMaterial) {
        let shape: ArcShape = Arc::new(shape);
        self.primitives
            .push(Arc::new(GeometricPrimitive::new(shape, Some(material), None)));
    }

    /// Add an emitting shape; the same light is registered with the scene
    /// and attached to its primitive.
    fn add_emitter(&mut self, shape: impl Shape + Send + Sync + 'static, l_emit: Spectrum, n_samples: usize) {
        let shape: ArcShape = Arc::new(shape);
        let light = Arc::new(DiffuseAreaLight::new(l_emit, n_samples, Arc::clone(&shape), false));
        let area_light: ArcAreaLight = light.clone();
        let black: ArcMaterial = Arc::new(MatteMaterial::new(Spectrum::ZERO));
        self.primitives
            .push(Arc::new(GeometricPrimitive::new(shape, Some(black), Some(area_light))));
        self.lights.push(light);
    }

    fn add_light(&mut self, light: ArcLight) {
        self.lights.push(light);
    }

    fn build(self) -> Scene {
        info!(
            "Building scene with {} primitives and {} lights",
            self.primitives.len(),
            self.lights.len()
        );
        Scene::new(Arc::new(PrimitiveList::new(self.primitives)), self.lights)
    }
}

fn matte(r: Float, g: Float, b: Float) -> ArcMaterial {
    Arc::new(MatteMaterial::new(Spectrum::from_rgb(r, g, b)))
}

/// Returns the requested scene.
///
/// * `kind` - Which scene to build.
pub fn build_scene(kind: SceneKind) -> DemoScene {
    match kind {
        SceneKind::Cornell => cornell(),
        SceneKind::Spheres => spheres(),
        SceneKind::Empty => empty(),
    }
}

/// Box spanning [-1, 1]^3, open towards the camera at -y.
fn cornell() -> DemoScene {
    let mut b = SceneBuilder::default();
    let white = matte(0.73, 0.73, 0.73);
    let offset = WALL_RADIUS + 1.0;

    // Side and back walls.
    b.add(Sphere::new(Point3f::new(-offset, 0.0, 0.0), WALL_RADIUS, false), matte(0.65, 0.05, 0.05));
    b.add(Sphere::new(Point3f::new(offset, 0.0, 0.0), WALL_RADIUS, false), matte(0.12, 0.45, 0.15));
    b.add(Sphere::new(Point3f::new(0.0, offset, 0.0), WALL_RADIUS, false), Arc::clone(&white));

    // Floor and ceiling.
    b.add(Disk::new(Point3f::new(0.0, 0.0, -1.0), 2.0, 0.0, 360.0, false), Arc::clone(&white));
    b.add(Disk::new(Point3f::new(0.0, 0.0, 1.0), 2.0, 0.0, 360.0, true), white);

    // Ceiling lamp, just below the ceiling and facing down.
    b.add_emitter(
        Disk::new(Point3f::new(0.0, 0.0, 0.995), 0.3, 0.0, 360.0, true),
        Spectrum::new(17.0),
        4,
    );

    b.add(
        Sphere::new(Point3f::new(-0.45, 0.35, -0.6), 0.4, false),
        Arc::new(MirrorMaterial::new(Spectrum::new(0.95))),
    );
    b.add(
        Sphere::new(Point3f::new(0.45, -0.2, -0.6), 0.4, false),
        Arc::new(GlassMaterial::new(Spectrum::ONE, Spectrum::ONE, 1.5)),
    );

    DemoScene {
        scene: b.build(),
        eye: Point3f::new(0.0, -3.9, 0.0),
        look: Point3f::ZERO,
        up: Vector3f::new(0.0, 0.0, 1.0),
        fov: 38.0,
    }
}

/// One sphere per material on a large ground disk.
fn spheres() -> DemoScene {
    let mut b = SceneBuilder::default();
    b.add(Disk::new(Point3f::ZERO, 50.0, 0.0, 360.0, false), matte(0.5, 0.5, 0.5));
    b.add(Sphere::new(Point3f::new(-3.0, 0.0, 1.0), 1.0, false), matte(0.8, 0.3, 0.2));
    b.add(
        Sphere::new(Point3f::new(-1.0, 0.0, 1.0), 1.0, false),
        Arc::new(MirrorMaterial::new(Spectrum::from_rgb(0.9, 0.9, 0.8))),
    );
    b.add(
        Sphere::new(Point3f::new(1.0, 0.0, 1.0), 1.0, false),
        Arc::new(GlassMaterial::new(Spectrum::ONE, Spectrum::ONE, 1.5)),
    );
    b.add(
        Sphere::new(Point3f::new(3.0, 0.0, 1.0), 1.0, false),
        Arc::new(TranslucentMaterial::new(Spectrum::new(0.4), Spectrum::from_rgb(0.2, 0.5, 0.3))),
    );

    // A small spherical lamp, a point light and a dim sky.
    b.add_emitter(Sphere::new(Point3f::new(0.0, -3.0, 5.0), 0.5, false), Spectrum::new(8.0), 4);
    b.add_light(Arc::new(PointLight::new(Point3f::new(4.0, -4.0, 6.0), Spectrum::new(40.0))));
    b.add_light(Arc::new(ConstantInfiniteLight::new(Spectrum::from_rgb(0.1, 0.15, 0.25))));

    DemoScene {
        scene: b.build(),
        eye: Point3f::new(0.0, -10.0, 3.0),
        look: Point3f::new(0.0, 0.0, 1.0),
        up: Vector3f::new(0.0, 0.0, 1.0),
        fov: 45.0,
    }
}

/// Nothing to see; every pixel is black.
fn empty() -> DemoScene {
    DemoScene {
        scene: SceneBuilder::default().build(),
        eye: Point3f::new(0.0, -5.0, 0.0),
        look: Point3f::ZERO,
        up: Vector3f::new(0.0, 0.0, 1.0),
        fov: 45.0,
    }
}
