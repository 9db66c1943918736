//! Test doubles for the estimator tests.

use crate::geometry::*;
use crate::interaction::*;
use crate::light::*;
use crate::pbrt::*;
use crate::primitive::*;
use crate::reflection::*;
use crate::sampler::*;
use crate::scene::*;
use crate::spectrum::*;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Isotropic point light that counts `sample_li` and `pdf_li` calls.
pub struct TestPointLight {
    pub p: Point3f,
    pub intensity: Spectrum,
    pub sample_li_calls: AtomicUsize,
    pub pdf_li_calls: AtomicUsize,
}

impl TestPointLight {
    pub fn new(p: Point3f, intensity: Spectrum) -> Self {
        Self {
            p,
            intensity,
            sample_li_calls: AtomicUsize::new(0),
            pdf_li_calls: AtomicUsize::new(0),
        }
    }
}

impl Light for TestPointLight {
    fn get_type(&self) -> LightType {
        LightType::DELTA_POSITION
    }

    fn sample_li(&self, hit: &Hit, _u: &Point2f) -> Li {
        self.sample_li_calls.fetch_add(1, Ordering::SeqCst);
        let wi = (self.p - hit.p).normalize();
        let visibility = VisibilityTester::new(*hit, Hit::new_minimal(self.p, hit.time));
        Li::new(wi, 1.0, Some(visibility), self.intensity / self.p.distance_squared(&hit.p))
    }

    fn power(&self) -> Spectrum {
        self.intensity * FOUR_PI
    }

    fn pdf_li(&self, _hit: &Hit, _wi: &Vector3f) -> Float {
        self.pdf_li_calls.fetch_add(1, Ordering::SeqCst);
        0.0
    }
}

/// Non-delta light returning fixed values from `sample_li` and `pdf_li`.
pub struct TestAreaLikeLight {
    pub wi: Vector3f,
    pub pdf: Float,
    pub value: Spectrum,
    pub pdf_li_value: Float,
}

impl Light for TestAreaLikeLight {
    fn get_type(&self) -> LightType {
        LightType::AREA
    }

    fn sample_li(&self, _hit: &Hit, _u: &Point2f) -> Li {
        Li::new(self.wi, self.pdf, None, self.value)
    }

    fn power(&self) -> Spectrum {
        self.value
    }

    fn pdf_li(&self, _hit: &Hit, _wi: &Vector3f) -> Float {
        self.pdf_li_value
    }
}

/// Sampler that hands out scripted 1D values and a fixed 2D value while
/// counting every call.
pub struct ScriptedSampler {
    pub data: SamplerData,
    pub values_1d: VecDeque<Float>,
    pub value_2d: Point2f,
    pub calls: usize,
}

impl ScriptedSampler {
    pub fn new(values_1d: Vec<Float>, value_2d: Point2f) -> Self {
        Self {
            data: SamplerData::new(1),
            values_1d: values_1d.into(),
            value_2d,
            calls: 0,
        }
    }
}

impl Sampler for ScriptedSampler {
    fn get_data(&self) -> &SamplerData {
        &self.data
    }

    fn get_data_mut(&mut self) -> &mut SamplerData {
        &mut self.data
    }

    fn clone_sampler(&self, _seed: u64) -> Box<dyn Sampler> {
        Box::new(Self {
            data: self.data.clone(),
            values_1d: self.values_1d.clone(),
            value_2d: self.value_2d,
            calls: 0,
        })
    }

    fn get_1d(&mut self) -> Float {
        self.calls += 1;
        self.values_1d.pop_front().unwrap_or(0.5)
    }

    fn get_2d(&mut self) -> Point2f {
        self.calls += 1;
        self.value_2d
    }

    fn get_2d_array(&mut self, n: usize) -> Vec<Point2f> {
        self.calls += 1;
        self.data.get_2d_array(n)
    }
}

/// Scene with no geometry.
pub fn empty_scene(lights: Vec<ArcLight>) -> Scene {
    Scene::new(Arc::new(PrimitiveList::new(vec![])), lights)
}

/// Surface interaction at the origin facing +z with a Lambertian BSDF.
pub fn lambertian_surface(reflectance: Float) -> SurfaceInteraction<'static> {
    let mut si = SurfaceInteraction::new(
        Point3f::ZERO,
        Vector3f::ZERO,
        Point2f::ZERO,
        Vector3f::new(0.0, 0.0, 1.0),
        Vector3f::new(1.0, 0.0, 0.0),
        Vector3f::new(0.0, 1.0, 0.0),
        0.0,
        false,
    );
    let mut bsdf = BSDF::new(&si, None);
    bsdf.add(LambertianReflection::new(Spectrum::new(reflectance)));
    si.bsdf = Some(bsdf);
    si
}
