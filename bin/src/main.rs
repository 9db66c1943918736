#[macro_use]
extern crate log;

mod options;
mod scenes;

use base::camera::*;
use base::error::RenderError;
use base::film::*;
use base::filter::*;
use base::geometry::*;
use base::integrator::*;
use base::sampler::*;
use cameras::*;
use clap::Parser;
use filters::*;
use integrators::*;
use options::*;
use samplers::*;
use scenes::*;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

fn main() -> ExitCode {
    let options = Options::parse();

    // Initialize `env_logger`; `RUST_LOG` overrides the default filter.
    let default_filter = if options.quiet { "error" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    match render(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn render(options: &Options) -> Result<(), RenderError> {
    let start = Instant::now();
    let demo = build_scene(options.scene);

    let camera = create_camera(options, &demo);
    let pixel_bounds = camera.get_film().cropped_pixel_bounds;
    let sampler = create_sampler(options);
    let max_depth = options.max_depth();

    let mut integrator: Box<dyn Integrator> = match options.integrator {
        IntegratorKind::Directlighting => Box::new(DirectLightingIntegrator::new(
            DirectLightStrategy::from_name(&options.strategy),
            max_depth,
            camera,
            sampler,
            pixel_bounds,
        )),
        IntegratorKind::Path => Box::new(PathIntegrator::new(
            max_depth,
            camera,
            sampler,
            pixel_bounds,
            DEFAULT_RR_THRESHOLD,
        )),
        IntegratorKind::Whitted => Box::new(WhittedIntegrator::new(max_depth, camera, sampler, pixel_bounds)),
    };

    let render_options = RenderOptions {
        threads: options.threads(),
        tile_size: options.tile_size(),
        quiet: options.quiet,
    };
    info!(
        "Rendering {:?} scene with {:?} integrator to '{}'",
        options.scene, options.integrator, options.image_file
    );

    let diagnostics = CountingDiagnostics::new();
    integrator.render(&demo.scene, &render_options, &diagnostics)?;
    diagnostics.log_summary();

    info!("Finished in {:.2?}", start.elapsed());
    Ok(())
}

fn create_filter(kind: FilterKind) -> ArcFilter {
    match kind {
        FilterKind::Box => Arc::new(BoxFilter::new(Vector2f::new(0.5, 0.5))),
        FilterKind::Triangle => Arc::new(TriangleFilter::new(Vector2f::new(2.0, 2.0))),
        FilterKind::Gaussian => Arc::new(GaussianFilter::new(Vector2f::new(1.5, 1.5), 2.0)),
    }
}

fn create_camera(options: &Options, demo: &DemoScene) -> ArcCamera {
    let film = Film::new(
        &options.resolution(),
        &options.crop_window(),
        create_filter(options.filter),
        35.0,
        &options.image_file,
        None,
        None,
    );
    let frame = CameraFrame::look_at(demo.eye, demo.look, demo.up);
    Arc::new(PerspectiveCamera::new(frame, 0.0, 1.0, 0.0, 1e6, demo.fov, film))
}

fn create_sampler(options: &Options) -> Box<dyn Sampler> {
    let spp = options.samples_per_pixel();
    match options.sampler {
        SamplerKind::Random => Box::new(RandomSampler::new(spp, None)),
        SamplerKind::Stratified => {
            // Closest grid to `spp` samples, never fewer.
            let x = ((spp as f64).sqrt().round() as usize).max(1);
            let y = spp.div_ceil(x);
            if x * y != spp {
                info!("Rounding {spp} samples per pixel up to a {x}x{y} stratified grid");
            }
            Box::new(StratifiedSampler::new(x, y, true, 4, 0))
        }
    }
}
