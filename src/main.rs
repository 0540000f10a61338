use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use robopop::{
    assets::{scene_blob, MeshLibrary},
    gfx::scene::Scene,
    simulation::BalloonPopDemo,
    Config, RobopopApp,
};

fn run(config: Config) -> anyhow::Result<()> {
    let library = MeshLibrary::load(&config.meshes)
        .with_context(|| format!("loading meshes from {}", config.meshes.display()))?;
    let entries = scene_blob::load(&config.scene)
        .with_context(|| format!("loading scene from {}", config.scene.display()))?;

    let mut scene = Scene::new(config.fovy_radians(), config.aspect(), config.near);
    let demo = BalloonPopDemo::new(&mut scene, &library, &entries, config.angular_velocity)
        .context("building scene")?;

    RobopopApp::new(config, library, scene, Box::new(demo))?.run()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
