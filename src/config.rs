//! Command-line configuration

use std::path::PathBuf;

use cgmath::{Deg, InnerSpace, Rad, Vector3};
use clap::Parser;

/// Joint speed in radians per second
pub const DEFAULT_ANGULAR_VELOCITY: f32 = 0.05 * std::f32::consts::PI;

/// Towards the light in view space: up and mostly towards the viewer
pub const DEFAULT_LIGHT: [f32; 3] = [0.0, 1.0, 10.0];

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about = "Robot arm balloon-popping scene viewer")]
pub struct Config {
    /// Window title
    #[arg(long, default_value = "Game2: Scene")]
    pub title: String,

    /// Initial window width in pixels
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Mesh library blob (pnc. / str0 / idx0 chunks)
    #[arg(long, value_name = "PATH", default_value = "meshes.blob")]
    pub meshes: PathBuf,

    /// Scene blob (str0 / scn0 chunks)
    #[arg(long, value_name = "PATH", default_value = "scene.blob")]
    pub scene: PathBuf,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 60.0)]
    pub fovy: f32,

    /// Near clip plane distance; the far plane is at infinity
    #[arg(long, default_value_t = 0.01)]
    pub near: f32,

    /// Joint rotation speed in radians per second
    #[arg(long, default_value_t = DEFAULT_ANGULAR_VELOCITY)]
    pub angular_velocity: f32,

    /// Present without waiting for vertical sync
    #[arg(long)]
    pub no_vsync: bool,

    /// Direction towards the light in view space; normalized on use
    #[arg(
        long,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        default_values_t = DEFAULT_LIGHT,
        allow_negative_numbers = true
    )]
    pub light: Vec<f32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Game2: Scene".to_string(),
            width: 640,
            height: 480,
            meshes: PathBuf::from("meshes.blob"),
            scene: PathBuf::from("scene.blob"),
            fovy: 60.0,
            near: 0.01,
            angular_velocity: DEFAULT_ANGULAR_VELOCITY,
            no_vsync: false,
            light: DEFAULT_LIGHT.to_vec(),
        }
    }
}

impl Config {
    pub fn fovy_radians(&self) -> Rad<f32> {
        Deg(self.fovy).into()
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// The configured light direction, or [`DEFAULT_LIGHT`] if it is not a
    /// usable direction
    pub fn light_direction(&self) -> Vector3<f32> {
        match *self.light.as_slice() {
            [x, y, z] if Vector3::new(x, y, z).magnitude2() > 0.0 => Vector3::new(x, y, z),
            _ => Vector3::from(DEFAULT_LIGHT),
        }
    }

    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.no_vsync {
            wgpu::PresentMode::AutoNoVsync
        } else {
            wgpu::PresentMode::AutoVsync
        }
    }
}
