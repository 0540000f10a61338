// src/lib.rs
//! Robopop
//!
//! A small scene viewer built on wgpu and winit: a transform hierarchy with
//! on-demand world resolution, a robot arm steered from the keyboard, and
//! balloons to pop with it.

pub mod app;
pub mod assets;
pub mod config;
pub mod error;
pub mod gfx;
pub mod input;
pub mod prelude;
pub mod simulation;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::RobopopApp;
pub use config::Config;
