use std::hint::black_box;
use std::time::Instant;

use glam::Vec2;
use planetfall_common::{PlanetConfig, ViewportConfig, WorldConfig};
use planetfall_kernel::{Planet, World};
use planetfall_render::{RenderView, Renderer, SoftwareRenderer};

fn make_world(num_layers: u32, viewport: ViewportConfig) -> World {
    let planet = PlanetConfig {
        position: Vec2::ZERO,
        num_layers,
        ..PlanetConfig::default()
    };
    let surface = num_layers as f32 * planet.block_height as f32 * 0.8;
    World::new(&WorldConfig {
        viewport,
        player_start: Vec2::new(0.0, -surface),
        planets: vec![planet],
        ..WorldConfig::default()
    })
    .expect("bench world")
}

fn bench_generate(num_layers: u32, iterations: usize) {
    let config = PlanetConfig {
        num_layers,
        ..PlanetConfig::default()
    };
    let start = Instant::now();
    let mut blocks = 0;
    for _ in 0..iterations {
        let planet = Planet::new(black_box(&config)).expect("bench planet");
        blocks = planet.block_count();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  generate ({num_layers} layers, {blocks} blocks, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_frame(num_layers: u32, viewport: ViewportConfig, angle: f32, iterations: usize) {
    let world = make_world(num_layers, viewport);
    let mut renderer = SoftwareRenderer::new(&viewport);
    let view = RenderView::new(world.player().position(), angle, viewport);

    let start = Instant::now();
    let mut drawn = 0;
    for _ in 0..iterations {
        drawn = black_box(renderer.render(black_box(&world), black_box(&view))).blocks_rendered;
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  frame ({}x{}, {angle} deg, {drawn} blocks, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}",
        viewport.width, viewport.height
    );
}

fn bench_nearest_block(num_layers: u32, iterations: usize) {
    let world = make_world(num_layers, ViewportConfig::default());
    let cursor = world.viewport().half() + Vec2::new(40.0, 120.0);

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(world.block_at_cursor(black_box(cursor)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  block under cursor ({num_layers} layers, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== Planet Render Benchmarks ===\n");

    println!("Planet generation:");
    bench_generate(20, 100);
    bench_generate(50, 20);
    bench_generate(100, 5);

    println!("\nFull frame (cull, draw, compose):");
    bench_frame(50, ViewportConfig::new(640, 360), 0.0, 20);
    bench_frame(50, ViewportConfig::new(640, 360), 33.0, 20);
    bench_frame(50, ViewportConfig::default(), 0.0, 5);

    println!("\nCursor picking:");
    bench_nearest_block(50, 1000);
    bench_nearest_block(100, 100);

    println!("\n=== Done ===");
}
