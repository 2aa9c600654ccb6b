use anyhow::Context;
use macroquad::prelude::*;
use tiled_batch::{Map, MacroquadRenderer, RenderConfig, SpriteBatch};
use tracing_subscriber::EnvFilter;

// ❶ Override the default 800 × 450 pixels here
fn window_conf() -> Conf {
    Conf {
        window_title: "Basic Map".into(),
        window_width: 1280, // ← any size you like
        window_height: 720,
        ..Default::default()
    }
}

async fn run() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => RenderConfig::load(&path).with_context(|| format!("Reading config {path}"))?,
        None => RenderConfig::default(),
    };

    let mut renderer = MacroquadRenderer::from_config(&config);
    let mut map = Map::load_with_config("assets/simple_map.tmj", &mut renderer, &config)
        .context("Failed to load map")?;
    map.set_origin(vec2(64.0, 64.0));

    let mut batch = SpriteBatch::from_config(renderer, &config);

    loop {
        clear_background(BLACK);

        batch.begin()?;
        map.draw_visible_rect(&mut batch, Vec2::ZERO, vec2(screen_width(), screen_height()))?;
        batch.end()?;

        // Draw the frame rate and batch counters in the top-left corner
        let stats = batch.stats();
        draw_text(
            &format!("FPS: {}  flushes: {}  sprites: {}", get_fps(), stats.flushes, stats.commands),
            20.0,
            30.0,
            30.0,
            RED,
        );

        next_frame().await;
    }
}

#[macroquad::main(window_conf)] // ❷ pass the window config function here
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        tracing::error!("{e:#}");
    }
}
