use graviton::simulation::actor::Transform;
use graviton::simulation::params::Params;
use graviton::simulation::world::World;
use macroquad::prelude::*;
use tracing_subscriber::EnvFilter;

/// On-screen radius of an actor at scale 1.
const SPRITE_RADIUS: f32 = 64.0;

fn load_params() -> Params {
    match std::env::args().nth(1) {
        Some(path) => Params::load_from_file(&path).unwrap_or_else(|err| {
            tracing::warn!(%path, %err, "falling back to default params");
            Params::default()
        }),
        None => Params::default(),
    }
}

#[macroquad::main("Graviton")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("graviton=info")),
        )
        .init();

    let params = load_params();
    let mut world = World::from_params(&params);

    let mut viewport = (screen_width(), screen_height());
    if let Err(err) = world.set_world_bounds(viewport.0, viewport.1) {
        tracing::warn!(%err, "keeping configured world size");
    }

    let source = world.populate(&params, &mut ::rand::rng());

    loop {
        let current = (screen_width(), screen_height());
        if current != viewport {
            viewport = current;
            if let Err(err) = world.set_world_bounds(current.0, current.1) {
                tracing::warn!(%err, "ignoring viewport change");
            }
            world.recenter(source);
        }

        // frame time in units of a 60 Hz frame
        world.step(get_frame_time() * 60.0);

        clear_background(Color::from_hex(0x0010_99bb));

        for actor in world
            .registry()
            .iter_active()
            .filter(|actor| actor.kind().is_renderable())
        {
            let Transform {
                position, scale, ..
            } = actor.transform();
            let color = if actor.is_gravity_source {
                Color::new(0.0, 0.0, 0.0, 0.7)
            } else {
                WHITE
            };
            draw_circle(position.x, position.y, scale * SPRITE_RADIUS, color);
        }

        next_frame().await
    }
}
