#![allow(missing_docs)]

use graviton::simulation::actor::{Actor, ActorKind, Body, Pixol, Transform, TransformInit};
use graviton::simulation::gravity::{self, GravityField};
use graviton::simulation::params::Params;
use graviton::simulation::registry::Bounds;
use graviton::simulation::vector::Vector2;
use graviton::simulation::world::World;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn pixol(position: Vector2, velocity: Vector2, tag: f32) -> Actor {
    Actor::with_body(
        Body::default_for(ActorKind::Pixol),
        TransformInit::default()
            .with_position(position)
            .with_velocity(velocity)
            .with_rotation(tag),
    )
}

fn moving_source() -> Actor {
    let mut source = pixol(Vector2::new(500.0, 500.0), Vector2::new(30.0, -10.0), -1.0);
    source.is_gravity_source = true;
    source.mass = 50_000.0;
    source
}

fn population() -> Vec<Actor> {
    (0..8)
        .map(|i| {
            let i = i as f32;
            pixol(
                Vector2::new(100.0 + 90.0 * i, 300.0 + 40.0 * i),
                Vector2::new(1.0 - i, i * 0.5),
                i,
            )
        })
        .collect()
}

// rotation is left alone by a tick, so it doubles as a stable tag
fn states_by_tag(world: &World) -> Vec<(f32, Vector2, Vector2)> {
    let mut states: Vec<_> = world
        .registry()
        .iter()
        .map(|actor| (actor.rotation, actor.position, actor.velocity))
        .collect();
    states.sort_by(|a, b| a.0.total_cmp(&b.0));
    states
}

#[test]
fn test_step_advances_clock() {
    let mut world = World::new(Bounds::new(100.0, 100.0));
    world.step(0.5);
    world.step(0.25);

    assert_eq!(world.ticks, 2);
    assert!((world.time - 0.75).abs() < 1e-6);
}

#[test]
fn test_invalid_delta_time_is_skipped() {
    let mut world = World::new(Bounds::new(100.0, 100.0));
    let id = world.spawn(
        ActorKind::Pixol,
        TransformInit::default()
            .with_position(Vector2::new(10.0, 10.0))
            .with_velocity(Vector2::new(1.0, 0.0)),
    );

    world.step(-1.0);
    world.step(f32::NAN);

    assert_eq!(world.ticks, 0);
    assert_eq!(
        world.registry().get(id).unwrap().position,
        Vector2::new(10.0, 10.0)
    );
}

#[test]
fn test_gravity_uses_pre_tick_source_position() {
    let mut world = World::new(Bounds::new(1000.0, 1000.0));
    let source = world.registry_mut().spawn(moving_source());
    let subject = world.registry_mut().spawn(pixol(
        Vector2::new(200.0, 500.0),
        Vector2::ZERO,
        0.0,
    ));

    let before = world.registry().get(source).unwrap().position;
    world.step(1.0);

    let expected = gravity::pull(Vector2::new(200.0, 500.0), before, 50_000.0, 0.001).unwrap();
    let actor = world.registry().get(subject).unwrap();
    assert_eq!(actor.velocity, expected);
    assert_eq!(actor.position, Vector2::new(200.0, 500.0) + expected);

    // sources feel no gravity but still move
    let source = world.registry().get(source).unwrap();
    assert_eq!(source.velocity, Vector2::new(30.0, -10.0));
    assert_eq!(source.position, Vector2::new(530.0, 490.0));
}

#[test]
fn test_tick_is_independent_of_iteration_order() {
    let mut source_first = World::new(Bounds::new(1000.0, 1000.0));
    source_first.registry_mut().spawn(moving_source());
    for actor in population() {
        source_first.registry_mut().spawn(actor);
    }

    let mut source_last = World::new(Bounds::new(1000.0, 1000.0));
    for actor in population().into_iter().rev() {
        source_last.registry_mut().spawn(actor);
    }
    source_last.registry_mut().spawn(moving_source());

    for _ in 0..3 {
        source_first.step(1.0);
        source_last.step(1.0);
    }

    assert_eq!(states_by_tag(&source_first), states_by_tag(&source_last));
}

#[test]
fn test_multiple_sources_sum() {
    let mut world = World::new(Bounds::new(100.0, 100.0));
    for x in [40.0, 60.0] {
        let mut source = pixol(Vector2::new(x, 50.0), Vector2::ZERO, 0.0);
        source.is_gravity_source = true;
        source.mass = 1.0;
        source.gravity_strength = 1.0;
        world.registry_mut().spawn(source);
    }
    let subject = world
        .registry_mut()
        .spawn(pixol(Vector2::new(50.0, 50.0), Vector2::ZERO, 0.0));

    world.step(1.0);

    // symmetric pulls cancel
    let actor = world.registry().get(subject).unwrap();
    assert!(actor.velocity.length() < 1e-6);
}

#[test]
fn test_coincident_source_contributes_nothing() {
    let mut world = World::new(Bounds::new(100.0, 100.0));
    let mut source = pixol(Vector2::new(50.0, 50.0), Vector2::ZERO, 0.0);
    source.is_gravity_source = true;
    world.registry_mut().spawn(source);
    let subject = world
        .registry_mut()
        .spawn(pixol(Vector2::new(50.0, 50.0), Vector2::new(1.0, 0.0), 1.0));

    world.step(1.0);

    let actor = world.registry().get(subject).unwrap();
    assert_eq!(actor.velocity, Vector2::new(1.0, 0.0));
    assert_eq!(actor.position, Vector2::new(51.0, 50.0));
}

#[test]
fn test_inactive_actors_are_frozen_and_exert_no_pull() {
    let mut world = World::new(Bounds::new(100.0, 100.0));
    let mut source = pixol(Vector2::new(90.0, 50.0), Vector2::ZERO, 0.0);
    source.is_gravity_source = true;
    source.mass = 1000.0;
    let source = world.registry_mut().spawn(source);
    let frozen = world
        .registry_mut()
        .spawn(pixol(Vector2::new(10.0, 10.0), Vector2::new(5.0, 5.0), 1.0));
    let subject = world
        .registry_mut()
        .spawn(pixol(Vector2::new(10.0, 50.0), Vector2::ZERO, 2.0));

    world.registry_mut().deactivate(source);
    world.registry_mut().deactivate(frozen);
    world.step(1.0);

    assert_eq!(
        world.registry().get(frozen).unwrap().position,
        Vector2::new(10.0, 10.0)
    );
    assert_eq!(
        world.registry().get(subject).unwrap().velocity,
        Vector2::ZERO
    );
}

#[test]
fn test_bounds_change_applies_next_tick() {
    let mut world = World::new(Bounds::new(100.0, 100.0));
    let id = world.spawn(
        ActorKind::Pixol,
        TransformInit::default().with_position(Vector2::new(50.0, 50.0)),
    );

    world.set_world_bounds(10.0, 20.0).unwrap();
    world.step(1.0);

    let actor = world.registry().get(id).unwrap();
    assert_eq!(actor.position, Vector2::new(9.0, 19.0));
    assert!(actor.is_in_bounds(world.registry().bounds()));
}

#[test]
fn test_recenter_moves_to_midpoint() {
    let mut world = World::new(Bounds::new(100.0, 100.0));
    let id = world.spawn(ActorKind::Actor, TransformInit::default());

    world.set_world_bounds(300.0, 200.0).unwrap();
    assert!(world.recenter(id));
    assert_eq!(
        world.registry().get(id).unwrap().position,
        Vector2::new(150.0, 100.0)
    );
}

#[test]
fn test_populate() {
    let params = Params {
        world_width: 800.0,
        world_height: 600.0,
        n_pixol: 50,
        spawn_radius: 100.0,
        ..Params::default()
    };
    let mut world = World::from_params(&params);
    let mut rng = StdRng::seed_from_u64(1);

    let source_id = world.populate(&params, &mut rng);

    assert_eq!(source_id.to_string(), "Pixol_50");
    assert_eq!(world.registry().len(), 51);

    let center = Vector2::new(400.0, 300.0);
    let source = world.registry().get(source_id).unwrap();
    assert!(source.is_gravity_source);
    assert_eq!(source.position, center);
    assert_eq!(source.mass, params.source_mass);
    assert_eq!(source.scale, params.source_scale);

    let pixols = world.registry().all_of_kind::<Pixol>();
    assert_eq!(pixols.len(), 51);
    for p in pixols.iter().filter(|p| !p.is_gravity_source) {
        assert!(p.position.distance_to(center) <= params.spawn_radius * (1.0 + 1e-5));
        assert_eq!(p.scale, params.pixol_scale);
        assert_eq!(p.data.hp, params.pixol_hp);
    }
}

#[test]
fn test_population_falls_toward_source() {
    let params = Params {
        world_width: 1000.0,
        world_height: 1000.0,
        n_pixol: 100,
        spawn_radius: 300.0,
        ..Params::default()
    };
    let mut world = World::from_params(&params);
    let source = world.populate(&params, &mut StdRng::seed_from_u64(3));
    let center = world.registry().get(source).unwrap().position;

    let distances = |world: &World| -> Vec<f32> {
        world
            .registry()
            .all_of_kind::<Pixol>()
            .iter()
            .map(|p| p.position.distance_to(center))
            .collect()
    };

    let before = distances(&world);
    for _ in 0..5 {
        world.step(1.0);
    }
    let after = distances(&world);

    // a few pixols spawned right next to the source get slung past it
    let closer = before
        .iter()
        .zip(&after)
        .filter(|(b, a)| a < b)
        .count();
    assert!(closer >= 90, "only {closer} of 100 pixols fell inward");

    for actor in world.registry().iter() {
        assert!(actor.is_in_bounds(world.registry().bounds()));
    }
}

#[test]
fn test_tick_is_published_through_transform() {
    let mut world = World::new(Bounds::new(100.0, 100.0));
    let id = world.spawn(
        ActorKind::Pixol,
        TransformInit::default()
            .with_position(Vector2::new(10.0, 10.0))
            .with_velocity(Vector2::new(2.0, 1.0))
            .with_rotation(0.3)
            .with_scale(0.05),
    );
    world.spawn(
        ActorKind::Actor,
        TransformInit::default().with_position(Vector2::new(5.0, 5.0)),
    );

    world.step(1.0);

    assert_eq!(
        world.registry().get(id).unwrap().transform(),
        Transform {
            position: Vector2::new(12.0, 11.0),
            velocity: Vector2::new(2.0, 1.0),
            rotation: 0.3,
            scale: 0.05,
        }
    );

    let drawn: Vec<Transform> = world
        .registry()
        .iter_active()
        .filter(|actor| actor.kind().is_renderable())
        .map(Actor::transform)
        .collect();
    assert_eq!(drawn.len(), 1);
    assert_eq!(drawn[0].position, Vector2::new(12.0, 11.0));
}

#[test]
fn test_gravity_field_counts_active_actors() {
    let mut world = World::new(Bounds::new(100.0, 100.0));
    let mut source = pixol(Vector2::new(50.0, 50.0), Vector2::ZERO, 0.0);
    source.is_gravity_source = true;
    world.registry_mut().spawn(source);
    let gone = world.spawn(ActorKind::Pixol, TransformInit::default());
    world.spawn(ActorKind::Pixol, TransformInit::default());
    world.spawn(ActorKind::Actor, TransformInit::default());
    world.registry_mut().deactivate(gone);

    let field = GravityField::capture(world.registry());

    assert_eq!(field.active_count(), 3);
    assert_eq!(field.sources().len(), 1);
}
