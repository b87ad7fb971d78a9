// Host-side integration tests for the particle field (pool owner).
// The web crate is wasm-only, so these exercise flow-core directly.

use flow_core::constants::{MAX_FRAME_DT, REFERENCE_FRAME_DT};
use flow_core::*;

const DT: f32 = 1.0 / 60.0;

fn scenario_params() -> MotionParams {
    MotionParams {
        particle_count: 100,
        stick_distance: 0.02,
        dwell_time: 0.8,
        ..MotionParams::burst()
    }
}

fn count_states(field: &ParticleField) -> usize {
    [
        ParticleState::Delayed,
        ParticleState::Orbiting,
        ParticleState::Spiraling,
        ParticleState::Attached,
    ]
    .into_iter()
    .map(|s| field.count_in(s))
    .sum()
}

#[test]
fn ten_second_run_cycles_most_particles_and_stays_sane() {
    let mut field = ParticleField::new(scenario_params(), 2024).expect("valid params");
    assert_eq!(field.len(), 100);

    for frame in 1..=600 {
        let elapsed = frame as f32 * DT;
        field.step(elapsed, DT);
        // Exactly one state per particle, every frame
        assert_eq!(count_states(&field), field.len());
        for (i, pos) in field.positions().enumerate() {
            assert!(!pos.is_nan(), "particle {i} went NaN at frame {frame}");
            assert!(
                pos.length() <= 50.0,
                "particle {i} escaped to {pos:?} at frame {frame}"
            );
        }
    }

    let cycled = field.particles().iter().filter(|p| p.respawns >= 1).count();
    assert!(
        cycled * 2 > field.len(),
        "only {cycled} of {} particles completed spawn->attach->respawn",
        field.len()
    );
    let stats = field.stats();
    assert_eq!(stats.frames, 600);
    assert!(stats.attachments >= stats.respawns);
    assert_eq!(
        stats.respawns,
        field.particles().iter().map(|p| p.respawns as u64).sum::<u64>()
    );
}

#[test]
fn no_particle_respawns_before_its_dwell_elapses() {
    let params = MotionParams {
        respawn: RespawnPolicy::Immediate,
        ..scenario_params()
    };
    let dwell = params.dwell_time;
    let mut field = ParticleField::new(params, 99).expect("valid params");
    let mut attached_at: Vec<Option<f32>> = vec![None; field.len()];
    let mut checked = 0;

    for frame in 1..=600 {
        let elapsed = frame as f32 * DT;
        let before: Vec<u32> = field.particles().iter().map(|p| p.respawns).collect();
        field.step(elapsed, DT);
        for (i, p) in field.particles().iter().enumerate() {
            let respawned = p.respawns != before[i];
            match attached_at[i] {
                Some(t0) if respawned => {
                    assert!(
                        elapsed - t0 > dwell,
                        "particle {i} respawned {:.3}s after attaching",
                        elapsed - t0
                    );
                    attached_at[i] = None;
                    checked += 1;
                }
                Some(t0) => assert_eq!(
                    p.state,
                    ParticleState::Attached,
                    "particle {i} left its target {:.3}s after attaching",
                    elapsed - t0
                ),
                None => {
                    assert!(!respawned, "particle {i} respawned without attaching");
                    if p.state == ParticleState::Attached {
                        attached_at[i] = Some(p.attached_at);
                    }
                }
            }
        }
    }
    assert!(checked > 0, "scenario never respawned anything");
}

#[test]
fn same_seed_gives_identical_runs() {
    let mut a = ParticleField::new(scenario_params(), 7).unwrap();
    let mut b = ParticleField::new(scenario_params(), 7).unwrap();
    for frame in 1..=240 {
        let t = frame as f32 * DT;
        a.update(t);
        b.update(t);
    }
    assert!(a.positions().eq(b.positions()));
    assert_eq!(a.stats(), b.stats());
}

#[test]
fn reset_restores_the_initial_layout() {
    let mut field = ParticleField::new(scenario_params(), 11).unwrap();
    let initial: Vec<_> = field.positions().collect();
    for frame in 1..=120 {
        field.update(frame as f32 * DT);
    }
    field.reset(11);
    let restored: Vec<_> = field.positions().collect();
    assert_eq!(initial, restored);
    assert_eq!(field.stats(), FieldStats::default());
    assert!(field.particles().iter().all(|p| p.respawns == 0));
}

#[test]
fn initial_pool_starts_delayed() {
    let field = ParticleField::new(MotionParams::home(), 3).unwrap();
    assert_eq!(field.len(), MotionParams::home().particle_count);
    assert_eq!(field.count_in(ParticleState::Delayed), field.len());
    assert!(field.particles().iter().all(|p| !p.is_visible()));
}

#[test]
fn update_clamps_long_and_backwards_frames() {
    let params = MotionParams {
        spawn_delay_max: 0.0,
        orbit_duration: 100.0,
        ..scenario_params()
    };
    let mut field = ParticleField::new(params.clone(), 5).unwrap();
    // First frame activates everything (zero delay)
    field.update(0.0);
    assert_eq!(field.count_in(ParticleState::Orbiting), field.len());

    let angles: Vec<f32> = field.particles().iter().map(|p| p.orbit_angle).collect();
    // A 30 second stall advances the orbit by at most MAX_FRAME_DT per call
    field.update(0.3);
    field.update(30.3);
    for (p, a0) in field.particles().iter().zip(&angles) {
        assert_eq!(p.state, ParticleState::Orbiting);
        let advanced = (p.orbit_angle - a0).rem_euclid(std::f32::consts::TAU);
        assert!(advanced <= params.orbit_speed * (MAX_FRAME_DT * 2.0) + 1e-4);
    }

    // Time running backwards is a zero-length frame
    let before: Vec<f32> = field.particles().iter().map(|p| p.orbit_angle).collect();
    field.update(10.0);
    for (p, a0) in field.particles().iter().zip(&before) {
        assert_eq!(p.orbit_angle, *a0);
    }
}

#[test]
fn stalled_frames_keep_every_move_within_the_step_bound() {
    for params in [scenario_params(), MotionParams::thoughts()] {
        let bound = params.max_displacement() + 1e-4;
        let mut field = ParticleField::new(params, 808).unwrap();
        let mut t = 0.0;
        let mut checked = 0;
        for frame in 0..600 {
            // Every fourth frame is a 100 ms stall
            t += if frame % 4 == 3 { 0.1 } else { DT };
            let before: Vec<(glam::Vec3, u32)> = field
                .particles()
                .iter()
                .map(|p| (p.position, p.respawns))
                .collect();
            field.update(t);
            for (i, (p, (pos, respawns))) in field.particles().iter().zip(&before).enumerate() {
                if p.respawns != *respawns {
                    continue;
                }
                let moved = p.position.distance(*pos);
                assert!(moved <= bound, "particle {i} moved {moved} > {bound} at t={t}");
                checked += 1;
            }
        }
        assert!(checked > 0);
    }
}

#[test]
fn update_derives_dt_from_the_previous_call() {
    let params = MotionParams {
        spawn_delay_max: 0.0,
        orbit_duration: 10.0,
        ..scenario_params()
    };
    let mut field = ParticleField::new(params.clone(), 21).unwrap();
    field.update(0.0); // Delayed -> Orbiting
    let a0: Vec<f32> = field.particles().iter().map(|p| p.orbit_angle).collect();
    field.update(REFERENCE_FRAME_DT);
    for (p, a) in field.particles().iter().zip(&a0) {
        let advanced = (p.orbit_angle - a).rem_euclid(std::f32::consts::TAU);
        assert!((advanced - params.orbit_speed * REFERENCE_FRAME_DT).abs() < 1e-4);
    }
}

#[test]
fn instance_rows_mirror_particles() {
    let mut field = ParticleField::new(scenario_params(), 17).unwrap();
    for frame in 1..=180 {
        field.update(frame as f32 * DT);
    }
    let mut rows = Vec::new();
    field.write_instances(&mut rows);
    assert_eq!(rows.len(), field.len());
    for (row, p) in rows.iter().zip(field.particles()) {
        assert_eq!(row.pos, p.position.to_array());
        assert_eq!(row.state, p.state as u8 as f32);
    }
    // Rows are tightly packed for upload
    let bytes: &[u8] = bytemuck::cast_slice(&rows);
    assert_eq!(bytes.len(), rows.len() * 16);

    // Buffer is reused, not appended to
    field.write_instances(&mut rows);
    assert_eq!(rows.len(), field.len());
}

#[test]
fn invalid_params_are_rejected_at_construction() {
    let params = MotionParams {
        particle_count: 0,
        ..MotionParams::home()
    };
    assert!(matches!(
        ParticleField::new(params, 1),
        Err(ConfigError::EmptyPool)
    ));
}
