// Host-side tests for the ambient core effects, the brain network and the
// shared camera.

use flow_core::constants::{
    BRAIN_LINKS_MAX, BRAIN_LINKS_MIN, BRAIN_NEURON_COUNT, BRAIN_NEURON_SHELL, BRAIN_OUTLINE,
    BRAIN_OUTLINE_SCALE, FLASH_HOLD_SEC, FLASH_INTERVAL_MAX, FLASH_INTERVAL_MIN,
};
use flow_core::*;
use glam::Vec3;
use rand::prelude::*;

#[test]
fn core_breath_oscillates_around_one() {
    let breath = CoreBreath::default();
    assert_eq!(breath.scale(0.0), 1.0);
    let mut lo = f32::MAX;
    let mut hi = f32::MIN;
    for i in 0..1000 {
        let s = breath.scale(i as f32 * 0.01);
        lo = lo.min(s);
        hi = hi.max(s);
    }
    assert!(lo >= 1.0 - breath.depth - 1e-6);
    assert!(hi <= 1.0 + breath.depth + 1e-6);
    assert!(hi - lo > breath.depth, "breath barely moved: {lo}..{hi}");
}

#[test]
fn every_neuron_fires_within_one_max_interval() {
    let mut flashes = FlashScheduler::new(16, 5);
    let mut fired = Vec::new();
    let mut seen = [false; 16];
    let dt = 1.0 / 60.0;
    let mut t = 0.0;
    while t <= FLASH_INTERVAL_MAX + dt {
        fired.clear();
        flashes.tick(dt, &mut fired);
        for &i in &fired {
            seen[i] = true;
        }
        t += dt;
    }
    assert!(seen.iter().all(|&s| s), "some neurons never fired: {seen:?}");
}

#[test]
fn flash_intervals_respect_the_minimum() {
    let mut flashes = FlashScheduler::new(8, 11);
    let mut fired = Vec::new();
    let mut last_fire: [Option<f32>; 8] = [None; 8];
    let dt = 0.01;
    for step in 1..=2000 {
        let t = step as f32 * dt;
        fired.clear();
        flashes.tick(dt, &mut fired);
        for &i in &fired {
            if let Some(prev) = last_fire[i] {
                // Rearmed with at least FLASH_INTERVAL_MIN; allow one tick of slop
                assert!(t - prev >= FLASH_INTERVAL_MIN - dt, "neuron {i} refired too soon");
            }
            last_fire[i] = Some(t);
        }
    }
}

#[test]
fn flash_glow_peaks_on_fire_and_fades() {
    let mut flashes = FlashScheduler::new(4, 3);
    let mut fired = Vec::new();
    // Run until something fires
    let mut guard = 0;
    while fired.is_empty() {
        flashes.tick(0.01, &mut fired);
        guard += 1;
        assert!(guard < 1000);
    }
    let i = fired[0];
    assert_eq!(flashes.intensity(i), 1.0);
    fired.clear();
    flashes.tick(FLASH_HOLD_SEC * 0.5, &mut fired);
    if !fired.contains(&i) {
        assert!((flashes.intensity(i) - 0.5).abs() < 1e-4);
    }
    assert_eq!(flashes.intensity(99), 0.0);
}

#[test]
fn flash_schedule_is_deterministic_per_seed() {
    let run = |seed| {
        let mut f = FlashScheduler::new(10, seed);
        let mut all = Vec::new();
        for _ in 0..300 {
            f.tick(1.0 / 60.0, &mut all);
        }
        all
    };
    assert_eq!(run(42), run(42));
    assert_ne!(run(42), run(43));
}

#[test]
fn brain_neurons_stay_inside_the_core_shell() {
    for core in [0.5, 1.08, 3.0] {
        let brain = BrainNetwork::new(BRAIN_NEURON_COUNT, core, 7);
        assert_eq!(brain.len(), BRAIN_NEURON_COUNT);
        let shell = core * BRAIN_NEURON_SHELL + 1e-5;
        for n in &brain.neurons {
            assert!(n.length() <= shell, "neuron {n:?} outside {shell}");
        }
        // Scattered, not collapsed onto one point
        let spread = brain
            .neurons
            .iter()
            .map(|n| n.distance(brain.neurons[0]))
            .fold(0.0f32, f32::max);
        assert!(spread > core * 0.1);
    }
}

#[test]
fn brain_neurons_sample_the_outline_bounds() {
    let mut rng = StdRng::seed_from_u64(12);
    let core = 1.08;
    let scale = core * BRAIN_OUTLINE_SCALE;
    let (lo, hi) = BRAIN_OUTLINE.iter().fold(
        (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
        |(lo, hi), v| (lo.min(*v * scale), hi.max(*v * scale)),
    );
    for n in brain_neurons(500, core, &mut rng) {
        assert!(n.cmpge(lo - 1e-5).all() && n.cmple(hi + 1e-5).all(), "{n:?}");
    }
}

#[test]
fn every_neuron_links_to_three_to_five_others() {
    let brain = BrainNetwork::new(BRAIN_NEURON_COUNT, 1.08, 99);
    assert_eq!(brain.links.len(), brain.len());
    for (i, to) in brain.links.iter().enumerate() {
        assert!(
            (BRAIN_LINKS_MIN..=BRAIN_LINKS_MAX).contains(&to.len()),
            "neuron {i} has {} links",
            to.len()
        );
        assert!(!to.contains(&i), "neuron {i} links to itself");
        assert!(to.iter().all(|&j| j < brain.len()));
        let mut sorted = to.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), to.len(), "neuron {i} has duplicate links");
    }
    assert_eq!(
        brain.edges().count(),
        brain.links.iter().map(|l| l.len()).sum::<usize>()
    );
    // Link counts actually vary across the range
    let counts: std::collections::BTreeSet<usize> = brain.links.iter().map(|l| l.len()).collect();
    assert!(counts.len() > 1);
}

#[test]
fn tiny_networks_link_what_they_can() {
    let mut rng = StdRng::seed_from_u64(1);
    assert!(brain_links(0, &mut rng).is_empty());
    assert!(brain_links(1, &mut rng)[0].is_empty());
    for to in brain_links(3, &mut rng) {
        assert_eq!(to.len(), 2);
    }
}

#[test]
fn brain_network_is_deterministic_per_seed() {
    assert_eq!(BrainNetwork::new(48, 1.08, 5), BrainNetwork::new(48, 1.08, 5));
    assert_ne!(
        BrainNetwork::new(48, 1.08, 5).neurons,
        BrainNetwork::new(48, 1.08, 6).neurons
    );
}

#[test]
fn brain_outline_is_closed_and_scaled() {
    let outline = brain_outline(2.0);
    assert_eq!(outline.len(), BRAIN_OUTLINE.len());
    assert_eq!(outline.first(), outline.last());
    assert_eq!(outline[4], BRAIN_OUTLINE[4] * 2.0 * BRAIN_OUTLINE_SCALE);
}

#[test]
fn camera_projects_target_to_screen_centre() {
    let cam = Camera::default();
    let vp = cam.view_proj();
    let centre = cam.project(&vp, cam.target).expect("target is in front");
    assert!(centre.x.abs() < 1e-5);
    assert!(centre.y.abs() < 1e-5);

    // Behind the eye is culled
    let behind = cam.eye + (cam.eye - cam.target);
    assert!(cam.project(&vp, behind).is_none());

    // Right of the target projects right of centre
    let right = (cam.target - cam.eye).cross(cam.up).normalize();
    let p = cam.project(&vp, right).unwrap();
    assert!(p.x > 0.0);
}

#[test]
fn camera_drift_keeps_distance_to_target() {
    let cam = Camera::default();
    let d0 = cam.eye.distance(cam.target);
    for t in [0.0, 1.0, 30.0, 600.0] {
        let drifted = cam.with_drift(t);
        assert!((drifted.eye.distance(drifted.target) - d0).abs() < 1e-3);
        assert_eq!(drifted.target, cam.target);
        assert!((drifted.eye.y - cam.eye.y).abs() < 1e-5);
    }
    assert_ne!(cam.with_drift(10.0).eye, cam.eye);
    assert!(cam.with_drift(0.0).eye.abs_diff_eq(cam.eye, 1e-6));
    assert!(!cam.with_drift(0.0).eye.is_nan());
}
