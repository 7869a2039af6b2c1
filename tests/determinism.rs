use drape::{ClothConfig, ClothSimulation, NoOpStepObserver, SolverConfig};
use glam::DVec3;

#[test]
fn cloth_deterministic() {
    let results: Vec<_> = (0..5).map(|_| {
        let mut sim = ClothSimulation::new(ClothConfig::new(1.0, 1.0, 12, 8))
            .unwrap()
            .with_solver_config(SolverConfig::new().with_relaxation_passes(2)).unwrap();
        sim.shoot(&[
            DVec3::new(0.0, 4.0, 0.0),
            DVec3::new(1.0, 2.0, 0.0),
            DVec3::new(0.0, 3.0, -1.0),
            DVec3::new(0.5, 5.0, 0.5),
        ]).unwrap();
        for i in 0..300 {
            sim.tick(i as f64 * 16.0, &mut NoOpStepObserver);
        }
        sim.positions()
    }).collect();

    for r in &results[1..] {
        for (a, b) in results[0].iter().zip(r.iter()) {
            assert_eq!(a, b);
        }
    }
}

#[test]
fn independent_cloths_on_threads() {
    let handles: Vec<_> = (0..4).map(|i| {
        std::thread::spawn(move || {
            let mut sim = ClothSimulation::new(ClothConfig::new(1.0, 1.0, 10, 10)).unwrap();
            sim.config.gravity = DVec3::new(0.0, -0.1 * (i + 1) as f64, 0.0);
            sim.strike();
            for t in 0..100 {
                sim.tick(t as f64, &mut NoOpStepObserver);
            }
            sim.positions()
        })
    }).collect();

    let serial: Vec<_> = (0..4).map(|i| {
        let mut sim = ClothSimulation::new(ClothConfig::new(1.0, 1.0, 10, 10)).unwrap();
        sim.config.gravity = DVec3::new(0.0, -0.1 * (i + 1) as f64, 0.0);
        sim.strike();
        for t in 0..100 {
            sim.tick(t as f64, &mut NoOpStepObserver);
        }
        sim.positions()
    }).collect();

    for (handle, expected) in handles.into_iter().zip(serial) {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
