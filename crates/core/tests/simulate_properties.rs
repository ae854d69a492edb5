use relivis::prelude::*;
use relivis::simulator::{bias_effect, MAX_SUBJECTS};

fn chart_parts(seed: u64) -> (InitialConditions, Prng) {
    let mut rng = Prng::new(seed);
    let initial = InitialConditions::generate(&mut rng);
    (initial, rng)
}

fn params(subjects: usize, trials: usize, bias: f64, variation: f64, learning: f64) -> SimParams {
    SimParams {
        subject_count: subjects,
        trial_count: trials,
        bias,
        variation,
        learning,
    }
}

#[test]
fn matrix_shape_matches_requested_counts() {
    let (initial, mut rng) = chart_parts(17);
    for subjects in 1..=MAX_SUBJECTS {
        for trials in 1..=10 {
            let m = generate(&initial, &params(subjects, trials, 10.0, 2.0, 1.0), &mut rng).unwrap();
            assert_eq!(m.subject_count(), subjects);
            assert!(m.rows().iter().all(|r| r.len() == trials));
        }
    }
}

#[test]
fn first_trial_is_exactly_the_initial_condition() {
    let (initial, mut rng) = chart_parts(23);
    let m = generate(&initial, &params(MAX_SUBJECTS, 8, 12.0, 4.0, 0.3), &mut rng).unwrap();
    for (i, row) in m.rows().iter().enumerate() {
        assert_eq!(Some(row[0]), initial.get(i));
    }
}

#[test]
fn zero_variation_is_deterministic() {
    let (initial, mut rng) = chart_parts(31);
    let p = params(6, 9, 7.5, 0.0, 0.8);
    let a = generate(&initial, &p, &mut rng).unwrap();
    let b = generate(&initial, &p, &mut rng).unwrap();
    assert_eq!(a, b);
    for (i, row) in a.rows().iter().enumerate() {
        let start = initial.get(i).unwrap();
        for (j, &v) in row.iter().enumerate().skip(1) {
            assert_eq!(v, start + bias_effect(7.5, 0.8, j, 9));
        }
    }
}

#[test]
fn zero_bias_and_variation_hold_the_initial_value() {
    let (initial, mut rng) = chart_parts(37);
    let m = generate(&initial, &params(10, 10, 0.0, 0.0, 1.3), &mut rng).unwrap();
    for (i, row) in m.rows().iter().enumerate() {
        let start = initial.get(i).unwrap();
        assert!(row.iter().all(|&v| v == start));
    }
}

#[test]
fn learning_at_origin_flattens_the_bias_curve() {
    // Steepness 2.1 - 2.1 = 0: the logistic term is bias / 2 on every later trial,
    // so there is no transition across trials.
    let (initial, mut rng) = chart_parts(41);
    let m = generate(&initial, &params(3, 4, 10.0, 0.0, 2.1), &mut rng).unwrap();
    for (i, row) in m.rows().iter().enumerate() {
        let start = initial.get(i).unwrap();
        assert_eq!(row[0], start);
        for &v in &row[1..] {
            assert!((v - (start + 5.0)).abs() < 1e-9);
            assert!((v - row[1]).abs() < 1e-12);
        }
    }
}

#[test]
fn steep_learning_switches_sides_at_the_midpoint() {
    let (initial, mut rng) = chart_parts(43);
    let m = generate(&initial, &params(1, 10, 10.0, 0.0, 0.0), &mut rng).unwrap();
    let start = initial.get(0).unwrap();
    let row = m.row(0).unwrap();
    assert!((row[1] - start).abs() < 0.01);
    assert!((row[5] - start - 5.0).abs() < 1e-9);
    assert!((row[9] - start - 10.0).abs() < 0.01);
}

#[test]
fn trials_are_perturbations_not_a_walk() {
    // With large noise a cumulative walk would drift far; independent draws stay
    // centered on the initial value.
    let initial = InitialConditions::from_values(vec![50.0]);
    let mut rng = Prng::new(47);
    let m = generate(&initial, &params(1, 2, 0.0, 3.0, 1.0), &mut rng).unwrap();
    let mut samples = Vec::new();
    for _ in 0..4000 {
        let m2 = generate(&initial, &params(1, 10, 0.0, 3.0, 1.0), &mut rng).unwrap();
        samples.push(m2.row(0).unwrap()[9]);
    }
    let sd = relivis::stats::deviation(&samples).unwrap();
    assert!((sd - 3.0).abs() < 0.2, "sd={sd}");
    assert_eq!(m.row(0).unwrap()[0], 50.0);
}

#[test]
fn subject_count_beyond_capacity_is_rejected() {
    let (initial, mut rng) = chart_parts(53);
    let err = generate(&initial, &params(MAX_SUBJECTS + 1, 3, 0.0, 0.0, 0.0), &mut rng).unwrap_err();
    assert!(err.to_string().contains("exceeds capacity"));
}
