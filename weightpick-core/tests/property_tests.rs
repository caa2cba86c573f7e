//! Property tests for selector invariants.
//!
//! Uses proptest to verify:
//! 1. Determinism: the same draw always selects the same index
//! 2. Range: the selected index is always in bounds and never zero-weight
//!    unless every weight is zero
//! 3. Monotonicity: a larger draw never selects an earlier index
//! 4. Pops: every pop shrinks the list by one and returns a former element
//! 5. Equivalence: explicit weights and weight functions agree
//! 6. Scale: multiplying every weight by the same factor, however small,
//!    never moves a draw to a different index

use proptest::prelude::*;
use weightpick_core::{
    pop_by_weights, select_by_weight_fn, select_by_weights, ScriptedDraws, SelectError,
    WeightedBag,
};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_weight() -> impl Strategy<Value = f64> {
    prop_oneof![
        1 => Just(0.0),
        6 => (0.001..100.0_f64),
    ]
}

fn arb_weights() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(arb_weight(), 1..40)
}

fn arb_draw() -> impl Strategy<Value = f64> {
    0.0..1.0_f64
}

// ── 1. Determinism ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn same_draw_same_index(weights in arb_weights(), draw in arb_draw()) {
        let elements: Vec<usize> = (0..weights.len()).collect();
        let a = select_by_weights(&elements, &weights, &mut ScriptedDraws::constant(draw)).unwrap();
        let b = select_by_weights(&elements, &weights, &mut ScriptedDraws::constant(draw)).unwrap();
        prop_assert_eq!(a, b);
    }
}

// ── 2. Range ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn index_in_bounds_and_positive_weight(weights in arb_weights(), draw in arb_draw()) {
        let elements: Vec<usize> = (0..weights.len()).collect();
        let pick = select_by_weights(&elements, &weights, &mut ScriptedDraws::constant(draw)).unwrap();
        prop_assert!(pick.index < weights.len());
        prop_assert_eq!(*pick.item, pick.index);

        let all_zero = weights.iter().all(|&w| w == 0.0);
        if all_zero {
            prop_assert_eq!(pick.index, weights.len() - 1);
        } else {
            prop_assert!(weights[pick.index] > 0.0, "picked zero-weight index {}", pick.index);
        }
    }

    #[test]
    fn boundary_draw_never_escapes(weights in arb_weights()) {
        let elements: Vec<usize> = (0..weights.len()).collect();
        let pick = select_by_weights(
            &elements,
            &weights,
            &mut ScriptedDraws::constant(1.0 - 1e-12),
        )
        .unwrap();
        prop_assert!(pick.index < weights.len());
    }

    #[test]
    fn negative_weight_always_rejected(
        mut weights in arb_weights(),
        slot in any::<prop::sample::Index>(),
        magnitude in 0.001..10.0_f64,
    ) {
        let i = slot.index(weights.len());
        weights[i] = -magnitude;
        let elements: Vec<usize> = (0..weights.len()).collect();
        let err = select_by_weights(&elements, &weights, &mut ScriptedDraws::constant(0.5)).unwrap_err();
        prop_assert!(
            matches!(err, SelectError::InvalidWeight { .. }),
            "unexpected error {:?}",
            err
        );
    }
}

// ── 3. Monotonicity ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn larger_draw_never_moves_left(weights in arb_weights(), d1 in arb_draw(), d2 in arb_draw()) {
        let (lo, hi) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
        let elements: Vec<usize> = (0..weights.len()).collect();
        let a = select_by_weights(&elements, &weights, &mut ScriptedDraws::constant(lo)).unwrap();
        let b = select_by_weights(&elements, &weights, &mut ScriptedDraws::constant(hi)).unwrap();
        prop_assert!(a.index <= b.index, "draw {} -> {}, draw {} -> {}", lo, a.index, hi, b.index);
    }
}

// ── 4. Pops ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn pop_shrinks_by_one(weights in arb_weights(), draw in arb_draw()) {
        let original: Vec<usize> = (0..weights.len()).collect();
        let mut list = original.clone();
        let popped = pop_by_weights(&mut list, &weights, &mut ScriptedDraws::constant(draw)).unwrap();

        prop_assert_eq!(list.len(), original.len() - 1);
        prop_assert_eq!(popped.item, original[popped.index]);
        prop_assert!(!list.contains(&popped.item));
    }

    #[test]
    fn bag_drain_is_a_permutation(weights in arb_weights(), seed in any::<u64>()) {
        use rand::SeedableRng;
        let mut bag = WeightedBag::from_pairs((0..weights.len()).zip(weights.iter().copied())).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let mut drained: Vec<usize> = bag.drain_weighted(&mut rng).map(|s| s.item).collect();
        drained.sort_unstable();
        prop_assert_eq!(drained, (0..weights.len()).collect::<Vec<_>>());
        prop_assert!(bag.is_empty());
    }
}

// ── 5. Equivalence ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn weight_fn_agrees_with_explicit(weights in arb_weights(), draw in arb_draw()) {
        let explicit = select_by_weights(&weights, &weights, &mut ScriptedDraws::constant(draw)).unwrap();
        let cached = select_by_weight_fn(&weights, |&w| w, None, &mut ScriptedDraws::constant(draw)).unwrap();
        prop_assert_eq!(explicit.index, cached.index);
    }

    #[test]
    fn lazy_total_agrees_with_cached(weights in arb_weights(), draw in arb_draw()) {
        let total: f64 = weights.iter().sum();
        let cached = select_by_weight_fn(&weights, |&w| w, None, &mut ScriptedDraws::constant(draw)).unwrap();
        let lazy = select_by_weight_fn(&weights, |&w| w, Some(total), &mut ScriptedDraws::constant(draw)).unwrap();
        prop_assert_eq!(cached.index, lazy.index);
    }
}

// ── 6. Scale ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn power_of_two_scaling_keeps_index(
        weights in arb_weights(),
        draw in arb_draw(),
        exponent in -60i32..=40,
    ) {
        // Power-of-two factors scale every partial sum exactly.
        let scale = 2f64.powi(exponent);
        let scaled: Vec<f64> = weights.iter().map(|w| w * scale).collect();
        let elements: Vec<usize> = (0..weights.len()).collect();
        let base = select_by_weights(&elements, &weights, &mut ScriptedDraws::constant(draw)).unwrap();
        let small = select_by_weights(&elements, &scaled, &mut ScriptedDraws::constant(draw)).unwrap();
        prop_assert_eq!(base.index, small.index);
    }

    #[test]
    fn equal_tiny_weights_split_draws_evenly(n in 2usize..20, draw in 0.0..0.999_f64) {
        let weights = vec![1e-7; n];
        let elements: Vec<usize> = (0..n).collect();
        let pick = select_by_weights(&elements, &weights, &mut ScriptedDraws::constant(draw)).unwrap();
        let bucket = (draw * n as f64).floor() as usize;
        // Draws within rounding of a bucket edge may land on either side.
        prop_assert!(
            pick.index == bucket || pick.index + 1 == bucket,
            "n {} draw {} picked {} expected {}", n, draw, pick.index, bucket
        );
    }
}
