use autogate_core::traits::ThresholdStrategy;
use autogate_threshold::{AdaptiveThreshold, ControllerDefaults};
use proptest::prelude::*;

fn arb_controller() -> impl Strategy<Value = AdaptiveThreshold> {
    (2u32..2000, 0.5f64..0.999, 0.0001f64..0.5, 0.51f64..0.999).prop_map(
        |(window, confidence, deviation, max_prob)| {
            let mut c = AdaptiveThreshold::new(
                ControllerDefaults {
                    window,
                    confidence,
                    deviation,
                },
                max_prob,
            )
            .unwrap();
            c.register("m");
            c
        },
    )
}

proptest! {
    #[test]
    fn threshold_stays_strictly_inside_bounds(
        mut c in arb_controller(),
        history in prop::collection::vec((any::<bool>(), any::<bool>()), 0..400),
    ) {
        let max_prob = c.max_prob();
        for (auto, label) in history {
            c.update("m", auto, label).unwrap();
            let th = c.threshold("m").unwrap();
            prop_assert!(th > 0.5 && th < max_prob, "threshold {} outside (0.5, {})", th, max_prob);
        }
    }

    #[test]
    fn gate_is_closed_while_performance_is_low(
        mut c in arb_controller(),
        history in prop::collection::vec(any::<bool>(), 1..200),
        prob in 0.0f64..=1.0,
    ) {
        for label in history {
            c.update("m", true, label).unwrap();
            if c.get_performance("m").unwrap() <= 0.98 {
                prop_assert!(!c.is_auto("m", prob).unwrap());
            }
        }
    }

    #[test]
    fn reregistering_never_resets_state(
        mut c in arb_controller(),
        history in prop::collection::vec((any::<bool>(), any::<bool>()), 0..100),
    ) {
        for (auto, label) in history {
            c.update("m", auto, label).unwrap();
        }
        let before = c.state("m").unwrap().clone();
        c.register("m");
        prop_assert_eq!(c.state("m").unwrap(), &before);
    }
}
