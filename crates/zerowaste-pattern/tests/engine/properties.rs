use proptest::prelude::*;
use zerowaste_core::Point3;
use zerowaste_pattern::transform::MIN_GAP;
use zerowaste_pattern::{BaseVariant, ManualOverride, TransformEngine, TransformParameters};

fn variant() -> impl Strategy<Value = BaseVariant> {
    prop_oneof![Just(BaseVariant::V3), Just(BaseVariant::Classic)]
}

fn params() -> impl Strategy<Value = TransformParameters> {
    (
        (30.0f64..150.0, 40.0f64..160.0, any::<bool>()),
        (any::<bool>(), 1.0f64..80.0, 0.1f64..3.0, 0.1f64..3.0, -20.0f64..20.0),
        (0.1f64..3.0, 0.1f64..3.0, -15.0f64..15.0, any::<bool>(), any::<bool>()),
    )
        .prop_map(|(global, sleeve, neck)| {
            let mut p = TransformParameters::default();
            p.global.target_width_cm = global.0;
            p.global.target_height_cm = global.1;
            p.global.preserve_aspect_ratio = global.2;
            p.sleeve.auto_half_width_depth = sleeve.0;
            p.sleeve.depth_cm = sleeve.1;
            p.sleeve.scale_x = sleeve.2;
            p.sleeve.scale_y = sleeve.3;
            p.sleeve.vertical_offset_cm = sleeve.4;
            p.neck.scale_x = neck.0;
            p.neck.scale_y = neck.1;
            p.neck.vertical_offset_cm = neck.2;
            p.neck.limit_height = neck.3;
            p.neck.follows_global_scale = neck.4;
            p
        })
}

fn sleeve_gap(engine: &TransformEngine, params: &TransformParameters) -> f64 {
    let out = engine.transform(params).unwrap();
    let control = engine.base().control();
    let view = out.view();
    (view.vertical(&out.points()[control.armhole]) - view.vertical(&out.points()[control.back_seam]))
        .abs()
}

proptest! {
    #[test]
    fn prop_output_matches_base_and_is_anchored(variant in variant(), params in params()) {
        let engine = TransformEngine::new(variant.polygon());
        let out = engine.transform(&params).unwrap();
        prop_assert_eq!(out.len(), engine.base().len());
        prop_assert_eq!(out.points()[engine.base().control().anchor], Point3::new(0.0, 0.0, 0.0));
        prop_assert!(out.points().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn prop_transform_is_deterministic(params in params()) {
        let engine = TransformEngine::default();
        prop_assert_eq!(engine.transform(&params).unwrap(), engine.transform(&params).unwrap());
    }

    #[test]
    fn prop_paired_heights_keep_minimum_gap(
        armhole in 10.0f64..60.0,
        back_seam in 10.0f64..60.0,
        params in params(),
    ) {
        let mut params = params;
        params.sleeve.overrides.armhole_height = ManualOverride::enabled(armhole);
        params.sleeve.overrides.back_seam_height = ManualOverride::enabled(back_seam);
        let engine = TransformEngine::default();
        prop_assert!(sleeve_gap(&engine, &params) >= MIN_GAP - 1e-9);
    }

    #[test]
    fn prop_sleeve_stays_within_half_width(depth in 0.1f64..400.0, scale_x in 0.1f64..5.0, use_scale_x in any::<bool>()) {
        let mut params = TransformParameters::default();
        params.sleeve.auto_half_width_depth = false;
        params.sleeve.depth_cm = depth;
        params.sleeve.scale_x = scale_x;
        params.sleeve.use_scale_x = use_scale_x;

        let engine = TransformEngine::default();
        let out = engine.transform(&params).unwrap();
        let base = engine.base();
        let pivot_x = out.points()[base.control().sleeve_start].x;
        let excursion = base
            .sleeve()
            .indices()
            .map(|i| (out.points()[i].x - pivot_x).abs())
            .fold(0.0, f64::max);
        prop_assert!(excursion <= 0.675 * 0.5 + 1e-9);
    }

    #[test]
    fn prop_locked_heights_move_together(
        height in 20u32..=40,
        target_height in 60.0f64..120.0,
        scale_y in 0.5f64..2.0,
    ) {
        let mut free = TransformParameters::default();
        free.global.target_height_cm = target_height;
        free.sleeve.scale_y = scale_y;

        let mut locked = free.clone();
        locked.sleeve.lock_lengths = true;
        locked.sleeve.overrides.armhole_height = ManualOverride::enabled(f64::from(height));
        locked.sleeve.overrides.back_seam_height = ManualOverride::enabled(f64::from(height) + 10.0);

        let engine = TransformEngine::default();
        let free_gap = sleeve_gap(&engine, &free);
        let locked_gap = sleeve_gap(&engine, &locked);
        prop_assert!((free_gap - locked_gap).abs() < 1e-9);
    }
}
