use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in Ease::NAMED {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn input_is_clamped() {
    for ease in Ease::NAMED {
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in [
        Ease::Linear,
        Ease::InSine,
        Ease::OutSine,
        Ease::InOutSine,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InQuart,
        Ease::OutQuint,
        Ease::InOutExpo,
        Ease::InOutCirc,
    ] {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn symmetric_in_out_curves_pass_through_half() {
    for ease in [
        Ease::InOutSine,
        Ease::InOutQuad,
        Ease::InOutCubic,
        Ease::InOutQuart,
        Ease::InOutQuint,
        Ease::InOutCirc,
    ] {
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-9, "{ease:?}");
    }
}

#[test]
fn back_and_elastic_overshoot() {
    assert!(Ease::InBack.apply(0.2) < 0.0);
    assert!(Ease::OutBack.apply(0.8) > 1.0);
    let peak = (1..100)
        .map(|i| Ease::OutElastic.apply(f64::from(i) / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
}

#[test]
fn bounce_is_not_monotonic() {
    let samples: Vec<f64> = (0..=100)
        .map(|i| Ease::OutBounce.apply(f64::from(i) / 100.0))
        .collect();
    assert!(samples.windows(2).any(|w| w[1] < w[0]));
    assert!(samples.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn cubic_bezier_on_diagonal_is_near_linear() {
    let ease = Ease::CubicBezier {
        x1: 0.25,
        y1: 0.25,
        x2: 0.75,
        y2: 0.75,
    };
    for i in 1..10 {
        let t = f64::from(i) / 10.0;
        assert!((ease.apply(t) - t).abs() < 0.03, "t={t}");
    }
}

#[test]
fn ease_or_linear_defaults_to_identity() {
    assert_eq!(ease_or_linear(None, 0.3), 0.3);
    assert_eq!(ease_or_linear(None, 1.3), 1.0);
    assert_eq!(ease_or_linear(Some(Ease::InQuad), 0.5), 0.25);
}

#[test]
fn serde_uses_snake_case_names() {
    let v: Ease = serde_json::from_str("\"in_out_sine\"").unwrap();
    assert_eq!(v, Ease::InOutSine);
    let v: Ease =
        serde_json::from_str(r#"{"cubic_bezier": {"x1": 0.4, "y1": 0.0, "x2": 0.2, "y2": 1.0}}"#)
            .unwrap();
    assert!(matches!(v, Ease::CubicBezier { .. }));
    assert_eq!(serde_json::to_string(&Ease::OutBounce).unwrap(), "\"out_bounce\"");
}
