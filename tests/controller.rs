mod common;

use common::{Distance, Rotation, Steering, Throttle};
use mamdani::{
    AndOp, Discretization, FuzzyController, FuzzyError, InferenceEngine, Inputs, OrOp, RuleSet, Variables,
};

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

#[test]
fn test_steer_away_from_close_obstacle() {
    let steering = Steering::new();

    // Obstacle on the left, open on the right: rotate right (negative)
    let rotation = steering.decide(10., 100.);
    assert!(-35. < rotation && rotation < -15., "{rotation}");

    // And the mirror image
    let rotation = steering.decide(100., 10.);
    assert!(15. < rotation && rotation < 35., "{rotation}");
}

#[test]
fn test_steering_is_antisymmetric() {
    let steering = Steering::new();

    for (left, right) in [(10., 100.), (20., 55.), (45., 60.), (0., 30.), (70., 200.)] {
        assert_close(steering.decide(left, right), -steering.decide(right, left), 1e-9);
    }

    for dist in [5., 40., 50., 80., 500.] {
        assert_close(steering.decide(dist, dist), 0., 1e-9);
    }
}

#[test]
fn test_stronger_asymmetry_turns_harder() {
    let steering = Steering::new();

    let mild = steering.decide(45., 60.);
    let hard = steering.decide(10., 100.);

    assert!(hard < mild && mild < 0., "{hard} {mild}");
}

#[test]
fn test_throttle() {
    let throttle = Throttle::new();

    // Only `low` fires, fully: centroid of the (0, 5, 10) triangle
    assert_close(throttle.decide(0.), 5., 1e-6);
    // Only `high` fires, fully: centroid of the (25, 30, 90) triangle
    assert_close(throttle.decide(300.), (25. + 30. + 90.) / 3., 1e-2);

    let blended = throttle.decide(45.);
    assert!(5. < blended && blended < 15., "{blended}");
}

#[test]
fn test_no_rule_fires_gives_zero() {
    let throttle = Throttle::new();

    // Negative distances are outside every input shape
    assert_eq!(throttle.decide(-5.), 0.);
}

#[test]
fn test_outputs_lookup() {
    let throttle = Throttle::new();
    let inputs = throttle.controller.inputs_by_name([("center_dist", 0.)]).unwrap();
    let outputs = throttle.controller.decide(&inputs).unwrap();

    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs.get(throttle.gas), outputs.single());
    assert_eq!(outputs.get_by_name("gas"), outputs.single());
    assert_eq!(outputs.get_by_name("center_dist"), None);
    assert_eq!(outputs.iter().map(|(name, _)| name).collect::<Vec<_>>(), vec!["gas"]);
}

#[test]
fn test_inputs_by_name_rejects_unknown_and_output_variables() {
    let steering = Steering::new();

    for name in ["d_X", "Rotate"] {
        assert!(matches!(
            steering.controller.inputs_by_name([("d_L", 1.), (name, 1.)]),
            Err(FuzzyError::UnknownVariable { name: n }) if n == name
        ));
    }
}

#[test]
fn test_missing_input() {
    let steering = Steering::new();
    let mut inputs = Inputs::new();
    inputs.add(steering.left, 10.);

    assert_eq!(
        steering.controller.decide(&inputs),
        Err(FuzzyError::MissingInput { name: "d_R".into() })
    );
}

fn steering_vars() -> Variables {
    let mut vars = Variables::new();
    vars.add_input("d_L", common::side_distance());
    vars.add_input("d_R", common::side_distance());
    vars.add_output("Rotate", common::rotation(), Discretization::new(-50., 50., 1.).unwrap());
    vars
}

fn configure(rules: &str) -> Result<FuzzyController, FuzzyError> {
    FuzzyController::new(steering_vars(), rules.parse()?)
}

#[test]
fn test_configuration_is_validated() {
    assert!(configure(common::STEERING_RULES).is_ok());

    assert_eq!(
        configure("IF (d_X IS close) THEN Rotate IS nothing").err(),
        Some(FuzzyError::UnknownVariable { name: "d_X".into() })
    );
    assert_eq!(
        configure("IF (d_L IS close_L) THEN Rotate IS nothing").err(),
        Some(FuzzyError::UnknownLabel {
            variable: "d_L".into(),
            label: "close_L".into()
        })
    );
    assert_eq!(
        configure("IF (d_L IS close) THEN Rotate IS sideways").err(),
        Some(FuzzyError::UnknownLabel {
            variable: "Rotate".into(),
            label: "sideways".into()
        })
    );
    // Outputs cannot be conditions, inputs cannot be conclusions
    assert_eq!(
        configure("IF (Rotate IS nothing) THEN Rotate IS nothing").err(),
        Some(FuzzyError::UnknownVariable { name: "Rotate".into() })
    );
    assert_eq!(
        configure("IF (d_L IS close) THEN d_R IS far").err(),
        Some(FuzzyError::UnknownVariable { name: "d_R".into() })
    );
    assert!(matches!(
        configure("IF (d_L IS close) THEN\n"),
        Err(FuzzyError::RuleSyntax { line_number: 1, .. })
    ));
}

#[test]
fn test_duplicate_variable_and_bad_discretization() {
    let mut vars = steering_vars();
    vars.add_input("d_L", common::side_distance());

    assert_eq!(
        FuzzyController::new(vars, RuleSet::new()).err(),
        Some(FuzzyError::DuplicateVariable { name: "d_L".into() })
    );

    let mut vars = Variables::new();
    let range = Discretization {
        min: 50.,
        max: -50.,
        step: 1.,
    };
    vars.add_output("Rotate", common::rotation(), range);

    assert_eq!(
        FuzzyController::new(vars, RuleSet::new()).err(),
        Some(FuzzyError::InvalidDiscretization {
            min: 50.,
            max: -50.,
            step: 1.
        })
    );
}

#[test]
fn test_shared_label_names_do_not_collide() {
    // d_L and d_R both use `close`; each rule must see its own variable's degree
    let controller = configure(
        "IF (d_L IS close) THEN Rotate IS high_right\n\
         IF (d_R IS close) THEN Rotate IS high_left\n",
    )
    .unwrap();
    let inputs = controller.inputs_by_name([("d_L", 0.), ("d_R", 100.)]).unwrap();
    let rotation = controller.decide(&inputs).unwrap().single().unwrap();

    assert!(rotation < -15., "{rotation}");
}

#[test]
fn test_custom_engine() {
    let controller = configure("IF (d_L IS close) AND (d_R IS close) THEN Rotate IS high_left")
        .unwrap()
        .with_engine(InferenceEngine::new(AndOp::Prod, OrOp::Max));
    let inputs = controller.inputs_by_name([("d_L", 25.), ("d_R", 25.)]).unwrap();

    assert_eq!(controller.engine(), InferenceEngine::new(AndOp::Prod, OrOp::Max));
    assert_eq!(controller.rules().len(), 1);
    assert!(controller.decide(&inputs).unwrap().single().unwrap() > 15.);
}

#[test]
fn test_concurrent_decisions_match_sequential() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FuzzyController>();

    let steering = Steering::new();
    let readings: Vec<(f64, f64)> = (0..40).map(|i| (i as f64 * 3., 120. - i as f64 * 2.5)).collect();
    let expected: Vec<f64> = readings.iter().map(|&(l, r)| steering.decide(l, r)).collect();

    let actual: Vec<Vec<f64>> = std::thread::scope(|scope| {
        let steering = &steering;
        let readings = &readings;
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || readings.iter().map(|&(l, r)| steering.decide(l, r)).collect::<Vec<_>>()))
            .collect();

        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    for result in actual {
        assert_eq!(result, expected);
    }
}

#[test]
fn test_typed_fuzzification() {
    let domain = common::side_distance();
    let degrees = domain.fuzzify(50.);

    assert_eq!(degrees.get(Distance::Close), Some(&0.));
    assert_eq!(degrees.get(Distance::Moderate), Some(&1.));
    assert_eq!(degrees.get(Distance::Far), Some(&0.));
    assert_eq!(common::rotation().membership(Rotation::Nothing, 0.), 1.);
}
