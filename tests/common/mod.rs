//! Steering and throttle controllers for a small vehicle with two side
//! distance sensors and one forward sensor.
#![allow(dead_code)]

use mamdani::{Discretization, FuzzyController, MembershipFunction, RuleSet, Variable, VariableDomain, Variables};

mamdani::terms! {
    pub enum Distance {
        Close => "close",
        Moderate => "moderate",
        Far => "far",
    }
}

mamdani::terms! {
    pub enum Rotation {
        HighRight => "high_right",
        LowRight => "low_right",
        Nothing => "nothing",
        LowLeft => "low_left",
        HighLeft => "high_left",
    }
}

mamdani::terms! {
    pub enum CenterDistance {
        Close => "close",
        Moderate => "moderate",
        Far => "far",
    }
}

mamdani::terms! {
    pub enum Gas {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

pub const STEERING_RULES: &str = "\
IF (d_L IS close) AND (d_R IS close)  THEN  Rotate IS nothing
IF (d_L IS close) AND (d_R IS moderate)  THEN  Rotate IS low_right
IF (d_L IS close) AND (d_R IS far)  THEN  Rotate IS high_right
IF (d_L IS moderate) AND (d_R IS close)  THEN  Rotate IS low_left
IF (d_L IS far) AND (d_R IS close)  THEN  Rotate IS high_left
IF (d_L IS moderate) AND (d_R IS moderate)  THEN  Rotate IS nothing
IF (d_L IS moderate) AND (d_R IS far)  THEN  Rotate IS low_right
IF (d_L IS far) AND (d_R IS moderate)  THEN  Rotate IS low_left
IF (d_L IS far) AND (d_R IS far)  THEN  Rotate IS nothing
";

pub const GAS_RULES: &str = "\
IF (center_dist IS close)  THEN  gas IS low
IF (center_dist IS moderate)  THEN  gas IS medium
IF (center_dist IS far)  THEN  gas IS high
";

pub fn side_distance() -> VariableDomain<Distance> {
    VariableDomain::new(|term| match term {
        Distance::Close => MembershipFunction::from_points(&[(0., 1.), (50., 0.)]),
        Distance::Moderate => MembershipFunction::from_points(&[(35., 0.), (50., 1.), (65., 0.)]),
        Distance::Far => MembershipFunction::from_points(&[(50., 0.), (100., 1.)]).segment((100., f64::INFINITY), (1., 1.)),
    })
}

pub fn rotation() -> VariableDomain<Rotation> {
    VariableDomain::new(|term| match term {
        Rotation::HighRight => MembershipFunction::from_points(&[(-50., 0.), (-20., 1.), (-5., 0.)]),
        Rotation::LowRight => MembershipFunction::triangle(-20., -10., 0.),
        Rotation::Nothing => MembershipFunction::triangle(-10., 0., 10.),
        Rotation::LowLeft => MembershipFunction::triangle(0., 10., 20.),
        Rotation::HighLeft => MembershipFunction::from_points(&[(5., 0.), (20., 1.), (50., 0.)]),
    })
}

pub fn center_distance() -> VariableDomain<CenterDistance> {
    VariableDomain::new(|term| match term {
        CenterDistance::Close => MembershipFunction::from_points(&[(0., 1.), (50., 0.)]),
        CenterDistance::Moderate => MembershipFunction::from_points(&[(40., 0.), (50., 1.), (100., 0.)]),
        CenterDistance::Far => MembershipFunction::from_points(&[(90., 0.), (200., 1.)]).segment((200., f64::INFINITY), (1., 1.)),
    })
}

pub fn gas() -> VariableDomain<Gas> {
    VariableDomain::new(|term| match term {
        Gas::Low => MembershipFunction::triangle(0., 5., 10.),
        Gas::Medium => MembershipFunction::triangle(0., 15., 30.),
        Gas::High => MembershipFunction::from_points(&[(25., 0.), (30., 1.), (90., 0.)]),
    })
}

pub struct Steering {
    pub controller: FuzzyController,
    pub left: Variable<Distance>,
    pub right: Variable<Distance>,
    pub rotate: Variable<Rotation>,
}

impl Steering {
    pub fn new() -> Self {
        let mut vars = Variables::new();
        let left = vars.add_input("d_L", side_distance());
        let right = vars.add_input("d_R", side_distance());
        let rotate = vars.add_output("Rotate", rotation(), Discretization::new(-50., 50., 1.).unwrap());
        let rules: RuleSet = STEERING_RULES.parse().unwrap();
        let controller = FuzzyController::new(vars, rules).unwrap();

        Self {
            controller,
            left,
            right,
            rotate,
        }
    }

    pub fn decide(&self, left_dist: f64, right_dist: f64) -> f64 {
        let mut inputs = mamdani::Inputs::new();
        inputs.add(self.left, left_dist).add(self.right, right_dist);

        self.controller.decide(&inputs).unwrap().get(self.rotate).unwrap()
    }
}

pub struct Throttle {
    pub controller: FuzzyController,
    pub center: Variable<CenterDistance>,
    pub gas: Variable<Gas>,
}

impl Throttle {
    pub fn new() -> Self {
        let mut vars = Variables::new();
        let center = vars.add_input("center_dist", center_distance());
        let gas = vars.add_output("gas", gas(), Discretization::new(0., 100., 0.01).unwrap());
        let controller = FuzzyController::new(vars, GAS_RULES.parse().unwrap()).unwrap();

        Self { controller, center, gas }
    }

    pub fn decide(&self, center_dist: f64) -> f64 {
        let mut inputs = mamdani::Inputs::new();
        inputs.add(self.center, center_dist);

        self.controller.decide(&inputs).unwrap().single().unwrap()
    }
}
