// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::recipe::{Stage, Step};
use yare::parameterized;

fn universe() -> Universe {
    Universe::new(["V1", "V2", "V3", "V4"]).unwrap()
}

fn recipe() -> RecipeDefinition {
    RecipeDefinition {
        name: "test".to_string(),
        init: Stage::new(["V1"].into_iter().collect(), 1.0),
        steps: vec![
            Step::new(["V1"].into_iter().collect(), 0.5),
            Step::new(["V2", "V3"].into_iter().collect(), 2.0),
        ],
        cycles: 2,
        finalize: Stage::default(),
    }
}

#[test]
fn valid_recipe_has_no_warnings() {
    assert_eq!(validate(&recipe(), &universe()), Ok(vec![]));
}

#[test]
fn presets_are_valid() {
    assert!(validate(&RecipeDefinition::ald(), &universe()).is_ok());
    assert!(validate(&RecipeDefinition::purge(), &universe()).is_ok());
}

#[test]
fn empty_step_list_is_rejected() {
    let mut r = recipe();
    r.steps.clear();
    assert_eq!(validate(&r, &universe()), Err(ValidationError::EmptySteps));
}

#[test]
fn zero_cycles_are_legal() {
    let mut r = recipe();
    r.cycles = 0;
    assert!(validate(&r, &universe()).is_ok());
}

#[parameterized(
    negative = { -1.0 },
    nan = { f64::NAN },
    infinite = { f64::INFINITY },
)]
fn invalid_step_duration_is_rejected(value: f64) {
    let mut r = recipe();
    r.steps[1].duration = value;
    let err = validate(&r, &universe()).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::InvalidDuration {
            stage: StageRef::Step(1),
            ..
        }
    ));
}

#[parameterized(
    init = { StageRef::Init },
    finalize = { StageRef::Final },
)]
fn negative_wait_is_rejected(stage: StageRef) {
    let mut r = recipe();
    match stage {
        StageRef::Init => r.init.wait = -0.5,
        _ => r.finalize.wait = -0.5,
    }
    assert_eq!(
        validate(&r, &universe()),
        Err(ValidationError::InvalidDuration { stage, value: -0.5 })
    );
}

#[test]
fn zero_durations_are_legal() {
    let mut r = recipe();
    r.init.wait = 0.0;
    r.steps[0].duration = 0.0;
    assert!(validate(&r, &universe()).is_ok());
}

#[test]
fn unknown_actuator_is_rejected() {
    let mut r = recipe();
    r.finalize.actuators.insert("V9");
    assert_eq!(
        validate(&r, &universe()),
        Err(ValidationError::UnknownActuator {
            stage: StageRef::Final,
            id: ActuatorId::from("V9"),
        })
    );
}

#[parameterized(
    empty = { "" },
    pipe = { "a|b" },
    slash = { "a/b" },
    newline = { "a\nb" },
)]
fn invalid_name_is_rejected(name: &str) {
    let mut r = recipe();
    r.name = name.to_string();
    assert!(matches!(
        validate(&r, &universe()),
        Err(ValidationError::InvalidName(_))
    ));
}

#[test]
fn empty_stages_produce_warnings() {
    let mut r = recipe();
    r.init.actuators = ActuatorSet::new();
    r.steps[1].actuators = ActuatorSet::new();
    let warnings = validate(&r, &universe()).unwrap();
    assert_eq!(
        warnings,
        vec![
            RecipeWarning::NoActuators(StageRef::Init),
            RecipeWarning::NoActuators(StageRef::Step(1)),
        ]
    );
    assert_eq!(warnings[0].to_string(), "initialization with no gas input");
    assert_eq!(warnings[1].to_string(), "step 2 with no gas input");
}

#[test]
fn empty_final_stage_is_not_a_warning() {
    let r = recipe();
    assert!(r.finalize.actuators.is_empty());
    assert!(validate(&r, &universe()).unwrap().is_empty());
}
