//! `ald check` specs

use crate::prelude::*;

#[test]
fn ald_preset_estimate() {
    let temp = Project::empty();
    temp.ald()
        .args(&["check", "--preset", "ald"])
        .passes()
        .stdout_has("Recipe:      ALD")
        .stdout_has("Cycles:      100 x 4 steps")
        .stdout_has("Cycle time:  0:00:40")
        .stdout_has("Total time:  01:07:00")
        .stdout_has("Ending time: ");
}

#[test]
fn recipe_file_estimate() {
    let temp = Project::quick();
    temp.ald()
        .args(&["check", "quick.toml"])
        .passes()
        .stdout_has("Recipe:      Quick")
        .stdout_has("Cycle time:  0:00:00.200000");
}

#[test]
fn empty_step_is_a_warning() {
    let temp = Project::quick();
    temp.file(
        "gap.toml",
        r#"
name = "Gap"
cycles = 1

[[steps]]
actuators = ["A"]
duration = 1.0

[[steps]]
duration = 1.0
"#,
    );
    temp.ald()
        .args(&["check", "gap.toml"])
        .passes()
        .stderr_has("warning: step 2 with no gas input");
}

#[test]
fn unknown_actuator_fails_validation() {
    let temp = Project::quick();
    temp.file(
        "stray.toml",
        r#"
name = "Stray"
cycles = 1

[[steps]]
actuators = ["A", "Z"]
duration = 1.0
"#,
    );
    temp.ald()
        .args(&["check", "stray.toml"])
        .fails()
        .stderr_has("Recipe 'Stray' is invalid")
        .stderr_has("unknown actuator Z");
}

#[test]
fn negative_duration_fails_validation() {
    let temp = Project::quick();
    temp.file(
        "backwards.toml",
        "name = \"Backwards\"\ncycles = 1\n\n[[steps]]\nactuators = [\"A\"]\nduration = -1.0\n",
    );
    temp.ald()
        .args(&["check", "backwards.toml"])
        .fails()
        .stderr_has("step 1: duration -1");
}

#[test]
fn json_estimate() {
    let temp = Project::empty();
    let out = temp
        .ald()
        .args(&["check", "--preset", "purge", "--json"])
        .passes();
    let estimate: serde_json::Value = serde_json::from_str(out.stdout.trim()).unwrap();
    assert_eq!(estimate["event"], "estimate");
    assert_eq!(estimate["recipe"], "Purge");
    assert_eq!(estimate["total_seconds"], 181.0);
}
