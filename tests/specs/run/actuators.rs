//! `ald run` with shell-command actuator drivers

use crate::prelude::*;

#[test]
fn commands_follow_the_recipe() {
    let temp = Project::empty();
    temp.file("ald.toml", TRACING_CONFIG);
    temp.file(
        "once.toml",
        r#"
name = "Once"
cycles = 1

[[steps]]
actuators = ["A"]
duration = 0.1

[[steps]]
actuators = ["B"]
duration = 0.1
"#,
    );

    temp.ald().args(&["run", "once.toml"]).passes();

    let trace: Vec<String> = temp.read("trace.txt").lines().map(str::to_string).collect();
    // step sequence, then the closing sweep over the whole universe
    assert_eq!(trace, ["+A", "-A", "+B", "-B", "-A", "-B"]);
}

#[test]
fn held_actuator_stays_open_across_steps() {
    let temp = Project::empty();
    temp.file("ald.toml", TRACING_CONFIG);
    temp.file(
        "hold.toml",
        r#"
name = "Hold"
cycles = 1

[[steps]]
actuators = ["A"]
duration = 0.1

[[steps]]
actuators = ["A", "B"]
duration = 0.1
"#,
    );

    temp.ald().args(&["run", "hold.toml"]).passes();

    let trace = temp.read("trace.txt");
    assert_eq!(trace.matches("+A").count(), 1, "{trace}");
    assert!(trace.starts_with("+A\n+B\n"), "{trace}");
}

#[test]
fn failing_actuator_is_reported_and_run_continues() {
    let temp = Project::empty();
    temp.file(
        "ald.toml",
        r#"
log_root = "Logs"

[[actuator]]
id = "A"
activate = "echo relay stuck >&2; exit 3"
deactivate = "true"

[[actuator]]
id = "B"
activate = "true"
deactivate = "true"
"#,
    );
    temp.file("quick.toml", QUICK_RECIPE);

    temp.ald()
        .args(&["run", "quick.toml"])
        .passes()
        .stdout_has("error: activate A failed: relay stuck")
        .stdout_has("Run normal: 2/2 cycles");
}

#[test]
fn abort_policy_ends_the_run_as_forced() {
    let temp = Project::empty();
    temp.file(
        "ald.toml",
        r#"
log_root = "Logs"
on_actuator_failure = "abort"

[[actuator]]
id = "A"
activate = "exit 3"
deactivate = "true"

[[actuator]]
id = "B"
activate = "true"
deactivate = "true"
"#,
    );
    temp.file("quick.toml", QUICK_RECIPE);

    temp.ald()
        .args(&["run", "quick.toml"])
        .exits(2)
        .stdout_has("aborted: all actuators closed")
        .stdout_has("Run forced: 0/2 cycles");

    let log = std::fs::read_to_string(&temp.logs()[0]).unwrap();
    assert!(log.contains("ending           forced\n"));
}
