#![cfg(feature = "virtual")]

use gameinput::{
    Controller, GamepadState, Influence, InputConfig, InputEvent, InputSource, PointerAxis,
    VirtualSource,
};

const LAYOUT: &str = r#"{
    "name": "fps",
    "buttons": [
        { "id": "jump", "influences": [ { "keys": [" "] }, { "gpButtons": [0] } ] },
        { "id": "fire", "influences": [ { "mouseButtons": [0], "gpAxes": [5] } ] }
    ],
    "axes": [
        { "id": "forward", "influences": [
            { "keys": ["w"], "value": 1.0 },
            { "keys": ["s"], "value": -1.0 },
            { "gpAxes": [1], "value": 0.0, "gamepadAxisScale": -1.0 }
        ] },
        { "id": "look", "influences": [
            { "mouseAxes": [0, 1], "value": 0.0, "pointerAxisScale": 0.5 }
        ] }
    ]
}"#;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn layout() -> InputConfig {
    InputConfig::from_json_str(LAYOUT).unwrap()
}

#[test]
fn forward_axis_prefers_first_influence() {
    let mut input = Controller::new();
    let forward = input.create_axis("forward").unwrap();
    forward.add_influence(Influence::new().key("w").with_value(1.0));
    forward.add_influence(Influence::new().key("s").with_value(-1.0));

    input.set_key_state("w", true);
    assert_eq!(input.axis_value("forward").unwrap(), 1.0);

    input.set_key_state("s", true);
    assert_eq!(input.axis_value("forward").unwrap(), 1.0);

    input.set_key_state("w", false);
    assert_eq!(input.axis_value("forward").unwrap(), -1.0);

    input.set_key_state("s", false);
    assert_eq!(input.axis_value("forward").unwrap(), 0.0);
}

#[test]
fn reordering_influences_changes_the_winner() {
    let mut input = Controller::new();
    input.set_key_state("w", true);
    input.set_key_state("s", true);

    let a = input.create_axis("a").unwrap();
    a.add_influence(Influence::new().key("s").with_value(-1.0));
    a.add_influence(Influence::new().key("w").with_value(1.0));

    assert_eq!(input.axis_value("a").unwrap(), -1.0);
}

#[test]
fn jump_follows_gamepad_lifecycle() {
    init_logging();
    let mut input = Controller::new();
    input
        .create_button("jump")
        .unwrap()
        .add_influence(Influence::new().gp_button(0));

    assert!(!input.button_value("jump").unwrap());

    let mut pad = VirtualSource::new("virtual:pad", "Virtual Pad");
    pad.connect_gamepad(0).press_gamepad_button(0, 0);
    input.add_source(pad);
    assert_eq!(input.poll_sources(), 2);
    assert!(input.button_value("jump").unwrap());

    input.apply(&InputEvent::GamepadDisconnected { index: 0 });
    assert!(!input.button_value("jump").unwrap());
}

#[test]
fn explicit_gamepad_out_of_range_reads_defaults() {
    let mut input = Controller::new();
    input.register_gamepad(GamepadState::standard(0, "only pad"));
    input.set_gamepad_button(0, 0, true);
    input.set_gamepad_axis(0, 0, 1.0);

    input
        .get_or_create_button("p4")
        .add_influence(Influence::new().gp_button(0).gamepad(3));
    input
        .get_or_create_axis("p4")
        .add_influence(Influence::new().gp_axis(0).gamepad(3).with_value(1.0));

    assert!(!input.button_value("p4").unwrap());
    assert_eq!(input.axis_value("p4").unwrap(), 0.0);
}

#[test]
fn pointer_motion_tie_break_keeps_sign() {
    let mut input = Controller::new();
    input.load_config(&layout()).unwrap();

    input.add_pointer_movement(-3.0, 2.0);
    assert_eq!(input.axis_value("look").unwrap(), -1.5);
}

#[test]
fn movement_button_does_not_release_itself_within_a_frame() {
    let mut input = Controller::new();
    input
        .get_or_create_button("flick")
        .add_influence(Influence::new().mouse_axis(PointerAxis::X));

    input.add_pointer_movement(12.0, 0.0);
    assert!(input.button_value("flick").unwrap());
    assert!(input.button_value("flick").unwrap());

    let frame = input.tick();
    assert!(frame.button("flick"));
    assert!(!input.button_value("flick").unwrap());
}

#[test]
fn loading_twice_duplicates_without_changing_values() {
    init_logging();
    let cfg = layout();
    let mut once = Controller::new();
    once.load_config(&cfg).unwrap();
    let mut twice = Controller::new();
    twice.load_config(&cfg).unwrap();
    twice.load_config(&cfg).unwrap();

    for name in ["jump", "fire"] {
        assert_eq!(
            twice.button(name).unwrap().influence_count(),
            2 * once.button(name).unwrap().influence_count()
        );
    }
    assert_eq!(twice.axis("forward").unwrap().influence_count(), 6);

    for input in [&mut once, &mut twice] {
        input.set_key_state("s", true);
        input.set_key_state(" ", true);
    }
    assert_eq!(once.snapshot(), twice.snapshot());
    assert_eq!(twice.axis_value("forward").unwrap(), -1.0);
    assert!(twice.button_value("jump").unwrap());
}

#[test]
fn invalid_layout_leaves_controller_untouched() {
    let mut input = Controller::new();
    let cfg = InputConfig::from_json_str(
        r#"{
            "buttons": [ { "id": "jump", "influences": [ { "keys": [" "] } ] } ],
            "axes": [ { "id": "bad", "influences": [ { "mouseAxes": [7], "value": 1 } ] } ]
        }"#,
    )
    .unwrap();
    assert!(input.load_config(&cfg).is_err());
    assert!(!input.has_button("jump"));
    assert!(!input.has_axis("bad"));
}

#[test]
fn exported_layout_behaves_identically() {
    let mut exporter = Controller::new();
    exporter.load_config(&layout()).unwrap();
    exporter
        .get_or_create_axis("strafe")
        .add_influence(
            Influence::new()
                .gp_axis(0)
                .gamepad(1)
                .with_value(0.0)
                .gamepad_axis_scale(3.0),
        );

    let json = exporter.to_config(Some("export")).to_json_string().unwrap();
    let mut restored = Controller::new();
    restored
        .load_config(&InputConfig::from_json_str(&json).unwrap())
        .unwrap();

    let scripts: Vec<Vec<InputEvent>> = vec![
        vec![],
        vec![InputEvent::key_down("w"), InputEvent::key_down(" ")],
        vec![InputEvent::key_down("s")],
        vec![InputEvent::PointerMoved {
            x: 10.0,
            y: 10.0,
            dx: 1.0,
            dy: -4.0,
        }],
        vec![InputEvent::PointerDown {
            button: 0,
            x: 1.0,
            y: 1.0,
        }],
        vec![
            InputEvent::GamepadConnected(GamepadState::standard(1, "p2")),
            InputEvent::GamepadAxis {
                index: 1,
                axis: 0,
                value: -0.25,
            },
            InputEvent::GamepadAxis {
                index: 1,
                axis: 1,
                value: 0.5,
            },
            InputEvent::GamepadAxis {
                index: 1,
                axis: 5,
                value: 0.1,
            },
        ],
    ];

    for script in scripts {
        for event in &script {
            exporter.apply(event);
            restored.apply(event);
        }
        assert_eq!(exporter.snapshot(), restored.snapshot());
        exporter.end_frame();
        restored.end_frame();
    }
}

#[test]
fn toml_layout_file_loads() {
    let path = std::env::temp_dir().join(format!("gameinput-{}.toml", std::process::id()));
    let text = layout().to_toml_string().unwrap();
    std::fs::write(&path, text).unwrap();

    let mut input = Controller::new();
    let result = input.load_config_file(&path);
    let _ = std::fs::remove_file(&path);
    result.unwrap();

    assert_eq!(
        input.axis_names().collect::<Vec<_>>(),
        ["forward", "look"]
    );
    assert_eq!(input.button_names().collect::<Vec<_>>(), ["fire", "jump"]);
}

#[test]
fn virtual_source_reports_identity() {
    let src = VirtualSource::new("virtual:kbd", "Keyboard Script");
    assert_eq!(src.id(), "virtual:kbd");
    assert_eq!(src.name(), "Keyboard Script");
}
