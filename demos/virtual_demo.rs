use gameinput::{Controller, Influence, InputConfig, VirtualSource};

const LAYOUT: &str = r#"{
    "name": "demo",
    "buttons": [ { "id": "jump", "influences": [ { "keys": [" "], "gpButtons": [0] } ] } ],
    "axes": [
        { "id": "forward", "influences": [
            { "keys": ["w"], "value": 1.0 },
            { "keys": ["s"], "value": -1.0 },
            { "gpAxes": [1], "value": 0.0, "gamepadAxisScale": -1.0 }
        ] }
    ]
}"#;

fn main() -> gameinput::Result<()> {
    let mut input = Controller::new();
    input.load_config(&InputConfig::from_json_str(LAYOUT)?)?;
    input
        .get_or_create_axis("turn")
        .add_influence(Influence::new().mouse_axis(gameinput::PointerAxis::X).with_value(0.0));

    // Script a frame: a key, some pointer motion and a pad pushing its left stick up
    let mut source = VirtualSource::new("virtual:demo", "Demo Source");
    source
        .press_key("w")
        .move_pointer(320.0, 240.0, 6.5, 0.0)
        .connect_gamepad(0)
        .set_gamepad_axis(0, 1, -0.8)
        .press_gamepad_button(0, 0);
    input.add_source(source);

    let frame = input.tick();
    for name in input.axis_names() {
        println!("(Virtual) axis {} = {}", name, frame.axis(name));
    }
    for name in input.button_names() {
        println!("(Virtual) button {} pressed = {}", name, frame.button(name));
    }

    // Deltas were cleared by tick, keys and pads keep their state
    let next = input.tick();
    println!("(Virtual) next frame turn = {}", next.axis("turn"));
    println!("(Virtual) next frame forward = {}", next.axis("forward"));
    Ok(())
}
