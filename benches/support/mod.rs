//! Shared helpers for benchmarks

/// Card text with `pairs` sensor pairs followed by a three-device group
#[allow(dead_code)]
pub fn make_card(pairs: usize) -> String {
    let mut text =
        String::from("type: picture-elements\nimage: /local/images/1st_floor.png\nelements:\n");
    for id in 0..pairs {
        for (suffix, prefix) in [("temp", "🌡️".to_string()), ("humidity", format!("{id} 💧"))] {
            text.push_str(&format!(
                "  - type: state-label\n    entity: sensor.temp_1f_{id}_{suffix}\n    prefix: {prefix}\n    style:\n      left: {left}%\n      top: {top}%\n      color: red\n      font-size: 14px\n",
                left = id % 100,
                top = (id * 7) % 100,
            ));
        }
    }
    for top in ["24%", "49%", "68%"] {
        text.push_str(&format!(
            "  - type: image\n    entity: switch.switch_humidifier_1f_floor\n    state_image:\n      'on': /local/images/gif/on_humidifier.gif\n      'off': /local/images/gif/off_humidifier.png\n    style:\n      left: 60%\n      top: {top}\n      width: 15%\n"
        ));
    }
    text
}
