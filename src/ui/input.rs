//! Keyboard and mouse input mapping.
//!
//! Pure functions that convert imgui key state into session commands.

use sb_master::Command;

/// Toggle keys fire once per press; held arrows and tempo keys repeat.
const TOGGLES: &[(imgui::Key, Command)] = &[
    (imgui::Key::Space, Command::TogglePause),
    (imgui::Key::B, Command::ToggleBlend),
    (imgui::Key::P, Command::TogglePingPong),
    (imgui::Key::M, Command::ToggleMusic),
];

const REPEATING: &[(imgui::Key, Command)] = &[
    (imgui::Key::UpArrow, Command::FpsUp),
    (imgui::Key::DownArrow, Command::FpsDown),
    (imgui::Key::RightArrow, Command::StepForward),
    (imgui::Key::LeftArrow, Command::StepBackward),
    // '+' shares the '=' key on most layouts
    (imgui::Key::Equal, Command::BpmUp),
    (imgui::Key::KeypadAdd, Command::BpmUp),
    (imgui::Key::Minus, Command::BpmDown),
    (imgui::Key::KeypadSubtract, Command::BpmDown),
];

/// Poll imgui input state and return all triggered commands.
pub fn poll_commands(ui: &imgui::Ui) -> Vec<Command> {
    if ui.io().want_text_input {
        return Vec::new();
    }

    let mut commands = Vec::new();

    for &(key, command) in TOGGLES {
        if ui.is_key_pressed_no_repeat(key) {
            commands.push(command);
        }
    }
    for &(key, command) in REPEATING {
        if ui.is_key_pressed(key) {
            commands.push(command);
        }
    }

    if ui.is_mouse_clicked(imgui::MouseButton::Left) || ui.is_mouse_clicked(imgui::MouseButton::Right) {
        commands.push(Command::ActivateAudio);
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_key_bound_once() {
        let keys: HashSet<_> = TOGGLES.iter().chain(REPEATING).map(|(k, _)| *k as u32).collect();
        assert_eq!(keys.len(), TOGGLES.len() + REPEATING.len());
    }

    #[test]
    fn all_keyboard_commands_reachable() {
        let bound: HashSet<Command> = TOGGLES.iter().chain(REPEATING).map(|(_, c)| *c).collect();
        for command in [
            Command::TogglePause,
            Command::FpsUp,
            Command::FpsDown,
            Command::StepForward,
            Command::StepBackward,
            Command::ToggleBlend,
            Command::TogglePingPong,
            Command::ToggleMusic,
            Command::BpmUp,
            Command::BpmDown,
        ] {
            assert!(bound.contains(&command), "{:?} has no key", command);
        }
    }
}
