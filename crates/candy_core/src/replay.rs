use crate::controller::FrameInput;
use crate::input::JoystickSnapshot;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Scripted joystick recording: each frame is a raw device snapshot that is
/// decoded exactly like live input.
#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub axes: Vec<i16>,
    #[serde(default)]
    pub buttons: Vec<bool>,
    #[serde(default)]
    pub quit: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    pub fn expanded_inputs(&self) -> Vec<FrameInput> {
        let mut out = Vec::new();
        for frame in &self.frames {
            let snapshot = JoystickSnapshot::new(frame.axes.clone(), frame.buttons.clone());
            for _ in 0..frame.repeat.max(1) {
                out.push(FrameInput::poll(frame.quit, &snapshot));
            }
        }
        out
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(replay)
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Rect;
    use crate::config::GameConfig;
    use crate::controller::{ExitReason, GameLoop, LoopState};
    use crate::entity::TextureKey;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "candy_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn replay_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{
              "frames": [
                { "axes": [5, 0], "repeat": 3 },
                { "buttons": [false, true] }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let expanded = replay.expanded_inputs();
        assert_eq!(expanded.len(), 4);
        assert!(expanded[0].direction.right());
        assert_eq!(expanded[3].button, Some(1));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn empty_replay_is_rejected() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frames": [] }"#).expect("write replay file");

        let err = load_replay_from_path(&path).expect_err("empty replay should fail");
        assert!(err.contains("frames list is empty"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_drives_cake_around_and_exits_on_start() {
        let path = temp_file_path("session");
        fs::write(
            &path,
            r#"{
              "frames": [
                { "axes": [32767, 32767], "repeat": 5 },
                { "axes": [0, 0], "buttons": [false, true], "repeat": 2 },
                { "axes": [-1, 0, 9000], "repeat": 2 },
                { "buttons": [false, false, false, false, false, false, false, false, false, true] },
                { "axes": [32767, 0], "repeat": 10 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let mut game = GameLoop::new(GameConfig::default());
        for input in replay.expanded_inputs() {
            if !game.tick(input).is_running() {
                break;
            }
        }

        assert_eq!(game.state(), LoopState::Exiting(ExitReason::StartButton));
        assert_eq!(game.entity().rect, Rect::new(30, 50, 88, 88));
        assert_eq!(game.entity().texture, TextureKey::Cake(2));
        assert_eq!(game.ticks(), 10);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn quit_frame_stops_replay() {
        let path = temp_file_path("quit");
        fs::write(
            &path,
            r#"{ "frames": [ { "axes": [0, 1], "repeat": 2 }, { "quit": true }, { "axes": [0, 1] } ] }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let mut game = GameLoop::new(GameConfig::default());
        for input in replay.expanded_inputs() {
            game.tick(input);
        }
        assert_eq!(game.state(), LoopState::Exiting(ExitReason::QuitEvent));
        assert_eq!(game.entity().rect.y, 20);

        let _ = fs::remove_file(path);
    }
}
