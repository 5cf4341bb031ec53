//! Speech engine backed by a system synthesizer process
//!
//! Drives whichever command-line synthesizer the host has installed
//! (espeak-ng, espeak, macOS `say`, or speech-dispatcher's `spd-say`).
//! Each utterance is one short-lived child process; cancelling speech kills
//! the child.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Mutex;
use tokio::process::{Child, Command};
use tracing::debug;

use super::{SpeechEngine, Utterance, Voice};
use crate::error::{DeviceError, Result};

/// Synthesizers probed for, in preference order.
const KNOWN_SYNTHESIZERS: [&str; 4] = ["espeak-ng", "espeak", "say", "spd-say"];

/// Baseline espeak speaking rate in words per minute (rate multiplier 1.0).
const BASE_WPM: f32 = 175.0;

pub struct CommandSpeech {
    program: String,
    current: Mutex<Option<Child>>,
}

impl CommandSpeech {
    /// Probe for a usable synthesizer.
    ///
    /// An explicit `override_program` wins if it resolves on PATH;
    /// otherwise the known synthesizers are tried in order.
    pub fn detect(override_program: Option<&str>) -> Option<Self> {
        let candidates: Vec<&str> = override_program
            .into_iter()
            .chain(KNOWN_SYNTHESIZERS)
            .collect();

        for candidate in candidates {
            if is_on_path(candidate) {
                return Some(Self {
                    program: candidate.to_string(),
                    current: Mutex::new(None),
                });
            }
        }
        None
    }

    /// Command-line arguments for one utterance on this synthesizer family.
    fn build_args(&self, utterance: &Utterance, voice: Option<&Voice>) -> Vec<String> {
        match self.program.as_str() {
            "say" => {
                // macOS say: rate in wpm, voice by name
                let mut args = vec![
                    "-r".to_string(),
                    format!("{:.0}", BASE_WPM * utterance.rate),
                ];
                if let Some(voice) = voice {
                    args.push("-v".to_string());
                    args.push(voice.id.clone());
                }
                args.push(utterance.text.clone());
                args
            }
            "spd-say" => {
                // spd-say: rate and volume in -100..100, waits with -w off by default
                let rate = ((utterance.rate - 1.0) * 100.0).clamp(-100.0, 100.0);
                let pitch = ((utterance.pitch - 1.0) * 100.0).clamp(-100.0, 100.0);
                let volume = ((utterance.volume * 2.0 - 1.0) * 100.0).clamp(-100.0, 100.0);
                let mut args = vec![
                    "-r".to_string(),
                    format!("{:.0}", rate),
                    "-p".to_string(),
                    format!("{:.0}", pitch),
                    "-i".to_string(),
                    format!("{:.0}", volume),
                ];
                if let Some(voice) = voice {
                    args.push("-l".to_string());
                    args.push(voice.locale.clone());
                }
                args.push(utterance.text.clone());
                args
            }
            _ => {
                // espeak family: wpm, pitch 0-99, amplitude 0-200
                let pitch = (50.0 * utterance.pitch).clamp(0.0, 99.0);
                let amplitude = (100.0 * utterance.volume).clamp(0.0, 200.0);
                let mut args = vec![
                    "-s".to_string(),
                    format!("{:.0}", BASE_WPM * utterance.rate),
                    "-p".to_string(),
                    format!("{:.0}", pitch),
                    "-a".to_string(),
                    format!("{:.0}", amplitude),
                ];
                if let Some(voice) = voice {
                    args.push("-v".to_string());
                    args.push(voice.id.clone());
                }
                args.push(utterance.text.clone());
                args
            }
        }
    }
}

#[async_trait]
impl SpeechEngine for CommandSpeech {
    async fn speak(&self, utterance: &Utterance, voice: Option<&Voice>) -> Result<()> {
        let args = self.build_args(utterance, voice);
        debug!(program = %self.program, "spawning synthesizer");

        let child = Command::new(&self.program)
            .args(&args)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| DeviceError::Synthesis(format!("{}: {}", self.program, e)))?;

        *self.current.lock().unwrap() = Some(child);
        Ok(())
    }

    async fn stop(&self) {
        let child = self.current.lock().unwrap().take();
        if let Some(mut child) = child {
            // Already-exited children make kill a no-op
            let _ = child.start_kill();
        }
    }

    async fn voices(&self) -> Vec<Voice> {
        if !self.program.starts_with("espeak") {
            // Only the espeak family has a parseable voice listing
            return Vec::new();
        }

        let output = Command::new(&self.program)
            .arg("--voices")
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                parse_espeak_voices(&String::from_utf8_lossy(&output.stdout))
            }
            _ => Vec::new(),
        }
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// Check whether `program` resolves to an executable on PATH.
fn is_on_path(program: &str) -> bool {
    if program.contains('/') {
        return Path::new(program).is_file();
    }

    let Some(path) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&path).any(|dir| dir.join(program).is_file())
}

/// Parse `espeak --voices` output.
///
/// Format: `Pty Language Age/Gender VoiceName File Other Languages`,
/// one voice per line after the header.
fn parse_espeak_voices(output: &str) -> Vec<Voice> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 {
                return None;
            }
            Some(Voice {
                id: fields[3].to_string(),
                locale: fields[1].to_string(),
            })
        })
        .collect()
}
