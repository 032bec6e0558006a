//! Alarm sound playback over `HtmlAudioElement`.

use reminder_core::sound_path;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

pub struct AlarmAudio {
    element: HtmlAudioElement,
}

impl AlarmAudio {
    /// Load `sound_id`; the sound loops until stopped
    pub fn looping(sound_id: &str) -> Option<Self> {
        let audio = Self::load(sound_id)?;
        audio.element.set_loop(true);
        Some(audio)
    }

    fn load(sound_id: &str) -> Option<Self> {
        match HtmlAudioElement::new_with_src(&sound_path(sound_id)) {
            Ok(element) => Some(Self { element }),
            Err(e) => {
                web_sys::console::error_2(&"[AUDIO] Failed to create audio element:".into(), &e);
                None
            }
        }
    }

    pub fn play(&self) {
        match self.element.play() {
            Ok(promise) => leptos::task::spawn_local(async move {
                // Autoplay may be blocked until the user interacts with the page
                if let Err(e) = JsFuture::from(promise).await {
                    web_sys::console::warn_2(&"[AUDIO] Playback rejected:".into(), &e);
                }
            }),
            Err(e) => web_sys::console::warn_2(&"[AUDIO] Playback failed:".into(), &e),
        }
    }

    /// Silence without stopping playback
    pub fn set_muted(&self, muted: bool) {
        self.element.set_muted(muted);
    }

    pub fn stop(&self) {
        let _ = self.element.pause();
        self.element.set_current_time(0.0);
    }
}

impl Drop for AlarmAudio {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Play a sound once, for the settings preview
pub fn preview(sound_id: &str) {
    let Ok(element) = HtmlAudioElement::new_with_src(&sound_path(sound_id)) else {
        return;
    };
    if let Ok(promise) = element.play() {
        leptos::task::spawn_local(async move {
            let _ = JsFuture::from(promise).await;
        });
    }
}
