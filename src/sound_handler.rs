use crate::state::Bounce;
use egui::ahash::HashMap;
use quad_snd::{AudioContext, PlaySoundParams, Sound as SndSound};
use std::fs;
use std::path::Path;

macro_rules! define_sounds {
    ($($variant:ident => $file:literal),+ $(,)?) => {
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub enum Sound {
            $($variant),+
        }

        impl Sound {
            pub const ALL: &'static [Sound] = &[
                $(Sound::$variant),+
            ];

            pub const fn file_name(self) -> &'static str {
                match self {
                    $(Sound::$variant => $file),+
                }
            }
        }
    };
}

define_sounds! {
    Wall   => "wall.wav",
    Corner => "corner.wav",
}

impl From<Bounce> for Sound {
    fn from(bounce: Bounce) -> Self {
        match bounce {
            Bounce::Wall => Sound::Wall,
            Bounce::Corner => Sound::Corner,
        }
    }
}

pub struct SoundHandler {
    sounds: HashMap<Sound, SndSound>,
    audio_context: AudioContext,
    pub muted: bool,
}

impl SoundHandler {
    pub fn new(sounds_dir: &Path) -> Self {
        let mut sounds: HashMap<Sound, SndSound> = HashMap::default();

        let audio_context = AudioContext::new();

        for sound in Sound::ALL {
            let full_path = sounds_dir.join(sound.file_name());
            match fs::read(&full_path) {
                Ok(bytes) => {
                    let snd = SndSound::load(&audio_context, &bytes);
                    sounds.insert(*sound, snd);
                }
                Err(err) => {
                    log::warn!("sound {} not loaded: {}", full_path.display(), err);
                }
            }
        }

        SoundHandler {
            sounds,
            audio_context,
            muted: false,
        }
    }

    pub fn play(&self, sound: Sound) {
        if self.muted {
            return;
        }
        if let Some(sound) = self.sounds.get(&sound) {
            sound.play(&self.audio_context, PlaySoundParams::default());
        }
    }

    /// One sound per frame, the loudest kind wins.
    pub fn play_bounces(&self, bounces: &[Bounce]) {
        let loudest = bounces
            .iter()
            .copied()
            .max_by_key(|bounce| *bounce == Bounce::Corner);
        if let Some(bounce) = loudest {
            self.play(bounce.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounce_maps_to_sound() {
        assert_eq!(Sound::from(Bounce::Wall), Sound::Wall);
        assert_eq!(Sound::from(Bounce::Corner), Sound::Corner);
        assert_eq!(Sound::Corner.file_name(), "corner.wav");
        assert_eq!(Sound::ALL.len(), 2);
    }
}
