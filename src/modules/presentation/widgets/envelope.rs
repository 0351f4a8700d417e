use crate::presentation::dom::{find_by_id_mut, find_first_by_class_mut};
use crate::presentation::markup::Element;
use crate::presentation::ports::Capabilities;

pub const OPEN_CLASS: &str = "envelope-open";
pub const TEAR_SOUND: &str = "paper_tear.mp3";

/// Opens the envelope in `slide`. Only the first call has any effect.
pub fn open_envelope(slide: &mut Element, capabilities: &Capabilities) -> bool {
    let Some(envelope) = find_first_by_class_mut(slide, "envelope-wrapper") else {
        return false;
    };
    if envelope.has_class(OPEN_CLASS) {
        return false;
    }

    capabilities.play_sound(TEAR_SOUND);
    envelope.add_class(OPEN_CLASS);

    if let Some(hint) = find_by_id_mut(slide, "click-hint") {
        hint.set_style_prop("display", "none");
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::dom::{find_by_id, find_first_by_class};
    use crate::presentation::ports::capabilities::{PlaybackError, SoundCue};
    use crate::presentation::slides::volunteer::letter_slide;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct BrokenSpeaker {
        attempts: AtomicUsize,
    }

    impl SoundCue for BrokenSpeaker {
        fn play(&self, _clip: &str) -> Result<(), PlaybackError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(PlaybackError("no audio device".into()))
        }
    }

    #[test]
    fn opens_once_even_when_sound_fails() {
        // Arrange
        let speaker = Arc::new(BrokenSpeaker {
            attempts: AtomicUsize::new(0),
        });
        let capabilities = Capabilities {
            sound: Some(speaker.clone()),
            ..Default::default()
        };
        let mut slide = letter_slide("林晓", &["见字如面。".to_string()]);

        // Act
        let first = open_envelope(&mut slide, &capabilities);
        let second = open_envelope(&mut slide, &capabilities);

        // Assert
        assert!(first);
        assert!(!second);
        assert_eq!(speaker.attempts.load(Ordering::SeqCst), 1);
        assert!(find_first_by_class(&slide, "envelope-wrapper")
            .unwrap()
            .has_class(OPEN_CLASS));
        assert_eq!(
            find_by_id(&slide, "click-hint").unwrap().style_prop("display").as_deref(),
            Some("none")
        );
    }

    #[test]
    fn opens_without_any_sound_capability() {
        let mut slide = letter_slide("林晓", &[]);

        assert!(open_envelope(&mut slide, &Capabilities::default()));
    }
}
