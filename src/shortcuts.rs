use web_sys::KeyboardEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Mac,
    Other,
}

impl Platform {
    pub fn from_user_agent(user_agent: &str) -> Self {
        if user_agent.contains("Mac") {
            Platform::Mac
        } else {
            Platform::Other
        }
    }

    pub fn detect() -> Self {
        Self::from_user_agent(&crate::browser::user_agent())
    }
}

/// The parts of a key press that shortcut matching looks at.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyChord {
    pub key: String,
    pub meta: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyChord {
    pub fn from_event(event: &KeyboardEvent) -> Self {
        Self {
            key: event.key(),
            meta: event.meta_key(),
            ctrl: event.ctrl_key(),
            shift: event.shift_key(),
            alt: event.alt_key(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    OpenPopup,
    QuickSave,
}

impl Shortcut {
    fn key(self) -> &'static str {
        match self {
            Shortcut::OpenPopup => "s",
            Shortcut::QuickSave => "b",
        }
    }

    /// Exactly the platform modifier plus shift plus the shortcut's letter.
    pub fn matches(self, platform: Platform, chord: &KeyChord) -> bool {
        let (primary, other) = match platform {
            Platform::Mac => (chord.meta, chord.ctrl),
            Platform::Other => (chord.ctrl, chord.meta),
        };
        primary && !other && chord.shift && !chord.alt && chord.key.eq_ignore_ascii_case(self.key())
    }
}

pub fn is_open_popup_shortcut(platform: Platform, chord: &KeyChord) -> bool {
    Shortcut::OpenPopup.matches(platform, chord)
}

pub fn is_quick_save_shortcut(platform: Platform, chord: &KeyChord) -> bool {
    Shortcut::QuickSave.matches(platform, chord)
}

pub fn classify(platform: Platform, chord: &KeyChord) -> Option<Shortcut> {
    [Shortcut::OpenPopup, Shortcut::QuickSave]
        .into_iter()
        .find(|s| s.matches(platform, chord))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAC_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) AppleWebKit/605.1.15";
    const LINUX_UA: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

    fn chord(key: &str, meta: bool, ctrl: bool, shift: bool) -> KeyChord {
        KeyChord {
            key: key.into(),
            meta,
            ctrl,
            shift,
            alt: false,
        }
    }

    #[test]
    fn detects_platform_from_user_agent() {
        assert_eq!(Platform::from_user_agent(MAC_UA), Platform::Mac);
        assert_eq!(Platform::from_user_agent(LINUX_UA), Platform::Other);
    }

    #[test]
    fn mac_uses_command() {
        assert!(is_open_popup_shortcut(Platform::Mac, &chord("s", true, false, true)));
        assert!(is_quick_save_shortcut(Platform::Mac, &chord("B", true, false, true)));
        assert!(!is_open_popup_shortcut(Platform::Mac, &chord("s", false, true, true)));
    }

    #[test]
    fn others_use_control() {
        assert!(is_open_popup_shortcut(Platform::Other, &chord("S", false, true, true)));
        assert!(is_quick_save_shortcut(Platform::Other, &chord("b", false, true, true)));
        assert!(!is_quick_save_shortcut(Platform::Other, &chord("b", true, false, true)));
    }

    #[test]
    fn rejects_inexact_combinations() {
        let p = Platform::Other;
        assert!(!is_open_popup_shortcut(p, &chord("s", false, true, false)));
        assert!(!is_open_popup_shortcut(p, &chord("s", true, true, true)));
        assert!(!is_open_popup_shortcut(p, &chord("b", false, true, true)));
        assert!(!is_quick_save_shortcut(p, &chord("x", false, true, true)));

        let mut with_alt = chord("b", false, true, true);
        with_alt.alt = true;
        assert!(!is_quick_save_shortcut(p, &with_alt));
    }

    #[test]
    fn classifies_chords() {
        let p = Platform::Mac;
        assert_eq!(classify(p, &chord("s", true, false, true)), Some(Shortcut::OpenPopup));
        assert_eq!(classify(p, &chord("b", true, false, true)), Some(Shortcut::QuickSave));
        assert_eq!(classify(p, &chord("k", true, false, true)), None);
    }
}
