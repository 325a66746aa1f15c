/// Player intents decoded from keyboard keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    MoveLeft,
    MoveRight,
    Toggle,
    ToggleDebug,
    Fire,
}

impl KeyAction {
    /// Map a DOM `KeyboardEvent.key` value.
    #[inline]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "h" => Some(Self::MoveLeft),
            "ArrowRight" | "l" => Some(Self::MoveRight),
            "Enter" => Some(Self::Toggle),
            "d" => Some(Self::ToggleDebug),
            " " => Some(Self::Fire),
            _ => None,
        }
    }
}
