//! AMInet action vocabulary and payload rendering

use std::fmt;

/// Playback transport commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlaybackCommand {
    /// Start playback of the cued selection
    Play,
    /// Stop playback
    Stop,
    /// Play the cued selection in a loop
    LoopPlay,
    /// Freeze on the current frame
    Still,
    /// Pause playback
    Pause,
}

impl PlaybackCommand {
    /// Two-letter wire code
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Play => "PL",
            Self::Stop => "RJ",
            Self::LoopPlay => "LP",
            Self::Still => "ST",
            Self::Pause => "PA",
        }
    }
}

impl fmt::Display for PlaybackCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Play => "Play",
            Self::Stop => "Stop",
            Self::LoopPlay => "LoopPlay",
            Self::Still => "Still",
            Self::Pause => "Pause",
        };
        write!(f, "{name}")
    }
}

/// Media streams that can be switched on or off per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StreamKind {
    /// Still-image output
    Image,
    /// Video output
    Video,
    /// Audio output
    Audio,
}

impl StreamKind {
    /// Two-letter wire code
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Image => "IM",
            Self::Video => "VD",
            Self::Audio => "AD",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Image => "Image",
            Self::Video => "Video",
            Self::Audio => "Audio",
        };
        write!(f, "{name}")
    }
}

/// A device command, one of the five AMInet action kinds
///
/// Channels are carried as text because the wire format splices them straight
/// into the ASCII payload; `"1"` addresses the first channel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Playback transport control on one channel
    Playback {
        /// Transport command to execute
        command: PlaybackCommand,
        /// Target channel
        channel: String,
    },
    /// Enable or disable one of a channel's media streams
    SetStream {
        /// Stream to switch
        stream: StreamKind,
        /// `true` enables the stream, `false` disables it
        enabled: bool,
        /// Target channel
        channel: String,
    },
    /// Cue a file by name or clip number (`SE`)
    SelectFile {
        /// File name, or a clip number sent bare
        name: String,
        /// Target channel
        channel: String,
    },
    /// Replace the banner text shown by the device (`BT`)
    BannerText {
        /// Text to display
        text: String,
        /// Target channel
        channel: String,
    },
    /// Raw command passed through verbatim (the codec appends the terminator)
    Custom {
        /// Complete command string, e.g. `"1PL"`
        command: String,
    },
}

impl Action {
    /// Render the ASCII command payload, without the trailing carriage return
    #[must_use]
    pub fn command_text(&self) -> String {
        match self {
            Self::Playback { command, channel } => {
                format!("{channel}{}", command.code())
            }
            Self::SetStream {
                stream,
                enabled,
                channel,
            } => {
                let flag = if *enabled { '1' } else { '0' };
                format!("{flag}{channel}{}", stream.code())
            }
            Self::SelectFile { name, channel } => {
                if is_numeric(name) {
                    format!("{name}{channel}SE")
                } else {
                    format!("\"{name}\"{channel}SE")
                }
            }
            Self::BannerText { text, channel } => format!("{text}{channel}BT"),
            Self::Custom { command } => command.clone(),
        }
    }

    /// Whether the device answers this action with the `R` acknowledgement
    ///
    /// Custom commands may elicit arbitrary replies (a status query returns
    /// data, not an ACK), so they never count as ACK-expecting.
    #[must_use]
    pub const fn expects_ack(&self) -> bool {
        !matches!(self, Self::Custom { .. })
    }
}

/// Numeric clip numbers are sent bare; anything else is double-quoted.
///
/// Empty and whitespace-only names count as numeric and go out unquoted.
fn is_numeric(name: &str) -> bool {
    let trimmed = name.trim();
    trimmed.is_empty() || trimmed.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_codes() {
        assert_eq!(PlaybackCommand::Play.code(), "PL");
        assert_eq!(PlaybackCommand::Stop.code(), "RJ");
        assert_eq!(PlaybackCommand::LoopPlay.code(), "LP");
        assert_eq!(PlaybackCommand::Still.code(), "ST");
        assert_eq!(PlaybackCommand::Pause.code(), "PA");
    }

    #[test]
    fn test_stream_codes() {
        assert_eq!(StreamKind::Image.code(), "IM");
        assert_eq!(StreamKind::Video.code(), "VD");
        assert_eq!(StreamKind::Audio.code(), "AD");
    }

    #[test]
    fn test_playback_payload() {
        let action = Action::Playback {
            command: PlaybackCommand::Play,
            channel: "1".to_string(),
        };
        assert_eq!(action.command_text(), "1PL");

        let action = Action::Playback {
            command: PlaybackCommand::Stop,
            channel: "12".to_string(),
        };
        assert_eq!(action.command_text(), "12RJ");
    }

    #[test]
    fn test_set_stream_payload() {
        let on = Action::SetStream {
            stream: StreamKind::Video,
            enabled: true,
            channel: "1".to_string(),
        };
        assert_eq!(on.command_text(), "11VD");

        let off = Action::SetStream {
            stream: StreamKind::Audio,
            enabled: false,
            channel: "3".to_string(),
        };
        assert_eq!(off.command_text(), "03AD");
    }

    #[test]
    fn test_select_file_numeric_goes_bare() {
        let action = Action::SelectFile {
            name: "42".to_string(),
            channel: "1".to_string(),
        };
        assert_eq!(action.command_text(), "421SE");

        let action = Action::SelectFile {
            name: "4.5".to_string(),
            channel: "1".to_string(),
        };
        assert_eq!(action.command_text(), "4.51SE");
    }

    #[test]
    fn test_select_file_name_gets_quoted() {
        let action = Action::SelectFile {
            name: "IntroLoop".to_string(),
            channel: "1".to_string(),
        };
        assert_eq!(action.command_text(), "\"IntroLoop\"1SE");

        // Mixed digits and letters is a name, not a number
        let action = Action::SelectFile {
            name: "42a".to_string(),
            channel: "1".to_string(),
        };
        assert_eq!(action.command_text(), "\"42a\"1SE");
    }

    #[test]
    fn test_select_file_whitespace_counts_as_numeric() {
        let action = Action::SelectFile {
            name: String::new(),
            channel: "1".to_string(),
        };
        assert_eq!(action.command_text(), "1SE");

        // Surrounding whitespace does not force quoting, and the payload
        // keeps the name exactly as given
        let action = Action::SelectFile {
            name: " 7 ".to_string(),
            channel: "1".to_string(),
        };
        assert_eq!(action.command_text(), " 7 1SE");
    }

    #[test]
    fn test_banner_payload() {
        let action = Action::BannerText {
            text: "NOW BOARDING".to_string(),
            channel: "1".to_string(),
        };
        assert_eq!(action.command_text(), "NOW BOARDING1BT");
    }

    #[test]
    fn test_custom_passes_through_verbatim() {
        let action = Action::Custom {
            command: "1SE 2PL".to_string(),
        };
        assert_eq!(action.command_text(), "1SE 2PL");
    }

    #[test]
    fn test_only_custom_skips_ack() {
        let custom = Action::Custom {
            command: "?V".to_string(),
        };
        assert!(!custom.expects_ack());

        let play = Action::Playback {
            command: PlaybackCommand::Play,
            channel: "1".to_string(),
        };
        assert!(play.expects_ack());

        let select = Action::SelectFile {
            name: "1".to_string(),
            channel: "1".to_string(),
        };
        assert!(select.expects_ack());

        let stream = Action::SetStream {
            stream: StreamKind::Image,
            enabled: true,
            channel: "1".to_string(),
        };
        assert!(stream.expects_ack());

        let banner = Action::BannerText {
            text: "hi".to_string(),
            channel: "1".to_string(),
        };
        assert!(banner.expects_ack());
    }
}
