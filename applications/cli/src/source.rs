//! Where `tune play` takes its queue from

use crate::error::CliError;
use std::fmt;
use std::str::FromStr;
use tune_core::PlaylistId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaySource {
    /// Most played tracks
    Top,
    /// Suggested tracks (personalised when signed in)
    Suggested,
    /// A playlist, in position order
    Playlist(PlaylistId),
}

impl FromStr for PlaySource {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "suggested" => Ok(Self::Suggested),
            other => {
                let id = other
                    .strip_prefix("playlist:")
                    .and_then(|id| id.parse::<i64>().ok())
                    .ok_or_else(|| {
                        CliError::InvalidArgument(format!(
                            "unknown source '{other}' (expected top, suggested or playlist:<id>)"
                        ))
                    })?;
                Ok(Self::Playlist(PlaylistId::new(id)))
            }
        }
    }
}

impl fmt::Display for PlaySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => write!(f, "top"),
            Self::Suggested => write!(f, "suggested"),
            Self::Playlist(id) => write!(f, "playlist:{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_sources() {
        assert_eq!("top".parse::<PlaySource>().unwrap(), PlaySource::Top);
        assert_eq!("suggested".parse::<PlaySource>().unwrap(), PlaySource::Suggested);
        assert_eq!(
            "playlist:12".parse::<PlaySource>().unwrap(),
            PlaySource::Playlist(PlaylistId::new(12))
        );
    }

    #[test]
    fn rejects_unknown_sources() {
        assert!("radio".parse::<PlaySource>().is_err());
        assert!("playlist:abc".parse::<PlaySource>().is_err());
        assert!("playlist:".parse::<PlaySource>().is_err());
    }

    #[test]
    fn display_round_trips() {
        let source = PlaySource::Playlist(PlaylistId::new(3));
        assert_eq!(source.to_string().parse::<PlaySource>().unwrap(), source);
    }
}
