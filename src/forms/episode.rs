use serde::Deserialize;

use super::{FieldErrors, required_text, slugged_title};
use crate::models::episode::{Episode, EpisodeInput};

/// Create/edit episode form as submitted. `program` and `season` carry the
/// selected ids from the drop-downs; an empty `season` means "no season".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EpisodeForm {
    pub program: String,
    pub season: String,
    pub number: String,
    pub title: String,
    pub synopsis: String,
}

impl EpisodeForm {
    #[must_use]
    pub fn from_episode(episode: &Episode) -> Self {
        Self {
            program: episode.program_id.to_string(),
            season: episode.season_id.map(|s| s.to_string()).unwrap_or_default(),
            number: episode.number.to_string(),
            title: episode.title.clone(),
            synopsis: episode.synopsis.clone(),
        }
    }

    /// Field-level checks only; whether the program exists and owns the season
    /// is checked against the database by the episode service.
    pub fn validate(&self) -> Result<EpisodeInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let program_id = match self.program.trim().parse::<i32>() {
            Ok(id) if id > 0 => id,
            _ => {
                errors.add("program", "Please select a program.");
                0
            }
        };

        let season_id = match self.season.trim() {
            "" => None,
            raw => match raw.parse::<i32>() {
                Ok(id) if id > 0 => Some(id),
                _ => {
                    errors.add("season", "Please select a valid season.");
                    None
                }
            },
        };

        let number = match self.number.trim().parse::<i32>() {
            Ok(n) if n >= 1 => n,
            Ok(_) => {
                errors.add("number", "This value should be 1 or more.");
                0
            }
            Err(_) => {
                errors.add("number", "This value is not a valid number.");
                0
            }
        };

        let title = slugged_title(&mut errors, "title", &self.title, 255);
        let synopsis = required_text(&mut errors, "synopsis", &self.synopsis, None);

        errors.into_result(EpisodeInput {
            program_id,
            season_id,
            number,
            title,
            synopsis,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> EpisodeForm {
        EpisodeForm {
            program: "3".to_string(),
            season: String::new(),
            number: "1".to_string(),
            title: "Pilot".to_string(),
            synopsis: "It begins.".to_string(),
        }
    }

    #[test]
    fn test_valid_episode_form() {
        let input = valid().validate().unwrap();
        assert_eq!(input.program_id, 3);
        assert_eq!(input.season_id, None);
        assert_eq!(input.number, 1);
    }

    #[test]
    fn test_program_is_required() {
        let mut f = valid();
        f.program = String::new();
        let errors = f.validate().unwrap_err();
        assert!(errors.has("program"));
    }

    #[test]
    fn test_number_must_be_positive() {
        let mut f = valid();
        f.number = "0".to_string();
        assert!(f.validate().unwrap_err().has("number"));
        f.number = "two".to_string();
        assert!(f.validate().unwrap_err().has("number"));
    }

    #[test]
    fn test_season_is_optional_but_must_be_an_id() {
        let mut f = valid();
        f.season = "7".to_string();
        assert_eq!(f.validate().unwrap().season_id, Some(7));
        f.season = "x".to_string();
        assert!(f.validate().unwrap_err().has("season"));
    }
}
