use yoda_types::{Move, Outcome, PlayResponse};

/// Classes the result text always carries; the style class is added on top.
pub const RESULT_BASE_CLASSES: &str = "result-text status-text";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStyle {
    Win,
    Loss,
    Tie,
}

impl ResultStyle {
    /// Prefer the explicit outcome; sniff the label only when the backend didn't send one.
    pub fn classify(outcome: Option<Outcome>, result_text: &str) -> Self {
        match outcome {
            Some(Outcome::Win) => ResultStyle::Win,
            Some(Outcome::Lose) => ResultStyle::Loss,
            Some(Outcome::Tie) => ResultStyle::Tie,
            None => Self::from_text(result_text),
        }
    }

    pub fn from_text(result_text: &str) -> Self {
        let lowered = result_text.to_lowercase();
        if lowered.contains("win") {
            ResultStyle::Win
        } else if lowered.contains("lose") {
            ResultStyle::Loss
        } else {
            ResultStyle::Tie
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ResultStyle::Win => "status-win",
            ResultStyle::Loss => "status-loss",
            ResultStyle::Tie => "status-tie",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSlot {
    pub src: String,
    pub alt: String,
}

impl ImageSlot {
    fn for_move(image_base: &str, chosen: Move, who: &str) -> Self {
        Self {
            src: format!(
                "{}/{}",
                image_base.trim_end_matches('/'),
                chosen.image_file_name()
            ),
            alt: format!("{} chose {}", who, chosen),
        }
    }
}

/// Everything the result panel shows for one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundDisplay {
    pub player: ImageSlot,
    pub computer: ImageSlot,
    pub result_text: String,
    pub style: ResultStyle,
    pub commentary: String,
}

impl RoundDisplay {
    pub fn from_response(response: &PlayResponse, image_base: &str) -> Self {
        Self {
            player: ImageSlot::for_move(image_base, response.player_move, "Player"),
            computer: ImageSlot::for_move(image_base, response.computer_move, "Yoda"),
            result_text: response.result.clone(),
            style: ResultStyle::classify(response.outcome, &response.result),
            commentary: response.commentary.clone().unwrap_or_default(),
        }
    }

    pub fn result_classes(&self) -> String {
        format!("{} {}", RESULT_BASE_CLASSES, self.style.css_class())
    }
}
