#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use yoda_core::{Page, PageEvent, PageEventHandler};
use yoda_types::{Move, Outcome, PlayResponse};

pub const IMAGE_BASE: &str = "/images";

/// Creates a page with an event collector attached
pub fn create_test_page() -> (Page, EventCollector) {
    let mut page = Page::new(IMAGE_BASE);
    let collector = EventCollector::new();
    page.add_view(Box::new(collector.clone()));
    (page, collector)
}

/// Creates a play response for the given moves and tally
pub fn create_play_response(
    player: Move,
    computer: Move,
    result: &str,
    score: (u32, u32, u32),
) -> PlayResponse {
    PlayResponse {
        player_move: player,
        computer_move: computer,
        result: result.to_string(),
        commentary: Some("Hmm".to_string()),
        outcome: None,
        wins: score.0,
        losses: score.1,
        ties: score.2,
    }
}

pub fn create_play_response_with_outcome(
    player: Move,
    computer: Move,
    outcome: Outcome,
) -> PlayResponse {
    let mut response = create_play_response(player, computer, "Round over.", (0, 0, 0));
    response.outcome = Some(outcome);
    response
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<PageEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<PageEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn last_event(&self) -> Option<PageEvent> {
        self.events.lock().unwrap().last().cloned()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&PageEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl PageEventHandler for EventCollector {
    fn handle_event(&mut self, event: PageEvent) {
        self.events.lock().unwrap().push(event);
    }
}
