use yoda_types::{PlayResponse, Score};

use crate::{
    ChatMessage, FlowTracker, PageEvent, PageEventBus, PageEventHandler, RoundDisplay,
    RulesPanel, Ticket, Transcript,
};

#[derive(Debug, Clone)]
pub struct GamePanel {
    pub loading: bool,
    pub error: Option<String>,
    pub round: Option<RoundDisplay>,
    pub flow: FlowTracker,
}

#[derive(Debug, Clone)]
pub struct ChatPanel {
    pub loading: bool,
    pub error: Option<String>,
    pub transcript: Transcript,
    pub controls_enabled: bool,
    pub flow: FlowTracker,
}

/// In-memory model of everything the page shows.
#[derive(Debug, Clone)]
pub struct PageState {
    pub score: Score,
    pub score_flow: FlowTracker,
    pub game: GamePanel,
    pub chat: ChatPanel,
    pub rules: RulesPanel,
}

impl PageState {
    pub fn new() -> Self {
        Self {
            score: Score::default(),
            score_flow: FlowTracker::new("score"),
            game: GamePanel {
                loading: false,
                error: None,
                round: None,
                flow: FlowTracker::new("play"),
            },
            chat: ChatPanel {
                loading: false,
                error: None,
                transcript: Transcript::new(),
                controls_enabled: true,
                flow: FlowTracker::new("chat"),
            },
            rules: RulesPanel::default(),
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}

/// Page model plus the views observing it. Every mutation goes through here
/// so views receive one event per visible change.
pub struct Page {
    pub state: PageState,
    pub event_bus: PageEventBus,
    image_base: String,
}

impl Page {
    pub fn new(image_base: impl Into<String>) -> Self {
        Self {
            state: PageState::new(),
            event_bus: PageEventBus::new(),
            image_base: image_base.into(),
        }
    }

    pub fn add_view(&mut self, view: Box<dyn PageEventHandler>) {
        self.event_bus.add_handler(view);
    }

    fn set_score(&mut self, score: Score) {
        self.state.score = score;
        self.event_bus.publish(PageEvent::ScoreUpdated(score));
    }

    fn clear_round(&mut self) {
        self.state.game.round = None;
        self.event_bus.publish(PageEvent::RoundCleared);
    }

    // --- Score ---

    pub fn begin_score_load(&mut self) -> Ticket {
        self.state.score_flow.begin()
    }

    pub fn apply_score(&mut self, ticket: Ticket, score: Score) -> bool {
        if !self.state.score_flow.succeed(ticket) {
            return false;
        }
        self.set_score(score);
        true
    }

    pub fn score_load_failed(&mut self, ticket: Ticket) {
        self.state.score_flow.fail(ticket);
    }

    // --- Game ---

    pub fn begin_round(&mut self) -> Ticket {
        let ticket = self.state.game.flow.begin();
        self.state.game.loading = true;
        self.event_bus.publish(PageEvent::GameLoading(true));
        self.state.game.error = None;
        self.event_bus.publish(PageEvent::GameError(None));
        self.clear_round();
        ticket
    }

    pub fn show_round(&mut self, ticket: Ticket, response: &PlayResponse) -> bool {
        if !self.state.game.flow.succeed(ticket) {
            return false;
        }
        let display = RoundDisplay::from_response(response, &self.image_base);
        self.state.game.error = None;
        self.state.game.round = Some(display.clone());
        self.event_bus.publish(PageEvent::RoundShown(display));

        // A fresher tally than any score load still in flight
        self.state.score_flow.supersede();
        self.set_score(response.score());
        true
    }

    pub fn show_game_error(&mut self, ticket: Ticket, message: String) -> bool {
        if !self.state.game.flow.fail(ticket) {
            return false;
        }
        self.state.game.error = Some(message.clone());
        self.event_bus.publish(PageEvent::GameError(Some(message)));
        self.clear_round();
        true
    }

    pub fn end_round(&mut self, ticket: Ticket) {
        if !self.state.game.flow.finish(ticket) {
            return;
        }
        self.state.game.loading = false;
        self.event_bus.publish(PageEvent::GameLoading(false));
    }

    // --- Chat ---

    /// Echoes the message locally and locks the chat controls. `None` when
    /// the trimmed message is empty, in which case nothing changes.
    pub fn begin_chat(&mut self, raw: &str) -> Option<(Ticket, String)> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();

        let message = ChatMessage::user(text.clone());
        self.state.chat.transcript.push(message.clone());
        self.event_bus.publish(PageEvent::ChatMessageAppended(message));
        self.event_bus.publish(PageEvent::ChatInputCleared);

        let ticket = self.state.chat.flow.begin();
        self.state.chat.controls_enabled = false;
        self.event_bus.publish(PageEvent::ChatControlsEnabled(false));
        self.state.chat.loading = true;
        self.event_bus.publish(PageEvent::ChatLoading(true));
        self.state.chat.error = None;
        self.event_bus.publish(PageEvent::ChatError(None));

        Some((ticket, text))
    }

    pub fn show_reply(&mut self, ticket: Ticket, reply: String) -> bool {
        if !self.state.chat.flow.succeed(ticket) {
            return false;
        }
        let message = ChatMessage::yoda(reply);
        self.state.chat.transcript.push(message.clone());
        self.event_bus.publish(PageEvent::ChatMessageAppended(message));
        true
    }

    pub fn show_chat_error(&mut self, ticket: Ticket, message: String) -> bool {
        if !self.state.chat.flow.fail(ticket) {
            return false;
        }
        self.state.chat.error = Some(message.clone());
        self.event_bus.publish(PageEvent::ChatError(Some(message)));
        true
    }

    pub fn end_chat(&mut self, ticket: Ticket) {
        if !self.state.chat.flow.finish(ticket) {
            return;
        }
        self.state.chat.loading = false;
        self.event_bus.publish(PageEvent::ChatLoading(false));
        self.state.chat.controls_enabled = true;
        self.event_bus.publish(PageEvent::ChatControlsEnabled(true));
        self.event_bus.publish(PageEvent::ChatInputFocused);
    }

    // --- Rules ---

    /// Adopts the visibility the markup shipped with and republishes it so
    /// the toggle's label matches.
    pub fn sync_rules(&mut self, visible: bool) {
        self.state.rules = RulesPanel::with_visibility(visible);
        self.event_bus.publish(PageEvent::RulesVisibility { visible });
    }

    pub fn toggle_rules(&mut self) -> bool {
        let visible = self.state.rules.toggle();
        self.event_bus.publish(PageEvent::RulesVisibility { visible });
        visible
    }

    pub fn open_rules(&mut self) {
        if self.state.rules.open() {
            self.event_bus
                .publish(PageEvent::RulesVisibility { visible: true });
        }
    }

    pub fn close_rules(&mut self) {
        if self.state.rules.close() {
            self.event_bus
                .publish(PageEvent::RulesVisibility { visible: false });
        }
    }
}
