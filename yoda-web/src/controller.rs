use std::cell::{Ref, RefCell};

use tracing::{debug, error, info, warn};
use yoda_core::{CHAT_UNREACHABLE, GAME_UNREACHABLE, Page, PageEventHandler, PageState, Ticket};
use yoda_types::Move;

use crate::api::ApiClient;

/// Runs a flow's closing step when dropped, so it happens exactly once
/// however the request settles.
struct SettleGuard<'a> {
    page: &'a RefCell<Page>,
    ticket: Ticket,
    settle: fn(&mut Page, Ticket),
}

impl<'a> SettleGuard<'a> {
    fn new(page: &'a RefCell<Page>, ticket: Ticket, settle: fn(&mut Page, Ticket)) -> Self {
        Self {
            page,
            ticket,
            settle,
        }
    }
}

impl Drop for SettleGuard<'_> {
    fn drop(&mut self) {
        match self.page.try_borrow_mut() {
            Ok(mut page) => (self.settle)(&mut page, self.ticket),
            Err(_) => error!("Page busy while settling request {}", self.ticket),
        }
    }
}

/// Page-lifetime coordinator between the views and the backend.
pub struct PageController<A: ApiClient> {
    api: A,
    page: RefCell<Page>,
}

impl<A: ApiClient> PageController<A> {
    pub fn new(api: A, image_base: &str) -> Self {
        Self {
            api,
            page: RefCell::new(Page::new(image_base)),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn add_view(&self, view: Box<dyn PageEventHandler>) {
        self.page.borrow_mut().add_view(view);
    }

    pub fn state(&self) -> Ref<'_, PageState> {
        Ref::map(self.page.borrow(), |page| &page.state)
    }

    /// Failures here are logged only; the scoreboard keeps its placeholder.
    pub async fn load_score(&self) {
        let ticket = self.page.borrow_mut().begin_score_load();
        let outcome = self.api.get_score().await;

        let mut page = self.page.borrow_mut();
        match outcome {
            Ok(score) => {
                if page.apply_score(ticket, score) {
                    debug!(
                        "Loaded score {}/{}/{}",
                        score.wins, score.losses, score.ties
                    );
                }
            }
            Err(e) => {
                warn!("Error fetching initial score: {}", e);
                page.score_load_failed(ticket);
            }
        }
    }

    pub async fn play_move(&self, player_move: Move) {
        info!("Player chose: {}", player_move);
        let ticket = self.page.borrow_mut().begin_round();
        let _settle = SettleGuard::new(&self.page, ticket, Page::end_round);

        let outcome = self.api.play(player_move).await;

        let mut page = self.page.borrow_mut();
        match outcome {
            Ok(response) => {
                page.show_round(ticket, &response);
            }
            Err(e) => {
                error!("Error playing game: {}", e);
                page.show_game_error(ticket, e.user_message(GAME_UNREACHABLE));
            }
        }
    }

    /// The user's text is echoed into the transcript before the request goes
    /// out and stays there whatever the backend answers.
    pub async fn submit_chat(&self, raw: &str) {
        let Some((ticket, text)) = self.page.borrow_mut().begin_chat(raw) else {
            return;
        };
        let _settle = SettleGuard::new(&self.page, ticket, Page::end_chat);

        let outcome = self.api.chat(&text).await;

        let mut page = self.page.borrow_mut();
        match outcome {
            Ok(response) => {
                page.show_reply(ticket, response.yoda_response);
            }
            Err(e) => {
                error!("Error sending chat message: {}", e);
                page.show_chat_error(ticket, e.user_message(CHAT_UNREACHABLE));
            }
        }
    }

    pub fn sync_rules(&self, visible: bool) {
        self.page.borrow_mut().sync_rules(visible);
    }

    pub fn toggle_rules(&self) -> bool {
        self.page.borrow_mut().toggle_rules()
    }

    pub fn open_rules(&self) {
        self.page.borrow_mut().open_rules();
    }

    pub fn close_rules(&self) {
        self.page.borrow_mut().close_rules();
    }
}
