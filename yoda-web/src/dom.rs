//! Browser binding: mirrors page events onto the DOM and routes DOM events
//! into the controller.

use std::rc::Rc;

use anyhow::{Context, anyhow};
use tracing::{error, info};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, Event, HtmlButtonElement, HtmlElement, HtmlImageElement, HtmlInputElement,
};

use yoda_core::{
    ImageSlot, PageEvent, PageEventHandler, RESULT_BASE_CLASSES, RULES_VISIBLE_CLASS,
    RoundDisplay, RulesPanel, error_text,
};
use yoda_types::{Move, Score};

use crate::api::{ApiClient, HttpApiClient};
use crate::config::{Config, data_attribute_name};
use crate::controller::PageController;
use crate::logging;

const MOVE_BUTTON_SELECTOR: &str = ".move-button";
const MOVE_ATTRIBUTE: &str = "data-move";

fn js_error(value: JsValue) -> anyhow::Error {
    anyhow!("{:?}", value)
}

fn required<T: JsCast>(document: &Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .with_context(|| format!("Element #{} not found", id))?
        .dyn_into::<T>()
        .map_err(|_| anyhow!("Element #{} has an unexpected type", id))
}

fn optional<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

fn set_visible(element: &HtmlElement, visible: bool) {
    let display = if visible { "block" } else { "none" };
    let _ = element.style().set_property("display", display);
}

fn set_image(image: &HtmlImageElement, slot: Option<&ImageSlot>) {
    match slot {
        Some(slot) => {
            image.set_src(&slot.src);
            image.set_alt(&slot.alt);
            set_visible(image, true);
        }
        None => {
            set_visible(image, false);
            image.set_src("");
            image.set_alt("");
        }
    }
}

/// Element handles looked up once at startup.
#[derive(Clone)]
pub struct DomView {
    document: Document,
    score_wins: Element,
    score_losses: Element,
    score_ties: Element,
    player_image: HtmlImageElement,
    computer_image: HtmlImageElement,
    result_text: Element,
    commentary_text: Element,
    game_loading: Option<HtmlElement>,
    game_error: Option<HtmlElement>,
    chat_history: Element,
    chat_input: HtmlInputElement,
    chat_send_button: HtmlButtonElement,
    chat_loading: Option<HtmlElement>,
    chat_error: Option<HtmlElement>,
    rules_content: Element,
    rules_toggle: Option<Element>,
}

impl DomView {
    pub fn bind(document: &Document) -> anyhow::Result<Self> {
        Ok(Self {
            document: document.clone(),
            score_wins: required(document, "score-wins")?,
            score_losses: required(document, "score-losses")?,
            score_ties: required(document, "score-ties")?,
            player_image: required(document, "player-choice-img")?,
            computer_image: required(document, "computer-choice-img")?,
            result_text: required(document, "result-text")?,
            commentary_text: required(document, "commentary-text")?,
            game_loading: optional(document, "game-loading"),
            game_error: optional(document, "game-error"),
            chat_history: required(document, "chat-history")?,
            chat_input: required(document, "chat-input")?,
            chat_send_button: required(document, "chat-send-button")?,
            chat_loading: optional(document, "chat-loading"),
            chat_error: optional(document, "chat-error"),
            rules_content: required(document, "rules-content")?,
            rules_toggle: optional(document, "rules-toggle-button"),
        })
    }

    /// Whether the markup shipped with the rules panel open.
    pub fn rules_visible(&self) -> bool {
        self.rules_content
            .class_list()
            .contains(RULES_VISIBLE_CLASS)
    }

    fn render_score(&self, score: Score) {
        self.score_wins
            .set_text_content(Some(&score.wins.to_string()));
        self.score_losses
            .set_text_content(Some(&score.losses.to_string()));
        self.score_ties
            .set_text_content(Some(&score.ties.to_string()));
    }

    fn render_round(&self, round: Option<&RoundDisplay>) {
        set_image(&self.player_image, round.map(|r| &r.player));
        set_image(&self.computer_image, round.map(|r| &r.computer));
        match round {
            Some(round) => {
                self.result_text.set_text_content(Some(&round.result_text));
                self.result_text.set_class_name(&round.result_classes());
                self.commentary_text
                    .set_text_content(Some(&round.commentary));
            }
            None => {
                self.result_text.set_text_content(Some(""));
                self.result_text.set_class_name(RESULT_BASE_CLASSES);
                self.commentary_text.set_text_content(Some(""));
            }
        }
    }

    fn render_indicator(indicator: Option<&HtmlElement>, visible: bool) {
        if let Some(element) = indicator {
            set_visible(element, visible);
        }
    }

    fn render_error(area: Option<&HtmlElement>, message: Option<&str>) {
        let Some(area) = area else {
            return;
        };
        match message {
            Some(message) => {
                area.set_text_content(Some(&error_text(message)));
                set_visible(area, true);
            }
            None => set_visible(area, false),
        }
    }

    fn append_chat_message(&self, text: &str, class: &str) {
        let element = match self.document.create_element("div") {
            Ok(element) => element,
            Err(e) => {
                error!("Could not create chat message element: {:?}", e);
                return;
            }
        };
        element.set_class_name(&format!("chat-message {}", class));
        // Text only, never markup
        element.set_text_content(Some(text));
        if let Err(e) = self.chat_history.append_child(&element) {
            error!("Could not append chat message: {:?}", e);
            return;
        }
        self.chat_history
            .set_scroll_top(self.chat_history.scroll_height());
    }

    fn render_rules(&self, visible: bool) {
        let _ = self
            .rules_content
            .class_list()
            .toggle_with_force(RULES_VISIBLE_CLASS, visible);

        let rules = RulesPanel::with_visibility(visible);
        if let Some(toggle) = &self.rules_toggle {
            toggle.set_text_content(Some(rules.toggle_label()));
            let _ = toggle.set_attribute("aria-expanded", rules.aria_expanded());
        }
    }
}

impl PageEventHandler for DomView {
    fn handle_event(&mut self, event: PageEvent) {
        match event {
            PageEvent::ScoreUpdated(score) => self.render_score(score),
            PageEvent::GameLoading(visible) => {
                Self::render_indicator(self.game_loading.as_ref(), visible)
            }
            PageEvent::GameError(message) => {
                Self::render_error(self.game_error.as_ref(), message.as_deref())
            }
            PageEvent::RoundShown(round) => self.render_round(Some(&round)),
            PageEvent::RoundCleared => self.render_round(None),
            PageEvent::ChatMessageAppended(message) => {
                self.append_chat_message(&message.text, message.sender.css_class())
            }
            PageEvent::ChatInputCleared => self.chat_input.set_value(""),
            PageEvent::ChatControlsEnabled(enabled) => {
                self.chat_input.set_disabled(!enabled);
                self.chat_send_button.set_disabled(!enabled);
            }
            PageEvent::ChatInputFocused => {
                let _ = self.chat_input.focus();
            }
            PageEvent::ChatLoading(visible) => {
                Self::render_indicator(self.chat_loading.as_ref(), visible)
            }
            PageEvent::ChatError(message) => {
                Self::render_error(self.chat_error.as_ref(), message.as_deref())
            }
            PageEvent::RulesVisibility { visible } => self.render_rules(visible),
        }
    }
}

fn config_from_document(document: &Document) -> Config {
    let body = document.body();
    Config::from_lookup(|key| {
        body.as_ref()
            .and_then(|body| body.get_attribute(&data_attribute_name(key)))
    })
}

/// Move token of the `.move-button` the click landed in, if any.
fn clicked_move_token(event: &Event) -> Option<Result<String, ()>> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let button = target.closest(MOVE_BUTTON_SELECTOR).ok()??;
    Some(button.get_attribute(MOVE_ATTRIBUTE).ok_or(()))
}

fn listen(
    target: &Element,
    event_type: &str,
    handler: impl FnMut(Event) + 'static,
) -> anyhow::Result<()> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
        .map_err(js_error)?;
    // Listeners live as long as the page
    closure.forget();
    Ok(())
}

pub fn attach_listeners<A: ApiClient + 'static>(
    document: &Document,
    controller: Rc<PageController<A>>,
    chat_input: HtmlInputElement,
) -> anyhow::Result<()> {
    match document.get_element_by_id("game-controls") {
        Some(controls) => {
            let controller = controller.clone();
            listen(&controls, "click", move |event| {
                let token = match clicked_move_token(&event) {
                    None => return,
                    Some(Err(())) => {
                        error!("Move button clicked, but data-move attribute not found.");
                        return;
                    }
                    Some(Ok(token)) => token,
                };
                match token.parse::<Move>() {
                    Ok(player_move) => {
                        let controller = controller.clone();
                        spawn_local(async move { controller.play_move(player_move).await });
                    }
                    Err(e) => error!("Ignoring move button: {}", e),
                }
            })?;
        }
        None => error!("Game controls container not found!"),
    }

    match document.get_element_by_id("chat-form") {
        Some(form) => {
            let controller = controller.clone();
            listen(&form, "submit", move |event| {
                event.prevent_default();
                let text = chat_input.value();
                let controller = controller.clone();
                spawn_local(async move { controller.submit_chat(&text).await });
            })?;
        }
        None => error!("Chat form not found!"),
    }

    match document.get_element_by_id("rules-toggle-button") {
        Some(toggle) => {
            let controller = controller.clone();
            listen(&toggle, "click", move |_| {
                controller.toggle_rules();
            })?;
        }
        None => error!("Rules toggle button not found!"),
    }

    if let Some(close) = document.get_element_by_id("rules-close-button") {
        listen(&close, "click", move |_| controller.close_rules())?;
    }

    Ok(())
}

/// Binds the page to a controller over `api` and wires its listeners.
pub fn mount<A: ApiClient + 'static>(
    document: &Document,
    api: A,
    image_base: &str,
) -> anyhow::Result<Rc<PageController<A>>> {
    let view = DomView::bind(document)?;
    let chat_input = view.chat_input.clone();
    let rules_visible = view.rules_visible();

    let controller = Rc::new(PageController::new(api, image_base));
    controller.add_view(Box::new(view));
    controller.sync_rules(rules_visible);
    attach_listeners(document, controller.clone(), chat_input)?;
    Ok(controller)
}

fn run(document: &Document) -> anyhow::Result<()> {
    let window = web_sys::window().context("No window")?;
    let config = config_from_document(document);
    logging::init(config.log_level);
    config.warn_rejected();

    let origin = window.location().origin().map_err(js_error)?;
    let api = HttpApiClient::new(config.resolve_api_base(&origin));
    info!("Using API at {}", api.base_url());

    let controller = mount(document, api, &config.image_base_url)?;
    spawn_local(async move { controller.load_score().await });
    info!("AIYoda frontend initialized");
    Ok(())
}

fn run_reporting(document: &Document) {
    if let Err(e) = run(document) {
        error!("Frontend failed to start: {:#}", e);
        web_sys::console::error_1(&JsValue::from_str(&format!(
            "Frontend failed to start: {:#}",
            e
        )));
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("No document available"))?;

    if document.ready_state() == "loading" {
        let ready_document = document.clone();
        let on_ready = Closure::once(move |_event: Event| run_reporting(&ready_document));
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        on_ready.forget();
    } else {
        run_reporting(&document);
    }
    Ok(())
}
