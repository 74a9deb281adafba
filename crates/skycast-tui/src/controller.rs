use crate::effect::Effect;
use crate::event::{Origin, UiEvent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use skycast_weather::{FetchError, Reading};
use tracing::{info, warn};

/// What the card is currently presenting
#[derive(Debug, Clone)]
pub enum DisplayState {
    /// Nothing requested yet; only seen before `startup` runs
    Idle,
    /// A request is in flight; the card shows placeholders
    Loading,
    /// A reading is on screen
    Showing(Reading),
    /// An error message is on screen and the recovery timer is armed
    Error(String),
}

/// Which pane's tab is highlighted. Purely a highlight concern, independent
/// of what the card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTab {
    Location,
    Search,
}

/// The app's state machine. Events go in, display state changes, and any
/// work to be done comes back out as effects for the runtime to execute.
pub struct Controller {
    state: DisplayState,
    tab: ActiveTab,
    input: String,
    fallback_city: String,
}

impl Controller {
    pub fn new(fallback_city: String) -> Self {
        Self {
            state: DisplayState::Idle,
            tab: ActiveTab::Location,
            input: String::new(),
            fallback_city,
        }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn tab(&self) -> ActiveTab {
        self.tab
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// First transition after the terminal is up. A configuration problem
    /// surfaces as an ordinary error, recovery timer included; otherwise the
    /// app starts by locating the machine.
    pub fn startup(&mut self, config_error: Option<String>) -> Vec<Effect> {
        match config_error {
            Some(message) => self.show_error(message),
            None => {
                self.state = DisplayState::Loading;
                vec![Effect::DetectLocation]
            }
        }
    }

    /// Advance the state machine by one event
    pub fn handle(&mut self, event: UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::Key(key) => self.handle_key(key),
            UiEvent::Located(Ok(coords)) => {
                vec![Effect::FetchCoordinates { coords }]
            }
            UiEvent::Located(Err(err)) => {
                warn!("Geolocation failed: {err}");
                self.show_error(err.user_message().to_string())
            }
            UiEvent::Fetched { origin, result } => self.finish_fetch(origin, result),
            UiEvent::FallbackDue => {
                info!(city = %self.fallback_city, "Recovery timer fired");
                self.state = DisplayState::Loading;
                vec![Effect::FetchCity {
                    city: self.fallback_city.clone(),
                    origin: Origin::Fallback,
                }]
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Effect::Quit];
        }

        match key.code {
            KeyCode::Esc => vec![Effect::Quit],
            KeyCode::Tab => self.toggle_tab(),
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.input.pop();
                Vec::new()
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Selecting the Location side re-runs detection every time; selecting
    /// the Search side only takes the highlight.
    fn toggle_tab(&mut self) -> Vec<Effect> {
        match self.tab {
            ActiveTab::Search => {
                self.tab = ActiveTab::Location;
                self.state = DisplayState::Loading;
                vec![Effect::DetectLocation]
            }
            ActiveTab::Location => {
                self.tab = ActiveTab::Search;
                Vec::new()
            }
        }
    }

    /// An empty or whitespace-only query is dropped without any transition
    fn submit(&mut self) -> Vec<Effect> {
        let city = self.input.trim().to_string();
        if city.is_empty() {
            return Vec::new();
        }

        self.input.clear();
        self.state = DisplayState::Loading;
        vec![Effect::FetchCity {
            city,
            origin: Origin::Search,
        }]
    }

    fn finish_fetch(&mut self, origin: Origin, result: Result<Reading, FetchError>) -> Vec<Effect> {
        match result {
            Ok(reading) => {
                info!(city = %reading.city, "Showing reading");
                if origin != Origin::Location {
                    self.tab = ActiveTab::Search;
                }
                self.state = DisplayState::Showing(reading);
                Vec::new()
            }
            Err(err) => {
                warn!("Fetch failed: {err}");
                self.show_error(err.user_message())
            }
        }
    }

    /// Every error arms the recovery timer. Timers are never cancelled; a
    /// stale one lands later as another `FallbackDue` and replaces whatever
    /// is on screen by then.
    fn show_error(&mut self, message: String) -> Vec<Effect> {
        self.state = DisplayState::Error(message);
        vec![Effect::ScheduleFallback]
    }
}
