//! Terminal weather widget
//!
//! Startup geolocates the machine and shows local conditions; a search box
//! fetches any city by name. Errors recover on their own after a short
//! delay by falling back to the configured default city.

mod controller;
mod effect;
mod event;
mod format;
mod screen;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use skycast_core::Config;
use skycast_weather::{GeoLocator, WeatherClient};
use tokio::sync::mpsc;

use controller::Controller;
use effect::Effect;
use event::{Origin, UiEvent};

/// How long an error stays on screen before the default city is fetched
const FALLBACK_DELAY: Duration = Duration::from_secs(3);

/// Keyboard poll interval between renders
const INPUT_POLL: Duration = Duration::from_millis(33);

#[tokio::main]
async fn main() -> Result<()> {
    skycast_core::init()?;

    let (config, _) = Config::load_validated()?;
    let config_error = config
        .api_key()
        .err()
        .map(|e| e.user_message().to_string());

    let client = match &config.endpoints.weather_url {
        Some(url) => WeatherClient::with_base_url(config.weather.api_key.clone(), url.clone())?,
        None => WeatherClient::new(config.weather.api_key.clone())?,
    };
    let locator = match &config.endpoints.geolocation_url {
        Some(url) => GeoLocator::with_base_url(url.clone())?,
        None => GeoLocator::new()?,
    };

    let (tx, mut rx) = mpsc::channel(16);
    let dispatcher = Dispatcher {
        client,
        locator,
        tx,
    };
    let mut app = Controller::new(config.weather.fallback_city.clone());

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut app, &dispatcher, &mut rx, config_error).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut Controller,
    dispatcher: &Dispatcher,
    rx: &mut mpsc::Receiver<UiEvent>,
    config_error: Option<String>,
) -> Result<()> {
    if dispatcher.run(app.startup(config_error)) {
        return Ok(());
    }

    loop {
        // Completions first, so a render always sees the latest state
        while let Ok(event) = rx.try_recv() {
            if dispatcher.run(app.handle(event)) {
                return Ok(());
            }
        }

        terminal.draw(|f| screen::draw(f, app))?;

        if crossterm::event::poll(INPUT_POLL)? {
            if let Event::Key(key) = crossterm::event::read()? {
                if key.kind == KeyEventKind::Press
                    && dispatcher.run(app.handle(UiEvent::Key(key)))
                {
                    return Ok(());
                }
            }
        }
    }
}

/// Runs controller effects. Each request gets its own task and posts its
/// completion back through the event channel, so the render loop never
/// blocks on the network.
struct Dispatcher {
    client: WeatherClient,
    locator: GeoLocator,
    tx: mpsc::Sender<UiEvent>,
}

impl Dispatcher {
    /// Returns true once a `Quit` effect is seen
    fn run(&self, effects: Vec<Effect>) -> bool {
        let mut quit = false;
        for effect in effects {
            match effect {
                Effect::DetectLocation => {
                    let locator = self.locator.clone();
                    let tx = self.tx.clone();
                    tokio::spawn(async move {
                        let result = locator.current_position().await;
                        let _ = tx.send(UiEvent::Located(result)).await;
                    });
                }
                Effect::FetchCity { city, origin } => {
                    let client = self.client.clone();
                    let tx = self.tx.clone();
                    tokio::spawn(async move {
                        let result = client.fetch_by_city(&city).await;
                        let _ = tx.send(UiEvent::Fetched { origin, result }).await;
                    });
                }
                Effect::FetchCoordinates { coords } => {
                    let client = self.client.clone();
                    let tx = self.tx.clone();
                    tokio::spawn(async move {
                        let result = client.fetch_by_coordinates(coords).await;
                        let _ = tx
                            .send(UiEvent::Fetched {
                                origin: Origin::Location,
                                result,
                            })
                            .await;
                    });
                }
                Effect::ScheduleFallback => {
                    let tx = self.tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(FALLBACK_DELAY).await;
                        let _ = tx.send(UiEvent::FallbackDue).await;
                    });
                }
                Effect::Quit => quit = true,
            }
        }
        quit
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use skycast_weather::FetchError;

    // Unroutable endpoints; these tests exercise the dispatch wiring, not
    // the services behind it
    fn dispatcher() -> (Dispatcher, mpsc::Receiver<UiEvent>) {
        let (tx, rx) = mpsc::channel(16);
        let dispatcher = Dispatcher {
            client: WeatherClient::with_base_url("test-key".to_string(), "http://127.0.0.1:1")
                .unwrap(),
            locator: GeoLocator::with_base_url("http://127.0.0.1:1").unwrap(),
            tx,
        };
        (dispatcher, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_schedule_fallback_posts_fallback_due_after_delay() {
        let (dispatcher, mut rx) = dispatcher();
        let armed_at = tokio::time::Instant::now();

        assert!(!dispatcher.run(vec![Effect::ScheduleFallback]));

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, UiEvent::FallbackDue));
        assert_eq!(armed_at.elapsed(), FALLBACK_DELAY);
    }

    #[tokio::test]
    async fn test_fetch_effect_posts_completion_with_its_origin() {
        let (dispatcher, mut rx) = dispatcher();

        assert!(!dispatcher.run(vec![Effect::FetchCity {
            city: "Nagpur".to_string(),
            origin: Origin::Fallback,
        }]));

        let event = rx.recv().await.unwrap();
        assert!(matches!(
            event,
            UiEvent::Fetched {
                origin: Origin::Fallback,
                result: Err(FetchError::Network(_)),
            }
        ));
    }

    #[tokio::test]
    async fn test_quit_effect_reports_shutdown() {
        let (dispatcher, _rx) = dispatcher();

        assert!(dispatcher.run(vec![Effect::Quit]));
        assert!(!dispatcher.run(Vec::new()));
    }
}
