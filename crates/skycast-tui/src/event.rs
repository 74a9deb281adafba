use skycast_weather::{Coordinates, FetchError, LocateError, Reading};

/// Where a fetch request came from. A successful city fetch moves the tab
/// highlight to Search; a coordinate fetch leaves it alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Coordinate fetch after geolocation
    Location,
    /// City typed into the search box
    Search,
    /// Automatic recovery fetch of the configured default city
    Fallback,
}

/// Everything the controller reacts to, consumed in arrival order
#[derive(Debug)]
pub enum UiEvent {
    /// Key press from the terminal
    Key(crossterm::event::KeyEvent),
    /// Geolocation finished
    Located(Result<Coordinates, LocateError>),
    /// A weather lookup finished
    Fetched {
        origin: Origin,
        result: Result<Reading, FetchError>,
    },
    /// The recovery timer armed on a previous error fired
    FallbackDue,
}
