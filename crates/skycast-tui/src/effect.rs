use crate::event::Origin;
use skycast_weather::Coordinates;

/// Work the controller asks the runtime to carry out. Keeping requests as
/// data keeps `Controller::handle` synchronous and testable.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Resolve the machine's position, then fetch by coordinates
    DetectLocation,
    /// Fetch current weather for a named city
    FetchCity { city: String, origin: Origin },
    /// Fetch current weather for a coordinate pair
    FetchCoordinates { coords: Coordinates },
    /// Arm the recovery timer; it posts `FallbackDue` when it fires
    ScheduleFallback,
    /// Tear down the terminal and exit
    Quit,
}
