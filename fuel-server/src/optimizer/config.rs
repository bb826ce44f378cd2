//! Optimizer configuration.

/// Vehicle and search parameters for fuel-stop selection.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Fuel efficiency of the vehicle.
    pub miles_per_gallon: f64,

    /// Distance the vehicle can cover on one tank (miles).
    pub max_range: f64,

    /// How far from a sample point to look for stations (miles).
    pub search_radius_miles: f64,

    /// Maximum stations returned by one nearby-station lookup.
    pub max_stations_per_query: usize,

    /// Number of sample-point lookups issued concurrently.
    pub lookup_concurrency: usize,
}

impl OptimizerConfig {
    /// Create a configuration for a vehicle, keeping default search settings.
    pub fn new(miles_per_gallon: f64, max_range: f64) -> Self {
        Self {
            miles_per_gallon,
            max_range,
            ..Self::default()
        }
    }

    /// Set the station search radius.
    pub fn with_search_radius(mut self, miles: f64) -> Self {
        self.search_radius_miles = miles;
        self
    }

    /// Set the per-lookup result cap.
    pub fn with_max_stations_per_query(mut self, max: usize) -> Self {
        self.max_stations_per_query = max;
        self
    }

    /// Set how many lookups run at once.
    pub fn with_lookup_concurrency(mut self, concurrency: usize) -> Self {
        self.lookup_concurrency = concurrency;
        self
    }

    /// Check the parameters are usable.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.miles_per_gallon.is_finite() && self.miles_per_gallon > 0.0) {
            return Err(format!(
                "miles per gallon must be positive, got {}",
                self.miles_per_gallon
            ));
        }
        if !(self.max_range.is_finite() && self.max_range > 0.0) {
            return Err(format!("max range must be positive, got {}", self.max_range));
        }
        if !(self.search_radius_miles.is_finite() && self.search_radius_miles >= 0.0) {
            return Err(format!(
                "search radius must not be negative, got {}",
                self.search_radius_miles
            ));
        }
        if self.lookup_concurrency == 0 {
            return Err("lookup concurrency must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            miles_per_gallon: 10.0,
            max_range: 500.0,
            search_radius_miles: 50.0,
            max_stations_per_query: 5,
            lookup_concurrency: 4,
        }
    }
}
