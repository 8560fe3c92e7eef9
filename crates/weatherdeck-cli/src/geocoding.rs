use crate::model::DashboardLocation;

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ResolvedLocation {
    pub fn to_output_location(&self) -> DashboardLocation {
        DashboardLocation {
            name: self.name.clone(),
            country: self.country.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// "Name, Country", or just the name when the geocoder returned no
    /// country.
    pub fn display_label(&self) -> String {
        if self.country.trim().is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

pub fn coordinate_label(lat: f64, lon: f64) -> String {
    format!("{:.4},{:.4}", round4(lat), round4(lon))
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
