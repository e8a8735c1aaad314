//! Label catalogs for synthetic events.
//!
//! Labels follow the spelling of the published dataset, including the verbose
//! vehicle weapon label and non-ASCII country names.

use gtd_domain::VEHICLE_LABEL_VERBOSE;

/// Country with its region and an approximate centroid.
#[derive(Debug, Clone, Copy)]
pub struct Country {
    pub name: &'static str,
    pub region: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    /// Relative frequency
    pub weight: u32,
}

pub const COUNTRIES: &[Country] = &[
    Country { name: "Iraq", region: "Middle East & North Africa", latitude: 33.3, longitude: 44.4, weight: 24 },
    Country { name: "Pakistan", region: "South Asia", latitude: 30.4, longitude: 69.3, weight: 14 },
    Country { name: "Afghanistan", region: "South Asia", latitude: 33.9, longitude: 67.7, weight: 12 },
    Country { name: "India", region: "South Asia", latitude: 20.6, longitude: 78.9, weight: 11 },
    Country { name: "Colombia", region: "South America", latitude: 4.6, longitude: -74.1, weight: 8 },
    Country { name: "Philippines", region: "Southeast Asia", latitude: 12.9, longitude: 121.8, weight: 7 },
    Country { name: "Peru", region: "South America", latitude: -9.2, longitude: -75.0, weight: 6 },
    Country { name: "El Salvador", region: "Central America & Caribbean", latitude: 13.8, longitude: -88.9, weight: 5 },
    Country { name: "United Kingdom", region: "Western Europe", latitude: 54.6, longitude: -5.9, weight: 5 },
    Country { name: "Turkey", region: "Middle East & North Africa", latitude: 39.0, longitude: 35.2, weight: 4 },
    Country { name: "Nigeria", region: "Sub-Saharan Africa", latitude: 9.1, longitude: 8.7, weight: 4 },
    Country { name: "Côte d'Ivoire", region: "Sub-Saharan Africa", latitude: 7.5, longitude: -5.5, weight: 1 },
    Country { name: "Russia", region: "Eastern Europe", latitude: 43.3, longitude: 45.7, weight: 3 },
    Country { name: "United States", region: "North America", latitude: 38.9, longitude: -77.0, weight: 2 },
];

/// Weapon label with its relative frequency and mean casualties per event.
#[derive(Debug, Clone, Copy)]
pub struct Weapon {
    pub label: &'static str,
    pub weight: u32,
    pub mean_killed: f64,
    pub mean_wounded: f64,
}

pub const WEAPONS: &[Weapon] = &[
    Weapon { label: "Explosives", weight: 50, mean_killed: 2.4, mean_wounded: 5.1 },
    Weapon { label: "Firearms", weight: 32, mean_killed: 2.9, mean_wounded: 1.6 },
    Weapon { label: "Unknown", weight: 8, mean_killed: 1.8, mean_wounded: 1.9 },
    Weapon { label: "Incendiary", weight: 6, mean_killed: 0.9, mean_wounded: 0.8 },
    Weapon { label: "Melee", weight: 2, mean_killed: 1.4, mean_wounded: 0.7 },
    Weapon { label: "Chemical", weight: 1, mean_killed: 0.8, mean_wounded: 14.0 },
    Weapon { label: VEHICLE_LABEL_VERBOSE, weight: 1, mean_killed: 12.0, mean_wounded: 25.0 },
    Weapon { label: "Sabotage Equipment", weight: 1, mean_killed: 0.1, mean_wounded: 0.1 },
    Weapon { label: "Other", weight: 1, mean_killed: 0.6, mean_wounded: 0.5 },
];

pub const ATTACK_TYPES: &[(&str, u32)] = &[
    ("Bombing/Explosion", 48),
    ("Armed Assault", 24),
    ("Assassination", 10),
    ("Hostage Taking (Kidnapping)", 6),
    ("Facility/Infrastructure Attack", 6),
    ("Unknown", 4),
    ("Unarmed Assault", 1),
    ("Hostage Taking (Barricade Incident)", 1),
    ("Hijacking", 1),
];

pub const TARGET_TYPES: &[&str] = &[
    "Private Citizens & Property",
    "Military",
    "Police",
    "Government (General)",
    "Business",
    "Transportation",
    "Religious Figures/Institutions",
    "Educational Institution",
    "Utilities",
];

pub const GROUPS: &[&str] = &[
    "Unknown",
    "Taliban",
    "Islamic State of Iraq and the Levant (ISIL)",
    "Shining Path (SL)",
    "Farabundo Marti National Liberation Front (FMLN)",
    "Irish Republican Army (IRA)",
    "Revolutionary Armed Forces of Colombia (FARC)",
    "New People's Army (NPA)",
    "Boko Haram",
    "Kurdistan Workers' Party (PKK)",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_includes_verbose_vehicle_label() {
        assert!(WEAPONS.iter().any(|w| w.label == VEHICLE_LABEL_VERBOSE));
    }

    #[test]
    fn test_weights_are_positive() {
        assert!(COUNTRIES.iter().all(|c| c.weight > 0));
        assert!(WEAPONS.iter().all(|w| w.weight > 0 && w.mean_killed >= 0.0));
        assert!(ATTACK_TYPES.iter().all(|(_, w)| *w > 0));
    }
}
