//! Seeded event generation.

use rand::distributions::WeightedIndex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, Poisson};

use crate::catalog::{Country, ATTACK_TYPES, COUNTRIES, GROUPS, TARGET_TYPES, WEAPONS};
use crate::error::{Result, SynthError};

/// Source columns written by the generator, in file order.
///
/// `eventid`, `iday` and `provstate` are not used by the service; they are written so
/// the loader's column selection is exercised.
pub const HEADERS: [&str; 17] = [
    "eventid",
    "iyear",
    "imonth",
    "iday",
    "country_txt",
    "region_txt",
    "provstate",
    "latitude",
    "longitude",
    "success",
    "attacktype1_txt",
    "targtype1_txt",
    "natlty1_txt",
    "gname",
    "weaptype1_txt",
    "nkill",
    "nwound",
];

/// Generation parameters.
#[derive(Debug, Clone)]
pub struct SynthConfig {
    pub events: usize,
    pub seed: u64,
    /// Probability that an optional cell is left empty
    pub missing_rate: f64,
    pub first_year: i32,
    pub last_year: i32,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            events: 5000,
            seed: 42,
            missing_rate: 0.05,
            first_year: 1970,
            last_year: 2017,
        }
    }
}

/// One generated source row.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticEvent {
    pub event_id: u64,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub country: Option<&'static str>,
    pub region: Option<&'static str>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub success: u8,
    pub attack_type: &'static str,
    pub target_type: Option<&'static str>,
    pub nationality: Option<&'static str>,
    pub group_name: &'static str,
    pub weapon_type: &'static str,
    pub num_killed: Option<f64>,
    pub num_wounded: Option<f64>,
}

impl SyntheticEvent {
    /// Cells in [`HEADERS`] order; missing values are empty.
    #[must_use]
    pub fn to_record(&self) -> Vec<String> {
        fn cell<T: ToString>(value: Option<T>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }

        vec![
            self.event_id.to_string(),
            self.year.to_string(),
            self.month.to_string(),
            self.day.to_string(),
            cell(self.country),
            cell(self.region),
            String::new(),
            cell(self.latitude.map(|v| format!("{v:.6}"))),
            cell(self.longitude.map(|v| format!("{v:.6}"))),
            self.success.to_string(),
            self.attack_type.to_string(),
            cell(self.target_type),
            cell(self.nationality),
            self.group_name.to_string(),
            self.weapon_type.to_string(),
            cell(self.num_killed),
            cell(self.num_wounded),
        ]
    }
}

/// Deterministic event generator: the same config always yields the same events.
pub struct EventGenerator {
    config: SynthConfig,
    rng: StdRng,
    countries: WeightedIndex<u32>,
    weapons: WeightedIndex<u32>,
    attacks: WeightedIndex<u32>,
    casualties: Vec<(Poisson<f64>, Poisson<f64>)>,
    jitter: Normal<f64>,
}

impl EventGenerator {
    /// Create a generator.
    ///
    /// # Errors
    ///
    /// [`SynthError::InvalidParameter`] for a missing rate outside `[0, 1]` or an
    /// empty year range.
    pub fn new(config: SynthConfig) -> Result<Self> {
        if !(0.0..=1.0).contains(&config.missing_rate) {
            return Err(SynthError::InvalidParameter(format!(
                "missing rate {} not in [0, 1]",
                config.missing_rate
            )));
        }
        if config.first_year > config.last_year {
            return Err(SynthError::InvalidParameter(format!(
                "year range {}..={} is empty",
                config.first_year, config.last_year
            )));
        }

        let invalid = |e: &dyn std::fmt::Display| SynthError::InvalidParameter(e.to_string());
        let countries =
            WeightedIndex::new(COUNTRIES.iter().map(|c| c.weight)).map_err(|e| invalid(&e))?;
        let weapons =
            WeightedIndex::new(WEAPONS.iter().map(|w| w.weight)).map_err(|e| invalid(&e))?;
        let attacks =
            WeightedIndex::new(ATTACK_TYPES.iter().map(|(_, w)| *w)).map_err(|e| invalid(&e))?;
        let casualties = WEAPONS
            .iter()
            .map(|w| {
                Ok((
                    Poisson::new(w.mean_killed).map_err(|e| invalid(&e))?,
                    Poisson::new(w.mean_wounded).map_err(|e| invalid(&e))?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        let jitter = Normal::new(0.0, 1.5).map_err(|e| invalid(&e))?;

        Ok(Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
            countries,
            weapons,
            attacks,
            casualties,
            jitter,
        })
    }

    /// Generate `config.events` events.
    pub fn generate(&mut self) -> Vec<SyntheticEvent> {
        (0..self.config.events).map(|i| self.next_event(i)).collect()
    }

    fn missing(&mut self) -> bool {
        self.rng.gen_bool(self.config.missing_rate)
    }

    fn maybe<T>(&mut self, value: T) -> Option<T> {
        if self.missing() { None } else { Some(value) }
    }

    /// Years skew towards the end of the range, like the real series.
    fn year(&mut self) -> i32 {
        let span = f64::from(self.config.last_year - self.config.first_year);
        let u: f64 = self.rng.gen_range(0.0..1.0);
        #[allow(clippy::cast_possible_truncation)]
        let offset = (u.sqrt() * span).round() as i32;
        self.config.first_year + offset
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn next_event(&mut self, index: usize) -> SyntheticEvent {
        let year = self.year();
        let country: &Country = &COUNTRIES[self.countries.sample(&mut self.rng)];
        let weapon_index = self.weapons.sample(&mut self.rng);
        let weapon = &WEAPONS[weapon_index];
        let (attack_type, _) = ATTACK_TYPES[self.attacks.sample(&mut self.rng)];

        let latitude = (country.latitude + self.jitter.sample(&mut self.rng)).clamp(-90.0, 90.0);
        let longitude =
            (country.longitude + self.jitter.sample(&mut self.rng)).clamp(-180.0, 180.0);
        let located = !self.missing();

        let (killed_dist, wounded_dist) = &self.casualties[weapon_index];
        let killed = killed_dist.sample(&mut self.rng);
        let wounded = wounded_dist.sample(&mut self.rng);

        let target_type = TARGET_TYPES.choose(&mut self.rng).copied().unwrap_or("Unknown");
        let group_name = GROUPS.choose(&mut self.rng).copied().unwrap_or("Unknown");

        SyntheticEvent {
            event_id: u64::from(year.unsigned_abs()) * 1_000_000 + index as u64,
            year,
            month: self.rng.gen_range(1..=12),
            day: self.rng.gen_range(1..=28),
            country: self.maybe(country.name),
            region: self.maybe(country.region),
            latitude: located.then_some(latitude),
            longitude: located.then_some(longitude),
            success: u8::from(self.rng.gen_bool(0.9)),
            attack_type,
            target_type: self.maybe(target_type),
            nationality: self.maybe(country.name),
            group_name,
            weapon_type: weapon.label,
            num_killed: self.maybe(killed),
            num_wounded: self.maybe(wounded),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gtd_domain::VEHICLE_LABEL_VERBOSE;

    fn config(events: usize, seed: u64) -> SynthConfig {
        SynthConfig {
            events,
            seed,
            ..SynthConfig::default()
        }
    }

    #[test]
    fn test_same_seed_same_events() {
        let a = EventGenerator::new(config(200, 7)).unwrap().generate();
        let b = EventGenerator::new(config(200, 7)).unwrap().generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_events_stay_in_range() {
        let events = EventGenerator::new(config(500, 1)).unwrap().generate();
        assert_eq!(events.len(), 500);
        for e in &events {
            assert!((1970..=2017).contains(&e.year));
            assert!((1..=12).contains(&e.month));
            assert!(e.num_killed.is_none_or(|k| k >= 0.0));
            assert_eq!(e.to_record().len(), HEADERS.len());
        }
    }

    #[test]
    fn test_zero_missing_rate_fills_every_cell() {
        let cfg = SynthConfig {
            missing_rate: 0.0,
            ..config(300, 3)
        };
        let events = EventGenerator::new(cfg).unwrap().generate();
        assert!(events.iter().all(|e| e.num_killed.is_some() && e.latitude.is_some()));
    }

    #[test]
    fn test_large_sample_uses_verbose_vehicle_label() {
        let events = EventGenerator::new(config(5000, 42)).unwrap().generate();
        assert!(events.iter().any(|e| e.weapon_type == VEHICLE_LABEL_VERBOSE));
    }

    #[test]
    fn test_invalid_parameters() {
        let cfg = SynthConfig {
            missing_rate: 1.5,
            ..SynthConfig::default()
        };
        assert!(EventGenerator::new(cfg).is_err());

        let cfg = SynthConfig {
            first_year: 2000,
            last_year: 1990,
            ..SynthConfig::default()
        };
        assert!(EventGenerator::new(cfg).is_err());
    }
}
