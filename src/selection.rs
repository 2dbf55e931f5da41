//! The set of stations the user has chosen, owned by the caller and changed only through
//! explicit interactions (the station multi-select or a click on the map).

use crate::constants::{DEFAULT_STATION, SIDEBAR_MAX_SELECTIONS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("You have already selected the maximum number of stations ({max}).")]
    MaxStationsReached { max: usize },

    #[error("At most {max} stations can be selected, got {requested}.")]
    TooManyStations { max: usize, requested: usize },
}

/// A point the user clicked on the station map. `hovertext` carries the station name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSelectionPoint {
    pub hovertext: String,
}

/// The points selected by one interaction with the map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSelectionEvent {
    pub points: Vec<MapSelectionPoint>,
}

impl MapSelectionEvent {
    pub fn from_station_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            points: names
                .into_iter()
                .map(|n| MapSelectionPoint { hovertext: n.into() })
                .collect(),
        }
    }
}

/// What an interaction did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Unchanged,
    Changed,
}

/// Stations currently chosen, at most `max_selections` of them.
///
/// # Examples
///
/// ```
/// use meteoshrooms::{MapSelectionEvent, SelectionState};
///
/// let mut state = SelectionState::default();
/// assert_eq!(state.selected(), ["Airolo"]);
///
/// state.apply_map_click(&MapSelectionEvent::from_station_names(["Basel / Binningen"])).unwrap();
/// assert_eq!(state.selected(), ["Airolo", "Basel / Binningen"]);
/// assert_eq!(state.previous(), ["Airolo"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    selected: Vec<String>,
    previous: Vec<String>,
    max_selections: usize,
}

impl SelectionState {
    pub fn new(default_station: &str, max_selections: usize) -> Self {
        let initial = vec![default_station.to_string()];
        Self {
            selected: initial.clone(),
            previous: initial,
            max_selections,
        }
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// The selection as it was before the last map interaction.
    pub fn previous(&self) -> &[String] {
        &self.previous
    }

    pub fn max_selections(&self) -> usize {
        self.max_selections
    }

    /// Replaces the selection with the stations chosen in the multi-select.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::TooManyStations`] and leaves the state unchanged when more
    /// than `max_selections` distinct stations are given.
    pub fn set_from_multiselect<I, S>(&mut self, stations: I) -> Result<SelectionChange, SelectionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut chosen: Vec<String> = Vec::new();
        for station in stations {
            let station = station.into();
            if !chosen.contains(&station) {
                chosen.push(station);
            }
        }
        if chosen.len() > self.max_selections {
            return Err(SelectionError::TooManyStations {
                max: self.max_selections,
                requested: chosen.len(),
            });
        }
        if chosen == self.selected {
            return Ok(SelectionChange::Unchanged);
        }
        self.selected = chosen;
        Ok(SelectionChange::Changed)
    }

    /// Adds the stations clicked on the map to the selection.
    ///
    /// An empty event changes nothing. Otherwise the current selection is recorded as
    /// [`previous`](Self::previous), newly clicked stations are merged in, and the result is
    /// sorted and cut to `max_selections`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::MaxStationsReached`] when the selection is already full.
    /// The selection itself is left as it was.
    pub fn apply_map_click(&mut self, event: &MapSelectionEvent) -> Result<SelectionChange, SelectionError> {
        if event.points.is_empty() {
            return Ok(SelectionChange::Unchanged);
        }

        let clicked: BTreeSet<&str> = event.points.iter().map(|p| p.hovertext.as_str()).collect();
        self.previous = self.selected.clone();

        if self.selected.len() >= self.max_selections {
            return Err(SelectionError::MaxStationsReached {
                max: self.max_selections,
            });
        }

        let new: Vec<&str> = clicked
            .into_iter()
            .filter(|name| !self.selected.iter().any(|s| s.as_str() == *name))
            .collect();
        if new.is_empty() {
            return Ok(SelectionChange::Unchanged);
        }

        let mut merged = self.selected.clone();
        merged.extend(new.into_iter().map(str::to_string));
        merged.sort();
        merged.truncate(self.max_selections);
        self.selected = merged;
        Ok(SelectionChange::Changed)
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(DEFAULT_STATION, SIDEBAR_MAX_SELECTIONS)
    }
}
