//! Structured postal addresses and display formatting

use serde::{Deserialize, Serialize};

/// Structured address attached to results, suggestions and records
///
/// Every component is optional; the engine fills in whatever the underlying
/// data source knows about a place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub house_number: Option<String>,
    pub street: Option<String>,
    pub neighborhood: Option<String>,
    pub locality: Option<String>,
    pub postcode: Option<String>,
    pub place: Option<String>,
    pub district: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

/// How much of the address to include when formatting for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressFormatStyle {
    /// House number and street only
    Short,
    /// Street line plus place, e.g. "740 15th St NW, Washington"
    Medium,
    /// Street line, place and region
    Long,
    /// Every known component
    Full,
}

impl Address {
    /// First line of the address: house number and street
    fn street_line(&self) -> Option<String> {
        match (self.house_number.as_deref(), self.street.as_deref()) {
            (Some(number), Some(street)) => Some(format!("{number} {street}")),
            (None, Some(street)) => Some(street.to_string()),
            (Some(number), None) => Some(number.to_string()),
            (None, None) => None,
        }
    }

    /// Human-readable single-line rendition, `None` when the address is empty
    pub fn formatted_address(&self, style: AddressFormatStyle) -> Option<String> {
        let components: Vec<String> = match style {
            AddressFormatStyle::Short => [self.street_line()].into_iter().flatten().collect(),
            AddressFormatStyle::Medium => [self.street_line(), self.place.clone()]
                .into_iter()
                .flatten()
                .collect(),
            AddressFormatStyle::Long => {
                [self.street_line(), self.place.clone(), self.region.clone()]
                    .into_iter()
                    .flatten()
                    .collect()
            }
            AddressFormatStyle::Full => [
                self.street_line(),
                self.neighborhood.clone(),
                self.locality.clone(),
                self.place.clone(),
                self.district.clone(),
                self.postcode.clone(),
                self.region.clone(),
                self.country.clone(),
            ]
            .into_iter()
            .flatten()
            .collect(),
        };

        if components.is_empty() {
            None
        } else {
            Some(components.join(", "))
        }
    }
}
