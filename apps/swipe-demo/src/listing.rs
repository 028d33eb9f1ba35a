use std::fmt;

use swipedeck_ui::Card;

/// A rental listing shown on a card.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: u32,
    pub title: String,
    pub city: String,
    pub monthly_rent: u32,
}

impl Listing {
    pub fn new(id: u32, title: impl Into<String>, city: impl Into<String>, monthly_rent: u32) -> Self {
        Self {
            id,
            title: title.into(),
            city: city.into(),
            monthly_rent,
        }
    }
}

impl Card for Listing {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} ({}, ${}/mo)",
            self.id, self.title, self.city, self.monthly_rent
        )
    }
}

pub fn sample_listings() -> Vec<Listing> {
    vec![
        Listing::new(101, "Sunny studio", "Lisbon", 950),
        Listing::new(102, "Loft by the canal", "Amsterdam", 1_800),
        Listing::new(103, "Garden flat", "Berlin", 1_250),
        Listing::new(104, "Tiny house", "Porto", 700),
        Listing::new(105, "Penthouse", "Madrid", 2_600),
        Listing::new(106, "Attic room", "Prague", 540),
        Listing::new(107, "Harbour cabin", "Bergen", 1_100),
    ]
}
