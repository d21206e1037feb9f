//! Elemental types and the effectiveness cycle

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Elemental type carried by enemies and projectiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Element {
    #[default]
    Fire,
    Water,
    Ground,
    Air,
}

impl Element {
    /// All elements, in hotkey order
    pub const ALL: [Element; 4] = [Element::Fire, Element::Water, Element::Ground, Element::Air];

    /// The one element this element defeats
    ///
    /// Fixed cycle: fire -> air -> ground -> water -> fire.
    pub fn beats(self) -> Element {
        match self {
            Element::Fire => Element::Air,
            Element::Air => Element::Ground,
            Element::Ground => Element::Water,
            Element::Water => Element::Fire,
        }
    }

    /// The element that defeats this one
    pub fn countered_by(self) -> Element {
        match self {
            Element::Air => Element::Fire,
            Element::Ground => Element::Air,
            Element::Water => Element::Ground,
            Element::Fire => Element::Water,
        }
    }

    /// Element bound to a number key (1-4)
    pub fn from_hotkey(key: u8) -> Option<Element> {
        match key {
            1..=4 => Some(Self::ALL[(key - 1) as usize]),
            _ => None,
        }
    }

    /// Uniformly random element
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Element {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Fire => "fire",
            Element::Water => "water",
            Element::Ground => "ground",
            Element::Air => "air",
        }
    }
}
