//! Strain catalog
//!
//! Strains are the collectible cosmetic profiles the renderer themes the room
//! with. Only the `unlocked` flag ever changes after construction.

use serde::{Deserialize, Serialize};

/// Strain family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrainKind {
    Sativa,
    Indica,
    Hybrid,
}

/// How hard a strain is to come by
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Legendary,
}

/// A collectible strain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strain {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: StrainKind,
    /// Base tint (CSS hex)
    pub color: String,
    pub glow_color: String,
    pub particle_color: String,
    /// Short blurb of the visual effect
    pub effect: String,
    pub description: String,
    pub unlocked: bool,
    pub rarity: Rarity,
}

impl Strain {
    #[allow(clippy::too_many_arguments)]
    fn new(
        id: &str,
        name: &str,
        kind: StrainKind,
        colors: [&str; 3],
        effect: &str,
        description: &str,
        unlocked: bool,
        rarity: Rarity,
    ) -> Self {
        let [color, glow_color, particle_color] = colors;
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            color: color.to_string(),
            glow_color: glow_color.to_string(),
            particle_color: particle_color.to_string(),
            effect: effect.to_string(),
            description: description.to_string(),
            unlocked,
            rarity,
        }
    }
}

/// Id of the strain a fresh session starts with
pub const DEFAULT_STRAIN_ID: &str = "og-kush";

/// The full catalog in display order, with the two starters unlocked
pub fn default_strains() -> Vec<Strain> {
    use Rarity::*;
    use StrainKind::*;

    vec![
        Strain::new(
            "og-kush",
            "OG Kush",
            Hybrid,
            ["#4a7c3f", "#7fff00", "#90EE90"],
            "Balanced vibes with golden haze",
            "The classic. A perfect balance of relaxation and euphoria.",
            true,
            Common,
        ),
        Strain::new(
            "purple-haze",
            "Purple Haze",
            Sativa,
            ["#9370DB", "#BA55D3", "#DDA0DD"],
            "Psychedelic purple swirls",
            "Inspired by Hendrix. Trippy purple visuals and creative energy.",
            true,
            Common,
        ),
        Strain::new(
            "blue-dream",
            "Blue Dream",
            Hybrid,
            ["#4169E1", "#00BFFF", "#87CEEB"],
            "Dreamy blue mist with sparkles",
            "Float through a cerulean dreamscape. Gentle and uplifting.",
            false,
            Rare,
        ),
        Strain::new(
            "northern-lights",
            "Northern Lights",
            Indica,
            ["#00FA9A", "#00FF7F", "#98FB98"],
            "Aurora borealis wave patterns",
            "Watch the northern lights dance across your ceiling.",
            false,
            Rare,
        ),
        Strain::new(
            "golden-goat",
            "Golden Goat",
            Sativa,
            ["#D4AF37", "#FFD700", "#FAFAD2"],
            "Golden sunshine rays with warmth",
            "Pure golden sunshine. Everything feels warm and bright.",
            false,
            Rare,
        ),
        Strain::new(
            "alien-og",
            "Alien OG",
            Hybrid,
            ["#00FF00", "#39FF14", "#ADFF2F"],
            "Extraterrestrial geometric patterns",
            "Out of this world. See geometric patterns from another dimension.",
            false,
            Legendary,
        ),
        Strain::new(
            "galaxy-brain",
            "Galaxy Brain",
            Sativa,
            ["#8B00FF", "#9400D3", "#E6E6FA"],
            "Cosmic nebula expansion with stars",
            "Your mind becomes the universe. Stars and nebulae everywhere.",
            false,
            Legendary,
        ),
        Strain::new(
            "lava-cake",
            "Lava Cake",
            Indica,
            ["#FF4500", "#FF6347", "#FFA07A"],
            "Warm lava flow with ember particles",
            "Melting warmth flows through you. Cozy and decadent.",
            false,
            Legendary,
        ),
    ]
}
