//! Supported web font families

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::FontError;

macro_rules! font_families {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// A web font family inkset knows how to request.
        ///
        /// Serialized as the family name exactly as the font service spells it.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum FontFamily {
            $(
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl FontFamily {
            /// Every supported family, in catalogue order
            pub const ALL: &'static [FontFamily] = &[$(FontFamily::$variant),+];

            /// Family name as requested from the font service
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(FontFamily::$variant => $name,)+
                }
            }
        }
    };
}

font_families! {
    AbrilFatface => "Abril Fatface",
    AlfaSlabOne => "Alfa Slab One",
    Anton => "Anton",
    Bangers => "Bangers",
    BebasNeue => "Bebas Neue",
    Bungee => "Bungee",
    Caveat => "Caveat",
    Comfortaa => "Comfortaa",
    DancingScript => "Dancing Script",
    Fredoka => "Fredoka",
    GreatVibes => "Great Vibes",
    Lato => "Lato",
    Lobster => "Lobster",
    LuckiestGuy => "Luckiest Guy",
    Monoton => "Monoton",
    Montserrat => "Montserrat",
    OpenSans => "Open Sans",
    Orbitron => "Orbitron",
    Oswald => "Oswald",
    Pacifico => "Pacifico",
    PermanentMarker => "Permanent Marker",
    PlayfairDisplay => "Playfair Display",
    Poppins => "Poppins",
    PressStart2P => "Press Start 2P",
    Raleway => "Raleway",
    Righteous => "Righteous",
    Roboto => "Roboto",
    RussoOne => "Russo One",
    Satisfy => "Satisfy",
    ShadowsIntoLight => "Shadows Into Light",
}

impl Default for FontFamily {
    fn default() -> Self {
        FontFamily::Pacifico
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontFamily {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FontFamily::ALL
            .iter()
            .copied()
            .find(|family| family.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FontError::UnknownFamily(wanted.to_string()))
    }
}
