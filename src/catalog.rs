//! Static bright-star catalog and constellation line figures.
//!
//! The catalog is a fixed, ordered table of 108 named stars covering the
//! major northern and southern constellations. Order is insertion order and
//! is part of the public contract: the position calculator emits visible
//! stars in this order. Positions are J2000 right ascension / declination in
//! degrees; magnitudes are apparent visual magnitude (lower = brighter,
//! Sirius at -1.46 is the catalog minimum).
//!
//! Constellation figures are keyed by *star name pairs*, not positional
//! indices, so a figure stays correct no matter which subset of the catalog
//! survives magnitude and horizon filtering: the renderer resolves each pair
//! against the currently visible set and draws the segments whose endpoints
//! are both present.

/// A single catalog entry. Immutable; the catalog never changes at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogStar {
    pub name: &'static str,
    /// J2000 right ascension, degrees in [0, 360).
    pub ra_deg: f64,
    /// J2000 declination, degrees in [-90, 90].
    pub dec_deg: f64,
    /// Apparent visual magnitude; lower (including negative) is brighter.
    pub mag: f64,
    pub constellation: Constellation,
}

/// Constellations represented in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constellation {
    UrsaMajor,
    Orion,
    Andromeda,
    Cassiopeia,
    Auriga,
    Gemini,
    Leo,
    Virgo,
    Scorpius,
    Sagittarius,
    Cygnus,
    Lyra,
    Aquila,
    Bootes,
    UrsaMinor,
    Perseus,
    CanisMajor,
    CanisMinor,
    Taurus,
    PiscisAustrinus,
    Aries,
    Libra,
    Crux,
    Centaurus,
    Carina,
    Vela,
    Phoenix,
    Grus,
    Pavo,
    Tucana,
    CoronaAustralis,
    Ara,
    TriangulumAustrale,
}

impl Constellation {
    pub fn label(&self) -> &'static str {
        match self {
            Constellation::UrsaMajor => "Ursa Major",
            Constellation::Orion => "Orion",
            Constellation::Andromeda => "Andromeda",
            Constellation::Cassiopeia => "Cassiopeia",
            Constellation::Auriga => "Auriga",
            Constellation::Gemini => "Gemini",
            Constellation::Leo => "Leo",
            Constellation::Virgo => "Virgo",
            Constellation::Scorpius => "Scorpius",
            Constellation::Sagittarius => "Sagittarius",
            Constellation::Cygnus => "Cygnus",
            Constellation::Lyra => "Lyra",
            Constellation::Aquila => "Aquila",
            Constellation::Bootes => "Bootes",
            Constellation::UrsaMinor => "Ursa Minor",
            Constellation::Perseus => "Perseus",
            Constellation::CanisMajor => "Canis Major",
            Constellation::CanisMinor => "Canis Minor",
            Constellation::Taurus => "Taurus",
            Constellation::PiscisAustrinus => "Piscis Austrinus",
            Constellation::Aries => "Aries",
            Constellation::Libra => "Libra",
            Constellation::Crux => "Crux",
            Constellation::Centaurus => "Centaurus",
            Constellation::Carina => "Carina",
            Constellation::Vela => "Vela",
            Constellation::Phoenix => "Phoenix",
            Constellation::Grus => "Grus",
            Constellation::Pavo => "Pavo",
            Constellation::Tucana => "Tucana",
            Constellation::CoronaAustralis => "Corona Australis",
            Constellation::Ara => "Ara",
            Constellation::TriangulumAustrale => "Triangulum Australe",
        }
    }
}

const fn star(
    name: &'static str,
    ra_deg: f64,
    dec_deg: f64,
    mag: f64,
    constellation: Constellation,
) -> CatalogStar {
    CatalogStar {
        name,
        ra_deg,
        dec_deg,
        mag,
        constellation,
    }
}

use Constellation as C;

/// The catalog, in the fixed order referenced throughout the crate.
static CATALOG: [CatalogStar; 108] = [
    // Ursa Major (the Big Dipper asterism)
    star("Dubhe", 165.932, 61.751, 1.79, C::UrsaMajor),
    star("Merak", 165.460, 56.382, 2.37, C::UrsaMajor),
    star("Phecda", 178.458, 53.695, 2.44, C::UrsaMajor),
    star("Megrez", 183.857, 57.033, 3.31, C::UrsaMajor),
    star("Alioth", 193.507, 55.960, 1.77, C::UrsaMajor),
    star("Mizar", 200.981, 54.925, 2.27, C::UrsaMajor),
    star("Alkaid", 206.885, 49.313, 1.86, C::UrsaMajor),
    // Orion
    star("Betelgeuse", 88.793, 7.407, 0.50, C::Orion),
    star("Rigel", 78.634, -8.202, 0.13, C::Orion),
    star("Bellatrix", 81.283, 6.350, 1.64, C::Orion),
    star("Mintaka", 83.002, -0.299, 2.23, C::Orion),
    star("Alnilam", 84.053, -1.202, 1.70, C::Orion),
    star("Alnitak", 85.190, -1.943, 2.05, C::Orion),
    star("Saiph", 86.939, -9.670, 2.06, C::Orion),
    // Andromeda
    star("Alpheratz", 2.097, 29.090, 2.06, C::Andromeda),
    star("Mirach", 17.433, 35.621, 2.01, C::Andromeda),
    star("Almach", 30.975, 42.330, 2.26, C::Andromeda),
    // Cassiopeia
    star("Schedar", 10.127, 56.537, 2.23, C::Cassiopeia),
    star("Caph", 2.295, 59.150, 2.27, C::Cassiopeia),
    star("Gamma Cas", 14.177, 60.717, 2.47, C::Cassiopeia),
    star("Ruchbah", 22.818, 55.045, 2.66, C::Cassiopeia),
    star("Segin", 25.655, 63.670, 3.38, C::Cassiopeia),
    // Auriga
    star("Capella", 79.172, 45.998, 0.08, C::Auriga),
    star("Menkalinan", 89.882, 44.947, 1.90, C::Auriga),
    star("Mahasim", 84.411, 33.166, 2.69, C::Auriga),
    // Gemini
    star("Pollux", 116.329, 28.026, 1.14, C::Gemini),
    star("Castor", 113.650, 31.888, 1.57, C::Gemini),
    star("Alhena", 99.428, 16.399, 1.93, C::Gemini),
    star("Wasat", 109.273, 22.514, 3.53, C::Gemini),
    // Leo
    star("Regulus", 152.093, 11.967, 1.35, C::Leo),
    star("Denebola", 177.265, 14.572, 2.13, C::Leo),
    star("Algieba", 154.993, 19.842, 2.37, C::Leo),
    star("Zosma", 168.527, 20.524, 2.56, C::Leo),
    // Virgo
    star("Spica", 201.298, -11.161, 0.97, C::Virgo),
    star("Zavijava", 188.597, 1.764, 3.38, C::Virgo),
    star("Porrima", 190.415, -1.449, 2.74, C::Virgo),
    // Scorpius
    star("Antares", 247.352, -26.432, 1.09, C::Scorpius),
    star("Shaula", 263.402, -37.104, 1.63, C::Scorpius),
    star("Sargas", 265.622, -42.999, 1.87, C::Scorpius),
    star("Dschubba", 240.083, -22.622, 2.29, C::Scorpius),
    // Sagittarius
    star("Kaus Australis", 276.043, -34.385, 1.85, C::Sagittarius),
    star("Nunki", 283.816, -26.297, 2.02, C::Sagittarius),
    star("Kaus Media", 274.407, -29.828, 2.70, C::Sagittarius),
    star("Kaus Borealis", 271.452, -25.421, 2.81, C::Sagittarius),
    // Cygnus
    star("Deneb", 310.358, 45.280, 1.25, C::Cygnus),
    star("Sadr", 305.557, 40.257, 2.20, C::Cygnus),
    star("Gienah", 304.970, 33.970, 2.46, C::Cygnus),
    star("Delta Cyg", 292.680, 45.131, 2.87, C::Cygnus),
    star("Albireo", 292.863, 27.960, 3.18, C::Cygnus),
    // Lyra
    star("Vega", 279.234, 38.784, 0.03, C::Lyra),
    star("Sheliak", 284.736, 33.363, 3.45, C::Lyra),
    star("Sulafat", 284.056, 32.690, 3.24, C::Lyra),
    // Aquila
    star("Altair", 297.696, 8.868, 0.77, C::Aquila),
    star("Tarazed", 296.565, 10.613, 2.72, C::Aquila),
    star("Alshain", 298.564, 6.407, 3.71, C::Aquila),
    // Bootes
    star("Arcturus", 213.915, 19.182, -0.05, C::Bootes),
    star("Nekkar", 213.300, 40.390, 3.49, C::Bootes),
    star("Seginus", 221.247, 38.308, 3.03, C::Bootes),
    // Ursa Minor
    star("Polaris", 37.946, 89.264, 1.98, C::UrsaMinor),
    star("Kochab", 222.676, 74.156, 2.08, C::UrsaMinor),
    star("Pherkad", 230.182, 71.834, 3.05, C::UrsaMinor),
    // Perseus
    star("Mirfak", 51.081, 49.861, 1.79, C::Perseus),
    star("Algol", 47.042, 40.956, 2.12, C::Perseus),
    star("Atik", 55.895, 50.687, 2.85, C::Perseus),
    // Canis Major
    star("Sirius", 101.287, -16.716, -1.46, C::CanisMajor),
    star("Adhara", 104.656, -28.972, 1.50, C::CanisMajor),
    star("Wezen", 107.098, -26.393, 1.84, C::CanisMajor),
    // Canis Minor
    star("Procyon", 114.825, 5.225, 0.34, C::CanisMinor),
    star("Gomeisa", 115.787, 8.289, 2.84, C::CanisMinor),
    // Taurus
    star("Aldebaran", 68.980, 16.509, 0.85, C::Taurus),
    star("Elnath", 81.573, 28.608, 1.68, C::Taurus),
    star("Alcyone", 56.871, 24.105, 2.87, C::Taurus),
    // Piscis Austrinus
    star("Fomalhaut", 344.413, -29.622, 1.16, C::PiscisAustrinus),
    // Aries
    star("Hamal", 31.793, 23.462, 2.00, C::Aries),
    star("Sheratan", 28.660, 20.808, 2.64, C::Aries),
    // Libra
    star("Zubeneschamali", 229.252, -9.383, 2.61, C::Libra),
    star("Zubenelgenubi", 222.720, -16.042, 2.75, C::Libra),
    // Crux
    star("Acrux", 186.650, -63.099, 0.77, C::Crux),
    star("Gacrux", 187.791, -57.113, 1.63, C::Crux),
    star("Imai", 191.930, -59.689, 1.25, C::Crux),
    star("Mimosa", 183.786, -59.689, 1.30, C::Crux),
    // Centaurus
    star("Rigil Kent", 219.902, -60.834, -0.27, C::Centaurus),
    star("Hadar", 210.956, -60.373, 0.61, C::Centaurus),
    star("Muhlifain", 190.379, -48.960, 2.20, C::Centaurus),
    star("Menkent", 211.670, -36.370, 2.06, C::Centaurus),
    // Carina
    star("Canopus", 95.988, -52.696, -0.74, C::Carina),
    star("Miaplacidus", 138.300, -69.717, 1.68, C::Carina),
    star("Avior", 125.628, -59.509, 1.86, C::Carina),
    star("Aspidiske", 140.528, -64.394, 2.76, C::Carina),
    // Vela
    star("Suhail", 136.999, -43.433, 2.21, C::Vela),
    star("Regor", 128.446, -47.337, 1.75, C::Vela),
    star("Markeb", 140.528, -55.011, 2.47, C::Vela),
    // Phoenix
    star("Ankaa", 6.571, -42.306, 2.39, C::Phoenix),
    star("Beta Phe", 16.962, -46.718, 3.31, C::Phoenix),
    // Grus
    star("Alnair", 332.058, -46.961, 1.74, C::Grus),
    star("Beta Gru", 340.667, -46.885, 2.11, C::Grus),
    star("Gamma Gru", 331.378, -37.365, 3.01, C::Grus),
    // Pavo
    star("Peacock", 306.412, -56.735, 1.94, C::Pavo),
    star("Beta Pav", 315.161, -66.203, 3.42, C::Pavo),
    // Tucana (Gamma Tuc RA normalized into [0, 360))
    star("Alpha Tuc", 337.137, -60.261, 2.86, C::Tucana),
    star("Gamma Tuc", 4.397, -58.236, 3.99, C::Tucana),
    // Corona Australis
    star("Meridiana", 287.368, -37.904, 4.11, C::CoronaAustralis),
    star("Beta CrA", 288.139, -39.341, 4.11, C::CoronaAustralis),
    // Ara
    star("Beta Ara", 264.325, -55.530, 2.85, C::Ara),
    star("Alpha Ara", 262.960, -49.876, 2.95, C::Ara),
    // Triangulum Australe
    star("Atria", 252.166, -69.028, 1.91, C::TriangulumAustrale),
    star("Beta TrA", 249.418, -63.431, 2.85, C::TriangulumAustrale),
    star("Gamma TrA", 244.970, -68.680, 2.89, C::TriangulumAustrale),
];

type LinePairs = &'static [(&'static str, &'static str)];

/// Constellation figures as ordered name pairs.
static CONSTELLATION_LINES: [(Constellation, LinePairs); 33] = [
    (
        C::UrsaMajor,
        &[
            ("Dubhe", "Merak"),
            ("Merak", "Phecda"),
            ("Phecda", "Megrez"),
            ("Megrez", "Alioth"),
            ("Alioth", "Mizar"),
            ("Mizar", "Alkaid"),
        ],
    ),
    (
        // The classic hourglass: shoulders, belt, feet.
        C::Orion,
        &[
            ("Betelgeuse", "Bellatrix"),
            ("Bellatrix", "Mintaka"),
            ("Mintaka", "Alnilam"),
            ("Alnilam", "Alnitak"),
            ("Alnitak", "Betelgeuse"),
            ("Mintaka", "Rigel"),
            ("Alnitak", "Saiph"),
            ("Rigel", "Saiph"),
        ],
    ),
    (
        C::Andromeda,
        &[("Alpheratz", "Mirach"), ("Mirach", "Almach")],
    ),
    (
        C::Cassiopeia,
        &[
            ("Schedar", "Caph"),
            ("Caph", "Gamma Cas"),
            ("Gamma Cas", "Ruchbah"),
            ("Ruchbah", "Segin"),
        ],
    ),
    (
        C::Auriga,
        &[
            ("Capella", "Menkalinan"),
            ("Menkalinan", "Mahasim"),
            ("Mahasim", "Capella"),
        ],
    ),
    (
        C::Gemini,
        &[
            ("Pollux", "Castor"),
            ("Pollux", "Alhena"),
            ("Castor", "Wasat"),
            ("Alhena", "Wasat"),
        ],
    ),
    (
        C::Leo,
        &[
            ("Regulus", "Denebola"),
            ("Regulus", "Algieba"),
            ("Algieba", "Zosma"),
            ("Zosma", "Denebola"),
        ],
    ),
    (C::Virgo, &[("Spica", "Zavijava"), ("Zavijava", "Porrima")]),
    (
        C::Scorpius,
        &[
            ("Antares", "Shaula"),
            ("Antares", "Sargas"),
            ("Antares", "Dschubba"),
            ("Shaula", "Sargas"),
        ],
    ),
    (
        C::Sagittarius,
        &[
            ("Kaus Australis", "Nunki"),
            ("Kaus Australis", "Kaus Media"),
            ("Kaus Media", "Kaus Borealis"),
            ("Kaus Borealis", "Nunki"),
        ],
    ),
    (
        C::Cygnus,
        &[
            ("Deneb", "Sadr"),
            ("Sadr", "Gienah"),
            ("Sadr", "Delta Cyg"),
            ("Delta Cyg", "Albireo"),
            ("Gienah", "Albireo"),
        ],
    ),
    (
        C::Lyra,
        &[
            ("Vega", "Sheliak"),
            ("Vega", "Sulafat"),
            ("Sheliak", "Sulafat"),
        ],
    ),
    (
        C::Aquila,
        &[("Altair", "Tarazed"), ("Altair", "Alshain")],
    ),
    (
        C::Bootes,
        &[("Arcturus", "Nekkar"), ("Arcturus", "Seginus")],
    ),
    (
        C::UrsaMinor,
        &[
            ("Polaris", "Kochab"),
            ("Kochab", "Pherkad"),
            ("Pherkad", "Polaris"),
        ],
    ),
    (C::Perseus, &[("Mirfak", "Algol"), ("Mirfak", "Atik")]),
    (
        C::CanisMajor,
        &[
            ("Sirius", "Adhara"),
            ("Sirius", "Wezen"),
            ("Adhara", "Wezen"),
        ],
    ),
    (C::CanisMinor, &[("Procyon", "Gomeisa")]),
    (
        C::Taurus,
        &[("Aldebaran", "Elnath"), ("Aldebaran", "Alcyone")],
    ),
    (C::PiscisAustrinus, &[]),
    (C::Aries, &[("Hamal", "Sheratan")]),
    (C::Libra, &[("Zubeneschamali", "Zubenelgenubi")]),
    (
        C::Crux,
        &[
            ("Acrux", "Gacrux"),
            ("Gacrux", "Imai"),
            ("Imai", "Mimosa"),
            ("Mimosa", "Acrux"),
            ("Gacrux", "Mimosa"),
        ],
    ),
    (
        C::Centaurus,
        &[
            ("Rigil Kent", "Hadar"),
            ("Rigil Kent", "Muhlifain"),
            ("Muhlifain", "Menkent"),
            ("Hadar", "Menkent"),
        ],
    ),
    (
        C::Carina,
        &[
            ("Canopus", "Miaplacidus"),
            ("Canopus", "Avior"),
            ("Miaplacidus", "Aspidiske"),
            ("Avior", "Aspidiske"),
        ],
    ),
    (
        C::Vela,
        &[
            ("Suhail", "Regor"),
            ("Regor", "Markeb"),
            ("Markeb", "Suhail"),
        ],
    ),
    (C::Phoenix, &[("Ankaa", "Beta Phe")]),
    (
        C::Grus,
        &[
            ("Alnair", "Beta Gru"),
            ("Alnair", "Gamma Gru"),
            ("Beta Gru", "Gamma Gru"),
        ],
    ),
    (C::Pavo, &[("Peacock", "Beta Pav")]),
    (C::Tucana, &[("Alpha Tuc", "Gamma Tuc")]),
    (C::CoronaAustralis, &[("Meridiana", "Beta CrA")]),
    (C::Ara, &[("Beta Ara", "Alpha Ara")]),
    (
        C::TriangulumAustrale,
        &[
            ("Atria", "Beta TrA"),
            ("Beta TrA", "Gamma TrA"),
            ("Gamma TrA", "Atria"),
        ],
    ),
];

/// All catalog stars in the fixed catalog order.
pub fn stars() -> &'static [CatalogStar] {
    &CATALOG
}

/// Constellation figures as name-keyed segment lists.
pub fn constellation_lines() -> &'static [(Constellation, LinePairs)] {
    &CONSTELLATION_LINES
}

/// The brightest (lowest) magnitude present in the catalog.
pub fn min_magnitude() -> f64 {
    CATALOG.iter().map(|s| s.mag).fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_coordinate_ranges() {
        for s in stars() {
            assert!(
                (0.0..360.0).contains(&s.ra_deg),
                "{} RA {} out of range",
                s.name,
                s.ra_deg
            );
            assert!(
                (-90.0..=90.0).contains(&s.dec_deg),
                "{} dec {} out of range",
                s.name,
                s.dec_deg
            );
        }
    }

    #[test]
    fn catalog_names_unique() {
        let names: HashSet<_> = stars().iter().map(|s| s.name).collect();
        assert_eq!(names.len(), stars().len());
    }

    #[test]
    fn line_endpoints_resolve_within_their_constellation() {
        let by_name: std::collections::HashMap<_, _> =
            stars().iter().map(|s| (s.name, s)).collect();
        for (constellation, pairs) in constellation_lines() {
            for (a, b) in pairs.iter() {
                let sa = by_name.get(a).unwrap_or_else(|| panic!("unknown star {a}"));
                let sb = by_name.get(b).unwrap_or_else(|| panic!("unknown star {b}"));
                assert_eq!(sa.constellation, *constellation, "{a} in wrong figure");
                assert_eq!(sb.constellation, *constellation, "{b} in wrong figure");
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn sirius_is_the_catalog_minimum() {
        assert!((min_magnitude() - (-1.46)).abs() < 1e-9);
    }
}
