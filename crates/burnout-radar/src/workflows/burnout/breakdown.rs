use serde::Serialize;

/// Score above which the remainder is counted as burnout rather than stress.
pub const STRESS_CEILING: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Functioning,
    Overloaded,
    Burnout,
}

impl Zone {
    pub const fn ordered() -> [Self; 3] {
        [Self::Functioning, Self::Overloaded, Self::Burnout]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Functioning => "Functioning",
            Self::Overloaded => "Overloaded",
            Self::Burnout => "Burnout",
        }
    }

    pub const fn zone_label(self) -> &'static str {
        match self {
            Self::Functioning => "Healthy Zone",
            Self::Overloaded => "Stress Zone",
            Self::Burnout => "Burnout Zone",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneShare {
    pub zone: Zone,
    pub magnitude: u8,
}

/// Magnitudes for every zone, zeros included. Always sums to 100.
pub fn zone_magnitudes(score: u8) -> [ZoneShare; 3] {
    let score = score.min(100);
    let [functioning, overloaded, burnout] = Zone::ordered();

    [
        ZoneShare {
            zone: functioning,
            magnitude: 100 - score,
        },
        ZoneShare {
            zone: overloaded,
            magnitude: score.min(STRESS_CEILING),
        },
        ZoneShare {
            zone: burnout,
            magnitude: score.saturating_sub(STRESS_CEILING),
        },
    ]
}

/// Non-zero zone shares in display order.
pub fn decompose(score: u8) -> Vec<ZoneShare> {
    zone_magnitudes(score)
        .into_iter()
        .filter(|share| share.magnitude > 0)
        .collect()
}
