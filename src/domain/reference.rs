//! Static agronomy reference data.
//!
//! All lookups are case-insensitive and pure; unknown keys fall back to a
//! fixed default rather than failing.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// A crop with its growing seasons and major producing states.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CropInfo {
    pub name: &'static str,
    pub seasons: &'static [&'static str],
    pub states: &'static [&'static str],
}

pub const CROPS: &[CropInfo] = &[
    CropInfo { name: "rice", seasons: &["Kharif"], states: &["West Bengal", "UP", "Punjab", "AP"] },
    CropInfo { name: "wheat", seasons: &["Rabi"], states: &["UP", "Punjab", "Haryana", "MP"] },
    CropInfo { name: "sugarcane", seasons: &["Whole Year"], states: &["UP", "Maharashtra", "Karnataka"] },
    CropInfo { name: "cotton", seasons: &["Kharif"], states: &["Gujarat", "Maharashtra", "Telangana"] },
    CropInfo { name: "maize", seasons: &["Kharif", "Rabi"], states: &["Karnataka", "MP", "Maharashtra"] },
    CropInfo { name: "pulses", seasons: &["Rabi", "Kharif"], states: &["MP", "Maharashtra", "Rajasthan"] },
    CropInfo { name: "oilseeds", seasons: &["Kharif", "Rabi"], states: &["Gujarat", "Rajasthan", "MP"] },
    CropInfo { name: "fruits", seasons: &["Whole Year"], states: &["Maharashtra", "AP", "Karnataka"] },
    CropInfo { name: "vegetables", seasons: &["Whole Year"], states: &["West Bengal", "UP", "Bihar"] },
];

/// Sowing and harvesting windows for one season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonWindow {
    pub season: &'static str,
    pub sowing: &'static str,
    pub harvesting: &'static str,
}

static CROP_CALENDAR: Lazy<HashMap<&'static str, Vec<SeasonWindow>>> = Lazy::new(|| {
    let window = |season: &'static str, sowing: &'static str, harvesting: &'static str| {
        SeasonWindow { season, sowing, harvesting }
    };
    HashMap::from([
        (
            "rice",
            vec![
                window("Kharif", "June-July", "October-November"),
                window("Rabi", "November-December", "March-April"),
            ],
        ),
        ("wheat", vec![window("Rabi", "November-December", "March-April")]),
        ("sugarcane", vec![window("Whole Year", "February-March", "December-March")]),
        ("cotton", vec![window("Kharif", "June-July", "October-December")]),
        (
            "maize",
            vec![
                window("Kharif", "June-July", "September-October"),
                window("Rabi", "October-November", "February-March"),
            ],
        ),
    ])
});

/// Calendar for a crop. The region does not change the windows yet; an
/// unknown crop yields an empty calendar.
pub fn crop_calendar(crop: &str, _region: &str) -> Vec<SeasonWindow> {
    CROP_CALENDAR
        .get(crop.trim().to_lowercase().as_str())
        .cloned()
        .unwrap_or_default()
}

/// Wholesale price band for a crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBand {
    pub min: u32,
    pub max: u32,
    pub unit: &'static str,
}

impl PriceBand {
    pub const UNKNOWN: PriceBand = PriceBand { min: 0, max: 0, unit: "kg" };
}

/// Crops with a published price band, in display order.
pub const PRICED_CROPS: &[&str] = &[
    "rice", "wheat", "sugarcane", "cotton", "maize", "tomato", "potato", "onion",
];

static MARKET_PRICES: Lazy<HashMap<&'static str, PriceBand>> = Lazy::new(|| {
    let quintal = |min, max| PriceBand { min, max, unit: "quintal" };
    let kg = |min, max| PriceBand { min, max, unit: "kg" };
    HashMap::from([
        ("rice", quintal(2500, 3200)),
        ("wheat", quintal(2100, 2600)),
        ("sugarcane", quintal(320, 380)),
        ("cotton", quintal(6500, 7500)),
        ("maize", quintal(1800, 2200)),
        ("tomato", kg(15, 40)),
        ("potato", kg(12, 25)),
        ("onion", kg(20, 45)),
    ])
});

/// Mock market price for a crop, `{0, 0, kg}` when unknown.
pub fn market_price(crop: &str) -> PriceBand {
    MARKET_PRICES
        .get(crop.trim().to_lowercase().as_str())
        .copied()
        .unwrap_or(PriceBand::UNKNOWN)
}

/// Soil types with specific advice.
pub const SOIL_TYPES: &[&str] = &["clay", "sandy", "loamy", "silt"];

const GENERIC_SOIL_ADVICE: &[&str] = &["Get soil tested regularly", "Add organic matter"];

/// Management advice for a soil type, with a generic two-item fallback.
pub fn soil_recommendations(soil_type: &str) -> &'static [&'static str] {
    match soil_type.trim().to_lowercase().as_str() {
        "clay" => &["Add organic matter", "Improve drainage", "Use raised beds"],
        "sandy" => &["Add organic matter", "Use mulch", "Frequent irrigation"],
        "loamy" => &["Maintain organic matter", "Regular soil testing", "Crop rotation"],
        "silt" => &["Prevent compaction", "Add organic matter", "Proper drainage"],
        _ => GENERIC_SOIL_ADVICE,
    }
}

/// General advice shown on the soil testing page.
pub const SOIL_TESTING_TIPS: &[&str] = &[
    "Use organic manure",
    "Improve irrigation",
    "Do regular pH testing",
];

/// A crop disease alert.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DiseaseAlert {
    pub crop: &'static str,
    pub disease: &'static str,
    pub risk: &'static str,
    pub description: &'static str,
    pub prevention: &'static str,
    pub season: &'static str,
}

pub const DISEASE_ALERTS: &[DiseaseAlert] = &[
    DiseaseAlert {
        crop: "Tomato",
        disease: "Late Blight",
        risk: "High",
        description: "Weather conditions are favorable for Late Blight development. Check plants regularly.",
        prevention: "Apply fungicides preventatively and ensure good air circulation.",
        season: "Rainy Season",
    },
    DiseaseAlert {
        crop: "Corn",
        disease: "Common Rust",
        risk: "Medium",
        description: "Rust spores have been detected in the region.",
        prevention: "Consider resistant varieties and fungicide application if disease is severe.",
        season: "Summer",
    },
    DiseaseAlert {
        crop: "Wheat",
        disease: "Powdery Mildew",
        risk: "Low",
        description: "Mild risk of powdery mildew due to moderate temperatures.",
        prevention: "Ensure proper spacing between plants for air circulation.",
        season: "Winter",
    },
];

/// Alerts relevant to the given crops (lower-case). When none match, every
/// alert is returned so the page is never empty.
pub fn disease_alerts_for(crops: &[String]) -> Vec<DiseaseAlert> {
    let matching: Vec<DiseaseAlert> = DISEASE_ALERTS
        .iter()
        .filter(|alert| crops.iter().any(|crop| alert.crop.eq_ignore_ascii_case(crop)))
        .copied()
        .collect();

    if matching.is_empty() {
        DISEASE_ALERTS.to_vec()
    } else {
        matching
    }
}

/// A government support scheme.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Scheme {
    pub name: &'static str,
    pub description: &'static str,
    pub eligibility: &'static str,
    pub link: &'static str,
}

pub const GOVERNMENT_SCHEMES: &[Scheme] = &[
    Scheme {
        name: "PM-KISAN",
        description: "Financial assistance of ₹6,000 per year to small and marginal farmers",
        eligibility: "Small and marginal farmers",
        link: "https://pmkisan.gov.in",
    },
    Scheme {
        name: "Soil Health Card",
        description: "Provides soil health information and recommendations to farmers",
        eligibility: "All farmers",
        link: "https://soilhealth.dac.gov.in",
    },
    Scheme {
        name: "Pradhan Mantri Fasal Bima Yojana",
        description: "Crop insurance scheme to protect farmers against crop losses",
        eligibility: "All farmers",
        link: "https://pmfby.gov.in",
    },
    Scheme {
        name: "Kisan Credit Card",
        description: "Credit card for farmers with flexible repayment options",
        eligibility: "All farmers",
        link: "https://www.agriculture.gov.in",
    },
];
