//! Built-in tool profiles.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::advisory::profile::{JobSuitability, ToolProfile};

fn fit(job_type: &str, score: u8, reason: &str) -> JobSuitability {
    JobSuitability {
        job_type: job_type.to_string(),
        score,
        reason: reason.to_string(),
        limitations: None,
    }
}

fn fit_with(job_type: &str, score: u8, reason: &str, limitations: &str) -> JobSuitability {
    JobSuitability {
        limitations: Some(limitations.to_string()),
        ..fit(job_type, score, reason)
    }
}

fn profile(
    id: &str,
    name: &str,
    daily: Decimal,
    purchase: Decimal,
    threshold: u32,
    suitability: Vec<JobSuitability>,
    when_to_use: &[&str],
) -> ToolProfile {
    ToolProfile {
        id: id.to_string(),
        name: name.to_string(),
        daily_rental_rate: daily,
        purchase_cost: purchase,
        buy_threshold_days: threshold,
        suitability,
        when_to_use: when_to_use.iter().map(|s| s.to_string()).collect(),
        limitations: None,
    }
}

pub fn builtin_profiles() -> Vec<ToolProfile> {
    let mut digger = profile(
        "mini-digger",
        "Mini digger 1.5t",
        dec!(150),
        dec!(15000),
        100,
        vec![
            fit("excavation", 10, "moves soil far faster than by hand"),
            fit("foundations", 9, "digs footings to a consistent depth"),
            fit_with(
                "patio",
                7,
                "clears the sub-base area quickly",
                "needs at least 1m access width",
            ),
            fit("landscaping", 8, "regrading and tree stump removal"),
        ],
        &["digging trenches", "removing large volumes of soil"],
    );
    digger.limitations = Some("operator training strongly recommended".to_string());

    vec![
        profile(
            "tile-cutter",
            "Electric tile cutter",
            dec!(25),
            dec!(180),
            7,
            vec![
                fit("tiling", 9, "clean straight and mitre cuts"),
                fit("bathroom", 8, "wall and floor tiles in one setup"),
                fit_with(
                    "kitchen",
                    7,
                    "splashback and floor tiles",
                    "large format porcelain needs a rail saw",
                ),
            ],
            &["cutting ceramic or porcelain tiles"],
        ),
        profile(
            "manual-tile-cutter",
            "Manual tile cutter",
            dec!(12),
            dec!(45),
            4,
            vec![fit_with(
                "tiling",
                7,
                "quick straight cuts with no dust",
                "cannot cut curves or thick porcelain",
            )],
            &["small tiling jobs"],
        ),
        profile(
            "sds-drill",
            "SDS hammer drill",
            dec!(22),
            dec!(120),
            5,
            vec![
                fit("masonry drilling", 9, "drills brick and concrete with ease"),
                fit("bathroom", 6, "fixings and tile removal with a chisel bit"),
                fit("kitchen", 6, "wall unit fixings"),
            ],
            &["drilling into brick or concrete", "breaking out old tiles"],
        ),
        profile(
            "floor-sander",
            "Drum floor sander",
            dec!(55),
            dec!(1200),
            22,
            vec![fit_with(
                "floor sanding",
                9,
                "strips old finish from boards",
                "edges need a separate edging sander",
            )],
            &["refinishing wooden floorboards"],
        ),
        profile(
            "scaffold-tower",
            "Aluminium scaffold tower",
            dec!(45),
            dec!(650),
            14,
            vec![
                fit("roof", 8, "safe working platform at height"),
                fit("exterior painting", 9, "stable access to upper walls"),
                fit("guttering", 8, "reaches eaves safely"),
            ],
            &["working at height for more than a few minutes"],
        ),
        profile(
            "plate-compactor",
            "Plate compactor",
            dec!(40),
            dec!(550),
            14,
            vec![
                fit("patio", 9, "compacts the sub-base so slabs do not sink"),
                fit("driveway", 9, "firm base for block paving"),
            ],
            &["compacting hardcore or sand"],
        ),
        profile(
            "wallpaper-steamer",
            "Wallpaper steamer",
            dec!(15),
            dec!(40),
            3,
            vec![fit("wallpaper removal", 9, "softens paste on old paper")],
            &["stripping wallpaper"],
        ),
        profile(
            "cement-mixer",
            "Cement mixer 110V",
            dec!(30),
            dec!(250),
            8,
            vec![
                fit("concrete", 8, "consistent mixes in volume"),
                fit_with(
                    "patio",
                    6,
                    "mixes mortar bed for slabs",
                    "overkill for a small patio",
                ),
            ],
            &["mixing concrete or mortar"],
        ),
        digger,
    ]
}
