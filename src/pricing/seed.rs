//! Built-in catalog data used when no snapshot file is supplied.
//!
//! Prices are indicative UK figures in GBP.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::pricing::adjustment::Adjustment;
use crate::pricing::item::{
    BulkDiscount, LaborItem, MaterialItem, RateStructure, ToolItem, Trade,
};
use crate::pricing::tier::{ComplexityFactors, Season};

fn regional() -> Vec<Adjustment> {
    vec![
        Adjustment::regional("London", dec!(1.25)).with_reason("London labour market"),
        Adjustment::regional("SW1", dec!(1.35)).with_reason("Central London"),
        Adjustment::regional("South East", dec!(1.15)),
        Adjustment::regional("Manchester", dec!(1.05)),
        Adjustment::regional("Scotland", dec!(0.95)),
        Adjustment::regional("Wales", dec!(0.92)),
        Adjustment::regional("North East", dec!(0.90)),
    ]
}

fn outdoor_season() -> Vec<Adjustment> {
    vec![
        Adjustment::seasonal(Season::Spring, dec!(1.10)).with_reason("spring demand"),
        Adjustment::seasonal(Season::Summer, dec!(1.15)).with_reason("peak outdoor season"),
        Adjustment::seasonal(Season::Winter, dec!(0.90)).with_reason("winter lull"),
    ]
}

fn with(mut base: Vec<Adjustment>, extra: Vec<Adjustment>) -> Vec<Adjustment> {
    base.extend(extra);
    base
}

fn tool(
    id: &str,
    name: &str,
    category: &str,
    daily: Decimal,
    weekly: Option<Decimal>,
    deposit: Decimal,
    project_types: &[&str],
) -> ToolItem {
    ToolItem {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        daily_rate: daily,
        weekly_rate: weekly,
        weekend_rate: None,
        monthly_rate: None,
        deposit,
        min_hire_days: 1,
        license_required: false,
        training_required: false,
        project_types: project_types.iter().map(|s| s.to_string()).collect(),
        adjustments: regional(),
    }
}

/// Hire equipment.
pub fn tools() -> Vec<ToolItem> {
    let mut digger = tool(
        "mini-digger",
        "Mini digger 1.5t",
        "excavation",
        dec!(150),
        Some(dec!(450)),
        dec!(250),
        &["extension", "patio", "landscaping", "driveway"],
    );
    digger.license_required = true;
    digger.training_required = true;
    digger.min_hire_days = 2;
    digger.adjustments = with(regional(), outdoor_season());

    let mut scaffold = tool(
        "scaffold-tower",
        "Aluminium scaffold tower",
        "access",
        dec!(45),
        Some(dec!(120)),
        dec!(100),
        &["roof", "painting", "loft", "extension"],
    );
    scaffold.weekend_rate = Some(dec!(70));
    scaffold.monthly_rate = Some(dec!(360));

    let mut compactor = tool(
        "plate-compactor",
        "Plate compactor",
        "groundwork",
        dec!(40),
        Some(dec!(110)),
        dec!(75),
        &["patio", "driveway", "landscaping"],
    );
    compactor.adjustments = with(regional(), outdoor_season());

    vec![
        tool(
            "tile-cutter",
            "Electric tile cutter",
            "tiling",
            dec!(25),
            Some(dec!(70)),
            dec!(50),
            &["bathroom", "kitchen", "flooring"],
        ),
        tool(
            "sds-drill",
            "SDS hammer drill",
            "drilling",
            dec!(22),
            None,
            dec!(40),
            &["bathroom", "kitchen", "extension", "loft"],
        ),
        tool(
            "wallpaper-steamer",
            "Wallpaper steamer",
            "decorating",
            dec!(15),
            Some(dec!(45)),
            dec!(30),
            &["painting", "decorating", "bedroom"],
        ),
        tool(
            "floor-sander",
            "Drum floor sander",
            "flooring",
            dec!(55),
            Some(dec!(160)),
            dec!(100),
            &["flooring"],
        ),
        tool(
            "cement-mixer",
            "Cement mixer 110V",
            "concrete",
            dec!(30),
            Some(dec!(85)),
            dec!(60),
            &["extension", "patio", "garden wall", "driveway"],
        ),
        tool(
            "dehumidifier",
            "Building dryer dehumidifier",
            "drying",
            dec!(28),
            Some(dec!(90)),
            dec!(50),
            &["bathroom", "plastering", "extension"],
        ),
        digger,
        scaffold,
        compactor,
    ]
}

#[allow(clippy::too_many_arguments)]
fn labor_rate(
    id: &str,
    name: &str,
    trade: Trade,
    job_type: &str,
    rate_structure: RateStructure,
    base_rate: Decimal,
    unit: &str,
    min_charge: Option<Decimal>,
) -> LaborItem {
    LaborItem {
        id: id.to_string(),
        name: name.to_string(),
        trade,
        job_type: job_type.to_string(),
        rate_structure,
        base_rate,
        unit: unit.to_string(),
        min_charge,
        typical_duration_hours: None,
        complexity_factors: None,
        license_required: false,
        adjustments: regional(),
    }
}

/// Trade rates.
pub fn labor() -> Vec<LaborItem> {
    let mut electrician = labor_rate(
        "electrician-day",
        "Electrician day rate",
        Trade::Electrician,
        "bathroom",
        RateStructure::PerDay,
        dec!(320),
        "day",
        None,
    );
    electrician.license_required = true;

    let mut plumber = labor_rate(
        "plumber-bathroom",
        "Bathroom plumbing first and second fix",
        Trade::Plumber,
        "bathroom",
        RateStructure::FixedPrice,
        dec!(850),
        "job",
        None,
    );
    plumber.typical_duration_hours = Some(24);
    plumber.complexity_factors = Some(ComplexityFactors {
        basic: dec!(1.0),
        standard: dec!(1.25),
        complex: dec!(1.6),
    });

    let mut roofer = labor_rate(
        "roofer-repair",
        "Roof repair",
        Trade::Roofer,
        "roof",
        RateStructure::PerSqm,
        dec!(65),
        "m2",
        Some(dec!(350)),
    );
    roofer.adjustments = with(regional(), outdoor_season());

    let mut landscaper = labor_rate(
        "landscaper-patio",
        "Patio laying",
        Trade::Landscaper,
        "patio",
        RateStructure::PerSqm,
        dec!(55),
        "m2",
        Some(dec!(500)),
    );
    landscaper.adjustments = with(regional(), outdoor_season());

    vec![
        labor_rate(
            "tiler-wall",
            "Wall and floor tiling",
            Trade::Tiler,
            "bathroom",
            RateStructure::PerSqm,
            dec!(45),
            "m2",
            Some(dec!(250)),
        ),
        plumber,
        electrician,
        labor_rate(
            "plasterer-skim",
            "Skim plastering",
            Trade::Plasterer,
            "plastering",
            RateStructure::PerSqm,
            dec!(22),
            "m2",
            Some(dec!(200)),
        ),
        labor_rate(
            "kitchen-fitter",
            "Kitchen fitting",
            Trade::Kitchen,
            "kitchen",
            RateStructure::PerDay,
            dec!(240),
            "day",
            None,
        ),
        labor_rate(
            "kitchen-tiler",
            "Kitchen splashback tiling",
            Trade::Tiler,
            "kitchen",
            RateStructure::PerSqm,
            dec!(48),
            "m2",
            Some(dec!(200)),
        ),
        labor_rate(
            "decorator-room",
            "Painting and decorating",
            Trade::Decorator,
            "painting",
            RateStructure::PerSqm,
            dec!(12),
            "m2",
            Some(dec!(180)),
        ),
        labor_rate(
            "floor-fitter",
            "Laminate and engineered floor fitting",
            Trade::Flooring,
            "flooring",
            RateStructure::PerSqm,
            dec!(18),
            "m2",
            Some(dec!(150)),
        ),
        labor_rate(
            "builder-extension",
            "Extension shell build",
            Trade::Builder,
            "extension",
            RateStructure::PerSqm,
            dec!(1400),
            "m2",
            None,
        ),
        labor_rate(
            "carpenter-loft",
            "Loft conversion carpentry",
            Trade::Carpenter,
            "loft",
            RateStructure::PerSqm,
            dec!(650),
            "m2",
            None,
        ),
        roofer,
        landscaper,
    ]
}

fn material(
    id: &str,
    name: &str,
    category: &str,
    tiers: [Decimal; 3],
    unit: &str,
    waste_factor: Decimal,
    project_types: &[&str],
) -> MaterialItem {
    MaterialItem {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        budget: Some(tiers[0]),
        mid_range: Some(tiers[1]),
        premium: Some(tiers[2]),
        unit: unit.to_string(),
        waste_factor,
        bulk_discounts: Vec::new(),
        project_types: project_types.iter().map(|s| s.to_string()).collect(),
        adjustments: Vec::new(),
    }
}

/// Materials, priced per unit area.
pub fn materials() -> Vec<MaterialItem> {
    let mut tiles = material(
        "ceramic-tiles",
        "Ceramic wall and floor tiles",
        "tiling",
        [dec!(15), dec!(35), dec!(80)],
        "m2",
        dec!(0.10),
        &["bathroom", "kitchen"],
    );
    tiles.bulk_discounts = vec![
        BulkDiscount {
            min_quantity: dec!(20),
            discount: dec!(0.05),
        },
        BulkDiscount {
            min_quantity: dec!(50),
            discount: dec!(0.10),
        },
    ];

    let mut paving = material(
        "porcelain-paving",
        "Porcelain paving slabs",
        "paving",
        [dec!(25), dec!(45), dec!(90)],
        "m2",
        dec!(0.08),
        &["patio", "driveway"],
    );
    paving.adjustments = vec![
        Adjustment::seasonal(Season::Spring, dec!(1.05)).with_reason("landscaping season"),
    ];

    vec![
        tiles,
        material(
            "sanitaryware",
            "Sanitaryware allowance",
            "fixtures",
            [dec!(60), dec!(120), dec!(300)],
            "m2",
            Decimal::ZERO,
            &["bathroom"],
        ),
        material(
            "tile-adhesive",
            "Tile adhesive and grout",
            "adhesives",
            [dec!(4), dec!(6), dec!(9)],
            "m2",
            dec!(0.05),
            &["bathroom", "kitchen"],
        ),
        material(
            "kitchen-units",
            "Kitchen units and worktops allowance",
            "cabinetry",
            [dec!(150), dec!(320), dec!(700)],
            "m2",
            Decimal::ZERO,
            &["kitchen"],
        ),
        material(
            "emulsion-paint",
            "Emulsion paint",
            "paint",
            [dec!(1.5), dec!(3), dec!(6)],
            "m2",
            dec!(0.10),
            &["painting", "decorating"],
        ),
        material(
            "laminate-flooring",
            "Laminate flooring",
            "flooring",
            [dec!(12), dec!(25), dec!(55)],
            "m2",
            dec!(0.10),
            &["flooring"],
        ),
        material(
            "plasterboard",
            "Plasterboard and skim",
            "drylining",
            [dec!(8), dec!(11), dec!(15)],
            "m2",
            dec!(0.12),
            &["loft", "extension", "plastering"],
        ),
        material(
            "roof-tiles",
            "Concrete roof tiles",
            "roofing",
            [dec!(18), dec!(30), dec!(65)],
            "m2",
            dec!(0.10),
            &["roof", "extension"],
        ),
        material(
            "blockwork",
            "Blockwork, insulation and structure allowance",
            "structure",
            [dec!(180), dec!(260), dec!(420)],
            "m2",
            dec!(0.05),
            &["extension"],
        ),
        paving,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::catalog::InMemoryCatalog;

    #[test]
    fn test_seed_catalogs_validate() {
        assert!(InMemoryCatalog::new("tool_rentals", tools()).is_ok());
        assert!(InMemoryCatalog::new("labor_rates", labor()).is_ok());
        assert!(InMemoryCatalog::new("material_prices", materials()).is_ok());
    }
}
