//! Built-in project templates for common UK domestic work.

use rust_decimal_macros::dec;

use crate::templates::{ProjectTemplate, Range};

fn factors(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Templates in lookup order.
pub fn builtin_templates() -> Vec<ProjectTemplate> {
    vec![
        ProjectTemplate {
            project_type: "bathroom renovation".to_string(),
            description: Some("Strip out and refit of a family bathroom".to_string()),
            typical_area: Range::new(dec!(4), dec!(8)),
            diy_hours: 120,
            professional_hours: 60,
            complexity_factors: factors(&[
                "moving waste and supply pipework",
                "electrical zones near water",
                "tanking wet areas",
            ]),
            requires_building_control: false,
            permit_cost: Range::ZERO,
        },
        ProjectTemplate {
            project_type: "kitchen renovation".to_string(),
            description: Some("New units, worktops and appliances".to_string()),
            typical_area: Range::new(dec!(8), dec!(15)),
            diy_hours: 200,
            professional_hours: 100,
            complexity_factors: factors(&[
                "relocating gas supply",
                "knocking through walls",
                "new circuits for appliances",
            ]),
            requires_building_control: false,
            permit_cost: Range::ZERO,
        },
        ProjectTemplate {
            project_type: "loft conversion".to_string(),
            description: Some("Dormer or Velux conversion to a habitable room".to_string()),
            typical_area: Range::new(dec!(20), dec!(40)),
            diy_hours: 900,
            professional_hours: 480,
            complexity_factors: factors(&[
                "structural steels",
                "fire escape route",
                "head height",
                "party wall agreement",
            ]),
            requires_building_control: true,
            permit_cost: Range::new(dec!(800), dec!(1500)),
        },
        ProjectTemplate {
            project_type: "single storey extension".to_string(),
            description: Some("Rear or side extension with a flat or pitched roof".to_string()),
            typical_area: Range::new(dec!(15), dec!(30)),
            diy_hours: 1200,
            professional_hours: 640,
            complexity_factors: factors(&["foundations", "drainage diversion", "roof type"]),
            requires_building_control: true,
            permit_cost: Range::new(dec!(1000), dec!(2000)),
        },
        ProjectTemplate {
            project_type: "patio installation".to_string(),
            description: None,
            typical_area: Range::new(dec!(15), dec!(40)),
            diy_hours: 60,
            professional_hours: 32,
            complexity_factors: factors(&["ground levels", "drainage falls"]),
            requires_building_control: false,
            permit_cost: Range::ZERO,
        },
        ProjectTemplate {
            project_type: "interior painting".to_string(),
            description: Some("Walls and ceilings of a single room".to_string()),
            typical_area: Range::new(dec!(30), dec!(60)),
            diy_hours: 20,
            professional_hours: 12,
            complexity_factors: factors(&["surface preparation", "ceiling height"]),
            requires_building_control: false,
            permit_cost: Range::ZERO,
        },
        ProjectTemplate {
            project_type: "flooring installation".to_string(),
            description: None,
            typical_area: Range::new(dec!(10), dec!(30)),
            diy_hours: 16,
            professional_hours: 8,
            complexity_factors: factors(&["subfloor levelling", "door trimming"]),
            requires_building_control: false,
            permit_cost: Range::ZERO,
        },
        ProjectTemplate {
            project_type: "roof repair".to_string(),
            description: None,
            typical_area: Range::new(dec!(5), dec!(20)),
            diy_hours: 40,
            professional_hours: 16,
            complexity_factors: factors(&["access and scaffolding", "weather delays"]),
            requires_building_control: false,
            permit_cost: Range::ZERO,
        },
    ]
}
