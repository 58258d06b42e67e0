//! Plant selections as posted by the layout front end.

use crate::{
    delimited::{self, Delimiter},
    error::{LayoutError, LayoutResult},
    table::Table,
};

pub const PLANT_FIELDS: [&str; 7] = [
    "scientific_name",
    "kr_name",
    "life_form",
    "max_height_m",
    "root_depth_cm_range",
    "light_requirement_1_5",
    "lifespan_yr",
];

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlantInput {
    pub scientific_name: String,
    pub kr_name: String,
    pub life_form: String,
    pub max_height_m: f64,
    pub root_depth_cm_range: String,
    pub light_requirement_1_5: f64,
    pub lifespan_yr: f64,
}

impl PlantInput {
    fn field_values(&self) -> [String; 7] {
        [
            self.scientific_name.clone(),
            self.kr_name.clone(),
            self.life_form.clone(),
            self.max_height_m.to_string(),
            self.root_depth_cm_range.clone(),
            self.light_requirement_1_5.to_string(),
            self.lifespan_yr.to_string(),
        ]
    }
}

pub fn parse_plants_json(data: &[u8]) -> LayoutResult<Vec<PlantInput>> {
    serde_json::from_slice(data)
        .map_err(|e| LayoutError::malformed(format!("invalid plant selection JSON: {e}")))
}

/// Header line plus one fully quoted line per plant, joined by `\n`.
pub fn plants_to_csv(plants: &[PlantInput]) -> String {
    let mut lines = Vec::with_capacity(plants.len() + 1);
    lines.push(PLANT_FIELDS.join(","));
    for plant in plants {
        let line = plant
            .field_values()
            .iter()
            .map(|v| format!("\"{}\"", v.replace('"', "\"\"")))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }
    lines.join("\n")
}

/// Read a plant selection through the same delimited path as file input.
pub fn plants_to_table(plants: &[PlantInput]) -> LayoutResult<Table> {
    delimited::read_table(&plants_to_csv(plants), Delimiter::Comma)
}
