// Circular economy material recovery records
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    Lithium,
    Cobalt,
    Nickel,
}

impl Material {
    pub const ALL: [Material; 3] = [Material::Lithium, Material::Cobalt, Material::Nickel];

    pub fn label(&self) -> &'static str {
        match self {
            Material::Lithium => "Lithium",
            Material::Cobalt => "Cobalt",
            Material::Nickel => "Nickel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub material: Material,
    pub recovered: f64,
    pub target: f64,
    pub trend: Trend,
}

impl MaterialRecord {
    pub fn new(material: Material, recovered: f64, target: f64, trend: Trend) -> Self {
        Self {
            material,
            recovered,
            target,
            trend,
        }
    }
}
