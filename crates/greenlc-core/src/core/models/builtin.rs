use super::factor::{FactorTable, ReagentFactor};

/// Density, the nine sub-factors (releasePotential, fireExplos, reactDecom, acuteToxicity,
/// irritation, chronicToxicity, persistency, airHazard, waterHazard), regeneration, disposal.
type BuiltinRow = (&'static str, f64, [f64; 9], f64, f64);

const fn row(
    name: &'static str,
    density: f64,
    sub_factors: [f64; 9],
    regeneration: f64,
    disposal: f64,
) -> BuiltinRow {
    (name, density, sub_factors, regeneration, disposal)
}

static BUILTIN_REAGENTS: [BuiltinRow; 29] = [
    row("Acetone", 0.784, [0.698, 1.0, 0.0, 0.297, 0.625, 0.185, 0.126, 0.185, 0.0], 1.0, 0.5),
    row("Acetonitrile", 0.786, [0.613, 1.0, 0.6, 0.509, 0.625, 0.431, 0.366, 0.431, 0.0], 0.75, 0.5),
    row("Chloroform", 1.49, [0.681, 0.0, 0.0, 0.393, 0.625, 0.8, 0.457, 0.8, 0.178], 1.0, 0.75),
    row("CO2", 1.56, [1.0, 0.0, 0.0, 0.026, 0.0, 0.009, 0.0, 0.009, 0.0], 0.25, 0.0),
    row("Dichloromethane", 1.327, [0.753, 1.0, 0.6, 0.264, 0.349, 0.29, 0.02, 0.29, 0.031], 0.75, 0.75),
    row("Ethanol", 0.789, [0.579, 1.0, 0.0, 0.292, 0.0, 0.205, 0.282, 0.205, 0.0], 0.6, 0.25),
    row("Ethyl acetate", 0.897, [0.628, 1.0, 0.0, 0.276, 0.625, 0.169, 0.026, 0.169, 0.003], 1.0, 0.25),
    row("Heptane", 0.684, [0.557, 1.0, 0.0, 0.368, 0.625, 0.158, 0.43, 0.158, 0.5], 1.0, 0.5),
    row("Hexane (n)", 0.661, [0.656, 1.0, 0.0, 0.343, 0.625, 0.351, 0.426, 0.351, 0.325], 1.0, 0.5),
    row("Isooctane", 0.69, [0.63, 1.0, 0.0, 0.0, 0.33, 0.0, 0.68, 0.0, 0.875], 1.0, 0.5),
    row("Isopropanol", 0.786, [0.565, 1.0, 0.0, 0.317, 0.625, 0.262, 0.28, 0.262, 0.0], 1.0, 0.25),
    row("Methanol", 0.791, [0.625, 1.0, 0.0, 0.266, 0.113, 0.316, 0.0, 0.316, 0.0], 0.5, 0.5),
    row("Sulfuric acid 96%", 1.84, [0.0, 0.0, 0.8, 0.946, 1.0, 1.0, 0.485, 1.0, 0.5], 1.0, 0.75),
    row("t-butyl methyl ether", 0.74, [0.716, 1.0, 0.0, 0.008, 0.22, 0.349, 0.71, 0.349, 0.09], 1.0, 0.5),
    row("Tetrahydrofuran", 0.889, [0.68, 0.0, 0.6, 0.297, 0.625, 0.367, 0.535, 0.367, 0.0], 1.0, 0.75),
    row("Water", 1.0, [0.552, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], 0.2, 0.0),
    row("Formic Acid", 1.22, [0.504, 0.0, 0.0, 0.802, 1.0, 1.0, 0.13, 1.0, 0.125], 0.5, 0.75),
    row("Ammonium Acetate", 1.17, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], 1.0, 1.0),
    row("Diethyl Ether", 0.714, [0.785, 1.0, 0.6, 0.3, 0.113, 0.183, 0.02, 0.183, 0.0], 0.5, 0.75),
    row("Triethylamine", 0.726, [0.588, 1.0, 0.0, 0.511, 1.0, 0.737, 0.4, 0.737, 0.125], 1.0, 0.75),
    row("Potassium dihydrogen phosphate", 1.88, [0.0, 0.0, 0.0, 0.0, 0.625, 0.0, 0.0, 0.0, 0.0], 1.0, 1.0),
    row("Sodium Hydroxide", 2.13, [0.0, 0.0, 0.8, 0.99, 1.0, 1.0, 0.0, 1.0, 0.5], 1.0, 1.0),
    row("Hydrochloric Acid", 1.18, [1.0, 0.0, 0.8, 0.772, 1.0, 0.705, 0.0, 0.705, 0.5], 1.0, 0.75),
    row("Ammonium Carbonate", 1.5, [0.0, 0.0, 0.6, 0.0, 0.625, 0.111, 0.0, 0.111, 0.125], 1.0, 1.0),
    row("Ammonium hydroxide", 0.89, [1.0, 0.0, 0.0, 0.66, 1.0, 0.552, 0.0, 0.552, 0.5], 1.0, 0.75),
    row("Dipotassium hydrogen phosphate", 2.44, [0.0, 0.0, 0.0, 0.0, 0.625, 0.0, 0.0, 0.0, 0.0], 1.0, 1.0),
    row("Sodium phosphate dibasic", 1.064, [0.0, 0.0, 0.0, 0.0, 0.625, 0.0, 0.0, 0.0, 0.0], 1.0, 1.0),
    row("Sodium Dihydrogen Phosphate", 1.91, [0.0, 0.0, 0.0, 0.0, 0.625, 0.0, 0.0, 0.0, 0.0], 1.0, 1.0),
    row("Trifluoroacetic Acid", 1.49, [0.644, 0.0, 0.0, 0.24, 1.0, 1.0, 0.303, 1.0, 0.0], 1.0, 1.0),
];

impl From<&BuiltinRow> for ReagentFactor {
    fn from(&(name, density, s, regeneration, disposal): &BuiltinRow) -> Self {
        Self {
            name: name.to_string(),
            density,
            release_potential: s[0],
            fire_explos: s[1],
            react_decom: s[2],
            acute_toxicity: s[3],
            irritation: s[4],
            chronic_toxicity: s[5],
            persistency: s[6],
            air_hazard: s[7],
            water_hazard: s[8],
            regeneration: Some(regeneration),
            disposal,
        }
    }
}

/// Names of the predefined reagents, in table order.
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTIN_REAGENTS.iter().map(|r| r.0)
}

impl FactorTable {
    /// The predefined reagent table shipped with the engine.
    pub fn builtin() -> Self {
        Self::from_reagents(BUILTIN_REAGENTS.iter().map(ReagentFactor::from))
    }
}
