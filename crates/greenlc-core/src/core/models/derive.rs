//! Derivation of a reagent's sub-factor values from its data-sheet properties.
//!
//! Every assessment maps one group of physical or toxicological observations onto a
//! dimensionless hazard value in `[0, 1]`. A [`ReagentProfile`] bundles one assessment per
//! sub-factor and derives the full [`ReagentFactor`] row.

use super::factor::ReagentFactor;
use serde::{Deserialize, Serialize};

/// Molar volume of an ideal gas at 25 °C and 1 atm, in L/mol. Converts ppm to mg/m³.
pub const MOLAR_VOLUME: f64 = 24.45;

/// Share of a recovered reagent's intrinsic disposal burden that recovery actually removes.
pub const RECOVERY_EFFICIENCY: f64 = 0.8;

#[inline]
fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

#[inline]
fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

/// Structural class of a volatile liquid, shifting its release potential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StructureClass {
    Alcohol,
    Ether,
    BranchedAlkane,
    #[default]
    Standard,
}

impl StructureClass {
    pub fn correction(self) -> f64 {
        match self {
            StructureClass::Alcohol => -0.045,
            StructureClass::Ether => 0.015,
            StructureClass::BranchedAlkane => 0.075,
            StructureClass::Standard => 0.0,
        }
    }
}

/// How readily the substance escapes into the air (S1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum Volatility {
    /// A dissolved gas or a highly volatile liquid.
    Gas,
    /// A solid salt or a liquid boiling above about 200 °C.
    Involatile,
    #[serde(rename_all = "camelCase")]
    Liquid {
        /// Normal boiling point in °C.
        boiling_point: f64,
        #[serde(default)]
        structure: StructureClass,
    },
}

impl Volatility {
    /// `0.885 − 0.00333·Tbp + correction` for liquids, never below 0.
    pub fn release_potential(&self) -> f64 {
        match *self {
            Volatility::Gas => 1.0,
            Volatility::Involatile => 0.0001,
            Volatility::Liquid {
                boiling_point,
                structure,
            } => {
                let rp = 0.885 - 0.00333 * boiling_point + structure.correction();
                if rp.is_nan() { 0.0 } else { round_to(rp, 4).max(0.0) }
            }
        }
    }
}

/// Fire and explosion hazard class (S2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FireHazard {
    /// Inert inorganics and non-oxidizing salts.
    NonCombustible,
    /// Carries R7, R8, or R9.
    Oxidizer,
    /// Flash point below 21 °C, or R11.
    HighlyFlammable,
    /// Flash point between 21 and 60 °C, or R10.
    Flammable,
    /// Flash point above 60 °C.
    LowFlammability,
    NoFlashPoint,
}

impl FireHazard {
    pub fn value(self) -> f64 {
        match self {
            FireHazard::Oxidizer | FireHazard::HighlyFlammable => 1.0,
            FireHazard::Flammable => 0.5,
            FireHazard::NonCombustible | FireHazard::LowFlammability | FireHazard::NoFlashPoint => {
                0.0
            }
        }
    }
}

/// Reactivity and decomposition evidence (S3). Checks run in field order after the dilution
/// exemption: incompatibility, then the NFPA instability rating, then unstable groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reactivity {
    /// A dilute aqueous solution such as a low-strength buffer.
    pub dilute_aqueous: bool,
    /// Water-reactive, a strong oxidizer, or a concentrated corrosive acid or base.
    pub incompatible: bool,
    /// Yellow NFPA 704 rating, 0 to 4.
    pub nfpa_instability: Option<u8>,
    /// Nitro, azide, peroxide, diazo, or alkyne groups.
    pub unstable_groups: bool,
}

impl Reactivity {
    pub fn value(&self) -> f64 {
        if self.dilute_aqueous {
            return 0.0;
        }
        if self.incompatible {
            return 0.8;
        }
        match self.nfpa_instability {
            Some(rating) if rating >= 2 => 0.8,
            Some(1) => 0.6,
            Some(_) => 0.0,
            None if self.unstable_groups => 0.6,
            None => 0.0,
        }
    }
}

/// Acute toxicity evidence (S4).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum AcuteToxicity {
    /// Volatile solvents: the IDLH in ppm and the molecular weight in g/mol.
    #[serde(rename_all = "camelCase")]
    Idlh { idlh_ppm: f64, molecular_weight: f64 },
    /// Solid additives and salts: oral LD50 in mg/kg.
    #[serde(rename_all = "camelCase")]
    Ld50 { mg_per_kg: f64 },
    Unknown,
}

impl AcuteToxicity {
    pub fn value(&self) -> f64 {
        match *self {
            AcuteToxicity::Idlh {
                idlh_ppm,
                molecular_weight,
            } => {
                let concentration = idlh_ppm * molecular_weight / MOLAR_VOLUME;
                if concentration.is_nan() || concentration <= 0.0 {
                    return 0.0;
                }
                round_to(clamp_unit(1.24 - 0.25 * concentration.log10()), 3)
            }
            AcuteToxicity::Ld50 { mg_per_kg } => {
                if mg_per_kg.is_nan() || mg_per_kg >= 2000.0 {
                    0.0
                } else if mg_per_kg <= 20.0 {
                    1.0
                } else {
                    round_to(clamp_unit(1.65 - 0.5 * mg_per_kg.log10()), 3)
                }
            }
            AcuteToxicity::Unknown => 0.0,
        }
    }
}

/// Minor hazard phrases that add up for pH-neutral substances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MinorHazard {
    /// R40, limited evidence of carcinogenicity.
    R40,
    /// R20 to R25, harmful or toxic by inhalation, skin contact, or ingestion.
    R20Series,
    /// R50/53, harmful to aquatic life.
    R50Series,
}

impl MinorHazard {
    pub fn value(self) -> f64 {
        match self {
            MinorHazard::R40 => 0.236,
            MinorHazard::R20Series => 0.113,
            MinorHazard::R50Series => 0.110,
        }
    }
}

/// Irritation evidence (H2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum Irritation {
    /// R34 or R35.
    Corrosive,
    /// R36, R37, R38, R41, or R48.
    Irritant,
    /// Ethanol is scored as non-irritating.
    Exempt,
    /// pH below 2 or above 11.5.
    StrongPh,
    /// pH in 2..5 or 9..11.5.
    ModeratePh,
    /// pH in 5..9; only minor hazard phrases count.
    Neutral {
        #[serde(default)]
        codes: Vec<MinorHazard>,
    },
}

impl Irritation {
    pub fn value(&self) -> f64 {
        match self {
            Irritation::Corrosive | Irritation::StrongPh => 1.0,
            Irritation::Irritant | Irritation::ModeratePh => 0.625,
            Irritation::Exempt => 0.0,
            Irritation::Neutral { codes } => {
                let mut seen = Vec::with_capacity(codes.len());
                for code in codes {
                    if !seen.contains(code) {
                        seen.push(*code);
                    }
                }
                round_to(seen.iter().map(|c| c.value()).sum(), 3)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhysicalState {
    /// Solids and involatile salt powders reach the breathing zone far less.
    Solid,
    #[default]
    Fluid,
}

impl PhysicalState {
    pub fn exposure_factor(self) -> f64 {
        match self {
            PhysicalState::Solid => 0.2,
            PhysicalState::Fluid => 1.0,
        }
    }
}

/// Chronic toxicity evidence (H1). The same value is reported as the air hazard (E2).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum ChronicToxicity {
    /// R35 or H314.
    SevereCorrosive,
    /// R45, R46, R49, or H350 with an IARC group 1, 2A, or 2B listing.
    Carcinogen,
    /// Simple saturated alkanes without neurotoxicity, and harmless salts.
    Exempt,
    /// Threshold limit value in ppm.
    #[serde(rename_all = "camelCase")]
    Tlv {
        tlv_ppm: f64,
        #[serde(default)]
        state: PhysicalState,
        #[serde(default)]
        alcohol: bool,
    },
}

/// Chronic toxicity base assigned to dichloromethane instead of its TLV-derived value.
const DICHLOROMETHANE_CHRONIC_BASE: f64 = 0.290;

fn is_dichloromethane(name: &str) -> bool {
    let name = name.trim();
    name.eq_ignore_ascii_case("dichloromethane")
        || name.eq_ignore_ascii_case("methylene chloride")
        || name.eq_ignore_ascii_case("DCM")
}

impl ChronicToxicity {
    /// `(0.80 − 0.20·log10(TLV), floored at 0) + 0.06 for alcohols`, times the state factor.
    pub fn value(&self, reagent_name: &str) -> f64 {
        match *self {
            ChronicToxicity::SevereCorrosive => 1.0,
            ChronicToxicity::Carcinogen => 0.8,
            ChronicToxicity::Exempt => 0.0,
            ChronicToxicity::Tlv {
                tlv_ppm,
                state,
                alcohol,
            } => {
                if is_dichloromethane(reagent_name) {
                    return round_to(DICHLOROMETHANE_CHRONIC_BASE * state.exposure_factor(), 3);
                }
                if tlv_ppm.is_nan() || tlv_ppm <= 0.0 {
                    return 0.0;
                }
                let mut base = (0.80 - 0.20 * tlv_ppm.log10()).max(0.0);
                if alcohol {
                    base += 0.06;
                }
                round_to(base * state.exposure_factor(), 3)
            }
        }
    }
}

/// Chemical family of a substance that is not readily biodegradable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersistentClass {
    Halogenated,
    EtherOrBranched,
}

/// Persistency evidence (E1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum Persistency {
    InorganicStrongAcid,
    Inorganic,
    /// Degrades very quickly and does not accumulate.
    RapidDegradation,
    /// Alcohols and similar low-accumulation substances.
    LowAccumulation,
    /// Substances with a special metabolic pathway.
    SpecialMetabolism,
    /// Biodegradation half-life in days.
    #[serde(rename_all = "camelCase")]
    HalfLife {
        days: f64,
        ready_biodegradable: bool,
        /// The half-life comes from a model prediction rather than a measurement.
        #[serde(default)]
        predicted: bool,
        #[serde(default)]
        class: Option<PersistentClass>,
    },
}

impl Persistency {
    /// Half-lives of a day or less give 0.
    pub fn value(&self) -> f64 {
        match *self {
            Persistency::InorganicStrongAcid => 0.485,
            Persistency::Inorganic | Persistency::RapidDegradation => 0.0,
            Persistency::LowAccumulation => 0.020,
            Persistency::SpecialMetabolism => 0.130,
            Persistency::HalfLife {
                days,
                ready_biodegradable,
                predicted,
                class,
            } => {
                if days.is_nan() || days <= 0.0 {
                    return 0.0;
                }
                let log_t = days.log10();
                let raw = if ready_biodegradable {
                    let correction = if predicted { 0.03 } else { 0.0 };
                    0.45 * log_t - correction
                } else {
                    match class {
                        Some(PersistentClass::Halogenated) => 0.32 * log_t,
                        Some(PersistentClass::EtherOrBranched) => 0.45 * log_t + 0.32,
                        None => 0.0,
                    }
                };
                round_to(raw, 3).max(0.0)
            }
        }
    }
}

/// Residual water-hazard constant for organics with no acute or fate penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResidualClass {
    /// Halogenated or poorly degradable organics (k = 6).
    Halogenated,
    /// Ordinary readily degradable organics (k = 0.7).
    Ordinary,
    /// Ultra-low toxicity solvents with an LC50 above 1000 mg/L (k = 0).
    #[default]
    Negligible,
}

impl ResidualClass {
    pub fn k(self) -> f64 {
        match self {
            ResidualClass::Halogenated => 6.0,
            ResidualClass::Ordinary => 0.7,
            ResidualClass::Negligible => 0.0,
        }
    }
}

/// Water hazard evidence (E3).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum WaterHazard {
    CorrosiveInorganic,
    InorganicSalt,
    #[serde(rename_all = "camelCase")]
    Organic {
        /// Fish LC50 in mg/L.
        lc50: f64,
        ready_biodegradable: bool,
        /// Bioconcentration factor.
        bcf: f64,
        #[serde(default)]
        residual: ResidualClass,
    },
}

impl WaterHazard {
    /// Acute class + persistence penalty + bioaccumulation penalty, or `k / LC50` when all
    /// three are zero.
    pub fn value(&self) -> f64 {
        match *self {
            WaterHazard::CorrosiveInorganic => 0.5,
            WaterHazard::InorganicSalt => 0.0,
            WaterHazard::Organic {
                lc50,
                ready_biodegradable,
                bcf,
                residual,
            } => {
                let acute = if lc50 <= 1.0 {
                    0.5
                } else if lc50 <= 10.0 {
                    0.25
                } else if lc50 <= 100.0 {
                    0.125
                } else {
                    0.0
                };
                let persistence = if ready_biodegradable { 0.0 } else { 0.125 };
                let accumulation = if bcf > 500.0 {
                    0.25
                } else if bcf > 100.0 {
                    0.075
                } else {
                    0.0
                };
                let sum = acute + persistence + accumulation;
                let total = if sum > 0.0 {
                    sum
                } else if lc50 > 0.0 {
                    residual.k() / lc50
                } else {
                    0.0
                };
                round_to(total, 3)
            }
        }
    }
}

/// End-of-life burden of a reagent (D).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Disposal {
    /// Intrinsic disposal resistance, 0 to 1.
    pub intrinsic: f64,
    /// Share of the used reagent that is recovered, in percent.
    pub recovered_percent: f64,
}

impl Disposal {
    /// `intrinsic × (1 − recovered/100 × 0.8)`.
    pub fn value(&self) -> f64 {
        let recovered = self.recovered_percent.clamp(0.0, 100.0) / 100.0;
        self.intrinsic * (1.0 - recovered * RECOVERY_EFFICIENCY)
    }
}

/// Data-sheet properties of one reagent, enough to derive its whole factor row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReagentProfile {
    pub name: String,
    /// Density in g/ml.
    pub density: f64,
    pub volatility: Volatility,
    pub fire: FireHazard,
    #[serde(default)]
    pub reactivity: Reactivity,
    pub acute_toxicity: AcuteToxicity,
    pub irritation: Irritation,
    pub chronic_toxicity: ChronicToxicity,
    pub persistency: Persistency,
    pub water_hazard: WaterHazard,
    #[serde(default)]
    pub regeneration: Option<f64>,
    #[serde(default)]
    pub disposal: Disposal,
}

impl ReagentProfile {
    pub fn derive_factor(&self) -> ReagentFactor {
        let chronic = self.chronic_toxicity.value(&self.name);
        ReagentFactor {
            name: self.name.clone(),
            density: self.density,
            release_potential: self.volatility.release_potential(),
            fire_explos: self.fire.value(),
            react_decom: self.reactivity.value(),
            acute_toxicity: self.acute_toxicity.value(),
            irritation: self.irritation.value(),
            chronic_toxicity: chronic,
            persistency: self.persistency.value(),
            air_hazard: chronic,
            water_hazard: self.water_hazard.value(),
            regeneration: self.regeneration,
            disposal: self.disposal.value(),
        }
    }
}

impl From<&ReagentProfile> for ReagentFactor {
    fn from(profile: &ReagentProfile) -> Self {
        profile.derive_factor()
    }
}
