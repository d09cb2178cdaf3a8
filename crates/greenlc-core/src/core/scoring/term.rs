use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// The nine hazard sub-factors, either as raw reagent values or as normalized scores.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubFactorScores {
    #[serde(rename = "S1")]
    pub s1: f64,
    #[serde(rename = "S2")]
    pub s2: f64,
    #[serde(rename = "S3")]
    pub s3: f64,
    #[serde(rename = "S4")]
    pub s4: f64,
    #[serde(rename = "H1")]
    pub h1: f64,
    #[serde(rename = "H2")]
    pub h2: f64,
    #[serde(rename = "E1")]
    pub e1: f64,
    #[serde(rename = "E2")]
    pub e2: f64,
    #[serde(rename = "E3")]
    pub e3: f64,
}

impl SubFactorScores {
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            s1: f(self.s1),
            s2: f(self.s2),
            s3: f(self.s3),
            s4: f(self.s4),
            h1: f(self.h1),
            h2: f(self.h2),
            e1: f(self.e1),
            e2: f(self.e2),
            e3: f(self.e3),
        }
    }

    #[inline]
    pub fn scaled(&self, weight: f64) -> Self {
        self.map(|v| v * weight)
    }

    #[inline]
    pub fn safety(&self) -> [f64; 4] {
        [self.s1, self.s2, self.s3, self.s4]
    }

    #[inline]
    pub fn health(&self) -> [f64; 2] {
        [self.h1, self.h2]
    }

    #[inline]
    pub fn environment(&self) -> [f64; 3] {
        [self.e1, self.e2, self.e3]
    }
}

impl Add for SubFactorScores {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            s1: self.s1 + rhs.s1,
            s2: self.s2 + rhs.s2,
            s3: self.s3 + rhs.s3,
            s4: self.s4 + rhs.s4,
            h1: self.h1 + rhs.h1,
            h2: self.h2 + rhs.h2,
            e1: self.e1 + rhs.e1,
            e2: self.e2 + rhs.e2,
            e3: self.e3 + rhs.e3,
        }
    }
}

impl AddAssign for SubFactorScores {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// One of the six primary green-chemistry dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Factor {
    #[serde(rename = "S")]
    Safety,
    #[serde(rename = "H")]
    Health,
    #[serde(rename = "E")]
    Environment,
    #[serde(rename = "R")]
    Recyclability,
    #[serde(rename = "D")]
    Disposal,
    #[serde(rename = "P")]
    Power,
}

impl Factor {
    pub const ALL: [Factor; 6] = [
        Factor::Safety,
        Factor::Health,
        Factor::Environment,
        Factor::Recyclability,
        Factor::Disposal,
        Factor::Power,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Factor::Safety => "S",
            Factor::Health => "H",
            Factor::Environment => "E",
            Factor::Recyclability => "R",
            Factor::Disposal => "D",
            Factor::Power => "P",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Values for the six primary factors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorScores {
    #[serde(rename = "S")]
    pub safety: f64,
    #[serde(rename = "H")]
    pub health: f64,
    #[serde(rename = "E")]
    pub environment: f64,
    #[serde(rename = "R")]
    pub recyclability: f64,
    #[serde(rename = "D")]
    pub disposal: f64,
    #[serde(rename = "P")]
    pub power: f64,
}

impl FactorScores {
    pub fn new(
        safety: f64,
        health: f64,
        environment: f64,
        recyclability: f64,
        disposal: f64,
        power: f64,
    ) -> Self {
        Self {
            safety,
            health,
            environment,
            recyclability,
            disposal,
            power,
        }
    }

    #[inline]
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Safety => self.safety,
            Factor::Health => self.health,
            Factor::Environment => self.environment,
            Factor::Recyclability => self.recyclability,
            Factor::Disposal => self.disposal,
            Factor::Power => self.power,
        }
    }

    pub fn set(&mut self, factor: Factor, value: f64) {
        match factor {
            Factor::Safety => self.safety = value,
            Factor::Health => self.health = value,
            Factor::Environment => self.environment = value,
            Factor::Recyclability => self.recyclability = value,
            Factor::Disposal => self.disposal = value,
            Factor::Power => self.power = value,
        }
    }

    #[inline]
    pub fn scaled(&self, weight: f64) -> Self {
        Self {
            safety: self.safety * weight,
            health: self.health * weight,
            environment: self.environment * weight,
            recyclability: self.recyclability * weight,
            disposal: self.disposal * weight,
            power: self.power * weight,
        }
    }

    /// Element-wise dot product with a weight vector over the same six factors.
    #[inline]
    pub fn weighted_sum(&self, weights: &FactorScores) -> f64 {
        Factor::ALL
            .iter()
            .map(|&f| self.get(f) * weights.get(f))
            .sum()
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.safety + self.health + self.environment + self.recyclability + self.disposal + self.power
    }
}

impl Add for FactorScores {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            safety: self.safety + rhs.safety,
            health: self.health + rhs.health,
            environment: self.environment + rhs.environment,
            recyclability: self.recyclability + rhs.recyclability,
            disposal: self.disposal + rhs.disposal,
            power: self.power + rhs.power,
        }
    }
}

impl AddAssign for FactorScores {
    fn add_assign(&mut self, rhs: Self) {
        self.safety += rhs.safety;
        self.health += rhs.health;
        self.environment += rhs.environment;
        self.recyclability += rhs.recyclability;
        self.disposal += rhs.disposal;
        self.power += rhs.power;
    }
}
