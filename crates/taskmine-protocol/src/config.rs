use clap::Args;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The renewable-energy coefficient as it travels on the wire: either the
/// literal token `"random"` (one alpha drawn per miner) or a numeric string.
///
/// The raw token is kept as-is and only resolved to a number by the engine,
/// so a garbage value submitted by a client round-trips untouched and fails
/// server-side, not in the form layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaParam(String);

impl AlphaParam {
    pub const RANDOM_TOKEN: &'static str = "random";

    pub fn random() -> Self {
        Self(Self::RANDOM_TOKEN.to_string())
    }

    pub fn fixed(value: f64) -> Self {
        Self(value.to_string())
    }

    pub fn raw(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve the token: `"random"`, the empty string, and (on the wire)
    /// `null` all mean "draw per miner"; anything else must parse as a float.
    pub fn resolve(&self) -> Result<Option<f64>, String> {
        if self.0.is_empty() || self.0 == Self::RANDOM_TOKEN {
            return Ok(None);
        }
        self.0
            .parse::<f64>()
            .map(Some)
            .map_err(|_| format!("invalid renewable_energy_alpha: '{}'", self.0))
    }
}

impl Default for AlphaParam {
    fn default() -> Self {
        Self::random()
    }
}

impl fmt::Display for AlphaParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for AlphaParam {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AlphaParam {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AlphaVisitor;

        impl<'de> Visitor<'de> for AlphaVisitor {
            type Value = AlphaParam;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"random\", a number, a numeric string, or null")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(AlphaParam(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(AlphaParam(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(AlphaParam(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(AlphaParam(v.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(AlphaParam::random())
            }
        }

        deserializer.deserialize_any(AlphaVisitor)
    }
}

/// One simulation run's parameters, exactly as the form submits them.
///
/// `num_miners`, `num_tasks`, and `reward_multiplier` are required; every
/// other field falls back to the published default when a client omits it,
/// which is what happens for `num_verifiers` and `seed` (the form carries
/// neither).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub num_miners: u32,
    pub num_tasks: u32,
    /// Base reward multiplier k (reward equations 5-8).
    pub reward_multiplier: f64,
    /// Verifier reward coefficient z (equation 8).
    #[serde(default = "defaults::verifier_reward_multiplier")]
    pub verifier_reward_multiplier: f64,
    #[serde(default)]
    pub renewable_energy_alpha: AlphaParam,
    /// Error rate above which a miner counts as detected Byzantine.
    #[serde(default = "defaults::byzantine_threshold")]
    pub byzantine_threshold: f64,
    /// Error probability assigned to Byzantine miners (equation 3).
    #[serde(default = "defaults::byzantine_error_rate")]
    pub byzantine_error_rate: f64,
    #[serde(default = "defaults::input_size_min")]
    pub input_size_min: u32,
    #[serde(default = "defaults::input_size_max")]
    pub input_size_max: u32,
    #[serde(default = "defaults::max_byzantine_miners")]
    pub max_byzantine_miners: u32,
    /// Verifiers sampled per task, V (equation 11).
    #[serde(default = "defaults::num_verifiers")]
    pub num_verifiers: u32,
    /// Score-weighted selection with Byzantine penalty (equation 4) when
    /// true; uniform selection when false.
    #[serde(default = "defaults::fault_tolerance_enabled")]
    pub fault_tolerance_enabled: bool,
    #[serde(default)]
    pub seed: Option<u64>,
}

mod defaults {
    pub fn verifier_reward_multiplier() -> f64 {
        0.5
    }
    pub fn byzantine_threshold() -> f64 {
        0.2
    }
    pub fn byzantine_error_rate() -> f64 {
        0.3
    }
    pub fn input_size_min() -> u32 {
        10
    }
    pub fn input_size_max() -> u32 {
        100
    }
    pub fn max_byzantine_miners() -> u32 {
        3
    }
    pub fn num_verifiers() -> u32 {
        3
    }
    pub fn fault_tolerance_enabled() -> bool {
        true
    }
}

impl Default for SimulationConfig {
    /// The published defaults served by `GET /api/config/default`.
    fn default() -> Self {
        Self {
            num_miners: 20,
            num_tasks: 1000,
            reward_multiplier: 1.0,
            verifier_reward_multiplier: 0.5,
            renewable_energy_alpha: AlphaParam::random(),
            byzantine_threshold: 0.2,
            byzantine_error_rate: 0.3,
            input_size_min: 10,
            input_size_max: 100,
            max_byzantine_miners: 3,
            num_verifiers: 3,
            fault_tolerance_enabled: true,
            seed: None,
        }
    }
}

/// Per-field command-line overrides for one-shot runs. Only flags the user
/// actually passed are applied over the fetched defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct RunOverrides {
    #[arg(long)]
    pub num_miners: Option<u32>,

    #[arg(long)]
    pub num_tasks: Option<u32>,

    #[arg(long)]
    pub reward_multiplier: Option<f64>,

    #[arg(long)]
    pub verifier_reward_multiplier: Option<f64>,

    /// "random" or a fixed value in [0, 0.5].
    #[arg(long)]
    pub renewable_energy_alpha: Option<String>,

    #[arg(long)]
    pub byzantine_threshold: Option<f64>,

    #[arg(long)]
    pub byzantine_error_rate: Option<f64>,

    #[arg(long)]
    pub input_size_min: Option<u32>,

    #[arg(long)]
    pub input_size_max: Option<u32>,

    #[arg(long)]
    pub max_byzantine_miners: Option<u32>,

    #[arg(long)]
    pub num_verifiers: Option<u32>,

    #[arg(long)]
    pub fault_tolerance_enabled: Option<bool>,

    #[arg(long)]
    pub seed: Option<u64>,
}

impl RunOverrides {
    pub fn apply(&self, config: &mut SimulationConfig) {
        macro_rules! override_if_set {
            ($field:ident) => {
                if let Some(v) = self.$field {
                    config.$field = v;
                }
            };
        }

        override_if_set!(num_miners);
        override_if_set!(num_tasks);
        override_if_set!(reward_multiplier);
        override_if_set!(verifier_reward_multiplier);
        override_if_set!(byzantine_threshold);
        override_if_set!(byzantine_error_rate);
        override_if_set!(input_size_min);
        override_if_set!(input_size_max);
        override_if_set!(max_byzantine_miners);
        override_if_set!(num_verifiers);
        override_if_set!(fault_tolerance_enabled);

        if let Some(alpha) = &self.renewable_energy_alpha {
            config.renewable_energy_alpha = AlphaParam::raw(alpha.clone());
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
    }
}
