use strum_macros::{Display, EnumIter, EnumString};
use taskmine_protocol::{AlphaParam, SimulationConfig};
use thiserror::Error;

/// The eleven form inputs, named exactly as the wire fields they feed.
/// `num_verifiers` and `seed` are deliberately absent: the form never
/// carried them, and the serde defaults re-supply them server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    NumMiners,
    NumTasks,
    RewardMultiplier,
    VerifierRewardMultiplier,
    RenewableEnergyAlpha,
    ByzantineThreshold,
    ByzantineErrorRate,
    InputSizeMin,
    InputSizeMax,
    MaxByzantineMiners,
    FaultToleranceEnabled,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Invalid value for {field}: '{value}'")]
    Parse { field: Field, value: String },
}

/// Raw field values, exactly as the loader wrote them or the user typed
/// them. Parsing to semantic types happens only in [`FormState::read_config`],
/// so a half-edited form never corrupts a config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub num_miners: String,
    pub num_tasks: String,
    pub reward_multiplier: String,
    pub verifier_reward_multiplier: String,
    pub renewable_energy_alpha: String,
    pub byzantine_threshold: String,
    pub byzantine_error_rate: String,
    pub input_size_min: String,
    pub input_size_max: String,
    pub max_byzantine_miners: String,
    pub fault_tolerance_enabled: bool,
}

impl FormState {
    pub fn get(&self, field: Field) -> String {
        match field {
            Field::NumMiners => self.num_miners.clone(),
            Field::NumTasks => self.num_tasks.clone(),
            Field::RewardMultiplier => self.reward_multiplier.clone(),
            Field::VerifierRewardMultiplier => self.verifier_reward_multiplier.clone(),
            Field::RenewableEnergyAlpha => self.renewable_energy_alpha.clone(),
            Field::ByzantineThreshold => self.byzantine_threshold.clone(),
            Field::ByzantineErrorRate => self.byzantine_error_rate.clone(),
            Field::InputSizeMin => self.input_size_min.clone(),
            Field::InputSizeMax => self.input_size_max.clone(),
            Field::MaxByzantineMiners => self.max_byzantine_miners.clone(),
            Field::FaultToleranceEnabled => self.fault_tolerance_enabled.to_string(),
        }
    }

    /// Stores a raw value. Only the checkbox parses here; every other field
    /// keeps the raw string until a run reads the form back.
    pub fn set(&mut self, field: Field, raw: &str) -> Result<(), FormError> {
        match field {
            Field::NumMiners => self.num_miners = raw.to_string(),
            Field::NumTasks => self.num_tasks = raw.to_string(),
            Field::RewardMultiplier => self.reward_multiplier = raw.to_string(),
            Field::VerifierRewardMultiplier => self.verifier_reward_multiplier = raw.to_string(),
            Field::RenewableEnergyAlpha => self.renewable_energy_alpha = raw.to_string(),
            Field::ByzantineThreshold => self.byzantine_threshold = raw.to_string(),
            Field::ByzantineErrorRate => self.byzantine_error_rate = raw.to_string(),
            Field::InputSizeMin => self.input_size_min = raw.to_string(),
            Field::InputSizeMax => self.input_size_max = raw.to_string(),
            Field::MaxByzantineMiners => self.max_byzantine_miners = raw.to_string(),
            Field::FaultToleranceEnabled => {
                self.fault_tolerance_enabled = raw.trim().parse().map_err(|_| FormError::Parse {
                    field,
                    value: raw.to_string(),
                })?;
            }
        }
        Ok(())
    }

    /// config → form: fills every field, including the checkbox.
    pub fn write_config(&mut self, config: &SimulationConfig) {
        self.num_miners = config.num_miners.to_string();
        self.num_tasks = config.num_tasks.to_string();
        self.reward_multiplier = config.reward_multiplier.to_string();
        self.verifier_reward_multiplier = config.verifier_reward_multiplier.to_string();
        self.renewable_energy_alpha = config.renewable_energy_alpha.as_str().to_string();
        self.byzantine_threshold = config.byzantine_threshold.to_string();
        self.byzantine_error_rate = config.byzantine_error_rate.to_string();
        self.input_size_min = config.input_size_min.to_string();
        self.input_size_max = config.input_size_max.to_string();
        self.max_byzantine_miners = config.max_byzantine_miners.to_string();
        self.fault_tolerance_enabled = config.fault_tolerance_enabled;
    }

    /// form → config: parses each field to its declared type; the alpha
    /// token passes through raw. Fails naming the first bad field.
    pub fn read_config(&self) -> Result<SimulationConfig, FormError> {
        let defaults = SimulationConfig::default();
        Ok(SimulationConfig {
            num_miners: parse_int(Field::NumMiners, &self.num_miners)?,
            num_tasks: parse_int(Field::NumTasks, &self.num_tasks)?,
            reward_multiplier: parse_float(Field::RewardMultiplier, &self.reward_multiplier)?,
            verifier_reward_multiplier: parse_float(
                Field::VerifierRewardMultiplier,
                &self.verifier_reward_multiplier,
            )?,
            renewable_energy_alpha: AlphaParam::raw(self.renewable_energy_alpha.clone()),
            byzantine_threshold: parse_float(Field::ByzantineThreshold, &self.byzantine_threshold)?,
            byzantine_error_rate: parse_float(
                Field::ByzantineErrorRate,
                &self.byzantine_error_rate,
            )?,
            input_size_min: parse_int(Field::InputSizeMin, &self.input_size_min)?,
            input_size_max: parse_int(Field::InputSizeMax, &self.input_size_max)?,
            max_byzantine_miners: parse_int(Field::MaxByzantineMiners, &self.max_byzantine_miners)?,
            fault_tolerance_enabled: self.fault_tolerance_enabled,
            num_verifiers: defaults.num_verifiers,
            seed: None,
        })
    }
}

fn parse_int(field: Field, raw: &str) -> Result<u32, FormError> {
    raw.trim().parse().map_err(|_| FormError::Parse {
        field,
        value: raw.to_string(),
    })
}

fn parse_float(field: Field, raw: &str) -> Result<f64, FormError> {
    raw.trim().parse().map_err(|_| FormError::Parse {
        field,
        value: raw.to_string(),
    })
}
