/// Engine configuration constants and tunable parameters.
///
/// Runtime-tunable values mirror the host settings the sheet reads (coin weight,
/// carrying capacity). Compile-time bounds are associated consts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Whether carried coins count toward encumbrance.
    pub currency_weight: bool,

    /// Number of coins that weigh one unit.
    pub currency_per_weight: f64,

    /// Carrying capacity per point of strength (before size scaling).
    pub str_multiplier: f64,

    /// Encumbrance percentage that must be strictly exceeded to be encumbered.
    pub encumbered_threshold_pct: f64,
}

impl EngineConfig {
    // ===== compile-time constants =====
    pub const MIN_ABILITY_SCORE: i32 = 1;
    pub const MAX_ABILITY_SCORE: i32 = 30;
    pub const MAX_CLASS_LEVEL: u32 = 20;
    pub const MAX_CHARACTER_LEVEL: u32 = 20;
    /// Upper bound for an explicit proficiency bonus override.
    pub const MAX_PROFICIENCY_BONUS: i32 = 20;
    /// Largest magnitude accepted for flat bonuses and stored initiative.
    pub const MAX_FLAT_BONUS: i32 = 100;
    /// Number of power-level buckets (`power1`..`power9`).
    pub const POWER_LEVELS: usize = 9;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CURRENCY_PER_WEIGHT: f64 = 50.0;
    pub const DEFAULT_STR_MULTIPLIER: f64 = 15.0;
    pub const DEFAULT_ENCUMBERED_THRESHOLD_PCT: f64 = 200.0 / 3.0;

    pub fn new() -> Self {
        Self {
            currency_weight: false,
            currency_per_weight: Self::DEFAULT_CURRENCY_PER_WEIGHT,
            str_multiplier: Self::DEFAULT_STR_MULTIPLIER,
            encumbered_threshold_pct: Self::DEFAULT_ENCUMBERED_THRESHOLD_PCT,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
