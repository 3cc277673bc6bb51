//! Composite quality-index (SCI) calculation.

pub const SCI_INTERCEPT: f64 = -414.67;
pub const SCI_STR_COEFF: f64 = 2.9;
pub const SCI_MIC_COEFF: f64 = -9.32;
pub const SCI_LEN_COEFF: f64 = 49.17;
pub const SCI_UNF_COEFF: f64 = 4.74;
pub const SCI_RD_COEFF: f64 = 0.65;
pub const SCI_B_PLUS_COEFF: f64 = 0.36;

/// Per-bale mean measurements feeding the quality index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityInputs {
    pub strength: f64,
    pub mic: f64,
    pub len: f64,
    pub unf: f64,
    pub rd: f64,
    pub b_plus: f64,
}

/// Linear composite quality index over the unrounded per-bale means.
///
/// Inputs must carry full precision; applying the display rounding first
/// silently changes the result.
pub fn quality_index(inputs: &QualityInputs) -> f64 {
    SCI_INTERCEPT
        + SCI_STR_COEFF * inputs.strength
        + SCI_MIC_COEFF * inputs.mic
        + SCI_LEN_COEFF * inputs.len
        + SCI_UNF_COEFF * inputs.unf
        + SCI_RD_COEFF * inputs.rd
        + SCI_B_PLUS_COEFF * inputs.b_plus
}
