//! Generation parameters shown in the post body.

use std::fmt;
use std::str::FromStr;

/// Error for an unrecognized sampler or scheduler name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{name}'")]
pub struct UnknownName {
    kind: &'static str,
    name: String,
}

/// Defines a closed set of names with `as_str`, `Display` and `FromStr`.
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $(
                #[doc = concat!("`", $text, "`")]
                $variant,
            )+
        }

        impl $name {
            /// Every accepted value, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Name as used by the sampling backend.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownName;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| UnknownName {
                        kind: $kind,
                        name: s.to_owned(),
                    })
            }
        }
    };
}

named_enum! {
    /// Sampling algorithm.
    Sampler, "sampler" {
        Euler => "euler",
        EulerCfgPp => "euler_cfg_pp",
        EulerAncestral => "euler_ancestral",
        EulerAncestralCfgPp => "euler_ancestral_cfg_pp",
        Heun => "heun",
        Heunpp2 => "heunpp2",
        Dpm2 => "dpm_2",
        Dpm2Ancestral => "dpm_2_ancestral",
        Lms => "lms",
        DpmFast => "dpm_fast",
        DpmAdaptive => "dpm_adaptive",
        Dpmpp2sAncestral => "dpmpp_2s_ancestral",
        Dpmpp2sAncestralCfgPp => "dpmpp_2s_ancestral_cfg_pp",
        DpmppSde => "dpmpp_sde",
        DpmppSdeGpu => "dpmpp_sde_gpu",
        Dpmpp2m => "dpmpp_2m",
        Dpmpp2mCfgPp => "dpmpp_2m_cfg_pp",
        Dpmpp2mSde => "dpmpp_2m_sde",
        Dpmpp2mSdeGpu => "dpmpp_2m_sde_gpu",
        Dpmpp3mSde => "dpmpp_3m_sde",
        Dpmpp3mSdeGpu => "dpmpp_3m_sde_gpu",
        Ddpm => "ddpm",
        Lcm => "lcm",
        Ipndm => "ipndm",
        IpndmV => "ipndm_v",
        Deis => "deis",
        ResMultistep => "res_multistep",
        ResMultistepCfgPp => "res_multistep_cfg_pp",
        ResMultistepAncestral => "res_multistep_ancestral",
        ResMultistepAncestralCfgPp => "res_multistep_ancestral_cfg_pp",
        GradientEstimation => "gradient_estimation",
        ErSde => "er_sde",
        Seeds2 => "seeds_2",
        Seeds3 => "seeds_3",
        Ddim => "ddim",
        UniPc => "uni_pc",
        UniPcBh2 => "uni_pc_bh2",
    }
}

named_enum! {
    /// Noise schedule.
    Scheduler, "scheduler" {
        Normal => "normal",
        Karras => "karras",
        Exponential => "exponential",
        SgmUniform => "sgm_uniform",
        Simple => "simple",
        DdimUniform => "ddim_uniform",
        Beta => "beta",
        LinearQuadratic => "linear_quadratic",
        KlOptimal => "kl_optimal",
    }
}

/// Sampler settings rendered as the parameter table.
///
/// Absent values are left out of the table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SamplingParams {
    /// Noise seed.
    pub seed: Option<u64>,
    /// Sampling steps.
    pub steps: Option<u64>,
    /// Classifier-free guidance scale.
    pub cfg: Option<f64>,
    /// Sampling algorithm.
    pub sampler: Option<Sampler>,
    /// Noise schedule.
    pub scheduler: Option<Scheduler>,
    /// Denoise strength in `[0, 1]`.
    pub denoise: Option<f64>,
}

impl SamplingParams {
    /// Labelled rows in table order, skipping values that stringify empty.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let fields = [
            ("Seed", self.seed.map(|v| v.to_string())),
            ("Steps", self.steps.map(|v| v.to_string())),
            ("CFG", self.cfg.map(format_float)),
            ("Sampler", self.sampler.map(|v| v.as_str().to_owned())),
            ("Scheduler", self.scheduler.map(|v| v.as_str().to_owned())),
            ("Denoise", self.denoise.map(format_float)),
        ];

        fields
            .into_iter()
            .filter_map(|(label, value)| {
                let value = value.unwrap_or_default();
                let value = value.trim();
                (!value.is_empty()).then(|| (label, value.to_owned()))
            })
            .collect()
    }
}

/// Shortest round-trip form that always keeps a fractional part (`8.0`).
fn format_float(value: f64) -> String {
    format!("{value:?}")
}
