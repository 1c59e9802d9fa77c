use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ssil_core::EngineParams;

/// Partial parameter set: the unit of layering.
///
/// Field names on the wire (YAML keys and CLI flags) are the engine's
/// historical names: `H`, `delta_max`, `wA`, ...
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamOverrides {
    #[serde(rename = "H", default, skip_serializing_if = "Option::is_none")]
    pub h: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rho: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<f64>,
    #[serde(rename = "wA", default, skip_serializing_if = "Option::is_none")]
    pub w_a: Option<f64>,
    #[serde(rename = "wB", default, skip_serializing_if = "Option::is_none")]
    pub w_b: Option<f64>,
    #[serde(rename = "wS", default, skip_serializing_if = "Option::is_none")]
    pub w_s: Option<f64>,
}

/// Every key an engine config section may carry.
pub const ENGINE_KEYS: [&str; 10] = [
    "H",
    "delta_max",
    "s_max",
    "rho",
    "beta",
    "gamma",
    "eta",
    "wA",
    "wB",
    "wS",
];

impl ParamOverrides {
    /// Later layer wins field by field.
    pub fn layered_over(self, base: ParamOverrides) -> ParamOverrides {
        ParamOverrides {
            h: self.h.or(base.h),
            delta_max: self.delta_max.or(base.delta_max),
            s_max: self.s_max.or(base.s_max),
            rho: self.rho.or(base.rho),
            beta: self.beta.or(base.beta),
            gamma: self.gamma.or(base.gamma),
            eta: self.eta.or(base.eta),
            w_a: self.w_a.or(base.w_a),
            w_b: self.w_b.or(base.w_b),
            w_s: self.w_s.or(base.w_s),
        }
    }

    /// Apply onto a full parameter set. `H` is normalized to `max(1, H)`.
    pub fn apply(&self, base: &EngineParams) -> EngineParams {
        EngineParams {
            h: self
                .h
                .map(EngineParams::window_from_raw)
                .unwrap_or(base.h),
            delta_max: self.delta_max.unwrap_or(base.delta_max),
            s_max: self.s_max.unwrap_or(base.s_max),
            rho: self.rho.unwrap_or(base.rho),
            beta: self.beta.unwrap_or(base.beta),
            gamma: self.gamma.unwrap_or(base.gamma),
            eta: self.eta.unwrap_or(base.eta),
            w_a: self.w_a.unwrap_or(base.w_a),
            w_b: self.w_b.unwrap_or(base.w_b),
            w_s: self.w_s.unwrap_or(base.w_s),
        }
    }

    /// Read the `/engine` section of a merged config document.
    /// A document without an engine section yields no overrides.
    pub fn from_config_json(cfg: &Value) -> Result<ParamOverrides> {
        match cfg.pointer("/engine") {
            None | Some(Value::Null) => Ok(ParamOverrides::default()),
            Some(section) => serde_json::from_value(section.clone())
                .context("config /engine section has a value of the wrong type"),
        }
    }

    /// Engine CLI flags for exactly the fields that are set, in a fixed order.
    pub fn to_cli_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(h) = self.h {
            args.push("--H".to_string());
            args.push(h.to_string());
        }
        let reals = [
            ("--delta-max", self.delta_max),
            ("--s-max", self.s_max),
            ("--rho", self.rho),
            ("--beta", self.beta),
            ("--gamma", self.gamma),
            ("--wA", self.w_a),
            ("--wB", self.w_b),
            ("--wS", self.w_s),
            ("--eta", self.eta),
        ];
        for (flag, v) in reals {
            if let Some(v) = v {
                args.push(flag.to_string());
                // Display is shortest round-trip; parses back to the same f64.
                args.push(v.to_string());
            }
        }
        args
    }

    pub fn is_empty(&self) -> bool {
        *self == ParamOverrides::default()
    }
}

/// A named, versioned parameter lock.
#[derive(Clone, Debug, PartialEq)]
pub struct LockedProfile {
    pub name: &'static str,
    pub version: u32,
    pub overrides: ParamOverrides,
}

impl LockedProfile {
    /// Capsule profile v1: nine parameters locked, `eta` left at the engine default.
    pub const CAPSULE_V1: LockedProfile = LockedProfile {
        name: "capsule",
        version: 1,
        overrides: ParamOverrides {
            h: Some(8),
            delta_max: Some(0.05),
            s_max: Some(10.0),
            rho: Some(1.0),
            beta: Some(0.5),
            gamma: Some(0.5),
            eta: None,
            w_a: Some(0.6),
            w_b: Some(0.2),
            w_s: Some(0.2),
        },
    };

    pub fn params(&self) -> EngineParams {
        self.overrides.apply(&EngineParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn capsule_v1_leaves_eta_at_engine_default() {
        let p = LockedProfile::CAPSULE_V1.params();
        assert_eq!(p.eta, EngineParams::default().eta);
        assert_eq!(p.delta_max, 0.05);
        assert_eq!(p.h, 8);
        assert!(LockedProfile::CAPSULE_V1.overrides.eta.is_none());
    }

    #[test]
    fn capsule_v1_cli_args_are_exact() {
        let args = LockedProfile::CAPSULE_V1.overrides.to_cli_args();
        assert_eq!(
            args,
            vec![
                "--H", "8", "--delta-max", "0.05", "--s-max", "10", "--rho", "1", "--beta",
                "0.5", "--gamma", "0.5", "--wA", "0.6", "--wB", "0.2", "--wS", "0.2",
            ]
        );
        assert!(!args.iter().any(|a| a == "--eta"));
    }

    #[test]
    fn later_layer_wins_per_field() {
        let base = ParamOverrides {
            h: Some(4),
            eta: Some(0.1),
            ..Default::default()
        };
        let top = ParamOverrides {
            eta: Some(0.3),
            ..Default::default()
        };
        let merged = top.layered_over(base);
        assert_eq!(merged.h, Some(4));
        assert_eq!(merged.eta, Some(0.3));
    }

    #[test]
    fn window_below_one_is_raised_to_one() {
        let o = ParamOverrides {
            h: Some(0),
            ..Default::default()
        };
        assert_eq!(o.apply(&EngineParams::default()).h, 1);
    }

    #[test]
    fn reads_engine_section_with_wire_names() {
        let cfg = json!({"engine": {"H": 12, "wA": 0.5, "delta_max": 0.1}});
        let o = ParamOverrides::from_config_json(&cfg).unwrap();
        assert_eq!(o.h, Some(12));
        assert_eq!(o.w_a, Some(0.5));
        assert_eq!(o.delta_max, Some(0.1));
        assert_eq!(o.eta, None);

        assert!(ParamOverrides::from_config_json(&json!({})).unwrap().is_empty());
    }

    #[test]
    fn wrong_type_is_an_error() {
        let cfg = json!({"engine": {"H": "eight"}});
        assert!(ParamOverrides::from_config_json(&cfg).is_err());
    }
}
