//! Easing curves
//!
//! The power family used by the site's sections. Names follow the usual
//! web animation spelling: `"none"`, `"power2.out"`, `"power3.inOut"`.

use std::fmt;
use std::str::FromStr;

use soleado_core::MotionError;

/// Direction of a power curve
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EaseDirection {
    In,
    Out,
    InOut,
}

/// Easing function mapping linear progress to eased progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// No easing (`"none"` / `"linear"`)
    #[default]
    Linear,
    /// Polynomial ease with exponent `power + 1`
    Power(u8, EaseDirection),
}

impl Easing {
    pub const POWER2_OUT: Easing = Easing::Power(2, EaseDirection::Out);
    pub const POWER2_IN_OUT: Easing = Easing::Power(2, EaseDirection::InOut);
    pub const POWER3_OUT: Easing = Easing::Power(3, EaseDirection::Out);

    /// Apply the curve to `t` (clamped to `0.0..=1.0`)
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power(power, direction) => {
                let exp = i32::from(power) + 1;
                match direction {
                    EaseDirection::In => t.powi(exp),
                    EaseDirection::Out => 1.0 - (1.0 - t).powi(exp),
                    EaseDirection::InOut => {
                        if t < 0.5 {
                            (2.0 * t).powi(exp) / 2.0
                        } else {
                            1.0 - (2.0 * (1.0 - t)).powi(exp) / 2.0
                        }
                    }
                }
            }
        }
    }
}

impl Default for EaseDirection {
    fn default() -> Self {
        EaseDirection::Out
    }
}

impl FromStr for Easing {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("none") || name.eq_ignore_ascii_case("linear") {
            return Ok(Easing::Linear);
        }

        let unknown = || MotionError::UnknownEase(s.to_string());
        let rest = name.strip_prefix("power").ok_or_else(unknown)?;
        let (power, direction) = match rest.split_once('.') {
            Some((power, direction)) => (power, direction),
            None => (rest, "out"),
        };

        let power: u8 = power.parse().map_err(|_| unknown())?;
        if !(1..=4).contains(&power) {
            return Err(unknown());
        }

        let direction = match direction {
            "in" => EaseDirection::In,
            "out" => EaseDirection::Out,
            "inOut" | "inout" => EaseDirection::InOut,
            _ => return Err(unknown()),
        };

        Ok(Easing::Power(power, direction))
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => write!(f, "none"),
            Easing::Power(power, EaseDirection::In) => write!(f, "power{power}.in"),
            Easing::Power(power, EaseDirection::Out) => write!(f, "power{power}.out"),
            Easing::Power(power, EaseDirection::InOut) => write!(f, "power{power}.inOut"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::POWER2_OUT,
            Easing::POWER2_IN_OUT,
            Easing::POWER3_OUT,
            Easing::Power(1, EaseDirection::In),
        ] {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing} at 1");
        }
    }

    #[test]
    fn test_out_curves_lead() {
        // Out curves are ahead of linear progress in the first half
        assert!(Easing::POWER3_OUT.apply(0.25) > 0.25);
        assert!(Easing::POWER3_OUT.apply(0.25) > Easing::POWER2_OUT.apply(0.25));
        assert!((Easing::POWER2_IN_OUT.apply(0.5) - 0.5).abs() < 1e-6);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("none".parse::<Easing>().unwrap(), Easing::Linear);
        assert_eq!("power3.out".parse::<Easing>().unwrap(), Easing::POWER3_OUT);
        assert_eq!(
            "power2.inOut".parse::<Easing>().unwrap(),
            Easing::POWER2_IN_OUT
        );
        assert_eq!("power2".parse::<Easing>().unwrap(), Easing::POWER2_OUT);
        assert!(matches!(
            "elastic.out".parse::<Easing>(),
            Err(MotionError::UnknownEase(_))
        ));
        assert!("power9.out".parse::<Easing>().is_err());
        assert_eq!(Easing::POWER2_IN_OUT.to_string(), "power2.inOut");
    }
}
