//! Built-in catalog of contraceptive methods and educational guides.
//!
//! Method data (durations, effectiveness, side effects, citations) follows
//! the CDC/WHO family planning references named per entry.

use crate::types::*;
use once_cell::sync::Lazy;

/// A static educational guide shown on the dashboard
#[derive(Clone, Debug)]
pub struct Guide {
    pub id: &'static str,
    pub title: &'static str,
    pub content: &'static str,
}

/// The complete catalog of methods and guides
#[derive(Clone, Debug)]
pub struct Catalog {
    pub methods: Vec<MethodProfile>,
    pub guides: Vec<Guide>,
}

impl Catalog {
    /// Look up the profile for a method kind
    pub fn method(&self, kind: MethodKind) -> Option<&MethodProfile> {
        self.methods.iter().find(|m| m.kind == kind)
    }

    pub fn guide(&self, id: &str) -> Option<&Guide> {
        self.guides.iter().find(|g| g.id == id)
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for kind in MethodKind::all() {
            if self.method(*kind).is_none() {
                errors.push(format!("Catalog missing profile for method '{}'", kind.id()));
            }
        }

        for profile in &self.methods {
            if profile.name.is_empty() {
                errors.push(format!("Method '{}' has empty name", profile.kind.id()));
            }
            for (label, pct) in [
                ("typical", profile.typical_use_effectiveness),
                ("perfect", profile.perfect_use_effectiveness),
            ] {
                if pct <= 0.0 || pct > 100.0 {
                    errors.push(format!(
                        "Method '{}': {} effectiveness {} out of range",
                        profile.kind.id(),
                        label,
                        pct
                    ));
                }
            }
            match profile.unit {
                DurationUnit::Permanent => {
                    if profile.duration != 0 {
                        errors.push(format!(
                            "Method '{}': permanent methods carry no duration",
                            profile.kind.id()
                        ));
                    }
                }
                DurationUnit::SingleUse => {
                    if profile.duration != 1 {
                        errors.push(format!(
                            "Method '{}': single-use duration must be 1",
                            profile.kind.id()
                        ));
                    }
                }
                DurationUnit::Months | DurationUnit::Years => {
                    if profile.duration == 0 {
                        errors.push(format!(
                            "Method '{}': zero duration",
                            profile.kind.id()
                        ));
                    }
                }
            }
        }

        let mut kinds: Vec<_> = self.methods.iter().map(|m| m.kind).collect();
        kinds.sort_by_key(|k| k.id());
        kinds.dedup();
        if kinds.len() != self.methods.len() {
            errors.push("Catalog contains duplicate method profiles".to_string());
        }

        for guide in &self.guides {
            if guide.title.is_empty() || guide.content.is_empty() {
                errors.push(format!("Guide '{}' has empty title or content", guide.id));
            }
        }

        errors
    }
}

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog of methods and guides
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns
/// a cached reference. This function is retained for testing.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

fn profile(
    kind: MethodKind,
    name: &str,
    duration: u32,
    unit: DurationUnit,
    typical: f64,
    perfect: f64,
    effects: &str,
    source: &str,
) -> MethodProfile {
    MethodProfile {
        kind,
        name: name.into(),
        duration,
        unit,
        typical_use_effectiveness: typical,
        perfect_use_effectiveness: perfect,
        effects: effects.into(),
        source: source.into(),
    }
}

fn build_default_catalog_internal() -> Catalog {
    let methods = vec![
        profile(
            MethodKind::Pills,
            "Pills (combined or progestin-only)",
            1,
            DurationUnit::Months,
            91.0,
            99.0,
            "Spotting, nausea, breast tenderness, mood changes; improve within 2-3 months. Take pill same time daily.",
            "CDC & WHO Family Planning Handbook",
        ),
        profile(
            MethodKind::Injection,
            "Injection (DMPA / Depo-Provera)",
            3,
            DurationUnit::Months,
            94.0,
            99.0,
            "Irregular bleeding, weight gain, possible bone density loss with long use; inject every 3 months.",
            "Planned Parenthood, WHO FP Handbook",
        ),
        profile(
            MethodKind::Implant,
            "Implant (subdermal rod)",
            5,
            DurationUnit::Years,
            99.9,
            99.9,
            "Irregular bleeding or amenorrhea, headaches, minor weight change.",
            "WHO & CDC Contraceptive Guidance",
        ),
        profile(
            MethodKind::HormonalIud,
            "Hormonal IUD (levonorgestrel IUS)",
            5,
            DurationUnit::Years,
            99.8,
            99.8,
            "Spotting initially, then lighter or no periods; mild cramping after insertion.",
            "ACOG & CDC Contraceptive Effectiveness Chart",
        ),
        profile(
            MethodKind::CopperIud,
            "Copper IUD (non-hormonal)",
            10,
            DurationUnit::Years,
            99.2,
            99.4,
            "Heavier or longer periods, increased cramping; improves after several months.",
            "CDC & WHO Family Planning Handbook",
        ),
        profile(
            MethodKind::MaleCondom,
            "Male Condom",
            1,
            DurationUnit::SingleUse,
            87.0,
            98.0,
            "Possible irritation or latex allergy; protects against STIs; use with water-based lubricant.",
            "CDC Contraceptive Effectiveness Summary",
        ),
        profile(
            MethodKind::FemaleCondom,
            "Female Condom",
            1,
            DurationUnit::SingleUse,
            79.0,
            95.0,
            "Possible discomfort or noise during use; protects against STIs.",
            "CDC & WHO Family Planning Reference",
        ),
        profile(
            MethodKind::EmergencyContraception,
            "Emergency Contraception (Levonorgestrel / Ulipristal)",
            1,
            DurationUnit::SingleUse,
            85.0,
            89.0,
            "Nausea, irregular bleeding, fatigue; take within 3-5 days after unprotected sex.",
            "WHO & Planned Parenthood EC Guidelines",
        ),
        profile(
            MethodKind::Vasectomy,
            "Male Sterilization (Vasectomy)",
            0,
            DurationUnit::Permanent,
            99.9,
            99.9,
            "Mild pain/swelling initially; permanent; not effective immediately (requires follow-up semen test).",
            "CDC & WHO FP Handbook",
        ),
        profile(
            MethodKind::TubalLigation,
            "Female Sterilization (Tubal Ligation)",
            0,
            DurationUnit::Permanent,
            99.5,
            99.5,
            "Surgical risks (infection, regret); permanent; no hormonal side effects.",
            "CDC & WHO Family Planning Guidance",
        ),
    ];

    let guides = vec![
        Guide {
            id: "safe_days",
            title: "Safe Days Calculator",
            content: "To estimate: Find shortest cycle, subtract 18 for first fertile day. \
                      Longest minus 11 for last. Safe days outside this window. \
                      Note: Not 100% reliable.",
        },
        Guide {
            id: "self_exam",
            title: "Breast Self-Exam Guide",
            content: "Step 1: Visual check standing (arms down/up). Step 2: Lie down, use \
                      finger pads in circles with varying pressure. Check armpits and \
                      nipples for changes.",
        },
        Guide {
            id: "contraceptives",
            title: "Contraceptives Overview",
            content: "Pills: Pros - Regulates cycles; Cons - Must take daily. IUD: Pros - \
                      Lasts years; Cons - Possible cramps. Condoms: Pros - STI protection; \
                      Cons - Can break.",
        },
    ];

    Catalog { methods, guides }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        let catalog = build_default_catalog();
        assert_eq!(catalog.methods.len(), 10);
        assert_eq!(catalog.guides.len(), 3);
    }

    #[test]
    fn test_every_method_kind_has_profile() {
        let catalog = build_default_catalog();
        for kind in MethodKind::all() {
            assert!(
                catalog.method(*kind).is_some(),
                "No profile for {}",
                kind.id()
            );
        }
    }

    #[test]
    fn test_emergency_method_flagged() {
        let catalog = build_default_catalog();
        let ec = catalog.method(MethodKind::EmergencyContraception).unwrap();
        assert!(ec.kind.is_emergency());
        assert_eq!(ec.unit, DurationUnit::SingleUse);
    }

    #[test]
    fn test_sterilization_methods_permanent() {
        let catalog = build_default_catalog();
        for kind in [MethodKind::Vasectomy, MethodKind::TubalLigation] {
            let profile = catalog.method(kind).unwrap();
            assert_eq!(profile.unit, DurationUnit::Permanent);
        }
    }

    #[test]
    fn test_default_catalog_validates() {
        let catalog = build_default_catalog();
        let errors = catalog.validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_guide_lookup() {
        let catalog = build_default_catalog();
        assert!(catalog.guide("safe_days").is_some());
        assert!(catalog.guide("missing").is_none());
    }
}
