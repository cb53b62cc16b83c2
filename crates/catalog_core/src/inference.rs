//! Best-effort category tagging from record names.
//!
//! Each (section, sub-category) pair maps to an ordered rule list. The first
//! rule with a token contained in the lower-cased name wins; otherwise the
//! pair's fallback applies. This is an approximate classifier: callers that
//! care about misclassification should inspect [`Inference::matched`].

use crate::section::SectionKind;

struct InferenceRule {
    tokens: &'static [&'static str],
    category: &'static str,
}

#[derive(Debug, Clone, Copy)]
enum Fallback {
    Fixed(&'static str),
    /// Sub-category name without its trailing `s`.
    Singular,
    Subcategory,
}

struct RuleSet {
    rules: &'static [InferenceRule],
    fallback: Fallback,
}

const NO_RULES: &[InferenceRule] = &[];

#[rustfmt::skip]
const VEHICLE_RULES: &[InferenceRule] = &[
    InferenceRule { tokens: &["harley", "softail", "dyna", "sanchez", "cliffhanger"], category: "motorcycle" },
    InferenceRule { tokens: &["cognoscenti", "goldwing"],                             category: "luxury" },
    InferenceRule { tokens: &["tailgater", "kuruma"],                                 category: "sedan" },
    InferenceRule { tokens: &["dubsta"],                                              category: "suv" },
    InferenceRule { tokens: &["windsor"],                                             category: "coupe" },
    InferenceRule { tokens: &["tornado", "chino"],                                    category: "lowrider" },
    InferenceRule { tokens: &["dominator", "buccaneer", "faction"],                   category: "muscle" },
    InferenceRule { tokens: &["outlaw"],                                              category: "truck" },
    InferenceRule { tokens: &["toros"],                                               category: "sports" },
    InferenceRule { tokens: &["kamacho"],                                             category: "offroad" },
    InferenceRule { tokens: &["manana"],                                              category: "compact" },
];

#[rustfmt::skip]
const EXPLOSIVE_RULES: &[InferenceRule] = &[
    InferenceRule { tokens: &["grenade"],    category: "grenade" },
    InferenceRule { tokens: &["c4", "bomb"], category: "explosive" },
    InferenceRule { tokens: &["molotov"],    category: "incendiary" },
];

#[rustfmt::skip]
const RIFLE_RULES: &[InferenceRule] = &[
    InferenceRule { tokens: &["sniper"],  category: "sniper" },
    InferenceRule { tokens: &["smg"],     category: "smg" },
    InferenceRule { tokens: &["assault"], category: "assault" },
    InferenceRule { tokens: &["shotgun"], category: "shotgun" },
];

#[rustfmt::skip]
const PISTOL_RULES: &[InferenceRule] = &[
    InferenceRule { tokens: &["revolver"],        category: "revolver" },
    InferenceRule { tokens: &["shotgun"],         category: "shotgun" },
    InferenceRule { tokens: &["flare", "stun"],   category: "special" },
];

#[rustfmt::skip]
const DRUG_RULES: &[InferenceRule] = &[
    InferenceRule { tokens: &["weed", "beuh"],          category: "cannabis" },
    InferenceRule { tokens: &["coke", "meth", "blue"],  category: "stimulant" },
    InferenceRule { tokens: &["lsd", "champi"],         category: "hallucinogen" },
    InferenceRule { tokens: &["krokodil"],              category: "opiate" },
];

const CONTRABAND_RULES: &[InferenceRule] = &[InferenceRule {
    tokens: &["cagoule"],
    category: "disguise",
}];

const DOCUMENT_RULES: &[InferenceRule] = &[InferenceRule {
    tokens: &["tracker", "gps"],
    category: "tracking",
}];

#[rustfmt::skip]
const VAGOS_RULES: &[InferenceRule] = &[
    InferenceRule { tokens: &["gilet"],  category: "protection" },
    InferenceRule { tokens: &["chaise"], category: "furniture" },
];

const CATALYST_RULES: &[InferenceRule] = &[InferenceRule {
    tokens: &["eau de vie"],
    category: "spirit",
}];

const SERVICE_RULES: &[InferenceRule] = &[InferenceRule {
    tokens: &["aether"],
    category: "money_laundering",
}];

fn rule_set(section: SectionKind, subcategory: &str) -> RuleSet {
    let (rules, fallback) = match (section, subcategory) {
        (SectionKind::Vehicles, _) => (VEHICLE_RULES, Fallback::Fixed("vehicle")),
        (SectionKind::Weapons, "explosives") => (EXPLOSIVE_RULES, Fallback::Singular),
        (SectionKind::Weapons, "rifles") => (RIFLE_RULES, Fallback::Singular),
        (SectionKind::Weapons, "pistols") => (PISTOL_RULES, Fallback::Fixed("pistol")),
        (SectionKind::Weapons, _) => (NO_RULES, Fallback::Singular),
        (SectionKind::Blackmarket, "drugs") => (DRUG_RULES, Fallback::Fixed("special")),
        (SectionKind::Blackmarket, "contraband") => (CONTRABAND_RULES, Fallback::Fixed("tool")),
        (SectionKind::Blackmarket, "documents") => {
            (DOCUMENT_RULES, Fallback::Fixed("electronics"))
        }
        (SectionKind::Blackmarket, "vagos") => (VAGOS_RULES, Fallback::Fixed("tool")),
        (SectionKind::Blackmarket, "catalyst") => (CATALYST_RULES, Fallback::Fixed("equipment")),
        (SectionKind::Blackmarket, _) => (NO_RULES, Fallback::Subcategory),
        (SectionKind::Services, _) => (SERVICE_RULES, Fallback::Fixed("service")),
    };
    RuleSet { rules, fallback }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
    pub category: String,
    /// `false` when no token matched and the fallback was used.
    pub matched: bool,
}

pub fn infer_category(name: &str, section: SectionKind, subcategory: &str) -> Inference {
    let lowercase_name = name.to_lowercase();
    let set = rule_set(section, subcategory);

    for rule in set.rules {
        if rule
            .tokens
            .iter()
            .any(|token| lowercase_name.contains(token))
        {
            return Inference {
                category: rule.category.to_string(),
                matched: true,
            };
        }
    }

    let category = match set.fallback {
        Fallback::Fixed(category) => category.to_string(),
        Fallback::Singular => subcategory
            .strip_suffix('s')
            .unwrap_or(subcategory)
            .to_string(),
        Fallback::Subcategory => subcategory.to_string(),
    };
    Inference {
        category,
        matched: false,
    }
}

#[cfg(test)]
mod tests {
    use super::infer_category;
    use crate::section::SectionKind;

    #[test]
    fn vehicle_names_match_case_insensitively() {
        let inference = infer_category("Harley Davidson Softail", SectionKind::Vehicles, "mc");
        assert_eq!(inference.category, "motorcycle");
        assert!(inference.matched);

        assert_eq!(
            infer_category("Declasse TORNADO", SectionKind::Vehicles, "gang").category,
            "lowrider"
        );
    }

    #[test]
    fn rules_are_evaluated_in_table_order() {
        // "goldwing" is a luxury token but "harley" comes first.
        assert_eq!(
            infer_category("Harley Goldwing", SectionKind::Vehicles, "mc").category,
            "motorcycle"
        );
    }

    #[test]
    fn weapon_fallback_strips_trailing_s() {
        let inference = infer_category("Mystery Launcher", SectionKind::Weapons, "rifles");
        assert_eq!(inference.category, "rifle");
        assert!(!inference.matched);

        assert_eq!(
            infer_category("Tazer", SectionKind::Weapons, "pistols").category,
            "pistol"
        );
        assert_eq!(
            infer_category("Stun Gun", SectionKind::Weapons, "pistols").category,
            "special"
        );
        assert_eq!(
            infer_category("Knife", SectionKind::Weapons, "melee").category,
            "melee"
        );
    }

    #[test]
    fn blackmarket_uses_per_subcategory_defaults() {
        assert_eq!(
            infer_category("Blue Sky", SectionKind::Blackmarket, "drugs").category,
            "stimulant"
        );
        assert_eq!(
            infer_category("Mystery Powder", SectionKind::Blackmarket, "drugs").category,
            "special"
        );
        assert_eq!(
            infer_category("GPS Tracker", SectionKind::Blackmarket, "documents").category,
            "tracking"
        );
        assert_eq!(
            infer_category("Eau de vie artisanale", SectionKind::Blackmarket, "catalyst").category,
            "spirit"
        );
        assert_eq!(
            infer_category("Caisse", SectionKind::Blackmarket, "armes").category,
            "armes"
        );
    }

    #[test]
    fn services_detect_laundering() {
        assert_eq!(
            infer_category("Aether Finance", SectionKind::Services, "laundering").category,
            "money_laundering"
        );
        assert_eq!(
            infer_category("Nettoyage", SectionKind::Services, "laundering").category,
            "service"
        );
    }
}
