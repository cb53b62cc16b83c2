//! Per-section site configuration: header texts, warning banner, color
//! scheme and seller contact details. Theming, the footer and the contact
//! action all read from this single table.

use serde::Serialize;

use crate::section::SectionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionColors {
    pub primary: &'static str,
    pub shadow: &'static str,
    pub hover: &'static str,
    pub gradient_start: &'static str,
    pub gradient_end: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContactDetails {
    pub discord: &'static str,
    pub ingame: &'static str,
    pub location: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionConfig {
    pub section: SectionKind,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub page_title: &'static str,
    /// Trusted markup, rendered as-is in the warning banner.
    pub warning_html: &'static str,
    pub colors: SectionColors,
    pub contact: ContactDetails,
    /// How the contact text names the seller, e.g. `dealer`.
    pub seller_label: &'static str,
}

static SECTION_CONFIGS: [SectionConfig; 4] = [
    SectionConfig {
        section: SectionKind::Vehicles,
        title: "🚗 MOTORS UNDERGROUND",
        subtitle: "Véhicules Premium - Transactions Discrètes",
        page_title: "Motors Underground - Véhicules Discrets",
        warning_html: "⚠️ <strong>RISQUE ÉLEVÉ:</strong> Ces véhicules peuvent être saisis et détruits par la police à tout moment.<br>⚠️ Full Custom 80000$.",
        colors: SectionColors {
            primary: "#ff4444",
            shadow: "rgba(255, 68, 68, 0.3)",
            hover: "rgba(255, 68, 68, 0.2)",
            gradient_start: "#ff4444",
            gradient_end: "#cc3333",
        },
        contact: ContactDetails {
            discord: "Gally_Vehicles",
            ingame: "Gally",
            location: "Zone industrielle",
            description: "Rendez-vous discrets uniquement",
        },
        seller_label: "vendeur",
    },
    SectionConfig {
        section: SectionKind::Weapons,
        title: "🔫 SHADOW ARMORY",
        subtitle: "Arsenal Tactique - Commerce Confidentiel",
        page_title: "Shadow Armory - Arsenal Tactique",
        warning_html: "⚠️ <strong>DANGER EXTRÊME:</strong> Port d'armes illégal - Sanctions pénales lourdes en cas de contrôle. <br>⚠️ Armes modifiable sur demande 20,000$ par option.",
        colors: SectionColors {
            primary: "#4488ff",
            shadow: "rgba(68, 136, 255, 0.3)",
            hover: "rgba(68, 136, 255, 0.2)",
            gradient_start: "#4488ff",
            gradient_end: "#3366cc",
        },
        contact: ContactDetails {
            discord: "Shadow_Arms",
            ingame: "Shadow",
            location: "Entrepôt discret",
            description: "Localisation confidentielle",
        },
        seller_label: "fournisseur d'armes",
    },
    SectionConfig {
        section: SectionKind::Blackmarket,
        title: "💊 DARK MARKET",
        subtitle: "Marché Noir - Échanges Clandestins",
        page_title: "Dark Market - Marché Noir",
        warning_html: "⚠️ <strong>HAUTE SURVEILLANCE:</strong> Trafic de stupéfiants sous surveillance constante des autorités.",
        colors: SectionColors {
            primary: "#aa44ff",
            shadow: "rgba(170, 68, 255, 0.3)",
            hover: "rgba(170, 68, 255, 0.2)",
            gradient_start: "#aa44ff",
            gradient_end: "#8833cc",
        },
        contact: ContactDetails {
            discord: "Dark_Market",
            ingame: "DarkDealer",
            location: "Point de rendez-vous secret",
            description: "Contact par message privé",
        },
        seller_label: "dealer",
    },
    SectionConfig {
        section: SectionKind::Services,
        title: "🏠 UNDERGROUND SERVICES",
        subtitle: "Services Illicites - Solutions Discrètes",
        page_title: "Underground Services - Services Illicites",
        warning_html: "⚠️ <strong>BLANCHIMENT:</strong> Opérations par tranches de 100K$ - Discrétion absolue requise.",
        colors: SectionColors {
            primary: "#44ff88",
            shadow: "rgba(68, 255, 136, 0.3)",
            hover: "rgba(68, 255, 136, 0.2)",
            gradient_start: "#44ff88",
            gradient_end: "#33cc66",
        },
        contact: ContactDetails {
            discord: "Underground_Services",
            ingame: "ServiceMan",
            location: "Bureau clandestin",
            description: "Adresse par message privé",
        },
        seller_label: "fournisseur de services",
    },
];

pub fn section_config(section: SectionKind) -> &'static SectionConfig {
    match section {
        SectionKind::Vehicles => &SECTION_CONFIGS[0],
        SectionKind::Weapons => &SECTION_CONFIGS[1],
        SectionKind::Blackmarket => &SECTION_CONFIGS[2],
        SectionKind::Services => &SECTION_CONFIGS[3],
    }
}

#[cfg(test)]
mod tests {
    use super::section_config;
    use crate::section::SectionKind;

    #[test]
    fn every_section_has_its_own_entry() {
        for kind in SectionKind::ALL {
            assert_eq!(section_config(kind).section, kind);
        }
        assert_eq!(section_config(SectionKind::Weapons).contact.ingame, "Shadow");
    }
}
