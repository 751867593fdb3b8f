//! Built-in reference table.

use super::{ExplanationTemplates, ReferenceCatalog, ReferenceEntry};

/// Build the built-in catalog. Entry order is significant.
pub(super) fn catalog() -> ReferenceCatalog {
    ReferenceCatalog::new()
        // Complete blood count and glucose: full metadata
        .with_entry(
            "hemoglobin",
            ReferenceEntry::new(12.0, 15.0)
                .with_aliases(&["hgb", "hg", "hemoglobin"])
                .with_unit("g/dL")
                .with_names("Hemoglobin", "hemoglobin", "Hemoglobin")
                .with_explanations(ExplanationTemplates::new(
                    "Low hemoglobin may relate to anemia.",
                    "Hemoglobin level is normal.",
                    "High hemoglobin can occur in lung disease or dehydration.",
                )),
        )
        .with_entry(
            "wbc",
            ReferenceEntry::new(4000.0, 11000.0)
                .with_aliases(&["white blood cell", "wbc count", "leukocyte"])
                .with_unit("/uL")
                .with_names("WBC", "white blood cell count", "WBC")
                .with_explanations(ExplanationTemplates::new(
                    "Low white blood cell count may increase infection risk.",
                    "White blood cell count is normal.",
                    "High white blood cell count can occur with infections.",
                )),
        )
        .with_entry(
            "rbc",
            ReferenceEntry::new(4.0, 5.9)
                .with_aliases(&["red blood cell", "rbc count", "erythrocyte"])
                .with_unit("million/uL")
                .with_names("RBC", "red blood cell count", "RBC")
                .with_explanations(ExplanationTemplates::new(
                    "Low red blood cell count may suggest anemia.",
                    "Red blood cell count is normal.",
                    "High red blood cell count may be seen in dehydration.",
                )),
        )
        .with_entry(
            "platelet",
            ReferenceEntry::new(150000.0, 450000.0)
                .with_aliases(&["platelets", "plt", "thrombocyte"])
                .with_unit("/uL")
                .with_names("Platelet", "platelet count", "Platelet")
                .with_explanations(ExplanationTemplates::new(
                    "Low platelet count may affect blood clotting.",
                    "Platelet count is normal.",
                    "High platelet count may increase clotting risk.",
                )),
        )
        .with_entry(
            "glucose",
            ReferenceEntry::new(70.0, 100.0)
                .with_aliases(&["blood sugar", "sugar", "glucose fasting"])
                .with_unit("mg/dL")
                .with_names("Glucose", "blood sugar", "Glucose")
                .with_explanations(ExplanationTemplates::new(
                    "Low blood sugar may cause dizziness.",
                    "Blood sugar level is normal.",
                    "High blood sugar may relate to diabetes.",
                )),
        )
        // Differential count (percentages)
        .with_entry(
            "neutrophils",
            ReferenceEntry::new(40.0, 60.0).with_aliases(&[
                "neutrophil",
                "neutrophils count",
                "neutrophil percentage",
            ]),
        )
        .with_entry(
            "lymphocytes",
            ReferenceEntry::new(20.0, 40.0).with_aliases(&[
                "lymphocyte",
                "lymphocytes count",
                "lymphocyte percentage",
            ]),
        )
        .with_entry(
            "monocytes",
            ReferenceEntry::new(2.0, 8.0).with_aliases(&[
                "monocyte",
                "monocytes count",
                "monocyte percentage",
            ]),
        )
        .with_entry(
            "eosinophils",
            ReferenceEntry::new(1.0, 4.0).with_aliases(&[
                "eosinophil",
                "eosinophils count",
                "eosinophil percentage",
            ]),
        )
        .with_entry(
            "basophils",
            ReferenceEntry::new(0.5, 1.0).with_aliases(&[
                "basophil",
                "basophils count",
                "basophil percentage",
            ]),
        )
        // Liver panel
        .with_entry(
            "alt",
            ReferenceEntry::new(7.0, 56.0).with_aliases(&["alanine transaminase", "sgpt"]),
        )
        .with_entry(
            "ast",
            ReferenceEntry::new(10.0, 40.0).with_aliases(&["aspartate transaminase", "sgot"]),
        )
        .with_entry(
            "alp",
            ReferenceEntry::new(44.0, 147.0).with_aliases(&["alkaline phosphatase"]),
        )
        .with_entry(
            "bilirubin",
            ReferenceEntry::new(0.1, 1.2).with_aliases(&["total bilirubin"]),
        )
        // Renal panel and electrolytes
        .with_entry(
            "creatinine",
            ReferenceEntry::new(0.6, 1.2).with_aliases(&["creatinine serum", "cr"]),
        )
        .with_entry(
            "urea",
            ReferenceEntry::new(7.0, 20.0).with_aliases(&["blood urea nitrogen", "bun"]),
        )
        .with_entry(
            "sodium",
            ReferenceEntry::new(135.0, 145.0).with_aliases(&["na", "sodium serum"]),
        )
        .with_entry(
            "potassium",
            ReferenceEntry::new(3.5, 5.1).with_aliases(&["k", "potassium serum"]),
        )
        .with_entry(
            "chloride",
            ReferenceEntry::new(98.0, 106.0).with_aliases(&["cl", "chloride serum"]),
        )
        // Lipid panel
        .with_entry(
            "cholesterol",
            ReferenceEntry::new(0.0, 200.0).with_aliases(&["total cholesterol"]),
        )
        .with_entry(
            "hdl",
            ReferenceEntry::new(40.0, 60.0).with_aliases(&["high density lipoprotein"]),
        )
        .with_entry(
            "ldl",
            ReferenceEntry::new(0.0, 100.0).with_aliases(&["low density lipoprotein"]),
        )
        .with_entry("triglycerides", ReferenceEntry::new(0.0, 150.0))
        // Thyroid
        .with_entry(
            "tsh",
            ReferenceEntry::new(0.4, 4.0).with_aliases(&["thyroid stimulating hormone"]),
        )
        .with_entry(
            "t3",
            ReferenceEntry::new(80.0, 200.0).with_aliases(&["triiodothyronine"]),
        )
        .with_entry(
            "t4",
            ReferenceEntry::new(4.5, 12.0).with_aliases(&["thyroxine"]),
        )
        // Inflammation markers
        .with_entry(
            "esr",
            ReferenceEntry::new(0.0, 20.0).with_aliases(&["erythrocyte sedimentation rate"]),
        )
        .with_entry(
            "crp",
            ReferenceEntry::new(0.0, 3.0).with_aliases(&["c reactive protein"]),
        )
        .with_unit_synonym("g/dl", "g/dL")
        .with_unit_synonym("gm/dl", "g/dL")
        .with_unit_synonym("mg/dl", "mg/dL")
        .with_unit_synonym("/ul", "/uL")
        .with_unit_synonym("cells/ul", "/uL")
}
