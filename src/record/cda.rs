//! Clinical-document reader.
//!
//! Reads the handful of fields the matching pipeline needs — patient id,
//! administrative gender, birth date, administered-substance names — and
//! degrades every absent optional field to a sentinel instead of failing.
//! Only a file that cannot be read or parsed at all is an error.

use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};

use super::types::{Age, Gender, PatientProfile, REFERENCE_YEAR, UNKNOWN};
use super::RecordError;

/// XML namespace of the clinical-document schema.
pub const HL7_NS: &str = "urn:hl7-org:v3";

/// Load one patient profile from a clinical-document file.
pub fn load_patient(path: &Path) -> Result<PatientProfile, RecordError> {
    let text = fs::read_to_string(path)?;
    let profile = parse_patient(&text)?;
    tracing::info!(
        patient_id = %profile.patient_id,
        medications = profile.medications.len(),
        "Loaded patient record"
    );
    Ok(profile)
}

/// Parse a clinical document already held in memory.
pub fn parse_patient(xml: &str) -> Result<PatientProfile, RecordError> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    let patient_id = find_descendant(root, "patientRole")
        .and_then(|role| role.children().find(|c| c.has_tag_name((HL7_NS, "id"))))
        .and_then(|id| id.attribute("extension"))
        .unwrap_or(UNKNOWN)
        .to_string();

    let gender = find_descendant(root, "administrativeGenderCode")
        .and_then(|el| el.attribute("code"))
        .map(Gender::from_code)
        .unwrap_or(Gender::Unknown);

    let age = find_descendant(root, "birthTime")
        .and_then(|el| el.attribute("value"))
        .map(|value| Age::from_birth_value(value, REFERENCE_YEAR))
        .unwrap_or(Age::Unknown);

    let medications = administered_substances(root);
    if medications.is_empty() {
        tracing::warn!(patient_id = %patient_id, "Record lists no administered substances");
    }

    Ok(PatientProfile {
        patient_id,
        age,
        gender,
        // The documents carry no separate problem list; substances stand in
        // for the conditions they treat. Kept identical on purpose.
        conditions: medications.clone(),
        medications,
    })
}

/// First descendant with the given local name in the document namespace.
fn find_descendant<'a, 'i>(root: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    root.descendants().find(|n| n.has_tag_name((HL7_NS, name)))
}

/// Every administered-substance name, in document order.
fn administered_substances(root: Node) -> Vec<String> {
    root.descendants()
        .filter(|n| n.has_tag_name((HL7_NS, "substanceAdministration")))
        .filter_map(|admin| {
            admin
                .descendants()
                .find(|n| n.has_tag_name((HL7_NS, "manufacturedMaterial")))
                .and_then(|material| {
                    material
                        .children()
                        .find(|c| c.has_tag_name((HL7_NS, "name")))
                })
                .and_then(|name| name.text())
                .map(|text| text.trim().to_string())
        })
        .filter(|name| !name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RECORD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ClinicalDocument xmlns="urn:hl7-org:v3">
  <recordTarget>
    <patientRole>
      <id extension="P-0042" root="2.16.840.1.113883.19.5"/>
      <patient>
        <administrativeGenderCode code="F" codeSystem="2.16.840.1.113883.5.1"/>
        <birthTime value="200001011230"/>
      </patient>
    </patientRole>
  </recordTarget>
  <component>
    <structuredBody>
      <entry>
        <substanceAdministration>
          <consumable>
            <manufacturedProduct>
              <manufacturedMaterial>
                <name>Tamoxifen</name>
              </manufacturedMaterial>
            </manufacturedProduct>
          </consumable>
        </substanceAdministration>
      </entry>
      <entry>
        <substanceAdministration>
          <consumable>
            <manufacturedProduct>
              <manufacturedMaterial>
                <name>Metformin</name>
              </manufacturedMaterial>
            </manufacturedProduct>
          </consumable>
        </substanceAdministration>
      </entry>
    </structuredBody>
  </component>
</ClinicalDocument>"#;

    const BARE_RECORD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ClinicalDocument xmlns="urn:hl7-org:v3">
  <recordTarget>
    <patientRole>
      <patient/>
    </patientRole>
  </recordTarget>
</ClinicalDocument>"#;

    #[test]
    fn full_record_extracts_every_field() {
        let profile = parse_patient(FULL_RECORD).unwrap();
        assert_eq!(profile.patient_id, "P-0042");
        assert_eq!(profile.gender, Gender::Female);
        assert_eq!(profile.age, Age::Known(24));
        assert_eq!(profile.medications, vec!["Tamoxifen", "Metformin"]);
    }

    #[test]
    fn conditions_mirror_medications() {
        let profile = parse_patient(FULL_RECORD).unwrap();
        assert_eq!(profile.conditions, profile.medications);
    }

    #[test]
    fn absent_fields_degrade_to_sentinels() {
        let profile = parse_patient(BARE_RECORD).unwrap();
        assert_eq!(profile.patient_id, "Unknown");
        assert_eq!(profile.gender, Gender::Unknown);
        assert_eq!(profile.age, Age::Unknown);
        assert!(profile.medications.is_empty());
        assert!(profile.conditions.is_empty());
    }

    #[test]
    fn male_gender_code_maps() {
        let xml = FULL_RECORD.replace(r#"code="F""#, r#"code="M""#);
        let profile = parse_patient(&xml).unwrap();
        assert_eq!(profile.gender, Gender::Male);
    }

    #[test]
    fn unrecognized_gender_code_degrades() {
        let xml = FULL_RECORD.replace(r#"code="F""#, r#"code="UN""#);
        let profile = parse_patient(&xml).unwrap();
        assert_eq!(profile.gender, Gender::Unknown);
    }

    #[test]
    fn substance_without_name_is_skipped() {
        let xml = FULL_RECORD.replace("<name>Metformin</name>", "<name>  </name>");
        let profile = parse_patient(&xml).unwrap();
        assert_eq!(profile.medications, vec!["Tamoxifen"]);
    }

    #[test]
    fn elements_outside_the_namespace_are_ignored() {
        let xml = r#"<ClinicalDocument xmlns="urn:hl7-org:v3">
  <other xmlns="urn:example:other">
    <patientRole><id extension="WRONG"/></patientRole>
  </other>
</ClinicalDocument>"#;
        let profile = parse_patient(xml).unwrap();
        assert_eq!(profile.patient_id, "Unknown");
    }

    #[test]
    fn malformed_markup_is_fatal() {
        let result = parse_patient("<ClinicalDocument><unclosed>");
        assert!(matches!(result, Err(RecordError::Xml(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_patient(Path::new("/nonexistent/patient.xml"));
        assert!(matches!(result, Err(RecordError::Io(_))));
    }
}
