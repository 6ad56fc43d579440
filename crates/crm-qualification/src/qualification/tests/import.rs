use super::common::*;
use crate::qualification::domain::{FieldValue, Vertical};
use crate::qualification::read_leads;

const EXPORT: &str = "\
custom_vertical,custom_company_establishment_year,custom_salary_offering,website,custom_recruitment_doability_approved,custom_scope_of_enquiry,no_of_employees
Permanent Staffing,2020,20.01 and above,acme.com,1,,
Labour Law Advisory & Compliance,,,,,true,
Learning & Development,,,,, ,12.5
";

#[test]
fn export_rows_become_typed_records() {
    let leads = read_leads(EXPORT.as_bytes()).expect("export parses");
    assert_eq!(leads.len(), 3);

    let permanent = &leads[0];
    assert_eq!(permanent.vertical(), Some(Vertical::PermanentStaffing));
    assert_eq!(
        permanent.get("custom_company_establishment_year"),
        Some(&FieldValue::Integer(2020))
    );
    assert!(permanent.get("custom_scope_of_enquiry").is_none());

    assert_eq!(
        leads[1].get("custom_scope_of_enquiry"),
        Some(&FieldValue::Bool(true))
    );
    assert!(leads[2].get("custom_scope_of_enquiry").is_none());
    assert_eq!(leads[2].get("no_of_employees"), Some(&FieldValue::Number(12.5)));
}

#[test]
fn imported_leads_score_like_hand_built_ones() {
    let engine = engine();
    let leads = read_leads(EXPORT.as_bytes()).expect("export parses");

    let scores: Vec<u32> = leads
        .iter()
        .map(|record| {
            let vertical = record.vertical().expect("scored vertical");
            engine.assess(vertical, record).score
        })
        .collect();

    assert_eq!(scores, vec![32, 9, 7]);
}
