// Unit tests for UniCounsel matching

use unicounsel_match::core::{
    countries::countries_match,
    profiles::{country_profile, program_profile},
    scoring::{academic_score, financial_score, language_score, select_degree},
};
use unicounsel_match::models::{EnglishTest, Qualification, StudentProfile, VisaFit};

fn profile(marks: f64, qualification: Qualification, gap_years: u32) -> StudentProfile {
    StudentProfile {
        name: "Test Student".to_string(),
        nationality: "Indian".to_string(),
        marks,
        qualification,
        gap_years,
        field: "Computer Science".to_string(),
        budget_min: 20000.0,
        budget_max: 40000.0,
        ..Default::default()
    }
}

#[test]
fn test_academic_top_postgraduate_is_35() {
    for marks in [90.0, 94.5, 100.0] {
        assert_eq!(academic_score(&profile(marks, Qualification::Postgraduate, 0)), 35);
    }
}

#[test]
fn test_academic_score_bounded() {
    for marks in [-50.0, 0.0, 59.9, 60.0, 70.0, 80.0, 90.0, 150.0] {
        for qualification in [
            Qualification::Tenth,
            Qualification::Twelfth,
            Qualification::Undergraduate,
            Qualification::Postgraduate,
        ] {
            for gap_years in [0, 1, 5, 40] {
                let score = academic_score(&profile(marks, qualification, gap_years));
                assert!(score <= 40, "academic score {} out of range", score);
            }
        }
    }
}

#[test]
fn test_financial_within_budget_is_25() {
    let cs = program_profile("Computer Science");
    let usa = country_profile("USA");
    let cost = cs.avg_tuition + usa.living_cost;

    assert_eq!(financial_score(cost, cost, cost), 25);
}

#[test]
fn test_financial_scenario_band() {
    // 53000 against a 30000 midpoint is ~177% of budget
    assert_eq!(financial_score(53000.0, 20000.0, 40000.0), 10);
}

#[test]
fn test_language_absent_test_not_zero() {
    assert_eq!(language_score(None, None), 8);
    assert_eq!(language_score(Some(&EnglishTest::Ielts), Some(7.0)), 13);
    assert_eq!(language_score(Some(&EnglishTest::Toefl), Some(90.0)), 13);
    assert_eq!(
        language_score(Some(&EnglishTest::Other("Duolingo".to_string())), Some(120.0)),
        10
    );
}

#[test]
fn test_degree_selection_by_qualification() {
    let cs = program_profile("computer science");
    assert_eq!(select_degree(Qualification::Postgraduate, cs.degrees), "PhD Computer Science");
    assert_eq!(select_degree(Qualification::Undergraduate, cs.degrees), "MSc Computer Science");
    assert_eq!(select_degree(Qualification::Twelfth, cs.degrees), "BSc Computer Science");

    let business = program_profile("Business Analytics");
    assert_eq!(
        select_degree(Qualification::Undergraduate, business.degrees),
        "Master of Business Administration"
    );
}

#[test]
fn test_country_profiles() {
    assert_eq!(country_profile("USA").work_pr_score, 10);
    assert_eq!(country_profile("United States").work_pr_score, 10);
    assert_eq!(country_profile("Canada").visa_fit, VisaFit::High);
    assert_eq!(country_profile("Wakanda").work_pr_score, 5);
}

#[test]
fn test_country_matching_is_not_substring() {
    assert!(countries_match("USA", "United States of America"));
    assert!(!countries_match("India", "Indiana"));
    assert!(!countries_match("Guinea", "Papua New Guinea"));
}
