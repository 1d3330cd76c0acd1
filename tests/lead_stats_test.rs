use lead_dumpster::core::TrackedField;
use lead_dumpster::{aggregate, analyze, parse, top_n, AggregationResult, Record, DEFAULT_TOP_N};

const LEADS: &str = "industry,companySize,location,status\n\
                     Tech,50,NYC,Contacted\n\
                     Tech,20,LA,New\n\
                     Finance,100,NYC,Contacted\n";

fn entries(result: &AggregationResult, field: TrackedField) -> Vec<(String, u64)> {
    result
        .table(field)
        .iter()
        .map(|(key, count)| (key.to_string(), count))
        .collect()
}

fn present_count(records: &[Record], field: TrackedField) -> u64 {
    records
        .iter()
        .filter(|record| record.present(field.field_name()).is_some())
        .count() as u64
}

#[test]
fn test_reference_scenario() {
    let result = analyze(LEADS);

    assert_eq!(
        entries(&result, TrackedField::Industry),
        vec![("Tech".to_string(), 2), ("Finance".to_string(), 1)]
    );
    assert_eq!(
        entries(&result, TrackedField::Location),
        vec![("NYC".to_string(), 2), ("LA".to_string(), 1)]
    );
    assert_eq!(
        entries(&result, TrackedField::Status),
        vec![("Contacted".to_string(), 2), ("New".to_string(), 1)]
    );
    assert_eq!(
        entries(&result, TrackedField::CompanySize),
        vec![
            ("50".to_string(), 1),
            ("20".to_string(), 1),
            ("100".to_string(), 1)
        ]
    );
}

#[test]
fn test_header_only_input() {
    let records = parse("industry,companySize,location,status\n");

    assert!(records.is_empty());
    assert!(aggregate(&records).is_empty());
}

#[test]
fn test_short_row_skips_only_missing_location() {
    let text = "industry,companySize,status,location\n\
                Tech,50,New,NYC\n\
                Retail,10,Contacted\n";

    let result = analyze(text);

    assert_eq!(result.industries.count("Retail"), 1);
    assert_eq!(result.company_sizes.count("10"), 1);
    assert_eq!(result.interaction_status.count("Contacted"), 1);
    assert_eq!(result.locations.total(), 1);
}

#[test]
fn test_row_count_matches_data_rows() {
    let text = format!("{}\n\n", LEADS);
    assert_eq!(parse(&text).len(), 3);
}

#[test]
fn test_sum_invariant_on_ragged_input() {
    let text = "industry,companySize,location,status\n\
                Tech,,NYC,New\n\
                ,50,,\n\
                Finance\n\
                Tech,0,LA,false,extra\n\
                Media,10.5,\"New York, NY\",TRUE\n";

    let records = parse(text);
    let result = aggregate(&records);

    for field in TrackedField::ALL {
        assert_eq!(
            result.table(field).total(),
            present_count(&records, field),
            "sum mismatch for {}",
            field.table_name()
        );
    }
    assert!(!result.industries.contains_key(""));
    assert_eq!(result.interaction_status.count("true"), 1);
    assert_eq!(result.company_sizes.count("10.5"), 1);
}

#[test]
fn test_aggregate_is_idempotent() {
    assert_eq!(analyze(LEADS), analyze(LEADS));
}

#[test]
fn test_top_locations_bound_and_order() {
    let mut text = String::from("industry,location\n");
    for city in 0..12 {
        for _ in 0..(city % 4 + 1) {
            text.push_str(&format!("Tech,City{}\n", city));
        }
    }

    let result = analyze(&text);
    let top = result.top_locations();

    assert_eq!(result.locations.len(), 12);
    assert_eq!(top.len(), DEFAULT_TOP_N);
    assert!(top.windows(2).all(|pair| pair[0].1 >= pair[1].1));
    let min_returned = top.iter().map(|(_, count)| *count).min().unwrap();
    for (key, count) in result.locations.iter() {
        if !top.iter().any(|(returned, _)| *returned == key) {
            assert!(count <= min_returned);
        }
    }
    // 同數量依首次出現順序
    assert_eq!(top[0], ("City3", 4));
    assert_eq!(top[1], ("City7", 4));
    assert_eq!(top_n(&result.locations, 3)[2], ("City11", 4));
}
