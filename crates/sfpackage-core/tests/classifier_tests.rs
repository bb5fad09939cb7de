use sfpackage_core::{
    parse_name_status, ChangeRecord, ChangeStatus, ClassifyError, DiffClassifier,
    ManifestSerializer, RunOutcome,
};

fn classify(diff: &str) -> Result<sfpackage_core::Classification, ClassifyError> {
    DiffClassifier::new("force-app").classify(&parse_name_status(diff))
}

fn members(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// ============================================================
// Shapes
// ============================================================

#[test]
fn test_modified_class() {
    let result = classify("M\tforce-app/main/default/classes/Foo.cls").unwrap();

    assert_eq!(result.added.members("classes").unwrap(), members(&["Foo"]));
    assert_eq!(result.staged_paths, vec!["force-app/main/default/classes/Foo.cls"]);
    assert!(!result.deletes_occurred);
    assert!(result.deleted.is_empty());
}

#[test]
fn test_added_field_uses_nested_type() {
    let result =
        classify("A\tforce-app/main/default/objects/Account/fields/MyField__c.field-meta.xml")
            .unwrap();

    assert_eq!(
        result.added.members("fields").unwrap(),
        members(&["Account.MyField__c"])
    );
    assert!(result.added.members("objects").is_none());
}

#[test]
fn test_email_in_folder() {
    let result = classify("M\tforce-app/main/default/email/Folder1/Welcome.email").unwrap();
    assert_eq!(
        result.added.members("email").unwrap(),
        members(&["Folder1/Welcome"])
    );
}

#[test]
fn test_deleted_meta_file() {
    let result = classify("D\tforce-app/main/default/classes/Foo.cls-meta.xml").unwrap();

    assert_eq!(result.deleted.members("classes").unwrap(), members(&["Foo"]));
    assert!(result.deletes_occurred);
    assert!(result.added.is_empty());
    assert!(result.staged_paths.is_empty());
}

#[test]
fn test_two_segment_path_aborts() {
    let err = classify(
        "M\tforce-app/main/default/classes/Foo.cls\nM\tforce-app/main/default/classes\n",
    )
    .unwrap_err();

    assert!(matches!(
        err,
        ClassifyError::TruncatedPath { ref path } if path == "force-app/main/default/classes"
    ));
    assert_eq!(RunOutcome::invalid_input(&err).exit_code(), 1);
}

// ============================================================
// Aggregation properties
// ============================================================

#[test]
fn test_member_and_meta_file_dedupe() {
    let result = classify(
        "A\tforce-app/main/default/classes/Foo.cls\n\
         A\tforce-app/main/default/classes/Foo.cls-meta.xml\n",
    )
    .unwrap();

    assert_eq!(result.added.members("classes").unwrap(), members(&["Foo"]));
    assert_eq!(result.staged_paths.len(), 2);
}

#[test]
fn test_first_seen_order_is_kept() {
    let result = classify(
        "M\tforce-app/main/default/triggers/ZTrigger.trigger\n\
         M\tforce-app/main/default/classes/Zeta.cls\n\
         M\tforce-app/main/default/classes/Alpha.cls\n\
         M\tforce-app/main/default/triggers/ATrigger.trigger\n",
    )
    .unwrap();

    let types: Vec<&str> = result.added.iter().map(|(name, _)| name).collect();
    assert_eq!(types, vec!["triggers", "classes"]);
    assert_eq!(
        result.added.members("classes").unwrap(),
        members(&["Zeta", "Alpha"])
    );
    assert_eq!(
        result.added.members("triggers").unwrap(),
        members(&["ZTrigger", "ATrigger"])
    );
}

#[test]
fn test_each_record_feeds_one_manifest() {
    let diff = "A\tforce-app/main/default/classes/New.cls\n\
                D\tforce-app/main/default/classes/Old.cls\n\
                T\tforce-app/main/default/classes/Odd.cls\n";
    let result = classify(diff).unwrap();

    assert!(result.added.contains("classes", "New"));
    assert!(!result.deleted.contains("classes", "New"));
    assert!(result.deleted.contains("classes", "Old"));
    assert!(!result.added.contains("classes", "Old"));
    assert!(!result.added.contains("classes", "Odd"));
    assert!(!result.deleted.contains("classes", "Odd"));
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].status, 'T');
}

#[test]
fn test_classification_is_deterministic() {
    let diff = "M\tforce-app/main/default/classes/Foo.cls\n\
                A\tforce-app/main/default/objects/Account/fields/F__c.field-meta.xml\n\
                A\tforce-app/main/default/objects/Account/validationRules/V.validationRule-meta.xml\n\
                D\tforce-app/main/default/email/Folder1/Bye.email\n\
                M\tforce-app/main/default/lwc/card/card.js\n";
    let serializer = ManifestSerializer::default();

    let first = classify(diff).unwrap();
    let second = classify(diff).unwrap();

    assert_eq!(
        serializer.serialize(&first.added, Some(50)).to_xml(),
        serializer.serialize(&second.added, Some(50)).to_xml()
    );
    assert_eq!(
        serializer.serialize(&first.deleted, None).to_xml(),
        serializer.serialize(&second.deleted, None).to_xml()
    );
}

#[test]
fn test_lwc_bundle_files_collapse_to_bundle() {
    let result = classify(
        "M\tforce-app/main/default/lwc/card/card.js\n\
         M\tforce-app/main/default/lwc/card/card.html\n\
         A\tforce-app/main/default/lwc/card/card.js-meta.xml\n",
    )
    .unwrap();

    assert_eq!(result.added.members("lwc").unwrap(), members(&["card/card"]));
    assert_eq!(result.staged_paths.len(), 3);
}

#[test]
fn test_records_from_constructor() {
    let records = vec![
        ChangeRecord::new(ChangeStatus::Modified, "src/classes/Foo.cls"),
        ChangeRecord::new(ChangeStatus::Deleted, "src/pages/Bar.page"),
    ];
    let result = DiffClassifier::new("src").classify(&records).unwrap();

    let added_xml = ManifestSerializer::default()
        .serialize(&result.added, None)
        .to_xml();
    let deleted_xml = ManifestSerializer::default()
        .serialize(&result.deleted, None)
        .to_xml();

    assert!(added_xml.contains("<name>ApexClass</name>"));
    assert!(deleted_xml.contains("<members>Bar</members>"));
    assert!(deleted_xml.contains("<name>ApexPage</name>"));
}

#[test]
fn test_manifest_json_keeps_order() {
    let result = classify(
        "M\tforce-app/main/default/triggers/T.trigger\n\
         M\tforce-app/main/default/classes/C.cls\n",
    )
    .unwrap();

    let json = serde_json::to_string(&result.added).unwrap();
    assert_eq!(json, r#"{"triggers":["T"],"classes":["C"]}"#);
}
